use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sqi_core::model::{Attempt, Difficulty, Importance, QuestionType};
use sqi_core::parser::parse_payload;
use sqi_core::scorer::AttemptScorer;
use sqi_core::SqiEngine;

fn make_attempt(i: usize) -> Attempt {
    let importance = match i % 3 {
        0 => Importance::A,
        1 => Importance::B,
        _ => Importance::C,
    };
    let difficulty = match i % 4 {
        0 => Difficulty::E,
        1 | 2 => Difficulty::M,
        _ => Difficulty::H,
    };
    Attempt {
        topic: format!("topic-{}", i % 8),
        concept: format!("concept-{}", i % 40),
        correct: i % 5 != 0,
        marks: 4.0,
        neg_marks: 1.0,
        importance,
        difficulty,
        kind: if i % 2 == 0 {
            QuestionType::Theory
        } else {
            QuestionType::Practical
        },
        time_spent_sec: (i % 200) as f64,
        expected_time_sec: 90.0,
        marked_review: i % 7 == 0,
        revisits: (i % 3) as u32,
    }
}

fn bench_attempt_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("attempt_score");
    let scorer = AttemptScorer::default();

    group.bench_function("correct", |b| {
        let attempt = make_attempt(1);
        b.iter(|| scorer.score(0, black_box(&attempt)))
    });

    group.bench_function("wrong_reviewed_overtime", |b| {
        let attempt = Attempt {
            correct: false,
            marked_review: true,
            time_spent_sec: 400.0,
            ..make_attempt(0)
        };
        b.iter(|| scorer.score(0, black_box(&attempt)))
    });

    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    let engine = SqiEngine::default();

    for n in [10usize, 1_000, 10_000] {
        let attempts: Vec<Attempt> = (0..n).map(make_attempt).collect();
        group.bench_function(format!("compute/{n}"), |b| {
            b.iter(|| engine.compute("bench", black_box(&attempts)))
        });
    }

    let payload = serde_json::json!({
        "student_id": "bench",
        "attempts": (0..1_000).map(make_attempt).collect::<Vec<_>>(),
    })
    .to_string();
    group.bench_function("parse_payload/1000", |b| {
        b.iter(|| parse_payload(black_box(&payload)))
    });

    group.finish();
}

criterion_group!(benches, bench_attempt_score, bench_engine);
criterion_main!(benches);
