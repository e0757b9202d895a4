//! The `sqi compute` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use sqi_core::config::load_config_from;
use sqi_core::parser::load_payload;
use sqi_core::{SqiEngine, SqiResult};

pub fn execute(
    input_path: PathBuf,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
    to_stdout: bool,
    summary: bool,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let input = load_payload(&input_path)?;

    tracing::info!(
        "computing SQI for {} ({} attempts)",
        input.student_id,
        input.attempts.len()
    );

    let engine = SqiEngine::new(config.weights.clone());
    let result = engine
        .compute_input(&input)
        .context("error computing SQI")?;

    if summary {
        print_summary(&result);
    }

    if to_stdout {
        println!("{}", result.to_json(config.pretty)?);
    } else {
        let dir = output.unwrap_or(config.output_dir);
        let path = dir.join(result.default_file_name());
        result.save_json(&path)?;
        eprintln!("Result saved to: {}", path.display());
    }

    Ok(())
}

fn print_summary(result: &SqiResult) {
    use comfy_table::{Cell, Table};

    eprintln!(
        "\nStudent {}: overall SQI {:.1}",
        result.student_id, result.overall_sqi
    );

    let mut topics = Table::new();
    topics.set_header(vec!["Topic", "SQI"]);
    for t in &result.topic_scores {
        topics.add_row(vec![Cell::new(&t.topic), Cell::new(format!("{:.1}", t.sqi))]);
    }
    eprintln!("\n{topics}");

    let mut ranked = Table::new();
    ranked.set_header(vec!["#", "Concept", "Topic", "SQI", "Weight", "Reasons"]);
    for (i, rc) in result.ranked_concepts_for_summary.iter().enumerate() {
        let sqi = result
            .concept_score(&rc.topic, &rc.concept)
            .unwrap_or_default();
        let reasons: Vec<&str> = rc.reasons.iter().map(|r| r.as_str()).collect();
        ranked.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&rc.concept),
            Cell::new(&rc.topic),
            Cell::new(format!("{sqi:.1}")),
            Cell::new(format!("{:.2}", rc.weight)),
            Cell::new(reasons.join(", ")),
        ]);
    }
    eprintln!("\n{ranked}");
}
