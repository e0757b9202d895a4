//! The `sqi init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("sqi.toml").exists() {
        println!("sqi.toml already exists, skipping.");
    } else {
        std::fs::write("sqi.toml", SAMPLE_CONFIG)?;
        println!("Created sqi.toml");
    }

    let sample_path = std::path::Path::new("sample-attempts.json");
    if sample_path.exists() {
        println!("sample-attempts.json already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_ATTEMPTS)?;
        println!("Created sample-attempts.json");
    }

    println!("\nNext steps:");
    println!("  1. Adjust the weight tables in sqi.toml if needed");
    println!("  2. Run: sqi validate --input sample-attempts.json");
    println!("  3. Run: sqi compute --input sample-attempts.json --summary");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# sqi configuration

output_dir = "./sqi-results"
pretty = true

# Multipliers per label. Labels missing from a table weigh 1.0.
[weights.importance]
A = 1.0
B = 0.7
C = 0.5

[weights.difficulty]
E = 0.6
M = 1.0
H = 1.4

[weights.type]
Practical = 1.1
Theory = 1.0
"#;

const SAMPLE_ATTEMPTS: &str = r#"{
  "student_id": "S123",
  "attempts": [
    {
      "topic": "Electrostatics",
      "concept": "Coulomb's law",
      "correct": true,
      "marks": 4,
      "neg_marks": 1,
      "importance": "A",
      "difficulty": "M",
      "type": "Theory",
      "time_spent_sec": 70,
      "expected_time_sec": 90,
      "marked_review": false,
      "revisits": 0
    },
    {
      "topic": "Electrostatics",
      "concept": "Gauss's law",
      "correct": false,
      "marks": 4,
      "neg_marks": 1,
      "importance": "A",
      "difficulty": "H",
      "type": "Practical",
      "time_spent_sec": 200,
      "expected_time_sec": 90,
      "marked_review": true,
      "revisits": 1
    },
    {
      "topic": "Optics",
      "concept": "Refraction",
      "correct": true,
      "marks": 4,
      "neg_marks": 1,
      "importance": "B",
      "difficulty": "E",
      "type": "Theory",
      "time_spent_sec": 40,
      "expected_time_sec": 60,
      "marked_review": false,
      "revisits": 2
    }
  ]
}
"#;
