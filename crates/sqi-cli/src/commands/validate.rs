//! The `sqi validate` command.

use std::path::PathBuf;

use anyhow::Result;

use sqi_core::parser::{load_payload, validate_input};

pub fn execute(input_path: PathBuf) -> Result<()> {
    let input = load_payload(&input_path)?;

    println!(
        "Student: {} ({} attempts)",
        input.student_id,
        input.attempts.len()
    );

    let warnings = validate_input(&input);
    for w in &warnings {
        let prefix = w
            .attempt
            .map(|i| format!("  [attempt {i}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Input valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
