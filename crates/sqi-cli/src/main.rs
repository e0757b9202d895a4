//! sqi CLI — compute Student Quality Index payloads from attempt data.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sqi", version, about = "Student Quality Index engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the SQI result for a student attempt file
    Compute {
        /// Path to the attempt payload JSON
        #[arg(long)]
        input: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the result JSON to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Print topic and ranking tables to stderr
        #[arg(long)]
        summary: bool,
    },

    /// Validate an attempt payload without scoring it
    Validate {
        /// Path to the attempt payload JSON
        #[arg(long)]
        input: PathBuf,
    },

    /// Create a starter config and sample attempt file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sqi=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compute {
            input,
            config,
            output,
            stdout,
            summary,
        } => commands::compute::execute(input, config, output, stdout, summary),
        Commands::Validate { input } => commands::validate::execute(input),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
