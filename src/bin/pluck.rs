//! pluck CLI - run extraction specs against JSON records.
//!
//! Reads a JSON record and a YAML extraction spec, prints the extracted
//! record as JSON. Also validates specs and formats character records.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process;

use pluck::{extract, Character, ExtractionSpec, Value};

#[derive(Parser)]
#[command(name = "pluck")]
#[command(version, about = "Declarative extraction for nested structured data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an extraction spec against a JSON record
    Extract {
        /// Path to the JSON input record
        #[arg(short, long)]
        input: PathBuf,

        /// Path to the extraction spec (YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Pretty-print the extracted record
        #[arg(short, long)]
        pretty: bool,
    },

    /// Validate an extraction spec without running it
    Validate {
        /// Path to the extraction spec (YAML)
        #[arg(short, long)]
        spec: PathBuf,
    },

    /// Print the formatted description of a character record (JSON)
    Describe {
        /// Path to the JSON character record
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Extract {
            input,
            spec,
            pretty,
        } => {
            let spec = ExtractionSpec::load_from_file(&spec)?;
            tracing::debug!("loaded spec with {} bindings", spec.len());

            let contents = fs::read_to_string(&input)?;
            let source: Value = serde_json::from_str(&contents)?;

            let result = extract(&source, &spec)?;
            tracing::info!("extracted {} fields from {}", result.len(), input.display());

            let json = if pretty {
                serde_json::to_string_pretty(&result)?
            } else {
                serde_json::to_string(&result)?
            };
            println!("{}", json);
        }

        Commands::Validate { spec } => {
            let spec = ExtractionSpec::load_from_file(&spec)?;
            println!("OK: {} bindings", spec.len());
        }

        Commands::Describe { input } => {
            let contents = fs::read_to_string(&input)?;
            let character: Character = serde_json::from_str(&contents)?;
            println!("{}", character.describe());
        }
    }

    Ok(())
}
