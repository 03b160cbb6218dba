//! SOF CLI - Command-line interface
//!
//! Usage:
//!   sof process <files>...
//!   sof extract <file>

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use sof_core::AppConfig;
use sof_parser::TextExtractor;
use sof_pipeline::{DocumentInput, Pipeline};

#[derive(Parser)]
#[command(name = "sof")]
#[command(about = "Statement of Facts timeline extraction CLI")]
#[command(version)]
struct Cli {
    /// Optional TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process SOF documents into event timelines (JSON on stdout)
    Process {
        /// Document paths (pdf, docx, txt)
        files: Vec<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Dump the extracted raw text of one document
    Extract {
        /// Document path
        file: PathBuf,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => Ok(AppConfig::from_file(path)?),
        None => Ok(AppConfig::from_env()?),
    }
}

fn read_document(path: &PathBuf) -> anyhow::Result<DocumentInput> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(DocumentInput::new(filename, bytes))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Process { files, pretty } => {
            anyhow::ensure!(!files.is_empty(), "no input files given");

            let pipeline = Pipeline::from_config(&config)?;
            let docs = files
                .iter()
                .map(read_document)
                .collect::<anyhow::Result<Vec<_>>>()?;

            let results = pipeline.process_batch(&docs);
            let output = serde_json::json!({ "results": results });

            if pretty {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", serde_json::to_string(&output)?);
            }
        }
        Commands::Extract { file } => {
            let doc = read_document(&file)?;
            let text = TextExtractor::new()
                .extract(&doc.bytes, &doc.filename)
                .with_context(|| format!("extraction failed for {}", file.display()))?;
            println!("{text}");
        }
    }

    Ok(())
}
