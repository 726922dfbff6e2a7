//! docsift command-line interface.

use anyhow::Context;
use clap::{Parser, Subcommand};
use docsift::{classify_path, IngestService, MediaType, Pipeline, ServiceConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docsift", version, about = "Extract text from documents", long_about = None)]
struct Cli {
    /// Path to a docsift.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect a file's media type from its content signature
    Classify {
        /// File to classify
        file: PathBuf,
    },
    /// Extract plain text from a file
    Extract {
        /// File to extract
        file: PathBuf,
        /// Use this media type label instead of sniffing the content
        #[arg(long)]
        media_type: Option<String>,
        /// Emit the full result as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Run the full ingest flow: classify, record, extract, persist artifact
    Ingest {
        /// File to ingest
        file: PathBuf,
        /// Root directory for staged uploads and JSON artifacts
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ServiceConfig> {
    match path {
        Some(path) => ServiceConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(ServiceConfig::discover()?.unwrap_or_default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_ref())?;
    tracing::debug!(?config, "resolved configuration");

    match cli.command {
        Command::Classify { file } => {
            let media_type = classify_path(&file).await?;
            println!("{media_type}");
        }
        Command::Extract { file, media_type, json } => {
            let pipeline = Pipeline::new(config.extraction.clone());
            let result = match media_type {
                Some(label) => pipeline.run(&file, MediaType::from(label)).await?,
                None => pipeline.classify_and_run(&file).await?,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", result.text);
            }
        }
        Command::Ingest { file, data_dir } => {
            let filename = file
                .file_name()
                .and_then(|n| n.to_str())
                .context("file has no usable name")?
                .to_string();
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;

            let service_config = ServiceConfig {
                upload_dir: data_dir.join("uploads"),
                artifact_dir: data_dir.join("artifacts"),
                ..config
            };
            let service = IngestService::new(service_config);
            let outcome = service.ingest(&filename, &bytes, None).await?;

            println!("record id:  {}", outcome.record_id);
            println!("media type: {}", outcome.media_type);
            println!("artifact:   {}", outcome.artifact_path.display());
        }
    }

    Ok(())
}
