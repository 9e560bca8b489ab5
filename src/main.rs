//! Main entry point for the constructed-language translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod core;
mod processors;
mod storage;

use crate::cli::commands::Commands;
use crate::core::config::TranslatorConfig;

/// Constructed-language translator with a trainable n-gram lexicon engine
#[derive(Parser, Debug)]
#[command(name = "conlang", version, about, long_about = None)]
struct Args {
    /// Path to a JSON or YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}={}", env!("CARGO_CRATE_NAME"), log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load and validate configuration
    let config = match &args.config {
        Some(path) => TranslatorConfig::from_file(path)?,
        None => TranslatorConfig::from_env()?,
    };
    config.validate()?;

    // Execute command
    match args.command {
        Some(Commands::Translate {
            sentences,
            corpus,
            lexicon,
            ephemeral,
        }) => {
            cli::commands::handle_translate(&config, sentences, corpus, lexicon, ephemeral)
                .await?;
        }
        Some(Commands::Batch {
            input,
            output,
            recursive,
            corpus,
            lexicon,
        }) => {
            cli::commands::handle_batch(&config, input, output, recursive, corpus, lexicon)
                .await?;
        }
        Some(Commands::Sample {
            count,
            min_len,
            max_len,
            corpus,
        }) => {
            cli::commands::handle_sample(&config, count, min_len, max_len, corpus).await?;
        }
        None => {
            // Default run: translate the built-in sample sentences
            cli::commands::handle_translate(&config, Vec::new(), None, None, false).await?;
        }
    }

    Ok(())
}
