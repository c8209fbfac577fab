//! Main entry point for the Tag Translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tag_translator::cli::commands::{self, Commands};
use tag_translator::{DepthMode, EngineConfig};

/// Tag Translator - structure-preserving translation over a flat-text oracle
#[derive(Parser, Debug)]
#[command(name = "tag-translator", version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file (TOML, YAML or JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// How structural depth is computed
    #[arg(long, value_enum)]
    depth_mode: Option<DepthMode>,

    /// Skip injection for parents longer than this many characters
    #[arg(long)]
    max_sequence_length: Option<usize>,

    /// Translate sibling subtrees concurrently
    #[arg(long)]
    concurrent: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging; stdout is reserved for translated output
    let log_level = if args.verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .ok()
                .filter(|_| !args.verbose)
                .unwrap_or_else(|| format!("tag_translator={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = EngineConfig::load(args.config.as_deref())?;

    // Override config with CLI args if provided
    if let Some(depth_mode) = args.depth_mode {
        config.depth_mode = depth_mode;
    }
    if let Some(max_sequence_length) = args.max_sequence_length {
        config.max_sequence_length = max_sequence_length;
    }
    if args.concurrent {
        config.concurrent_siblings = true;
    }

    // Execute command
    match args.command {
        Some(Commands::Translate {
            file,
            output,
            glossary,
            markup,
            recursive,
        }) => {
            config.markup |= markup;
            config.validate()?;
            commands::handle_translate(config, file, output, glossary, recursive).await?;
        }
        Some(Commands::Inspect { file, markup }) => {
            config.markup |= markup;
            commands::handle_inspect(config, file).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
