//! CLI command definitions and handlers

use clap::Subcommand;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::config::EngineConfig;
use crate::core::glossary::GlossaryOracle;
use crate::core::oracle::TranslationOracle;
use crate::core::tag::DepthMode;
use crate::processors::lines::LineProcessor;

/// Commands for the tag translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate text line by line, preserving inline structure
    Translate {
        /// Input file or directory (reads stdin when omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Glossary file (YAML or JSON) backing the translation
        #[arg(short, long)]
        glossary: Option<PathBuf>,

        /// Parse `[...]` and `{...}` spans in each line
        #[arg(long)]
        markup: bool,

        /// Recursively translate subdirectories
        #[arg(short, long)]
        recursive: bool,
    },

    /// Print parsed trees and their structural depth as JSON
    Inspect {
        /// Input file (reads stdin when omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Parse `[...]` and `{...}` spans in each line
        #[arg(long)]
        markup: bool,
    },
}

/// Build the oracle used by the CLI
fn load_oracle(glossary: Option<&Path>) -> anyhow::Result<Arc<dyn TranslationOracle>> {
    use tracing::warn;

    let oracle = match glossary {
        Some(path) => GlossaryOracle::from_file(path)?,
        None => {
            warn!("No glossary given; text passes through untranslated");
            GlossaryOracle::empty()?
        }
    };
    Ok(Arc::new(oracle))
}

/// Default output location next to the input
fn default_output(file: &Path) -> PathBuf {
    if file.is_dir() {
        return file.join("translated");
    }

    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{}_translated", stem);
    if let Some(ext) = file.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    file.with_file_name(name)
}

/// Handle translate command
pub async fn handle_translate(
    config: EngineConfig,
    file: Option<PathBuf>,
    output: Option<PathBuf>,
    glossary: Option<PathBuf>,
    recursive: bool,
) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Instant;
    use tracing::{info, warn};

    let oracle = load_oracle(glossary.as_deref())?;
    info!("Oracle: {}", oracle.name());
    info!("Depth mode: {}", config.depth_mode);
    if config.depth_mode == DepthMode::Literal {
        warn!("Literal depth mode never injects into leaf-terminated trees; see --depth-mode");
    }

    let processor = LineProcessor::with_oracle(oracle, config);

    let Some(file) = file else {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let count = processor.translate_stream(stdin, tokio::io::stdout()).await?;
        info!("Translated {} lines from stdin", count);
        return Ok(());
    };

    let start_time = Instant::now();
    let output = output.unwrap_or_else(|| default_output(&file));

    info!("Input: {}", file.display());
    info!("Output: {}", output.display());

    let jobs: Vec<(PathBuf, PathBuf)> = if file.is_dir() {
        let files = if recursive {
            processor.find_files_recursive(&file)?
        } else {
            processor.find_files(&file)?
        };
        files
            .into_iter()
            .map(|path| {
                let relative = path.strip_prefix(&file).unwrap_or(&path).to_path_buf();
                let target = output.join(relative);
                (path, target)
            })
            .collect()
    } else {
        vec![(file, output)]
    };

    if jobs.is_empty() {
        anyhow::bail!("No text files found");
    }

    let pb = ProgressBar::new(jobs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
            .progress_chars("=>-"),
    );

    let mut processed = 0;
    let mut failed = 0;

    for (input, target) in jobs {
        pb.set_message(format!("Processing: {}", input.display()));

        match processor.translate_file(&input, &target).await {
            Ok(_) => {
                processed += 1;
                pb.inc(1);
            }
            Err(e) => {
                failed += 1;
                pb.set_message(format!("Failed: {} - {}", input.display(), e));
                eprintln!("Error processing {}: {}", input.display(), e);
            }
        }
    }

    pb.finish_with_message("Completed");

    let duration = start_time.elapsed();
    let stats = processor.translator().stats().await;
    info!(
        "Completed: {} processed, {} failed in {:?}",
        processed, failed, duration
    );

    println!("\n✅ Translation completed!");
    println!("   Processed: {}", processed);
    println!("   Failed: {}", failed);
    println!("   Oracle calls: {}", stats.oracle_calls);
    println!(
        "   Injections: {} ({} fell back)",
        stats.injections, stats.fallbacks
    );
    println!("   Time: {:?}", duration);

    Ok(())
}

/// Describe every line of `content` as parsed by `processor`
pub fn inspect_content(
    processor: &LineProcessor,
    content: &str,
) -> anyhow::Result<serde_json::Value> {
    let mut lines = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let tree = processor.parse_line(line)?;
        lines.push(serde_json::json!({
            "line": index + 1,
            "text": tree.text(),
            "depth": {
                "literal": tree.depth(DepthMode::Literal),
                "incremented": tree.depth(DepthMode::Incremented),
            },
            "tree": tree,
        }));
    }

    Ok(serde_json::Value::Array(lines))
}

/// Handle inspect command
pub async fn handle_inspect(config: EngineConfig, file: Option<PathBuf>) -> anyhow::Result<()> {
    use tokio::io::AsyncReadExt;

    let content = match file {
        Some(path) => tokio::fs::read_to_string(&path).await?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    let processor = LineProcessor::with_oracle(Arc::new(GlossaryOracle::empty()?), config);
    let report = inspect_content(&processor, &content)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
