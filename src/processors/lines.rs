//! Line-based processor: one tag tree per input line

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::core::config::EngineConfig;
use crate::core::errors::{Result, TranslationError};
use crate::core::oracle::TranslationOracle;
use crate::core::tag::Node;
use crate::core::translator::TagTranslator;
use crate::processors::markup::{parse_markup, render_markup};

/// Processor that turns lines into trees, translates and renders them
#[derive(Clone)]
pub struct LineProcessor {
    translator: TagTranslator,
}

impl LineProcessor {
    /// Create a new line processor
    pub fn new(translator: TagTranslator) -> Self {
        Self { translator }
    }

    /// Create from an oracle and configuration
    pub fn with_oracle(oracle: Arc<dyn TranslationOracle>, config: EngineConfig) -> Self {
        Self::new(TagTranslator::new(oracle, config))
    }

    pub fn translator(&self) -> &TagTranslator {
        &self.translator
    }

    /// Build the tree for one line
    ///
    /// Lines carrying the untranslatable marker are frozen whole and never
    /// parsed as markup.
    pub fn parse_line(&self, line: &str) -> Result<Node> {
        let config = self.translator.config();
        let line = line.trim();

        if line.contains(config.untranslatable_marker.as_str()) {
            return Ok(Node::frozen(vec![Node::leaf(line)]));
        }

        if config.markup {
            parse_markup(line)
        } else {
            Ok(Node::container(vec![Node::leaf(line)]))
        }
    }

    /// Render a translated tree back to a line
    pub fn render(&self, node: &Node) -> String {
        if self.translator.config().markup && node.is_translatable() {
            render_markup(node)
        } else {
            node.text()
        }
    }

    /// Translate a single line
    pub async fn translate_line(&self, line: &str) -> Result<String> {
        let tree = self.parse_line(line)?;
        let translated = self.translator.translate(tree).await?;
        Ok(self.render(&translated))
    }

    /// Translate multi-line content, one line at a time
    pub async fn translate_content(&self, content: &str) -> Result<String> {
        let mut out = Vec::new();
        for line in content.lines() {
            out.push(self.translate_line(line).await?);
        }

        let mut result = out.join("\n");
        if content.ends_with('\n') {
            result.push('\n');
        }
        Ok(result)
    }

    /// Translate lines from `reader` as they arrive, writing each to `writer`
    pub async fn translate_stream<R, W>(&self, reader: R, mut writer: W) -> Result<usize>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut count = 0;

        while let Some(line) = lines.next_line().await? {
            let translated = self.translate_line(&line).await?;
            writer.write_all(translated.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
            count += 1;
        }

        debug!("Translated {} streamed lines", count);
        Ok(count)
    }

    /// Translate a single file
    pub async fn translate_file(&self, input: &Path, output: &Path) -> Result<()> {
        debug!("Translating: {}", input.display());

        let content = tokio::fs::read_to_string(input)
            .await
            .map_err(|e| TranslationError::FileError {
                path: input.display().to_string(),
                message: e.to_string(),
            })?;

        let translated = self.translate_content(&content).await?;

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| TranslationError::FileError {
                        path: parent.display().to_string(),
                        message: e.to_string(),
                    })?;
            }
        }

        tokio::fs::write(output, translated)
            .await
            .map_err(|e| TranslationError::FileError {
                path: output.display().to_string(),
                message: e.to_string(),
            })?;

        info!("Translated: {} -> {}", input.display(), output.display());
        Ok(())
    }

    /// Find text files in directory
    pub fn find_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(TranslationError::FileError {
                path: dir.display().to_string(),
                message: "Not a directory".to_string(),
            });
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_text_file(&path) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Find text files recursively
    pub fn find_files_recursive(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(TranslationError::FileError {
                path: dir.display().to_string(),
                message: "Not a directory".to_string(),
            });
        }

        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|entry| entry.into_path())
            .filter(|path| path.is_file() && is_text_file(path))
            .collect();

        files.sort();
        Ok(files)
    }
}

/// Check if file is plain text
pub fn is_text_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("txt"))
        .unwrap_or(false)
}
