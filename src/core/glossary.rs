//! Dictionary-backed translation oracle
//!
//! Offline and deterministic: a whole-text entry wins, otherwise each word
//! is looked up on its own and unknown words pass through unchanged.
//! Glossaries are flat `source: translation` maps in YAML or JSON.

use futures::stream::{self, StreamExt};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use crate::core::errors::{Result, TranslationError};
use crate::core::oracle::{ChunkStream, TranslationOracle};

/// Glossary oracle
#[derive(Debug, Clone)]
pub struct GlossaryOracle {
    entries: HashMap<String, String>,
    word: Regex,
}

impl GlossaryOracle {
    /// Create from an in-memory map
    pub fn new(entries: HashMap<String, String>) -> Result<Self> {
        let word = Regex::new(r"\w+").map_err(|e| TranslationError::InternalError(e.to_string()))?;
        Ok(Self { entries, word })
    }

    /// Glossary with no entries; every input passes through
    pub fn empty() -> Result<Self> {
        Self::new(HashMap::new())
    }

    /// Load a YAML (`.yaml`/`.yml`) or JSON (`.json`) glossary
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| TranslationError::FileError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let entries: HashMap<String, String> = match extension.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            other => {
                return Err(TranslationError::InvalidFormat {
                    format: format!("glossary extension '{}'", other),
                })
            }
        };

        info!("Loaded {} glossary entries from {}", entries.len(), path.display());
        Self::new(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Translate a flat string
    pub fn lookup(&self, text: &str) -> String {
        if let Some(whole) = self.entries.get(text.trim()) {
            return whole.clone();
        }

        self.word
            .replace_all(text, |caps: &Captures| {
                let word = &caps[0];
                self.entries
                    .get(word)
                    .cloned()
                    .unwrap_or_else(|| word.to_string())
            })
            .into_owned()
    }
}

impl TranslationOracle for GlossaryOracle {
    fn translate_flat<'a>(&'a self, text: &'a str) -> ChunkStream<'a> {
        let translated = self.lookup(text);
        debug!("Glossary: '{}' -> '{}'", text, translated);
        stream::once(async move { Ok::<_, TranslationError>(translated) }).boxed()
    }

    fn name(&self) -> &str {
        "Glossary"
    }
}
