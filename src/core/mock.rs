//! Deterministic oracle for tests and dry runs
//!
//! No network, no model. Every input is recorded so callers can assert
//! exactly what was sent to the oracle.

use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::core::errors::TranslationError;
use crate::core::oracle::{ChunkStream, TranslationOracle};

/// Mock translation modes
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Exact-match lookup; unknown inputs pass through unchanged
    Mappings(HashMap<String, String>),
    /// Uppercase the input
    Uppercase,
    /// Reverse word order, dropping boundary whitespace
    Reorder,
    /// Return input unchanged
    NoOp,
    /// Fail every call with this message
    Error(String),
}

/// Mock oracle
#[derive(Debug)]
pub struct MockOracle {
    mode: MockMode,
    /// Split output into chunks of this many chars; 0 means a single chunk
    chunk_size: usize,
    fail_on: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl MockOracle {
    /// Create a mock with the given mode
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            chunk_size: 0,
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Mapping mode from `(source, translation)` pairs
    pub fn with_mappings<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::new(MockMode::Mappings(map))
    }

    /// Emit output in chunks of `chunk_size` chars
    pub fn chunked(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Fail only when the input equals `text`
    pub fn failing_on(mut self, text: impl Into<String>) -> Self {
        self.fail_on = Some(text.into());
        self
    }

    /// Every input received so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, text: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(text.to_string());
        }
    }

    fn apply(&self, text: &str) -> Result<String, TranslationError> {
        if self.fail_on.as_deref() == Some(text) {
            return Err(TranslationError::oracle(format!("refused input: {}", text)));
        }

        match &self.mode {
            MockMode::Mappings(map) => Ok(map.get(text).cloned().unwrap_or_else(|| text.to_string())),
            MockMode::Uppercase => Ok(text.to_uppercase()),
            MockMode::Reorder => Ok(text.split_whitespace().rev().collect::<Vec<_>>().join(" ")),
            MockMode::NoOp => Ok(text.to_string()),
            MockMode::Error(msg) => Err(TranslationError::oracle(msg.clone())),
        }
    }

    fn split(&self, translated: String) -> Vec<String> {
        if self.chunk_size == 0 || translated.is_empty() {
            return vec![translated];
        }

        let chars: Vec<char> = translated.chars().collect();
        chars
            .chunks(self.chunk_size)
            .map(|chunk| chunk.iter().collect())
            .collect()
    }
}

impl TranslationOracle for MockOracle {
    fn translate_flat<'a>(&'a self, text: &'a str) -> ChunkStream<'a> {
        self.record(text);

        match self.apply(text) {
            Ok(translated) => stream::iter(self.split(translated).into_iter().map(Ok)).boxed(),
            Err(e) => stream::iter(vec![Err(e)]).boxed(),
        }
    }

    fn name(&self) -> &str {
        "Mock Oracle"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;

    async fn collect(oracle: &MockOracle, text: &str) -> Vec<String> {
        oracle.translate_flat(text).try_collect().await.unwrap()
    }

    #[tokio::test]
    async fn test_mappings_and_passthrough() {
        let oracle = MockOracle::with_mappings([("world", "monde")]);
        assert_eq!(collect(&oracle, "world").await, vec!["monde"]);
        assert_eq!(collect(&oracle, "other").await, vec!["other"]);
        assert_eq!(oracle.calls(), vec!["world", "other"]);
    }

    #[tokio::test]
    async fn test_chunked_output() {
        let oracle = MockOracle::new(MockMode::NoOp).chunked(2);
        assert_eq!(collect(&oracle, "abcde").await, vec!["ab", "cd", "e"]);
    }

    #[tokio::test]
    async fn test_reorder() {
        let oracle = MockOracle::new(MockMode::Reorder);
        assert_eq!(collect(&oracle, " one two ").await, vec!["two one"]);
    }

    #[tokio::test]
    async fn test_error_modes() {
        let oracle = MockOracle::new(MockMode::Error("down".to_string()));
        let result: Result<Vec<String>, _> = oracle.translate_flat("x").try_collect().await;
        assert!(matches!(result, Err(TranslationError::OracleError { .. })));

        let oracle = MockOracle::new(MockMode::Uppercase).failing_on("bad");
        assert_eq!(collect(&oracle, "good").await, vec!["GOOD"]);
        let result: Result<Vec<String>, _> = oracle.translate_flat("bad").try_collect().await;
        assert!(result.is_err());
    }
}
