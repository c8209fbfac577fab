//! Core data models for translation runs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Translation strategy chosen for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Leaf string sent through the whitespace guard
    Leaf,
    /// Untranslatable container copied unchanged
    Frozen,
    /// Parent translated once, children spliced back in
    Injection,
    /// Each child translated independently
    PerChild,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Leaf => write!(f, "leaf"),
            Strategy::Frozen => write!(f, "frozen"),
            Strategy::Injection => write!(f, "injection"),
            Strategy::PerChild => write!(f, "per-child"),
        }
    }
}

/// Counters accumulated over one or more tree translations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationStats {
    pub oracle_calls: usize,
    pub leaves_translated: usize,
    pub frozen_nodes: usize,
    pub injections: usize,
    /// Injection attempts that fell back to per-child translation
    pub fallbacks: usize,
    pub per_child_nodes: usize,
}

impl TranslationStats {
    pub fn record(&mut self, strategy: Strategy) {
        match strategy {
            Strategy::Leaf => self.leaves_translated += 1,
            Strategy::Frozen => self.frozen_nodes += 1,
            Strategy::Injection => self.injections += 1,
            Strategy::PerChild => self.per_child_nodes += 1,
        }
    }

    /// Share of injection attempts that succeeded
    pub fn injection_rate(&self) -> f64 {
        let attempts = self.injections + self.fallbacks;
        if attempts == 0 {
            return 0.0;
        }
        self.injections as f64 / attempts as f64
    }
}
