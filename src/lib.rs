//! Tag Translator - structure-preserving translation of nested text spans
//!
//! Translates a tree of nested text fragments with an oracle that only
//! understands flat strings, then recovers which part of the translated
//! parent belongs to each translated child span.

#![forbid(unsafe_code)]

pub mod cli;
pub mod core;
pub mod processors;

// Re-export key types for convenience
pub use self::core::{
    config::EngineConfig,
    errors::{Result, TranslationError},
    glossary::GlossaryOracle,
    injection::{InjectionCandidate, InjectionOutcome, InjectionPlanner, Rejection},
    mock::{MockMode, MockOracle},
    models::{Strategy, TranslationStats},
    oracle::{ChunkStream, TranslationOracle},
    tag::{Container, DepthMode, Node},
    translator::TagTranslator,
    whitespace::{translate_preserving_whitespace, translate_to_string},
};

pub use self::processors::{
    lines::LineProcessor,
    markup::{parse_markup, render_markup},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
