//! Translation oracle abstraction
//!
//! The oracle translates flat strings only; it has no notion of structure.
//! Output arrives as a stream of chunks whose concatenation is the full
//! translation. A single chunk and many partial chunks are both valid.

use futures::stream::BoxStream;

use crate::core::errors::Result;

/// Stream of translated chunks
pub type ChunkStream<'a> = BoxStream<'a, Result<String>>;

/// Flat-text translation capability
pub trait TranslationOracle: Send + Sync {
    /// Translate `text`, yielding chunks as they become available
    fn translate_flat<'a>(&'a self, text: &'a str) -> ChunkStream<'a>;

    /// Name used in logs
    fn name(&self) -> &str;
}
