//! Boundary whitespace restoration around oracle calls
//!
//! Oracles routinely drop a leading or trailing space, which glues words
//! together once translated spans are concatenated back. The rule is
//! applied to every chunk independently and keeps no state between chunks.

use futures::{StreamExt, TryStreamExt};

use crate::core::errors::{Result, TranslationError};
use crate::core::oracle::{ChunkStream, TranslationOracle};

/// Translate `input`, restoring boundary spaces on each emitted chunk
pub fn translate_preserving_whitespace<'a, O>(oracle: &'a O, input: &'a str) -> ChunkStream<'a>
where
    O: TranslationOracle + ?Sized,
{
    let leading = input.starts_with(' ');
    let trailing = input.ends_with(' ');

    oracle
        .translate_flat(input)
        .map_ok(move |chunk| restore_boundary_spaces(chunk, leading, trailing))
        .boxed()
}

/// Translate `input` and concatenate the guarded chunks
pub async fn translate_to_string<O>(oracle: &O, input: &str) -> Result<String>
where
    O: TranslationOracle + ?Sized,
{
    translate_preserving_whitespace(oracle, input)
        .try_fold(String::new(), |mut acc, chunk| async move {
            acc.push_str(&chunk);
            Ok::<_, TranslationError>(acc)
        })
        .await
}

/// Prepend/append a single space where the source had one and the chunk lacks it
pub fn restore_boundary_spaces(mut chunk: String, leading: bool, trailing: bool) -> String {
    if leading && !chunk.starts_with(' ') {
        chunk.insert(0, ' ');
    }
    if trailing && !chunk.ends_with(' ') {
        chunk.push(' ');
    }
    chunk
}
