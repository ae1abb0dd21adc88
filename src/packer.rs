//! Greedy sentence packing with trailing-sentence overlap.
//!
//! ## The Algorithm
//!
//! Sentences are appended to a buffer until the next one would push it past
//! `max_chunk_chars`. The buffer is then closed as a chunk and the next
//! buffer is seeded with its last `overlap_sentences` sentences:
//!
//! ```text
//! max = 40, overlap = 1
//!
//! Sentences: [A(15) B(12) C(18) D(9)]
//!
//! buffer [A]        15
//! buffer [A B]      15 + 1 + 12 = 28
//! + C -> 28 + 1 + 18 = 47 > 40, close "A B", seed [B]
//! buffer [B C]      12 + 1 + 18 = 31
//! buffer [B C D]    31 + 1 + 9  = 41 > 40, close "B C", seed [C]
//! buffer [C D]      end of input, close "C D"
//! ```
//!
//! Sentences are joined with a single space, and the running length counts
//! that separator.
//!
//! ## Oversized Sentences
//!
//! A sentence longer than `max_chunk_chars` arriving at an empty buffer is
//! emitted on its own. Sentences are never cut, so the bound is advisory.
//! Overlap seeds are carried regardless of size, which can also push a
//! chunk past the bound when sentences are long relative to it.

use crate::sentence::{self, SentenceSplitter};
use crate::{ChunkConfig, Result};

/// Splits text into sentences and packs them into bounded chunks.
///
/// ## Example
///
/// ```rust
/// use docslabs::{ChunkConfig, SentencePacker};
///
/// let config = ChunkConfig::new(40, 1).unwrap();
/// let packer = SentencePacker::new(config);
///
/// let chunks = packer
///     .pack("The first sentence. Then a second. And a third one here.")
///     .unwrap();
///
/// assert_eq!(
///     chunks,
///     ["The first sentence. Then a second.", "Then a second. And a third one here."]
/// );
/// ```
#[derive(Clone, Copy)]
pub struct SentencePacker<'s> {
    config: ChunkConfig,
    splitter: &'s dyn SentenceSplitter,
}

impl SentencePacker<'static> {
    /// Create a packer using the shared sentence splitter.
    #[must_use]
    pub fn new(config: ChunkConfig) -> Self {
        Self {
            config,
            splitter: sentence::shared(),
        }
    }
}

impl<'s> SentencePacker<'s> {
    /// Create a packer with a custom sentence splitter.
    #[must_use]
    pub fn with_splitter(config: ChunkConfig, splitter: &'s dyn SentenceSplitter) -> Self {
        Self { config, splitter }
    }

    /// The configuration this packer applies.
    #[must_use]
    pub const fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Pack `text`, measuring sentences in characters.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::Error::Tokenization`] from the splitter.
    pub fn pack(&self, text: &str) -> Result<Vec<String>> {
        self.pack_measured(text, |s| s.chars().count())
    }

    /// Pack `text`, measuring each sentence with `measure`.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::Error::Tokenization`] from the splitter.
    pub fn pack_measured(
        &self,
        text: &str,
        measure: impl Fn(&str) -> usize,
    ) -> Result<Vec<String>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let sentences = self.splitter.split(text)?;
        Ok(pack_sentences(&sentences, &self.config, measure))
    }
}

impl std::fmt::Debug for SentencePacker<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentencePacker")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Greedily pack `sentences` into chunks.
///
/// Consecutive chunks share `config.overlap_sentences()` sentences (fewer if
/// the closed chunk had fewer).
#[must_use]
pub fn pack_sentences(
    sentences: &[&str],
    config: &ChunkConfig,
    measure: impl Fn(&str) -> usize,
) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<(&str, usize)> = Vec::new();
    let mut current_len = 0;

    for &sentence in sentences {
        let len = measure(sentence);

        if current.is_empty() && len > config.max_chunk_chars() {
            chunks.push(sentence.to_owned());
            continue;
        }

        if !current.is_empty() && config.would_overflow(current_len, len + 1) {
            chunks.push(join(&current));
            let keep = config.overlap_sentences().min(current.len());
            current.drain(..current.len() - keep);
            current_len = buffered_len(&current);
        }

        current_len += if current.is_empty() { len } else { len + 1 };
        current.push((sentence, len));
    }

    if !current.is_empty() {
        chunks.push(join(&current));
    }

    chunks
}

fn join(sentences: &[(&str, usize)]) -> String {
    let capacity = sentences.iter().map(|(s, _)| s.len() + 1).sum();
    let mut out = String::with_capacity(capacity);
    for (i, (sentence, _)) in sentences.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(sentence);
    }
    out
}

fn buffered_len(sentences: &[(&str, usize)]) -> usize {
    let total: usize = sentences.iter().map(|(_, len)| len).sum();
    total + sentences.len().saturating_sub(1)
}
