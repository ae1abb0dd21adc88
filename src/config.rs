//! Chunking configuration.
//!
//! Two knobs matter:
//!
//! - `max_chunk_chars`: the size a chunk should stay under, in characters.
//!   Advisory: a single sentence longer than this becomes its own chunk
//!   rather than being cut.
//! - `overlap_sentences`: how many trailing sentences of a chunk are
//!   repeated at the start of the next one from the same section.
//!
//! ```text
//! overlap_sentences = 2
//!
//! Chunk 0: [S1 S2 S3 S4]
//! Chunk 1:       [S3 S4 S5 S6]   <- S3, S4 carried over
//! Chunk 2:             [S5 S6 S7]
//! ```
//!
//! Values are validated on construction, so a [`ChunkConfig`] in hand is
//! always usable. Deserialization and [`ChunkConfig::from_env`] go through
//! the same checks.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default upper bound on chunk length, in characters.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 1000;
/// Default number of sentences carried into the next chunk.
pub const DEFAULT_OVERLAP_SENTENCES: usize = 2;

/// Environment variable overriding `max_chunk_chars`.
pub const ENV_MAX_CHUNK_CHARS: &str = "DOCSLABS_MAX_CHUNK_CHARS";
/// Environment variable overriding `overlap_sentences`.
pub const ENV_OVERLAP_SENTENCES: &str = "DOCSLABS_OVERLAP_SENTENCES";

/// Which text the size bound is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeBound {
    /// Measure text with code blocks still replaced by placeholders.
    ///
    /// A chunk holding a large code block can exceed `max_chunk_chars` once
    /// the block is restored.
    #[default]
    Placeholder,
    /// Measure text as it will read after code blocks are restored.
    Restored,
}

/// Validated chunking configuration.
///
/// ## Example
///
/// ```rust
/// use docslabs::{ChunkConfig, SizeBound};
///
/// let config = ChunkConfig::new(500, 1)
///     .unwrap()
///     .with_size_bound(SizeBound::Restored);
///
/// assert_eq!(config.max_chunk_chars(), 500);
/// assert_eq!(config.overlap_sentences(), 1);
///
/// assert!(ChunkConfig::new(0, 2).is_err());
/// assert!(ChunkConfig::from_signed(1000, -1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawChunkConfig", into = "RawChunkConfig")]
pub struct ChunkConfig {
    max_chunk_chars: usize,
    overlap_sentences: usize,
    size_bound: SizeBound,
    skip_heading_only: bool,
}

impl ChunkConfig {
    /// Create a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `max_chunk_chars == 0`.
    pub fn new(max_chunk_chars: usize, overlap_sentences: usize) -> Result<Self> {
        Self::default()
            .with_max_chunk_chars(max_chunk_chars)
            .map(|c| c.with_overlap_sentences(overlap_sentences))
    }

    /// Create a configuration from caller values that may be out of range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `max_chunk_chars <= 0` or
    /// `overlap_sentences < 0`.
    pub fn from_signed(max_chunk_chars: i64, overlap_sentences: i64) -> Result<Self> {
        let max = usize::try_from(max_chunk_chars)
            .ok()
            .filter(|&m| m > 0)
            .ok_or_else(|| Error::Config {
                field: "max_chunk_chars",
                value: max_chunk_chars.to_string(),
                reason: "must be a positive integer",
            })?;
        let overlap = usize::try_from(overlap_sentences).map_err(|_| Error::Config {
            field: "overlap_sentences",
            value: overlap_sentences.to_string(),
            reason: "must be a non-negative integer",
        })?;
        Self::new(max, overlap)
    }

    /// Read overrides from [`ENV_MAX_CHUNK_CHARS`] and [`ENV_OVERLAP_SENTENCES`].
    ///
    /// Unset variables fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a variable is set but is not an integer
    /// or is out of range.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &'static str, field: &'static str, default: usize| -> Result<i64> {
            match lookup(key) {
                None => Ok(saturating_i64(default)),
                Some(raw) => raw.trim().parse().map_err(|_| Error::Config {
                    field,
                    value: raw,
                    reason: "not an integer",
                }),
            }
        };
        Self::from_signed(
            read(ENV_MAX_CHUNK_CHARS, "max_chunk_chars", DEFAULT_MAX_CHUNK_CHARS)?,
            read(
                ENV_OVERLAP_SENTENCES,
                "overlap_sentences",
                DEFAULT_OVERLAP_SENTENCES,
            )?,
        )
    }

    /// Set the size bound.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `max_chunk_chars == 0`.
    pub fn with_max_chunk_chars(self, max_chunk_chars: usize) -> Result<Self> {
        if max_chunk_chars == 0 {
            return Err(Error::Config {
                field: "max_chunk_chars",
                value: "0".to_owned(),
                reason: "must be a positive integer",
            });
        }
        Ok(Self {
            max_chunk_chars,
            ..self
        })
    }

    /// Set the number of overlapping sentences. Zero disables overlap.
    #[must_use]
    pub const fn with_overlap_sentences(self, overlap_sentences: usize) -> Self {
        Self {
            overlap_sentences,
            ..self
        }
    }

    /// Choose which text the size bound is measured against.
    #[must_use]
    pub const fn with_size_bound(self, size_bound: SizeBound) -> Self {
        Self { size_bound, ..self }
    }

    /// Drop sections that have a heading but no body.
    ///
    /// By default such a section yields one chunk holding just the heading.
    #[must_use]
    pub const fn with_skip_heading_only(self, skip: bool) -> Self {
        Self {
            skip_heading_only: skip,
            ..self
        }
    }

    /// Upper bound on chunk length, in characters.
    #[must_use]
    pub const fn max_chunk_chars(&self) -> usize {
        self.max_chunk_chars
    }

    /// Sentences carried from one chunk into the next.
    #[must_use]
    pub const fn overlap_sentences(&self) -> usize {
        self.overlap_sentences
    }

    /// Which text the size bound is measured against.
    #[must_use]
    pub const fn size_bound(&self) -> SizeBound {
        self.size_bound
    }

    /// Whether heading-only sections are dropped.
    #[must_use]
    pub const fn skip_heading_only(&self) -> bool {
        self.skip_heading_only
    }

    /// Check if adding `additional` characters to a chunk of `current`
    /// characters would exceed the bound.
    #[must_use]
    pub const fn would_overflow(&self, current: usize, additional: usize) -> bool {
        current.saturating_add(additional) > self.max_chunk_chars
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            overlap_sentences: DEFAULT_OVERLAP_SENTENCES,
            size_bound: SizeBound::Placeholder,
            skip_heading_only: false,
        }
    }
}

/// Unvalidated wire form of [`ChunkConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct RawChunkConfig {
    max_chunk_chars: i64,
    overlap_sentences: i64,
    size_bound: SizeBound,
    skip_heading_only: bool,
}

impl Default for RawChunkConfig {
    fn default() -> Self {
        ChunkConfig::default().into()
    }
}

impl TryFrom<RawChunkConfig> for ChunkConfig {
    type Error = Error;

    fn try_from(raw: RawChunkConfig) -> Result<Self> {
        Ok(Self::from_signed(raw.max_chunk_chars, raw.overlap_sentences)?
            .with_size_bound(raw.size_bound)
            .with_skip_heading_only(raw.skip_heading_only))
    }
}

impl From<ChunkConfig> for RawChunkConfig {
    fn from(config: ChunkConfig) -> Self {
        Self {
            max_chunk_chars: saturating_i64(config.max_chunk_chars),
            overlap_sentences: saturating_i64(config.overlap_sentences),
            size_bound: config.size_bound,
            skip_heading_only: config.skip_heading_only,
        }
    }
}

/// Values past `i64::MAX` clamp instead of wrapping negative.
fn saturating_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
