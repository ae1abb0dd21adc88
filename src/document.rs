//! Input documents, output chunks, and the metadata they carry.
//!
//! ## Metadata Keys
//!
//! Loaders hand over documents tagged with at least [`SOURCE`] and [`TITLE`].
//! Any other keys (e.g. [`SECTION`]) pass through untouched. Each emitted
//! [`Chunk`] carries a copy of its document's metadata plus two keys the
//! chunker owns:
//!
//! ```text
//! Document { source: "classes.html", title: "9. Classes", section: "9" }
//!     │
//!     ▼
//! Chunk    { source: "classes.html", title: "9. Classes", section: "9",
//!            chunk_index: 0, heading: "9.1. A Word About Names" }
//! ```
//!
//! Insertion order is preserved, so serialized metadata is stable.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Stable identifier of the source page (e.g. a filename). Required.
pub const SOURCE: &str = "source";
/// Human-readable page title. Required.
pub const TITLE: &str = "title";
/// Optional section number derived from the title.
pub const SECTION: &str = "section";
/// Zero-based position of a chunk within its document. Added by the chunker.
pub const CHUNK_INDEX: &str = "chunk_index";
/// Heading of the section a chunk came from, possibly empty. Added by the chunker.
pub const HEADING: &str = "heading";

/// A metadata value.
///
/// Serialized untagged, so `{"chunk_index": 3, "heading": "9.1. Names"}`
/// round-trips through JSON as plain numbers and strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A non-negative integer.
    Int(u64),
    /// A string.
    Text(String),
}

impl Value {
    /// The string payload, if this is a [`Value::Text`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Int(_) => None,
        }
    }

    /// The integer payload, if this is a [`Value::Int`].
    #[must_use]
    pub const fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Int(n)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::Int(n as u64)
    }
}

/// Ordered key/value metadata.
pub type Metadata = IndexMap<String, Value>;

/// A cleaned source page, ready to be chunked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Cleaned page text. Fenced code blocks are delimited by triple backticks.
    pub text: String,
    /// Page metadata. Must contain [`SOURCE`] and [`TITLE`].
    #[serde(default)]
    pub metadata: Metadata,
}

impl Document {
    /// Create a document with the required `source` and `title` keys.
    ///
    /// ```rust
    /// use docslabs::Document;
    ///
    /// let doc = Document::new("Some text.", "classes.html", "9. Classes")
    ///     .with_meta("section", "9");
    ///
    /// assert_eq!(doc.source(), Some("classes.html"));
    /// assert_eq!(doc.metadata.len(), 3);
    /// ```
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        source: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        let mut metadata = Metadata::new();
        metadata.insert(SOURCE.to_owned(), Value::Text(source.into()));
        metadata.insert(TITLE.to_owned(), Value::Text(title.into()));
        Self {
            text: text.into(),
            metadata,
        }
    }

    /// Add or replace a pass-through metadata entry.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The document's `source` identifier, if present and textual.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.metadata.get(SOURCE).and_then(Value::as_str)
    }

    /// The document's `title`, if present and textual.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.metadata.get(TITLE).and_then(Value::as_str)
    }

    /// Check that the required metadata keys are present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingMetadata`] naming the first absent key.
    pub fn validate(&self) -> Result<()> {
        for key in [SOURCE, TITLE] {
            if !self.metadata.contains_key(key) {
                return Err(Error::MissingMetadata { key });
            }
        }
        Ok(())
    }
}

/// A bounded, sentence-aligned span of a document plus its metadata.
///
/// The unit handed to embedding and indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text with code blocks restored.
    pub text: String,
    /// Document metadata plus [`CHUNK_INDEX`] and [`HEADING`].
    pub metadata: Metadata,
}

impl Chunk {
    /// Build a chunk from its document's metadata.
    ///
    /// The document metadata is copied; `chunk_index` and `heading` are
    /// appended (or overwritten if the loader happened to set them).
    #[must_use]
    pub fn new(text: impl Into<String>, document: &Metadata, index: usize, heading: &str) -> Self {
        let mut metadata = document.clone();
        metadata.insert(CHUNK_INDEX.to_owned(), Value::from(index));
        metadata.insert(HEADING.to_owned(), Value::from(heading));
        Self {
            text: text.into(),
            metadata,
        }
    }

    /// Position of this chunk within its document.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.metadata
            .get(CHUNK_INDEX)
            .and_then(Value::as_u64)
            .map(|n| n as usize)
    }

    /// Heading of the section this chunk came from (empty for preamble text).
    #[must_use]
    pub fn heading(&self) -> Option<&str> {
        self.metadata.get(HEADING).and_then(Value::as_str)
    }

    /// The `source` of the document this chunk came from.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.metadata.get(SOURCE).and_then(Value::as_str)
    }

    /// Length of the chunk text in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the chunk text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chunk {{ source: {}, index: {}, heading: {:?}, len: {} }}",
            self.source().unwrap_or("?"),
            self.index().map_or_else(|| "?".to_owned(), |i| i.to_string()),
            self.heading().unwrap_or_default(),
            self.char_len()
        )
    }
}
