//! Error types for docslabs.

/// Errors that can occur while chunking documents.
///
/// [`Error::Config`] is raised before any document is touched. Every other
/// variant is scoped to a single document: batch drivers skip that document
/// and keep going.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A configuration value is out of range or unparsable.
    #[error("invalid {field}: {value} ({reason})")]
    Config {
        /// The offending setting.
        field: &'static str,
        /// The value as supplied by the caller.
        value: String,
        /// What the value must satisfy.
        reason: &'static str,
    },

    /// Sentence-boundary detection failed for a document's text.
    #[error("sentence tokenization failed: {reason}")]
    Tokenization {
        /// Backend-specific description.
        reason: String,
    },

    /// A packed chunk referenced a code block the document never recorded.
    ///
    /// This is a bookkeeping defect between protection and restoration, not
    /// an input problem.
    #[error("placeholder for code block {index} has no entry (document recorded {blocks})")]
    UnresolvedPlaceholder {
        /// Index embedded in the placeholder.
        index: usize,
        /// Number of code blocks recorded for the document.
        blocks: usize,
    },

    /// A document arrived without one of its required metadata keys.
    #[error("document metadata is missing required key `{key}`")]
    MissingMetadata {
        /// The absent key.
        key: &'static str,
    },
}

impl Error {
    /// Whether this error only affects the document that raised it.
    #[must_use]
    pub const fn is_document_scoped(&self) -> bool {
        !matches!(self, Self::Config { .. })
    }
}

/// Result type for docslabs operations.
pub type Result<T> = std::result::Result<T, Error>;
