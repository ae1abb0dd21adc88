//! Per-document chunking and batch assembly.
//!
//! Each document runs through the same five steps:
//!
//! ```text
//! Document ─▶ protect ─▶ split_sections ─▶ pack (per section) ─▶ restore ─▶ Chunk
//!             fences     numbered headings   sentences + overlap   fences     + metadata
//! ```
//!
//! Everything a document needs (its code block table, its sections, its
//! `chunk_index` counter) lives on the stack of that document's call, so
//! documents can be processed on any number of threads. Batch output is
//! always in input order.
//!
//! A document that fails (missing metadata, tokenizer failure, a placeholder
//! that cannot be restored) is skipped and reported; the rest of the batch
//! is unaffected.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::SizeBound;
use crate::fence;
use crate::heading;
use crate::sentence::SentenceSplitter;
use crate::{Chunk, ChunkConfig, Document, Error, Result, SentencePacker};

/// A document left out of a batch, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    /// Position of the document in the input.
    pub position: usize,
    /// The document's `source`, or `"<unknown>"` if it had none.
    pub source: String,
    /// What went wrong.
    pub error: Error,
}

/// The result of chunking a batch of documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    /// Chunks of every successful document, in input order.
    pub chunks: Vec<Chunk>,
    /// Documents that produced an error and contributed no chunks.
    pub skipped: Vec<SkippedDocument>,
}

impl Batch {
    /// Whether every document was chunked.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Number of chunks produced.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether no chunks were produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Discard the skip report and keep the chunks.
    #[must_use]
    pub fn into_chunks(self) -> Vec<Chunk> {
        self.chunks
    }

    fn merge<'d>(results: impl IntoIterator<Item = (&'d Document, Result<Vec<Chunk>>)>) -> Self {
        let mut batch = Self::default();
        for (position, (doc, result)) in results.into_iter().enumerate() {
            match result {
                Ok(chunks) => batch.chunks.extend(chunks),
                Err(error) => {
                    let source = doc.source().unwrap_or("<unknown>").to_owned();
                    warn!(%source, position, %error, "skipping document");
                    batch.skipped.push(SkippedDocument {
                        position,
                        source,
                        error,
                    });
                }
            }
        }
        batch
    }
}

/// Turns documents into chunks.
///
/// ## Example
///
/// ```rust
/// use docslabs::{ChunkConfig, Document, DocumentChunker};
///
/// let doc = Document::new(
///     "Intro text here.\n9.1. Classes\nClasses bundle data. They also bundle behaviour.",
///     "classes.html",
///     "9. Classes",
/// );
///
/// let chunker = DocumentChunker::new(ChunkConfig::default());
/// let chunks = chunker.chunk_document(&doc).unwrap();
///
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[0].heading(), Some(""));
/// assert_eq!(chunks[1].heading(), Some("9.1. Classes"));
/// assert_eq!(chunks[1].index(), Some(1));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DocumentChunker<'s> {
    packer: SentencePacker<'s>,
}

impl DocumentChunker<'static> {
    /// Create a chunker using the shared sentence splitter.
    #[must_use]
    pub fn new(config: ChunkConfig) -> Self {
        Self {
            packer: SentencePacker::new(config),
        }
    }
}

impl<'s> DocumentChunker<'s> {
    /// Create a chunker with a custom sentence splitter.
    #[must_use]
    pub fn with_splitter(config: ChunkConfig, splitter: &'s dyn SentenceSplitter) -> Self {
        Self {
            packer: SentencePacker::with_splitter(config, splitter),
        }
    }

    /// The configuration this chunker applies.
    #[must_use]
    pub const fn config(&self) -> &ChunkConfig {
        self.packer.config()
    }

    /// Chunk one document.
    ///
    /// `chunk_index` starts at zero and runs across all of the document's
    /// sections.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingMetadata`] if `source` or `title` is absent.
    /// - [`Error::Tokenization`] if the sentence splitter fails.
    /// - [`Error::UnresolvedPlaceholder`] if restoration finds a placeholder
    ///   with no recorded code block.
    pub fn chunk_document(&self, doc: &Document) -> Result<Vec<Chunk>> {
        doc.validate()?;
        let config = self.config();

        let (protected, blocks) = fence::protect(&doc.text);
        let sections = heading::split_sections(&protected);

        let mut chunks = Vec::new();
        for section in &sections {
            if config.skip_heading_only() && section.is_heading_only() {
                continue;
            }

            let text = section.text();
            let packed = match config.size_bound() {
                SizeBound::Placeholder => self.packer.pack(&text)?,
                SizeBound::Restored => self
                    .packer
                    .pack_measured(&text, |s| blocks.restored_len(s))?,
            };

            let heading = blocks.restore(section.heading)?;
            for raw in packed {
                let restored = blocks.restore(&raw)?;
                chunks.push(Chunk::new(restored, &doc.metadata, chunks.len(), &heading));
            }
        }

        debug!(
            source = doc.source().unwrap_or_default(),
            sections = sections.len(),
            code_blocks = blocks.len(),
            chunks = chunks.len(),
            "chunked document"
        );
        Ok(chunks)
    }

    /// Chunk a batch of documents in order.
    ///
    /// Failing documents are skipped, logged, and listed in
    /// [`Batch::skipped`].
    pub fn chunk_documents(&self, docs: &[Document]) -> Batch {
        Batch::merge(docs.iter().map(|doc| (doc, self.chunk_document(doc))))
    }

    /// Chunk a batch of documents on the rayon thread pool.
    ///
    /// Output is identical to [`chunk_documents`](Self::chunk_documents).
    #[cfg(feature = "parallel")]
    pub fn par_chunk_documents(&self, docs: &[Document]) -> Batch {
        let results: Vec<Result<Vec<Chunk>>> = docs
            .par_iter()
            .map(|doc| self.chunk_document(doc))
            .collect();
        Batch::merge(docs.iter().zip(results))
    }
}

/// Chunk one document with the shared sentence splitter.
///
/// # Errors
///
/// See [`DocumentChunker::chunk_document`].
pub fn chunk_document(doc: &Document, config: &ChunkConfig) -> Result<Vec<Chunk>> {
    DocumentChunker::new(*config).chunk_document(doc)
}

/// Chunk a batch of documents with the shared sentence splitter.
pub fn chunk_documents(docs: &[Document], config: &ChunkConfig) -> Batch {
    DocumentChunker::new(*config).chunk_documents(docs)
}

/// Chunk a batch of documents in parallel with the shared sentence splitter.
#[cfg(feature = "parallel")]
pub fn par_chunk_documents(docs: &[Document], config: &ChunkConfig) -> Batch {
    DocumentChunker::new(*config).par_chunk_documents(docs)
}
