//! # docslabs
//!
//! Sentence-aligned document chunking for retrieval-augmented generation
//! (RAG) pipelines.
//!
//! ## The Problem
//!
//! Documentation pages are a mix of prose, numbered sections, and code
//! examples. Chunking them for retrieval has to satisfy several constraints
//! at once:
//!
//! - A sentence split mid-way is garbage
//! - A code example split mid-way is useless
//! - A chunk that straddles two sections answers neither
//! - Chunks must stay small enough to embed
//! - Neighbouring chunks should share some context
//!
//! ## The Pipeline
//!
//! ```text
//! Document
//!    │
//!    ├─ fence::protect        fenced code blocks  -> placeholders
//!    ├─ heading::split_sections   numbered headings -> sections
//!    │     for each section:
//!    ├─ SentencePacker        sentences -> bounded chunks with overlap
//!    ├─ CodeBlocks::restore   placeholders -> original code, byte for byte
//!    └─ Chunk::new            document metadata + chunk_index + heading
//! ```
//!
//! Because code blocks are hidden behind placeholders while sentences are
//! found, a period inside `print("done.")` can never end a sentence, and a
//! code block always lands whole inside one chunk.
//!
//! ## Quick Start
//!
//! ```rust
//! use docslabs::{chunk_documents, ChunkConfig, Document};
//!
//! let docs = vec![Document::new(
//!     "Intro text here.\n```\nprint(1)\n```\nMore text follows.",
//!     "intro.html",
//!     "3. An Informal Introduction",
//! )];
//!
//! let batch = chunk_documents(&docs, &ChunkConfig::default());
//!
//! assert!(batch.is_complete());
//! assert_eq!(batch.chunks.len(), 1);
//! assert!(batch.chunks[0].text.contains("```\nprint(1)\n```"));
//! assert_eq!(batch.chunks[0].index(), Some(0));
//! ```
//!
//! ## Size Bounds
//!
//! `max_chunk_chars` (default 1000) is measured in characters against the
//! text the sentence packer sees, i.e. with code blocks still replaced by
//! short placeholders. A chunk holding a long code block can therefore be
//! longer than the bound once restored. [`SizeBound::Restored`] measures the
//! restored text instead.
//!
//! ## Failures
//!
//! Configuration is validated before anything runs. After that, failures are
//! per document: a batch skips the failing document, logs a `tracing`
//! warning naming its `source`, and records it in [`Batch::skipped`].
//!
//! ## Features
//!
//! - `parallel` (default): [`par_chunk_documents`] spreads documents over the
//!   rayon thread pool. Output order matches input order.

mod config;
mod document;
mod error;
pub mod fence;
pub mod heading;
mod packer;
mod pipeline;
pub mod sentence;

pub use config::{
    ChunkConfig, SizeBound, DEFAULT_MAX_CHUNK_CHARS, DEFAULT_OVERLAP_SENTENCES,
    ENV_MAX_CHUNK_CHARS, ENV_OVERLAP_SENTENCES,
};
pub use document::{
    Chunk, Document, Metadata, Value, CHUNK_INDEX, HEADING, SECTION, SOURCE, TITLE,
};
pub use error::{Error, Result};
pub use fence::CodeBlocks;
pub use heading::Section;
pub use packer::{pack_sentences, SentencePacker};
pub use pipeline::{chunk_document, chunk_documents, Batch, DocumentChunker, SkippedDocument};
pub use sentence::{SentenceSplitter, UnicodeSentences};

#[cfg(feature = "parallel")]
pub use pipeline::par_chunk_documents;
