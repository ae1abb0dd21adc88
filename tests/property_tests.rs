//! Property-based tests for document chunking.
//!
//! These tests verify that the pipeline maintains key invariants:
//! - Restored: no placeholder survives in text or heading, every code block
//!   survives intact
//! - Indexed: `chunk_index` runs 0..N per document
//! - Overlapping: consecutive chunks share the configured trailing sentences
//! - Deterministic: same input, same output

use proptest::prelude::*;
use docslabs::{
    chunk_document, fence, pack_sentences, Chunk, ChunkConfig, Document,
};

// =============================================================================
// Test Generators
// =============================================================================

/// A capitalized sentence of lowercase words ending in a period.
fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{3,9}", 2..8).prop_map(|words| {
        let mut s = words.join(" ");
        s[..1].make_ascii_uppercase();
        s.push('.');
        s
    })
}

/// A fenced block whose body is full of periods.
fn code_block() -> impl Strategy<Value = String> {
    "[a-z .()=]{0,40}".prop_map(|body| format!("```\n>>> {body}\n```"))
}

#[derive(Debug, Clone)]
enum Part {
    Prose(Vec<String>),
    Code(String),
    Heading(u8, u8),
    CodeHeading(u8, String),
}

fn part() -> impl Strategy<Value = Part> {
    prop_oneof![
        4 => prop::collection::vec(sentence(), 1..6).prop_map(Part::Prose),
        1 => code_block().prop_map(Part::Code),
        1 => (1u8..20, 1u8..9).prop_map(|(a, b)| Part::Heading(a, b)),
        1 => (1u8..20, "[a-z ]{1,12}").prop_map(|(a, code)| Part::CodeHeading(a, code)),
    ]
}

/// Document text built from prose, code blocks, and numbered headings.
fn document_text() -> impl Strategy<Value = (String, Vec<String>)> {
    prop::collection::vec(part(), 0..12).prop_map(|parts| {
        let mut lines = Vec::new();
        let mut blocks = Vec::new();
        for part in parts {
            match part {
                Part::Prose(sentences) => lines.push(sentences.join(" ")),
                Part::Code(block) => {
                    lines.push(block.clone());
                    blocks.push(block);
                }
                Part::Heading(a, b) => lines.push(format!("{a}.{b}. Heading {a} {b}")),
                Part::CodeHeading(a, code) => {
                    let block = format!("```{code}```");
                    lines.push(format!("{a}. Run {block}"));
                    blocks.push(block);
                }
            }
        }
        (lines.join("\n"), blocks)
    })
}

/// Distinct space-free sentences with varied lengths.
fn tokens() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(1usize..40, 0..30).prop_map(|lens| {
        lens.iter()
            .enumerate()
            .map(|(i, &len)| format!("s{i}{}", "x".repeat(len)))
            .collect()
    })
}

// =============================================================================
// Invariant Helpers
// =============================================================================

fn indices_contiguous(chunks: &[Chunk]) -> bool {
    chunks
        .iter()
        .enumerate()
        .all(|(i, c)| c.index() == Some(i))
}

fn words(chunk: &str) -> Vec<&str> {
    chunk.split(' ').collect()
}

// =============================================================================
// Pipeline Properties
// =============================================================================

proptest! {
    #[test]
    fn no_placeholders_survive(
        (text, _) in document_text(),
        max in 20usize..400,
        overlap in 0usize..4
    ) {
        let doc = Document::new(text, "p.html", "P");
        let chunks = chunk_document(&doc, &ChunkConfig::new(max, overlap).unwrap()).unwrap();
        for chunk in &chunks {
            prop_assert!(!fence::has_placeholder(&chunk.text), "{:?}", chunk.text);
            let heading = chunk.heading().unwrap_or_default();
            prop_assert!(!fence::has_placeholder(heading), "{:?}", heading);
        }
    }

    #[test]
    fn code_blocks_survive_intact(
        (text, blocks) in document_text(),
        max in 20usize..400
    ) {
        let doc = Document::new(text, "p.html", "P");
        let chunks = chunk_document(&doc, &ChunkConfig::new(max, 1).unwrap()).unwrap();
        for block in &blocks {
            prop_assert!(
                chunks.iter().any(|c| c.text.contains(block.as_str())),
                "lost block {:?}",
                block
            );
        }
    }

    #[test]
    fn chunk_index_contiguous(
        (text, _) in document_text(),
        max in 20usize..400,
        overlap in 0usize..4
    ) {
        let doc = Document::new(text, "p.html", "P");
        let chunks = chunk_document(&doc, &ChunkConfig::new(max, overlap).unwrap()).unwrap();
        prop_assert!(indices_contiguous(&chunks));
    }

    #[test]
    fn chunking_is_deterministic(
        (text, _) in document_text(),
        max in 20usize..400,
        overlap in 0usize..4
    ) {
        let doc = Document::new(text, "p.html", "P");
        let config = ChunkConfig::new(max, overlap).unwrap();
        prop_assert_eq!(
            chunk_document(&doc, &config).unwrap(),
            chunk_document(&doc, &config).unwrap()
        );
    }

    #[test]
    fn protect_restore_is_identity((text, _) in document_text()) {
        let (protected, blocks) = fence::protect(&text);
        prop_assert!(!protected.contains("```"));
        prop_assert_eq!(blocks.restore(&protected).unwrap(), text);
    }
}

// =============================================================================
// Packer Properties
// =============================================================================

proptest! {
    #[test]
    fn overlap_shares_trailing_sentences(
        sentences in tokens(),
        max in 10usize..120,
        overlap in 1usize..4
    ) {
        let refs: Vec<&str> = sentences.iter().map(String::as_str).collect();
        let config = ChunkConfig::new(max, overlap).unwrap();
        let chunks = pack_sentences(&refs, &config, |s| s.chars().count());

        for pair in chunks.windows(2) {
            let earlier = words(&pair[0]);
            let later = words(&pair[1]);
            let escaped = earlier.len() == 1 && earlier[0].len() > max;
            if escaped {
                continue;
            }
            let k = overlap.min(earlier.len());
            prop_assert_eq!(&earlier[earlier.len() - k..], &later[..k]);
        }
    }

    #[test]
    fn zero_overlap_partitions_input(
        sentences in tokens(),
        max in 10usize..120
    ) {
        let refs: Vec<&str> = sentences.iter().map(String::as_str).collect();
        let config = ChunkConfig::new(max, 0).unwrap();
        let chunks = pack_sentences(&refs, &config, |s| s.chars().count());

        prop_assert_eq!(chunks.join(" "), refs.join(" "));
        for chunk in &chunks {
            let single = !chunk.contains(' ');
            prop_assert!(chunk.len() <= max || single, "{:?} > {}", chunk, max);
        }
    }

    #[test]
    fn every_sentence_is_packed(
        sentences in tokens(),
        max in 10usize..120,
        overlap in 0usize..4
    ) {
        let refs: Vec<&str> = sentences.iter().map(String::as_str).collect();
        let config = ChunkConfig::new(max, overlap).unwrap();
        let chunks = pack_sentences(&refs, &config, |s| s.chars().count());

        let packed: Vec<&str> = chunks.iter().flat_map(|c| c.split(' ')).collect();
        for sentence in &refs {
            prop_assert!(packed.contains(sentence));
        }
    }
}
