//! Fenced code block protection and restoration.
//!
//! Sentence tokenizers know nothing about code. Fed a Python snippet, they
//! happily split on `self.x = 1.` or `print("Done.")`:
//!
//! ````text
//! Call it like this:
//! ```
//! >>> obj.method()
//! 'done.'
//! ```
//! That's all.
//! ````
//!
//! So before tokenization every fenced block is swapped for an opaque
//! placeholder, and after packing the placeholders are swapped back:
//!
//! ```text
//! protect:  "Call it like this:\n\0CODE_BLOCK_0\0\nThat's all."
//! blocks:   ["```\n>>> obj.method()\n'done.'\n```"]
//! restore:  byte-identical to the input
//! ```
//!
//! The sentinel is a NUL character, which never survives HTML cleaning.
//! Prose passes through byte for byte, stray NULs included. The one
//! exception is prose that spells out `\0CODE_BLOCK_` itself: that NUL
//! becomes U+FFFD, so the only placeholder openings left are ours.
//!
//! The table is scoped to one document: it is created by [`protect`],
//! consulted by [`CodeBlocks::restore`], and dropped with the document.

use std::ops::Range;

use crate::{Error, Result};

const FENCE: &str = "```";
const SENTINEL: char = '\0';
const PLACEHOLDER_OPEN: &str = "\0CODE_BLOCK_";

/// Ordered table of one document's fenced code blocks.
///
/// Placeholder `i` refers to entry `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBlocks {
    blocks: Vec<String>,
}

impl CodeBlocks {
    /// Number of recorded blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the document had no fenced blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The raw text of block `index`, fences included.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.blocks.get(index).map(String::as_str)
    }

    /// Replace every placeholder in `text` with its original block.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedPlaceholder`] if a placeholder names a
    /// block this table never recorded.
    ///
    /// ```rust
    /// use docslabs::fence;
    ///
    /// let original = "See:\n```\nx = 1.5\n```\nDone.";
    /// let (protected, blocks) = fence::protect(original);
    /// assert!(!protected.contains("```"));
    /// assert_eq!(blocks.restore(&protected).unwrap(), original);
    /// ```
    pub fn restore(&self, text: &str) -> Result<String> {
        if !text.contains(PLACEHOLDER_OPEN) {
            return Ok(text.to_owned());
        }

        let mut out = String::with_capacity(text.len() + self.total_len());
        let mut cursor = 0;
        while let Some((span, index)) = next_placeholder(text, cursor) {
            let block = self.get(index).ok_or(Error::UnresolvedPlaceholder {
                index,
                blocks: self.len(),
            })?;
            out.push_str(&text[cursor..span.start]);
            out.push_str(block);
            cursor = span.end;
        }
        out.push_str(&text[cursor..]);
        Ok(out)
    }

    /// Length in characters that `text` will have once restored.
    ///
    /// Placeholders without a table entry are counted as-is; [`restore`]
    /// reports them.
    ///
    /// [`restore`]: CodeBlocks::restore
    #[must_use]
    pub fn restored_len(&self, text: &str) -> usize {
        let mut len = text.chars().count();
        let mut cursor = 0;
        while let Some((span, index)) = next_placeholder(text, cursor) {
            if let Some(block) = self.get(index) {
                len = len - text[span.clone()].chars().count() + block.chars().count();
            }
            cursor = span.end;
        }
        len
    }

    fn total_len(&self) -> usize {
        self.blocks.iter().map(String::len).sum()
    }
}

/// The placeholder token standing in for block `index`.
#[must_use]
pub fn placeholder(index: usize) -> String {
    format!("{PLACEHOLDER_OPEN}{index}{SENTINEL}")
}

/// Whether `text` still contains a placeholder token.
#[must_use]
pub fn has_placeholder(text: &str) -> bool {
    next_placeholder(text, 0).is_some()
}

/// Swap every fenced code block in `text` for a placeholder.
///
/// Blocks are matched left to right, each opening fence pairing with the
/// nearest following fence. An unmatched trailing fence is left in place.
/// Text without fences comes back unchanged with an empty table.
#[must_use]
pub fn protect(text: &str) -> (String, CodeBlocks) {
    let mut blocks = Vec::new();
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(found) = text[cursor..].find(FENCE) {
        let open = cursor + found;
        let body = open + FENCE.len();
        let Some(close) = text[body..].find(FENCE) else {
            break;
        };
        let end = body + close + FENCE.len();

        push_prose(&mut out, &text[cursor..open]);
        out.push_str(&placeholder(blocks.len()));
        blocks.push(text[open..end].to_owned());
        cursor = end;
    }
    push_prose(&mut out, &text[cursor..]);

    (out, CodeBlocks { blocks })
}

fn push_prose(out: &mut String, prose: &str) {
    let mut cursor = 0;
    while let Some(found) = prose[cursor..].find(PLACEHOLDER_OPEN) {
        let forged = cursor + found;
        out.push_str(&prose[cursor..forged]);
        out.push(char::REPLACEMENT_CHARACTER);
        cursor = forged + SENTINEL.len_utf8();
    }
    out.push_str(&prose[cursor..]);
}

/// Find the next well-formed placeholder at or after byte `from`.
///
/// Returns its byte span and embedded index. Sentinel runs that do not
/// parse as a placeholder are skipped.
fn next_placeholder(text: &str, from: usize) -> Option<(Range<usize>, usize)> {
    let mut search = from;
    while let Some(found) = text[search..].find(PLACEHOLDER_OPEN) {
        let start = search + found;
        let digits_start = start + PLACEHOLDER_OPEN.len();
        let digits_len = text[digits_start..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        let digits_end = digits_start + digits_len;

        if digits_len > 0 && text[digits_end..].starts_with(SENTINEL) {
            if let Ok(index) = text[digits_start..digits_end].parse() {
                return Some((start..digits_end + SENTINEL.len_utf8(), index));
            }
        }
        search = digits_start;
    }
    None
}
