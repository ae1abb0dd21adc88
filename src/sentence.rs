//! Sentence-boundary detection.
//!
//! ## Segment, Then Repair
//!
//! Raw UAX #29 boundaries over a cleaned documentation page over-split in
//! predictable places:
//!
//! ```text
//! "Ask Dr. Lee about\nthe appendix. It cites J. Doe."
//!        |          |                         |
//!        |          |                         single capital initial
//!        |          line feed, segment lacks a terminator
//!        known abbreviation
//! ```
//!
//! Each of these boundaries is undone by a repair pass. The first pass takes
//! UAX #29 sentence bounds, which handle decimals (`3.14159`), ellipses,
//! URLs, and `e.g. lowercase`. The second pass joins a segment with the one
//! that follows when it is a false stop:
//!
//! - **Line breaks.** UAX #29 ends a sentence at every line feed. Pages
//!   cleaned from HTML are full of soft-wrapped lines, so a segment that does
//!   not end in `.`, `!` or `?` is joined with the one that follows.
//! - **Abbreviations.** UAX #29 breaks after any period followed by an
//!   uppercase word. A segment ending in a known abbreviation, a single capital
//!   initial, or consisting of a bare list number (`9.1.`) is joined too.
//!
//! Joined sentences are slices of the input, so interior newlines survive.
//!
//! ## One Splitter Per Process
//!
//! [`shared`] returns a process-wide splitter built on first use and never
//! mutated afterwards. It is `Sync`, so any number of threads can split
//! documents concurrently without locking.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use unicode_segmentation::UnicodeSegmentation;

use crate::Result;

/// Abbreviations that end in a period without ending a sentence.
///
/// Stored lowercase, without the trailing period.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "cf", "e.g", "i.e", "fig",
    "figs", "eq", "vol", "approx", "ca", "resp", "dept", "jan", "feb", "mar", "apr", "jun",
    "jul", "aug", "sep", "sept", "oct", "nov", "dec",
];

const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '\u{201d}', '\u{2019}', '\u{00bb}'];
const OPENERS: &[char] = &['"', '\'', '(', '[', '{', '\u{201c}', '\u{2018}', '\u{00ab}'];
const TERMINATORS: &[char] = &['.', '!', '?', '\u{2026}'];

static SHARED: Lazy<UnicodeSentences> = Lazy::new(|| {
    tracing::debug!(
        abbreviations = ABBREVIATIONS.len(),
        "initialized shared sentence splitter"
    );
    UnicodeSentences::default()
});

/// Splits text into sentences.
///
/// Implementations must be deterministic and must return trimmed,
/// non-empty slices of `text` in source order.
pub trait SentenceSplitter: Send + Sync {
    /// Split `text` into sentences.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Tokenization`] if the backend cannot process
    /// this text.
    fn split<'t>(&self, text: &'t str) -> Result<Vec<&'t str>>;
}

/// The process-wide default splitter.
///
/// Initialized once on first call.
#[must_use]
pub fn shared() -> &'static UnicodeSentences {
    &SHARED
}

/// UAX #29 sentence splitter with line-break and abbreviation repair.
///
/// ## Example
///
/// ```rust
/// use docslabs::sentence::{SentenceSplitter, UnicodeSentences};
///
/// let splitter = UnicodeSentences::default();
/// let text = "Dr. Smith arrived. He sat\ndown. Then he left!";
///
/// assert_eq!(
///     splitter.split(text).unwrap(),
///     ["Dr. Smith arrived.", "He sat\ndown.", "Then he left!"]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct UnicodeSentences {
    abbreviations: HashSet<String>,
}

impl UnicodeSentences {
    /// Create a splitter with a custom abbreviation list.
    ///
    /// Entries are matched case-insensitively, without the trailing period.
    #[must_use]
    pub fn with_abbreviations<I, S>(abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            abbreviations: abbreviations
                .into_iter()
                .map(|a| a.as_ref().trim_end_matches('.').to_lowercase())
                .collect(),
        }
    }

    /// Whether a trimmed segment ends a sentence.
    fn ends_sentence(&self, segment: &str) -> bool {
        let core = segment.trim_end_matches(CLOSERS);
        if !core.ends_with(TERMINATORS) {
            return false;
        }
        let Some(stem) = core.strip_suffix('.') else {
            return true;
        };

        // A bare list number such as "9.1." on its own.
        if stem.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return false;
        }

        let word = stem
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or(stem)
            .trim_start_matches(OPENERS);

        let mut chars = word.chars();
        let initial = matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase());

        !initial && !self.abbreviations.contains(&word.to_lowercase())
    }
}

impl Default for UnicodeSentences {
    fn default() -> Self {
        Self::with_abbreviations(ABBREVIATIONS)
    }
}

impl SentenceSplitter for UnicodeSentences {
    fn split<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        let mut sentences = Vec::new();
        let mut pending: Option<(usize, usize)> = None;

        for (offset, segment) in text.split_sentence_bound_indices() {
            let trimmed = segment.trim();
            if trimmed.is_empty() {
                continue;
            }
            let start = offset + (segment.len() - segment.trim_start().len());
            let end = start + trimmed.len();

            let begin = pending.map_or(start, |(begin, _)| begin);
            if self.ends_sentence(trimmed) {
                sentences.push(&text[begin..end]);
                pending = None;
            } else {
                pending = Some((begin, end));
            }
        }

        if let Some((begin, end)) = pending {
            sentences.push(&text[begin..end]);
        }

        Ok(sentences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Vec<&str> {
        shared().split(text).unwrap()
    }

    #[test]
    fn test_basic_sentences() {
        assert_eq!(
            split("Hello world. How are you? I am fine."),
            ["Hello world.", "How are you?", "I am fine."]
        );
    }

    #[test]
    fn test_abbreviations() {
        assert_eq!(
            split("Dr. Smith went to Washington. He met Mr. Jones."),
            ["Dr. Smith went to Washington.", "He met Mr. Jones."]
        );
        assert_eq!(
            split("Use a list, e.g. Strings work."),
            ["Use a list, e.g. Strings work."]
        );
    }

    #[test]
    fn test_repairs_combine() {
        assert_eq!(
            split("Ask Dr. Lee about\nthe appendix. It cites J. Doe."),
            ["Ask Dr. Lee about\nthe appendix.", "It cites J. Doe."]
        );
    }

    #[test]
    fn test_initials() {
        assert_eq!(
            split("Written by J. R. Tolkien. It is long."),
            ["Written by J. R. Tolkien.", "It is long."]
        );
    }

    #[test]
    fn test_soft_wrapped_lines_join() {
        assert_eq!(
            split("This sentence is\nwrapped across lines. Next one."),
            ["This sentence is\nwrapped across lines.", "Next one."]
        );
    }

    #[test]
    fn test_numbered_heading_joins_following_text() {
        assert_eq!(
            split("9.1. Names\n\nObjects have names. They bind."),
            ["9.1. Names\n\nObjects have names.", "They bind."]
        );
    }

    #[test]
    fn test_decimals_and_quotes() {
        assert_eq!(
            split("Pi is 3.14159. She said \"stop.\" Then silence."),
            ["Pi is 3.14159.", "She said \"stop.\"", "Then silence."]
        );
    }

    #[test]
    fn test_unterminated_tail_kept() {
        assert_eq!(split("Done. Trailing words"), ["Done.", "Trailing words"]);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(split("").is_empty());
        assert!(split("  \n\t ").is_empty());
    }

    #[test]
    fn test_placeholder_joins_following_sentence() {
        let text = "Intro.\n\0CODE_BLOCK_0\0\nMore text.";
        assert_eq!(split(text), ["Intro.", "\0CODE_BLOCK_0\0\nMore text."]);
    }

    #[test]
    fn test_custom_abbreviations() {
        let splitter = UnicodeSentences::with_abbreviations(["approx."]);
        assert_eq!(
            splitter.split("It is approx. Ten. Dr. Who.").unwrap(),
            ["It is approx. Ten.", "Dr.", "Who."]
        );
    }

    #[test]
    fn test_shared_is_singleton() {
        assert!(std::ptr::eq(shared(), shared()));
    }
}
