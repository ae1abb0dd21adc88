//! Heading-based sectioning.
//!
//! Numbered headings are hard chunk boundaries: a chunk never mixes text
//! from two sections.
//!
//! ```text
//! Some preamble.                 -> Section { heading: "",               body: "Some preamble." }
//! 9.1. A Word About Names        -> Section { heading: "9.1. A Word ...", body: "Objects have..." }
//! Objects have individuality...
//! 9.2. Python Scopes             -> Section { heading: "9.2. Python ...", body: "Before ..." }
//! Before introducing classes...
//! ```
//!
//! A heading line is one or more digits, a dot, optionally more digits and
//! dots, horizontal whitespace, then the rest of the line:
//! `9. Classes`, `9.1. A Word About Names`, `4.7.2 Keyword Arguments`.
//! A bare number (`2024 was a good year`) is not a heading.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[0-9]+\.[0-9.]*[^\S\n]+.+$").expect("heading pattern is valid")
});

/// A heading and the text beneath it, up to the next heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    /// Trimmed heading line, empty for text preceding the first heading.
    pub heading: &'a str,
    /// Trimmed body text.
    pub body: &'a str,
}

impl<'a> Section<'a> {
    /// The text to chunk for this section.
    ///
    /// The heading is prefixed to the body, separated by a blank line, so
    /// the first chunk of a section carries its title.
    ///
    /// ```rust
    /// use docslabs::heading::Section;
    ///
    /// let s = Section { heading: "9.1. Names", body: "Objects have names." };
    /// assert_eq!(s.text(), "9.1. Names\n\nObjects have names.");
    ///
    /// let s = Section { heading: "9.2. Scopes", body: "" };
    /// assert_eq!(s.text(), "9.2. Scopes");
    /// ```
    #[must_use]
    pub fn text(&self) -> Cow<'a, str> {
        match (self.heading.is_empty(), self.body.is_empty()) {
            (true, _) => Cow::Borrowed(self.body),
            (false, true) => Cow::Borrowed(self.heading),
            (false, false) => Cow::Owned(format!("{}\n\n{}", self.heading, self.body)),
        }
    }

    /// Whether the section has a heading but no body.
    #[must_use]
    pub fn is_heading_only(&self) -> bool {
        !self.heading.is_empty() && self.body.is_empty()
    }
}

/// Whether `line` is a numbered heading.
#[must_use]
pub fn is_heading(line: &str) -> bool {
    HEADING
        .find(line)
        .is_some_and(|m| m.start() == 0 && m.end() == line.len())
}

/// Split `text` into sections at heading lines, in source order.
///
/// Text before the first heading becomes a section with an empty heading,
/// unless it is blank. Every heading yields a section, even with an empty
/// body.
#[must_use]
pub fn split_sections(text: &str) -> Vec<Section<'_>> {
    let mut sections = Vec::new();
    let mut headings = HEADING.find_iter(text).peekable();

    let preamble_end = headings.peek().map_or(text.len(), |m| m.start());
    let preamble = text[..preamble_end].trim();
    if !preamble.is_empty() {
        sections.push(Section {
            heading: "",
            body: preamble,
        });
    }

    while let Some(m) = headings.next() {
        let body_end = headings.peek().map_or(text.len(), |next| next.start());
        sections.push(Section {
            heading: m.as_str().trim(),
            body: text[m.end()..body_end].trim(),
        });
    }

    sections
}
