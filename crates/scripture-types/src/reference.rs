//! Human-readable reference parsing.
//!
//! Turns citations like "John 3:16", "1 John 1:9" or "Genesis 1" into a
//! canonical `(book, chapter, verse?)` triple. Book names may themselves
//! contain spaces, so the split point is the LAST space: everything before
//! it is the book name, everything after is `chapter[:verse]`.

use crate::books::{book_by_name, BibleBook};

/// A resolved scripture citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedReference {
    pub book: &'static BibleBook,
    pub chapter: u32,
    pub verse: Option<u32>,
}

impl ParsedReference {
    /// The upstream chapter identifier, e.g. "JHN.3".
    pub fn chapter_id(&self) -> String {
        format!("{}.{}", self.book.code, self.chapter)
    }

    /// The upstream verse identifier, e.g. "JHN.3.16", when a verse is present.
    pub fn verse_id(&self) -> Option<String> {
        self.verse
            .map(|v| format!("{}.{}.{}", self.book.code, self.chapter, v))
    }
}

/// Parse a citation like "John 3:16" or "Genesis 1".
///
/// Returns `None` for unknown books, missing chapter parts, or a
/// non-numeric chapter. A malformed `:verse` suffix also yields `None`
/// rather than silently dropping the verse.
pub fn parse_reference(reference: &str) -> Option<ParsedReference> {
    let reference = reference.trim();
    let (book_part, numbers_part) = reference.rsplit_once(' ')?;

    let book = book_by_name(book_part)?;

    let (chapter, verse) = match numbers_part.split_once(':') {
        Some((c, v)) => (c.parse().ok()?, Some(v.parse().ok()?)),
        None => (numbers_part.parse().ok()?, None),
    };

    Some(ParsedReference {
        book,
        chapter,
        verse,
    })
}
