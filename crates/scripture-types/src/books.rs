//! Canonical 66-book table with USFM codes and chapter counts.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Testament {
    Old,
    New,
}

/// One book of the canon. `code` is the 3-character USFM abbreviation the
/// upstream provider uses in content paths and verse ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BibleBook {
    pub id: u32,
    pub name: &'static str,
    pub code: &'static str,
    pub testament: Testament,
    pub chapters: u32,
}

const fn book(
    id: u32,
    name: &'static str,
    code: &'static str,
    testament: Testament,
    chapters: u32,
) -> BibleBook {
    BibleBook {
        id,
        name,
        code,
        testament,
        chapters,
    }
}

/// All 66 books in canonical order. Index = id - 1.
pub static BOOKS: [BibleBook; 66] = [
    book(1, "Genesis", "GEN", Testament::Old, 50),
    book(2, "Exodus", "EXO", Testament::Old, 40),
    book(3, "Leviticus", "LEV", Testament::Old, 27),
    book(4, "Numbers", "NUM", Testament::Old, 36),
    book(5, "Deuteronomy", "DEU", Testament::Old, 34),
    book(6, "Joshua", "JOS", Testament::Old, 24),
    book(7, "Judges", "JDG", Testament::Old, 21),
    book(8, "Ruth", "RUT", Testament::Old, 4),
    book(9, "1 Samuel", "1SA", Testament::Old, 31),
    book(10, "2 Samuel", "2SA", Testament::Old, 24),
    book(11, "1 Kings", "1KI", Testament::Old, 22),
    book(12, "2 Kings", "2KI", Testament::Old, 25),
    book(13, "1 Chronicles", "1CH", Testament::Old, 29),
    book(14, "2 Chronicles", "2CH", Testament::Old, 36),
    book(15, "Ezra", "EZR", Testament::Old, 10),
    book(16, "Nehemiah", "NEH", Testament::Old, 13),
    book(17, "Esther", "EST", Testament::Old, 10),
    book(18, "Job", "JOB", Testament::Old, 42),
    book(19, "Psalms", "PSA", Testament::Old, 150),
    book(20, "Proverbs", "PRO", Testament::Old, 31),
    book(21, "Ecclesiastes", "ECC", Testament::Old, 12),
    book(22, "Song of Solomon", "SNG", Testament::Old, 8),
    book(23, "Isaiah", "ISA", Testament::Old, 66),
    book(24, "Jeremiah", "JER", Testament::Old, 52),
    book(25, "Lamentations", "LAM", Testament::Old, 5),
    book(26, "Ezekiel", "EZK", Testament::Old, 48),
    book(27, "Daniel", "DAN", Testament::Old, 12),
    book(28, "Hosea", "HOS", Testament::Old, 14),
    book(29, "Joel", "JOL", Testament::Old, 3),
    book(30, "Amos", "AMO", Testament::Old, 9),
    book(31, "Obadiah", "OBA", Testament::Old, 1),
    book(32, "Jonah", "JON", Testament::Old, 4),
    book(33, "Micah", "MIC", Testament::Old, 7),
    book(34, "Nahum", "NAM", Testament::Old, 3),
    book(35, "Habakkuk", "HAB", Testament::Old, 3),
    book(36, "Zephaniah", "ZEP", Testament::Old, 3),
    book(37, "Haggai", "HAG", Testament::Old, 2),
    book(38, "Zechariah", "ZEC", Testament::Old, 14),
    book(39, "Malachi", "MAL", Testament::Old, 4),
    book(40, "Matthew", "MAT", Testament::New, 28),
    book(41, "Mark", "MRK", Testament::New, 16),
    book(42, "Luke", "LUK", Testament::New, 24),
    book(43, "John", "JHN", Testament::New, 21),
    book(44, "Acts", "ACT", Testament::New, 28),
    book(45, "Romans", "ROM", Testament::New, 16),
    book(46, "1 Corinthians", "1CO", Testament::New, 16),
    book(47, "2 Corinthians", "2CO", Testament::New, 13),
    book(48, "Galatians", "GAL", Testament::New, 6),
    book(49, "Ephesians", "EPH", Testament::New, 6),
    book(50, "Philippians", "PHP", Testament::New, 4),
    book(51, "Colossians", "COL", Testament::New, 4),
    book(52, "1 Thessalonians", "1TH", Testament::New, 5),
    book(53, "2 Thessalonians", "2TH", Testament::New, 3),
    book(54, "1 Timothy", "1TI", Testament::New, 6),
    book(55, "2 Timothy", "2TI", Testament::New, 4),
    book(56, "Titus", "TIT", Testament::New, 3),
    book(57, "Philemon", "PHM", Testament::New, 1),
    book(58, "Hebrews", "HEB", Testament::New, 13),
    book(59, "James", "JAS", Testament::New, 5),
    book(60, "1 Peter", "1PE", Testament::New, 5),
    book(61, "2 Peter", "2PE", Testament::New, 3),
    book(62, "1 John", "1JN", Testament::New, 5),
    book(63, "2 John", "2JN", Testament::New, 1),
    book(64, "3 John", "3JN", Testament::New, 1),
    book(65, "Jude", "JUD", Testament::New, 1),
    book(66, "Revelation", "REV", Testament::New, 22),
];

/// Look up a book by its canonical id (1-66).
pub fn book_by_id(id: u32) -> Option<&'static BibleBook> {
    BOOKS.get(id.checked_sub(1)? as usize)
}

/// Look up a book by USFM code, case-insensitive.
pub fn book_by_code(code: &str) -> Option<&'static BibleBook> {
    BOOKS.iter().find(|b| b.code.eq_ignore_ascii_case(code))
}

/// Look up a book by display name.
///
/// Matching is case-insensitive, and falls back to comparing with all
/// whitespace stripped so "1John" still resolves to "1 John".
pub fn book_by_name(name: &str) -> Option<&'static BibleBook> {
    let wanted = name.trim().to_lowercase();
    if let Some(b) = BOOKS.iter().find(|b| b.name.to_lowercase() == wanted) {
        return Some(b);
    }
    let squashed: String = wanted.chars().filter(|c| !c.is_whitespace()).collect();
    BOOKS.iter().find(|b| {
        b.name
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            == squashed
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_canonical() {
        assert_eq!(BOOKS.len(), 66);
        for (i, b) in BOOKS.iter().enumerate() {
            assert_eq!(b.id as usize, i + 1);
            assert_eq!(b.code.len(), 3);
            assert!(b.chapters >= 1);
        }
        assert_eq!(BOOKS.iter().filter(|b| b.testament == Testament::Old).count(), 39);
        assert_eq!(BOOKS.iter().filter(|b| b.testament == Testament::New).count(), 27);
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(book_by_id(43).unwrap().code, "JHN");
        assert_eq!(book_by_id(1).unwrap().name, "Genesis");
        assert!(book_by_id(0).is_none());
        assert!(book_by_id(67).is_none());
    }

    #[test]
    fn lookup_by_code_is_case_insensitive() {
        assert_eq!(book_by_code("jhn").unwrap().name, "John");
        assert_eq!(book_by_code("1JN").unwrap().name, "1 John");
        assert!(book_by_code("XYZ").is_none());
    }

    #[test]
    fn lookup_by_name_tolerates_case_and_whitespace() {
        assert_eq!(book_by_name("john").unwrap().code, "JHN");
        assert_eq!(book_by_name("1 John").unwrap().code, "1JN");
        assert_eq!(book_by_name("1john").unwrap().code, "1JN");
        assert_eq!(book_by_name("  Song of Solomon ").unwrap().code, "SNG");
        assert!(book_by_name("Gospel of Thomas").is_none());
    }
}
