pub mod books;
pub mod reference;
pub mod types;

pub use books::{book_by_code, book_by_id, book_by_name, BibleBook, Testament, BOOKS};
pub use reference::{parse_reference, ParsedReference};
pub use types::{BibleTranslation, VerseRecord, DEFAULT_TRANSLATION_ID};
