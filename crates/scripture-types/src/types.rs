use serde::{Deserialize, Serialize};

/// Upstream translation id used when the caller does not pick one (KJV).
pub const DEFAULT_TRANSLATION_ID: &str = "de4e12af7f28f599-01";

/// A Bible translation as exposed by the upstream provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BibleTranslation {
    /// Opaque upstream identifier, e.g. "de4e12af7f28f599-01"
    pub id: String,
    /// Short display code, e.g. "KJV"
    pub code: String,
    pub name: String,
    pub language: String,
}

/// One verse of a flattened chapter, as consumed by the reading UI.
///
/// `id` is the dot-delimited canonical verse id (`{bookCode}.{chapter}.{verse}`);
/// `verse` is the trailing segment of that id parsed as an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    pub id: String,
    pub verse: u32,
    pub text: String,
}
