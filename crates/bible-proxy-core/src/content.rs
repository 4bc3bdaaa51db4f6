//! Upstream chapter document model and the flatten transform.
//!
//! A chapter arrives as a tree: container nodes (paragraphs, headings)
//! hold ordered `items`, and leaf text runs carry the actual words plus an
//! `attrs.verseId`. One verse is frequently split across several
//! non-contiguous runs (footnote markers and formatting nodes interrupt
//! it), so the transform concatenates runs per verse id in document order
//! and then sorts the result by verse number.

use std::collections::HashMap;

use scripture_types::VerseRecord;
use serde::Deserialize;
use serde_json::{json, Value};

/// One node of the upstream provider's tree-structured chapter document.
///
/// Unknown fields are ignored; the provider decorates nodes with styling
/// attributes the transform does not care about.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentNode {
    /// Node kind tag; text runs are `"text"`, containers are `"para"` etc.
    #[serde(rename = "type", default)]
    pub node_type: Option<String>,

    #[serde(default)]
    pub attrs: Option<NodeAttrs>,

    /// Ordered children, present on container nodes.
    #[serde(default)]
    pub items: Vec<ContentNode>,

    /// String payload, present on leaf text runs.
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeAttrs {
    #[serde(rename = "verseId", default)]
    pub verse_id: Option<String>,
}

impl ContentNode {
    /// The verse id of a text run, when this node is one.
    fn verse_text(&self) -> Option<(&str, &str)> {
        if self.node_type.as_deref() != Some("text") {
            return None;
        }
        let id = self.attrs.as_ref()?.verse_id.as_deref()?;
        let text = self.text.as_deref()?;
        Some((id, text))
    }
}

/// Parse the trailing dot-delimited segment of a verse id
/// (`{bookCode}.{chapter}.{verse}`) as the verse number.
///
/// Coerces to 0 when the trailing segment is not an integer: a single
/// malformed id must not abort the whole chapter.
pub fn verse_number(verse_id: &str) -> u32 {
    verse_id
        .rsplit('.')
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

/// Flatten a chapter tree into one record per distinct verse id.
///
/// Depth-first, document order. Text fragments for the same verse id are
/// concatenated in traversal order, then trimmed. The output is sorted
/// ascending by verse number; the sort is stable, so ids that coerce to
/// the same number keep first-seen order.
pub fn flatten_content(nodes: &[ContentNode]) -> Vec<VerseRecord> {
    let mut seen_order: Vec<String> = Vec::new();
    let mut accum: HashMap<String, String> = HashMap::new();

    fn walk(node: &ContentNode, seen_order: &mut Vec<String>, accum: &mut HashMap<String, String>) {
        if let Some((id, text)) = node.verse_text() {
            match accum.get_mut(id) {
                Some(existing) => existing.push_str(text),
                None => {
                    seen_order.push(id.to_string());
                    accum.insert(id.to_string(), text.to_string());
                }
            }
        }
        for child in &node.items {
            walk(child, seen_order, accum);
        }
    }

    for node in nodes {
        walk(node, &mut seen_order, &mut accum);
    }

    let mut records: Vec<VerseRecord> = seen_order
        .into_iter()
        .map(|id| {
            let text = accum.remove(&id).unwrap_or_default();
            VerseRecord {
                verse: verse_number(&id),
                text: text.trim().to_string(),
                id,
            }
        })
        .collect();

    records.sort_by_key(|r| r.verse);
    records
}

/// How an upstream chapter body is shaped.
///
/// The transform branches on this explicitly instead of duck-typing on
/// field presence mid-flight. Only `Tree` is reshaped; everything else is
/// relayed byte-for-byte so flat endpoints keep working unmodified.
#[derive(Debug, Clone)]
pub enum ChapterPayload {
    /// `data.content` carried the provider's node tree.
    Tree(Vec<ContentNode>),

    /// `data` was already a flat array (verse records, search hits).
    Flat(Value),

    /// Anything else: provider error bodies, unexpected shapes.
    Unknown(Value),
}

impl ChapterPayload {
    /// Classify an upstream response body.
    ///
    /// A `data.content` array that fails to deserialize as a node tree is
    /// treated as `Unknown` rather than an error; the raw body survives
    /// for passthrough.
    pub fn from_body(body: Value) -> Self {
        match body.pointer("/data/content") {
            Some(content) if content.is_array() => {
                match serde_json::from_value::<Vec<ContentNode>>(content.clone()) {
                    Ok(nodes) => ChapterPayload::Tree(nodes),
                    Err(_) => ChapterPayload::Unknown(body),
                }
            }
            _ if body.pointer("/data").map(Value::is_array).unwrap_or(false) => {
                ChapterPayload::Flat(body)
            }
            _ => ChapterPayload::Unknown(body),
        }
    }

    /// The response body the reading client consumes.
    pub fn into_response_body(self) -> Value {
        match self {
            ChapterPayload::Tree(content) => json!({ "data": flatten_content(&content) }),
            ChapterPayload::Flat(raw) | ChapterPayload::Unknown(raw) => raw,
        }
    }
}

/// Classify-and-flatten in one step: the body each response is relayed with.
pub fn reshape_body(body: Value) -> Value {
    ChapterPayload::from_body(body).into_response_body()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn nodes(value: Value) -> Vec<ContentNode> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn flattens_the_reference_chapter() {
        let content = nodes(json!([{
            "type": "para",
            "items": [
                { "type": "text", "attrs": { "verseId": "JHN.3.16" }, "text": "For God so loved" },
                { "type": "text", "attrs": { "verseId": "JHN.3.16" }, "text": " the world" },
                { "type": "text", "attrs": { "verseId": "JHN.3.17" }, "text": "For God sent not" }
            ]
        }]));

        let records = flatten_content(&content);
        assert_eq!(
            records,
            vec![
                VerseRecord {
                    id: "JHN.3.16".into(),
                    verse: 16,
                    text: "For God so loved the world".into(),
                },
                VerseRecord {
                    id: "JHN.3.17".into(),
                    verse: 17,
                    text: "For God sent not".into(),
                },
            ]
        );
    }

    #[test]
    fn sorts_by_verse_number_not_encounter_order() {
        let content = nodes(json!([
            { "type": "text", "attrs": { "verseId": "JHN.3.3" }, "text": "third" },
            { "type": "text", "attrs": { "verseId": "JHN.3.1" }, "text": "first" },
            { "type": "text", "attrs": { "verseId": "JHN.3.2" }, "text": "second" }
        ]));

        let verses: Vec<u32> = flatten_content(&content).iter().map(|r| r.verse).collect();
        assert_eq!(verses, vec![1, 2, 3]);
    }

    #[test]
    fn concatenates_non_adjacent_fragments_in_traversal_order() {
        // A footnote-style node with no verseId interrupts the verse.
        let content = nodes(json!([{
            "type": "para",
            "items": [
                { "type": "text", "attrs": { "verseId": "GEN.1.1" }, "text": "Hello" },
                { "type": "note", "items": [
                    { "type": "text", "text": "footnote marker" }
                ]},
                { "type": "text", "attrs": { "verseId": "GEN.1.1" }, "text": "world" }
            ]
        }]));

        let records = flatten_content(&content);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "Helloworld");
    }

    #[test]
    fn deduplicates_repeated_verse_ids() {
        let content = nodes(json!([
            { "type": "text", "attrs": { "verseId": "PSA.23.1" }, "text": "a" },
            { "type": "text", "attrs": { "verseId": "PSA.23.1" }, "text": "b" },
            { "type": "text", "attrs": { "verseId": "PSA.23.1" }, "text": "c" }
        ]));

        let records = flatten_content(&content);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "abc");
    }

    #[test]
    fn walks_nested_containers_depth_first() {
        let content = nodes(json!([{
            "type": "para",
            "items": [{
                "type": "char",
                "items": [
                    { "type": "text", "attrs": { "verseId": "REV.22.21" }, "text": "Amen." }
                ]
            }]
        }]));

        let records = flatten_content(&content);
        assert_eq!(records[0].id, "REV.22.21");
        assert_eq!(records[0].verse, 21);
    }

    #[test]
    fn skips_runs_without_verse_id_or_text() {
        let content = nodes(json!([
            { "type": "text", "text": "heading, no verse id" },
            { "type": "text", "attrs": { "verseId": "JHN.1.1" } },
            { "type": "text", "attrs": { "verseId": "JHN.1.1" }, "text": "In the beginning" }
        ]));

        let records = flatten_content(&content);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "In the beginning");
    }

    #[test]
    fn trims_concatenated_text() {
        let content = nodes(json!([
            { "type": "text", "attrs": { "verseId": "JHN.1.1" }, "text": "  padded " },
            { "type": "text", "attrs": { "verseId": "JHN.1.1" }, "text": " text  " }
        ]));

        assert_eq!(flatten_content(&content)[0].text, "padded  text");
    }

    #[test]
    fn malformed_verse_id_coerces_to_zero_and_sorts_first() {
        let content = nodes(json!([
            { "type": "text", "attrs": { "verseId": "JHN.3.2" }, "text": "two" },
            { "type": "text", "attrs": { "verseId": "JHN.3.oops" }, "text": "broken" }
        ]));

        let records = flatten_content(&content);
        assert_eq!(records[0].id, "JHN.3.oops");
        assert_eq!(records[0].verse, 0);
        assert_eq!(records[1].verse, 2);
    }

    #[test]
    fn verse_number_parses_trailing_segment() {
        assert_eq!(verse_number("JHN.3.16"), 16);
        assert_eq!(verse_number("PSA.119.176"), 176);
        assert_eq!(verse_number("JHN.3.x"), 0);
        assert_eq!(verse_number(""), 0);
        assert_eq!(verse_number("16"), 16);
    }

    #[test]
    fn tree_body_is_reshaped_into_sorted_data_array() {
        let body = json!({
            "data": {
                "id": "JHN.3",
                "content": [
                    { "type": "text", "attrs": { "verseId": "JHN.3.16" }, "text": "For God so loved" },
                    { "type": "text", "attrs": { "verseId": "JHN.3.16" }, "text": " the world" },
                    { "type": "text", "attrs": { "verseId": "JHN.3.17" }, "text": "For God sent not" }
                ]
            }
        });

        let reshaped = reshape_body(body);
        assert_eq!(
            reshaped,
            json!({ "data": [
                { "id": "JHN.3.16", "verse": 16, "text": "For God so loved the world" },
                { "id": "JHN.3.17", "verse": 17, "text": "For God sent not" }
            ]})
        );
    }

    #[test]
    fn flat_body_passes_through_unchanged() {
        let body = json!({
            "data": [
                { "id": "JHN.3.16", "verse": 16, "text": "already flat", "extra": "kept" }
            ],
            "meta": { "fums": "token" }
        });

        assert!(matches!(
            ChapterPayload::from_body(body.clone()),
            ChapterPayload::Flat(_)
        ));
        assert_eq!(reshape_body(body.clone()), body);
    }

    #[test]
    fn unknown_body_passes_through_unchanged() {
        let body = json!({
            "data": { "verses": [{ "id": "JHN.3.16", "reference": "John 3:16", "text": "..." }] }
        });
        assert!(matches!(
            ChapterPayload::from_body(body.clone()),
            ChapterPayload::Unknown(_)
        ));
        assert_eq!(reshape_body(body.clone()), body);

        let error_body = json!({ "statusCode": 403, "error": "Forbidden" });
        assert_eq!(reshape_body(error_body.clone()), error_body);
    }

    #[test]
    fn undecodable_content_array_passes_through() {
        // data.content exists but is not a node tree.
        let body = json!({ "data": { "content": [42, "not a node"] } });
        assert_eq!(reshape_body(body.clone()), body);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// A text run with a well-formed verse id somewhere in JHN.3.
        fn text_run() -> impl Strategy<Value = Value> {
            (1u32..=36, "[a-zA-Z ]{0,12}").prop_map(|(verse, text)| {
                json!({
                    "type": "text",
                    "attrs": { "verseId": format!("JHN.3.{verse}") },
                    "text": text
                })
            })
        }

        /// Raw chapter content: runs scattered across a nested container.
        fn chapter_content() -> impl Strategy<Value = Value> {
            prop::collection::vec(text_run(), 0..24).prop_map(|runs| {
                let (inner, outer): (Vec<_>, Vec<_>) =
                    runs.into_iter().enumerate().partition(|(i, _)| i % 3 == 0);
                let mut items: Vec<Value> = outer.into_iter().map(|(_, r)| r).collect();
                items.push(json!({
                    "type": "para",
                    "items": inner.into_iter().map(|(_, r)| r).collect::<Vec<_>>()
                }));
                Value::Array(items)
            })
        }

        proptest! {
            /// Output is always sorted ascending by verse number.
            #[test]
            fn output_is_sorted(content in chapter_content()) {
                let records = flatten_content(&nodes(content));
                prop_assert!(records.windows(2).all(|w| w[0].verse <= w[1].verse));
            }

            /// Exactly one record per distinct verse id.
            #[test]
            fn output_is_deduplicated(content in chapter_content()) {
                let records = flatten_content(&nodes(content));
                let mut ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
                ids.sort_unstable();
                ids.dedup();
                prop_assert_eq!(ids.len(), records.len());
            }

            /// Flattening is a pure function of its input.
            #[test]
            fn flatten_is_deterministic(content in chapter_content()) {
                let content = nodes(content);
                prop_assert_eq!(flatten_content(&content), flatten_content(&content));
            }

            /// Output text never carries leading/trailing whitespace.
            #[test]
            fn output_text_is_trimmed(content in chapter_content()) {
                for r in flatten_content(&nodes(content)) {
                    prop_assert_eq!(r.text.trim(), r.text.as_str());
                }
            }

            /// Reshaping a reshaped body is the identity: the flat output
            /// of a tree body classifies as Flat and passes through.
            #[test]
            fn reshape_is_idempotent(content in chapter_content()) {
                let body = json!({ "data": { "content": content } });
                let first = reshape_body(body);
                prop_assert_eq!(reshape_body(first.clone()), first);
            }
        }
    }
}
