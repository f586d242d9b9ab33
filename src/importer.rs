#![allow(dead_code)]

//! Type definitions for the DeepSeek conversation export schema.
//!
//! The export is a single JSON document: an array of conversations, each
//! carrying a tree-shaped message `mapping` keyed by node id. The entry
//! point of every tree is the sentinel node id `"root"`.
//!
//! Schema quirks preserved on purpose:
//! - `upmonthd_at` is misspelled in the source data; the field name is part
//!   of the format and must not be "fixed".
//! - `message.files` is an opaque list we never interpret, kept as raw JSON
//!   values so a future round-trip stays lossless.

use eyre::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// Node id of the traversal entry point in every conversation mapping.
pub const ROOT_NODE_ID: &str = "root";

/// One chunk of a message's content, tagged with its type.
///
/// The tag `"RESPONSE"` marks assistant-authored content; everything else
/// is treated as user-authored.
#[derive(Debug, Clone, Deserialize)]
pub struct Fragment {
    #[serde(rename = "type")]
    pub fragment_type: String,
    pub content: String,
}

impl Fragment {
    pub fn is_response(&self) -> bool {
        self.fragment_type == "RESPONSE"
    }
}

/// Payload of a message-bearing node.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Opaque attachment list, never interpreted.
    #[serde(default)]
    pub files: Vec<serde_json::Value>,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub inserted_at: String,
    #[serde(default)]
    pub fragments: Vec<Fragment>,
}

impl Message {
    /// A message is assistant-authored iff ANY fragment carries the
    /// `"RESPONSE"` tag. Any-match, not first-fragment.
    pub fn is_assistant(&self) -> bool {
        self.fragments.iter().any(Fragment::is_response)
    }
}

/// One entry in a conversation's tree. Nodes without a message are
/// structural (the root sentinel usually carries none).
#[derive(Debug, Clone, Deserialize)]
pub struct MappingItem {
    pub id: String,
    pub parent: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
    pub message: Option<Message>,
}

/// One exported chat session.
#[derive(Debug, Clone, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub inserted_at: String,
    /// Misspelled in the source schema; kept verbatim for compatibility.
    #[serde(rename = "upmonthd_at")]
    pub upmonthd_at: String,
    #[serde(default)]
    pub mapping: HashMap<String, MappingItem>,
}

impl Conversation {
    /// Count of message-bearing nodes over the FULL mapping, independent of
    /// reachability from root.
    pub fn message_count(&self) -> usize {
        self.mapping.values().filter(|n| n.message.is_some()).count()
    }
}

/// Parse the raw export bytes into the ordered conversation list.
///
/// Any schema mismatch fails the whole batch; there are no partial results.
pub fn load_conversations(bytes: &[u8]) -> Result<Vec<Conversation>> {
    serde_json::from_slice(bytes).wrap_err("Failed to parse conversations JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_export() {
        let json = r#"[{
            "id": "c1",
            "title": "hello",
            "inserted_at": "2024-03-15T10:30:00Z",
            "upmonthd_at": "2024-03-16T08:00:00Z",
            "mapping": {
                "root": {"id": "root", "parent": null, "children": ["a"], "message": null},
                "a": {
                    "id": "a", "parent": "root", "children": [],
                    "message": {
                        "files": [],
                        "model": "deepseek-chat",
                        "inserted_at": "2024-03-15T10:30:05Z",
                        "fragments": [{"type": "REQUEST", "content": "hi"}]
                    }
                }
            }
        }]"#;
        let convs = load_conversations(json.as_bytes()).unwrap();
        assert_eq!(convs.len(), 1);
        assert_eq!(convs[0].id, "c1");
        assert_eq!(convs[0].upmonthd_at, "2024-03-16T08:00:00Z");
        assert_eq!(convs[0].message_count(), 1);
        assert!(!convs[0].mapping["a"].message.as_ref().unwrap().is_assistant());
    }

    #[test]
    fn opaque_files_survive_any_shape() {
        let json = r#"{
            "files": [{"nested": [1, 2]}, "plain"],
            "model": "m",
            "inserted_at": "",
            "fragments": []
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.files.len(), 2);
    }

    #[test]
    fn malformed_input_is_fatal() {
        assert!(load_conversations(b"{not json").is_err());
        // Well-formed JSON, wrong shape.
        assert!(load_conversations(br#"{"id": "x"}"#).is_err());
    }

    #[test]
    fn any_match_role_classification() {
        let msg: Message = serde_json::from_str(
            r#"{"files": [], "model": "m", "inserted_at": "",
                "fragments": [{"type": "REQUEST", "content": "a"},
                              {"type": "RESPONSE", "content": "b"}]}"#,
        )
        .unwrap();
        assert!(msg.is_assistant());
    }
}
