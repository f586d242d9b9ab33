//! Markdown rendering for one conversation.
//!
//! Document layout is fixed: title heading, metadata block, then every
//! reachable message in flattened order. The metadata message count covers
//! the FULL mapping, so it can exceed the number of rendered messages when
//! parts of the tree are unreachable from root.

use crate::importer::{Conversation, Message};
use crate::tree::flatten;
use crate::utils::format_time;
use std::io::Write;

pub fn render<W: Write>(writer: &mut W, conv: &Conversation) -> std::io::Result<()> {
    writeln!(writer, "# {}\n", conv.title)?;
    writeln!(writer, "## 对话信息")?;
    writeln!(writer, "- **对话ID**: {}", conv.id)?;
    writeln!(writer, "- **创建时间**: {}", format_time(&conv.inserted_at))?;
    writeln!(writer, "- **更新时间**: {}", format_time(&conv.upmonthd_at))?;
    writeln!(writer, "- **消息数量**: {}\n", conv.message_count())?;
    writeln!(writer, "## 对话内容\n")?;

    let nodes = flatten(conv);
    for (i, node) in nodes.iter().enumerate() {
        let Some(msg) = &node.message else {
            continue;
        };

        let (emoji, role) = if msg.is_assistant() {
            ("🤖", "助手")
        } else {
            ("👤", "用户")
        };
        writeln!(writer, "### {} {}", emoji, role)?;

        if !msg.inserted_at.is_empty() {
            writeln!(writer, "**时间**: {}\n", format_time(&msg.inserted_at))?;
        }

        let content = message_content(msg);
        if !content.is_empty() {
            writeln!(writer, "{}\n", content)?;
        }

        if i < nodes.len() - 1 {
            writeln!(writer, "---\n")?;
        }
    }

    Ok(())
}

/// Concatenate the non-empty fragment contents, one per line, trimmed of
/// surrounding whitespace as a whole.
fn message_content(msg: &Message) -> String {
    let mut out = String::new();
    for fragment in &msg.fragments {
        if !fragment.content.is_empty() {
            out.push_str(&fragment.content);
            out.push('\n');
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::load_conversations;

    fn sample() -> Conversation {
        let json = r#"[{
            "id": "conv-42",
            "title": "测试对话",
            "inserted_at": "2024-03-15T10:30:00Z",
            "upmonthd_at": "2024-03-16T08:00:00Z",
            "mapping": {
                "root": {"id": "root", "parent": null, "children": ["u1"], "message": null},
                "u1": {
                    "id": "u1", "parent": "root", "children": ["a1"],
                    "message": {
                        "files": [], "model": "", "inserted_at": "2024-03-15T10:30:05Z",
                        "fragments": [{"type": "REQUEST", "content": "问题"}]
                    }
                },
                "a1": {
                    "id": "a1", "parent": "u1", "children": [],
                    "message": {
                        "files": [], "model": "deepseek-chat", "inserted_at": "",
                        "fragments": [
                            {"type": "THINK", "content": ""},
                            {"type": "RESPONSE", "content": "回答"}
                        ]
                    }
                }
            }
        }]"#;
        load_conversations(json.as_bytes()).unwrap().pop().unwrap()
    }

    fn render_to_string(conv: &Conversation) -> String {
        let mut buf = Vec::new();
        render(&mut buf, conv).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn metadata_block_roundtrips() {
        let conv = sample();
        let md = render_to_string(&conv);

        let id = md
            .lines()
            .find_map(|l| l.strip_prefix("- **对话ID**: "))
            .unwrap();
        let count: usize = md
            .lines()
            .find_map(|l| l.strip_prefix("- **消息数量**: "))
            .unwrap()
            .parse()
            .unwrap();

        assert_eq!(id, conv.id);
        assert_eq!(count, conv.message_count());
    }

    #[test]
    fn roles_and_order() {
        let md = render_to_string(&sample());
        let user = md.find("### 👤 用户").unwrap();
        let assistant = md.find("### 🤖 助手").unwrap();
        assert!(user < assistant);
    }

    #[test]
    fn separator_between_but_not_after_messages() {
        let md = render_to_string(&sample());
        assert_eq!(md.matches("\n---\n").count(), 1);
        assert!(!md.trim_end().ends_with("---"));
    }

    #[test]
    fn empty_message_timestamp_omits_time_line() {
        let md = render_to_string(&sample());
        // Only the user message carries a timestamp.
        assert_eq!(md.matches("**时间**: ").count(), 1);
        assert!(md.contains("**时间**: 2024-03-15"));
    }

    #[test]
    fn empty_fragments_dropped_from_content() {
        let md = render_to_string(&sample());
        assert!(md.contains("回答"));
        // The empty THINK fragment leaves no blank line before the content.
        assert!(md.contains("### 🤖 助手\n回答"));
    }

    #[test]
    fn header_dates_use_lenient_format() {
        let md = render_to_string(&sample());
        assert!(md.contains("- **创建时间**: 2024-03-15"));
        assert!(md.contains("- **更新时间**: 2024-03-16"));
    }
}
