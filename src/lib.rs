//! # deepseek-chat-export
//!
//! A CLI tool that converts a DeepSeek chat-export JSON file into one
//! Markdown file per conversation, organized into `YYYY-MM` month
//! directories.
//!
//! ## What it does
//!
//! DeepSeek exports chat history as a JSON array of conversations. Each
//! conversation stores its messages as a tree — a mapping from node id to
//! node, rooted at the sentinel id `"root"`, where edits and regenerated
//! answers create branches. This tool flattens each tree depth-first into a
//! linear transcript, classifies every message as user or assistant from its
//! fragment tags, and writes a standalone Markdown file named
//! `<YYYY-MM-DD>_<title>.md` under the month directory of the conversation's
//! creation date.
//!
//! The input file is only ever read — your export is never modified.
//!
//! ## Usage
//!
//! ```sh
//! # Export conversations.json from the current directory
//! deepseek-chat-export
//!
//! # Explicit input file and output directory
//! deepseek-chat-export ~/Downloads/conversations.json ~/notes/deepseek
//! ```
//!
//! Preferences can be persisted in `~/.config/deepseek-chat-export/config.toml`.
//!
//! ## Caveats
//!
//! Branching conversations are linearized in depth-first pre-order, which is
//! not necessarily chronological. Two conversations sharing a creation date
//! and title map to the same filename and the later one wins.
