use chrono::{DateTime, NaiveDateTime};
use eyre::{Context, Result};
use std::path::PathBuf;

/// Input filename used when neither the CLI nor the config file names one.
pub const DEFAULT_INPUT_FILE: &str = "conversations.json";
/// Output directory used when neither the CLI nor the config file names one.
pub const DEFAULT_OUTPUT_DIR: &str = "conversations_export";
/// Filename stand-in for titles that sanitize down to nothing.
pub const UNTITLED_CONVERSATION: &str = "未命名对话";
/// Rendered in place of an empty timestamp.
pub const UNKNOWN_TIME: &str = "未知时间";
/// Rendered in place of a non-empty timestamp no accepted format matches.
pub const UNPARSEABLE_TIME: &str = "无法解析日期";

/// Configuration required to run the export process.
/// This decouples the logic from how the arguments were parsed (CLI/Config file).
#[derive(Clone)]
pub struct ExportConfig {
    pub input_file: PathBuf,
    pub output_dir: PathBuf,
    pub verbose: bool,
    pub quiet: bool,
}

/// Lenient timestamp formatting for display inside the markdown document.
///
/// Tries RFC 3339, then `%Y-%m-%d %H:%M:%S`, then the bare Z-suffixed ISO
/// variant; the first success renders as `YYYY-MM-DD`. Empty input and
/// unparseable input yield distinct fixed markers.
pub fn format_time(raw: &str) -> String {
    if raw.is_empty() {
        return UNKNOWN_TIME.to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d").to_string();
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%SZ"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.format("%Y-%m-%d").to_string();
        }
    }
    UNPARSEABLE_TIME.to_string()
}

/// Strict `YYYY-MM` extraction for the month directory. RFC 3339 only;
/// failure skips the conversation.
pub fn extract_month(timestamp: &str) -> Result<String> {
    let dt = DateTime::parse_from_rfc3339(timestamp)
        .wrap_err_with(|| format!("Not an RFC 3339 timestamp: {timestamp:?}"))?;
    Ok(dt.format("%Y-%m").to_string())
}

/// Strict `YYYY-MM-DD` extraction for the filename prefix. RFC 3339 only.
pub fn extract_date(timestamp: &str) -> Result<String> {
    let dt = DateTime::parse_from_rfc3339(timestamp)
        .wrap_err_with(|| format!("Not an RFC 3339 timestamp: {timestamp:?}"))?;
    Ok(dt.format("%Y-%m-%d").to_string())
}

/// Make a conversation title safe to use as a filename.
///
/// Each filesystem-illegal character becomes `_`, the result is truncated to
/// 100 characters and trimmed; a title that sanitizes to nothing gets the
/// fixed placeholder.
pub fn sanitize_title(title: &str) -> String {
    const INVALID: [char; 11] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|', '\n', '\r'];
    let cleaned: String = title
        .chars()
        .map(|c| if INVALID.contains(&c) { '_' } else { c })
        .take(100)
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        UNTITLED_CONVERSATION.to_string()
    } else {
        cleaned.to_string()
    }
}
