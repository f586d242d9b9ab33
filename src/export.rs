//! The export loop: one markdown file per conversation, grouped into
//! `YYYY-MM` month directories under the output root.

use crate::importer::{self, Conversation};
use crate::renderer;
use crate::utils::{self, ExportConfig};
use eyre::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub struct BatchSummary {
    pub succeeded: usize,
    pub total: usize,
}

/// The main entry point for the export logic.
///
/// Reading the input file, parsing it, and creating the output root are all
/// fatal on failure. Everything after that is per-conversation: a bad
/// timestamp or write error skips that one conversation and the loop
/// continues.
pub fn execute(config: ExportConfig) -> Result<()> {
    let bytes = fs::read(&config.input_file).wrap_err_with(|| {
        format!(
            "Failed to read input file: {}\nUsage: deepseek-chat-export [INPUT_FILE] [OUTPUT_DIR]",
            config.input_file.display()
        )
    })?;
    let conversations = importer::load_conversations(&bytes)?;

    fs::create_dir_all(&config.output_dir).wrap_err_with(|| {
        format!(
            "Failed to create output directory: {}\nUsage: deepseek-chat-export [INPUT_FILE] [OUTPUT_DIR]",
            config.output_dir.display()
        )
    })?;

    let pb = if config.quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(conversations.len() as u64);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)",
            )
            .unwrap()
            .progress_chars("=>-"),
        );
        bar.println(format!(
            "Found {} conversations in {}.",
            conversations.len(),
            config.input_file.display()
        ));
        bar
    };

    let summary = export_all(&conversations, &config, &pb);
    pb.finish_and_clear();

    if !config.quiet {
        eprintln!(
            "Done. Exported {}/{} conversations to {}.",
            summary.succeeded,
            summary.total,
            config.output_dir.display()
        );
    }

    Ok(())
}

/// Strictly ordered, sequential iteration; the success count reflects the
/// input order deterministically.
fn export_all(
    conversations: &[Conversation],
    config: &ExportConfig,
    pb: &ProgressBar,
) -> BatchSummary {
    let mut succeeded = 0usize;
    for conv in conversations {
        match export_conversation(conv, config) {
            Ok(path) => {
                succeeded += 1;
                if config.verbose {
                    pb.println(format!("Created:  {}", path.display()));
                }
            }
            Err(e) => {
                pb.println(format!("Error [{}]: {:#}", conv.title, e));
            }
        }
        pb.inc(1);
    }
    BatchSummary {
        succeeded,
        total: conversations.len(),
    }
}

/// Write one conversation to `<outputDir>/<YYYY-MM>/<YYYY-MM-DD>_<title>.md`.
///
/// The month and date come from a strict RFC 3339 parse of the conversation's
/// `inserted_at`; a failed parse aborts before anything touches the
/// filesystem. Identical date+title pairs within a batch overwrite silently.
pub fn export_conversation(conv: &Conversation, config: &ExportConfig) -> Result<PathBuf> {
    let month = utils::extract_month(&conv.inserted_at)?;
    let date = utils::extract_date(&conv.inserted_at)?;

    let month_dir = config.output_dir.join(month);
    fs::create_dir_all(&month_dir).wrap_err_with(|| {
        format!("Failed to create month directory: {}", month_dir.display())
    })?;

    let filename = format!("{}_{}.md", date, utils::sanitize_title(&conv.title));
    let path = month_dir.join(filename);

    let file = File::create(&path)
        .wrap_err_with(|| format!("Failed to create: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    renderer::render(&mut writer, conv).wrap_err("Failed to write markdown")?;
    writer.flush().wrap_err("Failed to flush markdown file")?;

    Ok(path)
}
