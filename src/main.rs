mod export;
mod importer;
mod renderer;
mod tree;
mod utils;

use clap::Parser;
use eyre::{Context, Result, eyre};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Export DeepSeek chat history JSON to per-conversation Markdown files,
/// organized into YYYY-MM month directories.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Exported conversations JSON file.
    /// Defaults to ./conversations.json if not set in config.
    #[arg(value_name = "INPUT_FILE")]
    input_file: Option<PathBuf>,

    /// Directory to export markdown files into.
    /// Defaults to ./conversations_export if not set in config.
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Path to a specific configuration file.
    /// Defaults to $XDG_CONFIG_HOME/deepseek-chat-export/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print each file written.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress standard output (progress bar and summary).
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Deserialize, Default)]
struct FileConfig {
    input_file: Option<PathBuf>,
    output_dir: Option<PathBuf>,
}

fn load_file_config(explicit_path: Option<&Path>) -> Result<FileConfig> {
    let path = if let Some(p) = explicit_path {
        if !p.exists() {
            return Err(eyre!("Config file not found: {}", p.display()));
        }
        Some(p.to_path_buf())
    } else {
        // Search: XDG/OS config dir, then nothing
        dirs::config_dir()
            .map(|d| d.join("deepseek-chat-export/config.toml"))
            .filter(|p| p.exists())
    };

    match path {
        None => Ok(FileConfig::default()),
        Some(p) => {
            let content = fs::read_to_string(&p)
                .wrap_err_with(|| format!("Failed to read config: {}", p.display()))?;
            toml::from_str(&content)
                .wrap_err_with(|| format!("Failed to parse config: {}", p.display()))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load config file (CLI path > default path)
    let file_cfg = load_file_config(cli.config.as_deref())?;

    // 2. Resolve input_file (CLI > Config > Default)
    let input_file = cli
        .input_file
        .or(file_cfg.input_file)
        .unwrap_or_else(|| PathBuf::from(utils::DEFAULT_INPUT_FILE));

    if !input_file.exists() {
        return Err(eyre!(
            "Input file not found: {}\nUsage: deepseek-chat-export [INPUT_FILE] [OUTPUT_DIR]",
            input_file.display()
        ));
    }

    // 3. Resolve output_dir (CLI > Config > Default)
    let output_dir = cli
        .output_dir
        .or(file_cfg.output_dir)
        .unwrap_or_else(|| PathBuf::from(utils::DEFAULT_OUTPUT_DIR));

    // 4. Build the Export Config
    let config = utils::ExportConfig {
        input_file,
        output_dir,
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    // 5. Run the Business Logic
    export::execute(config)
}
