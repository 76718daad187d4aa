//! CLI argument definitions for watchsift.
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `FOLDER` | `.` | Folder holding `.csv`/`.txt` watchlists |
//! | `--pattern` | none | Glob on file names, e.g. `ADR*.csv` |
//! | `--days` | none | Only files modified within the last N days |
//! | `--no-print` | `false` | Do not echo the one-line import string |
//! | `--keep-latest` | `false` | Keep the newest file after filtering |
//! | `--combine` | `false` | Combine all files instead of filtering |
//! | `--format` | `text` | Report format (text, json) |
//! | `--log-level` | `warn` | Log filter, overridden by `WATCHSIFT_LOG` |
//!
//! # Examples
//!
//! ```bash
//! # Filter the newest watchlist against everything older, keep the source
//! watchsift ~/watchlists --keep-latest
//!
//! # Merge this week's ADR lists into one import string
//! watchsift ~/watchlists --pattern 'ADR*' --days 7 --combine
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use watchsift_core::{Mode, RunConfig, SelectionCriteria};

/// Deduplicate trading watchlist files.
///
/// By default the most recently modified watchlist is filtered against every
/// older one and written as `<name>_filtered.txt`; the newest source is then
/// removed unless `--keep-latest` is given. With `--combine` all watchlists
/// are merged into `<newest name>_combined.txt` and nothing is removed.
#[derive(Debug, Parser)]
#[command(name = "watchsift", author, version, about = "Deduplicate trading watchlist files")]
pub struct Cli {
    /// Folder containing .csv/.txt watchlists.
    #[arg(default_value = ".")]
    pub folder: PathBuf,

    /// Glob pattern to pre-filter files by name (e.g. 'ADR*.csv').
    #[arg(long)]
    pub pattern: Option<String>,

    /// Only consider files modified within the last N days.
    #[arg(long, value_name = "N")]
    pub days: Option<u64>,

    /// Do not print the one-line import string.
    #[arg(long, default_value_t = false)]
    pub no_print: bool,

    /// Keep the newest file instead of deleting it after filtering.
    #[arg(long, default_value_t = false)]
    pub keep_latest: bool,

    /// Combine all files into a first-seen unique union (never deletes).
    #[arg(long, default_value_t = false)]
    pub combine: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    /// Log filter directive (e.g. `info`, `watchsift_core=debug`).
    #[arg(long, env = "WATCHSIFT_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Log line format on stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Report format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    Text,
    /// Single JSON object.
    Json,
}

/// Log format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.combine {
            Mode::Combine
        } else {
            Mode::Filter {
                keep_latest: self.keep_latest,
            }
        }
    }

    pub fn criteria(&self) -> SelectionCriteria {
        SelectionCriteria {
            pattern: self.pattern.clone(),
            max_age_days: self.days,
        }
    }

    /// Build the run configuration for an already resolved folder.
    pub fn run_config(&self, folder: PathBuf) -> RunConfig {
        RunConfig::new(folder)
            .with_criteria(self.criteria())
            .with_mode(self.mode())
    }
}
