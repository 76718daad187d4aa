//! # Watchsift Core
//!
//! Deduplication of trading watchlist files in a folder.
//!
//! ## Overview
//!
//! A watchlist is a `.csv` or `.txt` file of symbols (`NASDAQ:AAPL`, ...)
//! separated by commas and/or line breaks, with optional `/* ... */` block
//! comments and `#`, `###` or `//` line comments. Two reconciliations are
//! supported:
//!
//! - **filter**: keep the symbols of the most recently modified file that do
//!   not appear in any older file, in their original order
//! - **combine**: a unique union of every file, scanning oldest to newest so
//!   each symbol sits where it was first seen
//!
//! The result is written atomically as a single comma-separated line next to
//! the newest file (`<stem>_filtered.txt` or `<stem>_combined.txt`).
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Symbols, sequences, sets and watchlist files |
//! | [`tokenizer`] | Comment-aware splitting of raw text |
//! | [`selector`] | File discovery, name/age filters, recency ordering |
//! | [`source`] | Reading file content |
//! | [`aggregator`] | Set union across files |
//! | [`reconciler`] | Filter and first-seen combine |
//! | [`writer`] | Output naming, atomic writes, source removal |
//! | [`run`] | End-to-end orchestration |
//! | [`error`] | Error types |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use watchsift_core::{Mode, RunConfig, RunOutcome, Sifter};
//!
//! fn main() -> Result<(), watchsift_core::SiftError> {
//!     let config = RunConfig::new("watchlists").with_mode(Mode::Combine);
//!     if let RunOutcome::Combined(report) = Sifter::new().run(&config)? {
//!         println!("{}", report.line());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Only configuration problems (missing folder, bad glob) and write failures
//! fail a run. Unreadable files count as empty and are listed as warnings in
//! the run report; a failed source removal is recorded in the report too.

pub mod aggregator;
pub mod domain;
pub mod error;
pub mod reconciler;
pub mod run;
pub mod selector;
pub mod source;
pub mod tokenizer;
pub mod writer;

pub use aggregator::{aggregate, Aggregation};
pub use domain::{FileSet, Symbol, SymbolSequence, SymbolSet, WatchlistExtension, WatchlistFile};
pub use error::{SiftError, ValidationError};
pub use reconciler::{combine_file_set, combine_first_seen, filter_against_seen, Combination};
pub use run::{
    CombineReport, FileSummary, FilterReport, Mode, RunConfig, RunOutcome, Sifter, SourceRemoval,
};
pub use selector::{select, select_at, SelectionCriteria};
pub use source::{read_symbols, FsSource, ReadWarning, WatchlistSource};
pub use tokenizer::tokenize;
pub use writer::{output_path, remove_source, write_one_line, OutputKind};
