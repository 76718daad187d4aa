//! Run orchestration: select, reconcile, write, then optionally remove the
//! newest source.

use std::path::{Path, PathBuf};

use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::aggregator::aggregate;
use crate::domain::{FileSet, SymbolSequence, WatchlistFile};
use crate::error::SiftError;
use crate::reconciler::{combine_file_set, filter_against_seen};
use crate::selector::{select, SelectionCriteria};
use crate::source::{read_symbols, FsSource, ReadWarning, WatchlistSource};
use crate::writer::{output_path, remove_source, write_one_line, OutputKind};

/// Reconciliation mode; exactly one per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Mode {
    /// Drop symbols of the newest file already present in older files.
    Filter { keep_latest: bool },
    /// First-seen union of every file, oldest first. Never deletes.
    Combine,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Filter { keep_latest: false }
    }
}

/// Everything a run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub folder: PathBuf,
    pub criteria: SelectionCriteria,
    pub mode: Mode,
}

impl RunConfig {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            criteria: SelectionCriteria::default(),
            mode: Mode::default(),
        }
    }

    pub fn with_criteria(mut self, criteria: SelectionCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }
}

/// Identity of the newest file at the time of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub name: String,
    pub path: PathBuf,
    #[serde(serialize_with = "serialize_rfc3339")]
    pub modified: OffsetDateTime,
}

fn serialize_rfc3339<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let formatted = value.format(&Rfc3339).map_err(S::Error::custom)?;
    serializer.serialize_str(&formatted)
}

impl From<&WatchlistFile> for FileSummary {
    fn from(file: &WatchlistFile) -> Self {
        Self {
            name: file.file_name(),
            path: file.path().to_path_buf(),
            modified: file.modified_at(),
        }
    }
}

/// What happened to the newest source after a filter run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceRemoval {
    /// Removal was not requested.
    Kept,
    Removed,
    /// Removal was requested but not attempted.
    Skipped { reason: String },
    /// Removal failed; the written output is still valid.
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    pub newest: FileSummary,
    /// Number of older files the newest was compared against.
    pub compared_files: usize,
    pub original_count: usize,
    pub removed_count: usize,
    pub remaining: SymbolSequence,
    pub output: PathBuf,
    pub warnings: Vec<ReadWarning>,
    pub source_removal: SourceRemoval,
}

impl FilterReport {
    pub fn remaining_count(&self) -> usize {
        self.remaining.len()
    }

    pub fn line(&self) -> String {
        self.remaining.to_line()
    }

    fn newest_unreadable(&self) -> bool {
        self.warnings
            .iter()
            .any(|warning| warning.path == self.newest.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombineReport {
    pub newest: FileSummary,
    pub file_count: usize,
    pub combined: SymbolSequence,
    pub output: PathBuf,
    pub warnings: Vec<ReadWarning>,
}

impl CombineReport {
    pub fn unique_count(&self) -> usize {
        self.combined.len()
    }

    pub fn line(&self) -> String {
        self.combined.to_line()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Nothing matched the selection; no output was produced.
    NoFiles { folder: PathBuf },
    Filtered(FilterReport),
    Combined(CombineReport),
}

/// Runs reconciliations against a [`WatchlistSource`].
#[derive(Debug, Clone, Default)]
pub struct Sifter<S = FsSource> {
    source: S,
}

impl Sifter<FsSource> {
    pub fn new() -> Self {
        Self { source: FsSource }
    }
}

impl<S: WatchlistSource> Sifter<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Select files for `config` and apply its mode.
    ///
    /// In filter mode without `keep_latest` the newest source is removed
    /// after the output is written; a removal failure is recorded in the
    /// report and does not fail the run.
    pub fn run(&self, config: &RunConfig) -> Result<RunOutcome, SiftError> {
        let files = select(&config.folder, &config.criteria)?;
        if files.is_empty() {
            info!(folder = %config.folder.display(), "no matching watchlist files");
            return Ok(RunOutcome::NoFiles {
                folder: config.folder.clone(),
            });
        }

        match config.mode {
            Mode::Combine => Ok(self
                .combine(&files)?
                .map_or_else(|| no_files(&config.folder), RunOutcome::Combined)),
            Mode::Filter { keep_latest } => {
                let Some(mut report) = self.filter(&files)? else {
                    return Ok(no_files(&config.folder));
                };
                if !keep_latest {
                    report.source_removal = remove_newest(&report);
                }
                Ok(RunOutcome::Filtered(report))
            }
        }
    }

    /// Filter the newest file against the union of the older ones and write
    /// `<stem>_filtered.txt`. Never removes anything.
    ///
    /// Returns `None` for an empty file set.
    pub fn filter(&self, files: &FileSet) -> Result<Option<FilterReport>, SiftError> {
        let Some(newest) = files.newest() else {
            return Ok(None);
        };
        let output = output_path(newest, OutputKind::Filtered);
        ensure_output_is_not_selected(&output, files)?;

        let mut warnings = Vec::new();
        let newest_symbols = read_symbols(&self.source, newest).unwrap_or_else(|warning| {
            warnings.push(warning);
            SymbolSequence::default()
        });
        if newest_symbols.is_empty() {
            warn!(file = %newest.file_name(), "newest file contained no symbols after parsing");
        }

        let older = files.older();
        let remaining = if older.is_empty() {
            info!(file = %newest.file_name(), "no older files to compare; passing symbols through");
            newest_symbols.clone()
        } else {
            let aggregation = aggregate(older, &self.source);
            warnings.extend(aggregation.warnings);
            filter_against_seen(&newest_symbols, &aggregation.seen)
        };

        write_one_line(&output, &remaining)?;

        Ok(Some(FilterReport {
            newest: FileSummary::from(newest),
            compared_files: older.len(),
            original_count: newest_symbols.len(),
            removed_count: newest_symbols.len() - remaining.len(),
            remaining,
            output,
            warnings,
            source_removal: SourceRemoval::Kept,
        }))
    }

    /// Combine every file first-seen, oldest to newest, and write
    /// `<newest stem>_combined.txt`. Never removes anything.
    ///
    /// Returns `None` for an empty file set.
    pub fn combine(&self, files: &FileSet) -> Result<Option<CombineReport>, SiftError> {
        let Some(newest) = files.newest() else {
            return Ok(None);
        };

        let output = output_path(newest, OutputKind::Combined);
        ensure_output_is_not_selected(&output, files)?;

        let combination = combine_file_set(files, &self.source);
        write_one_line(&output, &combination.combined)?;

        Ok(Some(CombineReport {
            newest: FileSummary::from(newest),
            file_count: files.len(),
            combined: combination.combined,
            output,
            warnings: combination.warnings,
        }))
    }
}

/// Inputs are never overwritten, e.g. an older `a_filtered.txt` next to a
/// newest `a.csv`.
fn ensure_output_is_not_selected(output: &Path, files: &FileSet) -> Result<(), SiftError> {
    if files.iter().any(|file| file.path() == output) {
        return Err(SiftError::OutputIsSelected {
            path: output.to_path_buf(),
        });
    }
    Ok(())
}

fn no_files(folder: &Path) -> RunOutcome {
    RunOutcome::NoFiles {
        folder: folder.to_path_buf(),
    }
}

fn remove_newest(report: &FilterReport) -> SourceRemoval {
    if report.newest_unreadable() {
        let reason = String::from("newest file could not be read");
        warn!(file = %report.newest.name, %reason, "keeping newest source");
        return SourceRemoval::Skipped { reason };
    }

    match remove_source(&report.newest.path) {
        Ok(()) => SourceRemoval::Removed,
        Err(error) => {
            warn!(file = %report.newest.name, %error, "failed to remove newest source; output is kept");
            SourceRemoval::Failed {
                message: error.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use filetime::{set_file_mtime, FileTime};
    use tempfile::tempdir;

    use super::*;

    fn write(dir: &Path, name: &str, content: &str, unix_seconds: i64) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).expect("write fixture");
        set_file_mtime(&path, FileTime::from_unix_time(unix_seconds, 0)).expect("set mtime");
        path
    }

    #[test]
    fn filter_run_writes_output_and_removes_newest() {
        let temp = tempdir().expect("tempdir");
        write(temp.path(), "old.csv", "AAPL,MSFT", 1_000);
        let newest = write(temp.path(), "new.txt", "MSFT,NVDA,AAPL,META", 2_000);

        let outcome = Sifter::new()
            .run(&RunConfig::new(temp.path()))
            .expect("run");

        let RunOutcome::Filtered(report) = outcome else {
            panic!("expected filter report");
        };
        assert_eq!(report.line(), "NVDA,META");
        assert_eq!(report.original_count, 4);
        assert_eq!(report.removed_count, 2);
        assert_eq!(report.compared_files, 1);
        assert_eq!(report.source_removal, SourceRemoval::Removed);
        assert_eq!(report.output, temp.path().join("new_filtered.txt"));
        assert!(!newest.exists());
    }

    #[test]
    fn keep_latest_leaves_newest_in_place() {
        let temp = tempdir().expect("tempdir");
        write(temp.path(), "old.csv", "AAPL", 1_000);
        let newest = write(temp.path(), "new.csv", "AAPL,TSLA", 2_000);

        let config = RunConfig::new(temp.path()).with_mode(Mode::Filter { keep_latest: true });
        let RunOutcome::Filtered(report) = Sifter::new().run(&config).expect("run") else {
            panic!("expected filter report");
        };

        assert_eq!(report.source_removal, SourceRemoval::Kept);
        assert!(newest.exists());
    }

    #[test]
    fn filter_without_run_never_deletes() {
        let temp = tempdir().expect("tempdir");
        let newest = write(temp.path(), "only.csv", "AAPL", 1_000);
        let files = select(temp.path(), &SelectionCriteria::default()).expect("select");

        let report = Sifter::new()
            .filter(&files)
            .expect("filter")
            .expect("one file");

        assert_eq!(report.line(), "AAPL");
        assert_eq!(report.compared_files, 0);
        assert!(newest.exists());
    }

    #[test]
    fn unreadable_newest_is_not_removed() {
        struct Unreadable;

        impl WatchlistSource for Unreadable {
            fn read_text(&self, _path: &Path) -> std::io::Result<String> {
                Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied))
            }
        }

        let temp = tempdir().expect("tempdir");
        let newest = write(temp.path(), "locked.csv", "AAPL", 1_000);

        let RunOutcome::Filtered(report) = Sifter::with_source(Unreadable)
            .run(&RunConfig::new(temp.path()))
            .expect("run")
        else {
            panic!("expected filter report");
        };

        assert!(matches!(report.source_removal, SourceRemoval::Skipped { .. }));
        assert_eq!(report.line(), "");
        assert!(newest.exists());
    }

    #[test]
    fn output_name_taken_by_an_older_watchlist_is_refused() {
        let cases = [
            (Mode::Filter { keep_latest: false }, "a_filtered.txt"),
            (Mode::Combine, "a_combined.txt"),
        ];

        for (mode, older_name) in cases {
            // Given: an older list already named like the newest file's output
            let temp = tempdir().expect("tempdir");
            let older = write(temp.path(), older_name, "AAPL,MSFT", 1_000);
            let newest = write(temp.path(), "a.csv", "AAPL,TSLA", 2_000);

            // When: the run starts
            let error = Sifter::new()
                .run(&RunConfig::new(temp.path()).with_mode(mode))
                .expect_err("must refuse");

            // Then: it fails as a configuration error and both inputs are untouched
            assert!(matches!(error, SiftError::OutputIsSelected { .. }));
            assert!(error.is_configuration());
            assert_eq!(fs::read_to_string(&older).expect("older"), "AAPL,MSFT");
            assert!(newest.exists());
        }
    }

    #[test]
    fn empty_file_set_produces_no_report() {
        let sifter = Sifter::new();
        assert!(sifter.filter(&FileSet::default()).expect("filter").is_none());
        assert!(sifter.combine(&FileSet::default()).expect("combine").is_none());
    }

    #[test]
    fn missing_folder_is_a_configuration_error() {
        let temp = tempdir().expect("tempdir");
        let error = Sifter::new()
            .run(&RunConfig::new(temp.path().join("nope")))
            .expect_err("must fail");
        assert!(error.is_configuration());
    }
}
