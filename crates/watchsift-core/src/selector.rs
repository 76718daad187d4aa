//! Discovery of watchlist files in a folder.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use glob::{MatchOptions, Pattern};
use tracing::{debug, warn};

use crate::domain::{FileSet, WatchlistExtension, WatchlistFile};
use crate::error::SiftError;

/// Case-sensitive file name matching. Wildcards also match a leading dot,
/// so a pattern never hides files that an unfiltered run would select.
const NAME_MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Optional filters applied while selecting files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionCriteria {
    /// Glob matched against file names, e.g. `ADR*.csv`.
    pub pattern: Option<String>,
    /// Files older than this many whole days are skipped.
    pub max_age_days: Option<u64>,
}

impl SelectionCriteria {
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_max_age_days(mut self, days: u64) -> Self {
        self.max_age_days = Some(days);
        self
    }
}

/// Select watchlist files in `directory`, newest first.
pub fn select(directory: &Path, criteria: &SelectionCriteria) -> Result<FileSet, SiftError> {
    select_at(directory, criteria, SystemTime::now())
}

/// Same as [`select`] with an explicit clock for the age filter.
pub fn select_at(
    directory: &Path,
    criteria: &SelectionCriteria,
    now: SystemTime,
) -> Result<FileSet, SiftError> {
    ensure_directory(directory)?;
    let pattern = compile_pattern(criteria.pattern.as_deref())?;

    let entries = fs::read_dir(directory).map_err(|source| SiftError::Scan {
        path: directory.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!(folder = %directory.display(), %error, "skipping unreadable directory entry");
                continue;
            }
        };

        let path = entry.path();
        if let Some(pattern) = &pattern {
            let name = entry.file_name();
            if !pattern.matches_with(&name.to_string_lossy(), NAME_MATCH_OPTIONS) {
                continue;
            }
        }

        if WatchlistExtension::from_path(&path).is_none() {
            continue;
        }

        // follows symlinks, like a plain `is_file` check
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(error) => {
                warn!(file = %path.display(), %error, "skipping file with unreadable metadata");
                continue;
            }
        };
        if !metadata.is_file() {
            continue;
        }

        let modified = match metadata.modified() {
            Ok(modified) => modified,
            Err(error) => {
                warn!(file = %path.display(), %error, "skipping file without modification time");
                continue;
            }
        };

        let Some(file) = WatchlistFile::new(path, modified) else {
            continue;
        };

        if let Some(max_age_days) = criteria.max_age_days {
            let age_days = file.age_days(now);
            if age_days > max_age_days {
                debug!(file = %file.file_name(), age_days, max_age_days, "skipping file outside age window");
                continue;
            }
        }

        files.push(file);
    }

    let selected = FileSet::from_unordered(files);
    debug!(folder = %directory.display(), count = selected.len(), "selected watchlist files");
    Ok(selected)
}

/// Fail with a configuration error unless `path` is an existing directory.
pub fn ensure_directory(path: &Path) -> Result<(), SiftError> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(SiftError::NotADirectory {
            path: path.to_path_buf(),
        }),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            Err(SiftError::FolderNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(SiftError::Scan {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn compile_pattern(pattern: Option<&str>) -> Result<Option<Pattern>, SiftError> {
    pattern
        .map(|raw| {
            Pattern::new(raw).map_err(|error| SiftError::InvalidPattern {
                pattern: raw.to_owned(),
                message: error.msg.to_owned(),
            })
        })
        .transpose()
}
