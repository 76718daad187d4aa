use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, PrimitiveDateTime};

const SECONDS_PER_DAY: u64 = 86_400;

/// Accepted watchlist file extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchlistExtension {
    Csv,
    Txt,
}

impl WatchlistExtension {
    pub const ALL: [Self; 2] = [Self::Csv, Self::Txt];

    /// Case-insensitive match against a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        Self::ALL
            .into_iter()
            .find(|candidate| extension.eq_ignore_ascii_case(candidate.as_str()))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Txt => "txt",
        }
    }
}

impl Display for WatchlistExtension {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discovered watchlist file. Never mutated by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistFile {
    path: PathBuf,
    modified: SystemTime,
    extension: WatchlistExtension,
}

impl WatchlistFile {
    /// Returns `None` when the path does not carry an accepted extension.
    pub fn new(path: impl Into<PathBuf>, modified: SystemTime) -> Option<Self> {
        let path = path.into();
        let extension = WatchlistExtension::from_path(&path)?;
        Some(Self {
            path,
            modified,
            extension,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    pub fn extension(&self) -> WatchlistExtension {
        self.extension
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Modification time as a UTC timestamp, clamped to the representable
    /// range of years 1 through 9999.
    pub fn modified_at(&self) -> OffsetDateTime {
        let nanos = match self.modified.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(after) => i128::try_from(after.as_nanos()).unwrap_or(i128::MAX),
            Err(before) => i128::try_from(before.duration().as_nanos()).map_or(i128::MIN, |n| -n),
        };
        OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or_else(|_| {
            if nanos < 0 {
                PrimitiveDateTime::MIN.assume_utc()
            } else {
                PrimitiveDateTime::MAX.assume_utc()
            }
        })
    }

    /// Whole days between the modification time and `now`, floored.
    /// Files stamped in the future are 0 days old.
    pub fn age_days(&self, now: SystemTime) -> u64 {
        now.duration_since(self.modified)
            .map(|elapsed| elapsed.as_secs() / SECONDS_PER_DAY)
            .unwrap_or(0)
    }
}

/// Watchlist files ordered newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet(Vec<WatchlistFile>);

impl FileSet {
    /// Orders `files` by modification time, newest first.
    ///
    /// Files are pre-sorted by path so equal timestamps resolve by path.
    pub fn from_unordered(mut files: Vec<WatchlistFile>) -> Self {
        files.sort_by(|left, right| left.path.cmp(&right.path));
        files.sort_by(|left, right| right.modified.cmp(&left.modified));
        Self(files)
    }

    pub fn newest(&self) -> Option<&WatchlistFile> {
        self.0.first()
    }

    /// Every file except the newest.
    pub fn older(&self) -> &[WatchlistFile] {
        self.0.get(1..).unwrap_or(&[])
    }

    pub fn oldest_first(&self) -> impl Iterator<Item = &WatchlistFile> {
        self.0.iter().rev()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WatchlistFile> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a WatchlistFile;
    type IntoIter = std::slice::Iter<'a, WatchlistFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
