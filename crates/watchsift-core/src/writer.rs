//! Output naming, atomic one-line writes, and source removal.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::{Builder, NamedTempFile};
use tracing::info;

use crate::domain::{SymbolSequence, WatchlistExtension, WatchlistFile};
use crate::error::SiftError;

/// Every output is written as `.txt`, whatever the input extension.
pub const OUTPUT_EXTENSION: WatchlistExtension = WatchlistExtension::Txt;

/// Which reconciliation produced an output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Filtered,
    Combined,
}

impl OutputKind {
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Filtered => "_filtered",
            Self::Combined => "_combined",
        }
    }
}

/// `<dir of newest>/<stem of newest><suffix>.txt`
pub fn output_path(newest: &WatchlistFile, kind: OutputKind) -> PathBuf {
    let name = format!("{}{}.{}", newest.stem(), kind.suffix(), OUTPUT_EXTENSION);
    newest.path().with_file_name(name)
}

/// Write `symbols` as one comma-joined line.
///
/// The line goes to a temporary file in the destination directory which is
/// then renamed over `path`, so `path` either keeps its previous state or
/// holds the complete new line.
pub fn write_one_line(path: &Path, symbols: &SymbolSequence) -> Result<(), SiftError> {
    persist_line(path, &symbols.to_line()).map_err(|source| SiftError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(output = %path.display(), count = symbols.len(), "wrote watchlist");
    Ok(())
}

fn persist_line(path: &Path, line: &str) -> io::Result<()> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // the temp file is deleted on drop if any step below fails
    let mut temp = create_temp(directory)?;
    if let Ok(existing) = fs::metadata(path) {
        if existing.is_file() {
            temp.as_file().set_permissions(existing.permissions())?;
        }
    }
    temp.write_all(line.as_bytes())?;
    temp.flush()?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|error| error.error)?;
    Ok(())
}

/// A new output gets the same mode as a plain `fs::write`: 0o666 minus the
/// process umask.
#[cfg(unix)]
fn create_temp(directory: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(directory)
}

#[cfg(not(unix))]
fn create_temp(directory: &Path) -> io::Result<NamedTempFile> {
    Builder::new().tempfile_in(directory)
}

/// Delete a processed source file. Kept separate from writing so callers
/// decide whether and when to remove.
pub fn remove_source(path: &Path) -> io::Result<()> {
    fs::remove_file(path)?;
    info!(file = %path.display(), "removed source watchlist");
    Ok(())
}
