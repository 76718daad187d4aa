//! Access to watchlist file content.

use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{SymbolSequence, WatchlistFile};
use crate::tokenizer::tokenize;

/// Supplies the raw text of a watchlist file.
pub trait WatchlistSource {
    fn read_text(&self, path: &Path) -> io::Result<String>;
}

impl<S: WatchlistSource + ?Sized> WatchlistSource for &S {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        (**self).read_text(path)
    }
}

/// Reads files from disk. Invalid UTF-8 is replaced rather than rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl WatchlistSource for FsSource {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        let bytes = fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// A file that could not be read and was treated as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadWarning {
    pub path: PathBuf,
    pub message: String,
}

impl Display for ReadWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to read {}: {}", self.path.display(), self.message)
    }
}

/// Read and tokenize one file.
///
/// Failures are logged and returned as a [`ReadWarning`] for the caller to
/// record; they never abort a run.
pub fn read_symbols<S>(source: &S, file: &WatchlistFile) -> Result<SymbolSequence, ReadWarning>
where
    S: WatchlistSource + ?Sized,
{
    match source.read_text(file.path()) {
        Ok(text) => {
            let symbols = tokenize(&text);
            debug!(file = %file.file_name(), count = symbols.len(), "tokenized watchlist");
            Ok(symbols)
        }
        Err(error) => {
            warn!(file = %file.file_name(), %error, "failed to read watchlist; treating as empty");
            Err(ReadWarning {
                path: file.path().to_path_buf(),
                message: error.to_string(),
            })
        }
    }
}
