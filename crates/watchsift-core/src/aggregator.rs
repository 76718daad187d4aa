//! Union of symbols across files.

use crate::domain::{SymbolSet, WatchlistFile};
use crate::source::{read_symbols, ReadWarning, WatchlistSource};

/// Symbols seen across a group of files.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub seen: SymbolSet,
    pub warnings: Vec<ReadWarning>,
}

/// Union every file's symbols into one set.
///
/// Unreadable files add nothing and are reported in `warnings`.
pub fn aggregate<'a, I, S>(files: I, source: &S) -> Aggregation
where
    I: IntoIterator<Item = &'a WatchlistFile>,
    S: WatchlistSource + ?Sized,
{
    let mut aggregation = Aggregation::default();
    for file in files {
        match read_symbols(source, file) {
            Ok(symbols) => aggregation.seen.union_with(&symbols),
            Err(warning) => aggregation.warnings.push(warning),
        }
    }
    aggregation
}
