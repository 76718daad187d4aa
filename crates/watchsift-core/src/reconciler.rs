//! The two reconciliation algorithms: filter against seen symbols, and
//! first-seen combine.

use std::collections::HashSet;

use crate::domain::{FileSet, Symbol, SymbolSequence, SymbolSet};
use crate::source::{read_symbols, ReadWarning, WatchlistSource};

/// Keep the symbols of `newest` that are not in `seen`, in order and with
/// their duplicate counts.
pub fn filter_against_seen(newest: &SymbolSequence, seen: &SymbolSet) -> SymbolSequence {
    newest
        .iter()
        .filter(|symbol| !seen.contains(symbol))
        .cloned()
        .collect()
}

/// Unique union of `sequences`, given oldest first.
///
/// A symbol lands at the position of its earliest occurrence; later
/// occurrences are dropped.
pub fn combine_first_seen<'a, I>(sequences: I) -> SymbolSequence
where
    I: IntoIterator<Item = &'a SymbolSequence>,
{
    let mut seen: HashSet<&Symbol> = HashSet::new();
    let mut combined = Vec::new();
    for sequence in sequences {
        for symbol in sequence {
            if seen.insert(symbol) {
                combined.push(symbol.clone());
            }
        }
    }
    SymbolSequence::new(combined)
}

/// Result of combining a whole file set.
#[derive(Debug, Clone, Default)]
pub struct Combination {
    pub combined: SymbolSequence,
    pub warnings: Vec<ReadWarning>,
}

/// Read `files` from oldest to newest and combine them in first-seen order.
pub fn combine_file_set<S>(files: &FileSet, source: &S) -> Combination
where
    S: WatchlistSource + ?Sized,
{
    let mut warnings = Vec::new();
    let mut sequences = Vec::with_capacity(files.len());
    for file in files.oldest_first() {
        match read_symbols(source, file) {
            Ok(symbols) => sequences.push(symbols),
            Err(warning) => warnings.push(warning),
        }
    }

    Combination {
        combined: combine_first_seen(&sequences),
        warnings,
    }
}
