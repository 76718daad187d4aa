//! # Domain Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Trimmed, non-empty instrument identifier |
//! | [`SymbolSequence`] | Ordered symbols from one file, duplicates kept |
//! | [`SymbolSet`] | Unique symbols for membership tests |
//! | [`WatchlistFile`] | A `.csv`/`.txt` file with its modification time |
//! | [`FileSet`] | Watchlist files ordered newest first |

mod sequence;
mod symbol;
mod watchlist;

pub use sequence::{SymbolSequence, SymbolSet, LINE_SEPARATOR};
pub use symbol::Symbol;
pub use watchlist::{FileSet, WatchlistExtension, WatchlistFile};
