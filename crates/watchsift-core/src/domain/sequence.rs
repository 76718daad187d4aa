use std::collections::HashSet;

use serde::Serialize;

use super::Symbol;

/// Separator used when a sequence is rendered as a one-line import string.
pub const LINE_SEPARATOR: &str = ",";

/// Ordered symbols from a single source, duplicates included.
///
/// There is no mutating API; a sequence is fixed once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymbolSequence(Vec<Symbol>);

impl SymbolSequence {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.0
    }

    /// Comma-joined single line without a trailing newline.
    pub fn to_line(&self) -> String {
        let parts: Vec<&str> = self.0.iter().map(Symbol::as_str).collect();
        parts.join(LINE_SEPARATOR)
    }
}

impl From<Vec<Symbol>> for SymbolSequence {
    fn from(value: Vec<Symbol>) -> Self {
        Self(value)
    }
}

impl FromIterator<Symbol> for SymbolSequence {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SymbolSequence {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for SymbolSequence {
    type Item = Symbol;
    type IntoIter = std::vec::IntoIter<Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Unordered unique symbols, used for membership tests only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolSet(HashSet<Symbol>);

impl SymbolSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.0.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Add every symbol of `sequence`; duplicates collapse.
    pub fn union_with(&mut self, sequence: &SymbolSequence) {
        self.0.extend(sequence.iter().cloned());
    }
}

impl FromIterator<Symbol> for SymbolSet {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a SymbolSequence> for SymbolSet {
    fn from_iter<T: IntoIterator<Item = &'a SymbolSequence>>(iter: T) -> Self {
        let mut set = Self::new();
        for sequence in iter {
            set.union_with(sequence);
        }
        set
    }
}
