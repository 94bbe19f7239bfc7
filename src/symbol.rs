//! Symbol interning (spec §3 `Symbol`, component 1 of the system overview).
//!
//! A [`Symbol`] is a printable label interned against a [`SymbolTable`];
//! equality is by identity of the interned [`SymbolId`], not by string
//! comparison. Insertion order defines the id sequence, the same discipline
//! the teacher's `Nfa`/`Dfa` builders use for state numbering.

use indexmap::IndexSet;
use std::fmt;

/// Identifier of an interned [`Symbol`]. Dense, starts at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(pub u32);

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An interning table mapping printable labels to [`SymbolId`]s.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    labels: IndexSet<Box<str>>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `label`, returning its (possibly newly-assigned) id.
    pub fn intern(&mut self, label: &str) -> SymbolId {
        if let Some(idx) = self.labels.get_index_of(label) {
            return SymbolId(idx as u32);
        }
        let (idx, _) = self.labels.insert_full(label.into());
        SymbolId(idx as u32)
    }

    /// Looks up an already-interned label without inserting.
    #[must_use]
    pub fn lookup(&self, label: &str) -> Option<SymbolId> {
        self.labels.get_index_of(label).map(|idx| SymbolId(idx as u32))
    }

    /// Resolves an id back to its label.
    #[must_use]
    pub fn resolve(&self, id: SymbolId) -> Option<&str> {
        self.labels.get_index(id.0 as usize).map(|s| s.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &str)> {
        self.labels
            .iter()
            .enumerate()
            .map(|(idx, label)| (SymbolId(idx as u32), label.as_ref()))
    }
}
