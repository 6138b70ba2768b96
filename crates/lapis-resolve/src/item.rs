//! Candidate sets.
//!
//! A [`LookupItem`] is the resolver's unit of result: one plausible
//! (type, declaring-symbol) pair. A [`CandidateSet`] accumulates them in
//! insertion order while filtering structural duplicates, so the first
//! occurrence of a candidate always keeps its position — base-expression
//! resolution depends on first-match-wins ordering.

use std::fmt;

use fxhash::FxHashSet;

use lapis_model::{SymbolId, Ty};

/// One plausible evaluation result of an expression.
///
/// `symbol` is the "last visible symbol": the declaration establishing
/// this candidate's visibility context, used as the vantage point for any
/// nested lookup. It is never absent — synthesized types carry the
/// current scope's owner, or the global namespace as a last resort.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupItem {
    pub ty: Ty,
    pub symbol: SymbolId,
}

impl LookupItem {
    pub fn new(ty: Ty, symbol: SymbolId) -> Self {
        LookupItem { ty, symbol }
    }
}

impl fmt::Display for LookupItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.ty, self.symbol)
    }
}

/// An insertion-ordered, duplicate-free accumulator of candidates.
///
/// Duplicates are detected under structural type equality plus symbol
/// identity; a re-pushed candidate is dropped, never reordered.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    items: Vec<LookupItem>,
    seen: FxHashSet<LookupItem>,
}

impl CandidateSet {
    pub fn new() -> Self {
        CandidateSet::default()
    }

    pub fn push(&mut self, item: LookupItem) {
        if self.seen.insert(item.clone()) {
            self.items.push(item);
        }
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = LookupItem>) {
        for item in items {
            self.push(item);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn first(&self) -> Option<&LookupItem> {
        self.items.first()
    }

    pub fn items(&self) -> &[LookupItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<LookupItem> {
        self.items
    }
}

impl From<Vec<LookupItem>> for CandidateSet {
    fn from(items: Vec<LookupItem>) -> Self {
        let mut set = CandidateSet::new();
        set.extend(items);
        set
    }
}

impl FromIterator<LookupItem> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = LookupItem>>(iter: I) -> Self {
        let mut set = CandidateSet::new();
        set.extend(iter);
        set
    }
}
