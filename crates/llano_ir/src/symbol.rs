//! Grammar symbol identifiers and symbol sets.
//!
//! A `SymbolId` tags either a terminal (a token kind) or a nonterminal; the
//! parse table decides which. User symbols are non-negative and assigned once
//! when the table is built. The two stream sentinels are negative, so a
//! sentinel can never be declared, looked up, or matched as a user symbol.
//!
//! `SymbolSet` backs both the static FOLLOW sets stored in the table and the
//! dynamic synchronization context threaded down the expansion stack.

use rustc_hash::FxHashSet;
use std::fmt;

/// Integer tag for a grammar symbol.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolId(i32);

impl SymbolId {
    /// The token stream is exhausted.
    pub const END_OF_INPUT: SymbolId = SymbolId(-1);

    /// The scanner could not produce a valid token.
    pub const LEX_FAILURE: SymbolId = SymbolId(-2);

    /// Create a symbol id from its raw tag.
    #[inline]
    pub const fn new(raw: i32) -> Self {
        SymbolId(raw)
    }

    /// The raw integer tag.
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// End-of-input or lexer-failure marker.
    ///
    /// Sentinels terminate the current expansion: no table lookup and no
    /// terminal match is ever attempted once the lookahead holds one.
    #[inline]
    pub const fn is_sentinel(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SymbolId::END_OF_INPUT => write!(f, "SymbolId(<eof>)"),
            SymbolId::LEX_FAILURE => write!(f, "SymbolId(<lexfail>)"),
            SymbolId(raw) => write!(f, "SymbolId({raw})"),
        }
    }
}

/// A set of symbol ids.
///
/// Hash-set backed because symbol ids are open-ended integers chosen by
/// whatever generated the grammar table, not a small closed enum.
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolSet {
    symbols: FxHashSet<SymbolId>,
}

impl SymbolSet {
    /// Create an empty set.
    pub fn new() -> Self {
        SymbolSet::default()
    }

    /// Insert a symbol. Returns `true` if it was not already present.
    pub fn insert(&mut self, symbol: SymbolId) -> bool {
        self.symbols.insert(symbol)
    }

    /// Membership test.
    #[inline]
    pub fn contains(&self, symbol: SymbolId) -> bool {
        self.symbols.contains(&symbol)
    }

    /// A fresh set holding every symbol from `self` and `other`.
    ///
    /// Synchronization contexts are built this way on every recursive
    /// expansion: each child gets its own union, siblings never share one.
    #[must_use]
    pub fn union(&self, other: &SymbolSet) -> SymbolSet {
        let mut symbols = self.symbols.clone();
        symbols.extend(other.symbols.iter().copied());
        SymbolSet { symbols }
    }

    /// Number of symbols in the set.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate over the symbols in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.symbols.iter().copied()
    }
}

impl FromIterator<SymbolId> for SymbolSet {
    fn from_iter<I: IntoIterator<Item = SymbolId>>(iter: I) -> Self {
        SymbolSet {
            symbols: iter.into_iter().collect(),
        }
    }
}

impl Extend<SymbolId> for SymbolSet {
    fn extend<I: IntoIterator<Item = SymbolId>>(&mut self, iter: I) {
        self.symbols.extend(iter);
    }
}

impl fmt::Debug for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Sorted so test failures read deterministically.
        let mut symbols: Vec<SymbolId> = self.symbols.iter().copied().collect();
        symbols.sort_unstable();
        f.debug_set().entries(symbols).finish()
    }
}

// Size assertions to prevent accidental regressions
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::SymbolId;
    crate::static_assert_size!(SymbolId, 4);
}
