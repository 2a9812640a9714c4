//! Precomputed LL(1) parse table.
//!
//! A [`ParseTable`] answers two questions for the engine:
//!
//! - Which production expands nonterminal `N` when the lookahead is `t`?
//!   ([`ParseTable::lookup`], keyed by the `(N, t)` cell.)
//! - Which terminals may legally follow `N`? ([`ParseTable::follow_set`],
//!   the static portion of `N`'s synchronization set.)
//!
//! The table is deterministic: at most one production per cell. Building one
//! goes through [`ParseTableBuilder`], which hands out [`SymbolId`]s for
//! terminals and nonterminals, records productions and follow sets, and
//! validates the whole grammar in [`ParseTableBuilder::finish`]. Computing
//! follow sets from the grammar is the driver's job; the builder only checks
//! that what it is given is well-formed.
//!
//! With the `cache` feature enabled the table serializes, so a driver can
//! persist a generated table instead of rebuilding it on every start.

use llano_ir::{SymbolId, SymbolSet};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use thiserror::Error;

#[cfg(feature = "cache")]
use serde::{Deserialize, Serialize};

/// Most productions are short; eight parts covers typical grammars without
/// spilling to the heap.
type Rhs = SmallVec<[SymbolId; 8]>;

/// Identifies one semantic action in the driver's [`Actions`] implementation.
///
/// The table stores action ids, not closures, so the same table works with
/// any [`Actions`] implementation (and survives serialization).
///
/// [`Actions`]: crate::Actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(Serialize, Deserialize))]
pub struct ActionId(u32);

impl ActionId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// One grammar rule: the parts to expand and the action that builds a value
/// from their results.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(Serialize, Deserialize))]
pub struct Production {
    action: ActionId,
    rhs: Rhs,
}

impl Production {
    /// The semantic action invoked once every part has been processed.
    #[inline]
    pub fn action(&self) -> ActionId {
        self.action
    }

    /// Right-hand side symbols, left to right.
    #[inline]
    pub fn rhs(&self) -> &[SymbolId] {
        &self.rhs
    }

    /// Returns `true` for an epsilon production (empty right-hand side).
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }
}

/// Immutable grammar table consumed by the parsing engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(Serialize, Deserialize))]
pub struct ParseTable {
    cells: FxHashMap<(SymbolId, SymbolId), Production>,
    follow: FxHashMap<SymbolId, SymbolSet>,
    names: FxHashMap<SymbolId, String>,
    nonterminals: FxHashSet<SymbolId>,
    start: SymbolId,
    /// Returned for nonterminals with no recorded follow set.
    #[cfg_attr(feature = "cache", serde(skip))]
    empty_follow: SymbolSet,
}

impl ParseTable {
    /// Start building a table.
    pub fn builder() -> ParseTableBuilder {
        ParseTableBuilder::new()
    }

    /// The production for `nonterminal` when `lookahead` is next, if the
    /// grammar has one.
    #[inline]
    pub fn lookup(&self, nonterminal: SymbolId, lookahead: SymbolId) -> Option<&Production> {
        self.cells.get(&(nonterminal, lookahead))
    }

    /// Terminals that may follow `nonterminal`.
    ///
    /// Nonterminals without a recorded follow set read as empty, so recovery
    /// falls back to the caller's synchronization context alone.
    #[inline]
    pub fn follow_set(&self, nonterminal: SymbolId) -> &SymbolSet {
        self.follow.get(&nonterminal).unwrap_or(&self.empty_follow)
    }

    /// The grammar's start nonterminal.
    #[inline]
    pub fn start_symbol(&self) -> SymbolId {
        self.start
    }

    /// Returns `true` if `symbol` was declared as a nonterminal.
    #[inline]
    pub fn is_nonterminal(&self, symbol: SymbolId) -> bool {
        self.nonterminals.contains(&symbol)
    }

    /// Human-readable name for diagnostics.
    ///
    /// Sentinels render as `end of input` and `invalid token`; ids the table
    /// has never seen render as `<unknown>`.
    pub fn display_name(&self, symbol: SymbolId) -> &str {
        if symbol == SymbolId::END_OF_INPUT {
            return "end of input";
        }
        if symbol == SymbolId::LEX_FAILURE {
            return "invalid token";
        }
        self.names.get(&symbol).map_or("<unknown>", String::as_str)
    }
}

/// A recorded production awaiting validation.
struct ProductionSpec {
    lhs: SymbolId,
    lookaheads: Vec<SymbolId>,
    action: ActionId,
    rhs: Vec<SymbolId>,
}

/// Assembles and validates a [`ParseTable`].
///
/// Symbols must be declared through [`terminal`](Self::terminal) and
/// [`nonterminal`](Self::nonterminal) before they appear in productions or
/// follow sets. All validation is deferred to [`finish`](Self::finish) so
/// grammars can be recorded in any order.
#[derive(Default)]
pub struct ParseTableBuilder {
    next: i32,
    names: FxHashMap<SymbolId, String>,
    nonterminals: FxHashSet<SymbolId>,
    productions: Vec<ProductionSpec>,
    follow: Vec<(SymbolId, Vec<SymbolId>)>,
    start: Option<SymbolId>,
}

/// Why a recorded grammar cannot become a [`ParseTable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("no start symbol was declared")]
    MissingStart,

    #[error("start symbol `{name}` is not a nonterminal")]
    StartNotNonterminal { name: String },

    #[error("symbol id {raw} was never declared by this builder")]
    UndeclaredSymbol { raw: i32 },

    #[error("`{name}` cannot appear on the left-hand side of a production")]
    LhsNotNonterminal { name: String },

    #[error("lookahead for `{nonterminal}` must be a terminal or end of input, found `{name}`")]
    BadLookahead { nonterminal: String, name: String },

    #[error("right-hand side of `{nonterminal}` contains the sentinel `{name}`")]
    SentinelInRhs { nonterminal: String, name: String },

    #[error("conflicting productions for `{nonterminal}` on lookahead `{lookahead}`")]
    Conflict {
        nonterminal: String,
        lookahead: String,
    },

    #[error("follow sets describe nonterminals, but `{name}` is a terminal")]
    FollowOfTerminal { name: String },

    #[error("follow set of `{nonterminal}` must hold terminals or end of input, found `{name}`")]
    BadFollowSymbol { nonterminal: String, name: String },
}

impl ParseTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a terminal and get its id.
    pub fn terminal(&mut self, name: &str) -> SymbolId {
        self.declare(name)
    }

    /// Declare a nonterminal and get its id.
    pub fn nonterminal(&mut self, name: &str) -> SymbolId {
        let id = self.declare(name);
        self.nonterminals.insert(id);
        id
    }

    fn declare(&mut self, name: &str) -> SymbolId {
        let id = SymbolId::new(self.next);
        self.next += 1;
        self.names.insert(id, name.to_owned());
        id
    }

    /// Record a production for `nonterminal`, selected by each of
    /// `lookaheads`. An empty `rhs` records an epsilon production.
    pub fn production(
        &mut self,
        nonterminal: SymbolId,
        lookaheads: &[SymbolId],
        action: ActionId,
        rhs: &[SymbolId],
    ) -> &mut Self {
        self.productions.push(ProductionSpec {
            lhs: nonterminal,
            lookaheads: lookaheads.to_vec(),
            action,
            rhs: rhs.to_vec(),
        });
        self
    }

    /// Record (part of) the follow set for `nonterminal`. Repeated calls for
    /// the same nonterminal merge.
    pub fn follow(&mut self, nonterminal: SymbolId, symbols: &[SymbolId]) -> &mut Self {
        self.follow.push((nonterminal, symbols.to_vec()));
        self
    }

    /// Set the start nonterminal.
    pub fn start(&mut self, symbol: SymbolId) -> &mut Self {
        self.start = Some(symbol);
        self
    }

    /// Validate the recorded grammar and produce the table.
    pub fn finish(self) -> Result<ParseTable, TableError> {
        let start = self.start.ok_or(TableError::MissingStart)?;
        self.check_declared(start)?;
        if !self.nonterminals.contains(&start) {
            return Err(TableError::StartNotNonterminal {
                name: self.name_of(start),
            });
        }

        let mut cells: FxHashMap<(SymbolId, SymbolId), Production> = FxHashMap::default();
        for spec in &self.productions {
            self.check_declared(spec.lhs)?;
            if !self.nonterminals.contains(&spec.lhs) {
                return Err(TableError::LhsNotNonterminal {
                    name: self.name_of(spec.lhs),
                });
            }
            for &part in &spec.rhs {
                if part.is_sentinel() {
                    return Err(TableError::SentinelInRhs {
                        nonterminal: self.name_of(spec.lhs),
                        name: self.name_of(part),
                    });
                }
                self.check_declared(part)?;
            }
            let production = Production {
                action: spec.action,
                rhs: Rhs::from_slice(&spec.rhs),
            };
            for &lookahead in &spec.lookaheads {
                self.check_terminal_or_eof(lookahead, spec.lhs, |nonterminal, name| {
                    TableError::BadLookahead { nonterminal, name }
                })?;
                if cells
                    .insert((spec.lhs, lookahead), production.clone())
                    .is_some()
                {
                    return Err(TableError::Conflict {
                        nonterminal: self.name_of(spec.lhs),
                        lookahead: self.name_of(lookahead),
                    });
                }
            }
        }

        let mut follow: FxHashMap<SymbolId, SymbolSet> = FxHashMap::default();
        for (nonterminal, symbols) in &self.follow {
            self.check_declared(*nonterminal)?;
            if !self.nonterminals.contains(nonterminal) {
                return Err(TableError::FollowOfTerminal {
                    name: self.name_of(*nonterminal),
                });
            }
            for &symbol in symbols {
                self.check_terminal_or_eof(symbol, *nonterminal, |nonterminal, name| {
                    TableError::BadFollowSymbol { nonterminal, name }
                })?;
            }
            follow
                .entry(*nonterminal)
                .or_default()
                .extend(symbols.iter().copied());
        }

        Ok(ParseTable {
            cells,
            follow,
            names: self.names,
            nonterminals: self.nonterminals,
            start,
            empty_follow: SymbolSet::new(),
        })
    }

    fn check_declared(&self, symbol: SymbolId) -> Result<(), TableError> {
        if symbol.is_sentinel() || self.names.contains_key(&symbol) {
            Ok(())
        } else {
            Err(TableError::UndeclaredSymbol { raw: symbol.raw() })
        }
    }

    /// Lookaheads and follow members must name a declared terminal or the
    /// end-of-input sentinel. The lexical-failure sentinel never belongs in
    /// a table.
    fn check_terminal_or_eof(
        &self,
        symbol: SymbolId,
        subject: SymbolId,
        err: impl FnOnce(String, String) -> TableError,
    ) -> Result<(), TableError> {
        if symbol == SymbolId::END_OF_INPUT {
            return Ok(());
        }
        self.check_declared(symbol)?;
        if symbol == SymbolId::LEX_FAILURE || self.nonterminals.contains(&symbol) {
            return Err(err(self.name_of(subject), self.name_of(symbol)));
        }
        Ok(())
    }

    fn name_of(&self, symbol: SymbolId) -> String {
        if symbol == SymbolId::END_OF_INPUT {
            return "end of input".to_owned();
        }
        if symbol == SymbolId::LEX_FAILURE {
            return "invalid token".to_owned();
        }
        self.names
            .get(&symbol)
            .cloned()
            .unwrap_or_else(|| format!("#{}", symbol.raw()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn action(raw: u32) -> ActionId {
        ActionId::new(raw)
    }

    /// `List -> '(' Items ')' | epsilon`, enough shape to exercise lookup.
    fn small_table() -> ParseTable {
        let mut builder = ParseTable::builder();
        let lparen = builder.terminal("'('");
        let rparen = builder.terminal("')'");
        let list = builder.nonterminal("List");
        let items = builder.nonterminal("Items");
        builder
            .production(list, &[lparen], action(0), &[lparen, items, rparen])
            .production(items, &[rparen], action(1), &[])
            .follow(list, &[SymbolId::END_OF_INPUT])
            .follow(items, &[rparen])
            .start(list);
        match builder.finish() {
            Ok(table) => table,
            Err(err) => panic!("fixture grammar must build: {err}"),
        }
    }

    #[test]
    fn test_lookup_hit_and_miss() {
        let table = small_table();
        let list = SymbolId::new(2);
        let lparen = SymbolId::new(0);
        let rparen = SymbolId::new(1);

        let production = table.lookup(list, lparen);
        assert!(production.is_some_and(|p| p.rhs().len() == 3));
        assert!(table.lookup(list, rparen).is_none());
    }

    #[test]
    fn test_epsilon_production() {
        let table = small_table();
        let items = SymbolId::new(3);
        let rparen = SymbolId::new(1);

        let production = table.lookup(items, rparen);
        assert!(production.is_some_and(Production::is_epsilon));
    }

    #[test]
    fn test_follow_set_falls_back_to_empty() {
        let table = small_table();
        let items = SymbolId::new(3);

        assert_eq!(table.follow_set(items).len(), 1);
        assert!(table.follow_set(SymbolId::new(99)).is_empty());
    }

    #[test]
    fn test_display_names() {
        let table = small_table();
        assert_eq!(table.display_name(SymbolId::new(0)), "'('");
        assert_eq!(table.display_name(SymbolId::END_OF_INPUT), "end of input");
        assert_eq!(table.display_name(SymbolId::LEX_FAILURE), "invalid token");
        assert_eq!(table.display_name(SymbolId::new(42)), "<unknown>");
    }

    #[test]
    fn test_start_and_nonterminal_queries() {
        let table = small_table();
        assert_eq!(table.start_symbol(), SymbolId::new(2));
        assert!(table.is_nonterminal(SymbolId::new(2)));
        assert!(!table.is_nonterminal(SymbolId::new(0)));
    }

    #[test]
    fn test_missing_start_rejected() {
        let mut builder = ParseTable::builder();
        let _ = builder.nonterminal("A");
        assert_eq!(builder.finish(), Err(TableError::MissingStart));
    }

    #[test]
    fn test_start_must_be_nonterminal() {
        let mut builder = ParseTable::builder();
        let t = builder.terminal("'x'");
        builder.start(t);
        assert_eq!(
            builder.finish(),
            Err(TableError::StartNotNonterminal {
                name: "'x'".to_owned()
            })
        );
    }

    #[test]
    fn test_conflicting_cells_rejected() {
        let mut builder = ParseTable::builder();
        let x = builder.terminal("'x'");
        let a = builder.nonterminal("A");
        builder
            .production(a, &[x], action(0), &[x])
            .production(a, &[x], action(1), &[])
            .start(a);
        assert_eq!(
            builder.finish(),
            Err(TableError::Conflict {
                nonterminal: "A".to_owned(),
                lookahead: "'x'".to_owned()
            })
        );
    }

    #[test]
    fn test_nonterminal_lookahead_rejected() {
        let mut builder = ParseTable::builder();
        let a = builder.nonterminal("A");
        let b = builder.nonterminal("B");
        builder.production(a, &[b], action(0), &[]).start(a);
        assert_eq!(
            builder.finish(),
            Err(TableError::BadLookahead {
                nonterminal: "A".to_owned(),
                name: "B".to_owned()
            })
        );
    }

    #[test]
    fn test_lex_failure_never_in_table() {
        let mut builder = ParseTable::builder();
        let a = builder.nonterminal("A");
        builder
            .production(a, &[SymbolId::LEX_FAILURE], action(0), &[])
            .start(a);
        assert_eq!(
            builder.finish(),
            Err(TableError::BadLookahead {
                nonterminal: "A".to_owned(),
                name: "invalid token".to_owned()
            })
        );
    }

    #[test]
    fn test_sentinel_in_rhs_rejected() {
        let mut builder = ParseTable::builder();
        let x = builder.terminal("'x'");
        let a = builder.nonterminal("A");
        builder
            .production(a, &[x], action(0), &[SymbolId::END_OF_INPUT])
            .start(a);
        assert_eq!(
            builder.finish(),
            Err(TableError::SentinelInRhs {
                nonterminal: "A".to_owned(),
                name: "end of input".to_owned()
            })
        );
    }

    #[test]
    fn test_undeclared_symbol_rejected() {
        let mut builder = ParseTable::builder();
        let x = builder.terminal("'x'");
        let a = builder.nonterminal("A");
        builder
            .production(a, &[x], action(0), &[SymbolId::new(77)])
            .start(a);
        assert_eq!(
            builder.finish(),
            Err(TableError::UndeclaredSymbol { raw: 77 })
        );
    }

    #[test]
    fn test_follow_of_terminal_rejected() {
        let mut builder = ParseTable::builder();
        let x = builder.terminal("'x'");
        let a = builder.nonterminal("A");
        builder.follow(x, &[x]).start(a);
        assert_eq!(
            builder.finish(),
            Err(TableError::FollowOfTerminal {
                name: "'x'".to_owned()
            })
        );
    }

    #[test]
    fn test_follow_entries_merge() {
        let mut builder = ParseTable::builder();
        let x = builder.terminal("'x'");
        let y = builder.terminal("'y'");
        let a = builder.nonterminal("A");
        builder
            .follow(a, &[x])
            .follow(a, &[y, SymbolId::END_OF_INPUT])
            .start(a);
        let table = match builder.finish() {
            Ok(table) => table,
            Err(err) => panic!("grammar must build: {err}"),
        };
        let follow = table.follow_set(a);
        assert_eq!(follow.len(), 3);
        assert!(follow.contains(SymbolId::END_OF_INPUT));
    }

    #[test]
    fn test_error_messages_read_well() {
        let err = TableError::Conflict {
            nonterminal: "Stmt".to_owned(),
            lookahead: "'if'".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "conflicting productions for `Stmt` on lookahead `'if'`"
        );
    }
}
