//! Recursive table-driven expansion.
//!
//! [`Parser`] walks the grammar top-down. Expanding a nonterminal looks up
//! the production selected by the current lookahead, processes its parts left
//! to right (nonterminals recurse, terminals match), then hands the children
//! to the driver's semantic action. Errors never abort the walk: mismatches
//! and missing table cells report a diagnostic, leave a hole in the child
//! list, and let the surrounding production carry on.
//!
//! The missing-cell path, where tokens get discarded to resynchronize, lives
//! in the recovery module.

use crate::actions::Actions;
use crate::lookahead::Lookahead;
use crate::outcome::ParseOutcome;
use crate::recovery::Recovery;
use crate::source::TokenSource;
use crate::stack::ensure_sufficient_stack;
use crate::table::{ActionId, ParseTable, Production};
use llano_diagnostic::{action_rejected, invalid_token, unexpected_token, DiagnosticSink};
use llano_ir::{SymbolId, SymbolSet, Token};
use tracing::{debug, trace};

/// One run of the engine over one token source.
///
/// A parser is built, run with [`parse_program`](Self::parse_program), and
/// dropped. All state lives here: the lookahead window, the
/// reported-lexical-failure flag, nothing global. Diagnostics go to the
/// driver's sink as they happen; the return value only says whether the
/// start symbol produced a value.
pub struct Parser<'a, A: Actions> {
    pub(crate) table: &'a ParseTable,
    pub(crate) lookahead: Lookahead<'a, A::Value>,
    pub(crate) actions: &'a mut A,
    pub(crate) sink: &'a mut dyn DiagnosticSink,
    /// The scanner-failure sentinel is reported once per parse, the first
    /// time it enters the window.
    pub(crate) lex_failure_reported: bool,
}

impl<'a, A: Actions> Parser<'a, A> {
    /// Build a parser and pull the first token into the window.
    pub fn new(
        table: &'a ParseTable,
        source: &'a mut dyn TokenSource<Value = A::Value>,
        actions: &'a mut A,
        sink: &'a mut dyn DiagnosticSink,
    ) -> Self {
        Parser {
            table,
            lookahead: Lookahead::prime(source),
            actions,
            sink,
            lex_failure_reported: false,
        }
    }

    /// Parse one whole program: expand the start symbol with end-of-input as
    /// the only outer synchronization point.
    ///
    /// Returns the start symbol's semantic value, or `None` when errors left
    /// it without one. `None` alone does not mean "errors were reported":
    /// empty input fails silently, and tolerant actions can produce a value
    /// even after diagnostics. The sink is the record of what went wrong.
    pub fn parse_program(mut self) -> Option<A::Value> {
        self.note_lexical_failure();
        let sync: SymbolSet = [SymbolId::END_OF_INPUT].into_iter().collect();
        self.expand(self.table.start_symbol(), &sync).into_value()
    }

    /// Expand `nonterminal` into the production selected by the lookahead.
    ///
    /// `sync` is the synchronization context inherited from the caller;
    /// recovery stops discarding at any symbol in it.
    pub(crate) fn expand(
        &mut self,
        nonterminal: SymbolId,
        sync: &SymbolSet,
    ) -> ParseOutcome<A::Value> {
        ensure_sufficient_stack(|| self.expand_inner(nonterminal, sync))
    }

    fn expand_inner(&mut self, nonterminal: SymbolId, sync: &SymbolSet) -> ParseOutcome<A::Value> {
        let table = self.table;
        debug!(
            nonterminal = table.display_name(nonterminal),
            lookahead = table.display_name(self.lookahead.symbol()),
            "expand"
        );

        // A sentinel in the window ends the expansion before any table
        // lookup, without a diagnostic of its own. Whatever put the sentinel
        // there already had its say; every pending expansion now unwinds
        // through this same check.
        if self.lookahead.at_sentinel() {
            return ParseOutcome::Failure;
        }

        let production = match table.lookup(nonterminal, self.lookahead.symbol()) {
            Some(production) => production,
            None => match self.recover(nonterminal, sync) {
                Recovery::Resume(production) => production,
                Recovery::Abandon => return ParseOutcome::Failure,
            },
        };

        self.run_production(nonterminal, production, sync)
    }

    /// Process every part of `production`, then reduce.
    ///
    /// Failed parts leave holes but never stop the loop: the remaining parts
    /// still get their chance to match, which is what keeps one bad statement
    /// from swallowing its siblings.
    fn run_production(
        &mut self,
        nonterminal: SymbolId,
        production: &Production,
        sync: &SymbolSet,
    ) -> ParseOutcome<A::Value> {
        let mut children = Vec::with_capacity(production.rhs().len());
        for &part in production.rhs() {
            let outcome = if self.table.is_nonterminal(part) {
                // Fresh union per child: the part's own follow set on top of
                // everything our caller is prepared to stop at.
                let child_sync = self.table.follow_set(part).union(sync);
                self.expand(part, &child_sync)
            } else {
                self.match_terminal(part)
            };
            children.push(outcome);
        }
        self.reduce(nonterminal, production.action(), children)
    }

    /// Match one terminal against the window.
    #[inline]
    fn match_terminal(&mut self, expected: SymbolId) -> ParseOutcome<A::Value> {
        if self.lookahead.check(expected) {
            let token = self.bump();
            trace!(
                terminal = self.table.display_name(expected),
                "match_terminal"
            );
            return ParseOutcome::Success(token.value);
        }
        // A mismatch reports and fails but never consumes; the offending
        // token stays in the window for the parts after this one.
        self.report_mismatch(expected);
        ParseOutcome::Failure
    }

    #[cold]
    #[inline(never)]
    fn report_mismatch(&mut self, expected: SymbolId) {
        self.sink.report(unexpected_token(
            self.lookahead.span(),
            self.table.display_name(expected),
            self.table.display_name(self.lookahead.symbol()),
        ));
    }

    /// Invoke the production's action over its children, or skip it.
    fn reduce(
        &mut self,
        nonterminal: SymbolId,
        action: ActionId,
        children: Vec<ParseOutcome<A::Value>>,
    ) -> ParseOutcome<A::Value> {
        let complete = children.iter().all(ParseOutcome::is_success);
        if !complete && !self.actions.tolerates_missing(action) {
            // The failed children already reported; skipping the action is
            // silent and the hole propagates upward.
            trace!(action = action.raw(), "reduce -> skipped");
            return ParseOutcome::Failure;
        }
        match self.actions.apply(action, children) {
            Ok(value) => ParseOutcome::Success(value),
            Err(err) => {
                self.sink.report(action_rejected(
                    self.lookahead.span(),
                    self.table.display_name(nonterminal),
                    err.message(),
                ));
                ParseOutcome::Failure
            }
        }
    }

    /// Advance the window, surfacing a fresh lexical failure if one appears.
    pub(crate) fn bump(&mut self) -> Token<A::Value> {
        let consumed = self.lookahead.advance();
        trace!(
            lookahead = self.table.display_name(self.lookahead.symbol()),
            "bump"
        );
        self.note_lexical_failure();
        consumed
    }

    fn note_lexical_failure(&mut self) {
        if self.lookahead.at_lex_failure() && !self.lex_failure_reported {
            self.lex_failure_reported = true;
            self.sink.report(invalid_token(self.lookahead.span()));
        }
    }
}

/// One-call convenience over [`Parser`]: build, run, done.
pub fn parse<A: Actions>(
    table: &ParseTable,
    source: &mut dyn TokenSource<Value = A::Value>,
    actions: &mut A,
    sink: &mut dyn DiagnosticSink,
) -> Option<A::Value> {
    Parser::new(table, source, actions, sink).parse_program()
}
