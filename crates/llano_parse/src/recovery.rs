//! Panic-mode resynchronization.
//!
//! When the table has no production for the current (nonterminal, lookahead)
//! pair, the engine reports one diagnostic and then looks for a place to pick
//! the parse back up. Tokens are discarded one at a time until either
//!
//! - a token that *can* start the nonterminal appears, in which case the
//!   expansion resumes with that production, or
//! - a synchronization symbol appears, in which case the nonterminal is
//!   abandoned and its caller continues from a token it knows how to handle.
//!
//! The synchronization set is the nonterminal's follow set unioned with every
//! enclosing context on the way down. Symbols in it are never consumed here;
//! if the offending token is already a synchronization point, the nonterminal
//! is abandoned on the spot with nothing discarded. Sentinels always abandon,
//! and stay in the window for the unwinding expansions to see.

use crate::actions::Actions;
use crate::engine::Parser;
use crate::table::Production;
use llano_diagnostic::no_applicable_production;
use llano_ir::{SymbolId, SymbolSet};
use tracing::{debug, trace};

/// What recovery decided.
#[derive(Debug)]
pub(crate) enum Recovery<'t> {
    /// Discarding reached a token the nonterminal can start from.
    Resume(&'t Production),
    /// Discarding reached a synchronization symbol or a sentinel first.
    Abandon,
}

impl<'a, A: Actions> Parser<'a, A> {
    /// Resynchronize after a missing table cell.
    ///
    /// Exactly one diagnostic comes out of this, however many tokens get
    /// discarded on the way to the resync point.
    pub(crate) fn recover(&mut self, nonterminal: SymbolId, sync: &SymbolSet) -> Recovery<'a> {
        let table = self.table;
        debug!(
            nonterminal = table.display_name(nonterminal),
            found = table.display_name(self.lookahead.symbol()),
            "recover"
        );
        self.sink.report(no_applicable_production(
            self.lookahead.span(),
            table.display_name(nonterminal),
            table.display_name(self.lookahead.symbol()),
        ));

        // Synchronization symbols belong to the context above us; consuming
        // one would steal it from the caller that declared it.
        if sync.contains(self.lookahead.symbol()) {
            debug!("recover -> abandon (already at sync point)");
            return Recovery::Abandon;
        }

        loop {
            let discarded = self.bump();
            trace!(token = table.display_name(discarded.symbol), "discard");

            if self.lookahead.at_sentinel() {
                debug!("recover -> abandon (stream ended)");
                return Recovery::Abandon;
            }
            if let Some(production) = table.lookup(nonterminal, self.lookahead.symbol()) {
                debug!(
                    resumed_at = table.display_name(self.lookahead.symbol()),
                    "recover -> resume"
                );
                return Recovery::Resume(production);
            }
            if sync.contains(self.lookahead.symbol()) {
                debug!(
                    sync_at = table.display_name(self.lookahead.symbol()),
                    "recover -> abandon"
                );
                return Recovery::Abandon;
            }
        }
    }
}
