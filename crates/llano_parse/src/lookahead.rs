//! The engine's single-token window over the source.
//!
//! LL(1) means one token of lookahead, so this is deliberately minimal: the
//! current token, owned, plus the source it came from. It is threaded through
//! the expansion by `&mut` rather than held in any shared place, which keeps
//! every parse independent; running the engine twice over two sources cannot
//! interfere.

use crate::source::TokenSource;
use llano_ir::{Span, SymbolId, Token};
use std::fmt;
use std::mem;

pub(crate) struct Lookahead<'src, V> {
    source: &'src mut dyn TokenSource<Value = V>,
    current: Token<V>,
}

impl<'src, V> Lookahead<'src, V> {
    /// Pull the first token so `current` is valid from the start.
    pub(crate) fn prime(source: &'src mut dyn TokenSource<Value = V>) -> Self {
        let current = source.next_token();
        Lookahead { source, current }
    }

    /// Symbol of the current token.
    #[inline]
    pub(crate) fn symbol(&self) -> SymbolId {
        self.current.symbol
    }

    /// Span of the current token.
    #[inline]
    pub(crate) fn span(&self) -> Span {
        self.current.span
    }

    /// Does the current token carry `symbol`?
    #[inline]
    pub(crate) fn check(&self, symbol: SymbolId) -> bool {
        self.current.symbol == symbol
    }

    /// End-of-input or lexical-failure marker.
    #[inline]
    pub(crate) fn at_sentinel(&self) -> bool {
        self.current.symbol.is_sentinel()
    }

    #[inline]
    pub(crate) fn at_lex_failure(&self) -> bool {
        self.current.symbol == SymbolId::LEX_FAILURE
    }

    /// Consume the current token and pull the next one.
    ///
    /// Returns the consumed token so a successful terminal match can hand its
    /// payload to the semantic layer.
    #[inline]
    pub(crate) fn advance(&mut self) -> Token<V> {
        let next = self.source.next_token();
        mem::replace(&mut self.current, next)
    }
}

impl<V: fmt::Debug> fmt::Debug for Lookahead<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lookahead")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
