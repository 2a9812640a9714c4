//! Scanned tokens as the parse engine consumes them.

use crate::{Span, SymbolId};
use std::fmt;

/// A scanned token: terminal symbol id, source span, and whatever semantic
/// payload the scanner attached (literal value, identifier text, unit).
///
/// The engine never inspects the payload; it only moves it from a matched
/// token into the semantic action that consumes it.
#[derive(Clone, PartialEq, Eq)]
pub struct Token<V> {
    pub symbol: SymbolId,
    pub span: Span,
    pub value: V,
}

impl<V> Token<V> {
    #[inline]
    pub fn new(symbol: SymbolId, span: Span, value: V) -> Self {
        Token {
            symbol,
            span,
            value,
        }
    }
}

impl<V: Default> Token<V> {
    /// End-of-input marker token.
    pub fn end_of_input(span: Span) -> Self {
        Token::new(SymbolId::END_OF_INPUT, span, V::default())
    }

    /// Lexer-failure marker token.
    pub fn lex_failure(span: Span) -> Self {
        Token::new(SymbolId::LEX_FAILURE, span, V::default())
    }
}

impl<V: fmt::Debug> fmt::Debug for Token<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {}", self.symbol, self.value, self.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_new() {
        let token = Token::new(SymbolId::new(5), Span::new(0, 3), "abc");
        assert_eq!(token.symbol, SymbolId::new(5));
        assert_eq!(token.span, Span::new(0, 3));
        assert_eq!(token.value, "abc");
    }

    #[test]
    fn test_sentinel_constructors() {
        let eof: Token<()> = Token::end_of_input(Span::point(12));
        assert_eq!(eof.symbol, SymbolId::END_OF_INPUT);
        assert!(eof.span.is_empty());

        let bad: Token<()> = Token::lex_failure(Span::new(4, 5));
        assert_eq!(bad.symbol, SymbolId::LEX_FAILURE);
    }

    #[test]
    fn test_token_debug() {
        let token = Token::new(SymbolId::new(2), Span::new(1, 4), 99u32);
        assert_eq!(format!("{token:?}"), "SymbolId(2)(99) @ 1..4");
    }
}
