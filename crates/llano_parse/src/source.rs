//! Token input to the engine.
//!
//! The engine pulls tokens one at a time through [`TokenSource`], so it works
//! equally over an on-line scanner or a pre-scanned buffer. [`BufferedTokens`]
//! is the buffer form, used by drivers that tokenize up front and throughout
//! the test suite.

use llano_ir::{Span, SymbolId, Token};
use std::collections::VecDeque;

/// Produces the token stream the engine consumes.
///
/// # Contract
///
/// A source must be *sticky* at the end of the stream: once it has produced a
/// token whose symbol is a sentinel, every later call must produce a sentinel
/// token again. The engine leans on this during recovery, where it keeps
/// discarding tokens until a synchronization point or a sentinel shows up.
pub trait TokenSource {
    /// Semantic payload attached to each token.
    type Value;

    /// Produce the next token.
    ///
    /// Never returns "nothing": stream exhaustion is itself a token, carrying
    /// [`SymbolId::END_OF_INPUT`].
    fn next_token(&mut self) -> Token<Self::Value>;
}

/// A pre-scanned token buffer.
///
/// Hands out the buffered tokens in order, then synthesizes end-of-input
/// tokens positioned just past the last real token. If the buffer itself
/// contains a sentinel, that sentinel becomes the sticky one instead: the
/// tokens behind it are never handed out.
#[derive(Debug, Clone)]
pub struct BufferedTokens<V> {
    tokens: VecDeque<Token<V>>,
    /// Sentinel to repeat once the stream has ended.
    sticky: Option<(SymbolId, Span)>,
    consumed: usize,
    end_span: Span,
}

impl<V> BufferedTokens<V> {
    pub fn new(tokens: impl IntoIterator<Item = Token<V>>) -> Self {
        let tokens: VecDeque<Token<V>> = tokens.into_iter().collect();
        let end_span = tokens
            .back()
            .map_or(Span::DUMMY, |token| Span::point(token.span.end));
        BufferedTokens {
            tokens,
            sticky: None,
            consumed: 0,
            end_span,
        }
    }

    /// Number of real (non-sentinel) tokens handed out so far.
    ///
    /// Useful for asserting how far a parse advanced before giving up.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl<V: Default> TokenSource for BufferedTokens<V> {
    type Value = V;

    fn next_token(&mut self) -> Token<V> {
        if let Some((symbol, span)) = self.sticky {
            return Token::new(symbol, span, V::default());
        }
        match self.tokens.pop_front() {
            Some(token) if token.symbol.is_sentinel() => {
                self.sticky = Some((token.symbol, token.span));
                token
            }
            Some(token) => {
                self.consumed += 1;
                token
            }
            None => {
                self.sticky = Some((SymbolId::END_OF_INPUT, self.end_span));
                Token::new(SymbolId::END_OF_INPUT, self.end_span, V::default())
            }
        }
    }
}
