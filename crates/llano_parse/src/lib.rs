//! Table-driven LL(1) parsing engine with panic-mode error recovery.
//!
//! The engine knows nothing about any particular language. A driver hands it
//! three things and gets a parse back:
//!
//! - a [`ParseTable`]: productions indexed by (nonterminal, lookahead) plus
//!   per-nonterminal follow sets, built once via [`ParseTableBuilder`],
//! - a [`TokenSource`]: the scanned tokens, pulled one at a time,
//! - an [`Actions`] implementation: callbacks that turn each matched
//!   production into a semantic value.
//!
//! Expansion is recursive descent driven by the table. Syntax errors report
//! a diagnostic to the driver's [`DiagnosticSink`] and recover by discarding
//! tokens until a known synchronization point, so one parse surfaces many
//! errors. The final value is an `Option`: `Some` when the start symbol's
//! action ran, `None` when errors left the parse without a result.
//!
//! ```
//! use llano_diagnostic::DiagnosticQueue;
//! use llano_ir::{Span, SymbolId, Token};
//! use llano_parse::{
//!     parse, ActionError, ActionId, Actions, BufferedTokens, ParseOutcome, ParseTable,
//! };
//!
//! // List -> '(' Items ')'      Items -> epsilon | 'x' Items
//! let mut builder = ParseTable::builder();
//! let lparen = builder.terminal("'('");
//! let rparen = builder.terminal("')'");
//! let x = builder.terminal("'x'");
//! let list = builder.nonterminal("List");
//! let items = builder.nonterminal("Items");
//! builder
//!     .production(list, &[lparen], ActionId::new(0), &[lparen, items, rparen])
//!     .production(items, &[rparen], ActionId::new(1), &[])
//!     .production(items, &[x], ActionId::new(2), &[x, items])
//!     .follow(list, &[SymbolId::END_OF_INPUT])
//!     .follow(items, &[rparen])
//!     .start(list);
//! let table = builder.finish()?;
//!
//! // Count the 'x's.
//! struct Count;
//! impl Actions for Count {
//!     type Value = u32;
//!     fn apply(
//!         &mut self,
//!         action: ActionId,
//!         children: Vec<ParseOutcome<u32>>,
//!     ) -> Result<u32, ActionError> {
//!         let sum: u32 = children
//!             .into_iter()
//!             .filter_map(ParseOutcome::into_value)
//!             .sum();
//!         Ok(if action.raw() == 2 { sum + 1 } else { sum })
//!     }
//! }
//!
//! let mut source: BufferedTokens<u32> = BufferedTokens::new([
//!     Token::new(lparen, Span::new(0, 1), 0),
//!     Token::new(x, Span::new(1, 2), 0),
//!     Token::new(x, Span::new(2, 3), 0),
//!     Token::new(rparen, Span::new(3, 4), 0),
//! ]);
//! let mut actions = Count;
//! let mut queue = DiagnosticQueue::default();
//!
//! let value = parse(&table, &mut source, &mut actions, &mut queue);
//! assert_eq!(value, Some(2));
//! assert!(!queue.has_errors());
//! # Ok::<(), llano_parse::TableError>(())
//! ```
//!
//! The engine reads its tokens as plain [`SymbolId`] tags, so any scanner
//! works: tag the token kinds, attach whatever payload the actions need, and
//! implement [`TokenSource`] (or pre-scan into a [`BufferedTokens`]).

mod actions;
mod engine;
mod lookahead;
mod outcome;
mod recovery;
mod source;
mod stack;
mod table;

#[cfg(test)]
mod tests;

pub use actions::{ActionError, Actions};
pub use engine::{parse, Parser};
pub use outcome::ParseOutcome;
pub use source::{BufferedTokens, TokenSource};
pub use table::{ActionId, ParseTable, ParseTableBuilder, Production, TableError};

// The ids and spans drivers need to build tables and tokens.
pub use llano_ir::{Span, SymbolId, SymbolSet, Token};

// Where diagnostics land; re-exported so simple drivers need only this crate.
pub use llano_diagnostic::DiagnosticSink;
