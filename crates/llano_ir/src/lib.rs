//! Shared data model for the llano parsing engine.
//!
//! This crate contains the types every other crate in the workspace speaks:
//! - `Span` for source locations
//! - `SymbolId` and `SymbolSet` for grammar symbols and symbol sets
//! - `Token` for scanned tokens carrying semantic payloads
//!
//! Symbol ids are plain integers assigned once when a parse table is built;
//! the two stream sentinels (end of input, lexer failure) are negative so
//! they can never collide with user symbols.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod span;
mod symbol;
mod token;

pub use span::Span;
pub use symbol::{SymbolId, SymbolSet};
pub use token::Token;
