//! Engine tests.
//!
//! Tests are organized into modules by category:
//! - `fixtures`: the statement-list grammar and actions shared by the suite
//! - `scenarios`: end-to-end parses over clean, broken, and half-broken input
//! - `properties`: randomized invariants (determinism, bounded consumption)
