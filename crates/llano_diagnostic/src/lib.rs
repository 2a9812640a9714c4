//! Diagnostics for the llano parsing engine.
//!
//! The engine reports every syntax error it encounters and keeps going;
//! nothing in this crate aborts a parse. A `Diagnostic` carries an error
//! code, a severity, a message, and labeled source spans. `DiagnosticSink`
//! is the seam the engine reports through; `DiagnosticQueue` is the standard
//! collecting implementation.
//!
//! Rendering diagnostics against source text (lines, columns, snippets) is
//! the driver's job — this crate stops at structured records.

mod diagnostic;
mod error_code;
mod queue;

pub use diagnostic::{
    action_rejected, invalid_token, no_applicable_production, unexpected_token, Diagnostic, Label,
    Severity,
};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue, DiagnosticSink};
