//! Diagnostic sink trait and the standard collecting queue.

use crate::Diagnostic;

/// Where the parse engine reports diagnostics.
///
/// Reporting must never abort the caller; the engine keeps parsing after
/// every report and decides on its own when to give up.
pub trait DiagnosticSink {
    /// Record one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Plain vector sink for throwaway use.
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Configuration for diagnostic collection.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors to retain (0 = unlimited). Errors past the
    /// limit are counted but not stored; parsing is never aborted.
    pub error_limit: usize,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig { error_limit: 10 }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig { error_limit: 0 }
    }
}

/// Queue for collecting diagnostics in report order.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct DiagnosticQueue {
    /// Collected diagnostics.
    diagnostics: Vec<Diagnostic>,
    /// Count of errors reported (including any dropped past the limit).
    error_count: usize,
    /// Configuration.
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    /// Create a new diagnostic queue with default configuration.
    pub fn new() -> Self {
        DiagnosticQueue::default()
    }

    /// Create a diagnostic queue with custom configuration.
    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            error_count: 0,
            config,
        }
    }

    /// Add a diagnostic to the queue.
    ///
    /// Returns `true` if the diagnostic was stored, `false` if it was
    /// dropped because the error limit is exhausted. Dropped errors still
    /// count toward `error_count`.
    pub fn push(&mut self, diagnostic: Diagnostic) -> bool {
        if diagnostic.is_error() {
            self.error_count += 1;
            if self.config.error_limit > 0 && self.error_count > self.config.error_limit {
                return false;
            }
        }
        self.diagnostics.push(diagnostic);
        true
    }

    /// Number of errors reported so far (stored or dropped).
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Check if the error limit has been reached.
    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    /// Check if any errors were reported.
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Number of stored diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Check if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Iterate over stored diagnostics without clearing the queue.
    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Take all stored diagnostics, resetting the queue.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        self.error_count = 0;
        std::mem::take(&mut self.diagnostics)
    }
}

impl DiagnosticSink for DiagnosticQueue {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Diagnostic, ErrorCode};
    use llano_ir::Span;
    use pretty_assertions::assert_eq;

    fn error(message: &str) -> Diagnostic {
        Diagnostic::error(ErrorCode::E1001)
            .with_message(message)
            .with_label(Span::new(0, 1), "here")
    }

    #[test]
    fn test_queue_collects_in_order() {
        let mut queue = DiagnosticQueue::new();
        queue.push(error("first"));
        queue.push(error("second"));

        let messages: Vec<&str> = queue.peek().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert_eq!(queue.error_count(), 2);
        assert!(queue.has_errors());
    }

    #[test]
    fn test_queue_error_limit() {
        let mut queue = DiagnosticQueue::with_config(DiagnosticConfig { error_limit: 2 });

        assert!(queue.push(error("one")));
        assert!(queue.push(error("two")));
        assert!(queue.limit_reached());
        assert!(!queue.push(error("three")));

        // Dropped errors still count.
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.error_count(), 3);
    }

    #[test]
    fn test_queue_warnings_do_not_count_as_errors() {
        let mut queue = DiagnosticQueue::with_config(DiagnosticConfig { error_limit: 1 });

        assert!(queue.push(error("one")));
        assert!(queue.push(Diagnostic::warning(ErrorCode::E1001).with_message("odd")));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.error_count(), 1);
    }

    #[test]
    fn test_queue_flush_resets() {
        let mut queue = DiagnosticQueue::new();
        queue.push(error("only"));

        let drained = queue.flush();
        assert_eq!(drained.len(), 1);
        assert!(queue.is_empty());
        assert_eq!(queue.error_count(), 0);
        assert!(!queue.has_errors());
    }

    #[test]
    fn test_unlimited_config() {
        let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
        for i in 0..100 {
            assert!(queue.push(error(&format!("e{i}"))));
        }
        assert_eq!(queue.len(), 100);
        assert!(!queue.limit_reached());
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.report(error("via trait"));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].message, "via trait");
    }
}
