//! Source location spans.
//!
//! Compact 8-byte byte-offset ranges. Tokens carry one, diagnostics point at
//! one; resolving offsets to lines and columns is the driver's job because
//! only the driver holds the source text.

use std::fmt;

/// Source location span.
///
/// Layout: 8 bytes total
/// - start: u32 - byte offset from file start
/// - end: u32 - byte offset (exclusive)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Dummy span for synthesized tokens.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Create a point span (zero-length).
    #[inline]
    pub const fn point(offset: u32) -> Span {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Check if span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if an offset is within this span.
    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// Size assertions to prevent accidental regressions
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Span;
    crate::static_assert_size!(Span, 8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basic() {
        let span = Span::new(10, 20);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());
        assert!(span.contains(15));
        assert!(!span.contains(20));
    }

    #[test]
    fn test_span_point() {
        let point = Span::point(42);
        assert_eq!(point.start, 42);
        assert_eq!(point.end, 42);
        assert!(point.is_empty());
        assert_eq!(point.len(), 0);
    }

    #[test]
    fn test_span_contains_boundary() {
        let span = Span::new(10, 20);

        // Start is inclusive, end is exclusive.
        assert!(span.contains(10));
        assert!(!span.contains(20));
        assert!(!span.contains(9));
        assert!(span.contains(19));
    }

    #[test]
    fn test_span_dummy() {
        assert_eq!(Span::DUMMY.start, 0);
        assert_eq!(Span::DUMMY.end, 0);
        assert!(Span::DUMMY.is_empty());
        assert_eq!(Span::default(), Span::DUMMY);
    }

    #[test]
    fn test_span_debug_display() {
        let span = Span::new(100, 200);
        assert_eq!(format!("{span:?}"), "100..200");
        assert_eq!(format!("{span}"), "100..200");
    }
}
