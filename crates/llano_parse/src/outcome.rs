//! Two-way outcome for each expanded subtree.
//!
//! Every nonterminal expansion and terminal match yields a [`ParseOutcome`]:
//!
//! | Variant   | Meaning                                                    |
//! |-----------|------------------------------------------------------------|
//! | `Success` | The subtree matched and its semantic action produced a value |
//! | `Failure` | The subtree did not fully match; diagnostics already emitted |
//!
//! `Failure` deliberately carries no payload. By the time an outcome is
//! `Failure`, every diagnostic describing what went wrong has already been
//! pushed to the driver's sink; the variant only records that the slot in
//! the parent's child list holds no value.
//!
//! Parents keep expanding their remaining grammar parts after a `Failure`
//! child, so a single bad statement still leaves its siblings with values.

/// Result of expanding one grammar part.
///
/// `V` is the semantic value type produced by the driver's actions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum ParseOutcome<V> {
    /// The part matched and produced a semantic value.
    Success(V),
    /// The part failed; diagnostics were already reported.
    Failure,
}

impl<V> ParseOutcome<V> {
    // === Predicates ===

    /// Returns `true` if this outcome carries a value.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` if this outcome is a hole left by a failed subtree.
    #[inline]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    // === Accessors ===

    /// Borrow the value, if any.
    #[inline]
    pub fn value(&self) -> Option<&V> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure => None,
        }
    }

    /// Take the value, discarding the success/failure distinction.
    #[inline]
    pub fn into_value(self) -> Option<V> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure => None,
        }
    }

    // === Transformations ===

    /// Map the success value, preserving `Failure`.
    pub fn map<U, F: FnOnce(V) -> U>(self, f: F) -> ParseOutcome<U> {
        match self {
            Self::Success(value) => ParseOutcome::Success(f(value)),
            Self::Failure => ParseOutcome::Failure,
        }
    }

    /// Borrowing view, for inspecting children without consuming them.
    pub fn as_ref(&self) -> ParseOutcome<&V> {
        match self {
            Self::Success(value) => ParseOutcome::Success(value),
            Self::Failure => ParseOutcome::Failure,
        }
    }
}

impl<V> From<Option<V>> for ParseOutcome<V> {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(value) => Self::Success(value),
            None => Self::Failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_predicates() {
        let outcome = ParseOutcome::Success(7);
        assert!(outcome.is_success());
        assert!(!outcome.is_failure());
        assert_eq!(outcome.into_value(), Some(7));
    }

    #[test]
    fn test_failure_predicates() {
        let outcome: ParseOutcome<i32> = ParseOutcome::Failure;
        assert!(outcome.is_failure());
        assert_eq!(outcome.value(), None);
        assert_eq!(outcome.into_value(), None);
    }

    #[test]
    fn test_map_preserves_failure() {
        let doubled = ParseOutcome::Success(21).map(|n| n * 2);
        assert_eq!(doubled, ParseOutcome::Success(42));

        let still_failed: ParseOutcome<i32> = ParseOutcome::<i32>::Failure.map(|n| n * 2);
        assert_eq!(still_failed, ParseOutcome::Failure);
    }

    #[test]
    fn test_as_ref_borrows() {
        let outcome = ParseOutcome::Success(String::from("stmt"));
        assert_eq!(outcome.as_ref().into_value().map(String::len), Some(4));
        // Still usable afterwards.
        assert!(outcome.is_success());
    }

    #[test]
    fn test_from_option() {
        assert_eq!(ParseOutcome::from(Some(1)), ParseOutcome::Success(1));
        assert_eq!(ParseOutcome::<i32>::from(None), ParseOutcome::Failure);
    }
}
