//! Semantic actions supplied by the driver.
//!
//! The engine builds no tree of its own. Every production in the table names
//! an [`ActionId`]; when the production's parts have all been processed, the
//! engine hands their outcomes to [`Actions::apply`] and threads the returned
//! value upward. What a "value" is (an AST node, a count, unit) is entirely
//! the driver's business.

use crate::outcome::ParseOutcome;
use crate::table::ActionId;
use thiserror::Error;

/// An action declined to build a value from its children.
///
/// Rejection is for semantic limits the grammar cannot express (an overflowing
/// literal, a duplicate name). The engine reports it as a diagnostic and
/// treats the production as failed; it never aborts the parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ActionError {
    message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        ActionError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Callbacks that turn matched productions into semantic values.
pub trait Actions {
    /// The value type productions evaluate to.
    type Value;

    /// Build the value for one completed production.
    ///
    /// `children` holds one outcome per right-hand-side part, in grammar
    /// order: a matched terminal contributes its token payload, an expanded
    /// nonterminal contributes the value its own action produced. Epsilon
    /// productions receive an empty list.
    ///
    /// Unless [`tolerates_missing`](Self::tolerates_missing) opts this action
    /// in, the engine only calls it when every child succeeded, so most
    /// implementations can unwrap the outcomes without looking.
    fn apply(
        &mut self,
        action: ActionId,
        children: Vec<ParseOutcome<Self::Value>>,
    ) -> Result<Self::Value, ActionError>;

    /// Opt `action` into running even when some children failed.
    ///
    /// Defaults to `false`: a production with a failed child is skipped and
    /// propagates the failure without invoking its action. Tolerant actions
    /// see the holes as [`ParseOutcome::Failure`] entries and can still build
    /// a partial value, which keeps one bad statement from erasing a whole
    /// block.
    fn tolerates_missing(&self, _action: ActionId) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountTerminals {
        applied: usize,
    }

    impl Actions for CountTerminals {
        type Value = usize;

        fn apply(
            &mut self,
            _action: ActionId,
            children: Vec<ParseOutcome<usize>>,
        ) -> Result<usize, ActionError> {
            self.applied += 1;
            Ok(children
                .into_iter()
                .filter_map(ParseOutcome::into_value)
                .sum())
        }
    }

    #[test]
    fn test_default_is_strict() {
        let actions = CountTerminals { applied: 0 };
        assert!(!actions.tolerates_missing(ActionId::new(0)));
    }

    #[test]
    fn test_apply_sees_children_in_order() {
        let mut actions = CountTerminals { applied: 0 };
        let result = actions.apply(
            ActionId::new(3),
            vec![
                ParseOutcome::Success(1),
                ParseOutcome::Failure,
                ParseOutcome::Success(2),
            ],
        );
        assert_eq!(result, Ok(3));
        assert_eq!(actions.applied, 1);
    }

    #[test]
    fn test_error_message_round_trip() {
        let err = ActionError::new("duplicate field `x`");
        assert_eq!(err.message(), "duplicate field `x`");
        assert_eq!(err.to_string(), "duplicate field `x`");
    }
}
