use std::fmt;

/// Error codes for all engine diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: token stream errors (produced at the scanner boundary)
/// - E1xxx: parse errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Token stream errors (E0xxx)
    /// Invalid token: the scanner could not produce a token
    E0001,

    // Parse errors (E1xxx)
    /// Unexpected token: lookahead does not match the expected terminal
    E1001,
    /// No applicable production for (nonterminal, lookahead)
    E1002,
    /// Semantic action rejected its child values
    E1003,
}

impl ErrorCode {
    /// Get the numeric code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
        }
    }

    /// Check if this is a parse error (E1xxx range) as opposed to a token
    /// stream error.
    pub fn is_parse_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E1001.to_string(), "E1001");
        assert_eq!(ErrorCode::E0001.as_str(), "E0001");
    }

    #[test]
    fn test_phase_classification() {
        assert!(!ErrorCode::E0001.is_parse_error());
        assert!(ErrorCode::E1001.is_parse_error());
        assert!(ErrorCode::E1002.is_parse_error());
        assert!(ErrorCode::E1003.is_parse_error());
    }
}
