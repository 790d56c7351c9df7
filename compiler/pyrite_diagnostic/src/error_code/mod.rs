use std::fmt;

/// Error codes for all parser diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Tokenizer errors
/// - E1xxx: Parser errors
/// - E9xxx: Internal errors
///
/// Warnings use W####.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Tokenizer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Invalid number literal
    E0003,
    /// Unindent does not match any outer indentation level
    E0004,
    /// End of input inside a bracketed construct
    E0005,

    // Parser Errors (E1xxx)
    /// Invalid syntax (generic)
    E1001,
    /// Invalid assignment, deletion or annotation target
    E1002,
    /// Malformed f-string
    E1003,
    /// Malformed string or bytes literal
    E1004,
    /// Nesting limit exceeded
    E1005,

    // Internal Errors (E9xxx)
    /// Runtime invariant violated
    E9001,

    // Parser Warnings (W1xxx)
    /// Invalid escape sequence
    W1001,
}

impl ErrorCode {
    pub fn is_tokenizer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    pub fn is_warning(&self) -> bool {
        self.as_str().starts_with('W')
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            // Tokenizer
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            // Parser
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            // Internal
            ErrorCode::E9001 => "E9001",
            // Warnings
            ErrorCode::W1001 => "W1001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests;
