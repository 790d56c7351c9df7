//! Parse warnings (non-fatal diagnostics).

use std::fmt;

use pyrite_diagnostic::ErrorCode;
use pyrite_ir::Pos;

/// A parse warning.
///
/// Warnings don't stop the parse; they are collected on the session and
/// handed back with the tree. Strict mode escalates them to syntax errors.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParseWarning {
    /// An unrecognized backslash escape in a string or bytes literal.
    InvalidEscape {
        /// The character following the backslash.
        ch: char,
        /// Start of the literal token.
        pos: Pos,
    },
}

impl ParseWarning {
    pub fn code(&self) -> ErrorCode {
        match self {
            ParseWarning::InvalidEscape { .. } => ErrorCode::W1001,
        }
    }

    pub fn pos(&self) -> Pos {
        match self {
            ParseWarning::InvalidEscape { pos, .. } => *pos,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ParseWarning::InvalidEscape { ch, .. } => format!("invalid escape sequence \\{ch}"),
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
