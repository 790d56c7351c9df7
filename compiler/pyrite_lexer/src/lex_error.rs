//! Tokenizer errors.

use std::fmt;

use pyrite_diagnostic::ErrorCode;
use pyrite_ir::{Pos, Span};

/// What kind of tokenizer error occurred.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// A character that starts no token.
    InvalidCharacter(char),
    /// Single-quoted string not closed before the end of the line.
    UnterminatedString,
    /// Triple-quoted string not closed before the end of input.
    UnterminatedTripleString,
    /// Dedent to a column that no enclosing block uses.
    InconsistentDedent,
    /// End of input while brackets are still open.
    UnexpectedEof,
}

/// A tokenizer error with its location.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    /// Line and byte column of `span.start`.
    pub pos: Pos,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span, pos: Pos) -> Self {
        LexError { kind, span, pos }
    }

    pub fn message(&self) -> String {
        match self.kind {
            LexErrorKind::InvalidCharacter(c) if c.is_control() || c.is_whitespace() => {
                format!("invalid non-printable character U+{:04X}", u32::from(c))
            }
            LexErrorKind::InvalidCharacter(c) => {
                format!("invalid character '{c}' (U+{:04X})", u32::from(c))
            }
            LexErrorKind::UnterminatedString => "EOL while scanning string literal".to_owned(),
            LexErrorKind::UnterminatedTripleString => {
                "EOF while scanning triple-quoted string literal".to_owned()
            }
            LexErrorKind::InconsistentDedent => {
                "unindent does not match any outer indentation level".to_owned()
            }
            LexErrorKind::UnexpectedEof => "unexpected EOF while parsing".to_owned(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::InvalidCharacter(_) => ErrorCode::E0002,
            LexErrorKind::UnterminatedString | LexErrorKind::UnterminatedTripleString => {
                ErrorCode::E0001
            }
            LexErrorKind::InconsistentDedent => ErrorCode::E0004,
            LexErrorKind::UnexpectedEof => ErrorCode::E0005,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {:?}", self.message(), self.pos)
    }
}

impl std::error::Error for LexError {}
