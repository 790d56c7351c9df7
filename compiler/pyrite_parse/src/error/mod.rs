//! Error reporting.
//!
//! The parser keeps at most one pending [`ParseFailure`]: the first error
//! raised wins and later ones are dropped. Two entry points record it:
//! - `raise_*` record and halt: token access fails from then on, so every
//!   rule unwinds with `None`
//! - `report_*` record and let parsing continue, for errors whose caller
//!   substitutes a placeholder and finishes the tree
//!
//! Locations arrive as byte columns and leave as 1-based character columns.

mod warning;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use pyrite_diagnostic::{byte_offset_to_char_offset, ErrorCode, SyntaxError};
use pyrite_ir::{ExprId, Pos, Token};
use pyrite_lexer::LexError;
use tracing::{debug, warn};

pub use warning::ParseWarning;

use crate::{Parser, SourceOrigin};

/// Why a parse produced no tree.
#[derive(Debug, thiserror::Error)]
pub enum ParseFailure {
    /// A user-facing syntax error with its location.
    #[error("{0}")]
    Syntax(SyntaxError),
    /// A runtime invariant was violated.
    #[error("internal parser error: {0}")]
    Internal(String),
    /// The source file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The compiler collaborator rejected the tree.
    #[error("compilation failed: {0}")]
    Compile(String),
}

impl ParseFailure {
    /// The syntax error, if this failure is one.
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            ParseFailure::Syntax(error) => Some(error),
            ParseFailure::Internal(_) | ParseFailure::Io { .. } | ParseFailure::Compile(_) => None,
        }
    }
}

impl Parser<'_> {
    /// Whether an error is pending.
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Whether a halting error stopped the parse.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Take the pending error, if any.
    pub fn take_error(&mut self) -> Option<ParseFailure> {
        self.error.take()
    }

    /// Raise at the furthest token read so far and halt.
    pub fn raise_syntax_error<T>(&mut self, code: ErrorCode, message: impl Into<String>) -> Option<T> {
        let pos = self.tokens.last_filled().map_or(Pos::new(1, 0), |t| t.start);
        self.raise_error_at(code, message, pos)
    }

    /// Raise at a known position and halt.
    pub fn raise_error_at<T>(
        &mut self,
        code: ErrorCode,
        message: impl Into<String>,
        pos: Pos,
    ) -> Option<T> {
        let failure = ParseFailure::Syntax(self.build_syntax_error(code, message.into(), pos));
        self.record(failure);
        self.halted = true;
        None
    }

    /// Record an error at a known position without halting.
    pub fn report_error_at(&mut self, code: ErrorCode, message: impl Into<String>, pos: Pos) {
        let failure = ParseFailure::Syntax(self.build_syntax_error(code, message.into(), pos));
        self.record(failure);
    }

    /// Raise at the start of node `expr` and halt.
    pub fn raise_error_at_node<T>(
        &mut self,
        code: ErrorCode,
        message: impl Into<String>,
        expr: ExprId,
    ) -> Option<T> {
        let pos = self.unmap_pos(self.expr_loc(expr).start);
        self.raise_error_at(code, message, pos)
    }

    /// Record an error at the start of node `expr` without halting.
    pub fn report_error_at_node(&mut self, code: ErrorCode, message: impl Into<String>, expr: ExprId) {
        let pos = self.unmap_pos(self.expr_loc(expr).start);
        self.report_error_at(code, message, pos);
    }

    /// Raise an invariant violation and halt.
    pub fn raise_internal<T>(&mut self, message: impl Into<String>) -> Option<T> {
        self.record(ParseFailure::Internal(message.into()));
        self.halted = true;
        None
    }

    pub(crate) fn raise_lex_error<T>(&mut self, error: &LexError) -> Option<T> {
        self.raise_error_at(error.code(), error.message(), error.pos)
    }

    /// Adopt a failure produced by a child parser and halt.
    pub(crate) fn adopt_failure<T>(&mut self, failure: ParseFailure) -> Option<T> {
        self.record(failure);
        self.halted = true;
        None
    }

    /// Warn about the first invalid escape of the literal `token`.
    ///
    /// In strict mode the warning becomes a syntax error and `None` is
    /// returned.
    pub(crate) fn warn_invalid_escape(&mut self, ch: char, token: &Token) -> Option<()> {
        let warning = ParseWarning::InvalidEscape {
            ch,
            pos: token.start,
        };
        if self.session.options().strict_escapes {
            return self.raise_error_at(ErrorCode::W1001, warning.message(), token.start);
        }
        warn!(pos = ?warning.pos(), "{}", warning.message());
        self.session.warnings.push(warning);
        Some(())
    }

    fn record(&mut self, failure: ParseFailure) {
        if self.error.is_none() {
            debug!(%failure, "parse error recorded");
            self.error = Some(failure);
        }
    }

    /// Package `message` at `pos` into a [`SyntaxError`].
    ///
    /// The column is converted against the real source line. The reported
    /// text is that line for files and the whole input otherwise.
    fn build_syntax_error(&self, code: ErrorCode, message: String, pos: Pos) -> SyntaxError {
        let source = self.tokens.source();
        let line_text = self.tokens.lines().line_text(source, pos.line).unwrap_or("");
        let char_col = byte_offset_to_char_offset(line_text, pos.col as usize);
        let column = u32::try_from(char_col).unwrap_or(u32::MAX - 1) + 1;
        let whole = source.strip_suffix('\n').unwrap_or(source);
        match &self.origin {
            SourceOrigin::File(filename) => {
                SyntaxError::new(code, message, filename.as_str(), pos.line, column)
                    .with_text(line_text)
            }
            SourceOrigin::Text => {
                SyntaxError::new(code, message, "<string>", pos.line, column).with_text(whole)
            }
            SourceOrigin::FString { filename, shift } => SyntaxError::new(
                code,
                format!("f-string: {message}"),
                filename.as_str(),
                shift.line + pos.line,
                column,
            )
            .with_text(whole),
        }
    }
}
