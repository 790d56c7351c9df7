use std::fmt;

use crate::ErrorCode;

/// A reported syntax error.
///
/// `line` is 1-based. `column` is a 1-based *character* column into `text`
/// (already converted from the token's byte column). `text` is the source
/// line the error points at, or the whole input when no line-addressable
/// source is available.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct SyntaxError {
    pub code: ErrorCode,
    pub message: String,
    pub filename: String,
    pub line: u32,
    pub column: u32,
    pub text: Option<String>,
}

impl SyntaxError {
    pub fn new(
        code: ErrorCode,
        message: impl Into<String>,
        filename: impl Into<String>,
        line: u32,
        column: u32,
    ) -> Self {
        SyntaxError {
            code,
            message: message.into(),
            filename: filename.into(),
            line,
            column,
            text: None,
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Multi-line report in the shape of a Python traceback tail:
    ///
    /// ```text
    ///   File "<string>", line 1
    ///     (a, b): int = 1
    ///     ^
    /// SyntaxError: only a single target (not tuple) can be annotated
    /// ```
    pub fn render(&self) -> String {
        let mut out = format!("  File \"{}\", line {}\n", self.filename, self.line);
        if let Some(text) = &self.text {
            let first_line = text.lines().next().unwrap_or("");
            let trimmed = first_line.trim_start();
            let removed = first_line.chars().count() - trimmed.chars().count();
            let caret = (self.column as usize)
                .saturating_sub(1)
                .saturating_sub(removed)
                .min(trimmed.chars().count());
            out.push_str("    ");
            out.push_str(trimmed.trim_end());
            out.push_str("\n    ");
            out.push_str(&" ".repeat(caret));
            out.push_str("^\n");
        }
        out.push_str("SyntaxError: ");
        out.push_str(&self.message);
        out
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, line {})", self.message, self.filename, self.line)
    }
}

impl std::error::Error for SyntaxError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_matches_python_shape() {
        let err = SyntaxError::new(ErrorCode::E1001, "invalid syntax", "<string>", 3, 5);
        assert_eq!(err.to_string(), "invalid syntax (<string>, line 3)");
        assert_eq!(err.text, None);
    }

    #[test]
    fn test_render_points_caret_at_column() {
        let err = SyntaxError::new(ErrorCode::E1002, "cannot assign", "m.py", 2, 7)
            .with_text("    x + 1 = 2\n");
        assert_eq!(
            err.render(),
            "  File \"m.py\", line 2\n    x + 1 = 2\n      ^\nSyntaxError: cannot assign"
        );
    }

    #[test]
    fn test_render_without_text() {
        let err = SyntaxError::new(ErrorCode::E1001, "invalid syntax", "<string>", 1, 1);
        assert_eq!(
            err.render(),
            "  File \"<string>\", line 1\nSyntaxError: invalid syntax"
        );
    }
}
