//! Two-mode scanner over an f-string body.
//!
//! Literal mode collects text up to the next unescaped brace; expression
//! mode finds the end of a replacement field and compiles it with a child
//! parser over `(expr)`. Format specs recurse into literal mode one level
//! deeper.

use pyrite_diagnostic::ErrorCode;
use pyrite_ir::ast::{Conversion, ExprKind, Mod};
use pyrite_ir::{ExprId, Location, Name, Token};
use smallvec::SmallVec;
use tracing::debug;

use super::{FStringBuilder, MAX_BRACKET_NESTING, MAX_FIELD_NESTING};
use crate::literal::decode_str_body;
use crate::{Parser, PosShift, StartRule};

/// One step of literal-mode scanning.
struct Segment {
    literal: Option<String>,
    /// Source text of a `{expr=}` field, including the `=` and trailing
    /// whitespace.
    expr_text: Option<String>,
    expression: Option<ExprId>,
    /// A doubled brace ended the literal; scan again before any field.
    doubled_brace: bool,
}

pub(super) struct Scanner<'s> {
    pub(super) token: Token,
    /// Whole token text; positions are byte offsets into it.
    pub(super) text: &'s str,
    /// End of the body (the closing quotes start here).
    pub(super) end: usize,
    pub(super) raw: bool,
    pub(super) kind: Option<Name>,
    pub(super) loc: Location,
}

fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

fn closes(open: u8, close: u8) -> bool {
    matches!((open, close), (b'(', b')') | (b'[', b']') | (b'{', b'}'))
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl Scanner<'_> {
    /// Byte at `pos`, reading past the body into the closing quote; 0 past
    /// the token.
    fn at(&self, pos: usize) -> u8 {
        self.text.as_bytes().get(pos).copied().unwrap_or(0)
    }

    fn raise<T>(&self, p: &mut Parser<'_>, message: impl Into<String>) -> Option<T> {
        p.raise_error_at(ErrorCode::E1003, message, self.token.start)
    }

    /// Scan from `pos` at field nesting `level`, feeding `builder`.
    pub(super) fn concat(
        &self,
        p: &mut Parser<'_>,
        builder: &mut FStringBuilder,
        pos: &mut usize,
        level: u32,
    ) -> Option<()> {
        builder.fmode = true;
        loop {
            let segment = self.literal_and_expr(p, pos, level)?;
            if let Some(literal) = segment.literal {
                builder.concat_literal(literal);
            }
            if let Some(expr_text) = segment.expr_text {
                builder.concat_literal(expr_text);
            }
            if segment.doubled_brace {
                continue;
            }
            let Some(expression) = segment.expression else {
                break;
            };
            builder.push_expression(p, expression);
        }

        if level == 0 && *pos + 1 < self.end {
            return self.raise(p, "f-string: unexpected end of string");
        }
        if level != 0 && (*pos >= self.end || self.at(*pos) != b'}') {
            return self.raise(p, "f-string: expecting '}'");
        }
        Some(())
    }

    fn literal_and_expr(&self, p: &mut Parser<'_>, pos: &mut usize, level: u32) -> Option<Segment> {
        let (literal, doubled_brace) = self.literal(p, pos, level)?;
        let mut segment = Segment {
            literal,
            expr_text: None,
            expression: None,
            doubled_brace,
        };
        if doubled_brace || *pos >= self.end || self.at(*pos) == b'}' {
            return Some(segment);
        }
        let (expr_text, expression) = self.field(p, pos, level)?;
        segment.expr_text = expr_text;
        segment.expression = Some(expression);
        Some(segment)
    }

    /// Literal mode: collect text up to an unescaped brace.
    ///
    /// At level 0 a doubled brace keeps one brace in the literal and ends
    /// the run; a lone `}` is an error. Deeper levels stop at any brace.
    fn literal(
        &self,
        p: &mut Parser<'_>,
        pos: &mut usize,
        level: u32,
    ) -> Option<(Option<String>, bool)> {
        let bytes = self.text.as_bytes();
        let start = *pos;
        let mut s = *pos;
        let mut doubled = false;

        while s < self.end {
            let mut ch = bytes[s];
            s += 1;
            if !self.raw && ch == b'\\' && s < self.end {
                ch = bytes[s];
                s += 1;
                if ch == b'N' {
                    if s < self.end {
                        let open = bytes[s];
                        s += self.text[s..].chars().next().map_or(1, char::len_utf8);
                        if open == b'{' {
                            while s < self.end {
                                let c = bytes[s];
                                s += 1;
                                if c == b'}' {
                                    break;
                                }
                            }
                            continue;
                        }
                    }
                    break;
                }
                if ch == b'{' {
                    p.warn_invalid_escape('{', &self.token)?;
                }
            }
            if ch == b'{' || ch == b'}' {
                if level == 0 {
                    if s < self.end && bytes[s] == ch {
                        doubled = true;
                        break;
                    }
                    if ch == b'}' {
                        return self.raise(p, "f-string: single '}' is not allowed");
                    }
                }
                s -= 1;
                break;
            }
        }

        *pos = if doubled { s + 1 } else { s };
        let Some(run) = self.text.get(start..s) else {
            return p.raise_internal("f-string literal run splits a character");
        };
        if run.is_empty() {
            return Some((None, doubled));
        }
        let literal = if self.raw {
            run.to_owned()
        } else {
            decode_str_body(p, run, &self.token)?
        };
        Some((Some(literal), doubled))
    }

    /// Expression mode: `pos` is at the `{` of a replacement field.
    ///
    /// Returns the debug text of a `{expr=}` field and the `FormattedValue`.
    fn field(
        &self,
        p: &mut Parser<'_>,
        pos: &mut usize,
        level: u32,
    ) -> Option<(Option<String>, ExprId)> {
        if level >= MAX_FIELD_NESTING {
            return self.raise(p, "f-string: expressions nested too deeply");
        }
        let bytes = self.text.as_bytes();
        *pos += 1;
        let expr_start = *pos;

        let mut quote = 0u8;
        let mut triple = false;
        let mut brackets: SmallVec<[u8; 8]> = SmallVec::new();
        while *pos < self.end {
            let ch = bytes[*pos];
            if ch == b'\\' {
                return self.raise(p, "f-string expression part cannot include a backslash");
            }
            if quote != 0 {
                if ch == quote {
                    if !triple {
                        quote = 0;
                    } else if *pos + 2 < self.end && bytes[*pos + 1] == ch && bytes[*pos + 2] == ch
                    {
                        *pos += 2;
                        quote = 0;
                        triple = false;
                    }
                }
            } else if ch == b'\'' || ch == b'"' {
                if *pos + 2 < self.end && bytes[*pos + 1] == ch && bytes[*pos + 2] == ch {
                    triple = true;
                    *pos += 2;
                }
                quote = ch;
            } else if matches!(ch, b'[' | b'{' | b'(') {
                if brackets.len() >= MAX_BRACKET_NESTING {
                    return self.raise(p, "f-string: too many nested parenthesis");
                }
                brackets.push(ch);
            } else if ch == b'#' {
                return self.raise(p, "f-string expression part cannot include '#'");
            } else if brackets.is_empty() && matches!(ch, b'!' | b':' | b'}' | b'=' | b'>' | b'<')
            {
                if *pos + 1 < self.end {
                    let next = bytes[*pos + 1];
                    if next == b'=' && matches!(ch, b'!' | b'=' | b'<' | b'>') {
                        *pos += 2;
                        continue;
                    }
                    if ch == b'>' || ch == b'<' {
                        *pos += 1;
                        continue;
                    }
                }
                break;
            } else if matches!(ch, b']' | b'}' | b')') {
                let Some(open) = brackets.pop() else {
                    return self.raise(p, format!("f-string: unmatched '{}'", char::from(ch)));
                };
                if !closes(open, ch) {
                    return self.raise(
                        p,
                        format!(
                            "f-string: closing parenthesis '{}' does not match opening parenthesis '{}'",
                            char::from(ch),
                            char::from(open)
                        ),
                    );
                }
            }
            *pos += 1;
        }
        let expr_end = *pos;

        if quote != 0 {
            return self.raise(p, "f-string: unterminated string");
        }
        if let Some(&open) = brackets.last() {
            return self.raise(p, format!("f-string: unmatched '{}'", char::from(open)));
        }
        if *pos >= self.end {
            return self.raise(p, "f-string: expecting '}'");
        }

        let value = self.compile(p, expr_start, expr_end)?;

        let mut expr_text = None;
        if self.at(*pos) == b'=' {
            *pos += 1;
            while *pos < self.end && is_space(self.at(*pos)) {
                *pos += 1;
            }
            let Some(text) = self.text.get(expr_start..*pos) else {
                return p.raise_internal("f-string debug text splits a character");
            };
            expr_text = Some(text.to_owned());
        }

        let mut conversion = None;
        if self.at(*pos) == b'!' {
            *pos += 1;
            if *pos >= self.end {
                return self.raise(p, "f-string: expecting '}'");
            }
            let code = self.at(*pos);
            *pos += 1;
            let Some(parsed) = Conversion::from_char(code) else {
                return self.raise(
                    p,
                    "f-string: invalid conversion character: expected 's', 'r', or 'a'",
                );
            };
            conversion = Some(parsed);
        }

        if *pos >= self.end {
            return self.raise(p, "f-string: expecting '}'");
        }
        let mut format_spec = ExprId::INVALID;
        if self.at(*pos) == b':' {
            *pos += 1;
            if *pos >= self.end {
                return self.raise(p, "f-string: expecting '}'");
            }
            format_spec = self.format_spec(p, pos, level + 1)?;
        }
        if *pos >= self.end || self.at(*pos) != b'}' {
            return self.raise(p, "f-string: expecting '}'");
        }
        *pos += 1;

        let conversion = match conversion {
            Some(conversion) => conversion,
            None if expr_text.is_some() && !format_spec.is_valid() => Conversion::Repr,
            None => Conversion::None,
        };
        let node = p.alloc_expr(
            ExprKind::FormattedValue {
                value,
                conversion,
                format_spec,
            },
            self.loc,
        );
        Some((expr_text, node))
    }

    /// A format spec is itself an f-string, scanned one level deeper.
    fn format_spec(&self, p: &mut Parser<'_>, pos: &mut usize, level: u32) -> Option<ExprId> {
        let mut spec = FStringBuilder::new(self.kind, self.loc);
        self.concat(p, &mut spec, pos, level)?;
        let loc = p.token_location(&self.token);
        Some(spec.finish(p, loc))
    }

    /// Compile the field text `[start, end)` with a child parser.
    fn compile(&self, p: &mut Parser<'_>, start: usize, end: usize) -> Option<ExprId> {
        let Some(expr) = self.text.get(start..end) else {
            return p.raise_internal("f-string expression splits a character");
        };
        if expr.bytes().all(|c| matches!(c, b' ' | b'\t' | b'\n' | 0x0C)) {
            return self.raise(p, "f-string: empty expression not allowed");
        }

        let shift = self.shift(p, start - 1);
        let source = format!("({expr})");
        debug!(expr, line = shift.line, col = shift.col, "f-string sub-parse");
        let result = p.child(&source, shift).run(StartRule::FString);
        match result {
            Ok(Mod::Expression { body }) => Some(body),
            Ok(Mod::Module { .. } | Mod::Interactive { .. }) => {
                p.raise_internal("f-string expression did not produce an expression")
            }
            Err(failure) => p.adopt_failure(failure),
        }
    }

    /// Offset mapping positions in `(expr)` back into the enclosing source.
    ///
    /// `brace` is the byte index of the field's `{` in the token text. Line 1
    /// of the synthetic text is the line holding the brace, and its column
    /// 0 (the added `(`) sits on the brace.
    fn shift(&self, p: &Parser<'_>, brace: usize) -> PosShift {
        let bytes = self.text.as_bytes();
        let token_start = p.map_pos(self.token.start);
        let before = &bytes[..brace];
        let lines = before.iter().filter(|&&c| c == b'\n').count();

        let newline_after_brace = bytes[brace + 1..]
            .iter()
            .take_while(|&&c| c != b'}' && c != b'\n')
            .all(|&c| matches!(c, b' ' | b'\t' | 0x0C));

        let col = if newline_after_brace {
            0
        } else if let Some(newline) = before.iter().rposition(|&c| c == b'\n') {
            to_u32(brace - newline - 1)
        } else {
            token_start.col + to_u32(brace)
        };
        PosShift {
            line: token_start.line.saturating_sub(1) + to_u32(lines),
            col,
        }
    }
}
