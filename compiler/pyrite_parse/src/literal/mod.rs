//! String, bytes and number literals.
//!
//! A STRING token is split into its prefix and body here. Plain str and
//! bytes bodies are decoded on the spot; f-string bodies are handed to the
//! [`fstring`](crate::fstring) scanner undecoded, since escapes inside
//! replacement fields follow different rules than escapes in literal text.

mod escape;
mod number;

#[cfg(test)]
mod tests;

use std::ops::Range;

use pyrite_diagnostic::ErrorCode;
use pyrite_ir::ast::{Constant, ExprKind};
use pyrite_ir::{ExprId, Location, Name, Token};

pub use escape::{decode_bytes_escapes, decode_str_escapes, EscapeError, Unescaped};
pub use number::{parse_number, Number};

use crate::fstring::FStringBuilder;
use crate::Parser;

/// Prefix flags of a string literal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct StringPrefix {
    pub bytes: bool,
    pub raw: bool,
    pub fstring: bool,
    pub unicode: bool,
}

/// A STRING token after prefix and quote handling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    Str(String),
    Bytes(Vec<u8>),
    /// Undecoded f-string body as a byte range of the token text.
    FString { body: Range<usize>, raw: bool },
}

/// Split off the prefix letters of a literal's text.
///
/// Returns the flags and the byte index of the opening quote.
pub fn scan_prefix(text: &str) -> (StringPrefix, usize) {
    let mut prefix = StringPrefix::default();
    let mut quote = 0;
    for &c in text.as_bytes() {
        match c {
            b'b' | b'B' => prefix.bytes = true,
            b'u' | b'U' => prefix.unicode = true,
            b'r' | b'R' => prefix.raw = true,
            b'f' | b'F' => prefix.fstring = true,
            _ => break,
        }
        quote += 1;
    }
    (prefix, quote)
}

/// Byte range of the body between the quotes, single or triple.
///
/// `None` when the quotes are malformed; the tokenizer never produces such a
/// token.
pub fn literal_body(text: &str, quote_index: usize) -> Option<Range<usize>> {
    let bytes = text.as_bytes();
    let quote = *bytes.get(quote_index)?;
    if quote != b'\'' && quote != b'"' {
        return None;
    }
    let mut start = quote_index + 1;
    let mut end = bytes.len().checked_sub(1)?;
    if end < start || bytes[end] != quote {
        return None;
    }
    if end - start >= 4 && bytes[start] == quote && bytes[start + 1] == quote {
        start += 2;
        if bytes[end - 1] != quote || bytes[end - 2] != quote {
            return None;
        }
        end -= 2;
    }
    Some(start..end)
}

/// Decode one STRING token.
///
/// Invalid escapes warn through the session (or raise in strict mode);
/// malformed escapes and non-ASCII bytes raise.
pub fn decode_literal(p: &mut Parser<'_>, token: &Token) -> Option<(StringPrefix, Literal)> {
    let text = p.token_text(token);
    let (prefix, quote_index) = scan_prefix(text);
    if prefix.bytes && prefix.fstring {
        return p.raise_internal("bytes and f-string prefixes cannot be combined");
    }
    let Some(range) = literal_body(text, quote_index) else {
        return p.raise_internal(format!("malformed string token {text:?}"));
    };
    let body = &text[range.clone()];

    if prefix.fstring {
        return Some((
            prefix,
            Literal::FString {
                body: range,
                raw: prefix.raw,
            },
        ));
    }
    let raw = prefix.raw || !body.contains('\\');

    if prefix.bytes {
        if !body.is_ascii() {
            return p.raise_error_at(
                ErrorCode::E1004,
                "bytes can only contain ASCII literal characters.",
                token.start,
            );
        }
        if raw {
            return Some((prefix, Literal::Bytes(body.as_bytes().to_vec())));
        }
        let decoded = match decode_bytes_escapes(body.as_bytes()) {
            Ok(decoded) => decoded,
            Err(error) => return p.raise_error_at(ErrorCode::E1004, error.to_string(), token.start),
        };
        if let Some(ch) = decoded.first_invalid {
            p.warn_invalid_escape(ch, token)?;
        }
        return Some((prefix, Literal::Bytes(decoded.value)));
    }

    if raw {
        return Some((prefix, Literal::Str(body.to_owned())));
    }
    let value = decode_str_body(p, body, token)?;
    Some((prefix, Literal::Str(value)))
}

/// Decode a non-raw str body, warning about its first invalid escape.
pub(crate) fn decode_str_body(p: &mut Parser<'_>, body: &str, token: &Token) -> Option<String> {
    let decoded = match decode_str_escapes(body) {
        Ok(decoded) => decoded,
        Err(error) => return p.raise_error_at(ErrorCode::E1004, error.to_string(), token.start),
    };
    if let Some(ch) = decoded.first_invalid {
        p.warn_invalid_escape(ch, token)?;
    }
    Some(decoded.value)
}

/// The `kind` of str constants whose first token is `u`-prefixed.
pub(crate) fn constant_kind(p: &mut Parser<'_>, first: &Token) -> Option<Name> {
    let text = p.token_text(first);
    if text.starts_with(['u', 'U']) {
        Some(p.intern("u"))
    } else {
        None
    }
}

/// Concatenate adjacent STRING tokens into one expression.
///
/// Plain parts fold into a single constant; any f-string part turns the
/// whole group into a `JoinedStr`. Bytes cannot mix with str.
pub fn concatenate_strings(p: &mut Parser<'_>, tokens: &[Token]) -> Option<ExprId> {
    let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
        return p.raise_internal("empty string group");
    };
    let loc = Location::new(p.token_location(first).start, p.token_location(last).end);
    let kind = constant_kind(p, first);

    let mut bytes_mode = None;
    let mut bytes = Vec::new();
    let mut builder = FStringBuilder::new(kind, loc);
    for token in tokens {
        let (prefix, literal) = decode_literal(p, token)?;
        match bytes_mode {
            Some(previous) if previous != prefix.bytes => {
                return p.raise_error_at(
                    ErrorCode::E1004,
                    "cannot mix bytes and nonbytes literals",
                    token.start,
                );
            }
            _ => bytes_mode = Some(prefix.bytes),
        }
        match literal {
            Literal::Str(text) => builder.concat_literal(text),
            Literal::Bytes(part) => bytes.extend(part),
            Literal::FString { body, raw } => builder.concat_fstring(p, token, body, raw)?,
        }
    }

    if bytes_mode == Some(true) {
        let id = p.arena_mut().alloc_bytes(bytes);
        let value = ExprKind::Constant {
            value: Constant::Bytes(id),
            kind: None,
        };
        return Some(p.alloc_expr(value, loc));
    }
    Some(builder.finish(p, loc))
}
