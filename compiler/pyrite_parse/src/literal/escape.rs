//! Backslash escape decoding for str and bytes literal bodies.
//!
//! Unknown escapes are kept verbatim (backslash included) and the first one
//! is reported back so the caller can warn about it. Malformed numeric
//! escapes are hard errors.

/// Decoded literal body plus the character of its first unknown escape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unescaped<T> {
    pub value: T,
    pub first_invalid: Option<char>,
}

/// A hard escape decoding error. Positions are byte offsets in the body.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EscapeError {
    #[error(
        "(unicode error) 'unicodeescape' codec can't decode bytes in position {start}-{end}: {reason}"
    )]
    Unicode {
        start: usize,
        end: usize,
        reason: &'static str,
    },
    #[error("(value error) invalid \\x escape at position {0}")]
    InvalidHex(usize),
    #[error("(value error) Trailing \\ in string")]
    TrailingBackslash,
}

/// Simple one-character escapes shared by str and bytes.
fn simple_escape(c: u8) -> Option<u8> {
    match c {
        b'\\' => Some(b'\\'),
        b'\'' => Some(b'\''),
        b'"' => Some(b'"'),
        b'a' => Some(0x07),
        b'b' => Some(0x08),
        b'f' => Some(0x0C),
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        b'v' => Some(0x0B),
        _ => None,
    }
}

fn hex_value(c: u8) -> Option<u32> {
    char::from(c).to_digit(16)
}

/// Read up to two more octal digits after `first`, advancing `i`.
fn octal_value(bytes: &[u8], i: &mut usize, first: u8) -> u32 {
    let mut value = u32::from(first - b'0');
    for _ in 0..2 {
        match bytes.get(*i) {
            Some(&d @ b'0'..=b'7') => {
                value = value * 8 + u32::from(d - b'0');
                *i += 1;
            }
            _ => break,
        }
    }
    value
}

/// Decode a str literal body.
pub fn decode_str_escapes(body: &str) -> Result<Unescaped<String>, EscapeError> {
    let bytes = body.as_bytes();
    let mut out = String::with_capacity(body.len());
    let mut first_invalid = None;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            let next = body[i..].find('\\').map_or(bytes.len(), |n| i + n);
            out.push_str(&body[i..next]);
            i = next;
            continue;
        }
        let start = i;
        i += 1;
        let Some(&c) = bytes.get(i) else {
            out.push('\\');
            break;
        };
        if !c.is_ascii() {
            // The non-ASCII character is copied by the next iteration.
            out.push('\\');
            continue;
        }
        i += 1;
        if let Some(simple) = simple_escape(c) {
            out.push(char::from(simple));
            continue;
        }
        match c {
            b'\n' => {}
            b'0'..=b'7' => {
                let value = octal_value(bytes, &mut i, c);
                out.push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            b'x' => out.push(hex_escape(bytes, &mut i, start, 2, "truncated \\xXX escape")?),
            b'u' => out.push(hex_escape(bytes, &mut i, start, 4, "truncated \\uXXXX escape")?),
            b'U' => out.push(hex_escape(
                bytes,
                &mut i,
                start,
                8,
                "truncated \\UXXXXXXXX escape",
            )?),
            b'N' => out.push(named_escape(body, &mut i, start)?),
            other => {
                first_invalid.get_or_insert(char::from(other));
                out.push('\\');
                out.push(char::from(other));
            }
        }
    }

    Ok(Unescaped {
        value: out,
        first_invalid,
    })
}

/// Decode `digits` hex digits at `i` into a character.
///
/// Surrogate code points cannot live in a Rust string and become U+FFFD.
fn hex_escape(
    bytes: &[u8],
    i: &mut usize,
    start: usize,
    digits: usize,
    truncated: &'static str,
) -> Result<char, EscapeError> {
    let mut value: u32 = 0;
    for _ in 0..digits {
        let Some(digit) = bytes.get(*i).copied().and_then(hex_value) else {
            return Err(EscapeError::Unicode {
                start,
                end: *i - 1,
                reason: truncated,
            });
        };
        value = value * 16 + digit;
        *i += 1;
    }
    if value > 0x0010_FFFF {
        return Err(EscapeError::Unicode {
            start,
            end: *i - 1,
            reason: "illegal Unicode character",
        });
    }
    Ok(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER))
}

/// Resolve `\N{NAME}` through the Unicode name table, advancing `i` past
/// the closing brace.
fn named_escape(body: &str, i: &mut usize, start: usize) -> Result<char, EscapeError> {
    let bytes = body.as_bytes();
    let malformed = |end| EscapeError::Unicode {
        start,
        end,
        reason: "malformed \\N character escape",
    };
    if bytes.get(*i) != Some(&b'{') {
        return Err(malformed(*i - 1));
    }
    let Some(offset) = bytes[*i + 1..].iter().position(|&c| c == b'}') else {
        return Err(malformed(bytes.len() - 1));
    };
    let close = *i + 1 + offset;
    if close == *i + 1 {
        return Err(malformed(close));
    }
    let name = &body[*i + 1..close];
    let ch = unicode_names2::character(name).ok_or(EscapeError::Unicode {
        start,
        end: close,
        reason: "unknown Unicode character name",
    })?;
    *i = close + 1;
    Ok(ch)
}

/// Decode a bytes literal body. The body is already known to be ASCII.
#[allow(
    clippy::cast_possible_truncation,
    reason = "octal values are masked to a byte and hex pairs are below 256"
)]
pub fn decode_bytes_escapes(body: &[u8]) -> Result<Unescaped<Vec<u8>>, EscapeError> {
    let mut out = Vec::with_capacity(body.len());
    let mut first_invalid = None;
    let mut i = 0;

    while i < body.len() {
        let c = body[i];
        i += 1;
        if c != b'\\' {
            out.push(c);
            continue;
        }
        let start = i - 1;
        let Some(&c) = body.get(i) else {
            return Err(EscapeError::TrailingBackslash);
        };
        i += 1;
        if let Some(simple) = simple_escape(c) {
            out.push(simple);
            continue;
        }
        match c {
            b'\n' => {}
            b'0'..=b'7' => {
                let value = octal_value(body, &mut i, c);
                out.push((value & 0xFF) as u8);
            }
            b'x' => {
                let high = body.get(i).copied().and_then(hex_value);
                let low = body.get(i + 1).copied().and_then(hex_value);
                let (Some(high), Some(low)) = (high, low) else {
                    return Err(EscapeError::InvalidHex(start));
                };
                out.push((high * 16 + low) as u8);
                i += 2;
            }
            other => {
                first_invalid.get_or_insert(char::from(other));
                out.push(b'\\');
                out.push(other);
            }
        }
    }

    Ok(Unescaped {
        value: out,
        first_invalid,
    })
}
