//! NUMBER lexeme conversion.

use std::borrow::Cow;
use std::num::IntErrorKind;

use pyrite_ir::ast::Constant;
use pyrite_ir::StringInterner;

/// Value of a NUMBER token.
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    /// Integer beyond `i64`, as its underscore-free source text.
    BigInt(String),
    Float(f64),
    /// Imaginary part of a `j`-suffixed literal.
    Complex(f64),
}

impl Number {
    pub fn into_constant(self, interner: &mut StringInterner) -> Constant {
        match self {
            Number::Int(value) => Constant::Int(value),
            Number::BigInt(text) => Constant::BigInt(interner.intern(&text)),
            Number::Float(value) => Constant::Float(value),
            Number::Complex(value) => Constant::Complex(value),
        }
    }
}

/// Convert a NUMBER lexeme. `None` when the text is not a number.
pub fn parse_number(text: &str) -> Option<Number> {
    let cleaned: Cow<'_, str> = if text.contains('_') {
        Cow::Owned(text.replace('_', ""))
    } else {
        Cow::Borrowed(text)
    };
    if cleaned.is_empty() {
        return None;
    }

    if let Some(imag) = cleaned
        .strip_suffix('j')
        .or_else(|| cleaned.strip_suffix('J'))
    {
        return imag.parse().ok().map(Number::Complex);
    }

    let radix = match cleaned.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &cleaned[2..];
        if digits.is_empty() {
            return None;
        }
        return integer(digits, radix, &cleaned);
    }

    if cleaned.contains(['.', 'e', 'E']) {
        return cleaned.parse().ok().map(Number::Float);
    }
    integer(&cleaned, 10, &cleaned)
}

fn integer(digits: &str, radix: u32, text: &str) -> Option<Number> {
    if !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    match i64::from_str_radix(digits, radix) {
        Ok(value) => Some(Number::Int(value)),
        Err(error) if *error.kind() == IntErrorKind::PosOverflow => {
            Some(Number::BigInt(text.to_owned()))
        }
        Err(_) => None,
    }
}
