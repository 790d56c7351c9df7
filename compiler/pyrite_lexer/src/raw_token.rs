//! Raw Token Definition
//!
//! The `RawToken` enum is the logos-derived scanner output, before
//! indentation tracking turns line structure into NEWLINE/INDENT/DEDENT.

use logos::{Lexer, Logos};

/// Scanner-level failure. `Default` is what logos reports for input that
/// matches no pattern.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub(crate) enum RawError {
    #[default]
    InvalidCharacter,
    UnterminatedString,
    UnterminatedTripleString,
}

/// Scan a string body after its prefix and opening quote.
///
/// The regex only matches up to the opening quote; the body is consumed
/// here because triple quotes, escapes and embedded newlines do not fit a
/// single regular pattern.
fn string_body(lex: &mut Lexer<'_, RawToken>) -> Result<(), RawError> {
    let quote = lex.slice().as_bytes()[lex.slice().len() - 1];
    let rest = lex.remainder().as_bytes();

    if rest.len() >= 2 && rest[0] == quote && rest[1] == quote {
        let mut i = 2;
        while i < rest.len() {
            match rest[i] {
                b'\\' => i += 2,
                b if b == quote
                    && i + 2 < rest.len()
                    && rest[i + 1] == quote
                    && rest[i + 2] == quote =>
                {
                    lex.bump(i + 3);
                    return Ok(());
                }
                _ => i += 1,
            }
        }
        lex.bump(rest.len());
        return Err(RawError::UnterminatedTripleString);
    }

    let mut i = 0;
    while i < rest.len() {
        match rest[i] {
            b'\\' if i + 2 < rest.len() && rest[i + 1] == b'\r' && rest[i + 2] == b'\n' => i += 3,
            b'\\' => i += 2,
            b'\n' => break,
            b if b == quote => {
                lex.bump(i + 1);
                return Ok(());
            }
            _ => i += 1,
        }
    }
    lex.bump(i.min(rest.len()));
    Err(RawError::UnterminatedString)
}

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(error = RawError)]
#[logos(skip r"[ \t\x0C]+")] // Horizontal whitespace; indentation is measured from the source
#[logos(skip r"#[^\r\n]*")] // Comments
#[logos(skip r"\\\r?\n")] // Explicit line joining
pub(crate) enum RawToken {
    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"[_\p{XID_Start}]\p{XID_Continue}*")]
    Name,

    // Integers: hex, octal, binary, decimal
    #[regex(r"0[xX](_?[0-9a-fA-F])+")]
    #[regex(r"0[oO](_?[0-7])+")]
    #[regex(r"0[bB](_?[01])+")]
    #[regex(r"[1-9](_?[0-9])*")]
    #[regex(r"0(_?0)*")]
    // Floats: point form with optional exponent, exponent-only form
    #[regex(r"[0-9](_?[0-9])*\.([0-9](_?[0-9])*)?([eE][+-]?[0-9](_?[0-9])*)?")]
    #[regex(r"\.[0-9](_?[0-9])*([eE][+-]?[0-9](_?[0-9])*)?")]
    #[regex(r"[0-9](_?[0-9])*[eE][+-]?[0-9](_?[0-9])*")]
    // Imaginary
    #[regex(r"[0-9](_?[0-9])*[jJ]")]
    #[regex(r"[0-9](_?[0-9])*\.([0-9](_?[0-9])*)?([eE][+-]?[0-9](_?[0-9])*)?[jJ]")]
    #[regex(r"\.[0-9](_?[0-9])*([eE][+-]?[0-9](_?[0-9])*)?[jJ]")]
    #[regex(r"[0-9](_?[0-9])*[eE][+-]?[0-9](_?[0-9])*[jJ]")]
    Number,

    #[regex(r#"([rRbBuUfF]|[bB][rR]|[rR][bB]|[fF][rR]|[rR][fF])?['"]"#, string_body)]
    String,

    #[token("(")]
    LPar,
    #[token(")")]
    RPar,
    #[token("[")]
    LSqb,
    #[token("]")]
    RSqb,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("->")]
    RArrow,
    #[token("@")]
    At,
    #[token(":=")]
    ColonEqual,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("//")]
    DoubleSlash,
    #[token("%")]
    Percent,
    #[token("**")]
    DoubleStar,
    #[token("|")]
    VBar,
    #[token("&")]
    Amper,
    #[token("^")]
    Circumflex,
    #[token("~")]
    Tilde,
    #[token("<<")]
    LeftShift,
    #[token(">>")]
    RightShift,

    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("=")]
    Equal,
    #[token("==")]
    EqEqual,
    #[token("!=")]
    NotEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,

    #[token("+=")]
    PlusEqual,
    #[token("-=")]
    MinEqual,
    #[token("*=")]
    StarEqual,
    #[token("/=")]
    SlashEqual,
    #[token("//=")]
    DoubleSlashEqual,
    #[token("%=")]
    PercentEqual,
    #[token("**=")]
    DoubleStarEqual,
    #[token("@=")]
    AtEqual,
    #[token("&=")]
    AmperEqual,
    #[token("|=")]
    VBarEqual,
    #[token("^=")]
    CircumflexEqual,
    #[token("<<=")]
    LeftShiftEqual,
    #[token(">>=")]
    RightShiftEqual,
}
