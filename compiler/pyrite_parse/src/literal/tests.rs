#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use pyrite_diagnostic::ErrorCode;
use pyrite_ir::Pos;

use super::*;
use crate::tests::{dump, syntax_error, with_options, with_parser};
use crate::{ParseOptions, ParseWarning, StartRule};

// Escapes

#[test]
fn test_simple_and_numeric_escapes() {
    let decoded = decode_str_escapes(r"a\nb\t\x41é\U0001F600\101\0").unwrap();
    assert_eq!(decoded.value, "a\nb\tAé\u{1F600}A\0");
    assert_eq!(decoded.first_invalid, None);
}

#[test]
fn test_line_continuation_escape() {
    assert_eq!(decode_str_escapes("a\\\nb").unwrap().value, "ab");
}

#[test]
fn test_unknown_escapes_are_kept() {
    let decoded = decode_str_escapes(r"\d\q").unwrap();
    assert_eq!(decoded.value, r"\d\q");
    assert_eq!(decoded.first_invalid, Some('d'));
}

#[test]
fn test_surrogate_escape_is_replaced() {
    assert_eq!(decode_str_escapes(r"\ud800").unwrap().value, "\u{FFFD}");
}

#[test]
fn test_truncated_hex_escape() {
    let error = decode_str_escapes(r"\x4").unwrap_err();
    assert_eq!(
        error,
        EscapeError::Unicode {
            start: 0,
            end: 2,
            reason: "truncated \\xXX escape",
        }
    );
    assert_eq!(
        error.to_string(),
        "(unicode error) 'unicodeescape' codec can't decode bytes in position 0-2: truncated \\xXX escape"
    );
}

#[test]
fn test_out_of_range_escape() {
    let error = decode_str_escapes(r"\U00110000").unwrap_err();
    assert_eq!(
        error,
        EscapeError::Unicode {
            start: 0,
            end: 9,
            reason: "illegal Unicode character",
        }
    );
}

#[test]
fn test_named_escapes() {
    let decoded =
        decode_str_escapes(r"a\N{EM DASH}b\N{LATIN SMALL LETTER E WITH ACUTE}").unwrap();
    assert_eq!(decoded.value, "a\u{2014}b\u{e9}");
    assert_eq!(decoded.first_invalid, None);

    let error = decode_str_escapes(r"\N{NO SUCH NAME}").unwrap_err();
    assert_eq!(
        error,
        EscapeError::Unicode {
            start: 0,
            end: 15,
            reason: "unknown Unicode character name",
        }
    );
    for malformed in [r"\N", r"\N{}", r"\N{EM DASH"] {
        assert!(
            matches!(
                decode_str_escapes(malformed).unwrap_err(),
                EscapeError::Unicode {
                    reason: "malformed \\N character escape",
                    ..
                }
            ),
            "{malformed}"
        );
    }
}

#[test]
fn test_named_escape_in_source() {
    assert_eq!(
        dump("'\\N{EM DASH}'", StartRule::Eval),
        "Expression(body=Constant(value='\u{2014}'))"
    );
}

#[test]
fn test_bytes_escapes() {
    let decoded = decode_bytes_escapes(br"\x41\n\777\d").unwrap();
    assert_eq!(decoded.value, b"A\n\xff\\d".to_vec());
    assert_eq!(decoded.first_invalid, Some('d'));

    assert_eq!(
        decode_bytes_escapes(br"\x4").unwrap_err().to_string(),
        "(value error) invalid \\x escape at position 0"
    );
    assert_eq!(
        decode_bytes_escapes(b"a\\").unwrap_err(),
        EscapeError::TrailingBackslash
    );
}

// Numbers

#[test]
fn test_parse_numbers() {
    let cases = [
        ("1_000", Number::Int(1000)),
        ("0x_ff", Number::Int(255)),
        ("0o17", Number::Int(15)),
        ("0b101", Number::Int(5)),
        ("1.5", Number::Float(1.5)),
        ("1e3", Number::Float(1000.0)),
        (".5", Number::Float(0.5)),
        ("2j", Number::Complex(2.0)),
        (
            "99999999999999999999",
            Number::BigInt("99999999999999999999".to_owned()),
        ),
    ];
    for (text, expected) in cases {
        assert_eq!(parse_number(text), Some(expected), "{text}");
    }
    assert_eq!(parse_number(""), None);
    assert_eq!(parse_number("0x"), None);
    assert_eq!(parse_number("abc"), None);
}

#[test]
fn test_number_constants_dump() {
    assert_eq!(
        dump("99999999999999999999", StartRule::Eval),
        "Expression(body=Constant(value=99999999999999999999))"
    );
    assert_eq!(
        dump("[2j, 1.5j, 1e16]", StartRule::Eval),
        "Expression(body=List(elts=[Constant(value=2j), Constant(value=1.5j), Constant(value=1e+16)], ctx=Load()))"
    );
}

// Prefixes and bodies

#[test]
fn test_scan_prefix() {
    let (prefix, quote) = scan_prefix("rb'x'");
    assert_eq!(
        prefix,
        StringPrefix {
            bytes: true,
            raw: true,
            ..StringPrefix::default()
        }
    );
    assert_eq!(quote, 2);

    let (prefix, quote) = scan_prefix("'x'");
    assert_eq!(prefix, StringPrefix::default());
    assert_eq!(quote, 0);

    assert!(scan_prefix("F\"\"").0.fstring);
}

#[test]
fn test_literal_body() {
    assert_eq!(literal_body("'abc'", 0), Some(1..4));
    assert_eq!(literal_body("'''abc'''", 0), Some(3..6));
    assert_eq!(literal_body("b\"\"", 1), Some(2..2));
    assert_eq!(literal_body("'abc\"", 0), None);
    assert_eq!(literal_body("abc", 0), None);
}

// Decoding through the parser

#[test]
fn test_raw_strings_skip_escapes() {
    with_parser(r"r'\d' b'\x41'", |p| {
        let first = p.string_token().unwrap();
        let second = p.string_token().unwrap();
        let (_, raw) = decode_literal(p, &first).unwrap();
        assert_eq!(raw, Literal::Str(r"\d".to_owned()));
        let (prefix, bytes) = decode_literal(p, &second).unwrap();
        assert!(prefix.bytes);
        assert_eq!(bytes, Literal::Bytes(b"A".to_vec()));
        assert!(p.session().warnings.is_empty());
    });
}

#[test]
fn test_fstring_body_is_left_undecoded() {
    with_parser(r"f'{x}\n'", |p| {
        let token = p.string_token().unwrap();
        let (prefix, literal) = decode_literal(p, &token).unwrap();
        assert!(prefix.fstring);
        assert_eq!(
            literal,
            Literal::FString {
                body: 2..7,
                raw: false
            }
        );
    });
}

#[test]
fn test_invalid_escape_warns() {
    with_parser("x = '\\d'", |p| {
        p.expect_name().unwrap();
        p.expect(pyrite_ir::TokenKind::Equal).unwrap();
        let token = p.string_token().unwrap();
        let (_, literal) = decode_literal(p, &token).unwrap();
        assert_eq!(literal, Literal::Str("\\d".to_owned()));
        assert_eq!(
            p.session().warnings,
            vec![ParseWarning::InvalidEscape {
                ch: 'd',
                pos: Pos::new(1, 4),
            }]
        );
        assert!(!p.has_error());
    });
}

#[test]
fn test_strict_escapes_raise() {
    let options = ParseOptions::default().with_strict_escapes(true);
    with_options("'\\d'", options, |p| {
        let token = p.string_token().unwrap();
        assert_eq!(decode_literal(p, &token), None);
        assert!(p.is_halted());
        let failure = p.take_error().unwrap();
        let error = failure.as_syntax().unwrap();
        assert_eq!(error.code, ErrorCode::W1001);
        assert_eq!(error.message, "invalid escape sequence \\d");
        assert!(p.session().warnings.is_empty());
    });
}

#[test]
fn test_literal_errors_point_at_token() {
    let error = syntax_error("x + '\\x4'", StartRule::Eval);
    assert_eq!(
        error.message,
        "(unicode error) 'unicodeescape' codec can't decode bytes in position 0-2: truncated \\xXX escape"
    );
    assert_eq!(error.code, ErrorCode::E1004);
    assert_eq!(error.column, 5);

    assert_eq!(
        syntax_error("b'é'", StartRule::Eval).message,
        "bytes can only contain ASCII literal characters."
    );
}

#[test]
fn test_escaped_quote_in_str() {
    assert_eq!(
        dump(r"'it\'s'", StartRule::Eval),
        "Expression(body=Constant(value=\"it's\"))"
    );
}
