#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use pyrite_diagnostic::{ErrorCode, SyntaxError};
use pyrite_ir::{Pos, TokenKind};

use super::*;
use crate::tests::{syntax_error, with_parser};
use crate::{python_keywords, ParseOptions, ParseSession, PosShift, PythonGrammar, StartRule};

/// Run `f` on a parser over `source` reporting as `origin`.
fn with_origin<R>(source: &str, origin: SourceOrigin, f: impl FnOnce(&mut Parser<'_>) -> R) -> R {
    let mut session = ParseSession::new(ParseOptions::default());
    let grammar = PythonGrammar;
    let mut parser = Parser::new(source, origin, &mut session, &grammar, python_keywords());
    f(&mut parser)
}

fn take_syntax(p: &mut Parser<'_>) -> SyntaxError {
    match p.take_error() {
        Some(ParseFailure::Syntax(error)) => error,
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn test_first_error_wins() {
    with_parser("x", |p| {
        p.report_error_at(ErrorCode::E1002, "first", Pos::new(1, 0));
        p.raise_error_at::<()>(ErrorCode::E1001, "second", Pos::new(1, 0));
        let error = take_syntax(p);
        assert_eq!(error.message, "first");
        assert_eq!(error.code, ErrorCode::E1002);
        assert!(!p.has_error());
    });
}

#[test]
fn test_report_keeps_parsing() {
    with_parser("x y", |p| {
        p.report_error_at(ErrorCode::E1002, "recorded", Pos::new(1, 0));
        assert!(p.has_error());
        assert!(!p.is_halted());
        assert!(p.expect(TokenKind::Name).is_some());
        assert!(p.peek().is_some());
    });
}

#[test]
fn test_raise_halts_token_access() {
    with_parser("x y", |p| {
        assert!(p.peek().is_some());
        p.raise_syntax_error::<()>(ErrorCode::E1001, "stop");
        assert!(p.is_halted());
        assert_eq!(p.peek(), None);
        assert_eq!(p.expect(TokenKind::Name), None);
    });
}

#[test]
fn test_raise_syntax_error_uses_furthest_token() {
    with_parser("a b c", |p| {
        let start = p.mark();
        p.expect(TokenKind::Name);
        p.expect(TokenKind::Name);
        p.peek();
        p.reset(start);
        p.raise_syntax_error::<()>(ErrorCode::E1001, "here");
        let error = take_syntax(p);
        assert_eq!(error.column, 5);
    });
}

#[test]
fn test_columns_count_characters() {
    with_parser("é = ü + )", |p| {
        p.raise_error_at::<()>(ErrorCode::E1001, "m", Pos::new(1, 5));
        let error = take_syntax(p);
        assert_eq!(error.line, 1);
        assert_eq!(error.column, 5);
    });
}

#[test]
fn test_file_origin_reports_line_text() {
    let origin = SourceOrigin::File("m.py".to_owned());
    with_origin("a\nb = )\n", origin, |p| {
        p.raise_error_at::<()>(ErrorCode::E1001, "invalid syntax", Pos::new(2, 4));
        let error = take_syntax(p);
        assert_eq!(error.filename, "m.py");
        assert_eq!(error.line, 2);
        assert_eq!(error.column, 5);
        assert_eq!(error.text.as_deref(), Some("b = )"));
    });
}

#[test]
fn test_text_origin_reports_whole_source() {
    with_origin("a\nb = )\n", SourceOrigin::Text, |p| {
        p.raise_error_at::<()>(ErrorCode::E1001, "invalid syntax", Pos::new(2, 4));
        let error = take_syntax(p);
        assert_eq!(error.filename, "<string>");
        assert_eq!(error.text.as_deref(), Some("a\nb = )"));
    });
}

#[test]
fn test_fstring_origin_prefixes_and_shifts() {
    let origin = SourceOrigin::FString {
        filename: "m.py".to_owned(),
        shift: PosShift { line: 2, col: 4 },
    };
    with_origin("(a b)", origin, |p| {
        p.raise_error_at::<()>(ErrorCode::E1001, "invalid syntax", Pos::new(1, 3));
        let error = take_syntax(p);
        assert_eq!(error.message, "f-string: invalid syntax");
        assert_eq!(error.filename, "m.py");
        assert_eq!(error.line, 3);
        assert_eq!(error.column, 4);
        assert_eq!(error.text.as_deref(), Some("(a b)"));
    });
}

#[test]
fn test_node_errors_use_unmapped_start() {
    with_parser("foo + bar", |p| {
        p.name_token().unwrap();
        p.expect(TokenKind::Plus).unwrap();
        let bar = p.name_token().unwrap();
        p.report_error_at_node(ErrorCode::E1002, "bad", bar);
        assert_eq!(take_syntax(p).column, 7);
    });

    let origin = SourceOrigin::FString {
        filename: "<string>".to_owned(),
        shift: PosShift { line: 0, col: 10 },
    };
    with_origin("(a + b)", origin, |p| {
        p.expect(TokenKind::LPar).unwrap();
        p.name_token().unwrap();
        p.expect(TokenKind::Plus).unwrap();
        let b = p.name_token().unwrap();
        assert_eq!(p.expr_loc(b).start, Pos::new(1, 15));
        p.raise_error_at_node::<()>(ErrorCode::E1002, "bad", b);
        assert_eq!(take_syntax(p).column, 6);
    });
}

#[test]
fn test_generic_failure_messages() {
    with_parser("x", |p| {
        p.report_generic_failure();
        let error = take_syntax(p);
        assert_eq!(error.message, "error at start before reading any input");
        assert_eq!((error.line, error.column), (1, 1));
    });

    let error = syntax_error("x\n  y\n", StartRule::File);
    assert_eq!(error.message, "unexpected indent");
    assert_eq!(error.line, 2);
}

#[test]
fn test_lexer_errors_become_syntax_errors() {
    let error = syntax_error("x = $\n", StartRule::File);
    assert_eq!(error.message, "invalid character '$' (U+0024)");
    assert_eq!(error.code, ErrorCode::E0002);

    let error = syntax_error("'abc\n", StartRule::File);
    assert_eq!(error.message, "EOL while scanning string literal");
    assert_eq!(error.code, ErrorCode::E0001);
}

#[test]
fn test_internal_errors() {
    with_parser("x", |p| {
        p.raise_internal::<()>("boom");
        assert!(p.is_halted());
        let failure = p.take_error().unwrap();
        assert!(failure.as_syntax().is_none());
        assert_eq!(failure.to_string(), "internal parser error: boom");
    });
}

#[test]
fn test_warning_display() {
    let warning = ParseWarning::InvalidEscape {
        ch: 'q',
        pos: Pos::new(3, 1),
    };
    assert_eq!(warning.code(), ErrorCode::W1001);
    assert_eq!(warning.pos(), Pos::new(3, 1));
    assert_eq!(warning.message(), "invalid escape sequence \\q");
}
