#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use pyrite_ir::{Keyword, TokenKind};

use super::TokenBuffer;
use crate::KeywordTable;

const IF: Keyword = Keyword::new(1);
static KEYWORDS: KeywordTable = KeywordTable::new(&[&[], &[], &[("if", IF)]]);

#[test]
fn test_fill_is_lazy() {
    let mut buffer = TokenBuffer::new("a b c\n", &KEYWORDS);
    assert_eq!(buffer.fill(), 0);
    assert_eq!(buffer.peek().unwrap().kind, TokenKind::Name);
    assert_eq!(buffer.fill(), 1);
    assert_eq!(buffer.peek().unwrap().kind, TokenKind::Name);
    assert_eq!(buffer.fill(), 1);
    buffer.advance().unwrap();
    buffer.advance().unwrap();
    assert_eq!(buffer.fill(), 2);
}

#[test]
fn test_reset_replays_without_refill() {
    let mut buffer = TokenBuffer::new("x = 1\n", &KEYWORDS);
    let start = buffer.mark();
    let first: Vec<_> = (0..4).map(|_| buffer.advance().unwrap()).collect();
    let filled = buffer.fill();
    buffer.reset(start);
    let second: Vec<_> = (0..4).map(|_| buffer.advance().unwrap()).collect();
    assert_eq!(first, second);
    assert_eq!(buffer.fill(), filled);
}

#[test]
fn test_keyword_reclassified_at_fill() {
    let mut buffer = TokenBuffer::new("if iff\n", &KEYWORDS);
    assert_eq!(buffer.advance().unwrap().kind, TokenKind::Keyword(IF));
    let name = buffer.advance().unwrap();
    assert_eq!(name.kind, TokenKind::Name);
    assert_eq!(buffer.text(&name), "iff");
}

#[test]
fn test_last_non_whitespace_skips_structure() {
    let mut buffer = TokenBuffer::new("a\n", &KEYWORDS);
    let a = buffer.advance().unwrap();
    let newline = buffer.advance().unwrap();
    assert_eq!(newline.kind, TokenKind::Newline);
    assert_eq!(buffer.last_non_whitespace(), Some(a));
    assert_eq!(buffer.last_filled(), Some(newline));
}

#[test]
fn test_grows_past_initial_capacity() {
    let source = "x ".repeat(200) + "\n";
    let mut buffer = TokenBuffer::new(&source, &KEYWORDS);
    for _ in 0..200 {
        assert_eq!(buffer.advance().unwrap().kind, TokenKind::Name);
    }
    assert_eq!(buffer.fill(), 200);
    assert_eq!(buffer.get(199).unwrap().kind, TokenKind::Name);
}

#[test]
fn test_lex_error_surfaces() {
    let mut buffer = TokenBuffer::new("$\n", &KEYWORDS);
    assert!(buffer.peek().is_err());
    assert_eq!(buffer.fill(), 0);
}
