//! Pull-based tokenizer with indentation tracking.
//!
//! Wraps the logos scanner and synthesizes the line-structure tokens:
//! NEWLINE at the end of each logical line, INDENT/DEDENT when the leading
//! whitespace of a line changes, and a final NEWLINE/DEDENT*/ENDMARKER run at
//! end of input. Newlines inside brackets and on blank lines are dropped.

use std::collections::VecDeque;

use logos::Logos;
use pyrite_diagnostic::LineOffsetTable;
use pyrite_ir::{Span, Token, TokenKind};

use crate::raw_token::{RawError, RawToken};
use crate::{LexError, LexErrorKind};

const TAB_SIZE: u32 = 8;

pub struct Tokenizer<'src> {
    source: &'src str,
    scanner: logos::Lexer<'src, RawToken>,
    lines: LineOffsetTable,
    /// Indentation columns of the open blocks; bottom is always 0.
    indents: Vec<u32>,
    /// Synthesized tokens waiting to be handed out, in order.
    pending: VecDeque<Token>,
    bracket_depth: u32,
    /// No token has been produced yet on the current logical line.
    at_line_start: bool,
    /// ENDMARKER once end of input has been processed.
    end: Option<Token>,
}

impl<'src> Tokenizer<'src> {
    pub fn new(source: &'src str) -> Self {
        Tokenizer {
            source,
            scanner: RawToken::lexer(source),
            lines: LineOffsetTable::build(source),
            indents: vec![0],
            pending: VecDeque::new(),
            bracket_depth: 0,
            at_line_start: true,
            end: None,
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn lines(&self) -> &LineOffsetTable {
        &self.lines
    }

    /// Produce the next token. After ENDMARKER, keeps returning ENDMARKER.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        if let Some(token) = self.pending.pop_front() {
            return Ok(token);
        }
        if let Some(end) = self.end {
            return Ok(end);
        }

        loop {
            let Some(result) = self.scanner.next() else {
                return self.finish();
            };
            let span = self.span();
            let raw = match result {
                Ok(raw) => raw,
                Err(err) => return Err(self.scan_error(err, span)),
            };

            if raw == RawToken::Newline {
                if self.bracket_depth > 0 || self.at_line_start {
                    continue;
                }
                self.at_line_start = true;
                return Ok(self.token(TokenKind::Newline, span));
            }

            if self.at_line_start {
                self.at_line_start = false;
                self.track_indent(span)?;
            }

            let kind = convert(raw);
            match kind.bracket_delta() {
                1 => self.bracket_depth += 1,
                -1 => self.bracket_depth = self.bracket_depth.saturating_sub(1),
                _ => {}
            }
            let token = self.token(kind, span);
            if self.pending.is_empty() {
                return Ok(token);
            }
            self.pending.push_back(token);
            if let Some(first) = self.pending.pop_front() {
                return Ok(first);
            }
        }
    }

    fn span(&self) -> Span {
        let range = self.scanner.span();
        Span::new(offset(range.start), offset(range.end))
    }

    fn token(&self, kind: TokenKind, span: Span) -> Token {
        Token::new(
            kind,
            span,
            self.lines.position(span.start),
            self.lines.position(span.end),
        )
    }

    /// Compare the leading whitespace of the line starting at `first` with
    /// the open blocks, queueing INDENT or DEDENT tokens.
    fn track_indent(&mut self, first: Span) -> Result<(), LexError> {
        let pos = self.lines.position(first.start);
        let line_start = first.start - pos.col;
        let mut column = 0;
        for byte in self.source[line_start as usize..first.start as usize].bytes() {
            match byte {
                b'\t' => column = (column / TAB_SIZE + 1) * TAB_SIZE,
                b'\x0C' => column = 0,
                _ => column += 1,
            }
        }

        let top = self.indents.last().copied().unwrap_or(0);
        if column > top {
            self.indents.push(column);
            let start = pyrite_ir::Pos::new(pos.line, 0);
            self.pending.push_back(Token::new(
                TokenKind::Indent,
                Span::new(line_start, first.start),
                start,
                pos,
            ));
            return Ok(());
        }

        while self.indents.last().is_some_and(|&open| column < open) {
            self.indents.pop();
            self.pending.push_back(Token::new(
                TokenKind::Dedent,
                Span::point(first.start),
                pos,
                pos,
            ));
        }
        if self.indents.last().copied().unwrap_or(0) != column {
            return Err(LexError::new(LexErrorKind::InconsistentDedent, first, pos));
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<Token, LexError> {
        let eof = Span::point(offset(self.source.len()));
        let pos = self.lines.position(eof.start);
        if self.bracket_depth > 0 {
            return Err(LexError::new(LexErrorKind::UnexpectedEof, eof, pos));
        }
        if !self.at_line_start {
            self.at_line_start = true;
            self.pending
                .push_back(Token::new(TokenKind::Newline, eof, pos, pos));
        }
        while self.indents.len() > 1 {
            self.indents.pop();
            self.pending
                .push_back(Token::new(TokenKind::Dedent, eof, pos, pos));
        }
        let end = Token::new(TokenKind::EndMarker, eof, pos, pos);
        self.end = Some(end);
        Ok(self.pending.pop_front().unwrap_or(end))
    }

    fn scan_error(&self, err: RawError, span: Span) -> LexError {
        let pos = self.lines.position(span.start);
        let kind = match err {
            RawError::InvalidCharacter => {
                let c = self.source[span.start as usize..]
                    .chars()
                    .next()
                    .unwrap_or('\u{FFFD}');
                LexErrorKind::InvalidCharacter(c)
            }
            RawError::UnterminatedString => LexErrorKind::UnterminatedString,
            RawError::UnterminatedTripleString => LexErrorKind::UnterminatedTripleString,
        };
        LexError::new(kind, span, pos)
    }
}

/// Tokenize a whole source buffer, through the first ENDMARKER.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokenizer = Tokenizer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = tokenizer.next_token()?;
        tokens.push(token);
        if token.kind == TokenKind::EndMarker {
            return Ok(tokens);
        }
    }
}

fn offset(value: usize) -> u32 {
    u32::try_from(value).unwrap_or_else(|_| panic!("source exceeds {} bytes", u32::MAX))
}

fn convert(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::Newline => TokenKind::Newline,
        RawToken::Name => TokenKind::Name,
        RawToken::Number => TokenKind::Number,
        RawToken::String => TokenKind::String,
        RawToken::LPar => TokenKind::LPar,
        RawToken::RPar => TokenKind::RPar,
        RawToken::LSqb => TokenKind::LSqb,
        RawToken::RSqb => TokenKind::RSqb,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semi => TokenKind::Semi,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::RArrow => TokenKind::RArrow,
        RawToken::At => TokenKind::At,
        RawToken::ColonEqual => TokenKind::ColonEqual,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::DoubleSlash => TokenKind::DoubleSlash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::DoubleStar => TokenKind::DoubleStar,
        RawToken::VBar => TokenKind::VBar,
        RawToken::Amper => TokenKind::Amper,
        RawToken::Circumflex => TokenKind::Circumflex,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::LeftShift => TokenKind::LeftShift,
        RawToken::RightShift => TokenKind::RightShift,
        RawToken::Less => TokenKind::Less,
        RawToken::Greater => TokenKind::Greater,
        RawToken::Equal => TokenKind::Equal,
        RawToken::EqEqual => TokenKind::EqEqual,
        RawToken::NotEqual => TokenKind::NotEqual,
        RawToken::LessEqual => TokenKind::LessEqual,
        RawToken::GreaterEqual => TokenKind::GreaterEqual,
        RawToken::PlusEqual => TokenKind::PlusEqual,
        RawToken::MinEqual => TokenKind::MinEqual,
        RawToken::StarEqual => TokenKind::StarEqual,
        RawToken::SlashEqual => TokenKind::SlashEqual,
        RawToken::DoubleSlashEqual => TokenKind::DoubleSlashEqual,
        RawToken::PercentEqual => TokenKind::PercentEqual,
        RawToken::DoubleStarEqual => TokenKind::DoubleStarEqual,
        RawToken::AtEqual => TokenKind::AtEqual,
        RawToken::AmperEqual => TokenKind::AmperEqual,
        RawToken::VBarEqual => TokenKind::VBarEqual,
        RawToken::CircumflexEqual => TokenKind::CircumflexEqual,
        RawToken::LeftShiftEqual => TokenKind::LeftShiftEqual,
        RawToken::RightShiftEqual => TokenKind::RightShiftEqual,
    }
}
