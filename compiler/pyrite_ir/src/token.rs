//! Token types produced by the tokenizer and buffered by the parser.

use super::{Pos, Span};
use std::fmt;

/// Reserved-word kind assigned by a grammar's keyword table.
///
/// The tokenizer only knows identifiers; the parser reclassifies an identifier
/// into a `Keyword` when its text matches a keyword table entry exactly.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Keyword(u16);

impl Keyword {
    #[inline]
    pub const fn new(id: u16) -> Self {
        Keyword(id)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keyword({})", self.0)
    }
}

/// Lexical class of a token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Structural markers
    EndMarker,
    Newline,
    Indent,
    Dedent,

    // Lexemes with text
    Name,
    Number,
    String,

    // Reserved word (reclassified `Name`)
    Keyword(Keyword),

    // Delimiters
    LPar,
    RPar,
    LSqb,
    RSqb,
    LBrace,
    RBrace,
    Colon,
    Comma,
    Semi,
    Dot,
    Ellipsis,
    RArrow,
    At,
    ColonEqual,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    DoubleSlash,
    Percent,
    DoubleStar,
    VBar,
    Amper,
    Circumflex,
    Tilde,
    LeftShift,
    RightShift,
    Less,
    Greater,
    Equal,
    EqEqual,
    NotEqual,
    LessEqual,
    GreaterEqual,

    // Augmented assignment
    PlusEqual,
    MinEqual,
    StarEqual,
    SlashEqual,
    DoubleSlashEqual,
    PercentEqual,
    DoubleStarEqual,
    AtEqual,
    AmperEqual,
    VBarEqual,
    CircumflexEqual,
    LeftShiftEqual,
    RightShiftEqual,
}

impl TokenKind {
    /// Tokens that carry no source text of their own.
    ///
    /// Node end positions skip these: a statement ends at its last
    /// visible token, not at the NEWLINE that terminates it.
    #[inline]
    pub fn is_whitespace(self) -> bool {
        matches!(
            self,
            TokenKind::EndMarker | TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent
        )
    }

    /// Bracket nesting contribution: +1 for openers, -1 for closers.
    #[inline]
    pub fn bracket_delta(self) -> i32 {
        match self {
            TokenKind::LPar | TokenKind::LSqb | TokenKind::LBrace => 1,
            TokenKind::RPar | TokenKind::RSqb | TokenKind::RBrace => -1,
            _ => 0,
        }
    }

    /// Human-readable name, used in traces and test failure output.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::EndMarker => "ENDMARKER",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::Name => "NAME",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Keyword(_) => "KEYWORD",
            TokenKind::LPar => "'('",
            TokenKind::RPar => "')'",
            TokenKind::LSqb => "'['",
            TokenKind::RSqb => "']'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::Semi => "';'",
            TokenKind::Dot => "'.'",
            TokenKind::Ellipsis => "'...'",
            TokenKind::RArrow => "'->'",
            TokenKind::At => "'@'",
            TokenKind::ColonEqual => "':='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::DoubleSlash => "'//'",
            TokenKind::Percent => "'%'",
            TokenKind::DoubleStar => "'**'",
            TokenKind::VBar => "'|'",
            TokenKind::Amper => "'&'",
            TokenKind::Circumflex => "'^'",
            TokenKind::Tilde => "'~'",
            TokenKind::LeftShift => "'<<'",
            TokenKind::RightShift => "'>>'",
            TokenKind::Less => "'<'",
            TokenKind::Greater => "'>'",
            TokenKind::Equal => "'='",
            TokenKind::EqEqual => "'=='",
            TokenKind::NotEqual => "'!='",
            TokenKind::LessEqual => "'<='",
            TokenKind::GreaterEqual => "'>='",
            TokenKind::PlusEqual => "'+='",
            TokenKind::MinEqual => "'-='",
            TokenKind::StarEqual => "'*='",
            TokenKind::SlashEqual => "'/='",
            TokenKind::DoubleSlashEqual => "'//='",
            TokenKind::PercentEqual => "'%='",
            TokenKind::DoubleStarEqual => "'**='",
            TokenKind::AtEqual => "'@='",
            TokenKind::AmperEqual => "'&='",
            TokenKind::VBarEqual => "'|='",
            TokenKind::CircumflexEqual => "'^='",
            TokenKind::LeftShiftEqual => "'<<='",
            TokenKind::RightShiftEqual => "'>>='",
        }
    }
}

/// A buffered token: kind, byte span in its source buffer, and line/column
/// range. Columns are byte offsets.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub start: Pos,
    pub end: Pos,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span, start: Pos, end: Pos) -> Self {
        Token {
            kind,
            span,
            start,
            end,
        }
    }
}
