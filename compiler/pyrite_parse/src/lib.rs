//! Packrat parsing runtime for pyrite.
//!
//! The runtime under a pegen-style PEG grammar:
//! - [`TokenBuffer`]: lazily filled, backtrackable token cache
//! - memoization and lookahead on [`Parser`] (`memoized`, `lookahead`)
//! - error reporting with byte-to-character column conversion
//! - [`combinators`] and [`signature`] for assembling tree nodes
//! - [`literal`] and [`fstring`] for string, bytes and f-string literals
//! - [`Driver`] owning the session and rendering the result
//!
//! A hand-written Python grammar ([`PythonGrammar`]) drives it end to end.
//!
//! Rule functions return `Option<T>`: `None` means the alternative does not
//! match here. Errors are stored on the parser, not returned. A failed rule
//! may leave the cursor moved; whoever tries the next alternative resets it
//! to its own mark.

pub mod combinators;
mod driver;
mod error;
pub mod fstring;
pub mod grammar;
mod keywords;
pub mod literal;
mod lookahead;
mod memo;
mod options;
mod session;
pub mod signature;
mod token_buffer;

#[cfg(test)]
mod tests;

use pyrite_diagnostic::ErrorCode;
use pyrite_ir::ast::{Expr, ExprContext, ExprKind, Mod, Stmt, StmtKind};
use pyrite_ir::{AstArena, ExprId, Keyword, Location, Name, Pos, StmtId, Token, TokenKind};
use pyrite_stack::ensure_sufficient_stack;

pub use driver::{parse, Compiler, Driver, OutputMode, ParsedModule, Rendered};
pub use error::{ParseFailure, ParseWarning};
pub use grammar::{python_keywords, Grammar, PythonGrammar, StartRule};
pub use keywords::KeywordTable;
pub use memo::{MemoValue, Memoize, RuleId};
pub use options::{ParseOptions, DEFAULT_MAX_DEPTH};
pub use session::ParseSession;
pub use token_buffer::TokenBuffer;

/// Offset applied to positions of a child parse so its nodes point into the
/// enclosing source. Columns shift on the first line only.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct PosShift {
    pub line: u32,
    pub col: u32,
}

impl PosShift {
    pub fn apply(self, pos: Pos) -> Pos {
        let col = if pos.line == 1 {
            self.col + pos.col
        } else {
            pos.col
        };
        Pos::new(self.line + pos.line, col)
    }

    /// Inverse of [`apply`](Self::apply).
    pub fn unapply(self, pos: Pos) -> Pos {
        let line = pos.line.saturating_sub(self.line);
        let col = if line == 1 {
            pos.col.saturating_sub(self.col)
        } else {
            pos.col
        };
        Pos::new(line, col)
    }
}

/// Where the parsed text came from. Decides the reported filename and the
/// source text attached to errors.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum SourceOrigin {
    /// A named, line-addressable source.
    File(String),
    /// In-memory text without a filename, reported as `<string>`.
    Text,
    /// The synthetic `(expr)` text of an f-string replacement field.
    FString { filename: String, shift: PosShift },
}

/// Parser context: token buffer plus the session it allocates into.
///
/// One per top-level parse; f-string replacement fields get a child context
/// with its own token buffer borrowing the same session.
pub struct Parser<'a> {
    tokens: TokenBuffer<'a>,
    session: &'a mut ParseSession,
    grammar: &'a dyn Grammar,
    origin: SourceOrigin,
    error: Option<ParseFailure>,
    halted: bool,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(
        source: &'a str,
        origin: SourceOrigin,
        session: &'a mut ParseSession,
        grammar: &'a dyn Grammar,
        keywords: &'a KeywordTable,
    ) -> Self {
        Parser {
            tokens: TokenBuffer::new(source, keywords),
            session,
            grammar,
            origin,
            error: None,
            halted: false,
            depth: 0,
        }
    }

    /// Child context over `source` sharing this parser's session and grammar.
    pub(crate) fn child<'c>(&'c mut self, source: &'c str, shift: PosShift) -> Parser<'c> {
        let origin = SourceOrigin::FString {
            filename: self.filename().to_owned(),
            shift,
        };
        let keywords = self.tokens.keywords();
        Parser::new(source, origin, &mut *self.session, self.grammar, keywords)
    }

    /// Name reported in errors.
    pub fn filename(&self) -> &str {
        match &self.origin {
            SourceOrigin::File(filename) | SourceOrigin::FString { filename, .. } => filename,
            SourceOrigin::Text => "<string>",
        }
    }

    pub fn session(&self) -> &ParseSession {
        &*self.session
    }

    pub fn session_mut(&mut self) -> &mut ParseSession {
        &mut *self.session
    }

    pub fn arena(&self) -> &AstArena {
        &self.session.arena
    }

    pub fn arena_mut(&mut self) -> &mut AstArena {
        &mut self.session.arena
    }

    // Cursor

    #[inline]
    pub fn mark(&self) -> usize {
        self.tokens.mark()
    }

    #[inline]
    pub fn reset(&mut self, mark: usize) {
        self.tokens.reset(mark);
    }

    /// Number of tokens pulled from the tokenizer.
    pub fn fill(&self) -> usize {
        self.tokens.fill()
    }

    /// Token at the cursor. `None` once the parse is halted; a tokenizer error
    /// is raised here and halts it.
    pub fn peek(&mut self) -> Option<Token> {
        if self.halted {
            return None;
        }
        match self.tokens.peek() {
            Ok(token) => Some(token),
            Err(error) => self.raise_lex_error(&error),
        }
    }

    pub fn peek_kind(&mut self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    /// Consume the token at the cursor if it has kind `kind`.
    pub fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        let token = self.peek()?;
        if token.kind != kind {
            return None;
        }
        self.tokens.reset(self.tokens.mark() + 1);
        Some(token)
    }

    /// Consume a reserved keyword.
    pub fn keyword(&mut self, keyword: Keyword) -> Option<Token> {
        self.expect(TokenKind::Keyword(keyword))
    }

    /// Consume a NAME spelled `text` (a soft keyword).
    pub fn keyword_token(&mut self, text: &str) -> Option<Token> {
        let token = self.peek()?;
        if token.kind != TokenKind::Name || self.tokens.text(&token) != text {
            return None;
        }
        self.tokens.reset(self.tokens.mark() + 1);
        Some(token)
    }

    /// Source text of a token.
    pub fn token_text(&self, token: &Token) -> &'a str {
        self.tokens.text(token)
    }

    /// Consume a NAME, returning its interned text and the token.
    pub fn expect_name(&mut self) -> Option<(Name, Token)> {
        let token = self.expect(TokenKind::Name)?;
        let name = self.intern(self.tokens.text(&token));
        Some((name, token))
    }

    /// Consume a NAME as a load-context `Name` expression.
    pub fn name_token(&mut self) -> Option<ExprId> {
        let (id, token) = self.expect_name()?;
        let loc = self.token_location(&token);
        Some(self.alloc_expr(
            ExprKind::Name {
                id,
                ctx: ExprContext::Load,
            },
            loc,
        ))
    }

    /// Consume a NUMBER as a `Constant` expression.
    pub fn number_token(&mut self) -> Option<ExprId> {
        let token = self.expect(TokenKind::Number)?;
        let text = self.tokens.text(&token);
        let Some(number) = literal::parse_number(text) else {
            return self.raise_error_at(
                ErrorCode::E0003,
                format!("invalid number literal '{text}'"),
                token.start,
            );
        };
        let value = number.into_constant(&mut self.session.interner);
        let loc = self.token_location(&token);
        Some(self.alloc_expr(ExprKind::Constant { value, kind: None }, loc))
    }

    pub fn string_token(&mut self) -> Option<Token> {
        self.expect(TokenKind::String)
    }

    // Locations

    pub(crate) fn map_pos(&self, pos: Pos) -> Pos {
        match &self.origin {
            SourceOrigin::FString { shift, .. } => shift.apply(pos),
            SourceOrigin::File(_) | SourceOrigin::Text => pos,
        }
    }

    /// Position in this parser's own text of a mapped node position.
    pub(crate) fn unmap_pos(&self, pos: Pos) -> Pos {
        match &self.origin {
            SourceOrigin::FString { shift, .. } => shift.unapply(pos),
            SourceOrigin::File(_) | SourceOrigin::Text => pos,
        }
    }

    pub fn token_location(&self, token: &Token) -> Location {
        Location::new(self.map_pos(token.start), self.map_pos(token.end))
    }

    /// Location from the token at `start` to the last consumed token that
    /// carries text.
    pub fn location_from(&self, start: usize) -> Location {
        let begin = self.tokens.get(start).map(|token| token.start);
        let end = self.tokens.last_non_whitespace().map(|token| token.end);
        match (begin, end) {
            (Some(begin), Some(end)) => Location::new(self.map_pos(begin), self.map_pos(end)),
            (Some(begin), None) => {
                let begin = self.map_pos(begin);
                Location::new(begin, begin)
            }
            (None, _) => Location::default(),
        }
    }

    // Allocation

    pub fn intern(&mut self, text: &str) -> Name {
        self.session.interner.intern(text)
    }

    pub fn resolve(&self, name: Name) -> &str {
        self.session.interner.lookup(name)
    }

    pub fn alloc_expr(&mut self, kind: ExprKind, loc: Location) -> ExprId {
        self.session.arena.alloc_expr(Expr::new(kind, loc))
    }

    pub fn alloc_stmt(&mut self, kind: StmtKind, loc: Location) -> StmtId {
        self.session.arena.alloc_stmt(Stmt::new(kind, loc))
    }

    pub fn expr_kind(&self, id: ExprId) -> ExprKind {
        *self.session.arena.expr_kind(id)
    }

    pub fn expr_loc(&self, id: ExprId) -> Location {
        self.session.arena.expr_loc(id)
    }

    /// The session's placeholder target.
    pub fn placeholder_name(&mut self) -> ExprId {
        self.session.placeholder_name()
    }

    // Recursion

    /// Run a recursive rule body with the nesting limit enforced and enough
    /// stack for it.
    pub fn nested<T>(&mut self, body: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        if self.halted {
            return None;
        }
        if self.depth >= self.session.options().max_depth {
            return self.raise_syntax_error(ErrorCode::E1005, "too many nested expressions");
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| body(self));
        self.depth -= 1;
        result
    }

    // Entry points

    /// Prime the buffer and run the grammar from `rule`.
    pub fn parse_start(&mut self, rule: StartRule) -> Option<Mod> {
        self.peek()?;
        let grammar = self.grammar;
        grammar.parse(rule, self)
    }

    /// Parse from `rule` to a root, or the error that stopped it.
    ///
    /// When the grammar fails without raising, a generic error is
    /// synthesized at the furthest token read.
    pub fn run(&mut self, rule: StartRule) -> Result<Mod, ParseFailure> {
        let root = self.parse_start(rule);
        if let Some(failure) = self.error.take() {
            return Err(failure);
        }
        if let Some(root) = root {
            return Ok(root);
        }
        self.report_generic_failure();
        Err(self
            .error
            .take()
            .unwrap_or_else(|| ParseFailure::Internal("parse failed without an error".to_owned())))
    }

    fn report_generic_failure(&mut self) {
        let Some(last) = self.tokens.last_filled() else {
            self.raise_error_at::<()>(
                ErrorCode::E1001,
                "error at start before reading any input",
                Pos::new(1, 0),
            );
            return;
        };
        let message = match last.kind {
            TokenKind::Indent => "unexpected indent",
            TokenKind::Dedent => "unexpected unindent",
            _ => "invalid syntax",
        };
        self.raise_error_at::<()>(ErrorCode::E1001, message, last.start);
    }
}
