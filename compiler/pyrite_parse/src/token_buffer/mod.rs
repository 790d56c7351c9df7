//! Lazily filled, backtrackable token cache.
//!
//! Tokens are pulled from the tokenizer only when the cursor reaches the fill
//! level, and are never evicted: a rule that backtracks replays them from the
//! buffer. Each slot also carries the memo entries of rules that started at
//! that token (see [`crate::memo`]).

#[cfg(test)]
mod tests;

use pyrite_diagnostic::LineOffsetTable;
use pyrite_ir::{Token, TokenKind};
use pyrite_lexer::{LexError, Tokenizer};
use smallvec::SmallVec;
use tracing::trace;

use crate::memo::MemoEntry;
use crate::KeywordTable;

const INITIAL_CAPACITY: usize = 64;

/// One buffered token plus the memo entries recorded at its position.
#[derive(Debug)]
pub(crate) struct Slot {
    pub(crate) token: Token,
    pub(crate) memo: SmallVec<[MemoEntry; 2]>,
}

pub struct TokenBuffer<'a> {
    tokenizer: Tokenizer<'a>,
    keywords: &'a KeywordTable,
    slots: Vec<Slot>,
    /// Index of the next token to consume.
    mark: usize,
}

impl<'a> TokenBuffer<'a> {
    pub fn new(source: &'a str, keywords: &'a KeywordTable) -> Self {
        TokenBuffer {
            tokenizer: Tokenizer::new(source),
            keywords,
            slots: Vec::with_capacity(INITIAL_CAPACITY),
            mark: 0,
        }
    }

    pub fn source(&self) -> &'a str {
        self.tokenizer.source()
    }

    pub fn lines(&self) -> &LineOffsetTable {
        self.tokenizer.lines()
    }

    pub fn keywords(&self) -> &'a KeywordTable {
        self.keywords
    }

    #[inline]
    pub fn mark(&self) -> usize {
        self.mark
    }

    #[inline]
    pub fn reset(&mut self, mark: usize) {
        debug_assert!(mark <= self.slots.len(), "reset past fill level");
        self.mark = mark;
    }

    /// Number of tokens pulled from the tokenizer so far.
    #[inline]
    pub fn fill(&self) -> usize {
        self.slots.len()
    }

    /// Source text of a token.
    pub fn text(&self, token: &Token) -> &'a str {
        self.source().get(token.span.to_range()).unwrap_or("")
    }

    /// Token at the cursor, pulling one from the tokenizer if needed.
    pub fn peek(&mut self) -> Result<Token, LexError> {
        if self.mark == self.slots.len() {
            self.fill_token()?;
        }
        Ok(self.slots[self.mark].token)
    }

    /// Consume the token at the cursor.
    pub fn advance(&mut self) -> Result<Token, LexError> {
        let token = self.peek()?;
        self.mark += 1;
        Ok(token)
    }

    pub fn get(&self, index: usize) -> Option<Token> {
        self.slots.get(index).map(|slot| slot.token)
    }

    /// The furthest token read from the tokenizer.
    pub fn last_filled(&self) -> Option<Token> {
        self.slots.last().map(|slot| slot.token)
    }

    /// The last consumed token that carries source text.
    pub fn last_non_whitespace(&self) -> Option<Token> {
        self.slots[..self.mark]
            .iter()
            .rev()
            .map(|slot| slot.token)
            .find(|token| !token.kind.is_whitespace())
    }

    pub(crate) fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut Slot> {
        self.slots.get_mut(index)
    }

    fn fill_token(&mut self) -> Result<(), LexError> {
        let mut token = self.tokenizer.next_token()?;
        if token.kind == TokenKind::Name {
            if let Some(keyword) = self.keywords.lookup(self.text(&token)) {
                token.kind = TokenKind::Keyword(keyword);
            }
        }
        if self.slots.len() == self.slots.capacity() {
            let grow = self.slots.capacity().max(INITIAL_CAPACITY);
            self.slots.reserve_exact(grow);
        }
        trace!(
            index = self.slots.len(),
            kind = token.kind.display_name(),
            pos = ?token.start,
            "fill"
        );
        self.slots.push(Slot {
            token,
            memo: SmallVec::new(),
        });
        Ok(())
    }
}
