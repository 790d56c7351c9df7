//! Packrat memoization.
//!
//! Results are cached per (token position, rule) on the token buffer slot
//! where the rule started, failures included. A rule that is retried at the
//! same position after backtracking jumps straight to the recorded end.
//!
//! Left-recursive rules are not supported: a rule that needs its own
//! unfinished result at the same position recurses without bound.

use pyrite_ir::{ExprId, IdRange, StmtId, Token};
use tracing::trace;

use crate::Parser;

/// Identifier of a memoized rule.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct RuleId(pub u16);

/// A cached rule result.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum MemoValue {
    Expr(ExprId),
    Stmt(StmtId),
    Stmts(IdRange<StmtId>),
    Token(Token),
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub(crate) struct MemoEntry {
    rule: RuleId,
    /// `None` records a failure.
    value: Option<MemoValue>,
    end: usize,
}

/// Rule results that can be cached.
pub trait Memoize: Copy {
    fn into_memo(self) -> MemoValue;
    fn from_memo(value: MemoValue) -> Option<Self>;
}

impl Memoize for ExprId {
    fn into_memo(self) -> MemoValue {
        MemoValue::Expr(self)
    }

    fn from_memo(value: MemoValue) -> Option<Self> {
        match value {
            MemoValue::Expr(id) => Some(id),
            MemoValue::Stmt(_) | MemoValue::Stmts(_) | MemoValue::Token(_) => None,
        }
    }
}

impl Memoize for StmtId {
    fn into_memo(self) -> MemoValue {
        MemoValue::Stmt(self)
    }

    fn from_memo(value: MemoValue) -> Option<Self> {
        match value {
            MemoValue::Stmt(id) => Some(id),
            MemoValue::Expr(_) | MemoValue::Stmts(_) | MemoValue::Token(_) => None,
        }
    }
}

impl Memoize for IdRange<StmtId> {
    fn into_memo(self) -> MemoValue {
        MemoValue::Stmts(self)
    }

    fn from_memo(value: MemoValue) -> Option<Self> {
        match value {
            MemoValue::Stmts(range) => Some(range),
            MemoValue::Expr(_) | MemoValue::Stmt(_) | MemoValue::Token(_) => None,
        }
    }
}

impl Memoize for Token {
    fn into_memo(self) -> MemoValue {
        MemoValue::Token(self)
    }

    fn from_memo(value: MemoValue) -> Option<Self> {
        match value {
            MemoValue::Token(token) => Some(token),
            MemoValue::Expr(_) | MemoValue::Stmt(_) | MemoValue::Stmts(_) => None,
        }
    }
}

impl Parser<'_> {
    /// Look up `rule` at the cursor.
    ///
    /// On a hit the cursor moves to the recorded end and the cached result is
    /// returned (`Some(None)` for a cached failure). On a miss the cursor is
    /// untouched.
    pub fn memo_lookup<T: Memoize>(&mut self, rule: RuleId) -> Option<Option<T>> {
        let start = self.tokens.mark();
        let entry = self
            .tokens
            .slot(start)?
            .memo
            .iter()
            .find(|entry| entry.rule == rule)
            .copied()?;
        trace!(rule = rule.0, start, end = entry.end, hit = entry.value.is_some(), "memo hit");
        self.tokens.reset(entry.end);
        Some(entry.value.and_then(T::from_memo))
    }

    /// Record the result of `rule` started at `start`, ending at the cursor.
    ///
    /// A second record for the same position and rule updates in place.
    pub fn memo_record<T: Memoize>(&mut self, start: usize, rule: RuleId, value: Option<T>) {
        let end = self.tokens.mark();
        let value = value.map(Memoize::into_memo);
        let Some(slot) = self.tokens.slot_mut(start) else {
            return;
        };
        if let Some(entry) = slot.memo.iter_mut().find(|entry| entry.rule == rule) {
            entry.value = value;
            entry.end = end;
        } else {
            slot.memo.push(MemoEntry { rule, value, end });
        }
    }

    /// Run `body` as the memoized rule `rule`.
    ///
    /// A failed body leaves the cursor at `start`, so a cached failure never
    /// moves it.
    pub fn memoized<T: Memoize>(
        &mut self,
        rule: RuleId,
        body: impl FnOnce(&mut Self) -> Option<T>,
    ) -> Option<T> {
        if let Some(cached) = self.memo_lookup(rule) {
            return cached;
        }
        let start = self.mark();
        trace!(rule = rule.0, start, "memo miss");
        let result = body(self);
        if self.halted {
            return None;
        }
        if result.is_none() {
            self.reset(start);
        }
        self.memo_record(start, rule, result);
        result
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use std::cell::Cell;

    use pretty_assertions::assert_eq;
    use pyrite_ir::TokenKind;

    use super::*;
    use crate::tests::with_parser;

    const PAIR: RuleId = RuleId(1);

    /// NAME '=' NUMBER, returning the NUMBER token.
    fn pair(p: &mut Parser<'_>, calls: &Cell<u32>) -> Option<Token> {
        p.memoized(PAIR, |p| {
            calls.set(calls.get() + 1);
            let start = p.mark();
            let result = (|| {
                p.expect(TokenKind::Name)?;
                p.expect(TokenKind::Equal)?;
                p.expect(TokenKind::Number)
            })();
            if result.is_none() {
                p.reset(start);
            }
            result
        })
    }

    #[test]
    fn test_retry_hits_memo_without_refill() {
        with_parser("x = 1 ;\n", |p| {
            let calls = Cell::new(0);
            let start = p.mark();
            let first = pair(p, &calls);
            let end = p.mark();
            let fill = p.tokens.fill();

            p.reset(start);
            let second = pair(p, &calls);
            assert_eq!(first, second);
            assert_eq!(p.mark(), end);
            assert_eq!(p.tokens.fill(), fill);
            assert_eq!(calls.get(), 1);
        });
    }

    #[test]
    fn test_failure_is_cached() {
        with_parser("x + 1\n", |p| {
            let calls = Cell::new(0);
            let start = p.mark();
            assert_eq!(pair(p, &calls), None);
            assert_eq!(p.mark(), start);
            assert_eq!(pair(p, &calls), None);
            assert_eq!(p.mark(), start);
            assert_eq!(calls.get(), 1);
        });
    }

    #[test]
    fn test_record_updates_in_place() {
        with_parser("a b\n", |p| {
            let start = p.mark();
            p.expect(TokenKind::Name).unwrap();
            p.memo_record::<Token>(start, PAIR, None);
            let b = p.expect(TokenKind::Name).unwrap();
            p.memo_record(start, PAIR, Some(b));
            assert_eq!(p.tokens.slot(start).unwrap().memo.len(), 1);

            p.reset(start);
            let cached: Option<Option<Token>> = p.memo_lookup(PAIR);
            assert_eq!(cached, Some(Some(b)));
            assert_eq!(p.mark(), start + 2);
        });
    }

    #[test]
    fn test_lookup_miss_leaves_cursor() {
        with_parser("a\n", |p| {
            let start = p.mark();
            let cached: Option<Option<ExprId>> = p.memo_lookup(PAIR);
            assert_eq!(cached, None);
            assert_eq!(p.mark(), start);
        });
    }
}
