//! Non-consuming predicates (`&rule` and `!rule`).
//!
//! The cursor is always restored. Nodes allocated by the probed rule stay in
//! the arena; they are unreachable and dropped with it.

use pyrite_ir::TokenKind;
use tracing::trace;

use crate::Parser;

impl Parser<'_> {
    /// Whether `rule` succeeding at the cursor equals `positive`.
    pub fn lookahead<T>(&mut self, positive: bool, rule: impl FnOnce(&mut Self) -> Option<T>) -> bool {
        let mark = self.mark();
        let matched = rule(self).is_some();
        self.reset(mark);
        trace!(mark, positive, matched, "lookahead");
        matched == positive
    }

    /// Lookahead on a single token kind.
    pub fn lookahead_kind(&mut self, positive: bool, kind: TokenKind) -> bool {
        self.lookahead(positive, |p| p.expect(kind))
    }

    /// Lookahead on a soft keyword.
    pub fn lookahead_keyword(&mut self, positive: bool, text: &str) -> bool {
        self.lookahead(positive, |p| p.keyword_token(text))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use pretty_assertions::assert_eq;
    use pyrite_ir::TokenKind;

    use crate::tests::with_parser;

    #[test]
    fn test_positive_and_negative() {
        with_parser("x = 1\n", |p| {
            assert!(p.lookahead_kind(true, TokenKind::Name));
            assert!(!p.lookahead_kind(false, TokenKind::Name));
            assert!(p.lookahead_kind(false, TokenKind::Number));
            assert_eq!(p.mark(), 0);
        });
    }

    #[test]
    fn test_cursor_restored_after_consuming_rule() {
        with_parser("a b c d\n", |p| {
            p.expect(TokenKind::Name).unwrap();
            let before = p.mark();
            let matched = p.lookahead(true, |p| {
                p.expect(TokenKind::Name)?;
                p.expect(TokenKind::Name)?;
                p.expect(TokenKind::Number)
            });
            assert!(!matched);
            assert_eq!(p.mark(), before);

            let matched = p.lookahead(true, |p| {
                p.expect(TokenKind::Name)?;
                p.expect(TokenKind::Name)
            });
            assert!(matched);
            assert_eq!(p.mark(), before);
        });
    }

    #[test]
    fn test_soft_keyword_lookahead() {
        with_parser("match x\n", |p| {
            assert!(p.lookahead_keyword(true, "match"));
            assert!(p.lookahead_keyword(false, "case"));
            assert_eq!(p.mark(), 0);
        });
    }
}
