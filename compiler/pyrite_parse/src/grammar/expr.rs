//! Expression precedence chain, from `star_expressions` down to `power`.
//!
//! Binary operator rules are written as loops instead of left-recursive
//! alternatives; each iteration wraps the result so far as the left
//! operand, which keeps the operators left-associative.

use pyrite_diagnostic::ErrorCode;
use pyrite_ir::ast::{BoolOp, CmpOp, ExprContext, ExprKind, Operator, UnaryOp};
use pyrite_ir::{ExprId, Keyword, TokenKind};
use smallvec::{smallvec, SmallVec};

use super::keywords as kw;
use super::rules;
use crate::combinators::{
    cmpop_expr_pair, compare, expr_name, prepend, retag_context, CmpopExprPair, MaybeSeq,
};
use crate::Parser;

type Rule<'a, T> = fn(&mut Parser<'a>) -> Option<T>;

fn bitwise_or_op(kind: TokenKind) -> Option<Operator> {
    (kind == TokenKind::VBar).then_some(Operator::BitOr)
}

fn bitwise_xor_op(kind: TokenKind) -> Option<Operator> {
    (kind == TokenKind::Circumflex).then_some(Operator::BitXor)
}

fn bitwise_and_op(kind: TokenKind) -> Option<Operator> {
    (kind == TokenKind::Amper).then_some(Operator::BitAnd)
}

fn shift_op(kind: TokenKind) -> Option<Operator> {
    match kind {
        TokenKind::LeftShift => Some(Operator::LShift),
        TokenKind::RightShift => Some(Operator::RShift),
        _ => None,
    }
}

fn sum_op(kind: TokenKind) -> Option<Operator> {
    match kind {
        TokenKind::Plus => Some(Operator::Add),
        TokenKind::Minus => Some(Operator::Sub),
        _ => None,
    }
}

fn term_op(kind: TokenKind) -> Option<Operator> {
    match kind {
        TokenKind::Star => Some(Operator::Mult),
        TokenKind::Slash => Some(Operator::Div),
        TokenKind::DoubleSlash => Some(Operator::FloorDiv),
        TokenKind::Percent => Some(Operator::Mod),
        TokenKind::At => Some(Operator::MatMult),
        _ => None,
    }
}

impl<'a> Parser<'a> {
    /// `expressions: expression (',' expression)* [',']`
    pub(super) fn expressions(&mut self) -> Option<ExprId> {
        self.comma_tuple(Self::expression)
    }

    /// `star_expressions: star_expression (',' star_expression)* [',']`
    pub(super) fn star_expressions(&mut self) -> Option<ExprId> {
        self.memoized(rules::STAR_EXPRESSIONS, |p| p.comma_tuple(Self::star_expression))
    }

    /// One item, or a load-context tuple when a comma follows it.
    pub(super) fn comma_tuple(&mut self, item: Rule<'a, ExprId>) -> Option<ExprId> {
        let start = self.mark();
        let first = item(self)?;
        if !self.lookahead_kind(true, TokenKind::Comma) {
            return Some(first);
        }
        let mut rest = Vec::new();
        while self.expect(TokenKind::Comma).is_some() {
            let mark = self.mark();
            match item(self) {
                Some(elt) => rest.push(elt),
                None => {
                    self.reset(mark);
                    break;
                }
            }
        }
        let elts = prepend(first, MaybeSeq::from(rest));
        Some(self.tuple_node(elts, start))
    }

    pub(super) fn tuple_node(&mut self, elts: Vec<ExprId>, start: usize) -> ExprId {
        let elts = self.arena_mut().alloc_expr_list(elts);
        let loc = self.location_from(start);
        self.alloc_expr(
            ExprKind::Tuple {
                elts,
                ctx: ExprContext::Load,
            },
            loc,
        )
    }

    /// `star_expression: '*' bitwise_or | expression`
    fn star_expression(&mut self) -> Option<ExprId> {
        self.memoized(rules::STAR_EXPRESSION, |p| {
            if p.lookahead_kind(true, TokenKind::Star) {
                return p.starred(Self::bitwise_or);
            }
            p.expression()
        })
    }

    /// `'*' operand` as a load-context `Starred`.
    pub(super) fn starred(&mut self, operand: Rule<'a, ExprId>) -> Option<ExprId> {
        let start = self.mark();
        self.expect(TokenKind::Star)?;
        let value = operand(self)?;
        let loc = self.location_from(start);
        Some(self.alloc_expr(
            ExprKind::Starred {
                value,
                ctx: ExprContext::Load,
            },
            loc,
        ))
    }

    /// `star_named_expression: '*' bitwise_or | named_expression`
    pub(super) fn star_named_expression(&mut self) -> Option<ExprId> {
        if self.lookahead_kind(true, TokenKind::Star) {
            return self.starred(Self::bitwise_or);
        }
        self.named_expression()
    }

    /// `star_named_expressions: ','.star_named_expression+ [',']`
    pub(super) fn star_named_expressions(&mut self) -> Option<Vec<ExprId>> {
        let first = self.star_named_expression()?;
        let mut rest = Vec::new();
        while self.expect(TokenKind::Comma).is_some() {
            let mark = self.mark();
            match self.star_named_expression() {
                Some(item) => rest.push(item),
                None => {
                    self.reset(mark);
                    break;
                }
            }
        }
        Some(prepend(first, MaybeSeq::from(rest)))
    }

    /// `named_expression: NAME ':=' expression | expression !':='`
    pub(super) fn named_expression(&mut self) -> Option<ExprId> {
        let start = self.mark();
        let walrus = self.lookahead(true, |p| {
            p.expect(TokenKind::Name)?;
            p.expect(TokenKind::ColonEqual)
        });
        if walrus {
            let name = self.name_token()?;
            self.expect(TokenKind::ColonEqual)?;
            let target = retag_context(self, name, ExprContext::Store);
            let value = self.expression()?;
            let loc = self.location_from(start);
            return Some(self.alloc_expr(ExprKind::NamedExpr { target, value }, loc));
        }
        let expr = self.expression()?;
        if self.lookahead_kind(true, TokenKind::ColonEqual) {
            let message = format!(
                "cannot use assignment expressions with {}",
                expr_name(&self.expr_kind(expr))
            );
            return self.raise_error_at_node(ErrorCode::E1001, message, expr);
        }
        Some(expr)
    }

    /// `expression: disjunction 'if' disjunction 'else' expression | disjunction`
    pub(super) fn expression(&mut self) -> Option<ExprId> {
        self.memoized(rules::EXPRESSION, |p| p.nested(Self::conditional))
    }

    fn conditional(&mut self) -> Option<ExprId> {
        let start = self.mark();
        let body = self.disjunction()?;
        let mark = self.mark();
        if self.keyword(kw::IF).is_some() {
            if let Some(test) = self.disjunction() {
                if self.keyword(kw::ELSE).is_some() {
                    if let Some(orelse) = self.expression() {
                        let loc = self.location_from(start);
                        return Some(self.alloc_expr(ExprKind::IfExp { test, body, orelse }, loc));
                    }
                }
            }
        }
        self.reset(mark);
        Some(body)
    }

    /// `disjunction: conjunction ('or' conjunction)+ | conjunction`
    fn disjunction(&mut self) -> Option<ExprId> {
        self.memoized(rules::DISJUNCTION, |p| {
            p.bool_chain(kw::OR, BoolOp::Or, Self::conjunction)
        })
    }

    /// `conjunction: inversion ('and' inversion)+ | inversion`
    fn conjunction(&mut self) -> Option<ExprId> {
        self.memoized(rules::CONJUNCTION, |p| {
            p.bool_chain(kw::AND, BoolOp::And, Self::inversion)
        })
    }

    fn bool_chain(
        &mut self,
        keyword: Keyword,
        op: BoolOp,
        operand: Rule<'a, ExprId>,
    ) -> Option<ExprId> {
        let start = self.mark();
        let first = operand(self)?;
        let mut values: SmallVec<[ExprId; 4]> = smallvec![first];
        loop {
            let mark = self.mark();
            if self.keyword(keyword).is_none() {
                break;
            }
            match operand(self) {
                Some(value) => values.push(value),
                None => {
                    self.reset(mark);
                    break;
                }
            }
        }
        if values.len() == 1 {
            return Some(first);
        }
        let values = self.arena_mut().alloc_expr_list(values);
        let loc = self.location_from(start);
        Some(self.alloc_expr(ExprKind::BoolOp { op, values }, loc))
    }

    /// `inversion: 'not' inversion | comparison`
    fn inversion(&mut self) -> Option<ExprId> {
        self.memoized(rules::INVERSION, |p| {
            p.nested(|p| {
                let start = p.mark();
                if p.keyword(kw::NOT).is_none() {
                    return p.comparison();
                }
                let operand = p.inversion()?;
                let loc = p.location_from(start);
                Some(p.alloc_expr(
                    ExprKind::UnaryOp {
                        op: UnaryOp::Not,
                        operand,
                    },
                    loc,
                ))
            })
        })
    }

    /// `comparison: bitwise_or compare_op_bitwise_or_pair+ | bitwise_or`
    fn comparison(&mut self) -> Option<ExprId> {
        let start = self.mark();
        let left = self.bitwise_or()?;
        let mut pairs: SmallVec<[CmpopExprPair; 2]> = SmallVec::new();
        loop {
            let mark = self.mark();
            let Some(op) = self.compare_op() else {
                self.reset(mark);
                break;
            };
            match self.bitwise_or() {
                Some(right) => pairs.push(cmpop_expr_pair(op, right)),
                None => {
                    self.reset(mark);
                    break;
                }
            }
        }
        if pairs.is_empty() {
            return Some(left);
        }
        let loc = self.location_from(start);
        Some(compare(self, left, &pairs, loc))
    }

    fn compare_op(&mut self) -> Option<CmpOp> {
        let token = self.peek()?;
        let op = match token.kind {
            TokenKind::EqEqual => CmpOp::Eq,
            TokenKind::NotEqual => CmpOp::NotEq,
            TokenKind::LessEqual => CmpOp::LtE,
            TokenKind::Less => CmpOp::Lt,
            TokenKind::GreaterEqual => CmpOp::GtE,
            TokenKind::Greater => CmpOp::Gt,
            TokenKind::Keyword(kw::IN) => CmpOp::In,
            TokenKind::Keyword(kw::NOT) => {
                self.keyword(kw::NOT)?;
                self.keyword(kw::IN)?;
                return Some(CmpOp::NotIn);
            }
            TokenKind::Keyword(kw::IS) => {
                self.keyword(kw::IS)?;
                if self.keyword(kw::NOT).is_some() {
                    return Some(CmpOp::IsNot);
                }
                return Some(CmpOp::Is);
            }
            _ => return None,
        };
        self.expect(token.kind)?;
        Some(op)
    }

    /// `bitwise_or: bitwise_or '|' bitwise_xor | bitwise_xor`
    pub(super) fn bitwise_or(&mut self) -> Option<ExprId> {
        self.memoized(rules::BITWISE_OR, |p| {
            p.binary_chain(Self::bitwise_xor, bitwise_or_op)
        })
    }

    fn bitwise_xor(&mut self) -> Option<ExprId> {
        self.binary_chain(Self::bitwise_and, bitwise_xor_op)
    }

    fn bitwise_and(&mut self) -> Option<ExprId> {
        self.binary_chain(Self::shift_expr, bitwise_and_op)
    }

    fn shift_expr(&mut self) -> Option<ExprId> {
        self.binary_chain(Self::sum, shift_op)
    }

    fn sum(&mut self) -> Option<ExprId> {
        self.binary_chain(Self::term, sum_op)
    }

    fn term(&mut self) -> Option<ExprId> {
        self.binary_chain(Self::factor, term_op)
    }

    /// `operand (op operand)*`, folded left.
    fn binary_chain(
        &mut self,
        operand: Rule<'a, ExprId>,
        operator: fn(TokenKind) -> Option<Operator>,
    ) -> Option<ExprId> {
        let start = self.mark();
        let mut left = operand(self)?;
        loop {
            let mark = self.mark();
            let Some(token) = self.peek() else {
                break;
            };
            let Some(op) = operator(token.kind) else {
                break;
            };
            self.expect(token.kind)?;
            let Some(right) = operand(self) else {
                self.reset(mark);
                break;
            };
            let loc = self.location_from(start);
            left = self.alloc_expr(ExprKind::BinOp { left, op, right }, loc);
        }
        Some(left)
    }

    /// `factor: '+' factor | '-' factor | '~' factor | power`
    fn factor(&mut self) -> Option<ExprId> {
        self.memoized(rules::FACTOR, |p| {
            p.nested(|p| {
                let start = p.mark();
                let token = p.peek()?;
                let op = match token.kind {
                    TokenKind::Plus => UnaryOp::UAdd,
                    TokenKind::Minus => UnaryOp::USub,
                    TokenKind::Tilde => UnaryOp::Invert,
                    _ => return p.power(),
                };
                p.expect(token.kind)?;
                let operand = p.factor()?;
                let loc = p.location_from(start);
                Some(p.alloc_expr(ExprKind::UnaryOp { op, operand }, loc))
            })
        })
    }

    /// `power: await_primary '**' factor | await_primary`
    fn power(&mut self) -> Option<ExprId> {
        let start = self.mark();
        let left = self.await_primary()?;
        let mark = self.mark();
        if self.expect(TokenKind::DoubleStar).is_some() {
            if let Some(right) = self.factor() {
                let loc = self.location_from(start);
                return Some(self.alloc_expr(
                    ExprKind::BinOp {
                        left,
                        op: Operator::Pow,
                        right,
                    },
                    loc,
                ));
            }
        }
        self.reset(mark);
        Some(left)
    }

    /// `await_primary: AWAIT primary | primary`
    fn await_primary(&mut self) -> Option<ExprId> {
        self.memoized(rules::AWAIT_PRIMARY, |p| {
            let start = p.mark();
            if p.keyword(kw::AWAIT).is_none() {
                return p.primary();
            }
            let value = p.primary()?;
            let loc = p.location_from(start);
            Some(p.alloc_expr(ExprKind::Await { value }, loc))
        })
    }
}
