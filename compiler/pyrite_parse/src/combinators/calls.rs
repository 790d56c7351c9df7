//! Call arguments, augmented assignment and decorated definitions.

use pyrite_ir::ast::{KeywordArg, Operator, StmtKind};
use pyrite_ir::{ExprId, StmtId, TokenKind};

use crate::Parser;

/// An item of the keyword section of a call: `name=value`, `**value` or
/// a `*value` that followed a keyword.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum KeywordOrStarred {
    Keyword(KeywordArg),
    Starred(ExprId),
}

impl KeywordOrStarred {
    pub fn is_keyword(&self) -> bool {
        matches!(self, KeywordOrStarred::Keyword(_))
    }
}

/// The starred items, or `None` if there are none.
pub fn extract_starred_exprs(items: &[KeywordOrStarred]) -> Option<Vec<ExprId>> {
    let starred: Vec<ExprId> = items
        .iter()
        .filter_map(|item| match item {
            KeywordOrStarred::Starred(expr) => Some(*expr),
            KeywordOrStarred::Keyword(_) => None,
        })
        .collect();
    (!starred.is_empty()).then_some(starred)
}

/// The keyword items, or `None` if there are none.
pub fn delete_starred_exprs(items: &[KeywordOrStarred]) -> Option<Vec<KeywordArg>> {
    let keywords: Vec<KeywordArg> = items
        .iter()
        .filter_map(|item| match item {
            KeywordOrStarred::Keyword(keyword) => Some(*keyword),
            KeywordOrStarred::Starred(_) => None,
        })
        .collect();
    (!keywords.is_empty()).then_some(keywords)
}

/// Operator of an augmented assignment token.
pub fn augoperator(kind: TokenKind) -> Option<Operator> {
    let op = match kind {
        TokenKind::PlusEqual => Operator::Add,
        TokenKind::MinEqual => Operator::Sub,
        TokenKind::StarEqual => Operator::Mult,
        TokenKind::AtEqual => Operator::MatMult,
        TokenKind::SlashEqual => Operator::Div,
        TokenKind::PercentEqual => Operator::Mod,
        TokenKind::AmperEqual => Operator::BitAnd,
        TokenKind::VBarEqual => Operator::BitOr,
        TokenKind::CircumflexEqual => Operator::BitXor,
        TokenKind::LeftShiftEqual => Operator::LShift,
        TokenKind::RightShiftEqual => Operator::RShift,
        TokenKind::DoubleStarEqual => Operator::Pow,
        TokenKind::DoubleSlashEqual => Operator::FloorDiv,
        _ => return None,
    };
    Some(op)
}

/// Copy of the `FunctionDef` `def` with `decorators` attached.
pub fn function_def_decorators(
    p: &mut Parser<'_>,
    decorators: &[ExprId],
    def: StmtId,
) -> Option<StmtId> {
    let stmt = *p.arena().stmt(def);
    let StmtKind::FunctionDef {
        name,
        args,
        body,
        returns,
        ..
    } = stmt.kind
    else {
        return p.raise_internal("decorators applied to a non-function statement");
    };
    let decorators = p.arena_mut().alloc_expr_list(decorators.iter().copied());
    Some(p.alloc_stmt(
        StmtKind::FunctionDef {
            name,
            args,
            body,
            decorators,
            returns,
        },
        stmt.loc,
    ))
}

/// Copy of the `ClassDef` `def` with `decorators` attached.
pub fn class_def_decorators(
    p: &mut Parser<'_>,
    decorators: &[ExprId],
    def: StmtId,
) -> Option<StmtId> {
    let stmt = *p.arena().stmt(def);
    let StmtKind::ClassDef {
        name,
        bases,
        keywords,
        body,
        ..
    } = stmt.kind
    else {
        return p.raise_internal("decorators applied to a non-class statement");
    };
    let decorators = p.arena_mut().alloc_expr_list(decorators.iter().copied());
    Some(p.alloc_stmt(
        StmtKind::ClassDef {
            name,
            bases,
            keywords,
            body,
            decorators,
        },
        stmt.loc,
    ))
}
