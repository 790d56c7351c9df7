//! Identifier and import helpers.

use pyrite_ir::ast::{Alias, ExprContext, ExprKind};
use pyrite_ir::{ExprId, Name, Token, TokenKind};

use crate::Parser;

/// Join two `Name` expressions into one `Name` spelled `first.second`.
///
/// Left-nested application spells dotted paths: joining `a.b` with `c`
/// gives `a.b.c`.
pub fn join_dotted(p: &mut Parser<'_>, first: ExprId, second: ExprId) -> Option<ExprId> {
    let (ExprKind::Name { id: head, .. }, ExprKind::Name { id: tail, .. }) =
        (p.expr_kind(first), p.expr_kind(second))
    else {
        return p.raise_internal("dotted name parts must be names");
    };
    let mut dotted = String::with_capacity(p.resolve(head).len() + p.resolve(tail).len() + 1);
    dotted.push_str(p.resolve(head));
    dotted.push('.');
    dotted.push_str(p.resolve(tail));
    let id = p.intern(&dotted);
    let loc = p.expr_loc(first).to(p.expr_loc(second));
    Some(p.alloc_expr(
        ExprKind::Name {
            id,
            ctx: ExprContext::Load,
        },
        loc,
    ))
}

/// Identifiers of a list of `Name` expressions.
pub fn map_names_to_ids(p: &Parser<'_>, names: &[ExprId]) -> Vec<Name> {
    names
        .iter()
        .filter_map(|&expr| match p.expr_kind(expr) {
            ExprKind::Name { id, .. } => Some(id),
            _ => None,
        })
        .collect()
}

/// Relative import level of a run of `.` and `...` tokens.
pub fn count_dots(tokens: &[Token]) -> u32 {
    tokens
        .iter()
        .map(|token| match token.kind {
            TokenKind::Ellipsis => 3,
            TokenKind::Dot => 1,
            _ => 0,
        })
        .sum()
}

/// The alias of `from m import *`.
pub fn alias_for_star(p: &mut Parser<'_>) -> Alias {
    Alias {
        name: p.intern("*"),
        asname: None,
    }
}
