//! Assignment contexts and target validation.
//!
//! Targets are parsed as ordinary expressions, then validated and retagged
//! with a store or delete context. Every function here matches `ExprKind`
//! exhaustively, so a new expression variant has to be classified.

use pyrite_diagnostic::ErrorCode;
use pyrite_ir::ast::{Constant, ExprContext, ExprKind};
use pyrite_ir::{ExprId, IdRange};
use smallvec::SmallVec;

use super::seq_get_head;
use crate::Parser;

/// Which statement a target appears in.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TargetKind {
    /// `=`, `:=`, augmented and annotated assignment.
    Store,
    /// `del`.
    Del,
}

/// Copy of `expr` with its context set to `ctx`.
///
/// Tuples and lists are rebuilt with retagged elements, a starred target
/// with a retagged operand. Expressions that carry no context come back
/// unchanged.
pub fn retag_context(p: &mut Parser<'_>, expr: ExprId, ctx: ExprContext) -> ExprId {
    let loc = p.expr_loc(expr);
    let kind = match p.expr_kind(expr) {
        ExprKind::Name { id, .. } => ExprKind::Name { id, ctx },
        ExprKind::Tuple { elts, .. } => ExprKind::Tuple {
            elts: retag_list(p, elts, ctx),
            ctx,
        },
        ExprKind::List { elts, .. } => ExprKind::List {
            elts: retag_list(p, elts, ctx),
            ctx,
        },
        ExprKind::Subscript { value, slice, .. } => ExprKind::Subscript { value, slice, ctx },
        ExprKind::Attribute { value, attr, .. } => ExprKind::Attribute { value, attr, ctx },
        ExprKind::Starred { value, .. } => ExprKind::Starred {
            value: retag_context(p, value, ctx),
            ctx,
        },
        ExprKind::BoolOp { .. }
        | ExprKind::NamedExpr { .. }
        | ExprKind::BinOp { .. }
        | ExprKind::UnaryOp { .. }
        | ExprKind::IfExp { .. }
        | ExprKind::Dict { .. }
        | ExprKind::Set { .. }
        | ExprKind::Await { .. }
        | ExprKind::Compare { .. }
        | ExprKind::Call { .. }
        | ExprKind::FormattedValue { .. }
        | ExprKind::JoinedStr { .. }
        | ExprKind::Constant { .. }
        | ExprKind::Slice { .. } => return expr,
    };
    p.alloc_expr(kind, loc)
}

fn retag_list(p: &mut Parser<'_>, elts: IdRange<ExprId>, ctx: ExprContext) -> IdRange<ExprId> {
    let items: SmallVec<[ExprId; 8]> = p.arena().expr_list(elts).iter().copied().collect();
    let retagged: SmallVec<[ExprId; 8]> = items
        .into_iter()
        .map(|item| retag_context(p, item, ctx))
        .collect();
    p.arena_mut().alloc_expr_list(retagged)
}

/// The single store target of an annotated assignment.
///
/// A one-element tuple or list unwraps to its element. Any other tuple or
/// list, and any expression that cannot be assigned, records an error and
/// yields the session placeholder so the statement can still be built.
pub fn as_assignment_target(p: &mut Parser<'_>, expr: ExprId) -> ExprId {
    let kind = p.expr_kind(expr);
    match kind {
        ExprKind::Tuple { elts, .. } | ExprKind::List { elts, .. } => {
            if elts.len() == 1 {
                let only = seq_get_head(p.arena().expr_list(elts), expr);
                return as_assignment_target(p, only);
            }
            let message = format!(
                "only a single target (not {}) can be annotated",
                expr_name(&kind)
            );
            p.report_error_at_node(ErrorCode::E1002, message, expr);
            p.placeholder_name()
        }
        ExprKind::Name { .. } | ExprKind::Attribute { .. } | ExprKind::Subscript { .. } => {
            retag_context(p, expr, ExprContext::Store)
        }
        ExprKind::BoolOp { .. }
        | ExprKind::NamedExpr { .. }
        | ExprKind::BinOp { .. }
        | ExprKind::UnaryOp { .. }
        | ExprKind::IfExp { .. }
        | ExprKind::Dict { .. }
        | ExprKind::Set { .. }
        | ExprKind::Await { .. }
        | ExprKind::Compare { .. }
        | ExprKind::Call { .. }
        | ExprKind::FormattedValue { .. }
        | ExprKind::JoinedStr { .. }
        | ExprKind::Constant { .. }
        | ExprKind::Starred { .. }
        | ExprKind::Slice { .. } => {
            p.report_error_at_node(ErrorCode::E1002, "illegal target for annotation", expr);
            p.placeholder_name()
        }
    }
}

/// The first sub-expression of `expr` that cannot be a target of `kind`.
pub fn invalid_target(p: &Parser<'_>, expr: ExprId, kind: TargetKind) -> Option<ExprId> {
    match p.expr_kind(expr) {
        ExprKind::Name { .. } | ExprKind::Attribute { .. } | ExprKind::Subscript { .. } => None,
        ExprKind::Tuple { elts, .. } | ExprKind::List { elts, .. } => p
            .arena()
            .expr_list(elts)
            .iter()
            .find_map(|&item| invalid_target(p, item, kind)),
        ExprKind::Starred { value, .. } => match kind {
            TargetKind::Store => invalid_target(p, value, kind),
            TargetKind::Del => Some(expr),
        },
        ExprKind::BoolOp { .. }
        | ExprKind::NamedExpr { .. }
        | ExprKind::BinOp { .. }
        | ExprKind::UnaryOp { .. }
        | ExprKind::IfExp { .. }
        | ExprKind::Dict { .. }
        | ExprKind::Set { .. }
        | ExprKind::Await { .. }
        | ExprKind::Compare { .. }
        | ExprKind::Call { .. }
        | ExprKind::FormattedValue { .. }
        | ExprKind::JoinedStr { .. }
        | ExprKind::Constant { .. }
        | ExprKind::Slice { .. } => Some(expr),
    }
}

/// Description of an expression used in target error messages.
pub fn expr_name(kind: &ExprKind) -> &'static str {
    match kind {
        ExprKind::Attribute { .. } => "attribute",
        ExprKind::Subscript { .. } => "subscript",
        ExprKind::Starred { .. } => "starred",
        ExprKind::Name { .. } => "name",
        ExprKind::List { .. } => "list",
        ExprKind::Tuple { .. } => "tuple",
        ExprKind::Call { .. } => "function call",
        ExprKind::BoolOp { .. } | ExprKind::BinOp { .. } | ExprKind::UnaryOp { .. } => "operator",
        ExprKind::Await { .. } => "await expression",
        ExprKind::Dict { .. } => "dict display",
        ExprKind::Set { .. } => "set display",
        ExprKind::JoinedStr { .. } | ExprKind::FormattedValue { .. } => "f-string expression",
        ExprKind::Constant { value, .. } => match value {
            Constant::None => "None",
            Constant::True => "True",
            Constant::False => "False",
            Constant::Ellipsis => "Ellipsis",
            Constant::Int(_)
            | Constant::BigInt(_)
            | Constant::Float(_)
            | Constant::Complex(_)
            | Constant::Str(_)
            | Constant::Bytes(_) => "literal",
        },
        ExprKind::Compare { .. } => "comparison",
        ExprKind::IfExp { .. } => "conditional expression",
        ExprKind::NamedExpr { .. } => "named expression",
        ExprKind::Slice { .. } => "slice",
    }
}
