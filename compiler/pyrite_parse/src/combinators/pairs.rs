//! Comparison chains and dict displays.

use pyrite_ir::ast::{CmpOp, ExprKind};
use pyrite_ir::{ExprId, Location};

use crate::Parser;

/// One `op operand` link of a comparison chain.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct CmpopExprPair {
    pub op: CmpOp,
    pub expr: ExprId,
}

pub fn cmpop_expr_pair(op: CmpOp, expr: ExprId) -> CmpopExprPair {
    CmpopExprPair { op, expr }
}

pub fn get_cmpops(pairs: &[CmpopExprPair]) -> Vec<CmpOp> {
    pairs.iter().map(|pair| pair.op).collect()
}

pub fn get_exprs(pairs: &[CmpopExprPair]) -> Vec<ExprId> {
    pairs.iter().map(|pair| pair.expr).collect()
}

/// `left op1 e1 op2 e2 ...` as one `Compare` node.
pub fn compare(p: &mut Parser<'_>, left: ExprId, pairs: &[CmpopExprPair], loc: Location) -> ExprId {
    let arena = p.arena_mut();
    let ops = arena.alloc_cmp_op_list(get_cmpops(pairs));
    let comparators = arena.alloc_expr_list(get_exprs(pairs));
    p.alloc_expr(
        ExprKind::Compare {
            left,
            ops,
            comparators,
        },
        loc,
    )
}

/// One entry of a dict display. `key` is `None` for `**mapping`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct KeyValuePair {
    pub key: Option<ExprId>,
    pub value: ExprId,
}

pub fn key_value_pair(key: Option<ExprId>, value: ExprId) -> KeyValuePair {
    KeyValuePair { key, value }
}

/// Keys in order; `**` entries give `ExprId::INVALID`.
pub fn get_keys(pairs: &[KeyValuePair]) -> Vec<ExprId> {
    pairs
        .iter()
        .map(|pair| pair.key.unwrap_or(ExprId::INVALID))
        .collect()
}

pub fn get_values(pairs: &[KeyValuePair]) -> Vec<ExprId> {
    pairs.iter().map(|pair| pair.value).collect()
}
