//! Expression nodes.
//!
//! A closed sum type: every consumer that inspects expression structure
//! (context retagging, target validation, dumping) matches exhaustively.

use super::{BoolOp, CmpOp, Conversion, ExprContext, Operator, UnaryOp};
use crate::{BytesId, ExprId, IdRange, Location, Name};

/// Literal constant value.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Constant {
    None,
    True,
    False,
    Ellipsis,
    Int(i64),
    /// Integer literal outside the `i64` range, kept as its cleaned source text.
    BigInt(Name),
    Float(f64),
    /// Imaginary literal (`1.5j`); the value is the imaginary part.
    Complex(f64),
    Str(Name),
    Bytes(BytesId),
}

/// Keyword argument in a call or class header. `arg` is `None` for `**value`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct KeywordArg {
    pub arg: Option<Name>,
    pub value: ExprId,
    pub loc: Location,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum ExprKind {
    BoolOp {
        op: BoolOp,
        values: IdRange<ExprId>,
    },
    NamedExpr {
        target: ExprId,
        value: ExprId,
    },
    BinOp {
        left: ExprId,
        op: Operator,
        right: ExprId,
    },
    UnaryOp {
        op: UnaryOp,
        operand: ExprId,
    },
    IfExp {
        test: ExprId,
        body: ExprId,
        orelse: ExprId,
    },
    /// `keys` may contain `ExprId::INVALID` for `**mapping` entries.
    Dict {
        keys: IdRange<ExprId>,
        values: IdRange<ExprId>,
    },
    Set {
        elts: IdRange<ExprId>,
    },
    Await {
        value: ExprId,
    },
    Compare {
        left: ExprId,
        ops: IdRange<CmpOp>,
        comparators: IdRange<ExprId>,
    },
    Call {
        func: ExprId,
        args: IdRange<ExprId>,
        keywords: IdRange<KeywordArg>,
    },
    /// One interpolation of an f-string. `format_spec` is `INVALID` when absent.
    FormattedValue {
        value: ExprId,
        conversion: Conversion,
        format_spec: ExprId,
    },
    JoinedStr {
        values: IdRange<ExprId>,
    },
    /// `kind` is `Some("u")` for `u"..."` literals.
    Constant {
        value: Constant,
        kind: Option<Name>,
    },
    Attribute {
        value: ExprId,
        attr: Name,
        ctx: ExprContext,
    },
    Subscript {
        value: ExprId,
        slice: ExprId,
        ctx: ExprContext,
    },
    Starred {
        value: ExprId,
        ctx: ExprContext,
    },
    Name {
        id: Name,
        ctx: ExprContext,
    },
    List {
        elts: IdRange<ExprId>,
        ctx: ExprContext,
    },
    Tuple {
        elts: IdRange<ExprId>,
        ctx: ExprContext,
    },
    /// Bounds are `INVALID` when omitted.
    Slice {
        lower: ExprId,
        upper: ExprId,
        step: ExprId,
    },
}

impl ExprKind {
    /// Node type name as it appears in dumps.
    pub fn type_name(&self) -> &'static str {
        match self {
            ExprKind::BoolOp { .. } => "BoolOp",
            ExprKind::NamedExpr { .. } => "NamedExpr",
            ExprKind::BinOp { .. } => "BinOp",
            ExprKind::UnaryOp { .. } => "UnaryOp",
            ExprKind::IfExp { .. } => "IfExp",
            ExprKind::Dict { .. } => "Dict",
            ExprKind::Set { .. } => "Set",
            ExprKind::Await { .. } => "Await",
            ExprKind::Compare { .. } => "Compare",
            ExprKind::Call { .. } => "Call",
            ExprKind::FormattedValue { .. } => "FormattedValue",
            ExprKind::JoinedStr { .. } => "JoinedStr",
            ExprKind::Constant { .. } => "Constant",
            ExprKind::Attribute { .. } => "Attribute",
            ExprKind::Subscript { .. } => "Subscript",
            ExprKind::Starred { .. } => "Starred",
            ExprKind::Name { .. } => "Name",
            ExprKind::List { .. } => "List",
            ExprKind::Tuple { .. } => "Tuple",
            ExprKind::Slice { .. } => "Slice",
        }
    }
}

/// Expression node: kind plus source location.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub loc: Location,
}

impl Expr {
    #[inline]
    pub const fn new(kind: ExprKind, loc: Location) -> Self {
        Expr { kind, loc }
    }
}
