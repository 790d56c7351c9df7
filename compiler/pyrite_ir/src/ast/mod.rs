//! Syntax tree node types.
//!
//! Nodes are flat: children are [`ExprId`](crate::ExprId)/[`StmtId`](crate::StmtId)
//! handles and [`IdRange`](crate::IdRange)s into the [`AstArena`](crate::AstArena).

mod expr;
mod operators;
mod stmt;

pub use expr::{Constant, Expr, ExprKind, KeywordArg};
pub use operators::{BoolOp, CmpOp, Conversion, ExprContext, Operator, UnaryOp};
pub use stmt::{Alias, Arg, Arguments, Mod, Stmt, StmtKind};
