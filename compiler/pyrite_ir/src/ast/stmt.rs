//! Statement nodes, parameters and module roots.

use super::{KeywordArg, Operator};
use crate::{ArgId, ArgumentsId, ExprId, IdRange, Location, Name, StmtId};

/// A single parameter: name plus optional annotation (`INVALID` when absent).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Arg {
    pub arg: Name,
    pub annotation: ExprId,
    pub loc: Location,
}

/// Canonical parameter list of a function.
///
/// Every sequence is present (possibly empty). `defaults` covers the trailing
/// names of `posonlyargs ++ args`; `kw_defaults` is parallel to `kwonlyargs`
/// with `INVALID` for keyword-only parameters without a default.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Arguments {
    pub posonlyargs: IdRange<ArgId>,
    pub args: IdRange<ArgId>,
    pub vararg: ArgId,
    pub kwonlyargs: IdRange<ArgId>,
    pub kw_defaults: IdRange<ExprId>,
    pub kwarg: ArgId,
    pub defaults: IdRange<ExprId>,
}

/// `name [as asname]` in an import statement. `name` may be dotted.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Alias {
    pub name: Name,
    pub asname: Option<Name>,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum StmtKind {
    FunctionDef {
        name: Name,
        args: ArgumentsId,
        body: IdRange<StmtId>,
        decorators: IdRange<ExprId>,
        returns: ExprId,
    },
    ClassDef {
        name: Name,
        bases: IdRange<ExprId>,
        keywords: IdRange<KeywordArg>,
        body: IdRange<StmtId>,
        decorators: IdRange<ExprId>,
    },
    Return {
        value: ExprId,
    },
    Delete {
        targets: IdRange<ExprId>,
    },
    Assign {
        targets: IdRange<ExprId>,
        value: ExprId,
    },
    AugAssign {
        target: ExprId,
        op: Operator,
        value: ExprId,
    },
    /// `simple` is true when the target is a bare, unparenthesized name.
    AnnAssign {
        target: ExprId,
        annotation: ExprId,
        value: ExprId,
        simple: bool,
    },
    While {
        test: ExprId,
        body: IdRange<StmtId>,
        orelse: IdRange<StmtId>,
    },
    If {
        test: ExprId,
        body: IdRange<StmtId>,
        orelse: IdRange<StmtId>,
    },
    Import {
        names: IdRange<Alias>,
    },
    ImportFrom {
        module: Option<Name>,
        names: IdRange<Alias>,
        level: u32,
    },
    Global {
        names: IdRange<Name>,
    },
    Nonlocal {
        names: IdRange<Name>,
    },
    Expr {
        value: ExprId,
    },
    Pass,
    Break,
    Continue,
}

impl StmtKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            StmtKind::FunctionDef { .. } => "FunctionDef",
            StmtKind::ClassDef { .. } => "ClassDef",
            StmtKind::Return { .. } => "Return",
            StmtKind::Delete { .. } => "Delete",
            StmtKind::Assign { .. } => "Assign",
            StmtKind::AugAssign { .. } => "AugAssign",
            StmtKind::AnnAssign { .. } => "AnnAssign",
            StmtKind::While { .. } => "While",
            StmtKind::If { .. } => "If",
            StmtKind::Import { .. } => "Import",
            StmtKind::ImportFrom { .. } => "ImportFrom",
            StmtKind::Global { .. } => "Global",
            StmtKind::Nonlocal { .. } => "Nonlocal",
            StmtKind::Expr { .. } => "Expr",
            StmtKind::Pass => "Pass",
            StmtKind::Break => "Break",
            StmtKind::Continue => "Continue",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub loc: Location,
}

impl Stmt {
    #[inline]
    pub const fn new(kind: StmtKind, loc: Location) -> Self {
        Stmt { kind, loc }
    }
}

/// Root of a parse, one variant per start rule shape.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Mod {
    Module { body: IdRange<StmtId> },
    Interactive { body: IdRange<StmtId> },
    Expression { body: ExprId },
}
