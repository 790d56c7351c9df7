//! Arena owning every node of one parse.
//!
//! Struct-of-arrays layout: expression kinds and locations live in parallel
//! vectors indexed by [`ExprId`]; child sequences are flattened into side
//! tables addressed by [`IdRange`]. Nothing is freed individually: the arena
//! is dropped as a whole once the parse result is no longer needed.

use crate::ast::{Alias, Arg, Arguments, CmpOp, Expr, ExprKind, KeywordArg, Stmt, StmtKind};
use crate::{ArgId, ArgumentsId, BytesId, ExprId, IdRange, Location, Name, StmtId};

/// Convert a table length to a `u32` index.
///
/// # Panics
/// Panics if the table holds more than `u32::MAX` items.
#[inline]
pub(crate) fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("arena overflow: too many {what}"))
}

fn push_list<T: Copy>(table: &mut Vec<T>, items: impl IntoIterator<Item = T>) -> IdRange<T> {
    let start = table.len();
    table.extend(items);
    let len = table.len() - start;
    IdRange::new(to_u32(start, "list items"), to_u32(len, "list items"))
}

fn get_list<T>(table: &[T], range: IdRange<T>) -> &[T] {
    &table[range.to_range()]
}

#[derive(Clone, Debug, Default)]
pub struct AstArena {
    /// Expression kinds (parallel with `expr_locs`).
    expr_kinds: Vec<ExprKind>,
    /// Expression locations (parallel with `expr_kinds`).
    expr_locs: Vec<Location>,
    stmts: Vec<Stmt>,
    args: Vec<Arg>,
    arguments: Vec<Arguments>,
    bytes: Vec<Box<[u8]>>,
    expr_lists: Vec<ExprId>,
    stmt_lists: Vec<StmtId>,
    arg_lists: Vec<ArgId>,
    keyword_lists: Vec<KeywordArg>,
    alias_lists: Vec<Alias>,
    cmp_op_lists: Vec<CmpOp>,
    name_lists: Vec<Name>,
}

impl AstArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arena pre-allocated for a source of the given length.
    ///
    /// Heuristic: ~1 expression per 8 bytes of source.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated = source_len / 8;
        AstArena {
            expr_kinds: Vec::with_capacity(estimated),
            expr_locs: Vec::with_capacity(estimated),
            expr_lists: Vec::with_capacity(estimated / 2),
            ..Self::default()
        }
    }

    // Expressions

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.expr_kinds.len(), "expressions"));
        self.expr_kinds.push(expr.kind);
        self.expr_locs.push(expr.loc);
        id
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> Expr {
        Expr::new(self.expr_kinds[id.index()], self.expr_locs[id.index()])
    }

    #[inline]
    pub fn expr_kind(&self, id: ExprId) -> &ExprKind {
        &self.expr_kinds[id.index()]
    }

    #[inline]
    pub fn expr_loc(&self, id: ExprId) -> Location {
        self.expr_locs[id.index()]
    }

    pub fn expr_count(&self) -> usize {
        self.expr_kinds.len()
    }

    // Statements

    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(to_u32(self.stmts.len(), "statements"));
        self.stmts.push(stmt);
        id
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    #[inline]
    pub fn stmt_kind(&self, id: StmtId) -> &StmtKind {
        &self.stmts[id.index()].kind
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    // Parameters

    pub fn alloc_arg(&mut self, arg: Arg) -> ArgId {
        let id = ArgId::new(to_u32(self.args.len(), "parameters"));
        self.args.push(arg);
        id
    }

    #[inline]
    pub fn arg(&self, id: ArgId) -> &Arg {
        &self.args[id.index()]
    }

    pub fn alloc_arguments(&mut self, arguments: Arguments) -> ArgumentsId {
        let id = ArgumentsId::new(to_u32(self.arguments.len(), "parameter lists"));
        self.arguments.push(arguments);
        id
    }

    #[inline]
    pub fn arguments(&self, id: ArgumentsId) -> &Arguments {
        &self.arguments[id.index()]
    }

    // Bytes constants

    pub fn alloc_bytes(&mut self, bytes: Vec<u8>) -> BytesId {
        let id = BytesId::new(to_u32(self.bytes.len(), "bytes constants"));
        self.bytes.push(bytes.into_boxed_slice());
        id
    }

    #[inline]
    pub fn bytes(&self, id: BytesId) -> &[u8] {
        &self.bytes[id.index()]
    }

    // Flattened lists

    pub fn alloc_expr_list(&mut self, items: impl IntoIterator<Item = ExprId>) -> IdRange<ExprId> {
        push_list(&mut self.expr_lists, items)
    }

    pub fn expr_list(&self, range: IdRange<ExprId>) -> &[ExprId] {
        get_list(&self.expr_lists, range)
    }

    pub fn alloc_stmt_list(&mut self, items: impl IntoIterator<Item = StmtId>) -> IdRange<StmtId> {
        push_list(&mut self.stmt_lists, items)
    }

    pub fn stmt_list(&self, range: IdRange<StmtId>) -> &[StmtId] {
        get_list(&self.stmt_lists, range)
    }

    pub fn alloc_arg_list(&mut self, items: impl IntoIterator<Item = ArgId>) -> IdRange<ArgId> {
        push_list(&mut self.arg_lists, items)
    }

    pub fn arg_list(&self, range: IdRange<ArgId>) -> &[ArgId] {
        get_list(&self.arg_lists, range)
    }

    pub fn alloc_keyword_list(
        &mut self,
        items: impl IntoIterator<Item = KeywordArg>,
    ) -> IdRange<KeywordArg> {
        push_list(&mut self.keyword_lists, items)
    }

    pub fn keyword_list(&self, range: IdRange<KeywordArg>) -> &[KeywordArg] {
        get_list(&self.keyword_lists, range)
    }

    pub fn alloc_alias_list(&mut self, items: impl IntoIterator<Item = Alias>) -> IdRange<Alias> {
        push_list(&mut self.alias_lists, items)
    }

    pub fn alias_list(&self, range: IdRange<Alias>) -> &[Alias] {
        get_list(&self.alias_lists, range)
    }

    pub fn alloc_cmp_op_list(&mut self, items: impl IntoIterator<Item = CmpOp>) -> IdRange<CmpOp> {
        push_list(&mut self.cmp_op_lists, items)
    }

    pub fn cmp_op_list(&self, range: IdRange<CmpOp>) -> &[CmpOp] {
        get_list(&self.cmp_op_lists, range)
    }

    pub fn alloc_name_list(&mut self, items: impl IntoIterator<Item = Name>) -> IdRange<Name> {
        push_list(&mut self.name_lists, items)
    }

    pub fn name_list(&self, range: IdRange<Name>) -> &[Name] {
        get_list(&self.name_lists, range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ExprContext;
    use crate::{Name, Pos};

    fn loc(col: u32) -> Location {
        Location::new(Pos::new(1, col), Pos::new(1, col + 1))
    }

    #[test]
    fn test_alloc_and_read_back() {
        let mut arena = AstArena::new();
        let kind = ExprKind::Name {
            id: Name::new(1),
            ctx: ExprContext::Load,
        };
        let id = arena.alloc_expr(Expr::new(kind, loc(0)));
        assert_eq!(id, ExprId::new(0));
        assert_eq!(*arena.expr_kind(id), kind);
        assert_eq!(arena.expr_loc(id), loc(0));
        assert_eq!(arena.expr_count(), 1);
    }

    #[test]
    fn test_lists_are_independent() {
        let mut arena = AstArena::with_capacity(64);
        let a = arena.alloc_expr_list([ExprId::new(1), ExprId::new(2)]);
        let b = arena.alloc_expr_list([ExprId::new(3)]);
        let empty = arena.alloc_expr_list([]);
        assert_eq!(arena.expr_list(a), &[ExprId::new(1), ExprId::new(2)]);
        assert_eq!(arena.expr_list(b), &[ExprId::new(3)]);
        assert!(arena.expr_list(empty).is_empty());
    }

    #[test]
    fn test_bytes_table() {
        let mut arena = AstArena::new();
        let id = arena.alloc_bytes(b"abc".to_vec());
        assert_eq!(arena.bytes(id), b"abc");
    }

    #[test]
    fn test_cmp_op_list() {
        let mut arena = AstArena::new();
        let ops = arena.alloc_cmp_op_list([CmpOp::Lt, CmpOp::LtE]);
        assert_eq!(arena.cmp_op_list(ops), &[CmpOp::Lt, CmpOp::LtE]);
    }

    #[test]
    fn test_name_list() {
        let mut arena = AstArena::new();
        let names = arena.alloc_name_list([Name::new(2), Name::new(5)]);
        assert_eq!(arena.name_list(names), &[Name::new(2), Name::new(5)]);
    }
}
