//! Statements: simple statements, assignments, imports, blocks and the
//! compound statements of the subset.

use pyrite_diagnostic::ErrorCode;
use pyrite_ir::ast::{Alias, ExprContext, ExprKind, StmtKind};
use pyrite_ir::{ExprId, IdRange, Keyword, Name, StmtId, Token, TokenKind};
use smallvec::{smallvec, SmallVec};

use super::atom::CallArguments;
use super::keywords as kw;
use super::rules;
use crate::combinators::{
    alias_for_star, as_assignment_target, augoperator, class_def_decorators, count_dots,
    expr_name, flatten, function_def_decorators, invalid_target, join_dotted, map_names_to_ids,
    prepend, retag_context, seq_get_last, singleton, MaybeSeq, TargetKind,
};
use crate::signature::empty_arguments;
use crate::Parser;

impl Parser<'_> {
    /// `statements: statement+`
    pub(super) fn statements(&mut self) -> Option<Vec<StmtId>> {
        let mut groups = Vec::new();
        loop {
            let mark = self.mark();
            match self.statement() {
                Some(group) => groups.push(MaybeSeq::from(group)),
                None => {
                    self.reset(mark);
                    break;
                }
            }
        }
        let stmts = flatten(groups);
        (!stmts.is_empty()).then_some(stmts)
    }

    /// `statement: compound_stmt | simple_stmt`
    fn statement(&mut self) -> Option<Vec<StmtId>> {
        let mark = self.mark();
        if let Some(stmt) = self.compound_stmt() {
            return Some(singleton(stmt));
        }
        self.reset(mark);
        let stmts = self.simple_stmt()?;
        Some(self.arena().stmt_list(stmts).to_vec())
    }

    /// ```text
    /// statement_newline:
    ///     | compound_stmt [NEWLINE]
    ///     | simple_stmt
    ///     | NEWLINE
    ///     | ENDMARKER
    /// ```
    ///
    /// An empty line is a `pass`; end of input is an empty body.
    pub(super) fn statement_newline(&mut self) -> Option<Vec<StmtId>> {
        let mark = self.mark();
        if let Some(stmt) = self.compound_stmt() {
            self.expect(TokenKind::Newline);
            return Some(singleton(stmt));
        }
        self.reset(mark);
        if let Some(stmts) = self.simple_stmt() {
            return Some(self.arena().stmt_list(stmts).to_vec());
        }
        if let Some(token) = self.expect(TokenKind::Newline) {
            let loc = self.token_location(&token);
            return Some(singleton(self.alloc_stmt(StmtKind::Pass, loc)));
        }
        self.expect(TokenKind::EndMarker)?;
        Some(Vec::new())
    }

    /// `simple_stmt: ';'.small_stmt+ [';'] NEWLINE`
    fn simple_stmt(&mut self) -> Option<IdRange<StmtId>> {
        self.memoized(rules::SIMPLE_STMT, |p| {
            let mut stmts: SmallVec<[StmtId; 2]> = smallvec![p.small_stmt()?];
            while p.expect(TokenKind::Semi).is_some() {
                if p.lookahead_kind(true, TokenKind::Newline) {
                    break;
                }
                stmts.push(p.small_stmt()?);
            }
            p.expect(TokenKind::Newline)?;
            Some(p.arena_mut().alloc_stmt_list(stmts))
        })
    }

    /// ```text
    /// small_stmt:
    ///     | assignment
    ///     | star_expressions
    ///     | return_stmt
    ///     | import_stmt
    ///     | 'pass' | 'break' | 'continue'
    ///     | del_stmt
    ///     | global_stmt
    ///     | nonlocal_stmt
    /// ```
    fn small_stmt(&mut self) -> Option<StmtId> {
        let start = self.mark();
        match self.peek_kind()? {
            TokenKind::Keyword(kw::RETURN) => return self.return_stmt(),
            TokenKind::Keyword(kw::IMPORT) => return self.import_name(),
            TokenKind::Keyword(kw::FROM) => return self.import_from(),
            TokenKind::Keyword(kw::DEL) => return self.del_stmt(),
            TokenKind::Keyword(kw::GLOBAL) => return self.global_stmt(),
            TokenKind::Keyword(kw::NONLOCAL) => return self.nonlocal_stmt(),
            TokenKind::Keyword(kw::PASS) => return self.keyword_stmt(kw::PASS, StmtKind::Pass),
            TokenKind::Keyword(kw::BREAK) => return self.keyword_stmt(kw::BREAK, StmtKind::Break),
            TokenKind::Keyword(kw::CONTINUE) => {
                return self.keyword_stmt(kw::CONTINUE, StmtKind::Continue)
            }
            _ => {}
        }
        if let Some(stmt) = self.assignment() {
            return Some(stmt);
        }
        self.reset(start);
        let value = self.star_expressions()?;
        let loc = self.location_from(start);
        Some(self.alloc_stmt(StmtKind::Expr { value }, loc))
    }

    fn keyword_stmt(&mut self, keyword: Keyword, kind: StmtKind) -> Option<StmtId> {
        let token = self.keyword(keyword)?;
        let loc = self.token_location(&token);
        Some(self.alloc_stmt(kind, loc))
    }

    /// ```text
    /// assignment:
    ///     | NAME ':' expression ['=' annotated_rhs]
    ///     | single_target ':' expression ['=' annotated_rhs]
    ///     | (star_targets '=')+ star_expressions !'='
    ///     | single_target augassign star_expressions
    /// ```
    ///
    /// Targets are parsed as expressions, then validated and retagged.
    fn assignment(&mut self) -> Option<StmtId> {
        let start = self.mark();
        let bare_name = self.lookahead(true, |p| {
            p.expect(TokenKind::Name)?;
            p.expect(TokenKind::Colon)
        });
        if bare_name {
            let name = self.name_token()?;
            let target = retag_context(self, name, ExprContext::Store);
            return self.annotated_assignment(start, target, true);
        }

        let first = self.star_expressions()?;
        let token = self.peek()?;
        match token.kind {
            TokenKind::Colon => {
                let target = as_assignment_target(self, first);
                self.annotated_assignment(start, target, false)
            }
            TokenKind::Equal => self.assign_chain(start, first),
            kind => {
                let op = augoperator(kind)?;
                self.expect(kind)?;
                if !matches!(
                    self.expr_kind(first),
                    ExprKind::Name { .. } | ExprKind::Attribute { .. } | ExprKind::Subscript { .. }
                ) {
                    let message = format!(
                        "'{}' is an illegal expression for augmented assignment",
                        expr_name(&self.expr_kind(first))
                    );
                    return self.raise_error_at_node(ErrorCode::E1002, message, first);
                }
                let target = retag_context(self, first, ExprContext::Store);
                let value = self.star_expressions()?;
                let loc = self.location_from(start);
                Some(self.alloc_stmt(StmtKind::AugAssign { target, op, value }, loc))
            }
        }
    }

    fn annotated_assignment(
        &mut self,
        start: usize,
        target: ExprId,
        simple: bool,
    ) -> Option<StmtId> {
        self.expect(TokenKind::Colon)?;
        let annotation = self.expression()?;
        let value = if self.expect(TokenKind::Equal).is_some() {
            self.star_expressions()?
        } else {
            ExprId::INVALID
        };
        let loc = self.location_from(start);
        Some(self.alloc_stmt(
            StmtKind::AnnAssign {
                target,
                annotation,
                value,
                simple,
            },
            loc,
        ))
    }

    /// `target = target = ... = value`, every target checked then retagged.
    fn assign_chain(&mut self, start: usize, first: ExprId) -> Option<StmtId> {
        let mut chain: SmallVec<[ExprId; 3]> = smallvec![first];
        loop {
            self.expect(TokenKind::Equal)?;
            chain.push(self.star_expressions()?);
            if !self.lookahead_kind(true, TokenKind::Equal) {
                break;
            }
        }
        let value = seq_get_last(&chain, first);
        let targets = &chain[..chain.len() - 1];
        for &target in targets {
            self.check_store_target(target)?;
        }
        let targets: SmallVec<[ExprId; 2]> = targets
            .iter()
            .map(|&target| retag_context(self, target, ExprContext::Store))
            .collect();
        let targets = self.arena_mut().alloc_expr_list(targets);
        let loc = self.location_from(start);
        Some(self.alloc_stmt(StmtKind::Assign { targets, value }, loc))
    }

    fn check_store_target(&mut self, target: ExprId) -> Option<()> {
        if matches!(self.expr_kind(target), ExprKind::Starred { .. }) {
            return self.raise_error_at_node(
                ErrorCode::E1002,
                "starred assignment target must be in a list or tuple",
                target,
            );
        }
        let Some(bad) = invalid_target(self, target, TargetKind::Store) else {
            return Some(());
        };
        let message = format!("cannot assign to {}", expr_name(&self.expr_kind(bad)));
        self.raise_error_at_node(ErrorCode::E1002, message, bad)
    }

    /// `return_stmt: 'return' [star_expressions]`
    fn return_stmt(&mut self) -> Option<StmtId> {
        let start = self.mark();
        self.keyword(kw::RETURN)?;
        let value = self.optional(Self::star_expressions);
        let loc = self.location_from(start);
        Some(self.alloc_stmt(StmtKind::Return { value }, loc))
    }

    /// `del_stmt: 'del' ','.del_target+ [','] &(';' | NEWLINE)`
    fn del_stmt(&mut self) -> Option<StmtId> {
        let start = self.mark();
        self.keyword(kw::DEL)?;
        let items = self.star_named_expressions()?;
        if !matches!(self.peek_kind()?, TokenKind::Semi | TokenKind::Newline) {
            return None;
        }
        let mut targets: SmallVec<[ExprId; 2]> = SmallVec::with_capacity(items.len());
        for item in items {
            if let Some(bad) = invalid_target(self, item, TargetKind::Del) {
                let message = format!("cannot delete {}", expr_name(&self.expr_kind(bad)));
                return self.raise_error_at_node(ErrorCode::E1002, message, bad);
            }
            targets.push(retag_context(self, item, ExprContext::Del));
        }
        let targets = self.arena_mut().alloc_expr_list(targets);
        let loc = self.location_from(start);
        Some(self.alloc_stmt(StmtKind::Delete { targets }, loc))
    }

    /// `global_stmt: 'global' ','.NAME+`
    fn global_stmt(&mut self) -> Option<StmtId> {
        let start = self.mark();
        self.keyword(kw::GLOBAL)?;
        let names = self.name_list()?;
        let loc = self.location_from(start);
        Some(self.alloc_stmt(StmtKind::Global { names }, loc))
    }

    /// `nonlocal_stmt: 'nonlocal' ','.NAME+`
    fn nonlocal_stmt(&mut self) -> Option<StmtId> {
        let start = self.mark();
        self.keyword(kw::NONLOCAL)?;
        let names = self.name_list()?;
        let loc = self.location_from(start);
        Some(self.alloc_stmt(StmtKind::Nonlocal { names }, loc))
    }

    fn name_list(&mut self) -> Option<IdRange<Name>> {
        let names = self.separated(Self::name_token)?;
        let ids = map_names_to_ids(self, &names);
        Some(self.arena_mut().alloc_name_list(ids))
    }

    /// `import_name: 'import' ','.dotted_as_name+`
    fn import_name(&mut self) -> Option<StmtId> {
        let start = self.mark();
        self.keyword(kw::IMPORT)?;
        let names = self.separated(Self::dotted_as_name)?;
        let names = self.arena_mut().alloc_alias_list(names);
        let loc = self.location_from(start);
        Some(self.alloc_stmt(StmtKind::Import { names }, loc))
    }

    /// `dotted_as_name: dotted_name ['as' NAME]`
    fn dotted_as_name(&mut self) -> Option<Alias> {
        let dotted = self.dotted_name()?;
        let name = self.name_id(dotted)?;
        let asname = self.as_name();
        Some(Alias { name, asname })
    }

    /// `dotted_name: NAME ('.' NAME)*`, joined into one name.
    fn dotted_name(&mut self) -> Option<ExprId> {
        let mut dotted = self.name_token()?;
        loop {
            let mark = self.mark();
            if self.expect(TokenKind::Dot).is_none() {
                break;
            }
            let Some(next) = self.name_token() else {
                self.reset(mark);
                break;
            };
            dotted = join_dotted(self, dotted, next)?;
        }
        Some(dotted)
    }

    fn name_id(&mut self, expr: ExprId) -> Option<Name> {
        match self.expr_kind(expr) {
            ExprKind::Name { id, .. } => Some(id),
            _ => self.raise_internal("import path is not a name"),
        }
    }

    /// `['as' NAME]`
    fn as_name(&mut self) -> Option<Name> {
        let mark = self.mark();
        self.keyword(kw::AS)?;
        match self.expect_name() {
            Some((name, _)) => Some(name),
            None => {
                self.reset(mark);
                None
            }
        }
    }

    /// ```text
    /// import_from:
    ///     | 'from' ('.' | '...')* dotted_name 'import' import_from_targets
    ///     | 'from' ('.' | '...')+ 'import' import_from_targets
    /// ```
    fn import_from(&mut self) -> Option<StmtId> {
        let start = self.mark();
        self.keyword(kw::FROM)?;
        let mut dots: SmallVec<[Token; 2]> = SmallVec::new();
        while let Some(kind @ (TokenKind::Dot | TokenKind::Ellipsis)) = self.peek_kind() {
            dots.push(self.expect(kind)?);
        }
        let module = match self.maybe(Self::dotted_name) {
            Some(dotted) => Some(self.name_id(dotted)?),
            None if dots.is_empty() => return None,
            None => None,
        };
        self.keyword(kw::IMPORT)?;
        let names = self.import_from_targets()?;
        let names = self.arena_mut().alloc_alias_list(names);
        let loc = self.location_from(start);
        Some(self.alloc_stmt(
            StmtKind::ImportFrom {
                module,
                names,
                level: count_dots(&dots),
            },
            loc,
        ))
    }

    /// ```text
    /// import_from_targets:
    ///     | '(' import_from_as_names [','] ')'
    ///     | import_from_as_names !','
    ///     | '*'
    /// ```
    fn import_from_targets(&mut self) -> Option<Vec<Alias>> {
        if self.expect(TokenKind::LPar).is_some() {
            let names = self.separated(Self::import_from_as_name)?;
            self.expect(TokenKind::Comma);
            self.expect(TokenKind::RPar)?;
            return Some(names);
        }
        if self.expect(TokenKind::Star).is_some() {
            return Some(singleton(alias_for_star(self)));
        }
        let names = self.separated(Self::import_from_as_name)?;
        let trailing_comma = self.lookahead(true, |p| {
            p.expect(TokenKind::Comma)?;
            p.expect(TokenKind::Newline)
        });
        if trailing_comma {
            return self.raise_syntax_error(
                ErrorCode::E1001,
                "trailing comma not allowed without surrounding parentheses",
            );
        }
        Some(names)
    }

    /// `import_from_as_name: NAME ['as' NAME]`
    fn import_from_as_name(&mut self) -> Option<Alias> {
        let (name, _) = self.expect_name()?;
        let asname = self.as_name();
        Some(Alias { name, asname })
    }

    /// `','.rule+`
    fn separated<T>(&mut self, rule: fn(&mut Self) -> Option<T>) -> Option<Vec<T>> {
        let first = rule(self)?;
        let mut rest = Vec::new();
        loop {
            let mark = self.mark();
            if self.expect(TokenKind::Comma).is_none() {
                break;
            }
            match rule(self) {
                Some(item) => rest.push(item),
                None => {
                    self.reset(mark);
                    break;
                }
            }
        }
        Some(prepend(first, MaybeSeq::from(rest)))
    }

    /// ```text
    /// compound_stmt:
    ///     | &('def' | '@') function_def
    ///     | &'class' class_def
    ///     | &'if' if_stmt
    ///     | &'while' while_stmt
    /// ```
    fn compound_stmt(&mut self) -> Option<StmtId> {
        match self.peek_kind()? {
            TokenKind::At => self.decorated(),
            TokenKind::Keyword(kw::DEF) => self.function_def_raw(),
            TokenKind::Keyword(kw::CLASS) => self.class_def_raw(),
            TokenKind::Keyword(kw::IF) => self.if_stmt(),
            TokenKind::Keyword(kw::WHILE) => self.while_stmt(),
            _ => None,
        }
    }

    /// `decorators: ('@' named_expression NEWLINE)+`, then a function or
    /// class definition.
    fn decorated(&mut self) -> Option<StmtId> {
        let mut decorators: SmallVec<[ExprId; 2]> = SmallVec::new();
        while self.expect(TokenKind::At).is_some() {
            decorators.push(self.named_expression()?);
            self.expect(TokenKind::Newline)?;
        }
        match self.peek_kind()? {
            TokenKind::Keyword(kw::DEF) => {
                let def = self.function_def_raw()?;
                function_def_decorators(self, &decorators, def)
            }
            TokenKind::Keyword(kw::CLASS) => {
                let def = self.class_def_raw()?;
                class_def_decorators(self, &decorators, def)
            }
            _ => None,
        }
    }

    /// `function_def_raw: 'def' NAME '(' [params] ')' ['->' expression] ':' block`
    fn function_def_raw(&mut self) -> Option<StmtId> {
        let start = self.mark();
        self.keyword(kw::DEF)?;
        let (name, _) = self.expect_name()?;
        self.expect(TokenKind::LPar)?;
        let args = if self.lookahead_kind(true, TokenKind::RPar) {
            empty_arguments(self)
        } else {
            self.params()?
        };
        self.expect(TokenKind::RPar)?;
        let returns = if self.expect(TokenKind::RArrow).is_some() {
            self.expression()?
        } else {
            ExprId::INVALID
        };
        self.expect(TokenKind::Colon)?;
        let body = self.block()?;
        let loc = self.location_from(start);
        Some(self.alloc_stmt(
            StmtKind::FunctionDef {
                name,
                args,
                body,
                decorators: IdRange::EMPTY,
                returns,
            },
            loc,
        ))
    }

    /// `class_def_raw: 'class' NAME ['(' [arguments] ')'] ':' block`
    fn class_def_raw(&mut self) -> Option<StmtId> {
        let start = self.mark();
        self.keyword(kw::CLASS)?;
        let (name, _) = self.expect_name()?;
        let CallArguments { args, keywords } = if self.expect(TokenKind::LPar).is_some() {
            let call = self.arguments()?;
            self.expect(TokenKind::RPar)?;
            call
        } else {
            CallArguments::default()
        };
        self.expect(TokenKind::Colon)?;
        let body = self.block()?;
        let loc = self.location_from(start);
        Some(self.alloc_stmt(
            StmtKind::ClassDef {
                name,
                bases: args,
                keywords,
                body,
                decorators: IdRange::EMPTY,
            },
            loc,
        ))
    }

    /// `block: NEWLINE INDENT statements DEDENT | simple_stmt`
    fn block(&mut self) -> Option<IdRange<StmtId>> {
        self.memoized(rules::BLOCK, |p| {
            p.nested(|p| {
                if p.expect(TokenKind::Newline).is_none() {
                    return p.simple_stmt();
                }
                if p.expect(TokenKind::Indent).is_none() {
                    return p.raise_syntax_error(ErrorCode::E1001, "expected an indented block");
                }
                let stmts = p.statements()?;
                p.expect(TokenKind::Dedent)?;
                Some(p.arena_mut().alloc_stmt_list(stmts))
            })
        })
    }

    /// ```text
    /// if_stmt: 'if' named_expression ':' block (elif_stmt | [else_block])
    /// elif_stmt: 'elif' named_expression ':' block (elif_stmt | [else_block])
    /// ```
    ///
    /// The `elif` chain is collected first and folded from the end, each
    /// clause becoming the sole `orelse` statement of the one before it.
    fn if_stmt(&mut self) -> Option<StmtId> {
        let start = self.mark();
        self.keyword(kw::IF)?;
        let (test, body) = self.condition_block()?;
        let mut elifs: SmallVec<[(usize, ExprId, IdRange<StmtId>); 2]> = SmallVec::new();
        loop {
            let clause_start = self.mark();
            if self.keyword(kw::ELIF).is_none() {
                break;
            }
            let (test, body) = self.condition_block()?;
            elifs.push((clause_start, test, body));
        }
        let mut orelse = self.maybe(Self::else_block).unwrap_or(IdRange::EMPTY);
        while let Some((clause_start, test, body)) = elifs.pop() {
            let loc = self.location_from(clause_start);
            let clause = self.alloc_stmt(StmtKind::If { test, body, orelse }, loc);
            orelse = self.arena_mut().alloc_stmt_list([clause]);
        }
        let loc = self.location_from(start);
        Some(self.alloc_stmt(StmtKind::If { test, body, orelse }, loc))
    }

    /// `while_stmt: 'while' named_expression ':' block [else_block]`
    fn while_stmt(&mut self) -> Option<StmtId> {
        let start = self.mark();
        self.keyword(kw::WHILE)?;
        let (test, body) = self.condition_block()?;
        let orelse = self.maybe(Self::else_block).unwrap_or(IdRange::EMPTY);
        let loc = self.location_from(start);
        Some(self.alloc_stmt(StmtKind::While { test, body, orelse }, loc))
    }

    /// `named_expression ':' block`
    fn condition_block(&mut self) -> Option<(ExprId, IdRange<StmtId>)> {
        let test = self.named_expression()?;
        self.expect(TokenKind::Colon)?;
        let body = self.block()?;
        Some((test, body))
    }

    /// `else_block: 'else' ':' block`
    fn else_block(&mut self) -> Option<IdRange<StmtId>> {
        self.keyword(kw::ELSE)?;
        self.expect(TokenKind::Colon)?;
        self.block()
    }
}
