//! F-string assembly.
//!
//! [`FStringBuilder`] accumulates the parts of a string group: adjacent
//! literal text is coalesced into one pending run, and each replacement
//! field first flushes that run into a `Constant` node. The scanner that
//! finds literal runs and replacement fields lives in `scan`.

mod scan;


use std::ops::Range;

use pyrite_ir::ast::{Constant, ExprKind};
use pyrite_ir::{ExprId, Location, Name, Token};

use crate::Parser;
use scan::Scanner;

/// Maximum nesting of replacement fields (a field inside a format spec).
pub const MAX_FIELD_NESTING: u32 = 2;

/// Maximum bracket nesting inside one replacement field.
pub const MAX_BRACKET_NESTING: usize = 200;

/// Builder for the value of a string group.
#[derive(Debug)]
pub struct FStringBuilder {
    /// Literal text not yet turned into a node.
    last_str: Option<String>,
    values: Vec<ExprId>,
    /// Set once any f-string part was seen.
    fmode: bool,
    kind: Option<Name>,
    loc: Location,
}

impl FStringBuilder {
    /// `kind` and `loc` are given to every constant the builder creates.
    pub fn new(kind: Option<Name>, loc: Location) -> Self {
        FStringBuilder {
            last_str: None,
            values: Vec::new(),
            fmode: false,
            kind,
            loc,
        }
    }

    /// Append literal text to the pending run. Empty text is dropped.
    pub fn concat_literal(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        match &mut self.last_str {
            Some(pending) => pending.push_str(&text),
            None => self.last_str = Some(text),
        }
    }

    /// Scan the f-string body `body` (a byte range of `token`'s text).
    pub fn concat_fstring(
        &mut self,
        p: &mut Parser<'_>,
        token: &Token,
        body: Range<usize>,
        raw: bool,
    ) -> Option<()> {
        let scanner = Scanner {
            token: *token,
            text: p.token_text(token),
            end: body.end,
            raw,
            kind: self.kind,
            loc: self.loc,
        };
        let mut pos = body.start;
        scanner.concat(p, self, &mut pos, 0)
    }

    /// Pending literal text.
    pub fn pending_literal(&self) -> Option<&str> {
        self.last_str.as_deref()
    }

    /// Nodes emitted so far, in encounter order.
    pub fn values(&self) -> &[ExprId] {
        &self.values
    }

    pub fn is_fstring(&self) -> bool {
        self.fmode
    }

    /// Flush the pending literal, then append `expr`.
    fn push_expression(&mut self, p: &mut Parser<'_>, expr: ExprId) {
        self.flush(p);
        self.values.push(expr);
    }

    fn flush(&mut self, p: &mut Parser<'_>) {
        if let Some(text) = self.last_str.take() {
            let node = str_node(p, &text, self.kind, self.loc);
            self.values.push(node);
        }
    }

    /// Produce the group's node.
    ///
    /// Without any f-string part this is a single str constant (empty when
    /// nothing was added); otherwise a `JoinedStr` at `loc`.
    pub fn finish(mut self, p: &mut Parser<'_>, loc: Location) -> ExprId {
        if !self.fmode {
            let text = self.last_str.take().unwrap_or_default();
            return str_node(p, &text, self.kind, loc);
        }
        self.flush(p);
        let values = p.arena_mut().alloc_expr_list(self.values);
        p.alloc_expr(ExprKind::JoinedStr { values }, loc)
    }
}

fn str_node(p: &mut Parser<'_>, text: &str, kind: Option<Name>, loc: Location) -> ExprId {
    let value = Constant::Str(p.intern(text));
    p.alloc_expr(ExprKind::Constant { value, kind }, loc)
}
