//! State shared by a parser and every child parser it spawns.

use pyrite_ir::ast::{Expr, ExprContext, ExprKind};
use pyrite_ir::{AstArena, ExprId, Location, Name, StringInterner};

use crate::{ParseOptions, ParseWarning};

/// Owns the arena, the interner and the collected warnings of one parse.
///
/// Child parsers for f-string expressions borrow the same session, so every
/// node of a parse ends up in one arena that is dropped once.
#[derive(Debug)]
pub struct ParseSession {
    pub arena: AstArena,
    pub interner: StringInterner,
    pub warnings: Vec<ParseWarning>,
    options: ParseOptions,
    placeholder: Option<ExprId>,
}

impl ParseSession {
    pub fn new(options: ParseOptions) -> Self {
        ParseSession {
            arena: AstArena::new(),
            interner: StringInterner::new(),
            warnings: Vec::new(),
            options,
            placeholder: None,
        }
    }

    /// Session with an arena sized for a source of `source_len` bytes.
    pub fn for_source(options: ParseOptions, source_len: usize) -> Self {
        ParseSession {
            arena: AstArena::with_capacity(source_len),
            ..ParseSession::new(options)
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// The empty store-context name handed out where a target is invalid.
    ///
    /// Allocated on first use and shared for the rest of this session only.
    pub fn placeholder_name(&mut self) -> ExprId {
        if let Some(id) = self.placeholder {
            return id;
        }
        let kind = ExprKind::Name {
            id: Name::EMPTY,
            ctx: ExprContext::Store,
        };
        let id = self.arena.alloc_expr(Expr::new(kind, Location::default()));
        self.placeholder = Some(id);
        id
    }

    /// Split into the parts a [`ParsedModule`](crate::ParsedModule) keeps.
    pub(crate) fn into_parts(self) -> (AstArena, StringInterner, Vec<ParseWarning>) {
        (self.arena, self.interner, self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_per_session() {
        let mut first = ParseSession::new(ParseOptions::default());
        let a = first.placeholder_name();
        let b = first.placeholder_name();
        assert_eq!(a, b);
        assert_eq!(first.arena.expr_count(), 1);

        let mut second = ParseSession::new(ParseOptions::default());
        second.arena.alloc_expr(Expr::new(
            ExprKind::Name {
                id: Name::EMPTY,
                ctx: ExprContext::Load,
            },
            Location::default(),
        ));
        let c = second.placeholder_name();
        assert_ne!(c, a);
        assert_eq!(
            *second.arena.expr_kind(c),
            ExprKind::Name {
                id: Name::EMPTY,
                ctx: ExprContext::Store
            }
        );
    }
}
