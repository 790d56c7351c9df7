//! Reference grammar for a Python subset.
//!
//! Written in the shape of a pegen-generated parser: one method per rule,
//! alternatives tried in order with `mark`/`reset` backtracking, and the
//! hot rules memoized. There is no left recursion; operator chains are
//! loops that fold left.
//!
//! # Module Structure
//!
//! - `mod.rs`: [`Grammar`] capability, start rules, memoized rule ids
//! - `keywords.rs`: reserved words
//! - `stmt.rs`: statements, blocks, imports, definitions
//! - `params.rs`: function parameters
//! - `expr.rs`: operator precedence chain
//! - `atom.rs`: primaries, atoms, displays, call arguments, slices

mod atom;
mod expr;
pub mod keywords;
mod params;
mod stmt;

#[cfg(test)]
mod tests;

use pyrite_ir::ast::Mod;
use pyrite_ir::TokenKind;

use crate::{KeywordTable, Parser};

/// Entry point a grammar exposes to the runtime.
///
/// F-string replacement fields re-enter the grammar through the same value,
/// so a child parser never names a concrete rule.
pub trait Grammar {
    fn parse(&self, rule: StartRule, p: &mut Parser<'_>) -> Option<Mod>;
}

/// Start rule of a parse.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StartRule {
    /// A module: statements up to end of input.
    File,
    /// One interactive statement.
    Interactive,
    /// A single expression (or tuple of expressions).
    Eval,
    /// The `(expr)` text of an f-string replacement field.
    FString,
}

/// The Python subset grammar.
#[derive(Copy, Clone, Debug, Default)]
pub struct PythonGrammar;

impl Grammar for PythonGrammar {
    fn parse(&self, rule: StartRule, p: &mut Parser<'_>) -> Option<Mod> {
        match rule {
            StartRule::File => p.file_input(),
            StartRule::Interactive => p.interactive_input(),
            StartRule::Eval => p.eval_input(),
            StartRule::FString => p.fstring_input(),
        }
    }
}

/// Keyword table of [`PythonGrammar`].
pub fn python_keywords() -> &'static KeywordTable {
    &keywords::PYTHON_KEYWORDS
}

/// Ids of the memoized rules.
pub(crate) mod rules {
    use crate::RuleId;

    pub const SIMPLE_STMT: RuleId = RuleId(1);
    pub const BLOCK: RuleId = RuleId(2);
    pub const STAR_EXPRESSIONS: RuleId = RuleId(3);
    pub const STAR_EXPRESSION: RuleId = RuleId(4);
    pub const EXPRESSION: RuleId = RuleId(5);
    pub const DISJUNCTION: RuleId = RuleId(6);
    pub const CONJUNCTION: RuleId = RuleId(7);
    pub const INVERSION: RuleId = RuleId(8);
    pub const BITWISE_OR: RuleId = RuleId(9);
    pub const FACTOR: RuleId = RuleId(10);
    pub const AWAIT_PRIMARY: RuleId = RuleId(11);
    pub const PRIMARY: RuleId = RuleId(12);
    pub const STRINGS: RuleId = RuleId(13);
}

impl Parser<'_> {
    /// `file: [statements] ENDMARKER`
    fn file_input(&mut self) -> Option<Mod> {
        let body = self.statements().unwrap_or_default();
        self.expect(TokenKind::EndMarker)?;
        let body = self.arena_mut().alloc_stmt_list(body);
        Some(Mod::Module { body })
    }

    /// `interactive: statement_newline`
    fn interactive_input(&mut self) -> Option<Mod> {
        let body = self.statement_newline()?;
        let body = self.arena_mut().alloc_stmt_list(body);
        Some(Mod::Interactive { body })
    }

    /// `eval: expressions NEWLINE* ENDMARKER`
    fn eval_input(&mut self) -> Option<Mod> {
        let body = self.expressions()?;
        while self.expect(TokenKind::Newline).is_some() {}
        self.expect(TokenKind::EndMarker)?;
        Some(Mod::Expression { body })
    }

    /// `fstring: star_expressions`
    fn fstring_input(&mut self) -> Option<Mod> {
        let body = self.star_expressions()?;
        Some(Mod::Expression { body })
    }
}
