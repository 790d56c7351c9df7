//! Parse entry points.
//!
//! A [`Driver`] owns the configuration of a parse. Each call builds a
//! session (arena, interner, warnings) and a parser over it, runs one start
//! rule, drops the parser and its token buffer, and renders the tree in the
//! requested [`OutputMode`]. The arena goes away with the [`ParsedModule`]
//! once rendering is done, or travels to the caller in [`Rendered::Tree`].

use std::fs;
use std::path::Path;

use pyrite_ir::ast::Mod;
use pyrite_ir::{dump, AstArena, StringInterner};
use tracing::debug;

use crate::{
    python_keywords, Grammar, KeywordTable, ParseFailure, ParseOptions, ParseSession,
    ParseWarning, Parser, PythonGrammar, SourceOrigin, StartRule,
};

/// Compiler collaborator for [`OutputMode::Compile`].
pub trait Compiler {
    /// Turn a parsed module into an artifact, or explain why not.
    fn compile(&self, module: &ParsedModule) -> Result<Vec<u8>, String>;
}

/// What a successful parse is turned into.
#[derive(Copy, Clone)]
pub enum OutputMode<'c> {
    /// The tree itself.
    Tree,
    /// The `ast.dump`-style text of the tree.
    Dump,
    /// The artifact of a compiler run over the tree.
    Compile(&'c dyn Compiler),
}

/// Result of a successful parse, shaped by its [`OutputMode`].
#[derive(Debug)]
pub enum Rendered {
    Tree(ParsedModule),
    Dump(String),
    Compiled(Vec<u8>),
}

/// A finished tree together with the storage it lives in.
#[derive(Debug)]
pub struct ParsedModule {
    pub arena: AstArena,
    pub interner: StringInterner,
    pub root: Mod,
    /// Non-fatal diagnostics, in the order they were produced.
    pub warnings: Vec<ParseWarning>,
}

impl ParsedModule {
    pub fn dump(&self) -> String {
        dump::dump(&self.arena, &self.interner, self.root)
    }
}

/// Runs a grammar over sources.
#[derive(Clone)]
pub struct Driver<'g> {
    grammar: &'g dyn Grammar,
    keywords: &'g KeywordTable,
    options: ParseOptions,
}

impl<'g> Driver<'g> {
    pub fn new(grammar: &'g dyn Grammar, keywords: &'g KeywordTable, options: ParseOptions) -> Self {
        Driver {
            grammar,
            keywords,
            options,
        }
    }

    /// Driver for [`PythonGrammar`].
    pub fn python(options: ParseOptions) -> Driver<'static> {
        Driver::new(&PythonGrammar, python_keywords(), options)
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse in-memory text.
    ///
    /// Errors name the configured filename, or `<string>` when there is
    /// none, in which case they carry the whole input as their text.
    pub fn parse_from_text(
        &self,
        text: &str,
        rule: StartRule,
        mode: OutputMode<'_>,
    ) -> Result<Rendered, ParseFailure> {
        let origin = match &self.options.filename {
            Some(filename) => SourceOrigin::File(filename.clone()),
            None => SourceOrigin::Text,
        };
        let module = self.parse_module(text, origin, rule)?;
        render(module, mode)
    }

    /// Read and parse a file. The path is the reported source name.
    pub fn parse_from_path(
        &self,
        path: &Path,
        rule: StartRule,
        mode: OutputMode<'_>,
    ) -> Result<Rendered, ParseFailure> {
        let text = fs::read_to_string(path).map_err(|source| ParseFailure::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let origin = SourceOrigin::File(path.display().to_string());
        let module = self.parse_module(&text, origin, rule)?;
        render(module, mode)
    }

    fn parse_module(
        &self,
        text: &str,
        origin: SourceOrigin,
        rule: StartRule,
    ) -> Result<ParsedModule, ParseFailure> {
        debug!(?rule, ?origin, bytes = text.len(), "parse start");
        let mut session = ParseSession::for_source(self.options.clone(), text.len());
        let result = {
            let mut parser = Parser::new(text, origin, &mut session, self.grammar, self.keywords);
            parser.run(rule)
        };
        let root = match result {
            Ok(root) => root,
            Err(failure) => {
                debug!(%failure, "parse failed");
                return Err(failure);
            }
        };
        let (arena, interner, warnings) = session.into_parts();
        debug!(
            exprs = arena.expr_count(),
            stmts = arena.stmt_count(),
            warnings = warnings.len(),
            "parse done"
        );
        Ok(ParsedModule {
            arena,
            interner,
            root,
            warnings,
        })
    }
}

fn render(module: ParsedModule, mode: OutputMode<'_>) -> Result<Rendered, ParseFailure> {
    match mode {
        OutputMode::Tree => Ok(Rendered::Tree(module)),
        OutputMode::Dump => Ok(Rendered::Dump(module.dump())),
        OutputMode::Compile(compiler) => compiler
            .compile(&module)
            .map(Rendered::Compiled)
            .map_err(ParseFailure::Compile),
    }
}

/// Parse `text` with the Python grammar and default options.
pub fn parse(text: &str, rule: StartRule) -> Result<ParsedModule, ParseFailure> {
    Driver::python(ParseOptions::default()).parse_module(text, SourceOrigin::Text, rule)
}
