//! Helpers shared by the unit tests of this crate.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pyrite_diagnostic::SyntaxError;

use crate::{
    parse, python_keywords, ParseFailure, ParseOptions, ParseSession, Parser, PythonGrammar,
    SourceOrigin, StartRule,
};

/// Run `f` on a parser over `source` with default options and the Python
/// keyword table.
pub(crate) fn with_parser<R>(source: &str, f: impl FnOnce(&mut Parser<'_>) -> R) -> R {
    with_options(source, ParseOptions::default(), f)
}

pub(crate) fn with_options<R>(
    source: &str,
    options: ParseOptions,
    f: impl FnOnce(&mut Parser<'_>) -> R,
) -> R {
    let mut session = ParseSession::new(options);
    let grammar = PythonGrammar;
    let mut parser = Parser::new(
        source,
        SourceOrigin::Text,
        &mut session,
        &grammar,
        python_keywords(),
    );
    f(&mut parser)
}

/// Dump of a successful parse.
pub(crate) fn dump(source: &str, rule: StartRule) -> String {
    match parse(source, rule) {
        Ok(module) => module.dump(),
        Err(failure) => panic!("parse of {source:?} failed: {failure}"),
    }
}

/// Syntax error of a failed parse.
pub(crate) fn syntax_error(source: &str, rule: StartRule) -> SyntaxError {
    match parse(source, rule) {
        Ok(module) => panic!("parse of {source:?} succeeded: {}", module.dump()),
        Err(ParseFailure::Syntax(error)) => error,
        Err(other) => panic!("parse of {source:?} failed without a syntax error: {other}"),
    }
}
