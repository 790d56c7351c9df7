//! Tokenizer for pyrite using logos.
//!
//! The parser pulls tokens one at a time through [`Tokenizer::next_token`].
//! Keywords are not recognized here: every identifier is a `Name` token and
//! the parser's keyword table reclassifies them.

mod lex_error;
mod raw_token;
mod tokenizer;

pub use lex_error::{LexError, LexErrorKind};
pub use tokenizer::{tokenize, Tokenizer};
