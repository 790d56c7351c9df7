//! Pyrite IR - tokens, syntax tree nodes and their arena
//!
//! This crate contains the data structures shared by the pyrite parser crates:
//! - Spans and line/column positions
//! - Names for interned identifiers and string constants
//! - Tokens as produced by the tokenizer
//! - Syntax tree nodes (Expr, Stmt, Mod) and the arena that owns them
//! - A textual dump of a tree
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers and string constants become `Name(u32)`
//! - **Flatten Everything**: no `Box<Expr>`, children are `ExprId(u32)` handles
//! - **Explicit absence**: optional children are `INVALID` handles, never a
//!   shared placeholder node

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
pub mod dump;
mod ids;
mod interner;
mod name;
mod span;
mod token;

pub use arena::AstArena;
pub use ids::{ArgId, ArgumentsId, BytesId, ExprId, IdRange, StmtId};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::{Location, Pos, Span};
pub use token::{Keyword, Token, TokenKind};
