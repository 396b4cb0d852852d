//! Syntax module for integer expressions
//!
//! Text is parsed by a pest grammar into a labeled [`ParseTree`], which the
//! [`builder`] turns into an [`Expr`](crate::ast::Expr).

pub mod builder;
pub mod parser;
pub mod tree;

pub use builder::{build, Builder};
pub use parser::{parse, parse_tree, Grammar, ParseOptions, DEFAULT_MAX_DEPTH};
pub use tree::{ParseTree, Symbol};

/// Represents a span in the source code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}
