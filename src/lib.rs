//! Intexpr: parse integer expressions into an immutable AST and evaluate them.
//!
//! ```
//! use intexpr::{evaluate, ParseOptions};
//!
//! let evaluation = evaluate("54+(2+89)", &ParseOptions::default()).unwrap();
//! assert_eq!(evaluation.to_string(), "54+(2+89)=(54)+((2)+(89))=145");
//! ```

pub use crate::ast::Expr;
pub use crate::engine::{evaluate, evaluate_lines, Evaluation, LineResult};
pub use crate::errors::{ErrorKind, IntExprError, Result, SourceContext};
pub use crate::syntax::{build, parse, parse_tree, Grammar, ParseOptions, ParseTree, Symbol};

pub mod ast;
pub mod cli;
pub mod engine;
pub mod errors;
pub mod syntax;
