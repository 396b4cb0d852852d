//! Defines the command-line arguments and subcommands for the intexpr CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::syntax::{Grammar, ParseOptions, DEFAULT_MAX_DEPTH};

/// Expression evaluated when no subcommand is given.
pub const DEMO_INPUT: &str = "54+(2+89)";

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "intexpr",
    version,
    about = "Parse and evaluate integer expressions built from '+', '*' and parentheses."
)]
pub struct IntExprArgs {
    #[command(flatten)]
    pub grammar: GrammarArgs,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Options shared by every command that parses input.
#[derive(Debug, Args)]
pub struct GrammarArgs {
    /// Use the addition-only grammar ('*' is rejected).
    #[arg(long, global = true)]
    pub additive: bool,

    /// Maximum parenthesis nesting and expression depth.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, global = true)]
    pub max_depth: usize,
}

impl GrammarArgs {
    pub fn parse_options(&self) -> ParseOptions {
        let grammar = if self.additive {
            Grammar::Additive
        } else {
            Grammar::Arithmetic
        };
        ParseOptions::default()
            .with_grammar(grammar)
            .with_max_depth(self.max_depth)
    }
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate an expression and print `<input>=<ast>=<value>`.
    Eval {
        /// The expression to evaluate.
        #[arg(default_value = DEMO_INPUT)]
        expr: String,
        /// Print the evaluation as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show the Abstract Syntax Tree (AST) for an expression.
    Ast {
        /// The expression to parse.
        #[arg(required = true)]
        expr: String,
        /// Dump the AST as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show the labeled parse tree produced by the grammar.
    Tree {
        /// The expression to parse.
        #[arg(required = true)]
        expr: String,
    },
    /// Evaluate every line of a file.
    Run {
        /// The path to a file with one expression per line.
        #[arg(required = true)]
        file: PathBuf,
    },
}
