//! Parse → build → evaluate pipeline.

use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

use crate::ast::Expr;
use crate::errors::{IntExprError, Result};
use crate::syntax::{parser, ParseOptions};

/// Result of evaluating one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub input: String,
    pub expr: Expr,
    pub value: i32,
}

impl Evaluation {
    pub fn rendered(&self) -> String {
        self.expr.render()
    }
}

/// Formats as `<input>=<rendered>=<value>`.
impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}={}", self.input, self.expr, self.value)
    }
}

pub fn evaluate(input: &str, options: &ParseOptions) -> Result<Evaluation> {
    let expr = parser::parse(input, options)?;
    debug!(ast = %expr, depth = expr.depth(), "built expression");

    let value = expr.value()?;
    info!(input, value, "evaluated expression");

    Ok(Evaluation {
        input: input.to_string(),
        expr,
        value,
    })
}

/// One evaluated line of a script.
#[derive(Debug)]
pub struct LineResult {
    /// 1-based line number.
    pub line: usize,
    /// The trimmed line text that was evaluated.
    pub input: String,
    pub result: Result<Evaluation>,
}

/// Evaluates every non-blank line of `source`. Lines starting with `#` are
/// comments. Each line is trimmed and evaluated independently.
pub fn evaluate_lines(source: &str, options: &ParseOptions) -> Vec<LineResult> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line_text = line.trim();
            if line_text.is_empty() || line_text.starts_with('#') {
                return None;
            }
            Some(LineResult {
                line: index + 1,
                input: line_text.to_string(),
                result: evaluate(line_text, options),
            })
        })
        .collect()
}

impl LineResult {
    pub fn error(&self) -> Option<&IntExprError> {
        self.result.as_ref().err()
    }
}
