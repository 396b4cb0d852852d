//! Abstract syntax tree for integer expressions.
//!
//! An [`Expr`] is immutable once built. Interior nodes own their children
//! through `Box`, so a tree is always finite and acyclic.
//!
//! Sums and products fold to the left, so a long flat input like `1+1+...+1`
//! becomes a long left spine. `value`, `Display`, `depth`, `node_count` and
//! drop walk that spine in a loop and only recurse into right operands, whose
//! depth is bounded by parenthesis nesting. The derived `Debug`, `Clone`,
//! `PartialEq` and `Serialize` recurse over the full height.

use serde::Serialize;
use std::{fmt, mem};

use crate::errors::{IntExprError, Result};

/// The core AST node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expr {
    Number(i32),
    Plus(Box<Expr>, Box<Expr>),
    Times(Box<Expr>, Box<Expr>),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Operator {
    Plus,
    Times,
}

impl Operator {
    fn symbol(self) -> char {
        match self {
            Operator::Plus => '+',
            Operator::Times => '*',
        }
    }

    fn apply(self, left: i32, right: i32) -> Result<i32> {
        let result = match self {
            Operator::Plus => left.checked_add(right),
            Operator::Times => left.checked_mul(right),
        };
        result.ok_or(IntExprError::ArithmeticOverflow {
            operation: self.symbol(),
            left,
            right,
        })
    }
}

impl Expr {
    pub fn number(n: i32) -> Self {
        Expr::Number(n)
    }

    pub fn plus(left: Expr, right: Expr) -> Self {
        Expr::Plus(Box::new(left), Box::new(right))
    }

    pub fn times(left: Expr, right: Expr) -> Self {
        Expr::Times(Box::new(left), Box::new(right))
    }

    /// Computes the value of this expression.
    ///
    /// Arithmetic is checked: an addition or multiplication that does not fit
    /// in an `i32` fails with [`IntExprError::ArithmeticOverflow`].
    pub fn value(&self) -> Result<i32> {
        let (first, spine) = self.left_spine();
        let mut acc = first;
        for (operator, right) in spine {
            acc = operator.apply(acc, right.value()?)?;
        }
        Ok(acc)
    }

    /// Fully parenthesized rendering, e.g. `(54)+((2)+(89))`.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Height of the tree; a lone number has depth 1.
    pub fn depth(&self) -> usize {
        let (_, spine) = self.left_spine();
        let k = spine.len();
        // spine[i] hangs off the spine node at level k - i, counted from 1 at the top.
        spine
            .iter()
            .enumerate()
            .map(|(i, (_, right))| k - i + right.depth())
            .fold(k + 1, usize::max)
    }

    pub fn node_count(&self) -> usize {
        let (_, spine) = self.left_spine();
        spine
            .iter()
            .map(|(_, right)| right.node_count())
            .sum::<usize>()
            + spine.len()
            + 1
    }

    /// Returns the variant name (for diagnostics and debugging).
    pub fn type_name(&self) -> &'static str {
        match self {
            Expr::Number(_) => "Number",
            Expr::Plus(_, _) => "Plus",
            Expr::Times(_, _) => "Times",
        }
    }

    /// The leftmost number and the `(operator, right operand)` pairs above it,
    /// innermost first.
    fn left_spine(&self) -> (i32, Vec<(Operator, &Expr)>) {
        let mut spine = Vec::new();
        let mut node = self;
        let first = loop {
            match node {
                Expr::Number(n) => break *n,
                Expr::Plus(left, right) => {
                    spine.push((Operator::Plus, right.as_ref()));
                    node = left;
                }
                Expr::Times(left, right) => {
                    spine.push((Operator::Times, right.as_ref()));
                    node = left;
                }
            }
        };
        spine.reverse();
        (first, spine)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (first, spine) = self.left_spine();
        for _ in 0..spine.len() {
            f.write_str("(")?;
        }
        write!(f, "{}", first)?;
        for (operator, right) in spine {
            write!(f, "){}({})", operator.symbol(), right)?;
        }
        Ok(())
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut node) = pending.pop() {
            detach_children(&mut node, &mut pending);
        }
    }
}

/// Moves interior children onto `pending`, leaving numbers behind, so no
/// drop recurses more than one level.
fn detach_children(expr: &mut Expr, pending: &mut Vec<Expr>) {
    if let Expr::Plus(left, right) | Expr::Times(left, right) = expr {
        for child in [left, right] {
            if !matches!(**child, Expr::Number(_)) {
                pending.push(mem::replace(child.as_mut(), Expr::Number(0)));
            }
        }
    }
}
