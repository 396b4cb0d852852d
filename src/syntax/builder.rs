//! Parse tree to AST transformation.
//!
//! The builder assumes the tree was produced by one of the crate's grammars.
//! It does not repair malformed trees: a missing required child or a
//! WHITESPACE node reached through dispatch is reported as
//! [`IntExprError::InvariantViolation`].

use tracing::trace;

use crate::ast::Expr;
use crate::errors::{to_source_span, IntExprError, Result};
use crate::syntax::parser::DEFAULT_MAX_DEPTH;
use crate::syntax::tree::{ParseTree, Symbol};

/// Converts a parse tree into an [`Expr`] with the default nesting limit.
pub fn build(tree: &ParseTree) -> Result<Expr> {
    Builder::default().build(tree)
}

/// AST builder with a limit on parenthesis nesting.
///
/// Only PRIMITIVE → SUM steps count towards the limit: every recursive path
/// through the builder passes through one, and folds of any length grow
/// only the left spine of the AST, which [`Expr`] walks without recursion.
#[derive(Debug, Clone, Copy)]
pub struct Builder {
    max_depth: usize,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Builder {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn build(&self, tree: &ParseTree) -> Result<Expr> {
        self.build_node(tree, 0)
    }

    fn build_node(&self, tree: &ParseTree, nesting: usize) -> Result<Expr> {
        trace!(symbol = %tree.symbol(), nesting, text = tree.contents(), "building node");

        match tree.symbol() {
            Symbol::Number => {
                let text = tree.contents();
                let n = text.parse::<i32>().map_err(|_| IntExprError::InvalidLiteral {
                    value: text.to_string(),
                    span: Some(to_source_span(tree.span())),
                })?;
                Ok(Expr::Number(n))
            }

            Symbol::Primitive => {
                // Either a bare literal or a parenthesized sum.
                if let Some(number) = tree.first_child(Symbol::Number) {
                    return self.build_node(number, nesting);
                }
                let sum = tree.first_child(Symbol::Sum).ok_or_else(|| {
                    IntExprError::invariant("primitive has neither a number nor a sum", tree.span())
                })?;
                if nesting + 1 > self.max_depth {
                    return Err(IntExprError::TooDeep {
                        limit: self.max_depth,
                        span: Some(to_source_span(tree.span())),
                    });
                }
                self.build_node(sum, nesting + 1)
            }

            Symbol::Sum => {
                let addends = tree
                    .children()
                    .iter()
                    .filter(|c| matches!(c.symbol(), Symbol::Primitive | Symbol::Product));
                self.fold(tree, nesting, addends, Expr::plus, "sum must have at least one addend")
            }

            Symbol::Product => {
                let factors = tree.children_by_symbol(Symbol::Primitive);
                self.fold(tree, nesting, factors, Expr::times, "product must have at least one factor")
            }

            Symbol::Root => {
                let sum = tree
                    .first_child(Symbol::Sum)
                    .ok_or_else(|| IntExprError::invariant("root has no sum", tree.span()))?;
                self.build_node(sum, nesting)
            }

            Symbol::Whitespace => Err(IntExprError::invariant(
                "whitespace must never be built",
                tree.span(),
            )),
        }
    }

    /// Left-associative fold: `a, b, c` becomes `combine(combine(a, b), c)`.
    fn fold<'a>(
        &self,
        tree: &ParseTree,
        nesting: usize,
        operands: impl Iterator<Item = &'a ParseTree>,
        combine: fn(Expr, Expr) -> Expr,
        empty_message: &str,
    ) -> Result<Expr> {
        let mut acc: Option<Expr> = None;
        for operand in operands {
            let next = self.build_node(operand, nesting)?;
            acc = Some(match acc {
                None => next,
                Some(prev) => combine(prev, next),
            });
        }
        acc.ok_or_else(|| IntExprError::invariant(empty_message, tree.span()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn number(text: &str) -> ParseTree {
        ParseTree::node(Symbol::Primitive, vec![ParseTree::leaf(Symbol::Number, text)])
    }

    fn sum(children: Vec<ParseTree>) -> ParseTree {
        ParseTree::node(Symbol::Sum, children)
    }

    #[test]
    fn number_leaf_builds_number() {
        let tree = ParseTree::leaf(Symbol::Number, "0");
        assert_eq!(build(&tree), Ok(Expr::Number(0)));
    }

    #[test]
    fn invalid_literal_is_propagated() {
        let tree = ParseTree::leaf(Symbol::Number, "12a");
        let err = build(&tree).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLiteral);
    }

    #[test]
    fn sum_folds_left_and_skips_whitespace() {
        let tree = sum(vec![
            number("1"),
            ParseTree::leaf(Symbol::Whitespace, " "),
            number("2"),
            ParseTree::leaf(Symbol::Whitespace, " "),
            number("3"),
        ]);
        let expected = Expr::plus(Expr::plus(Expr::number(1), Expr::number(2)), Expr::number(3));
        assert_eq!(build(&tree), Ok(expected));
    }

    #[test]
    fn primitive_prefers_number_child() {
        let tree = ParseTree::node(
            Symbol::Primitive,
            vec![
                ParseTree::leaf(Symbol::Whitespace, " "),
                ParseTree::leaf(Symbol::Number, "42"),
            ],
        );
        assert_eq!(build(&tree), Ok(Expr::Number(42)));
    }

    #[test]
    fn primitive_recurses_into_sum() {
        let tree = ParseTree::node(Symbol::Primitive, vec![sum(vec![number("2"), number("89")])]);
        assert_eq!(build(&tree), Ok(Expr::plus(Expr::number(2), Expr::number(89))));
    }

    #[test]
    fn root_returns_its_sum() {
        let tree = ParseTree::node(
            Symbol::Root,
            vec![ParseTree::leaf(Symbol::Whitespace, " "), sum(vec![number("5")])],
        );
        assert_eq!(build(&tree), Ok(Expr::Number(5)));
    }

    #[test]
    fn product_folds_with_times() {
        let tree = ParseTree::node(Symbol::Product, vec![number("2"), number("3"), number("4")]);
        let expected = Expr::times(Expr::times(Expr::number(2), Expr::number(3)), Expr::number(4));
        assert_eq!(build(&tree), Ok(expected));
    }

    #[test]
    fn sum_accepts_product_addends() {
        let product = ParseTree::node(Symbol::Product, vec![number("3"), number("4")]);
        let tree = sum(vec![number("2"), product]);
        assert_eq!(build(&tree).and_then(|e| e.value()), Ok(14));
    }

    #[test]
    fn empty_sum_is_an_invariant_violation() {
        let tree = sum(vec![ParseTree::leaf(Symbol::Whitespace, "  ")]);
        let err = build(&tree).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);
    }

    #[test]
    fn empty_product_is_an_invariant_violation() {
        let tree = ParseTree::node(Symbol::Product, vec![]);
        assert_eq!(build(&tree).unwrap_err().kind(), ErrorKind::InvariantViolation);
    }

    #[test]
    fn whitespace_is_an_invariant_violation() {
        let tree = ParseTree::leaf(Symbol::Whitespace, " ");
        assert_eq!(build(&tree).unwrap_err().kind(), ErrorKind::InvariantViolation);
    }

    #[test]
    fn childless_primitive_and_root_are_invariant_violations() {
        let primitive = ParseTree::node(Symbol::Primitive, vec![]);
        assert_eq!(build(&primitive).unwrap_err().kind(), ErrorKind::InvariantViolation);

        let root = ParseTree::node(Symbol::Root, vec![ParseTree::leaf(Symbol::Whitespace, " ")]);
        assert_eq!(build(&root).unwrap_err().kind(), ErrorKind::InvariantViolation);
    }

    /// `levels` parenthesized sums wrapped around a single literal.
    fn nested(levels: usize) -> ParseTree {
        (0..levels).fold(number("1"), |inner, _| {
            ParseTree::node(Symbol::Primitive, vec![sum(vec![inner])])
        })
    }

    #[test]
    fn nesting_limit_counts_parenthesized_sums() {
        let tree = ParseTree::node(Symbol::Root, vec![sum(vec![nested(3)])]);
        assert_eq!(Builder::new(3).build(&tree), Ok(Expr::Number(1)));
        let err = Builder::new(2).build(&tree).unwrap_err();
        assert!(matches!(err, IntExprError::TooDeep { limit: 2, .. }));
    }

    #[test]
    fn long_flat_sum_is_not_limited_by_nesting() {
        let addends = (0..5_000).map(|_| number("1")).collect();
        let expr = Builder::new(1).build(&sum(addends)).unwrap();
        assert_eq!(expr.value(), Ok(5_000));
    }
}
