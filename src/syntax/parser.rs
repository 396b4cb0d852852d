//! Intexpr Parser
//!
//! Runs one of the pest grammars over the input and lowers the resulting
//! pairs into an owned [`ParseTree`]. This stage is purely syntactic: input
//! that does not match the grammar is rejected here and never reaches the
//! builder.

use pest::{error::Error, iterators::Pair, Parser, RuleType};
use tracing::debug;

use crate::ast::Expr;
use crate::errors::{to_source_span, IntExprError, Result};
use crate::syntax::builder::Builder;
use crate::syntax::tree::{ParseTree, Symbol};
use crate::syntax::Span;

/// Default limit on parenthesis nesting. Deep enough for real input while the
/// grammar's recursion still fits a 2 MiB thread stack.
pub const DEFAULT_MAX_DEPTH: usize = 128;

mod additive {
    use pest_derive::Parser;

    #[derive(Parser)]
    #[grammar = "syntax/additive.pest"]
    pub struct AdditiveParser;
}

mod arithmetic {
    use pest_derive::Parser;

    #[derive(Parser)]
    #[grammar = "syntax/arithmetic.pest"]
    pub struct ArithmeticParser;
}

/// Which grammar to parse with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Grammar {
    /// `+` only: sums of literals and parenthesized sums.
    Additive,
    /// `+` and `*` with the usual precedence.
    #[default]
    Arithmetic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub grammar: Grammar,
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            grammar: Grammar::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn with_grammar(mut self, grammar: Grammar) -> Self {
        self.grammar = grammar;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parse text into a labeled parse tree rooted at ROOT.
pub fn parse_tree(input: &str, options: &ParseOptions) -> Result<ParseTree> {
    debug!(grammar = ?options.grammar, input, "parsing expression");
    check_nesting(input, options.max_depth)?;

    let root = match options.grammar {
        Grammar::Additive => {
            let mut pairs = additive::AdditiveParser::parse(additive::Rule::root, input)
                .map_err(convert_parse_error)?;
            pairs.next().and_then(lower)
        }
        Grammar::Arithmetic => {
            let mut pairs = arithmetic::ArithmeticParser::parse(arithmetic::Rule::root, input)
                .map_err(convert_parse_error)?;
            pairs.next().and_then(lower)
        }
    };

    root.ok_or_else(|| IntExprError::invariant("grammar produced no root", Span::new(0, input.len())))
}

/// Parse text straight into an AST.
pub fn parse(input: &str, options: &ParseOptions) -> Result<Expr> {
    let tree = parse_tree(input, options)?;
    Builder::new(options.max_depth).build(&tree)
}

// ============================================================================
// LOWERING
// ============================================================================

/// Maps a grammar's pest rules onto [`Symbol`]s. `None` marks rules that are
/// not part of the labeled tree (EOI).
trait LabeledRule: RuleType {
    fn symbol(self) -> Option<Symbol>;
}

impl LabeledRule for additive::Rule {
    fn symbol(self) -> Option<Symbol> {
        use additive::Rule;
        match self {
            Rule::root => Some(Symbol::Root),
            Rule::sum => Some(Symbol::Sum),
            Rule::primitive => Some(Symbol::Primitive),
            Rule::whitespace => Some(Symbol::Whitespace),
            Rule::number => Some(Symbol::Number),
            Rule::EOI => None,
        }
    }
}

impl LabeledRule for arithmetic::Rule {
    fn symbol(self) -> Option<Symbol> {
        use arithmetic::Rule;
        match self {
            Rule::root => Some(Symbol::Root),
            Rule::sum => Some(Symbol::Sum),
            Rule::product => Some(Symbol::Product),
            Rule::primitive => Some(Symbol::Primitive),
            Rule::whitespace => Some(Symbol::Whitespace),
            Rule::number => Some(Symbol::Number),
            Rule::EOI => None,
        }
    }
}

fn lower<R: LabeledRule>(pair: Pair<'_, R>) -> Option<ParseTree> {
    let symbol = pair.as_rule().symbol()?;
    let span = Span::new(pair.as_span().start(), pair.as_span().end());
    let text = pair.as_str().to_string();
    let children = pair.into_inner().filter_map(lower).collect();
    Some(ParseTree::new(symbol, text, span, children))
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Rejects input whose parenthesis nesting exceeds `max_depth` before the
/// grammar recurses into it.
fn check_nesting(input: &str, max_depth: usize) -> Result<()> {
    let mut depth = 0usize;
    for (offset, ch) in input.char_indices() {
        match ch {
            '(' => {
                depth += 1;
                if depth > max_depth {
                    return Err(IntExprError::TooDeep {
                        limit: max_depth,
                        span: Some(to_source_span(Span::new(offset, offset + 1))),
                    });
                }
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

fn convert_parse_error<R: RuleType>(error: Error<R>) -> IntExprError {
    let span = match error.location {
        pest::error::InputLocation::Pos(pos) => Span::new(pos, pos),
        pest::error::InputLocation::Span((start, end)) => Span::new(start, end),
    };

    IntExprError::ParseFailure {
        message: error.variant.message().into_owned(),
        span: Some(to_source_span(span)),
    }
}
