//! Labeled parse tree handed from the grammar to the AST builder.

use std::fmt;

use super::Span;

/// Grammar-rule labels. Every node of a [`ParseTree`] carries one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Root,
    Sum,
    Product,
    Primitive,
    Whitespace,
    Number,
}

impl Symbol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::Root => "ROOT",
            Symbol::Sum => "SUM",
            Symbol::Product => "PRODUCT",
            Symbol::Primitive => "PRIMITIVE",
            Symbol::Whitespace => "WHITESPACE",
            Symbol::Number => "NUMBER",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the parse tree: its label, the text it matched, where, and its
/// children in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    symbol: Symbol,
    text: String,
    span: Span,
    children: Vec<ParseTree>,
}

impl ParseTree {
    pub fn new(symbol: Symbol, text: impl Into<String>, span: Span, children: Vec<ParseTree>) -> Self {
        Self {
            symbol,
            text: text.into(),
            span,
            children,
        }
    }

    /// A terminal node. The span covers the text as if it started at offset 0.
    pub fn leaf(symbol: Symbol, text: impl Into<String>) -> Self {
        let text = text.into();
        let span = Span::new(0, text.len());
        Self::new(symbol, text, span, vec![])
    }

    /// An interior node whose text is the concatenation of its children.
    pub fn node(symbol: Symbol, children: Vec<ParseTree>) -> Self {
        let text: String = children.iter().map(|c| c.text.as_str()).collect();
        let span = Span::new(0, text.len());
        Self::new(symbol, text, span, children)
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Raw text matched by this node.
    pub fn contents(&self) -> &str {
        &self.text
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn children(&self) -> &[ParseTree] {
        &self.children
    }

    /// Children labeled `symbol`, left to right.
    pub fn children_by_symbol(&self, symbol: Symbol) -> impl Iterator<Item = &ParseTree> + '_ {
        self.children.iter().filter(move |c| c.symbol == symbol)
    }

    pub fn first_child(&self, symbol: Symbol) -> Option<&ParseTree> {
        self.children_by_symbol(symbol).next()
    }

    /// Visits every node in pre-order with its distance from `self`, stopping
    /// at the first error. Both outline renderings go through here.
    pub fn outline<E>(
        &self,
        mut visit: impl FnMut(usize, &ParseTree) -> Result<(), E>,
    ) -> Result<(), E> {
        let mut stack = vec![(0, self)];
        while let Some((level, node)) = stack.pop() {
            visit(level, node)?;
            stack.extend(node.children.iter().rev().map(|child| (level + 1, child)));
        }
        Ok(())
    }
}

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.outline(|level, node| {
            writeln!(f, "{:indent$}{} {:?}", "", node.symbol, node.text, indent = level * 2)
        })
    }
}
