//! Intexpr error handling.
//!
//! Every failure of the parse → build → evaluate pipeline is an
//! [`IntExprError`]. Errors never embed the source text; callers that want a
//! rendered diagnostic attach it through [`SourceContext::report`].

use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

use crate::syntax::Span;

pub type Result<T> = std::result::Result<T, IntExprError>;

// ============================================================================
// SOURCE CONTEXT - Error reporting infrastructure
// ============================================================================

/// Named source text used to render diagnostics.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Source context for an expression given directly on the command line.
    pub fn inline(content: impl Into<String>) -> Self {
        Self::new("<input>", content)
    }

    /// Wraps an error into a miette report with this source attached.
    pub fn report(&self, error: IntExprError) -> Report {
        Report::new(error).with_source_code(NamedSource::new(
            self.name.clone(),
            self.content.clone(),
        ))
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum IntExprError {
    /// Input text does not match the grammar. The builder is never invoked.
    #[error("Parse error: {message}")]
    #[diagnostic(
        code(intexpr::parse::failure),
        help("expressions are made of integers, '+', '*' and parentheses")
    )]
    ParseFailure {
        message: String,
        #[label("{message}")]
        span: Option<SourceSpan>,
    },

    /// A NUMBER terminal whose text is not a valid 32-bit integer.
    #[error("Build error: invalid integer literal '{value}'")]
    #[diagnostic(
        code(intexpr::build::invalid_literal),
        help("literals must fit in a signed 32-bit integer")
    )]
    InvalidLiteral {
        value: String,
        #[label("invalid literal")]
        span: Option<SourceSpan>,
    },

    /// The parse tree does not have the shape the grammar guarantees.
    #[error("Internal error: {message}")]
    #[diagnostic(
        code(intexpr::build::invariant),
        help("this is an internal error, the parse tree does not match the grammar")
    )]
    InvariantViolation {
        message: String,
        #[label("here")]
        span: Option<SourceSpan>,
    },

    #[error("Build error: parentheses nested deeper than {limit} levels")]
    #[diagnostic(
        code(intexpr::build::too_deep),
        help("simplify the expression or raise --max-depth")
    )]
    TooDeep {
        limit: usize,
        #[label("nesting limit exceeded")]
        span: Option<SourceSpan>,
    },

    #[error("Evaluation error: integer overflow computing {left} {operation} {right}")]
    #[diagnostic(code(intexpr::eval::overflow))]
    ArithmeticOverflow {
        operation: char,
        left: i32,
        right: i32,
    },
}

/// Coarse classification of an [`IntExprError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ParseFailure,
    InvalidLiteral,
    InvariantViolation,
    TooDeep,
    ArithmeticOverflow,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ParseFailure => "ParseFailure",
            ErrorKind::InvalidLiteral => "InvalidLiteral",
            ErrorKind::InvariantViolation => "InvariantViolation",
            ErrorKind::TooDeep => "TooDeep",
            ErrorKind::ArithmeticOverflow => "ArithmeticOverflow",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IntExprError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ParseFailure { .. } => ErrorKind::ParseFailure,
            Self::InvalidLiteral { .. } => ErrorKind::InvalidLiteral,
            Self::InvariantViolation { .. } => ErrorKind::InvariantViolation,
            Self::TooDeep { .. } => ErrorKind::TooDeep,
            Self::ArithmeticOverflow { .. } => ErrorKind::ArithmeticOverflow,
        }
    }

    pub(crate) fn invariant(message: impl Into<String>, span: Span) -> Self {
        Self::InvariantViolation {
            message: message.into(),
            span: Some(to_source_span(span)),
        }
    }
}

pub fn to_source_span(span: Span) -> SourceSpan {
    SourceSpan::from(span.start..span.end)
}
