//! Handles all user-facing output for the CLI.
//!
//! Every writer takes a `WriteColor` so commands can print to a colored
//! terminal while tests capture plain text in a `termcolor::Buffer`.

use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::ast::Expr;
use crate::engine::Evaluation;
use crate::syntax::ParseTree;

/// Stdout stream that only emits colors when attached to a terminal.
pub fn stdout() -> StandardStream {
    let choice = if io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Prints `<input>=<rendered>=<value>`.
pub fn write_evaluation<W: WriteColor>(out: &mut W, evaluation: &Evaluation) -> io::Result<()> {
    write!(out, "{}=", evaluation.input)?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
    write!(out, "{}", evaluation.expr)?;
    out.reset()?;
    write!(out, "=")?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    write!(out, "{}", evaluation.value)?;
    out.reset()?;
    writeln!(out)
}

pub fn write_ast<W: WriteColor>(out: &mut W, expr: &Expr) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
    writeln!(out, "{}", expr)?;
    out.reset()?;
    writeln!(
        out,
        "{}: depth {}, {} nodes",
        expr.type_name(),
        expr.depth(),
        expr.node_count()
    )
}

/// Prints the parse tree outline with the labels highlighted.
pub fn write_tree<W: WriteColor>(out: &mut W, tree: &ParseTree) -> io::Result<()> {
    tree.outline(|level, node| {
        write!(out, "{:indent$}", "", indent = level * 2)?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
        write!(out, "{}", node.symbol())?;
        out.reset()?;
        writeln!(out, " {:?}", node.contents())
    })
}

/// Prefixes a script line's evaluation with its line number.
pub fn write_line_evaluation<W: WriteColor>(
    out: &mut W,
    line: usize,
    evaluation: &Evaluation,
) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_dimmed(true))?;
    write!(out, "{:>4} | ", line)?;
    out.reset()?;
    write_evaluation(out, evaluation)
}

pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
