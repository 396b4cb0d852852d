//! The intexpr Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions. It is the only place where errors are caught
//! and reported to the user.

use clap::Parser;
use miette::{miette, IntoDiagnostic, WrapErr};
use std::{fs, path::Path, process};
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Command, IntExprArgs, DEMO_INPUT};
use crate::engine::{evaluate, evaluate_lines};
use crate::errors::SourceContext;
use crate::syntax::{parse, parse_tree, ParseOptions};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = IntExprArgs::parse();
    init_logging(args.verbose);

    let options = args.grammar.parse_options();
    let command = args.command.unwrap_or(Command::Eval {
        expr: DEMO_INPUT.to_string(),
        json: false,
    });

    if let Err(report) = dispatch(command, &options) {
        eprintln!("{:?}", report);
        process::exit(1);
    }
}

fn dispatch(command: Command, options: &ParseOptions) -> miette::Result<()> {
    match command {
        Command::Eval { expr, json } => handle_eval(&expr, json, options),
        Command::Ast { expr, json } => handle_ast(&expr, json, options),
        Command::Tree { expr } => handle_tree(&expr, options),
        Command::Run { file } => handle_run(&file, options),
    }
}

/// `-v` enables debug events, `-vv` trace events. `RUST_LOG` overrides both.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("intexpr={}", level)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_eval(expr: &str, json: bool, options: &ParseOptions) -> miette::Result<()> {
    let evaluation = evaluate(expr, options).map_err(|e| SourceContext::inline(expr).report(e))?;
    let mut stdout = output::stdout();
    if json {
        output::write_json(&mut stdout, &evaluation).into_diagnostic()
    } else {
        output::write_evaluation(&mut stdout, &evaluation).into_diagnostic()
    }
}

fn handle_ast(expr: &str, json: bool, options: &ParseOptions) -> miette::Result<()> {
    let ast = parse(expr, options).map_err(|e| SourceContext::inline(expr).report(e))?;
    let mut stdout = output::stdout();
    if json {
        output::write_json(&mut stdout, &ast).into_diagnostic()
    } else {
        output::write_ast(&mut stdout, &ast).into_diagnostic()
    }
}

fn handle_tree(expr: &str, options: &ParseOptions) -> miette::Result<()> {
    let tree = parse_tree(expr, options).map_err(|e| SourceContext::inline(expr).report(e))?;
    output::write_tree(&mut output::stdout(), &tree).into_diagnostic()
}

/// Evaluates each line, reporting failures as they occur. Fails if any line failed.
fn handle_run(path: &Path, options: &ParseOptions) -> miette::Result<()> {
    let source = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;

    let results = evaluate_lines(&source, options);
    let mut stdout = output::stdout();
    let mut failed = 0;

    for line in results.iter() {
        match &line.result {
            Ok(evaluation) => {
                output::write_line_evaluation(&mut stdout, line.line, evaluation).into_diagnostic()?
            }
            Err(error) => {
                failed += 1;
                let context =
                    SourceContext::new(format!("{}:{}", path.display(), line.line), &line.input);
                eprintln!("{:?}", context.report(error.clone()));
            }
        }
    }

    if failed > 0 {
        return Err(miette!(
            "{} of {} expressions in {} failed",
            failed,
            results.len(),
            path.display()
        ));
    }
    Ok(())
}
