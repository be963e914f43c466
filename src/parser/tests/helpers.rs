//! Shared test utilities for the parser module.

use std::cell::{Cell, RefCell};

use crate::error::{CliError, ExitStatus};
use crate::model::{Argument, CliOption, Command};
use crate::parser::Parser;
use crate::program::Program;

/// Root help of the tree built by [`reuse_tree`].
pub const REUSE_HELP: &str = "\
Usage: reuse [OPTIONS]...

Options:
  -h, --help    Print this help output
  -l, --ll arg  Long argument

Subcommands:
  init      initialize REUSE project
  longlong
";

/// Help of the `init` subcommand built by [`reuse_tree`].
pub const INIT_HELP: &str = "\
Usage: reuse init [OPTIONS]... [<file> <other thing>]...

initialize REUSE project

Arguments:
  file         hello world
  other thing

Options:
  -h, --help  Print this help output
";

/// State the `reuse` tree writes into.
#[derive(Debug, Default)]
pub struct ReuseSlots {
    pub ll: RefCell<Option<String>>,
    pub init_runs: Cell<u32>,
    pub positionals: RefCell<Vec<String>>,
}

/// Builds `reuse [-h] [-l arg] {init [-h] [file] [other thing], longlong}`.
pub fn reuse_tree(slots: &ReuseSlots) -> Command<'_> {
    let mut init = Command::new("init")
        .description("initialize REUSE project")
        .callback(move |invocation| {
            slots.init_runs.set(slots.init_runs.get() + 1);
            *slots.positionals.borrow_mut() =
                invocation.positionals().iter().map(ToString::to_string).collect();
            ExitStatus::SUCCESS
        });
    init.add_option(
        CliOption::help('h')
            .long("help")
            .description("Print this help output"),
    )
    .unwrap()
    .add_arguments([
        Argument::new("file").description("hello world"),
        Argument::new("other thing"),
    ])
    .unwrap();

    let mut root = Command::new("reuse");
    root.add_options([
        CliOption::help('h')
            .long("help")
            .description("Print this help output"),
        CliOption::store('l', &slots.ll)
            .long("ll")
            .description("Long argument"),
    ])
    .unwrap()
    .add_subcommands([init, Command::new("longlong")])
    .unwrap();
    root
}

/// Outcome of one parse against in-memory writers.
#[derive(Debug)]
pub struct Run {
    pub result: Result<ExitStatus, CliError>,
    pub out: String,
    pub err: String,
}

impl Run {
    /// Exit status the process would report.
    pub fn status(&self) -> ExitStatus {
        match &self.result {
            Ok(status) => *status,
            Err(error) => error.exit_status(),
        }
    }
}

/// Parses `argv` as program `reuse`, capturing both writers.
pub fn run(command: &Command<'_>, argv: &[&str]) -> Run {
    let program = Program::new("reuse");
    let mut parser = Parser::new(&program, Vec::new(), Vec::new());
    let result = parser.parse(command, argv);
    let (out, err) = parser.into_writers();
    Run {
        result,
        out: String::from_utf8(out).unwrap(),
        err: String::from_utf8(err).unwrap(),
    }
}
