//! `reuse` - demo command tree for `argtree`
//!
//! Mirrors the top level of the REUSE compliance tool: two root options,
//! an `init` subcommand taking positional files and an empty `longlong`.

use std::cell::{Cell, RefCell};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use argtree::{Argument, CliOption, Command, ExitStatus, Parser, Program};

const ROOT_DESCRIPTION: &str = "\
reuse is a tool for compliance with the REUSE recommendations. See
<https://reuse.software/> for more information, and
<https://reuse.readthedocs.io/> for the online documentation.

This version of reuse is compatible with version 3.0 of the REUSE
Specification.";

fn main() -> ExitCode {
    // Logs go to stderr so help output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let argv: Vec<String> = std::env::args().collect();
    let program = Program::init(argv.first().map_or("reuse", String::as_str));

    let long = RefCell::new(None);
    let verbose = Cell::new(0_u8);
    let cli = match build_cli(&long, &verbose) {
        Ok(cli) => cli,
        Err(error) => {
            eprintln!("{}: {error:#}", program.short_name());
            return ExitStatus::DATA_ERROR.into();
        }
    };

    match Parser::stdio(program).parse(&cli, &argv) {
        Ok(status) => {
            debug!(long = ?long.borrow(), verbose = verbose.get(), %status, "finished");
            status.into()
        }
        Err(error) => {
            // Usage errors were already reported together with the help text.
            if !error.is_usage() {
                eprintln!("{}: {error}", program.short_name());
            }
            error.exit_status().into()
        }
    }
}

fn build_cli<'a>(long: &'a RefCell<Option<String>>, verbose: &'a Cell<u8>) -> Result<Command<'a>> {
    let mut init = Command::new("init")
        .description("initialize REUSE project")
        .callback(move |invocation| {
            if verbose.get() > 0 {
                println!("initializing {} file(s)", invocation.positionals().len());
            }
            for file in invocation.positionals() {
                println!("{file}");
            }
            ExitStatus::SUCCESS
        });
    init.add_arguments([
        Argument::new("file").description("hello world"),
        Argument::new("other thing"),
    ])
    .context("Failed to add init arguments")?;

    let mut root = Command::new("reuse").description(ROOT_DESCRIPTION);
    root.add_options([
        CliOption::help('h')
            .long("help")
            .description("Print this help output"),
        CliOption::store('l', long)
            .long("ll")
            .description("Long argument"),
        CliOption::accumulate('v', verbose)
            .long("verbose")
            .description("Increase output verbosity"),
    ])
    .context("Failed to add root options")?;
    root.add_subcommands([init, Command::new("longlong")])
        .context("Failed to add root subcommands")?;

    Ok(root)
}
