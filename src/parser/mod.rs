//! Parse and dispatch loop.
//!
//! Each command level scans its own options, applies their actions, then
//! looks at the first remaining token: a subcommand name recurses into that
//! subcommand with the remaining tokens, anything else is a usage error
//! unless the command declares positional arguments. When no tokens remain
//! the command's callback decides the exit status.

use std::io::{self, Write};

use tracing::{debug, warn};

use crate::error::{CliError, ExitStatus, UsageError};
use crate::help::{self, HelpLayout};
use crate::model::{Action, ArgRequirement, Command};
use crate::program::Program;
use crate::scan::{ScanSpec, Scanner, Token};
use crate::value::ValueType;

#[cfg(test)]
mod tests;

/// Parses argument vectors against a command tree.
///
/// Help requested through a [`Action::Help`] option goes to `out` and
/// scanning carries on with the next token; diagnostics and the help printed
/// after a usage error go to `err`.
///
/// ```
/// use std::cell::RefCell;
/// use argtree::{CliOption, Command, ExitStatus, Parser, Program};
///
/// # fn main() -> Result<(), argtree::CliError> {
/// let path = RefCell::new(None);
/// let mut root = Command::new("reuse");
/// root.add_option(CliOption::store('l', &path).long("ll"))?;
///
/// let program = Program::new("reuse");
/// let mut parser = Parser::new(&program, Vec::<u8>::new(), Vec::<u8>::new());
/// let status = parser.parse(&root, &["reuse", "--ll", "foo"])?;
///
/// assert_eq!(status, ExitStatus::SUCCESS);
/// assert_eq!(path.borrow().as_deref(), Some("foo"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Parser<'p, O, E> {
    program: &'p Program,
    layout: HelpLayout,
    out: O,
    err: E,
}

impl<'p> Parser<'p, io::Stdout, io::Stderr> {
    /// Creates a parser writing to the process's stdout and stderr.
    #[must_use]
    pub fn stdio(program: &'p Program) -> Self {
        Self::new(program, io::stdout(), io::stderr())
    }
}

impl<'p, O: Write, E: Write> Parser<'p, O, E> {
    #[must_use]
    pub fn new(program: &'p Program, out: O, err: E) -> Self {
        Self {
            program,
            layout: HelpLayout::default(),
            out,
            err,
        }
    }

    /// Replaces the default help layout.
    #[must_use]
    pub const fn with_layout(mut self, layout: HelpLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Returns the output and error writers.
    pub fn into_writers(self) -> (O, E) {
        (self.out, self.err)
    }

    /// Parses `argv` against `command`, where `argv[0]` is the program name.
    ///
    /// Option slots are written as options are matched, so a failed parse may
    /// leave earlier slots updated.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Usage`] for anything the user got wrong (already
    /// reported on the error writer), [`CliError::InvalidArgument`] for option
    /// definitions the parser cannot carry out, [`CliError::OutOfMemory`] if
    /// scanner scratch space cannot be allocated, and [`CliError::Io`] if help
    /// cannot be written.
    pub fn parse<S: AsRef<str>>(
        &mut self,
        command: &Command<'_>,
        argv: &[S],
    ) -> Result<ExitStatus, CliError> {
        let args: Vec<&str> = argv.iter().map(AsRef::as_ref).collect();
        let path = self.program.name().to_string();
        self.parse_level(command, &args, &path)
    }

    fn parse_level(
        &mut self,
        command: &Command<'_>,
        args: &[&str],
        path: &str,
    ) -> Result<ExitStatus, CliError> {
        // The scanner spec lives only while this level scans.
        let position = {
            let spec = ScanSpec::build(command.options())?;
            debug!(command = command.name(), spec = spec.short_spec(), "scanning options");

            let mut scanner = Scanner::new(&spec, args);
            for token in scanner.by_ref() {
                let error = match token {
                    Token::Flag {
                        flag,
                        spelling,
                        argument,
                    } => {
                        self.dispatch(command, path, flag, spelling, argument)?;
                        continue;
                    }
                    Token::MissingArgument(spelling) => UsageError::MissingArgument(spelling),
                    Token::UnknownOption(spelling) => UsageError::UnknownOption(spelling),
                    Token::UnexpectedArgument(spelling) => UsageError::UnexpectedArgument(spelling),
                };
                return Err(self.usage_error(command, path, error));
            }
            scanner.position()
        };

        let rest = &args[position..];
        let Some(&first) = rest.first() else {
            debug!(command = command.name(), "invoking command");
            return Ok(command.invoke(&[]));
        };

        if let Some(subcommand) = command.subcommand(first) {
            debug!(command = command.name(), subcommand = first, "entering subcommand");
            return self.parse_level(subcommand, rest, &format!("{path} {first}"));
        }

        if !command.arguments().is_empty() {
            debug!(command = command.name(), positionals = rest.len(), "invoking command");
            return Ok(command.invoke(rest));
        }

        Err(self.usage_error(command, path, UsageError::UnknownSubcommand(first.to_string())))
    }

    fn dispatch(
        &mut self,
        command: &Command<'_>,
        path: &str,
        flag: char,
        spelling: String,
        argument: Option<&str>,
    ) -> Result<(), CliError> {
        let Some(option) = command.option(flag) else {
            return Err(self.usage_error(command, path, UsageError::UnknownOption(spelling)));
        };
        debug!(command = command.name(), option = %spelling, action = ?option.action(), "dispatching option");

        let slot = match (option.action(), option.slot()) {
            (Action::Help, _) => {
                let text = help::render(command, path, &self.layout);
                self.out.write_all(text.as_bytes())?;
                self.out.flush()?;
                return Ok(());
            }
            (_, None) => {
                return Err(CliError::invalid(format!("option {spelling} has no slot")));
            }
            (_, Some(slot)) => slot,
        };

        let outcome = if option.action() == Action::Store {
            if option.argument() == ArgRequirement::None {
                return Err(CliError::invalid(format!(
                    "store option {spelling} does not accept an argument"
                )));
            }
            if argument.is_none() && slot.value_type() != ValueType::Bool {
                return Err(self.usage_error(command, path, UsageError::MissingArgument(spelling)));
            }
            slot.store(argument)
        } else {
            slot.accumulate(argument).ok_or_else(|| {
                CliError::invalid(format!("option {spelling} cannot accumulate into a string"))
            })?
        };

        let Err(source) = outcome else {
            return Ok(());
        };
        let error = match argument {
            Some(value) => UsageError::InvalidValue {
                option: spelling,
                value: value.to_string(),
                source,
            },
            None => UsageError::OutOfRange {
                option: spelling,
                source,
            },
        };
        Err(self.usage_error(command, path, error))
    }

    /// Reports `error` and the command's help on the error writer.
    fn usage_error(&mut self, command: &Command<'_>, path: &str, error: UsageError) -> CliError {
        debug!(command = command.name(), %error, "usage error");

        let report = format!(
            "{}: {error}\n{}",
            self.program.short_name(),
            help::render(command, path, &self.layout)
        );
        if let Err(io_error) = self
            .err
            .write_all(report.as_bytes())
            .and_then(|()| self.err.flush())
        {
            warn!(%io_error, "failed to report usage error");
        }

        CliError::Usage(error)
    }
}

/// Parses `argv` with the process-wide [`Program`], printing to stdout and
/// stderr.
///
/// The program is initialized from `argv[0]` (or the command's name for an
/// empty `argv`) unless that already happened.
///
/// # Errors
///
/// See [`Parser::parse`].
pub fn parse<S: AsRef<str>>(command: &Command<'_>, argv: &[S]) -> Result<ExitStatus, CliError> {
    let argv0 = argv.first().map_or(command.name(), AsRef::as_ref);
    let program = Program::init(argv0);
    Parser::stdio(program).parse(command, argv)
}
