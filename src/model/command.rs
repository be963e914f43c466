//! Command tree nodes and their registration operations.

use std::fmt;

use crate::error::{CliError, ExitStatus};

use super::entries::{Entries, Keyed};
use super::option::{Argument, CliOption};

/// Callback run when a command is the last one matched on the command line.
pub type Callback<'a> = dyn Fn(&Invocation<'_, 'a>) -> ExitStatus + 'a;

/// What a callback learns about the invocation that reached it.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'c, 'a> {
    command: &'c Command<'a>,
    positionals: &'c [&'c str],
}

impl<'c, 'a> Invocation<'c, 'a> {
    pub(crate) const fn new(command: &'c Command<'a>, positionals: &'c [&'c str]) -> Self {
        Self {
            command,
            positionals,
        }
    }

    /// The matched command.
    #[must_use]
    pub const fn command(&self) -> &'c Command<'a> {
        self.command
    }

    /// Tokens left after option scanning, for commands declaring positionals.
    #[must_use]
    pub const fn positionals(&self) -> &'c [&'c str] {
        self.positionals
    }
}

/// One level of the command tree.
///
/// A command owns its options, positional arguments and subcommands, each
/// kept sorted (options by short flag, the others by name) and free of
/// duplicates.
///
/// ```
/// use std::cell::RefCell;
/// use argtree::{CliOption, Command};
///
/// # fn main() -> Result<(), argtree::CliError> {
/// let path = RefCell::new(None);
/// let mut root = Command::new("reuse");
/// root.add_option(CliOption::help('h').long("help"))?
///     .add_option(CliOption::store('l', &path).long("ll"))?
///     .add_subcommand(Command::new("init"))?;
///
/// assert_eq!(root.options().len(), 2);
/// assert!(root.subcommand("init").is_some());
/// # Ok(())
/// # }
/// ```
pub struct Command<'a> {
    name: String,
    description: Option<String>,
    options: Entries<CliOption<'a>>,
    arguments: Entries<Argument>,
    subcommands: Entries<Command<'a>>,
    callback: Option<Box<Callback<'a>>>,
}

impl<'a> Command<'a> {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            options: Entries::new(),
            arguments: Entries::new(),
            subcommands: Entries::new(),
            callback: None,
        }
    }

    /// Sets the free-form, possibly multi-line description shown in help.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the callback run when this command is the terminal match.
    #[must_use]
    pub fn callback(mut self, callback: impl Fn(&Invocation<'_, 'a>) -> ExitStatus + 'a) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Registers an option.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidArgument`] if the option definition is not
    /// representable (see [`CliOption::validate`]) and
    /// [`CliError::NotUnique`] if its short flag or long name is taken.
    pub fn add_option(&mut self, option: CliOption<'a>) -> Result<&mut Self, CliError> {
        option.validate()?;
        self.options.insert(option)?;
        Ok(self)
    }

    /// Registers options in order, stopping at the first failure.
    ///
    /// Options registered before the failure stay registered.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`Command::add_option`].
    pub fn add_options(
        &mut self,
        options: impl IntoIterator<Item = CliOption<'a>>,
    ) -> Result<&mut Self, CliError> {
        for option in options {
            self.add_option(option)?;
        }
        Ok(self)
    }

    /// Registers a positional argument.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidArgument`] for an empty name and
    /// [`CliError::NotUnique`] if the name is taken.
    pub fn add_argument(&mut self, argument: Argument) -> Result<&mut Self, CliError> {
        if argument.name().is_empty() {
            return Err(CliError::invalid("argument name must not be empty"));
        }
        self.arguments.insert(argument)?;
        Ok(self)
    }

    /// Registers positional arguments in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`Command::add_argument`].
    pub fn add_arguments(
        &mut self,
        arguments: impl IntoIterator<Item = Argument>,
    ) -> Result<&mut Self, CliError> {
        for argument in arguments {
            self.add_argument(argument)?;
        }
        Ok(self)
    }

    /// Links `subcommand` as a child of this command.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidArgument`] for an empty name and
    /// [`CliError::NotUnique`] if a sibling already has the name.
    pub fn add_subcommand(&mut self, subcommand: Command<'a>) -> Result<&mut Self, CliError> {
        if subcommand.name.is_empty() {
            return Err(CliError::invalid("subcommand name must not be empty"));
        }
        self.subcommands.insert(subcommand)?;
        Ok(self)
    }

    /// Links subcommands in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`Command::add_subcommand`].
    pub fn add_subcommands(
        &mut self,
        subcommands: impl IntoIterator<Item = Command<'a>>,
    ) -> Result<&mut Self, CliError> {
        for subcommand in subcommands {
            self.add_subcommand(subcommand)?;
        }
        Ok(self)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Options sorted by short flag.
    #[must_use]
    pub fn options(&self) -> &[CliOption<'a>] {
        self.options.as_slice()
    }

    /// Positional arguments sorted by name.
    #[must_use]
    pub fn arguments(&self) -> &[Argument] {
        self.arguments.as_slice()
    }

    /// Subcommands sorted by name.
    #[must_use]
    pub fn subcommands(&self) -> &[Command<'a>] {
        self.subcommands.as_slice()
    }

    /// Looks up an option by short flag.
    #[must_use]
    pub fn option(&self, short: char) -> Option<&CliOption<'a>> {
        self.options.get(&short)
    }

    /// Looks up a subcommand by exact name.
    #[must_use]
    pub fn subcommand(&self, name: &str) -> Option<&Command<'a>> {
        self.subcommands.get(name)
    }

    /// Runs the callback, defaulting to success when none is set.
    pub(crate) fn invoke(&self, positionals: &[&str]) -> ExitStatus {
        self.callback.as_ref().map_or(ExitStatus::SUCCESS, |callback| {
            callback(&Invocation::new(self, positionals))
        })
    }
}

impl Keyed for Command<'_> {
    type Key = str;
    const KIND: &'static str = "subcommand";

    fn key(&self) -> &str {
        &self.name
    }

    fn display_key(&self) -> String {
        self.name.clone()
    }
}

impl fmt::Debug for Command<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("options", &self.options)
            .field("arguments", &self.arguments)
            .field("subcommands", &self.subcommands)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}
