//! Option and positional argument definitions.

use crate::error::CliError;
use crate::value::{Slot, ValueType};

use super::entries::Keyed;

/// Whether an option takes an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgRequirement {
    #[default]
    None,
    Required,
    /// Only accepted attached: `-ovalue` or `--opt=value`.
    Optional,
}

impl ArgRequirement {
    /// Suffix appended after the flag in the short option spec.
    #[must_use]
    pub const fn spec_suffix(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Required => ":",
            Self::Optional => "::",
        }
    }

    /// Placeholder shown after the long name in help output.
    #[must_use]
    pub const fn help_suffix(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Required => " arg",
            Self::Optional => " (arg)",
        }
    }
}

/// What a matched option does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Print the command's help to standard output.
    Help,
    /// Overwrite the slot with the argument.
    Store,
    /// Add the argument (or 1) to the slot; flip a bool slot.
    Accumulate,
}

/// A flag-triggered settable value with a short flag and optional long alias.
///
/// ```
/// use std::cell::RefCell;
/// use argtree::{ArgRequirement, CliOption};
///
/// let path = RefCell::new(None);
/// let option = CliOption::store('l', &path)
///     .long("ll")
///     .description("Long argument");
/// assert_eq!(option.argument(), ArgRequirement::Required);
/// ```
#[derive(Debug)]
pub struct CliOption<'a> {
    short: char,
    long: Option<String>,
    description: Option<String>,
    argument: ArgRequirement,
    action: Action,
    slot: Option<Slot<'a>>,
}

impl<'a> CliOption<'a> {
    /// Creates an option that prints help when matched.
    #[must_use]
    pub const fn help(short: char) -> Self {
        Self {
            short,
            long: None,
            description: None,
            argument: ArgRequirement::None,
            action: Action::Help,
            slot: None,
        }
    }

    /// Creates an option that stores its required argument into `slot`.
    #[must_use]
    pub fn store(short: char, slot: impl Into<Slot<'a>>) -> Self {
        Self {
            short,
            long: None,
            description: None,
            argument: ArgRequirement::Required,
            action: Action::Store,
            slot: Some(slot.into()),
        }
    }

    /// Creates an option that accumulates into `slot` and takes no argument.
    #[must_use]
    pub fn accumulate(short: char, slot: impl Into<Slot<'a>>) -> Self {
        Self {
            short,
            long: None,
            description: None,
            argument: ArgRequirement::None,
            action: Action::Accumulate,
            slot: Some(slot.into()),
        }
    }

    /// Sets the long alias (without the leading `--`).
    #[must_use]
    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Overrides the argument requirement chosen by the constructor.
    #[must_use]
    pub const fn with_argument(mut self, argument: ArgRequirement) -> Self {
        self.argument = argument;
        self
    }

    #[must_use]
    pub const fn short(&self) -> char {
        self.short
    }

    #[must_use]
    pub fn long_name(&self) -> Option<&str> {
        self.long.as_deref()
    }

    #[must_use]
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub const fn argument(&self) -> ArgRequirement {
        self.argument
    }

    #[must_use]
    pub const fn action(&self) -> Action {
        self.action
    }

    #[must_use]
    pub const fn slot(&self) -> Option<&Slot<'a>> {
        self.slot.as_ref()
    }

    /// Declared value type, taken from the slot.
    #[must_use]
    pub fn value_type(&self) -> Option<ValueType> {
        self.slot.as_ref().map(Slot::value_type)
    }

    /// Checks that the definition is representable.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidArgument`] for flags that collide with
    /// scanner syntax, malformed long names, and action/type combinations
    /// the parser cannot carry out.
    pub fn validate(&self) -> Result<(), CliError> {
        if matches!(self.short, ':' | '?' | '-') || self.short.is_whitespace() || self.short.is_control() {
            return Err(CliError::invalid(format!(
                "'{}' cannot be used as a short flag",
                self.short.escape_default()
            )));
        }

        if let Some(long) = &self.long {
            if long.is_empty() || long.starts_with('-') || long.contains('=') {
                return Err(CliError::invalid(format!(
                    "'{long}' is not a valid long option name"
                )));
            }
        }

        match (self.action, self.argument, self.value_type()) {
            (Action::Help, _, _) => Ok(()),
            (Action::Store | Action::Accumulate, _, None) => Err(CliError::invalid(format!(
                "option '-{}' needs a slot to write into",
                self.short
            ))),
            (Action::Store, ArgRequirement::None, Some(_)) => Err(CliError::invalid(format!(
                "store option '-{}' must accept an argument",
                self.short
            ))),
            (Action::Accumulate, _, Some(ValueType::String)) => Err(CliError::invalid(format!(
                "option '-{}' cannot accumulate into a string",
                self.short
            ))),
            _ => Ok(()),
        }
    }
}

impl Keyed for CliOption<'_> {
    type Key = char;
    const KIND: &'static str = "option";

    fn key(&self) -> &char {
        &self.short
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.short == other.short || (self.long.is_some() && self.long == other.long)
    }

    fn display_key(&self) -> String {
        format!("-{}", self.short)
    }
}

/// A positional argument, used for help output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    name: String,
    description: Option<String>,
    value_type: ValueType,
}

impl Argument {
    /// Creates a string-typed positional argument.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            value_type: ValueType::String,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub const fn declared_type(&self) -> ValueType {
        self.value_type
    }
}

impl Keyed for Argument {
    type Key = str;
    const KIND: &'static str = "argument";

    fn key(&self) -> &str {
        &self.name
    }

    fn display_key(&self) -> String {
        self.name.clone()
    }
}
