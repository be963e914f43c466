//! Error taxonomy and exit status mapping.
//!
//! Registration problems ([`CliError::InvalidArgument`], [`CliError::NotUnique`])
//! are programmer errors and should abort setup. [`UsageError`]s are the only
//! errors an end user can trigger; the parser reports them on the error stream
//! together with the command's help before returning them.

use std::collections::TryReserveError;
use std::fmt;

use thiserror::Error;

use crate::value::CoerceError;

/// Process exit status following the BSD `sysexits.h` conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExitStatus(u8);

impl ExitStatus {
    /// Successful termination.
    pub const SUCCESS: Self = Self(0);
    /// Command line usage error (`EX_USAGE`).
    pub const USAGE: Self = Self(64);
    /// Malformed static registration (`EX_DATAERR`).
    pub const DATA_ERROR: Self = Self(65);
    /// Output could not be written (`EX_IOERR`).
    pub const IO_ERROR: Self = Self(74);
    /// Temporary failure such as a failed allocation (`EX_TEMPFAIL`).
    pub const TEMPORARY_FAILURE: Self = Self(75);

    /// Creates a status from a raw exit code.
    #[must_use]
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    /// Returns the raw exit code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Returns true for a zero exit code.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        Self::from(status.0)
    }
}

/// Errors an end user can cause from the command line.
#[derive(Debug, Error)]
pub enum UsageError {
    /// A token looked like an option but matched no registered flag.
    #[error("Invalid option '{0}'")]
    UnknownOption(String),

    /// An option requiring an argument was the last token.
    #[error("Missing argument for option '{0}'")]
    MissingArgument(String),

    /// `--name=value` was given for an option that takes no argument.
    #[error("Option '{0}' doesn't allow an argument")]
    UnexpectedArgument(String),

    /// The option argument failed type or range coercion.
    #[error("Invalid value '{value}' for option '{option}': {source}")]
    InvalidValue {
        option: String,
        value: String,
        #[source]
        source: CoerceError,
    },

    /// Applying an option without an argument left the slot's range.
    #[error("Option '{option}' is out of range: {source}")]
    OutOfRange {
        option: String,
        #[source]
        source: CoerceError,
    },

    /// The first positional token matched no subcommand.
    #[error("Unknown subcommand: {0}")]
    UnknownSubcommand(String),
}

/// Errors returned by registration and parsing.
#[derive(Debug, Error)]
pub enum CliError {
    /// A registration call or option definition that cannot be represented.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The element collides with one already registered on the same command.
    #[error("{kind} '{key}' is already registered")]
    NotUnique { kind: &'static str, key: String },

    /// Scratch space for the option scanner could not be allocated.
    #[error("Out of memory while preparing the option scanner")]
    OutOfMemory(#[from] TryReserveError),

    #[error(transparent)]
    Usage(#[from] UsageError),

    /// Help or diagnostics could not be written.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Maps the error to its conventional process exit status.
    #[must_use]
    pub const fn exit_status(&self) -> ExitStatus {
        match self {
            Self::Usage(_) => ExitStatus::USAGE,
            Self::InvalidArgument(_) | Self::NotUnique { .. } => ExitStatus::DATA_ERROR,
            Self::Io(_) => ExitStatus::IO_ERROR,
            Self::OutOfMemory(_) => ExitStatus::TEMPORARY_FAILURE,
        }
    }

    /// Returns true if the error was caused by the end user's input.
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}
