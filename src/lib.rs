//! `argtree` - declarative command tree parsing
//!
//! Programs describe their command line as a tree of [`Command`]s carrying
//! typed [`CliOption`]s, positional [`Argument`]s and subcommands. The
//! [`Parser`] walks an argument vector down that tree, writes option values
//! into caller-owned slots, prints generated help, and runs the callback of
//! the last command matched.

pub mod error;
pub mod help;
pub mod model;
pub mod parser;
pub mod program;
pub mod scan;
pub mod value;

pub use error::{CliError, ExitStatus, UsageError};
pub use help::HelpLayout;
pub use model::{Action, ArgRequirement, Argument, Callback, CliOption, Command, Invocation};
pub use parser::{Parser, parse};
pub use program::Program;
pub use value::{Coerce, CoerceError, Slot, ValueType};
