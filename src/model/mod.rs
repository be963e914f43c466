//! Command tree data model and registration.

pub mod command;
pub mod entries;
pub mod option;

pub use command::{Callback, Command, Invocation};
pub use entries::{Entries, Keyed};
pub use option::{Action, ArgRequirement, Argument, CliOption};
