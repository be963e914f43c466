//! Program name resolution.
//!
//! The parser needs the program's name for usage lines and its basename for
//! diagnostics. [`Program`] is a plain value that can be passed explicitly;
//! [`Program::init`] additionally keeps one process-wide instance.

use std::path::MAIN_SEPARATOR;
use std::sync::OnceLock;

static PROGRAM: OnceLock<Program> = OnceLock::new();

/// Name of the running program as given in `argv[0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    name: String,
    short_name: String,
}

impl Program {
    /// Resolves the program from `argv[0]`.
    ///
    /// The short name is everything after the last path separator.
    ///
    /// ```
    /// use argtree::Program;
    ///
    /// let program = Program::new("reuse");
    /// assert_eq!(program.short_name(), "reuse");
    /// ```
    #[must_use]
    pub fn new(argv0: &str) -> Self {
        let short_name = argv0.rsplit(MAIN_SEPARATOR).next().unwrap_or(argv0);
        Self {
            name: argv0.to_string(),
            short_name: short_name.to_string(),
        }
    }

    /// Initializes the process-wide program once and returns it.
    ///
    /// Later calls return the instance from the first call, whatever
    /// `argv0` they pass.
    pub fn init(argv0: &str) -> &'static Self {
        PROGRAM.get_or_init(|| Self::new(argv0))
    }

    /// Returns the process-wide program if it was initialized.
    #[must_use]
    pub fn global() -> Option<&'static Self> {
        PROGRAM.get()
    }

    /// `argv[0]` as given.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `argv[0]` without its directory.
    #[must_use]
    pub fn short_name(&self) -> &str {
        &self.short_name
    }
}
