//! Scanner specification synthesized from a command's options.
//!
//! The short spec follows the getopt convention: a `+:` prefix (stop at the
//! first non-option, report errors to the caller instead of printing them),
//! then each flag followed by `:` for a required or `::` for an optional
//! argument. Long options map back to their short flag so every match
//! resolves through the same lookup.

use tracing::trace;

use crate::error::CliError;
use crate::model::{ArgRequirement, CliOption};

pub mod scanner;

pub use scanner::{Scanner, Token};

/// Prefix of every short spec: POSIX ordering, silent errors.
pub const SCAN_PREFIX: &str = "+:";

/// One entry of the long option table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongOpt<'o> {
    pub name: &'o str,
    pub argument: ArgRequirement,
    pub flag: char,
}

/// Short spec string and long option table for one command level.
#[derive(Debug)]
pub struct ScanSpec<'o> {
    short: String,
    long: Vec<LongOpt<'o>>,
}

impl<'o> ScanSpec<'o> {
    /// Builds the spec for `options`, which must already be validated.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::OutOfMemory`] if scratch space cannot be reserved.
    pub fn build(options: &'o [CliOption<'_>]) -> Result<Self, CliError> {
        // Flag plus at most two colons per option.
        let capacity = SCAN_PREFIX.len()
            + options
                .iter()
                .map(|option| option.short().len_utf8() + 2)
                .sum::<usize>();

        let mut short = String::new();
        short.try_reserve_exact(capacity)?;
        let mut long = Vec::new();
        long.try_reserve_exact(options.len())?;

        short.push_str(SCAN_PREFIX);
        for option in options {
            short.push(option.short());
            short.push_str(option.argument().spec_suffix());

            if let Some(name) = option.long_name() {
                long.push(LongOpt {
                    name,
                    argument: option.argument(),
                    flag: option.short(),
                });
            }
        }

        trace!(short = %short, long = long.len(), "built scanner spec");
        Ok(Self { short, long })
    }

    #[must_use]
    pub fn short_spec(&self) -> &str {
        &self.short
    }

    #[must_use]
    pub fn long_options(&self) -> &[LongOpt<'o>] {
        &self.long
    }

    /// Reads the argument requirement of `flag` back out of the short spec.
    ///
    /// Returns `None` if the flag is not registered.
    #[must_use]
    pub fn short_requirement(&self, flag: char) -> Option<ArgRequirement> {
        let mut chars = self.short[SCAN_PREFIX.len()..].chars().peekable();

        while let Some(current) = chars.next() {
            let mut colons = 0;
            while chars.next_if_eq(&':').is_some() {
                colons += 1;
            }

            if current == flag {
                return Some(match colons {
                    0 => ArgRequirement::None,
                    1 => ArgRequirement::Required,
                    _ => ArgRequirement::Optional,
                });
            }
        }

        None
    }

    /// Resolves a long name, allowing any unambiguous prefix.
    ///
    /// An exact match always wins over prefix matches.
    #[must_use]
    pub fn long_match(&self, name: &str) -> Option<&LongOpt<'o>> {
        if name.is_empty() {
            return None;
        }

        if let Some(exact) = self.long.iter().find(|long| long.name == name) {
            return Some(exact);
        }

        let mut candidates = self.long.iter().filter(|long| long.name.starts_with(name));
        match (candidates.next(), candidates.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[test]
    fn short_spec_has_prefix_and_colons() {
        let path = RefCell::new(None);
        let level = Cell::new(0_u8);
        let options = [
            CliOption::help('h').long("help"),
            CliOption::store('l', &path).long("ll"),
            CliOption::store('o', &level).with_argument(ArgRequirement::Optional),
        ];

        let spec = ScanSpec::build(&options).unwrap();
        assert_eq!(spec.short_spec(), "+:hl:o::");
    }

    #[test]
    fn empty_command_still_gets_prefix() {
        let spec = ScanSpec::build(&[]).unwrap();
        assert_eq!(spec.short_spec(), SCAN_PREFIX);
        assert!(spec.long_options().is_empty());
    }

    #[test]
    fn long_table_maps_to_short_flags() {
        let path = RefCell::new(None);
        let options = [
            CliOption::help('h').long("help"),
            CliOption::store('l', &path).long("ll"),
            CliOption::help('q'),
        ];

        let spec = ScanSpec::build(&options).unwrap();
        assert_eq!(
            spec.long_options(),
            [
                LongOpt {
                    name: "help",
                    argument: ArgRequirement::None,
                    flag: 'h',
                },
                LongOpt {
                    name: "ll",
                    argument: ArgRequirement::Required,
                    flag: 'l',
                },
            ]
        );
    }

    #[test]
    fn short_requirement_reads_spec() {
        let path = RefCell::new(None);
        let level = Cell::new(0_u8);
        let options = [
            CliOption::help('h'),
            CliOption::store('l', &path),
            CliOption::store('o', &level).with_argument(ArgRequirement::Optional),
        ];
        let spec = ScanSpec::build(&options).unwrap();

        assert_eq!(spec.short_requirement('h'), Some(ArgRequirement::None));
        assert_eq!(spec.short_requirement('l'), Some(ArgRequirement::Required));
        assert_eq!(spec.short_requirement('o'), Some(ArgRequirement::Optional));
        assert_eq!(spec.short_requirement('x'), None);
        assert_eq!(spec.short_requirement('+'), None);
    }

    #[test]
    fn long_match_prefers_exact_then_unique_prefix() {
        let options = [
            CliOption::help('a').long("verbose"),
            CliOption::help('b').long("version"),
            CliOption::help('c').long("ver"),
        ];
        let spec = ScanSpec::build(&options).unwrap();

        assert_eq!(spec.long_match("ver").map(|l| l.flag), Some('c'));
        assert_eq!(spec.long_match("verb").map(|l| l.flag), Some('a'));
        assert_eq!(spec.long_match("vers").map(|l| l.flag), Some('b'));
        assert_eq!(spec.long_match("ve"), None);
        assert_eq!(spec.long_match("quiet"), None);
        assert_eq!(spec.long_match(""), None);
    }
}
