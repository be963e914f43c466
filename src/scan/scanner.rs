//! Option scanner with getopt_long semantics.
//!
//! Scanning starts after `argv[0]` and stops at `--` (consumed), a bare `-`,
//! or the first token not starting with `-`. Tokens are never reordered.

use tracing::trace;

use crate::model::ArgRequirement;

use super::ScanSpec;

/// One scanned option token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'s> {
    /// A registered flag, with its argument if one was taken.
    Flag {
        flag: char,
        spelling: String,
        argument: Option<&'s str>,
    },
    /// The flag needs an argument but none followed.
    MissingArgument(String),
    /// No registered option matches the token.
    UnknownOption(String),
    /// `--name=value` for an option without argument.
    UnexpectedArgument(String),
}

/// Iterator over the option tokens of one command level.
#[derive(Debug)]
pub struct Scanner<'s, 'p> {
    spec: &'p ScanSpec<'p>,
    args: &'s [&'s str],
    index: usize,
    /// Byte offset into `args[index]` while inside a short flag cluster.
    cluster: usize,
    stopped: bool,
}

impl<'s, 'p> Scanner<'s, 'p> {
    /// Creates a scanner over `args`, where `args[0]` is the command name.
    #[must_use]
    pub fn new(spec: &'p ScanSpec<'p>, args: &'s [&'s str]) -> Self {
        Self {
            spec,
            args,
            index: usize::min(1, args.len()),
            cluster: 0,
            stopped: false,
        }
    }

    /// Index of the first argument not consumed by option scanning.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.index
    }

    /// Arguments left once scanning has stopped.
    #[must_use]
    pub fn remaining(&self) -> &'s [&'s str] {
        &self.args[self.index..]
    }

    fn next_argument(&mut self) -> Option<&'s str> {
        let argument = self.args.get(self.index).copied()?;
        self.index += 1;
        Some(argument)
    }

    fn scan_long(&mut self, body: &'s str) -> Token<'s> {
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        let spec = self.spec;
        let Some(long) = spec.long_match(name) else {
            return Token::UnknownOption(format!("--{name}"));
        };
        let spelling = format!("--{}", long.name);

        let argument = match (long.argument, inline) {
            (ArgRequirement::None, Some(_)) => return Token::UnexpectedArgument(spelling),
            (ArgRequirement::Required, None) => match self.next_argument() {
                Some(next) => Some(next),
                None => return Token::MissingArgument(spelling),
            },
            (_, inline) => inline,
        };

        Token::Flag {
            flag: long.flag,
            spelling,
            argument,
        }
    }

    fn scan_short(&mut self) -> Token<'s> {
        let arg = self.args[self.index];
        let mut rest = arg[self.cluster..].chars();
        let Some(flag) = rest.next() else {
            self.index += 1;
            self.cluster = 0;
            return Token::UnknownOption(arg.to_string());
        };
        let rest = rest.as_str();
        let spelling = format!("-{flag}");

        let requirement = self.spec.short_requirement(flag);
        if matches!(requirement, None | Some(ArgRequirement::None)) {
            if rest.is_empty() {
                self.index += 1;
                self.cluster = 0;
            } else {
                self.cluster += flag.len_utf8();
            }

            return match requirement {
                None => Token::UnknownOption(spelling),
                _ => Token::Flag {
                    flag,
                    spelling,
                    argument: None,
                },
            };
        }

        // The flag takes an argument, so it ends the cluster.
        self.index += 1;
        self.cluster = 0;

        let argument = if !rest.is_empty() {
            Some(rest)
        } else if requirement == Some(ArgRequirement::Required) {
            match self.next_argument() {
                Some(next) => Some(next),
                None => return Token::MissingArgument(spelling),
            }
        } else {
            None
        };

        Token::Flag {
            flag,
            spelling,
            argument,
        }
    }
}

impl<'s> Iterator for Scanner<'s, '_> {
    type Item = Token<'s>;

    fn next(&mut self) -> Option<Token<'s>> {
        if self.stopped {
            return None;
        }

        if self.cluster == 0 {
            let Some(&arg) = self.args.get(self.index) else {
                self.stopped = true;
                return None;
            };

            if arg == "--" {
                self.index += 1;
                self.stopped = true;
                return None;
            }

            if arg == "-" || !arg.starts_with('-') {
                self.stopped = true;
                return None;
            }

            if let Some(body) = arg.strip_prefix("--") {
                self.index += 1;
                let token = self.scan_long(body);
                trace!(?token, "scanned long option");
                return Some(token);
            }

            self.cluster = 1;
        }

        let token = self.scan_short();
        trace!(?token, "scanned short option");
        Some(token)
    }
}
