//! Help text rendering.
//!
//! Output layout, with every section omitted when it has no rows:
//!
//! ```text
//! Usage: <path> [OPTIONS]... [<arg> <arg>]...
//!
//! <description>
//!
//! Arguments:
//!   <name>  <description>
//!
//! Options:
//!   -<flag>, --<long> arg  <description>
//!
//! Subcommands:
//!   <name>  <description>
//! ```
//!
//! Columns are padded to the widest label of their section, measured in
//! terminal columns.

use unicode_width::UnicodeWidthStr;

use crate::model::{CliOption, Command};

/// Spacing used when rendering help rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpLayout {
    /// Spaces before each row's label.
    pub indent: usize,
    /// Spaces between the label column and the description.
    pub gutter: usize,
}

impl Default for HelpLayout {
    fn default() -> Self {
        Self {
            indent: 2,
            gutter: 2,
        }
    }
}

impl HelpLayout {
    #[must_use]
    pub const fn new(indent: usize, gutter: usize) -> Self {
        Self { indent, gutter }
    }
}

/// Renders the complete help text for `command`.
///
/// `path` is what the usage line names: the program followed by the
/// subcommands matched so far.
#[must_use]
pub fn render(command: &Command<'_>, path: &str, layout: &HelpLayout) -> String {
    let mut out = usage(command, path);

    if let Some(description) = command.description_text() {
        out.push('\n');
        out.push_str(description);
        out.push('\n');
    }

    let arguments: Vec<(String, Option<&str>)> = command
        .arguments()
        .iter()
        .map(|argument| (argument.name().to_string(), argument.description_text()))
        .collect();
    push_section(&mut out, "Arguments", &arguments, layout);

    let options: Vec<(String, Option<&str>)> = command
        .options()
        .iter()
        .map(|option| (option_label(option), option.description_text()))
        .collect();
    push_section(&mut out, "Options", &options, layout);

    let subcommands: Vec<(String, Option<&str>)> = command
        .subcommands()
        .iter()
        .map(|subcommand| (subcommand.name().to_string(), subcommand.description_text()))
        .collect();
    push_section(&mut out, "Subcommands", &subcommands, layout);

    out
}

/// Renders the usage line, including its trailing newline.
#[must_use]
pub fn usage(command: &Command<'_>, path: &str) -> String {
    let mut line = format!("Usage: {path}");

    if !command.options().is_empty() {
        line.push_str(" [OPTIONS]...");
    }

    if !command.arguments().is_empty() {
        let names: Vec<String> = command
            .arguments()
            .iter()
            .map(|argument| format!("<{}>", argument.name()))
            .collect();
        line.push_str(" [");
        line.push_str(&names.join(" "));
        line.push_str("]...");
    }

    line.push('\n');
    line
}

/// Renders `-f, --long arg` style labels.
///
/// The argument placeholder only follows a long name.
#[must_use]
pub fn option_label(option: &CliOption<'_>) -> String {
    let mut label = format!("-{}", option.short());
    if let Some(long) = option.long_name() {
        label.push_str(", --");
        label.push_str(long);
        label.push_str(option.argument().help_suffix());
    }
    label
}

fn push_section(out: &mut String, title: &str, rows: &[(String, Option<&str>)], layout: &HelpLayout) {
    if rows.is_empty() {
        return;
    }

    let width = rows
        .iter()
        .map(|(label, _)| label.width())
        .max()
        .unwrap_or_default();
    let continuation = format!("\n{}", " ".repeat(layout.indent + width + layout.gutter));

    out.push('\n');
    out.push_str(title);
    out.push_str(":\n");

    for (label, description) in rows {
        out.push_str(&" ".repeat(layout.indent));
        out.push_str(label);

        if let Some(description) = description {
            out.push_str(&" ".repeat(width - label.width() + layout.gutter));
            out.push_str(&description.replace('\n', &continuation));
        }

        out.push('\n');
    }
}
