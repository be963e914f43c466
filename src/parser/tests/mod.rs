//! Tests for the parse and dispatch loop.
//!
//! - `helpers` - The `reuse` command tree and a parser over in-memory writers
//! - `scenarios` - Subcommand routing, help output and usage errors
//! - `actions` - Store and accumulate behavior per slot type

#[allow(clippy::unwrap_used, clippy::expect_used)]
pub mod helpers;
