//! Rendering of command results for humans or as JSON.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

/// A command result that can be printed in either output mode.
///
/// JSON mode serializes the value itself, so implementors only describe the
/// human form.
pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;

    fn render(&self, json_mode: bool) -> Result<String> {
        if json_mode {
            serde_json::to_string_pretty(self).context("Failed to serialize command output")
        } else {
            Ok(self.to_human())
        }
    }
}

/// Print a command result to stdout.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) -> Result<()> {
    write_output(&mut std::io::stdout().lock(), result, json_mode)
}

/// Write a command result followed by a newline.
pub fn write_output<W: Write, T: CommandOutput>(
    writer: &mut W,
    result: &T,
    json_mode: bool,
) -> Result<()> {
    writeln!(writer, "{}", result.render(json_mode)?).context("Failed to write command output")
}
