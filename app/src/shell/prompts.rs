//! Line-oriented input helpers for the menu shell.
//!
//! Every numeric prompt returns `None` on unparseable input instead of
//! erroring; callers print a message and bail back to the menu.

use anyhow::Result;
use std::io::{self, Write};
use std::str::FromStr;

/// Print `label`, flush, and read one trimmed line from stdin.
pub fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Prompt and parse; `None` when the input does not parse.
pub fn prompt_parsed<T: FromStr>(label: &str) -> Result<Option<T>> {
    let input = prompt(label)?;
    Ok(input.parse().ok())
}

/// y/N confirmation; anything but "y" declines.
pub fn confirm(label: &str) -> Result<bool> {
    let answer = prompt(label)?;
    Ok(answer.eq_ignore_ascii_case("y"))
}

/// Wait for Enter before returning to the menu.
pub fn pause() {
    let _ = prompt("\nPress Enter to continue...");
}
