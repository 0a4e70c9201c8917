//! A narrow interface over the `git` binary
//!
//! Everything shells out to the local git so the tool does not care which
//! version (or implementation) of git is installed.

use std::{
    io::{self, Write},
    process::Command,
};
use tracing::debug;

use crate::error::{Error, Result};

/// Run a git subcommand and capture its output, surfacing git's own stderr
/// when it fails
fn capture(args: &[&str]) -> Result<String> {
    debug!(?args, "running git");

    let output = Command::new("git").args(args).output()?;
    if !output.status.success() {
        io::stderr().write_all(&output.stderr)?;
        return Err(Error::Command {
            command: format!("git {}", args.join(" ")),
            status: output.status,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run a git subcommand with inherited stdio so its output lands on the
/// console directly
fn show(args: &[&str]) -> Result<()> {
    debug!(?args, "running git");

    let status = Command::new("git").args(args).status()?;
    if !status.success() {
        return Err(Error::Command {
            command: format!("git {}", args.join(" ")),
            status,
        });
    }

    Ok(())
}

/// Resolve a reference to a full commit id, failing loudly when the
/// reference does not exist
pub fn rev_parse(reference: &str) -> Result<String> {
    Ok(capture(&["rev-parse", reference])?.trim().into())
}

/// Whether `older` is an ancestor of `newer` (inclusive)
pub fn is_ancestor(older: &str, newer: &str) -> Result<bool> {
    let commits = capture(&["rev-list", newer])?;
    Ok(commits.lines().any(|commit| commit == older))
}

/// Print the one-line log for a single commit
pub fn show_oneline(reference: &str) -> Result<()> {
    show(&["log", "--oneline", "-n", "1", reference])
}

/// Print the one-line log for everything after `from` up to and
/// including `to`
pub fn show_range(from: &str, to: &str) -> Result<()> {
    show(&["log", "--oneline", &format!("{}..{}", from, to)])
}

/// The full-id one-line log between two commits, captured for the
/// deploy notification
pub fn changelog(from: &str, to: &str) -> Result<String> {
    capture(&["log", "--pretty=oneline", &format!("{}..{}", from, to)])
}
