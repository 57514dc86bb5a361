//! Small helpers shared across CLI tests.
//!
//! The CLI unit tests build temporary suite and trial files and assert error
//! handling behaviour. These helpers keep the test cases concise and
//! consistent.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use serde::Serialize;
use tempfile::TempDir;

use super::{Cli, CliError, CommandSummary, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_json_file(
    dir: &TempDir,
    name: &str,
    payload: &impl Serialize,
) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let file = File::create(&path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), payload)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    Ok(path)
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn run_cli_expecting_summary(cli: Cli) -> CommandSummary {
    match run_cli(cli) {
        Ok(summary) => summary,
        Err(err) => panic!("command must succeed: {err}"),
    }
}
