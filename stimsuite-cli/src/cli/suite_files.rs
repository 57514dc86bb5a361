//! Naming and directory handling for persisted suite files.
//!
//! Suites are written one per file, named with spreadsheet-style letters in
//! generation order (`A.json`, `B.json`, ..., `Z.json`, `AA.json`). Loading
//! restores that order so batch-level checks see suites as they were
//! generated.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use stimsuite_core::{Batch, Suite};

use super::commands::CliError;

/// Returns the file name for the suite at `index` in a batch: `A.json` for
/// index 0 through `Z.json` for 25, then `AA.json`, `AB.json` and so on.
///
/// # Examples
/// ```
/// use stimsuite_cli::cli::suite_file_name;
///
/// assert_eq!(suite_file_name(0), "A.json");
/// assert_eq!(suite_file_name(26), "AA.json");
/// ```
#[must_use]
pub fn suite_file_name(index: usize) -> String {
    let mut letters = String::new();
    let mut n = index;
    loop {
        let letter = char::from(b'A' + u8::try_from(n % 26).unwrap_or(0));
        letters.insert(0, letter);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    format!("{letters}.json")
}

/// Writes every suite in `batch` to `dir`, creating the directory if needed.
/// Returns the file names in generation order.
pub(super) fn write_batch(dir: &Path, batch: &Batch) -> Result<Vec<String>, CliError> {
    fs::create_dir_all(dir).map_err(|source| CliError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names = Vec::with_capacity(batch.len());
    for (index, entry) in batch.entries().iter().enumerate() {
        let name = suite_file_name(index);
        let path = dir.join(&name);
        let file = File::create(&path).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), &entry.suite).map_err(|source| {
            CliError::Json { path, source }
        })?;
        names.push(name);
    }
    Ok(names)
}

/// Loads every `*.json` suite in `dir`, sorted into generation order
/// (letter-count first, then lexicographic, so `Z.json` precedes `AA.json`).
pub(super) fn load_suites(dir: &Path) -> Result<Vec<(String, Suite)>, CliError> {
    let read_dir = fs::read_dir(dir).map_err(|source| CliError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<(String, PathBuf)> = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| CliError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            let name = entry.file_name().to_string_lossy().into_owned();
            paths.push((name, path));
        }
    }
    paths.sort_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

    let mut suites = Vec::with_capacity(paths.len());
    for (name, path) in paths {
        let file = File::open(&path).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
        let suite: Suite = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| CliError::Json { path, source })?;
        suites.push((name, suite));
    }
    Ok(suites)
}
