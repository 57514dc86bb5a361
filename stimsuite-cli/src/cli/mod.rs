//! Command-line interface orchestration for the stimsuite toolkit.
//!
//! The CLI offers three commands: `generate` writes a batch of stimulus
//! suites to a directory, `verify` independently checks a directory of
//! persisted suites, and `pair` matches trials with identical correct-answer
//! states across two trial files.

mod commands;
mod pair;
mod suite_files;

pub use commands::{
    Cli, CliError, Command, CommandSummary, GenerateCommand, PairCommand, StrategyArg,
    VerifyCommand, render_summary, run_cli,
};
pub use pair::{MatchedTrial, TrialChoice, TrialRecord, find_matching_trials};
pub use suite_files::suite_file_name;

#[cfg(test)]
mod test_helpers;
