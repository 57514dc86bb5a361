//! Command implementations and argument parsing for the stimsuite CLI.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use stimsuite_core::{
    BatchReport, CoverageReport, DEFAULT_ANIM_LENGTH, DomainSet, GenerateError,
    GenerationStrategy, GeneratorBuilder, verify_batch,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::pair::{MatchedTrial, TrialRecord, find_matching_trials};
use super::suite_files;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "stimsuite", about = "Generate and verify animation stimulus suites.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate a batch of stimulus suites into a directory.
    Generate(GenerateCommand),
    /// Independently verify a directory of persisted suites.
    Verify(VerifyCommand),
    /// Match trials with identical correct-answer animations across two
    /// trial files.
    Pair(PairCommand),
}

/// Generation strategies selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Flip one randomly chosen transition per attribute; defaults cycle
    /// through the configured pools.
    RandomFlip,
    /// Deterministic rotating-cursor assignment covering every default
    /// combination.
    Cyclic,
}

impl From<StrategyArg> for GenerationStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::RandomFlip => Self::RandomFlip,
            StrategyArg::Cyclic => Self::CyclicAssignment,
        }
    }
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Directory to write suite files into; created if absent.
    pub out_dir: PathBuf,

    /// Generation strategy.
    #[arg(long, value_enum, default_value = "random-flip")]
    pub strategy: StrategyArg,

    /// Number of suites to generate (defaults to the strategy's natural
    /// batch size).
    #[arg(long)]
    pub count: Option<usize>,

    /// Seed for reproducible generation.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Duration of every animation in milliseconds.
    #[arg(long = "anim-length", default_value_t = DEFAULT_ANIM_LENGTH)]
    pub anim_length: u32,
}

/// Options accepted by the `verify` command.
#[derive(Debug, Args, Clone)]
pub struct VerifyCommand {
    /// Directory holding the suite files to verify.
    pub dir: PathBuf,
}

/// Options accepted by the `pair` command.
#[derive(Debug, Args, Clone)]
pub struct PairCommand {
    /// First trial file.
    pub first: PathBuf,

    /// Second trial file.
    pub second: PathBuf,

    /// Path to write the matched trials to.
    #[arg(long)]
    pub out: PathBuf,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while reading or writing suites or trials.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A JSON payload could not be read or written.
    #[error("invalid JSON in `{path}`: {source}")]
    Json {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// Suite generation failed.
    #[error(transparent)]
    Core(#[from] GenerateError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum CommandSummary {
    /// A batch was generated and persisted.
    Generated {
        /// Directory the suite files were written to.
        out_dir: PathBuf,
        /// File names in generation order.
        files: Vec<String>,
        /// Coverage statistics recorded during generation.
        coverage: CoverageReport,
    },
    /// A directory of suites was verified.
    Verified {
        /// The verifier's findings.
        report: BatchReport,
    },
    /// Two trial files were matched.
    Paired {
        /// Path the matched trials were written to.
        out: PathBuf,
        /// The matches, in first-file order.
        matches: Vec<MatchedTrial>,
    },
}

impl CommandSummary {
    /// Returns `true` when the summary describes a verification run that
    /// found violations.
    #[must_use]
    pub fn failed_verification(&self) -> bool {
        match self {
            Self::Verified { report } => !report.passed(),
            Self::Generated { .. } | Self::Paired { .. } => false,
        }
    }
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when execution fails. A verification run that finds
/// violations is not an error; the findings are carried in the summary.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use stimsuite_cli::cli::{Cli, Command, CommandSummary, GenerateCommand, StrategyArg, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let cli = Cli {
///     command: Command::Generate(GenerateCommand {
///         out_dir: dir.path().to_path_buf(),
///         strategy: StrategyArg::RandomFlip,
///         count: None,
///         seed: Some(7),
///         anim_length: 3000,
///     }),
/// };
/// let CommandSummary::Generated { files, .. } = run_cli(cli)? else {
///     unreachable!("generate returns a Generated summary");
/// };
/// assert_eq!(files.len(), 8);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<CommandSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Generate(command) => {
            span.record("command", field::display("generate"));
            run_generate(command)
        }
        Command::Verify(command) => {
            span.record("command", field::display("verify"));
            run_verify(command)
        }
        Command::Pair(command) => {
            span.record("command", field::display("pair"));
            run_pair(command)
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(out_dir = field::Empty, strategy = field::Empty, count = field::Empty),
)]
pub(super) fn run_generate(command: GenerateCommand) -> Result<CommandSummary, CliError> {
    let span = Span::current();
    span.record("out_dir", field::display(command.out_dir.display()));
    span.record("strategy", field::debug(command.strategy));
    if let Some(count) = command.count {
        span.record("count", field::display(count));
    }

    let mut builder = GeneratorBuilder::new()
        .with_strategy(command.strategy.into())
        .with_anim_length(command.anim_length);
    if let Some(count) = command.count {
        builder = builder.with_suite_count(count);
    }
    if let Some(seed) = command.seed {
        builder = builder.with_seed(seed);
    }

    let batch = builder.build()?.run()?;
    let files = suite_files::write_batch(&command.out_dir, &batch)?;
    info!(
        out_dir = %command.out_dir.display(),
        suites = batch.len(),
        "batch written"
    );
    Ok(CommandSummary::Generated {
        out_dir: command.out_dir,
        files,
        coverage: batch.coverage().clone(),
    })
}

#[instrument(name = "cli.verify", err, skip(command), fields(dir = field::Empty))]
pub(super) fn run_verify(command: VerifyCommand) -> Result<CommandSummary, CliError> {
    Span::current().record("dir", field::display(command.dir.display()));
    let suites = suite_files::load_suites(&command.dir)?;
    let report = verify_batch(&DomainSet::default(), &suites);
    info!(
        suites = suites.len(),
        passed = report.passed(),
        violations = report.violation_count(),
        "verification completed"
    );
    Ok(CommandSummary::Verified { report })
}

#[instrument(
    name = "cli.pair",
    err,
    skip(command),
    fields(first = field::Empty, second = field::Empty),
)]
pub(super) fn run_pair(command: PairCommand) -> Result<CommandSummary, CliError> {
    let span = Span::current();
    span.record("first", field::display(command.first.display()));
    span.record("second", field::display(command.second.display()));

    let first = load_trials(&command.first)?;
    let second = load_trials(&command.second)?;
    let matches = find_matching_trials(&first, &second);

    let file = File::create(&command.out).map_err(|source| CliError::Io {
        path: command.out.clone(),
        source,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), &matches).map_err(|source| {
        CliError::Json {
            path: command.out.clone(),
            source,
        }
    })?;

    info!(matches = matches.len(), out = %command.out.display(), "trials paired");
    Ok(CommandSummary::Paired {
        out: command.out,
        matches,
    })
}

fn load_trials(path: &Path) -> Result<Vec<TrialRecord>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &CommandSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        CommandSummary::Generated {
            out_dir,
            files,
            coverage,
        } => {
            writeln!(writer, "suites: {}", coverage.suites)?;
            writeln!(
                writer,
                "default combinations used: {}/{}",
                coverage.defaults_used, coverage.default_combinations
            )?;
            for attribute in &coverage.attributes {
                writeln!(
                    writer,
                    "{}: {}/{} ordered transitions exercised",
                    attribute.attribute,
                    attribute.transitions_exercised,
                    attribute.transition_pool
                )?;
            }
            for file in files {
                writeln!(writer, "wrote {}", out_dir.join(file).display())?;
            }
        }
        CommandSummary::Verified { report } => {
            for (name, suite_report) in report.suites() {
                if suite_report.passed() {
                    writeln!(writer, "{name}: ok")?;
                } else {
                    writeln!(
                        writer,
                        "{name}: {} violation(s)",
                        suite_report.violations().len()
                    )?;
                    for violation in suite_report.violations() {
                        writeln!(writer, "  - {violation}")?;
                    }
                }
            }
            for violation in report.batch_violations() {
                writeln!(writer, "batch: {violation}")?;
            }
            writeln!(
                writer,
                "result: {}",
                if report.passed() { "pass" } else { "fail" }
            )?;
        }
        CommandSummary::Paired { out, matches } => {
            writeln!(writer, "matches: {}", matches.len())?;
            writeln!(writer, "wrote {}", out.display())?;
        }
    }
    Ok(())
}
