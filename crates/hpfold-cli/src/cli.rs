use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "HP Fold Contributors",
    version,
    about = "hpfold - Evolve stable folds of 2D HP lattice proteins with a genetic algorithm.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to build offspring and immigrants.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evolve a population of folds for a number of generations.
    Run(RunArgs),
    /// Mutate a single straight chain step by step and print its energy trace.
    Lab(LabArgs),
    /// List the built-in benchmark sequences and their best known scores.
    Benchmarks,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Sequence ---
    /// Chain length. Ignored when a benchmark is chosen.
    #[arg(short = 'n', long, value_name = "INT")]
    pub length: Option<usize>,

    /// Run seed. A random seed is drawn and logged when omitted.
    #[arg(short, long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Explicit H/P sequence, e.g. HPHPPHHPHH.
    #[arg(long, value_name = "LABELS", conflicts_with = "benchmark")]
    pub sequence: Option<String>,

    /// Use a benchmark sequence, by name (hp20) or length (20).
    #[arg(short, long, value_name = "NAME")]
    pub benchmark: Option<String>,

    // --- Evolution ---
    /// Number of polymers; must be even.
    #[arg(short, long, value_name = "INT")]
    pub population_size: Option<usize>,

    /// Number of candidates drawn per tournament.
    #[arg(short, long, value_name = "INT")]
    pub tournament_size: Option<usize>,

    /// Number of generations to run.
    #[arg(short, long, value_name = "INT")]
    pub generations: Option<usize>,

    /// Contact neighborhood for scoring: 'vn' or 'moore'.
    #[arg(long, value_name = "MODE")]
    pub neighborhood: Option<String>,

    // --- Output ---
    /// Write the per-generation energy summary to this CSV file.
    #[arg(long, value_name = "PATH")]
    pub stats_output: Option<PathBuf>,

    /// Append the best fold to this leaderboard CSV file (benchmark runs only).
    #[arg(long, value_name = "PATH")]
    pub leaderboard: Option<PathBuf>,

    /// Name recorded with the leaderboard entry.
    #[arg(long, value_name = "NAME")]
    pub player_name: Option<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S evolution.tournament-size=5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `lab` subcommand.
#[derive(Args, Debug)]
pub struct LabArgs {
    /// Chain length.
    #[arg(short = 'n', long, default_value_t = 20, value_name = "INT")]
    pub length: usize,

    /// Seed of the random sequence and of the mutations.
    #[arg(short, long, default_value_t = 0, value_name = "INT")]
    pub seed: u64,

    /// Number of bounded mutations to apply.
    #[arg(long, default_value_t = 10, value_name = "INT")]
    pub steps: usize,
}
