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
    version,
    about = "Amitosis CLI - Simulate mutation accumulation in a ciliate whose polyploid somatic genome divides by amitosis or mitosis, and write the fitness trajectories as CSV.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Append logs (INFO and above) to this file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to step replicate populations.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evolve replicate populations under a single parameter set.
    Run(RunArgs),
    /// Evolve every combination of a parameter grid and write one combined table.
    Sweep(SweepArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    // --- Core Arguments ---
    /// Path for the output trajectory table (CSV).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Population Overrides ---
    /// Number of replicate populations.
    #[arg(short = 'r', long, value_name = "INT")]
    pub replicates: Option<usize>,

    /// Number of individuals in each population.
    #[arg(short = 'n', long, value_name = "INT")]
    pub size: Option<usize>,

    /// Number of fitness loci.
    #[arg(short = 'l', long, value_name = "INT")]
    pub loci: Option<usize>,

    /// Ploidy of the somatic genome.
    #[arg(short = 'p', long, value_name = "INT")]
    pub ploidy: Option<u32>,

    // --- Mutation Overrides ---
    /// Mutation rate per somatic genome per generation.
    #[arg(short = 'u', long = "genomic-rate", value_name = "FLOAT")]
    pub genomic_rate: Option<f64>,

    /// Selection coefficient of each mutation (negative for deleterious).
    #[arg(
        short = 's',
        long = "selection-coefficient",
        value_name = "FLOAT",
        allow_negative_numbers = true
    )]
    pub selection_coefficient: Option<f64>,

    /// Override `segregation.mode` from the config file.
    #[command(flatten)]
    pub segregation: SegregationFlags,

    // --- Run Overrides ---
    /// Number of generations to evolve.
    #[arg(short, long, value_name = "INT")]
    pub generations: Option<u64>,

    /// Record a snapshot every this many generations.
    #[arg(short, long, value_name = "INT")]
    pub interval: Option<u64>,

    /// Seed for the random number generator. A random seed is drawn and logged if omitted.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S population.ploidy=45
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Mutually exclusive flags selecting how the soma divides.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct SegregationFlags {
    /// The soma divides amitotically (random segregation of replicated copies).
    #[arg(long)]
    pub amitosis: bool,
    /// The soma divides mitotically (exact copy).
    #[arg(long)]
    pub mitosis: bool,
}

/// Arguments for the `sweep` subcommand.
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Path to the sweep configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Path for the combined output trajectory table (CSV).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Override the number of generations for every grid point.
    #[arg(short, long, value_name = "INT")]
    pub generations: Option<u64>,

    /// Override the sweep seed.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Set a specific configuration value, overriding the config file.
    /// Example: -S sweep.ploidies=2,8,45
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
