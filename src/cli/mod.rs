//! CLI argument definitions and parsing.

pub mod types;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use types::{League, Season};

/// Arguments shared by every analysis command.
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// League to analyze.
    #[clap(long, short, default_value = "nfl")]
    pub league: League,

    /// Season year (repeatable): `-s 2022 -s 2023`.
    #[clap(long, short, default_values_t = [Season::default()])]
    pub season: Vec<Season>,

    /// Force refresh from the remote source even if cached data exists (NBA only).
    #[clap(long)]
    pub refresh: bool,

    /// Also load per-game inactive-player counts as the INJURED_PLAYERS
    /// statistic (NBA only; one request per uncached game).
    #[clap(long)]
    pub injuries: bool,

    /// Replace the default leakage exclusion list with one read from a JSON file.
    #[clap(long)]
    pub exclusions: Option<PathBuf>,
}

#[derive(Debug, Parser)]
#[clap(name = "winsight", about = "Which team stats correlate with winning?")]
pub struct Winsight {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch season game logs into the local cache (NBA variant only).
    ///
    /// Checks the per-season cache file first; already-cached games are kept
    /// and newly available ones appended.
    Fetch {
        #[clap(flatten)]
        common: CommonArgs,
    },

    /// Rank statistics by correlation with winning and render the charts.
    ///
    /// Runs Loader → Deriver → Joiner → Cleaner → Analyzer → Reporter without
    /// fitting any model.
    Correlate {
        #[clap(flatten)]
        common: CommonArgs,

        /// How many top predictors to keep for ranking and charts.
        #[clap(long, default_value_t = 30)]
        top_k: usize,

        /// Directory the chart PNGs are written to.
        #[clap(long, default_value = "plots")]
        out_dir: PathBuf,
    },

    /// Full analysis: correlations plus linear and held-out logistic models.
    Analyze {
        #[clap(flatten)]
        common: CommonArgs,

        /// How many top predictors the logistic model uses.
        #[clap(long, default_value_t = 30)]
        top_k: usize,

        /// Directory the chart PNGs are written to.
        #[clap(long, default_value = "plots")]
        out_dir: PathBuf,

        /// Seed for the reproducible train/test assignment.
        #[clap(long, default_value_t = 42)]
        seed: u64,

        /// Fraction of rows assigned to the training split.
        #[clap(long, default_value_t = 0.7)]
        train_fraction: f64,

        /// Pre-game feature configuration JSON (NBA variant); when given,
        /// models run on leakage-free rolling features instead of raw stats.
        #[clap(long)]
        features_config: Option<PathBuf>,
    },
}
