//! Command-line parsing for the macro regime dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fetching/scoring code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::Indicator;

/// Default history window in days.
pub const DEFAULT_HISTORY_DAYS: u32 = 365;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "macro-dash", version, about = "Macro regime dashboard (FRED-based)")]
pub struct Cli {
    /// Snapshot store file (overrides MACRO_STORE_PATH).
    #[arg(long, global = true, value_name = "JSON")]
    pub store: Option<PathBuf>,

    /// Neutral policy rate used for the Fed stance (overrides MACRO_NEUTRAL_RATE).
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub neutral_rate: Option<f64>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the latest readings, store them, score them and notify on a signal.
    Update(UpdateArgs),
    /// Show the most recent stored snapshot with its regime score.
    Current(CurrentArgs),
    /// List stored snapshots, newest first.
    Stored(StoredArgs),
    /// Fetch history for every indicator.
    History(HistoryArgs),
    /// Score a set of readings without fetching anything.
    Score(ScoreArgs),
    /// Ask the language model for a summary of the latest stored snapshot.
    Summary,
    /// Send a test push notification.
    NotifyTest,
    /// Launch the interactive dashboard.
    Tui(TuiArgs),
}

#[derive(Debug, Args, Clone)]
pub struct UpdateArgs {
    /// Don't push a notification even if a signal fires.
    #[arg(long)]
    pub no_notify: bool,

    /// Also request a natural-language summary.
    #[arg(long)]
    pub summary: bool,

    /// Print the resulting snapshot as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct CurrentArgs {
    /// Print as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct StoredArgs {
    /// Number of snapshots to list.
    #[arg(short = 'n', long, default_value_t = 30)]
    pub limit: usize,
}

#[derive(Debug, Args, Clone)]
pub struct HistoryArgs {
    /// Window length in days, ending today.
    #[arg(short = 'd', long, default_value_t = DEFAULT_HISTORY_DAYS)]
    pub days: u32,

    /// Print every point of one indicator instead of the overview.
    #[arg(short = 'i', long, value_enum)]
    pub indicator: Option<Indicator>,

    /// Export all series to CSV (indicator,date,value).
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// The seven regime inputs.
#[derive(Debug, Args, Clone)]
pub struct ScoreArgs {
    /// Real GDP growth (%).
    #[arg(long, allow_hyphen_values = true)]
    pub gdp_growth: f64,

    /// CPI inflation, year over year (%).
    #[arg(long, allow_hyphen_values = true)]
    pub inflation: f64,

    /// Unemployment rate (%).
    #[arg(long, allow_hyphen_values = true)]
    pub unemployment: f64,

    /// Manufacturing index (0 = neutral).
    #[arg(long, allow_hyphen_values = true)]
    pub manufacturing: f64,

    /// 10Y real rate (%). Accepted but not part of the score.
    #[arg(long, allow_hyphen_values = true)]
    pub real_rate: f64,

    /// 2Y-10Y yield spread.
    #[arg(long, allow_hyphen_values = true)]
    pub yield_spread: f64,

    /// Fed funds minus neutral rate (%).
    #[arg(long, allow_hyphen_values = true)]
    pub fed_stance: f64,
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    /// History window shown in the chart, in days.
    #[arg(short = 'd', long, default_value_t = DEFAULT_HISTORY_DAYS)]
    pub days: u32,
}
