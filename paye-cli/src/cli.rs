use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use paye_core::IncomePeriod;

use crate::config::ConfigOverrides;
use crate::routes::Route;
use crate::views::calculator::DEFAULT_PENSION_RATE;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Nigerian PAYE estimator with a plain-English rule library.
///
/// The calculator saves each result; `status` reads the latest one back.
#[derive(Debug, Parser)]
#[command(name = crate::BIN_NAME, version)]
pub struct Cli {
    /// TOML config file with [store], [chart] and [logging] sections.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Result store backend (`sqlite` or `memory`).
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Store connection string.
    /// For SQLite this is a file path (e.g. `paye.db`) or `:memory:`.
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Log filter, e.g. `info` or `paye_core=debug`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            backend: self.backend.clone(),
            connection_string: self.db.clone(),
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Nigerian tax laws translated into plain English.
    #[command(name = "rule-library")]
    RuleLibrary {
        /// Only show rules carrying this tag.
        #[arg(long)]
        tag: Option<String>,

        /// Show the single rule with this id.
        #[arg(long, conflicts_with = "tag")]
        id: Option<u32>,
    },

    /// Estimate PAYE, pension and take-home pay.
    #[command(name = "tax-calculator")]
    TaxCalculator(CalculatorArgs),

    /// Show insights for the last calculated result.
    #[command(name = "status")]
    Status {
        /// Write the breakdown chart to this SVG file.
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Forget the saved result instead of showing it.
        #[arg(long, conflicts_with = "svg")]
        clear: bool,
    },
}

impl Command {
    pub fn route(&self) -> Route {
        match self {
            Self::RuleLibrary { .. } => Route::RuleLibrary,
            Self::TaxCalculator(_) => Route::TaxCalculator,
            Self::Status { .. } => Route::Status,
        }
    }
}

#[derive(Debug, Args)]
pub struct CalculatorArgs {
    /// Gross income, e.g. `1,200,000` or `₦1,200,000`.
    #[arg(
        long,
        allow_hyphen_values = true,
        required_unless_present = "interactive",
        conflicts_with = "interactive"
    )]
    pub income: Option<String>,

    /// Whether `--income` (or each interactive entry) is annual or monthly.
    #[arg(long, default_value = "annual", value_parser = parse_period)]
    pub period: IncomePeriod,

    /// Employee pension contribution, in percent of gross.
    #[arg(long, default_value = DEFAULT_PENSION_RATE, allow_hyphen_values = true)]
    pub pension_rate: String,

    /// Do not save the result for the status view.
    #[arg(long)]
    pub no_save: bool,

    /// Write the breakdown chart to this SVG file.
    #[arg(long, conflicts_with = "interactive")]
    pub svg: Option<PathBuf>,

    /// Read incomes line by line, recomputing after each one.
    #[arg(short, long)]
    pub interactive: bool,
}

fn parse_period(s: &str) -> Result<IncomePeriod, String> {
    IncomePeriod::parse(s).ok_or_else(|| format!("unknown period '{s}' (use annual or monthly)"))
}
