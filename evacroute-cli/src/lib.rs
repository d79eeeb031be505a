//! Command-line interface for ranking volcanic evacuation routes.
//!
//! `evacroute evaluate` loads safe zones and hazard zones from GeoJSON,
//! fetches a walking route to every safe zone and prints the routes ranked
//! from safest to least safe. `evacroute guide` reads a saved JSON ranking
//! and prints turn-by-turn prompts along one of its routes.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod evaluate;
mod guide;
mod table;

pub use error::CliError;

use evaluate::{EvaluateArgs, run_evaluate};
use guide::{GuideArgs, run_guide};

pub(crate) const ARG_ORIGIN_LAT: &str = "origin-lat";
pub(crate) const ARG_ORIGIN_LON: &str = "origin-lon";
pub(crate) const ARG_SAFE_ZONES: &str = "safe-zones";
pub(crate) const ARG_HAZARD_ZONES: &str = "hazard-zones";
pub(crate) const ARG_ORS_API_KEY: &str = "ors-api-key";
pub(crate) const ARG_ORS_BASE_URL: &str = "ors-base-url";
pub(crate) const ARG_PROFILE: &str = "profile";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ARG_CONCURRENCY: &str = "concurrency";
pub(crate) const ARG_FORMAT: &str = "format";
pub(crate) const ARG_RANKING: &str = "ranking";
pub(crate) const ARG_RANK: &str = "rank";
pub(crate) const ARG_POSITION: &str = "position";
pub(crate) const ENV_ORIGIN_LAT: &str = "EVACROUTE_CMDS_EVALUATE_ORIGIN_LAT";
pub(crate) const ENV_ORIGIN_LON: &str = "EVACROUTE_CMDS_EVALUATE_ORIGIN_LON";
pub(crate) const ENV_SAFE_ZONES: &str = "EVACROUTE_CMDS_EVALUATE_SAFE_ZONES";

/// Run the evacroute CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when argument parsing, configuration merging, data
/// loading, scoring, ranking lookup or output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Evaluate(args) => run_evaluate(args),
        Command::Guide(args) => run_guide(&args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "evacroute",
    about = "Rank walking evacuation routes away from volcanic hazards",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Route from an origin to every safe zone and rank the results.
    Evaluate(EvaluateArgs),
    /// Print turn-by-turn prompts along a route from a saved ranking.
    Guide(GuideArgs),
}

#[cfg(test)]
mod tests;
