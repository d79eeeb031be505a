//! Guide command: turn-by-turn prompts along a ranked route.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use evacroute_core::{Candidate, GuidanceTracker, Instruction, next_instruction};
use geo::Coord;
use serde::Deserialize;

use crate::evaluate::{LATITUDE_RANGE, LONGITUDE_RANGE};
use crate::{ARG_POSITION, ARG_RANK, ARG_RANKING, CliError};

/// Printed when no position produced a prompt.
pub(crate) const NO_INSTRUCTION_MESSAGE: &str = "No instruction for these positions";

/// CLI arguments for the `guide` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(
    long_about = "Read a ranking written by `evaluate --format json`, pick one \
                 of its routes and print a prompt for each walker position. \
                 A prompt identical to the previous one is printed once.",
    about = "Print turn-by-turn prompts along a ranked route"
)]
pub(crate) struct GuideArgs {
    /// JSON ranking written by `evaluate --format json`.
    #[arg(long = ARG_RANKING, value_name = "path")]
    pub(crate) ranking: Utf8PathBuf,
    /// Place of the route in the ranking, 1 being the best.
    #[arg(
        long = ARG_RANK,
        value_name = "n",
        default_value_t = 1,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub(crate) rank: u16,
    /// Walker position as "lat,lon"; repeat to follow a track.
    #[arg(
        long = ARG_POSITION,
        value_name = "lat,lon",
        required = true,
        allow_hyphen_values = true,
        value_parser = parse_position
    )]
    pub(crate) positions: Vec<Coord<f64>>,
}

#[derive(Debug, Deserialize)]
struct SavedRanking {
    candidates: Vec<SavedCandidate>,
}

#[derive(Debug, Deserialize)]
struct SavedCandidate {
    candidate: Candidate,
}

/// Parse a `lat,lon` pair into a `[lon, lat]` coordinate.
pub(crate) fn parse_position(raw: &str) -> Result<Coord<f64>, String> {
    let (lat_text, lon_text) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected \"lat,lon\", found {raw:?}"))?;
    let lat = parse_degrees(lat_text)?;
    let lon = parse_degrees(lon_text)?;
    if !LATITUDE_RANGE.contains(&lat) || !LONGITUDE_RANGE.contains(&lon) {
        return Err(format!(
            "({lat}, {lon}) is not a valid latitude/longitude pair"
        ));
    }
    Ok(Coord { x: lon, y: lat })
}

fn parse_degrees(text: &str) -> Result<f64, String> {
    text.trim()
        .parse()
        .map_err(|err| format!("{text:?} is not a number of degrees: {err}"))
}

pub(crate) fn run_guide(args: &GuideArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_guide_with(args, &mut stdout)
}

pub(crate) fn run_guide_with(args: &GuideArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let route = load_route(&args.ranking, args.rank)?;
    let prompts = prompts_along(&route.path, &args.positions);
    log::debug!(
        "{} prompts for {} positions along {:?}",
        prompts.len(),
        args.positions.len(),
        route.name
    );
    write_prompts(writer, &route.name, &prompts)
}

fn load_route(path: &Utf8Path, rank: u16) -> Result<Candidate, CliError> {
    let text =
        evacroute_data::fs::read_to_string(path).map_err(|source| CliError::ReadRanking {
            path: path.to_path_buf(),
            source,
        })?;
    let saved: SavedRanking =
        serde_json::from_str(&text).map_err(|source| CliError::ParseRanking {
            path: path.to_path_buf(),
            source,
        })?;
    let available = saved.candidates.len();
    saved
        .candidates
        .into_iter()
        .nth(usize::from(rank).saturating_sub(1))
        .map(|entry| entry.candidate)
        .ok_or(CliError::RankOutOfRange { rank, available })
}

/// Prompts for a walker passing through `positions` in order, repeats removed.
pub(crate) fn prompts_along(path: &[Coord<f64>], positions: &[Coord<f64>]) -> Vec<Instruction> {
    let mut tracker = GuidanceTracker::default();
    positions
        .iter()
        .filter_map(|position| tracker.observe(next_instruction(*position, path)))
        .collect()
}

fn write_prompts(
    writer: &mut dyn Write,
    name: &str,
    prompts: &[Instruction],
) -> Result<(), CliError> {
    writeln!(writer, "Route to {name}").map_err(CliError::WriteOutput)?;
    if prompts.is_empty() {
        writeln!(writer, "{NO_INSTRUCTION_MESSAGE}").map_err(CliError::WriteOutput)?;
    }
    for prompt in prompts {
        writeln!(writer, "{prompt}").map_err(CliError::WriteOutput)?;
    }
    Ok(())
}
