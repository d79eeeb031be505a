//! Error types emitted by the evacroute CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use evacroute_core::ScoreError;
use evacroute_data::{ProviderBuildError, ZoneLoadError};
use thiserror::Error;

/// Errors emitted by the evacroute CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Long flag name.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// The origin lies outside WGS84 coordinate ranges.
    #[error("origin ({lat}, {lon}) is not a valid latitude/longitude pair")]
    InvalidOrigin {
        /// Supplied latitude.
        lat: f64,
        /// Supplied longitude.
        lon: f64,
    },
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Loading a zone listing failed.
    #[error("failed to load {field}: {source}")]
    LoadZones {
        /// Flag naming the listing.
        field: &'static str,
        /// Underlying load failure.
        #[source]
        source: ZoneLoadError,
    },
    /// Constructing the route provider failed.
    #[error("failed to build route provider for {base_url:?}: {source}")]
    BuildRouteProvider {
        /// Routing service base URL.
        base_url: String,
        /// Underlying build failure.
        #[source]
        source: ProviderBuildError,
    },
    /// The scorer rejected the candidates.
    #[error("failed to rank routes: {0}")]
    Score(#[from] ScoreError),
    /// Serialising the ranking failed.
    #[error("failed to serialise ranking: {0}")]
    SerialiseRanking(#[source] serde_json::Error),
    /// A saved ranking could not be read.
    #[error("failed to read ranking {path:?}: {source}")]
    ReadRanking {
        /// Ranking file.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A saved ranking is not the JSON written by `evaluate`.
    #[error("failed to parse ranking {path:?}: {source}")]
    ParseRanking {
        /// Ranking file.
        path: Utf8PathBuf,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
    /// The requested rank is past the end of the ranking.
    #[error("rank {rank} is out of range; the ranking holds {available} routes")]
    RankOutOfRange {
        /// Requested 1-based rank.
        rank: u16,
        /// Routes in the ranking.
        available: usize,
    },
    /// Writing the output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
