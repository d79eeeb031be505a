//! Evaluate command implementation for the evacroute CLI.

use std::io::Write;
use std::ops::RangeInclusive;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use evacroute_core::{
    GeoHazardAnalyzer, HazardZone, Ranking, RouteProvider, RouteScorer, route_candidates,
};
use evacroute_data::routing::{HttpRouteProvider, HttpRouteProviderConfig};
use evacroute_data::{load_hazard_zones, load_safe_zones};
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::table::render_table;
use crate::{
    ARG_CONCURRENCY, ARG_FORMAT, ARG_HAZARD_ZONES, ARG_ORIGIN_LAT, ARG_ORIGIN_LON,
    ARG_ORS_API_KEY, ARG_ORS_BASE_URL, ARG_PROFILE, ARG_SAFE_ZONES, ARG_TIMEOUT_SECS, CliError,
    ENV_ORIGIN_LAT, ENV_ORIGIN_LON, ENV_SAFE_ZONES,
};

pub(crate) const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;
pub(crate) const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// How the ranking is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Aligned text table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// CLI arguments for the `evaluate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Fetch a walking route from the origin to every safe zone, \
                 test each route against the hazard zones and print the \
                 routes from safest to least safe. Options can come from \
                 CLI flags, configuration files, or environment variables.",
    about = "Rank evacuation routes to the safe zones"
)]
#[ortho_config(prefix = "EVACROUTE")]
pub(crate) struct EvaluateArgs {
    /// Latitude of the starting point.
    #[arg(long = ARG_ORIGIN_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) origin_lat: Option<f64>,
    /// Longitude of the starting point.
    #[arg(long = ARG_ORIGIN_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) origin_lon: Option<f64>,
    /// GeoJSON file of safe-zone points.
    #[arg(long = ARG_SAFE_ZONES, value_name = "path")]
    #[serde(default)]
    pub(crate) safe_zones: Option<Utf8PathBuf>,
    /// GeoJSON file of hazard polygons.
    #[arg(long = ARG_HAZARD_ZONES, value_name = "path")]
    #[serde(default)]
    pub(crate) hazard_zones: Option<Utf8PathBuf>,
    /// OpenRouteService API key.
    #[arg(long = ARG_ORS_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) ors_api_key: Option<String>,
    /// Base URL of the directions service.
    #[arg(long = ARG_ORS_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) ors_base_url: Option<String>,
    /// Routing profile, e.g. "foot-walking".
    #[arg(long = ARG_PROFILE, value_name = "profile")]
    #[serde(default)]
    pub(crate) profile: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Routing requests kept in flight at once.
    #[arg(long = ARG_CONCURRENCY, value_name = "n")]
    #[serde(default)]
    pub(crate) concurrency: Option<usize>,
    /// Output format.
    #[arg(long = ARG_FORMAT, value_enum)]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl EvaluateArgs {
    pub(crate) fn into_config(self) -> Result<EvaluateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        EvaluateConfig::try_from(merged)
    }
}

/// Resolved `evaluate` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EvaluateConfig {
    /// Starting point in `[lon, lat]` order.
    pub(crate) origin: Coord<f64>,
    /// Safe-zone listing.
    pub(crate) safe_zones: Utf8PathBuf,
    /// Hazard listing; no hazards when absent.
    pub(crate) hazard_zones: Option<Utf8PathBuf>,
    /// Directions service settings.
    pub(crate) routing: HttpRouteProviderConfig,
    /// Output format.
    pub(crate) format: OutputFormat,
}

impl EvaluateConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.safe_zones, ARG_SAFE_ZONES)?;
        if let Some(path) = &self.hazard_zones {
            Self::require_existing(path, ARG_HAZARD_ZONES)?;
        }
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match evacroute_data::fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<EvaluateArgs> for EvaluateConfig {
    type Error = CliError;

    fn try_from(args: EvaluateArgs) -> Result<Self, Self::Error> {
        let lat = args.origin_lat.ok_or(CliError::MissingArgument {
            field: ARG_ORIGIN_LAT,
            env: ENV_ORIGIN_LAT,
        })?;
        let lon = args.origin_lon.ok_or(CliError::MissingArgument {
            field: ARG_ORIGIN_LON,
            env: ENV_ORIGIN_LON,
        })?;
        let safe_zones = args.safe_zones.ok_or(CliError::MissingArgument {
            field: ARG_SAFE_ZONES,
            env: ENV_SAFE_ZONES,
        })?;
        if !LATITUDE_RANGE.contains(&lat) || !LONGITUDE_RANGE.contains(&lon) {
            return Err(CliError::InvalidOrigin { lat, lon });
        }

        let mut routing = HttpRouteProviderConfig::default();
        if let Some(base_url) = args.ors_base_url {
            routing.base_url = base_url;
        }
        routing.api_key = args.ors_api_key.filter(|key| !key.is_empty());
        if let Some(profile) = args.profile {
            routing.profile = profile;
        }
        if let Some(secs) = args.timeout_secs {
            routing.timeout = Duration::from_secs(secs);
        }
        if let Some(concurrency) = args.concurrency {
            routing.concurrency = concurrency;
        }

        Ok(Self {
            origin: Coord { x: lon, y: lat },
            safe_zones,
            hazard_zones: args.hazard_zones,
            routing,
            format: args.format.unwrap_or_default(),
        })
    }
}

/// Builds the route provider for the current evaluate invocation.
pub(crate) trait RouteProviderBuilder {
    fn build(&self, config: &HttpRouteProviderConfig) -> Result<Box<dyn RouteProvider>, CliError>;
}

pub(crate) struct HttpRouteProviderBuilder;

impl RouteProviderBuilder for HttpRouteProviderBuilder {
    fn build(&self, config: &HttpRouteProviderConfig) -> Result<Box<dyn RouteProvider>, CliError> {
        let provider = HttpRouteProvider::with_config(config.clone()).map_err(|source| {
            CliError::BuildRouteProvider {
                base_url: config.base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(provider))
    }
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_evaluate_with(args, &HttpRouteProviderBuilder, &mut stdout)
}

pub(crate) fn run_evaluate_with(
    args: EvaluateArgs,
    builder: &dyn RouteProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_evaluate_config(args)?;
    let ranking = execute_evaluate(&config, builder)?;
    write_ranking(writer, &ranking, config.format)
}

fn resolve_evaluate_config(args: EvaluateArgs) -> Result<EvaluateConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_evaluate(
    config: &EvaluateConfig,
    builder: &dyn RouteProviderBuilder,
) -> Result<Ranking, CliError> {
    let zones = load_safe_zones(&config.safe_zones).map_err(|source| CliError::LoadZones {
        field: ARG_SAFE_ZONES,
        source,
    })?;
    let hazards = load_hazards(config.hazard_zones.as_deref())?;
    log::info!(
        "loaded {} safe zones and {} hazard zones",
        zones.len(),
        hazards.len()
    );

    let provider = builder.build(&config.routing)?;
    let candidates = route_candidates(provider.as_ref(), config.origin, &zones);
    if candidates.len() < zones.len() {
        log::warn!(
            "{} of {} safe zones could not be routed",
            zones.len().saturating_sub(candidates.len()),
            zones.len()
        );
    }

    let scorer = RouteScorer::new(GeoHazardAnalyzer);
    Ok(scorer.evaluate(config.origin, candidates, &hazards)?)
}

fn load_hazards(path: Option<&Utf8Path>) -> Result<Vec<HazardZone>, CliError> {
    path.map_or_else(
        || Ok(Vec::new()),
        |hazard_path| {
            load_hazard_zones(hazard_path).map_err(|source| CliError::LoadZones {
                field: ARG_HAZARD_ZONES,
                source,
            })
        },
    )
}

fn write_ranking(
    writer: &mut dyn Write,
    ranking: &Ranking,
    format: OutputFormat,
) -> Result<(), CliError> {
    let payload = match format {
        OutputFormat::Table => render_table(ranking),
        OutputFormat::Json => {
            serde_json::to_string_pretty(ranking).map_err(CliError::SerialiseRanking)?
        }
    };
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<EvaluateConfig, CliError> {
    let merged = EvaluateArgs::merge_from_layers(layers).map_err(CliError::from)?;
    EvaluateConfig::try_from(merged)
}
