//! Rank routed candidates by weighted multi-criteria cost.
//!
//! [`RouteScorer::evaluate`] derives four criteria per candidate (distance,
//! duration, hazard risk and turn count), rescales each across the candidate
//! set with min-max normalisation, and sorts candidates by the weighted sum.
//! The sort is stable, so equal costs keep their input order.

mod error;
mod ranking;
mod weights;


use geo::Coord;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::candidate::Candidate;
use crate::hazard::{HazardAnalyzer, HazardZone};
use crate::normalise::{Criteria, CriteriaBounds};
use crate::risk::{RiskAssessment, RiskFallback, RiskSource, apply_time_penalty, assess_path_risk};
use crate::turns::count_turns;

pub use error::ScoreError;
pub use ranking::{Ranking, ScoredCandidate};
pub use weights::ScoreWeights;

/// Weighted multi-criteria route ranker.
///
/// The scorer holds no per-call state and may be shared across threads.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use evacroute_core::{Candidate, GeoHazardAnalyzer, RouteScorer};
///
/// let origin = Coord { x: -78.445, y: -0.314 };
/// let near = Coord { x: -78.444, y: -0.314 };
/// let far = Coord { x: -78.430, y: -0.314 };
/// let candidates = vec![
///     Candidate::new("Far", far, vec![origin, far], 1_670.0, 1_200.0),
///     Candidate::new("Near", near, vec![origin, near], 111.0, 80.0),
/// ];
///
/// let ranking = RouteScorer::new(GeoHazardAnalyzer).evaluate(origin, candidates, &[])?;
/// assert_eq!(ranking.best().map(|best| best.candidate.name.as_str()), Some("Near"));
/// # Ok::<(), evacroute_core::ScoreError>(())
/// ```
pub struct RouteScorer {
    analyzer: Option<Box<dyn HazardAnalyzer>>,
    fallback: RiskFallback,
    weights: ScoreWeights,
}

impl std::fmt::Debug for RouteScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteScorer")
            .field(
                "analyzer",
                &self.analyzer.as_ref().map(|_| "<dyn HazardAnalyzer>"),
            )
            .field("fallback", &self.fallback)
            .field("weights", &self.weights)
            .finish()
    }
}

impl RouteScorer {
    /// Create a scorer that tests routes with `analyzer`.
    #[must_use]
    pub fn new(analyzer: impl HazardAnalyzer + 'static) -> Self {
        Self {
            analyzer: Some(Box::new(analyzer)),
            fallback: RiskFallback::default(),
            weights: ScoreWeights::default(),
        }
    }

    /// Create a scorer without hazard analysis.
    ///
    /// Every route that can form a line is scored according to `fallback`.
    #[must_use]
    pub fn without_analyzer(fallback: RiskFallback) -> Self {
        Self {
            analyzer: None,
            fallback,
            weights: ScoreWeights::default(),
        }
    }

    /// Replace the default weights.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::InvalidWeights`] when `weights` fails
    /// [`ScoreWeights::validate`].
    pub fn with_weights(mut self, weights: ScoreWeights) -> Result<Self, ScoreError> {
        weights.validate()?;
        self.weights = weights;
        Ok(self)
    }

    /// Weights in use.
    #[must_use]
    pub const fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Rank `candidates` from best to worst.
    ///
    /// `origin` only labels log output. `hazard_zones` may be empty, in which
    /// case every route that forms a line gets the baseline risk. An empty
    /// candidate list yields an empty ranking.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::RiskAssessmentUnavailable`] when no analyzer is
    /// bound, the fallback is [`RiskFallback::Fail`] and some candidate's
    /// path has at least two points.
    pub fn evaluate(
        &self,
        origin: Coord<f64>,
        candidates: Vec<Candidate>,
        hazard_zones: &[HazardZone],
    ) -> Result<Ranking, ScoreError> {
        log::debug!(
            "scoring {} candidates from ({}, {}) against {} hazard zones",
            candidates.len(),
            origin.y,
            origin.x,
            hazard_zones.len()
        );

        let mut oracle = self.oracle();
        let measured = candidates
            .into_iter()
            .map(|candidate| measure(&mut oracle, candidate, hazard_zones))
            .collect::<Result<Vec<_>, _>>()?;

        let Some(bounds) = CriteriaBounds::fold(measured.iter().map(|m| &m.raw)) else {
            return Ok(Ranking::default());
        };

        let degraded = measured
            .iter()
            .any(|m| m.assessment.source == RiskSource::RandomFallback);
        if degraded {
            log::warn!(
                "hazard analysis unavailable; risk values in this ranking are random"
            );
        }

        let mut scored: Vec<ScoredCandidate> = measured
            .into_iter()
            .map(|m| {
                let normalised = bounds.normalise(&m.raw);
                ScoredCandidate {
                    cost: self.weights.cost(&normalised),
                    candidate: m.candidate,
                    turn_count: m.turn_count,
                    risk_raw: m.assessment.value,
                    risk: m.raw.risk,
                    risk_source: m.assessment.source,
                    normalised,
                }
            })
            .collect();
        scored.sort_by(|a, b| a.cost.total_cmp(&b.cost));

        Ok(Ranking::new(scored, degraded))
    }

    fn oracle(&self) -> RiskOracle<'_> {
        match (&self.analyzer, self.fallback) {
            (Some(analyzer), _) => RiskOracle::Geometry(analyzer.as_ref()),
            (None, RiskFallback::Random { seed }) => RiskOracle::Random(
                seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64),
            ),
            (None, RiskFallback::Fail) => RiskOracle::Unavailable,
        }
    }
}

/// Source of raw risk values for one `evaluate` call.
enum RiskOracle<'a> {
    Geometry(&'a dyn HazardAnalyzer),
    Random(ChaCha8Rng),
    Unavailable,
}

impl RiskOracle<'_> {
    fn assess(
        &mut self,
        path: &[Coord<f64>],
        zones: &[HazardZone],
    ) -> Result<RiskAssessment, ScoreError> {
        if path.len() < 2 {
            return Ok(RiskAssessment::degenerate());
        }
        match self {
            Self::Geometry(analyzer) => Ok(assess_path_risk(*analyzer, path, zones)),
            Self::Random(rng) => Ok(RiskAssessment::new(
                rng.gen_range(0.0..1.0),
                RiskSource::RandomFallback,
            )),
            Self::Unavailable => Err(ScoreError::RiskAssessmentUnavailable),
        }
    }
}

/// Raw criteria for one candidate, before normalisation.
struct Measured {
    candidate: Candidate,
    turn_count: u32,
    assessment: RiskAssessment,
    raw: Criteria,
}

fn measure(
    oracle: &mut RiskOracle<'_>,
    candidate: Candidate,
    zones: &[HazardZone],
) -> Result<Measured, ScoreError> {
    let turn_count = count_turns(&candidate.path);
    let assessment = oracle.assess(&candidate.path, zones)?;
    let raw = Criteria {
        distance: candidate.distance_meters,
        duration: candidate.duration_seconds,
        risk: apply_time_penalty(assessment.value, candidate.duration_seconds),
        turns: f64::from(turn_count),
    };
    Ok(Measured {
        candidate,
        turn_count,
        assessment,
        raw,
    })
}
