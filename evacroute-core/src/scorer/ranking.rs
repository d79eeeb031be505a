//! Scored candidates and the ordered ranking returned by the scorer.

use crate::candidate::Candidate;
use crate::normalise::Criteria;
use crate::risk::RiskSource;

/// A candidate together with everything the scorer derived from it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScoredCandidate {
    /// The routed candidate, unchanged.
    pub candidate: Candidate,
    /// Direction changes along the path.
    pub turn_count: u32,
    /// Hazard risk before the time penalty.
    pub risk_raw: f64,
    /// Hazard risk including the time penalty.
    pub risk: f64,
    /// Provenance of `risk_raw`.
    pub risk_source: RiskSource,
    /// Criteria rescaled into `0.0..=1.0` across the candidate set.
    pub normalised: Criteria,
    /// Weighted cost; lower is better.
    pub cost: f64,
}

/// Candidates ordered from best to worst.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ranking {
    candidates: Vec<ScoredCandidate>,
    degraded: bool,
}

impl Ranking {
    pub(crate) const fn new(candidates: Vec<ScoredCandidate>, degraded: bool) -> Self {
        Self {
            candidates,
            degraded,
        }
    }

    /// Ranked candidates, lowest cost first.
    #[must_use]
    pub fn candidates(&self) -> &[ScoredCandidate] {
        &self.candidates
    }

    /// Consume the ranking and return its candidates.
    #[must_use]
    pub fn into_candidates(self) -> Vec<ScoredCandidate> {
        self.candidates
    }

    /// The recommended candidate, if any.
    #[must_use]
    pub fn best(&self) -> Option<&ScoredCandidate> {
        self.candidates.first()
    }

    /// Number of ranked candidates.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Report whether no candidate was ranked.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Report whether any risk value came from the random fallback.
    ///
    /// A degraded ranking is still ordered by cost but its risk criterion
    /// carries no information.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.degraded
    }
}

impl IntoIterator for Ranking {
    type Item = ScoredCandidate;
    type IntoIter = std::vec::IntoIter<ScoredCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.into_iter()
    }
}

impl<'a> IntoIterator for &'a Ranking {
    type Item = &'a ScoredCandidate;
    type IntoIter = std::slice::Iter<'a, ScoredCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}
