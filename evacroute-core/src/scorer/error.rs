use thiserror::Error;

/// Errors from [`crate::RouteScorer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// No hazard analyzer is bound and the scorer is configured to fail
    /// rather than guess.
    #[error("hazard risk cannot be assessed: no hazard analyzer is available")]
    RiskAssessmentUnavailable,
    /// The supplied weights cannot produce a meaningful cost.
    #[error("invalid score weights: {reason}")]
    InvalidWeights {
        /// Which constraint the weights violate.
        reason: &'static str,
    },
}
