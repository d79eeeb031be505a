//! Relative importance of each ranking criterion.

use crate::normalise::Criteria;

use super::error::ScoreError;

/// Weights applied to normalised criteria to form a route's cost.
///
/// The defaults favour short, quick routes and give hazard exposure and
/// path complexity a smaller say.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreWeights {
    /// Weight of normalised distance.
    pub distance: f64,
    /// Weight of normalised duration.
    pub duration: f64,
    /// Weight of normalised risk.
    pub risk: f64,
    /// Weight of normalised turn count.
    pub turns: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            distance: 0.4,
            duration: 0.4,
            risk: 0.15,
            turns: 0.05,
        }
    }
}

impl ScoreWeights {
    /// Check that the weights are finite, non-negative and not all zero.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::InvalidWeights`] naming the violated constraint.
    #[expect(
        clippy::float_arithmetic,
        reason = "the total weight is a float sum"
    )]
    pub fn validate(&self) -> Result<(), ScoreError> {
        let weights = [self.distance, self.duration, self.risk, self.turns];
        if weights.iter().any(|weight| !weight.is_finite()) {
            return Err(ScoreError::InvalidWeights {
                reason: "weights must be finite",
            });
        }
        if weights.iter().any(|weight| *weight < 0.0) {
            return Err(ScoreError::InvalidWeights {
                reason: "weights must not be negative",
            });
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(ScoreError::InvalidWeights {
                reason: "at least one weight must be positive",
            });
        }
        Ok(())
    }

    /// Weighted sum of normalised criteria. Lower is better.
    ///
    /// # Examples
    /// ```
    /// use evacroute_core::{Criteria, ScoreWeights};
    ///
    /// let worst = Criteria { distance: 1.0, duration: 1.0, risk: 1.0, turns: 1.0 };
    /// assert!((ScoreWeights::default().cost(&worst) - 1.0).abs() < 1e-12);
    /// ```
    #[expect(
        clippy::float_arithmetic,
        reason = "weighted cost is a float dot product"
    )]
    #[must_use]
    pub fn cost(&self, normalised: &Criteria) -> f64 {
        self.distance * normalised.distance
            + self.duration * normalised.duration
            + self.risk * normalised.risk
            + self.turns * normalised.turns
    }
}
