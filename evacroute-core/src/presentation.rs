//! Display helpers shared by every front end.

use std::fmt;

/// Coarse classification of a route's penalised risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RiskBand {
    /// Risk at or below `0.3`.
    Low,
    /// Risk above `0.3` and at most `0.7`.
    Medium,
    /// Risk above `0.7`.
    High,
}

impl RiskBand {
    /// Band for a risk value.
    ///
    /// # Examples
    /// ```
    /// use evacroute_core::RiskBand;
    ///
    /// assert_eq!(RiskBand::from_risk(0.1), RiskBand::Low);
    /// assert_eq!(RiskBand::from_risk(0.8), RiskBand::High);
    /// ```
    #[must_use]
    pub fn from_risk(risk: f64) -> Self {
        if risk > 0.7 {
            Self::High
        } else if risk > 0.3 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const SECONDS_PER_MINUTE: u64 = 60;

/// Format a walking time as `"{m}m {s}s"`, or `"{s}s"` under a minute.
///
/// Both parts are floored. Negative and non-finite inputs format as `"0s"`.
///
/// # Examples
/// ```
/// use evacroute_core::format_duration;
///
/// assert_eq!(format_duration(754.9), "12m 34s");
/// assert_eq!(format_duration(59.99), "59s");
/// ```
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    let minutes = total.div_euclid(SECONDS_PER_MINUTE);
    let remainder = total.rem_euclid(SECONDS_PER_MINUTE);
    if minutes > 0 {
        format!("{minutes}m {remainder}s")
    } else {
        format!("{remainder}s")
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the value is floored and checked to be finite and non-negative"
)]
fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    }
}
