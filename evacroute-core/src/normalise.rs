//! Min-max normalisation of the four ranking criteria.
//!
//! Normalisation is two-pass: [`CriteriaBounds::fold`] observes every
//! candidate's raw [`Criteria`], then [`CriteriaBounds::normalise`] maps each
//! candidate into `0.0..=1.0`. A criterion that is constant across the set
//! uses a divisor of `1`, so every candidate scores `0` on it.

/// One value per ranking criterion.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Criteria {
    /// Path length in metres (raw) or its normalised value.
    pub distance: f64,
    /// Walking time in seconds (raw) or its normalised value.
    pub duration: f64,
    /// Hazard risk after the time penalty (raw) or its normalised value.
    pub risk: f64,
    /// Turn count (raw) or its normalised value.
    pub turns: f64,
}

/// Observed range of a single criterion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Smallest observed value.
    pub min: f64,
    /// Largest observed value.
    pub max: f64,
}

impl Bounds {
    /// Bounds covering exactly one value.
    #[must_use]
    pub const fn at(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Widen the bounds to include `value`.
    #[must_use]
    pub const fn include(self, value: f64) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    /// Divisor used for normalisation: `max - min`, or `1` when that is zero.
    #[expect(
        clippy::float_arithmetic,
        reason = "the span of a range is a float subtraction"
    )]
    #[must_use]
    pub fn span(self) -> f64 {
        let span = self.max - self.min;
        if span > 0.0 { span } else { 1.0 }
    }

    /// Rescale `value` relative to these bounds.
    ///
    /// # Examples
    /// ```
    /// use evacroute_core::Bounds;
    ///
    /// let bounds = Bounds::at(500.0).include(1_000.0);
    /// assert_eq!(bounds.normalise(750.0), 0.5);
    /// assert_eq!(Bounds::at(3.0).normalise(3.0), 0.0);
    /// ```
    #[expect(
        clippy::float_arithmetic,
        reason = "min-max normalisation subtracts and divides"
    )]
    #[must_use]
    pub fn normalise(self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }
}

/// Per-criterion bounds across a candidate set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriteriaBounds {
    /// Distance bounds.
    pub distance: Bounds,
    /// Duration bounds.
    pub duration: Bounds,
    /// Risk bounds.
    pub risk: Bounds,
    /// Turn-count bounds.
    pub turns: Bounds,
}

impl CriteriaBounds {
    /// First pass: fold every criterion into its bounds.
    ///
    /// Returns `None` for an empty set.
    pub fn fold<'a, I>(criteria: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Criteria>,
    {
        let mut iter = criteria.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::seed(first), Self::include))
    }

    /// Second pass: rescale one candidate's criteria.
    #[must_use]
    pub fn normalise(&self, criteria: &Criteria) -> Criteria {
        Criteria {
            distance: self.distance.normalise(criteria.distance),
            duration: self.duration.normalise(criteria.duration),
            risk: self.risk.normalise(criteria.risk),
            turns: self.turns.normalise(criteria.turns),
        }
    }

    const fn seed(criteria: &Criteria) -> Self {
        Self {
            distance: Bounds::at(criteria.distance),
            duration: Bounds::at(criteria.duration),
            risk: Bounds::at(criteria.risk),
            turns: Bounds::at(criteria.turns),
        }
    }

    const fn include(self, criteria: &Criteria) -> Self {
        Self {
            distance: self.distance.include(criteria.distance),
            duration: self.duration.include(criteria.duration),
            risk: self.risk.include(criteria.risk),
            turns: self.turns.include(criteria.turns),
        }
    }
}
