//! Turn-by-turn prompts for a walker following a chosen route.
//!
//! Guidance looks only at the route vertex nearest to the walker and the two
//! segments that follow it. Distances and headings are planar in degree
//! space, which is adequate at walking scale.

use std::f64::consts::FRAC_PI_8;
use std::fmt;

use geo::Coord;

/// Planar distance, in degrees, within which the walker has arrived.
pub const ARRIVAL_TOLERANCE_DEGREES: f64 = 0.0002;

/// Heading change, in radians, below which the route continues straight.
pub const STRAIGHT_TOLERANCE_RADIANS: f64 = FRAC_PI_8;

/// A spoken or displayed navigation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Instruction {
    /// Keep going in the current direction.
    ContinueStraight,
    /// The route bends anticlockwise.
    TurnLeft,
    /// The route bends clockwise.
    TurnRight,
    /// The walker has reached the safe zone.
    Arrived,
}

impl Instruction {
    /// Human-readable prompt text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContinueStraight => "Continue straight",
            Self::TurnLeft => "Turn left",
            Self::TurnRight => "Turn right",
            Self::Arrived => "You have arrived at the safe zone",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Work out what to tell a walker at `position` on `path`.
///
/// Returns [`Instruction::Arrived`] when the nearest vertex is one of the
/// last two and lies within [`ARRIVAL_TOLERANCE_DEGREES`]. Otherwise, when
/// two segments follow the nearest vertex, the heading change between them
/// picks the prompt. Returns `None` when neither applies.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use evacroute_core::{Instruction, next_instruction};
///
/// let path = [
///     Coord { x: 0.0, y: 0.0 },
///     Coord { x: 0.001, y: 0.0 },
///     Coord { x: 0.001, y: 0.001 },
/// ];
/// assert_eq!(next_instruction(path[0], &path), Some(Instruction::TurnLeft));
/// assert_eq!(next_instruction(path[2], &path), Some(Instruction::Arrived));
/// ```
#[must_use]
pub fn next_instruction(position: Coord<f64>, path: &[Coord<f64>]) -> Option<Instruction> {
    let (index, distance) = nearest_vertex(position, path)?;

    if index.saturating_add(2) >= path.len() && distance < ARRIVAL_TOLERANCE_DEGREES {
        return Some(Instruction::Arrived);
    }

    let ahead = path.get(index..)?;
    let [first, second, third, ..] = ahead else {
        return None;
    };
    Some(classify_bend(*first, *second, *third))
}

/// Index of and distance to the first vertex closest to `position`.
fn nearest_vertex(position: Coord<f64>, path: &[Coord<f64>]) -> Option<(usize, f64)> {
    path.iter()
        .map(|vertex| planar_distance(position, *vertex))
        .enumerate()
        .fold(None, |best, (index, distance)| match best {
            Some((_, closest)) if closest <= distance => best,
            _ => Some((index, distance)),
        })
}

#[expect(
    clippy::float_arithmetic,
    reason = "heading differences require float subtraction"
)]
fn classify_bend(first: Coord<f64>, second: Coord<f64>, third: Coord<f64>) -> Instruction {
    let change = heading(second, third) - heading(first, second);
    if change.abs() < STRAIGHT_TOLERANCE_RADIANS {
        Instruction::ContinueStraight
    } else if change > 0.0 {
        Instruction::TurnLeft
    } else {
        Instruction::TurnRight
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "segment deltas require float subtraction"
)]
fn heading(from: Coord<f64>, to: Coord<f64>) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

#[expect(
    clippy::float_arithmetic,
    reason = "planar distance requires float subtraction"
)]
fn planar_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Suppresses an instruction identical to the one issued just before it.
///
/// # Examples
/// ```
/// use evacroute_core::{GuidanceTracker, Instruction};
///
/// let mut tracker = GuidanceTracker::default();
/// assert_eq!(tracker.observe(Some(Instruction::TurnLeft)), Some(Instruction::TurnLeft));
/// assert_eq!(tracker.observe(Some(Instruction::TurnLeft)), None);
/// assert_eq!(tracker.observe(Some(Instruction::TurnRight)), Some(Instruction::TurnRight));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuidanceTracker {
    last: Option<Instruction>,
}

impl GuidanceTracker {
    /// Return `instruction` if it differs from the last one issued.
    ///
    /// `None` passes through without resetting the memory of the last
    /// instruction.
    pub fn observe(&mut self, instruction: Option<Instruction>) -> Option<Instruction> {
        let current = instruction?;
        if self.last == Some(current) {
            return None;
        }
        self.last = Some(current);
        Some(current)
    }

    /// Forget the last instruction, e.g. after switching routes.
    pub const fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    /// East, then north, then east again.
    #[fixture]
    fn route() -> Vec<Coord<f64>> {
        vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 0.001, y: 0.0 },
            Coord { x: 0.001, y: 0.001 },
            Coord { x: 0.002, y: 0.001 },
            Coord { x: 0.003, y: 0.001 },
        ]
    }

    #[rstest]
    #[case::before_left_bend(Coord { x: 0.0, y: 0.0 }, Some(Instruction::TurnLeft))]
    #[case::before_right_bend(Coord { x: 0.001, y: 0.0 }, Some(Instruction::TurnRight))]
    #[case::on_straight(Coord { x: 0.001, y: 0.001 }, Some(Instruction::ContinueStraight))]
    #[case::at_destination(Coord { x: 0.003, y: 0.001 }, Some(Instruction::Arrived))]
    #[case::near_destination(Coord { x: 0.0021, y: 0.001 }, Some(Instruction::Arrived))]
    #[case::off_route_near_end(Coord { x: 0.003, y: 0.01 }, None)]
    fn prompts_from_nearest_vertex(
        route: Vec<Coord<f64>>,
        #[case] position: Coord<f64>,
        #[case] expected: Option<Instruction>,
    ) {
        assert_eq!(next_instruction(position, &route), expected);
    }

    #[rstest]
    #[case::empty(Vec::new())]
    #[case::pair(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 }])]
    fn short_paths_give_no_bend(#[case] path: Vec<Coord<f64>>) {
        assert_eq!(next_instruction(Coord { x: 0.5, y: 0.5 }, &path), None);
    }

    #[rstest]
    fn ties_resolve_to_earliest_vertex() {
        let path = vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
        ];
        // From vertex 0 the next two segments are degenerate then east.
        assert_eq!(
            next_instruction(Coord { x: 0.0, y: 0.0 }, &path),
            Some(Instruction::ContinueStraight)
        );
    }

    #[rstest]
    fn tracker_suppresses_repeats_until_reset() {
        let mut tracker = GuidanceTracker::default();
        assert_eq!(tracker.observe(Some(Instruction::TurnRight)), Some(Instruction::TurnRight));
        assert_eq!(tracker.observe(None), None);
        assert_eq!(tracker.observe(Some(Instruction::TurnRight)), None);
        tracker.reset();
        assert_eq!(tracker.observe(Some(Instruction::TurnRight)), Some(Instruction::TurnRight));
    }

    #[rstest]
    fn displays_prompt_text() {
        assert_eq!(Instruction::Arrived.to_string(), "You have arrived at the safe zone");
    }
}
