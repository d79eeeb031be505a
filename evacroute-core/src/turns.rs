//! Count direction changes along a route.
//!
//! Headings are computed on the raw `[lon, lat]` components with
//! `atan2(Δy, Δx)`. This planar approximation only holds at walking scale.

use std::f64::consts::FRAC_PI_4;

use geo::Coord;

/// Heading change, in radians, above which a vertex counts as a turn.
pub const TURN_THRESHOLD_RADIANS: f64 = FRAC_PI_4;

/// Count the vertices where the path changes heading by more than 45°.
///
/// Each window of three consecutive points contributes at most one turn.
/// The absolute heading difference is not wrapped into `[0, π]`, so a
/// heading flip across the `±π` seam also counts. Paths with fewer than
/// three points have no turns.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use evacroute_core::count_turns;
///
/// let path = [
///     Coord { x: 0.0, y: 0.0 },
///     Coord { x: 1.0, y: 0.0 },
///     Coord { x: 1.0, y: 1.0 },
/// ];
/// assert_eq!(count_turns(&path), 1);
/// ```
#[must_use]
pub fn count_turns(path: &[Coord<f64>]) -> u32 {
    let turns = path.windows(3).filter(|window| is_turn(window)).count();
    u32::try_from(turns).unwrap_or(u32::MAX)
}

#[expect(
    clippy::float_arithmetic,
    reason = "heading differences require float subtraction"
)]
fn is_turn(window: &[Coord<f64>]) -> bool {
    let [first, middle, last] = window else {
        return false;
    };
    let change = (heading(*middle, *last) - heading(*first, *middle)).abs();
    change > TURN_THRESHOLD_RADIANS
}

#[expect(
    clippy::float_arithmetic,
    reason = "segment deltas require float subtraction"
)]
fn heading(from: Coord<f64>, to: Coord<f64>) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}
