//! Plain-text rendering of a ranking.

use evacroute_core::{Ranking, RiskBand, ScoredCandidate, format_duration};

/// Printed in place of a table when no route survived routing.
pub(crate) const NO_ROUTE_MESSAGE: &str = "No valid route found";

/// Printed under the table when risk came from the random fallback.
pub(crate) const DEGRADED_NOTE: &str =
    "Hazard analysis was unavailable; risk values are estimates.";

const HEADERS: [&str; 7] = ["#", "Zone", "Distance", "Duration", "Risk", "Turns", "Cost"];
const COLUMN_GAP: &str = "  ";

/// Render `ranking` as a left-aligned table, best route first.
pub(crate) fn render_table(ranking: &Ranking) -> String {
    if ranking.is_empty() {
        return NO_ROUTE_MESSAGE.to_owned();
    }

    let rows: Vec<[String; 7]> = ranking
        .candidates()
        .iter()
        .enumerate()
        .map(|(index, scored)| row(index.saturating_add(1), scored))
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len().saturating_add(2));
    lines.push(line(HEADERS.iter().copied(), &widths));
    lines.extend(rows.iter().map(|cells| line(cells.iter().map(String::as_str), &widths)));
    if ranking.is_degraded() {
        lines.push(DEGRADED_NOTE.to_owned());
    }
    lines.join("\n")
}

fn row(rank: usize, scored: &ScoredCandidate) -> [String; 7] {
    [
        rank.to_string(),
        scored.candidate.name.clone(),
        format!("{:.0} m", scored.candidate.distance_meters),
        format_duration(scored.candidate.duration_seconds),
        format!("{:.2} ({})", scored.risk, RiskBand::from_risk(scored.risk)),
        scored.turn_count.to_string(),
        format!("{:.3}", scored.cost),
    ]
}

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize; 7]) -> String {
    let padded: Vec<String> = cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    padded.join(COLUMN_GAP).trim_end().to_owned()
}
