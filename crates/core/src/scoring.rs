//! Scoring module - points, levels and the difficulty-limited kind pool
//!
//! - Every cleared cell is worth [`POINTS_PER_CELL`] (not per group).
//! - `level = score / 100 + 1`.
//! - The kind pool is the first `min(5 + level, 8)` kinds of the canonical
//!   ordering, so difficulty rises with score and never drops within a session.

use crate::types::{JewelKind, BASE_KIND_COUNT, POINTS_PER_CELL, POINTS_PER_LEVEL, START_LEVEL};

/// Points for clearing `cells` cells in one cascade iteration
pub fn cascade_points(cells: usize) -> u32 {
    (cells as u32).saturating_mul(POINTS_PER_CELL)
}

/// Level for a score (integer division)
pub fn level_for_score(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + START_LEVEL
}

/// Number of kinds in play at a level, capped at the total kind count
pub fn kind_count_for_level(level: u32) -> usize {
    BASE_KIND_COUNT
        .saturating_add(level as usize)
        .min(JewelKind::COUNT)
}

/// The kind pool for a level (a prefix of [`JewelKind::ALL`])
pub fn available_kinds(level: u32) -> &'static [JewelKind] {
    &JewelKind::ALL[..kind_count_for_level(level)]
}

/// The kind pool for a score
pub fn kinds_for_score(score: u32) -> &'static [JewelKind] {
    available_kinds(level_for_score(score))
}
