//! Cascade resolution - match, clear, drop, refill until settled
//!
//! One iteration of the loop:
//!
//! 1. Find every matched cell; none means the board has settled.
//! 2. Award [`cascade_points`] for the matched cells.
//! 3. Clear the matched cells.
//! 4. Compact each column downward (gravity).
//! 5. Refill the empty top cells from the kind pool current *at refill time*.
//!
//! Every iteration is recorded as a [`CascadeStep`] with a snapshot after
//! clearing, after dropping and after refilling, so a presentation layer can
//! replay the cascade with its own timing. Resolution itself is synchronous.

use tracing::{debug, warn};

use crate::core::{cascade_points, find_matches, Board, SimpleRng};
use crate::types::{JewelKind, Position};

/// Iteration cap for degenerate kind pools (a single-kind refill never settles)
pub const MAX_CASCADE_ITERATIONS: u32 = 10_000;

/// One completed iteration of the cascade loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeStep {
    /// Matched cells, row-major
    pub matched: Vec<Position>,
    /// Points earned by this iteration
    pub points: u32,
    /// Board with the matched cells cleared (flagged `matched`)
    pub cleared: Board,
    /// Board after gravity (moved cells flagged `falling`)
    pub dropped: Board,
    /// Board after refill (refilled cells flagged `falling`)
    pub refilled: Board,
}

/// Result of resolving a board to its settled state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeOutcome {
    pub final_board: Board,
    pub score_delta: u32,
    /// Total cells removed over all iterations
    pub cells_cleared: usize,
    pub steps: Vec<CascadeStep>,
}

impl CascadeOutcome {
    /// Number of iterations that removed cells (1 = no chain reaction)
    pub fn chain_len(&self) -> usize {
        self.steps.len()
    }

    /// True when the final board has no matches left
    pub fn settled(&self) -> bool {
        find_matches(&self.final_board).is_empty()
    }
}

/// Resolve with a kind pool that may change as points accumulate
///
/// `pool(score_delta)` is asked for the refill pool right before every
/// refill, with the points earned so far in this cascade.
pub fn resolve_cascade<'a, F>(board: &Board, rng: &mut SimpleRng, mut pool: F) -> CascadeOutcome
where
    F: FnMut(u32) -> &'a [JewelKind],
{
    let mut current = board.clone();
    current.clear_flags();

    let mut score_delta: u32 = 0;
    let mut cells_cleared = 0usize;
    let mut steps = Vec::new();

    loop {
        current.clear_step_flags();
        let matched = find_matches(&current);
        if matched.is_empty() {
            break;
        }
        if steps.len() as u32 >= MAX_CASCADE_ITERATIONS {
            warn!(
                iterations = steps.len(),
                "cascade did not settle; kind pool too small"
            );
            break;
        }

        let points = cascade_points(matched.len());
        score_delta = score_delta.saturating_add(points);
        cells_cleared += matched.len();

        current.clear_matched(&matched);
        let cleared = current.clone();

        current.apply_gravity();
        let dropped = current.clone();

        let kinds = pool(score_delta);
        current.refill_with(|| rng.pick_kind(kinds));
        let refilled = current.clone();

        debug!(
            iteration = steps.len() + 1,
            matched = matched.len(),
            points,
            pool = kinds.len(),
            "cascade step"
        );

        steps.push(CascadeStep {
            matched: matched.to_vec(),
            points,
            cleared,
            dropped,
            refilled,
        });
    }

    current.clear_flags();
    CascadeOutcome {
        final_board: current,
        score_delta,
        cells_cleared,
        steps,
    }
}

/// Resolve with a fixed kind pool
pub fn resolve_cascade_with_kinds(
    board: &Board,
    kinds: &[JewelKind],
    rng: &mut SimpleRng,
) -> CascadeOutcome {
    resolve_cascade(board, rng, |_| kinds)
}
