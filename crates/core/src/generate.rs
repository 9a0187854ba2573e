//! Board generation - random fill re-rolled to a settled fixed point
//!
//! Every cell gets a uniform kind from the pool; then, while any match
//! exists, every matched cell is re-rolled. The loop terminates almost surely
//! with two or more kinds. With a single kind it cannot, so pools smaller than
//! [`MIN_GENERATION_KINDS`] are rejected and the number of re-roll rounds is
//! capped.

use thiserror::Error;
use tracing::debug;

use crate::board::Board;
use crate::matches::find_matches;
use crate::rng::SimpleRng;
use crate::types::{JewelKind, MAX_GENERATION_ROUNDS, MIN_GENERATION_KINDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("board generation needs at least 2 kinds, got {available}")]
    TooFewKinds { available: usize },
    #[error("board still had matches after {rounds} re-roll rounds")]
    RoundLimit { rounds: u32 },
}

/// Generate a settled board with the default round cap
pub fn generate(
    size: usize,
    kinds: &[JewelKind],
    rng: &mut SimpleRng,
) -> Result<Board, GenerationError> {
    generate_with_limit(size, kinds, rng, MAX_GENERATION_ROUNDS)
}

/// Generate a settled board, giving up after `max_rounds` re-roll rounds
pub fn generate_with_limit(
    size: usize,
    kinds: &[JewelKind],
    rng: &mut SimpleRng,
    max_rounds: u32,
) -> Result<Board, GenerationError> {
    if kinds.len() < MIN_GENERATION_KINDS {
        return Err(GenerationError::TooFewKinds {
            available: kinds.len(),
        });
    }

    let mut board = Board::new(size);
    board.refill_with(|| rng.pick_kind(kinds));
    board.clear_flags();

    let mut rounds = 0;
    loop {
        let matched = find_matches(&board);
        if matched.is_empty() {
            break;
        }
        if rounds >= max_rounds {
            return Err(GenerationError::RoundLimit { rounds });
        }
        for pos in matched.iter() {
            board.set_kind(pos, rng.pick_kind(kinds));
        }
        rounds += 1;
    }

    debug!(size, kinds = kinds.len(), rounds, "generated settled board");
    Ok(board)
}
