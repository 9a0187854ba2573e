//! Engine errors - failures of session construction and reset

use thiserror::Error;

use crate::core::GenerationError;

/// Errors surfaced by session construction and reset
///
/// Player input never produces an error: off-board taps and illegal swaps are
/// reported as [`crate::SelectOutcome`] variants instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid board size {size}: expected 1..={max}")]
    InvalidBoardSize { size: usize, max: usize },
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl EngineError {
    /// Short machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidBoardSize { .. } => "invalid_board_size",
            EngineError::Generation(GenerationError::TooFewKinds { .. }) => "too_few_kinds",
            EngineError::Generation(GenerationError::RoundLimit { .. }) => "generation_round_limit",
        }
    }
}
