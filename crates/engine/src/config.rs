//! Engine configuration
//!
//! Defaults reproduce the reference game (8x8 board). Values can be overridden
//! from the environment:
//!
//! - `JEWEL_BOARD_SIZE`: board edge length (default: 8)
//! - `JEWEL_SEED`: RNG seed (default: 1)
//! - `JEWEL_MAX_GENERATION_ROUNDS`: re-roll cap for board generation (default: 10000)
//!
//! Unparseable values fall back to the default.

use crate::error::EngineError;
use crate::types::{DEFAULT_BOARD_SIZE, MAX_GENERATION_ROUNDS};

/// Largest accepted board edge length
pub const MAX_BOARD_SIZE: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub board_size: usize,
    pub seed: u32,
    pub max_generation_rounds: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            seed: 1,
            max_generation_rounds: MAX_GENERATION_ROUNDS,
        }
    }
}

impl EngineConfig {
    /// Default configuration with a specific seed
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup (the environment, a map in tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let board_size = lookup("JEWEL_BOARD_SIZE")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.board_size);

        let seed = lookup("JEWEL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let max_generation_rounds = lookup("JEWEL_MAX_GENERATION_ROUNDS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_generation_rounds);

        Self {
            board_size,
            seed,
            max_generation_rounds,
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.board_size == 0 || self.board_size > MAX_BOARD_SIZE {
            return Err(EngineError::InvalidBoardSize {
                size: self.board_size,
                max: MAX_BOARD_SIZE,
            });
        }
        Ok(())
    }
}
