//! Core rules module - pure, deterministic, and testable
//!
//! This crate contains the board and the stateless rules of the match-3 game.
//! It has **no dependencies** on UI, persistence, or I/O, making it:
//!
//! - **Deterministic**: the same seed produces identical boards
//! - **Testable**: every rule is a free function over a [`Board`]
//! - **Portable**: runs headless, in a terminal, or behind any UI
//!
//! # Module Structure
//!
//! - [`board`]: N x N jewel grid with gravity and refill
//! - [`matches`]: match detection (runs of three or more)
//! - [`generate`]: settled board generation
//! - [`moves`]: swap legality and stalemate detection
//! - [`rng`]: seeded LCG for uniform kind draws
//! - [`scoring`]: points, level law and the difficulty-limited kind pool
//!
//! # Example
//!
//! ```
//! use jewel_master_core::{find_matches, generate, any_legal_move_exists, SimpleRng};
//! use jewel_master_core::scoring::available_kinds;
//!
//! let mut rng = SimpleRng::new(12345);
//! let board = generate(8, available_kinds(1), &mut rng).unwrap();
//!
//! // Generated boards are settled.
//! assert!(find_matches(&board).is_empty());
//! let _playable = any_legal_move_exists(&board);
//! ```

pub mod board;
pub mod generate;
pub mod matches;
pub mod moves;
pub mod rng;
pub mod scoring;

pub use jewel_master_types as types;

// Re-export commonly used items for convenience
pub use board::{Board, BoardParseError};
pub use generate::{generate, generate_with_limit, GenerationError};
pub use matches::{find_matches, has_match, is_settled, MatchSet};
pub use moves::{any_legal_move_exists, can_swap_produce_match, find_legal_move, legal_moves};
pub use rng::SimpleRng;
pub use scoring::{available_kinds, cascade_points, kind_count_for_level, level_for_score};
