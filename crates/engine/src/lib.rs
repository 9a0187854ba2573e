//! Session engine - turns player taps into resolved game state
//!
//! Built on the pure rules in `jewel-master-core`, this crate adds the stateful
//! parts of a game:
//!
//! - [`cascade`]: match / clear / drop / refill loop with a replayable step trace
//! - [`session`]: the `Idle → OneSelected → Idle | Terminal` state machine
//! - [`store`]: injected high-score persistence
//! - [`snapshot`]: serde views for a presentation layer
//! - [`config`]: board size, seed and generation limits (with env overrides)
//!
//! Everything is synchronous. A session is owned by a single caller and is
//! `Send` whenever its store is.
//!
//! # Example
//!
//! ```
//! use jewel_master_engine::{EngineConfig, GameSession, MemoryStore, SelectOutcome};
//!
//! let mut session = GameSession::new(EngineConfig::with_seed(3), MemoryStore::new()).unwrap();
//! if let Some(swap) = session.hint() {
//!     session.select(swap.a);
//!     match session.select(swap.b) {
//!         SelectOutcome::Resolved(res) => assert!(res.score >= 30),
//!         other => panic!("hinted swap must resolve, got {other:?}"),
//!     }
//! }
//! ```

pub mod cascade;
pub mod config;
pub mod error;
pub mod session;
pub mod snapshot;
pub mod store;

pub use jewel_master_core as core;
pub use jewel_master_types as types;

pub use cascade::{
    resolve_cascade, resolve_cascade_with_kinds, CascadeOutcome, CascadeStep,
    MAX_CASCADE_ITERATIONS,
};
pub use config::{EngineConfig, MAX_BOARD_SIZE};
pub use error::EngineError;
pub use session::{GameSession, SelectOutcome, SwapResolution};
pub use snapshot::{BoardSnapshot, SessionSnapshot, StepSnapshot};
pub use store::{HighScoreStore, MemoryStore};
