//! Jewel Master (workspace facade crate).
//!
//! Exposes `jewel_master::{core,engine,types}` while the implementation lives
//! in dedicated crates under `crates/`.

pub use jewel_master_core as core;
pub use jewel_master_engine as engine;
pub use jewel_master_types as types;
