//! Headless autoplay runner (default binary).
//!
//! Plays a session by always taking the first hinted swap, logging every
//! resolved cascade, until no legal move is left or the move cap is hit.
//!
//! Environment:
//! - `JEWEL_BOARD_SIZE`, `JEWEL_SEED`, `JEWEL_MAX_GENERATION_ROUNDS`: see [`EngineConfig`]
//! - `JEWEL_AUTOPLAY_MAX_MOVES`: move cap (default: 500)
//! - `RUST_LOG`: log filter (default: `info`)

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use jewel_master::engine::{EngineConfig, GameSession, MemoryStore, SelectOutcome};

const DEFAULT_MAX_MOVES: u32 = 500;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = EngineConfig::from_env();
    let max_moves = std::env::var("JEWEL_AUTOPLAY_MAX_MOVES")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_MAX_MOVES);

    let mut session = GameSession::new(config.clone(), MemoryStore::new())
        .with_context(|| format!("failed to start session with {config:?}"))?;

    let mut moves = 0u32;
    let mut longest_chain = 0usize;

    while moves < max_moves {
        let Some(swap) = session.hint() else {
            break;
        };

        session.select(swap.a);
        match session.select(swap.b) {
            SelectOutcome::Resolved(res) => {
                moves += 1;
                longest_chain = longest_chain.max(res.cascade.chain_len());
                if res.terminal {
                    break;
                }
            }
            other => {
                // A hinted swap is always legal; anything else is an engine bug.
                anyhow::bail!("hinted swap {swap:?} was not resolved: {other:?}");
            }
        }
    }

    if moves >= max_moves && !session.is_terminal() {
        warn!(max_moves, "move cap reached before the board ran dry");
    }

    let snapshot = session.snapshot();
    info!(
        moves,
        score = snapshot.score,
        level = snapshot.level,
        kinds = snapshot.kind_count,
        longest_chain,
        terminal = session.is_terminal(),
        "autoplay finished"
    );
    println!("{}", session.board());
    println!(
        "moves={} score={} level={} high_score={}",
        moves, snapshot.score, snapshot.level, snapshot.high_score
    );

    Ok(())
}
