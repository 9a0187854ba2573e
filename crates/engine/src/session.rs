//! Game session - the player-facing state machine
//!
//! A session owns the board, the running score, the level and the kind pool.
//! All player input arrives through [`GameSession::select`]; every call runs
//! to completion, including the whole cascade of an accepted swap.
//!
//! Phases:
//!
//! ```text
//!   Idle --select--> OneSelected --select (swap attempt)--> Idle
//!                                                          \
//!                                          no legal move -> Terminal
//! ```
//!
//! `Terminal` is absorbing; only [`GameSession::reset`] leaves it.

use tracing::{debug, info, instrument};

use crate::cascade::{resolve_cascade, CascadeOutcome};
use crate::config::EngineConfig;
use crate::core::scoring::{available_kinds, kind_count_for_level, kinds_for_score, level_for_score};
use crate::core::{any_legal_move_exists, can_swap_produce_match, find_legal_move, generate_with_limit};
use crate::core::{Board, SimpleRng};
use crate::error::EngineError;
use crate::snapshot::{BoardSnapshot, SessionSnapshot};
use crate::store::{HighScoreStore, MemoryStore};
use crate::types::{JewelKind, Position, SessionPhase, Swap, START_LEVEL};

/// What a call to [`GameSession::select`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Off-board position, or the session is terminal
    Ignored,
    /// First cell of a pair selected
    Selected(Position),
    /// A non-adjacent cell (or the selected one again) was tapped; the
    /// selection moved there
    Reselected { from: Position, to: Position },
    /// Adjacent swap that would not produce a match; board unchanged
    Rejected {
        from: Position,
        to: Position,
        terminal: bool,
    },
    /// Adjacent swap accepted and resolved
    Resolved(SwapResolution),
}

/// Everything an accepted swap changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapResolution {
    pub swap: Swap,
    pub cascade: CascadeOutcome,
    /// Session score after the cascade
    pub score: u32,
    /// Session level after the cascade
    pub level: u32,
    pub leveled_up: bool,
    /// The stored high score was raised by this swap
    pub new_high_score: bool,
    /// No legal move is left on the resolved board
    pub terminal: bool,
}

/// A single game, from a fresh board to a stalemate
#[derive(Debug, Clone)]
pub struct GameSession<S: HighScoreStore = MemoryStore> {
    board: Board,
    score: u32,
    high_score: u32,
    level: u32,
    selected: Option<Position>,
    phase: SessionPhase,
    /// Record standing when the episode began
    record_to_beat: u32,
    /// Set once the score beats a non-zero standing record (cleared on reset)
    record_broken: bool,
    rng: SimpleRng,
    config: EngineConfig,
    store: S,
    /// Monotonic episode id (increments on reset)
    episode_id: u32,
}

impl<S: HighScoreStore> GameSession<S> {
    /// Start a session on a freshly generated level-1 board
    ///
    /// The high score is read from `store` once, here.
    pub fn new(config: EngineConfig, store: S) -> Result<Self, EngineError> {
        config.validate()?;
        let mut rng = SimpleRng::new(config.seed);
        let board = generate_with_limit(
            config.board_size,
            available_kinds(START_LEVEL),
            &mut rng,
            config.max_generation_rounds,
        )?;

        let mut session = Self::assemble(board, rng, config, store);
        session.check_terminal();
        info!(
            size = session.config.board_size,
            seed = session.config.seed,
            high_score = session.high_score,
            terminal = session.is_terminal(),
            "session started"
        );
        Ok(session)
    }

    /// Start a session on a given board (replays, tests)
    ///
    /// The board is taken as-is: no generation, no terminal check until the
    /// first swap attempt. Flags are cleared. The configured board size is
    /// replaced by the board's own, so later resets keep its dimensions.
    pub fn with_board(board: Board, config: EngineConfig, store: S) -> Self {
        let rng = SimpleRng::new(config.seed);
        let mut board = board;
        board.clear_flags();
        let config = EngineConfig {
            board_size: board.size(),
            ..config
        };
        Self::assemble(board, rng, config, store)
    }

    fn assemble(board: Board, rng: SimpleRng, config: EngineConfig, store: S) -> Self {
        let high_score = store.high_score();
        Self {
            board,
            score: 0,
            high_score,
            level: START_LEVEL,
            selected: None,
            phase: SessionPhase::Idle,
            record_to_beat: high_score,
            record_broken: false,
            rng,
            config,
            store,
            episode_id: 0,
        }
    }

    /// Start over on a new level-1 board
    ///
    /// The RNG stream continues, so consecutive episodes get different boards.
    /// On error the session is left untouched.
    #[instrument(skip(self), fields(episode = self.episode_id))]
    pub fn reset(&mut self) -> Result<(), EngineError> {
        let board = generate_with_limit(
            self.config.board_size,
            available_kinds(START_LEVEL),
            &mut self.rng,
            self.config.max_generation_rounds,
        )?;

        self.board = board;
        self.score = 0;
        self.level = START_LEVEL;
        self.selected = None;
        self.phase = SessionPhase::Idle;
        self.record_to_beat = self.high_score;
        self.record_broken = false;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.check_terminal();

        info!(
            episode = self.episode_id,
            terminal = self.is_terminal(),
            "session reset"
        );
        Ok(())
    }

    /// Forget the all-time record, here and in the store
    pub fn reset_high_score(&mut self) {
        self.high_score = 0;
        self.record_to_beat = 0;
        self.record_broken = false;
        self.store.set_high_score(0);
        info!(episode = self.episode_id, "high score reset");
    }

    /// Handle a tap on `pos`
    ///
    /// Any tap that is not adjacent to the selection, including the selected
    /// cell itself, moves the selection there.
    #[instrument(level = "debug", skip(self))]
    pub fn select(&mut self, pos: Position) -> SelectOutcome {
        if self.phase == SessionPhase::Terminal || !self.board.contains(pos) {
            return SelectOutcome::Ignored;
        }

        match self.selected {
            None => {
                self.board.set_selected(pos, true);
                self.selected = Some(pos);
                self.phase = SessionPhase::OneSelected;
                SelectOutcome::Selected(pos)
            }
            Some(from) if !from.is_adjacent(pos) => {
                self.board.set_selected(from, false);
                self.board.set_selected(pos, true);
                self.selected = Some(pos);
                SelectOutcome::Reselected { from, to: pos }
            }
            Some(from) => self.attempt_swap(from, pos),
        }
    }

    fn clear_selection(&mut self) {
        if let Some(pos) = self.selected.take() {
            self.board.set_selected(pos, false);
        }
        self.phase = SessionPhase::Idle;
    }

    fn attempt_swap(&mut self, from: Position, to: Position) -> SelectOutcome {
        self.clear_selection();

        if !can_swap_produce_match(&self.board, from, to) {
            let terminal = self.check_terminal();
            debug!(?from, ?to, terminal, "swap rejected");
            return SelectOutcome::Rejected { from, to, terminal };
        }

        self.board.swap(from, to);
        let base = self.score;
        let cascade = resolve_cascade(&self.board, &mut self.rng, |delta| {
            kinds_for_score(base.saturating_add(delta))
        });
        self.board = cascade.final_board.clone();

        let previous_level = self.level;
        let new_high_score = self.add_score(cascade.score_delta);
        let terminal = self.check_terminal();

        info!(
            score = self.score,
            delta = cascade.score_delta,
            chain = cascade.chain_len(),
            level = self.level,
            "swap resolved"
        );

        SelectOutcome::Resolved(SwapResolution {
            swap: Swap::new(from, to),
            cascade,
            score: self.score,
            level: self.level,
            leveled_up: self.level > previous_level,
            new_high_score,
            terminal,
        })
    }

    /// Add points, advance the level and write a beaten record through
    ///
    /// Returns true when the high score was raised.
    fn add_score(&mut self, delta: u32) -> bool {
        self.score = self.score.saturating_add(delta);

        let level = level_for_score(self.score);
        if level > self.level {
            info!(
                level,
                kinds = kind_count_for_level(level),
                "level up"
            );
            self.level = level;
        }

        if self.score > self.high_score {
            self.high_score = self.score;
            self.store.set_high_score(self.score);
            // A first-ever score is not celebrated as a record.
            if self.record_to_beat > 0 && !self.record_broken {
                info!(
                    high_score = self.score,
                    previous = self.record_to_beat,
                    "new high score"
                );
                self.record_broken = true;
            }
            return true;
        }
        false
    }

    /// Enter `Terminal` when no legal move remains; returns whether terminal
    fn check_terminal(&mut self) -> bool {
        if self.phase != SessionPhase::Terminal && !any_legal_move_exists(&self.board) {
            self.clear_selection();
            self.phase = SessionPhase::Terminal;
            info!(score = self.score, episode = self.episode_id, "no legal moves left");
        }
        self.phase == SessionPhase::Terminal
    }

    /// First legal swap on the board, if the game is still on
    pub fn hint(&self) -> Option<Swap> {
        if self.is_terminal() {
            return None;
        }
        find_legal_move(&self.board)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: BoardSnapshot::from(&self.board),
            score: self.score,
            high_score: self.high_score,
            level: self.level,
            kind_count: self.kind_count(),
            phase: self.phase,
            selected: self.selected,
            new_high_score: self.is_new_high_score(),
            episode_id: self.episode_id,
        }
    }

    // Getters

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn kind_count(&self) -> usize {
        kind_count_for_level(self.level)
    }

    /// The kinds refills currently draw from
    pub fn available_kinds(&self) -> &'static [JewelKind] {
        available_kinds(self.level)
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == SessionPhase::Terminal
    }

    /// True when this episode's score beat a non-zero record and still holds it
    pub fn is_new_high_score(&self) -> bool {
        self.record_broken && self.score == self.high_score
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    fn session(text: &str) -> GameSession {
        GameSession::with_board(board(text), EngineConfig::default(), MemoryStore::new())
    }

    #[test]
    fn test_new_session_starts_at_level_one() {
        let s = GameSession::new(EngineConfig::with_seed(7), MemoryStore::new()).unwrap();
        assert_eq!(s.score(), 0);
        assert_eq!(s.level(), 1);
        assert_eq!(s.kind_count(), 6);
        assert_eq!(s.board().size(), 8);
        assert!(s.board().is_full());
        assert!(crate::core::is_settled(s.board()));
        assert!(s
            .board()
            .cells()
            .iter()
            .filter_map(|c| c.kind)
            .all(|k| k.index() < 6));
        assert_eq!(s.phase() == SessionPhase::Terminal, s.hint().is_none());
    }

    #[test]
    fn test_new_rejects_bad_board_size() {
        let config = EngineConfig {
            board_size: 0,
            ..EngineConfig::default()
        };
        let err = GameSession::new(config, MemoryStore::new()).unwrap_err();
        assert_eq!(err.code(), "invalid_board_size");
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = GameSession::new(EngineConfig::with_seed(99), MemoryStore::new()).unwrap();
        let b = GameSession::new(EngineConfig::with_seed(99), MemoryStore::new()).unwrap();
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn test_off_board_select_is_ignored() {
        let mut s = session("RRB/GRR/BBG");
        assert_eq!(s.select(Position::new(3, 0)), SelectOutcome::Ignored);
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn test_same_cell_tap_keeps_selection() {
        let mut s = session("RRB/GRR/BBG");
        let p = Position::new(1, 1);
        assert_eq!(s.select(p), SelectOutcome::Selected(p));
        assert_eq!(s.phase(), SessionPhase::OneSelected);
        assert!(s.board().get(p).unwrap().selected);

        // Distance 0 is not adjacent: the selection is replaced by itself.
        assert_eq!(s.select(p), SelectOutcome::Reselected { from: p, to: p });
        assert_eq!(s.phase(), SessionPhase::OneSelected);
        assert_eq!(s.selected(), Some(p));
        assert!(s.board().get(p).unwrap().selected);
        assert_eq!(s.snapshot().board.selected, vec![p]);
    }

    #[test]
    fn test_non_adjacent_select_moves_selection() {
        let mut s = session("RRB/GRR/BBG");
        let from = Position::new(0, 0);
        let to = Position::new(2, 2);
        let before = s.board().clone();
        s.select(from);
        assert_eq!(s.select(to), SelectOutcome::Reselected { from, to });
        assert_eq!(s.selected(), Some(to));
        assert_eq!(s.phase(), SessionPhase::OneSelected);
        assert!(!s.board().get(from).unwrap().selected);
        assert!(s.board().get(to).unwrap().selected);
        assert!(s.board().same_kinds(&before));
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_rejected_swap_leaves_board_unchanged() {
        let mut s = session("RRB/GRR/BBG");
        let before = s.board().clone();
        let from = Position::new(2, 0);
        let to = Position::new(2, 1);
        s.select(from);
        assert_eq!(
            s.select(to),
            SelectOutcome::Rejected {
                from,
                to,
                terminal: false
            }
        );
        assert_eq!(s.board(), &before);
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn test_three_by_three_swap_resolves() {
        let mut s = session("RRB/GRR/BBG");
        s.select(Position::new(0, 2));
        let outcome = s.select(Position::new(1, 2));

        let SelectOutcome::Resolved(res) = outcome else {
            panic!("expected a resolved swap, got {outcome:?}");
        };
        assert_eq!(res.swap, Swap::new(Position::new(0, 2), Position::new(1, 2)));
        let first = &res.cascade.steps[0];
        assert_eq!(first.points, 30);
        assert_eq!(first.cleared.to_string(), "...\nGRB\nBBG");
        assert_eq!(res.cascade.score_delta, 30 * res.cascade.chain_len() as u32);
        assert_eq!(s.score(), res.cascade.score_delta);
        assert_eq!(res.score, s.score());

        // Only the top row was ever cleared and refilled.
        assert!(s.board().to_string().ends_with("\nGRB\nBBG"));
        assert!(s.board().is_full());
        assert!(crate::core::is_settled(s.board()));
        assert!(s.board().cells().iter().all(|c| !c.is_flagged()));
        assert_eq!(s.phase() == SessionPhase::Terminal, res.terminal);
    }

    #[test]
    fn test_stalemate_turns_terminal_after_swap_attempt() {
        let mut s = session("RGBY/BYRG/RGBY/BYRG");
        assert_eq!(s.phase(), SessionPhase::Idle);
        s.select(Position::new(0, 0));
        let outcome = s.select(Position::new(0, 1));
        assert!(matches!(
            outcome,
            SelectOutcome::Rejected { terminal: true, .. }
        ));
        assert!(s.is_terminal());
        assert_eq!(s.hint(), None);
        assert_eq!(s.select(Position::new(1, 1)), SelectOutcome::Ignored);
    }

    #[test]
    fn test_reset_leaves_terminal() {
        let mut s = session("RGBY/BYRG/RGBY/BYRG");
        s.select(Position::new(0, 0));
        s.select(Position::new(1, 0));
        assert!(s.is_terminal());

        s.reset().unwrap();
        assert_eq!(s.episode_id(), 1);
        assert_eq!(s.score(), 0);
        assert_eq!(s.level(), 1);
        assert_eq!(s.selected(), None);
        assert_eq!(s.board().size(), 4);
        assert_eq!(s.is_terminal(), !any_legal_move_exists(s.board()));
    }

    #[test]
    fn test_with_board_adopts_board_size() {
        let mut s = session("RRB/GRR/BBG");
        assert_eq!(s.config().board_size, 3);
        assert_eq!(s.config().seed, EngineConfig::default().seed);

        s.reset().unwrap();
        assert_eq!(s.board().size(), 3);
        assert!(s.board().is_full());
        assert!(crate::core::is_settled(s.board()));
    }

    #[test]
    fn test_high_score_write_through() {
        let mut store = MemoryStore::with_high_score(20);
        {
            let mut s = GameSession::with_board(
                board("RRB/GRR/BBG"),
                EngineConfig::default(),
                &mut store,
            );
            assert_eq!(s.high_score(), 20);
            assert!(!s.is_new_high_score());
            s.select(Position::new(0, 0));
            let SelectOutcome::Resolved(res) = s.select(Position::new(1, 0)) else {
                panic!("swap should resolve");
            };
            assert!(res.new_high_score);
            assert_eq!(s.high_score(), s.score());
            assert!(s.is_new_high_score());
        }
        assert!(store.high_score() >= 30);
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_first_ever_score_is_stored_but_not_celebrated() {
        let mut s = session("RRB/GRR/BBG");
        s.select(Position::new(0, 0));
        let SelectOutcome::Resolved(res) = s.select(Position::new(1, 0)) else {
            panic!("swap should resolve");
        };
        assert!(res.new_high_score);
        assert_eq!(s.high_score(), s.score());
        assert!(!s.is_new_high_score());
        assert!(!s.snapshot().new_high_score);
        assert_eq!(s.store().writes(), 1);
    }

    #[test]
    fn test_reset_high_score_clears_store_and_rearms_record() {
        let mut store = MemoryStore::with_high_score(50);
        {
            let mut s = GameSession::with_board(
                board("RRB/GRR/BBG"),
                EngineConfig::default(),
                &mut store,
            );
            s.reset_high_score();
            assert_eq!(s.high_score(), 0);
            assert!(!s.is_new_high_score());
            assert_eq!(s.store().high_score(), 0);
            assert_eq!(s.store().writes(), 1);

            // The next scoring swap sets a new record through the store.
            s.select(Position::new(0, 2));
            let SelectOutcome::Resolved(res) = s.select(Position::new(1, 2)) else {
                panic!("swap should resolve");
            };
            assert!(res.new_high_score);
            assert!(s.score() >= 30);
            assert_eq!(s.high_score(), s.score());
        }
        assert!(store.high_score() >= 30);
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn test_lower_score_does_not_touch_store() {
        let mut s = GameSession::with_board(
            board("RRB/GRR/BBG"),
            EngineConfig::default(),
            MemoryStore::with_high_score(10_000),
        );
        s.select(Position::new(0, 0));
        s.select(Position::new(1, 0));
        assert!(s.score() > 0);
        assert_eq!(s.high_score(), 10_000);
        assert!(!s.is_new_high_score());
        assert_eq!(s.into_store().writes(), 0);
    }

    #[test]
    fn test_level_up_widens_kind_pool() {
        let mut s = session("RRB/GRR/BBG");
        s.score = 90;
        s.select(Position::new(0, 2));
        let SelectOutcome::Resolved(res) = s.select(Position::new(1, 2)) else {
            panic!("swap should resolve");
        };
        assert!(res.leveled_up);
        assert_eq!(res.level, 2);
        assert_eq!(s.available_kinds().len(), 7);
        assert_eq!(s.snapshot().kind_count, 7);
    }

    #[test]
    fn test_hint_is_first_legal_move() {
        let s = session("RRB/GRR/BBG");
        assert_eq!(
            s.hint(),
            Some(Swap::new(Position::new(0, 0), Position::new(1, 0)))
        );
    }

    #[test]
    fn test_snapshot_reflects_selection() {
        let mut s = session("RRB/GRR/BBG");
        s.select(Position::new(2, 2));
        let snap = s.snapshot();
        assert_eq!(snap.phase, SessionPhase::OneSelected);
        assert_eq!(snap.selected, Some(Position::new(2, 2)));
        assert_eq!(snap.board.selected, vec![Position::new(2, 2)]);
        assert!(snap.playable());
    }
}
