//! Serializable views of the engine state for the presentation layer
//!
//! Snapshots are plain owned data: a renderer can keep them, diff them or
//! ship them across a thread or process boundary without touching the session.

use serde::{Deserialize, Serialize};

use crate::cascade::CascadeStep;
use crate::core::Board;
use crate::types::{Cell, JewelKind, Position, SessionPhase};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: usize,
    /// Kinds row by row; `None` is a cleared cell
    pub rows: Vec<Vec<Option<JewelKind>>>,
    pub selected: Vec<Position>,
    pub matched: Vec<Position>,
    pub falling: Vec<Position>,
}

impl From<&Board> for BoardSnapshot {
    fn from(board: &Board) -> Self {
        let flagged = |pick: fn(&Cell) -> bool| -> Vec<Position> {
            board
                .positions()
                .zip(board.cells())
                .filter(|(_, cell)| pick(cell))
                .map(|(pos, _)| pos)
                .collect()
        };

        Self {
            size: board.size(),
            rows: board.kind_rows(),
            selected: flagged(|c| c.selected),
            matched: flagged(|c| c.matched),
            falling: flagged(|c| c.falling),
        }
    }
}

/// One cascade iteration, flattened for replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSnapshot {
    pub matched: Vec<Position>,
    pub points: u32,
    pub cleared: BoardSnapshot,
    pub dropped: BoardSnapshot,
    pub refilled: BoardSnapshot,
}

impl From<&CascadeStep> for StepSnapshot {
    fn from(step: &CascadeStep) -> Self {
        Self {
            matched: step.matched.clone(),
            points: step.points,
            cleared: BoardSnapshot::from(&step.cleared),
            dropped: BoardSnapshot::from(&step.dropped),
            refilled: BoardSnapshot::from(&step.refilled),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub board: BoardSnapshot,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub kind_count: usize,
    pub phase: SessionPhase,
    pub selected: Option<Position>,
    pub new_high_score: bool,
    pub episode_id: u32,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        self.phase != SessionPhase::Terminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_snapshot_collects_flags() {
        let mut board: Board = "RB./GYP/OCK".parse().unwrap();
        board.set_selected(Position::new(1, 1), true);
        board.apply_gravity();

        let snap = BoardSnapshot::from(&board);
        assert_eq!(snap.size, 3);
        assert_eq!(snap.rows[0][2], None);
        assert_eq!(snap.rows[1][0], Some(JewelKind::Green));
        assert_eq!(snap.selected, vec![Position::new(1, 1)]);
        assert!(snap.matched.is_empty());
        // Column 2 loses its gap: P and K stay, nothing above them moves.
        assert!(snap.falling.is_empty());
    }

    #[test]
    fn test_snapshot_serializes_kinds_as_lowercase_names() {
        let board: Board = "RB/GY".parse().unwrap();
        let snap = BoardSnapshot::from(&board);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["rows"][0][0], "red");
        assert_eq!(json["rows"][1][1], "yellow");
        assert_eq!(json["size"], 2);
    }
}
