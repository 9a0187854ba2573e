//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no game logic attached, making them usable
//! in any context (core rules, session state machine, presentation snapshots).
//!
//! # Board Geometry
//!
//! - **Size**: square board, 8x8 by default ([`DEFAULT_BOARD_SIZE`])
//! - **Coordinates**: [`Position`] `{ row, col }`, row 0 is the top row
//! - **Adjacency**: Manhattan distance of exactly 1
//!
//! # Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_RUN` | 3 | Shortest run that counts as a match |
//! | `POINTS_PER_CELL` | 10 | Points per cleared cell |
//! | `POINTS_PER_LEVEL` | 100 | Score span of one level |
//! | `BASE_KIND_COUNT` | 5 | Kinds available before the level bonus |
//! | `MAX_GENERATION_ROUNDS` | 10000 | Re-roll cap during board generation |
//!
//! # Examples
//!
//! ```
//! use jewel_master_types::{JewelKind, Position, DEFAULT_BOARD_SIZE};
//!
//! let kind = JewelKind::from_str("Purple").unwrap();
//! assert_eq!(kind, JewelKind::Purple);
//! assert_eq!(kind.as_str(), "purple");
//!
//! let a = Position::new(2, 3);
//! assert!(a.is_adjacent(Position::new(2, 4)));
//! assert!(!a.is_adjacent(Position::new(3, 4)));
//!
//! assert_eq!(DEFAULT_BOARD_SIZE, 8);
//! ```

use serde::{Deserialize, Serialize};

/// Default board edge length (8x8 board)
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Shortest contiguous run of one kind that counts as a match
pub const MIN_RUN: usize = 3;

/// Points awarded for every cleared cell (not per group)
pub const POINTS_PER_CELL: u32 = 10;

/// Score span of a single level (level = score / 100 + 1)
pub const POINTS_PER_LEVEL: u32 = 100;

/// Number of kinds available before the per-level bonus is added
pub const BASE_KIND_COUNT: usize = 5;

/// Level a fresh session starts at
pub const START_LEVEL: u32 = 1;

/// Upper bound on re-roll rounds while generating a settled board
pub const MAX_GENERATION_ROUNDS: u32 = 10_000;

/// Fewest kinds from which a match-free board can be generated
pub const MIN_GENERATION_KINDS: usize = 2;


/// The eight jewel kinds, in canonical order
///
/// The engine treats a kind as an opaque tag: only equality matters.
/// Display identity (color, shape) belongs to the presentation layer:
/// - **Red**: diamond
/// - **Blue**: pentagon
/// - **Green**: square
/// - **Yellow**: triangle
/// - **Purple**: octagon
/// - **Orange**: hexagon
/// - **Cyan**: star
/// - **Pink**: heart
///
/// The difficulty-limited pool is always a prefix of [`JewelKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JewelKind {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    Cyan,
    Pink,
}

impl JewelKind {
    /// Total number of kinds
    pub const COUNT: usize = 8;

    /// Canonical kind ordering
    pub const ALL: [JewelKind; Self::COUNT] = [
        JewelKind::Red,
        JewelKind::Blue,
        JewelKind::Green,
        JewelKind::Yellow,
        JewelKind::Purple,
        JewelKind::Orange,
        JewelKind::Cyan,
        JewelKind::Pink,
    ];

    /// Parse kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use jewel_master_types::JewelKind;
    ///
    /// assert_eq!(JewelKind::from_str("red"), Some(JewelKind::Red));
    /// assert_eq!(JewelKind::from_str("CYAN"), Some(JewelKind::Cyan));
    /// assert_eq!(JewelKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(JewelKind::Red),
            "blue" => Some(JewelKind::Blue),
            "green" => Some(JewelKind::Green),
            "yellow" => Some(JewelKind::Yellow),
            "purple" => Some(JewelKind::Purple),
            "orange" => Some(JewelKind::Orange),
            "cyan" => Some(JewelKind::Cyan),
            "pink" => Some(JewelKind::Pink),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            JewelKind::Red => "red",
            JewelKind::Blue => "blue",
            JewelKind::Green => "green",
            JewelKind::Yellow => "yellow",
            JewelKind::Purple => "purple",
            JewelKind::Orange => "orange",
            JewelKind::Cyan => "cyan",
            JewelKind::Pink => "pink",
        }
    }

    /// Position of this kind in the canonical ordering
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Single-letter code used by the board text format
    ///
    /// Pink uses `K` so that every kind has a distinct letter.
    pub fn as_char(&self) -> char {
        match self {
            JewelKind::Red => 'R',
            JewelKind::Blue => 'B',
            JewelKind::Green => 'G',
            JewelKind::Yellow => 'Y',
            JewelKind::Purple => 'P',
            JewelKind::Orange => 'O',
            JewelKind::Cyan => 'C',
            JewelKind::Pink => 'K',
        }
    }

    /// Parse a single-letter code (case-insensitive)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'R' => Some(JewelKind::Red),
            'B' => Some(JewelKind::Blue),
            'G' => Some(JewelKind::Green),
            'Y' => Some(JewelKind::Yellow),
            'P' => Some(JewelKind::Purple),
            'O' => Some(JewelKind::Orange),
            'C' => Some(JewelKind::Cyan),
            'K' => Some(JewelKind::Pink),
            _ => None,
        }
    }
}

/// Grid coordinates. Row 0 is the top of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another position
    pub fn manhattan(&self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True when the two positions share an edge
    pub fn is_adjacent(&self, other: Position) -> bool {
        self.manhattan(other) == 1
    }

    /// Neighbor to the right (may be off-board)
    pub fn right(&self) -> Position {
        Position::new(self.row, self.col + 1)
    }

    /// Neighbor below (may be off-board)
    pub fn down(&self) -> Position {
        Position::new(self.row + 1, self.col)
    }
}

/// An unordered pair of cells to exchange
///
/// Stored normalized (smaller position first) so `Swap::new(a, b) == Swap::new(b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Swap {
    pub a: Position,
    pub b: Position,
}

impl Swap {
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }

    pub fn is_adjacent(&self) -> bool {
        self.a.is_adjacent(self.b)
    }
}

/// A cell on the board
///
/// - `kind: None`: cleared, only observable inside a cascade step
/// - `selected`: the player's current selection
/// - `matched`: part of a match being cleared in this cascade step
/// - `falling`: moved by gravity or refilled in this cascade step
///
/// Cells carry no identity; a cell *is* its grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub kind: Option<JewelKind>,
    pub selected: bool,
    pub matched: bool,
    pub falling: bool,
}

impl Cell {
    /// A settled cell holding `kind` with all transient flags cleared
    pub const fn of(kind: JewelKind) -> Self {
        Self {
            kind: Some(kind),
            selected: false,
            matched: false,
            falling: false,
        }
    }

    /// True when any transient flag is set
    pub fn is_flagged(&self) -> bool {
        self.selected || self.matched || self.falling
    }
}

/// Player-facing state of a game session
///
/// `Idle → OneSelected → Idle` after every swap attempt.
/// `Terminal` is absorbing; only a reset leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    OneSelected,
    Terminal,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::OneSelected => "one_selected",
            SessionPhase::Terminal => "terminal",
        }
    }
}
