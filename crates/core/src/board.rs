//! Board module - manages the jewel grid
//!
//! The board is a square N x N grid (8x8 by default) of [`Cell`]s stored in a
//! flat row-major vector for cache locality.
//! Coordinates: [`Position`] `{ row, col }`, row 0 is the top, gravity pulls
//! toward the last row.
//!
//! A board also has a compact text form used by tests and logs: one line per
//! row, one letter per cell ([`JewelKind::as_char`]), `.` for a cleared cell.
//! Rows may be separated by newlines or `/`; whitespace is ignored.
//!
//! ```
//! use jewel_master_core::Board;
//!
//! let board: Board = "RRB/GRR/BBG".parse().unwrap();
//! assert_eq!(board.size(), 3);
//! assert_eq!(board.to_string(), "RRB\nGRR\nBBG");
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::matches::MatchSet;
use crate::types::{Cell, JewelKind, Position};

/// Reasons a board text cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("board text has no rows")]
    Empty,
    #[error("row {row} has {len} cells, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },
    #[error("unknown jewel letter {letter:?} at row {row}, column {col}")]
    UnknownLetter { letter: char, row: usize, col: usize },
}

/// The game board - N x N cells using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    /// Flat vector of cells, row-major order (row * size + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a board of the given edge length with every cell cleared
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::default(); size * size],
        }
    }

    /// Build a settled board from rows of kinds
    ///
    /// Returns `None` unless every row has exactly `rows.len()` kinds.
    pub fn from_rows<R: AsRef<[JewelKind]>>(rows: &[R]) -> Option<Self> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            let row = row.as_ref();
            if row.len() != size {
                return None;
            }
            cells.extend(row.iter().map(|&kind| Cell::of(kind)));
        }
        Some(Self { size, cells })
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if pos.row >= self.size || pos.col >= self.size {
            return None;
        }
        Some(pos.row * self.size + pos.col)
    }

    /// Edge length of the board
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if position lies on the board
    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Get cell at position
    /// Returns None if out of bounds
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Kind at position; `None` when out of bounds or cleared
    pub fn kind(&self, pos: Position) -> Option<JewelKind> {
        self.get(pos).and_then(|cell| cell.kind)
    }

    /// Set the kind at position, keeping the cell's flags
    /// Returns false if out of bounds
    pub fn set_kind(&mut self, pos: Position, kind: Option<JewelKind>) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx].kind = kind;
                true
            }
            None => false,
        }
    }

    /// Set or clear the selection flag
    /// Returns false if out of bounds
    pub fn set_selected(&mut self, pos: Position, selected: bool) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx].selected = selected;
                true
            }
            None => false,
        }
    }

    /// Exchange the kinds of two cells; flags stay with the coordinates
    /// Returns false (and leaves the board untouched) if either is out of bounds
    pub fn swap(&mut self, a: Position, b: Position) -> bool {
        let (Some(ia), Some(ib)) = (self.index(a), self.index(b)) else {
            return false;
        };
        let kind_a = self.cells[ia].kind;
        self.cells[ia].kind = self.cells[ib].kind;
        self.cells[ib].kind = kind_a;
        true
    }

    /// Iterate all positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }

    /// Get a reference to the internal cells (row-major)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy one row of kinds
    pub fn row_kinds(&self, row: usize) -> Vec<Option<JewelKind>> {
        if row >= self.size {
            return Vec::new();
        }
        let start = row * self.size;
        self.cells[start..start + self.size]
            .iter()
            .map(|cell| cell.kind)
            .collect()
    }

    /// Reset every transient flag (selected, matched, falling)
    pub fn clear_flags(&mut self) {
        for cell in &mut self.cells {
            cell.selected = false;
            cell.matched = false;
            cell.falling = false;
        }
    }

    /// Reset the per-step flags (matched, falling), keeping the selection
    pub fn clear_step_flags(&mut self) {
        for cell in &mut self.cells {
            cell.matched = false;
            cell.falling = false;
        }
    }

    /// True when every cell holds a kind
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.kind.is_some())
    }

    /// Number of cleared cells
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.kind.is_none()).count()
    }

    /// Remove the kind of every matched cell and flag it as matched
    /// Returns the number of cells cleared
    pub fn clear_matched(&mut self, matched: &MatchSet) -> usize {
        let mut cleared = 0;
        for pos in matched.iter() {
            if let Some(idx) = self.index(pos) {
                let cell = &mut self.cells[idx];
                cell.kind = None;
                cell.matched = true;
                cleared += 1;
            }
        }
        cleared
    }

    /// Compact every column downward, preserving relative order
    ///
    /// Cleared cells end up at the top of their column. Cells that moved are
    /// flagged `falling`; `matched` flags are dropped.
    /// Uses a two-pointer scan per column with no allocation.
    /// Returns the number of cells that moved.
    pub fn apply_gravity(&mut self) -> usize {
        let size = self.size;
        let mut moved = 0;

        for col in 0..size {
            let mut write_row = size;

            // Scan from bottom to top
            for read_row in (0..size).rev() {
                let read_idx = read_row * size + col;
                let Some(kind) = self.cells[read_idx].kind else {
                    continue;
                };
                write_row -= 1;
                if write_row != read_row {
                    let write_idx = write_row * size + col;
                    let dst = &mut self.cells[write_idx];
                    dst.kind = Some(kind);
                    dst.matched = false;
                    dst.falling = true;
                    self.cells[read_idx].kind = None;
                    moved += 1;
                }
            }

            // Everything above the write pointer is empty now
            for row in 0..write_row {
                let cell = &mut self.cells[row * size + col];
                cell.kind = None;
                cell.matched = false;
                cell.falling = false;
            }
        }

        moved
    }

    /// Fill every cleared cell, top to bottom and left to right, with `draw()`
    ///
    /// Refilled cells are flagged `falling`. Returns the number filled.
    pub fn refill_with(&mut self, mut draw: impl FnMut() -> Option<JewelKind>) -> usize {
        let mut filled = 0;
        for cell in &mut self.cells {
            if cell.kind.is_some() {
                continue;
            }
            if let Some(kind) = draw() {
                cell.kind = Some(kind);
                cell.matched = false;
                cell.falling = true;
                filled += 1;
            }
        }
        filled
    }

    /// Kinds only, row by row (for snapshots)
    pub fn kind_rows(&self) -> Vec<Vec<Option<JewelKind>>> {
        (0..self.size).map(|row| self.row_kinds(row)).collect()
    }

    /// True when both boards hold the same kinds at every position
    pub fn same_kinds(&self, other: &Board) -> bool {
        self.size == other.size
            && self
                .cells
                .iter()
                .zip(other.cells.iter())
                .all(|(a, b)| a.kind == b.kind)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_BOARD_SIZE)
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<char>> = s
            .split(['\n', '/'])
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        let size = rows.len();
        if size == 0 {
            return Err(BoardParseError::Empty);
        }

        let mut board = Board::new(size);
        for (row, letters) in rows.iter().enumerate() {
            if letters.len() != size {
                return Err(BoardParseError::NotSquare {
                    row,
                    len: letters.len(),
                    expected: size,
                });
            }
            for (col, &letter) in letters.iter().enumerate() {
                let kind = match letter {
                    '.' => None,
                    other => Some(JewelKind::from_char(other).ok_or(
                        BoardParseError::UnknownLetter {
                            letter: other,
                            row,
                            col,
                        },
                    )?),
                };
                board.set_kind(Position::new(row, col), kind);
            }
        }

        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.size {
                let c = match self.cells[row * self.size + col].kind {
                    Some(kind) => kind.as_char(),
                    None => '.',
                };
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}
