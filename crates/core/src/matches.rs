//! Match detection - pure scans for runs of three or more
//!
//! [`find_matches`] scans every row for horizontal runs and every column for
//! vertical runs of at least [`MIN_RUN`] identical kinds. A cell that sits in
//! both a horizontal and a vertical run is reported once. Runs longer than
//! three are matched in full. Cleared cells never match.

use crate::board::Board;
use crate::types::{Position, MIN_RUN};

/// The set of matched cells of one board
///
/// Backed by a row-major mask so membership and union are O(1) per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSet {
    size: usize,
    mask: Vec<bool>,
    count: usize,
}

impl MatchSet {
    fn new(size: usize) -> Self {
        Self {
            size,
            mask: vec![false; size * size],
            count: 0,
        }
    }

    fn insert(&mut self, pos: Position) {
        let idx = pos.row * self.size + pos.col;
        if !self.mask[idx] {
            self.mask[idx] = true;
            self.count += 1;
        }
    }

    /// Number of distinct matched cells
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size && self.mask[pos.row * self.size + pos.col]
    }

    /// Matched positions in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.size;
        self.mask
            .iter()
            .enumerate()
            .filter(|(_, &hit)| hit)
            .map(move |(idx, _)| Position::new(idx / size, idx % size))
    }

    pub fn to_vec(&self) -> Vec<Position> {
        self.iter().collect()
    }
}

/// Walk one line of cells and report every run of `MIN_RUN` or more
///
/// `at(i)` maps the i-th cell of the line to its board position.
fn scan_line(board: &Board, at: impl Fn(usize) -> Position, mut on_run: impl FnMut(usize, usize)) {
    let n = board.size();
    let mut start = 0;
    for i in 1..=n {
        let run_continues = i < n && {
            let current = board.kind(at(i));
            current.is_some() && current == board.kind(at(start))
        };
        if run_continues {
            continue;
        }
        if i - start >= MIN_RUN && board.kind(at(start)).is_some() {
            on_run(start, i);
        }
        start = i;
    }
}

/// Compute every matched cell of the board
pub fn find_matches(board: &Board) -> MatchSet {
    let n = board.size();
    let mut matched = MatchSet::new(n);

    // Horizontal runs
    for row in 0..n {
        let at = |col| Position::new(row, col);
        scan_line(board, at, |from, to| {
            for col in from..to {
                matched.insert(at(col));
            }
        });
    }

    // Vertical runs
    for col in 0..n {
        let at = |row| Position::new(row, col);
        scan_line(board, at, |from, to| {
            for row in from..to {
                matched.insert(at(row));
            }
        });
    }

    matched
}

/// True when the board has at least one match
///
/// Stops at the first run found.
pub fn has_match(board: &Board) -> bool {
    let n = board.size();
    if n < MIN_RUN {
        return false;
    }
    for a in 0..n {
        for b in 0..=n - MIN_RUN {
            let horizontal = Position::new(a, b);
            if let Some(kind) = board.kind(horizontal) {
                if (1..MIN_RUN).all(|k| board.kind(Position::new(a, b + k)) == Some(kind)) {
                    return true;
                }
            }
            let vertical = Position::new(b, a);
            if let Some(kind) = board.kind(vertical) {
                if (1..MIN_RUN).all(|k| board.kind(Position::new(b + k, a)) == Some(kind)) {
                    return true;
                }
            }
        }
    }
    false
}

/// A settled board has no matches
pub fn is_settled(board: &Board) -> bool {
    !has_match(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::JewelKind;
    use proptest::prelude::*;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    #[test]
    fn test_triple_in_row() {
        let b = board("RRRB/GBYG/BGBY/YBGB");
        let m = find_matches(&b);
        assert_eq!(
            m.to_vec(),
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)]
        );
        assert!(has_match(&b));
    }

    #[test]
    fn test_run_of_four_fully_matched() {
        let b = board("RRRR/GBYG/BGBY/YBGB");
        let m = find_matches(&b);
        assert_eq!(m.len(), 4);
        for col in 0..4 {
            assert!(m.contains(Position::new(0, col)));
        }
    }

    #[test]
    fn test_vertical_run() {
        let b = board("RBG/RGB/RYP");
        let m = find_matches(&b);
        assert_eq!(
            m.to_vec(),
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]
        );
    }

    #[test]
    fn test_cross_shape_counts_shared_cell_once() {
        // Row 1 and column 1 cross at (1, 1).
        let b = board("GRB/RRR/BRG");
        let m = find_matches(&b);
        assert_eq!(m.len(), 5);
        assert!(m.contains(Position::new(1, 1)));
    }

    #[test]
    fn test_pairs_do_not_match() {
        let b = board("RRB/BGG/RRB");
        assert!(find_matches(&b).is_empty());
        assert!(!has_match(&b));
        assert!(is_settled(&b));
    }

    #[test]
    fn test_cleared_cells_never_match() {
        let b = board(".../RGB/GBR");
        assert!(find_matches(&b).is_empty());
        assert!(!has_match(&b));
    }

    #[test]
    fn test_run_at_end_of_line() {
        let b = board("GBRRR/BGBGB/GBGBG/BGBGB/GBGBG");
        let m = find_matches(&b);
        assert_eq!(m.len(), 3);
        assert!(m.contains(Position::new(0, 4)));
        assert!(!m.contains(Position::new(0, 1)));
    }

    #[test]
    fn test_small_boards_never_match() {
        assert!(!has_match(&board("RR/RR")));
        assert!(find_matches(&board("RR/RR")).is_empty());
    }

    #[test]
    fn test_has_match_agrees_with_find_matches() {
        for text in [
            "RRB/BGG/RRB",
            "RBG/RGB/RYP",
            "GRB/RRR/BRG",
            "RGBY/GRYB/BYRG/YBGG",
            "RGBY/GRYB/BYRG/YBGY",
        ] {
            let b = board(text);
            assert_eq!(has_match(&b), !find_matches(&b).is_empty(), "{}", text);
        }
    }

    /// Length of the same-kind run through `pos` along one axis
    fn run_through(b: &Board, pos: Position, horizontal: bool) -> usize {
        let Some(kind) = b.kind(pos) else {
            return 0;
        };
        let step = |p: Position, forward: bool| -> Option<Position> {
            match (horizontal, forward) {
                (true, true) => Some(p.right()),
                (true, false) => p.col.checked_sub(1).map(|c| Position::new(p.row, c)),
                (false, true) => Some(p.down()),
                (false, false) => p.row.checked_sub(1).map(|r| Position::new(r, p.col)),
            }
        };
        let mut len = 1;
        for forward in [true, false] {
            let mut cur = pos;
            while let Some(next) = step(cur, forward) {
                if b.kind(next) != Some(kind) {
                    break;
                }
                len += 1;
                cur = next;
            }
        }
        len
    }

    proptest! {
        #[test]
        fn prop_matched_cells_are_exactly_run_cells(
            cells in prop::collection::vec(0usize..3, 25),
        ) {
            let rows: Vec<Vec<JewelKind>> = cells
                .chunks(5)
                .map(|row| row.iter().map(|&i| JewelKind::ALL[i]).collect())
                .collect();
            let b = Board::from_rows(&rows).unwrap();
            let m = find_matches(&b);
            for pos in b.positions() {
                let in_run = run_through(&b, pos, true) >= MIN_RUN
                    || run_through(&b, pos, false) >= MIN_RUN;
                prop_assert_eq!(m.contains(pos), in_run, "{:?}\n{}", pos, b);
            }
            prop_assert_eq!(has_match(&b), !m.is_empty());
        }
    }
}
