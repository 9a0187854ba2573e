//! Move validation - legality of swaps and stalemate detection
//!
//! A swap is legal when the two cells are adjacent and exchanging their kinds
//! produces at least one match. Validation works on a hypothetical copy; the
//! real board is never touched.

use crate::board::Board;
use crate::matches::has_match;
use crate::types::{Position, Swap};

/// Would swapping `a` and `b` produce a match?
///
/// Non-adjacent or off-board pairs are never legal. Symmetric in `a` and `b`.
pub fn can_swap_produce_match(board: &Board, a: Position, b: Position) -> bool {
    if !a.is_adjacent(b) || !board.contains(a) || !board.contains(b) {
        return false;
    }
    let mut hypothetical = board.clone();
    hypothetical.swap(a, b);
    has_match(&hypothetical)
}

/// Swap-right and swap-down candidates of every cell, row-major
///
/// Covers each adjacent pair exactly once.
fn candidate_swaps(board: &Board) -> impl Iterator<Item = Swap> + '_ {
    board.positions().flat_map(move |pos| {
        [pos.right(), pos.down()]
            .into_iter()
            .filter(move |next| board.contains(*next))
            .map(move |next| Swap::new(pos, next))
    })
}

/// First legal swap in row-major, right-then-down order
pub fn find_legal_move(board: &Board) -> Option<Swap> {
    candidate_swaps(board).find(|swap| can_swap_produce_match(board, swap.a, swap.b))
}

/// Every legal swap on the board
pub fn legal_moves(board: &Board) -> Vec<Swap> {
    candidate_swaps(board)
        .filter(|swap| can_swap_produce_match(board, swap.a, swap.b))
        .collect()
}

/// Is there at least one legal swap anywhere? Short-circuits on the first.
pub fn any_legal_move_exists(board: &Board) -> bool {
    find_legal_move(board).is_some()
}
