//! Line clearing and scoring

use crate::board::{Board, Cell};
use crate::rules::Rules;

/// Remove every full row.
///
/// Surviving rows keep their relative order and slide to the bottom; the top is padded
/// with one empty row per cleared row, so the board keeps its dimensions.
pub fn clear_lines(board: &Board) -> (Board, u32) {
    let (cleared, count) = board.compact(|row| !row.iter().all(Cell::is_occupied));
    (cleared, count as u32)
}

/// Points for clearing `count` rows at once while at `level`
pub fn line_clear_points(count: u32, level: u32, rules: &Rules) -> u64 {
    rules.line_score(count) * u64::from(level)
}

/// Points for hard-dropping `distance` rows
pub fn hard_drop_points(distance: u32, rules: &Rules) -> u64 {
    u64::from(distance) * rules.hard_drop_points
}
