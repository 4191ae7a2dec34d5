//! Pipe shape selection for cells on the solution path.

use crate::types::{Side, TileKind};

/// Kind and solved rotation for a path cell whose route leaves through `first` and `second`.
///
/// Cells with fewer than two known directions fall back to a horizontal straight.
pub(super) fn pipe_for_sides(first: Option<Side>, second: Option<Side>) -> (TileKind, u8) {
    let (Some(first), Some(second)) = (first, second) else {
        return (TileKind::Straight, 0);
    };
    let pair = if first <= second { (first, second) } else { (second, first) };

    match pair {
        (Side::Right, Side::Left) => (TileKind::Straight, 0),
        (Side::Top, Side::Bottom) => (TileKind::Straight, 1),
        (Side::Right, Side::Bottom) => (TileKind::Corner, 0),
        (Side::Bottom, Side::Left) => (TileKind::Corner, 1),
        (Side::Top, Side::Left) => (TileKind::Corner, 2),
        (Side::Top, Side::Right) => (TileKind::Corner, 3),
        _ => (TileKind::Straight, 0),
    }
}
