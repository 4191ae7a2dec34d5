//! Static connection patterns per tile kind and the rotation resolver.
//! Patterns are ordered `[Top, Right, Bottom, Left]` at rotation 0.

use crate::types::{Side, TileKind};

pub const fn base_connections(kind: TileKind) -> [bool; 4] {
    match kind {
        TileKind::Straight => [false, true, false, true],
        TileKind::Corner => [false, true, true, false],
        TileKind::TShape => [false, true, true, true],
        TileKind::Cross => [true, true, true, true],
        TileKind::Start => [false, true, false, false],
        TileKind::End => [false, false, false, true],
        TileKind::Blocker | TileKind::Empty => [false; 4],
    }
}

/// Connections of `kind` after `rotation` clockwise quarter turns.
///
/// Each turn moves the value facing Left to Top and shifts the rest one side
/// clockwise. Rotation is taken mod 4, so out-of-range values are tolerated.
pub fn active_connections(kind: TileKind, rotation: u8) -> [bool; 4] {
    let mut rotated = base_connections(kind);
    rotated.rotate_right(usize::from(rotation % 4));
    rotated
}

pub fn connects(kind: TileKind, rotation: u8, side: Side) -> bool {
    active_connections(kind, rotation)[side.index()]
}

/// Whether tile `a` and its neighbour `b` (lying toward `side_from_a`) share a live edge.
pub fn tiles_connected(
    a: (TileKind, u8),
    b: (TileKind, u8),
    side_from_a: Side,
) -> bool {
    connects(a.0, a.1, side_from_a) && connects(b.0, b.1, side_from_a.opposite())
}
