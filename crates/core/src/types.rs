use serde::{Deserialize, Serialize};

/// Grid cell address, row-major and 0-indexed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The adjacent cell toward `side`, or `None` when it would leave a `size`-wide grid.
    pub fn step(self, side: Side, size: usize) -> Option<Coord> {
        let (d_row, d_col) = side.offset();
        let next = Coord {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        };
        (next.row < size && next.col < size).then_some(next)
    }

    /// Which side of `self` faces the orthogonally adjacent `other`.
    pub fn side_toward(self, other: Coord) -> Option<Side> {
        if other.col == self.col && other.row + 1 == self.row {
            Some(Side::Top)
        } else if other.row == self.row && other.col == self.col + 1 {
            Some(Side::Right)
        } else if other.col == self.col && other.row == self.row + 1 {
            Some(Side::Bottom)
        } else if other.row == self.row && other.col + 1 == self.col {
            Some(Side::Left)
        } else {
            None
        }
    }
}

/// One of the four tile edges, in connection-array order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// `(row, col)` delta toward this side.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Side::Top => (-1, 0),
            Side::Right => (0, 1),
            Side::Bottom => (1, 0),
            Side::Left => (0, -1),
        }
    }

    pub const fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TileKind {
    Straight,
    Corner,
    TShape,
    Cross,
    Start,
    End,
    Blocker,
    /// Placeholder used only while a level is being built.
    Empty,
}

impl TileKind {
    /// Kinds the filler pass may pick for off-path cells.
    pub const PIPES: [TileKind; 4] =
        [TileKind::Straight, TileKind::Corner, TileKind::TShape, TileKind::Cross];

    pub const fn code(self) -> u8 {
        match self {
            TileKind::Straight => 0,
            TileKind::Corner => 1,
            TileKind::TShape => 2,
            TileKind::Cross => 3,
            TileKind::Start => 4,
            TileKind::End => 5,
            TileKind::Blocker => 6,
            TileKind::Empty => 7,
        }
    }

    pub const fn is_anchor(self) -> bool {
        matches!(self, TileKind::Start | TileKind::End)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_stops_at_grid_edges() {
        let size = 8;
        assert_eq!(Coord::new(0, 3).step(Side::Top, size), None);
        assert_eq!(Coord::new(3, 0).step(Side::Left, size), None);
        assert_eq!(Coord::new(7, 3).step(Side::Bottom, size), None);
        assert_eq!(Coord::new(3, 7).step(Side::Right, size), None);
        assert_eq!(Coord::new(3, 3).step(Side::Right, size), Some(Coord::new(3, 4)));
    }

    #[test]
    fn opposite_sides_have_opposite_offsets() {
        for side in Side::ALL {
            let (d_row, d_col) = side.offset();
            assert_eq!(side.opposite().offset(), (-d_row, -d_col));
            assert_eq!(d_row.abs() + d_col.abs(), 1);
        }
        assert_eq!(Side::Top.offset(), (-1, 0));
        assert_eq!(Side::Left.offset(), (0, -1));
    }

    #[test]
    fn side_toward_inverts_step() {
        let origin = Coord::new(4, 4);
        for side in Side::ALL {
            let next = origin.step(side, 8).expect("interior cell has all neighbours");
            assert_eq!(origin.side_toward(next), Some(side));
            assert_eq!(next.side_toward(origin), Some(side.opposite()));
        }
        assert_eq!(origin.side_toward(Coord::new(5, 5)), None);
        assert_eq!(origin.side_toward(origin), None);
    }
}
