//! Public data models for generated levels.

use crate::board::Grid;
use crate::types::{Coord, TileKind};

use super::path::PathSource;

/// A path tile as it was laid before the rotation scramble.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolutionStep {
    pub coord: Coord,
    pub kind: TileKind,
    pub rotation: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedLevel {
    pub grid: Grid,
    pub start: Coord,
    pub end: Coord,
    /// Every cell from start to end, anchors included.
    pub route: Vec<Coord>,
    /// Non-anchor route cells with their solved orientation.
    pub solution: Vec<SolutionStep>,
    pub path_source: PathSource,
}

impl GeneratedLevel {
    /// The level grid with every scrambled path tile turned back to its solved rotation.
    pub fn solved_grid(&self) -> Grid {
        let mut grid = self.grid.clone();
        for step in &self.solution {
            if let Some(tile) = grid.tile_mut(step.coord) {
                tile.rotation = step.rotation;
            }
        }
        grid
    }

    /// Quarter turns each path tile of `grid` still needs to reach its solved rotation,
    /// in route order.
    pub fn turns_to_solve(&self, grid: &Grid) -> Vec<(Coord, u8)> {
        self.solution
            .iter()
            .filter_map(|step| {
                let current = grid.tile(step.coord)?.rotation;
                let turns = (step.rotation + 4 - current % 4) % 4;
                (turns > 0).then_some((step.coord, turns))
            })
            .collect()
    }
}
