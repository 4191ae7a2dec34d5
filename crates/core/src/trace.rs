//! Power propagation from the start tile and the win check.

use std::collections::{BTreeSet, VecDeque};

use tracing::warn;

use crate::board::Grid;
use crate::types::{Coord, Side, TileKind};

/// Recomputes power over a copy of `grid`.
///
/// Every tile reachable from the start through mutually connected edges is
/// powered. Blockers and firewalls neither receive nor pass power.
pub fn trace_circuit(grid: &Grid) -> Grid {
    let mut traced = grid.clone();
    traced.clear_power();

    let Some(start) = traced.find_kind(TileKind::Start) else {
        warn!("trace requested on a grid without a start tile");
        return traced;
    };

    let size = traced.size();
    let mut visited = vec![false; size * size];
    let mut queue = VecDeque::new();
    visited[start.row * size + start.col] = true;
    if let Some(tile) = traced.tile_mut(start) {
        tile.is_powered = true;
    }
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let Some(&current_tile) = traced.tile(current) else {
            continue;
        };
        for side in Side::ALL {
            let Some(next) = traced.neighbor(current, side) else {
                continue;
            };
            let index = next.row * size + next.col;
            let Some(neighbor) = traced.tile_mut(next) else {
                continue;
            };
            if neighbor.blocks_power() || visited[index] {
                continue;
            }
            if current_tile.connects_toward(neighbor, side) {
                neighbor.is_powered = true;
                visited[index] = true;
                queue.push_back(next);
            }
        }
    }

    traced
}

/// True when an end tile carries power.
pub fn check_win_condition(grid: &Grid) -> bool {
    grid.tiles().iter().any(|tile| tile.kind == TileKind::End && tile.is_powered)
}

pub fn powered_coords(grid: &Grid) -> BTreeSet<Coord> {
    grid.tiles().iter().filter(|tile| tile.is_powered).map(|tile| tile.coord).collect()
}
