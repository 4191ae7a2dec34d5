//! Level assembly: anchors, solution route, filler tiles, and the rotation scramble.

use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::board::Grid;
use crate::config::{MIN_GRID_SIZE, PuzzleConfig};
use crate::types::{Coord, TileKind};

use super::model::{GeneratedLevel, SolutionStep};
use super::path::PathSearch;
use super::pipes::pipe_for_sides;
use super::seed::{derive_level_seed, roll_below, roll_range, seeded_rng};

pub struct LevelGenerator {
    level_seed: u64,
    size: usize,
    search: PathSearch,
    blocker_percent: u8,
}

impl LevelGenerator {
    pub fn new(session_seed: u64, attempt: u32, config: &PuzzleConfig) -> Self {
        let size = config.grid_size.max(MIN_GRID_SIZE);
        Self {
            level_seed: derive_level_seed(session_seed, attempt),
            size,
            search: PathSearch { size, ..PathSearch::from_config(config) },
            blocker_percent: config.blocker_percent.min(100),
        }
    }

    pub fn generate(&self) -> GeneratedLevel {
        let mut rng = seeded_rng(self.level_seed);
        let size = self.size;
        let mut grid = Grid::empty(size);

        let start = Coord::new(roll_range(&mut rng, 1, size - 2), 0);
        let end = Coord::new(roll_range(&mut rng, 1, size - 2), size - 1);

        let inner = self.search.synthesize(
            &mut rng,
            Coord::new(start.row, 1),
            Coord::new(end.row, size - 2),
        );

        let mut route = Vec::with_capacity(inner.cells.len() + 2);
        route.push(start);
        route.extend(inner.cells.iter().copied());
        route.push(end);

        if let Some(tile) = grid.place(start, TileKind::Start, 0) {
            tile.is_powered = true;
        }
        grid.place(end, TileKind::End, 0);

        let solution = lay_route_pipes(&mut grid, &route);
        self.fill_and_scramble(&mut grid, &mut rng);

        debug!(
            level_seed = self.level_seed,
            size,
            route_len = route.len(),
            source = ?inner.source,
            "generated circuit level"
        );

        GeneratedLevel { grid, start, end, route, solution, path_source: inner.source }
    }

    /// Fills every placeholder with filler or a firewall, and re-rolls the rotation of every
    /// unlocked route tile so the player has to turn it back.
    fn fill_and_scramble(&self, grid: &mut Grid, rng: &mut ChaCha8Rng) {
        for row in 0..self.size {
            for col in 0..self.size {
                let Some(tile) = grid.tile_mut(Coord::new(row, col)) else {
                    continue;
                };
                if tile.kind == TileKind::Empty {
                    if roll_below(rng, 100) < usize::from(self.blocker_percent) {
                        tile.kind = TileKind::Blocker;
                        tile.is_firewall = true;
                    } else {
                        tile.kind = TileKind::PIPES[roll_below(rng, TileKind::PIPES.len())];
                        tile.rotation = roll_below(rng, 4) as u8;
                    }
                } else if !tile.is_locked {
                    tile.rotation = roll_below(rng, 4) as u8;
                }
            }
        }
    }
}

/// Shapes every non-anchor route cell after the directions toward its route neighbours.
fn lay_route_pipes(grid: &mut Grid, route: &[Coord]) -> Vec<SolutionStep> {
    let mut solution = Vec::with_capacity(route.len().saturating_sub(2));
    for (index, &coord) in route.iter().enumerate() {
        if grid.tile(coord).is_some_and(|tile| tile.kind.is_anchor()) {
            continue;
        }
        let toward_prev = index
            .checked_sub(1)
            .and_then(|prev| route.get(prev))
            .and_then(|&prev| coord.side_toward(prev));
        let toward_next = route.get(index + 1).and_then(|&next| coord.side_toward(next));

        let (kind, rotation) = pipe_for_sides(toward_prev, toward_next);
        grid.place(coord, kind, rotation);
        solution.push(SolutionStep { coord, kind, rotation });
    }
    solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{check_win_condition, trace_circuit};

    #[test]
    fn same_inputs_produce_byte_identical_levels() {
        let config = PuzzleConfig::default();
        let a = LevelGenerator::new(123_456, 0, &config).generate();
        let b = LevelGenerator::new(123_456, 0, &config).generate();
        assert_eq!(a.grid.canonical_bytes(), b.grid.canonical_bytes());
        assert_eq!(a.route, b.route);
    }

    #[test]
    fn changing_attempt_changes_the_level() {
        let config = PuzzleConfig::default();
        let first = LevelGenerator::new(123_456, 0, &config).generate();
        let second = LevelGenerator::new(123_456, 1, &config).generate();
        assert_ne!(first.grid.canonical_bytes(), second.grid.canonical_bytes());
    }

    #[test]
    fn anchors_sit_on_the_edge_columns_inside_the_row_margin() {
        let config = PuzzleConfig::default();
        for seed in 0..40 {
            let level = LevelGenerator::new(seed, 0, &config).generate();
            assert_eq!(level.start.col, 0);
            assert_eq!(level.end.col, 7);
            assert!((1..=6).contains(&level.start.row));
            assert!((1..=6).contains(&level.end.row));
            assert_eq!(level.grid.count_kind(TileKind::Start), 1);
            assert_eq!(level.grid.count_kind(TileKind::End), 1);
            assert_eq!(level.grid.count_kind(TileKind::Empty), 0);
        }
    }

    #[test]
    fn only_the_start_tile_is_powered_after_generation() {
        let level = LevelGenerator::new(5, 0, &PuzzleConfig::default()).generate();
        let powered: Vec<Coord> =
            level.grid.tiles().iter().filter(|tile| tile.is_powered).map(|tile| tile.coord).collect();
        assert_eq!(powered, vec![level.start]);
    }

    #[test]
    fn route_tiles_are_never_firewalls() {
        let config = PuzzleConfig { blocker_percent: 100, ..PuzzleConfig::default() };
        let level = LevelGenerator::new(31, 0, &config).generate();
        for coord in &level.route {
            let tile = level.grid.tile(*coord).expect("route stays in bounds");
            assert!(!tile.blocks_power(), "route cell {coord:?} became a blocker");
        }
        let off_route = level.grid.tiles().len() - level.route.len();
        assert_eq!(level.grid.count_kind(TileKind::Blocker), off_route);
    }

    #[test]
    fn solved_grid_wins_and_turns_to_solve_restores_it() {
        let level = LevelGenerator::new(2_024, 3, &PuzzleConfig::default()).generate();
        assert!(check_win_condition(&trace_circuit(&level.solved_grid())));

        let mut grid = level.grid.clone();
        for (coord, turns) in level.turns_to_solve(&level.grid) {
            for _ in 0..turns {
                grid.rotate_tile(coord).expect("route tiles are rotatable");
            }
        }
        assert!(check_win_condition(&trace_circuit(&grid)));
    }

    #[test]
    fn smallest_grid_still_builds_a_solvable_level() {
        let config = PuzzleConfig { grid_size: 3, ..PuzzleConfig::default() };
        let level = LevelGenerator::new(1, 0, &config).generate();
        assert_eq!(level.route, vec![Coord::new(1, 0), Coord::new(1, 1), Coord::new(1, 2)]);
        assert_eq!(
            level.solution,
            vec![SolutionStep { coord: Coord::new(1, 1), kind: TileKind::Straight, rotation: 0 }]
        );
        assert!(check_win_condition(&trace_circuit(&level.solved_grid())));
    }
}
