//! Randomized inner-path search between the two anchor columns.
//!
//! Search is confined to columns `[1, size - 2]`. A single attempt keeps every
//! cell it has entered marked as visited even after backing out of it, so an
//! attempt can dead-end while a route still exists. Running many attempts and
//! keeping the longest compensates, and the lingering marks push the search
//! toward long winding routes.

use rand_chacha::ChaCha8Rng;
use tracing::warn;

use crate::config::PuzzleConfig;
use crate::types::{Coord, Side};

use super::seed::roll_below;

/// Move order before shuffling: Right, Up, Down, Left.
const MOVES: [Side; 4] = [Side::Right, Side::Top, Side::Bottom, Side::Left];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathSource {
    Search { attempts: u32 },
    ManhattanFallback,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InnerPath {
    pub cells: Vec<Coord>,
    pub source: PathSource,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathSearch {
    pub size: usize,
    pub attempts: u32,
    pub long_path_threshold: usize,
}

impl PathSearch {
    pub fn from_config(config: &PuzzleConfig) -> Self {
        Self {
            size: config.grid_size,
            attempts: config.path_attempts,
            long_path_threshold: config.long_path_threshold,
        }
    }

    /// Longest route found over all attempts, or the Manhattan route when none reached `end`.
    pub fn synthesize(&self, rng: &mut ChaCha8Rng, start: Coord, end: Coord) -> InnerPath {
        let mut best: Option<Vec<Coord>> = None;
        let mut attempts_used = 0;

        for _ in 0..self.attempts {
            attempts_used += 1;
            let Some(candidate) = find_inner_path(rng, self.size, start, end) else {
                continue;
            };
            if best.as_ref().is_none_or(|current| candidate.len() > current.len()) {
                best = Some(candidate);
            }
            if best.as_ref().is_some_and(|current| current.len() > self.long_path_threshold) {
                break;
            }
        }

        match best {
            Some(cells) => {
                InnerPath { cells, source: PathSource::Search { attempts: attempts_used } }
            }
            None => {
                warn!(
                    ?start,
                    ?end,
                    attempts = self.attempts,
                    "inner path search exhausted, using manhattan route"
                );
                InnerPath { cells: manhattan_path(start, end), source: PathSource::ManhattanFallback }
            }
        }
    }
}

struct Frame {
    coord: Coord,
    moves: [Side; 4],
    next_move: usize,
}

/// One randomized depth-first attempt from `start` to `end`, inclusive on both ends.
pub fn find_inner_path(
    rng: &mut ChaCha8Rng,
    size: usize,
    start: Coord,
    end: Coord,
) -> Option<Vec<Coord>> {
    let inside = |coord: Coord| coord.row < size && (1..=size - 2).contains(&coord.col);
    if size < 3 || !inside(start) {
        return None;
    }

    let mut visited = vec![false; size * size];
    let mut path = vec![start];
    visited[start.row * size + start.col] = true;
    if start == end {
        return Some(path);
    }

    let mut stack = vec![Frame { coord: start, moves: shuffled_moves(rng), next_move: 0 }];
    while let Some(frame) = stack.last_mut() {
        let Some(&side) = frame.moves.get(frame.next_move) else {
            stack.pop();
            path.pop();
            continue;
        };
        frame.next_move += 1;

        let Some(next) = frame.coord.step(side, size).filter(|&coord| inside(coord)) else {
            continue;
        };
        let index = next.row * size + next.col;
        if visited[index] {
            continue;
        }
        visited[index] = true;
        path.push(next);
        if next == end {
            return Some(path);
        }
        stack.push(Frame { coord: next, moves: shuffled_moves(rng), next_move: 0 });
    }

    None
}

fn shuffled_moves(rng: &mut ChaCha8Rng) -> [Side; 4] {
    let mut moves = MOVES;
    for i in (1..moves.len()).rev() {
        let j = roll_below(rng, i + 1);
        moves.swap(i, j);
    }
    moves
}

/// Horizontal run to `end.col`, then vertical run to `end.row`.
pub fn manhattan_path(start: Coord, end: Coord) -> Vec<Coord> {
    let mut path = vec![start];
    let mut current = start;
    while current.col != end.col {
        current.col = if current.col < end.col { current.col + 1 } else { current.col - 1 };
        path.push(current);
    }
    while current.row != end.row {
        current.row = if current.row < end.row { current.row + 1 } else { current.row - 1 };
        path.push(current);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levelgen::seed::seeded_rng;

    fn assert_contiguous(path: &[Coord]) {
        for pair in path.windows(2) {
            assert!(
                pair[0].side_toward(pair[1]).is_some(),
                "{:?} and {:?} are not adjacent",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn found_paths_are_contiguous_unique_and_confined() {
        let mut rng = seeded_rng(4);
        let start = Coord::new(2, 1);
        let end = Coord::new(5, 6);
        let mut found = 0;
        for _ in 0..50 {
            let Some(path) = find_inner_path(&mut rng, 8, start, end) else {
                continue;
            };
            found += 1;
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&end));
            assert_contiguous(&path);
            let mut sorted = path.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), path.len(), "path revisits a cell");
            assert!(path.iter().all(|coord| (1..=6).contains(&coord.col) && coord.row < 8));
        }
        assert!(found > 0, "fifty attempts should reach the goal at least once");
    }

    #[test]
    fn start_outside_inner_columns_finds_nothing() {
        let mut rng = seeded_rng(1);
        assert_eq!(find_inner_path(&mut rng, 8, Coord::new(3, 0), Coord::new(3, 6)), None);
        assert_eq!(find_inner_path(&mut rng, 8, Coord::new(3, 7), Coord::new(3, 6)), None);
    }

    #[test]
    fn unreachable_goal_falls_back_to_manhattan_route() {
        let search = PathSearch { size: 8, attempts: 5, long_path_threshold: 25 };
        let mut rng = seeded_rng(9);
        let start = Coord::new(2, 1);
        let end = Coord::new(4, 7);

        let inner = search.synthesize(&mut rng, start, end);

        assert_eq!(inner.source, PathSource::ManhattanFallback);
        assert_eq!(inner.cells, manhattan_path(start, end));
    }

    #[test]
    fn manhattan_route_goes_across_then_down() {
        let path = manhattan_path(Coord::new(1, 1), Coord::new(3, 4));
        assert_eq!(
            path,
            vec![
                Coord::new(1, 1),
                Coord::new(1, 2),
                Coord::new(1, 3),
                Coord::new(1, 4),
                Coord::new(2, 4),
                Coord::new(3, 4),
            ]
        );
        assert_contiguous(&path);
    }

    #[test]
    fn synthesize_keeps_a_search_path_when_one_exists() {
        let search = PathSearch { size: 8, attempts: 100, long_path_threshold: 25 };
        let mut rng = seeded_rng(77);
        let inner = search.synthesize(&mut rng, Coord::new(1, 1), Coord::new(6, 6));
        assert!(matches!(inner.source, PathSource::Search { .. }));
        assert_contiguous(&inner.cells);
    }

    #[test]
    fn search_stops_once_a_path_beats_the_threshold() {
        let search = PathSearch { size: 8, attempts: 100, long_path_threshold: 0 };
        let mut rng = seeded_rng(5);
        let inner = search.synthesize(&mut rng, Coord::new(0, 1), Coord::new(7, 6));
        assert_eq!(inner.source, PathSource::Search { attempts: 1 });
    }
}
