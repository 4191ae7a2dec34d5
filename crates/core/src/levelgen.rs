//! Procedural circuit level generation split into coherent submodules.

pub mod model;

mod generator;
mod path;
mod pipes;
pub(crate) mod seed;

pub use generator::LevelGenerator;
pub use model::{GeneratedLevel, SolutionStep};
pub use path::{InnerPath, PathSearch, PathSource, find_inner_path, manhattan_path};

use crate::config::PuzzleConfig;

pub fn generate_level(session_seed: u64, attempt: u32, config: &PuzzleConfig) -> GeneratedLevel {
    LevelGenerator::new(session_seed, attempt, config).generate()
}
