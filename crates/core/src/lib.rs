pub mod board;
pub mod config;
pub mod connections;
pub mod journal;
pub mod levelgen;
pub mod replay;
pub mod session;
pub mod trace;
pub mod types;

pub use board::{Grid, RotateError, Tile, TileView};
pub use config::{ConfigError, PuzzleConfig};
pub use connections::{active_connections, base_connections};
pub use journal::{InputPayload, SessionInput, SessionJournal};
pub use levelgen::{GeneratedLevel, LevelGenerator, SolutionStep, generate_level};
pub use replay::{ReplayError, ReplayResult, apply_input, replay_session};
pub use session::{RotateOutcome, Session, SessionError, SessionResult, SessionStatus};
pub use trace::{check_win_condition, powered_coords, trace_circuit};
pub use types::*;
