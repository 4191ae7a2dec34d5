use crate::config::PuzzleConfig;
use crate::types::Coord;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionJournal {
    pub format_version: u16,
    pub build_id: String,
    pub seed: u64,
    pub config: PuzzleConfig,
    pub inputs: Vec<SessionInput>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInput {
    pub seq: u64,
    pub payload: InputPayload,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputPayload {
    Rotate { coord: Coord },
    Elapse { millis: u64 },
    Cancel,
    Restart,
}

impl SessionJournal {
    pub fn new(seed: u64, config: PuzzleConfig) -> Self {
        Self {
            format_version: 1,
            build_id: "dev".to_string(),
            seed,
            config,
            inputs: Vec::new(),
        }
    }

    pub fn next_seq(&self) -> u64 {
        self.inputs.len() as u64
    }

    /// Appends `payload` under the next sequence number and returns that number.
    pub fn append(&mut self, payload: InputPayload) -> u64 {
        let seq = self.next_seq();
        self.inputs.push(SessionInput { seq, payload });
        seq
    }

    pub fn append_rotate(&mut self, coord: Coord) -> u64 {
        self.append(InputPayload::Rotate { coord })
    }

    pub fn append_elapse(&mut self, millis: u64) -> u64 {
        self.append(InputPayload::Elapse { millis })
    }
}
