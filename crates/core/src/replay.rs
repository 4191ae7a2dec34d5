use std::time::Duration;

use thiserror::Error;

use crate::journal::{InputPayload, SessionJournal};
use crate::session::{Session, SessionError, SessionStatus};

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("journal cannot start a session: {0}")]
    Start(SessionError),
    #[error("expected input seq {expected}, found {found}")]
    SequenceGap { expected: u64, found: u64 },
    #[error("input {seq} was rejected: {source}")]
    RejectedInput {
        seq: u64,
        #[source]
        source: SessionError,
    },
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_status: SessionStatus,
    pub final_snapshot_hash: u64,
    pub attempts: u32,
    pub reward: Option<u32>,
}

/// Applies one recorded input to a live session.
pub fn apply_input(session: &mut Session, payload: &InputPayload) -> Result<(), SessionError> {
    match payload {
        InputPayload::Rotate { coord } => session.rotate(*coord).map(|_| ()),
        InputPayload::Elapse { millis } => {
            session.advance_clock(Duration::from_millis(*millis));
            Ok(())
        }
        InputPayload::Cancel => {
            session.cancel();
            Ok(())
        }
        InputPayload::Restart => {
            session.restart();
            Ok(())
        }
    }
}

pub fn replay_session(journal: &SessionJournal) -> Result<ReplayResult, ReplayError> {
    let mut session =
        Session::start(journal.seed, journal.config.clone()).map_err(ReplayError::Start)?;

    for (expected, input) in (0_u64..).zip(&journal.inputs) {
        if input.seq != expected {
            return Err(ReplayError::SequenceGap { expected, found: input.seq });
        }
        apply_input(&mut session, &input.payload)
            .map_err(|source| ReplayError::RejectedInput { seq: input.seq, source })?;
    }

    Ok(ReplayResult {
        final_status: session.status(),
        final_snapshot_hash: session.snapshot_hash(),
        attempts: session.attempts(),
        reward: session.reward(),
    })
}
