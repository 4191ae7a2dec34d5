use std::time::Duration;

use breach_core::{
    Coord, InputPayload, RotateOutcome, Session, SessionError, SessionStatus, apply_input,
};
use thiserror::Error;

pub const HELP_TEXT: &str = "\
commands:
  r <row> <col>  rotate a tile a quarter turn clockwise
  n              deal a new attempt
  q              cancel the breach and quit
  h              show this help";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Rotate(Coord),
    Restart,
    Quit,
    Help,
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("usage: r <row> <col>")]
    RotateUsage,
    #[error("`{0}` is not a tile index")]
    BadIndex(String),
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(CommandError::Empty);
    };

    let command = match head {
        "r" | "rotate" => {
            let (Some(row), Some(col), None) = (words.next(), words.next(), words.next()) else {
                return Err(CommandError::RotateUsage);
            };
            return Ok(Command::Rotate(Coord::new(parse_index(row)?, parse_index(col)?)));
        }
        "n" | "new" => Command::Restart,
        "q" | "quit" => Command::Quit,
        "h" | "help" | "?" => Command::Help,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    if words.next().is_some() {
        return Err(CommandError::Unknown(line.trim().to_string()));
    }
    Ok(command)
}

fn parse_index(word: &str) -> Result<usize, CommandError> {
    word.parse().map_err(|_| CommandError::BadIndex(word.to_string()))
}

#[derive(Debug, PartialEq, Eq)]
pub enum Feedback {
    Rotated(RotateOutcome),
    Rejected(SessionError),
    Restarted { attempt: u32 },
    Help,
    Exit(SessionStatus),
}

#[derive(Default)]
pub struct AppState {
    /// Inputs accepted during the latest `tick()` call, in the order they were applied.
    /// Drained by the caller after each tick to persist to the journal.
    pub accepted_inputs: Vec<InputPayload>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Charges `elapsed` wall time to the clock, then runs one typed command.
    ///
    /// The elapsed time is recorded even when the command fails to parse, so
    /// `accepted_inputs` must be drained on both paths.
    pub fn tick(
        &mut self,
        session: &mut Session,
        elapsed: Duration,
        line: &str,
    ) -> Result<Feedback, CommandError> {
        self.accepted_inputs.clear();

        let millis = elapsed.as_millis() as u64;
        if session.status() == SessionStatus::Playing && millis > 0 {
            self.record(session, InputPayload::Elapse { millis });
        }

        let feedback = match parse_command(line)? {
            Command::Rotate(coord) => match session.rotate(coord) {
                Ok(outcome) => {
                    self.accepted_inputs.push(InputPayload::Rotate { coord });
                    Feedback::Rotated(outcome)
                }
                Err(err) => Feedback::Rejected(err),
            },
            Command::Restart => {
                self.record(session, InputPayload::Restart);
                Feedback::Restarted { attempt: session.attempts() }
            }
            Command::Quit => {
                if session.status() == SessionStatus::Playing {
                    self.record(session, InputPayload::Cancel);
                }
                Feedback::Exit(session.status())
            }
            Command::Help => Feedback::Help,
        };
        Ok(feedback)
    }

    fn record(&mut self, session: &mut Session, payload: InputPayload) {
        // Clock, cancel, and restart inputs are never rejected by the session.
        if apply_input(session, &payload).is_ok() {
            self.accepted_inputs.push(payload);
        }
    }
}
