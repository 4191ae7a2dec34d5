use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use app::app_loop::{AppState, Feedback, HELP_TEXT};
use app::seed::{SeedChoice, generate_runtime_seed};
use app::session_record_file::SessionRecordFile;
use app::{board_text, config_file, format_seed, format_snapshot_hash, reason_code};
use breach_core::{Session, SessionJournal};
use clap::Parser;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Rotate pipe tiles to route power from S to E", long_about = None)]
struct Args {
    /// Session seed. A fresh seed is generated when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Puzzle settings file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the input journal here when the session ends.
    #[arg(long)]
    journal_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let seed = SeedChoice::resolve(args.seed, generate_runtime_seed()).value();
    let config = config_file::resolve(args.config.as_deref())
        .context("Failed to load puzzle config")?;

    let mut session =
        Session::start(seed, config.clone()).context("Failed to start breach session")?;
    let mut journal = SessionJournal::new(seed, config);
    info!(seed = %format_seed(seed), grid_size = session.grid().size(), "breach started");

    run(&mut session, &mut journal)?;

    info!(
        status = reason_code(session.status()),
        attempts = session.attempts(),
        reward = ?session.reward(),
        snapshot = %format_snapshot_hash(session.snapshot_hash()),
        "breach ended"
    );

    match SessionRecordFile::get_default_path() {
        Some(path) => {
            if let Err(err) = SessionRecordFile::from_session(&session).write_atomic(&path) {
                warn!(path = %path.display(), %err, "could not save session record");
            }
        }
        None => warn!("no data directory available; session record not saved"),
    }

    if let Some(path) = &args.journal_out {
        write_journal(&journal, path)?;
    }

    Ok(())
}

fn run(session: &mut Session, journal: &mut SessionJournal) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut app = AppState::new();

    println!("{HELP_TEXT}\n");
    print!("{}", board_text::render_session(session));

    let mut last_input = Instant::now();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read command")?;
        let now = Instant::now();
        let result = app.tick(session, now - last_input, &line);
        last_input = now;

        for payload in app.accepted_inputs.drain(..) {
            journal.append(payload);
        }

        match result {
            Ok(Feedback::Rotated(outcome)) => {
                if outcome.won {
                    println!("ACCESS GRANTED");
                }
            }
            Ok(Feedback::Rejected(err)) => println!("rejected: {err}"),
            Ok(Feedback::Restarted { attempt }) => println!("attempt {attempt}"),
            Ok(Feedback::Help) => println!("{HELP_TEXT}"),
            Ok(Feedback::Exit(_)) => break,
            Err(err) => println!("{err}"),
        }

        print!("{}", board_text::render_session(session));
        stdout.flush().context("Failed to flush stdout")?;
    }

    if session.status().is_finished() {
        return Ok(());
    }
    // End of input while still playing counts as walking away.
    if let Ok(Feedback::Exit(_)) = app.tick(session, Instant::now() - last_input, "q") {
        for payload in app.accepted_inputs.drain(..) {
            journal.append(payload);
        }
    }
    Ok(())
}

fn write_journal(journal: &SessionJournal, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(journal).context("Failed to serialize journal")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write journal file: {}", path.display()))?;
    info!(path = %path.display(), inputs = journal.inputs.len(), "journal written");
    Ok(())
}
