use anyhow::{Context, Result};
use breach_core::{ReplayResult, replay_session};
use clap::Parser;
use std::path::PathBuf;
use tools::{init_logging, load_journal};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the journal JSON file to replay
    #[arg(short, long)]
    journal: PathBuf,
}

fn main() -> Result<()> {
    init_logging()?;
    let args = Args::parse();

    let journal = load_journal(&args.journal)?;
    let result: ReplayResult =
        replay_session(&journal).context("Replay failed during execution")?;

    println!("Replay complete.");
    println!("Seed: {}", journal.seed);
    println!("Inputs: {}", journal.inputs.len());
    println!("Status: {:?}", result.final_status);
    println!("Attempts: {}", result.attempts);
    match result.reward {
        Some(reward) => println!("Reward: {reward}"),
        None => println!("Reward: none"),
    }
    println!("Snapshot Hash: 0x{:016x}", result.final_snapshot_hash);

    Ok(())
}
