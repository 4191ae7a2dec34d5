use anyhow::{Result, bail, ensure};
use breach_core::{
    Coord, GeneratedLevel, Grid, PuzzleConfig, TileKind, check_win_condition, generate_level,
    trace_circuit,
};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tools::init_logging;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 500)]
    levels: u64,
    #[arg(long, default_value_t = 8)]
    grid_size: usize,
    #[arg(long, default_value_t = 64)]
    rotations: u32,
}

fn main() -> Result<()> {
    init_logging()?;
    let args = Args::parse();
    let config = PuzzleConfig { grid_size: args.grid_size, ..PuzzleConfig::default() };
    config.validate()?;

    println!(
        "Starting level fuzz on seeds {}..{} at {}x{}...",
        args.seed,
        args.seed.wrapping_add(args.levels),
        config.grid_size,
        config.grid_size
    );
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for offset in 0..args.levels {
        let seed = args.seed.wrapping_add(offset);
        let level = generate_level(seed, 0, &config);
        check_level(&level).map_err(|e| e.context(format!("seed {seed}")))?;
        scramble_and_trace(&mut rng, &level.grid, args.rotations)
            .map_err(|e| e.context(format!("seed {seed}")))?;
    }

    info!(levels = args.levels, "fuzz finished");
    println!("All {} levels passed.", args.levels);
    Ok(())
}

fn check_level(level: &GeneratedLevel) -> Result<()> {
    let grid = &level.grid;
    let last_col = grid.size() - 1;

    ensure!(grid.count_kind(TileKind::Start) == 1, "level must have exactly one start");
    ensure!(grid.count_kind(TileKind::End) == 1, "level must have exactly one end");
    ensure!(level.start.col == 0, "start at {:?} is off the left edge", level.start);
    ensure!(level.end.col == last_col, "end at {:?} is off the right edge", level.end);
    ensure!(grid.count_kind(TileKind::Empty) == 0, "level left empty cells");

    let inner = &level.route[1..level.route.len() - 1];
    if let Some(cell) = inner.iter().find(|cell| cell.col == 0 || cell.col == last_col) {
        bail!("route cell {cell:?} touches an edge column");
    }

    ensure!(
        check_win_condition(&trace_circuit(&level.solved_grid())),
        "solved rotations do not reach the end"
    );
    Ok(())
}

fn scramble_and_trace(rng: &mut ChaCha8Rng, grid: &Grid, rotations: u32) -> Result<()> {
    let mut grid = grid.clone();
    let size = grid.size() as u64;

    for _ in 0..rotations {
        let coord = Coord::new(
            (rng.next_u64() % size) as usize,
            (rng.next_u64() % size) as usize,
        );
        // Anchors and firewalls refuse rotation.
        let _ = grid.rotate_tile(coord);

        let traced = trace_circuit(&grid);
        if let Some(tile) = traced.tiles().iter().find(|t| t.blocks_power() && t.is_powered) {
            bail!("blocking tile at {:?} carries power", tile.coord);
        }
        ensure!(trace_circuit(&traced) == traced, "tracing twice changed the powered set");
        grid = traced;
    }
    Ok(())
}
