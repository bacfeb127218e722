//! dungen
//!
//! Generates one dungeon with the chosen strategy and prints it to stdout.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::info;

use dg_core::{GenConfig, Grid};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Connected cave from a random walk
    Walk,
    /// Equal rooms on a lattice
    Grid,
    /// Rooms of random size chained by corridors
    Freeform,
}

#[derive(Debug, Parser)]
#[command(name = "dungen")]
#[command(about = "Procedural dungeon tile-grid generator", long_about = None)]
struct Args {
    /// Generation strategy
    #[arg(short, long, value_enum, default_value = "freeform")]
    strategy: Strategy,

    /// Grid width in tiles
    #[arg(long, default_value = "80")]
    width: usize,

    /// Grid height in tiles
    #[arg(long, default_value = "80")]
    height: usize,

    /// Floor tiles for `walk`, rooms otherwise
    #[arg(short, long)]
    count: Option<usize>,

    /// RNG seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with generation parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the raw generator output without post-processing
    #[arg(long)]
    no_post: bool,
}

impl Args {
    fn count(&self) -> usize {
        self.count.unwrap_or(match self.strategy {
            Strategy::Walk => self.width * self.height / 4,
            Strategy::Grid => 25,
            Strategy::Freeform => 20,
        })
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut grid = match args.seed {
        Some(seed) => Grid::with_seed(args.width, args.height, seed),
        None => Grid::new(args.width, args.height),
    };
    if let Some(path) = &args.config {
        grid.config = GenConfig::from_json(&fs::read_to_string(path)?)?;
    }
    info!(
        "generating {:?} dungeon {}x{} with seed {}",
        args.strategy,
        args.width,
        args.height,
        grid.seed()
    );

    let count = args.count();
    match args.strategy {
        Strategy::Walk => grid.generate_random_walk(count)?,
        Strategy::Grid => grid.generate_grid_rooms(count)?,
        Strategy::Freeform => grid.generate_freeform_rooms(count)?,
    }

    if !args.no_post {
        post_process(&mut grid, args.strategy);
    }

    print!("{}", grid.render());
    Ok(())
}

fn post_process(grid: &mut Grid, strategy: Strategy) {
    if strategy == Strategy::Walk {
        let min_island = grid.config.min_island_size;
        grid.remove_islands(min_island);
        grid.thicken_walls();
        for _ in 0..2 {
            grid.prune_walls(5);
        }
        grid.remove_islands(min_island);
        for _ in 0..2 {
            grid.prune_walls(6);
        }
    }
    grid.thicken_walls();
}
