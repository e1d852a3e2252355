//! Guillotine packing runner CLI

use anyhow::Context;
use clap::Parser;
use guillotine_bench::{run, Algorithm, CuboidDataset, RandomGenerator, DEFAULT_MAX_EXTENT};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pack-runner")]
#[command(about = "Packs cuboids into an open-topped bin of the given footprint")]
#[command(version)]
struct Cli {
    /// Generate this many random cuboids
    #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
    random: Option<usize>,

    /// Seed for random generation
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Largest extent of a random cuboid
    #[arg(long, default_value_t = DEFAULT_MAX_EXTENT, requires = "random")]
    max_extent: u32,

    /// Load cuboids from a JSON file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Packing algorithm
    #[arg(short, long, value_enum, default_value = "shelf")]
    algorithm: Algorithm,

    /// Report the packing time
    #[arg(short, long)]
    time: bool,

    /// Write the placed cuboids to a JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Bin width
    width: f64,

    /// Bin depth
    depth: f64,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let items = match (&cli.file, cli.random) {
        (Some(path), _) => CuboidDataset::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?
            .items(),
        (None, Some(count)) => RandomGenerator::new(cli.seed)
            .with_max_extent(cli.max_extent)
            .generate(count),
        (None, None) => anyhow::bail!("either --random or --file is required"),
    };

    tracing::info!(
        items = items.len(),
        width = cli.width,
        depth = cli.depth,
        "packing with {:?}",
        cli.algorithm
    );

    let report = run(&items, cli.width, cli.depth, cli.algorithm)?;
    report.print_summary();

    if cli.time {
        println!("Elapsed: {:.3} ms", report.elapsed.as_secs_f64() * 1000.0);
    }

    if let Some(path) = cli.output {
        CuboidDataset::from_cuboids(&report.placed)
            .save(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Placed cuboids saved to: {}", path.display());
    }

    Ok(())
}
