//! Runs one packing algorithm over a cuboid list.

use clap::ValueEnum;
use guillotine_core::{Config, PlacementStats, Result, SolveSummary, Solver, Strategy};
use guillotine_d3::{Boundary3D, Cuboid, Packer3D};
use std::time::{Duration, Instant};

/// Packing algorithm selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Shelves packed with a 2D guillotine packer (items sorted by volume)
    Shelf,
    /// 3D guillotine packer (items sorted by volume)
    Guillotine,
    /// 3D guillotine packer with lookahead ordering (no sorting)
    GlobalGuillotine,
    /// 3D guillotine packer trying every ordering (small inputs only)
    Exhaustive,
}

impl From<Algorithm> for Strategy {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Shelf => Strategy::Shelf,
            Algorithm::Guillotine => Strategy::Guillotine,
            Algorithm::GlobalGuillotine => Strategy::GlobalGuillotine,
            Algorithm::Exhaustive => Strategy::ExhaustiveGlobal,
        }
    }
}

/// Outcome of one run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Algorithm that produced the layout.
    pub algorithm: Algorithm,
    /// Placed cuboids with their final positions and orientations.
    pub placed: Vec<Cuboid>,
    /// Number of input items that were not placed.
    pub unplaced: usize,
    /// Filled height of the layout, `None` if nothing was placed.
    pub filled_height: Option<f64>,
    /// Counts, utilization and solver time of the layout.
    pub summary: SolveSummary,
    /// Rotation and shelf counts over the placements.
    pub stats: PlacementStats,
    /// Wall-clock time of the packing call.
    pub elapsed: Duration,
}

impl RunReport {
    /// Prints a short summary to stdout.
    pub fn print_summary(&self) {
        println!(
            "{}: placed {}/{} cuboids, filled height {}, utilization {:.1}%",
            self.summary.strategy,
            self.summary.total_placed,
            self.summary.total_requested,
            self.filled_height
                .map_or_else(|| "-".to_string(), |h| h.to_string()),
            self.summary.utilization_percent
        );
        if self.stats.layer_distribution.is_empty() {
            println!("  {} rotated", self.stats.rotated_count);
        } else {
            println!(
                "  {} rotated, {} shelves",
                self.stats.rotated_count,
                self.stats.layer_distribution.len()
            );
        }
    }
}

/// Packs `items` into an unbounded `width × depth` bin.
pub fn run(items: &[Cuboid], width: f64, depth: f64, algorithm: Algorithm) -> Result<RunReport> {
    let boundary = Boundary3D::unbounded(width, depth);
    let config = Config::default().with_strategy(algorithm.into());
    let packer = Packer3D::new(config);

    let start = Instant::now();
    let result = packer.solve(items, &boundary)?;
    let elapsed = start.elapsed();

    let placed = result
        .placements
        .iter()
        .map(|p| {
            let mut cuboid = Cuboid::new(p.extents[0], p.extents[1], p.extents[2]);
            cuboid.x = p.x();
            cuboid.y = p.y();
            cuboid.z = p.z().unwrap_or_default();
            cuboid.placed = true;
            cuboid
        })
        .collect();

    log::info!(
        "{} finished in {:?} with {} unplaced",
        Strategy::from(algorithm).name(),
        elapsed,
        result.unplaced.len()
    );

    Ok(RunReport {
        algorithm,
        placed,
        unplaced: result.unplaced_count(),
        filled_height: result.filled_height,
        summary: SolveSummary::from(&result),
        stats: result.placement_stats(),
        elapsed,
    })
}
