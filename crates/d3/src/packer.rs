//! 3D bin packing solver.

use crate::boundary::Boundary3D;
use crate::geometry::Cuboid;
use crate::guillotine::Guillotine3D;
use crate::shelf::ShelfPacker;
use guillotine_core::geometry::{Boundary, Geometry};
use guillotine_core::solver::{Config, Solver, Strategy};
use guillotine_core::{Placement, Result, SolveResult};

use std::time::Instant;

/// 3D bin packing solver.
///
/// Runs one of the packers in this crate according to [`Config::strategy`]
/// and reports a uniform [`SolveResult`].
#[derive(Debug, Clone)]
pub struct Packer3D {
    config: Config,
}

impl Packer3D {
    /// Creates a new packer with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Creates a packer with default configuration.
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Input indices in the order the order-following strategies consume
    /// them: by decreasing volume when sorting is enabled, otherwise as given.
    fn insertion_order(&self, items: &[Cuboid]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..items.len()).collect();
        if self.config.sort_by_volume {
            order.sort_by(|&a, &b| items[b].volume().total_cmp(&items[a].volume()));
        }
        order
    }

    /// Inserts items one by one into a single 3D guillotine packer.
    fn guillotine(&self, items: &[Cuboid], boundary: &Boundary3D) -> Result<SolveResult> {
        let mut packer = Guillotine3D::new(*boundary)?;
        let mut result = SolveResult::new();

        for index in self.insertion_order(items) {
            let placed = packer.insert(&items[index], self.config.cuboid_choice, self.config.split)?;
            record(&mut result, index, &items[index], &placed, None);
        }

        Ok(result)
    }

    /// Stacks items onto shelves.
    fn shelf(&self, items: &[Cuboid], boundary: &Boundary3D) -> Result<SolveResult> {
        let mut packer = ShelfPacker::new(*boundary)?
            .with_footprint_heuristics(self.config.rect_choice, self.config.split);
        let mut result = SolveResult::new();

        for index in self.insertion_order(items) {
            let placed = packer.insert(&items[index], self.config.shelf_choice)?;
            let layer = packer.shelf_at(placed.y).filter(|_| placed.is_placed());
            record(&mut result, index, &items[index], &placed, layer);
        }

        result.layers_used = packer.shelves().len();
        Ok(result)
    }

    /// Lookahead or exhaustive order search. Items are used as given.
    fn global(&self, items: &[Cuboid], boundary: &Boundary3D) -> Result<SolveResult> {
        let mut packer = Guillotine3D::new(*boundary)?;
        let outcome = match self.config.strategy {
            Strategy::ExhaustiveGlobal => {
                packer.pack_exhaustive(items, self.config.split, self.config.max_permutation_items)?
            }
            _ => packer.pack_best_global(items, self.config.split)?,
        };

        let mut result = SolveResult::new();
        for &index in &outcome.order {
            record(&mut result, index, &items[index], &outcome.cuboids[index], None);
        }
        result.unplaced = outcome.unplaced();
        Ok(result)
    }
}

/// Appends `placed` to the result, or marks the item unplaced.
fn record(
    result: &mut SolveResult,
    index: usize,
    item: &Cuboid,
    placed: &Cuboid,
    layer: Option<usize>,
) {
    if !placed.is_placed() {
        result.unplaced.push(index);
        return;
    }

    let rotated = placed.extents() != item.extents();
    let mut placement =
        Placement::new_3d(index, placed.position(), placed.extents()).with_rotated(rotated);
    if let Some(layer) = layer {
        placement = placement.with_layer(layer);
    }
    result.placements.push(placement);
}

impl Solver for Packer3D {
    type Geometry = Cuboid;
    type Boundary = Boundary3D;

    fn solve(&self, items: &[Self::Geometry], boundary: &Self::Boundary) -> Result<SolveResult> {
        self.config.validate()?;
        boundary.validate()?;
        for item in items {
            item.validate()?;
        }

        let start = Instant::now();
        log::debug!(
            "solving {} cuboids with {} strategy",
            items.len(),
            self.config.strategy.name()
        );

        let mut result = match self.config.strategy {
            Strategy::Guillotine => self.guillotine(items, boundary)?,
            Strategy::Shelf => self.shelf(items, boundary)?,
            Strategy::GlobalGuillotine | Strategy::ExhaustiveGlobal => {
                self.global(items, boundary)?
            }
        };

        result.unplaced.sort_unstable();
        result.calculate_utilization(boundary.footprint_area());
        result.computation_time_ms = start.elapsed().as_millis() as u64;
        Ok(result.with_strategy(self.config.strategy.name()))
    }
}
