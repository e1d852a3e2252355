//! Solver traits and configuration.

use crate::geometry::{Boundary, Geometry};
use crate::heuristic::{FreeCuboidChoice, FreeRectChoice, ShelfChoice, SplitHeuristic};
use crate::result::SolveResult;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default upper bound on the item count accepted by exhaustive search.
pub const DEFAULT_MAX_PERMUTATION_ITEMS: usize = 8;

/// Upper bound accepted for `max_permutation_items`.
pub const MAX_PERMUTATION_ITEMS_LIMIT: usize = 12;

/// Packing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strategy {
    /// Items inserted one by one into a single 3D guillotine packer.
    Guillotine,
    /// Items stacked onto shelves, each packed by a 2D guillotine packer.
    #[default]
    Shelf,
    /// Greedy lookahead choosing the next item that minimizes filled height.
    GlobalGuillotine,
    /// Every insertion order tried; only for a handful of items.
    ExhaustiveGlobal,
}

impl Strategy {
    /// Returns a short display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Guillotine => "Guillotine",
            Self::Shelf => "Shelf",
            Self::GlobalGuillotine => "GlobalGuillotine",
            Self::ExhaustiveGlobal => "ExhaustiveGlobal",
        }
    }
}

/// Common configuration for solvers.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Packing strategy.
    pub strategy: Strategy,

    /// Free-rectangle choice used by 2D packers (and shelf footprints).
    pub rect_choice: FreeRectChoice,

    /// Free-cuboid choice used by the 3D guillotine strategy.
    pub cuboid_choice: FreeCuboidChoice,

    /// Split direction rule.
    pub split: SplitHeuristic,

    /// Shelf selection rule.
    pub shelf_choice: ShelfChoice,

    /// Sort items by decreasing volume before the order-following strategies.
    pub sort_by_volume: bool,

    /// Maximum item count accepted by exhaustive search.
    pub max_permutation_items: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            rect_choice: FreeRectChoice::default(),
            cuboid_choice: FreeCuboidChoice::default(),
            split: SplitHeuristic::default(),
            shelf_choice: ShelfChoice::default(),
            sort_by_volume: true,
            max_permutation_items: DEFAULT_MAX_PERMUTATION_ITEMS,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the packing strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the 2D free-rectangle choice.
    pub fn with_rect_choice(mut self, choice: FreeRectChoice) -> Self {
        self.rect_choice = choice;
        self
    }

    /// Sets the 3D free-cuboid choice.
    pub fn with_cuboid_choice(mut self, choice: FreeCuboidChoice) -> Self {
        self.cuboid_choice = choice;
        self
    }

    /// Sets the split heuristic.
    pub fn with_split(mut self, split: SplitHeuristic) -> Self {
        self.split = split;
        self
    }

    /// Sets the shelf choice.
    pub fn with_shelf_choice(mut self, choice: ShelfChoice) -> Self {
        self.shelf_choice = choice;
        self
    }

    /// Enables or disables sorting by decreasing volume.
    pub fn with_sort_by_volume(mut self, sort: bool) -> Self {
        self.sort_by_volume = sort;
        self
    }

    /// Sets the item limit for exhaustive search.
    pub fn with_max_permutation_items(mut self, n: usize) -> Self {
        self.max_permutation_items = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_permutation_items == 0 {
            return Err(Error::ConfigError(
                "max_permutation_items must be at least 1".into(),
            ));
        }
        if self.max_permutation_items > MAX_PERMUTATION_ITEMS_LIMIT {
            return Err(Error::ConfigError(format!(
                "max_permutation_items {} exceeds the limit of {}",
                self.max_permutation_items, MAX_PERMUTATION_ITEMS_LIMIT
            )));
        }
        Ok(())
    }
}

/// Trait for packing solvers.
pub trait Solver {
    /// The item type this solver handles.
    type Geometry: Geometry;
    /// The bin type this solver handles.
    type Boundary: Boundary;

    /// Packs `items` into `boundary`.
    fn solve(&self, items: &[Self::Geometry], boundary: &Self::Boundary) -> Result<SolveResult>;
}
