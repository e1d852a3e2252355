//! Solve result representation.

use crate::placement::{Placement, PlacementStats};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of a packing solve operation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveResult {
    /// Placements for all successfully placed items, in placement order.
    pub placements: Vec<Placement>,

    /// Input indices of items that could not be placed.
    pub unplaced: Vec<usize>,

    /// Maximum top face over all placements, `None` if nothing was placed.
    pub filled_height: Option<f64>,

    /// Utilization ratio (0.0 - 1.0).
    /// Calculated as: placed volume / (footprint area × filled height)
    pub utilization: f64,

    /// Number of shelves opened (shelf strategy only).
    pub layers_used: usize,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,

    /// Strategy used for solving.
    pub strategy: Option<String>,
}

impl SolveResult {
    /// Creates a new empty result.
    pub fn new() -> Self {
        Self {
            placements: Vec::new(),
            unplaced: Vec::new(),
            filled_height: None,
            utilization: 0.0,
            layers_used: 0,
            computation_time_ms: 0,
            strategy: None,
        }
    }

    /// Returns true if all items were placed.
    pub fn all_placed(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Returns the number of placed items.
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    /// Returns the number of unplaced items.
    pub fn unplaced_count(&self) -> usize {
        self.unplaced.len()
    }

    /// Sets the strategy name.
    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    /// Computes placement statistics.
    pub fn placement_stats(&self) -> PlacementStats {
        PlacementStats::from_placements(&self.placements)
    }

    /// Recomputes `filled_height` and `utilization` from the placements.
    ///
    /// `footprint_area` is the bin's width × depth (or width for 2D strips).
    pub fn calculate_utilization(&mut self, footprint_area: f64) {
        self.filled_height = self
            .placements
            .iter()
            .map(Placement::top)
            .fold(None, |acc: Option<f64>, top| {
                Some(acc.map_or(top, |current| current.max(top)))
            });

        let placed: f64 = self.placements.iter().map(Placement::measure).sum();
        self.utilization = match self.filled_height {
            Some(height) if height > 0.0 && footprint_area > 0.0 => {
                placed / (footprint_area * height)
            }
            _ => 0.0,
        };
    }
}

impl Default for SolveResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics for a solve result.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveSummary {
    /// Total items requested.
    pub total_requested: usize,
    /// Total items placed.
    pub total_placed: usize,
    /// Filled bin height (0 if nothing was placed).
    pub filled_height: f64,
    /// Utilization percentage.
    pub utilization_percent: f64,
    /// Computation time in milliseconds.
    pub time_ms: u64,
    /// Strategy used.
    pub strategy: String,
}

impl From<&SolveResult> for SolveSummary {
    fn from(result: &SolveResult) -> Self {
        Self {
            total_requested: result.placements.len() + result.unplaced.len(),
            total_placed: result.placements.len(),
            filled_height: result.filled_height.unwrap_or(0.0),
            utilization_percent: result.utilization * 100.0,
            time_ms: result.computation_time_ms,
            strategy: result
                .strategy
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
        }
    }
}
