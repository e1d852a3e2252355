//! Placement representation for positioned items.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents the final placement of one input item.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Index of the item in the caller's input list.
    pub item_index: usize,

    /// Origin coordinates (x, y for 2D; x, y, z for 3D).
    pub position: Vec<f64>,

    /// Placed extents (width, height for 2D; width, height, depth for 3D).
    /// May be a permutation of the input extents.
    pub extents: Vec<f64>,

    /// Whether the placed extents differ from the input orientation.
    pub rotated: bool,

    /// Shelf index, for placements produced by the shelf packer.
    pub layer: Option<usize>,
}

impl Placement {
    /// Creates a new 3D placement.
    pub fn new_3d(item_index: usize, position: [f64; 3], extents: [f64; 3]) -> Self {
        Self {
            item_index,
            position: position.to_vec(),
            extents: extents.to_vec(),
            rotated: false,
            layer: None,
        }
    }

    /// Sets the rotated flag.
    pub fn with_rotated(mut self, rotated: bool) -> Self {
        self.rotated = rotated;
        self
    }

    /// Sets the shelf index.
    pub fn with_layer(mut self, layer: usize) -> Self {
        self.layer = Some(layer);
        self
    }

    /// Returns the x coordinate.
    pub fn x(&self) -> f64 {
        self.position.first().copied().unwrap_or_default()
    }

    /// Returns the y coordinate.
    pub fn y(&self) -> f64 {
        self.position.get(1).copied().unwrap_or_default()
    }

    /// Returns the z coordinate (for 3D placements).
    pub fn z(&self) -> Option<f64> {
        self.position.get(2).copied()
    }

    /// Returns the top face along the vertical (y) axis.
    pub fn top(&self) -> f64 {
        self.y() + self.extents.get(1).copied().unwrap_or_default()
    }

    /// Returns the placed measure (area or volume).
    pub fn measure(&self) -> f64 {
        self.extents.iter().product()
    }
}

/// Placement statistics for a set of placements.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementStats {
    /// Total number of placements.
    pub count: usize,
    /// Number of placements whose orientation differs from the input.
    pub rotated_count: usize,
    /// Placements per shelf index.
    pub layer_distribution: std::collections::BTreeMap<usize, usize>,
}

impl PlacementStats {
    /// Computes statistics from a set of placements.
    pub fn from_placements(placements: &[Placement]) -> Self {
        let mut stats = Self {
            count: placements.len(),
            ..Default::default()
        };

        for p in placements {
            if p.rotated {
                stats.rotated_count += 1;
            }

            if let Some(layer) = p.layer {
                *stats.layer_distribution.entry(layer).or_insert(0) += 1;
            }
        }

        stats
    }
}
