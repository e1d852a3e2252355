//! Placement-choice and split-direction heuristics.
//!
//! Every heuristic is a closed enum. Scores are pure functions of the
//! oriented item and the candidate free region; lower is better.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rule for choosing which free rectangle receives a 2D item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FreeRectChoice {
    /// Smallest leftover area.
    #[default]
    BestAreaFit,
    /// Smallest leftover along the tighter axis.
    BestShortSideFit,
}

impl FreeRectChoice {
    /// Scores an item of `width × height` placed into a free rectangle of
    /// `free_width × free_height`.
    pub fn score(self, width: f64, height: f64, free_width: f64, free_height: f64) -> f64 {
        match self {
            Self::BestAreaFit => free_width * free_height - width * height,
            Self::BestShortSideFit => {
                let leftover_horiz = (free_width - width).abs();
                let leftover_vert = (free_height - height).abs();
                leftover_horiz.min(leftover_vert)
            }
        }
    }
}

/// Rule for choosing which free cuboid receives a 3D item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FreeCuboidChoice {
    /// Smallest leftover volume.
    BestAreaFit,
    /// Smallest leftover along the tightest of the three axes.
    BestShortSideFit,
    /// Lowest resulting top face; packs bottom-up.
    #[default]
    MinHeight,
}

impl FreeCuboidChoice {
    /// Scores an item with extents `item = [width, height, depth]` placed
    /// into a free cuboid whose origin sits at height `free_y` and whose
    /// extents are `free = [width, height, depth]`.
    pub fn score(self, item: [f64; 3], free_y: f64, free: [f64; 3]) -> f64 {
        let [width, height, depth] = item;
        let [free_width, free_height, free_depth] = free;
        match self {
            Self::BestAreaFit => free_width * free_height * free_depth - width * height * depth,
            Self::BestShortSideFit => {
                let leftover_horiz = (free_width - width).abs();
                let leftover_vert = (free_height - height).abs();
                let leftover_depth = (free_depth - depth).abs();
                leftover_horiz.min(leftover_vert).min(leftover_depth)
            }
            Self::MinHeight => free_y + height,
        }
    }
}

/// Rule for choosing the direction of the guillotine cut that splits the
/// L-shaped leftover of a free region into two rectangles.
///
/// In 3D the rule is applied to the footprint plane (width and depth).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SplitHeuristic {
    /// Cut along the shorter leftover axis.
    #[default]
    ShorterLeftoverAxis,
    /// Cut along the longer leftover axis.
    LongerLeftoverAxis,
    /// Make one residual as large as possible at the expense of the other.
    MinimizeArea,
    /// Make both residuals as even-sized as possible.
    MaximizeArea,
    /// Cut along the shorter side of the free region.
    ShorterAxis,
    /// Cut along the longer side of the free region.
    LongerAxis,
}

impl SplitHeuristic {
    /// Returns true if the cut should be horizontal, i.e. the residual
    /// beyond the placed item's far edge spans the free region's full width.
    pub fn split_horizontal(
        self,
        free_width: f64,
        free_length: f64,
        placed_width: f64,
        placed_length: f64,
    ) -> bool {
        let w = free_width - placed_width;
        let h = free_length - placed_length;
        match self {
            Self::ShorterLeftoverAxis => w <= h,
            Self::LongerLeftoverAxis => w > h,
            Self::MinimizeArea => placed_width * h > w * placed_length,
            Self::MaximizeArea => placed_width * h <= w * placed_length,
            Self::ShorterAxis => free_width <= free_length,
            Self::LongerAxis => free_width > free_length,
        }
    }
}

/// Rule for choosing the shelf that receives an item in the shelf packer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShelfChoice {
    /// Only the most recently opened shelf is considered.
    NextFit,
    /// Shelves are tried in creation order; the first that admits wins.
    #[default]
    FirstFit,
    /// The admitting shelf with the least height left above the item wins.
    BestHeightFit,
}
