//! 2D rectangle geometry.

use guillotine_core::geometry::Geometry;
use guillotine_core::{check_extent, Result, AABB2D};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, used both for items and for free regions.
///
/// `x` and `y` are the bottom-left origin and are meaningful only once the
/// rectangle is placed (items) or when it describes a free region.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Extent along x.
    pub width: f64,
    /// Extent along y.
    pub height: f64,
    /// Origin x coordinate.
    pub x: f64,
    /// Origin y coordinate.
    pub y: f64,
    /// Whether the rectangle found a place in a bin.
    #[cfg_attr(feature = "serde", serde(default))]
    pub placed: bool,
}

impl Rect {
    /// Creates an unplaced item with the given extents.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Creates a region at the given origin. The `placed` flag stays false.
    pub fn at(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            x,
            y,
            placed: false,
        }
    }

    pub(crate) fn placed_at(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            x,
            y,
            placed: true,
        }
    }

    /// Returns true if the rectangle has been placed.
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Returns the area.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Returns the x coordinate of the right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Returns the y coordinate of the top edge.
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Returns the bounding box of this rectangle.
    pub fn aabb(&self) -> AABB2D<f64> {
        AABB2D::from_origin_size(self.x, self.y, self.width, self.height)
    }
}

impl Geometry for Rect {
    fn measure(&self) -> f64 {
        self.area()
    }

    fn extents(&self) -> Vec<f64> {
        vec![self.width, self.height]
    }

    fn origin(&self) -> Vec<f64> {
        vec![self.x, self.y]
    }

    fn is_placed(&self) -> bool {
        self.placed
    }

    fn validate(&self) -> Result<()> {
        check_extent("Rect", "width", self.width)?;
        check_extent("Rect", "height", self.height)
    }
}
