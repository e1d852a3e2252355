//! 2D bin boundary.

use guillotine_core::geometry::Boundary;
use guillotine_core::{Error, Result, AABB2D};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangular 2D bin.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Boundary2D {
    width: f64,
    height: f64,
}

impl Boundary2D {
    /// Creates a new bin with the given extents.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the bounding box of the bin.
    pub fn aabb(&self) -> AABB2D<f64> {
        AABB2D::new(0.0, 0.0, self.width, self.height)
    }
}

impl Boundary for Boundary2D {
    fn measure(&self) -> f64 {
        self.width * self.height
    }

    fn validate(&self) -> Result<()> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(self.width) || !valid(self.height) {
            return Err(Error::InvalidBoundary(format!(
                "2D bin extents must be positive and finite, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}
