//! 3D bin boundary.

use guillotine_core::geometry::Boundary;
use guillotine_core::{Error, Result, AABB3D};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 3D bin with a `width × depth` footprint.
///
/// The height may be unbounded, represented by `f64::INFINITY`. Packers then
/// grow the filled height instead of rejecting items that would overflow.
/// Serialized forms write an unbounded height as `null`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Boundary3D {
    width: f64,
    #[cfg_attr(
        feature = "serde",
        serde(with = "optional_height", default = "optional_height::unbounded")
    )]
    height: f64,
    depth: f64,
}

/// Maps an infinite height to `None` and back.
#[cfg(feature = "serde")]
mod optional_height {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn unbounded() -> f64 {
        f64::INFINITY
    }

    pub fn serialize<S: Serializer>(height: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        let height = height.is_finite().then_some(*height);
        height.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

impl Boundary3D {
    /// Creates a bin with a fixed height.
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Creates a bin whose height grows as needed.
    pub fn unbounded(width: f64, depth: f64) -> Self {
        Self::new(width, f64::INFINITY, depth)
    }

    /// Returns the width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the height, `f64::INFINITY` when unbounded.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the depth.
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Returns true if the height is unbounded.
    pub fn is_unbounded(&self) -> bool {
        self.height == f64::INFINITY
    }

    /// Returns the footprint area (width × depth).
    pub fn footprint_area(&self) -> f64 {
        self.width * self.depth
    }

    /// Returns the bounding box of the bin.
    pub fn aabb(&self) -> AABB3D<f64> {
        AABB3D::new(0.0, 0.0, 0.0, self.width, self.height, self.depth)
    }
}

impl Boundary for Boundary3D {
    fn measure(&self) -> f64 {
        self.width * self.height * self.depth
    }

    fn validate(&self) -> Result<()> {
        let finite = |v: f64| v.is_finite() && v > 0.0;
        if !finite(self.width) || !finite(self.depth) {
            return Err(Error::InvalidBoundary(format!(
                "3D bin footprint must be positive and finite, got {}x{}",
                self.width, self.depth
            )));
        }
        if self.height.is_nan() || self.height <= 0.0 {
            return Err(Error::InvalidBoundary(format!(
                "3D bin height must be positive, got {}",
                self.height
            )));
        }
        Ok(())
    }
}
