//! Core geometry traits and tolerance helpers.

use crate::Result;

/// Tolerance used by every geometric comparison in the engine.
pub const EPSILON: f64 = 1e-9;

/// Returns true if an extent of `item` fits into an extent of `free`.
#[inline]
pub fn fits_within(item: f64, free: f64) -> bool {
    item <= free + EPSILON
}

/// Returns true if two extents are equal within [`EPSILON`].
///
/// Infinite extents never compare equal, so an unbounded region is never an
/// exact match.
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

/// Returns true if an extent is too small to hold anything.
#[inline]
pub fn is_degenerate(extent: f64) -> bool {
    extent <= EPSILON
}

/// Trait for items that can be packed.
pub trait Geometry: Clone {
    /// Returns the area (2D) or volume (3D) of this item.
    fn measure(&self) -> f64;

    /// Returns the extents as a vector (width, height[, depth]).
    fn extents(&self) -> Vec<f64>;

    /// Returns the placed origin as a vector (x, y[, z]).
    fn origin(&self) -> Vec<f64>;

    /// Returns true if the item has been placed in a bin.
    fn is_placed(&self) -> bool;

    /// Validates the item and returns an error if invalid.
    fn validate(&self) -> Result<()>;
}

/// Trait for bins that hold items.
pub trait Boundary: Clone {
    /// Returns the area (2D) or volume (3D) of this bin.
    ///
    /// Unbounded bins report `f64::INFINITY`.
    fn measure(&self) -> f64;

    /// Validates the bin and returns an error if invalid.
    fn validate(&self) -> Result<()>;
}
