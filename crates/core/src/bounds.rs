//! Axis-aligned bounding boxes used to verify packings.

use crate::geometry::EPSILON;
use nalgebra::RealField;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

fn tolerance<S: RealField + Copy>() -> S {
    nalgebra::convert(EPSILON)
}

/// Axis-aligned bounding box in 2D.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AABB2D<S> {
    /// Minimum x coordinate.
    pub min_x: S,
    /// Minimum y coordinate.
    pub min_y: S,
    /// Maximum x coordinate.
    pub max_x: S,
    /// Maximum y coordinate.
    pub max_y: S,
}

impl<S: RealField + Copy> AABB2D<S> {
    /// Creates a new AABB from min/max coordinates.
    pub fn new(min_x: S, min_y: S, max_x: S, max_y: S) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates an AABB from an origin corner and extents.
    pub fn from_origin_size(x: S, y: S, width: S, height: S) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Checks if the interiors of two AABBs overlap. Shared edges do not count.
    pub fn overlaps(&self, other: &Self) -> bool {
        let tol = tolerance::<S>();
        self.min_x + tol < other.max_x
            && other.min_x + tol < self.max_x
            && self.min_y + tol < other.max_y
            && other.min_y + tol < self.max_y
    }

    /// Checks if `other` lies entirely inside this AABB.
    pub fn contains(&self, other: &Self) -> bool {
        let tol = tolerance::<S>();
        other.min_x + tol >= self.min_x
            && other.min_y + tol >= self.min_y
            && other.max_x <= self.max_x + tol
            && other.max_y <= self.max_y + tol
    }
}

/// Axis-aligned bounding box in 3D. `y` is the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AABB3D<S> {
    /// Minimum x coordinate.
    pub min_x: S,
    /// Minimum y coordinate.
    pub min_y: S,
    /// Minimum z coordinate.
    pub min_z: S,
    /// Maximum x coordinate.
    pub max_x: S,
    /// Maximum y coordinate.
    pub max_y: S,
    /// Maximum z coordinate.
    pub max_z: S,
}

impl<S: RealField + Copy> AABB3D<S> {
    /// Creates a new AABB from min/max coordinates.
    pub fn new(min_x: S, min_y: S, min_z: S, max_x: S, max_y: S, max_z: S) -> Self {
        Self {
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
        }
    }

    /// Creates an AABB from an origin corner and (width, height, depth).
    pub fn from_origin_size(x: S, y: S, z: S, width: S, height: S, depth: S) -> Self {
        Self::new(x, y, z, x + width, y + height, z + depth)
    }

    /// Checks if the interiors of two AABBs overlap. Shared faces do not count.
    pub fn overlaps(&self, other: &Self) -> bool {
        let tol = tolerance::<S>();
        self.min_x + tol < other.max_x
            && other.min_x + tol < self.max_x
            && self.min_y + tol < other.max_y
            && other.min_y + tol < self.max_y
            && self.min_z + tol < other.max_z
            && other.min_z + tol < self.max_z
    }

    /// Checks if `other` lies entirely inside this AABB.
    pub fn contains(&self, other: &Self) -> bool {
        let tol = tolerance::<S>();
        other.min_x + tol >= self.min_x
            && other.min_y + tol >= self.min_y
            && other.min_z + tol >= self.min_z
            && other.max_x <= self.max_x + tol
            && other.max_y <= self.max_y + tol
            && other.max_z <= self.max_z + tol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb2d_touching_is_not_overlap() {
        let a = AABB2D::from_origin_size(0.0, 0.0, 10.0, 10.0);
        let b = AABB2D::from_origin_size(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));

        let c = AABB2D::from_origin_size(9.0, 9.0, 10.0, 10.0);
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_aabb2d_contains() {
        let bin = AABB2D::new(0.0, 0.0, 100.0, 50.0);
        assert!(bin.contains(&AABB2D::from_origin_size(50.0, 0.0, 50.0, 50.0)));
        assert!(!bin.contains(&AABB2D::from_origin_size(60.0, 0.0, 50.0, 50.0)));
    }

    #[test]
    fn test_aabb3d_from_origin_size() {
        let aabb = AABB3D::from_origin_size(1.0, 2.0, 3.0, 10.0, 20.0, 30.0);
        assert_eq!(aabb, AABB3D::new(1.0, 2.0, 3.0, 11.0, 22.0, 33.0));
    }

    #[test]
    fn test_aabb3d_stacked_is_not_overlap() {
        let a = AABB3D::from_origin_size(0.0, 0.0, 0.0, 10.0, 10.0, 10.0);
        let b = AABB3D::from_origin_size(0.0, 10.0, 0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        let c = AABB3D::from_origin_size(5.0, 9.0, 5.0, 10.0, 10.0, 10.0);
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_aabb3d_contains_in_unbounded_bin() {
        let bin = AABB3D::new(0.0, 0.0, 0.0, 10.0, f64::INFINITY, 10.0);
        let item = AABB3D::from_origin_size(0.0, 1e6, 0.0, 10.0, 5.0, 10.0);
        assert!(bin.contains(&item));
    }
}
