//! 3D cuboid geometry.

use guillotine_core::geometry::Geometry;
use guillotine_core::{check_extent, Result, AABB3D};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis permutations of `(width, height, depth)`, one per axis-aligned
/// orientation. Each entry names the source axis for the new width, height
/// and depth.
pub const ORIENTATIONS: [(usize, usize, usize); 6] = [
    (0, 1, 2),
    (0, 2, 1),
    (1, 0, 2),
    (1, 2, 0),
    (2, 0, 1),
    (2, 1, 0),
];

/// An axis-aligned box.
///
/// `height` runs along y, the stacking axis. The footprint plane is spanned
/// by `width` (x) and `depth` (z). The origin is the corner with the smallest
/// coordinates and is meaningful only once the cuboid is placed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cuboid {
    /// Extent along x.
    pub width: f64,
    /// Extent along y.
    pub height: f64,
    /// Extent along z.
    pub depth: f64,
    /// Origin x coordinate.
    pub x: f64,
    /// Origin y coordinate.
    pub y: f64,
    /// Origin z coordinate.
    pub z: f64,
    /// Whether the cuboid found a place in a bin.
    #[cfg_attr(feature = "serde", serde(default))]
    pub placed: bool,
}

impl Cuboid {
    /// Creates an unplaced item with the given extents.
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
            ..Default::default()
        }
    }

    /// Creates a region at the given origin. The `placed` flag stays false.
    pub fn at(position: [f64; 3], width: f64, height: f64, depth: f64) -> Self {
        let [x, y, z] = position;
        Self {
            width,
            height,
            depth,
            x,
            y,
            z,
            placed: false,
        }
    }

    pub(crate) fn placed_at(position: [f64; 3], extents: [f64; 3]) -> Self {
        let [width, height, depth] = extents;
        Self {
            placed: true,
            ..Self::at(position, width, height, depth)
        }
    }

    /// Returns true if the cuboid has been placed.
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Returns the extents as `[width, height, depth]`.
    pub fn extents(&self) -> [f64; 3] {
        [self.width, self.height, self.depth]
    }

    /// Returns the origin as `[x, y, z]`.
    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Returns the volume.
    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth
    }

    /// Returns the footprint area (width × depth).
    pub fn footprint_area(&self) -> f64 {
        self.width * self.depth
    }

    /// Returns the y coordinate of the top face.
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Returns the extents for the orientation at `index` in [`ORIENTATIONS`].
    pub fn oriented_extents(&self, index: usize) -> [f64; 3] {
        let dims = self.extents();
        let (w, h, d) = ORIENTATIONS[index];
        [dims[w], dims[h], dims[d]]
    }

    /// Returns the extents sorted from longest to shortest.
    pub fn sorted_edges(&self) -> [f64; 3] {
        let mut edges = self.extents();
        edges.sort_by(|a, b| b.total_cmp(a));
        edges
    }

    /// Returns the bounding box of this cuboid.
    pub fn aabb(&self) -> AABB3D<f64> {
        AABB3D::from_origin_size(self.x, self.y, self.z, self.width, self.height, self.depth)
    }
}

impl Geometry for Cuboid {
    fn measure(&self) -> f64 {
        self.volume()
    }

    fn extents(&self) -> Vec<f64> {
        vec![self.width, self.height, self.depth]
    }

    fn origin(&self) -> Vec<f64> {
        vec![self.x, self.y, self.z]
    }

    fn is_placed(&self) -> bool {
        self.placed
    }

    fn validate(&self) -> Result<()> {
        check_extent("Cuboid", "width", self.width)?;
        check_extent("Cuboid", "height", self.height)?;
        check_extent("Cuboid", "depth", self.depth)
    }
}
