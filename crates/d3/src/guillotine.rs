//! 3D guillotine cuboid packer.
//!
//! Works with a fixed-height bin or an unbounded one; the mode follows from
//! [`Boundary3D::is_unbounded`]. Each placement consumes one free cuboid and
//! cuts the leftover into up to three free cuboids: a slab above the item,
//! and two footprint residuals at the item's height.

use crate::boundary::Boundary3D;
use crate::geometry::{Cuboid, ORIENTATIONS};
use guillotine_core::geometry::{Boundary, Geometry};
use guillotine_core::{
    approx_eq, fits_within, is_degenerate, FreeCuboidChoice, Result, SplitHeuristic,
};

/// Candidate placement found by the search, consumed within the same call.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    free_index: usize,
    cuboid: Cuboid,
}

/// 3D guillotine bin packer.
#[derive(Debug, Clone)]
pub struct Guillotine3D {
    boundary: Boundary3D,
    used_cuboids: Vec<Cuboid>,
    free_cuboids: Vec<Cuboid>,
}

impl Guillotine3D {
    /// Creates an empty packer for the given bin.
    pub fn new(boundary: Boundary3D) -> Result<Self> {
        let mut packer = Self {
            boundary,
            used_cuboids: Vec::new(),
            free_cuboids: Vec::new(),
        };
        packer.init(boundary)?;
        Ok(packer)
    }

    /// Resets the packer to an empty bin.
    pub fn init(&mut self, boundary: Boundary3D) -> Result<()> {
        boundary.validate()?;

        self.boundary = boundary;
        self.used_cuboids.clear();
        self.free_cuboids.clear();
        self.free_cuboids.push(Cuboid::at(
            [0.0, 0.0, 0.0],
            boundary.width(),
            boundary.height(),
            boundary.depth(),
        ));
        Ok(())
    }

    /// Returns the bin.
    pub fn boundary(&self) -> &Boundary3D {
        &self.boundary
    }

    /// Returns the current free cuboids.
    pub fn free_cuboids(&self) -> &[Cuboid] {
        &self.free_cuboids
    }

    /// Returns the cuboids placed so far, in placement order.
    pub fn used_cuboids(&self) -> &[Cuboid] {
        &self.used_cuboids
    }

    /// Returns true if nothing has been placed.
    pub fn is_empty(&self) -> bool {
        self.used_cuboids.is_empty()
    }

    /// Returns the total volume of placed cuboids.
    pub fn used_volume(&self) -> f64 {
        self.used_cuboids.iter().map(Cuboid::volume).sum()
    }

    /// Returns the highest top face over all placed cuboids, or `None` when
    /// nothing has been placed.
    pub fn filled_bin_height(&self) -> Option<f64> {
        filled_height(&self.used_cuboids)
    }

    /// Inserts a cuboid in whichever of its six orientations scores best.
    ///
    /// Returns the placed cuboid, or a default cuboid with `placed == false`
    /// if it does not fit anywhere. A failed insert leaves the packer
    /// untouched.
    pub fn insert(
        &mut self,
        item: &Cuboid,
        choice: FreeCuboidChoice,
        split: SplitHeuristic,
    ) -> Result<Cuboid> {
        item.validate()?;
        Ok(self
            .place_validated(item, choice, split)
            .unwrap_or_default())
    }

    /// Inserts each cuboid in order and returns the ones that were placed.
    ///
    /// Every item is validated before anything is inserted. Items that do not
    /// fit are skipped and logged.
    pub fn insert_batch(
        &mut self,
        items: &[Cuboid],
        choice: FreeCuboidChoice,
        split: SplitHeuristic,
    ) -> Result<Vec<Cuboid>> {
        for item in items {
            item.validate()?;
        }

        let mut placed = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.place_validated(item, choice, split) {
                Some(cuboid) => placed.push(cuboid),
                None => log::warn!(
                    "cuboid #{} ({}x{}x{}) does not fit in the bin",
                    index,
                    item.width,
                    item.height,
                    item.depth
                ),
            }
        }
        Ok(placed)
    }

    /// Returns true if `item` could be inserted now.
    pub fn fits(&self, item: &Cuboid, choice: FreeCuboidChoice) -> Result<bool> {
        Ok(self.find_position(item, choice)?.is_some())
    }

    /// Returns where `item` would be placed, without placing it.
    pub fn find_position(&self, item: &Cuboid, choice: FreeCuboidChoice) -> Result<Option<Cuboid>> {
        item.validate()?;
        Ok(self
            .find_candidate(item, choice)
            .map(|candidate| candidate.cuboid))
    }

    /// Places an item whose extents were already checked, returning `None`
    /// when it does not fit.
    pub(crate) fn place_validated(
        &mut self,
        item: &Cuboid,
        choice: FreeCuboidChoice,
        split: SplitHeuristic,
    ) -> Option<Cuboid> {
        self.find_candidate(item, choice)
            .map(|candidate| self.commit(candidate, split))
    }

    /// Searches all free cuboids and all orientations for the best spot.
    fn find_candidate(&self, item: &Cuboid, choice: FreeCuboidChoice) -> Option<Candidate> {
        let mut best: Option<(f64, Candidate)> = None;

        for (i, free) in self.free_cuboids.iter().enumerate() {
            let free_extents = free.extents();

            for orientation in 0..ORIENTATIONS.len() {
                let extents = item.oriented_extents(orientation);
                let candidate = Candidate {
                    free_index: i,
                    cuboid: Cuboid::placed_at(free.position(), extents),
                };

                if extents
                    .iter()
                    .zip(free_extents.iter())
                    .all(|(e, f)| approx_eq(*e, *f))
                {
                    return Some(candidate);
                }

                if !extents
                    .iter()
                    .zip(free_extents.iter())
                    .all(|(e, f)| fits_within(*e, *f))
                {
                    continue;
                }

                let score = choice.score(extents, free.y, free_extents);
                if best.map_or(true, |(best_score, _)| score < best_score) {
                    best = Some((score, candidate));
                }
            }
        }

        best.map(|(_, candidate)| candidate)
    }

    fn commit(&mut self, candidate: Candidate, split: SplitHeuristic) -> Cuboid {
        let free = self.free_cuboids.remove(candidate.free_index);
        self.split_free_cuboid(&free, &candidate.cuboid, split);
        self.used_cuboids.push(candidate.cuboid);

        log::debug!(
            "placed {}x{}x{} at ({}, {}, {})",
            candidate.cuboid.width,
            candidate.cuboid.height,
            candidate.cuboid.depth,
            candidate.cuboid.x,
            candidate.cuboid.y,
            candidate.cuboid.z
        );
        candidate.cuboid
    }

    /// Cuts the leftover of `free` into a slab above `placed` and two
    /// residuals beside it in the footprint plane.
    fn split_free_cuboid(&mut self, free: &Cuboid, placed: &Cuboid, method: SplitHeuristic) {
        assert!(
            approx_eq(placed.x, free.x)
                && approx_eq(placed.y, free.y)
                && approx_eq(placed.z, free.z)
                && fits_within(placed.width, free.width)
                && fits_within(placed.height, free.height)
                && fits_within(placed.depth, free.depth),
            "placed cuboid {placed:?} escapes its free cuboid {free:?}"
        );

        let horizontal =
            method.split_horizontal(free.width, free.depth, placed.width, placed.depth);

        let top = Cuboid::at(
            [free.x, free.y + placed.height, free.z],
            free.width,
            free.height - placed.height,
            free.depth,
        );

        let (bottom_width, right_depth) = if horizontal {
            (free.width, placed.depth)
        } else {
            (placed.width, free.depth)
        };

        let bottom = Cuboid::at(
            [free.x, free.y, free.z + placed.depth],
            bottom_width,
            placed.height,
            free.depth - placed.depth,
        );
        let right = Cuboid::at(
            [free.x + placed.width, free.y, free.z],
            free.width - placed.width,
            placed.height,
            right_depth,
        );

        for residual in [top, bottom, right] {
            if residual.extents().iter().all(|e| !is_degenerate(*e)) {
                self.free_cuboids.push(residual);
            }
        }
    }
}

/// Highest top face over `cuboids`, `None` when empty.
pub(crate) fn filled_height(cuboids: &[Cuboid]) -> Option<f64> {
    cuboids.iter().map(Cuboid::top).reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use guillotine_core::Error;

    fn min_height(packer: &mut Guillotine3D, item: Cuboid) -> Cuboid {
        packer
            .insert(&item, FreeCuboidChoice::MinHeight, SplitHeuristic::ShorterLeftoverAxis)
            .unwrap()
    }

    #[test]
    fn test_exact_fill_then_reject() {
        let mut packer = Guillotine3D::new(Boundary3D::new(10.0, 10.0, 10.0)).unwrap();
        let placed = min_height(&mut packer, Cuboid::new(10.0, 10.0, 10.0));

        assert!(placed.is_placed());
        assert_eq!(placed.position(), [0.0, 0.0, 0.0]);
        assert!(packer.free_cuboids().is_empty());
        assert_eq!(packer.filled_bin_height(), Some(10.0));

        let next = min_height(&mut packer, Cuboid::new(1.0, 1.0, 1.0));
        assert!(!next.is_placed());
        assert_eq!(packer.used_cuboids().len(), 1);
    }

    #[test]
    fn test_empty_packer_has_no_height() {
        let packer = Guillotine3D::new(Boundary3D::unbounded(10.0, 10.0)).unwrap();
        assert_eq!(packer.filled_bin_height(), None);
        assert!(packer.is_empty());
    }

    #[test]
    fn test_invalid_bin() {
        assert!(Guillotine3D::new(Boundary3D::new(0.0, 10.0, 10.0)).is_err());
        assert!(Guillotine3D::new(Boundary3D::unbounded(10.0, -1.0)).is_err());
    }

    #[test]
    fn test_rotates_into_flat_bin() {
        let mut packer = Guillotine3D::new(Boundary3D::new(30.0, 5.0, 20.0)).unwrap();
        let placed = min_height(&mut packer, Cuboid::new(5.0, 20.0, 30.0));
        assert!(placed.is_placed());
        assert_eq!(placed.extents(), [30.0, 5.0, 20.0]);
    }

    #[test]
    fn test_three_region_split() {
        let free = Cuboid::at([0.0, 0.0, 0.0], 10.0, 8.0, 6.0);
        let placed = Cuboid::placed_at([0.0, 0.0, 0.0], [4.0, 3.0, 2.0]);

        let mut packer = Guillotine3D::new(Boundary3D::new(10.0, 8.0, 6.0)).unwrap();
        packer.free_cuboids.clear();
        // Leftover is 6 along x and 4 along z.
        packer.split_free_cuboid(&free, &placed, SplitHeuristic::LongerLeftoverAxis);

        assert_eq!(
            packer.free_cuboids,
            vec![
                Cuboid::at([0.0, 3.0, 0.0], 10.0, 5.0, 6.0),
                Cuboid::at([0.0, 0.0, 2.0], 10.0, 3.0, 4.0),
                Cuboid::at([4.0, 0.0, 0.0], 6.0, 3.0, 2.0),
            ]
        );

        packer.free_cuboids.clear();
        packer.split_free_cuboid(&free, &placed, SplitHeuristic::ShorterLeftoverAxis);
        assert_eq!(
            packer.free_cuboids,
            vec![
                Cuboid::at([0.0, 3.0, 0.0], 10.0, 5.0, 6.0),
                Cuboid::at([0.0, 0.0, 2.0], 4.0, 3.0, 4.0),
                Cuboid::at([4.0, 0.0, 0.0], 6.0, 3.0, 6.0),
            ]
        );
    }

    #[test]
    fn test_volume_conservation_in_fixed_bin() {
        let mut packer = Guillotine3D::new(Boundary3D::new(10.0, 8.0, 6.0)).unwrap();
        let placed = packer
            .insert(
                &Cuboid::new(4.0, 3.0, 2.0),
                FreeCuboidChoice::BestAreaFit,
                SplitHeuristic::MinimizeArea,
            )
            .unwrap();
        let free_volume: f64 = packer.free_cuboids().iter().map(Cuboid::volume).sum();
        assert_relative_eq!(free_volume + placed.volume(), 480.0);
    }

    #[test]
    fn test_full_height_item_leaves_no_top_in_fixed_bin() {
        let mut packer = Guillotine3D::new(Boundary3D::new(10.0, 10.0, 10.0)).unwrap();
        let placed = packer
            .insert(
                &Cuboid::new(5.0, 10.0, 5.0),
                FreeCuboidChoice::BestShortSideFit,
                SplitHeuristic::ShorterLeftoverAxis,
            )
            .unwrap();
        assert!(placed.is_placed());
        assert!(packer
            .free_cuboids()
            .iter()
            .all(|free| free.top() <= 10.0 && free.y == 0.0));
    }

    #[test]
    fn test_unbounded_keeps_top_slab() {
        let mut packer = Guillotine3D::new(Boundary3D::unbounded(10.0, 10.0)).unwrap();
        min_height(&mut packer, Cuboid::new(10.0, 4.0, 10.0));

        assert_eq!(packer.free_cuboids().len(), 1);
        let top = packer.free_cuboids()[0];
        assert_eq!((top.y, top.height), (4.0, f64::INFINITY));

        let second = min_height(&mut packer, Cuboid::new(10.0, 10.0, 3.0));
        assert!(second.is_placed());
        assert_relative_eq!(second.y, 4.0);
        assert_eq!(packer.filled_bin_height(), Some(7.0));
    }

    #[test]
    fn test_min_height_prefers_lower_region() {
        let mut packer = Guillotine3D::new(Boundary3D::unbounded(20.0, 10.0)).unwrap();
        min_height(&mut packer, Cuboid::new(10.0, 10.0, 10.0));
        let second = min_height(&mut packer, Cuboid::new(10.0, 5.0, 10.0));
        assert_relative_eq!(second.y, 0.0);
        assert_relative_eq!(second.x, 10.0);
    }

    #[test]
    fn test_failed_insert_leaves_state_untouched() {
        let mut packer = Guillotine3D::new(Boundary3D::new(10.0, 10.0, 10.0)).unwrap();
        min_height(&mut packer, Cuboid::new(6.0, 6.0, 6.0));
        let free_before = packer.free_cuboids().to_vec();

        let rejected = min_height(&mut packer, Cuboid::new(11.0, 1.0, 1.0));
        assert_eq!(rejected, Cuboid::default());
        assert_eq!(packer.free_cuboids(), free_before.as_slice());
    }

    #[test]
    fn test_invalid_item_rejected() {
        let mut packer = Guillotine3D::new(Boundary3D::new(10.0, 10.0, 10.0)).unwrap();
        let result = packer.insert(
            &Cuboid::new(1.0, -1.0, 1.0),
            FreeCuboidChoice::MinHeight,
            SplitHeuristic::ShorterLeftoverAxis,
        );
        assert!(result.is_err());
        assert!(packer.is_empty());
    }

    #[test]
    fn test_find_position_matches_insert() {
        let mut packer = Guillotine3D::new(Boundary3D::new(20.0, 20.0, 20.0)).unwrap();
        min_height(&mut packer, Cuboid::new(7.0, 3.0, 9.0));

        let item = Cuboid::new(5.0, 5.0, 5.0);
        let position = packer
            .find_position(&item, FreeCuboidChoice::MinHeight)
            .unwrap();
        assert!(packer.fits(&item, FreeCuboidChoice::MinHeight).unwrap());
        let placed = min_height(&mut packer, item);
        assert_eq!(position, Some(placed));
    }

    #[test]
    fn test_fits_and_find_position_reject_invalid_extents() {
        let packer = Guillotine3D::new(Boundary3D::new(10.0, 10.0, 10.0)).unwrap();
        let choice = FreeCuboidChoice::MinHeight;

        for item in [
            Cuboid::new(-1.0, 0.0, 2.0),
            Cuboid::new(1.0, 0.0, 1.0),
            Cuboid::new(1.0, 1.0, f64::NAN),
        ] {
            assert!(matches!(packer.fits(&item, choice), Err(Error::InvalidGeometry(_))));
            assert!(matches!(
                packer.find_position(&item, choice),
                Err(Error::InvalidGeometry(_))
            ));
        }
        assert!(packer.fits(&Cuboid::new(2.0, 2.0, 2.0), choice).unwrap());
    }

    #[test]
    fn test_insert_batch() {
        let mut packer = Guillotine3D::new(Boundary3D::new(10.0, 10.0, 10.0)).unwrap();
        let items = [
            Cuboid::new(10.0, 5.0, 10.0),
            Cuboid::new(20.0, 1.0, 1.0),
            Cuboid::new(10.0, 5.0, 10.0),
        ];
        let placed = packer
            .insert_batch(&items, FreeCuboidChoice::MinHeight, SplitHeuristic::ShorterLeftoverAxis)
            .unwrap();
        assert_eq!(placed.len(), 2);
        assert_eq!(packer.filled_bin_height(), Some(10.0));
    }
}
