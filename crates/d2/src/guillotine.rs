//! 2D guillotine rectangle packer.
//!
//! The packer keeps a list of free rectangles, initially one spanning the
//! whole bin. Each placement consumes one free rectangle and cuts the
//! L-shaped leftover into at most two new free rectangles with a single
//! straight cut. Free rectangles may overlap each other; they are never
//! merged.

use crate::boundary::Boundary2D;
use crate::geometry::Rect;
use guillotine_core::geometry::{Boundary, Geometry};
use guillotine_core::{
    approx_eq, fits_within, is_degenerate, Error, FreeRectChoice, Result, SplitHeuristic, EPSILON,
};

/// Candidate placement found by the search, consumed within the same call.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    free_index: usize,
    rect: Rect,
}

/// 2D guillotine bin packer.
#[derive(Debug, Clone)]
pub struct Guillotine2D {
    bin_width: f64,
    bin_height: f64,

    /// Rectangles packed so far.
    used_rects: Vec<Rect>,

    /// Rectangles describing the free area of the bin.
    free_rects: Vec<Rect>,
}

impl Guillotine2D {
    /// Creates an empty packer for a `width × height` bin.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let mut packer = Self {
            bin_width: 0.0,
            bin_height: 0.0,
            used_rects: Vec::new(),
            free_rects: Vec::new(),
        };
        packer.init(width, height)?;
        Ok(packer)
    }

    /// Creates an empty packer for the given bin.
    pub fn from_boundary(boundary: &Boundary2D) -> Result<Self> {
        Self::new(boundary.width(), boundary.height())
    }

    /// Resets the packer to an empty `width × height` bin.
    pub fn init(&mut self, width: f64, height: f64) -> Result<()> {
        Boundary2D::new(width, height).validate()?;

        self.bin_width = width;
        self.bin_height = height;
        self.used_rects.clear();
        self.free_rects.clear();
        self.free_rects.push(Rect::at(0.0, 0.0, width, height));
        Ok(())
    }

    /// Returns the bin width.
    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// Returns the bin height.
    pub fn bin_height(&self) -> f64 {
        self.bin_height
    }

    /// Returns the current free rectangles.
    pub fn free_rectangles(&self) -> &[Rect] {
        &self.free_rects
    }

    /// Returns the rectangles placed so far, in placement order.
    pub fn used_rectangles(&self) -> &[Rect] {
        &self.used_rects
    }

    /// Returns true if nothing has been placed.
    pub fn is_empty(&self) -> bool {
        self.used_rects.is_empty()
    }

    /// Returns the total area of placed rectangles.
    pub fn used_area(&self) -> f64 {
        self.used_rects.iter().map(Rect::area).sum()
    }

    /// Returns the ratio of used area to bin area.
    pub fn occupancy(&self) -> f64 {
        self.used_area() / (self.bin_width * self.bin_height)
    }

    /// Inserts a rectangle, rotating it by 90° if that scores better.
    ///
    /// Returns the placed rectangle, or a default rectangle with
    /// `placed == false` if no free rectangle can hold it. A failed insert
    /// leaves the packer untouched.
    pub fn insert(
        &mut self,
        item: &Rect,
        choice: FreeRectChoice,
        split: SplitHeuristic,
    ) -> Result<Rect> {
        item.validate()?;

        match self.find_candidate(item.width, item.height, choice) {
            Some(candidate) => Ok(self.commit(candidate, split)),
            None => Ok(Rect::default()),
        }
    }

    /// Inserts each rectangle in order and returns the ones that were placed.
    ///
    /// Every item is validated before anything is inserted. Items that do not
    /// fit are skipped and logged.
    pub fn insert_batch(
        &mut self,
        items: &[Rect],
        choice: FreeRectChoice,
        split: SplitHeuristic,
    ) -> Result<Vec<Rect>> {
        for item in items {
            item.validate()?;
        }

        let mut placed = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.find_candidate(item.width, item.height, choice) {
                Some(candidate) => placed.push(self.commit(candidate, split)),
                None => log::warn!(
                    "rectangle #{} ({}x{}) does not fit in the {}x{} bin",
                    index,
                    item.width,
                    item.height,
                    self.bin_width,
                    self.bin_height
                ),
            }
        }
        Ok(placed)
    }

    /// Returns true if a `width × height` rectangle could be inserted now.
    ///
    /// Rejects the same extents [`insert`] rejects.
    ///
    /// [`insert`]: Guillotine2D::insert
    pub fn fits(&self, width: f64, height: f64, choice: FreeRectChoice) -> Result<bool> {
        Ok(self.find_position(width, height, choice)?.is_some())
    }

    /// Returns where a `width × height` rectangle would be placed, without
    /// placing it.
    pub fn find_position(
        &self,
        width: f64,
        height: f64,
        choice: FreeRectChoice,
    ) -> Result<Option<Rect>> {
        Rect::new(width, height).validate()?;

        Ok(self
            .find_candidate(width, height, choice)
            .map(|candidate| candidate.rect))
    }

    /// Commits a placement previously returned by [`find_position`].
    ///
    /// The host free rectangle is located again by geometry: the first free
    /// rectangle whose origin matches and which can hold the placement.
    ///
    /// [`find_position`]: Guillotine2D::find_position
    pub fn insert_on_position(&mut self, placement: &Rect, split: SplitHeuristic) -> Result<Rect> {
        placement.validate()?;
        if !placement.placed {
            return Err(Error::InvalidGeometry(
                "cannot commit a rectangle that has no position".into(),
            ));
        }

        let free_index = self
            .free_rects
            .iter()
            .position(|free| {
                approx_eq(free.x, placement.x)
                    && approx_eq(free.y, placement.y)
                    && fits_within(placement.width, free.width)
                    && fits_within(placement.height, free.height)
            })
            .ok_or_else(|| {
                Error::Internal(format!(
                    "no free rectangle hosts {}x{} at ({}, {})",
                    placement.width, placement.height, placement.x, placement.y
                ))
            })?;

        Ok(self.commit(
            Candidate {
                free_index,
                rect: *placement,
            },
            split,
        ))
    }

    /// Searches all free rectangles, in both orientations, for the best spot.
    fn find_candidate(&self, width: f64, height: f64, choice: FreeRectChoice) -> Option<Candidate> {
        let mut best: Option<(f64, Candidate)> = None;

        for (i, free) in self.free_rects.iter().enumerate() {
            // A perfect fit, upright or sideways, is taken immediately.
            if approx_eq(width, free.width) && approx_eq(height, free.height) {
                return Some(Candidate {
                    free_index: i,
                    rect: Rect::placed_at(free.x, free.y, width, height),
                });
            }
            if approx_eq(height, free.width) && approx_eq(width, free.height) {
                return Some(Candidate {
                    free_index: i,
                    rect: Rect::placed_at(free.x, free.y, height, width),
                });
            }

            for (w, h) in [(width, height), (height, width)] {
                if !fits_within(w, free.width) || !fits_within(h, free.height) {
                    continue;
                }
                let score = choice.score(w, h, free.width, free.height);
                if best.map_or(true, |(best_score, _)| score < best_score) {
                    best = Some((
                        score,
                        Candidate {
                            free_index: i,
                            rect: Rect::placed_at(free.x, free.y, w, h),
                        },
                    ));
                }
            }
        }

        best.map(|(_, candidate)| candidate)
    }

    /// Removes the consumed free rectangle, splits it and records the item.
    fn commit(&mut self, candidate: Candidate, split: SplitHeuristic) -> Rect {
        let free = self.free_rects.remove(candidate.free_index);
        self.split_free_rect_by_heuristic(&free, &candidate.rect, split);
        self.used_rects.push(candidate.rect);
        candidate.rect
    }

    /// Splits the L-shaped leftover of `free` after `placed` went into its
    /// corner, choosing the cut direction with `method`.
    fn split_free_rect_by_heuristic(&mut self, free: &Rect, placed: &Rect, method: SplitHeuristic) {
        let horizontal =
            method.split_horizontal(free.width, free.height, placed.width, placed.height);
        self.split_free_rect_along_axis(free, placed, horizontal);
    }

    /// Splits the leftover of `free` into a rectangle above the placed item
    /// and a rectangle to its right, cutting along the given axis.
    fn split_free_rect_along_axis(&mut self, free: &Rect, placed: &Rect, horizontal: bool) {
        assert!(
            approx_eq(placed.x, free.x)
                && approx_eq(placed.y, free.y)
                && fits_within(placed.width, free.width)
                && fits_within(placed.height, free.height),
            "placed rectangle {placed:?} escapes its free rectangle {free:?}"
        );

        let (bottom_width, right_height) = if horizontal {
            (free.width, placed.height)
        } else {
            (placed.width, free.height)
        };

        let bottom = Rect::at(
            free.x,
            free.y + placed.height,
            bottom_width,
            free.height - placed.height,
        );
        let right = Rect::at(
            free.x + placed.width,
            free.y,
            free.width - placed.width,
            right_height,
        );

        let free_area = free.area();
        assert!(
            (bottom.area() + right.area() + placed.area() - free_area).abs()
                <= EPSILON * free_area.max(1.0),
            "split of {free:?} around {placed:?} does not conserve area"
        );

        for residual in [bottom, right] {
            if !is_degenerate(residual.width) && !is_degenerate(residual.height) {
                self.free_rects.push(residual);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(side: f64) -> Rect {
        Rect::new(side, side)
    }

    #[test]
    fn test_new_bin_has_single_free_rect() {
        let packer = Guillotine2D::new(200.0, 100.0).unwrap();
        assert_eq!(packer.free_rectangles(), &[Rect::at(0.0, 0.0, 200.0, 100.0)]);
        assert!(packer.is_empty());
    }

    #[test]
    fn test_invalid_bin_rejected() {
        assert!(Guillotine2D::new(0.0, 100.0).is_err());
        assert!(Guillotine2D::new(100.0, -1.0).is_err());
    }

    #[test]
    fn test_four_quadrants_then_full() {
        let mut packer = Guillotine2D::new(200.0, 200.0).unwrap();
        let choice = FreeRectChoice::BestAreaFit;
        let split = SplitHeuristic::ShorterLeftoverAxis;

        let mut origins = Vec::new();
        for _ in 0..4 {
            let placed = packer.insert(&square(100.0), choice, split).unwrap();
            assert!(placed.is_placed());
            origins.push((placed.x, placed.y));
        }
        origins.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(
            origins,
            vec![(0.0, 0.0), (0.0, 100.0), (100.0, 0.0), (100.0, 100.0)]
        );
        assert_relative_eq!(packer.used_area(), 40000.0);

        let fifth = packer.insert(&square(100.0), choice, split).unwrap();
        assert!(!fifth.is_placed());
        assert_eq!(packer.used_rectangles().len(), 4);
    }

    #[test]
    fn test_three_quadrants_cover_three_quarters() {
        let mut packer = Guillotine2D::new(200.0, 200.0).unwrap();
        for _ in 0..3 {
            let placed = packer
                .insert(
                    &square(100.0),
                    FreeRectChoice::BestAreaFit,
                    SplitHeuristic::ShorterLeftoverAxis,
                )
                .unwrap();
            assert!(placed.is_placed());
        }
        assert_relative_eq!(packer.used_area(), 30000.0);
        assert_relative_eq!(packer.occupancy(), 0.75);
    }

    #[test]
    fn test_rotates_to_fit() {
        let mut packer = Guillotine2D::new(50.0, 100.0).unwrap();
        let placed = packer
            .insert(
                &Rect::new(100.0, 50.0),
                FreeRectChoice::BestAreaFit,
                SplitHeuristic::ShorterLeftoverAxis,
            )
            .unwrap();
        assert!(placed.is_placed());
        assert_eq!((placed.width, placed.height), (50.0, 100.0));
        assert!(packer.free_rectangles().is_empty());
    }

    #[test]
    fn test_heuristics_diverge_on_equal_leftover_area() {
        // Both free rectangles leave 200 units of area around a 10x10 item,
        // but the second matches the item's height exactly.
        let free = vec![
            Rect::at(0.0, 0.0, 20.0, 15.0),
            Rect::at(100.0, 100.0, 30.0, 10.0),
        ];
        let mut packer = Guillotine2D::new(200.0, 200.0).unwrap();
        packer.free_rects = free;

        let by_area = packer
            .find_position(10.0, 10.0, FreeRectChoice::BestAreaFit)
            .unwrap()
            .unwrap();
        let by_short_side = packer
            .find_position(10.0, 10.0, FreeRectChoice::BestShortSideFit)
            .unwrap()
            .unwrap();

        assert_eq!((by_area.x, by_area.y), (0.0, 0.0));
        assert_eq!((by_short_side.x, by_short_side.y), (100.0, 100.0));
    }

    #[test]
    fn test_exact_match_short_circuits() {
        let mut packer = Guillotine2D::new(200.0, 200.0).unwrap();
        packer.free_rects = vec![
            Rect::at(0.0, 0.0, 11.0, 11.0),
            Rect::at(50.0, 50.0, 20.0, 10.0),
        ];
        let found = packer
            .find_position(10.0, 20.0, FreeRectChoice::BestShortSideFit)
            .unwrap()
            .unwrap();
        assert_eq!((found.x, found.y, found.width, found.height), (50.0, 50.0, 20.0, 10.0));
    }

    #[test]
    fn test_split_horizontal_vs_vertical() {
        let free = Rect::at(0.0, 0.0, 100.0, 60.0);
        let placed = Rect::placed_at(0.0, 0.0, 40.0, 20.0);

        let mut packer = Guillotine2D::new(100.0, 60.0).unwrap();
        packer.free_rects.clear();
        packer.split_free_rect_along_axis(&free, &placed, true);
        assert_eq!(
            packer.free_rects,
            vec![
                Rect::at(0.0, 20.0, 100.0, 40.0),
                Rect::at(40.0, 0.0, 60.0, 20.0)
            ]
        );

        packer.free_rects.clear();
        packer.split_free_rect_along_axis(&free, &placed, false);
        assert_eq!(
            packer.free_rects,
            vec![
                Rect::at(0.0, 20.0, 40.0, 40.0),
                Rect::at(40.0, 0.0, 60.0, 60.0)
            ]
        );
    }

    #[test]
    fn test_degenerate_residuals_discarded() {
        let mut packer = Guillotine2D::new(100.0, 20.0).unwrap();
        let placed = packer
            .insert(
                &Rect::new(40.0, 20.0),
                FreeRectChoice::BestAreaFit,
                SplitHeuristic::ShorterLeftoverAxis,
            )
            .unwrap();
        assert!(placed.is_placed());
        assert_eq!(packer.free_rectangles(), &[Rect::at(40.0, 0.0, 60.0, 20.0)]);
    }

    #[test]
    fn test_area_conservation_for_every_split() {
        let splits = [
            SplitHeuristic::ShorterLeftoverAxis,
            SplitHeuristic::LongerLeftoverAxis,
            SplitHeuristic::MinimizeArea,
            SplitHeuristic::MaximizeArea,
            SplitHeuristic::ShorterAxis,
            SplitHeuristic::LongerAxis,
        ];
        for split in splits {
            let mut packer = Guillotine2D::new(90.0, 70.0).unwrap();
            let placed = packer
                .insert(&Rect::new(30.0, 20.0), FreeRectChoice::BestAreaFit, split)
                .unwrap();
            let free_area: f64 = packer.free_rectangles().iter().map(Rect::area).sum();
            assert_relative_eq!(free_area + placed.area(), 90.0 * 70.0);
        }
    }

    #[test]
    fn test_split_within_tolerance_keeps_area() {
        let mut packer = Guillotine2D::new(10.0, 10.0).unwrap();
        let placed = packer
            .insert(
                &Rect::new(10.0 - EPSILON / 2.0, 5.0),
                FreeRectChoice::BestAreaFit,
                SplitHeuristic::ShorterLeftoverAxis,
            )
            .unwrap();
        assert!(placed.is_placed());

        // The sliver to the right is dropped, the strip above survives.
        assert_eq!(packer.free_rectangles().len(), 1);
        let free_area: f64 = packer.free_rectangles().iter().map(Rect::area).sum();
        assert_relative_eq!(free_area + placed.area(), 100.0, epsilon = 1e-6);
    }

    #[test]
    fn test_failed_insert_leaves_state_untouched() {
        let mut packer = Guillotine2D::new(50.0, 50.0).unwrap();
        packer
            .insert(
                &Rect::new(30.0, 30.0),
                FreeRectChoice::BestAreaFit,
                SplitHeuristic::ShorterLeftoverAxis,
            )
            .unwrap();
        let before = packer.clone();

        let result = packer
            .insert(
                &Rect::new(40.0, 40.0),
                FreeRectChoice::BestAreaFit,
                SplitHeuristic::ShorterLeftoverAxis,
            )
            .unwrap();
        assert!(!result.is_placed());
        assert_eq!(result, Rect::default());
        assert_eq!(packer.free_rectangles(), before.free_rectangles());
        assert_eq!(packer.used_rectangles(), before.used_rectangles());
    }

    #[test]
    fn test_invalid_item_rejected_before_mutation() {
        let mut packer = Guillotine2D::new(50.0, 50.0).unwrap();
        let err = packer.insert(
            &Rect::new(0.0, 10.0),
            FreeRectChoice::BestAreaFit,
            SplitHeuristic::ShorterLeftoverAxis,
        );
        assert!(err.is_err());
        assert_eq!(packer.free_rectangles().len(), 1);
    }

    #[test]
    fn test_fits_and_find_position_reject_invalid_extents() {
        let packer = Guillotine2D::new(10.0, 10.0).unwrap();
        let choice = FreeRectChoice::BestAreaFit;

        for (w, h) in [(-5.0, 0.0), (0.0, 3.0), (3.0, f64::NAN), (f64::INFINITY, 1.0)] {
            assert!(matches!(packer.fits(w, h, choice), Err(Error::InvalidGeometry(_))));
            assert!(matches!(
                packer.find_position(w, h, choice),
                Err(Error::InvalidGeometry(_))
            ));
        }
        assert!(packer.fits(5.0, 5.0, choice).unwrap());
        assert!(!packer.fits(11.0, 5.0, choice).unwrap());
    }

    #[test]
    fn test_insert_on_position_matches_insert() {
        let choice = FreeRectChoice::BestShortSideFit;
        let split = SplitHeuristic::LongerAxis;
        let items = [Rect::new(30.0, 10.0), Rect::new(20.0, 25.0), Rect::new(5.0, 40.0)];

        let mut direct = Guillotine2D::new(60.0, 60.0).unwrap();
        let mut deferred = Guillotine2D::new(60.0, 60.0).unwrap();
        for item in &items {
            let a = direct.insert(item, choice, split).unwrap();
            let position = deferred
                .find_position(item.width, item.height, choice)
                .unwrap()
                .unwrap();
            let b = deferred.insert_on_position(&position, split).unwrap();
            assert_eq!(a, b);
        }
        assert_eq!(direct.free_rectangles(), deferred.free_rectangles());
    }

    #[test]
    fn test_insert_on_position_rejects_stale_position() {
        let choice = FreeRectChoice::BestAreaFit;
        let split = SplitHeuristic::ShorterLeftoverAxis;
        let mut packer = Guillotine2D::new(10.0, 10.0).unwrap();

        let position = packer.find_position(10.0, 10.0, choice).unwrap().unwrap();
        packer.insert(&Rect::new(10.0, 10.0), choice, split).unwrap();

        assert!(packer.insert_on_position(&position, split).is_err());
        assert!(packer
            .insert_on_position(&Rect::new(1.0, 1.0), split)
            .is_err());
    }

    #[test]
    fn test_insert_batch_skips_misfits() {
        let mut packer = Guillotine2D::new(100.0, 100.0).unwrap();
        let items = [Rect::new(60.0, 60.0), Rect::new(200.0, 10.0), Rect::new(40.0, 40.0)];
        let placed = packer
            .insert_batch(
                &items,
                FreeRectChoice::BestAreaFit,
                SplitHeuristic::ShorterLeftoverAxis,
            )
            .unwrap();
        assert_eq!(placed.len(), 2);
        assert_eq!(packer.used_rectangles().len(), 2);
    }

    #[test]
    fn test_init_resets() {
        let mut packer = Guillotine2D::new(10.0, 10.0).unwrap();
        packer
            .insert(
                &Rect::new(5.0, 5.0),
                FreeRectChoice::BestAreaFit,
                SplitHeuristic::ShorterLeftoverAxis,
            )
            .unwrap();
        packer.init(20.0, 30.0).unwrap();
        assert!(packer.is_empty());
        assert_eq!(packer.free_rectangles(), &[Rect::at(0.0, 0.0, 20.0, 30.0)]);
    }
}
