//! Shelf-based cuboid packer.
//!
//! The bin is cut into horizontal shelves stacked along y. Each shelf packs
//! the footprints of its items with its own [`Guillotine2D`] spanning the
//! whole `width × depth` floor, so every item on a shelf rests at the
//! shelf's `start_y`. A shelf's height is fixed when it is opened, except for
//! the topmost shelf, which may grow since nothing lies above it.

use crate::boundary::Boundary3D;
use crate::geometry::Cuboid;
use crate::guillotine::filled_height;
use guillotine_core::geometry::{Boundary, Geometry};
use guillotine_core::{
    approx_eq, fits_within, FreeRectChoice, Result, ShelfChoice, SplitHeuristic,
};
use guillotine_d2::{Guillotine2D, Rect};

/// A horizontal layer of the bin.
#[derive(Debug, Clone)]
pub struct Shelf {
    start_y: f64,
    height: f64,
    packer: Guillotine2D,
}

impl Shelf {
    /// Returns the y offset of the shelf floor.
    pub fn start_y(&self) -> f64 {
        self.start_y
    }

    /// Returns the shelf height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the y coordinate of the shelf ceiling.
    pub fn top(&self) -> f64 {
        self.start_y + self.height
    }

    /// Returns the footprint packer of this shelf.
    pub fn packer(&self) -> &Guillotine2D {
        &self.packer
    }

    fn grow_to(&mut self, height: f64) {
        assert!(
            height >= self.height,
            "shelf at y={} cannot shrink from {} to {}",
            self.start_y,
            self.height,
            height
        );
        self.height = height;
    }
}

/// Where an item goes and which of its edges stands vertical.
#[derive(Debug, Clone, Copy)]
enum Plan {
    Existing { shelf: usize, edge: usize },
    GrowTop { edge: usize },
    Open { edge: usize },
}

/// Shelf packer for cuboids.
#[derive(Debug, Clone)]
pub struct ShelfPacker {
    boundary: Boundary3D,
    rect_choice: FreeRectChoice,
    split: SplitHeuristic,
    shelves: Vec<Shelf>,
    used_cuboids: Vec<Cuboid>,
}

impl ShelfPacker {
    /// Creates an empty packer for the given bin using the default footprint
    /// heuristics.
    pub fn new(boundary: Boundary3D) -> Result<Self> {
        boundary.validate()?;
        Ok(Self {
            boundary,
            rect_choice: FreeRectChoice::default(),
            split: SplitHeuristic::default(),
            shelves: Vec::new(),
            used_cuboids: Vec::new(),
        })
    }

    /// Sets the heuristics used by each shelf's footprint packer.
    pub fn with_footprint_heuristics(
        mut self,
        choice: FreeRectChoice,
        split: SplitHeuristic,
    ) -> Self {
        self.rect_choice = choice;
        self.split = split;
        self
    }

    /// Resets the packer to an empty bin.
    pub fn init(&mut self, boundary: Boundary3D) -> Result<()> {
        boundary.validate()?;
        self.boundary = boundary;
        self.shelves.clear();
        self.used_cuboids.clear();
        Ok(())
    }

    /// Returns the bin.
    pub fn boundary(&self) -> &Boundary3D {
        &self.boundary
    }

    /// Returns the shelves in creation order, bottom to top.
    pub fn shelves(&self) -> &[Shelf] {
        &self.shelves
    }

    /// Returns the cuboids placed so far, in placement order.
    pub fn used_cuboids(&self) -> &[Cuboid] {
        &self.used_cuboids
    }

    /// Returns the highest top face over all placed cuboids, or `None` when
    /// nothing has been placed.
    pub fn filled_bin_height(&self) -> Option<f64> {
        filled_height(&self.used_cuboids)
    }

    /// Returns the index of the shelf whose floor is at `y`.
    pub fn shelf_at(&self, y: f64) -> Option<usize> {
        self.shelves
            .iter()
            .position(|shelf| approx_eq(shelf.start_y, y))
    }

    /// Inserts a cuboid, returning it placed or with `placed == false` if no
    /// shelf admits it and no new shelf fits.
    pub fn insert(&mut self, item: &Cuboid, choice: ShelfChoice) -> Result<Cuboid> {
        item.validate()?;

        match self.plan(item, choice)? {
            Some(plan) => self.commit(item, plan),
            None => Ok(Cuboid::default()),
        }
    }

    /// Inserts each cuboid in order and returns the ones that were placed.
    pub fn insert_batch(&mut self, items: &[Cuboid], choice: ShelfChoice) -> Result<Vec<Cuboid>> {
        for item in items {
            item.validate()?;
        }

        let mut placed = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.plan(item, choice)? {
                Some(plan) => placed.push(self.commit(item, plan)?),
                None => log::warn!(
                    "cuboid #{} ({}x{}x{}) does not fit on any shelf",
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
    ///
    /// Rejects the same items [`insert`] rejects.
    ///
    /// [`insert`]: ShelfPacker::insert
    pub fn fits(&self, item: &Cuboid, choice: ShelfChoice) -> Result<bool> {
        item.validate()?;
        Ok(self.plan(item, choice)?.is_some())
    }

    /// Decides where `item` goes without touching any state.
    fn plan(&self, item: &Cuboid, choice: ShelfChoice) -> Result<Option<Plan>> {
        let edges = item.sorted_edges();

        if let Some(plan) = self.plan_existing(&edges, choice)? {
            return Ok(Some(plan));
        }

        if let Some(top) = self.shelves.last() {
            // Smallest vertical edge first keeps the grown shelf as low as possible.
            for edge in (0..3).rev() {
                let (fw, fd) = footprint(&edges, edge);
                if fits_within(top.start_y + edges[edge], self.boundary.height())
                    && top.packer.fits(fw, fd, self.rect_choice)?
                {
                    return Ok(Some(Plan::GrowTop { edge }));
                }
            }
        }

        let start_y = self.shelves.last().map_or(0.0, Shelf::top);
        for edge in [1, 0, 2] {
            let (fw, fd) = footprint(&edges, edge);
            let footprint_fits = (fits_within(fw, self.boundary.width())
                && fits_within(fd, self.boundary.depth()))
                || (fits_within(fd, self.boundary.width())
                    && fits_within(fw, self.boundary.depth()));
            if footprint_fits && fits_within(start_y + edges[edge], self.boundary.height()) {
                return Ok(Some(Plan::Open { edge }));
            }
        }

        Ok(None)
    }

    fn plan_existing(&self, edges: &[f64; 3], choice: ShelfChoice) -> Result<Option<Plan>> {
        let candidates = match choice {
            ShelfChoice::NextFit => self.shelves.len().saturating_sub(1)..self.shelves.len(),
            ShelfChoice::FirstFit | ShelfChoice::BestHeightFit => 0..self.shelves.len(),
        };

        let mut best: Option<(f64, Plan)> = None;
        for shelf_index in candidates {
            let shelf = &self.shelves[shelf_index];
            for edge in 0..3 {
                if !fits_within(edges[edge], shelf.height) {
                    continue;
                }
                let (fw, fd) = footprint(edges, edge);
                if !shelf.packer.fits(fw, fd, self.rect_choice)? {
                    continue;
                }

                let plan = Plan::Existing {
                    shelf: shelf_index,
                    edge,
                };
                match choice {
                    ShelfChoice::NextFit | ShelfChoice::FirstFit => return Ok(Some(plan)),
                    ShelfChoice::BestHeightFit => {
                        let slack = shelf.height - edges[edge];
                        if best.map_or(true, |(best_slack, _)| slack < best_slack) {
                            best = Some((slack, plan));
                        }
                    }
                }
            }
        }
        Ok(best.map(|(_, plan)| plan))
    }

    fn commit(&mut self, item: &Cuboid, plan: Plan) -> Result<Cuboid> {
        let edges = item.sorted_edges();

        let (shelf_index, edge) = match plan {
            Plan::Existing { shelf, edge } => (shelf, edge),
            Plan::GrowTop { edge } => {
                let top = self.shelves.len() - 1;
                let height = self.shelves[top].height.max(edges[edge]);
                log::debug!("growing shelf {} to height {}", top, height);
                self.shelves[top].grow_to(height);
                (top, edge)
            }
            Plan::Open { edge } => {
                let start_y = self.shelves.last().map_or(0.0, Shelf::top);
                let shelf = self.new_shelf(start_y, edges[edge])?;
                self.shelves.push(shelf);
                log::debug!(
                    "opened shelf {} at y={} with height {}",
                    self.shelves.len() - 1,
                    start_y,
                    edges[edge]
                );
                (self.shelves.len() - 1, edge)
            }
        };

        let (fw, fd) = footprint(&edges, edge);
        let (rect_choice, split) = (self.rect_choice, self.split);
        let shelf = &mut self.shelves[shelf_index];
        assert!(
            fits_within(edges[edge], shelf.height),
            "item edge {} is taller than shelf {} of height {}",
            edges[edge],
            shelf_index,
            shelf.height
        );

        let rect = shelf
            .packer
            .insert(&Rect::new(fw, fd), rect_choice, split)?;
        assert!(
            rect.is_placed(),
            "planned footprint {fw}x{fd} rejected by shelf {shelf_index}"
        );

        let cuboid = Cuboid::placed_at(
            [rect.x, shelf.start_y, rect.y],
            [rect.width, edges[edge], rect.height],
        );
        self.used_cuboids.push(cuboid);
        Ok(cuboid)
    }

    fn new_shelf(&self, start_y: f64, height: f64) -> Result<Shelf> {
        Ok(Shelf {
            start_y,
            height,
            packer: Guillotine2D::new(self.boundary.width(), self.boundary.depth())?,
        })
    }
}

/// Footprint `(width, depth)` left when `edges[vertical]` stands vertical.
/// `edges` is sorted longest first, so the footprint is too.
fn footprint(edges: &[f64; 3], vertical: usize) -> (f64, f64) {
    match vertical {
        0 => (edges[1], edges[2]),
        1 => (edges[0], edges[2]),
        _ => (edges[0], edges[1]),
    }
}
