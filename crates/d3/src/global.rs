//! Insertion-order search for the 3D guillotine packer.
//!
//! Both searches place items with [`FreeCuboidChoice::MinHeight`] and rank a
//! finished layout by how many items failed to fit, then by filled height.
//! Every candidate order is evaluated on a clone, so the live packer only
//! ever sees the winning placements.

use crate::geometry::Cuboid;
use crate::guillotine::Guillotine3D;
use guillotine_core::geometry::Geometry;
use guillotine_core::solver::MAX_PERMUTATION_ITEMS_LIMIT;
use guillotine_core::{Error, FreeCuboidChoice, Result, SplitHeuristic};
use std::cmp::Ordering;

/// Outcome of an order search.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalOutcome {
    /// Placed cuboid per input item, aligned with the input slice. Items that
    /// did not fit keep `placed == false`.
    pub cuboids: Vec<Cuboid>,

    /// Input indices in the order they were committed.
    pub order: Vec<usize>,

    /// Filled height after the search, `None` if nothing was placed.
    pub filled_height: Option<f64>,
}

impl GlobalOutcome {
    fn new(len: usize) -> Self {
        Self {
            cuboids: vec![Cuboid::default(); len],
            order: Vec::with_capacity(len),
            filled_height: None,
        }
    }

    /// Returns the number of placed items.
    pub fn placed_count(&self) -> usize {
        self.cuboids.iter().filter(|c| c.is_placed()).count()
    }

    /// Returns the input indices of items that were not placed.
    pub fn unplaced(&self) -> Vec<usize> {
        self.cuboids
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_placed())
            .map(|(i, _)| i)
            .collect()
    }
}

/// Quality of a finished trial layout; lower is better.
#[derive(Debug, Clone, Copy)]
struct LayoutScore {
    failures: usize,
    height: f64,
}

impl LayoutScore {
    fn of(packer: &Guillotine3D, failures: usize) -> Self {
        Self {
            failures,
            height: packer.filled_bin_height().unwrap_or(0.0),
        }
    }

    fn better_than(&self, other: &Self) -> bool {
        match self.failures.cmp(&other.failures) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => self.height < other.height,
        }
    }
}

/// A lookahead candidate: which remaining item goes next, and the layout
/// that results from packing the rest after it.
#[derive(Debug, Clone, Copy)]
struct ScoredCandidate {
    position: usize,
    score: LayoutScore,
}

impl Guillotine3D {
    /// Places the single item that leads to the best completed layout.
    ///
    /// Every item is tried first on a clone of this packer, followed by all
    /// other items in their given order. The item whose trial scores best
    /// (fewest failures, then lowest filled height, then lowest index) is
    /// committed here. Returns its index in `items` and its placement, or
    /// `None` if no item fits.
    pub fn insert_best_global(
        &mut self,
        items: &[Cuboid],
        split: SplitHeuristic,
    ) -> Result<Option<(usize, Cuboid)>> {
        for item in items {
            item.validate()?;
        }

        let Some(index) = self.best_next(items, split) else {
            return Ok(None);
        };

        let placed = self.insert(&items[index], FreeCuboidChoice::MinHeight, split)?;
        assert!(placed.is_placed(), "lookahead winner #{index} no longer fits");
        Ok(Some((index, placed)))
    }

    /// Repeats [`insert_best_global`] until every item is placed or none of
    /// the remaining items fits.
    ///
    /// Runs O(n²) trial packs of up to n items each.
    ///
    /// [`insert_best_global`]: Guillotine3D::insert_best_global
    pub fn pack_best_global(
        &mut self,
        items: &[Cuboid],
        split: SplitHeuristic,
    ) -> Result<GlobalOutcome> {
        for item in items {
            item.validate()?;
        }

        let mut outcome = GlobalOutcome::new(items.len());
        let mut remaining: Vec<usize> = (0..items.len()).collect();

        while !remaining.is_empty() {
            let pending: Vec<Cuboid> = remaining.iter().map(|&i| items[i]).collect();
            let Some((position, placed)) = self.insert_best_global(&pending, split)? else {
                break;
            };

            let index = remaining.remove(position);
            log::debug!(
                "lookahead committed item #{} at height {}",
                index,
                placed.y
            );
            outcome.cuboids[index] = placed;
            outcome.order.push(index);
        }

        for index in &remaining {
            log::warn!("cuboid #{} does not fit in the bin", index);
        }

        outcome.filled_height = self.filled_bin_height();
        Ok(outcome)
    }

    /// Tries every insertion order and commits the best one.
    ///
    /// Orders are enumerated lexicographically; the first order reaching the
    /// best score wins. Fails with [`Error::ConfigError`] when `items` holds
    /// more than `max_items` entries, or `max_items` exceeds the hard limit.
    pub fn pack_exhaustive(
        &mut self,
        items: &[Cuboid],
        split: SplitHeuristic,
        max_items: usize,
    ) -> Result<GlobalOutcome> {
        if max_items > MAX_PERMUTATION_ITEMS_LIMIT {
            return Err(Error::ConfigError(format!(
                "exhaustive search limit {} exceeds the maximum of {}",
                max_items, MAX_PERMUTATION_ITEMS_LIMIT
            )));
        }
        if items.len() > max_items {
            return Err(Error::ConfigError(format!(
                "exhaustive search accepts at most {} items, got {}",
                max_items,
                items.len()
            )));
        }
        for item in items {
            item.validate()?;
        }

        let mut order: Vec<usize> = (0..items.len()).collect();
        let mut best: Option<(LayoutScore, Vec<usize>)> = None;
        let mut evaluated = 0usize;

        loop {
            let score = self.trial(items, &order, split);
            evaluated += 1;
            if best
                .as_ref()
                .map_or(true, |(best_score, _)| score.better_than(best_score))
            {
                best = Some((score, order.clone()));
            }
            if !next_permutation(&mut order) {
                break;
            }
        }

        let best_order = best.map(|(_, order)| order).unwrap_or_default();
        log::debug!(
            "exhaustive search evaluated {} orders, best {:?}",
            evaluated,
            best_order
        );

        let mut outcome = GlobalOutcome::new(items.len());
        for index in best_order {
            let placed = self.insert(&items[index], FreeCuboidChoice::MinHeight, split)?;
            if placed.is_placed() {
                outcome.cuboids[index] = placed;
                outcome.order.push(index);
            } else {
                log::warn!("cuboid #{} does not fit in the bin", index);
            }
        }
        outcome.filled_height = self.filled_bin_height();
        Ok(outcome)
    }

    /// Picks the position in `items` of the next item to commit.
    fn best_next(&self, items: &[Cuboid], split: SplitHeuristic) -> Option<usize> {
        let mut best: Option<ScoredCandidate> = None;

        for first in 0..items.len() {
            let mut trial = self.clone();
            if !trial.place_min_height(&items[first], split) {
                continue;
            }

            let failures = items
                .iter()
                .enumerate()
                .filter(|&(i, item)| i != first && !trial.place_min_height(item, split))
                .count();

            let candidate = ScoredCandidate {
                position: first,
                score: LayoutScore::of(&trial, failures),
            };
            if best.map_or(true, |b| candidate.score.better_than(&b.score)) {
                best = Some(candidate);
            }
        }

        best.map(|candidate| candidate.position)
    }

    /// Packs `items` in `order` into a clone and scores the result.
    fn trial(&self, items: &[Cuboid], order: &[usize], split: SplitHeuristic) -> LayoutScore {
        let mut trial = self.clone();
        let failures = order
            .iter()
            .filter(|&&i| !trial.place_min_height(&items[i], split))
            .count();
        LayoutScore::of(&trial, failures)
    }

    /// Inserts an already validated item with min-height, returning whether
    /// it was placed.
    fn place_min_height(&mut self, item: &Cuboid, split: SplitHeuristic) -> bool {
        self.place_validated(item, FreeCuboidChoice::MinHeight, split)
            .is_some()
    }
}

/// Rearranges `values` into the next lexicographic permutation.
///
/// Returns false, leaving `values` sorted ascending, once the last
/// permutation has been passed.
pub fn next_permutation<T: Ord>(values: &mut [T]) -> bool {
    if values.len() < 2 {
        return false;
    }

    let mut i = values.len() - 1;
    while i > 0 && values[i - 1] >= values[i] {
        i -= 1;
    }
    if i == 0 {
        values.reverse();
        return false;
    }

    let mut j = values.len() - 1;
    while values[j] <= values[i - 1] {
        j -= 1;
    }
    values.swap(i - 1, j);
    values[i..].reverse();
    true
}
