//! Binary-tree rectangle packer.
//!
//! Nodes live in an arena and refer to each other by index. A leaf is either
//! free or occupied; a split node owns two children produced by a single
//! guillotine cut of its region.

use crate::boundary::Boundary2D;
use crate::geometry::Rect;
use guillotine_core::geometry::{Boundary, Geometry};
use guillotine_core::{approx_eq, fits_within, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
enum NodeKind {
    Leaf { occupied: bool },
    Split { first: usize, second: usize },
}

#[derive(Debug, Clone, Copy)]
struct Node {
    region: Rect,
    kind: NodeKind,
}

/// Binary-tree packer. Each insertion descends to the first free leaf that
/// fits, occupies it on an exact match, and otherwise splits it along the
/// axis with more leftover.
#[derive(Debug, Clone)]
pub struct TreePacker2D {
    nodes: Vec<Node>,
    used: Vec<Rect>,
    allow_rotation: bool,
}

impl TreePacker2D {
    /// Creates a packer for a `width × height` bin. Rotation is allowed.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        Boundary2D::new(width, height).validate()?;
        Ok(Self {
            nodes: vec![Node {
                region: Rect::at(0.0, 0.0, width, height),
                kind: NodeKind::Leaf { occupied: false },
            }],
            used: Vec::new(),
            allow_rotation: true,
        })
    }

    /// Enables or disables trying the 90° rotated orientation.
    pub fn with_rotation(mut self, allow: bool) -> Self {
        self.allow_rotation = allow;
        self
    }

    /// Inserts a `width × height` rectangle.
    ///
    /// Returns an unplaced default rectangle when neither orientation fits.
    pub fn insert(&mut self, width: f64, height: f64) -> Result<Rect> {
        Rect::new(width, height).validate()?;

        let placed = match self.insert_at(0, width, height) {
            Some(rect) => Some(rect),
            None if self.allow_rotation && !approx_eq(width, height) => {
                self.insert_at(0, height, width)
            }
            None => None,
        };

        match placed {
            Some(rect) => {
                self.used.push(rect);
                Ok(rect)
            }
            None => Ok(Rect::default()),
        }
    }

    /// Rectangles placed so far, in placement order.
    pub fn used_rects(&self) -> &[Rect] {
        &self.used
    }

    /// Regions of all unoccupied leaves.
    pub fn free_leaves(&self) -> Vec<Rect> {
        self.nodes
            .iter()
            .filter(|node| node.kind == NodeKind::Leaf { occupied: false })
            .map(|node| node.region)
            .collect()
    }

    /// Number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn insert_at(&mut self, index: usize, width: f64, height: f64) -> Option<Rect> {
        let node = self.nodes[index];
        match node.kind {
            NodeKind::Split { first, second } => self
                .insert_at(first, width, height)
                .or_else(|| self.insert_at(second, width, height)),
            NodeKind::Leaf { occupied: true } => None,
            NodeKind::Leaf { occupied: false } => {
                let region = node.region;
                if !fits_within(width, region.width) || !fits_within(height, region.height) {
                    return None;
                }

                if approx_eq(width, region.width) && approx_eq(height, region.height) {
                    self.nodes[index].kind = NodeKind::Leaf { occupied: true };
                    return Some(Rect::placed_at(region.x, region.y, width, height));
                }

                let dw = region.width - width;
                let dh = region.height - height;
                let (first_region, second_region) = if dw > dh {
                    (
                        Rect::at(region.x, region.y, width, region.height),
                        Rect::at(region.x + width, region.y, dw, region.height),
                    )
                } else {
                    (
                        Rect::at(region.x, region.y, region.width, height),
                        Rect::at(region.x, region.y + height, region.width, dh),
                    )
                };

                let first = self.push_leaf(first_region);
                let second = self.push_leaf(second_region);
                self.nodes[index].kind = NodeKind::Split { first, second };

                log::debug!(
                    "tree node {} split into {:?} and {:?}",
                    index,
                    first_region,
                    second_region
                );

                self.insert_at(first, width, height)
            }
        }
    }

    fn push_leaf(&mut self, region: Rect) -> usize {
        self.nodes.push(Node {
            region,
            kind: NodeKind::Leaf { occupied: false },
        });
        self.nodes.len() - 1
    }
}
