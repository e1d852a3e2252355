//! # Guillotine 2D
//!
//! Rectangle packing for the guillotine packing engine.
//!
//! This crate provides [`Guillotine2D`], a free-list packer that cuts each
//! consumed free rectangle with a single straight cut, and [`TreePacker2D`],
//! a binary-tree alternative. Both place items at the bottom-left corner of
//! the chosen free region and may rotate items by 90°.
//!
//! ```rust
//! use guillotine_core::{FreeRectChoice, SplitHeuristic};
//! use guillotine_d2::{Guillotine2D, Rect};
//!
//! let mut packer = Guillotine2D::new(200.0, 200.0).unwrap();
//! let placed = packer
//!     .insert(
//!         &Rect::new(100.0, 100.0),
//!         FreeRectChoice::BestAreaFit,
//!         SplitHeuristic::ShorterLeftoverAxis,
//!     )
//!     .unwrap();
//! assert!(placed.is_placed());
//! assert_eq!((placed.x, placed.y), (0.0, 0.0));
//! ```

pub mod boundary;
pub mod geometry;
pub mod guillotine;
pub mod tree;

// Re-exports
pub use boundary::Boundary2D;
pub use geometry::Rect;
pub use guillotine::Guillotine2D;
pub use tree::TreePacker2D;
pub use guillotine_core::{Error, FreeRectChoice, Result, SplitHeuristic};
