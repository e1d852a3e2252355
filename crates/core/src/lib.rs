//! # Guillotine Core
//!
//! Core types, heuristics and traits for the guillotine packing engine.
//!
//! This crate provides the foundational types that are shared between the
//! 2D rectangle packers and the 3D cuboid packers.
//!
//! ## Core Components
//!
//! - **Heuristics**: [`FreeRectChoice`], [`FreeCuboidChoice`], [`SplitHeuristic`], [`ShelfChoice`]
//! - **Geometry traits**: [`Geometry`], [`Boundary`] and the shared [`EPSILON`] tolerance
//! - **Bounds**: [`AABB2D`], [`AABB3D`] for overlap and containment checks
//! - **Solver trait**: [`Solver`] with [`Config`] and [`Strategy`]
//!
//! ## Configuration
//!
//! ```rust
//! use guillotine_core::{Config, ShelfChoice, Strategy};
//!
//! let config = Config::new()
//!     .with_strategy(Strategy::Shelf)
//!     .with_shelf_choice(ShelfChoice::FirstFit);
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod bounds;
pub mod error;
pub mod geometry;
pub mod heuristic;
pub mod placement;
pub mod result;
pub mod solver;

// Re-exports
pub use bounds::{AABB2D, AABB3D};
pub use error::{check_extent, Error, Result};
pub use geometry::{approx_eq, fits_within, is_degenerate, Boundary, Geometry, EPSILON};
pub use heuristic::{FreeCuboidChoice, FreeRectChoice, ShelfChoice, SplitHeuristic};
pub use placement::{Placement, PlacementStats};
pub use result::{SolveResult, SolveSummary};
pub use solver::{Config, Solver, Strategy};
