//! # Guillotine
//!
//! Guillotine-cut bin packing for rectangles and cuboids.
//!
//! This crate provides:
//! - **2D packing**: free-list and binary-tree rectangle packers
//! - **3D packing**: guillotine and shelf cuboid packers, with fixed or
//!   unbounded bin height and an insertion-order search
//!
//! ## Quick Start
//!
//! ```rust
//! use guillotine::d3::{Boundary3D, Cuboid, Packer3D};
//! use guillotine::{Config, Solver, Strategy};
//!
//! let items = vec![
//!     Cuboid::new(100.0, 50.0, 50.0),
//!     Cuboid::new(50.0, 50.0, 50.0),
//!     Cuboid::new(30.0, 30.0, 30.0),
//! ];
//! let packer = Packer3D::new(Config::default().with_strategy(Strategy::Shelf));
//! let result = packer.solve(&items, &Boundary3D::unbounded(100.0, 100.0)).unwrap();
//!
//! assert!(result.all_placed());
//! assert_eq!(result.filled_height, Some(50.0));
//! ```
//!
//! ## Feature Flags
//!
//! - `d2` (default): 2D rectangle packers
//! - `d3` (default): 3D cuboid packers
//! - `serde`: Serialization support

/// Core types, heuristics and traits.
pub use guillotine_core as core;

/// 2D rectangle packing.
#[cfg(feature = "d2")]
pub use guillotine_d2 as d2;

/// 3D cuboid packing.
#[cfg(feature = "d3")]
pub use guillotine_d3 as d3;

// Re-export commonly used types at root level
pub use guillotine_core::{
    Config, Error, FreeCuboidChoice, FreeRectChoice, Placement, Result, ShelfChoice,
    SolveResult, Solver, SplitHeuristic, Strategy,
};
