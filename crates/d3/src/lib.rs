//! # Guillotine 3D
//!
//! Cuboid packing for the guillotine packing engine.
//!
//! Two packers are provided:
//!
//! - [`Guillotine3D`]: splits free space into cuboids with guillotine cuts.
//!   Works in a fixed-height bin or, with [`Boundary3D::unbounded`], in one
//!   that grows upward. Also offers a lookahead order search
//!   ([`Guillotine3D::pack_best_global`]) and an exhaustive one
//!   ([`Guillotine3D::pack_exhaustive`]) for small inputs.
//! - [`ShelfPacker`]: stacks horizontal [`Shelf`]s, each packing item
//!   footprints with a 2D guillotine packer.
//!
//! [`Packer3D`] wraps both behind the [`Solver`] trait.
//!
//! ```rust
//! use guillotine_d3::{Boundary3D, Cuboid, ShelfChoice, ShelfPacker};
//!
//! let mut packer = ShelfPacker::new(Boundary3D::unbounded(100.0, 100.0)).unwrap();
//! for item in [
//!     Cuboid::new(100.0, 50.0, 50.0),
//!     Cuboid::new(50.0, 50.0, 50.0),
//!     Cuboid::new(30.0, 30.0, 30.0),
//! ] {
//!     assert!(packer.insert(&item, ShelfChoice::FirstFit).unwrap().is_placed());
//! }
//! assert_eq!(packer.filled_bin_height(), Some(50.0));
//! ```

pub mod boundary;
pub mod geometry;
pub mod global;
pub mod guillotine;
pub mod packer;
pub mod shelf;

// Re-exports
pub use boundary::Boundary3D;
pub use geometry::Cuboid;
pub use global::{next_permutation, GlobalOutcome};
pub use guillotine::Guillotine3D;
pub use packer::Packer3D;
pub use shelf::{Shelf, ShelfPacker};
pub use guillotine_core::{
    Config, Error, FreeCuboidChoice, FreeRectChoice, Placement, Result, ShelfChoice,
    SolveResult, Solver, SplitHeuristic, Strategy,
};
