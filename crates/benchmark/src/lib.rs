//! Command-line runner support for the guillotine packing engine.
//!
//! This crate provides:
//! - JSON cuboid lists ([`CuboidDataset`])
//! - Seeded random cuboid generation ([`RandomGenerator`])
//! - A single-run driver over the 3D strategies ([`run`])

mod dataset;
mod generator;
mod runner;

pub use dataset::{CuboidDataset, CuboidRecord, DatasetError};
pub use generator::{RandomGenerator, DEFAULT_MAX_EXTENT};
pub use runner::{run, Algorithm, RunReport};
