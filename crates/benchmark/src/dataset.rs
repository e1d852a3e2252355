//! Cuboid lists persisted as JSON.
//!
//! The format is a single object holding a `cuboids` array:
//!
//! ```json
//! {"cuboids": [{"width": 10, "height": 5, "depth": 8, "x": 0, "y": 0, "z": 0}]}
//! ```
//!
//! Positions are optional on input and default to zero.

use guillotine_core::geometry::Geometry;
use guillotine_d3::Cuboid;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or saving datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to access file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid dataset format: {0}")]
    InvalidFormat(String),
}

/// One cuboid as stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CuboidRecord {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl From<&Cuboid> for CuboidRecord {
    fn from(cuboid: &Cuboid) -> Self {
        Self {
            width: cuboid.width,
            height: cuboid.height,
            depth: cuboid.depth,
            x: cuboid.x,
            y: cuboid.y,
            z: cuboid.z,
        }
    }
}

impl CuboidRecord {
    /// Returns an unplaced item with this record's extents.
    pub fn to_item(&self) -> Cuboid {
        Cuboid::new(self.width, self.height, self.depth)
    }
}

/// A list of cuboids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CuboidDataset {
    pub cuboids: Vec<CuboidRecord>,
}

impl CuboidDataset {
    /// Builds a dataset from cuboids, keeping their positions.
    pub fn from_cuboids(cuboids: &[Cuboid]) -> Self {
        Self {
            cuboids: cuboids.iter().map(CuboidRecord::from).collect(),
        }
    }

    /// Parses a dataset from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses a dataset from a JSON string and checks every extent.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let dataset: Self = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Serializes the dataset as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, DatasetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the dataset to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Returns the records as unplaced items, in file order.
    pub fn items(&self) -> Vec<Cuboid> {
        self.cuboids.iter().map(CuboidRecord::to_item).collect()
    }

    /// Total volume of all records.
    pub fn total_volume(&self) -> f64 {
        self.cuboids
            .iter()
            .map(|c| c.width * c.height * c.depth)
            .sum()
    }

    fn validate(&self) -> Result<(), DatasetError> {
        for (index, record) in self.cuboids.iter().enumerate() {
            record
                .to_item()
                .validate()
                .map_err(|e| DatasetError::InvalidFormat(format!("cuboid #{}: {}", index, e)))?;
        }
        Ok(())
    }
}
