//! Obstacle detection pipeline.
//!
//! This module wires the stages together: frame and band checks, border
//! extraction, segmentation into runs, height filtering and conversion into
//! centimeter footprints.

mod error;
mod params;
mod pipeline;
mod result;

pub use error::DetectError;
pub use params::{ObstacleDetectorParams, SensorGeometry};
pub use pipeline::ObstacleDetector;
pub use result::ObstacleDetection;
