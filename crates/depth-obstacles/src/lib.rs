//! High-level facade crate for the `depth-obstacles-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the underlying crates
//! - end-to-end helpers that take a raw range-code buffer or a [`source::FrameSource`]
//!   and return obstacles
//!
//! ## Quickstart
//!
//! ```
//! use depth_obstacles::detect;
//! use depth_obstacles::detector::ObstacleDetectorParams;
//!
//! # fn main() -> Result<(), depth_obstacles::detect::DepthObstaclesError> {
//! let codes = vec![2047u16; 640 * 480];
//! let obstacles = detect::detect_from_u16(640, 480, &codes, ObstacleDetectorParams::default())?;
//! assert!(obstacles.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `depth_obstacles::core`: calibration table, frames, pixel transform, logger.
//! - `depth_obstacles::detector`: border extraction, segmentation, obstacle building.
//! - `depth_obstacles::source`: live and recorded frame sources.
//! - `depth_obstacles::detect`: end-to-end helpers.

pub use depth_obstacles_core as core;
pub use depth_obstacles_detector as detector;
pub use depth_obstacles_source as source;

pub use depth_obstacles_core::{AnalysisBand, CalibrationTable, DepthFrame, DepthFrameView};
pub use depth_obstacles_detector::{Obstacle, ObstacleDetector, ObstacleDetectorParams};

pub mod detect;
