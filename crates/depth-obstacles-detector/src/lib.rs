//! Obstacle detection on single depth-sensor frames.
//!
//! Pipeline, one frame at a time:
//! 1. Convert range codes to centimeters with a shared [`CalibrationTable`](depth_obstacles_core::CalibrationTable).
//! 2. Per band column, keep the qualifying sample nearest the preferred edge ([`extract_borders`]).
//! 3. Split the border into runs at pixel gaps and depth jumps ([`segment_runs`]).
//! 4. Keep the top elevation band of each run and measure its footprint ([`build_obstacles`]).
//!
//! ## Quickstart
//!
//! ```
//! use depth_obstacles_core::DepthFrame;
//! use depth_obstacles_detector::{ObstacleDetector, ObstacleDetectorParams};
//!
//! let detector = ObstacleDetector::new(ObstacleDetectorParams::default()).unwrap();
//! let frame = DepthFrame::filled(640, 480, 2047);
//! let obstacles = detector.detect(&frame.view()).unwrap();
//! assert!(obstacles.is_empty());
//! ```

mod border;
mod detector;
mod io;
mod obstacle;
mod segment;

pub use border::{extract_borders, BorderPoint, BorderScan, RowPreference};
pub use detector::{
    DetectError, ObstacleDetection, ObstacleDetector, ObstacleDetectorParams, SensorGeometry,
};
pub use io::{DetectIoError, ObstacleDetectConfig, ObstacleReport};
pub use obstacle::{build_obstacle, build_obstacles, top_band, GroundRect, Obstacle};
pub use segment::{segment_runs, ObstacleRun};
