//! Core types for obstacle detection on depth-sensor frames.
//!
//! This crate holds the numeric building blocks shared by the detector:
//! - [`CalibrationTable`]: range code to centimeters, saturated to a trusted window,
//! - [`PixelTransform`]: pixel + distance to ground-plane centimeters,
//! - [`DepthFrameView`] / [`AnalysisBand`]: the frame and the region searched in it.
//!
//! It knows nothing about segmentation or where frames come from.

mod calibration;
mod frame;
mod logger;
mod transform;

pub use calibration::{CalibrationError, CalibrationParams, CalibrationTable, RangeCode};
pub use frame::{AnalysisBand, DepthFrame, DepthFrameView, DistanceMap, FrameError};
pub use transform::{ElevationAxis, PixelTransform, TransformError, TransformParams};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init, init_with_level, LogSettings};
