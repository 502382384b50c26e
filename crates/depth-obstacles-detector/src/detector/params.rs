use crate::border::RowPreference;
use crate::obstacle::GroundRect;
use depth_obstacles_core::{AnalysisBand, CalibrationParams, TransformParams};
use serde::{Deserialize, Serialize};

/// Native resolution frames must have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorGeometry {
    pub width: usize,
    pub height: usize,
}

impl Default for SensorGeometry {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// Configuration bundle for the obstacle detector.
///
/// Every field has a default tuned for a Kinect v1 looking at the floor of a
/// play area, so a JSON config only needs the values it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleDetectorParams {
    pub sensor: SensorGeometry,
    pub calibration: CalibrationParams,
    pub transform: TransformParams,
    /// Region searched when no band is given per call.
    pub band: AnalysisBand,
    /// Samples farther than this (cm) are background.
    pub max_depth: f32,
    /// Distance step (cm) between neighbouring columns that separates two objects.
    pub max_z_change: f32,
    /// Elevation band (cm) below the top of an object that is kept.
    pub max_border_height: f32,
    pub row_preference: RowPreference,
    /// Attach the retained border points to each obstacle.
    pub retain_raw: bool,
    /// Drop obstacles whose footprint misses this top-view rectangle.
    pub ground_roi: Option<GroundRect>,
}

impl Default for ObstacleDetectorParams {
    fn default() -> Self {
        Self {
            sensor: SensorGeometry::default(),
            calibration: CalibrationParams::default(),
            transform: TransformParams::default(),
            band: AnalysisBand::default(),
            max_depth: 300.0,
            max_z_change: 10.0,
            max_border_height: 10.0,
            row_preference: RowPreference::Bottom,
            retain_raw: false,
            ground_roi: None,
        }
    }
}

impl ObstacleDetectorParams {
    /// Reject non-finite or negative thresholds.
    pub(crate) fn check_thresholds(&self) -> Result<(), super::DetectError> {
        for (name, value) in [
            ("max_depth", self.max_depth),
            ("max_z_change", self.max_z_change),
            ("max_border_height", self.max_border_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(super::DetectError::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }
}
