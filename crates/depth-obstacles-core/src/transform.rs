//! Pixel + distance to ground-plane coordinates.
//!
//! Both axes are linear in the measured distance: a pixel offset from the
//! image center, scaled by `distance * coeff`. The vertical axis also
//! corrects for the horizon row and for the height the sensor is mounted at.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Which way image rows run relative to physical elevation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElevationAxis {
    /// Row 0 is the highest point in the scene (upright sensor).
    #[default]
    Up,
    /// Row 0 is the lowest point (sensor mounted upside down).
    Down,
}

/// Fixed constants of the pixel-to-world mapping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformParams {
    /// Image-center column (px).
    pub center_col: f32,
    /// Image-center row (px), counted along `elevation_axis`.
    pub center_row: f32,
    /// Frame height (px) used to flip rows for `ElevationAxis::Up`.
    pub image_height: f32,
    /// Measured per-pixel, per-centimeter coefficient.
    pub coeff: f32,
    /// Rows between the image center and the horizon.
    pub horizon_offset: f32,
    /// Height of the sensor above the floor (cm).
    pub mount_height: f32,
    pub elevation_axis: ElevationAxis,
}

impl Default for TransformParams {
    fn default() -> Self {
        let coeff = 0.1734;
        Self {
            center_col: 320.0,
            center_row: 240.0,
            image_height: 480.0,
            coeff,
            horizon_offset: 9.0 / coeff / 200.0,
            mount_height: 6.0,
            elevation_axis: ElevationAxis::Up,
        }
    }
}

impl TransformParams {
    /// Every constant must be finite and `coeff` non-zero.
    pub fn validate(&self) -> Result<(), TransformError> {
        for (name, value) in [
            ("center_col", self.center_col),
            ("center_row", self.center_row),
            ("image_height", self.image_height),
            ("coeff", self.coeff),
            ("horizon_offset", self.horizon_offset),
            ("mount_height", self.mount_height),
        ] {
            if !value.is_finite() {
                return Err(TransformError::InvalidParameter { name, value });
            }
        }
        if self.coeff == 0.0 {
            return Err(TransformError::InvalidParameter {
                name: "coeff",
                value: self.coeff,
            });
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("transform parameter `{name}` is not usable ({value})")]
    InvalidParameter { name: &'static str, value: f32 },
}

/// Pure pixel-to-centimeter mapping.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelTransform {
    params: TransformParams,
}

impl PixelTransform {
    pub fn new(params: TransformParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &TransformParams {
        &self.params
    }

    /// Lateral offset (cm) of pixel column `px` at distance `z` (cm).
    ///
    /// Positive to the left of the image center.
    #[inline]
    pub fn x_to_cm(&self, px: f32, z: f32) -> f32 {
        (self.params.center_col - px) * z * self.params.coeff
    }

    /// Elevation (cm) above the floor of pixel row `py` at distance `z` (cm).
    #[inline]
    pub fn y_to_cm(&self, py: f32, z: f32) -> f32 {
        let p = &self.params;
        let rows = match p.elevation_axis {
            ElevationAxis::Up => p.image_height - py,
            ElevationAxis::Down => py,
        };
        (rows - p.center_row - p.horizon_offset) * z * p.coeff + p.mount_height
    }

    /// `(lateral, elevation, depth)` in centimeters.
    #[inline]
    pub fn to_world(&self, px: f32, py: f32, z: f32) -> Point3<f32> {
        Point3::new(self.x_to_cm(px, z), self.y_to_cm(py, z), z)
    }
}

impl Default for PixelTransform {
    fn default() -> Self {
        Self::new(TransformParams::default())
    }
}
