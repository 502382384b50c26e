//! Range-code to distance lookup table.
//!
//! The sensor reports a quantized range code per pixel. A nonlinear formula
//! `tan(code / k1 + k2) * k3 + k4` turns it into centimeters; the table
//! evaluates that formula once per code and saturates everything outside the
//! trusted distance window to a sentinel.

use crate::frame::{DepthFrameView, DistanceMap};
use serde::{Deserialize, Serialize};

/// Raw quantized sensor output.
pub type RangeCode = u16;

/// Calibration formula coefficients and the trusted distance window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationParams {
    /// Size of the range-code domain; codes `0..code_count` get a table entry.
    pub code_count: usize,
    pub k1: f32,
    pub k2: f32,
    pub k3: f32,
    pub k4: f32,
    /// Nearest trusted distance (cm).
    pub min_distance: f32,
    /// Farthest trusted distance (cm).
    pub max_distance: f32,
    /// Sentinel written for every code outside `[min_distance, max_distance]`.
    pub undefined_distance: f32,
    /// Codes the sensor uses for "no return" and saturation.
    pub reserved_codes: Vec<RangeCode>,
}

impl Default for CalibrationParams {
    fn default() -> Self {
        Self {
            code_count: 2048,
            k1: 1024.0,
            k2: 0.5,
            k3: 33.825,
            k4: 5.7,
            // Kinect v1 is only reliable between 80 cm and 4 m.
            min_distance: 80.0,
            max_distance: 400.0,
            undefined_distance: 2000.0,
            reserved_codes: vec![0, 2047],
        }
    }
}

impl CalibrationParams {
    /// Evaluate the raw calibration formula for one code, without clamping.
    #[inline]
    pub fn formula(&self, code: RangeCode) -> f32 {
        (code as f32 / self.k1 + self.k2).tan() * self.k3 + self.k4
    }

    /// Whether `distance` lies inside the trusted window.
    #[inline]
    pub fn in_window(&self, distance: f32) -> bool {
        distance >= self.min_distance && distance <= self.max_distance
    }

    fn validate(&self) -> Result<(), CalibrationError> {
        if self.code_count == 0 || self.code_count > RangeCode::MAX as usize + 1 {
            return Err(CalibrationError::InvalidDomain {
                code_count: self.code_count,
            });
        }
        for (name, value) in [
            ("k1", self.k1),
            ("k2", self.k2),
            ("k3", self.k3),
            ("k4", self.k4),
            ("min_distance", self.min_distance),
            ("max_distance", self.max_distance),
            ("undefined_distance", self.undefined_distance),
        ] {
            if !value.is_finite() {
                return Err(CalibrationError::NonFiniteParameter { name, value });
            }
        }
        if self.k1 == 0.0 {
            return Err(CalibrationError::NonFiniteParameter {
                name: "k1",
                value: self.k1,
            });
        }
        if self.min_distance >= self.max_distance {
            return Err(CalibrationError::EmptyWindow {
                min: self.min_distance,
                max: self.max_distance,
            });
        }
        if self.in_window(self.undefined_distance) {
            return Err(CalibrationError::SentinelInWindow {
                sentinel: self.undefined_distance,
            });
        }
        Ok(())
    }
}

/// Malformed calibration configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    #[error("invalid range-code domain size {code_count}")]
    InvalidDomain { code_count: usize },

    #[error("calibration parameter `{name}` is not usable ({value})")]
    NonFiniteParameter { name: &'static str, value: f32 },

    #[error("empty distance window [{min}, {max}]")]
    EmptyWindow { min: f32, max: f32 },

    #[error("undefined-distance sentinel {sentinel} lies inside the distance window")]
    SentinelInWindow { sentinel: f32 },

    #[error("calibration formula is not finite for code {code}")]
    NonFiniteDistance { code: RangeCode },

    #[error("calibrated distance decreases at code {code} ({previous} -> {distance})")]
    NonMonotonic {
        code: RangeCode,
        previous: f32,
        distance: f32,
    },
}

/// Precomputed `RangeCode -> distance_cm` mapping.
#[derive(Clone, Debug)]
pub struct CalibrationTable {
    params: CalibrationParams,
    distances: Vec<f32>,
}

impl CalibrationTable {
    /// Evaluate the formula for the whole code domain and saturate it.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip_all, fields(code_count = params.code_count))
    )]
    pub fn new(params: CalibrationParams) -> Result<Self, CalibrationError> {
        params.validate()?;

        let mut distances = Vec::with_capacity(params.code_count);
        let mut previous: Option<f32> = None;
        for code in 0..params.code_count {
            let code = code as RangeCode;
            let raw = params.formula(code);
            if !raw.is_finite() {
                return Err(CalibrationError::NonFiniteDistance { code });
            }

            let distance = if params.reserved_codes.contains(&code) || !params.in_window(raw) {
                params.undefined_distance
            } else {
                if let Some(prev) = previous {
                    if raw < prev {
                        return Err(CalibrationError::NonMonotonic {
                            code,
                            previous: prev,
                            distance: raw,
                        });
                    }
                }
                previous = Some(raw);
                raw
            };
            distances.push(distance);
        }

        let defined = distances
            .iter()
            .filter(|&&d| d != params.undefined_distance)
            .count();
        log::debug!(
            "calibration table: {} codes, {} inside [{}, {}] cm",
            distances.len(),
            defined,
            params.min_distance,
            params.max_distance
        );

        Ok(Self { params, distances })
    }

    /// Parameters the table was built from.
    #[inline]
    pub fn params(&self) -> &CalibrationParams {
        &self.params
    }

    /// Number of codes covered by the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// The sentinel used for out-of-window codes.
    #[inline]
    pub fn undefined_distance(&self) -> f32 {
        self.params.undefined_distance
    }

    /// Distance in centimeters for `code`.
    ///
    /// Codes past the end of the domain read as undefined.
    #[inline]
    pub fn distance_cm(&self, code: RangeCode) -> f32 {
        self.distances
            .get(code as usize)
            .copied()
            .unwrap_or(self.params.undefined_distance)
    }

    /// `false` for the sentinel.
    #[inline]
    pub fn is_defined(&self, distance: f32) -> bool {
        distance != self.params.undefined_distance
    }

    /// Raw table entries, indexed by code.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.distances
    }

    /// Convert every pixel of a frame into centimeters.
    pub fn distance_map(&self, frame: &DepthFrameView<'_>) -> DistanceMap {
        DistanceMap {
            width: frame.width,
            height: frame.height,
            data: frame.data.iter().map(|&c| self.distance_cm(c)).collect(),
        }
    }
}
