use depth_obstacles_core::{AnalysisBand, CalibrationError, FrameError, TransformError};

/// Errors returned by the obstacle detector.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DetectError {
    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("threshold `{name}` must be finite and non-negative (got {value})")]
    InvalidThreshold { name: &'static str, value: f32 },

    #[error("frame is {width}x{height}, sensor resolution is {expected_width}x{expected_height}")]
    FrameSizeMismatch {
        width: usize,
        height: usize,
        expected_width: usize,
        expected_height: usize,
    },

    #[error("analysis band {band:?} is empty")]
    EmptyBand { band: AnalysisBand },

    #[error("analysis band {band:?} exceeds the {width}x{height} frame")]
    BandOutOfBounds {
        band: AnalysisBand,
        width: usize,
        height: usize,
    },
}
