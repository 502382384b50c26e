use std::path::Path;
use std::sync::Arc;

use crate::{core, detector, source};
use crate::source::{FallbackSource, FrameOrigin, FrameSource};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum DepthObstaclesError {
    #[error(transparent)]
    Frame(#[from] core::FrameError),

    #[error(transparent)]
    Calibration(#[from] core::CalibrationError),

    #[error(transparent)]
    Detect(#[from] detector::DetectError),

    #[error(transparent)]
    Source(#[from] source::SourceError),

    #[error(transparent)]
    Io(#[from] detector::DetectIoError),
}

/// Obstacles found in one acquired frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameObstacles {
    pub origin: FrameOrigin,
    pub obstacles: Vec<detector::Obstacle>,
}

/// Load a JSON detector config and build the detector it describes.
///
/// The calibration table is built first, so a malformed calibration is
/// reported as [`DepthObstaclesError::Calibration`].
pub fn load_detector(
    path: impl AsRef<Path>,
) -> Result<detector::ObstacleDetector, DepthObstaclesError> {
    let cfg = detector::ObstacleDetectConfig::load_json(path)?;
    let table = core::CalibrationTable::new(cfg.detector.calibration.clone())?;
    Ok(detector::ObstacleDetector::with_table(
        cfg.detector,
        Arc::new(table),
    )?)
}

/// Build an owned frame from a raw row-major range-code buffer.
pub fn frame_from_slice(
    width: usize,
    height: usize,
    codes: &[u16],
) -> Result<core::DepthFrame, DepthObstaclesError> {
    // Validate before copying.
    core::DepthFrameView::new(width, height, codes)?;
    Ok(core::DepthFrame::new(width, height, codes.to_vec())?)
}

/// Run an existing detector on a raw buffer without copying it.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(detector, codes))
)]
pub fn detect_with(
    detector: &detector::ObstacleDetector,
    width: usize,
    height: usize,
    codes: &[u16],
) -> Result<Vec<detector::Obstacle>, DepthObstaclesError> {
    let view = core::DepthFrameView::new(width, height, codes)?;
    Ok(detector.detect(&view)?)
}

/// One-shot detection: build a detector from `params` and run it on a raw buffer.
///
/// Builds the calibration table on every call; keep an
/// [`ObstacleDetector`](detector::ObstacleDetector) around for repeated frames.
pub fn detect_from_u16(
    width: usize,
    height: usize,
    codes: &[u16],
    params: detector::ObstacleDetectorParams,
) -> Result<Vec<detector::Obstacle>, DepthObstaclesError> {
    let detector = detector::ObstacleDetector::new(params)?;
    detect_with(&detector, width, height, codes)
}

/// Grab the next frame from `source` and detect obstacles in it.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip_all, fields(source = source.describe()))
)]
pub fn detect_next<S: FrameSource + ?Sized>(
    source: &mut S,
    detector: &detector::ObstacleDetector,
) -> Result<Vec<detector::Obstacle>, DepthObstaclesError> {
    let frame = source.grab()?;
    Ok(detector.detect(&frame.view())?)
}

/// Like [`detect_next`], but also reports whether the frame came from the
/// live device or the recorded sample.
pub fn detect_next_with_origin<L: FrameSource>(
    source: &mut FallbackSource<L>,
    detector: &detector::ObstacleDetector,
) -> Result<FrameObstacles, DepthObstaclesError> {
    let acquired = source.acquire()?;
    let obstacles = detector.detect(&acquired.frame.view())?;
    if acquired.origin == FrameOrigin::Recorded {
        log::debug!("{} obstacles from recorded frame", obstacles.len());
    }
    Ok(FrameObstacles {
        origin: acquired.origin,
        obstacles,
    })
}
