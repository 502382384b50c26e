use std::sync::Arc;

use super::{DetectError, ObstacleDetection, ObstacleDetectorParams};
use crate::border::{extract_borders, BorderScan};
use crate::obstacle::{build_obstacles, Obstacle};
use crate::segment::segment_runs;
use depth_obstacles_core::{
    AnalysisBand, CalibrationTable, DepthFrameView, DistanceMap, PixelTransform,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Single-frame obstacle detector.
///
/// Holds only read-only state: the calibration table (shareable between
/// detectors), the pixel transform and the parameters. Detection never
/// mutates it, so the same frame always yields the same obstacles.
#[derive(Clone, Debug)]
pub struct ObstacleDetector {
    params: ObstacleDetectorParams,
    table: Arc<CalibrationTable>,
    transform: PixelTransform,
}

impl ObstacleDetector {
    /// Build the calibration table and validate the parameters.
    pub fn new(params: ObstacleDetectorParams) -> Result<Self, DetectError> {
        let table = CalibrationTable::new(params.calibration.clone())?;
        Self::with_table(params, Arc::new(table))
    }

    /// Reuse an existing calibration table.
    ///
    /// `params.calibration` is replaced by the table's own parameters.
    pub fn with_table(
        mut params: ObstacleDetectorParams,
        table: Arc<CalibrationTable>,
    ) -> Result<Self, DetectError> {
        params.check_thresholds()?;
        params.transform.validate()?;
        if params.calibration != *table.params() {
            log::debug!("detector calibration overridden by the shared table");
            params.calibration = table.params().clone();
        }
        let transform = PixelTransform::new(params.transform.clone());
        Ok(Self {
            params,
            table,
            transform,
        })
    }

    #[inline]
    pub fn params(&self) -> &ObstacleDetectorParams {
        &self.params
    }

    #[inline]
    pub fn table(&self) -> &Arc<CalibrationTable> {
        &self.table
    }

    #[inline]
    pub fn transform(&self) -> &PixelTransform {
        &self.transform
    }

    /// Detect obstacles in the configured band.
    pub fn detect(&self, frame: &DepthFrameView<'_>) -> Result<Vec<Obstacle>, DetectError> {
        self.detect_in_band(frame, &self.params.band, self.params.retain_raw)
    }

    /// Detect obstacles in `band`, optionally keeping the raw border points.
    pub fn detect_in_band(
        &self,
        frame: &DepthFrameView<'_>,
        band: &AnalysisBand,
        retain_raw: bool,
    ) -> Result<Vec<Obstacle>, DetectError> {
        Ok(self.run(frame, band, retain_raw)?.obstacles)
    }

    /// Detect obstacles in `band` and return the intermediate stages too.
    pub fn detect_with_report(
        &self,
        frame: &DepthFrameView<'_>,
        band: &AnalysisBand,
    ) -> Result<ObstacleDetection, DetectError> {
        self.run(frame, band, self.params.retain_raw)
    }

    /// Calibrated distance of every pixel, for display.
    pub fn distance_map(&self, frame: &DepthFrameView<'_>) -> Result<DistanceMap, DetectError> {
        self.check_frame(frame)?;
        Ok(self.table.distance_map(frame))
    }

    /// Usage checks: buffer length, sensor resolution.
    fn check_frame(&self, frame: &DepthFrameView<'_>) -> Result<(), DetectError> {
        DepthFrameView::new(frame.width, frame.height, frame.data)?;
        let sensor = self.params.sensor;
        if frame.width != sensor.width || frame.height != sensor.height {
            return Err(DetectError::FrameSizeMismatch {
                width: frame.width,
                height: frame.height,
                expected_width: sensor.width,
                expected_height: sensor.height,
            });
        }
        Ok(())
    }

    fn check_band(&self, frame: &DepthFrameView<'_>, band: &AnalysisBand) -> Result<(), DetectError> {
        if band.is_empty() {
            return Err(DetectError::EmptyBand { band: *band });
        }
        if !frame.contains(band) {
            return Err(DetectError::BandOutOfBounds {
                band: *band,
                width: frame.width,
                height: frame.height,
            });
        }
        Ok(())
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, frame),
            fields(width = frame.width, height = frame.height)
        )
    )]
    fn run(
        &self,
        frame: &DepthFrameView<'_>,
        band: &AnalysisBand,
        retain_raw: bool,
    ) -> Result<ObstacleDetection, DetectError> {
        self.check_frame(frame)?;
        self.check_band(frame, band)?;

        let scan = BorderScan {
            table: &self.table,
            max_depth: self.params.max_depth,
            rows: self.params.row_preference,
        };
        let borders = extract_borders(frame, band, &scan);
        let runs = segment_runs(&borders, self.params.max_z_change);
        let mut obstacles = build_obstacles(
            &runs,
            &self.transform,
            self.params.max_border_height,
            retain_raw,
        );

        if let Some(roi) = &self.params.ground_roi {
            let before = obstacles.len();
            obstacles.retain(|o| roi.intersects(o));
            if obstacles.len() != before {
                log::debug!(
                    "ground roi dropped {} of {} obstacles",
                    before - obstacles.len(),
                    before
                );
            }
        }

        log::debug!(
            "{} border points -> {} runs -> {} obstacles",
            borders.len(),
            runs.len(),
            obstacles.len()
        );

        Ok(ObstacleDetection {
            band: *band,
            borders,
            runs,
            obstacles,
        })
    }
}
