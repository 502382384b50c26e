//! JSON configuration and report helpers for obstacle detection.

use crate::{
    DetectError, Obstacle, ObstacleDetection, ObstacleDetector, ObstacleDetectorParams,
};
use depth_obstacles_core::AnalysisBand;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum DetectIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Detector configuration as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleDetectConfig {
    #[serde(default)]
    pub detector: ObstacleDetectorParams,
    #[serde(default)]
    pub output_path: Option<String>,
}

impl ObstacleDetectConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, DetectIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), DetectIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("obstacle_report.json"))
    }

    /// Build a detector from this config.
    pub fn build_detector(&self) -> Result<ObstacleDetector, DetectError> {
        ObstacleDetector::new(self.detector.clone())
    }
}

/// Summary of one detection, suitable for dumping next to a recorded frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleReport {
    pub source: String,
    pub band: AnalysisBand,
    pub num_border_points: usize,
    pub num_runs: usize,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ObstacleReport {
    /// Empty report for a frame coming from `source`.
    pub fn new(source: impl Into<String>, band: AnalysisBand) -> Self {
        Self {
            source: source.into(),
            band,
            num_border_points: 0,
            num_runs: 0,
            obstacles: Vec::new(),
            error: None,
        }
    }

    /// Populate report fields from a successful detection.
    pub fn set_detection(&mut self, res: ObstacleDetection) {
        self.band = res.band;
        self.num_border_points = res.borders.len();
        self.num_runs = res.runs.len();
        self.obstacles = res.obstacles;
        self.error = None;
    }

    /// Record a detection error.
    pub fn set_error(&mut self, err: DetectError) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, DetectIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), DetectIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RowPreference;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: ObstacleDetectConfig = serde_json::from_str(
            r#"{
                "detector": {
                    "max_depth": 250.0,
                    "row_preference": "top",
                    "band": { "x": 0, "y": 100, "width": 640, "height": 50 },
                    "transform": { "elevation_axis": "down" }
                }
            }"#,
        )
        .expect("config json");
        let d = &cfg.detector;
        assert_eq!(d.max_depth, 250.0);
        assert_eq!(d.row_preference, RowPreference::Top);
        assert_eq!(d.band, AnalysisBand::new(0, 100, 640, 50));
        assert_eq!(d.max_z_change, 10.0);
        assert_eq!(d.transform.center_col, 320.0);
        assert_eq!(d.calibration.code_count, 2048);
        assert_eq!(cfg.output_path(), PathBuf::from("obstacle_report.json"));
        assert!(cfg.build_detector().is_ok());
    }

    #[test]
    fn config_and_report_survive_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("detect.json");
        let cfg = ObstacleDetectConfig {
            output_path: Some("out.json".into()),
            ..ObstacleDetectConfig::default()
        };
        cfg.write_json(&cfg_path).expect("write config");
        let loaded = ObstacleDetectConfig::load_json(&cfg_path).expect("load config");
        assert_eq!(loaded.detector, cfg.detector);
        assert_eq!(loaded.output_path(), PathBuf::from("out.json"));

        let mut report = ObstacleReport::new("recorded", AnalysisBand::default());
        report.set_error(DetectError::EmptyBand {
            band: AnalysisBand::new(0, 0, 0, 0),
        });
        let report_path = dir.path().join("report.json");
        report.write_json(&report_path).expect("write report");
        let loaded = ObstacleReport::load_json(&report_path).expect("load report");
        assert!(loaded.error.is_some_and(|e| e.contains("empty")));
        assert!(loaded.obstacles.is_empty());
    }
}
