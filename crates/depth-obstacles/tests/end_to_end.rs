use approx::assert_relative_eq;
use depth_obstacles::core::CalibrationError;
use depth_obstacles::detect::{self, DepthObstaclesError};
use depth_obstacles::detector::ObstacleDetectConfig;
use depth_obstacles::source::{
    FallbackSource, FrameOrigin, FrameSource, RecordedSource, SourceError,
};
use depth_obstacles::{DepthFrame, ObstacleDetector, ObstacleDetectorParams};

/// ~100 cm under the default calibration.
const NEAR: u16 = 744;
const NONE: u16 = 2047;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A single box standing inside the default analysis band.
fn box_frame() -> DepthFrame {
    let mut frame = DepthFrame::filled(640, 480, NONE);
    for x in 150..190 {
        for y in 200..260 {
            frame.set(x, y, NEAR);
        }
    }
    frame
}

/// Live device that is never plugged in.
struct Unplugged;

impl FrameSource for Unplugged {
    fn describe(&self) -> &str {
        "kinect"
    }

    fn grab(&mut self) -> Result<DepthFrame, SourceError> {
        Err(SourceError::Unavailable {
            source_name: "kinect".into(),
        })
    }
}

#[test]
fn raw_buffer_to_obstacles() {
    init_logging();
    let frame = box_frame();
    let obstacles = detect::detect_from_u16(
        frame.width,
        frame.height,
        &frame.data,
        ObstacleDetectorParams::default(),
    )
    .expect("detect");

    assert_eq!(obstacles.len(), 1);
    let o = &obstacles[0];
    assert_relative_eq!(o.y, 100.0, epsilon = 0.5);
    assert_eq!(o.height, 0.0);
    assert!(o.width > 0.0);
    assert!(o.raw.is_none());
}

#[test]
fn unplugged_device_falls_back_to_recording() {
    init_logging();
    let detector = ObstacleDetector::new(ObstacleDetectorParams::default()).expect("detector");
    let recorded = RecordedSource::single("sample", box_frame());
    let mut source = FallbackSource::new(Unplugged, recorded);

    let first = detect::detect_next_with_origin(&mut source, &detector).expect("detect");
    assert_eq!(first.origin, FrameOrigin::Recorded);
    assert_eq!(first.obstacles.len(), 1);

    // Same sample again; the detector keeps no state between frames.
    let second = detect::detect_next(&mut source, &detector).expect("detect");
    assert_eq!(second, first.obstacles);
}

#[test]
fn boxed_sources_are_interchangeable() {
    init_logging();
    let detector = ObstacleDetector::new(ObstacleDetectorParams::default()).expect("detector");
    let mut sources: Vec<Box<dyn FrameSource>> = vec![
        Box::new(RecordedSource::single("sample", box_frame())),
        Box::new(Unplugged),
    ];

    assert_eq!(
        detect::detect_next(&mut sources[0], &detector)
            .expect("detect")
            .len(),
        1
    );
    let err = detect::detect_next(&mut sources[1], &detector).unwrap_err();
    assert!(matches!(
        err,
        DepthObstaclesError::Source(SourceError::Unavailable { .. })
    ));
}

#[test]
fn detector_from_json_config() {
    init_logging();
    let dir = tempfile::tempdir().expect("tempdir");

    let good = dir.path().join("good.json");
    let mut cfg = ObstacleDetectConfig::default();
    cfg.detector.max_depth = 250.0;
    cfg.write_json(&good).expect("write config");
    let detector = detect::load_detector(&good).expect("detector");
    assert_eq!(detector.params().max_depth, 250.0);
    let frame = box_frame();
    assert_eq!(detector.detect(&frame.view()).expect("detect").len(), 1);

    let bad = dir.path().join("bad.json");
    cfg.detector.calibration.min_distance = 500.0;
    cfg.write_json(&bad).expect("write config");
    assert!(matches!(
        detect::load_detector(&bad),
        Err(DepthObstaclesError::Calibration(
            CalibrationError::EmptyWindow { .. }
        ))
    ));
}
