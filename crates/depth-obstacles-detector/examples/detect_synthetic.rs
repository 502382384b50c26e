//! Run the detector on a synthetic frame and print the obstacles.
//!
//! ```text
//! cargo run -p depth-obstacles-detector --example detect_synthetic -- [config.json]
//! ```

use depth_obstacles_core::{init_with_level, DepthFrame};
use depth_obstacles_detector::{ObstacleDetectConfig, ObstacleReport};
use log::LevelFilter;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    init_with_level(LevelFilter::Debug)?;

    let cfg = match std::env::args().nth(1) {
        Some(path) => ObstacleDetectConfig::load_json(path)?,
        None => ObstacleDetectConfig::default(),
    };
    let detector = cfg.build_detector()?;
    let sensor = detector.params().sensor;

    // Two feet standing in front of a wall that is too far to qualify.
    let mut frame = DepthFrame::filled(sensor.width, sensor.height, 996);
    for x in 150..190 {
        for y in 180..265 {
            frame.set(x, y, 760);
        }
    }
    for x in 210..250 {
        for y in 180..272 {
            frame.set(x, y, 790);
        }
    }

    let band = detector.params().band;
    let mut report = ObstacleReport::new("synthetic", band);
    match detector.detect_with_report(&frame.view(), &band) {
        Ok(res) => {
            for o in &res.obstacles {
                println!("{o}");
            }
            report.set_detection(res);
        }
        Err(err) => {
            log::warn!("detection failed: {err}");
            report.set_error(err);
        }
    }

    let out = cfg.output_path();
    report.write_json(&out)?;
    log::info!("wrote report JSON to {}", out.display());
    Ok(())
}
