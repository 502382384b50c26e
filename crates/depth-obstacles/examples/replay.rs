//! Poll a frame source in a loop and print the obstacles of every frame.
//!
//! There is no device driver in this workspace, so the live side is always
//! unavailable and frames come from a small synthetic recording.
//!
//! ```text
//! cargo run -p depth-obstacles --example replay --features tracing
//! ```

use depth_obstacles::detect;
use depth_obstacles::source::{FallbackSource, FrameSource, RecordedSource, SourceError};
use depth_obstacles::{DepthFrame, ObstacleDetector, ObstacleDetectorParams};
#[cfg(feature = "tracing")]
use tracing_log::LogTracer;
#[cfg(feature = "tracing")]
use tracing_subscriber::EnvFilter;

const FRAMES: usize = 6;

struct NoDevice;

impl FrameSource for NoDevice {
    fn describe(&self) -> &str {
        "kinect0"
    }

    fn grab(&mut self) -> Result<DepthFrame, SourceError> {
        Err(SourceError::Unavailable {
            source_name: self.describe().to_string(),
        })
    }
}

/// A box walking left to right across the analysis band.
fn recording() -> Vec<DepthFrame> {
    (0..3)
        .map(|step| {
            let mut frame = DepthFrame::filled(640, 480, 2047);
            let left = 120 + step * 120;
            for x in left..left + 60 {
                for y in 190..250 {
                    frame.set(x, y, 780);
                }
            }
            frame
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let detector = ObstacleDetector::new(ObstacleDetectorParams::default())?;
    let recorded = RecordedSource::new("walking-box", recording())?;
    let mut source = FallbackSource::new(NoDevice, recorded);

    for i in 0..FRAMES {
        let found = detect::detect_next_with_origin(&mut source, &detector)?;
        println!("frame {i} ({:?}): {} obstacles", found.origin, found.obstacles.len());
        for o in &found.obstacles {
            println!("  {o}");
        }
    }
    Ok(())
}

fn init_tracing() {
    // Ignore errors if a logger/subscriber was already installed.
    #[cfg(feature = "tracing")]
    {
        let _ = LogTracer::init();
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = depth_obstacles::core::init_with_level(log::LevelFilter::Info);
    }
}
