use crate::border::BorderPoint;
use crate::obstacle::Obstacle;
use crate::segment::ObstacleRun;
use depth_obstacles_core::AnalysisBand;
use serde::{Deserialize, Serialize};

/// Output of a detection run with every intermediate stage kept.
///
/// Useful for overlays that draw the extracted borders on top of the depth
/// image.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleDetection {
    pub band: AnalysisBand,
    /// One point per qualifying band column, by increasing column.
    pub borders: Vec<BorderPoint>,
    /// Runs before height filtering.
    pub runs: Vec<ObstacleRun>,
    /// Final obstacles, left to right.
    pub obstacles: Vec<Obstacle>,
}

impl ObstacleDetection {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
