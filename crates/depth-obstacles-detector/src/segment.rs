//! Grouping of border points into contiguous runs.

use crate::border::BorderPoint;
use serde::{Deserialize, Serialize};

/// Border points of one contiguous object, in column order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleRun {
    pub points: Vec<BorderPoint>,
}

impl ObstacleRun {
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Inclusive column span `(first, last)`.
    pub fn columns(&self) -> Option<(usize, usize)> {
        Some((self.points.first()?.x, self.points.last()?.x))
    }
}

/// Split `points` wherever the column jumps by more than one pixel or the
/// distance changes by `max_z_change` centimeters or more.
///
/// `points` must be ordered by increasing column, as produced by
/// [`extract_borders`](crate::extract_borders).
pub fn segment_runs(points: &[BorderPoint], max_z_change: f32) -> Vec<ObstacleRun> {
    let mut runs = Vec::new();
    let mut current: Vec<BorderPoint> = Vec::new();

    for p in points {
        if let Some(&prev) = current.last() {
            let connected =
                p.x.abs_diff(prev.x) <= 1 && (p.distance - prev.distance).abs() < max_z_change;
            if !connected {
                runs.push(ObstacleRun {
                    points: std::mem::take(&mut current),
                });
            }
        }
        current.push(*p);
    }
    if !current.is_empty() {
        runs.push(ObstacleRun { points: current });
    }

    log::debug!("segmentation: {} runs from {} points", runs.len(), points.len());
    runs
}
