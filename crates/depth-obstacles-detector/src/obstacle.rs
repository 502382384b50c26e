//! Height filtering of runs and conversion into physical obstacles.

use std::fmt;

use crate::border::BorderPoint;
use crate::segment::ObstacleRun;
use depth_obstacles_core::PixelTransform;
use serde::{Deserialize, Serialize};

/// Obstacle footprint in centimeters.
///
/// In top view: `x` is the lateral position of the near-left corner,
/// `y` its depth (distance from the sensor); `width`/`height` extend along
/// those axes. `ground_height` is the lowest elevation kept for the object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub ground_height: f32,
    /// Border points the footprint was computed from, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Vec<BorderPoint>>,
}

impl fmt::Display for Obstacle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "obstacle at ({:.1}, {:.1}) size ({:.1} x {:.1}) ground height {:.1} ({})",
            self.x,
            self.y,
            self.width,
            self.height,
            self.ground_height,
            if self.raw.is_some() {
                "has raw data"
            } else {
                "no raw data"
            }
        )
    }
}

/// Top-view rectangle in centimeters, same axes as [`Obstacle`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroundRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl GroundRect {
    /// Whether the obstacle footprint touches this rectangle.
    pub fn intersects(&self, o: &Obstacle) -> bool {
        o.x <= self.x + self.width
            && self.x <= o.x + o.width
            && o.y <= self.y + self.height
            && self.y <= o.y + o.height
    }
}

/// Keep the points of `run` whose elevation is within `max_border_height`
/// of the run's highest point.
pub fn top_band(
    run: &ObstacleRun,
    transform: &PixelTransform,
    max_border_height: f32,
) -> Vec<BorderPoint> {
    let heights: Vec<f32> = run
        .points
        .iter()
        .map(|p| transform.y_to_cm(p.y as f32, p.distance))
        .collect();
    let top = heights.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    run.points
        .iter()
        .zip(&heights)
        .filter(|(_, &h)| top - h <= max_border_height)
        .map(|(p, _)| *p)
        .collect()
}

/// Footprint of a set of border points; `None` for an empty set.
pub fn build_obstacle(
    points: Vec<BorderPoint>,
    transform: &PixelTransform,
    retain_raw: bool,
) -> Option<Obstacle> {
    if points.is_empty() {
        return None;
    }

    let mut left = f32::INFINITY;
    let mut right = f32::NEG_INFINITY;
    let mut close = f32::INFINITY;
    let mut far = f32::NEG_INFINITY;
    let mut bottom = f32::INFINITY;
    for p in &points {
        let w = transform.to_world(p.x as f32, p.y as f32, p.distance);
        left = left.min(w.x);
        right = right.max(w.x);
        close = close.min(w.z);
        far = far.max(w.z);
        bottom = bottom.min(w.y);
    }

    Some(Obstacle {
        x: left,
        y: close,
        width: right - left,
        height: far - close,
        ground_height: bottom,
        raw: retain_raw.then_some(points),
    })
}

/// Height-filter every run and convert it into an obstacle, keeping run order.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip_all, fields(runs = runs.len()))
)]
pub fn build_obstacles(
    runs: &[ObstacleRun],
    transform: &PixelTransform,
    max_border_height: f32,
    retain_raw: bool,
) -> Vec<Obstacle> {
    let mut obstacles = Vec::with_capacity(runs.len());
    for run in runs {
        let kept = top_band(run, transform, max_border_height);
        match build_obstacle(kept, transform, retain_raw) {
            Some(o) => obstacles.push(o),
            None => log::warn!(
                "run {:?} has no points left after height filtering, skipped",
                run.columns()
            ),
        }
    }
    obstacles
}
