//! Per-column border extraction.
//!
//! For each column of the analysis band we keep a single sample: the one
//! closest to the preferred band edge whose calibrated distance is defined
//! and within `max_depth`. Farther samples are background or floor.

use depth_obstacles_core::{AnalysisBand, CalibrationTable, DepthFrameView};
use serde::{Deserialize, Serialize};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Which band edge the per-column scan starts from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPreference {
    /// Keep the qualifying sample with the largest row (band bottom).
    #[default]
    Bottom,
    /// Keep the qualifying sample with the smallest row (band top).
    Top,
}

/// Nearest qualifying surface sample of one band column.
///
/// `x`/`y` are absolute frame pixels, `distance` is in centimeters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BorderPoint {
    pub x: usize,
    pub y: usize,
    pub distance: f32,
}

/// Scan settings shared by every column.
#[derive(Clone, Copy, Debug)]
pub struct BorderScan<'a> {
    pub table: &'a CalibrationTable,
    pub max_depth: f32,
    pub rows: RowPreference,
}

impl BorderScan<'_> {
    #[inline]
    fn qualifies(&self, distance: f32) -> bool {
        self.table.is_defined(distance) && distance <= self.max_depth
    }

    /// Border point of column `x`, or `None` when nothing in the band qualifies.
    pub fn column(
        &self,
        frame: &DepthFrameView<'_>,
        band: &AnalysisBand,
        x: usize,
    ) -> Option<BorderPoint> {
        let sample = |y: usize| {
            let distance = self.table.distance_cm(frame.get(x, y));
            self.qualifies(distance).then_some(BorderPoint { x, y, distance })
        };
        let mut rows = band.y..band.y + band.height;
        match self.rows {
            RowPreference::Bottom => rows.rev().find_map(sample),
            RowPreference::Top => rows.find_map(sample),
        }
    }
}

/// Extract border points of `band`, ordered by increasing column.
///
/// Columns without a qualifying sample are simply absent. A band that does
/// not lie inside the frame yields no points.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip_all, fields(band_w = band.width, band_h = band.height))
)]
pub fn extract_borders(
    frame: &DepthFrameView<'_>,
    band: &AnalysisBand,
    scan: &BorderScan<'_>,
) -> Vec<BorderPoint> {
    if !frame.contains(band) {
        log::warn!(
            "band {:?} exceeds the {}x{} frame, no borders extracted",
            band,
            frame.width,
            frame.height
        );
        return Vec::new();
    }
    let columns = band.x..band.x + band.width;

    #[cfg(feature = "rayon")]
    let borders: Vec<BorderPoint> = columns
        .into_par_iter()
        .filter_map(|x| scan.column(frame, band, x))
        .collect();

    #[cfg(not(feature = "rayon"))]
    let borders: Vec<BorderPoint> = columns
        .filter_map(|x| scan.column(frame, band, x))
        .collect();

    log::debug!(
        "border extraction: {} of {} columns qualified",
        borders.len(),
        band.width
    );
    borders
}

#[cfg(test)]
mod tests {
    use super::*;
    use depth_obstacles_core::{CalibrationParams, DepthFrame};

    // Codes with a defined distance under the default calibration.
    const NEAR: u16 = 744; // ~100 cm
    const MID: u16 = 802; // ~120 cm
    const FAR: u16 = 996; // ~349 cm, beyond 300 cm
    const NONE: u16 = 2047;

    fn table() -> CalibrationTable {
        CalibrationTable::new(CalibrationParams::default()).expect("calibration")
    }

    fn scan(table: &CalibrationTable, rows: RowPreference) -> BorderScan<'_> {
        BorderScan {
            table,
            max_depth: 300.0,
            rows,
        }
    }

    #[test]
    fn picks_lowest_qualifying_row() {
        let table = table();
        let mut frame = DepthFrame::filled(4, 6, NONE);
        frame.set(1, 1, MID);
        frame.set(1, 3, NEAR);
        frame.set(1, 5, FAR);
        let band = AnalysisBand::full(4, 6);

        let borders = extract_borders(&frame.view(), &band, &scan(&table, RowPreference::Bottom));
        assert_eq!(borders.len(), 1);
        assert_eq!(borders[0].x, 1);
        assert_eq!(borders[0].y, 3);
        assert_eq!(borders[0].distance, table.distance_cm(NEAR));
    }

    #[test]
    fn top_preference_picks_highest_row() {
        let table = table();
        let mut frame = DepthFrame::filled(2, 6, NONE);
        frame.set(0, 1, MID);
        frame.set(0, 3, NEAR);

        let borders = extract_borders(
            &frame.view(),
            &AnalysisBand::full(2, 6),
            &scan(&table, RowPreference::Top),
        );
        assert_eq!(borders.len(), 1);
        assert_eq!(borders[0].y, 1);
    }

    #[test]
    fn only_band_rows_and_columns_are_scanned() {
        let table = table();
        let mut frame = DepthFrame::filled(6, 6, NONE);
        frame.set(2, 5, NEAR); // below the band
        frame.set(0, 2, NEAR); // left of the band
        frame.set(3, 2, MID);
        let band = AnalysisBand::new(1, 1, 4, 3);

        let borders = extract_borders(&frame.view(), &band, &scan(&table, RowPreference::Bottom));
        assert_eq!(
            borders,
            vec![BorderPoint {
                x: 3,
                y: 2,
                distance: table.distance_cm(MID)
            }]
        );
    }

    #[test]
    fn columns_come_out_in_order_with_gaps() {
        let table = table();
        let mut frame = DepthFrame::filled(8, 3, NONE);
        for x in [0, 1, 4, 6, 7] {
            frame.set(x, 2, NEAR);
        }
        let borders = extract_borders(
            &frame.view(),
            &AnalysisBand::full(8, 3),
            &scan(&table, RowPreference::Bottom),
        );
        let xs: Vec<usize> = borders.iter().map(|b| b.x).collect();
        assert_eq!(xs, vec![0, 1, 4, 6, 7]);
    }

    #[test]
    fn band_past_the_right_edge_reads_nothing() {
        let table = table();
        let mut frame = DepthFrame::filled(640, 480, NONE);
        // Would be read as column 640 of row 0 if rows wrapped.
        frame.set(0, 1, NEAR);
        let borders = extract_borders(
            &frame.view(),
            &AnalysisBand::new(630, 0, 20, 1),
            &scan(&table, RowPreference::Bottom),
        );
        assert!(borders.is_empty());
    }

    #[test]
    fn band_beyond_max_depth_is_empty() {
        let table = table();
        let frame = DepthFrame::filled(10, 10, FAR);
        let borders = extract_borders(
            &frame.view(),
            &AnalysisBand::full(10, 10),
            &scan(&table, RowPreference::Bottom),
        );
        assert!(borders.is_empty());
    }
}
