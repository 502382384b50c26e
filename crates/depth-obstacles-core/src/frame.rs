use crate::calibration::RangeCode;
use serde::{Deserialize, Serialize};

/// Borrowed depth frame, row-major, `data.len() == width * height`.
#[derive(Clone, Copy, Debug)]
pub struct DepthFrameView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [RangeCode],
}

impl<'a> DepthFrameView<'a> {
    /// Wrap a raw buffer, checking its length against the dimensions.
    pub fn new(width: usize, height: usize, data: &'a [RangeCode]) -> Result<Self, FrameError> {
        let expected = width
            .checked_mul(height)
            .ok_or(FrameError::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(FrameError::BufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> RangeCode {
        debug_assert!(x < self.width, "column {x} outside a {}-wide frame", self.width);
        self.data[y * self.width + x]
    }

    /// Whether `band` lies entirely inside the frame.
    pub fn contains(&self, band: &AnalysisBand) -> bool {
        band.right()
            .zip(band.bottom())
            .is_some_and(|(r, b)| r <= self.width && b <= self.height)
    }
}

/// Owned depth frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepthFrame {
    pub width: usize,
    pub height: usize,
    pub data: Vec<RangeCode>,
}

impl DepthFrame {
    pub fn new(width: usize, height: usize, data: Vec<RangeCode>) -> Result<Self, FrameError> {
        DepthFrameView::new(width, height, &data)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Frame with every pixel set to `code`.
    ///
    /// # Panics
    ///
    /// If `width * height` overflows `usize`.
    pub fn filled(width: usize, height: usize, code: RangeCode) -> Self {
        let len = width
            .checked_mul(height)
            .expect("frame dimensions overflow usize");
        Self {
            width,
            height,
            data: vec![code; len],
        }
    }

    #[inline]
    pub fn view(&self) -> DepthFrameView<'_> {
        DepthFrameView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, code: RangeCode) {
        self.data[y * self.width + x] = code;
    }
}

/// Calibrated distance (cm) of every pixel of a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMap {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

impl DistanceMap {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }
}

/// Pixel rectangle of the frame that is searched for obstacles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisBand {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Default for AnalysisBand {
    fn default() -> Self {
        Self {
            x: 37,
            y: 196,
            width: 566,
            height: 85,
        }
    }
}

impl AnalysisBand {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole frame.
    pub fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// One past the last column, `None` on overflow.
    #[inline]
    pub fn right(&self) -> Option<usize> {
        self.x.checked_add(self.width)
    }

    /// One past the last row, `None` on overflow.
    #[inline]
    pub fn bottom(&self) -> Option<usize> {
        self.y.checked_add(self.height)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("invalid frame dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },

    #[error("invalid frame buffer length (expected {expected} codes, got {got})")]
    BufferLength { expected: usize, got: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_checks_buffer_length() {
        let data = vec![0u16; 12];
        assert!(DepthFrameView::new(4, 3, &data).is_ok());
        assert_eq!(
            DepthFrameView::new(4, 4, &data).unwrap_err(),
            FrameError::BufferLength {
                expected: 16,
                got: 12
            }
        );
        assert!(matches!(
            DepthFrameView::new(usize::MAX, 2, &data),
            Err(FrameError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn band_containment() {
        let frame = DepthFrame::filled(640, 480, 0);
        let view = frame.view();
        assert!(view.contains(&AnalysisBand::default()));
        assert!(view.contains(&AnalysisBand::full(640, 480)));
        assert!(!view.contains(&AnalysisBand::new(600, 0, 41, 10)));
        assert!(!view.contains(&AnalysisBand::new(0, 470, 10, 11)));
        assert!(!view.contains(&AnalysisBand::new(usize::MAX, 0, 2, 1)));
    }

    #[test]
    #[should_panic(expected = "frame dimensions overflow")]
    fn filled_rejects_overflowing_dimensions() {
        let _ = DepthFrame::filled(usize::MAX, 2, 0);
    }

    #[test]
    fn row_major_access() {
        let mut frame = DepthFrame::filled(3, 2, 7);
        frame.set(2, 1, 9);
        assert_eq!(frame.view().get(2, 1), 9);
        assert_eq!(frame.data[5], 9);
    }
}
