use crate::{FrameSource, SourceError};
use depth_obstacles_core::{DepthFrame, RangeCode};

/// Replays a fixed set of frames in a loop.
#[derive(Clone, Debug)]
pub struct RecordedSource {
    name: String,
    frames: Vec<DepthFrame>,
    next: usize,
}

impl RecordedSource {
    /// Fails with [`SourceError::NoFrames`] when `frames` is empty.
    pub fn new(name: impl Into<String>, frames: Vec<DepthFrame>) -> Result<Self, SourceError> {
        if frames.is_empty() {
            return Err(SourceError::NoFrames);
        }
        Ok(Self {
            name: name.into(),
            frames,
            next: 0,
        })
    }

    /// Recording made of raw row-major buffers that share one resolution.
    ///
    /// Fails on the first buffer whose length does not match.
    pub fn from_codes(
        name: impl Into<String>,
        width: usize,
        height: usize,
        buffers: Vec<Vec<RangeCode>>,
    ) -> Result<Self, SourceError> {
        let frames = buffers
            .into_iter()
            .map(|data| DepthFrame::new(width, height, data))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(name, frames)
    }

    /// A source that always returns the same frame.
    pub fn single(name: impl Into<String>, frame: DepthFrame) -> Self {
        Self {
            name: name.into(),
            frames: vec![frame],
            next: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Make `index` the next frame returned.
    pub fn select(&mut self, index: usize) -> Option<&DepthFrame> {
        let frame = self.frames.get(index)?;
        self.next = index;
        Some(frame)
    }
}

impl FrameSource for RecordedSource {
    fn describe(&self) -> &str {
        &self.name
    }

    fn grab(&mut self) -> Result<DepthFrame, SourceError> {
        let frame = self.frames.get(self.next).ok_or(SourceError::NoFrames)?.clone();
        self.next = (self.next + 1) % self.frames.len();
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depth_obstacles_core::FrameError;

    #[test]
    fn empty_recording_is_rejected() {
        assert!(matches!(
            RecordedSource::new("empty", Vec::new()),
            Err(SourceError::NoFrames)
        ));
    }

    #[test]
    fn raw_buffers_are_checked() {
        let src = RecordedSource::from_codes("raw", 2, 2, vec![vec![5; 4], vec![6; 4]])
            .expect("source");
        assert_eq!(src.len(), 2);

        assert!(matches!(
            RecordedSource::from_codes("raw", 2, 2, vec![vec![5; 4], vec![6; 3]]),
            Err(SourceError::Frame(FrameError::BufferLength {
                expected: 4,
                got: 3
            }))
        ));
        assert!(matches!(
            RecordedSource::from_codes("raw", 2, 2, Vec::new()),
            Err(SourceError::NoFrames)
        ));
    }

    #[test]
    fn frames_cycle() {
        let a = DepthFrame::filled(2, 2, 1);
        let b = DepthFrame::filled(2, 2, 2);
        let mut src = RecordedSource::new("pair", vec![a.clone(), b.clone()]).expect("source");
        assert_eq!(src.grab().expect("grab"), a);
        assert_eq!(src.grab().expect("grab"), b);
        assert_eq!(src.grab().expect("grab"), a);
    }

    #[test]
    fn select_moves_the_cursor() {
        let a = DepthFrame::filled(2, 2, 1);
        let b = DepthFrame::filled(2, 2, 2);
        let mut src = RecordedSource::new("pair", vec![a, b.clone()]).expect("source");
        assert!(src.select(5).is_none());
        assert_eq!(src.select(1), Some(&b));
        assert_eq!(src.grab().expect("grab"), b);
        assert_eq!(src.describe(), "pair");
    }
}
