use crate::{FrameSource, RecordedSource, SourceError};
use depth_obstacles_core::DepthFrame;
use serde::{Deserialize, Serialize};

/// Which source produced a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameOrigin {
    Live,
    Recorded,
}

/// A frame together with where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Acquisition {
    pub frame: DepthFrame,
    pub origin: FrameOrigin,
}

/// Live source that falls back to a recorded sample when the device is
/// unavailable.
///
/// Only [`SourceError::Unavailable`] triggers the fallback; other live
/// failures are returned to the caller.
pub struct FallbackSource<L> {
    live: Option<L>,
    recorded: RecordedSource,
    warned: bool,
}

impl<L: FrameSource> FallbackSource<L> {
    pub fn new(live: L, recorded: RecordedSource) -> Self {
        Self {
            live: Some(live),
            recorded,
            warned: false,
        }
    }

    /// No live device at all; every frame comes from the recording.
    pub fn recorded_only(recorded: RecordedSource) -> Self {
        Self {
            live: None,
            recorded,
            warned: false,
        }
    }

    #[inline]
    pub fn recorded_mut(&mut self) -> &mut RecordedSource {
        &mut self.recorded
    }

    /// Acquire a frame, preferring the live device.
    pub fn acquire(&mut self) -> Result<Acquisition, SourceError> {
        if let Some(live) = self.live.as_mut() {
            match live.grab() {
                Ok(frame) => {
                    if self.warned {
                        log::info!("live source `{}` is back", live.describe());
                        self.warned = false;
                    }
                    return Ok(Acquisition {
                        frame,
                        origin: FrameOrigin::Live,
                    });
                }
                Err(SourceError::Unavailable { source_name }) => {
                    if !self.warned {
                        log::warn!(
                            "live source `{}` unavailable, using recorded `{}`",
                            source_name,
                            self.recorded.describe()
                        );
                        self.warned = true;
                    }
                }
                Err(err) => return Err(err),
            }
        }

        Ok(Acquisition {
            frame: self.recorded.grab()?,
            origin: FrameOrigin::Recorded,
        })
    }
}

impl<L: FrameSource> FrameSource for FallbackSource<L> {
    fn describe(&self) -> &str {
        match &self.live {
            Some(live) => live.describe(),
            None => self.recorded.describe(),
        }
    }

    fn grab(&mut self) -> Result<DepthFrame, SourceError> {
        self.acquire().map(|a| a.frame)
    }
}
