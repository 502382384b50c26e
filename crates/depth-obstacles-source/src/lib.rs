//! Where depth frames come from.
//!
//! The detector only ever sees a [`DepthFrame`]. Acquisition sits behind the
//! [`FrameSource`] trait so a live sensor and a recorded sample can be swapped
//! at startup; [`FallbackSource`] serves the recorded sample whenever the live
//! device is not available and reports which one it used.

mod fallback;
mod recorded;

use depth_obstacles_core::{DepthFrame, FrameError};

pub use fallback::{Acquisition, FallbackSource, FrameOrigin};
pub use recorded::RecordedSource;

/// Errors produced while acquiring a frame.
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    /// The device is absent or its driver is not loaded.
    #[error("depth source `{source_name}` is not available")]
    Unavailable { source_name: String },

    #[error("recorded source has no frames")]
    NoFrames,

    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Any other device failure.
    #[error("depth source `{source_name}` failed: {message}")]
    Device {
        source_name: String,
        message: String,
    },
}

/// A producer of depth frames.
pub trait FrameSource: Send {
    /// Short human-readable name, used in logs.
    fn describe(&self) -> &str;

    /// Acquire the next frame.
    fn grab(&mut self) -> Result<DepthFrame, SourceError>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn describe(&self) -> &str {
        (**self).describe()
    }

    fn grab(&mut self) -> Result<DepthFrame, SourceError> {
        (**self).grab()
    }
}
