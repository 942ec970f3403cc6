use crate::core::data::dimensions::Dimensions;
use std::time::Duration;

/// Describes a frame that is now on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInfo {
    pub generation: u64,
    pub dimensions: Dimensions,
    pub render_duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFailure {
    pub generation: u64,
    pub message: String,
}

/// Exactly one of these is emitted per dispatched render.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    Frame(FrameInfo),
    Error(RenderFailure),
}

impl RenderEvent {
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            Self::Frame(frame) => frame.generation,
            Self::Error(failure) => failure.generation,
        }
    }
}
