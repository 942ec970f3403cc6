//! Boundaries between the render pipeline and whatever displays its frames.

pub mod frame_sink;
pub mod surface;

pub use frame_sink::FrameSink;
pub use surface::{RenderSurface, SurfaceError};
