//! Background rendering with request coalescing.
//!
//! - **Input**: [`RenderRequest`](crate::core::data::render_request::RenderRequest)
//!   values, one per parameter change
//! - **Output**: frames drawn into a [`RenderSurface`] plus one
//!   [`RenderEvent`] per dispatched render on a [`FrameSink`]

pub mod coalescing_queue;
pub mod events;
#[allow(clippy::module_inception)]
mod pipeline;
pub mod ports;

pub use events::{FrameInfo, RenderEvent, RenderFailure};
pub use pipeline::{PipelineError, PipelineState, RenderPipeline};
pub use ports::{FrameSink, RenderSurface, SurfaceError};
