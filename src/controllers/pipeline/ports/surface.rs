use crate::core::data::dimensions::Dimensions;
use crate::core::data::pixel_buffer::PixelBuffer;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("the display surface has been released")]
    Detached,
    #[error("no frame in progress")]
    NoFrameInProgress,
    #[error("frame {generation} is older than presented frame {presented}")]
    Stale { generation: u64, presented: u64 },
    #[error("surface failure: {0}")]
    Failed(String),
}

/// Destination of a render, owned by the pipeline worker once handed over.
///
/// A render asks for a buffer with [`RenderSurface::begin_frame`], fills it,
/// then makes it visible with [`RenderSurface::end_frame`]. Until then the
/// previously presented frame stays on screen.
pub trait RenderSurface: Send {
    fn begin_frame(&mut self, dimensions: Dimensions) -> Result<&mut PixelBuffer, SurfaceError>;

    fn end_frame(&mut self, generation: u64) -> Result<(), SurfaceError>;
}
