use crate::controllers::pipeline::ports::surface::{RenderSurface, SurfaceError};
use crate::core::data::dimensions::Dimensions;
use crate::core::data::pixel_buffer::PixelBuffer;
use log::debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

#[derive(Debug, Clone, PartialEq)]
pub struct PresentedFrame {
    pub generation: u64,
    pub buffer: PixelBuffer,
}

type Slot = Mutex<Option<PresentedFrame>>;

fn lock(slot: &Slot) -> MutexGuard<'_, Option<PresentedFrame>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Double-buffered surface: the worker draws into a private back buffer and
/// swaps whole frames into a slot shared with a [`FrameReader`].
///
/// The surface only holds a weak reference to the slot. Once every reader is
/// dropped, the next frame fails with [`SurfaceError::Detached`]. A frame older
/// than the presented one is refused with [`SurfaceError::Stale`].
#[derive(Debug)]
pub struct SharedSurface {
    back: Option<PixelBuffer>,
    slot: Weak<Slot>,
}

impl SharedSurface {
    #[must_use]
    pub fn new() -> (Self, FrameReader) {
        let slot = Arc::new(Mutex::new(None));
        let surface = Self {
            back: None,
            slot: Arc::downgrade(&slot),
        };

        (surface, FrameReader { slot })
    }
}

impl RenderSurface for SharedSurface {
    fn begin_frame(&mut self, dimensions: Dimensions) -> Result<&mut PixelBuffer, SurfaceError> {
        if self.slot.strong_count() == 0 {
            return Err(SurfaceError::Detached);
        }

        let back = self
            .back
            .get_or_insert_with(|| PixelBuffer::new(dimensions));
        back.resize(dimensions);

        Ok(back)
    }

    fn end_frame(&mut self, generation: u64) -> Result<(), SurfaceError> {
        let slot = self.slot.upgrade().ok_or(SurfaceError::Detached)?;
        let buffer = self.back.take().ok_or(SurfaceError::NoFrameInProgress)?;
        let mut presented = lock(&slot);

        if let Some(current) = presented.as_ref() {
            if current.generation > generation {
                self.back = Some(buffer);
                return Err(SurfaceError::Stale {
                    generation,
                    presented: current.generation,
                });
            }
        }

        let previous = presented.replace(PresentedFrame { generation, buffer });
        self.back = previous.map(|frame| frame.buffer);
        debug!("frame {} swapped in", generation);

        Ok(())
    }
}

/// Read side of a [`SharedSurface`]. Only ever sees complete frames.
#[derive(Debug, Clone)]
pub struct FrameReader {
    slot: Arc<Slot>,
}

impl FrameReader {
    /// Copy of the most recently presented frame.
    #[must_use]
    pub fn latest(&self) -> Option<PresentedFrame> {
        lock(&self.slot).clone()
    }

    #[must_use]
    pub fn generation(&self) -> Option<u64> {
        lock(&self.slot).as_ref().map(|frame| frame.generation)
    }

    /// Runs `f` against the presented frame without copying it.
    pub fn with_frame<R>(&self, f: impl FnOnce(&PresentedFrame) -> R) -> Option<R> {
        lock(&self.slot).as_ref().map(f)
    }
}
