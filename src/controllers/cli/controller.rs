use crate::config::PipelineConfig;
use crate::controllers::pipeline::{FrameInfo, PipelineError, RenderEvent, RenderPipeline};
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::actions::render_gallery::render_gallery;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::render_request::RenderRequest;
use crate::core::fractals::mandelbrot::locations::{Location, LocationTable};
use crate::presenters::channel_sink::ChannelFrameSink;
use crate::presenters::surface::shared_surface::SharedSurface;
use log::{debug, error, info};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use thiserror::Error;

pub const DEFAULT_FRAME_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum CliControllerError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("render {generation} failed: {message}")]
    Render { generation: u64, message: String },
    #[error("no frame arrived within {0:?}")]
    Timeout(Duration),
    #[error("the render worker stopped before presenting a frame")]
    Disconnected,
    #[error("frame {0} was never presented")]
    MissingFrame(u64),
    #[error("cannot write frame")]
    Present(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("{failed} of {total} gallery frames failed")]
    GalleryIncomplete { failed: usize, total: usize },
}

/// Headless driver: pushes requests through the render pipeline and hands the
/// presented frames to a file presenter.
pub struct CliController<P: FilePresenterPort> {
    presenter: P,
    config: PipelineConfig,
    frame_timeout: Duration,
}

impl<P: FilePresenterPort> CliController<P> {
    pub fn new(presenter: P) -> Self {
        Self {
            presenter,
            config: PipelineConfig::default(),
            frame_timeout: DEFAULT_FRAME_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_frame_timeout(mut self, frame_timeout: Duration) -> Self {
        self.frame_timeout = frame_timeout;
        self
    }

    /// One request through a fresh pipeline: acquire, submit, flush, wait for
    /// the completion event, read the presented frame, release.
    pub fn render(&self, request: RenderRequest) -> Result<PixelBuffer, CliControllerError> {
        let (surface, reader) = SharedSurface::new();
        let (sink, events) = ChannelFrameSink::channel();
        let mut pipeline = RenderPipeline::acquire(surface, Arc::new(sink), self.config)?;

        info!(
            "rendering {} at ({}, {}) zoom {}",
            request.dimensions(),
            request.viewport().center_x,
            request.viewport().center_y,
            request.viewport().zoom
        );

        let generation = pipeline.submit(request)?;
        pipeline.flush();
        let outcome = self.wait_for(&events, generation);
        pipeline.release();

        let frame = outcome?;
        info!("render took {:?}", frame.render_duration);

        reader
            .latest()
            .filter(|presented| presented.generation == generation)
            .map(|presented| presented.buffer)
            .ok_or(CliControllerError::MissingFrame(generation))
    }

    pub fn write(
        &self,
        request: RenderRequest,
        filepath: impl AsRef<Path>,
    ) -> Result<(), CliControllerError> {
        let buffer = self.render(request)?;
        self.present(&buffer, filepath.as_ref())
    }

    /// Renders `template` once per location and writes `<slug>.ppm` files into
    /// `directory`. Frames that fail are logged and skipped.
    pub fn gallery(
        &self,
        template: &RenderRequest,
        directory: impl AsRef<Path>,
        locations: &LocationTable<'_>,
    ) -> Result<Vec<PathBuf>, CliControllerError> {
        let locations: Vec<Location> = locations.iter().copied().collect();
        let start = Instant::now();
        let frames = render_gallery(template, &locations);
        info!("rendered {} frames in {:?}", frames.len(), start.elapsed());

        let total = frames.len();
        let mut failed = 0;
        let mut written = Vec::with_capacity(total);

        for frame in frames {
            match frame.buffer {
                Ok(buffer) => {
                    let path = directory.as_ref().join(format!("{}.ppm", slug(frame.name)));
                    self.present(&buffer, &path)?;
                    written.push(path);
                }
                Err(err) => {
                    error!("{}: {}", frame.name, err);
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            return Err(CliControllerError::GalleryIncomplete { failed, total });
        }

        Ok(written)
    }

    pub fn list_locations(
        &self,
        locations: &LocationTable<'_>,
        out: &mut impl Write,
    ) -> io::Result<()> {
        for location in locations.iter() {
            writeln!(
                out,
                "{:<18} center ({}, {})  zoom {}",
                location.name,
                location.viewport.center_x,
                location.viewport.center_y,
                location.viewport.zoom
            )?;
        }

        Ok(())
    }

    fn present(&self, buffer: &PixelBuffer, path: &Path) -> Result<(), CliControllerError> {
        self.presenter
            .present(buffer, path)
            .map_err(|err| CliControllerError::Present(Box::new(err)))?;
        info!("wrote {}", path.display());

        Ok(())
    }

    fn wait_for(
        &self,
        events: &Receiver<RenderEvent>,
        generation: u64,
    ) -> Result<FrameInfo, CliControllerError> {
        let deadline = Instant::now() + self.frame_timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());

            match events.recv_timeout(remaining) {
                Ok(RenderEvent::Frame(frame)) if frame.generation == generation => {
                    return Ok(frame);
                }
                Ok(RenderEvent::Error(failure)) if failure.generation == generation => {
                    return Err(CliControllerError::Render {
                        generation,
                        message: failure.message,
                    });
                }
                Ok(event) => debug!("ignoring event for generation {}", event.generation()),
                Err(RecvTimeoutError::Timeout) => {
                    return Err(CliControllerError::Timeout(self.frame_timeout));
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(CliControllerError::Disconnected);
                }
            }
        }
    }
}

/// File-name friendly form of a location name, e.g. "Full Set" -> "full-set".
fn slug(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
