//! Escape-time Mandelbrot renderer coloured through a multi-stop HSV gradient,
//! with a coalescing background render pipeline.

pub mod config;
pub mod controllers;
pub mod core;
pub mod input;
pub mod presenters;

pub use crate::config::{PipelineConfig, RenderDefaults};
pub use crate::controllers::cli::controller::{CliController, CliControllerError};
pub use crate::controllers::pipeline::{
    FrameInfo, FrameSink, PipelineError, PipelineState, RenderEvent, RenderFailure,
    RenderPipeline, RenderSurface, SurfaceError,
};
pub use crate::core::actions::render_pass::render_pass::{RenderError, render_to_buffer};
pub use crate::core::colour::gradient::{ColourStop, StopId};
pub use crate::core::colour::stops::{GradientError, GradientStops};
pub use crate::core::data::colour::Colour;
pub use crate::core::data::dimensions::Dimensions;
pub use crate::core::data::pixel_buffer::PixelBuffer;
pub use crate::core::data::render_request::{RenderMessage, RenderRequest, RenderRequestError};
pub use crate::core::data::viewport::Viewport;
pub use crate::core::fractals::mandelbrot::locations::{FAVOURITE_LOCATIONS, Location, LocationTable};
pub use crate::input::cli::{Cli, CliCommand};
pub use crate::presenters::channel_sink::ChannelFrameSink;
pub use crate::presenters::file::ppm::PpmFilePresenter;
pub use crate::presenters::surface::shared_surface::{FrameReader, PresentedFrame, SharedSurface};
