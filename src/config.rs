//! Tunables for the render pipeline and the defaults a fresh session starts from.

use crate::core::colour::stops::GradientStops;
use crate::core::data::dimensions::Dimensions;
use crate::core::data::render_request::{RenderRequest, RenderRequestError};
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::locations::{FULL_SET, LocationTable};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(30);
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_millis(120);

pub const DEFAULT_POWER_FACTOR: f64 = 0.2;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max wait {max_wait:?} is shorter than the debounce window {debounce:?}")]
    MaxWaitBelowDebounce { debounce: Duration, max_wait: Duration },
}

/// Coalescing windows of the render pipeline.
///
/// `debounce` is how long the pipeline waits for input to go quiet before
/// dispatching; `max_wait` caps how long a pending request can be held back
/// while input keeps arriving.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    debounce: Duration,
    max_wait: Duration,
}

impl PipelineConfig {
    pub fn new(debounce: Duration, max_wait: Duration) -> Result<Self, ConfigError> {
        if max_wait < debounce {
            return Err(ConfigError::MaxWaitBelowDebounce { debounce, max_wait });
        }

        Ok(Self { debounce, max_wait })
    }

    /// Dispatch as soon as the worker is free.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            debounce: Duration::ZERO,
            max_wait: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    #[must_use]
    pub fn max_wait(&self) -> Duration {
        self.max_wait
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderDefaults {
    pub viewport: Viewport,
    pub dimensions: Dimensions,
    pub gradient: GradientStops,
    pub power_factor: f64,
}

impl RenderDefaults {
    pub fn request(&self) -> Result<RenderRequest, RenderRequestError> {
        RenderRequest::new(
            self.viewport,
            self.dimensions,
            self.gradient.clone(),
            self.power_factor,
        )
    }
}

impl Default for RenderDefaults {
    fn default() -> Self {
        let viewport = LocationTable::default()
            .viewport(FULL_SET)
            .unwrap_or(Viewport {
                center_x: -0.5,
                center_y: 0.0,
                zoom: 1.5,
            });

        Self {
            viewport,
            dimensions: Dimensions::default(),
            gradient: GradientStops::default(),
            power_factor: DEFAULT_POWER_FACTOR,
        }
    }
}
