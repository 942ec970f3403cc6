use crate::core::colour::gradient::ColourStop;
use crate::core::colour::stops::{GradientError, GradientStops};
use crate::core::data::dimensions::{Dimensions, DimensionsError};
use crate::core::data::viewport::{Viewport, ViewportError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderRequestError {
    #[error(transparent)]
    Viewport(#[from] ViewportError),
    #[error(transparent)]
    Dimensions(#[from] DimensionsError),
    #[error(transparent)]
    Gradient(#[from] GradientError),
    #[error("power factor must be a positive finite number, got {0}")]
    InvalidPowerFactor(f64),
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageCenter {
    pub x: f64,
    pub y: f64,
}

/// The unvalidated shape a render request arrives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderMessage {
    pub dimensions: MessageSize,
    pub center: MessageCenter,
    pub zoom: f64,
    pub gradient: Vec<ColourStop>,
    pub power_factor: f64,
}

/// Everything one render needs, checked up front.
///
/// A request is built fresh for every parameter change and never refers
/// back to state the caller may keep mutating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RenderMessage", into = "RenderMessage")]
pub struct RenderRequest {
    viewport: Viewport,
    dimensions: Dimensions,
    gradient: GradientStops,
    power_factor: f64,
}

impl RenderRequest {
    pub fn new(
        viewport: Viewport,
        dimensions: Dimensions,
        gradient: GradientStops,
        power_factor: f64,
    ) -> Result<Self, RenderRequestError> {
        viewport.validate()?;

        if !power_factor.is_finite() || power_factor <= 0.0 {
            return Err(RenderRequestError::InvalidPowerFactor(power_factor));
        }

        Ok(Self {
            viewport,
            dimensions,
            gradient,
            power_factor,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[must_use]
    pub fn gradient(&self) -> &GradientStops {
        &self.gradient
    }

    #[must_use]
    pub fn power_factor(&self) -> f64 {
        self.power_factor
    }

    /// Same parameters at a different size.
    #[must_use]
    pub fn with_dimensions(&self, dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            ..self.clone()
        }
    }

    /// Same parameters looking somewhere else.
    pub fn with_viewport(&self, viewport: Viewport) -> Result<Self, RenderRequestError> {
        viewport.validate()?;

        Ok(Self {
            viewport,
            ..self.clone()
        })
    }
}

impl TryFrom<RenderMessage> for RenderRequest {
    type Error = RenderRequestError;

    fn try_from(message: RenderMessage) -> Result<Self, Self::Error> {
        let dimensions = Dimensions::new(message.dimensions.width, message.dimensions.height)?;
        let viewport = Viewport::new(message.center.x, message.center.y, message.zoom)?;
        let gradient = GradientStops::new(message.gradient)?;

        Self::new(viewport, dimensions, gradient, message.power_factor)
    }
}

impl From<RenderRequest> for RenderMessage {
    fn from(request: RenderRequest) -> Self {
        Self {
            dimensions: MessageSize {
                width: request.dimensions.width(),
                height: request.dimensions.height(),
            },
            center: MessageCenter {
                x: request.viewport.center_x,
                y: request.viewport.center_y,
            },
            zoom: request.viewport.zoom,
            gradient: request.gradient.into_vec(),
            power_factor: request.power_factor,
        }
    }
}
