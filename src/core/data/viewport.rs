use crate::core::data::complex::Complex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Half-width of the complex plane visible at zoom 1.
pub const BASE_HALF_WIDTH: f64 = 2.5;

#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum ViewportError {
    #[error("zoom must be a positive finite number, got {0}")]
    InvalidZoom(f64),
    #[error("viewport center must be finite, got ({center_x}, {center_y})")]
    NonFiniteCenter { center_x: f64, center_y: f64 },
}

/// Snapshot of where the camera looks on the complex plane.
///
/// Fields are public because the interaction layer mutates them between
/// requests; [`Viewport::validate`] runs before a render request is built.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub center_x: f64,
    pub center_y: f64,
    pub zoom: f64,
}

impl Viewport {
    pub fn new(center_x: f64, center_y: f64, zoom: f64) -> Result<Self, ViewportError> {
        let viewport = Self {
            center_x,
            center_y,
            zoom,
        };
        viewport.validate()?;

        Ok(viewport)
    }

    pub fn validate(&self) -> Result<(), ViewportError> {
        if !self.center_x.is_finite() || !self.center_y.is_finite() {
            return Err(ViewportError::NonFiniteCenter {
                center_x: self.center_x,
                center_y: self.center_y,
            });
        }

        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(ViewportError::InvalidZoom(self.zoom));
        }

        Ok(())
    }

    #[must_use]
    pub fn center(&self) -> Complex {
        Complex::new(self.center_x, self.center_y)
    }

    #[must_use]
    pub fn half_width(&self) -> f64 {
        BASE_HALF_WIDTH / self.zoom
    }
}
