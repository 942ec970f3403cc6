use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Largest render target accepted, 16384x16384 (1 GiB of RGBA).
pub const MAX_PIXELS: u64 = 1 << 28;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum DimensionsError {
    #[error("dimensions must be positive: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("{width}x{height} exceeds the {} pixel limit", MAX_PIXELS)]
    TooLarge { width: u32, height: u32 },
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct RawDimensions {
    width: u32,
    height: u32,
}

/// Native pixel size of a render target.
///
/// This is the size of the buffer actually written, which may be a
/// device-pixel-ratio-scaled multiple of the logical display size.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions")]
pub struct Dimensions {
    width: u32,
    height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Result<Self, DimensionsError> {
        if width == 0 || height == 0 {
            return Err(DimensionsError::InvalidSize { width, height });
        }
        if u64::from(width) * u64::from(height) > MAX_PIXELS {
            return Err(DimensionsError::TooLarge { width, height });
        }

        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Scales a logical size by a device pixel ratio, rounding each side and
    /// never going below one pixel.
    pub fn scaled(width: u32, height: u32, device_pixel_ratio: f64) -> Result<Self, DimensionsError> {
        let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };

        let scale = |side: u32| -> u32 {
            if side == 0 {
                0
            } else {
                ((side as f64 * ratio).round() as u32).max(1)
            }
        };

        Self::new(scale(width), scale(height))
    }
}

impl Default for Dimensions {
    /// 800x600.
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl TryFrom<RawDimensions> for Dimensions {
    type Error = DimensionsError;

    fn try_from(raw: RawDimensions) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let dimensions = Dimensions::new(64, 48).unwrap();

        assert_eq!(dimensions.width(), 64);
        assert_eq!(dimensions.height(), 48);
        assert_eq!(dimensions.pixel_count(), 3072);
        assert_eq!(dimensions.to_string(), "64x48");
    }

    #[test]
    fn test_zero_sides_are_rejected() {
        assert_eq!(
            Dimensions::new(0, 10),
            Err(DimensionsError::InvalidSize { width: 0, height: 10 })
        );
        assert_eq!(
            Dimensions::new(10, 0),
            Err(DimensionsError::InvalidSize { width: 10, height: 0 })
        );
    }

    #[test]
    fn test_oversized_targets_are_rejected() {
        assert!(Dimensions::new(16_384, 16_384).is_ok());
        assert_eq!(
            Dimensions::new(16_385, 16_384),
            Err(DimensionsError::TooLarge {
                width: 16_385,
                height: 16_384
            })
        );
        assert!(matches!(
            Dimensions::new(100_000, 100_000),
            Err(DimensionsError::TooLarge { .. })
        ));
        assert!(matches!(
            Dimensions::scaled(10_000, 10_000, 2.0),
            Err(DimensionsError::TooLarge { .. })
        ));

        let err = serde_json::from_str::<Dimensions>(r#"{"width": 100000, "height": 100000}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_scaled_by_device_pixel_ratio() {
        assert_eq!(
            Dimensions::scaled(400, 300, 2.0).unwrap(),
            Dimensions::new(800, 600).unwrap()
        );
        assert_eq!(
            Dimensions::scaled(3, 3, 1.5).unwrap(),
            Dimensions::new(5, 5).unwrap()
        );
    }

    #[test]
    fn test_scaled_ignores_nonsense_ratio() {
        assert_eq!(
            Dimensions::scaled(10, 20, f64::NAN).unwrap(),
            Dimensions::new(10, 20).unwrap()
        );
        assert_eq!(
            Dimensions::scaled(10, 20, -1.0).unwrap(),
            Dimensions::new(10, 20).unwrap()
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Dimensions = serde_json::from_str(r#"{"width": 4, "height": 2}"#).unwrap();
        assert_eq!(ok, Dimensions::new(4, 2).unwrap());

        let err = serde_json::from_str::<Dimensions>(r#"{"width": 0, "height": 2}"#);
        assert!(err.is_err());
    }
}
