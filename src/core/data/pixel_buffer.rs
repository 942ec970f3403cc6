use crate::core::data::dimensions::Dimensions;
use crate::core::data::point::Point;
use thiserror::Error;

pub const BYTES_PER_PIXEL: usize = 4;

fn dimensions_to_buffer_size(dimensions: Dimensions) -> usize {
    dimensions.pixel_count() * BYTES_PER_PIXEL
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PixelBufferError {
    #[error("pixel at x:{}, y:{} outside of {dimensions} buffer", .pixel.x, .pixel.y)]
    PixelOutsideBounds { pixel: Point, dimensions: Dimensions },
    #[error("buffer for {dimensions} needs {expected} bytes, got {actual}")]
    BoundsMismatch {
        dimensions: Dimensions,
        expected: usize,
        actual: usize,
    },
}

pub type PixelBufferData = Vec<u8>;

/// Row-major RGBA8 pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    dimensions: Dimensions,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    /// A fully transparent buffer of the given size.
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            buffer: vec![0; dimensions_to_buffer_size(dimensions)],
        }
    }

    pub fn from_data(
        dimensions: Dimensions,
        buffer: PixelBufferData,
    ) -> Result<Self, PixelBufferError> {
        let expected = dimensions_to_buffer_size(dimensions);

        if expected != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                dimensions,
                expected,
                actual: buffer.len(),
            });
        }

        Ok(Self { dimensions, buffer })
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    #[must_use]
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// Reallocates to new dimensions, discarding the old contents. A no-op
    /// when the size is unchanged.
    pub fn resize(&mut self, dimensions: Dimensions) {
        if self.dimensions != dimensions {
            self.dimensions = dimensions;
            self.buffer = vec![0; dimensions_to_buffer_size(dimensions)];
        }
    }

    pub fn set_pixel(&mut self, pixel: Point, rgba: [u8; 4]) -> Result<(), PixelBufferError> {
        let index = self.index_of(pixel)?;
        self.buffer[index..index + BYTES_PER_PIXEL].copy_from_slice(&rgba);

        Ok(())
    }

    pub fn pixel(&self, pixel: Point) -> Result<[u8; 4], PixelBufferError> {
        let index = self.index_of(pixel)?;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.buffer[index..index + BYTES_PER_PIXEL]);

        Ok(rgba)
    }

    /// Drops the alpha channel, e.g. for PPM output.
    #[must_use]
    pub fn to_rgb(&self) -> Vec<u8> {
        self.buffer
            .chunks_exact(BYTES_PER_PIXEL)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    }

    fn index_of(&self, pixel: Point) -> Result<usize, PixelBufferError> {
        if pixel.x >= self.dimensions.width() || pixel.y >= self.dimensions.height() {
            return Err(PixelBufferError::PixelOutsideBounds {
                pixel,
                dimensions: self.dimensions,
            });
        }

        let width = self.dimensions.width() as usize;
        Ok((pixel.y as usize * width + pixel.x as usize) * BYTES_PER_PIXEL)
    }
}
