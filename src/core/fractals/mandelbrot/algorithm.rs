use crate::core::actions::render_pass::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::dimensions::Dimensions;
use crate::core::data::point::Point;
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::kernel::escape_time;
use crate::core::util::pixel_to_complex_coords::{
    PixelToComplexCoordsError, pixel_to_complex_coords,
};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MandelbrotAlgorithm {
    viewport: Viewport,
    dimensions: Dimensions,
}

impl MandelbrotAlgorithm {
    #[must_use]
    pub fn new(viewport: Viewport, dimensions: Dimensions) -> Self {
        Self {
            viewport,
            dimensions,
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl FractalAlgorithm for MandelbrotAlgorithm {
    type Success = u32;
    type Failure = PixelToComplexCoordsError;

    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
        let c = pixel_to_complex_coords(pixel, self.dimensions, &self.viewport)?;

        Ok(escape_time(c))
    }
}
