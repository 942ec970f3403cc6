use crate::core::actions::render_pass::ports::colour_map::ColourMap;
use crate::core::actions::render_pass::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::dimensions::Dimensions;
use crate::core::data::pixel_buffer::{BYTES_PER_PIXEL, PixelBuffer};
use crate::core::data::point::Point;
use crate::core::data::render_request::RenderRequest;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
use crate::core::fractals::mandelbrot::colour_map::GradientColourMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("target buffer is {actual} but the render is for {expected}")]
    DimensionsMismatch {
        expected: Dimensions,
        actual: Dimensions,
    },
    #[error("fractal algorithm error: {0}")]
    Algorithm(String),
    #[error("colour map error: {0}")]
    ColourMap(String),
}

/// Computes and colours every pixel of `buffer`, row by row.
///
/// Runs on the calling thread. The buffer must already have the algorithm's
/// dimensions; it is filled in place so a surface can hand out its own
/// storage.
pub fn render_pass<Alg, CMap>(
    algorithm: &Alg,
    colour_map: &CMap,
    buffer: &mut PixelBuffer,
) -> Result<(), RenderError>
where
    Alg: FractalAlgorithm,
    CMap: ColourMap<T = Alg::Success>,
{
    let dimensions = algorithm.dimensions();
    if buffer.dimensions() != dimensions {
        return Err(RenderError::DimensionsMismatch {
            expected: dimensions,
            actual: buffer.dimensions(),
        });
    }

    let width = dimensions.width();
    let pixels = buffer.buffer_mut().chunks_exact_mut(BYTES_PER_PIXEL);

    for (index, rgba) in pixels.enumerate() {
        let index = index as u32;
        let pixel = Point {
            x: index % width,
            y: index / width,
        };

        let value = algorithm
            .compute(pixel)
            .map_err(|err| RenderError::Algorithm(err.to_string()))?;
        let colour = colour_map
            .map(value)
            .map_err(|err| RenderError::ColourMap(err.to_string()))?;

        rgba.copy_from_slice(&colour.to_rgba());
    }

    Ok(())
}

/// Renders a request into an existing buffer of matching size.
pub fn render_request(request: &RenderRequest, buffer: &mut PixelBuffer) -> Result<(), RenderError> {
    let algorithm = MandelbrotAlgorithm::new(request.viewport(), request.dimensions());
    let colour_map = GradientColourMap::new(request.gradient().as_slice(), request.power_factor());

    render_pass(&algorithm, &colour_map, buffer)
}

pub fn render_to_buffer(request: &RenderRequest) -> Result<PixelBuffer, RenderError> {
    let mut buffer = PixelBuffer::new(request.dimensions());
    render_request(request, &mut buffer)?;

    Ok(buffer)
}
