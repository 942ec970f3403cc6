use crate::core::data::complex::Complex;
use crate::core::data::dimensions::Dimensions;
use crate::core::data::point::Point;
use crate::core::data::viewport::Viewport;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum PixelToComplexCoordsError {
    #[error("pixel (x: {}, y: {}) is outside the {dimensions} bitmap", .point.x, .point.y)]
    PointOutsideBitmap { point: Point, dimensions: Dimensions },
}

/// Maps a pixel to the complex plane around the viewport center.
///
/// The image width sets the scale on both axes, so pixels stay square and the
/// vertical extent follows from the aspect ratio.
pub fn pixel_to_complex_coords(
    point: Point,
    dimensions: Dimensions,
    viewport: &Viewport,
) -> Result<Complex, PixelToComplexCoordsError> {
    if point.x >= dimensions.width() || point.y >= dimensions.height() {
        return Err(PixelToComplexCoordsError::PointOutsideBitmap { point, dimensions });
    }

    let width = f64::from(dimensions.width());
    let height = f64::from(dimensions.height());
    let scale = viewport.half_width() / width;

    let real = viewport.center_x + (f64::from(point.x) - width / 2.0) * scale;
    let imag = viewport.center_y + (f64::from(point.y) - height / 2.0) * scale;

    Ok(Complex { real, imag })
}
