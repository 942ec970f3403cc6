use rayon::prelude::*;

use crate::core::actions::render_pass::render_pass::{RenderError, render_to_buffer};
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::render_request::{RenderRequest, RenderRequestError};
use crate::core::fractals::mandelbrot::locations::Location;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GalleryError {
    #[error(transparent)]
    Request(#[from] RenderRequestError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug)]
pub struct GalleryFrame {
    pub name: &'static str,
    pub buffer: Result<PixelBuffer, GalleryError>,
}

/// Renders one whole frame per location, several frames at a time.
///
/// Each frame is a plain single-threaded render pass; rayon only spreads the
/// frames across its pool. Results come back in `locations` order.
pub fn render_gallery(template: &RenderRequest, locations: &[Location]) -> Vec<GalleryFrame> {
    locations
        .par_iter()
        .map(|location| {
            let buffer = template
                .with_viewport(location.viewport)
                .map_err(GalleryError::from)
                .and_then(|request| Ok(render_to_buffer(&request)?));

            GalleryFrame {
                name: location.name,
                buffer,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::colour::stops::GradientStops;
    use crate::core::data::dimensions::Dimensions;
    use crate::core::data::viewport::Viewport;
    use crate::core::fractals::mandelbrot::locations::FAVOURITE_LOCATIONS;

    fn template() -> RenderRequest {
        RenderRequest::new(
            Viewport::new(0.0, 0.0, 1.0).unwrap(),
            Dimensions::new(12, 8).unwrap(),
            GradientStops::default(),
            0.2,
        )
        .unwrap()
    }

    #[test]
    fn test_gallery_matches_sequential_renders_in_order() {
        let frames = render_gallery(&template(), &FAVOURITE_LOCATIONS);

        assert_eq!(frames.len(), FAVOURITE_LOCATIONS.len());

        for (frame, location) in frames.iter().zip(FAVOURITE_LOCATIONS.iter()) {
            assert_eq!(frame.name, location.name);

            let expected =
                render_to_buffer(&template().with_viewport(location.viewport).unwrap()).unwrap();
            assert_eq!(frame.buffer.as_ref().unwrap(), &expected);
        }
    }

    #[test]
    fn test_bad_location_fails_alone() {
        let locations = [
            Location {
                name: "broken",
                viewport: Viewport {
                    center_x: 0.0,
                    center_y: 0.0,
                    zoom: 0.0,
                },
            },
            FAVOURITE_LOCATIONS[0],
        ];

        let frames = render_gallery(&template(), &locations);

        assert!(matches!(frames[0].buffer, Err(GalleryError::Request(_))));
        assert!(frames[1].buffer.is_ok());
    }

    #[test]
    fn test_empty_gallery() {
        assert!(render_gallery(&template(), &[]).is_empty());
    }
}
