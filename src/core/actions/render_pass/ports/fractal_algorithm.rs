use crate::core::data::dimensions::Dimensions;
use crate::core::data::point::Point;
use std::error::Error;

pub trait FractalAlgorithm {
    type Success;
    type Failure: Error;

    /// Size of the bitmap the algorithm was set up for.
    fn dimensions(&self) -> Dimensions;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure>;
}
