pub mod gradient;
pub mod hsv;
pub mod stops;
