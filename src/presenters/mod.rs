pub mod channel_sink;
pub mod file;
pub mod surface;
