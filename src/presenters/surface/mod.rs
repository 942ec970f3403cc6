pub mod shared_surface;
