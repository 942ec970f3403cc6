pub mod render_gallery;
pub mod render_pass;
