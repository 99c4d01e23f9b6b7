pub mod chest;
pub mod particles;
pub mod render_surface;
pub mod skin_picker;
