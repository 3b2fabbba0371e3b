pub mod global_zoom;
pub mod style_list;
