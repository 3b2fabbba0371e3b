//! egui front end: the style host and the tuner window

pub mod components;
pub mod constants;
pub mod host;
mod manager;

pub use host::EguiHost;
pub use manager::{run_gui, GuiController};
