//! GUI-specific constants for layout, tag colors and text style names

use egui;

/// Manager window minimum dimensions
pub const WINDOW_MIN_WIDTH: f32 = 360.0;
pub const WINDOW_MIN_HEIGHT: f32 = 320.0;

/// Layout spacing
pub const PADDING: f32 = 8.0;
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;

/// Width of the style name column
pub const NAME_COLUMN_WIDTH: f32 = 160.0;

/// Row tag colors
pub const TAG_OVERRIDE: egui::Color32 = egui::Color32::from_rgb(230, 150, 30);
pub const TAG_DEFAULT: egui::Color32 = egui::Color32::from_rgb(140, 140, 140);

/// Status colors
pub const STATUS_OK: egui::Color32 = egui::Color32::from_rgb(0, 200, 0);
pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);

/// Skin styles the window itself renders with
pub const ROW_STYLE: &str = "Row";
pub const TAG_STYLE: &str = "Tag";
