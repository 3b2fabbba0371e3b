//! Global zoom control: decrement, value, increment and a bounded slider

use eframe::egui;

use crate::constants::zoom::{MAX_DELTA, MIN_DELTA};
use crate::gui::constants::ITEM_SPACING;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomAction {
    /// Shift the delta by a step
    Nudge(i32),
    /// Move the delta to an absolute value
    Set(i32),
}

/// Renders the global zoom group and returns the requested change, if any
pub fn ui(ui: &mut egui::Ui, delta: i32) -> Option<ZoomAction> {
    let mut action = None;

    ui.group(|ui| {
        ui.label(egui::RichText::new("Global Zoom").strong());
        ui.add_space(ITEM_SPACING);

        ui.horizontal(|ui| {
            if ui
                .add_enabled(delta > MIN_DELTA, egui::Button::new("-"))
                .clicked()
            {
                action = Some(ZoomAction::Nudge(-1));
            }
            ui.label(egui::RichText::new(format!("{delta:+}")).monospace());
            if ui
                .add_enabled(delta < MAX_DELTA, egui::Button::new("+"))
                .clicked()
            {
                action = Some(ZoomAction::Nudge(1));
            }

            ui.add_space(ITEM_SPACING);

            let mut value = delta;
            if ui
                .add(egui::Slider::new(&mut value, MIN_DELTA..=MAX_DELTA).show_value(false))
                .changed()
            {
                action = Some(ZoomAction::Set(value));
            }
        });

        ui.label(
            egui::RichText::new("(Shifts every style by the same amount)")
                .small()
                .italics(),
        );
    });

    action
}
