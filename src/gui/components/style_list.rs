//! Scrollable style list, one collapsing group per style source

use eframe::egui;

use crate::controller::{RowAction, StyleGroup, StyleRow};
use crate::gui::constants::*;
use crate::style::StyleRef;

/// Use a named text style when the context knows it, else fall back to `fallback`
fn text_style(ui: &egui::Ui, name: &str, fallback: egui::TextStyle) -> egui::TextStyle {
    let named = egui::TextStyle::Name(name.into());
    if ui.style().text_styles.contains_key(&named) {
        named
    } else {
        fallback
    }
}

fn row_ui(ui: &mut egui::Ui, row: &StyleRow) -> Option<RowAction> {
    let mut action = None;
    let name_style = text_style(ui, ROW_STYLE, egui::TextStyle::Body);
    let tag_style = text_style(ui, TAG_STYLE, egui::TextStyle::Small);

    ui.horizontal(|ui| {
        ui.add_sized(
            [NAME_COLUMN_WIDTH, ui.spacing().interact_size.y],
            egui::Label::new(egui::RichText::new(row.style.name()).text_style(name_style)).truncate(),
        );

        let color = if row.is_override { TAG_OVERRIDE } else { TAG_DEFAULT };
        ui.label(egui::RichText::new(row.tag()).text_style(tag_style).color(color));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("+").clicked() {
                action = Some(RowAction::Increment);
            }
            ui.label(egui::RichText::new(row.shown_size.to_string()).monospace());
            if ui.small_button("-").clicked() {
                action = Some(RowAction::Decrement);
            }
        });
    });

    action
}

/// Renders every group and returns the row the user clicked, if any
pub fn ui(ui: &mut egui::Ui, groups: &[StyleGroup]) -> Option<(StyleRef, RowAction)> {
    let mut clicked = None;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for group in groups {
                egui::CollapsingHeader::new(format!("{} ({})", group.label, group.rows.len()))
                    .id_salt(&group.label)
                    .default_open(true)
                    .show(ui, |ui| {
                        for row in &group.rows {
                            if let Some(action) = row_ui(ui, row) {
                                clicked = Some((StyleRef::clone(&row.style), action));
                            }
                        }
                    });
            }

            if groups.is_empty() {
                ui.label(egui::RichText::new("(No styles found)").italics().weak());
            }
        });

    clicked
}
