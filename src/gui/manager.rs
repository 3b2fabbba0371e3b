//! Font tuner window implemented with egui/eframe

use std::time::Instant;

use anyhow::{anyhow, Result};
use eframe::{egui, CreationContext, NativeOptions};
use tracing::{error, info};

use super::components::{global_zoom, style_list};
use super::components::global_zoom::ZoomAction;
use super::constants::*;
use super::host::EguiHost;
use crate::config::AppConfig;
use crate::controller::FontController;
use crate::prefs::JsonPreferenceStore;

pub type GuiController = FontController<EguiHost, JsonPreferenceStore>;

/// Parameterless commands offered in the menu bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuCommand {
    ResetGlobalZoom,
    RebuildDefaults,
    ResetCurrent,
    OpenSettingsFolder,
}

struct StatusMessage {
    text: String,
    color: egui::Color32,
}

struct TunerApp {
    controller: GuiController,
    status_message: Option<StatusMessage>,
}

impl TunerApp {
    fn new(cc: &CreationContext<'_>, mut controller: GuiController) -> Self {
        info!("Initializing font tuner window");
        controller.host_mut().attach(cc.egui_ctx.clone());
        controller.initialize();

        Self {
            controller,
            status_message: None,
        }
    }

    fn run_command(&mut self, command: MenuCommand) {
        info!(?command, "Menu command");
        let text = match command {
            MenuCommand::ResetGlobalZoom => {
                if self.controller.reset_global_zoom() {
                    "Global zoom reset".to_string()
                } else {
                    "Global zoom already at 0".to_string()
                }
            }
            MenuCommand::RebuildDefaults => {
                self.controller.rebuild_defaults_from_current();
                "Defaults rebuilt from current sizes".to_string()
            }
            MenuCommand::ResetCurrent => {
                self.controller.reset_current_to_defaults();
                "All styles reset to defaults".to_string()
            }
            MenuCommand::OpenSettingsFolder => match self.controller.reveal_settings_folder() {
                Ok(()) => format!("Opened {}", self.controller.paths().dir().display()),
                Err(err) => {
                    error!(error = %err, "Failed to open settings folder");
                    self.status_message = Some(StatusMessage {
                        text: format!("Failed to open settings folder: {err}"),
                        color: STATUS_ERROR,
                    });
                    return;
                }
            },
        };
        self.status_message = Some(StatusMessage { text, color: STATUS_OK });
    }

    fn menu_bar(&mut self, ui: &mut egui::Ui) {
        let mut command = None;
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("Fonts", |ui| {
                for (label, cmd) in [
                    ("Reset Global Zoom", MenuCommand::ResetGlobalZoom),
                    ("Rebuild Defaults From Current", MenuCommand::RebuildDefaults),
                    ("Reset Current To Defaults", MenuCommand::ResetCurrent),
                    ("Open Settings Folder", MenuCommand::OpenSettingsFolder),
                ] {
                    if ui.button(label).clicked() {
                        command = Some(cmd);
                        ui.close();
                    }
                }
            });
        });
        if let Some(command) = command {
            self.run_command(command);
        }
    }
}

impl eframe::App for TunerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu").show(ctx, |ui| self.menu_bar(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(PADDING);

            match global_zoom::ui(ui, self.controller.global_delta()) {
                Some(ZoomAction::Nudge(step)) => {
                    self.controller.nudge_global(step);
                }
                Some(ZoomAction::Set(value)) => {
                    self.controller.set_global_delta(value);
                }
                None => {}
            }

            if let Some(message) = &self.status_message {
                ui.add_space(ITEM_SPACING);
                ui.colored_label(message.color, &message.text);
            }
            if self.controller.has_pending_save() {
                ui.add_space(ITEM_SPACING);
                ui.label(egui::RichText::new("Saving...").small().weak());
            }

            ui.add_space(SECTION_SPACING);
            ui.separator();

            let groups = self.controller.style_groups();
            if let Some((style, action)) = style_list::ui(ui, &groups) {
                self.controller.adjust_row(&style, action);
            }
        });

        // Each frame doubles as the idle tick for the debounced save
        let now = Instant::now();
        self.controller.on_idle(now);
        if let Some(left) = self.controller.pending_save_in(now) {
            ctx.request_repaint_after(left);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if self.controller.flush() {
            info!("Flushed pending snapshot on exit");
        }
        info!("Font tuner exiting");
    }
}

pub fn run_gui(controller: GuiController, config: &AppConfig) -> Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width as f32, config.window_height as f32])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title("Font Tuner"),
        ..Default::default()
    };

    eframe::run_native(
        "Font Tuner",
        options,
        Box::new(move |cc| Ok(Box::new(TunerApp::new(cc, controller)))),
    )
    .map_err(|err| anyhow!("Failed to launch font tuner window: {err}"))
}
