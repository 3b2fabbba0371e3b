//! egui as a style host
//!
//! egui keeps its text styles in `Style::text_styles`. The host mirrors them as
//! live [`Style`] objects: the built-in text styles form the static registry,
//! the skin carries the same built-ins plus the styles this window renders
//! with, and the configured custom styles become the skin's custom list.
//! `repaint_all` pushes every live size back into the egui context.

use std::path::Path;
use std::process::Command;
use std::thread;

use egui::{FontFamily, FontId, TextStyle};
use tracing::{debug, info};

use super::constants::{ROW_STYLE, TAG_STYLE};
use crate::config::CustomStyle;
use crate::error::{Result, TunerError};
use crate::registry::{self, PropertyValue, Skin, StaticRegistry, StyleHost, StyleSource};
use crate::style::Style;

pub struct EguiHost {
    registry: StaticRegistry,
    skin: Skin,
    ctx: Option<egui::Context>,
}

impl EguiHost {
    /// Build the host from egui's factory text styles plus `custom` styles
    pub fn new(custom: &[CustomStyle]) -> Self {
        let mut registry = StaticRegistry::new();
        let mut skin = Skin::new("egui");

        let factory = egui::Style::default();
        for (text_style, font_id) in &factory.text_styles {
            let name = text_style.to_string();
            let style = Style::shared(name.clone(), font_id.size.round() as i32);
            registry.push(name.to_lowercase(), &style);
            skin.add_style(name.to_lowercase(), style);
        }

        let body = factory
            .text_styles
            .get(&TextStyle::Body)
            .map(|font| font.size.round() as i32)
            .unwrap_or(crate::constants::font::FALLBACK_SIZE);
        // egui's style also carries values that are not text styles
        let override_font = match &factory.override_font_id {
            Some(_) => PropertyValue::Other("FontId".to_string()),
            None => PropertyValue::Null,
        };
        skin.properties.push("override_font_id", override_font);
        skin.properties.push("spacing", PropertyValue::Other("Spacing".to_string()));

        skin.add_style("row", Style::shared(ROW_STYLE, body));
        skin.add_style("tag", Style::shared(TAG_STYLE, body - 2));

        for custom in custom {
            skin.custom.push(Some(Style::shared(custom.name.clone(), custom.size)));
        }

        debug!(
            registry = registry.len(),
            custom = skin.custom.len(),
            "Built egui style host"
        );
        Self { registry, skin, ctx: None }
    }

    /// Start mirroring sizes into `ctx`
    pub fn attach(&mut self, ctx: egui::Context) {
        self.ctx = Some(ctx);
    }
}

/// egui's text style for a style name
pub fn text_style_for(name: &str) -> TextStyle {
    match name {
        "Small" => TextStyle::Small,
        "Body" => TextStyle::Body,
        "Monospace" => TextStyle::Monospace,
        "Button" => TextStyle::Button,
        "Heading" => TextStyle::Heading,
        other => TextStyle::Name(other.into()),
    }
}

/// Start `command` without blocking the UI; a background thread waits on it
/// so the exited child is reaped
fn spawn_reaped(mut command: Command) -> std::io::Result<()> {
    let mut child = command.spawn()?;
    thread::spawn(move || match child.wait() {
        Ok(status) => debug!(%status, "File browser exited"),
        Err(e) => debug!(error = %e, "Failed to wait on file browser"),
    });
    Ok(())
}

fn family_for(name: &str) -> FontFamily {
    if name == "Monospace" {
        FontFamily::Monospace
    } else {
        FontFamily::Proportional
    }
}

impl StyleHost for EguiHost {
    fn sources(&self) -> Vec<&dyn StyleSource> {
        vec![&self.registry, &self.skin.properties, &self.skin.custom]
    }

    fn snapshot_tag(&self) -> &str {
        &self.skin.name
    }

    fn repaint_all(&self) {
        let Some(ctx) = &self.ctx else {
            return;
        };
        ctx.all_styles_mut(|egui_style| {
            for item in registry::enumerate(self) {
                let name = item.style.name();
                let font = FontId::new(item.style.shown_size() as f32, family_for(name));
                egui_style.text_styles.insert(text_style_for(name), font);
            }
        });
        ctx.request_repaint();
    }

    fn reveal_folder(&self, path: &Path) -> Result<()> {
        let program = if cfg!(target_os = "macos") {
            "open"
        } else if cfg!(target_os = "windows") {
            "explorer"
        } else {
            "xdg-open"
        };
        let mut command = Command::new(program);
        command.arg(path);
        spawn_reaped(command).map_err(|e| TunerError::io(path, e))?;
        info!(path = %path.display(), program, "Revealed settings folder");
        Ok(())
    }
}
