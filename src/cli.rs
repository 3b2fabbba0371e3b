//! Command line surface mirroring the window's menu commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::AppConfig;
use crate::controller::FontController;
use crate::gui::{self, EguiHost, GuiController};
use crate::prefs::JsonPreferenceStore;
use crate::registry::StyleHost;

#[derive(Debug, Parser)]
#[command(name = "font-tuner", version, about = "Adjust and persist UI font sizes")]
pub struct Cli {
    /// Directory holding the defaults/current snapshots
    #[arg(long, global = true, value_name = "DIR")]
    pub settings_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// Open the font tuner window (default)
    Open,
    /// Undo the global zoom on every style and forget it
    ResetGlobal,
    /// Capture the current sizes as the new defaults
    RebuildDefaults,
    /// Drop every per-style override
    ResetCurrent,
    /// Reveal the snapshot folder in the file browser
    OpenSettingsFolder,
    /// Print every style with its size and override status
    List,
}

fn build_controller(cli: &Cli, config: &AppConfig) -> GuiController {
    let snapshot_dir = config.snapshot_dir(cli.settings_dir.as_deref());
    let prefs = JsonPreferenceStore::open(JsonPreferenceStore::default_path());
    info!(
        snapshots = %snapshot_dir.display(),
        prefs = %prefs.path().display(),
        "Using settings locations"
    );
    FontController::new(
        EguiHost::new(&config.custom_styles),
        prefs,
        snapshot_dir,
        config.save_delay(),
    )
}

pub fn run(cli: Cli, config: &AppConfig) -> Result<()> {
    let controller = build_controller(&cli, config);

    match cli.command.unwrap_or(CliCommand::Open) {
        CliCommand::Open => gui::run_gui(controller, config),
        CliCommand::ResetGlobal => headless(controller, |controller| {
            if controller.reset_global_zoom() {
                println!("Global zoom reset");
            } else {
                println!("Global zoom already at 0");
            }
            Ok(())
        }),
        CliCommand::RebuildDefaults => headless(controller, |controller| {
            controller.rebuild_defaults_from_current();
            println!("Defaults written to {}", controller.paths().defaults().display());
            Ok(())
        }),
        CliCommand::ResetCurrent => headless(controller, |controller| {
            controller.reset_current_to_defaults();
            println!("Overrides cleared in {}", controller.paths().current().display());
            Ok(())
        }),
        CliCommand::OpenSettingsFolder => headless(controller, |controller| {
            controller
                .reveal_settings_folder()
                .context("Failed to open settings folder")
        }),
        CliCommand::List => headless(controller, |controller| {
            println!(
                "host: {}  defaults: {}  overrides: {}  global zoom: {:+}",
                controller.host().snapshot_tag(),
                controller.defaults().len(),
                controller.overrides().len(),
                controller.global_delta()
            );
            for group in controller.style_groups() {
                println!("[{}]", group.label);
                for row in &group.rows {
                    println!("  {:<24} {:>3}  {}", row.style.name(), row.shown_size, row.tag());
                }
            }
            Ok(())
        }),
    }
}

/// Run `action` against the factory styles after the usual startup pass
fn headless(
    mut controller: GuiController,
    action: impl FnOnce(&mut GuiController) -> Result<()>,
) -> Result<()> {
    controller.initialize();
    let result = action(&mut controller);
    controller.flush();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_opens_window() {
        let cli = Cli::try_parse_from(["font-tuner"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.settings_dir, None);
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["font-tuner", "reset-global"]).unwrap();
        assert_eq!(cli.command, Some(CliCommand::ResetGlobal));

        let cli = Cli::try_parse_from(["font-tuner", "open-settings-folder"]).unwrap();
        assert_eq!(cli.command, Some(CliCommand::OpenSettingsFolder));
    }

    #[test]
    fn test_settings_dir_is_global() {
        let cli = Cli::try_parse_from(["font-tuner", "list", "--settings-dir", "/tmp/fonts"]).unwrap();
        assert_eq!(cli.command, Some(CliCommand::List));
        assert_eq!(cli.settings_dir, Some(PathBuf::from("/tmp/fonts")));
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["font-tuner", "explode"]).is_err());
    }
}
