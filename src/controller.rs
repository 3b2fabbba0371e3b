//! Reconciles persisted snapshots with the live styles and applies edits
//!
//! Startup sequence (see [`FontController::initialize`]):
//! 1. load the defaults snapshot, capturing live sizes if there is none
//! 2. load the current snapshot and rewrite it as overrides-only when stale
//! 3. apply the persisted global delta to every style
//! 4. apply each override as an absolute size
//! 5. repaint, then release the init surface
//!
//! Any failure in 1-4 is logged and swallowed; the init surface is released
//! on every path.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::constants::zoom::{MAX_DELTA, MIN_DELTA, PREF_KEY};
use crate::debounce::SaveDebouncer;
use crate::error::Result;
use crate::prefs::PreferenceStore;
use crate::registry::{self, StyleHost};
use crate::snapshot::{self, SizeMap, SnapshotPaths};
use crate::style::{self, Style, StyleRef};

/// Interactive "-" / "+" on a single style row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Decrement,
    Increment,
}

impl RowAction {
    fn step(self) -> i32 {
        match self {
            RowAction::Decrement => -1,
            RowAction::Increment => 1,
        }
    }
}

/// What the style list shows for one style
#[derive(Debug, Clone)]
pub struct StyleRow {
    pub style: StyleRef,
    pub shown_size: i32,
    pub is_override: bool,
}

impl StyleRow {
    pub fn tag(&self) -> &'static str {
        if self.is_override { "override" } else { "default" }
    }
}

/// Rows produced by one style source
#[derive(Debug, Clone)]
pub struct StyleGroup {
    pub label: String,
    pub rows: Vec<StyleRow>,
}

#[derive(Debug)]
struct Session {
    defaults: SizeMap,
    overrides: SizeMap,
    save: SaveDebouncer,
}

/// Holds the host's init surface open for its lifetime
struct InitSurface<'a, H: StyleHost + ?Sized> {
    host: &'a H,
}

impl<'a, H: StyleHost + ?Sized> InitSurface<'a, H> {
    fn open(host: &'a H) -> Self {
        host.open_init_surface();
        Self { host }
    }
}

impl<H: StyleHost + ?Sized> Drop for InitSurface<'_, H> {
    fn drop(&mut self) {
        self.host.close_init_surface();
    }
}

pub struct FontController<H: StyleHost, P: PreferenceStore> {
    host: H,
    prefs: P,
    paths: SnapshotPaths,
    session: Session,
}

impl<H: StyleHost, P: PreferenceStore> FontController<H, P> {
    pub fn new(host: H, prefs: P, snapshot_dir: impl Into<PathBuf>, save_delay: Duration) -> Self {
        let paths = SnapshotPaths::new(snapshot_dir, host.snapshot_tag());
        Self {
            host,
            prefs,
            paths,
            session: Session {
                defaults: SizeMap::new(),
                overrides: SizeMap::new(),
                save: SaveDebouncer::new(save_delay),
            },
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn paths(&self) -> &SnapshotPaths {
        &self.paths
    }

    pub fn defaults(&self) -> &SizeMap {
        &self.session.defaults
    }

    pub fn overrides(&self) -> &SizeMap {
        &self.session.overrides
    }

    /// Run the startup reconciliation. Returns false if it failed part-way.
    pub fn initialize(&mut self) -> bool {
        let result = {
            let _surface = InitSurface::open(&self.host);
            let result = reconcile(&self.host, &self.prefs, &self.paths, &mut self.session);
            self.host.repaint_all();
            result
        };

        match result {
            Ok(()) => {
                info!(
                    defaults = self.session.defaults.len(),
                    overrides = self.session.overrides.len(),
                    "Font sizes initialized"
                );
                true
            }
            Err(e) => {
                warn!(error = %e, "Font size initialization failed, continuing with live sizes");
                false
            }
        }
    }

    /// Persisted global delta; unreadable preferences count as zero
    pub fn global_delta(&self) -> i32 {
        self.prefs
            .get_int(PREF_KEY)
            .unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring unreadable global delta");
                None
            })
            .unwrap_or(0)
    }

    /// Shift the global delta by `step`, bounded to the zoom range
    pub fn nudge_global(&mut self, step: i32) -> bool {
        let target = self.global_delta().saturating_add(step);
        self.set_global_delta(target)
    }

    /// Move the global delta to `target` (bounded to the zoom range), shifting
    /// every style by the difference
    pub fn set_global_delta(&mut self, target: i32) -> bool {
        let current = self.global_delta();
        let target = target.clamp(MIN_DELTA, MAX_DELTA);
        if target == current {
            return false;
        }

        registry::apply_delta_to_all(&self.host, target - current);
        self.store_global_delta(target);
        self.refresh_overrides();
        info!(from = current, to = target, "Global zoom changed");
        self.host.repaint_all();
        true
    }

    /// Undo the global delta on every style and forget it
    pub fn reset_global_zoom(&mut self) -> bool {
        let delta = self.global_delta();
        if delta == 0 {
            self.host.repaint_all();
            return false;
        }

        registry::apply_delta_to_all(&self.host, -delta);
        self.store_global_delta(0);
        self.refresh_overrides();
        info!(delta, "Global zoom reset");
        self.host.repaint_all();
        true
    }

    /// Capture the live sizes as the new baseline, replacing the defaults file
    pub fn rebuild_defaults_from_current(&mut self) {
        let captured = registry::capture_sizes(&self.host);
        snapshot::save(&captured, &self.paths.defaults());
        info!(styles = captured.len(), "Rebuilt defaults from current styles");

        let pruned = snapshot::compute_overrides(&self.session.overrides, &captured);
        self.session.defaults = captured;
        if pruned.len() != self.session.overrides.len() {
            self.session.overrides = pruned;
            self.mark_dirty();
        }
    }

    /// Drop every override, restore baseline sizes, then reapply the global delta
    pub fn reset_current_to_defaults(&mut self) {
        self.session.defaults = load_or_capture_defaults(&self.host, &self.paths);

        self.session.overrides.clear();
        self.session.save.take();
        snapshot::save(&self.session.overrides, &self.paths.current());

        let restored = registry::apply_absolute_all(&self.host, &self.session.defaults);
        let delta = self.global_delta();
        if delta != 0 {
            registry::apply_delta_to_all(&self.host, delta);
        }
        info!(restored, delta, "Reset styles to defaults");
        self.host.repaint_all();
    }

    pub fn row(&self, style: &StyleRef) -> StyleRow {
        StyleRow {
            style: StyleRef::clone(style),
            shown_size: style.shown_size(),
            is_override: self.session.overrides.contains_key(style.name()),
        }
    }

    /// Every enumerated style, grouped by the source that produced it
    pub fn style_groups(&self) -> Vec<StyleGroup> {
        let mut groups: Vec<StyleGroup> = Vec::new();
        for item in registry::enumerate(&self.host) {
            let row = self.row(&item.style);
            match groups.iter_mut().find(|group| group.label == item.source) {
                Some(group) => group.rows.push(row),
                None => groups.push(StyleGroup {
                    label: item.source.to_string(),
                    rows: vec![row],
                }),
            }
        }
        groups
    }

    /// Step one style's size. Returns false (and touches nothing) when the
    /// clamped size would not change.
    pub fn adjust_row(&mut self, style: &Style, action: RowAction) -> bool {
        let old = style.shown_size();
        let next = style::clamp_size(old.saturating_add(action.step()));
        if next == old {
            debug!(style = %style.name(), size = old, "Size already at limit");
            return false;
        }

        style.set_size(next);
        let name = style.name();
        if self.session.defaults.get(name) == Some(&next) {
            self.session.overrides.remove(name);
        } else {
            self.session.overrides.insert(name.to_string(), next);
        }
        debug!(style = %name, size = next, "Style size changed");

        self.mark_dirty();
        self.host.repaint_all();
        true
    }

    pub fn has_pending_save(&self) -> bool {
        self.session.save.is_armed()
    }

    /// How long until the pending save is due
    pub fn pending_save_in(&self, now: Instant) -> Option<Duration> {
        self.session.save.remaining(now)
    }

    /// Idle tick: write the current snapshot if a debounced save is due
    pub fn on_idle(&mut self, now: Instant) -> bool {
        if !self.session.save.take_due(now) {
            return false;
        }
        snapshot::save(&self.session.overrides, &self.paths.current())
    }

    /// Write a pending current snapshot immediately
    pub fn flush(&mut self) -> bool {
        if !self.session.save.take() {
            return false;
        }
        snapshot::save(&self.session.overrides, &self.paths.current())
    }

    pub fn reveal_settings_folder(&self) -> Result<()> {
        let dir = self.paths.dir();
        if let Err(e) = std::fs::create_dir_all(dir) {
            warn!(path = %dir.display(), error = %e, "Failed to create settings folder");
        }
        self.host.reveal_folder(dir)
    }

    /// Re-record overridden styles at their live size after a uniform shift,
    /// since overrides are reapplied as absolute sizes on the next start.
    /// Entries that land on their default are dropped.
    fn refresh_overrides(&mut self) {
        if self.session.overrides.is_empty() {
            return;
        }

        let live = registry::capture_sizes(&self.host);
        let defaults = &self.session.defaults;
        let mut changed = false;
        self.session.overrides.retain(|name, size| {
            if let Some(&now) = live.get(name) {
                if *size != now {
                    *size = now;
                    changed = true;
                }
            }
            let keep = defaults.get(name) != Some(&*size);
            changed |= !keep;
            keep
        });

        if changed {
            debug!(overrides = self.session.overrides.len(), "Overrides follow global zoom");
            self.mark_dirty();
        }
    }

    fn mark_dirty(&mut self) {
        if self.session.save.arm(Instant::now()) {
            debug!("Scheduled current snapshot save");
        }
    }

    fn store_global_delta(&mut self, delta: i32) {
        let result = if delta == 0 {
            self.prefs.remove(PREF_KEY)
        } else {
            self.prefs.set_int(PREF_KEY, delta)
        };
        if let Err(e) = result {
            warn!(delta, error = %e, "Failed to persist global delta");
        }
    }
}

fn load_or_capture_defaults<H: StyleHost + ?Sized>(host: &H, paths: &SnapshotPaths) -> SizeMap {
    let defaults = snapshot::load(&paths.defaults());
    if !defaults.is_empty() {
        return defaults;
    }

    let captured = registry::capture_sizes(host);
    info!(styles = captured.len(), "Captured factory defaults");
    snapshot::save(&captured, &paths.defaults());
    captured
}

fn reconcile<H, P>(host: &H, prefs: &P, paths: &SnapshotPaths, session: &mut Session) -> Result<()>
where
    H: StyleHost + ?Sized,
    P: PreferenceStore + ?Sized,
{
    session.save.take();
    session.defaults = load_or_capture_defaults(host, paths);

    let current_path = paths.current();
    let loaded = snapshot::load(&current_path);
    let overrides = snapshot::compute_overrides(&loaded, &session.defaults);
    if loaded.is_empty() || overrides.len() != loaded.len() {
        info!(
            path = %current_path.display(),
            loaded = loaded.len(),
            overrides = overrides.len(),
            "Rewriting current snapshot as overrides only"
        );
        snapshot::save(&overrides, &current_path);
    }
    session.overrides = overrides;

    let delta = prefs.get_int(PREF_KEY)?.unwrap_or(0);
    if delta != 0 {
        registry::apply_delta_to_all(host, delta);
    }

    let applied = registry::apply_absolute_all(host, &session.overrides);
    debug!(delta, applied, "Applied persisted font sizes");
    Ok(())
}
