//! Style registry ports and the deduplicating enumerator
//!
//! A host exposes its styles through one or more [`StyleSource`]s. Each source
//! yields entries that may be empty slots or fail to resolve; the enumerator
//! skips both and never aborts a pass because of a single bad entry.

mod skin;

pub use skin::{PropertyValue, Skin, StaticRegistry};

use std::collections::HashSet;
use std::path::Path;
use std::rc::Rc;

use tracing::debug;

use crate::error::{LookupError, Result};
use crate::snapshot::SizeMap;
use crate::style::{self, Style, StyleRef};

/// One entry of a style source: a style, an empty slot, or a lookup failure
pub type StyleEntry = std::result::Result<Option<StyleRef>, LookupError>;

pub trait StyleSource {
    /// Group label shown in the style list
    fn label(&self) -> &str;

    fn entries(&self) -> Box<dyn Iterator<Item = StyleEntry> + '_>;
}

/// The application whose styles are being tuned
pub trait StyleHost {
    /// Sources in enumeration order
    fn sources(&self) -> Vec<&dyn StyleSource>;

    /// Distinguishes snapshot files of different hosts (`defaults.<tag>.json`)
    fn snapshot_tag(&self) -> &str;

    fn repaint_all(&self);

    fn reveal_folder(&self, path: &Path) -> Result<()>;

    /// Acquire whatever the host needs before styles can be touched at startup
    fn open_init_surface(&self) {}

    fn close_init_surface(&self) {}
}

/// A style together with the label of the source that produced it
#[derive(Debug, Clone)]
pub struct Enumerated<'a> {
    pub source: &'a str,
    pub style: StyleRef,
}

/// Lazily walk every source, yielding each distinct named style once
pub fn enumerate<'a, H>(host: &'a H) -> impl Iterator<Item = Enumerated<'a>> + 'a
where
    H: StyleHost + ?Sized,
{
    let mut seen: HashSet<*const Style> = HashSet::new();
    host.sources()
        .into_iter()
        .flat_map(|source| {
            let label = source.label();
            source.entries().filter_map(move |entry| match entry {
                Ok(Some(style)) if !style.name().is_empty() => Some(Enumerated { source: label, style }),
                Ok(_) => None,
                Err(err) => {
                    debug!(source = %label, error = %err, "Skipping unreadable style entry");
                    None
                }
            })
        })
        .filter(move |item| seen.insert(Rc::as_ptr(&item.style)))
}

/// Current size of every live style, keyed by name. The first style
/// enumerated under a name wins.
pub fn capture_sizes<H: StyleHost + ?Sized>(host: &H) -> SizeMap {
    let mut sizes = SizeMap::new();
    for item in enumerate(host) {
        sizes
            .entry(item.style.name().to_string())
            .or_insert_with(|| item.style.size());
    }
    sizes
}

/// Shift every style by `delta`. Returns true if any style changed.
pub fn apply_delta_to_all<H: StyleHost + ?Sized>(host: &H, delta: i32) -> bool {
    enumerate(host).fold(false, |changed, item| style::apply_delta(&item.style, delta) || changed)
}

/// Set every style named in `targets` to its target size
pub fn apply_absolute_all<H: StyleHost + ?Sized>(host: &H, targets: &SizeMap) -> usize {
    let mut applied = 0;
    for item in enumerate(host) {
        if let Some(&target) = targets.get(item.style.name()) {
            style::apply_absolute(&item.style, target);
            applied += 1;
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestHost;

    #[test]
    fn test_enumerate_dedups_by_identity() {
        let host = TestHost::standard();
        let names: Vec<String> = enumerate(&host).map(|e| e.style.name().to_string()).collect();

        // Registry slots alias skin properties; each object appears once
        assert_eq!(names.iter().filter(|n| *n == "Label").count(), 1);
        assert_eq!(names.iter().filter(|n| *n == "Button").count(), 1);
    }

    #[test]
    fn test_enumerate_keeps_distinct_objects_with_same_name() {
        let mut host = TestHost::standard();
        host.skin.custom.push(Some(Style::shared("Label", 30)));

        let labels = enumerate(&host).filter(|e| e.style.name() == "Label").count();
        assert_eq!(labels, 2);
    }

    #[test]
    fn test_enumerate_skips_null_empty_and_broken_entries() {
        let mut host = TestHost::standard();
        host.skin.custom.push(None);
        host.skin.custom.push(Some(Style::shared("", 12)));
        host.skin
            .properties
            .push("settings", PropertyValue::Other("Settings".to_string()));
        {
            let orphan = Style::shared("Orphan", 12);
            host.registry.push("orphan", &orphan);
        }

        let names: Vec<String> = enumerate(&host).map(|e| e.style.name().to_string()).collect();
        assert!(!names.iter().any(|n| n.is_empty() || n == "Orphan"));
        // Entries after the broken ones are still reached
        assert!(names.contains(&"Tooltip".to_string()));
    }

    #[test]
    fn test_enumerate_order_follows_sources() {
        let host = TestHost::standard();
        let sources: Vec<&str> = enumerate(&host).map(|e| e.source).collect();
        let first_custom = sources.iter().position(|s| *s == "Custom").unwrap();
        assert!(sources[..first_custom].iter().all(|s| *s != "Custom"));
    }

    #[test]
    fn test_capture_sizes() {
        let host = TestHost::standard();
        let sizes = capture_sizes(&host);
        assert_eq!(sizes.get("Label"), Some(&11));
        assert_eq!(sizes.get("Tooltip"), Some(&10));
    }

    #[test]
    fn test_apply_delta_to_all_reports_any_change() {
        let host = TestHost::from_sizes(&[("A", 24), ("B", 12)]);
        assert!(apply_delta_to_all(&host, 2));
        assert_eq!(host.size_of("A"), Some(24));
        assert_eq!(host.size_of("B"), Some(14));

        let host = TestHost::from_sizes(&[("A", 24), ("B", 24)]);
        assert!(!apply_delta_to_all(&host, 2));
    }

    #[test]
    fn test_apply_absolute_all_only_touches_named() {
        let host = TestHost::from_sizes(&[("A", 11), ("B", 12)]);
        let targets = SizeMap::from([("A".to_string(), 99), ("Missing".to_string(), 9)]);
        assert_eq!(apply_absolute_all(&host, &targets), 1);
        assert_eq!(host.size_of("A"), Some(24));
        assert_eq!(host.size_of("B"), Some(12));
    }
}
