//! In-memory host used by unit tests

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::registry::{self, Skin, StaticRegistry, StyleHost, StyleSource};
use crate::style::{Style, StyleRef};

pub struct TestHost {
    pub registry: StaticRegistry,
    pub skin: Skin,
    repaints: Cell<usize>,
    surface_opened: Cell<usize>,
    surface_closed: Cell<usize>,
    revealed: RefCell<Vec<PathBuf>>,
}

impl TestHost {
    fn empty() -> Self {
        Self {
            registry: StaticRegistry::new(),
            skin: Skin::new("test"),
            repaints: Cell::new(0),
            surface_opened: Cell::new(0),
            surface_closed: Cell::new(0),
            revealed: RefCell::new(Vec::new()),
        }
    }

    /// Every style as a skin property, nothing else
    pub fn from_sizes(sizes: &[(&str, i32)]) -> Self {
        let mut host = Self::empty();
        for (name, size) in sizes {
            host.skin.add_style(name.to_lowercase(), Style::shared(*name, *size));
        }
        host
    }

    /// Registry slots aliasing two skin styles, one skin-only style and one custom style
    pub fn standard() -> Self {
        let mut host = Self::empty();
        let label = host.skin.add_style("label", Style::shared("Label", 11));
        let button = host.skin.add_style("button", Style::shared("Button", 12));
        host.skin.add_style("heading", Style::shared("Heading", 18));
        host.registry.push("label", &label);
        host.registry.push("button", &button);
        host.skin.custom.push(Some(Style::shared("Tooltip", 10)));
        host
    }

    pub fn style(&self, name: &str) -> Option<StyleRef> {
        registry::enumerate(self)
            .map(|item| item.style)
            .find(|style| style.name() == name)
    }

    pub fn size_of(&self, name: &str) -> Option<i32> {
        self.style(name).map(|style| style.size())
    }

    pub fn repaints(&self) -> usize {
        self.repaints.get()
    }

    pub fn surface_opened(&self) -> usize {
        self.surface_opened.get()
    }

    pub fn surface_closed(&self) -> usize {
        self.surface_closed.get()
    }

    pub fn revealed(&self) -> Vec<PathBuf> {
        self.revealed.borrow().clone()
    }
}

impl StyleHost for TestHost {
    fn sources(&self) -> Vec<&dyn StyleSource> {
        vec![&self.registry, &self.skin.properties, &self.skin.custom]
    }

    fn snapshot_tag(&self) -> &str {
        &self.skin.name
    }

    fn repaint_all(&self) {
        self.repaints.set(self.repaints.get() + 1);
    }

    fn reveal_folder(&self, path: &Path) -> Result<()> {
        self.revealed.borrow_mut().push(path.to_path_buf());
        Ok(())
    }

    fn open_init_surface(&self) {
        self.surface_opened.set(self.surface_opened.get() + 1);
    }

    fn close_init_surface(&self) {
        self.surface_closed.set(self.surface_closed.get() + 1);
    }
}
