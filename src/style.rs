//! Live style objects and the clamp/delta rules applied to them

use std::cell::Cell;
use std::rc::Rc;

use crate::constants::font::{FALLBACK_SIZE, MAX_SIZE, MIN_SIZE};

/// Shared handle to a live style. Identity (pointer equality) is what
/// distinguishes two styles, not their names.
pub type StyleRef = Rc<Style>;

/// A named text style with a mutable font size
#[derive(Debug)]
pub struct Style {
    name: String,
    size: Cell<i32>,
}

impl Style {
    pub fn new(name: impl Into<String>, size: i32) -> Self {
        Self {
            name: name.into(),
            size: Cell::new(size),
        }
    }

    pub fn shared(name: impl Into<String>, size: i32) -> StyleRef {
        Rc::new(Self::new(name, size))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> i32 {
        self.size.get()
    }

    pub fn set_size(&self, size: i32) {
        self.size.set(size);
    }

    /// Size to display and to start arithmetic from
    pub fn shown_size(&self) -> i32 {
        shown_size(self.size())
    }
}

pub fn clamp_size(size: i32) -> i32 {
    size.clamp(MIN_SIZE, MAX_SIZE)
}

/// Non-positive sizes mean "unset" and display as the fallback
pub fn shown_size(size: i32) -> i32 {
    if size > 0 { size } else { FALLBACK_SIZE }
}

/// Shift a style's size by `delta`, clamped. Returns true if the stored size changed.
pub fn apply_delta(style: &Style, delta: i32) -> bool {
    let next = clamp_size(style.shown_size().saturating_add(delta));
    if next == style.size() {
        return false;
    }
    style.set_size(next);
    true
}

/// Set a style's size to `target`, clamped
pub fn apply_absolute(style: &Style, target: i32) {
    style.set_size(clamp_size(target));
}
