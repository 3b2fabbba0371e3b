//! Concrete style sources: static registry, skin properties, custom styles

use std::rc::{Rc, Weak};

use super::{StyleEntry, StyleSource};
use crate::error::LookupError;
use crate::style::{Style, StyleRef};

/// Fixed table of named slots referring to styles owned elsewhere
#[derive(Debug, Default)]
pub struct StaticRegistry {
    slots: Vec<(String, Weak<Style>)>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, property: impl Into<String>, style: &StyleRef) {
        self.slots.push((property.into(), Rc::downgrade(style)));
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

impl StyleSource for StaticRegistry {
    fn label(&self) -> &str {
        "Registry"
    }

    fn entries(&self) -> Box<dyn Iterator<Item = StyleEntry> + '_> {
        Box::new(self.slots.iter().map(|(property, slot)| {
            slot.upgrade().map(Some).ok_or_else(|| LookupError::Disposed {
                property: property.clone(),
            })
        }))
    }
}

/// Value held by a skin property. Skins carry more than styles.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    Style(StyleRef),
    Null,
    /// Any non-style value, described by its type name
    Other(String),
}

#[derive(Debug, Default)]
pub struct SkinProperties {
    properties: Vec<(String, PropertyValue)>,
}

impl SkinProperties {
    pub fn push(&mut self, property: impl Into<String>, value: PropertyValue) {
        self.properties.push((property.into(), value));
    }
}

impl StyleSource for SkinProperties {
    fn label(&self) -> &str {
        "Skin"
    }

    fn entries(&self) -> Box<dyn Iterator<Item = StyleEntry> + '_> {
        Box::new(self.properties.iter().map(|(property, value)| match value {
            PropertyValue::Style(style) => Ok(Some(Rc::clone(style))),
            PropertyValue::Null => Ok(None),
            PropertyValue::Other(found) => Err(LookupError::WrongType {
                property: property.clone(),
                found: found.clone(),
            }),
        }))
    }
}

/// Ad-hoc styles registered on a skin at runtime
#[derive(Debug, Default)]
pub struct CustomStyles {
    styles: Vec<Option<StyleRef>>,
}

impl CustomStyles {
    pub fn push(&mut self, style: Option<StyleRef>) {
        self.styles.push(style);
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }
}

impl StyleSource for CustomStyles {
    fn label(&self) -> &str {
        "Custom"
    }

    fn entries(&self) -> Box<dyn Iterator<Item = StyleEntry> + '_> {
        Box::new(self.styles.iter().cloned().map(Ok))
    }
}

/// The active skin: its instance properties plus its custom style list
#[derive(Debug, Default)]
pub struct Skin {
    pub name: String,
    pub properties: SkinProperties,
    pub custom: CustomStyles,
}

impl Skin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Register `style` as a named skin property and return it
    pub fn add_style(&mut self, property: impl Into<String>, style: StyleRef) -> StyleRef {
        self.properties.push(property, PropertyValue::Style(Rc::clone(&style)));
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_registry_reports_disposed_slot() {
        let mut registry = StaticRegistry::new();
        let kept = Style::shared("Label", 11);
        registry.push("label", &kept);
        {
            let dropped = Style::shared("Gone", 11);
            registry.push("gone", &dropped);
        }

        let entries: Vec<StyleEntry> = registry.entries().collect();
        assert_eq!(entries.len(), 2);
        assert!(matches!(&entries[0], Ok(Some(s)) if s.name() == "Label"));
        assert!(matches!(
            &entries[1],
            Err(LookupError::Disposed { property }) if property == "gone"
        ));
    }

    #[test]
    fn test_skin_properties_classify_values() {
        let mut props = SkinProperties::default();
        props.push("label", PropertyValue::Style(Style::shared("Label", 11)));
        props.push("empty", PropertyValue::Null);
        props.push("font", PropertyValue::Other("Font".to_string()));

        let entries: Vec<StyleEntry> = props.entries().collect();
        assert!(matches!(&entries[0], Ok(Some(_))));
        assert!(matches!(&entries[1], Ok(None)));
        assert!(matches!(
            &entries[2],
            Err(LookupError::WrongType { property, found }) if property == "font" && found == "Font"
        ));
    }

    #[test]
    fn test_skin_add_style_shares_object() {
        let mut skin = Skin::new("dark");
        let label = skin.add_style("label", Style::shared("Label", 11));
        label.set_size(14);

        let sizes: Vec<i32> = skin
            .properties
            .entries()
            .filter_map(|entry| entry.ok().flatten())
            .map(|style| style.size())
            .collect();
        assert_eq!(sizes, vec![14]);
    }
}
