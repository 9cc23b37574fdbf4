/// Headless element record backing every panel
///
/// An `Element` stands in for a rendered DOM node: it keeps the ordered
/// class list, inline styles, attributes and leaf content that a widget
/// writes, plus the geometry that the host layout engine reports back.

use std::collections::BTreeMap;

/// Ordered set of class tags. Insertion order is the enumeration order used
/// by style lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tags: Vec<String>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name` unless already present
    pub fn add(&mut self, name: &str) {
        if !self.contains(name) {
            self.tags.push(name.to_string());
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.tags.retain(|t| t != name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t == name)
    }

    /// Flip membership of `name`; returns whether it is now present
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.contains(name) {
            self.remove(name);
            false
        } else {
            self.add(name);
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Geometry reported by the host rendering engine, in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Geometry {
    pub client_width: f64,
    pub client_height: f64,
    pub scroll_width: f64,
    pub scroll_height: f64,
}

impl Geometry {
    /// Geometry of a box whose content fits exactly
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            client_width: width,
            client_height: height,
            scroll_width: width,
            scroll_height: height,
        }
    }
}

/// Opaque leaf content owned by an element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Content {
    #[default]
    Empty,
    Text(String),
    Html(String),
}

impl Content {
    pub fn as_str(&self) -> &str {
        match self {
            Content::Empty => "",
            Content::Text(s) | Content::Html(s) => s,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    classes: ClassList,
    styles: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    content: Content,
    geometry: Geometry,
}

impl Element {
    pub fn new(class: &str) -> Self {
        let mut el = Self::default();
        el.classes.add(class);
        el
    }

    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    pub fn classes_mut(&mut self) -> &mut ClassList {
        &mut self.classes
    }

    pub fn style(&self, name: &str) -> Option<&str> {
        self.styles.get(name).map(String::as_str)
    }

    /// Set an inline style. An empty value removes the property.
    pub fn set_style(&mut self, name: &str, value: &str) {
        if value.is_empty() {
            self.styles.remove(name);
        } else {
            self.styles.insert(name.to_string(), value.to_string());
        }
    }

    pub fn clear_style(&mut self, name: &str) {
        self.styles.remove(name);
    }

    pub fn styles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.styles.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn set_content(&mut self, content: Content) {
        self.content = content;
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Record the geometry computed by the host. Called by the host between
    /// refresh cycles, never from inside one.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }
}
