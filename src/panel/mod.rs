//! Widget tree and the two-phase layout protocol
//!
//! Every widget wraps a [`Panel`], which owns an [`Element`] and an ordered
//! list of child widgets. A layout refresh runs in two passes over a subtree:
//!
//! 1. **measure**: each node reads the geometry the host reported for it and
//!    caches whatever it needs. Nothing that affects geometry may change.
//! 2. **apply**: each node writes presentation derived from the values it
//!    captured in pass one (styles, responsive modes, canvas redraws).
//!
//! Running every read before any write keeps the host from recomputing layout
//! in between, which is what makes interleaved read/write trees quadratic.
//!
//! The default [`Widget::measure`] and [`Widget::apply`] just recurse into the
//! children. Nodes with their own measurement capture it *before* recursing
//! in `measure` and use it *after* recursing in `apply`.
//!
//! `refresh` is not reentrant. Triggering a refresh from inside a measure or
//! apply step, or detaching nodes while one runs, is a caller error.

pub mod element;

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace};

use crate::style::{self, StyleRuleSet, StyleSheet, StyleValue};
pub use element::{ClassList, Content, Element, Geometry};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a node in a widget tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A node of the widget tree.
///
/// Implementors embed a [`Panel`] and expose it through `panel`/`panel_mut`
/// (see [`impl_widget_base!`](crate::impl_widget_base)). The protocol hooks
/// default to pass-through recursion.
pub trait Widget: Any {
    fn panel(&self) -> &Panel;
    fn panel_mut(&mut self) -> &mut Panel;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn id(&self) -> NodeId {
        self.panel().id()
    }

    /// Measure pass. Reads only.
    fn measure(&mut self) {
        self.panel_mut().measure_children();
    }

    /// Apply pass. Writes only, from values captured by `measure`.
    fn apply(&mut self) {
        self.panel_mut().apply_children();
    }

    /// Pull style properties for this node's tags, then recurse.
    fn apply_style(&mut self, rules: &StyleRuleSet) {
        self.panel_mut().apply_style_children(rules);
    }

    /// Synchronous redraw of owned content without re-measuring.
    fn update(&mut self) {
        self.panel_mut().update_children();
    }
}

/// Implements the accessor half of [`Widget`] for a struct that embeds a
/// [`Panel`] in the named field.
#[macro_export]
macro_rules! impl_widget_base {
    ($field:ident) => {
        fn panel(&self) -> &$crate::panel::Panel {
            &self.$field
        }

        fn panel_mut(&mut self) -> &mut $crate::panel::Panel {
            &mut self.$field
        }

        fn as_any(&self) -> &dyn ::std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
            self
        }
    };
}

/// Run one full layout refresh over `root` and its descendants: every
/// measure step, then every apply step.
pub fn refresh(root: &mut dyn Widget) {
    debug!("refresh {:?}: {} nodes", root.id(), root.panel().subtree_len() + 1);
    root.measure();
    root.apply();
}

/// Push a style sheet down the tree. Layered sheets are applied one rule set
/// at a time, each to the whole subtree.
pub fn apply_style(root: &mut dyn Widget, sheet: &StyleSheet) {
    let layers = sheet.rule_sets();
    debug!("apply_style {:?}: {} rule set(s)", root.id(), layers.len());
    for rules in layers {
        root.apply_style(rules);
    }
}

/// Base container node
pub struct Panel {
    id: NodeId,
    element: Element,
    children: Vec<Box<dyn Widget>>,
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("id", &self.id)
            .field("classes", &self.element.classes())
            .field("children", &self.children.len())
            .finish()
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel {
    pub fn new() -> Self {
        Panel {
            id: NodeId::next(),
            element: Element::new("uiPanel"),
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    // --- Tree mutation ---

    /// Attach `child` as the last child. Ownership moves into this panel.
    pub fn append_child<W: Widget>(&mut self, child: W) -> NodeId {
        self.append_boxed(Box::new(child))
    }

    pub fn append_boxed(&mut self, child: Box<dyn Widget>) -> NodeId {
        let id = child.id();
        trace!("{:?}: append {:?}", self.id, id);
        self.children.push(child);
        id
    }

    /// Attach `child` as the first child.
    pub fn prepend_child<W: Widget>(&mut self, child: W) -> NodeId {
        self.prepend_boxed(Box::new(child))
    }

    pub fn prepend_boxed(&mut self, child: Box<dyn Widget>) -> NodeId {
        let id = child.id();
        trace!("{:?}: prepend {:?}", self.id, id);
        self.children.insert(0, child);
        id
    }

    /// Detach the direct child `id` and hand it back. Removing a node that is
    /// not a child is a no-op returning `None`.
    pub fn remove_child(&mut self, id: NodeId) -> Option<Box<dyn Widget>> {
        let idx = self.children.iter().position(|c| c.id() == id)?;
        trace!("{:?}: remove {:?}", self.id, id);
        Some(self.children.remove(idx))
    }

    /// Drop every child.
    pub fn remove_all(&mut self) {
        if !self.children.is_empty() {
            trace!("{:?}: remove all ({})", self.id, self.children.len());
        }
        self.children.clear();
    }

    // --- Tree queries ---

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of descendants, excluding this node
    pub fn subtree_len(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.panel().subtree_len())
            .sum()
    }

    pub fn children(&self) -> impl Iterator<Item = &dyn Widget> {
        self.children.iter().map(|c| c.as_ref())
    }

    pub fn child_ids(&self) -> Vec<NodeId> {
        self.children.iter().map(|c| c.id()).collect()
    }

    pub fn child(&self, id: NodeId) -> Option<&dyn Widget> {
        self.children.iter().find(|c| c.id() == id).map(|c| c.as_ref())
    }

    pub fn child_mut(&mut self, id: NodeId) -> Option<&mut dyn Widget> {
        let child = self.children.iter_mut().find(|c| c.id() == id)?;
        let widget: &mut dyn Widget = child.as_mut();
        Some(widget)
    }

    pub fn child_as<T: Widget>(&self, id: NodeId) -> Option<&T> {
        self.child(id)?.as_any().downcast_ref::<T>()
    }

    pub fn child_as_mut<T: Widget>(&mut self, id: NodeId) -> Option<&mut T> {
        self.child_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    /// Whether `id` is anywhere below this node
    pub fn contains(&self, id: NodeId) -> bool {
        self.children
            .iter()
            .any(|c| c.id() == id || c.panel().contains(id))
    }

    /// Depth-first search for a descendant
    pub fn find(&self, id: NodeId) -> Option<&dyn Widget> {
        for child in &self.children {
            if child.id() == id {
                return Some(child.as_ref());
            }
            if let Some(found) = child.panel().find(id) {
                return Some(found);
            }
        }
        None
    }

    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut dyn Widget> {
        let idx = self
            .children
            .iter()
            .position(|c| c.id() == id || c.panel().contains(id))?;
        let child = &mut self.children[idx];
        if child.id() == id {
            let widget: &mut dyn Widget = child.as_mut();
            Some(widget)
        } else {
            child.panel_mut().find_mut(id)
        }
    }

    pub fn find_as_mut<T: Widget>(&mut self, id: NodeId) -> Option<&mut T> {
        self.find_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    /// Shade odd-indexed children with `alt-shade`. Must be re-called after
    /// adding children.
    pub fn set_highlight_alternate(&mut self, on: bool) {
        for (idx, child) in self.children.iter_mut().enumerate() {
            let classes = child.panel_mut().element_mut().classes_mut();
            if on && idx % 2 == 1 {
                classes.add("alt-shade");
            } else {
                classes.remove("alt-shade");
            }
        }
    }

    // --- Classes and inline styles ---

    pub fn with_class(mut self, name: &str) -> Self {
        self.add_class(name);
        self
    }

    pub fn add_class(&mut self, name: &str) -> &mut Self {
        self.element.classes_mut().add(name);
        self
    }

    pub fn remove_class(&mut self, name: &str) -> &mut Self {
        self.element.classes_mut().remove(name);
        self
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.element.classes().contains(name)
    }

    pub fn toggle_class(&mut self, name: &str) -> &mut Self {
        self.element.classes_mut().toggle(name);
        self
    }

    /// Set (or with an empty value, clear) an inline style
    pub fn set_style(&mut self, name: &str, value: &str) -> &mut Self {
        self.element.set_style(name, value);
        self
    }

    pub fn clear_style(&mut self, name: &str) -> &mut Self {
        self.element.clear_style(name);
        self
    }

    pub fn set_styles(&mut self, first: &str, second: &str, value: &str) -> &mut Self {
        self.set_style(first, value);
        self.set_style(second, value)
    }

    pub fn hide(&mut self) -> &mut Self {
        self.set_style("display", "none")
    }

    pub fn show(&mut self) -> &mut Self {
        self.clear_style("display")
    }

    /// Set flex-grow and flex-shrink together. Higher is stretchier.
    pub fn set_elasticity(&mut self, factor: f64) -> &mut Self {
        self.set_styles("flexGrow", "flexShrink", &factor.to_string())
    }

    /// Resolve `property` against this node's own class tags
    pub fn get_apply_style<'a>(&self, rules: &'a StyleRuleSet, property: &str) -> Option<&'a StyleValue> {
        style::lookup(self.element.classes().iter(), rules, property)
    }

    // --- Protocol recursion ---

    pub fn measure_children(&mut self) {
        for child in self.children.iter_mut() {
            child.measure();
        }
    }

    pub fn apply_children(&mut self) {
        for child in self.children.iter_mut() {
            child.apply();
        }
    }

    pub fn apply_style_children(&mut self, rules: &StyleRuleSet) {
        for child in self.children.iter_mut() {
            child.apply_style(rules);
        }
    }

    pub fn update_children(&mut self) {
        for child in self.children.iter_mut() {
            child.update();
        }
    }
}

impl Widget for Panel {
    fn panel(&self) -> &Panel {
        self
    }

    fn panel_mut(&mut self) -> &mut Panel {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
