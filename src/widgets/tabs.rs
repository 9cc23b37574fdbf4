//! Tab strip with a collapsed "mobile" label
//!
//! Items cannot borrow their selector while it owns them, so a clicked item
//! pushes its name onto a queue shared with the selector. The host calls
//! [`TabSelector::dispatch_clicks`] to run selection for queued clicks.
//!
//! When the strip overflows its box (`scroll_width > client_width + 1`) the
//! selector switches to mobile mode: items are hidden and a single label with
//! the selected tab's HTML is shown instead.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use log::{debug, trace};

use crate::panel::{Content, NodeId, Panel, Widget};
use crate::widgets::{ImageField, TextField};

pub type SelectionListener = Rc<dyn Fn(&str)>;

type ClickQueue = Rc<RefCell<VecDeque<String>>>;

/// A single tab
pub struct TabSelectorItem {
    panel: Panel,
    name: String,
    selectable: bool,
    clicks: Weak<RefCell<VecDeque<String>>>,
}

impl TabSelectorItem {
    fn new(html: &str, name: &str, clicks: &ClickQueue) -> Self {
        let mut panel = Panel::new()
            .with_class("textField")
            .with_class("tabSelectorItem");
        panel.set_elasticity(0.0);
        panel.element_mut().set_content(Content::Html(html.to_string()));
        panel.element_mut().set_attribute("data-name", name);
        TabSelectorItem {
            panel,
            name: name.to_string(),
            selectable: true,
            clicks: Rc::downgrade(clicks),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn html(&self) -> &str {
        self.panel.element().content().as_str()
    }

    pub fn set_selected(&mut self, selected: bool) {
        if selected {
            self.panel.add_class("selected");
        } else {
            self.panel.remove_class("selected");
        }
    }

    pub fn is_selected(&self) -> bool {
        self.panel.has_class("selected")
    }

    pub fn set_selectable(&mut self, selectable: bool) {
        self.selectable = selectable;
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    pub fn enter(&mut self) {
        self.panel.add_class("hovering");
    }

    pub fn leave(&mut self) {
        self.panel.remove_class("hovering");
    }

    /// Queue a click for the owning selector. Detached items do nothing.
    pub fn click(&self) {
        if let Some(queue) = self.clicks.upgrade() {
            trace!("tab click {:?}", self.name);
            queue.borrow_mut().push_back(self.name.clone());
        }
    }
}

impl Widget for TabSelectorItem {
    crate::impl_widget_base!(panel);
}

pub struct TabSelector {
    panel: Panel,
    items: Vec<NodeId>,
    selected: String,
    auto_select: bool,
    listeners: Vec<SelectionListener>,
    icon: Option<NodeId>,
    mobile: NodeId,
    mobile_mode: bool,
    clicks: ClickQueue,
    measured: Option<(f64, f64)>,
}

impl TabSelector {
    pub fn new(vertical: bool) -> Self {
        let mut panel = Panel::new().with_class("tabSelector");
        if vertical {
            panel.add_class("vertical");
        }

        let mut label = TextField::new();
        label
            .panel_mut()
            .add_class("tabSelectorMobile")
            .set_styles("flexGrow", "flexShrink", "0")
            .set_style("position", "relative")
            .set_style("overflow", "visible");
        let mobile = panel.append_child(label);

        let mut ts = TabSelector {
            panel,
            items: Vec::new(),
            selected: String::new(),
            auto_select: true,
            listeners: Vec::new(),
            icon: None,
            mobile,
            mobile_mode: true,
            clicks: Rc::new(RefCell::new(VecDeque::new())),
            measured: None,
        };
        ts.set_mobile_mode(false);
        ts
    }

    pub fn add_tab(&mut self, html: &str, name: &str, selectable: bool) -> NodeId {
        let mut item = TabSelectorItem::new(html, name, &self.clicks);
        item.set_selectable(selectable);
        if self.mobile_mode {
            item.panel_mut().set_style("visibility", "hidden");
        }
        let id = self.panel.append_child(item);
        self.items.push(id);
        id
    }

    pub fn tab_names(&self) -> Vec<&str> {
        self.tabs().map(TabSelectorItem::name).collect()
    }

    pub fn item(&self, name: &str) -> Option<&TabSelectorItem> {
        self.tabs().find(|i| i.name() == name)
    }

    pub fn item_mut(&mut self, name: &str) -> Option<&mut TabSelectorItem> {
        let id = self.item(name)?.panel().id();
        self.panel.child_as_mut::<TabSelectorItem>(id)
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn set_delineate(&mut self, on: bool) {
        if on {
            self.panel.add_class("ts-delineate");
        } else {
            self.panel.remove_class("ts-delineate");
        }
    }

    /// Whether a click selects its tab (default `true`)
    pub fn set_auto_select(&mut self, on: bool) {
        self.auto_select = on;
    }

    /// Replace the icon shown before the tabs
    pub fn add_icon(&mut self, src: Option<&str>) {
        self.remove_icon();
        let Some(src) = src else { return };
        let mut icon = ImageField::new(Some(src));
        icon.panel_mut().add_class("tabSelectorIcon");
        self.icon = Some(self.panel.prepend_child(icon));
    }

    pub fn remove_icon(&mut self) {
        if let Some(id) = self.icon.take() {
            self.panel.remove_child(id);
        }
    }

    pub fn icon(&self) -> Option<&ImageField> {
        self.panel.child_as::<ImageField>(self.icon?)
    }

    pub fn add_selection_listener(&mut self, listener: SelectionListener) {
        if !self.listeners.iter().any(|l| Rc::ptr_eq(l, &listener)) {
            self.listeners.push(listener);
        }
    }

    pub fn remove_selection_listener(&mut self, listener: &SelectionListener) {
        self.listeners.retain(|l| !Rc::ptr_eq(l, listener));
    }

    /// Hide every tab from index `count` on
    pub fn set_max_visible(&mut self, count: usize) {
        for (idx, id) in self.items.clone().into_iter().enumerate() {
            if let Some(item) = self.panel.child_mut(id) {
                item.panel_mut()
                    .set_style("display", if idx >= count { "none" } else { "" });
            }
        }
    }

    /// Select `name` as if it were clicked, without notifying listeners.
    /// Works even when auto-select is off.
    pub fn set_selected_click(&mut self, name: &str) {
        self.on_select(name, false, true);
    }

    /// Selection handler. `programmatic` bypasses the auto-select setting.
    /// Listeners run on any change of name when `notify` is set, even if the
    /// tab itself could not be selected.
    pub fn on_select(&mut self, name: &str, notify: bool, programmatic: bool) {
        let Some(item) = self.item(name) else { return };
        if self.selected == name {
            return;
        }
        if item.is_selectable() && (self.auto_select || programmatic) {
            self.selected = name.to_string();
            self.set_highlighted(name);
        }
        if notify {
            for listener in &self.listeners {
                listener(name);
            }
        }
    }

    /// Run selection for every queued item click. Returns how many ran.
    pub fn dispatch_clicks(&mut self) -> usize {
        let pending: Vec<String> = self.clicks.borrow_mut().drain(..).collect();
        for name in &pending {
            self.on_select(name, true, false);
        }
        pending.len()
    }

    /// Mark `name` selected and every other tab unselected
    pub fn set_highlighted(&mut self, name: &str) {
        let mut label = None;
        for id in self.items.clone() {
            if let Some(item) = self.panel.child_as_mut::<TabSelectorItem>(id) {
                let hit = item.name() == name;
                item.set_selected(hit);
                if hit {
                    label = Some(format!("{} &#9660;", item.html()));
                }
            }
        }
        if let (Some(label), Some(mobile)) = (label, self.panel.child_as_mut::<TextField>(self.mobile)) {
            mobile.set_html(&label);
        }
    }

    pub fn set_mobile_mode(&mut self, on: bool) {
        if self.mobile_mode == on {
            return;
        }
        debug!("{:?}: mobile mode {}", self.panel.id(), on);
        self.mobile_mode = on;
        if let Some(mobile) = self.panel.child_mut(self.mobile) {
            mobile.panel_mut().set_style("display", if on { "" } else { "none" });
        }
        for id in self.items.clone() {
            if let Some(item) = self.panel.child_mut(id) {
                item.panel_mut()
                    .set_style("visibility", if on { "hidden" } else { "" });
            }
        }
    }

    pub fn is_mobile_mode(&self) -> bool {
        self.mobile_mode
    }

    pub fn mobile_label(&self) -> &str {
        self.panel
            .child_as::<TextField>(self.mobile)
            .map(TextField::text)
            .unwrap_or("")
    }

    fn tabs(&self) -> impl Iterator<Item = &TabSelectorItem> {
        self.items
            .iter()
            .filter_map(|id| self.panel.child_as::<TabSelectorItem>(*id))
    }
}

impl Widget for TabSelector {
    crate::impl_widget_base!(panel);

    fn measure(&mut self) {
        let g = self.panel.element().geometry();
        self.measured = Some((g.client_width, g.scroll_width));
        self.panel.measure_children();
    }

    fn apply(&mut self) {
        self.panel.apply_children();
        if let Some((client_width, scroll_width)) = self.measured.take() {
            self.set_mobile_mode(scroll_width > client_width + 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_tabs() -> TabSelector {
        let mut ts = TabSelector::new(false);
        ts.add_tab("<b>One</b>", "one", true);
        ts.add_tab("Two", "two", true);
        ts.add_tab("Locked", "locked", false);
        ts
    }

    #[test]
    fn clicks_queue_until_dispatched() {
        let mut ts = three_tabs();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        ts.add_selection_listener(Rc::new(move |n: &str| sink.borrow_mut().push(n.to_string())));

        ts.item("two").unwrap().click();
        assert_eq!(ts.selected(), "");
        assert_eq!(ts.dispatch_clicks(), 1);
        assert_eq!(ts.selected(), "two");
        assert!(ts.item("two").unwrap().is_selected());
        assert_eq!(*seen.borrow(), vec!["two".to_string()]);

        // unselectable tabs still notify but keep the old selection
        ts.item("locked").unwrap().click();
        ts.dispatch_clicks();
        assert_eq!(ts.selected(), "two");
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn programmatic_selection_ignores_auto_select() {
        let mut ts = three_tabs();
        ts.set_auto_select(false);
        ts.item("one").unwrap().click();
        ts.dispatch_clicks();
        assert_eq!(ts.selected(), "");

        ts.set_selected_click("one");
        assert_eq!(ts.selected(), "one");
        assert_eq!(ts.mobile_label(), "<b>One</b> &#9660;");
    }

    #[test]
    fn max_visible_and_icon() {
        let mut ts = three_tabs();
        ts.set_max_visible(1);
        assert_eq!(ts.item("one").unwrap().panel().element().style("display"), None);
        assert_eq!(ts.item("two").unwrap().panel().element().style("display"), Some("none"));

        ts.add_icon(Some("data:image/png;base64,AA=="));
        let icon_id = ts.icon().unwrap().panel().id();
        assert_eq!(ts.panel().child_ids()[0], icon_id);
        ts.remove_icon();
        assert!(ts.icon().is_none());
        assert_eq!(ts.tab_names(), vec!["one", "two", "locked"]);
    }
}
