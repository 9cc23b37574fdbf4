//! Clickable button panel (press gestures are left to the host)

use std::rc::Rc;

use crate::panel::{Content, NodeId, Panel, Widget};

pub type ClickListener = Rc<dyn Fn(NodeId)>;

pub struct ButtonField {
    panel: Panel,
    enabled: bool,
    listeners: Vec<ClickListener>,
}

impl ButtonField {
    pub fn new(label: &str, full_size: bool) -> Self {
        let mut b = ButtonField {
            panel: Panel::new().with_class("buttonField"),
            enabled: true,
            listeners: Vec::new(),
        };
        b.set_full_size(full_size);
        b.set_text(label);
        b
    }

    pub fn set_text(&mut self, text: &str) -> &mut Self {
        self.panel
            .element_mut()
            .set_content(Content::Text(text.to_string()));
        self
    }

    pub fn set_html(&mut self, html: &str) -> &mut Self {
        self.panel
            .element_mut()
            .set_content(Content::Html(html.to_string()));
        self
    }

    pub fn text(&self) -> &str {
        self.panel.element().content().as_str()
    }

    pub fn set_full_size(&mut self, on: bool) -> &mut Self {
        if on {
            self.panel.add_class("fullSize");
        } else {
            self.panel.remove_class("fullSize");
        }
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if enabled {
            self.panel.remove_class("disabled");
        } else {
            self.panel.add_class("disabled");
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_selected(&mut self, selected: bool) {
        if selected {
            self.panel.add_class("sel");
        } else {
            self.panel.remove_class("sel");
        }
    }

    /// Register a click listener. The same `Rc` is only registered once.
    pub fn add_click_listener(&mut self, listener: ClickListener) -> &mut Self {
        if !self.listeners.iter().any(|l| Rc::ptr_eq(l, &listener)) {
            self.listeners.push(listener);
        }
        self
    }

    /// Deliver a click. Disabled buttons swallow it. Returns whether the
    /// listeners ran.
    pub fn click(&self) -> bool {
        if !self.enabled {
            return false;
        }
        let id = self.panel.id();
        for listener in &self.listeners {
            listener(id);
        }
        true
    }
}

impl Widget for ButtonField {
    crate::impl_widget_base!(panel);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn listeners_fire_once_and_respect_enabled() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let listener: ClickListener = Rc::new(move |_: NodeId| counter.set(counter.get() + 1));

        let mut b = ButtonField::new("OK", true);
        assert!(b.panel().has_class("fullSize"));
        b.add_click_listener(listener.clone());
        b.add_click_listener(listener);
        assert!(b.click());
        assert_eq!(hits.get(), 1);

        b.set_enabled(false);
        assert!(b.panel().has_class("disabled"));
        assert!(!b.click());
        assert_eq!(hits.get(), 1);
    }
}
