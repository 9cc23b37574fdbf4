//! Form inputs: a single-line text box and an on/off switch
//!
//! The host forwards user edits through [`EditTextField::edit`] and
//! [`CheckboxField::toggle`], which fire change listeners. Programmatic
//! setters never do.

use std::rc::Rc;

use log::trace;

use crate::panel::{Panel, Widget};

pub type EditListener = Rc<dyn Fn(&str)>;
pub type ChangeListener = Rc<dyn Fn(bool)>;

pub struct EditTextField {
    panel: Panel,
    value: String,
    editable: bool,
    size: Option<u32>,
    listeners: Vec<EditListener>,
}

impl Default for EditTextField {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl EditTextField {
    pub fn new(text: Option<&str>, size: Option<u32>) -> Self {
        let mut f = EditTextField {
            panel: Panel::new().with_class("editTextField"),
            value: String::new(),
            editable: true,
            size: None,
            listeners: Vec::new(),
        };
        if let Some(text) = text {
            f.set_text(text);
        }
        if let Some(size) = size {
            f.set_size(size);
        }
        f
    }

    pub fn text(&self) -> &str {
        &self.value
    }

    pub fn set_text(&mut self, text: &str) -> &mut Self {
        self.value = text.to_string();
        self
    }

    /// Visible width of the box in characters
    pub fn set_size(&mut self, chars: u32) {
        self.size = Some(chars);
        self.panel
            .element_mut()
            .set_attribute("size", &chars.to_string());
    }

    pub fn size(&self) -> Option<u32> {
        self.size
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
        if editable {
            self.panel.remove_class("readOnly");
        } else {
            self.panel.add_class("readOnly");
        }
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn add_edit_listener(&mut self, listener: EditListener) {
        if !self.listeners.iter().any(|l| Rc::ptr_eq(l, &listener)) {
            self.listeners.push(listener);
        }
    }

    /// A committed user edit. Read-only fields reject it; returns whether
    /// the value changed.
    pub fn edit(&mut self, text: &str) -> bool {
        if !self.editable || self.value == text {
            return false;
        }
        trace!("{:?}: edit", self.panel.id());
        self.value = text.to_string();
        for listener in &self.listeners {
            listener(&self.value);
        }
        true
    }
}

impl Widget for EditTextField {
    crate::impl_widget_base!(panel);
}

pub struct CheckboxField {
    panel: Panel,
    checked: bool,
    listeners: Vec<ChangeListener>,
}

impl CheckboxField {
    pub fn new(checked: bool) -> Self {
        CheckboxField {
            panel: Panel::new().with_class("checkboxField"),
            checked,
            listeners: Vec::new(),
        }
    }

    pub fn value(&self) -> bool {
        self.checked
    }

    pub fn set_value(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn add_change_listener(&mut self, listener: ChangeListener) {
        if !self.listeners.iter().any(|l| Rc::ptr_eq(l, &listener)) {
            self.listeners.push(listener);
        }
    }

    /// Flip the switch as a user would, notifying listeners
    pub fn toggle(&mut self) -> bool {
        self.checked = !self.checked;
        for listener in &self.listeners {
            listener(self.checked);
        }
        self.checked
    }
}

impl Widget for CheckboxField {
    crate::impl_widget_base!(panel);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn edits_notify_but_setters_do_not() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut f = EditTextField::new(Some("abc"), Some(8));
        assert_eq!(f.panel().element().attribute("size"), Some("8"));
        f.add_edit_listener(Rc::new(move |t: &str| sink.borrow_mut().push(t.to_string())));

        f.set_text("quiet");
        assert!(seen.borrow().is_empty());

        assert!(f.edit("loud"));
        assert!(!f.edit("loud"));
        assert_eq!(*seen.borrow(), vec!["loud".to_string()]);

        f.set_editable(false);
        assert!(!f.edit("ignored"));
        assert_eq!(f.text(), "loud");
    }

    #[test]
    fn checkbox_toggle_reports_new_state() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let listener: ChangeListener = Rc::new(move |v: bool| sink.borrow_mut().push(v));
        let mut cb = CheckboxField::new(true);
        cb.add_change_listener(listener.clone());
        cb.add_change_listener(listener);

        cb.set_value(true);
        assert!(!cb.toggle());
        assert!(cb.toggle());
        assert_eq!(*seen.borrow(), vec![false, true]);
        assert!(cb.panel().has_class("checkboxField"));
    }
}
