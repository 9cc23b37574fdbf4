//! Text-bearing leaf widgets

use crate::panel::{Content, Panel, Widget};

/// A panel holding plain text or HTML
pub struct TextField {
    panel: Panel,
}

impl Default for TextField {
    fn default() -> Self {
        Self::new()
    }
}

impl TextField {
    pub fn new() -> Self {
        TextField {
            panel: Panel::new().with_class("textField"),
        }
    }

    pub fn with_text(text: &str) -> Self {
        let mut f = Self::new();
        f.set_text(text);
        f
    }

    pub fn with_html(html: &str) -> Self {
        let mut f = Self::new();
        f.set_html(html);
        f
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
}

impl Widget for TextField {
    crate::impl_widget_base!(panel);
}

/// Text field whose background shows progress as a two-colour gradient
pub struct ProgressBarField {
    panel: Panel,
    colors: (String, String),
    progress: f64,
}

impl ProgressBarField {
    pub fn new(text: &str) -> Self {
        let mut panel = Panel::new().with_class("textField").with_class("progressBarField");
        panel
            .element_mut()
            .set_content(Content::Text(text.to_string()));
        ProgressBarField {
            panel,
            colors: (String::new(), String::new()),
            progress: 0.0,
        }
    }

    pub fn set_colors(&mut self, done: &str, remaining: &str) {
        self.colors = (done.to_string(), remaining.to_string());
        self.restyle();
    }

    /// Progress in percent
    pub fn set_progress(&mut self, percent: f64) {
        self.progress = percent;
        self.restyle();
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    fn restyle(&mut self) {
        let background = format!(
            "linear-gradient(90deg, {} {}%, {} {}%)",
            self.colors.0,
            self.progress - 0.05,
            self.colors.1,
            self.progress + 0.05
        );
        self.panel.set_style("background", &background);
    }
}

impl Widget for ProgressBarField {
    crate::impl_widget_base!(panel);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_html_content() {
        let mut f = TextField::with_text("hello");
        assert_eq!(f.text(), "hello");
        assert!(f.panel().has_class("textField"));
        f.set_html("<b>hi</b>");
        assert_eq!(f.panel().element().content(), &Content::Html("<b>hi</b>".into()));
    }

    #[test]
    fn progress_gradient() {
        let mut p = ProgressBarField::new("Loading");
        p.set_colors("#0a0", "#333");
        p.set_progress(50.0);
        assert_eq!(
            p.panel().element().style("background"),
            Some("linear-gradient(90deg, #0a0 49.95%, #333 50.05%)")
        );
    }
}
