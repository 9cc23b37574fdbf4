//! Seven-segment numeric display
//!
//! `NumberField` owns a canvas sized to its measured box. It takes part in
//! the layout protocol like any panel: `measure` captures the box size before
//! recursing, `apply` resizes the canvas after recursing and repaints the
//! whole surface. Value and format changes are picked up by the next apply
//! or an explicit [`Widget::update`].

use log::warn;

use crate::panel::{Panel, Widget};
use crate::rendering::{paint_display, Canvas, Color, DigitFormat, DisplayStyle, Glyph, Screenshot};
use crate::style::StyleRuleSet;
use crate::{DisplayConfig, Result};

pub struct NumberField {
    panel: Panel,
    format: DigitFormat,
    value: u64,
    style: DisplayStyle,
    lit_override: Option<Color>,
    measured: Option<(u32, u32)>,
    canvas: Canvas,
}

impl NumberField {
    pub fn new(format: &str) -> Self {
        Self::with_config(format, &DisplayConfig::default())
    }

    pub fn with_config(format: &str, config: &DisplayConfig) -> Self {
        let mut panel = Panel::new().with_class("numberField");
        panel.set_style("width", "100%").set_style("height", "100%");
        NumberField {
            panel,
            format: DigitFormat::compile(format),
            value: 0,
            style: config.display_style(),
            lit_override: None,
            measured: None,
            canvas: Canvas::new(0, 0),
        }
    }

    pub fn format(&self) -> &DigitFormat {
        &self.format
    }

    pub fn set_format(&mut self, format: &str) {
        self.format = DigitFormat::compile(format);
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn set_value(&mut self, value: u64) {
        self.value = value;
    }

    /// Set from a float, truncating toward zero. Negative and NaN become 0.
    pub fn set_value_f64(&mut self, value: f64) {
        if value.is_nan() || value < 0.0 {
            warn!("{:?}: clamping display value {} to 0", self.panel.id(), value);
            self.value = 0;
        } else {
            self.value = value.trunc() as u64;
        }
    }

    /// Override the lit colour; `None` returns to the styled colour
    pub fn set_lit_color_override(&mut self, color: Option<Color>) {
        self.lit_override = color;
    }

    pub fn lit_color(&self) -> Color {
        self.style.lit
    }

    pub fn unlit_color(&self) -> Color {
        self.style.unlit
    }

    pub fn background(&self) -> Option<Color> {
        self.style.background
    }

    /// Colours as they will be painted, override applied
    pub fn display_style(&self) -> DisplayStyle {
        DisplayStyle {
            lit: self.lit_override.unwrap_or(self.style.lit),
            ..self.style
        }
    }

    pub fn glyphs(&self) -> Vec<Glyph> {
        self.format.glyphs(self.value)
    }

    pub fn text(&self) -> String {
        self.format.render_text(self.value)
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn screenshot(&self) -> Result<Screenshot> {
        self.canvas.screenshot()
    }

    fn repaint(&mut self) {
        let cmds = paint_display(
            &self.glyphs(),
            self.canvas.width(),
            self.canvas.height(),
            &self.display_style(),
        );
        self.canvas.execute(&cmds);
    }

    fn styled_color(&self, rules: &StyleRuleSet, property: &str) -> Option<Color> {
        let value = self.panel.get_apply_style(rules, property)?;
        let parsed = value
            .as_str()
            .ok_or_else(|| crate::Error::InvalidColor(value.to_string()))
            .and_then(str::parse::<Color>);
        match parsed {
            Ok(color) => Some(color),
            Err(e) => {
                warn!("{:?}: ignoring {}: {}", self.panel.id(), property, e);
                None
            }
        }
    }
}

/// Largest canvas edge, in pixels
pub const MAX_CANVAS_SIDE: u32 = 16_384;

/// Pixel length of a measured edge. NaN and negative sizes are empty; huge
/// or infinite ones are capped at [`MAX_CANVAS_SIDE`].
fn canvas_side(measured: f64) -> u32 {
    if measured.is_nan() || measured <= 0.0 {
        0
    } else {
        measured.min(MAX_CANVAS_SIDE as f64) as u32
    }
}

impl Widget for NumberField {
    crate::impl_widget_base!(panel);

    fn measure(&mut self) {
        let g = self.panel.element().geometry();
        self.measured = Some((canvas_side(g.client_width), canvas_side(g.client_height)));
        self.panel.measure_children();
    }

    fn apply(&mut self) {
        self.panel.apply_children();
        if let Some((width, height)) = self.measured.take() {
            self.canvas.resize(width, height);
        }
        self.repaint();
    }

    fn apply_style(&mut self, rules: &StyleRuleSet) {
        if let Some(c) = self.styled_color(rules, "litColor") {
            self.style.lit = c;
        }
        if let Some(c) = self.styled_color(rules, "unlitColor") {
            self.style.unlit = c;
        }
        match self.panel.get_apply_style(rules, "bgColor").and_then(|v| v.as_str()) {
            Some(v) if v.eq_ignore_ascii_case("none") => self.style.background = None,
            Some(_) => {
                if let Some(c) = self.styled_color(rules, "bgColor") {
                    self.style.background = Some(c);
                }
            }
            None => {}
        }
        self.panel.apply_style_children(rules);
    }

    fn update(&mut self) {
        self.panel.update_children();
        self.repaint();
    }
}
