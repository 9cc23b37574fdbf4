//! UIPanel
//!
//! A headless, composable widget tree. Panels compose into text fields,
//! buttons, tab selectors, aspect-aware images and seven-segment numeric
//! displays, all driven by a two-phase layout protocol that batches every
//! geometry read before any geometry-dependent write.
//!
//! # Features
//!
//! - **Two-phase refresh**: [`panel::refresh`] measures the whole subtree,
//!   then applies the whole subtree
//! - **Class-keyed styles**: [`style::StyleRuleSet`] values pulled by each node
//!   through its own ordered class tags
//! - **Seven-segment displays**: [`widgets::NumberField`] compiles a format
//!   string such as `"x1:XX"` and paints into an RGBA canvas
//!
//! # Example
//!
//! ```
//! use uipanel::panel::{self, Geometry, Panel, Widget};
//! use uipanel::widgets::NumberField;
//!
//! let mut root = Panel::new();
//! let mut clock = NumberField::new("XX:XX");
//! clock.set_value(930);
//! clock.panel_mut().element_mut().set_geometry(Geometry::sized(200.0, 80.0));
//! let id = root.append_child(clock);
//!
//! panel::refresh(&mut root);
//!
//! let clock = root.child_as::<NumberField>(id).unwrap();
//! assert_eq!(clock.text(), "09:30");
//! assert_eq!(clock.canvas().width(), 200);
//! ```

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

// Widget tree and layout protocol
pub mod panel;

// Class-keyed style rule sets
pub mod style;

// Digit format compiler, seven-segment geometry and rasterizer
pub mod rendering;

// Concrete widgets built on `Panel`
pub mod widgets;

// Debounced refresh triggers
pub mod schedule;

use rendering::{Color, DisplayStyle};

/// Default appearance of seven-segment displays
///
/// Loaded from JSON with camelCase keys; every field is optional.
///
/// # Examples
///
/// ```
/// let cfg = uipanel::DisplayConfig::from_json(r##"{"litColor": "#0f0", "bgColor": null}"##).unwrap();
/// assert_eq!(cfg.lit_color, uipanel::rendering::Color::rgb(0, 255, 0));
/// assert!(cfg.bg_color.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayConfig {
    /// Colour of lit segments
    pub lit_color: Color,
    /// Colour of the unlit "8" drawn behind each digit
    pub unlit_color: Color,
    /// Background fill; `None` clears to transparent
    pub bg_color: Option<Color>,
    /// Draw the unlit outline behind zero-suppressed digits as well
    pub ghost_suppressed_digits: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let style = DisplayStyle::default();
        Self {
            lit_color: style.lit,
            unlit_color: style.unlit,
            bg_color: style.background,
            ghost_suppressed_digits: style.ghost_suppressed,
        }
    }
}

impl DisplayConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::ConfigError(e.to_string()))
    }

    pub fn display_style(&self) -> DisplayStyle {
        DisplayStyle {
            lit: self.lit_color,
            unlit: self.unlit_color,
            background: self.bg_color,
            ghost_suppressed: self.ghost_suppressed_digits,
        }
    }
}
