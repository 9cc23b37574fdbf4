//! Image panel that keeps its image's aspect ratio
//!
//! Orientation is measured from the panel's own box: wider than tall is
//! landscape, where the image fills the height; otherwise it fills the width.

use std::collections::BTreeMap;

use base64::Engine as Base64Engine;

use crate::panel::{Panel, Widget};
use crate::{Error, Result};

/// 1×1 transparent GIF used when no source is given
pub const BLANK_IMAGE: &str = "data:image/gif;base64,R0lGODlhAQABAAD/ACwAAAAAAQABAAACADs=";

pub struct ImageField {
    panel: Panel,
    src: String,
    image_styles: BTreeMap<String, String>,
    landscape: bool,
    /// Orientation the image styles were last written for
    applied: Option<bool>,
}

impl ImageField {
    pub fn new(src: Option<&str>) -> Self {
        let mut panel = Panel::new().with_class("imageField");
        panel.set_style("justifyContent", "center");
        let mut field = ImageField {
            panel,
            src: src.unwrap_or(BLANK_IMAGE).to_string(),
            image_styles: BTreeMap::new(),
            landscape: true,
            applied: None,
        };
        field.set_resize_policy();
        field
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    /// Replace the source. Setting the current source again is a no-op.
    pub fn set_src(&mut self, src: &str) {
        if self.src != src {
            self.src = src.to_string();
        }
    }

    pub fn is_landscape(&self) -> bool {
        self.landscape
    }

    /// Inline style currently set on the inner image
    pub fn image_style(&self, name: &str) -> Option<&str> {
        self.image_styles.get(name).map(String::as_str)
    }

    /// Decode the payload of a base64 `data:` URL source
    pub fn source_bytes(&self) -> Result<Vec<u8>> {
        let rest = self
            .src
            .strip_prefix("data:")
            .ok_or_else(|| Error::DecodeError(format!("not a data URL: {}", self.src)))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| Error::DecodeError("data URL has no payload".into()))?;
        if !meta.ends_with(";base64") {
            return Err(Error::DecodeError(format!("unsupported data URL encoding: {}", meta)));
        }
        base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| Error::DecodeError(e.to_string()))
    }

    fn set_image_style(&mut self, name: &str, value: &str) {
        self.image_styles.insert(name.to_string(), value.to_string());
    }

    fn set_resize_policy(&mut self) {
        if self.applied == Some(self.landscape) {
            return;
        }
        if self.landscape {
            self.set_image_style("height", "100%");
            self.set_image_style("width", "auto");
            self.panel.set_style("flexDirection", "row");
        } else {
            self.set_image_style("height", "auto");
            self.set_image_style("width", "100%");
            self.panel.set_style("flexDirection", "column");
        }
        self.applied = Some(self.landscape);
    }
}

impl Widget for ImageField {
    crate::impl_widget_base!(panel);

    fn measure(&mut self) {
        let g = self.panel.element().geometry();
        self.landscape = g.client_width > g.client_height;
        self.panel.measure_children();
    }

    fn apply(&mut self) {
        self.panel.apply_children();
        self.set_resize_policy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::{refresh, Geometry};

    #[test]
    fn orientation_follows_measured_box() {
        let mut img = ImageField::new(None);
        assert_eq!(img.image_style("height"), Some("100%"));

        img.panel_mut()
            .element_mut()
            .set_geometry(Geometry::sized(50.0, 120.0));
        refresh(&mut img);
        assert!(!img.is_landscape());
        assert_eq!(img.image_style("width"), Some("100%"));
        assert_eq!(img.image_style("height"), Some("auto"));
        assert_eq!(img.panel().element().style("flexDirection"), Some("column"));
    }

    #[test]
    fn blank_image_decodes_to_gif() {
        let img = ImageField::new(None);
        let bytes = img.source_bytes().unwrap();
        assert_eq!(&bytes[..6], b"GIF89a");

        let remote = ImageField::new(Some("https://example.com/a.png"));
        assert!(remote.source_bytes().is_err());
    }
}
