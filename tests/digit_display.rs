//! End-to-end seven-segment rendering through the widget tree

use uipanel::panel::{self, Geometry, Panel, Widget};
use uipanel::rendering::{Color, Glyph};
use uipanel::style::{StyleRuleSet, StyleSheet};
use uipanel::widgets::NumberField;
use uipanel::DisplayConfig;

const UNLIT: Color = Color::rgb(0x11, 0x11, 0x11);

fn rendered(format: &str, value: u64, width: f64, height: f64) -> NumberField {
    rendered_with(format, value, width, height, &DisplayConfig::default())
}

fn rendered_with(format: &str, value: u64, width: f64, height: f64, cfg: &DisplayConfig) -> NumberField {
    let mut field = NumberField::with_config(format, cfg);
    field.set_value(value);
    field
        .panel_mut()
        .element_mut()
        .set_geometry(Geometry::sized(width, height));
    panel::refresh(&mut field);
    field
}

#[test]
fn clock_format_keeps_leading_zero() {
    let f = rendered("XX:XX", 930, 200.0, 80.0);
    assert_eq!(f.text(), "09:30");
    assert_eq!(f.glyphs()[2], Glyph::Colon);
    assert_eq!((f.canvas().width(), f.canvas().height()), (200, 80));
}

#[test]
fn interior_omittable_slot_and_exact_zero_blanking() {
    let f = rendered("x1:nn", 5, 120.0, 40.0);
    assert_eq!(f.text(), " : 5");
    assert_eq!(f.glyphs().len(), 4);
}

#[test]
fn omittable_slot_appears_when_value_grows() {
    assert_eq!(rendered("1XX", 50, 90.0, 30.0).text(), "50");
    assert_eq!(rendered("1XX", 150, 90.0, 30.0).text(), "150");
}

#[test]
fn lit_unlit_and_background_pixels() {
    // one glyph in 100x100: box at (31,10) size 40x80, top bar rows 10..20
    let eight = rendered("X", 8, 100.0, 100.0);
    assert_eq!(eight.canvas().pixel(50, 14), Some(Color::WHITE));
    assert_eq!(eight.canvas().pixel(2, 2), Some(Color::BLACK));

    let one = rendered("X", 1, 100.0, 100.0);
    assert_eq!(one.canvas().pixel(50, 14), Some(UNLIT));
    // right-hand bars are lit for a one
    assert_eq!(one.canvas().pixel(68, 30), Some(Color::WHITE));
}

#[test]
fn suppressed_digits_are_dark_unless_ghosted() {
    let plain = rendered("x", 0, 100.0, 100.0);
    assert_eq!(plain.glyphs(), vec![Glyph::Suppressed]);
    assert_eq!(plain.canvas().pixel(50, 14), Some(Color::BLACK));

    let cfg = DisplayConfig {
        ghost_suppressed_digits: true,
        ..DisplayConfig::default()
    };
    let ghosted = rendered_with("x", 0, 100.0, 100.0, &cfg);
    assert_eq!(ghosted.canvas().pixel(50, 14), Some(UNLIT));
}

#[test]
fn style_sheet_layers_reach_nested_displays() {
    let mut root = Panel::new();
    let mut group = Panel::new().with_class("dash");
    let mut field = NumberField::new("X");
    field.set_value(8);
    field.panel_mut().add_class("speed");
    field
        .panel_mut()
        .element_mut()
        .set_geometry(Geometry::sized(100.0, 100.0));
    let id = group.append_child(field);
    root.append_child(group);

    let sheet = StyleSheet::from(vec![
        StyleRuleSet::new().with("numberField", "litColor", "#00ff00"),
        StyleRuleSet::new()
            .with("speed", "litColor", "#ff0000")
            .with("speed", "bgColor", "none"),
    ]);
    panel::apply_style(&mut root, &sheet);
    panel::refresh(&mut root);

    let field = root.find(id).unwrap().as_any().downcast_ref::<NumberField>().unwrap();
    assert_eq!(field.canvas().pixel(50, 14), Some(Color::rgb(255, 0, 0)));
    assert_eq!(field.canvas().pixel(2, 2), Some(Color::TRANSPARENT));
}

#[test]
fn nested_and_standalone_renders_match() {
    let standalone = rendered("X:XX", 745, 150.0, 60.0);

    let mut root = Panel::new();
    let mut field = NumberField::new("X:XX");
    field.set_value(745);
    field
        .panel_mut()
        .element_mut()
        .set_geometry(Geometry::sized(150.0, 60.0));
    let id = root.append_child(field);
    panel::refresh(&mut root);

    let nested = root.child_as::<NumberField>(id).unwrap();
    assert_eq!(nested.canvas().digest(), standalone.canvas().digest());
}

#[test]
fn screenshot_is_png() {
    let f = rendered("XX", 42, 64.0, 32.0);
    let shot = f.screenshot().unwrap();
    assert_eq!((shot.width, shot.height), (64, 32));
    assert_eq!(&shot.png_data[..4], b"\x89PNG");
}

#[test]
fn zero_sized_box_renders_nothing() {
    let f = rendered("XX", 42, 0.0, 0.0);
    assert_eq!(f.canvas().width(), 0);
    assert!(f.screenshot().is_err());
}
