//! Digit format mini-language
//!
//! A format string describes the slots of a numeric display, most
//! significant first:
//!
//! | char | slot | zero digit shows |
//! |------|------|------------------|
//! | `X`  | fixed | `0` |
//! | `x`  | blank if leading zero | blank while the value has no higher digit |
//! | `n`  | blank if zero | blank |
//! | `1`  | omittable | slot absent unless the value grows into it |
//! | other | literal | the character itself |
//!
//! Numeric slots are numbered from the least-significant end; literal slots
//! such as `:` do not consume a decimal place.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    FixedZero,
    BlankIfLeadingZero,
    BlankIfExactZero,
    OmittableLeading,
    Literal(char),
}

impl SlotKind {
    fn from_char(c: char) -> Self {
        match c {
            'X' => SlotKind::FixedZero,
            'x' => SlotKind::BlankIfLeadingZero,
            'n' => SlotKind::BlankIfExactZero,
            '1' => SlotKind::OmittableLeading,
            other => SlotKind::Literal(other),
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, SlotKind::Literal(_))
    }
}

/// One compiled slot. `position` is the decimal place for numeric slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub kind: SlotKind,
    pub position: Option<u32>,
}

/// What a slot shows for a given value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Digit(u8),
    /// Numeric slot hidden by a zero-suppression rule
    Suppressed,
    /// Literal space or an unrecognised literal
    Blank,
    Colon,
    Dash,
    P,
    /// Decimal separator dot pair
    Dots,
}

impl Glyph {
    /// Glyph for a literal format character. Unknown characters are blank.
    pub fn from_literal(c: char) -> Self {
        match c {
            ':' => Glyph::Colon,
            '-' => Glyph::Dash,
            'P' => Glyph::P,
            '.' => Glyph::Dots,
            '0'..='9' => Glyph::Digit(c as u8 - b'0'),
            _ => Glyph::Blank,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Glyph::Digit(d) if d <= 9 => (b'0' + d) as char,
            Glyph::Digit(_) | Glyph::Suppressed | Glyph::Blank => ' ',
            Glyph::Colon => ':',
            Glyph::Dash => '-',
            Glyph::P => 'P',
            Glyph::Dots => '.',
        }
    }
}

/// Compiled, immutable digit format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitFormat {
    source: String,
    /// Most significant first, as written
    slots: Vec<Slot>,
    nominal: usize,
    leading: usize,
}

impl DigitFormat {
    /// Compile a format string. Never fails: unknown characters are literals.
    pub fn compile(source: &str) -> Self {
        let kinds: Vec<SlotKind> = source.chars().map(SlotKind::from_char).collect();

        let mut place = 0u32;
        let mut slots: Vec<Slot> = kinds
            .iter()
            .rev()
            .map(|kind| {
                let position = kind.is_numeric().then(|| {
                    place += 1;
                    place - 1
                });
                Slot { kind: *kind, position }
            })
            .collect();
        slots.reverse();

        let nominal = kinds
            .iter()
            .filter(|k| k.is_numeric() && **k != SlotKind::OmittableLeading)
            .count();
        let leading = kinds
            .iter()
            .take_while(|k| **k == SlotKind::OmittableLeading)
            .count();

        DigitFormat {
            source: source.to_string(),
            slots,
            nominal,
            leading,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Numeric slots that are always laid out
    pub fn nominal_digits(&self) -> usize {
        self.nominal
    }

    /// Consecutive omittable slots at the most significant end
    pub fn leading_omittable(&self) -> usize {
        self.leading
    }

    /// Number of numeric slots active for `value`: the nominal count, grown
    /// into the leading omittable slots when the value needs more digits.
    pub fn active_digits(&self, value: u64) -> usize {
        let given = given_digits(value);
        if given > self.nominal {
            given.min(self.nominal + self.leading)
        } else {
            self.nominal
        }
    }

    /// Slots laid out for `value`, most significant first
    pub fn visible_slots(&self, value: u64) -> impl Iterator<Item = &Slot> {
        let active = self.active_digits(value);
        let given = given_digits(value);
        self.slots.iter().filter(move |slot| match (slot.kind, slot.position) {
            (SlotKind::OmittableLeading, Some(p)) => (p as usize) < active && (p as usize) < given,
            _ => true,
        })
    }

    /// Glyphs shown for `value`, most significant first
    pub fn glyphs(&self, value: u64) -> Vec<Glyph> {
        self.visible_slots(value)
            .map(|slot| slot_glyph(slot, value))
            .collect()
    }

    /// Plain-text rendering of the display, one char per visible slot
    pub fn render_text(&self, value: u64) -> String {
        self.glyphs(value).into_iter().map(Glyph::to_char).collect()
    }
}

impl From<&str> for DigitFormat {
    fn from(source: &str) -> Self {
        DigitFormat::compile(source)
    }
}

impl fmt::Display for DigitFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Decimal digits needed for `value`: `ceil(log10(value + 0.1))`, at least 1.
pub fn given_digits(value: u64) -> usize {
    let digits = ((value as f64) + 0.1).log10().ceil();
    if digits < 1.0 {
        1
    } else {
        digits as usize
    }
}

/// `value` shifted down by `position` decimal places
fn shifted(value: u64, position: u32) -> u64 {
    match 10u64.checked_pow(position) {
        Some(scale) => value / scale,
        None => 0,
    }
}

fn slot_glyph(slot: &Slot, value: u64) -> Glyph {
    let Some(position) = slot.position else {
        return match slot.kind {
            SlotKind::Literal(c) => Glyph::from_literal(c),
            _ => Glyph::Blank,
        };
    };
    let high = shifted(value, position);
    let digit = (high % 10) as u8;
    match slot.kind {
        SlotKind::FixedZero => Glyph::Digit(digit),
        SlotKind::BlankIfLeadingZero | SlotKind::OmittableLeading => {
            if high >= 1 {
                Glyph::Digit(digit)
            } else {
                Glyph::Suppressed
            }
        }
        SlotKind::BlankIfExactZero => {
            if digit >= 1 {
                Glyph::Digit(digit)
            } else {
                Glyph::Suppressed
            }
        }
        SlotKind::Literal(c) => Glyph::from_literal(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_skip_literals() {
        let f = DigitFormat::compile("XX:XX");
        let positions: Vec<_> = f.slots().iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![Some(3), Some(2), None, Some(1), Some(0)]);
        assert_eq!(f.nominal_digits(), 4);
        assert_eq!(f.leading_omittable(), 0);
    }

    #[test]
    fn unknown_characters_are_literals() {
        let f = DigitFormat::compile("Xq");
        assert_eq!(f.slots()[1].kind, SlotKind::Literal('q'));
        assert_eq!(f.glyphs(7), vec![Glyph::Digit(7), Glyph::Blank]);
    }

    #[test]
    fn given_digit_counts() {
        assert_eq!(given_digits(0), 1);
        assert_eq!(given_digits(9), 1);
        assert_eq!(given_digits(10), 2);
        assert_eq!(given_digits(999), 3);
        assert_eq!(given_digits(1000), 4);
    }

    #[test]
    fn leading_zero_and_exact_zero_rules() {
        let f = DigitFormat::compile("xxn");
        assert_eq!(f.render_text(5), "  5");
        assert_eq!(f.render_text(105), "105");
        assert_eq!(f.render_text(100), "10 ");
        assert_eq!(f.render_text(0), "   ");
    }

    #[test]
    fn growth_is_capped_by_declared_slots() {
        let f = DigitFormat::compile("11X");
        assert_eq!(f.active_digits(7), 1);
        assert_eq!(f.render_text(7), "7");
        assert_eq!(f.render_text(42), "42");
        assert_eq!(f.render_text(123), "123");
        assert_eq!(f.active_digits(98765), 3);
        assert_eq!(f.render_text(98765), "765");
    }

    #[test]
    fn literal_glyphs() {
        let f = DigitFormat::compile("-P.8 ");
        assert_eq!(
            f.glyphs(0),
            vec![Glyph::Dash, Glyph::P, Glyph::Dots, Glyph::Digit(8), Glyph::Blank]
        );
    }

    #[test]
    fn huge_positions_do_not_overflow() {
        let f = DigitFormat::compile(&"x".repeat(24));
        let text = f.render_text(u64::MAX);
        assert_eq!(text.trim_start(), u64::MAX.to_string());
    }
}
