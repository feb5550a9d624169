//! OS/2 and post metadata rules for the merged fonts.
//!
//! The rules are fixed lookup tables keyed by style and by whether a variant
//! is half-width. They are applied to a [`TtxDocument`] so the same edits can
//! be reviewed in the dumped `.ttx` file before being compiled.

use std::{fmt, str::FromStr};

use anyhow::{Result, anyhow};
use mojiforge_font_tables::{PANOSE_FIELDS, TtxDocument, format_bits};

/// Font style as it appears in file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Regular,
    Italic,
    Bold,
    BoldItalic,
}

impl Style {
    pub const ALL: [Style; 4] = [Style::Regular, Style::Italic, Style::Bold, Style::BoldItalic];

    pub const fn name(self) -> &'static str {
        match self {
            Style::Regular => "Regular",
            Style::Italic => "Italic",
            Style::Bold => "Bold",
            Style::BoldItalic => "BoldItalic",
        }
    }

    /// OS/2 fsSelection: WWS (bit 8) plus REGULAR, ITALIC and/or BOLD.
    pub const fn fs_selection(self) -> u16 {
        match self {
            Style::Regular => 0b0000_0001_0100_0000,
            Style::Italic => 0b0000_0001_0000_0001,
            Style::Bold => 0b0000_0001_0010_0000,
            Style::BoldItalic => 0b0000_0001_0010_0001,
        }
    }

    pub const fn is_bold(self) -> bool {
        matches!(self, Style::Bold | Style::BoldItalic)
    }

    /// PANOSE bWeight: 5 (Book) or 8 (Bold).
    pub const fn panose_weight(self) -> u8 {
        if self.is_bold() { 8 } else { 5 }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Style {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Style::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| anyhow!("Unknown style '{s}'. Expected Regular, Italic, Bold or BoldItalic."))
    }
}

/// Glyph width class of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Latin glyphs are half the width of Japanese glyphs (2:1).
    Half,
    /// Latin glyphs keep their proportional widths (3:5).
    Full,
}

impl Width {
    /// `Half` when `variant` contains `half_width_marker`.
    pub fn of_variant(variant: &str, half_width_marker: &str) -> Self {
        if variant.contains(half_width_marker) { Width::Half } else { Width::Full }
    }

    /// PANOSE bProportion: 9 (Monospaced) or 3 (Modern).
    pub const fn panose_proportion(self) -> u8 {
        match self {
            Width::Half => 9,
            Width::Full => 3,
        }
    }
}

/// PANOSE classification written to every merged font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panose(pub [u8; 10]);

impl Panose {
    /// Sans serif, normal contrast and stroke, straight arms, standard x-height.
    pub const fn for_font(style: Style, width: Width) -> Self {
        Self([2, 11, style.panose_weight(), width.panose_proportion(), 2, 2, 3, 2, 2, 7])
    }

    /// `(field name, value)` pairs in table order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, u8)> + '_ {
        PANOSE_FIELDS.into_iter().zip(self.0)
    }
}

/// Average advance widths, taken from the build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AverageWidths {
    pub half: i16,
    pub full: i16,
}

impl AverageWidths {
    pub const fn for_width(self, width: Width) -> i16 {
        match width {
            Width::Half => self.half,
            Width::Full => self.full,
        }
    }
}

/// The complete set of OS/2 and post edits for one font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataEdits {
    pub x_avg_char_width: i16,
    pub fs_selection: u16,
    pub panose: Panose,
    pub is_fixed_pitch: u32,
}

impl MetadataEdits {
    pub fn new(style: Style, width: Width, widths: AverageWidths) -> Self {
        Self {
            x_avg_char_width: widths.for_width(width),
            fs_selection: style.fs_selection(),
            panose: Panose::for_font(style, width),
            // Japanese glyphs are wider than Latin ones, so the font is not fixed pitch.
            is_fixed_pitch: 0,
        }
    }

    /// Edits for the variant token parsed from a file name.
    pub fn for_variant(
        style: Style,
        variant: &str,
        half_width_marker: &str,
        widths: AverageWidths,
    ) -> Self {
        Self::new(style, Width::of_variant(variant, half_width_marker), widths)
    }

    /// Apply the edits to every matching element in the document.
    ///
    /// Applying the same edits twice leaves the document unchanged.
    pub fn apply(&self, doc: &mut TtxDocument) {
        self.apply_os2(doc);
        self.apply_post(doc);
    }

    fn apply_os2(&self, doc: &mut TtxDocument) {
        doc.set_value_all("xAvgCharWidth", self.x_avg_char_width);
        doc.set_value_all("fsSelection", format_bits(self.fs_selection as u32, 16));
        for (name, value) in self.panose.entries() {
            doc.set_value_all(name, value);
        }
    }

    fn apply_post(&self, doc: &mut TtxDocument) {
        doc.set_value_all("isFixedPitch", self.is_fixed_pitch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTHS: AverageWidths = AverageWidths { half: 500, full: 1000 };

    #[test]
    fn test_fs_selection_bits() {
        let bits: Vec<_> =
            Style::ALL.iter().map(|s| format_bits(s.fs_selection() as u32, 16)).collect();
        assert_eq!(
            bits,
            ["00000001 01000000", "00000001 00000001", "00000001 00100000", "00000001 00100001"]
        );
    }

    #[test]
    fn test_panose_half_width() {
        assert_eq!(Panose::for_font(Style::Regular, Width::Half).0, [2, 11, 5, 9, 2, 2, 3, 2, 2, 7]);
        assert_eq!(Panose::for_font(Style::BoldItalic, Width::Half).0, [2, 11, 8, 9, 2, 2, 3, 2, 2, 7]);
    }

    #[test]
    fn test_panose_full_width() {
        assert_eq!(Panose::for_font(Style::Italic, Width::Full).0, [2, 11, 5, 3, 2, 2, 3, 2, 2, 7]);
        assert_eq!(Panose::for_font(Style::Bold, Width::Full).0, [2, 11, 8, 3, 2, 2, 3, 2, 2, 7]);
    }

    #[test]
    fn test_width_of_variant() {
        assert_eq!(Width::of_variant("HW", "HW"), Width::Half);
        assert_eq!(Width::of_variant("HWJPDOC", "HW"), Width::Half);
        assert_eq!(Width::of_variant("", "HW"), Width::Full);
        assert_eq!(Width::of_variant("JPDOC", "HW"), Width::Full);
    }

    #[test]
    fn test_x_avg_char_width_follows_marker() {
        let half = MetadataEdits::for_variant(Style::Regular, "35HW", "HW", WIDTHS);
        let full = MetadataEdits::for_variant(Style::Regular, "35", "HW", WIDTHS);
        assert_eq!(half.x_avg_char_width, 500);
        assert_eq!(full.x_avg_char_width, 1000);
    }

    #[test]
    fn test_parse_style() {
        for style in Style::ALL {
            assert_eq!(style.name().parse::<Style>().unwrap(), style);
        }
        assert!("Medium".parse::<Style>().is_err());
        assert!("regular".parse::<Style>().is_err());
    }

    const SAMPLE_TTX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ttFont sfntVersion="\x00\x01\x00\x00">
  <OS_2>
    <version value="4"/>
    <xAvgCharWidth value="1100"/>
    <panose>
      <bFamilyType value="2"/>
      <bSerifStyle value="11"/>
      <bWeight value="6"/>
      <bProportion value="9"/>
      <bContrast value="6"/>
      <bStrokeVariation value="3"/>
      <bArmStyle value="0"/>
      <bLetterForm value="2"/>
      <bMidline value="0"/>
      <bXHeight value="4"/>
    </panose>
    <fsSelection value="00000000 11000000"/>
  </OS_2>
  <post>
    <formatType value="2.0"/>
    <isFixedPitch value="1"/>
  </post>
</ttFont>
"#;

    #[test]
    fn test_apply_to_document() {
        let mut doc = TtxDocument::parse(SAMPLE_TTX).unwrap();
        MetadataEdits::for_variant(Style::BoldItalic, "HW", "HW", WIDTHS).apply(&mut doc);

        assert_eq!(doc.values("xAvgCharWidth"), ["500"]);
        assert_eq!(doc.values("fsSelection"), ["00000001 00100001"]);
        assert_eq!(doc.values("isFixedPitch"), ["0"]);
        let panose: Vec<_> = PANOSE_FIELDS.iter().flat_map(|name| doc.values(name)).collect();
        assert_eq!(panose, ["2", "11", "8", "9", "2", "2", "3", "2", "2", "7"]);
        assert_eq!(doc.values("version"), ["4"]);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let edits = MetadataEdits::for_variant(Style::Regular, "", "HW", WIDTHS);
        let mut once = TtxDocument::parse(SAMPLE_TTX).unwrap();
        edits.apply(&mut once);
        let mut twice = once.clone();
        edits.apply(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_is_fixed_pitch_always_zero() {
        for style in Style::ALL {
            for width in [Width::Half, Width::Full] {
                assert_eq!(MetadataEdits::new(style, width, WIDTHS).is_fixed_pitch, 0);
            }
        }
    }
}
