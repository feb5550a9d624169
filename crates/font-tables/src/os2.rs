//! OS/2 table <-> element conversion.

use read_fonts::{FontRef, TableProvider};
use write_fonts::{
    dump_table,
    from_obj::ToOwnedTable,
    tables::os2::{Os2, SelectionFlags},
    types::Tag,
};

use crate::{
    bits::format_bits,
    error::{Error, Result},
    field::FieldReader,
    tree::Element,
};

/// Element name of the OS/2 table (`/` is not valid in XML names).
pub const OS2_ELEMENT: &str = "OS_2";

/// PANOSE field names in table order.
pub const PANOSE_FIELDS: [&str; 10] = [
    "bFamilyType",
    "bSerifStyle",
    "bWeight",
    "bProportion",
    "bContrast",
    "bStrokeVariation",
    "bArmStyle",
    "bLetterForm",
    "bMidline",
    "bXHeight",
];

const UNICODE_RANGES: [&str; 4] =
    ["ulUnicodeRange1", "ulUnicodeRange2", "ulUnicodeRange3", "ulUnicodeRange4"];

pub(crate) fn dump(font: &FontRef) -> Result<Element> {
    let version = font.os2()?.version();
    let os2: Os2 = font.os2()?.to_owned_table();

    let mut table = Element::new(OS2_ELEMENT);
    table.push(Element::with_value("version", version));
    table.push(Element::with_value("xAvgCharWidth", os2.x_avg_char_width));
    table.push(Element::with_value("usWeightClass", os2.us_weight_class));
    table.push(Element::with_value("usWidthClass", os2.us_width_class));
    table.push(Element::with_value("fsType", format_bits(os2.fs_type as u32, 16)));
    table.push(Element::with_value("ySubscriptXSize", os2.y_subscript_x_size));
    table.push(Element::with_value("ySubscriptYSize", os2.y_subscript_y_size));
    table.push(Element::with_value("ySubscriptXOffset", os2.y_subscript_x_offset));
    table.push(Element::with_value("ySubscriptYOffset", os2.y_subscript_y_offset));
    table.push(Element::with_value("ySuperscriptXSize", os2.y_superscript_x_size));
    table.push(Element::with_value("ySuperscriptYSize", os2.y_superscript_y_size));
    table.push(Element::with_value("ySuperscriptXOffset", os2.y_superscript_x_offset));
    table.push(Element::with_value("ySuperscriptYOffset", os2.y_superscript_y_offset));
    table.push(Element::with_value("yStrikeoutSize", os2.y_strikeout_size));
    table.push(Element::with_value("yStrikeoutPosition", os2.y_strikeout_position));
    table.push(Element::with_value("sFamilyClass", os2.s_family_class));

    let mut panose = Element::new("panose");
    for (name, value) in PANOSE_FIELDS.iter().zip(os2.panose_10) {
        panose.push(Element::with_value(*name, value));
    }
    table.push(panose);

    let ranges = [
        os2.ul_unicode_range_1,
        os2.ul_unicode_range_2,
        os2.ul_unicode_range_3,
        os2.ul_unicode_range_4,
    ];
    for (name, value) in UNICODE_RANGES.iter().zip(ranges) {
        table.push(Element::with_value(*name, format_bits(value, 32)));
    }
    table.push(Element::with_value("achVendID", os2.ach_vend_id));
    table.push(Element::with_value("fsSelection", format_bits(os2.fs_selection.bits() as u32, 16)));
    table.push(Element::with_value("usFirstCharIndex", os2.us_first_char_index));
    table.push(Element::with_value("usLastCharIndex", os2.us_last_char_index));
    table.push(Element::with_value("sTypoAscender", os2.s_typo_ascender));
    table.push(Element::with_value("sTypoDescender", os2.s_typo_descender));
    table.push(Element::with_value("sTypoLineGap", os2.s_typo_line_gap));
    table.push(Element::with_value("usWinAscent", os2.us_win_ascent));
    table.push(Element::with_value("usWinDescent", os2.us_win_descent));

    let code_pages = [
        ("ulCodePageRange1", os2.ul_code_page_range_1),
        ("ulCodePageRange2", os2.ul_code_page_range_2),
    ];
    for (name, value) in code_pages {
        if let Some(value) = value {
            table.push(Element::with_value(name, format_bits(value, 32)));
        }
    }

    let optional = [
        ("sxHeight", os2.sx_height.map(i32::from)),
        ("sCapHeight", os2.s_cap_height.map(i32::from)),
        ("usDefaultChar", os2.us_default_char.map(i32::from)),
        ("usBreakChar", os2.us_break_char.map(i32::from)),
        ("usMaxContext", os2.us_max_context.map(i32::from)),
        ("usLowerOpticalPointSize", os2.us_lower_optical_point_size.map(i32::from)),
        ("usUpperOpticalPointSize", os2.us_upper_optical_point_size.map(i32::from)),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            table.push(Element::with_value(name, value));
        }
    }

    Ok(table)
}

/// Compile `table` onto the font's existing OS/2 table.
///
/// Fields missing from the element keep the font's values. Returns the
/// compiled table bytes.
pub(crate) fn compile(font: &FontRef, table: &Element) -> Result<Vec<u8>> {
    let mut os2: Os2 = font.os2()?.to_owned_table();
    let fields = FieldReader::new("OS/2", table);

    fields.set("xAvgCharWidth", &mut os2.x_avg_char_width)?;
    fields.set("usWeightClass", &mut os2.us_weight_class)?;
    fields.set("usWidthClass", &mut os2.us_width_class)?;
    if let Some(bits) = fields.bits("fsType", 16)? {
        os2.fs_type = bits as u16;
    }
    fields.set("ySubscriptXSize", &mut os2.y_subscript_x_size)?;
    fields.set("ySubscriptYSize", &mut os2.y_subscript_y_size)?;
    fields.set("ySubscriptXOffset", &mut os2.y_subscript_x_offset)?;
    fields.set("ySubscriptYOffset", &mut os2.y_subscript_y_offset)?;
    fields.set("ySuperscriptXSize", &mut os2.y_superscript_x_size)?;
    fields.set("ySuperscriptYSize", &mut os2.y_superscript_y_size)?;
    fields.set("ySuperscriptXOffset", &mut os2.y_superscript_x_offset)?;
    fields.set("ySuperscriptYOffset", &mut os2.y_superscript_y_offset)?;
    fields.set("yStrikeoutSize", &mut os2.y_strikeout_size)?;
    fields.set("yStrikeoutPosition", &mut os2.y_strikeout_position)?;
    fields.set("sFamilyClass", &mut os2.s_family_class)?;

    if let Some(panose) = table.child("panose") {
        let panose_fields = FieldReader::new("OS/2", panose);
        for (i, name) in PANOSE_FIELDS.iter().enumerate() {
            panose_fields.set(name, &mut os2.panose_10[i])?;
        }
    }

    let ranges = [
        &mut os2.ul_unicode_range_1,
        &mut os2.ul_unicode_range_2,
        &mut os2.ul_unicode_range_3,
        &mut os2.ul_unicode_range_4,
    ];
    for (name, slot) in UNICODE_RANGES.iter().zip(ranges) {
        if let Some(bits) = fields.bits(name, 32)? {
            *slot = bits;
        }
    }

    if let Some(raw) = fields.raw("achVendID")? {
        os2.ach_vend_id = parse_vendor_id(raw).ok_or_else(|| fields.invalid("achVendID", raw))?;
    }
    if let Some(bits) = fields.bits("fsSelection", 16)? {
        os2.fs_selection = SelectionFlags::from_bits_truncate(bits as u16);
    }
    fields.set("usFirstCharIndex", &mut os2.us_first_char_index)?;
    fields.set("usLastCharIndex", &mut os2.us_last_char_index)?;
    fields.set("sTypoAscender", &mut os2.s_typo_ascender)?;
    fields.set("sTypoDescender", &mut os2.s_typo_descender)?;
    fields.set("sTypoLineGap", &mut os2.s_typo_line_gap)?;
    fields.set("usWinAscent", &mut os2.us_win_ascent)?;
    fields.set("usWinDescent", &mut os2.us_win_descent)?;
    if let Some(bits) = fields.bits("ulCodePageRange1", 32)? {
        os2.ul_code_page_range_1 = Some(bits);
    }
    if let Some(bits) = fields.bits("ulCodePageRange2", 32)? {
        os2.ul_code_page_range_2 = Some(bits);
    }
    fields.set_opt("sxHeight", &mut os2.sx_height)?;
    fields.set_opt("sCapHeight", &mut os2.s_cap_height)?;
    fields.set_opt("usDefaultChar", &mut os2.us_default_char)?;
    fields.set_opt("usBreakChar", &mut os2.us_break_char)?;
    fields.set_opt("usMaxContext", &mut os2.us_max_context)?;
    fields.set_opt("usLowerOpticalPointSize", &mut os2.us_lower_optical_point_size)?;
    fields.set_opt("usUpperOpticalPointSize", &mut os2.us_upper_optical_point_size)?;

    let mut data = dump_table(&os2).map_err(|report| Error::Compile {
        table: "OS/2",
        message: report.to_string(),
    })?;

    // Versions 2 to 4 share one layout; the compiler always emits 4.
    let version = fields.parse::<u16>("version")?.unwrap_or(font.os2()?.version());
    let compiled = u16::from_be_bytes([data[0], data[1]]);
    if (2..=4).contains(&compiled) && (2..=4).contains(&version) {
        data[..2].copy_from_slice(&version.to_be_bytes());
    }
    Ok(data)
}

/// Four-byte vendor tag, space padded like fontTools does for short IDs.
fn parse_vendor_id(raw: &str) -> Option<Tag> {
    let bytes = raw.as_bytes();
    if bytes.len() > 4 || !raw.is_ascii() {
        return None;
    }
    let mut tag = [b' '; 4];
    tag[..bytes.len()].copy_from_slice(bytes);
    Some(Tag::new(&tag))
}
