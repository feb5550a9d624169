//! post table <-> element conversion.
//!
//! Only the fixed header is exposed; glyph names are carried over from the
//! base font untouched.

use font_types::{FWord, Fixed, Version16Dot16};
use read_fonts::{FontRef, TableProvider};
use write_fonts::{dump_table, from_obj::ToOwnedTable, tables::post::Post};

use crate::{
    error::{Error, Result},
    field::FieldReader,
    tree::Element,
};

pub const POST_ELEMENT: &str = "post";

pub(crate) fn dump(font: &FontRef) -> Result<Element> {
    let post: Post = font.post()?.to_owned_table();

    let mut table = Element::new(POST_ELEMENT);
    table.push(Element::with_value("formatType", post.version));
    table.push(Element::with_value("italicAngle", format!("{:?}", post.italic_angle.to_f64())));
    table.push(Element::with_value("underlinePosition", post.underline_position.to_i16()));
    table.push(Element::with_value("underlineThickness", post.underline_thickness.to_i16()));
    table.push(Element::with_value("isFixedPitch", post.is_fixed_pitch));
    table.push(Element::with_value("minMemType42", post.min_mem_type42));
    table.push(Element::with_value("maxMemType42", post.max_mem_type42));
    table.push(Element::with_value("minMemType1", post.min_mem_type1));
    table.push(Element::with_value("maxMemType1", post.max_mem_type1));
    Ok(table)
}

/// Compile `table` onto the font's existing post table.
pub(crate) fn compile(font: &FontRef, table: &Element) -> Result<Vec<u8>> {
    let mut post: Post = font.post()?.to_owned_table();
    let fields = FieldReader::new("post", table);

    // The format decides whether glyph names are stored, so it follows the base font.
    if let Some(raw) = fields.raw("formatType")? {
        let version = parse_version(raw).ok_or_else(|| fields.invalid("formatType", raw))?;
        if version != post.version {
            log::warn!("Ignoring post formatType {raw}; keeping {}", post.version);
        }
    }
    if let Some(angle) = fields.parse::<f64>("italicAngle")? {
        post.italic_angle = Fixed::from_f64(angle);
    }
    if let Some(position) = fields.parse::<i16>("underlinePosition")? {
        post.underline_position = FWord::new(position);
    }
    if let Some(thickness) = fields.parse::<i16>("underlineThickness")? {
        post.underline_thickness = FWord::new(thickness);
    }
    fields.set("isFixedPitch", &mut post.is_fixed_pitch)?;
    fields.set("minMemType42", &mut post.min_mem_type42)?;
    fields.set("maxMemType42", &mut post.max_mem_type42)?;
    fields.set("minMemType1", &mut post.min_mem_type1)?;
    fields.set("maxMemType1", &mut post.max_mem_type1)?;

    dump_table(&post).map_err(|report| Error::Compile {
        table: "post",
        message: report.to_string(),
    })
}

/// Parse `"2.0"`, `"2.5"` or `"3"` into a table version.
fn parse_version(raw: &str) -> Option<Version16Dot16> {
    let (major, minor) = raw.trim().split_once('.').unwrap_or((raw.trim(), "0"));
    let major = major.parse::<u16>().ok()?;
    let minor = minor.parse::<u16>().ok()?;
    (minor < 10).then(|| Version16Dot16::new(major, minor))
}
