//! Generic font table manipulation utilities.

use anyhow::{Context, Result};
use read_fonts::{FontRef, types::Tag};
use write_fonts::FontBuilder;

/// Vertical metrics tables removed from the Japanese font before merging.
pub const VERTICAL_METRICS_TABLES: [Tag; 2] = [Tag::new(b"vhea"), Tag::new(b"vmtx")];

/// Rebuild font data with only the tables accepted by `keep`.
pub fn rewrite_font_filtered(data: &[u8], keep: impl Fn(Tag) -> bool) -> Result<Vec<u8>> {
    let font = FontRef::new(data).context("Failed to parse font")?;
    let mut builder = FontBuilder::new();

    for record in font.table_directory.table_records() {
        let tag = record.tag();
        if !keep(tag) {
            continue;
        }
        if let Some(table_data) = font.table_data(tag) {
            builder.add_raw(tag, table_data);
        }
    }

    Ok(builder.build())
}

/// Tags of all tables present in the font, in directory order.
pub fn table_tags(data: &[u8]) -> Result<Vec<Tag>> {
    let font = FontRef::new(data).context("Failed to parse font")?;
    Ok(font.table_directory.table_records().iter().map(|r| r.tag()).collect())
}

/// Remove the given tables from a font.
///
/// Returns `None` when none of the tables are present, so callers can skip
/// rewriting the file.
pub fn drop_tables(data: &[u8], tags: &[Tag]) -> Result<Option<Vec<u8>>> {
    let present = table_tags(data)?;
    if !tags.iter().any(|tag| present.contains(tag)) {
        return Ok(None);
    }
    rewrite_font_filtered(data, |tag| !tags.contains(&tag)).map(Some)
}

/// Remove `vhea` and `vmtx` so the merged font carries no stale vertical metrics.
pub fn drop_vertical_metrics(data: &[u8]) -> Result<Option<Vec<u8>>> {
    drop_tables(data, &VERTICAL_METRICS_TABLES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font_with(tags: &[&[u8; 4]]) -> Vec<u8> {
        let mut builder = FontBuilder::new();
        for tag in tags {
            builder.add_raw(Tag::new(tag), vec![0u8; 8]);
        }
        builder.build()
    }

    #[test]
    fn test_drop_vertical_metrics() {
        let data = font_with(&[b"cmap", b"vhea", b"vmtx"]);
        let stripped = drop_vertical_metrics(&data).unwrap().unwrap();
        assert_eq!(table_tags(&stripped).unwrap(), vec![Tag::new(b"cmap")]);
    }

    #[test]
    fn test_drop_tables_absent() {
        let data = font_with(&[b"cmap", b"name"]);
        assert!(drop_vertical_metrics(&data).unwrap().is_none());
    }

    #[test]
    fn test_rewrite_font_filtered_keeps_table_data() {
        let mut builder = FontBuilder::new();
        builder.add_raw(Tag::new(b"cmap"), vec![1u8, 2, 3, 4]);
        builder.add_raw(Tag::new(b"DSIG"), vec![0u8; 8]);
        let data = builder.build();

        let rewritten = rewrite_font_filtered(&data, |tag| tag != Tag::new(b"DSIG")).unwrap();
        assert_eq!(table_tags(&rewritten).unwrap(), vec![Tag::new(b"cmap")]);
        let font = FontRef::new(&rewritten).unwrap();
        assert_eq!(font.table_data(Tag::new(b"cmap")).unwrap().as_bytes(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_drop_tables_keeps_unlisted() {
        let data = font_with(&[b"cmap", b"DSIG", b"name"]);
        let rewritten = drop_tables(&data, &[Tag::new(b"DSIG")]).unwrap().unwrap();
        assert_eq!(table_tags(&rewritten).unwrap(), vec![Tag::new(b"cmap"), Tag::new(b"name")]);
    }
}
