//! Options for font merging

use read_fonts::types::Tag;

/// Options for font merging
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Tables to drop from the merged font
    pub drop_tables: Vec<Tag>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set tables to drop (accepts any iterable of string-like values)
    pub fn drop_tables(mut self, tables: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        self.drop_tables = tables.into_iter().filter_map(|s| parse_tag(s.as_ref())).collect();
        self
    }

    /// Arguments passed to pyftmerge before the input fonts.
    pub(crate) fn to_args(&self) -> Vec<String> {
        if self.drop_tables.is_empty() {
            return Vec::new();
        }
        let tables: Vec<String> = self.drop_tables.iter().map(|t| t.to_string().trim_end().to_string()).collect();
        vec![format!("--drop-tables={}", tables.join(","))]
    }
}

/// Table tags shorter than four bytes are padded with spaces.
fn parse_tag(s: &str) -> Option<Tag> {
    let s = s.trim();
    if s.is_empty() || s.len() > 4 || !s.is_ascii() {
        return None;
    }
    let mut bytes = [b' '; 4];
    bytes[..s.len()].copy_from_slice(s.as_bytes());
    Some(Tag::new(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_tables_args() {
        let options = Options::new().drop_tables(["DSIG", "cvt", "bogus-tag"]);
        assert_eq!(options.drop_tables, vec![Tag::new(b"DSIG"), Tag::new(b"cvt ")]);
        assert_eq!(options.to_args(), ["--drop-tables=DSIG,cvt"]);
    }

    #[test]
    fn test_no_args_by_default() {
        let options = Options::default();
        assert!(options.to_args().is_empty());
    }
}
