//! Reading typed field values out of a table element.

use std::str::FromStr;

use crate::{
    bits::parse_bits,
    error::{Error, Result},
    tree::Element,
};

/// Reads the fields of one table element, tagging errors with the table name.
pub(crate) struct FieldReader<'a> {
    table: &'static str,
    element: &'a Element,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(table: &'static str, element: &'a Element) -> Self {
        Self { table, element }
    }

    /// Raw `value` attribute of a direct child, `None` when the field is absent.
    pub(crate) fn raw(&self, field: &str) -> Result<Option<&'a str>> {
        let Some(child) = self.element.child(field) else {
            return Ok(None);
        };
        child.value().map(Some).ok_or_else(|| Error::MissingValue {
            table: self.table,
            field: field.to_string(),
        })
    }

    pub(crate) fn invalid(&self, field: &str, value: &str) -> Error {
        Error::InvalidValue {
            table: self.table,
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Parse a field with [`FromStr`].
    pub(crate) fn parse<T: FromStr>(&self, field: &str) -> Result<Option<T>> {
        self.raw(field)?
            .map(|raw| raw.trim().parse().map_err(|_| self.invalid(field, raw)))
            .transpose()
    }

    /// Parse a bit-string field that must fit in `width` bits.
    pub(crate) fn bits(&self, field: &str, width: u32) -> Result<Option<u32>> {
        self.raw(field)?
            .map(|raw| {
                parse_bits(raw)
                    .filter(|v| width == 32 || *v < 1 << width)
                    .ok_or_else(|| self.invalid(field, raw))
            })
            .transpose()
    }

    /// Overwrite `slot` when the field is present.
    pub(crate) fn set<T: FromStr>(&self, field: &str, slot: &mut T) -> Result<()> {
        if let Some(value) = self.parse(field)? {
            *slot = value;
        }
        Ok(())
    }

    /// Overwrite an optional `slot` when the field is present.
    pub(crate) fn set_opt<T: FromStr>(&self, field: &str, slot: &mut Option<T>) -> Result<()> {
        if let Some(value) = self.parse(field)? {
            *slot = Some(value);
        }
        Ok(())
    }
}
