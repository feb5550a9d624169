//! Error types for the TTX round trip.

use std::path::PathBuf;

/// Result type for table dump and compile operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while dumping, parsing or applying table XML.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to read or write a `.ttx` file.
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document is not well-formed XML.
    #[error("Malformed table XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The document root is not `<ttFont>`.
    #[error("Unexpected root element '{0}', expected 'ttFont'")]
    UnexpectedRoot(String),

    /// A field element has no `value` attribute.
    #[error("{table} field '{field}' has no value attribute")]
    MissingValue { table: &'static str, field: String },

    /// A field value cannot be converted to the table's field type.
    #[error("Invalid value '{value}' for {table} field '{field}'")]
    InvalidValue {
        table: &'static str,
        field: String,
        value: String,
    },

    /// Font read error.
    #[error("Font read error: {0}")]
    ReadError(#[from] read_fonts::ReadError),

    /// Failed to compile a table.
    #[error("Failed to compile {table} table: {message}")]
    Compile {
        table: &'static str,
        message: String,
    },
}
