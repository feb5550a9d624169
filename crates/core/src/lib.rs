//! Mojiforge Core - build pipeline for merged Latin and Japanese fonts.

pub mod config;
pub mod io;
pub mod naming;
pub mod pipeline;
pub mod tools;

pub use config::{BuildConfig, DEFAULT_CONFIG_FILE};
pub use naming::{VariantDescriptor, VariantPaths};
pub use pipeline::{
    BuildOptions, BuildReport, build, clean_intermediates, discover_variants, edit_fonts,
    fix_tables,
};
pub use tools::{ExternalTools, FontTool};
pub use mojiforge_font_metadata::{MetadataEdits, Style};
