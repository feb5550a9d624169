//! Per-variant step definitions.

use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use mojiforge_font_metadata::MetadataEdits;
use mojiforge_font_tables::TtxDocument;

use crate::{
    config::BuildConfig,
    io::{FontFile, read_font, write_font},
    naming::{VariantDescriptor, VariantPaths},
    tools::{FontTool, prepare_japanese},
};

/// Everything a step needs to process one variant.
pub struct VariantContext<'a> {
    pub config: &'a BuildConfig,
    pub tools: &'a dyn FontTool,
    pub descriptor: VariantDescriptor,
    pub paths: VariantPaths,
}

impl<'a> VariantContext<'a> {
    pub fn new(config: &'a BuildConfig, tools: &'a dyn FontTool, descriptor: VariantDescriptor) -> Self {
        let paths = descriptor.paths(config);
        Self { config, tools, descriptor, paths }
    }

    pub fn edits(&self) -> MetadataEdits {
        MetadataEdits::for_variant(
            self.descriptor.style,
            &self.descriptor.variant,
            &self.config.half_width_marker,
            self.config.widths,
        )
    }
}

pub type VariantStep = (&'static str, fn(&VariantContext) -> Result<()>);

pub const VARIANT_STEPS: &[VariantStep] = &[
    ("hint", step_hint),
    ("merge", step_merge),
    ("fix-tables", step_fix_tables),
];

fn step_hint(ctx: &VariantContext) -> Result<()> {
    ctx.tools.hint(&ctx.paths.latin, &ctx.paths.hinted)
}

fn step_merge(ctx: &VariantContext) -> Result<()> {
    let paths = &ctx.paths;
    prepare_japanese(&paths.japanese)?;
    ctx.tools.merge(&paths.hinted, &paths.japanese, &paths.merged)
}

fn step_fix_tables(ctx: &VariantContext) -> Result<()> {
    let paths = &ctx.paths;
    fix_tables(&paths.merged, &paths.ttx, &paths.patched, ctx.edits())?;
    FontFile::new(&paths.patched).rename_to(&paths.completed)
}

/// Dump the OS/2 and post tables of `font` to `ttx`, apply `edits`, and
/// compile the edited dump onto `font`, writing `output`.
pub fn fix_tables(
    font: &Path,
    ttx: &Path,
    output: &Path,
    edits: MetadataEdits,
) -> Result<()> {
    let data = read_font(font)?;
    let mut doc = TtxDocument::dump(&data)
        .with_context(|| format!("Failed to dump tables of {}", font.display()))?;
    edits.apply(&mut doc);
    doc.write(ttx)?;
    debug!("Wrote {}", ttx.display());

    let doc = TtxDocument::load(ttx)?;
    let patched = doc
        .apply(&data)
        .with_context(|| format!("Failed to apply {} to {}", ttx.display(), font.display()))?;
    write_font(output, patched)
}
