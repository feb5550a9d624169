//! Build pipeline: hint, merge and patch every variant of every suffix.

mod clean;
mod steps;

pub use clean::clean_intermediates;
pub use steps::{VARIANT_STEPS, VariantContext, VariantStep, fix_tables};

use std::{path::PathBuf, time::Instant};

use anyhow::Result;
use log::{error, info};

use crate::{
    config::BuildConfig,
    io::glob_fonts,
    naming::{VariantDescriptor, latin_source_pattern},
    tools::FontTool,
};

const RULE: &str =
    "═══════════════════════════════════════════════════════════════════════════════";

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Leave sources and intermediates in place after the build.
    pub keep_intermediate: bool,
}

/// What a build produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Final fonts, in build order.
    pub fonts: Vec<PathBuf>,
    /// Suffixes with no matching source fonts.
    pub skipped_suffixes: Vec<String>,
    /// Files deleted by cleanup.
    pub removed: Vec<PathBuf>,
}

pub fn run_step<C>(
    name: &str,
    step_num: usize,
    total: usize,
    ctx: &C,
    f: impl Fn(&C) -> Result<()>,
) -> Result<()> {
    println!("  [{step_num}/{total}] {name}");
    let start = Instant::now();
    f(ctx)?;
    println!("    ✓ {name} ({:.2}s)", start.elapsed().as_secs_f64());
    Ok(())
}

pub fn run_steps(steps: &[VariantStep], ctx: &VariantContext) -> Result<()> {
    for (i, (name, step_fn)) in steps.iter().enumerate() {
        run_step(name, i + 1, steps.len(), ctx, step_fn)?;
    }
    Ok(())
}

/// Descriptors of every Latin source for `suffix`, in sorted path order.
///
/// Every file name is parsed before any file is processed, so an unknown
/// style aborts the suffix without touching the build directory.
pub fn discover_variants(config: &BuildConfig, suffix: &str) -> Result<Vec<VariantDescriptor>> {
    let sources = glob_fonts(&config.build_fonts_dir, &latin_source_pattern(config, suffix))?;
    sources
        .iter()
        .map(|path| VariantDescriptor::from_source_path(config, suffix, path))
        .collect()
}

/// Build every variant of one suffix, returning the final font paths.
///
/// A suffix without sources is logged and yields no fonts.
pub fn edit_fonts(config: &BuildConfig, tools: &dyn FontTool, suffix: &str) -> Result<Vec<PathBuf>> {
    let descriptors = discover_variants(config, suffix)?;
    if descriptors.is_empty() {
        error!(
            "Error: {}{}{suffix}*.ttf not found",
            config.fontforge_prefix, config.font_name
        );
        return Ok(Vec::new());
    }

    let total = descriptors.len();
    let mut fonts = Vec::with_capacity(total);
    for (i, descriptor) in descriptors.into_iter().enumerate() {
        let ctx = VariantContext::new(config, tools, descriptor);
        println!("\n[{suffix}] {} ({}/{total})", ctx.descriptor.base_name(), i + 1);
        run_steps(VARIANT_STEPS, &ctx)?;
        info!("Completed {}", ctx.paths.completed.display());
        fonts.push(ctx.paths.completed);
    }
    Ok(fonts)
}

/// Run the whole pipeline over every configured suffix.
pub fn build(config: &BuildConfig, tools: &dyn FontTool, options: BuildOptions) -> Result<BuildReport> {
    let start = Instant::now();
    let mut report = BuildReport::default();

    println!("{RULE}");
    println!("{} Build Pipeline", config.font_name);
    println!("{RULE}");

    for suffix in &config.suffixes {
        let fonts = edit_fonts(config, tools, suffix)?;
        if fonts.is_empty() {
            report.skipped_suffixes.push(suffix.clone());
        }
        report.fonts.extend(fonts);
    }

    if options.keep_intermediate {
        println!("\nKeeping intermediate files in {}", config.build_fonts_dir.display());
    } else {
        println!("\nCleaning intermediate files...");
        report.removed = clean_intermediates(config)?;
    }

    println!("\n{RULE}");
    println!("✨ Build complete in {:.2}s", start.elapsed().as_secs_f64());
    println!("   Output: {}", config.build_fonts_dir.display());
    println!("   Fonts: {}", report.fonts.len());
    for font in &report.fonts {
        println!("     - {}", font.display());
    }
    if !report.skipped_suffixes.is_empty() {
        println!("   Skipped: {}", report.skipped_suffixes.join(", "));
    }
    println!("{RULE}");

    Ok(report)
}
