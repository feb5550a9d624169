//! External font tools used by the pipeline.

use std::path::Path;

use anyhow::{Context, Result};
use mojiforge_font_hinter::Hinter;
use mojiforge_font_merger::{Merger, strip_vertical_metrics};

use crate::config::BuildConfig;

/// Hinting and merging, the two steps done outside this process.
pub trait FontTool {
    /// Hint `input` and write the hinted font to `output`.
    fn hint(&self, input: &Path, output: &Path) -> Result<()>;

    /// Merge `latin` and `japanese` into `output`. Latin metrics and names win.
    fn merge(&self, latin: &Path, japanese: &Path, output: &Path) -> Result<()>;
}

/// `ttfautohint` and `pyftmerge`, as named by the configuration.
#[derive(Debug, Clone)]
pub struct ExternalTools {
    hinter: Hinter,
    merger: Merger,
}

impl ExternalTools {
    pub fn new(hinter: Hinter, merger: Merger) -> Self {
        Self { hinter, merger }
    }

    pub fn from_config(config: &BuildConfig) -> Self {
        Self::new(Hinter::new(&config.ttfautohint), Merger::new(&config.pyftmerge))
    }
}

impl FontTool for ExternalTools {
    fn hint(&self, input: &Path, output: &Path) -> Result<()> {
        self.hinter
            .hint(input, output)
            .with_context(|| format!("Failed to hint {}", input.display()))
    }

    fn merge(&self, latin: &Path, japanese: &Path, output: &Path) -> Result<()> {
        self.merger
            .merge(&[latin, japanese], output)
            .with_context(|| format!("Failed to merge {}", output.display()))
    }
}

/// Remove `vhea` and `vmtx` from the Japanese font before it is merged.
pub fn prepare_japanese(path: &Path) -> Result<()> {
    strip_vertical_metrics(path)
        .with_context(|| format!("Failed to prepare {}", path.display()))?;
    Ok(())
}
