//! Merge a Latin font with a Japanese companion font.
//!
//! Glyph merging itself is done by fontTools' `pyftmerge`; this crate prepares
//! the inputs and drives the tool.

mod error;
mod options;

use std::{
    fs::{read, write},
    path::{Path, PathBuf},
    process::Command,
};

use log::{debug, info};
use mojiforge_font_ops::drop_vertical_metrics;

pub use error::{MergeError, Result};
pub use options::Options;

/// Default executable name.
pub const PYFTMERGE: &str = "pyftmerge";

/// Remove `vhea` and `vmtx` from a font file in place.
///
/// Returns `true` when the file was rewritten.
pub fn strip_vertical_metrics(path: &Path) -> Result<bool> {
    let data = read(path).map_err(|source| MergeError::Io { path: path.to_path_buf(), source })?;
    let stripped = drop_vertical_metrics(&data).map_err(|e| MergeError::Prepare {
        path: path.to_path_buf(),
        message: format!("{e:#}"),
    })?;

    let Some(stripped) = stripped else {
        return Ok(false);
    };
    write(path, stripped).map_err(|source| MergeError::Io { path: path.to_path_buf(), source })?;
    debug!("Removed vhea/vmtx from {}", path.display());
    Ok(true)
}

/// Runs pyftmerge over a list of font files.
#[derive(Debug, Clone)]
pub struct Merger {
    program: PathBuf,
    options: Options,
}

impl Merger {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), options: Options::default() }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Merge `inputs` into `output`. The first font's metrics and names win.
    pub fn merge(&self, inputs: &[&Path], output: &Path) -> Result<()> {
        if inputs.len() < 2 {
            return Err(MergeError::TooFewFonts(inputs.len()));
        }

        info!("Merging {} fonts:", inputs.len());
        for input in inputs {
            info!("  - {}", input.display());
        }

        let program = self.program.display().to_string();
        let result = Command::new(&self.program)
            .arg(format!("--output-file={}", output.display()))
            .args(self.options.to_args())
            .args(inputs)
            .output()
            .map_err(|source| MergeError::Launch { program: program.clone(), source })?;

        if !result.status.success() {
            return Err(MergeError::Failed {
                program,
                output: output.to_path_buf(),
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        info!("Merged font: {}", output.display());
        Ok(())
    }
}
