//! Shared font file utilities.

use std::{
    fs::{read, remove_file, rename, write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::{Pattern, glob};

#[derive(Debug, Clone)]
pub struct FontFile {
    path: PathBuf,
}

impl FontFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn read(&self) -> Result<Vec<u8>> {
        read(&self.path).with_context(|| format!("Failed to read font: {}", self.path.display()))
    }

    pub fn write(&self, data: impl AsRef<[u8]>) -> Result<()> {
        write(&self.path, data)
            .with_context(|| format!("Failed to write font: {}", self.path.display()))
    }

    pub fn rename_to(&self, target: &Path) -> Result<()> {
        rename(&self.path, target).with_context(|| {
            format!("Failed to rename {} to {}", self.path.display(), target.display())
        })
    }
}

/// Files in `dir` matching `pattern`, in sorted order.
///
/// `dir` is matched literally; only `pattern` may contain wildcards.
pub fn glob_fonts(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let dir_str = dir.to_str().context("Invalid directory path")?;
    let pattern_str = Path::new(&Pattern::escape(dir_str)).join(pattern);
    let pattern_str = pattern_str.to_str().context("Invalid pattern path")?;
    let mut paths: Vec<_> = glob(pattern_str)
        .with_context(|| format!("Failed to glob pattern: {pattern_str}"))?
        .filter_map(Result::ok)
        .collect();
    paths.sort();
    Ok(paths)
}

/// Delete every file in `dir` matching `pattern`, returning the removed paths.
pub fn remove_matching(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob_fonts(dir, pattern)?;
    for path in &paths {
        remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(paths)
}

pub fn read_font(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    FontFile::new(path.as_ref()).read()
}

pub fn write_font(path: impl AsRef<Path>, data: impl AsRef<[u8]>) -> Result<()> {
    FontFile::new(path.as_ref()).write(data)
}
