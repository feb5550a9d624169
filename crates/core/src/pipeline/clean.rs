use std::path::PathBuf;

use anyhow::Result;

use crate::{config::BuildConfig, io::remove_matching, naming::cleanup_patterns};

/// Delete sources and intermediates, keeping the final fonts.
pub fn clean_intermediates(config: &BuildConfig) -> Result<Vec<PathBuf>> {
    let dir = &config.build_fonts_dir;
    if !dir.exists() {
        println!("Skipped {} (not found)", dir.display());
        return Ok(Vec::new());
    }

    let mut removed = Vec::new();
    for pattern in cleanup_patterns(config) {
        for path in remove_matching(dir, &pattern)? {
            println!("Removed {}", path.display());
            removed.push(path);
        }
    }

    println!("Cleaned {} files", removed.len());
    Ok(removed)
}
