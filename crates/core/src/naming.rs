//! File naming convention.
//!
//! Sources are named `{FONTFORGE_PREFIX}{FONT_NAME}{suffix}{variant}-{style}-{eng|jp}.ttf`.
//! Intermediates swap in `FONTTOOLS_PREFIX`; outputs drop the prefix.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use mojiforge_font_metadata::Style;

use crate::config::BuildConfig;

const LATIN_MARKER: &str = "-eng";
const JAPANESE_MARKER: &str = "-jp";

/// Style and variant of one Latin source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDescriptor {
    pub suffix: String,
    /// Variant token between the suffix and the style, possibly empty.
    pub variant: String,
    pub style: Style,
}

impl VariantDescriptor {
    pub fn new(suffix: impl Into<String>, variant: impl Into<String>, style: Style) -> Self {
        Self { suffix: suffix.into(), variant: variant.into(), style }
    }

    /// Parse a Latin source path found for `suffix`.
    pub fn from_source_path(config: &BuildConfig, suffix: &str, path: &Path) -> Result<Self> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .with_context(|| format!("Invalid filename: {}", path.display()))?;
        let (variant, style) = split_source_stem(stem, &config.source_prefix(suffix))
            .with_context(|| format!("Unexpected source font name: {}", path.display()))?;
        let style = style
            .parse::<Style>()
            .with_context(|| format!("Unexpected style in {}", path.display()))?;
        Ok(Self::new(suffix, variant, style))
    }

    /// `{suffix}{variant}-{style}`, shared by every file of this variant.
    pub fn base_name(&self) -> String {
        format!("{}{}-{}", self.suffix, self.variant, self.style)
    }

    pub fn paths(&self, config: &BuildConfig) -> VariantPaths {
        let dir = &config.build_fonts_dir;
        let source = format!("{}{}{}", config.fontforge_prefix, config.font_name, self.base_name());
        let intermediate =
            format!("{}{}{}", config.fonttools_prefix, config.font_name, self.base_name());
        let completed = format!("{}{}", config.font_name, self.base_name());

        VariantPaths {
            latin: dir.join(format!("{source}{LATIN_MARKER}.ttf")),
            hinted: dir.join(format!("{source}{LATIN_MARKER}-hinted.ttf")),
            japanese: dir.join(format!("{source}{JAPANESE_MARKER}.ttf")),
            merged: dir.join(format!("{intermediate}_merged.ttf")),
            ttx: dir.join(format!("{intermediate}.ttx")),
            patched: dir.join(format!("{intermediate}_os2_post.ttf")),
            completed: dir.join(format!("{completed}.ttf")),
        }
    }
}

/// Every file touched while building one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantPaths {
    /// Latin source.
    pub latin: PathBuf,
    /// Hinted Latin font.
    pub hinted: PathBuf,
    /// Japanese source.
    pub japanese: PathBuf,
    /// Hinted Latin merged with Japanese.
    pub merged: PathBuf,
    /// OS/2 and post table dump.
    pub ttx: PathBuf,
    /// Merged font with patched tables.
    pub patched: PathBuf,
    /// Final output.
    pub completed: PathBuf,
}

/// Split `{prefix}{variant}-{style}-eng` into `(variant, style)`.
///
/// The style is the last `-` separated token, so the variant may contain
/// hyphens while the style never does.
pub fn split_source_stem<'a>(stem: &'a str, prefix: &str) -> Option<(&'a str, &'a str)> {
    let rest = stem.strip_prefix(prefix)?.strip_suffix(LATIN_MARKER)?;
    let (variant, style) = rest.rsplit_once('-')?;
    (!style.is_empty()).then_some((variant, style))
}

/// Glob pattern matching every Latin source of `suffix`.
pub fn latin_source_pattern(config: &BuildConfig, suffix: &str) -> String {
    format!("{}*{LATIN_MARKER}.ttf", Pattern::escape(&config.source_prefix(suffix)))
}

/// Glob patterns matching every intermediate and source file, used for cleanup.
pub fn cleanup_patterns(config: &BuildConfig) -> [String; 2] {
    [
        format!("{}*", Pattern::escape(&format!("{}{}", config.fonttools_prefix, config.font_name))),
        format!("{}*", Pattern::escape(&format!("{}{}", config.fontforge_prefix, config.font_name))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use mojiforge_font_metadata::AverageWidths;

    fn config() -> BuildConfig {
        BuildConfig {
            font_name: "Kasumi".to_string(),
            suffixes: vec!["Neon".to_string()],
            fontforge_prefix: "fontforge_".to_string(),
            fonttools_prefix: "fonttools_".to_string(),
            build_fonts_dir: PathBuf::from("build"),
            half_width_marker: "HW".to_string(),
            widths: AverageWidths { half: 1000, full: 1200 },
            ttfautohint: PathBuf::from("ttfautohint"),
            pyftmerge: PathBuf::from("pyftmerge"),
        }
    }

    #[test]
    fn test_split_source_stem() {
        let prefix = "fontforge_KasumiNeon";
        assert_eq!(
            split_source_stem("fontforge_KasumiNeon-Regular-eng", prefix),
            Some(("", "Regular"))
        );
        assert_eq!(
            split_source_stem("fontforge_KasumiNeonHWJPDOC-BoldItalic-eng", prefix),
            Some(("HWJPDOC", "BoldItalic"))
        );
        assert_eq!(split_source_stem("fontforge_KasumiNeon-eng", prefix), None);
        assert_eq!(split_source_stem("fontforge_KasumiNeon-Regular-jp", prefix), None);
        assert_eq!(split_source_stem("fontforge_KasumiArgon-Regular-eng", prefix), None);
    }

    #[test]
    fn test_descriptor_from_path() {
        let config = config();
        let path = Path::new("build/fontforge_KasumiNeonHW-Italic-eng.ttf");
        let descriptor = VariantDescriptor::from_source_path(&config, "Neon", path).unwrap();
        assert_eq!(descriptor, VariantDescriptor::new("Neon", "HW", Style::Italic));
    }

    #[test]
    fn test_unknown_style_is_an_error() {
        let path = Path::new("build/fontforge_KasumiNeon-Medium-eng.ttf");
        assert!(VariantDescriptor::from_source_path(&config(), "Neon", path).is_err());
    }

    #[test]
    fn test_paths_round_trip_through_parser() {
        let config = config();
        for style in Style::ALL {
            for variant in ["", "HW", "JPDOC", "HWJPDOC"] {
                let descriptor = VariantDescriptor::new("Neon", variant, style);
                let paths = descriptor.paths(&config);
                let parsed =
                    VariantDescriptor::from_source_path(&config, "Neon", &paths.latin).unwrap();
                assert_eq!(parsed, descriptor);
            }
        }
    }

    #[test]
    fn test_paths() {
        let paths = VariantDescriptor::new("Neon", "HW", Style::Bold).paths(&config());
        let dir = Path::new("build");
        assert_eq!(paths.latin, dir.join("fontforge_KasumiNeonHW-Bold-eng.ttf"));
        assert_eq!(paths.hinted, dir.join("fontforge_KasumiNeonHW-Bold-eng-hinted.ttf"));
        assert_eq!(paths.japanese, dir.join("fontforge_KasumiNeonHW-Bold-jp.ttf"));
        assert_eq!(paths.merged, dir.join("fonttools_KasumiNeonHW-Bold_merged.ttf"));
        assert_eq!(paths.ttx, dir.join("fonttools_KasumiNeonHW-Bold.ttx"));
        assert_eq!(paths.patched, dir.join("fonttools_KasumiNeonHW-Bold_os2_post.ttf"));
        assert_eq!(paths.completed, dir.join("KasumiNeonHW-Bold.ttf"));
    }

    #[test]
    fn test_patterns_escape_literals() {
        let mut config = config();
        config.font_name = "Kasumi[1]".to_string();
        assert_eq!(latin_source_pattern(&config, "Neon"), "fontforge_Kasumi[[]1[]]Neon*-eng.ttf");
        let [tools, sources] = cleanup_patterns(&config);
        assert_eq!(tools, "fonttools_Kasumi[[]1[]]*");
        assert_eq!(sources, "fontforge_Kasumi[[]1[]]*");
    }
}
