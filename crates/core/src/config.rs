//! Build configuration read from `build.ini`.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use ini::Ini;
use mojiforge_font_hinter::TTFAUTOHINT;
use mojiforge_font_merger::PYFTMERGE;
use mojiforge_font_metadata::AverageWidths;

/// Configuration file read when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "build.ini";

/// Section holding the build settings.
pub const CONFIG_SECTION: &str = "DEFAULT";

/// Suffix keys, in build order.
pub const SUFFIX_KEYS: [&str; 5] =
    ["SUFFIX_NEON", "SUFFIX_ARGON", "SUFFIX_XENON", "SUFFIX_RADON", "SUFFIX_KRYPTON"];

/// Settings shared by every step of the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Family token embedded in every file name.
    pub font_name: String,
    /// Variant family suffixes, processed in order.
    pub suffixes: Vec<String>,
    /// Prefix of the Latin and Japanese source files.
    pub fontforge_prefix: String,
    /// Prefix of the intermediate files written by this tool.
    pub fonttools_prefix: String,
    /// Directory holding sources, intermediates and outputs.
    pub build_fonts_dir: PathBuf,
    /// Variants whose token contains this marker are half-width.
    pub half_width_marker: String,
    /// xAvgCharWidth for half-width and full-width variants.
    pub widths: AverageWidths,
    pub ttfautohint: PathBuf,
    pub pyftmerge: PathBuf,
}

impl BuildConfig {
    /// Load the configuration from an INI file.
    pub fn load(path: &Path) -> Result<Self> {
        let ini = Ini::load_from_file_noescape(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_ini(&ini).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parse the configuration from INI text.
    pub fn parse(text: &str) -> Result<Self> {
        let ini = Ini::load_from_str_noescape(text).context("Failed to parse config")?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self> {
        let settings = Settings::from_ini(ini);

        let suffixes = SUFFIX_KEYS
            .iter()
            .map(|key| settings.required(key).map(str::to_string))
            .collect::<Result<Vec<_>>>()?;

        let config = Self {
            font_name: settings.required("FONT_NAME")?.to_string(),
            suffixes,
            fontforge_prefix: settings.required("FONTFORGE_PREFIX")?.to_string(),
            fonttools_prefix: settings.required("FONTTOOLS_PREFIX")?.to_string(),
            build_fonts_dir: PathBuf::from(settings.required("BUILD_FONTS_DIR")?),
            half_width_marker: settings.required("HALF_WIDTH_STR")?.to_string(),
            widths: AverageWidths {
                half: settings.width("HALF_WIDTH_12")?,
                full: settings.width("FULL_WIDTH_35")?,
            },
            ttfautohint: settings.optional("TTFAUTOHINT").unwrap_or(TTFAUTOHINT).into(),
            pyftmerge: settings.optional("PYFTMERGE").unwrap_or(PYFTMERGE).into(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        // Cleanup deletes `{prefix}{font_name}*`; an empty prefix would match the outputs.
        if self.fontforge_prefix.is_empty() || self.fonttools_prefix.is_empty() {
            bail!("FONTFORGE_PREFIX and FONTTOOLS_PREFIX must not be empty");
        }
        if self.fontforge_prefix == self.fonttools_prefix {
            bail!("FONTFORGE_PREFIX and FONTTOOLS_PREFIX must differ");
        }
        if self.font_name.is_empty() {
            bail!("FONT_NAME must not be empty");
        }
        Ok(())
    }

    /// Common file name start of every source file for `suffix`.
    pub fn source_prefix(&self, suffix: &str) -> String {
        format!("{}{}{suffix}", self.fontforge_prefix, self.font_name)
    }

    /// Common file name start of every intermediate file for `suffix`.
    pub fn intermediate_prefix(&self, suffix: &str) -> String {
        format!("{}{}{suffix}", self.fonttools_prefix, self.font_name)
    }

    /// Common file name start of every output font for `suffix`.
    pub fn output_prefix(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.font_name)
    }
}

/// Key lookup with INI semantics: case-insensitive keys, `[DEFAULT]` first,
/// then keys outside any section.
struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    fn from_ini(ini: &Ini) -> Self {
        let mut values = HashMap::new();
        for section in [None, Some(CONFIG_SECTION)] {
            if let Some(props) = ini.section(section) {
                for (key, value) in props.iter() {
                    values.insert(key.to_lowercase(), value.trim().to_string());
                }
            }
        }
        Self { values }
    }

    fn optional(&self, key: &str) -> Option<&str> {
        self.values.get(&key.to_lowercase()).map(String::as_str)
    }

    fn required(&self, key: &str) -> Result<&str> {
        self.optional(key).with_context(|| format!("Missing required key {key} in [{CONFIG_SECTION}]"))
    }

    fn width(&self, key: &str) -> Result<i16> {
        let raw = self.required(key)?;
        raw.parse::<i16>()
            .with_context(|| format!("{key} must be an integer between -32768 and 32767, got '{raw}'"))
    }
}
