//! TrueType autohinting through the `ttfautohint` executable.

mod error;

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::Command,
};

use log::{debug, info};

pub use error::{HintError, Result};

/// Default executable name.
pub const TTFAUTOHINT: &str = "ttfautohint";

/// ttfautohint settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintingOptions {
    /// Smallest PPEM value to apply hinting to (`-l`).
    pub hinting_range_min: u16,
    /// Largest PPEM value to apply hinting to (`-r`).
    pub hinting_range_max: u16,
    /// Default script for OpenType features (`-D`).
    pub default_script: String,
    /// Script applied to glyphs no script covers (`-f`).
    pub fallback_script: String,
    /// Hint fonts without the default script's standard characters (`-S`).
    pub symbol: bool,
    /// Add blue zones to avoid clipping with Windows' GDI (`-W`).
    pub windows_compatibility: bool,
    /// PPEM sizes where x-height snapping is disabled (`-X`).
    pub x_height_snapping_exceptions: Option<String>,
    /// Hint even if the font's license forbids modification (`-I`).
    pub ignore_restrictions: bool,
}

impl Default for HintingOptions {
    fn default() -> Self {
        Self {
            hinting_range_min: 6,
            hinting_range_max: 45,
            default_script: "latn".to_string(),
            fallback_script: "none".to_string(),
            symbol: true,
            windows_compatibility: true,
            x_height_snapping_exceptions: Some("13-".to_string()),
            ignore_restrictions: true,
        }
    }
}

impl HintingOptions {
    /// Command-line arguments, excluding the input and output paths.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "-l".to_string(),
            self.hinting_range_min.to_string(),
            "-r".to_string(),
            self.hinting_range_max.to_string(),
            "-D".to_string(),
            self.default_script.clone(),
            "-f".to_string(),
            self.fallback_script.clone(),
        ];
        if self.symbol {
            args.push("-S".to_string());
        }
        if self.windows_compatibility {
            args.push("-W".to_string());
        }
        if let Some(exceptions) = &self.x_height_snapping_exceptions {
            args.push("-X".to_string());
            args.push(exceptions.clone());
        }
        if self.ignore_restrictions {
            args.push("-I".to_string());
        }
        args
    }
}

/// Runs ttfautohint on individual font files.
#[derive(Debug, Clone)]
pub struct Hinter {
    program: PathBuf,
    options: HintingOptions,
}

impl Hinter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), options: HintingOptions::default() }
    }

    fn command_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.options.to_args().into_iter().map(Into::into).collect();
        args.push(input.as_os_str().to_owned());
        args.push(output.as_os_str().to_owned());
        args
    }

    /// Hint `input`, writing the result to `output`.
    pub fn hint(&self, input: &Path, output: &Path) -> Result<()> {
        let program = self.program.display().to_string();
        let args = self.command_args(input, output);
        info!("exec hinting {program} {}", self.options.to_args().join(" "));
        debug!("  {} -> {}", input.display(), output.display());

        let result = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| HintError::Launch { program: program.clone(), source })?;

        if !result.status.success() {
            return Err(HintError::Failed {
                program,
                input: input.to_path_buf(),
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }
        if !output.exists() {
            return Err(HintError::MissingOutput { program, output: output.to_path_buf() });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        assert_eq!(
            HintingOptions::default().to_args(),
            ["-l", "6", "-r", "45", "-D", "latn", "-f", "none", "-S", "-W", "-X", "13-", "-I"]
        );
    }

    #[test]
    fn test_command_args_end_with_paths() {
        let hinter = Hinter::new(TTFAUTOHINT);
        let args = hinter.command_args(Path::new("in.ttf"), Path::new("out.ttf"));
        assert_eq!(args[args.len() - 2], "in.ttf");
        assert_eq!(args[args.len() - 1], "out.ttf");
    }

    #[test]
    fn test_missing_program_is_launch_error() {
        let hinter = Hinter::new("mojiforge-no-such-ttfautohint");
        let err = hinter.hint(Path::new("in.ttf"), Path::new("out.ttf")).unwrap_err();
        assert!(matches!(err, HintError::Launch { .. }));
    }

    /// An executable shell script standing in for ttfautohint.
    #[cfg(unix)]
    fn fake_program(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-ttfautohint");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_reports_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_program(dir.path(), "echo 'boom' >&2\nexit 3");
        let output = dir.path().join("out.ttf");

        let err = Hinter::new(program).hint(Path::new("in.ttf"), &output).unwrap_err();
        let HintError::Failed { status, stderr, input, .. } = &err else {
            panic!("expected Failed, got {err:?}");
        };
        assert_eq!(status.code(), Some(3));
        assert_eq!(stderr, "boom");
        assert_eq!(input, Path::new("in.ttf"));
        assert!(err.to_string().contains("boom"));
        assert!(!output.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_success_without_output_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_program(dir.path(), "exit 0");
        let output = dir.path().join("out.ttf");

        let err = Hinter::new(program).hint(Path::new("in.ttf"), &output).unwrap_err();
        assert!(matches!(err, HintError::MissingOutput { output: ref path, .. } if *path == output));
    }

    #[cfg(unix)]
    #[test]
    fn test_program_receives_input_and_output() {
        let dir = tempfile::tempdir().unwrap();
        // The last two arguments are the input and output paths.
        let program = fake_program(dir.path(), "for last; do :; done\necho hinted > \"$last\"");
        let output = dir.path().join("out.ttf");

        Hinter::new(program).hint(Path::new("in.ttf"), &output).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "hinted\n");
    }
}
