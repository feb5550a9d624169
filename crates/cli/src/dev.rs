//! Development commands running single pipeline operations.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Subcommand;
use mojiforge_core::{
    BuildConfig, DEFAULT_CONFIG_FILE, MetadataEdits, Style, fix_tables, io::read_font,
};
use mojiforge_font_hinter::{Hinter, TTFAUTOHINT};
use mojiforge_font_merger::{Merger, Options, PYFTMERGE, strip_vertical_metrics};
use mojiforge_font_tables::TtxDocument;

#[derive(Subcommand)]
pub enum DevCommands {
    /// Hint a single font with ttfautohint
    Hint {
        #[arg(long, default_value = TTFAUTOHINT)]
        program: PathBuf,
        #[arg(required = true)]
        input: PathBuf,
        #[arg(required = true)]
        output: PathBuf,
    },
    /// Merge fonts with pyftmerge; the first font's metrics win
    Merge {
        #[arg(long, default_value = PYFTMERGE)]
        program: PathBuf,
        #[arg(long, value_delimiter = ',')]
        drop_tables: Vec<String>,
        /// Remove vhea/vmtx from the fonts after the first before merging
        #[arg(long)]
        strip_vertical_metrics: bool,
        #[arg(required = true, num_args = 2..)]
        inputs: Vec<PathBuf>,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Write the OS/2 and post tables of a font as TTX
    DumpTables {
        #[arg(required = true)]
        input: PathBuf,
        /// Defaults to the input path with a `.ttx` extension
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Apply the style and width rules to the OS/2 and post tables of one font
    FixTables {
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        #[arg(long)]
        style: Style,
        /// Variant token, checked for the half-width marker
        #[arg(long, default_value = "")]
        variant: String,
        #[arg(required = true)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
}

impl DevCommands {
    pub fn run(self) -> Result<()> {
        match self {
            DevCommands::Hint { program, input, output } => {
                Hinter::new(program).hint(&input, &output)?;
                println!("Hinted {} -> {}", input.display(), output.display());
            }
            DevCommands::Merge { program, drop_tables, strip_vertical_metrics: strip, inputs, output } => {
                if strip {
                    for input in &inputs[1..] {
                        strip_vertical_metrics(input)?;
                    }
                }
                let options = Options::new().drop_tables(drop_tables);
                let inputs: Vec<&Path> = inputs.iter().map(PathBuf::as_path).collect();
                Merger::new(program).with_options(options).merge(&inputs, &output)?;
            }
            DevCommands::DumpTables { input, output } => {
                let output = output.unwrap_or_else(|| input.with_extension("ttx"));
                let data = read_font(&input)?;
                TtxDocument::dump(&data)?.write(&output)?;
                println!("Dumped {} -> {}", input.display(), output.display());
            }
            DevCommands::FixTables { config, style, variant, input, output } => {
                let config = BuildConfig::load(&config)?;
                let edits = MetadataEdits::for_variant(
                    style,
                    &variant,
                    &config.half_width_marker,
                    config.widths,
                );
                fix_tables(&input, &output.with_extension("ttx"), &output, edits)?;
                println!("Fixed tables {} -> {}", input.display(), output.display());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Commands};

    fn parse_dev(args: &[&str]) -> DevCommands {
        let cli = Cli::try_parse_from(["mojiforge", "dev"].iter().chain(args)).unwrap();
        match cli.command {
            Commands::Dev(dev) => dev,
            _ => panic!("expected dev command"),
        }
    }

    #[test]
    fn test_fix_tables_args() {
        let dev = parse_dev(&["fix-tables", "--style", "BoldItalic", "--variant", "HW", "in.ttf", "-o", "out.ttf"]);
        let DevCommands::FixTables { config, style, variant, .. } = dev else {
            panic!("expected fix-tables");
        };
        assert_eq!(config, PathBuf::from("build.ini"));
        assert_eq!(style, Style::BoldItalic);
        assert_eq!(variant, "HW");
    }

    #[test]
    fn test_fix_tables_rejects_unknown_style() {
        let result =
            Cli::try_parse_from(["mojiforge", "dev", "fix-tables", "--style", "Medium", "in.ttf", "-o", "out.ttf"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_args() {
        let dev = parse_dev(&["merge", "--drop-tables", "DSIG,vhea", "eng.ttf", "jp.ttf", "-o", "out.ttf"]);
        let DevCommands::Merge { program, drop_tables, inputs, strip_vertical_metrics, .. } = dev
        else {
            panic!("expected merge");
        };
        assert_eq!(program, PathBuf::from("pyftmerge"));
        assert_eq!(drop_tables, ["DSIG", "vhea"]);
        assert_eq!(inputs.len(), 2);
        assert!(!strip_vertical_metrics);
    }

    #[test]
    fn test_merge_strip_flag() {
        let dev = parse_dev(&["merge", "--strip-vertical-metrics", "eng.ttf", "jp.ttf", "-o", "out.ttf"]);
        let DevCommands::Merge { strip_vertical_metrics, .. } = dev else {
            panic!("expected merge");
        };
        assert!(strip_vertical_metrics);
    }
}
