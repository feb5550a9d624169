//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use mojiforge_core::{
    BuildConfig, BuildOptions, DEFAULT_CONFIG_FILE, ExternalTools, build, clean_intermediates,
};

#[derive(Parser)]
#[command(name = "mojiforge")]
#[command(about = "Hint Latin fonts, merge them with Japanese fonts and fix their metadata")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ConfigArgs {
    /// INI file with the build settings
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<BuildConfig> {
        let config = BuildConfig::load(&self.config)?;
        info!("Loaded {}", self.config.display());
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build every configured suffix, then remove intermediate files
    Build {
        #[command(flatten)]
        args: ConfigArgs,
        /// Keep sources and intermediate files
        #[arg(long)]
        keep_intermediate: bool,
    },
    /// Remove sources and intermediate files from the build directory
    Clean {
        #[command(flatten)]
        args: ConfigArgs,
    },
    #[command(subcommand, hide = true)]
    Dev(crate::dev::DevCommands),
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Build { args, keep_intermediate } => {
                let config = args.load()?;
                let tools = ExternalTools::from_config(&config);
                build(&config, &tools, BuildOptions { keep_intermediate })?;
            }
            Commands::Clean { args } => {
                clean_intermediates(&args.load()?)?;
            }
            Commands::Dev(dev) => dev.run()?,
        }
        Ok(())
    }
}
