use std::{io, path::PathBuf, process::ExitStatus, result};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("need at least two fonts to merge, got {0}")]
    TooFewFonts(usize),

    #[error("failed to access {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to remove vertical metrics from {path}: {message}")]
    Prepare { path: PathBuf, message: String },

    #[error("failed to launch '{program}': {source}")]
    Launch { program: String, source: io::Error },

    #[error("'{program}' exited with {status} while writing {output}: {stderr}")]
    Failed {
        program: String,
        output: PathBuf,
        status: ExitStatus,
        stderr: String,
    },
}

pub type Result<T> = result::Result<T, MergeError>;
