use std::{io, path::PathBuf, process::ExitStatus, result};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HintError {
    #[error("failed to launch '{program}': {source}")]
    Launch { program: String, source: io::Error },

    #[error("'{program}' exited with {status} while hinting {input}: {stderr}")]
    Failed {
        program: String,
        input: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("'{program}' reported success but wrote no output to {output}")]
    MissingOutput { program: String, output: PathBuf },
}

pub type Result<T> = result::Result<T, HintError>;
