use std::{ffi::OsString, process::ExitStatus};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("neither fd nor find is installed")]
    BackendUnavailable,

    #[error("{backend} error: {status}\n{output}")]
    Enumeration {
        backend: &'static str,
        status: ExitStatus,
        output: String,
    },

    #[error("fzf failed: {status}")]
    Pick { status: ExitStatus },

    #[error("failed to spawn {}", program.to_string_lossy())]
    Spawn {
        program: OsString,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
