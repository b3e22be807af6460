use std::{
    ffi::OsString,
    path::Path,
    process::{Command, ExitStatus},
};

use crate::error::{Error, Result};

pub const DEFAULT_EDITOR: &str = "nvim";

pub struct Editor {
    program: OsString,
    args: Vec<OsString>,
}

impl Editor {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self::with_command(program, Vec::<OsString>::new())
    }

    /// An editor invoked with fixed leading arguments before the path.
    pub fn with_command<I, S>(program: impl Into<OsString>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Run the editor on `path` with the terminal's stdio and wait for it.
    /// A non-zero status is returned, not treated as an error.
    pub fn open(&self, path: &Path) -> Result<ExitStatus> {
        tracing::debug!(editor = %self.program.to_string_lossy(), path = %path.display(), "launching editor");
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;
        tracing::debug!(%status, "editor exited");
        Ok(status)
    }
}
