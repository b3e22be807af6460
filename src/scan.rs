use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::Command,
};

use crate::{
    error::{Error, Result},
    model::{Candidates, SearchOptions},
};

const VCS_DIR: &str = ".git";

/// Resolve an executable on `PATH`.
pub fn locate(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Enumeration backend, chosen once per run.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Backend {
    Fd(PathBuf),
    Find(PathBuf),
}

impl Backend {
    pub fn detect() -> Result<Self> {
        Self::detect_with(locate)
    }

    /// Prefer fd (also installed as `fdfind` on Debian), then find.
    pub fn detect_with(probe: impl Fn(&str) -> Option<PathBuf>) -> Result<Self> {
        if let Some(path) = probe("fd").or_else(|| probe("fdfind")) {
            return Ok(Backend::Fd(path));
        }
        if let Some(path) = probe("find") {
            return Ok(Backend::Find(path));
        }
        Err(Error::BackendUnavailable)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Fd(_) => "fd",
            Backend::Find(_) => "find",
        }
    }

    pub fn program(&self) -> &Path {
        match self {
            Backend::Fd(p) | Backend::Find(p) => p,
        }
    }

    pub fn args(&self, opts: &SearchOptions) -> Vec<OsString> {
        match self {
            Backend::Fd(_) => fd_args(opts),
            Backend::Find(_) => find_args(opts),
        }
    }

    pub fn search(&self, opts: &SearchOptions) -> Result<Candidates> {
        let args = self.args(opts);
        tracing::debug!(backend = self.name(), ?args, "running enumerator");

        let output = Command::new(self.program())
            .args(&args)
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program().as_os_str().to_owned(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(Error::Enumeration {
                backend: self.name(),
                status: output.status,
                output: format!("{stdout}{stderr}"),
            });
        }
        if !stderr.trim().is_empty() {
            tracing::debug!(backend = self.name(), stderr = %stderr.trim_end(), "enumerator diagnostics");
        }

        // Paths are handed on untouched; they need not be UTF-8.
        Ok(Candidates::new(output.stdout))
    }
}

fn fd_args(opts: &SearchOptions) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "--type".into(),
        opts.item_type.type_code().into(),
        "--hidden".into(),
        "--follow".into(),
        "--exclude".into(),
        VCS_DIR.into(),
    ];
    if opts.depth > 0 {
        args.push("--max-depth".into());
        args.push(opts.depth.to_string().into());
    }
    for root in &opts.roots {
        args.push("--search-path".into());
        args.push(root.into());
    }
    // Match-all pattern; with several --search-path flags fd needs it spelled out.
    args.push(".".into());
    args
}

fn find_args(opts: &SearchOptions) -> Vec<OsString> {
    let mut args: Vec<OsString> = opts.roots.iter().map(|r| r.as_os_str().to_owned()).collect();
    if opts.depth > 0 {
        args.push("-maxdepth".into());
        args.push(opts.depth.to_string().into());
    }
    args.extend(
        [
            "-mindepth".to_string(),
            "1".to_string(),
            "-not".to_string(),
            "-path".to_string(),
            format!("*/{VCS_DIR}/*"),
            "-type".to_string(),
            opts.item_type.type_code().to_string(),
            "-print".to_string(),
        ]
        .map(OsString::from),
    );
    args
}
