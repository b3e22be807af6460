use std::{collections::HashMap, env, ffi::OsString, path::PathBuf};

/// Environment variables consulted for default roots, highest priority first.
pub const ROOT_ENV_VARS: [&str; 3] = ["PROJECT_DIR", "WORK_DIR", "ASSET_DIR"];

/// Read-only view of the process environment.
pub trait Environment {
    fn var_os(&self, name: &str) -> Option<OsString>;
}

pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var_os(&self, name: &str) -> Option<OsString> {
        env::var_os(name)
    }
}

impl Environment for HashMap<String, String> {
    fn var_os(&self, name: &str) -> Option<OsString> {
        self.get(name).map(OsString::from)
    }
}

/// Positional paths win verbatim; otherwise every set, non-empty variable
/// from [`ROOT_ENV_VARS`] in order; otherwise `"."`.
pub fn resolve_roots(paths: &[PathBuf], env: &impl Environment) -> Vec<PathBuf> {
    if !paths.is_empty() {
        return paths.to_vec();
    }

    let mut roots: Vec<PathBuf> = ROOT_ENV_VARS
        .iter()
        .filter_map(|name| env.var_os(name))
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .collect();

    if roots.is_empty() {
        roots.push(PathBuf::from("."));
    }
    roots
}
