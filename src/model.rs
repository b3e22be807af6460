use std::{
    fmt,
    io::{self, Write},
    path::{Path, PathBuf},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What the enumerator should list.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ItemType {
    #[default]
    File,
    Directory,
}

impl ItemType {
    /// Single-letter type code shared by `fd --type` and `find -type`.
    pub fn type_code(self) -> &'static str {
        match self {
            ItemType::File => "f",
            ItemType::Directory => "d",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemType::File => write!(f, "file"),
            ItemType::Directory => write!(f, "directory"),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchOptions {
    pub item_type: ItemType,
    /// Maximum recursion depth; 0 means unlimited.
    pub depth: u32,
    /// Never empty once resolved.
    pub roots: Vec<PathBuf>,
}

/// Newline-delimited enumerator output, kept byte for byte as produced.
/// File names are not required to be UTF-8.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Candidates(Vec<u8>);

impl Candidates {
    pub fn new(raw: impl Into<Vec<u8>>) -> Self {
        Self(raw.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim_ascii().is_empty()
    }

    pub fn len(&self) -> usize {
        self.0
            .split(|&b| b == b'\n')
            .filter(|l| !l.trim_ascii().is_empty())
            .count()
    }
}

/// The picked path, or `None` when the user cancelled or nothing matched.
pub type Selection = Option<PathBuf>;

/// Rebuild a path from raw process output.
#[cfg(unix)]
pub fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    PathBuf::from(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
pub fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Write `path` followed by a newline without re-encoding it.
#[cfg(unix)]
pub fn write_path_line(out: &mut impl Write, path: &Path) -> io::Result<()> {
    use std::os::unix::ffi::OsStrExt;

    out.write_all(path.as_os_str().as_bytes())?;
    out.write_all(b"\n")
}

#[cfg(not(unix))]
pub fn write_path_line(out: &mut impl Write, path: &Path) -> io::Result<()> {
    writeln!(out, "{}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_output_counts_as_empty() {
        assert!(Candidates::new("").is_empty());
        assert!(Candidates::new("\n  \n").is_empty());
        assert!(!Candidates::new("./a\n").is_empty());
    }

    #[test]
    fn len_counts_non_blank_lines() {
        let c = Candidates::new("/a/x\n/a/y\n\n");
        assert_eq!(c.len(), 2);
        assert_eq!(c.as_bytes(), b"/a/x\n/a/y\n\n");
    }

    #[test]
    fn type_codes() {
        assert_eq!(ItemType::File.type_code(), "f");
        assert_eq!(ItemType::Directory.type_code(), "d");
        assert_eq!(ItemType::default(), ItemType::File);
        assert_eq!(ItemType::Directory.to_string(), "directory");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_bytes_survive_path_conversion() {
        let raw: &[u8] = b"/tmp/caf\xe9.txt";
        let path = path_from_bytes(raw);

        let mut out = Vec::new();
        write_path_line(&mut out, &path).unwrap();
        assert_eq!(out, b"/tmp/caf\xe9.txt\n");
    }
}
