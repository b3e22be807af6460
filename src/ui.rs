use std::{
    ffi::OsString,
    io::{ErrorKind, Write},
    path::PathBuf,
    process::{Command, ExitStatus, Stdio},
};

use crate::{
    error::{Error, Result},
    model::{Candidates, ItemType, Selection, path_from_bytes},
    scan::locate,
};

/// fzf exit code when no line matched the query.
const FZF_NO_MATCH: i32 = 1;
/// fzf exit code when the user aborted with Ctrl-C or Esc.
const FZF_INTERRUPTED: i32 = 130;

#[derive(Debug, PartialEq, Eq)]
enum PickStatus {
    Picked,
    Empty,
    Failed,
}

/// Map a picker exit status onto an outcome.
///
/// Both "no match" and "interrupted" count as an empty selection so that a
/// cancelled pick never surfaces as a failure. Keep every fzf exit-code
/// convention in this one function.
fn classify(status: ExitStatus) -> PickStatus {
    if status.success() {
        return PickStatus::Picked;
    }
    match status.code() {
        Some(FZF_NO_MATCH | FZF_INTERRUPTED) => PickStatus::Empty,
        _ => PickStatus::Failed,
    }
}

/// Preview-pane flags for fzf. Degrades to no flags when the file
/// highlighter is missing.
pub fn preview_args(enable: bool, item_type: ItemType, highlighter: bool) -> Vec<String> {
    if !enable {
        return Vec::new();
    }
    let preview = match item_type {
        ItemType::File if highlighter => {
            "--preview=bat --color=always --style=header,grid --line-range :300 {}"
        }
        ItemType::File => return Vec::new(),
        ItemType::Directory => "--preview=ls -la {}",
    };
    vec![
        "--ansi".to_string(),
        "--preview-window=right:45%".to_string(),
        preview.to_string(),
    ]
}

pub struct Picker {
    program: OsString,
    args: Vec<OsString>,
}

impl Default for Picker {
    fn default() -> Self {
        Self::with_command("fzf", Vec::<OsString>::new())
    }
}

impl Picker {
    /// fzf, with preview flags when requested and available.
    pub fn new(preview: bool, item_type: ItemType) -> Self {
        Self::new_with(preview, item_type, locate)
    }

    /// Like [`Picker::new`], with `probe` standing in for the `PATH` lookup of `bat`.
    pub fn new_with(
        preview: bool,
        item_type: ItemType,
        probe: impl Fn(&str) -> Option<PathBuf>,
    ) -> Self {
        let highlighter = preview && item_type == ItemType::File && probe("bat").is_some();
        let mut picker = Self::default();
        picker
            .args
            .extend(preview_args(preview, item_type, highlighter).into_iter().map(OsString::from));
        picker
    }

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

    pub fn pick(&self, candidates: &Candidates) -> Result<Selection> {
        tracing::debug!(args = ?self.args, count = candidates.len(), "starting picker");

        // stderr stays on the terminal; fzf draws its UI there.
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(candidates.as_bytes()) {
                // The picker may exit before draining its input.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                other => other?,
            }
        }

        let output = child.wait_with_output()?;
        match classify(output.status) {
            PickStatus::Picked => {
                let line = output.stdout.trim_ascii();
                Ok((!line.is_empty()).then(|| path_from_bytes(line)))
            }
            PickStatus::Empty => {
                tracing::debug!(status = %output.status, "picker returned no selection");
                Ok(None)
            }
            PickStatus::Failed => Err(Error::Pick {
                status: output.status,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Candidates {
        Candidates::new("/a/x\n/a/y\n")
    }

    fn sh(script: &str) -> Picker {
        Picker::with_command("sh", ["-c", script])
    }

    #[test]
    fn preview_disabled() {
        assert!(preview_args(false, ItemType::File, true).is_empty());
        assert!(preview_args(false, ItemType::Directory, true).is_empty());
    }

    #[test]
    fn file_preview_needs_highlighter() {
        assert!(preview_args(true, ItemType::File, false).is_empty());
        let args = preview_args(true, ItemType::File, true);
        assert_eq!(args.len(), 3);
        assert!(args[2].starts_with("--preview=bat "));
    }

    #[test]
    fn directory_preview_lists_contents() {
        let args = preview_args(true, ItemType::Directory, false);
        assert_eq!(
            args,
            vec!["--ansi", "--preview-window=right:45%", "--preview=ls -la {}"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn classify_exit_codes() {
        use std::os::unix::process::ExitStatusExt;

        // Raw wait statuses: exit code lives in the high byte.
        assert_eq!(classify(ExitStatus::from_raw(0)), PickStatus::Picked);
        assert_eq!(classify(ExitStatus::from_raw(1 << 8)), PickStatus::Empty);
        assert_eq!(classify(ExitStatus::from_raw(130 << 8)), PickStatus::Empty);
        assert_eq!(classify(ExitStatus::from_raw(2 << 8)), PickStatus::Failed);
        // Killed by SIGKILL: no exit code at all.
        assert_eq!(classify(ExitStatus::from_raw(9)), PickStatus::Failed);
    }

    #[cfg(unix)]
    #[test]
    fn returns_the_selected_line() {
        let picker = sh("grep '/a/y'");
        assert_eq!(picker.pick(&candidates()).unwrap(), Some(PathBuf::from("/a/y")));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_selection_is_returned_verbatim() {
        use std::os::unix::ffi::OsStrExt;

        let picker = sh("cat");
        let selected = picker
            .pick(&Candidates::new(&b"/a/caf\xe9.txt\n"[..]))
            .unwrap()
            .unwrap();
        assert_eq!(selected.as_os_str().as_bytes(), b"/a/caf\xe9.txt");
    }

    #[test]
    fn file_preview_without_bat_adds_no_flags() {
        let picker = Picker::new_with(true, ItemType::File, |_| None);
        assert!(picker.args.is_empty());
    }

    #[test]
    fn file_preview_with_bat_adds_flags() {
        let picker = Picker::new_with(true, ItemType::File, |name| {
            (name == "bat").then(|| PathBuf::from("/usr/bin/bat"))
        });
        assert_eq!(picker.program, "fzf");
        assert_eq!(picker.args.len(), 3);
        assert!(picker.args[2].to_string_lossy().starts_with("--preview=bat "));
    }

    #[test]
    fn preview_off_skips_the_lookup() {
        let picker = Picker::new_with(false, ItemType::File, |_| panic!("bat lookup without preview"));
        assert!(picker.args.is_empty());
    }

    #[test]
    fn directory_preview_ignores_bat() {
        let picker = Picker::new_with(true, ItemType::Directory, |_| None);
        assert_eq!(picker.args.last().unwrap(), "--preview=ls -la {}");
    }

    #[cfg(unix)]
    #[test]
    fn interrupted_is_an_empty_selection() {
        let picker = sh("cat >/dev/null; exit 130");
        assert_eq!(picker.pick(&candidates()).unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn no_match_is_an_empty_selection() {
        let picker = sh("exit 1");
        assert_eq!(picker.pick(&candidates()).unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn other_exit_codes_fail() {
        let picker = sh("cat >/dev/null; exit 2");
        let err = picker.pick(&candidates()).unwrap_err();
        match err {
            Error::Pick { status } => assert_eq!(status.code(), Some(2)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn blank_output_is_no_selection() {
        let picker = sh("cat >/dev/null; echo");
        assert_eq!(picker.pick(&candidates()).unwrap(), None);
    }

    #[test]
    fn missing_picker_is_a_spawn_error() {
        let picker = Picker::with_command("/nonexistent/definitely-not-fzf", Vec::<OsString>::new());
        assert!(matches!(
            picker.pick(&candidates()),
            Err(Error::Spawn { .. })
        ));
    }
}
