use std::{io::Write, path::PathBuf};

use crate::{
    edit::Editor,
    error::Result,
    model::{Candidates, ItemType, write_path_line},
    ui::Picker,
};

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to pick from, or the pick was cancelled.
    Idle,
    /// Directory mode: the selection was written to stdout.
    Printed(PathBuf),
    /// File mode: the editor ran; `code` is `None` if it died from a signal.
    Edited { code: Option<i32> },
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Idle | Outcome::Printed(_) => 0,
            Outcome::Edited { code: Some(code) } => u8::try_from(*code).unwrap_or(1),
            Outcome::Edited { code: None } => 1,
        }
    }
}

/// Run the picker over `candidates` and act on the selection: print it in
/// directory mode, open it in the editor in file mode.
pub fn pick_and_dispatch(
    candidates: &Candidates,
    item_type: ItemType,
    picker: &Picker,
    editor: &Editor,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<Outcome> {
    if candidates.is_empty() {
        tracing::debug!("no candidates; skipping picker");
        return Ok(Outcome::Idle);
    }

    let Some(selected) = picker.pick(candidates)? else {
        if item_type == ItemType::File {
            writeln!(err, "No selection.")?;
        }
        return Ok(Outcome::Idle);
    };

    match item_type {
        ItemType::Directory => {
            write_path_line(out, &selected)?;
            Ok(Outcome::Printed(selected))
        }
        ItemType::File => {
            let status = editor.open(&selected)?;
            Ok(Outcome::Edited {
                code: status.code(),
            })
        }
    }
}
