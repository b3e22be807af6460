use std::{ffi::OsString, path::PathBuf};

use clap::Parser;

use crate::{
    edit::DEFAULT_EDITOR,
    model::{ItemType, SearchOptions},
    roots::{Environment, resolve_roots},
};

#[derive(Parser, Debug)]
#[command(
    name = "vimi",
    version,
    about = "Fuzzy-find and open files in Neovim"
)]
pub struct Cli {
    /// Directories to search (default: $PROJECT_DIR, $WORK_DIR, $ASSET_DIR, or .)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Enable preview
    #[arg(short, long)]
    pub preview: bool,

    /// Search directories instead of files and print the selection
    #[arg(short = 'f', long, alias = "files")]
    pub folders: bool,

    /// Search depth (1 = non-recursive, 0 = unlimited)
    #[arg(short, long, value_name = "N", default_value_t = 0)]
    pub depth: u32,

    /// Editor to open the file with (default: $EDITOR, then nvim)
    #[arg(short, long, value_name = "CMD")]
    pub editor: Option<OsString>,
}

impl Cli {
    pub fn item_type(&self) -> ItemType {
        if self.folders {
            ItemType::Directory
        } else {
            ItemType::File
        }
    }

    pub fn search_options(&self, env: &impl Environment) -> SearchOptions {
        SearchOptions {
            item_type: self.item_type(),
            depth: self.depth,
            roots: resolve_roots(&self.paths, env),
        }
    }

    pub fn resolve_editor(&self, env: &impl Environment) -> OsString {
        if let Some(editor) = &self.editor {
            return editor.clone();
        }
        if let Some(editor) = env.var_os("EDITOR")
            && !editor.to_string_lossy().trim().is_empty()
        {
            return editor;
        }
        DEFAULT_EDITOR.into()
    }
}
