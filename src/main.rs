mod cli;
mod dispatch;
mod edit;
mod error;
mod logging;
mod model;
mod roots;
mod scan;
mod ui;

use std::{io, process::ExitCode};

use anyhow::{Context, Result};
use cli::Cli;
use clap::Parser;
use edit::Editor;
use roots::ProcessEnv;
use scan::Backend;
use ui::Picker;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init()?;

    // Resolve roots and options
    let opts = cli.search_options(&ProcessEnv);
    tracing::debug!(item_type = %opts.item_type, depth = opts.depth, roots = ?opts.roots, "resolved search options");

    // Enumerate candidates
    let backend = Backend::detect()?;
    tracing::debug!(backend = backend.name(), program = %backend.program().display(), "selected backend");
    let candidates = backend.search(&opts).context("search failed")?;
    tracing::debug!(count = candidates.len(), "enumerated candidates");

    // Pick and dispatch
    let picker = Picker::new(cli.preview, opts.item_type);
    let editor = Editor::new(cli.resolve_editor(&ProcessEnv));
    let outcome = dispatch::pick_and_dispatch(
        &candidates,
        opts.item_type,
        &picker,
        &editor,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;
    tracing::debug!(?outcome, "done");

    Ok(ExitCode::from(outcome.exit_code()))
}
