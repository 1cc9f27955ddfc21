// Entrypoint for the book catalog.
// - Opens `library.json` in the working directory and hands it to the menu.
// - Reads from the terminal when attached to one, otherwise line by line
//   from stdin so sessions can be piped in.

use anyhow::Context;
use bookshelf::catalog::{Catalog, DEFAULT_PATH};
use bookshelf::shell::{LinePrompter, Shell, TerminalPrompter};
use std::io::{self, IsTerminal};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with the menu.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let catalog = Catalog::open_default()
        .with_context(|| format!("Loading {}", DEFAULT_PATH))?;

    if io::stdin().is_terminal() {
        Shell::new(catalog, TerminalPrompter, io::stdout()).run()
    } else {
        let prompter = LinePrompter::new(io::stdin().lock(), io::stdout());
        Shell::new(catalog, prompter, io::stdout()).run()
    }
}
