use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::ops::task_list::TaskList;
use crate::store::TaskWarrior;
use crate::store::taskwarrior::default_data_dir;

use super::commands::Cli;

/// Route `tracing` output to `path`, appending. The terminal belongs to the
/// UI, so nothing is logged unless a file is given.
pub fn init_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("cannot open log file {}: {}", path.display(), e))?;

    let filter =
        EnvFilter::try_from_env("TWLIST_LOG").unwrap_or_else(|_| EnvFilter::new("twlist=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .try_init()?;
    Ok(())
}

/// Connect to Taskwarrior, load the list and hand it to the TUI
pub fn launch(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    let store = TaskWarrior::new(&cli.task_bin, data_dir)?;
    info!(
        program = %store.program().display(),
        data_dir = %store.data_dir().display(),
        "starting"
    );

    let mut tasks = TaskList::new(Box::new(store));
    tasks.reload();
    crate::tui::run(tasks)
}
