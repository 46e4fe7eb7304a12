use std::{
    fs::{self, File},
    path::Path,
    sync::Arc,
};

use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

/// Sends `tracing` output to `path`, appending.
///
/// The terminal belongs to the UI, so nothing is logged to stdout or stderr.
pub(crate) fn init(path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    // Ignore the error if a subscriber is already installed.
    _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "dropris starting");
    Ok(())
}
