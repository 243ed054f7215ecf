use super::ui;
use crate::core::Session;
use crate::export::ExportFormat;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Exports the session history and writes it to `path`, defaulting to the
/// format's standard file name in the current directory.
pub async fn save(session: &Session, format: ExportFormat, path: Option<&Path>) -> Result<PathBuf> {
    let path = path.map_or_else(|| PathBuf::from(format.file_name()), Path::to_path_buf);

    let spinner = ui::new_spinner(&format!("Building {format}..."));
    let bytes = session.export(format).await;
    spinner.finish_and_clear();
    let bytes = bytes?;

    tokio::fs::write(&path, &bytes)
        .await
        .with_context(|| format!("Failed to write {} to {}", format, path.display()))?;

    tracing::info!(
        mime = format.mime_type(),
        bytes = bytes.len(),
        "Exported history to {}",
        path.display()
    );
    Ok(path)
}
