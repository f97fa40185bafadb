//! Handing rendered documents to an exporter.
//!
//! Exporting never leaves the caller empty-handed: if the exporter rejects
//! the document, a minimal error document is exported in its place.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::document::{Block, DocumentModel, TextBlock};

/// Errors from a [`DocumentExporter`].
#[derive(Debug, Error)]
pub enum ExportError {
    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// The exporter refused the document.
    #[error("export rejected: {message}")]
    Rejected {
        /// Reason given by the exporter.
        message: String,
    },
}

/// Destination for rendered documents (a PDF renderer, a file, a print
/// queue).
#[async_trait::async_trait]
pub trait DocumentExporter: Send + Sync {
    /// Exports `document`.
    ///
    /// # Errors
    ///
    /// * If the document cannot be exported
    async fn export(&self, document: &DocumentModel) -> Result<(), ExportError>;
}

/// Writes documents as pretty-printed JSON document definitions.
#[derive(Debug, Clone)]
pub struct JsonFileExporter {
    path: PathBuf,
}

impl JsonFileExporter {
    /// Exporter writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Output path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl DocumentExporter for JsonFileExporter {
    async fn export(&self, document: &DocumentModel) -> Result<(), ExportError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(document)?;
        tokio::fs::write(&self.path, json).await?;
        log::info!("Wrote document to {}", self.path.display());
        Ok(())
    }
}

/// Minimal document reporting an export failure.
#[must_use]
pub fn error_document(error: &ExportError) -> DocumentModel {
    DocumentModel {
        content: vec![
            Block::from(TextBlock::new("Error generating document").color("red")),
            Block::from(TextBlock::new(error.to_string()).font_size(8.0)),
        ],
        ..DocumentModel::default()
    }
}

/// What [`export`] ended up exporting.
#[derive(Debug)]
pub enum ExportOutcome {
    /// The document was exported as given.
    Exported,
    /// The document was rejected; the error document was exported instead.
    Replaced {
        /// Why the requested document failed.
        cause: ExportError,
    },
    /// Neither the document nor the error document could be exported.
    Failed {
        /// Why the requested document failed.
        cause: ExportError,
        /// Why the error document failed.
        fallback: ExportError,
    },
}

/// Exports `document`, falling back to [`error_document`] on failure.
///
/// Failures are logged, never returned.
pub async fn export(exporter: &dyn DocumentExporter, document: &DocumentModel) -> ExportOutcome {
    let cause = match exporter.export(document).await {
        Ok(()) => return ExportOutcome::Exported,
        Err(e) => e,
    };

    log::error!("Export failed, exporting error document instead: {cause}");

    match exporter.export(&error_document(&cause)).await {
        Ok(()) => ExportOutcome::Replaced { cause },
        Err(fallback) => {
            log::error!("Error document export failed too: {fallback}");
            ExportOutcome::Failed { cause, fallback }
        }
    }
}
