//! Error types for report exports.

use thiserror::Error;

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("PDF error: {0}")]
    Pdf(String),

    /// Font files missing or unreadable
    #[error("Font error: {0}")]
    Fonts(String),

    #[error("CSV error: {0}")]
    Csv(#[from] std::io::Error),
}

impl ExportError {
    /// Text for the error banner.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExportError::Fonts(_) => "No se pudieron cargar las fuentes para el PDF",
            ExportError::Pdf(_) => "No se pudo generar el PDF",
            ExportError::Xlsx(_) => "No se pudo generar el archivo de Excel",
            ExportError::Csv(_) => "No se pudo generar el archivo CSV",
        }
    }
}
