//! Client-side exports of report data.
//!
//! Reports are fetched as JSON, laid out once as a [`ReportTable`] and then
//! rendered to PDF, XLSX or CSV bytes for download. Nothing here touches the
//! network or the filesystem except [`pdf::fonts_from_dir`].

pub mod csv;
pub mod error;
pub mod pdf;
pub mod table;
pub mod xlsx;

pub use error::{ExportError, Result};
pub use table::{Cell, ColumnSpec, ReportTable};

/// Output format picked on the reports screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ExportFormat::Csv => "text/csv;charset=utf-8",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Xlsx => "Excel",
            ExportFormat::Csv => "CSV",
        }
    }
}
