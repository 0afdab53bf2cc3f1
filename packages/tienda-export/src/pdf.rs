//! PDF rendering of a report.
//!
//! genpdf needs the font files at runtime. Native callers can load them
//! from a directory; the browser fetches the bytes and passes them in.

use genpdf::elements::{Break, FrameCellDecorator, Paragraph, TableLayout};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::{Color, Style};
use genpdf::{Alignment, Document, Element, Margins, SimplePageDecorator};

use tienda_core::money::format_money;

use crate::error::{ExportError, Result};
use crate::table::ReportTable;

/// Font family shipped with the web assets.
pub const FONT_FAMILY_NAME: &str = "LiberationSans";

/// Raw TTF files of one font family.
pub struct FontFiles {
    pub regular: Vec<u8>,
    pub bold: Vec<u8>,
    pub italic: Vec<u8>,
    pub bold_italic: Vec<u8>,
}

impl FontFiles {
    pub fn into_family(self) -> Result<FontFamily<FontData>> {
        let load = |bytes: Vec<u8>, variant: &str| {
            FontData::new(bytes, None)
                .map_err(|e| ExportError::Fonts(format!("{} {}: {}", FONT_FAMILY_NAME, variant, e)))
        };

        Ok(FontFamily {
            regular: load(self.regular, "Regular")?,
            bold: load(self.bold, "Bold")?,
            italic: load(self.italic, "Italic")?,
            bold_italic: load(self.bold_italic, "BoldItalic")?,
        })
    }
}

/// Load `{FONT_FAMILY_NAME}-Regular.ttf` and siblings from `dir`.
pub fn fonts_from_dir(dir: &str) -> Result<FontFamily<FontData>> {
    genpdf::fonts::from_files(dir, FONT_FAMILY_NAME, None)
        .map_err(|e| ExportError::Fonts(format!("{} ({}): {}", dir, FONT_FAMILY_NAME, e)))
}

/// File names relative to the font directory, in [`FontFiles`] order.
pub fn font_file_names() -> [String; 4] {
    ["Regular", "Bold", "Italic", "BoldItalic"].map(|v| format!("{}-{}.ttf", FONT_FAMILY_NAME, v))
}

fn cell(text: &str, style: Style, align: Alignment) -> impl Element {
    Paragraph::new(text)
        .aligned(align)
        .styled(style)
        .padded(Margins::trbl(1, 2, 1, 2))
}

pub fn to_pdf(table: &ReportTable, fonts: FontFamily<FontData>, nombre_tienda: &str, simbolo: &str) -> Result<Vec<u8>> {
    let mut doc = Document::new(fonts);
    doc.set_title(&table.titulo);

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(Margins::trbl(15, 12, 15, 12));
    doc.set_page_decorator(decorator);

    let s_tienda = Style::new().with_font_size(10).with_color(Color::Greyscale(96));
    let s_title = Style::new().with_font_size(14).bold();
    let s_subtitle = Style::new().with_font_size(9);
    let s_header = Style::new().with_font_size(8).bold();
    let s_cell = Style::new().with_font_size(8);
    let s_total = Style::new().with_font_size(8).bold();
    let s_empty = Style::new().with_font_size(9).with_color(Color::Greyscale(128));

    doc.push(Paragraph::new(nombre_tienda).styled(s_tienda));
    doc.push(Paragraph::new(&table.titulo).styled(s_title));
    if let Some(subtitulo) = &table.subtitulo {
        doc.push(Paragraph::new(subtitulo).styled(s_subtitle));
    }
    doc.push(Break::new(1.0));

    if table.is_empty() {
        doc.push(Paragraph::new("Sin datos para el periodo seleccionado").styled(s_empty));
    } else {
        let weights = table.columns.iter().map(|c| c.weight()).collect();
        let mut layout = TableLayout::new(weights);
        layout.set_cell_decorator(FrameCellDecorator::new(true, true, false));

        let align = |numeric: bool| if numeric { Alignment::Right } else { Alignment::Left };

        let mut header = layout.row();
        for spec in table.columns {
            header.push_element(cell(spec.header, s_header, align(spec.is_numeric())));
        }
        header.push().map_err(|e| ExportError::Pdf(format!("header row: {}", e)))?;

        for row in &table.rows {
            let mut line = layout.row();
            for (spec, value) in table.columns.iter().zip(row) {
                line.push_element(cell(&value.display(simbolo), s_cell, align(spec.is_numeric())));
            }
            line.push().map_err(|e| ExportError::Pdf(format!("data row: {}", e)))?;
        }

        if table.has_totals() {
            let mut line = layout.row();
            for (i, total) in table.totals().into_iter().enumerate() {
                let text = match total {
                    Some(t) => format_money(t, simbolo),
                    None if i == 0 => "Total".to_string(),
                    None => String::new(),
                };
                line.push_element(cell(&text, s_total, align(total.is_some())));
            }
            line.push().map_err(|e| ExportError::Pdf(format!("totals row: {}", e)))?;
        }

        doc.push(layout);
    }

    let mut buffer = Vec::new();
    doc.render(&mut buffer)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    tracing::debug!(tipo = table.tipo.slug(), bytes = buffer.len(), "pdf rendered");
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_font_dir_is_font_error() {
        let err = fonts_from_dir("/nonexistent/fonts").unwrap_err();
        assert!(matches!(err, ExportError::Fonts(_)));
        assert_eq!(err.user_message(), "No se pudieron cargar las fuentes para el PDF");
    }

    #[test]
    fn test_invalid_font_bytes_are_rejected() {
        let files = FontFiles {
            regular: b"not a font".to_vec(),
            bold: Vec::new(),
            italic: Vec::new(),
            bold_italic: Vec::new(),
        };
        assert!(matches!(files.into_family(), Err(ExportError::Fonts(_))));
    }

    #[test]
    fn test_font_file_names() {
        assert_eq!(font_file_names()[0], "LiberationSans-Regular.ttf");
        assert_eq!(font_file_names()[3], "LiberationSans-BoldItalic.ttf");
    }
}
