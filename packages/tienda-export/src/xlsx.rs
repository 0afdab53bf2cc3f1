//! Excel workbook of a report.

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, FormatAlign, Workbook};

use crate::error::Result;
use crate::table::{Cell, CellKind, ReportTable};

const MONEY_FORMAT: &str = "#,##0.00";
const QUANTITY_FORMAT: &str = "#,##0.##";
/// Excel rejects longer sheet names.
const MAX_SHEET_NAME: usize = 31;
const HEADER_ROW: u32 = 3;

pub fn to_xlsx(table: &ReportTable) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let title = Format::new().set_bold().set_font_size(14);
    let header = Format::new()
        .set_bold()
        .set_background_color(0xD9E1F2)
        .set_align(FormatAlign::Center);
    let money = Format::new().set_num_format(MONEY_FORMAT);
    let quantity = Format::new().set_num_format(QUANTITY_FORMAT);
    let total_label = Format::new().set_bold();
    let total_money = Format::new().set_bold().set_num_format(MONEY_FORMAT);

    let sheet_name: String = table.titulo.chars().take(MAX_SHEET_NAME).collect();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&sheet_name)?;

    worksheet.write_string_with_format(0, 0, &table.titulo, &title)?;
    if let Some(subtitulo) = &table.subtitulo {
        worksheet.write_string(1, 0, subtitulo)?;
    }

    for (c, spec) in table.columns.iter().enumerate() {
        let c = c as u16;
        worksheet.write_string_with_format(HEADER_ROW, c, spec.header, &header)?;
        worksheet.set_column_width(c, (spec.weight() * 6) as f64)?;
    }

    let mut r = HEADER_ROW + 1;
    for row in &table.rows {
        for (c, cell) in row.iter().enumerate() {
            let c = c as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(text) => {
                    worksheet.write_string(r, c, text)?;
                }
                Cell::Money(d) => {
                    worksheet.write_number_with_format(r, c, d.to_f64().unwrap_or_default(), &money)?;
                }
                Cell::Quantity(d) => {
                    worksheet.write_number_with_format(r, c, d.to_f64().unwrap_or_default(), &quantity)?;
                }
            }
        }
        r += 1;
    }

    if table.has_totals() && !table.is_empty() {
        worksheet.write_string_with_format(r, 0, "Total", &total_label)?;
        for (c, total) in table.totals().into_iter().enumerate() {
            if let Some(total) = total {
                worksheet.write_number_with_format(r, c as u16, total.to_f64().unwrap_or_default(), &total_money)?;
            }
        }
    }

    let numeric_columns = table
        .columns
        .iter()
        .filter(|c| c.kind != CellKind::Text)
        .count();
    tracing::debug!(
        tipo = table.tipo.slug(),
        rows = table.rows.len(),
        numeric_columns,
        "xlsx rendered"
    );

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tienda_core::models::TipoReporte;

    #[test]
    fn test_xlsx_is_a_zip_container() {
        let rows = vec![json!({"nombre": "Arroz", "stock": 12, "precio_venta": "8.50"})
            .as_object()
            .unwrap()
            .clone()];
        let table = ReportTable::from_rows(TipoReporte::Inventario, None, &rows);
        let bytes = to_xlsx(&table).unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn test_empty_report_still_renders() {
        let table = ReportTable::from_rows(TipoReporte::ProductosMasVendidos, None, &[]);
        let bytes = to_xlsx(&table).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
