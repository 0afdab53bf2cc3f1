//! CSV for spreadsheet programs set to a Spanish locale.

use std::io::Write;

use crate::error::Result;
use crate::table::ReportTable;

/// UTF-8 byte order mark, so Excel detects the encoding.
const BOM: &[u8] = b"\xEF\xBB\xBF";
/// Column separator; `,` is the decimal mark in Spanish locales.
const SEP: &str = ";";

fn escape(value: &str) -> String {
    if value.contains(SEP) || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn to_csv(table: &ReportTable) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(BOM.len() + 64 * (table.rows.len() + 1));
    out.write_all(BOM)?;

    let headers: Vec<String> = table.columns.iter().map(|c| escape(c.header)).collect();
    writeln!(out, "{}", headers.join(SEP))?;

    for row in &table.rows {
        let line: Vec<String> = row.iter().map(|cell| escape(&cell.raw())).collect();
        writeln!(out, "{}", line.join(SEP))?;
    }

    tracing::debug!(tipo = table.tipo.slug(), rows = table.rows.len(), "csv rendered");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tienda_core::models::TipoReporte;

    #[test]
    fn test_escape() {
        assert_eq!(escape("simple"), "simple");
        assert_eq!(escape("a;b"), "\"a;b\"");
        assert_eq!(escape("dice \"hola\""), "\"dice \"\"hola\"\"\"");
        assert_eq!(escape("dos\nlíneas"), "\"dos\nlíneas\"");
    }

    #[test]
    fn test_csv_layout() {
        let rows = vec![json!({"concepto": "Renta; local", "frecuencia": "mensual", "monto": "2500"})
            .as_object()
            .unwrap()
            .clone()];
        let table = ReportTable::from_rows(TipoReporte::Gastos, None, &rows);
        let bytes = to_csv(&table).unwrap();

        assert!(bytes.starts_with(BOM));
        let text = String::from_utf8(bytes[BOM.len()..].to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Fecha;Concepto;Frecuencia;Monto");
        assert_eq!(lines[1], ";\"Renta; local\";mensual;2500.00");
        assert_eq!(lines.len(), 2);
    }
}
