//! Report rows laid out as a typed table.
//!
//! The backend answers reports with loose JSON rows. Each report type has a
//! fixed column layout; a column reads the first of its keys that is present
//! and coerces the value to the column's kind. Missing or unreadable values
//! become empty cells.

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use tienda_core::models::{RangoFechas, TipoReporte};
use tienda_core::money::{format_money, format_quantity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Text,
    Money,
    Quantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub header: &'static str,
    /// Row keys tried in order
    pub keys: &'static [&'static str],
    pub kind: CellKind,
}

impl ColumnSpec {
    /// Relative width used by the PDF and XLSX layouts.
    pub fn weight(&self) -> usize {
        match self.kind {
            CellKind::Text => 3,
            CellKind::Money | CellKind::Quantity => 2,
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self.kind, CellKind::Text)
    }
}

const fn col(header: &'static str, keys: &'static [&'static str], kind: CellKind) -> ColumnSpec {
    ColumnSpec { header, keys, kind }
}

const VENTAS: &[ColumnSpec] = &[
    col("Folio", &["folio", "id"], CellKind::Text),
    col("Fecha", &["fecha"], CellKind::Text),
    col("Cliente", &["cliente_nombre", "cliente"], CellKind::Text),
    col("Método de pago", &["metodo_pago"], CellKind::Text),
    col("Subtotal", &["subtotal"], CellKind::Money),
    col("Descuento", &["descuento", "descuento_adicional"], CellKind::Money),
    col("Total", &["total"], CellKind::Money),
];

const PRODUCTOS_MAS_VENDIDOS: &[ColumnSpec] = &[
    col("Código", &["codigo"], CellKind::Text),
    col("Producto", &["nombre", "producto_nombre", "producto"], CellKind::Text),
    col("Cantidad vendida", &["cantidad_vendida", "cantidad"], CellKind::Quantity),
    col("Total vendido", &["total_vendido", "total"], CellKind::Money),
];

const INVENTARIO: &[ColumnSpec] = &[
    col("Código", &["codigo"], CellKind::Text),
    col("Producto", &["nombre", "producto"], CellKind::Text),
    col("Categoría", &["categoria"], CellKind::Text),
    col("Stock", &["stock"], CellKind::Quantity),
    col("Stock mínimo", &["stock_minimo"], CellKind::Quantity),
    col("Precio compra", &["precio_compra"], CellKind::Money),
    col("Precio venta", &["precio_venta"], CellKind::Money),
    col("Valor", &["valor_inventario", "valor"], CellKind::Money),
];

const GASTOS: &[ColumnSpec] = &[
    col("Fecha", &["fecha"], CellKind::Text),
    col("Concepto", &["concepto", "descripcion"], CellKind::Text),
    col("Frecuencia", &["frecuencia", "categoria"], CellKind::Text),
    col("Monto", &["monto"], CellKind::Money),
];

const CUENTAS_POR_PAGAR: &[ColumnSpec] = &[
    col("Proveedor", &["proveedor_nombre", "proveedor"], CellKind::Text),
    col("Pedido", &["folio_pedido", "pedido_id"], CellKind::Text),
    col("Vencimiento", &["fecha_vencimiento"], CellKind::Text),
    col("Estado", &["estado"], CellKind::Text),
    col("Monto", &["monto_total"], CellKind::Money),
    col("Saldo", &["saldo"], CellKind::Money),
];

pub fn columns_for(tipo: TipoReporte) -> &'static [ColumnSpec] {
    match tipo {
        TipoReporte::Ventas => VENTAS,
        TipoReporte::ProductosMasVendidos => PRODUCTOS_MAS_VENDIDOS,
        TipoReporte::Inventario => INVENTARIO,
        TipoReporte::Gastos => GASTOS,
        TipoReporte::CuentasPorPagar => CUENTAS_POR_PAGAR,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Money(Decimal),
    Quantity(Decimal),
}

impl Cell {
    fn read(row: &Map<String, Value>, spec: &ColumnSpec) -> Self {
        let Some(value) = spec
            .keys
            .iter()
            .filter_map(|key| row.get(*key))
            .find(|v| !v.is_null())
        else {
            return Cell::Empty;
        };

        match spec.kind {
            CellKind::Text => match value {
                Value::String(s) => Cell::Text(s.clone()),
                Value::Bool(true) => Cell::Text("Sí".to_string()),
                Value::Bool(false) => Cell::Text("No".to_string()),
                other => Cell::Text(other.to_string()),
            },
            CellKind::Money => decimal(value).map(Cell::Money).unwrap_or(Cell::Empty),
            CellKind::Quantity => decimal(value).map(Cell::Quantity).unwrap_or(Cell::Empty),
        }
    }

    /// Display text for PDF and on-screen tables.
    pub fn display(&self, symbol: &str) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Money(d) => format_money(*d, symbol),
            Cell::Quantity(d) => format_quantity(*d),
        }
    }

    /// Plain text for CSV: numbers without symbol or grouping.
    pub fn raw(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Money(d) => format!("{:.2}", d),
            Cell::Quantity(d) => format_quantity(*d),
        }
    }

    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Cell::Money(d) | Cell::Quantity(d) => Some(*d),
            Cell::Empty | Cell::Text(_) => None,
        }
    }
}

/// Accepts `"12.50"` and `12.5`.
fn decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => tienda_core::money::parse_amount(s),
        Value::Number(_) => serde_json::from_value(value.clone()).ok(),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub tipo: TipoReporte,
    pub titulo: String,
    /// Period line under the title
    pub subtitulo: Option<String>,
    pub columns: &'static [ColumnSpec],
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    pub fn from_rows(tipo: TipoReporte, rango: Option<&RangoFechas>, rows: &[Map<String, Value>]) -> Self {
        let columns = columns_for(tipo);
        let rows = rows
            .iter()
            .map(|row| columns.iter().map(|spec| Cell::read(row, spec)).collect())
            .collect();

        let subtitulo = rango.filter(|_| tipo.usa_rango()).map(|r| {
            format!(
                "Del {} al {}",
                r.desde.format("%d/%m/%Y"),
                r.hasta.format("%d/%m/%Y")
            )
        });

        Self {
            tipo,
            titulo: tipo.titulo().to_string(),
            subtitulo,
            columns,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column sums for money columns; `None` elsewhere.
    pub fn totals(&self) -> Vec<Option<Decimal>> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                (spec.kind == CellKind::Money).then(|| {
                    self.rows
                        .iter()
                        .filter_map(|row| row.get(i).and_then(Cell::amount))
                        .sum::<Decimal>()
                })
            })
            .collect()
    }

    pub fn has_totals(&self) -> bool {
        self.columns.iter().any(|c| c.kind == CellKind::Money)
    }

    /// e.g. `reporte_ventas_20240501_20240531.xlsx`
    pub fn file_name(&self, rango: Option<&RangoFechas>, extension: &str) -> String {
        let base = format!("reporte_{}", self.tipo.slug().replace('-', "_"));
        match rango.filter(|_| self.tipo.usa_rango()) {
            Some(r) => format!("{}_{}.{}", base, r.sufijo_archivo(), extension),
            None => format!("{}.{}", base, extension),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn rows(value: Value) -> Vec<Map<String, Value>> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect()
    }

    fn mayo() -> RangoFechas {
        RangoFechas::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_rows_map_to_typed_cells() {
        let data = rows(json!([
            {"folio": "V-1", "fecha": "2024-05-02", "cliente_nombre": "Ana", "metodo_pago": "efectivo",
             "subtotal": "40.00", "descuento": 4, "total": "36.00"},
            {"id": 2, "fecha": "2024-05-03", "cliente": null, "total": 10.5}
        ]));
        let table = ReportTable::from_rows(TipoReporte::Ventas, Some(&mayo()), &data);

        assert_eq!(table.rows[0][0], Cell::Text("V-1".into()));
        assert_eq!(table.rows[0][5], Cell::Money(Decimal::from(4)));
        assert_eq!(table.rows[0][6], Cell::Money(Decimal::from(36)));
        assert_eq!(table.rows[1][0], Cell::Text("2".into()));
        assert_eq!(table.rows[1][2], Cell::Empty);
        assert_eq!(table.rows[1][6], Cell::Money(Decimal::new(105, 1)));
        assert_eq!(table.subtitulo.as_deref(), Some("Del 01/05/2024 al 31/05/2024"));
    }

    #[test]
    fn test_totals_only_for_money_columns() {
        let data = rows(json!([
            {"nombre": "Arroz", "cantidad_vendida": 10, "total_vendido": "100.00"},
            {"nombre": "Frijol", "cantidad_vendida": "5", "total_vendido": "62.50"},
            {"nombre": "Sal", "cantidad_vendida": 1, "total_vendido": "no es número"}
        ]));
        let table = ReportTable::from_rows(TipoReporte::ProductosMasVendidos, None, &data);
        let totals = table.totals();

        assert_eq!(totals[0], None);
        assert_eq!(totals[2], None);
        assert_eq!(totals[3], Some(Decimal::new(16250, 2)));
        assert_eq!(table.rows[2][3], Cell::Empty);
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Money(Decimal::new(123450, 2)).display("Q"), "Q 1,234.50");
        assert_eq!(Cell::Money(Decimal::new(123450, 2)).raw(), "1234.50");
        assert_eq!(Cell::Quantity(Decimal::from(3)).display("Q"), "3");
        assert_eq!(Cell::Empty.display("Q"), "");
    }

    #[test]
    fn test_inventory_ignores_range() {
        let table = ReportTable::from_rows(TipoReporte::Inventario, Some(&mayo()), &[]);
        assert!(table.subtitulo.is_none());
        assert!(table.is_empty());
        assert_eq!(table.file_name(Some(&mayo()), "pdf"), "reporte_inventario.pdf");
    }

    #[test]
    fn test_file_name_with_range() {
        let table = ReportTable::from_rows(TipoReporte::CuentasPorPagar, Some(&mayo()), &[]);
        assert_eq!(
            table.file_name(Some(&mayo()), "xlsx"),
            "reporte_cuentas_por_pagar_20240501_20240531.xlsx"
        );
    }
}
