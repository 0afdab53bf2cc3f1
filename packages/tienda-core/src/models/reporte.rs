use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TipoReporte {
    Ventas,
    ProductosMasVendidos,
    Inventario,
    Gastos,
    CuentasPorPagar,
}

impl TipoReporte {
    pub fn variants() -> &'static [TipoReporte] {
        &[
            TipoReporte::Ventas,
            TipoReporte::ProductosMasVendidos,
            TipoReporte::Inventario,
            TipoReporte::Gastos,
            TipoReporte::CuentasPorPagar,
        ]
    }

    /// Path segment under `/reportes`.
    pub fn slug(&self) -> &'static str {
        match self {
            TipoReporte::Ventas => "ventas",
            TipoReporte::ProductosMasVendidos => "productos-mas-vendidos",
            TipoReporte::Inventario => "inventario",
            TipoReporte::Gastos => "gastos",
            TipoReporte::CuentasPorPagar => "cuentas-por-pagar",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::variants().iter().copied().find(|t| t.slug() == slug)
    }

    pub fn titulo(&self) -> &'static str {
        match self {
            TipoReporte::Ventas => "Reporte de ventas",
            TipoReporte::ProductosMasVendidos => "Productos más vendidos",
            TipoReporte::Inventario => "Inventario",
            TipoReporte::Gastos => "Gastos",
            TipoReporte::CuentasPorPagar => "Cuentas por pagar",
        }
    }

    /// Inventory is a snapshot and ignores the date range.
    pub fn usa_rango(&self) -> bool {
        !matches!(self, TipoReporte::Inventario)
    }
}

/// Inclusive date range of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangoFechas {
    pub desde: NaiveDate,
    pub hasta: NaiveDate,
}

impl RangoFechas {
    pub fn new(desde: NaiveDate, hasta: NaiveDate) -> ValidationResult<Self> {
        if desde > hasta {
            return Err(ValidationError::new(
                "desde",
                "La fecha inicial no puede ser posterior a la final",
            ));
        }
        Ok(Self { desde, hasta })
    }

    /// From the first of the month to `hoy`.
    pub fn mes_actual(hoy: NaiveDate) -> Self {
        let desde = hoy.with_day0(0).unwrap_or(hoy);
        Self { desde, hasta: hoy }
    }

    pub fn sufijo_archivo(&self) -> String {
        format!("{}_{}", self.desde.format("%Y%m%d"), self.hasta.format("%Y%m%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rango_rejects_inverted_dates() {
        let a = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(RangoFechas::new(a, b).is_err());
        assert!(RangoFechas::new(b, a).is_ok());
        assert!(RangoFechas::new(a, a).is_ok());
    }

    #[test]
    fn test_mes_actual() {
        let hoy = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let rango = RangoFechas::mes_actual(hoy);
        assert_eq!(rango.desde, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(rango.sufijo_archivo(), "20240501_20240517");
    }

    #[test]
    fn test_slug_round_trip() {
        for tipo in TipoReporte::variants() {
            assert_eq!(TipoReporte::from_slug(tipo.slug()), Some(*tipo));
        }
    }
}
