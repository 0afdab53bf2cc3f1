use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{default_true, present};
use crate::listing::Searchable;

/// Days before expiry at which a lot is flagged.
pub const DIAS_ALERTA_VENCIMIENTO: i64 = 30;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Producto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub codigo: Option<String>,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub precio_compra: Decimal,
    #[serde(default)]
    pub precio_venta: Decimal,
    #[serde(default)]
    pub stock: Decimal,
    #[serde(default)]
    pub stock_minimo: Decimal,
    #[serde(default = "default_unidad")]
    pub unidad: String,
    #[serde(default = "default_true")]
    pub activo: bool,
}

fn default_unidad() -> String {
    "unidad".to_string()
}

impl Producto {
    pub fn stock_bajo(&self) -> bool {
        self.stock <= self.stock_minimo
    }

    /// Gross margin over purchase price, in percent. `None` without a cost.
    pub fn margen(&self) -> Option<Decimal> {
        if self.precio_compra.is_zero() {
            return None;
        }
        Some((self.precio_venta - self.precio_compra) / self.precio_compra * Decimal::ONE_HUNDRED)
    }
}

impl Searchable for Producto {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.nombre.as_str()];
        fields.extend(present([&self.codigo, &self.categoria, &self.descripcion]));
        fields
    }
}

/// Inventory batch of a product with its own expiry date.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Lote {
    #[serde(default)]
    pub id: Option<i64>,
    pub producto_id: i64,
    pub numero_lote: String,
    #[serde(default)]
    pub cantidad: Decimal,
    #[serde(default)]
    pub fecha_vencimiento: Option<NaiveDate>,
    #[serde(default)]
    pub costo: Option<Decimal>,
}

impl Searchable for Lote {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.numero_lote.as_str()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstadoLote {
    Vigente,
    PorVencer,
    Vencido,
    SinFecha,
}

impl EstadoLote {
    pub fn label(&self) -> &'static str {
        match self {
            EstadoLote::Vigente => "Vigente",
            EstadoLote::PorVencer => "Por vencer",
            EstadoLote::Vencido => "Vencido",
            EstadoLote::SinFecha => "Sin fecha",
        }
    }
}

impl Lote {
    pub fn dias_para_vencer(&self, hoy: NaiveDate) -> Option<i64> {
        self.fecha_vencimiento
            .map(|fecha| fecha.signed_duration_since(hoy).num_days())
    }

    pub fn estado(&self, hoy: NaiveDate) -> EstadoLote {
        match self.dias_para_vencer(hoy) {
            None => EstadoLote::SinFecha,
            Some(dias) if dias < 0 => EstadoLote::Vencido,
            Some(dias) if dias <= DIAS_ALERTA_VENCIMIENTO => EstadoLote::PorVencer,
            Some(_) => EstadoLote::Vigente,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_producto_accepts_string_and_number_money() {
        let json = r#"{"id":7,"nombre":"Azúcar 1lb","precio_compra":"4.25","precio_venta":5.5,"stock":"12","stock_minimo":12}"#;
        let p: Producto = serde_json::from_str(json).unwrap();
        assert_eq!(p.precio_compra, Decimal::new(425, 2));
        assert_eq!(p.precio_venta, Decimal::new(55, 1));
        assert_eq!(p.unidad, "unidad");
        assert!(p.activo);
        assert!(p.stock_bajo());
    }

    #[test]
    fn test_margen() {
        let p = Producto {
            nombre: "Leche".into(),
            precio_compra: Decimal::from(8),
            precio_venta: Decimal::from(10),
            ..Default::default()
        };
        assert_eq!(p.margen(), Some(Decimal::from(25)));
        assert_eq!(Producto::default().margen(), None);
    }

    #[test]
    fn test_lote_estado() {
        let hoy = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let lote = |fecha: Option<NaiveDate>| Lote {
            producto_id: 1,
            numero_lote: "L-1".into(),
            fecha_vencimiento: fecha,
            ..Default::default()
        };

        assert_eq!(lote(None).estado(hoy), EstadoLote::SinFecha);
        assert_eq!(lote(NaiveDate::from_ymd_opt(2024, 5, 31)).estado(hoy), EstadoLote::Vencido);
        assert_eq!(lote(NaiveDate::from_ymd_opt(2024, 6, 1)).estado(hoy), EstadoLote::PorVencer);
        assert_eq!(lote(NaiveDate::from_ymd_opt(2024, 7, 1)).estado(hoy), EstadoLote::PorVencer);
        assert_eq!(lote(NaiveDate::from_ymd_opt(2024, 7, 2)).estado(hoy), EstadoLote::Vigente);
    }
}
