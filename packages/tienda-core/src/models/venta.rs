use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::present;
use crate::listing::Searchable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetodoPago {
    #[default]
    Efectivo,
    Tarjeta,
    Transferencia,
    Credito,
}

impl MetodoPago {
    pub fn label(&self) -> &'static str {
        match self {
            MetodoPago::Efectivo => "Efectivo",
            MetodoPago::Tarjeta => "Tarjeta",
            MetodoPago::Transferencia => "Transferencia",
            MetodoPago::Credito => "Crédito",
        }
    }

    pub fn variants() -> &'static [MetodoPago] {
        &[
            MetodoPago::Efectivo,
            MetodoPago::Tarjeta,
            MetodoPago::Transferencia,
            MetodoPago::Credito,
        ]
    }

    pub fn slug(&self) -> &'static str {
        match self {
            MetodoPago::Efectivo => "efectivo",
            MetodoPago::Tarjeta => "tarjeta",
            MetodoPago::Transferencia => "transferencia",
            MetodoPago::Credito => "credito",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::variants().iter().copied().find(|m| m.slug() == slug)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoVenta {
    #[default]
    Completada,
    Cancelada,
}

impl EstadoVenta {
    pub fn label(&self) -> &'static str {
        match self {
            EstadoVenta::Completada => "Completada",
            EstadoVenta::Cancelada => "Cancelada",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VentaItem {
    pub producto_id: i64,
    #[serde(default)]
    pub producto_nombre: Option<String>,
    pub cantidad: Decimal,
    pub precio_unitario: Decimal,
    #[serde(default)]
    pub descuento: Decimal,
    #[serde(default)]
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Venta {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub folio: Option<String>,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub cliente_id: Option<i64>,
    #[serde(default)]
    pub cliente_nombre: Option<String>,
    #[serde(default)]
    pub items: Vec<VentaItem>,
    #[serde(default)]
    pub subtotal: Decimal,
    #[serde(default)]
    pub descuento_volumen: Decimal,
    #[serde(default)]
    pub descuento_adicional: Decimal,
    #[serde(default)]
    pub costo_envio: Decimal,
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub metodo_pago: MetodoPago,
    #[serde(default)]
    pub estado: EstadoVenta,
    #[serde(default)]
    pub usuario_nombre: Option<String>,
}

impl Searchable for Venta {
    fn search_fields(&self) -> Vec<&str> {
        present([&self.folio, &self.cliente_nombre, &self.fecha]).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuevaVentaItem {
    pub producto_id: i64,
    pub cantidad: Decimal,
    pub precio_unitario: Decimal,
}

/// Delivery requested together with a sale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DatosEnvio {
    pub direccion: String,
    #[serde(default)]
    pub fecha_programada: Option<String>,
    #[serde(default)]
    pub notas: Option<String>,
}

/// Checkout payload. The server recomputes every amount; the client
/// values only let it detect a stale cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuevaVenta {
    /// Client-generated key so a retried submit is not registered twice
    pub referencia: String,
    pub cliente_id: Option<i64>,
    pub items: Vec<NuevaVentaItem>,
    pub descuento_adicional: Decimal,
    pub porcentaje_descuento: Decimal,
    pub costo_envio: Decimal,
    pub total: Decimal,
    pub metodo_pago: MetodoPago,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monto_recibido: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autorizacion_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub envio: Option<DatosEnvio>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DevolucionItem {
    pub producto_id: i64,
    #[serde(default)]
    pub producto_nombre: Option<String>,
    pub cantidad: Decimal,
}

/// Return of merchandise against a registered sale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Devolucion {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub folio: Option<String>,
    pub venta_id: i64,
    #[serde(default)]
    pub folio_venta: Option<String>,
    #[serde(default)]
    pub fecha: Option<String>,
    pub motivo: String,
    #[serde(default)]
    pub items: Vec<DevolucionItem>,
    #[serde(default)]
    pub total: Decimal,
}

impl Searchable for Devolucion {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.motivo.as_str()];
        fields.extend(present([&self.folio, &self.folio_venta]));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nueva_venta_omits_empty_optionals() {
        let venta = NuevaVenta {
            referencia: "abc".into(),
            cliente_id: None,
            items: vec![NuevaVentaItem {
                producto_id: 1,
                cantidad: Decimal::from(3),
                precio_unitario: Decimal::new(1000, 2),
            }],
            descuento_adicional: Decimal::ZERO,
            porcentaje_descuento: Decimal::ZERO,
            costo_envio: Decimal::ZERO,
            total: Decimal::new(3000, 2),
            metodo_pago: MetodoPago::Efectivo,
            monto_recibido: None,
            autorizacion_id: None,
            envio: None,
        };

        let value = serde_json::to_value(&venta).unwrap();
        assert_eq!(value["metodo_pago"], "efectivo");
        assert_eq!(value["total"], "30.00");
        assert!(value.get("monto_recibido").is_none());
        assert!(value.get("envio").is_none());
        assert!(value["cliente_id"].is_null());
    }

    #[test]
    fn test_metodo_pago_slug_round_trip() {
        for metodo in MetodoPago::variants() {
            assert_eq!(MetodoPago::from_slug(metodo.slug()), Some(*metodo));
        }
        assert_eq!(MetodoPago::from_slug("bitcoin"), None);
    }
}
