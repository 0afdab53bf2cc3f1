use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::present;
use crate::listing::Searchable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoEnvio {
    #[default]
    Pendiente,
    EnCamino,
    Entregado,
    Cancelado,
}

impl EstadoEnvio {
    pub fn label(&self) -> &'static str {
        match self {
            EstadoEnvio::Pendiente => "Pendiente",
            EstadoEnvio::EnCamino => "En camino",
            EstadoEnvio::Entregado => "Entregado",
            EstadoEnvio::Cancelado => "Cancelado",
        }
    }

    /// States the shipments screen offers as the next step.
    pub fn siguientes(&self) -> &'static [EstadoEnvio] {
        match self {
            EstadoEnvio::Pendiente => &[EstadoEnvio::EnCamino, EstadoEnvio::Cancelado],
            EstadoEnvio::EnCamino => &[EstadoEnvio::Entregado, EstadoEnvio::Cancelado],
            EstadoEnvio::Entregado | EstadoEnvio::Cancelado => &[],
        }
    }

    pub fn is_final(&self) -> bool {
        self.siguientes().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Envio {
    #[serde(default)]
    pub id: Option<i64>,
    pub venta_id: i64,
    #[serde(default)]
    pub folio_venta: Option<String>,
    #[serde(default)]
    pub cliente_nombre: Option<String>,
    pub direccion: String,
    #[serde(default)]
    pub estado: EstadoEnvio,
    #[serde(default)]
    pub costo: Decimal,
    #[serde(default)]
    pub fecha_programada: Option<String>,
    #[serde(default)]
    pub notas: Option<String>,
}

impl Searchable for Envio {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.direccion.as_str()];
        fields.extend(present([&self.folio_venta, &self.cliente_nombre]));
        fields
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CambioEstadoEnvio {
    pub estado: EstadoEnvio,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estado_wire_names() {
        assert_eq!(serde_json::to_value(EstadoEnvio::EnCamino).unwrap(), "en_camino");
        let e: EstadoEnvio = serde_json::from_str("\"entregado\"").unwrap();
        assert_eq!(e, EstadoEnvio::Entregado);
    }

    #[test]
    fn test_transitions() {
        assert_eq!(
            EstadoEnvio::Pendiente.siguientes(),
            &[EstadoEnvio::EnCamino, EstadoEnvio::Cancelado]
        );
        assert!(EstadoEnvio::Entregado.is_final());
        assert!(!EstadoEnvio::EnCamino.is_final());
    }
}
