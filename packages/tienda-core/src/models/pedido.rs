use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::present;
use crate::listing::Searchable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoPedido {
    #[default]
    Pendiente,
    Recibido,
    Cancelado,
}

impl EstadoPedido {
    pub fn label(&self) -> &'static str {
        match self {
            EstadoPedido::Pendiente => "Pendiente",
            EstadoPedido::Recibido => "Recibido",
            EstadoPedido::Cancelado => "Cancelado",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PedidoItem {
    pub producto_id: i64,
    #[serde(default)]
    pub producto_nombre: Option<String>,
    pub cantidad: Decimal,
    pub costo_unitario: Decimal,
}

impl PedidoItem {
    pub fn importe(&self) -> Decimal {
        self.cantidad * self.costo_unitario
    }
}

/// Purchase order sent to a supplier.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pedido {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub folio: Option<String>,
    pub proveedor_id: i64,
    #[serde(default)]
    pub proveedor_nombre: Option<String>,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub estado: EstadoPedido,
    #[serde(default)]
    pub items: Vec<PedidoItem>,
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub notas: Option<String>,
}

impl Pedido {
    /// Sum of line amounts, shown while the order is being drafted.
    pub fn total_estimado(&self) -> Decimal {
        self.items.iter().map(PedidoItem::importe).sum()
    }
}

impl Searchable for Pedido {
    fn search_fields(&self) -> Vec<&str> {
        present([&self.folio, &self.proveedor_nombre, &self.notas]).collect()
    }
}
