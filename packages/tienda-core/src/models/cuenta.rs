use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{present, MetodoPago};
use crate::listing::Searchable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoCuenta {
    #[default]
    Pendiente,
    Parcial,
    Pagada,
    Vencida,
}

impl EstadoCuenta {
    pub fn label(&self) -> &'static str {
        match self {
            EstadoCuenta::Pendiente => "Pendiente",
            EstadoCuenta::Parcial => "Abonada",
            EstadoCuenta::Pagada => "Pagada",
            EstadoCuenta::Vencida => "Vencida",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PagoCuenta {
    #[serde(default)]
    pub id: Option<i64>,
    pub monto: Decimal,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub metodo: MetodoPago,
    #[serde(default)]
    pub notas: Option<String>,
}

/// Credit owed to a supplier, settled in installments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CuentaPorPagar {
    #[serde(default)]
    pub id: Option<i64>,
    pub proveedor_id: i64,
    #[serde(default)]
    pub proveedor_nombre: Option<String>,
    #[serde(default)]
    pub pedido_id: Option<i64>,
    #[serde(default)]
    pub folio_pedido: Option<String>,
    pub monto_total: Decimal,
    #[serde(default)]
    pub saldo: Decimal,
    #[serde(default)]
    pub fecha_emision: Option<NaiveDate>,
    #[serde(default)]
    pub fecha_vencimiento: Option<NaiveDate>,
    #[serde(default)]
    pub estado: EstadoCuenta,
    #[serde(default)]
    pub pagos: Vec<PagoCuenta>,
}

impl CuentaPorPagar {
    pub fn pagado(&self) -> Decimal {
        self.monto_total - self.saldo
    }

    pub fn esta_vencida(&self, hoy: NaiveDate) -> bool {
        self.estado != EstadoCuenta::Pagada
            && self.saldo > Decimal::ZERO
            && self.fecha_vencimiento.is_some_and(|f| f < hoy)
    }
}

impl Searchable for CuentaPorPagar {
    fn search_fields(&self) -> Vec<&str> {
        present([&self.proveedor_nombre, &self.folio_pedido]).collect()
    }
}

/// Installment registered against an account payable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuevoPago {
    pub monto: Decimal,
    pub metodo: MetodoPago,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notas: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esta_vencida() {
        let hoy = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let mut cuenta = CuentaPorPagar {
            proveedor_id: 1,
            monto_total: Decimal::from(500),
            saldo: Decimal::from(200),
            fecha_vencimiento: NaiveDate::from_ymd_opt(2024, 3, 9),
            ..Default::default()
        };
        assert!(cuenta.esta_vencida(hoy));
        assert_eq!(cuenta.pagado(), Decimal::from(300));

        cuenta.saldo = Decimal::ZERO;
        assert!(!cuenta.esta_vencida(hoy));

        cuenta.saldo = Decimal::from(200);
        cuenta.fecha_vencimiento = NaiveDate::from_ymd_opt(2024, 3, 10);
        assert!(!cuenta.esta_vencida(hoy));
    }
}
