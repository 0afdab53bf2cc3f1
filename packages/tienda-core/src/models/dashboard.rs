use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Resumen {
    #[serde(default)]
    pub ventas_hoy: Decimal,
    #[serde(default)]
    pub numero_ventas_hoy: u32,
    #[serde(default)]
    pub productos_stock_bajo: u32,
    #[serde(default)]
    pub cuentas_por_vencer: u32,
    #[serde(default)]
    pub gastos_mes: Decimal,
}

/// Badge counters refreshed in the navigation shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContadoresNotificacion {
    #[serde(default)]
    pub autorizaciones_pendientes: u32,
    #[serde(default)]
    pub stock_bajo: u32,
    #[serde(default)]
    pub lotes_por_vencer: u32,
    #[serde(default)]
    pub cuentas_vencidas: u32,
}

impl ContadoresNotificacion {
    pub fn total(&self) -> u32 {
        self.autorizaciones_pendientes + self.stock_bajo + self.lotes_por_vencer + self.cuentas_vencidas
    }
}
