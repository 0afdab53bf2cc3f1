use tienda_core::models::{CuentaPorPagar, NuevoPago};

use crate::client::ApiClient;
use crate::error::Result;

impl ApiClient {
    /// Register an installment and get the account back with its new balance.
    pub async fn register_payment(&self, cuenta_id: i64, pago: &NuevoPago) -> Result<CuentaPorPagar> {
        let cuenta: CuentaPorPagar = self
            .post(&format!("/cuentas-por-pagar/{}/pagos", cuenta_id), pago)
            .await?;
        tracing::info!(cuenta_id, saldo = %cuenta.saldo, "payment registered");
        Ok(cuenta)
    }
}
