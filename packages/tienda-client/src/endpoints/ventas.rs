use tienda_core::models::{Devolucion, NuevaVenta, Venta};

use crate::client::ApiClient;
use crate::error::Result;

impl ApiClient {
    /// Register a sale. `referencia` lets the server drop a duplicate submit.
    pub async fn create_sale(&self, venta: &NuevaVenta) -> Result<Venta> {
        let created: Venta = self.post("/ventas", venta).await?;
        tracing::info!(
            referencia = %venta.referencia,
            folio = created.folio.as_deref().unwrap_or("-"),
            "sale registered"
        );
        Ok(created)
    }

    pub async fn cancel_sale(&self, id: i64) -> Result<Venta> {
        self.post_action(&format!("/ventas/{}/cancelar", id)).await
    }

    pub async fn create_return(&self, devolucion: &Devolucion) -> Result<Devolucion> {
        self.post("/devoluciones", devolucion).await
    }
}
