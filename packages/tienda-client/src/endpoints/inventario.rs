use tienda_core::models::{Lote, Pedido};

use crate::client::ApiClient;
use crate::error::Result;

impl ApiClient {
    /// Lots of one product, for the lot manager dialog.
    pub async fn product_lots(&self, producto_id: i64) -> Result<Vec<Lote>> {
        self.list_all(&format!("/productos/{}/lotes", producto_id)).await
    }

    /// Mark a purchase order as received; the server adds its items to stock.
    pub async fn receive_order(&self, id: i64) -> Result<Pedido> {
        let pedido = self.post_action(&format!("/pedidos/{}/recibir", id)).await?;
        tracing::info!(pedido_id = id, "purchase order received");
        Ok(pedido)
    }
}
