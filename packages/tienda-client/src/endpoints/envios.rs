use tienda_core::models::{CambioEstadoEnvio, Envio, EstadoEnvio};

use crate::client::ApiClient;
use crate::error::Result;

impl ApiClient {
    pub async fn set_shipment_status(&self, id: i64, estado: EstadoEnvio) -> Result<Envio> {
        self.put(&format!("/envios/{}/estado", id), &CambioEstadoEnvio { estado })
            .await
    }
}
