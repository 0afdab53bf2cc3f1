use tienda_core::models::{busqueda_valida, Configuracion, ContadoresNotificacion, ResultadoBusqueda, Resumen};

use crate::client::ApiClient;
use crate::error::Result;

impl ApiClient {
    pub async fn notification_counters(&self) -> Result<ContadoresNotificacion> {
        self.get("/notificaciones/contadores").await
    }

    pub async fn dashboard(&self) -> Result<Resumen> {
        self.get("/dashboard/resumen").await
    }

    /// Global search. Queries too short to be useful are not sent.
    pub async fn search(&self, q: &str) -> Result<Vec<ResultadoBusqueda>> {
        if !busqueda_valida(q) {
            return Ok(Vec::new());
        }
        self.get_with_query("/busqueda", &[("q", q.trim())]).await
    }

    pub async fn configuration(&self) -> Result<Configuracion> {
        self.get("/configuracion").await
    }

    pub async fn save_configuration(&self, config: &Configuracion) -> Result<Configuracion> {
        let saved = self.put("/configuracion", config).await?;
        tracing::info!("configuration saved");
        Ok(saved)
    }
}
