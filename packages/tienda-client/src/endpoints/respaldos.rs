use tienda_core::models::Respaldo;

use crate::client::ApiClient;
use crate::error::Result;

impl ApiClient {
    pub async fn backups(&self) -> Result<Vec<Respaldo>> {
        self.list_all("/backup").await
    }

    pub async fn create_backup(&self) -> Result<Respaldo> {
        let respaldo: Respaldo = self.post_action("/backup").await?;
        tracing::info!(nombre = %respaldo.nombre, "backup created");
        Ok(respaldo)
    }

    /// Raw backup file.
    pub async fn download_backup(&self, nombre: &str) -> Result<Vec<u8>> {
        self.get_bytes(&format!("/backup/descargar/{}", urlencoding::encode(nombre)))
            .await
    }
}
