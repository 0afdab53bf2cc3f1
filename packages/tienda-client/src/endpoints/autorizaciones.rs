use std::future::Future;
use std::time::Duration;

use tienda_core::models::{NuevaSolicitudAutorizacion, SolicitudAutorizacion};
use tienda_core::polling::PollSchedule;

use crate::client::ApiClient;
use crate::error::{ApiError, Result};

/// Consecutive failed polls after which waiting gives up.
pub const MAX_POLL_FAILURES: u32 = 5;

impl ApiClient {
    pub async fn request_authorization(
        &self,
        solicitud: &NuevaSolicitudAutorizacion,
    ) -> Result<SolicitudAutorizacion> {
        let created: SolicitudAutorizacion = self.post("/autorizaciones", solicitud).await?;
        tracing::info!(
            solicitud_id = created.id,
            porcentaje = %solicitud.porcentaje,
            "discount authorization requested"
        );
        Ok(created)
    }

    pub async fn authorization(&self, id: i64) -> Result<SolicitudAutorizacion> {
        self.get(&format!("/autorizaciones/{}", id)).await
    }

    pub async fn pending_authorizations(&self) -> Result<Vec<SolicitudAutorizacion>> {
        let response: tienda_core::listing::ListResponse<SolicitudAutorizacion> = self
            .get_with_query("/autorizaciones", &[("estado", "pendiente")])
            .await?;
        Ok(response.into_items())
    }

    pub async fn approve_authorization(&self, id: i64) -> Result<SolicitudAutorizacion> {
        self.post_action(&format!("/autorizaciones/{}/aprobar", id)).await
    }

    pub async fn reject_authorization(&self, id: i64) -> Result<SolicitudAutorizacion> {
        self.post_action(&format!("/autorizaciones/{}/rechazar", id)).await
    }

    /// Poll a request until it is approved or rejected.
    ///
    /// `sleep` waits between polls (a browser timer in the web app). Dropping
    /// the returned future stops the polling. A 401 ends immediately; other
    /// failures back off and end after [`MAX_POLL_FAILURES`] in a row.
    pub async fn poll_authorization<S, F>(&self, id: i64, mut sleep: S) -> Result<SolicitudAutorizacion>
    where
        S: FnMut(Duration) -> F,
        F: Future<Output = ()>,
    {
        let mut schedule = PollSchedule::authorization();
        loop {
            sleep(schedule.next_delay()).await;

            match self.authorization(id).await {
                Ok(solicitud) if solicitud.estado.is_resolved() => {
                    tracing::info!(solicitud_id = id, estado = solicitud.estado.label(), "authorization resolved");
                    return Ok(solicitud);
                }
                Ok(_) => schedule.record_success(),
                Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized),
                Err(err) => {
                    schedule.record_failure();
                    if schedule.failures() >= MAX_POLL_FAILURES {
                        tracing::warn!(solicitud_id = id, error = %err, "giving up on authorization polling");
                        return Err(err);
                    }
                }
            }
        }
    }
}
