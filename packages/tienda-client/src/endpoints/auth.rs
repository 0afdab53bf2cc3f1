use tienda_core::models::{LoginRequest, LoginResponse, Usuario};

use crate::client::ApiClient;
use crate::error::Result;

impl ApiClient {
    /// `POST /auth/login`. The returned token is not stored on this client;
    /// the caller owns the session.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let response: LoginResponse = self.post("/auth/login", request).await?;
        tracing::info!(username = %response.usuario.username, "login accepted");
        Ok(response)
    }

    pub async fn current_user(&self) -> Result<Usuario> {
        self.get("/auth/me").await
    }
}
