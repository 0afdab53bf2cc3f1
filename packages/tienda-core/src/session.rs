//! Authenticated session container.
//!
//! The token is persisted by a [`TokenStore`] (browser local storage in the
//! web app). On startup the user is derived from the token's claims so the
//! shell can render immediately; the backend stays the judge of validity
//! and a 401 clears the session.

use std::sync::{Arc, Mutex};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::models::{LoginResponse, Rol, Usuario};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid token format")]
    MalformedToken,

    #[error("Failed to decode token claims: {0}")]
    InvalidClaims(String),

    #[error("Token expired")]
    Expired,
}

/// Where the bearer token survives page reloads.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// In-memory store, for tests and non-browser targets.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Arc<Mutex<Option<String>>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().ok().and_then(|t| t.clone())
    }

    fn save(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    pub username: String,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub rol: Rol,
    /// Expiry as seconds since the epoch
    #[serde(default)]
    pub exp: Option<i64>,
}

impl Claims {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp.is_some_and(|exp| exp <= now.timestamp())
    }

    fn into_usuario(self) -> Usuario {
        Usuario {
            id: self.sub.as_deref().and_then(|s| s.parse().ok()),
            nombre: self.nombre.unwrap_or_else(|| self.username.clone()),
            username: self.username,
            rol: self.rol,
            activo: true,
            password: None,
        }
    }
}

/// Read the payload of a JWT without verifying its signature.
pub fn decode_claims(token: &str) -> Result<Claims, SessionError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(SessionError::MalformedToken);
    }

    let payload = URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| SessionError::InvalidClaims(e.to_string()))?;

    serde_json::from_slice(&payload).map_err(|e| SessionError::InvalidClaims(e.to_string()))
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    token: Option<String>,
    usuario: Option<Usuario>,
}

impl Session {
    /// Rebuild from a persisted token. An unreadable or expired token is
    /// discarded.
    pub fn restore(store: &dyn TokenStore, now: DateTime<Utc>) -> Self {
        let Some(token) = store.load() else {
            return Self::default();
        };

        match decode_claims(&token) {
            Ok(claims) if !claims.is_expired(now) => Self {
                usuario: Some(claims.into_usuario()),
                token: Some(token),
            },
            Ok(_) => {
                tracing::info!("stored token expired, clearing session");
                store.clear();
                Self::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable stored token");
                store.clear();
                Self::default()
            }
        }
    }

    pub fn login(&mut self, store: &dyn TokenStore, response: LoginResponse) {
        tracing::info!(username = %response.usuario.username, "logged in");
        store.save(&response.token);
        self.token = Some(response.token);
        self.usuario = Some(response.usuario);
    }

    pub fn logout(&mut self, store: &dyn TokenStore) {
        if let Some(usuario) = &self.usuario {
            tracing::info!(username = %usuario.username, "logged out");
        }
        store.clear();
        self.token = None;
        self.usuario = None;
    }

    /// Replace the claims-derived user with the server's record.
    pub fn refresh_user(&mut self, usuario: Usuario) {
        if self.token.is_some() {
            self.usuario = Some(usuario);
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.usuario.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn usuario(&self) -> Option<&Usuario> {
        self.usuario.as_ref()
    }

    pub fn rol(&self) -> Option<Rol> {
        self.usuario.as_ref().map(|u| u.rol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{}.{}.firma", header, body)
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_restore_from_valid_token() {
        let store = MemoryTokenStore::default();
        store.save(&token_with(serde_json::json!({
            "sub": "12",
            "username": "maria",
            "nombre": "María López",
            "rol": "supervisor",
            "exp": 1_800_000_000i64
        })));

        let session = Session::restore(&store, now());
        assert!(session.is_authenticated());
        let usuario = session.usuario().unwrap();
        assert_eq!(usuario.id, Some(12));
        assert_eq!(usuario.nombre, "María López");
        assert_eq!(session.rol(), Some(Rol::Supervisor));
    }

    #[test]
    fn test_restore_discards_expired_token() {
        let store = MemoryTokenStore::default();
        store.save(&token_with(serde_json::json!({
            "username": "maria",
            "exp": 1_600_000_000i64
        })));

        let session = Session::restore(&store, now());
        assert!(!session.is_authenticated());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_restore_discards_garbage() {
        let store = MemoryTokenStore::default();
        store.save("not-a-jwt");
        assert!(!Session::restore(&store, now()).is_authenticated());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_restore_without_token() {
        let store = MemoryTokenStore::default();
        assert_eq!(Session::restore(&store, now()), Session::default());
    }

    #[test]
    fn test_login_then_logout() {
        let store = MemoryTokenStore::default();
        let mut session = Session::default();

        session.login(
            &store,
            LoginResponse {
                token: "t.o.k".into(),
                usuario: Usuario {
                    id: Some(1),
                    username: "admin".into(),
                    nombre: "Admin".into(),
                    rol: Rol::Admin,
                    activo: true,
                    password: None,
                },
            },
        );
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("t.o.k"));
        assert_eq!(store.load().as_deref(), Some("t.o.k"));

        session.logout(&store);
        assert!(!session.is_authenticated());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_decode_claims_errors() {
        assert_eq!(decode_claims("a.b"), Err(SessionError::MalformedToken));
        assert!(matches!(decode_claims("a.!!!.c"), Err(SessionError::InvalidClaims(_))));
    }
}
