//! Session context provider

use chrono::Utc;
use dioxus::prelude::*;

use tienda_client::{ApiClient, ApiError};
use tienda_core::models::{LoginResponse, Rol, Usuario};
use tienda_core::session::Session;

use super::storage::LocalStorageTokenStore;
use crate::api::anonymous_client;

/// Session state shared by every screen.
#[derive(Clone, Copy, PartialEq)]
pub struct AuthContext {
    pub session: Signal<Session>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    pub fn usuario(&self) -> Option<Usuario> {
        self.session.read().usuario().cloned()
    }

    /// Role of the logged-in user; the most restricted role when unknown.
    pub fn rol(&self) -> Rol {
        self.session.read().rol().unwrap_or(Rol::Cajero)
    }

    /// API client carrying the session token. Reading the session here makes
    /// resources that build a client re-run on login and logout.
    pub fn client(&self) -> ApiClient {
        let client = anonymous_client();
        match self.session.read().token() {
            Some(token) => client.with_token(token),
            None => client,
        }
    }

    pub fn login(mut self, response: LoginResponse) {
        tracing::info!(username = %response.usuario.username, "logged in");
        self.session.write().login(&LocalStorageTokenStore, response);
    }

    pub fn logout(mut self) {
        self.session.write().logout(&LocalStorageTokenStore);
    }

    /// Message to show for a failed call. A 401 also ends the session, which
    /// sends the layout back to the login screen.
    pub fn error_message(self, err: &ApiError) -> String {
        if err.is_unauthorized() && self.session.peek().is_authenticated() {
            tracing::warn!("session rejected by the server, logging out");
            self.logout();
        }
        err.user_message()
    }
}

/// Auth provider component that wraps the app
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let session = use_signal(|| Session::restore(&LocalStorageTokenStore, Utc::now()));
    let auth = use_context_provider(|| AuthContext { session });

    // The restored user comes from token claims; replace it with the
    // server's record once.
    use_hook(move || {
        if !auth.session.peek().is_authenticated() {
            return;
        }
        let mut session = auth.session;
        spawn(async move {
            let client = auth.client();
            match client.current_user().await {
                Ok(usuario) => session.write().refresh_user(usuario),
                Err(e) => {
                    auth.error_message(&e);
                }
            }
        });
    });

    children
}

/// Hook to access the auth context
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}
