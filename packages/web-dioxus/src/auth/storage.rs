//! Token persistence in the browser's localStorage

use tienda_core::session::TokenStore;

const TOKEN_KEY: &str = "tienda_token";

/// Keeps the session token under `tienda_token` so a reload stays logged in.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageTokenStore;

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        storage()?.get_item(TOKEN_KEY).ok()?
    }

    fn save(&self, token: &str) {
        let Some(storage) = storage() else {
            tracing::warn!("localStorage unavailable, session will not survive a reload");
            return;
        };
        if storage.set_item(TOKEN_KEY, token).is_err() {
            tracing::warn!("failed to persist session token");
        }
    }

    fn clear(&self) {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}
