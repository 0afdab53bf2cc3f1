//! Tienda - Dioxus web front-end for the POS and inventory backend
//!
//! A client-side application: every screen talks to the REST API
//! configured at build time through `TIENDA_API_URL` (default `/api`).
//!
//! ## Running
//!
//! Development (with hot reload):
//! ```bash
//! TIENDA_API_URL=http://localhost:3000/api dx serve --platform web
//! ```
//!
//! Production build:
//! ```bash
//! dx build --release --platform web
//! ```

#![allow(non_snake_case)]

mod api;
mod app;
mod auth;
mod components;
mod download;
mod hooks;
mod pages;
mod routes;
mod state;

/// Log filter from `RUST_LOG`, defaulting to `info`.
#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() -> anyhow::Result<()> {
    use anyhow::Context;
    use tracing_subscriber::EnvFilter;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new("info").context("invalid default log filter")?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))
}

fn main() {
    // The browser build gets its subscriber from the Dioxus launcher.
    #[cfg(not(target_arch = "wasm32"))]
    if let Err(e) = init_tracing() {
        eprintln!("{:#}", e);
    }

    tracing::info!(api_url = %api::config().api_url, "starting tienda web");
    dioxus::launch(app::App);
}
