//! REST client for the tienda backend.
//!
//! One [`ApiClient`] per session: it carries the base URL and the bearer
//! token and maps every non-success answer into an [`ApiError`] whose
//! [`ApiError::user_message`] is what the screens show.
//!
//! # Example
//!
//! ```rust,ignore
//! use tienda_client::{ApiClient, ClientConfig};
//! use tienda_core::listing::ListQuery;
//! use tienda_core::models::Producto;
//!
//! let client = ApiClient::from_config(&ClientConfig::from_env()?)?.with_token(token);
//!
//! let page = client.list_page::<Producto>(&ListQuery::page(1).with_search("arroz")).await?;
//! for producto in &page.items {
//!     println!("{} {}", producto.nombre, producto.precio_venta);
//! }
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod resource;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use endpoints::{ReportRows, MAX_POLL_FAILURES};
pub use error::{ApiError, Result, GENERIC_MESSAGE};
pub use resource::Resource;
