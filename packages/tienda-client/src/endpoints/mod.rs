//! Endpoints outside the plain CRUD routes.

mod auth;
mod autorizaciones;
mod cuentas;
mod envios;
mod inventario;
mod reportes;
mod respaldos;
mod tienda;
mod ventas;

pub use autorizaciones::MAX_POLL_FAILURES;
pub use reportes::ReportRows;
