//! Shapes mirrored from the backend's JSON.
//!
//! Money is `Decimal`, which reads both decimal strings and JSON numbers.

mod autorizacion;
mod busqueda;
mod cliente;
mod configuracion;
mod cuenta;
mod dashboard;
mod descuento;
mod envio;
mod gasto;
mod pedido;
mod producto;
mod proveedor;
mod reporte;
mod respaldo;
mod usuario;
mod venta;

pub use autorizacion::*;
pub use busqueda::*;
pub use cliente::*;
pub use configuracion::*;
pub use cuenta::*;
pub use dashboard::*;
pub use descuento::*;
pub use envio::*;
pub use gasto::*;
pub use pedido::*;
pub use producto::*;
pub use proveedor::*;
pub use reporte::*;
pub use respaldo::*;
pub use usuario::*;
pub use venta::*;

pub(crate) fn default_true() -> bool {
    true
}

/// Optional text fields as `&str`, skipping the missing ones.
pub(crate) fn present<'a, const N: usize>(
    fields: [&'a Option<String>; N],
) -> impl Iterator<Item = &'a str> {
    fields.into_iter().filter_map(Option::as_deref)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::Searchable;

    #[test]
    fn test_present_skips_missing_fields() {
        let a = Some("uno".to_string());
        let b = None;
        let c = Some("tres".to_string());
        assert_eq!(present([&a, &b, &c]).collect::<Vec<_>>(), vec!["uno", "tres"]);
    }

    #[test]
    fn test_search_fields_borrow_from_the_row() {
        let regla = DescuentoVolumen {
            producto_nombre: Some("Arroz".into()),
            ..Default::default()
        };
        assert_eq!(regla.search_fields(), vec!["Arroz"]);
    }
}
