//! Route definitions for the application

use dioxus::prelude::*;

use crate::components::AppLayout;
use crate::pages::{
    AutorizacionesPage, ClientesPage, ConfiguracionPage, CuentasPorPagarPage, DashboardPage,
    DescuentosPage, DevolucionesPage, EnviosPage, GastosFijosPage, HistorialVentasPage, LoginPage,
    PageNotFound, PedidosPage, ProductosPage, ProveedoresPage, ReportesPage, RespaldosPage,
    UsuariosPage, VentasPage,
};

/// All application routes. Paths match `tienda_core::routing::SECTIONS`.
#[derive(Clone, Debug, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    #[route("/login")]
    LoginPage {},

    #[layout(AppLayout)]
        #[route("/")]
        DashboardPage {},

        #[route("/ventas")]
        VentasPage {},

        #[route("/historial-ventas")]
        HistorialVentasPage {},

        #[route("/devoluciones")]
        DevolucionesPage {},

        #[route("/productos")]
        ProductosPage {},

        #[route("/clientes")]
        ClientesPage {},

        #[route("/envios")]
        EnviosPage {},

        #[route("/proveedores")]
        ProveedoresPage {},

        #[route("/pedidos")]
        PedidosPage {},

        #[route("/descuentos")]
        DescuentosPage {},

        #[route("/autorizaciones")]
        AutorizacionesPage {},

        #[route("/gastos-fijos")]
        GastosFijosPage {},

        #[route("/cuentas-por-pagar")]
        CuentasPorPagarPage {},

        #[route("/reportes")]
        ReportesPage {},

        #[route("/usuarios")]
        UsuariosPage {},

        #[route("/configuracion")]
        ConfiguracionPage {},

        #[route("/respaldos")]
        RespaldosPage {},
    #[end_layout]

    #[route("/:..segments")]
    PageNotFound { segments: Vec<String> },
}

impl Route {
    /// Route for a path taken from the section table, if it is one of ours.
    pub fn from_path(path: &str) -> Option<Route> {
        path.parse::<Route>()
            .ok()
            .filter(|route| !matches!(route, Route::PageNotFound { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tienda_core::routing::{SECTIONS, HOME_PATH, LOGIN_PATH};

    #[test]
    fn test_every_section_has_a_route() {
        for section in SECTIONS {
            let route = Route::from_path(section.path);
            assert!(route.is_some(), "no route for {}", section.path);
            assert_eq!(route.unwrap().to_string(), section.path);
        }
    }

    #[test]
    fn test_fixed_paths() {
        assert_eq!(Route::from_path(LOGIN_PATH), Some(Route::LoginPage {}));
        assert_eq!(Route::from_path(HOME_PATH), Some(Route::DashboardPage {}));
        assert_eq!(Route::from_path("/no-existe"), None);
    }
}
