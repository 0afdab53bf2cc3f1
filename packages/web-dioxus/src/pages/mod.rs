//! Page components

mod autorizaciones;
mod clientes;
mod configuracion;
mod cuentas_por_pagar;
mod dashboard;
mod descuentos;
mod devoluciones;
mod envios;
mod gastos_fijos;
mod historial_ventas;
mod login;
mod not_found;
mod pedidos;
mod productos;
mod proveedores;
mod reportes;
mod respaldos;
mod usuarios;
mod ventas;

pub use autorizaciones::AutorizacionesPage;
pub use clientes::ClientesPage;
pub use configuracion::ConfiguracionPage;
pub use cuentas_por_pagar::CuentasPorPagarPage;
pub use dashboard::DashboardPage;
pub use descuentos::DescuentosPage;
pub use devoluciones::DevolucionesPage;
pub use envios::EnviosPage;
pub use gastos_fijos::GastosFijosPage;
pub use historial_ventas::HistorialVentasPage;
pub use login::LoginPage;
pub use not_found::PageNotFound;
pub use pedidos::PedidosPage;
pub use productos::ProductosPage;
pub use proveedores::ProveedoresPage;
pub use reportes::ReportesPage;
pub use respaldos::RespaldosPage;
pub use usuarios::UsuariosPage;
pub use ventas::VentasPage;

use dioxus::prelude::*;

/// Title row with an optional primary action.
#[component]
pub fn PageHeader(
    title: &'static str,
    action: Option<&'static str>,
    on_action: Option<EventHandler<()>>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "flex items-center justify-between mb-6",
            h1 { class: "text-2xl font-bold text-gray-900", "{title}" }
            div {
                class: "flex items-center gap-3",
                {children}
                if let (Some(label), Some(handler)) = (action, on_action) {
                    button {
                        class: crate::components::BTN_PRIMARY,
                        onclick: move |_| handler.call(()),
                        "{label}"
                    }
                }
            }
        }
    }
}

/// Label and amount in a totals list.
#[component]
pub fn TotalLine(label: &'static str, value: String, #[props(default)] strong: bool) -> Element {
    rsx! {
        div {
            class: if strong { "flex justify-between text-base font-bold text-gray-900" } else { "flex justify-between text-gray-600" },
            dt { "{label}" }
            dd { "{value}" }
        }
    }
}
