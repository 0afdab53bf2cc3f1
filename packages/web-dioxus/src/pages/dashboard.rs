//! Home screen with the day's figures

use dioxus::prelude::*;

use tienda_core::money::format_money;

use crate::auth::use_auth;
use crate::components::{ErrorPanel, LoadingSpinner};
use crate::hooks::use_api;
use crate::routes::Route;
use crate::state::use_app_state;

#[component]
pub fn DashboardPage() -> Element {
    let auth = use_auth();
    let state = use_app_state();
    let mut resumen = use_api(|client| async move { client.dashboard().await });

    let simbolo = state.simbolo();
    let contadores = *state.contadores.read();
    let puede_autorizar = auth.rol().puede_autorizar();
    let saludo = auth
        .usuario()
        .map(|u| format!("Hola, {}", u.nombre))
        .unwrap_or_else(|| "Inicio".to_string());

    rsx! {
        div {
            h1 { class: "text-2xl font-bold text-gray-900 mb-6", "{saludo}" }

            match &*resumen.read_unchecked() {
                Some(Ok(r)) => rsx! {
                    div {
                        class: "grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4 mb-8",
                        StatCard { label: "Ventas de hoy", value: format_money(r.ventas_hoy, &simbolo) }
                        StatCard { label: "Número de ventas", value: r.numero_ventas_hoy.to_string() }
                        StatCard {
                            label: "Productos con stock bajo",
                            value: r.productos_stock_bajo.to_string(),
                            alert: r.productos_stock_bajo > 0,
                        }
                        if puede_autorizar {
                            StatCard { label: "Gastos del mes", value: format_money(r.gastos_mes, &simbolo) }
                        } else {
                            StatCard { label: "Cuentas por vencer", value: r.cuentas_por_vencer.to_string() }
                        }
                    }
                },
                Some(Err(e)) => rsx! {
                    div {
                        class: "mb-8",
                        ErrorPanel { message: e.user_message(), on_retry: move |_| resumen.restart() }
                    }
                },
                None => rsx! { LoadingSpinner {} },
            }

            div {
                class: "grid grid-cols-1 lg:grid-cols-2 gap-6",
                div {
                    class: "bg-white rounded-lg shadow-sm border border-gray-200 p-6",
                    h2 { class: "text-lg font-semibold text-gray-900 mb-4", "Alertas" }
                    ul {
                        class: "space-y-3 text-sm",
                        AlertRow { label: "Productos con stock bajo", count: contadores.stock_bajo, to: Route::ProductosPage {} }
                        AlertRow { label: "Lotes por vencer", count: contadores.lotes_por_vencer, to: Route::ProductosPage {} }
                        if puede_autorizar {
                            AlertRow {
                                label: "Autorizaciones pendientes",
                                count: contadores.autorizaciones_pendientes,
                                to: Route::AutorizacionesPage {},
                            }
                            AlertRow {
                                label: "Cuentas por pagar vencidas",
                                count: contadores.cuentas_vencidas,
                                to: Route::CuentasPorPagarPage {},
                            }
                        }
                    }
                }
                div {
                    class: "bg-white rounded-lg shadow-sm border border-gray-200 p-6",
                    h2 { class: "text-lg font-semibold text-gray-900 mb-4", "Accesos rápidos" }
                    div {
                        class: "grid grid-cols-2 gap-3",
                        QuickLink { to: Route::VentasPage {}, label: "Nueva venta" }
                        QuickLink { to: Route::ProductosPage {}, label: "Productos" }
                        QuickLink { to: Route::HistorialVentasPage {}, label: "Historial de ventas" }
                        QuickLink { to: Route::EnviosPage {}, label: "Envíos" }
                    }
                }
            }
        }
    }
}

#[component]
fn StatCard(label: &'static str, value: String, #[props(default)] alert: bool) -> Element {
    rsx! {
        div {
            class: "bg-white rounded-lg shadow-sm border border-gray-200 p-6",
            p { class: "text-sm text-gray-500", "{label}" }
            p {
                class: if alert { "text-3xl font-bold text-red-600 mt-1" } else { "text-3xl font-bold text-gray-900 mt-1" },
                "{value}"
            }
        }
    }
}

#[component]
fn AlertRow(label: &'static str, count: u32, to: Route) -> Element {
    rsx! {
        li {
            class: "flex items-center justify-between",
            Link { to, class: "text-gray-700 hover:text-amber-700", "{label}" }
            span {
                class: if count > 0 {
                    "px-2 py-0.5 rounded-full text-xs font-semibold bg-red-100 text-red-700"
                } else {
                    "px-2 py-0.5 rounded-full text-xs font-semibold bg-gray-100 text-gray-500"
                },
                "{count}"
            }
        }
    }
}

#[component]
fn QuickLink(to: Route, label: &'static str) -> Element {
    rsx! {
        Link {
            to,
            class: "block px-4 py-3 rounded-lg border border-gray-200 text-sm font-medium text-gray-700 hover:border-amber-300 hover:bg-amber-50",
            "{label}"
        }
    }
}
