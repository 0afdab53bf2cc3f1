//! Application navigation

use dioxus::prelude::*;

use tienda_core::models::ContadoresNotificacion;
use tienda_core::routing::sections_for;

use crate::auth::use_auth;
use crate::routes::Route;
use crate::state::use_app_state;

/// Counter shown next to a menu entry.
fn badge_for(path: &str, contadores: &ContadoresNotificacion) -> u32 {
    match path {
        "/autorizaciones" => contadores.autorizaciones_pendientes,
        "/productos" => contadores.stock_bajo + contadores.lotes_por_vencer,
        "/cuentas-por-pagar" => contadores.cuentas_vencidas,
        _ => 0,
    }
}

/// Sidebar with the sections the current role may open.
#[component]
pub fn SideNav() -> Element {
    let auth = use_auth();
    let state = use_app_state();
    let contadores = *state.contadores.read();
    let nombre_tienda = state.configuracion.read().nombre_tienda.clone();

    let entries: Vec<(Route, &'static str, u32)> = sections_for(auth.rol())
        .filter_map(|section| {
            Route::from_path(section.path)
                .map(|route| (route, section.title, badge_for(section.path, &contadores)))
        })
        .collect();

    rsx! {
        aside {
            class: "w-60 shrink-0 bg-white border-r border-gray-200 min-h-screen",
            div {
                class: "px-5 py-4 border-b border-gray-200",
                Link {
                    to: Route::DashboardPage {},
                    class: "text-xl font-bold text-amber-700",
                    "{nombre_tienda}"
                }
            }
            nav {
                class: "p-3 space-y-1",
                for (route, title, badge) in entries {
                    NavLink { key: "{route}", to: route, label: title, badge }
                }
            }
        }
    }
}

#[component]
fn NavLink(to: Route, label: &'static str, badge: u32) -> Element {
    let route = use_route::<Route>();
    let is_active = route == to;

    rsx! {
        Link {
            to: to.clone(),
            class: if is_active {
                "flex items-center justify-between px-3 py-2 rounded-md text-sm font-medium bg-amber-100 text-amber-800"
            } else {
                "flex items-center justify-between px-3 py-2 rounded-md text-sm font-medium text-gray-600 hover:bg-gray-100 hover:text-gray-900"
            },
            span { "{label}" }
            if badge > 0 {
                span {
                    class: "ml-2 px-2 py-0.5 rounded-full text-xs font-semibold bg-red-100 text-red-700",
                    "{badge}"
                }
            }
        }
    }
}

/// Header with global search, notifications total and the user menu.
#[component]
pub fn TopBar() -> Element {
    let auth = use_auth();
    let state = use_app_state();
    let total = state.contadores.read().total();

    let handle_logout = move |_| {
        auth.logout();
    };

    rsx! {
        header {
            class: "bg-white border-b border-gray-200 px-6 py-3 flex items-center justify-between",
            button {
                class: "flex items-center gap-2 w-72 px-3 py-2 text-sm text-gray-500 border border-gray-300 rounded-lg hover:bg-gray-50",
                onclick: move |_| state.open_search(),
                "\u{1F50D} Buscar productos, clientes, ventas..."
            }
            div {
                class: "flex items-center gap-4",
                if total > 0 {
                    span {
                        class: "px-2 py-1 rounded-full text-xs font-semibold bg-red-100 text-red-700",
                        title: "Notificaciones pendientes",
                        "\u{1F514} {total}"
                    }
                }
                if let Some(usuario) = auth.usuario() {
                    div {
                        class: "text-right",
                        p { class: "text-sm font-medium text-gray-900", "{usuario.nombre}" }
                        p { class: "text-xs text-gray-500", {usuario.rol.label()} }
                    }
                }
                button {
                    class: "text-sm text-gray-600 hover:text-gray-900 px-3 py-1.5 rounded hover:bg-gray-100",
                    onclick: handle_logout,
                    "Cerrar sesión"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badges() {
        let contadores = ContadoresNotificacion {
            autorizaciones_pendientes: 2,
            stock_bajo: 3,
            lotes_por_vencer: 1,
            cuentas_vencidas: 4,
        };
        assert_eq!(badge_for("/autorizaciones", &contadores), 2);
        assert_eq!(badge_for("/productos", &contadores), 4);
        assert_eq!(badge_for("/cuentas-por-pagar", &contadores), 4);
        assert_eq!(badge_for("/ventas", &contadores), 0);
    }
}
