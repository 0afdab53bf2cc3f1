//! Authenticated application shell

use dioxus::prelude::*;

use tienda_core::polling::PollSchedule;
use tienda_core::routing::{can_open, guard, Guard};

use super::{LoadingSpinner, Redirect, SearchOverlay, SideNav, TopBar};
use crate::auth::use_auth;
use crate::hooks::use_polling;
use crate::routes::Route;
use crate::state::AppState;

/// Layout for every protected screen: guard, navigation, background
/// refresh of the badge counters.
#[component]
pub fn AppLayout() -> Element {
    let auth = use_auth();
    let route = use_route::<Route>();
    let state = use_context_provider(AppState::new);
    let mut config_loaded = use_signal(|| false);

    use_hook(move || {
        if !auth.is_authenticated() {
            return;
        }
        spawn(async move {
            match auth.client().configuration().await {
                Ok(configuracion) => state.set_configuracion(configuracion),
                Err(e) => {
                    tracing::warn!(error = %e, "store configuration unavailable, using defaults");
                    auth.error_message(&e);
                }
            }
            config_loaded.set(true);
        });
    });

    use_polling(PollSchedule::notifications(), move || async move {
        if !auth.session.peek().is_authenticated() {
            return Ok(());
        }
        let contadores = auth.client().notification_counters().await?;
        state.set_contadores(contadores);
        Ok(())
    });

    let path = route.to_string();
    if let Guard::Redirect(to) = guard(&path, auth.is_authenticated()) {
        return rsx! {
            Redirect { to: Route::from_path(to).unwrap_or(Route::LoginPage {}) }
        };
    }

    if !config_loaded() {
        return rsx! {
            div {
                class: "min-h-screen flex items-center justify-center bg-gray-100",
                LoadingSpinner {}
            }
        };
    }

    let allowed = can_open(&path, auth.rol());

    rsx! {
        div {
            class: "min-h-screen flex bg-gray-100",
            SideNav {}
            div {
                class: "flex-1 flex flex-col min-w-0",
                TopBar {}
                main {
                    class: "p-6",
                    if allowed {
                        Outlet::<Route> {}
                    } else {
                        div {
                            class: "bg-white rounded-lg border border-gray-200 p-12 text-center",
                            h2 { class: "text-lg font-semibold text-gray-900 mb-2", "Acceso restringido" }
                            p { class: "text-gray-500", "Su rol no tiene permiso para abrir esta sección." }
                        }
                    }
                }
            }
            if (state.search_open)() {
                SearchOverlay {}
            }
        }
    }
}
