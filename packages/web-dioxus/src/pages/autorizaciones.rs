//! Discount authorization queue
//!
//! Cashiers request discounts above their limit from the sales screen; the
//! requests wait here until a supervisor or admin resolves them. The list
//! follows the pending counter refreshed by the layout.

use dioxus::prelude::*;

use tienda_core::models::SolicitudAutorizacion;
use tienda_core::money::format_money;

use super::PageHeader;
use crate::auth::use_auth;
use crate::components::{
    EmptyState, ErrorBanner, ErrorPanel, LoadingSpinner, SuccessBanner, BTN_DANGER, BTN_PRIMARY,
    TD, TH,
};
use crate::hooks::use_api;
use crate::state::use_app_state;

#[component]
pub fn AutorizacionesPage() -> Element {
    let auth = use_auth();
    let state = use_app_state();
    let mut reload = use_signal(|| 0u32);
    let mut resolving = use_signal(|| None::<i64>);
    let mut error = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<String>);

    let mut solicitudes = use_api(move |client| {
        let _ = state.contadores.read().autorizaciones_pendientes;
        let _ = reload();
        async move { client.pending_authorizations().await }
    });

    let puede_resolver = auth.rol().puede_autorizar();

    let resolve = move |id: i64, aprobar: bool| {
        if resolving.peek().is_some() {
            return;
        }
        spawn(async move {
            resolving.set(Some(id));
            let client = auth.client();
            let result = if aprobar {
                client.approve_authorization(id).await
            } else {
                client.reject_authorization(id).await
            };
            match result {
                Ok(solicitud) => {
                    tracing::info!(id, estado = solicitud.estado.label(), "authorization resolved");
                    notice.set(Some(format!(
                        "Solicitud {} {}",
                        id,
                        solicitud.estado.label().to_lowercase()
                    )));
                    *reload.write() += 1;
                }
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            resolving.set(None);
        });
    };

    let simbolo = state.simbolo();

    rsx! {
        div {
            PageHeader { title: "Autorizaciones de descuento",
                button {
                    class: crate::components::BTN_SECONDARY,
                    onclick: move |_| solicitudes.restart(),
                    "Actualizar"
                }
            }

            if !puede_resolver {
                p {
                    class: "text-sm text-gray-500 -mt-4 mb-6",
                    "Solo un supervisor o administrador puede aprobar o rechazar solicitudes."
                }
            }
            if let Some(message) = notice() {
                SuccessBanner { message, on_dismiss: move |_| notice.set(None) }
            }
            if let Some(message) = error() {
                ErrorBanner { message, on_dismiss: move |_| error.set(None) }
            }

            match &*solicitudes.read_unchecked() {
                Some(Ok(items)) if items.is_empty() => rsx! {
                    EmptyState { message: "No hay solicitudes pendientes." }
                },
                Some(Ok(items)) => rsx! {
                    div {
                        class: "bg-white rounded-lg shadow-sm border border-gray-200 overflow-x-auto",
                        table {
                            class: "min-w-full divide-y divide-gray-200",
                            thead {
                                class: "bg-gray-50",
                                tr {
                                    th { class: TH, "Fecha" }
                                    th { class: TH, "Solicitado por" }
                                    th { class: TH, "Subtotal" }
                                    th { class: TH, "Descuento" }
                                    th { class: TH, "Motivo" }
                                    th { class: TH }
                                }
                            }
                            tbody {
                                class: "divide-y divide-gray-100",
                                for solicitud in items.iter() {
                                    SolicitudRow {
                                        key: "{solicitud.id}",
                                        solicitud: solicitud.clone(),
                                        simbolo: simbolo.clone(),
                                        puede_resolver,
                                        busy: resolving() == Some(solicitud.id),
                                        on_resolve: move |(id, aprobar)| resolve(id, aprobar),
                                    }
                                }
                            }
                        }
                    }
                },
                Some(Err(e)) => rsx! {
                    ErrorPanel { message: e.user_message(), on_retry: move |_| solicitudes.restart() }
                },
                None => rsx! { LoadingSpinner {} },
            }
        }
    }
}

#[component]
fn SolicitudRow(
    solicitud: SolicitudAutorizacion,
    simbolo: String,
    puede_resolver: bool,
    busy: bool,
    on_resolve: EventHandler<(i64, bool)>,
) -> Element {
    let id = solicitud.id;

    rsx! {
        tr {
            class: "hover:bg-gray-50",
            td { class: TD, {solicitud.fecha.clone().unwrap_or_default()} }
            td { class: "{TD} font-medium text-gray-900", {solicitud.solicitado_por.clone().unwrap_or_default()} }
            td { class: TD, {format_money(solicitud.subtotal, &simbolo)} }
            td {
                class: TD,
                "{solicitud.porcentaje}% ("
                {format_money(solicitud.monto, &simbolo)}
                ")"
            }
            td { class: TD, {solicitud.motivo.clone().unwrap_or_default()} }
            td {
                class: "{TD} text-right space-x-2 whitespace-nowrap",
                if puede_resolver {
                    button {
                        class: BTN_PRIMARY,
                        disabled: busy,
                        onclick: move |_| on_resolve.call((id, true)),
                        "Aprobar"
                    }
                    button {
                        class: BTN_DANGER,
                        disabled: busy,
                        onclick: move |_| on_resolve.call((id, false)),
                        "Rechazar"
                    }
                }
            }
        }
    }
}
