//! Database backups

use dioxus::prelude::*;

use tienda_core::models::Respaldo;

use super::PageHeader;
use crate::auth::use_auth;
use crate::components::{EmptyState, ErrorBanner, ErrorPanel, LoadingSpinner, SuccessBanner, BTN_LINK, TD, TH};
use crate::download::save_file;
use crate::hooks::use_api;

#[component]
pub fn RespaldosPage() -> Element {
    let auth = use_auth();
    let mut respaldos = use_api(|client| async move { client.backups().await });

    let mut creating = use_signal(|| false);
    let mut downloading = use_signal(|| None::<String>);
    let mut error = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<String>);

    let crear = move |_| {
        if creating() {
            return;
        }
        spawn(async move {
            creating.set(true);
            error.set(None);
            match auth.client().create_backup().await {
                Ok(respaldo) => {
                    notice.set(Some(format!("Respaldo {} creado", respaldo.nombre)));
                    respaldos.restart();
                }
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            creating.set(false);
        });
    };

    let descargar = move |respaldo: Respaldo| {
        spawn(async move {
            downloading.set(Some(respaldo.nombre.clone()));
            match auth.client().download_backup(&respaldo.nombre).await {
                Ok(bytes) => {
                    if let Err(e) = save_file(&bytes, &respaldo.nombre, "application/octet-stream") {
                        tracing::warn!(error = %e, "backup download failed");
                        error.set(Some("No se pudo descargar el archivo".to_string()));
                    }
                }
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            downloading.set(None);
        });
    };

    rsx! {
        div {
            PageHeader {
                title: "Respaldos",
                action: { if creating() { "Creando respaldo..." } else { "Crear respaldo" } },
                on_action: crear,
            }

            if let Some(message) = notice() {
                SuccessBanner { message, on_dismiss: move |_| notice.set(None) }
            }
            if let Some(message) = error() {
                ErrorBanner { message, on_dismiss: move |_| error.set(None) }
            }

            match &*respaldos.read_unchecked() {
                Some(Ok(items)) if items.is_empty() => rsx! {
                    EmptyState { message: "Aún no hay respaldos." }
                },
                Some(Ok(items)) => rsx! {
                    div {
                        class: "bg-white rounded-lg shadow-sm border border-gray-200 overflow-x-auto",
                        table {
                            class: "min-w-full divide-y divide-gray-200",
                            thead {
                                class: "bg-gray-50",
                                tr {
                                    th { class: TH, "Archivo" }
                                    th { class: TH, "Creado" }
                                    th { class: TH, "Tamaño" }
                                    th { class: TH }
                                }
                            }
                            tbody {
                                class: "divide-y divide-gray-100",
                                for respaldo in items.iter().cloned() {
                                    tr {
                                        key: "{respaldo.nombre}",
                                        class: "hover:bg-gray-50",
                                        td { class: "{TD} font-mono text-gray-900", "{respaldo.nombre}" }
                                        td { class: TD, {respaldo.creado.clone().unwrap_or_default()} }
                                        td { class: TD, {respaldo.tamano_legible()} }
                                        td {
                                            class: "{TD} text-right",
                                            button {
                                                class: BTN_LINK,
                                                disabled: downloading.read().as_deref() == Some(respaldo.nombre.as_str()),
                                                onclick: {
                                                    let r = respaldo.clone();
                                                    move |_| descargar(r.clone())
                                                },
                                                "Descargar"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                Some(Err(e)) => rsx! {
                    ErrorPanel { message: e.user_message(), on_retry: move |_| respaldos.restart() }
                },
                None => rsx! { LoadingSpinner {} },
            }
        }
    }
}
