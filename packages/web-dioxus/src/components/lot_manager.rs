//! Batches of one product

use dioxus::prelude::*;

use tienda_core::forms::LoteForm;
use tienda_core::models::{EstadoLote, Lote};
use tienda_core::money::{format_money, format_quantity};

use super::{ErrorBanner, LoadingSpinner, Modal, TextField, BTN_LINK, BTN_PRIMARY, TD, TH};
use crate::auth::use_auth;
use crate::hooks::{today, use_api};
use crate::state::use_app_state;

fn estado_class(estado: EstadoLote) -> &'static str {
    match estado {
        EstadoLote::Vigente => "bg-green-100 text-green-800",
        EstadoLote::PorVencer => "bg-yellow-100 text-yellow-800",
        EstadoLote::Vencido => "bg-red-100 text-red-800",
        EstadoLote::SinFecha => "bg-gray-100 text-gray-600",
    }
}

/// Lists a product's batches and registers new ones.
#[component]
pub fn LotManager(producto_id: i64, nombre: String, on_close: EventHandler<()>) -> Element {
    let auth = use_auth();
    let state = use_app_state();
    let mut form = use_signal(LoteForm::default);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let mut lotes = use_api(move |client| async move { client.product_lots(producto_id).await });

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        let lote = match form.read().validate(producto_id) {
            Ok(lote) => lote,
            Err(err) => {
                error.set(Some(err.message));
                return;
            }
        };
        spawn(async move {
            saving.set(true);
            match auth.client().create::<Lote>(&lote).await {
                Ok(_) => {
                    form.set(LoteForm::default());
                    error.set(None);
                    lotes.restart();
                }
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            saving.set(false);
        });
    };

    let handle_delete = move |id: i64| {
        spawn(async move {
            match auth.client().remove::<Lote>(id).await {
                Ok(()) => lotes.restart(),
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
        });
    };

    let hoy = today();
    let simbolo = state.simbolo();

    rsx! {
        Modal {
            title: format!("Lotes de {}", nombre),
            width: "max-w-3xl",
            on_close: move |_| on_close.call(()),

            if let Some(message) = error() {
                ErrorBanner { message, on_dismiss: move |_| error.set(None) }
            }

            match &*lotes.read_unchecked() {
                Some(Ok(items)) if items.is_empty() => rsx! {
                    p { class: "text-sm text-gray-500 mb-4", "Este producto no tiene lotes registrados." }
                },
                Some(Ok(items)) => rsx! {
                    table {
                        class: "min-w-full divide-y divide-gray-200 mb-6",
                        thead {
                            tr {
                                th { class: TH, "Lote" }
                                th { class: TH, "Cantidad" }
                                th { class: TH, "Vencimiento" }
                                th { class: TH, "Costo" }
                                th { class: TH, "Estado" }
                                th { class: TH }
                            }
                        }
                        tbody {
                            class: "divide-y divide-gray-100",
                            for lote in items.iter().cloned() {
                                tr {
                                    key: "{lote.numero_lote}",
                                    td { class: TD, "{lote.numero_lote}" }
                                    td { class: TD, {format_quantity(lote.cantidad)} }
                                    td {
                                        class: TD,
                                        {lote.fecha_vencimiento.map(|f| f.format("%d/%m/%Y").to_string()).unwrap_or_default()}
                                    }
                                    td {
                                        class: TD,
                                        {lote.costo.map(|c| format_money(c, &simbolo)).unwrap_or_default()}
                                    }
                                    td {
                                        class: TD,
                                        span {
                                            class: "px-2 py-0.5 rounded-full text-xs font-medium {estado_class(lote.estado(hoy))}",
                                            {lote.estado(hoy).label()}
                                        }
                                    }
                                    td {
                                        class: TD,
                                        if let Some(id) = lote.id {
                                            button {
                                                class: BTN_LINK,
                                                onclick: move |_| handle_delete(id),
                                                "Eliminar"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                Some(Err(e)) => rsx! {
                    p { class: "text-sm text-orange-700 mb-4", {e.user_message()} }
                },
                None => rsx! { LoadingSpinner {} },
            }

            form {
                class: "border-t border-gray-200 pt-4 space-y-4",
                onsubmit: handle_submit,
                h3 { class: "text-sm font-semibold text-gray-900", "Nuevo lote" }
                div {
                    class: "grid grid-cols-2 gap-4",
                    TextField {
                        label: "Número de lote",
                        required: true,
                        value: form.read().numero_lote.clone(),
                        oninput: move |v| form.write().numero_lote = v,
                    }
                    TextField {
                        label: "Cantidad",
                        required: true,
                        kind: "number",
                        value: form.read().cantidad.clone(),
                        oninput: move |v| form.write().cantidad = v,
                    }
                    TextField {
                        label: "Fecha de vencimiento",
                        kind: "date",
                        value: form.read().fecha_vencimiento.clone(),
                        oninput: move |v| form.write().fecha_vencimiento = v,
                    }
                    TextField {
                        label: "Costo",
                        kind: "number",
                        value: form.read().costo.clone(),
                        oninput: move |v| form.write().costo = v,
                    }
                }
                div {
                    class: "flex justify-end",
                    button {
                        class: BTN_PRIMARY,
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Guardando..." } else { "Agregar lote" }
                    }
                }
            }
        }
    }
}
