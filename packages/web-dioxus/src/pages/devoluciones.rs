//! Returns against registered sales

use dioxus::prelude::*;

use tienda_client::{ApiClient, ApiError};
use tienda_core::forms::DevolucionForm;
use tienda_core::listing::ListQuery;
use tienda_core::models::{Devolucion, EstadoVenta, Venta};
use tienda_core::money::{format_money, format_quantity};

use super::PageHeader;
use crate::auth::use_auth;
use crate::components::{
    EmptyState, ErrorBanner, ErrorPanel, LoadingSpinner, Modal, Paginator, SearchBox,
    SuccessBanner, TextField, BTN_PRIMARY, BTN_SECONDARY, INPUT, TD, TH,
};
use crate::hooks::use_list;
use crate::state::use_app_state;

#[component]
pub fn DevolucionesPage() -> Element {
    let state = use_app_state();
    let list = use_list::<Devolucion>();

    let mut creating = use_signal(|| false);
    let mut notice = use_signal(|| None::<String>);
    let simbolo = state.simbolo();

    rsx! {
        div {
            PageHeader {
                title: "Devoluciones",
                action: "Nueva devolución",
                on_action: move |_| creating.set(true),
                SearchBox {
                    initial: list.search_text(),
                    placeholder: "Buscar por folio o motivo",
                    on_search: move |q| list.search(q),
                }
            }

            if let Some(message) = notice() {
                SuccessBanner { message, on_dismiss: move |_| notice.set(None) }
            }

            match &*list.data.read_unchecked() {
                Some(Ok(page)) if page.items.is_empty() => rsx! {
                    EmptyState { message: "No hay devoluciones registradas." }
                },
                Some(Ok(page)) => rsx! {
                    div {
                        class: "bg-white rounded-lg shadow-sm border border-gray-200 overflow-x-auto",
                        table {
                            class: "min-w-full divide-y divide-gray-200",
                            thead {
                                class: "bg-gray-50",
                                tr {
                                    th { class: TH, "Folio" }
                                    th { class: TH, "Venta" }
                                    th { class: TH, "Fecha" }
                                    th { class: TH, "Productos" }
                                    th { class: TH, "Motivo" }
                                    th { class: TH, "Total" }
                                }
                            }
                            tbody {
                                class: "divide-y divide-gray-100",
                                for devolucion in page.items.iter() {
                                    tr {
                                        key: "{devolucion.id:?}",
                                        td { class: "{TD} font-medium text-gray-900", {devolucion.folio.clone().unwrap_or_default()} }
                                        td { class: TD, {devolucion.folio_venta.clone().unwrap_or_else(|| devolucion.venta_id.to_string())} }
                                        td { class: TD, {devolucion.fecha.clone().unwrap_or_default()} }
                                        td {
                                            class: TD,
                                            {resumen_items(devolucion)}
                                        }
                                        td { class: TD, "{devolucion.motivo}" }
                                        td { class: TD, {format_money(devolucion.total, &simbolo)} }
                                    }
                                }
                            }
                        }
                        Paginator {
                            page: page.page,
                            total_pages: page.total_pages(),
                            total: page.total,
                            range: page.range(),
                            on_change: move |n| list.go_to(n),
                        }
                    }
                },
                Some(Err(e)) => rsx! {
                    ErrorPanel { message: e.user_message(), on_retry: move |_| list.refresh() }
                },
                None => rsx! { LoadingSpinner {} },
            }

            if creating() {
                DevolucionEditor {
                    simbolo: simbolo.clone(),
                    on_close: move |_| creating.set(false),
                    on_saved: move |folio: String| {
                        creating.set(false);
                        notice.set(Some(format!("Devolución {} registrada", folio)));
                        list.refresh();
                    },
                }
            }
        }
    }
}

/// "Arroz x2, Frijol x1"
fn resumen_items(devolucion: &Devolucion) -> String {
    devolucion
        .items
        .iter()
        .map(|item| {
            let nombre = item
                .producto_nombre
                .clone()
                .unwrap_or_else(|| format!("Producto {}", item.producto_id));
            format!("{} x{}", nombre, format_quantity(item.cantidad))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// A sale by numeric id, or by folio through the list search.
async fn find_sale(client: ApiClient, text: String) -> Result<Option<Venta>, ApiError> {
    if let Ok(id) = text.parse::<i64>() {
        return match client.fetch_one::<Venta>(id).await {
            Ok(venta) => Ok(Some(venta)),
            Err(ApiError::Server { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        };
    }

    let page = client
        .list_page::<Venta>(&ListQuery::page(1).with_search(text.clone()))
        .await?;
    let Some(id) = page
        .items
        .iter()
        .find(|v| v.folio.as_deref().is_some_and(|f| f.eq_ignore_ascii_case(&text)))
        .and_then(|v| v.id)
    else {
        return Ok(None);
    };
    // List rows may omit the items
    client.fetch_one::<Venta>(id).await.map(Some)
}

#[component]
fn DevolucionEditor(simbolo: String, on_close: EventHandler<()>, on_saved: EventHandler<String>) -> Element {
    let auth = use_auth();
    let mut busqueda = use_signal(String::new);
    let mut form = use_signal(|| None::<DevolucionForm>);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let buscar = move |e: FormEvent| {
        e.prevent_default();
        let text = busqueda.read().trim().to_string();
        if text.is_empty() {
            error.set(Some("Indique el folio o número de la venta".to_string()));
            return;
        }
        spawn(async move {
            busy.set(true);
            error.set(None);
            match find_sale(auth.client(), text.clone()).await {
                Ok(Some(venta)) if venta.estado == EstadoVenta::Cancelada => {
                    error.set(Some("La venta está cancelada; no admite devoluciones".to_string()));
                }
                Ok(Some(venta)) => form.set(Some(DevolucionForm::from(&venta))),
                Ok(None) => error.set(Some(format!("No se encontró la venta \"{}\"", text))),
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            busy.set(false);
        });
    };

    let registrar = move |e: FormEvent| {
        e.prevent_default();
        let Some(current) = form() else {
            return;
        };
        let devolucion = match current.validate() {
            Ok(d) => d,
            Err(err) => {
                error.set(Some(err.message));
                return;
            }
        };
        spawn(async move {
            busy.set(true);
            match auth.client().create_return(&devolucion).await {
                Ok(creada) => {
                    tracing::info!(venta_id = devolucion.venta_id, "return registered");
                    on_saved.call(creada.folio.unwrap_or_default());
                }
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            busy.set(false);
        });
    };

    rsx! {
        Modal {
            title: "Nueva devolución",
            width: "max-w-2xl",
            on_close: move |_| on_close.call(()),
            if let Some(message) = error() {
                ErrorBanner { message }
            }

            if form.read().is_none() {
                form {
                    class: "flex items-end gap-3",
                    onsubmit: buscar,
                    div {
                        class: "flex-1",
                        TextField {
                            label: "Folio o número de venta",
                            required: true,
                            value: busqueda(),
                            oninput: move |v| busqueda.set(v),
                        }
                    }
                    button {
                        class: BTN_PRIMARY,
                        r#type: "submit",
                        disabled: busy(),
                        if busy() { "Buscando..." } else { "Buscar venta" }
                    }
                }
            } else {
                form {
                    class: "space-y-4",
                    onsubmit: registrar,
                    p {
                        class: "text-sm text-gray-600",
                        "Venta "
                        span { class: "font-medium text-gray-900", {form.read().as_ref().and_then(|f| f.folio_venta.clone()).unwrap_or_default()} }
                    }
                    table {
                        class: "min-w-full divide-y divide-gray-200",
                        thead {
                            tr {
                                th { class: TH, "Producto" }
                                th { class: TH, "Vendida" }
                                th { class: TH, "Precio" }
                                th { class: TH, "A devolver" }
                            }
                        }
                        tbody {
                            class: "divide-y divide-gray-100",
                            for (i, linea) in form.read().as_ref().map(|f| f.lineas.clone()).unwrap_or_default().into_iter().enumerate() {
                                tr {
                                    key: "{linea.producto_id}",
                                    td { class: TD, "{linea.nombre}" }
                                    td { class: TD, {format_quantity(linea.vendida)} }
                                    td { class: TD, {format_money(linea.precio_unitario, &simbolo)} }
                                    td {
                                        class: TD,
                                        input {
                                            class: "{INPUT} w-24",
                                            r#type: "number",
                                            min: "0",
                                            step: "any",
                                            value: "{linea.cantidad}",
                                            oninput: move |e: FormEvent| {
                                                if let Some(f) = form.write().as_mut() {
                                                    if let Some(l) = f.lineas.get_mut(i) {
                                                        l.cantidad = e.value();
                                                    }
                                                }
                                            },
                                        }
                                    }
                                }
                            }
                        }
                    }
                    TextField {
                        label: "Motivo",
                        required: true,
                        value: form.read().as_ref().map(|f| f.motivo.clone()).unwrap_or_default(),
                        oninput: move |v| {
                            if let Some(f) = form.write().as_mut() {
                                f.motivo = v;
                            }
                        },
                    }
                    p {
                        class: "text-right text-sm text-gray-700",
                        "Total a devolver: "
                        span {
                            class: "font-semibold",
                            {format_money(form.read().as_ref().map(DevolucionForm::total).unwrap_or_default(), &simbolo)}
                        }
                    }
                    div {
                        class: "flex justify-end gap-3 pt-2",
                        button {
                            class: BTN_SECONDARY,
                            r#type: "button",
                            onclick: move |_| form.set(None),
                            "Otra venta"
                        }
                        button {
                            class: BTN_PRIMARY,
                            r#type: "submit",
                            disabled: busy(),
                            if busy() { "Registrando..." } else { "Registrar devolución" }
                        }
                    }
                }
            }
        }
    }
}
