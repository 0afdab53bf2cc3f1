//! Sales history

use dioxus::prelude::*;

use tienda_core::models::{EstadoVenta, Venta};
use tienda_core::money::{format_money, format_quantity};

use super::TotalLine;
use crate::auth::use_auth;
use crate::components::{
    ConfirmDialog, EmptyState, ErrorBanner, ErrorPanel, LoadingSpinner, Modal, Paginator,
    SearchBox, SuccessBanner, BTN_DANGER, BTN_LINK, TD, TH,
};
use crate::hooks::use_list;
use crate::state::use_app_state;

#[component]
pub fn HistorialVentasPage() -> Element {
    let auth = use_auth();
    let state = use_app_state();
    let list = use_list::<Venta>();

    let mut detail = use_signal(|| None::<Venta>);
    let mut cancelling = use_signal(|| None::<Venta>);
    let mut pending = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<String>);

    // Cancelling restores stock server-side; kept to supervisors and admins.
    let puede_cancelar = auth.rol().puede_autorizar();

    let confirm_cancel = move |_| {
        let Some(id) = cancelling.read().as_ref().and_then(|v| v.id) else {
            return;
        };
        spawn(async move {
            pending.set(true);
            match auth.client().cancel_sale(id).await {
                Ok(venta) => {
                    let folio = venta.folio.unwrap_or_else(|| id.to_string());
                    notice.set(Some(format!("Venta {} cancelada", folio)));
                    detail.set(None);
                    list.refresh();
                }
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            pending.set(false);
            cancelling.set(None);
        });
    };

    let simbolo = state.simbolo();

    rsx! {
        div {
            div {
                class: "flex items-center justify-between mb-6",
                h1 { class: "text-2xl font-bold text-gray-900", "Historial de ventas" }
                SearchBox {
                    initial: list.search_text(),
                    placeholder: "Buscar por folio, cliente o fecha",
                    on_search: move |q| list.search(q),
                }
            }

            if let Some(message) = notice() {
                SuccessBanner { message, on_dismiss: move |_| notice.set(None) }
            }
            if let Some(message) = error() {
                ErrorBanner { message, on_dismiss: move |_| error.set(None) }
            }

            match &*list.data.read_unchecked() {
                Some(Ok(page)) if page.items.is_empty() => rsx! {
                    EmptyState { message: "No hay ventas registradas." }
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
                                    th { class: TH, "Fecha" }
                                    th { class: TH, "Cliente" }
                                    th { class: TH, "Pago" }
                                    th { class: TH, "Total" }
                                    th { class: TH, "Estado" }
                                    th { class: TH }
                                }
                            }
                            tbody {
                                class: "divide-y divide-gray-100",
                                for venta in page.items.iter().cloned() {
                                    tr {
                                        key: "{venta.id:?}",
                                        class: "hover:bg-gray-50",
                                        td { class: "{TD} font-medium text-gray-900", {venta.folio.clone().unwrap_or_default()} }
                                        td { class: TD, {venta.fecha.clone().unwrap_or_default()} }
                                        td { class: TD, {venta.cliente_nombre.clone().unwrap_or_else(|| "Consumidor final".to_string())} }
                                        td { class: TD, {venta.metodo_pago.label()} }
                                        td { class: TD, {format_money(venta.total, &simbolo)} }
                                        td {
                                            class: TD,
                                            span {
                                                class: if venta.estado == EstadoVenta::Cancelada {
                                                    "px-2 py-0.5 rounded-full text-xs font-medium bg-red-100 text-red-700"
                                                } else {
                                                    "px-2 py-0.5 rounded-full text-xs font-medium bg-green-100 text-green-800"
                                                },
                                                {venta.estado.label()}
                                            }
                                        }
                                        td {
                                            class: "{TD} text-right",
                                            button {
                                                class: BTN_LINK,
                                                onclick: {
                                                    let v = venta.clone();
                                                    move |_| detail.set(Some(v.clone()))
                                                },
                                                "Ver detalle"
                                            }
                                        }
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

            if let Some(venta) = detail() {
                VentaDetail {
                    venta,
                    simbolo: simbolo.clone(),
                    puede_cancelar,
                    on_cancel_sale: move |_| cancelling.set(detail()),
                    on_close: move |_| detail.set(None),
                }
            }

            if let Some(venta) = cancelling() {
                ConfirmDialog {
                    message: format!(
                        "¿Cancelar la venta {}? El inventario vendido se repondrá.",
                        venta.folio.clone().unwrap_or_default()
                    ),
                    confirm_label: "Cancelar venta",
                    pending: pending(),
                    on_confirm: confirm_cancel,
                    on_cancel: move |_| cancelling.set(None),
                }
            }
        }
    }
}

#[component]
fn VentaDetail(
    venta: Venta,
    simbolo: String,
    puede_cancelar: bool,
    on_cancel_sale: EventHandler<()>,
    on_close: EventHandler<()>,
) -> Element {
    let folio = venta.folio.clone().unwrap_or_default();

    rsx! {
        Modal {
            title: format!("Venta {}", folio),
            width: "max-w-2xl",
            on_close: move |_| on_close.call(()),
            div {
                class: "grid grid-cols-2 gap-2 text-sm text-gray-600 mb-4",
                p { "Fecha: " {venta.fecha.clone().unwrap_or_default()} }
                p { "Cliente: " {venta.cliente_nombre.clone().unwrap_or_else(|| "Consumidor final".to_string())} }
                p { "Método de pago: " {venta.metodo_pago.label()} }
                p { "Atendió: " {venta.usuario_nombre.clone().unwrap_or_default()} }
            }
            table {
                class: "min-w-full divide-y divide-gray-200 mb-4",
                thead {
                    tr {
                        th { class: TH, "Producto" }
                        th { class: TH, "Cantidad" }
                        th { class: TH, "Precio" }
                        th { class: TH, "Subtotal" }
                    }
                }
                tbody {
                    class: "divide-y divide-gray-100",
                    for (i, item) in venta.items.iter().enumerate() {
                        tr {
                            key: "{i}",
                            td { class: TD, {item.producto_nombre.clone().unwrap_or_else(|| format!("Producto {}", item.producto_id))} }
                            td { class: TD, {format_quantity(item.cantidad)} }
                            td { class: TD, {format_money(item.precio_unitario, &simbolo)} }
                            td { class: TD, {format_money(item.subtotal, &simbolo)} }
                        }
                    }
                }
            }
            dl {
                class: "text-sm space-y-1 border-t border-gray-200 pt-3",
                TotalLine { label: "Subtotal", value: format_money(venta.subtotal, &simbolo) }
                if !venta.descuento_volumen.is_zero() {
                    TotalLine { label: "Descuento por volumen", value: format!("-{}", format_money(venta.descuento_volumen, &simbolo)) }
                }
                if !venta.descuento_adicional.is_zero() {
                    TotalLine { label: "Descuento adicional", value: format!("-{}", format_money(venta.descuento_adicional, &simbolo)) }
                }
                if !venta.costo_envio.is_zero() {
                    TotalLine { label: "Envío", value: format_money(venta.costo_envio, &simbolo) }
                }
                TotalLine { label: "Total", value: format_money(venta.total, &simbolo), strong: true }
            }
            if puede_cancelar && venta.estado == EstadoVenta::Completada {
                div {
                    class: "flex justify-end mt-6",
                    button {
                        class: BTN_DANGER,
                        onclick: move |_| on_cancel_sale.call(()),
                        "Cancelar venta"
                    }
                }
            }
        }
    }
}
