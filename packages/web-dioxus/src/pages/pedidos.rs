//! Purchase orders to suppliers

use dioxus::prelude::*;

use tienda_core::forms::PedidoForm;
use tienda_core::models::{EstadoPedido, Pedido, PedidoItem, Producto, Proveedor};
use tienda_core::money::{format_money, format_quantity, parse_amount};

use super::PageHeader;
use crate::auth::use_auth;
use crate::components::{
    ConfirmDialog, EmptyState, ErrorBanner, ErrorPanel, LoadingSpinner, Modal, Paginator,
    SearchBox, SuccessBanner, TextField, BTN_LINK, BTN_PRIMARY, BTN_SECONDARY, INPUT, TD, TH,
};
use crate::hooks::{use_api, use_list};
use crate::state::use_app_state;

fn estado_class(estado: EstadoPedido) -> &'static str {
    match estado {
        EstadoPedido::Pendiente => "px-2 py-0.5 rounded-full text-xs font-medium bg-amber-100 text-amber-800",
        EstadoPedido::Recibido => "px-2 py-0.5 rounded-full text-xs font-medium bg-green-100 text-green-800",
        EstadoPedido::Cancelado => "px-2 py-0.5 rounded-full text-xs font-medium bg-gray-100 text-gray-600",
    }
}

#[component]
pub fn PedidosPage() -> Element {
    let auth = use_auth();
    let state = use_app_state();
    let list = use_list::<Pedido>();

    let mut creating = use_signal(|| false);
    let mut receiving = use_signal(|| None::<Pedido>);
    let mut deleting = use_signal(|| None::<Pedido>);
    let mut pending = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<String>);

    let confirm_receive = move |_| {
        let Some(id) = receiving.read().as_ref().and_then(|p| p.id) else {
            return;
        };
        spawn(async move {
            pending.set(true);
            match auth.client().receive_order(id).await {
                Ok(pedido) => {
                    notice.set(Some(format!(
                        "Pedido {} recibido; el inventario fue actualizado",
                        pedido.folio.unwrap_or_else(|| id.to_string())
                    )));
                    list.refresh();
                }
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            pending.set(false);
            receiving.set(None);
        });
    };

    let confirm_delete = move |_| {
        let Some(id) = deleting.read().as_ref().and_then(|p| p.id) else {
            return;
        };
        spawn(async move {
            match auth.client().remove::<Pedido>(id).await {
                Ok(()) => list.refresh(),
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            deleting.set(None);
        });
    };

    let simbolo = state.simbolo();

    rsx! {
        div {
            PageHeader {
                title: "Pedidos a proveedores",
                action: "Nuevo pedido",
                on_action: move |_| creating.set(true),
                SearchBox {
                    initial: list.search_text(),
                    placeholder: "Buscar por folio o proveedor",
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
                    EmptyState { message: "No hay pedidos registrados." }
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
                                    th { class: TH, "Proveedor" }
                                    th { class: TH, "Fecha" }
                                    th { class: TH, "Productos" }
                                    th { class: TH, "Total" }
                                    th { class: TH, "Estado" }
                                    th { class: TH }
                                }
                            }
                            tbody {
                                class: "divide-y divide-gray-100",
                                for pedido in page.items.iter().cloned() {
                                    tr {
                                        key: "{pedido.id:?}",
                                        class: "hover:bg-gray-50",
                                        td { class: "{TD} font-medium text-gray-900", {pedido.folio.clone().unwrap_or_default()} }
                                        td { class: TD, {pedido.proveedor_nombre.clone().unwrap_or_default()} }
                                        td { class: TD, {pedido.fecha.clone().unwrap_or_default()} }
                                        td { class: TD, "{pedido.items.len()}" }
                                        td { class: TD, {format_money(pedido.total, &simbolo)} }
                                        td {
                                            class: TD,
                                            span { class: estado_class(pedido.estado), {pedido.estado.label()} }
                                        }
                                        td {
                                            class: "{TD} text-right space-x-3 whitespace-nowrap",
                                            if pedido.estado == EstadoPedido::Pendiente {
                                                button {
                                                    class: BTN_LINK,
                                                    onclick: {
                                                        let p = pedido.clone();
                                                        move |_| receiving.set(Some(p.clone()))
                                                    },
                                                    "Recibir"
                                                }
                                                button {
                                                    class: "text-sm text-red-600 hover:text-red-800 font-medium",
                                                    onclick: {
                                                        let p = pedido.clone();
                                                        move |_| deleting.set(Some(p.clone()))
                                                    },
                                                    "Eliminar"
                                                }
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

            if creating() {
                PedidoEditor {
                    simbolo: simbolo.clone(),
                    on_close: move |_| creating.set(false),
                    on_saved: move |_| {
                        creating.set(false);
                        list.refresh();
                    },
                }
            }

            if let Some(pedido) = receiving() {
                ConfirmDialog {
                    message: format!(
                        "¿Marcar el pedido {} como recibido? Sus productos se sumarán al inventario.",
                        pedido.folio.clone().unwrap_or_default()
                    ),
                    confirm_label: "Recibir",
                    pending: pending(),
                    on_confirm: confirm_receive,
                    on_cancel: move |_| receiving.set(None),
                }
            }

            if let Some(pedido) = deleting() {
                ConfirmDialog {
                    message: format!("¿Eliminar el pedido {}?", pedido.folio.clone().unwrap_or_default()),
                    on_confirm: confirm_delete,
                    on_cancel: move |_| deleting.set(None),
                }
            }
        }
    }
}

/// Line being typed before it is added to the order.
#[derive(Debug, Clone, Default, PartialEq)]
struct Borrador {
    producto_id: Option<i64>,
    cantidad: String,
    costo: String,
}

#[component]
fn PedidoEditor(simbolo: String, on_close: EventHandler<()>, on_saved: EventHandler<()>) -> Element {
    let auth = use_auth();
    let mut form = use_signal(PedidoForm::default);
    let mut borrador = use_signal(Borrador::default);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let proveedores = use_api(|client| async move { client.fetch_all::<Proveedor>().await });
    let productos = use_api(|client| async move { client.fetch_all::<Producto>().await });

    let seleccionar_producto = move |e: FormEvent| {
        let id: Option<i64> = e.value().parse().ok();
        let costo = id.and_then(|id| match &*productos.peek() {
            Some(Ok(items)) => items.iter().find(|p| p.id == Some(id)).map(|p| p.precio_compra),
            _ => None,
        });
        let mut b = borrador.write();
        b.producto_id = id;
        if let Some(costo) = costo {
            b.costo = costo.to_string();
        }
    };

    let agregar = move |_| {
        let b = borrador();
        let Some(producto_id) = b.producto_id else {
            error.set(Some("Seleccione un producto".to_string()));
            return;
        };
        let (Some(cantidad), Some(costo_unitario)) = (parse_amount(&b.cantidad), parse_amount(&b.costo)) else {
            error.set(Some("Indique cantidad y costo válidos".to_string()));
            return;
        };
        let producto_nombre = match &*productos.peek() {
            Some(Ok(items)) => items.iter().find(|p| p.id == Some(producto_id)).map(|p| p.nombre.clone()),
            _ => None,
        };

        let mut f = form.write();
        // Same product again replaces its line
        f.items.retain(|i| i.producto_id != producto_id);
        f.items.push(PedidoItem {
            producto_id,
            producto_nombre,
            cantidad,
            costo_unitario,
        });
        error.set(None);
        borrador.set(Borrador::default());
    };

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        let pedido = match form.read().validate() {
            Ok(p) => p,
            Err(err) => {
                error.set(Some(err.message));
                return;
            }
        };
        spawn(async move {
            saving.set(true);
            match auth.client().create(&pedido).await {
                Ok(_) => on_saved.call(()),
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            saving.set(false);
        });
    };

    let items = form.read().items.clone();
    let total = items.iter().map(PedidoItem::importe).sum::<rust_decimal::Decimal>();
    let proveedor_sel = form.read().proveedor_id.map(|id| id.to_string()).unwrap_or_default();
    let producto_sel = borrador.read().producto_id.map(|id| id.to_string()).unwrap_or_default();

    rsx! {
        Modal {
            title: "Nuevo pedido",
            width: "max-w-3xl",
            on_close: move |_| on_close.call(()),
            if let Some(message) = error() {
                ErrorBanner { message }
            }
            form {
                class: "space-y-4",
                onsubmit: handle_submit,
                label {
                    class: "block",
                    span { class: "block text-sm font-medium text-gray-700 mb-1", "Proveedor" }
                    select {
                        class: INPUT,
                        onchange: move |e: FormEvent| form.write().proveedor_id = e.value().parse().ok(),
                        option { value: "", selected: proveedor_sel.is_empty(), "Seleccione..." }
                        if let Some(Ok(rows)) = &*proveedores.read_unchecked() {
                            for p in rows.iter().filter(|p| p.id.is_some()) {
                                option {
                                    key: "{p.id:?}",
                                    value: p.id.map(|id| id.to_string()).unwrap_or_default(),
                                    selected: p.id.map(|id| id.to_string()) == Some(proveedor_sel.clone()),
                                    "{p.nombre}"
                                }
                            }
                        }
                    }
                }

                div {
                    class: "grid grid-cols-1 md:grid-cols-4 gap-3 items-end",
                    label {
                        class: "block md:col-span-2",
                        span { class: "block text-sm font-medium text-gray-700 mb-1", "Producto" }
                        select {
                            class: INPUT,
                            onchange: seleccionar_producto,
                            option { value: "", selected: producto_sel.is_empty(), "Seleccione..." }
                            if let Some(Ok(rows)) = &*productos.read_unchecked() {
                                for p in rows.iter().filter(|p| p.id.is_some()) {
                                    option {
                                        key: "{p.id:?}",
                                        value: p.id.map(|id| id.to_string()).unwrap_or_default(),
                                        selected: p.id.map(|id| id.to_string()) == Some(producto_sel.clone()),
                                        "{p.nombre}"
                                    }
                                }
                            }
                        }
                    }
                    TextField {
                        label: "Cantidad",
                        kind: "number",
                        value: borrador.read().cantidad.clone(),
                        oninput: move |v| borrador.write().cantidad = v,
                    }
                    TextField {
                        label: "Costo unitario",
                        kind: "number",
                        value: borrador.read().costo.clone(),
                        oninput: move |v| borrador.write().costo = v,
                    }
                }
                div {
                    class: "flex justify-end",
                    button {
                        class: BTN_SECONDARY,
                        r#type: "button",
                        onclick: agregar,
                        "Agregar producto"
                    }
                }

                if items.is_empty() {
                    p { class: "text-sm text-gray-500", "Aún no hay productos en el pedido." }
                } else {
                    table {
                        class: "min-w-full divide-y divide-gray-200",
                        thead {
                            tr {
                                th { class: TH, "Producto" }
                                th { class: TH, "Cantidad" }
                                th { class: TH, "Costo" }
                                th { class: TH, "Importe" }
                                th { class: TH }
                            }
                        }
                        tbody {
                            class: "divide-y divide-gray-100",
                            for item in items.iter() {
                                tr {
                                    key: "{item.producto_id}",
                                    td { class: TD, {item.producto_nombre.clone().unwrap_or_else(|| format!("Producto {}", item.producto_id))} }
                                    td { class: TD, {format_quantity(item.cantidad)} }
                                    td { class: TD, {format_money(item.costo_unitario, &simbolo)} }
                                    td { class: TD, {format_money(item.importe(), &simbolo)} }
                                    td {
                                        class: "{TD} text-right",
                                        button {
                                            class: "text-sm text-red-600 hover:text-red-800",
                                            r#type: "button",
                                            onclick: {
                                                let id = item.producto_id;
                                                move |_| form.write().items.retain(|i| i.producto_id != id)
                                            },
                                            "Quitar"
                                        }
                                    }
                                }
                            }
                        }
                    }
                    p {
                        class: "text-right text-sm text-gray-700",
                        "Total estimado: "
                        span { class: "font-semibold", {format_money(total, &simbolo)} }
                    }
                }

                TextField {
                    label: "Notas",
                    value: form.read().notas.clone(),
                    oninput: move |v| form.write().notas = v,
                }
                div {
                    class: "flex justify-end gap-3 pt-2",
                    button {
                        class: BTN_SECONDARY,
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "Cancelar"
                    }
                    button {
                        class: BTN_PRIMARY,
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Guardando..." } else { "Crear pedido" }
                    }
                }
            }
        }
    }
}
