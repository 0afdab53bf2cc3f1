//! Product catalog

use dioxus::prelude::*;

use tienda_core::forms::ProductoForm;
use tienda_core::models::Producto;
use tienda_core::money::{format_money, format_quantity};

use super::PageHeader;
use crate::auth::use_auth;
use crate::components::{
    CheckboxField, ConfirmDialog, EmptyState, ErrorBanner, ErrorPanel, FieldRow, LoadingSpinner,
    LotManager, Modal, Paginator, SearchBox, TextField, BTN_LINK, BTN_PRIMARY, BTN_SECONDARY, TD,
    TH,
};
use crate::hooks::use_list;
use crate::state::use_app_state;

#[component]
pub fn ProductosPage() -> Element {
    let auth = use_auth();
    let state = use_app_state();
    let list = use_list::<Producto>();

    let mut editing = use_signal(|| None::<ProductoForm>);
    let mut deleting = use_signal(|| None::<Producto>);
    let mut lots_for = use_signal(|| None::<Producto>);
    let mut error = use_signal(|| None::<String>);

    let confirm_delete = move |_| {
        let Some(id) = deleting.read().as_ref().and_then(|p| p.id) else {
            return;
        };
        spawn(async move {
            match auth.client().remove::<Producto>(id).await {
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
                title: "Productos",
                action: "Nuevo producto",
                on_action: move |_| editing.set(Some(ProductoForm::default())),
                SearchBox {
                    initial: list.search_text(),
                    placeholder: "Buscar por nombre, código o categoría",
                    on_search: move |q| list.search(q),
                }
            }

            if let Some(message) = error() {
                ErrorBanner { message, on_dismiss: move |_| error.set(None) }
            }

            match &*list.data.read_unchecked() {
                Some(Ok(page)) if page.items.is_empty() => rsx! {
                    EmptyState { message: "No hay productos que coincidan con la búsqueda." }
                },
                Some(Ok(page)) => rsx! {
                    div {
                        class: "bg-white rounded-lg shadow-sm border border-gray-200 overflow-x-auto",
                        table {
                            class: "min-w-full divide-y divide-gray-200",
                            thead {
                                class: "bg-gray-50",
                                tr {
                                    th { class: TH, "Código" }
                                    th { class: TH, "Nombre" }
                                    th { class: TH, "Categoría" }
                                    th { class: TH, "Precio" }
                                    th { class: TH, "Margen" }
                                    th { class: TH, "Stock" }
                                    th { class: TH }
                                }
                            }
                            tbody {
                                class: "divide-y divide-gray-100",
                                for producto in page.items.iter().cloned() {
                                    ProductoRow {
                                        key: "{producto.id:?}",
                                        producto: producto.clone(),
                                        simbolo: simbolo.clone(),
                                        on_edit: move |p: Producto| editing.set(Some(ProductoForm::from(&p))),
                                        on_lots: move |p: Producto| lots_for.set(Some(p)),
                                        on_delete: move |p: Producto| deleting.set(Some(p)),
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

            if let Some(form) = editing() {
                ProductoEditor {
                    form,
                    on_close: move |_| editing.set(None),
                    on_saved: move |_| {
                        editing.set(None);
                        list.refresh();
                    },
                }
            }

            if let Some(producto) = deleting() {
                ConfirmDialog {
                    message: format!("¿Eliminar el producto \"{}\"?", producto.nombre),
                    on_confirm: confirm_delete,
                    on_cancel: move |_| deleting.set(None),
                }
            }

            if let Some(producto) = lots_for() {
                if let Some(id) = producto.id {
                    LotManager {
                        producto_id: id,
                        nombre: producto.nombre.clone(),
                        on_close: move |_| lots_for.set(None),
                    }
                }
            }
        }
    }
}

#[component]
fn ProductoRow(
    producto: Producto,
    simbolo: String,
    on_edit: EventHandler<Producto>,
    on_lots: EventHandler<Producto>,
    on_delete: EventHandler<Producto>,
) -> Element {
    let margen = producto
        .margen()
        .map(|m| format!("{}%", m.round_dp(1)))
        .unwrap_or_else(|| "-".to_string());
    let stock = format!("{} {}", format_quantity(producto.stock), producto.unidad);

    rsx! {
        tr {
            class: if producto.activo { "hover:bg-gray-50" } else { "hover:bg-gray-50 opacity-60" },
            td { class: TD, {producto.codigo.clone().unwrap_or_default()} }
            td {
                class: "{TD} font-medium text-gray-900",
                "{producto.nombre}"
                if !producto.activo {
                    span { class: "ml-2 text-xs text-gray-500", "(inactivo)" }
                }
            }
            td { class: TD, {producto.categoria.clone().unwrap_or_default()} }
            td { class: TD, {format_money(producto.precio_venta, &simbolo)} }
            td { class: TD, "{margen}" }
            td {
                class: TD,
                span {
                    class: if producto.stock_bajo() { "font-semibold text-red-600" } else { "" },
                    "{stock}"
                }
                if producto.stock_bajo() {
                    span {
                        class: "ml-2 px-2 py-0.5 rounded-full text-xs bg-red-100 text-red-700",
                        "Stock bajo"
                    }
                }
            }
            td {
                class: "{TD} text-right space-x-3 whitespace-nowrap",
                button {
                    class: BTN_LINK,
                    onclick: {
                        let p = producto.clone();
                        move |_| on_lots.call(p.clone())
                    },
                    "Lotes"
                }
                button {
                    class: BTN_LINK,
                    onclick: {
                        let p = producto.clone();
                        move |_| on_edit.call(p.clone())
                    },
                    "Editar"
                }
                button {
                    class: "text-sm text-red-600 hover:text-red-800 font-medium",
                    onclick: {
                        let p = producto.clone();
                        move |_| on_delete.call(p.clone())
                    },
                    "Eliminar"
                }
            }
        }
    }
}

#[component]
fn ProductoEditor(form: ProductoForm, on_close: EventHandler<()>, on_saved: EventHandler<()>) -> Element {
    let auth = use_auth();
    let is_new = form.id.is_none();
    let mut form = use_signal(|| form);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        let producto = match form.read().validate() {
            Ok(p) => p,
            Err(err) => {
                error.set(Some(err.message));
                return;
            }
        };
        spawn(async move {
            saving.set(true);
            match auth.client().save(&producto).await {
                Ok(_) => on_saved.call(()),
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            saving.set(false);
        });
    };

    rsx! {
        Modal {
            title: if is_new { "Nuevo producto" } else { "Editar producto" },
            width: "max-w-2xl",
            on_close: move |_| on_close.call(()),
            if let Some(message) = error() {
                ErrorBanner { message }
            }
            form {
                class: "space-y-4",
                onsubmit: handle_submit,
                FieldRow {
                    TextField {
                        label: "Nombre",
                        required: true,
                        value: form.read().nombre.clone(),
                        oninput: move |v| form.write().nombre = v,
                    }
                    TextField {
                        label: "Código",
                        value: form.read().codigo.clone(),
                        oninput: move |v| form.write().codigo = v,
                    }
                    TextField {
                        label: "Categoría",
                        value: form.read().categoria.clone(),
                        oninput: move |v| form.write().categoria = v,
                    }
                    TextField {
                        label: "Unidad",
                        placeholder: "unidad, libra, caja...",
                        value: form.read().unidad.clone(),
                        oninput: move |v| form.write().unidad = v,
                    }
                    TextField {
                        label: "Precio de compra",
                        kind: "number",
                        value: form.read().precio_compra.clone(),
                        oninput: move |v| form.write().precio_compra = v,
                    }
                    TextField {
                        label: "Precio de venta",
                        kind: "number",
                        required: true,
                        value: form.read().precio_venta.clone(),
                        oninput: move |v| form.write().precio_venta = v,
                    }
                    TextField {
                        label: "Stock",
                        kind: "number",
                        value: form.read().stock.clone(),
                        oninput: move |v| form.write().stock = v,
                    }
                    TextField {
                        label: "Stock mínimo",
                        kind: "number",
                        value: form.read().stock_minimo.clone(),
                        oninput: move |v| form.write().stock_minimo = v,
                    }
                }
                TextField {
                    label: "Descripción",
                    value: form.read().descripcion.clone(),
                    oninput: move |v| form.write().descripcion = v,
                }
                CheckboxField {
                    label: "Activo",
                    checked: form.read().activo,
                    onchange: move |v| form.write().activo = v,
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
                        if saving() { "Guardando..." } else { "Guardar" }
                    }
                }
            }
        }
    }
}
