//! Volume discount rules

use dioxus::prelude::*;

use tienda_core::forms::DescuentoForm;
use tienda_core::models::{DescuentoVolumen, Producto};
use tienda_core::money::format_quantity;

use super::PageHeader;
use crate::auth::use_auth;
use crate::components::{
    CheckboxField, ConfirmDialog, EmptyState, ErrorBanner, ErrorPanel, FieldRow, LoadingSpinner,
    Modal, Paginator, TextField, BTN_LINK, BTN_PRIMARY, BTN_SECONDARY, INPUT, TD, TH,
};
use crate::hooks::{use_api, use_list};

#[component]
pub fn DescuentosPage() -> Element {
    let auth = use_auth();
    let list = use_list::<DescuentoVolumen>();

    let mut editing = use_signal(|| None::<DescuentoForm>);
    let mut deleting = use_signal(|| None::<DescuentoVolumen>);
    let mut error = use_signal(|| None::<String>);

    let toggle = move |mut regla: DescuentoVolumen| {
        regla.activo = !regla.activo;
        spawn(async move {
            match auth.client().save(&regla).await {
                Ok(_) => list.refresh(),
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
        });
    };

    let confirm_delete = move |_| {
        let Some(id) = deleting.read().as_ref().and_then(|d| d.id) else {
            return;
        };
        spawn(async move {
            match auth.client().remove::<DescuentoVolumen>(id).await {
                Ok(()) => list.refresh(),
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            deleting.set(None);
        });
    };

    rsx! {
        div {
            PageHeader {
                title: "Descuentos por volumen",
                action: "Nueva regla",
                on_action: move |_| editing.set(Some(DescuentoForm::default())),
            }
            p {
                class: "text-sm text-gray-500 -mt-4 mb-6",
                "Se aplican automáticamente en el punto de venta cuando una línea alcanza la cantidad mínima."
            }

            if let Some(message) = error() {
                ErrorBanner { message, on_dismiss: move |_| error.set(None) }
            }

            match &*list.data.read_unchecked() {
                Some(Ok(page)) if page.items.is_empty() => rsx! {
                    EmptyState { message: "No hay reglas de descuento." }
                },
                Some(Ok(page)) => rsx! {
                    div {
                        class: "bg-white rounded-lg shadow-sm border border-gray-200 overflow-x-auto",
                        table {
                            class: "min-w-full divide-y divide-gray-200",
                            thead {
                                class: "bg-gray-50",
                                tr {
                                    th { class: TH, "Producto" }
                                    th { class: TH, "Cantidad mínima" }
                                    th { class: TH, "Descuento" }
                                    th { class: TH, "Estado" }
                                    th { class: TH }
                                }
                            }
                            tbody {
                                class: "divide-y divide-gray-100",
                                for regla in page.items.iter().cloned() {
                                    tr {
                                        key: "{regla.id:?}",
                                        class: "hover:bg-gray-50",
                                        td {
                                            class: "{TD} font-medium text-gray-900",
                                            {regla.producto_nombre.clone().unwrap_or_else(|| "Todos los productos".to_string())}
                                        }
                                        td { class: TD, {format_quantity(regla.cantidad_minima)} }
                                        td { class: TD, "{regla.porcentaje}%" }
                                        td {
                                            class: TD,
                                            button {
                                                class: if regla.activo {
                                                    "px-2 py-0.5 rounded-full text-xs font-medium bg-green-100 text-green-800"
                                                } else {
                                                    "px-2 py-0.5 rounded-full text-xs font-medium bg-gray-100 text-gray-600"
                                                },
                                                title: "Cambiar estado",
                                                onclick: {
                                                    let r = regla.clone();
                                                    move |_| toggle(r.clone())
                                                },
                                                if regla.activo { "Activa" } else { "Inactiva" }
                                            }
                                        }
                                        td {
                                            class: "{TD} text-right space-x-3 whitespace-nowrap",
                                            button {
                                                class: BTN_LINK,
                                                onclick: {
                                                    let r = regla.clone();
                                                    move |_| editing.set(Some(DescuentoForm::from(&r)))
                                                },
                                                "Editar"
                                            }
                                            button {
                                                class: "text-sm text-red-600 hover:text-red-800 font-medium",
                                                onclick: {
                                                    let r = regla.clone();
                                                    move |_| deleting.set(Some(r.clone()))
                                                },
                                                "Eliminar"
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

            if let Some(form) = editing() {
                DescuentoEditor {
                    form,
                    on_close: move |_| editing.set(None),
                    on_saved: move |_| {
                        editing.set(None);
                        list.refresh();
                    },
                }
            }

            if deleting.read().is_some() {
                ConfirmDialog {
                    message: "¿Eliminar esta regla de descuento?",
                    on_confirm: confirm_delete,
                    on_cancel: move |_| deleting.set(None),
                }
            }
        }
    }
}

#[component]
fn DescuentoEditor(form: DescuentoForm, on_close: EventHandler<()>, on_saved: EventHandler<()>) -> Element {
    let auth = use_auth();
    let is_new = form.id.is_none();
    let mut form = use_signal(|| form);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let productos = use_api(|client| async move { client.fetch_all::<Producto>().await });

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        let regla = match form.read().validate() {
            Ok(r) => r,
            Err(err) => {
                error.set(Some(err.message));
                return;
            }
        };
        spawn(async move {
            saving.set(true);
            match auth.client().save(&regla).await {
                Ok(_) => on_saved.call(()),
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            saving.set(false);
        });
    };

    let selected = form.read().producto_id.map(|id| id.to_string()).unwrap_or_default();

    rsx! {
        Modal {
            title: if is_new { "Nueva regla de descuento" } else { "Editar regla de descuento" },
            on_close: move |_| on_close.call(()),
            if let Some(message) = error() {
                ErrorBanner { message }
            }
            form {
                class: "space-y-4",
                onsubmit: handle_submit,
                label {
                    class: "block",
                    span { class: "block text-sm font-medium text-gray-700 mb-1", "Producto" }
                    select {
                        class: INPUT,
                        value: "{selected}",
                        onchange: move |e: FormEvent| form.write().producto_id = e.value().parse().ok(),
                        option { value: "", "Todos los productos" }
                        if let Some(Ok(items)) = &*productos.read_unchecked() {
                            for p in items.iter().filter(|p| p.id.is_some()) {
                                option {
                                    key: "{p.id:?}",
                                    value: p.id.map(|id| id.to_string()).unwrap_or_default(),
                                    selected: p.id.map(|id| id.to_string()) == Some(selected.clone()),
                                    "{p.nombre}"
                                }
                            }
                        }
                    }
                }
                FieldRow {
                    TextField {
                        label: "Cantidad mínima",
                        kind: "number",
                        required: true,
                        value: form.read().cantidad_minima.clone(),
                        oninput: move |v| form.write().cantidad_minima = v,
                    }
                    TextField {
                        label: "Porcentaje de descuento",
                        kind: "number",
                        required: true,
                        value: form.read().porcentaje.clone(),
                        oninput: move |v| form.write().porcentaje = v,
                    }
                }
                CheckboxField {
                    label: "Activa",
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
