//! Suppliers

use dioxus::prelude::*;

use tienda_core::forms::ProveedorForm;
use tienda_core::models::Proveedor;

use super::PageHeader;
use crate::auth::use_auth;
use crate::components::{
    ConfirmDialog, EmptyState, ErrorBanner, ErrorPanel, FieldRow, LoadingSpinner, Modal,
    Paginator, SearchBox, TextField, BTN_LINK, BTN_PRIMARY, BTN_SECONDARY, TD, TH,
};
use crate::hooks::use_list;

#[component]
pub fn ProveedoresPage() -> Element {
    let auth = use_auth();
    let list = use_list::<Proveedor>();

    let mut editing = use_signal(|| None::<ProveedorForm>);
    let mut deleting = use_signal(|| None::<Proveedor>);
    let mut error = use_signal(|| None::<String>);

    let confirm_delete = move |_| {
        let Some(id) = deleting.read().as_ref().and_then(|c| c.id) else {
            return;
        };
        spawn(async move {
            match auth.client().remove::<Proveedor>(id).await {
                Ok(()) => list.refresh(),
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            deleting.set(None);
        });
    };

    rsx! {
        div {
            PageHeader {
                title: "Proveedores",
                action: "Nuevo proveedor",
                on_action: move |_| editing.set(Some(ProveedorForm::default())),
                SearchBox {
                    initial: list.search_text(),
                    placeholder: "Buscar por nombre, contacto o NIT",
                    on_search: move |q| list.search(q),
                }
            }

            if let Some(message) = error() {
                ErrorBanner { message, on_dismiss: move |_| error.set(None) }
            }

            match &*list.data.read_unchecked() {
                Some(Ok(page)) if page.items.is_empty() => rsx! {
                    EmptyState { message: "No hay proveedores registrados." }
                },
                Some(Ok(page)) => rsx! {
                    div {
                        class: "bg-white rounded-lg shadow-sm border border-gray-200 overflow-x-auto",
                        table {
                            class: "min-w-full divide-y divide-gray-200",
                            thead {
                                class: "bg-gray-50",
                                tr {
                                    th { class: TH, "Nombre" }
                                    th { class: TH, "Contacto" }
                                    th { class: TH, "Teléfono" }
                                    th { class: TH, "NIT" }
                                    th { class: TH, "Crédito" }
                                    th { class: TH }
                                }
                            }
                            tbody {
                                class: "divide-y divide-gray-100",
                                for proveedor in page.items.iter().cloned() {
                                    tr {
                                        key: "{proveedor.id:?}",
                                        class: "hover:bg-gray-50",
                                        td { class: "{TD} font-medium text-gray-900", "{proveedor.nombre}" }
                                        td { class: TD, {proveedor.contacto.clone().unwrap_or_default()} }
                                        td { class: TD, {proveedor.telefono.clone().unwrap_or_default()} }
                                        td { class: TD, {proveedor.nit.clone().unwrap_or_default()} }
                                        td {
                                            class: TD,
                                            {proveedor.dias_credito.map(|d| format!("{} días", d)).unwrap_or_else(|| "Contado".to_string())}
                                        }
                                        td {
                                            class: "{TD} text-right space-x-3 whitespace-nowrap",
                                            button {
                                                class: BTN_LINK,
                                                onclick: {
                                                    let c = proveedor.clone();
                                                    move |_| editing.set(Some(ProveedorForm::from(&c)))
                                                },
                                                "Editar"
                                            }
                                            button {
                                                class: "text-sm text-red-600 hover:text-red-800 font-medium",
                                                onclick: {
                                                    let c = proveedor.clone();
                                                    move |_| deleting.set(Some(c.clone()))
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
                ProveedorEditor {
                    form,
                    on_close: move |_| editing.set(None),
                    on_saved: move |_| {
                        editing.set(None);
                        list.refresh();
                    },
                }
            }

            if let Some(proveedor) = deleting() {
                ConfirmDialog {
                    message: format!("¿Eliminar al proveedor \"{}\"?", proveedor.nombre),
                    on_confirm: confirm_delete,
                    on_cancel: move |_| deleting.set(None),
                }
            }
        }
    }
}

#[component]
fn ProveedorEditor(form: ProveedorForm, on_close: EventHandler<()>, on_saved: EventHandler<()>) -> Element {
    let auth = use_auth();
    let is_new = form.id.is_none();
    let mut form = use_signal(|| form);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        let proveedor = match form.read().validate() {
            Ok(c) => c,
            Err(err) => {
                error.set(Some(err.message));
                return;
            }
        };
        spawn(async move {
            saving.set(true);
            match auth.client().save(&proveedor).await {
                Ok(_) => on_saved.call(()),
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            saving.set(false);
        });
    };

    rsx! {
        Modal {
            title: if is_new { "Nuevo proveedor" } else { "Editar proveedor" },
            on_close: move |_| on_close.call(()),
            if let Some(message) = error() {
                ErrorBanner { message }
            }
            form {
                class: "space-y-4",
                onsubmit: handle_submit,
                TextField {
                    label: "Nombre",
                    required: true,
                    value: form.read().nombre.clone(),
                    oninput: move |v| form.write().nombre = v,
                }
                FieldRow {
                    TextField {
                        label: "Contacto",
                        value: form.read().contacto.clone(),
                        oninput: move |v| form.write().contacto = v,
                    }
                    TextField {
                        label: "Días de crédito",
                        kind: "number",
                        value: form.read().dias_credito.clone(),
                        oninput: move |v| form.write().dias_credito = v,
                    }
                    TextField {
                        label: "Teléfono",
                        kind: "tel",
                        value: form.read().telefono.clone(),
                        oninput: move |v| form.write().telefono = v,
                    }
                    TextField {
                        label: "Correo",
                        kind: "email",
                        value: form.read().email.clone(),
                        oninput: move |v| form.write().email = v,
                    }
                    TextField {
                        label: "NIT",
                        value: form.read().nit.clone(),
                        oninput: move |v| form.write().nit = v,
                    }
                    TextField {
                        label: "Dirección",
                        value: form.read().direccion.clone(),
                        oninput: move |v| form.write().direccion = v,
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
                        if saving() { "Guardando..." } else { "Guardar" }
                    }
                }
            }
        }
    }
}
