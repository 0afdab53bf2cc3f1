//! User accounts and roles

use dioxus::prelude::*;

use tienda_core::forms::UsuarioForm;
use tienda_core::models::{Rol, Usuario};

use super::PageHeader;
use crate::auth::use_auth;
use crate::components::{
    CheckboxField, ConfirmDialog, EmptyState, ErrorBanner, ErrorPanel, FieldRow, LoadingSpinner,
    Modal, Paginator, SearchBox, TextField, BTN_LINK, BTN_PRIMARY, BTN_SECONDARY, INPUT, TD, TH,
};
use crate::hooks::use_list;

fn rol_class(rol: Rol) -> &'static str {
    match rol {
        Rol::Admin => "bg-purple-100 text-purple-800",
        Rol::Supervisor => "bg-blue-100 text-blue-800",
        Rol::Cajero => "bg-gray-100 text-gray-700",
    }
}

#[component]
pub fn UsuariosPage() -> Element {
    let auth = use_auth();
    let list = use_list::<Usuario>();

    let mut editing = use_signal(|| None::<UsuarioForm>);
    let mut deleting = use_signal(|| None::<Usuario>);
    let mut error = use_signal(|| None::<String>);

    let propio_id = auth.usuario().and_then(|u| u.id);

    let confirm_delete = move |_| {
        let Some(id) = deleting.read().as_ref().and_then(|u| u.id) else {
            return;
        };
        spawn(async move {
            match auth.client().remove::<Usuario>(id).await {
                Ok(()) => list.refresh(),
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            deleting.set(None);
        });
    };

    rsx! {
        div {
            PageHeader {
                title: "Usuarios",
                action: "Nuevo usuario",
                on_action: move |_| editing.set(Some(UsuarioForm::default())),
                SearchBox {
                    initial: list.search_text(),
                    on_search: move |q| list.search(q),
                }
            }

            if let Some(message) = error() {
                ErrorBanner { message, on_dismiss: move |_| error.set(None) }
            }

            match &*list.data.read_unchecked() {
                Some(Ok(page)) if page.items.is_empty() => rsx! {
                    EmptyState { message: "No hay usuarios." }
                },
                Some(Ok(page)) => rsx! {
                    div {
                        class: "bg-white rounded-lg shadow-sm border border-gray-200 overflow-x-auto",
                        table {
                            class: "min-w-full divide-y divide-gray-200",
                            thead {
                                class: "bg-gray-50",
                                tr {
                                    th { class: TH, "Usuario" }
                                    th { class: TH, "Nombre" }
                                    th { class: TH, "Rol" }
                                    th { class: TH, "Estado" }
                                    th { class: TH }
                                }
                            }
                            tbody {
                                class: "divide-y divide-gray-100",
                                for usuario in page.items.iter().cloned() {
                                    tr {
                                        key: "{usuario.id:?}",
                                        class: "hover:bg-gray-50",
                                        td { class: "{TD} font-medium text-gray-900", "{usuario.username}" }
                                        td { class: TD, "{usuario.nombre}" }
                                        td {
                                            class: TD,
                                            span {
                                                class: "px-2 py-0.5 rounded-full text-xs font-medium {rol_class(usuario.rol)}",
                                                {usuario.rol.label()}
                                            }
                                        }
                                        td { class: TD, if usuario.activo { "Activo" } else { "Inactivo" } }
                                        td {
                                            class: "{TD} text-right space-x-3 whitespace-nowrap",
                                            button {
                                                class: BTN_LINK,
                                                onclick: {
                                                    let u = usuario.clone();
                                                    move |_| editing.set(Some(UsuarioForm::from(&u)))
                                                },
                                                "Editar"
                                            }
                                            // Users cannot delete their own account.
                                            if usuario.id.is_some() && usuario.id != propio_id {
                                                button {
                                                    class: "text-sm text-red-600 hover:text-red-800 font-medium",
                                                    onclick: {
                                                        let u = usuario.clone();
                                                        move |_| deleting.set(Some(u.clone()))
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

            if let Some(form) = editing() {
                UsuarioEditor {
                    form,
                    on_close: move |_| editing.set(None),
                    on_saved: move |_| {
                        editing.set(None);
                        list.refresh();
                    },
                }
            }

            if let Some(usuario) = deleting() {
                ConfirmDialog {
                    message: format!("¿Eliminar al usuario \"{}\"?", usuario.username),
                    on_confirm: confirm_delete,
                    on_cancel: move |_| deleting.set(None),
                }
            }
        }
    }
}

#[component]
fn UsuarioEditor(form: UsuarioForm, on_close: EventHandler<()>, on_saved: EventHandler<()>) -> Element {
    let auth = use_auth();
    let is_new = form.id.is_none();
    let mut form = use_signal(|| form);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        let usuario = match form.read().validate() {
            Ok(u) => u,
            Err(err) => {
                error.set(Some(err.message));
                return;
            }
        };
        spawn(async move {
            saving.set(true);
            match auth.client().save(&usuario).await {
                Ok(_) => on_saved.call(()),
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            saving.set(false);
        });
    };

    let rol = form.read().rol;

    rsx! {
        Modal {
            title: if is_new { "Nuevo usuario" } else { "Editar usuario" },
            on_close: move |_| on_close.call(()),
            if let Some(message) = error() {
                ErrorBanner { message }
            }
            form {
                class: "space-y-4",
                onsubmit: handle_submit,
                FieldRow {
                    TextField {
                        label: "Usuario",
                        required: true,
                        disabled: !is_new,
                        value: form.read().username.clone(),
                        oninput: move |v| form.write().username = v,
                    }
                    TextField {
                        label: "Nombre",
                        required: true,
                        value: form.read().nombre.clone(),
                        oninput: move |v| form.write().nombre = v,
                    }
                    label {
                        class: "block",
                        span { class: "block text-sm font-medium text-gray-700 mb-1", "Rol" }
                        select {
                            class: INPUT,
                            onchange: move |e: FormEvent| {
                                if let Some(r) = Rol::from_slug(&e.value()) {
                                    form.write().rol = r;
                                }
                            },
                            for r in Rol::variants().iter().copied() {
                                option { key: "{r.slug()}", value: r.slug(), selected: r == rol, {r.label()} }
                            }
                        }
                    }
                    TextField {
                        label: { if is_new { "Contraseña" } else { "Nueva contraseña" } },
                        kind: "password",
                        required: is_new,
                        placeholder: { if is_new { "" } else { "Dejar en blanco para conservarla" } },
                        value: form.read().password.clone(),
                        oninput: move |v| form.write().password = v,
                    }
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
