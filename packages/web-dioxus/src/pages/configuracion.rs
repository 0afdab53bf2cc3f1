//! Store settings

use dioxus::prelude::*;

use tienda_core::forms::ConfiguracionForm;

use crate::auth::use_auth;
use crate::components::{ErrorBanner, FieldRow, SuccessBanner, TextField, BTN_PRIMARY, BTN_SECONDARY};
use crate::state::use_app_state;

#[component]
pub fn ConfiguracionPage() -> Element {
    let auth = use_auth();
    let state = use_app_state();
    let mut form = use_signal(|| ConfiguracionForm::from(&*state.configuracion.peek()));
    let mut error = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        let configuracion = match form.read().validate() {
            Ok(c) => c,
            Err(err) => {
                error.set(Some(err.message));
                return;
            }
        };
        spawn(async move {
            saving.set(true);
            error.set(None);
            match auth.client().save_configuration(&configuracion).await {
                Ok(guardada) => {
                    form.set(ConfiguracionForm::from(&guardada));
                    state.set_configuracion(guardada);
                    notice.set(Some("Configuración guardada".to_string()));
                }
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            saving.set(false);
        });
    };

    rsx! {
        div {
            class: "max-w-3xl",
            h1 { class: "text-2xl font-bold text-gray-900 mb-6", "Configuración" }

            if let Some(message) = notice() {
                SuccessBanner { message, on_dismiss: move |_| notice.set(None) }
            }
            if let Some(message) = error() {
                ErrorBanner { message, on_dismiss: move |_| error.set(None) }
            }

            form {
                class: "bg-white rounded-lg shadow-sm border border-gray-200 p-6 space-y-6",
                onsubmit: handle_submit,
                section {
                    class: "space-y-4",
                    h2 { class: "text-lg font-semibold text-gray-900", "Datos de la tienda" }
                    FieldRow {
                        TextField {
                            label: "Nombre de la tienda",
                            required: true,
                            value: form.read().nombre_tienda.clone(),
                            oninput: move |v| form.write().nombre_tienda = v,
                        }
                        TextField {
                            label: "Símbolo de moneda",
                            required: true,
                            value: form.read().simbolo_moneda.clone(),
                            oninput: move |v| form.write().simbolo_moneda = v,
                        }
                        TextField {
                            label: "NIT",
                            value: form.read().nit.clone(),
                            oninput: move |v| form.write().nit = v,
                        }
                        TextField {
                            label: "Teléfono",
                            kind: "tel",
                            value: form.read().telefono.clone(),
                            oninput: move |v| form.write().telefono = v,
                        }
                    }
                    TextField {
                        label: "Dirección",
                        value: form.read().direccion.clone(),
                        oninput: move |v| form.write().direccion = v,
                    }
                    TextField {
                        label: "IVA (%)",
                        kind: "number",
                        value: form.read().iva_porcentaje.clone(),
                        oninput: move |v| form.write().iva_porcentaje = v,
                    }
                }
                section {
                    class: "space-y-4",
                    h2 { class: "text-lg font-semibold text-gray-900", "Límites de descuento por rol" }
                    p {
                        class: "text-sm text-gray-500",
                        "Un descuento mayor al límite del usuario requiere la autorización de un supervisor."
                    }
                    div {
                        class: "grid grid-cols-1 md:grid-cols-3 gap-4",
                        TextField {
                            label: "Cajero (%)",
                            kind: "number",
                            value: form.read().limite_cajero.clone(),
                            oninput: move |v| form.write().limite_cajero = v,
                        }
                        TextField {
                            label: "Supervisor (%)",
                            kind: "number",
                            value: form.read().limite_supervisor.clone(),
                            oninput: move |v| form.write().limite_supervisor = v,
                        }
                        TextField {
                            label: "Administrador (%)",
                            kind: "number",
                            value: form.read().limite_admin.clone(),
                            oninput: move |v| form.write().limite_admin = v,
                        }
                    }
                }
                div {
                    class: "flex justify-end gap-3",
                    button {
                        class: BTN_SECONDARY,
                        r#type: "button",
                        onclick: move |_| form.set(ConfiguracionForm::from(&*state.configuracion.read())),
                        "Descartar cambios"
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
