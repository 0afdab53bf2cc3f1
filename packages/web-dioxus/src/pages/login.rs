//! Login page

use dioxus::prelude::*;

use tienda_core::forms::LoginForm;
use tienda_core::routing::{after_login, guard, Guard, LOGIN_PATH};

use crate::api::anonymous_client;
use crate::auth::use_auth;
use crate::components::{Redirect, INPUT};
use crate::routes::Route;

#[component]
pub fn LoginPage() -> Element {
    let auth = use_auth();
    let navigator = use_navigator();

    let mut form = use_signal(LoginForm::default);
    let mut error = use_signal(|| None::<String>);
    let mut is_pending = use_signal(|| false);

    // Redirect if already authenticated
    if let Guard::Redirect(to) = guard(LOGIN_PATH, auth.is_authenticated()) {
        return rsx! {
            Redirect { to: Route::from_path(to).unwrap_or(Route::DashboardPage {}) }
        };
    }

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        if is_pending() {
            return;
        }
        let request = match form.read().validate() {
            Ok(request) => request,
            Err(err) => {
                error.set(Some(err.message));
                return;
            }
        };

        spawn(async move {
            is_pending.set(true);
            error.set(None);

            match anonymous_client().login(&request).await {
                Ok(response) => {
                    auth.login(response);
                    if let Some(home) = Route::from_path(after_login()) {
                        navigator.replace(home);
                    }
                }
                Err(e) => {
                    tracing::info!(username = %request.username, "login rejected");
                    error.set(Some(e.user_message()));
                }
            }

            is_pending.set(false);
        });
    };

    rsx! {
        div {
            class: "min-h-screen flex items-center justify-center bg-gray-100 px-4",
            div {
                class: "w-full max-w-sm bg-white rounded-xl shadow-sm border border-gray-200 p-8",
                h1 { class: "text-2xl font-bold text-amber-700 text-center mb-1", "Tienda" }
                p { class: "text-sm text-gray-500 text-center mb-6", "Inicie sesión para continuar" }

                if let Some(message) = error() {
                    div {
                        class: "bg-orange-50 border border-orange-200 text-orange-800 text-sm rounded-lg p-3 mb-4",
                        role: "alert",
                        "{message}"
                    }
                }

                form {
                    class: "space-y-4",
                    onsubmit: handle_submit,
                    div {
                        label { class: "block text-sm font-medium text-gray-700 mb-1", "Usuario" }
                        input {
                            class: INPUT,
                            r#type: "text",
                            autocomplete: "username",
                            value: "{form.read().username}",
                            oninput: move |e| form.write().username = e.value(),
                        }
                    }
                    div {
                        label { class: "block text-sm font-medium text-gray-700 mb-1", "Contraseña" }
                        input {
                            class: INPUT,
                            r#type: "password",
                            autocomplete: "current-password",
                            value: "{form.read().password}",
                            oninput: move |e| form.write().password = e.value(),
                        }
                    }
                    button {
                        class: "w-full py-2.5 bg-amber-600 text-white font-medium rounded-lg hover:bg-amber-700 disabled:opacity-50",
                        r#type: "submit",
                        disabled: is_pending(),
                        if is_pending() { "Ingresando..." } else { "Ingresar" }
                    }
                }
            }
        }
    }
}
