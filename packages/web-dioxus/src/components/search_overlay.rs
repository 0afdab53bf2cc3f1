//! Global search across products, customers, suppliers, sales and orders

use dioxus::prelude::*;

use tienda_core::models::{busqueda_valida, TipoResultado};

use super::{LoadingDots, INPUT};
use crate::hooks::{sleep, use_api, DEBOUNCE};
use crate::routes::Route;
use crate::state::use_app_state;

fn route_for(tipo: TipoResultado) -> Route {
    match tipo {
        TipoResultado::Producto => Route::ProductosPage {},
        TipoResultado::Cliente => Route::ClientesPage {},
        TipoResultado::Proveedor => Route::ProveedoresPage {},
        TipoResultado::Venta => Route::HistorialVentasPage {},
        TipoResultado::Pedido => Route::PedidosPage {},
    }
}

#[component]
pub fn SearchOverlay() -> Element {
    let state = use_app_state();
    let navigator = use_navigator();
    let mut text = use_signal(String::new);

    // A new keystroke restarts the resource, which drops the pending wait.
    let results = use_api(move |client| {
        let q = text();
        async move {
            if !busqueda_valida(&q) {
                return Ok(Vec::new());
            }
            sleep(DEBOUNCE).await;
            client.search(&q).await
        }
    });

    let close = move |_| state.close_search();

    rsx! {
        div {
            class: "fixed inset-0 z-50 flex items-start justify-center pt-24 px-4",
            div { class: "absolute inset-0 bg-black/40", onclick: close }
            div {
                class: "relative bg-white rounded-xl shadow-xl w-full max-w-2xl",
                div {
                    class: "p-4 border-b border-gray-200",
                    input {
                        class: INPUT,
                        r#type: "search",
                        autofocus: true,
                        placeholder: "Escriba al menos 2 caracteres",
                        value: "{text}",
                        oninput: move |e: FormEvent| text.set(e.value()),
                        onkeydown: move |e: KeyboardEvent| {
                            if e.key() == Key::Escape {
                                state.close_search();
                            }
                        },
                    }
                }
                div {
                    class: "max-h-96 overflow-y-auto",
                    match &*results.read_unchecked() {
                        Some(Ok(items)) if items.is_empty() => rsx! {
                            if busqueda_valida(&text()) {
                                p { class: "p-6 text-center text-sm text-gray-500", "Sin resultados" }
                            }
                        },
                        Some(Ok(items)) => rsx! {
                            ul {
                                class: "divide-y divide-gray-100",
                                for (key, item) in items.iter().map(|i| (format!("{}-{}", i.tipo.label(), i.id), i.clone())) {
                                    li {
                                        key: "{key}",
                                        button {
                                            class: "w-full text-left px-4 py-3 hover:bg-amber-50 flex items-center justify-between",
                                            onclick: move |_| {
                                                state.close_search();
                                                navigator.push(route_for(item.tipo));
                                            },
                                            div {
                                                p { class: "text-sm font-medium text-gray-900", "{item.titulo}" }
                                                if let Some(subtitulo) = &item.subtitulo {
                                                    p { class: "text-xs text-gray-500", "{subtitulo}" }
                                                }
                                            }
                                            span {
                                                class: "text-xs px-2 py-0.5 rounded-full bg-gray-100 text-gray-600",
                                                {item.tipo.label()}
                                            }
                                        }
                                    }
                                }
                            }
                        },
                        Some(Err(e)) => rsx! {
                            p { class: "p-6 text-center text-sm text-orange-700", {e.user_message()} }
                        },
                        None => rsx! {
                            div { class: "p-6 flex justify-center", LoadingDots {} }
                        },
                    }
                }
            }
        }
    }
}
