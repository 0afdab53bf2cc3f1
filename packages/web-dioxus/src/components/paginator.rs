//! List navigation

use dioxus::prelude::*;

use super::INPUT;

/// "Mostrando 11-20 de 53" plus previous/next buttons.
#[component]
pub fn Paginator(
    page: u32,
    total_pages: u32,
    total: u64,
    range: (u64, u64),
    on_change: EventHandler<u32>,
) -> Element {
    let (from, to) = range;
    let has_previous = page > 1;
    let has_next = page < total_pages;

    rsx! {
        div {
            class: "flex items-center justify-between px-4 py-3 border-t border-gray-200 text-sm text-gray-600",
            span {
                if total == 0 {
                    "Sin resultados"
                } else {
                    "Mostrando {from}-{to} de {total}"
                }
            }
            div {
                class: "flex items-center gap-2",
                button {
                    class: "px-3 py-1 rounded border border-gray-300 disabled:opacity-40",
                    disabled: !has_previous,
                    onclick: move |_| on_change.call(page - 1),
                    "Anterior"
                }
                span { "Página {page} de {total_pages.max(1)}" }
                button {
                    class: "px-3 py-1 rounded border border-gray-300 disabled:opacity-40",
                    disabled: !has_next,
                    onclick: move |_| on_change.call(page + 1),
                    "Siguiente"
                }
            }
        }
    }
}

/// Search input that reports the text after the user pauses typing.
#[component]
pub fn SearchBox(
    initial: String,
    on_search: EventHandler<String>,
    #[props(default = "Buscar...")] placeholder: &'static str,
) -> Element {
    let mut text = use_signal(|| initial.clone());
    let mut pending = use_signal(|| None::<Task>);

    let oninput = move |e: FormEvent| {
        let value = e.value();
        text.set(value.clone());
        if let Some(task) = pending.write().take() {
            task.cancel();
        }
        pending.set(Some(spawn(async move {
            crate::hooks::sleep(crate::hooks::DEBOUNCE).await;
            on_search.call(value);
        })));
    };

    rsx! {
        input {
            class: "{INPUT} max-w-sm",
            r#type: "search",
            placeholder,
            value: "{text}",
            oninput,
        }
    }
}
