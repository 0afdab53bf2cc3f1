//! Inline messages

use dioxus::prelude::*;

/// Error message with an optional dismiss button.
#[component]
pub fn ErrorBanner(#[props(into)] message: String, on_dismiss: Option<EventHandler<()>>) -> Element {
    rsx! {
        div {
            class: "flex items-start justify-between gap-4 bg-orange-50 border border-orange-200 text-orange-800 text-sm rounded-lg p-3 mb-4",
            role: "alert",
            span { "{message}" }
            if let Some(on_dismiss) = on_dismiss {
                button {
                    class: "text-orange-600 hover:text-orange-900",
                    onclick: move |_| on_dismiss.call(()),
                    "\u{2715}"
                }
            }
        }
    }
}

#[component]
pub fn SuccessBanner(#[props(into)] message: String, on_dismiss: Option<EventHandler<()>>) -> Element {
    rsx! {
        div {
            class: "flex items-start justify-between gap-4 bg-green-50 border border-green-200 text-green-800 text-sm rounded-lg p-3 mb-4",
            span { "{message}" }
            if let Some(on_dismiss) = on_dismiss {
                button {
                    class: "text-green-600 hover:text-green-900",
                    onclick: move |_| on_dismiss.call(()),
                    "\u{2715}"
                }
            }
        }
    }
}

/// A failed load, with a retry button.
#[component]
pub fn ErrorPanel(#[props(into)] message: String, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "bg-white rounded-lg border border-orange-200 p-8 text-center",
            p { class: "text-orange-700 mb-4", "{message}" }
            button {
                class: "px-4 py-2 bg-white border border-gray-300 text-gray-700 text-sm rounded-lg hover:bg-gray-50",
                onclick: move |_| on_retry.call(()),
                "Reintentar"
            }
        }
    }
}

#[component]
pub fn EmptyState(#[props(into)] message: String) -> Element {
    rsx! {
        div {
            class: "bg-white rounded-lg border border-gray-200 p-12 text-center text-gray-500",
            "{message}"
        }
    }
}
