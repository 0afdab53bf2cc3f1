//! Modal dialogs

use dioxus::prelude::*;

use super::{BTN_DANGER, BTN_SECONDARY};

/// Centered modal with a title bar. Clicking the backdrop closes it.
#[component]
pub fn Modal(
    #[props(into)] title: String,
    on_close: EventHandler<()>,
    #[props(default = "max-w-lg")] width: &'static str,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "fixed inset-0 z-50 flex items-center justify-center p-4",
            div {
                class: "absolute inset-0 bg-black/40",
                onclick: move |_| on_close.call(()),
            }
            div {
                class: "relative bg-white rounded-xl shadow-xl w-full {width} max-h-[90vh] overflow-y-auto",
                div {
                    class: "flex items-center justify-between px-6 py-4 border-b border-gray-200",
                    h2 { class: "text-lg font-semibold text-gray-900", "{title}" }
                    button {
                        class: "text-gray-400 hover:text-gray-600",
                        onclick: move |_| on_close.call(()),
                        "\u{2715}"
                    }
                }
                div { class: "px-6 py-4", {children} }
            }
        }
    }
}

/// Yes/no confirmation for destructive actions.
#[component]
pub fn ConfirmDialog(
    #[props(into)] message: String,
    #[props(default = "Eliminar")] confirm_label: &'static str,
    #[props(default)] pending: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        Modal {
            title: "Confirmar",
            on_close: move |_| on_cancel.call(()),
            p { class: "text-gray-700 mb-6", "{message}" }
            div {
                class: "flex justify-end gap-3",
                button {
                    class: BTN_SECONDARY,
                    onclick: move |_| on_cancel.call(()),
                    "Cancelar"
                }
                button {
                    class: BTN_DANGER,
                    disabled: pending,
                    onclick: move |_| on_confirm.call(()),
                    "{confirm_label}"
                }
            }
        }
    }
}
