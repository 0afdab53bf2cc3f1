//! Labelled form inputs

use dioxus::prelude::*;

use super::INPUT;

#[component]
pub fn TextField(
    label: &'static str,
    value: String,
    oninput: EventHandler<String>,
    #[props(default = "text")] kind: &'static str,
    #[props(default)] placeholder: &'static str,
    #[props(default)] required: bool,
    #[props(default)] disabled: bool,
) -> Element {
    rsx! {
        label {
            class: "block",
            span {
                class: "block text-sm font-medium text-gray-700 mb-1",
                "{label}"
                if required {
                    span { class: "text-red-500", " *" }
                }
            }
            input {
                class: INPUT,
                r#type: kind,
                value: "{value}",
                placeholder,
                disabled,
                oninput: move |e: FormEvent| oninput.call(e.value()),
            }
        }
    }
}

#[component]
pub fn CheckboxField(label: &'static str, checked: bool, onchange: EventHandler<bool>) -> Element {
    rsx! {
        label {
            class: "flex items-center gap-2 text-sm text-gray-700",
            input {
                r#type: "checkbox",
                class: "rounded border-gray-300 text-amber-600 focus:ring-amber-500",
                checked,
                onchange: move |e: FormEvent| onchange.call(e.checked()),
            }
            "{label}"
        }
    }
}

/// Two-column grid for form fields.
#[component]
pub fn FieldRow(children: Element) -> Element {
    rsx! {
        div { class: "grid grid-cols-1 md:grid-cols-2 gap-4", {children} }
    }
}
