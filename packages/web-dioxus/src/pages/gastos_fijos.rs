//! Recurring expenses

use dioxus::prelude::*;

use tienda_core::forms::GastoForm;
use tienda_core::models::{total_mensual, Frecuencia, GastoFijo};
use tienda_core::money::format_money;

use super::PageHeader;
use crate::auth::use_auth;
use crate::components::{
    CheckboxField, ConfirmDialog, EmptyState, ErrorBanner, ErrorPanel, FieldRow, LoadingSpinner,
    Modal, Paginator, SearchBox, TextField, BTN_LINK, BTN_PRIMARY, BTN_SECONDARY, INPUT, TD, TH,
};
use crate::hooks::{use_api, use_list};
use crate::state::use_app_state;

#[component]
pub fn GastosFijosPage() -> Element {
    let auth = use_auth();
    let state = use_app_state();
    let list = use_list::<GastoFijo>();

    // Monthly total covers every expense, not just the visible page.
    let total = use_api(move |client| {
        let _ = list.generation();
        async move {
            let gastos = client.fetch_all::<GastoFijo>().await?;
            Ok(total_mensual(&gastos))
        }
    });

    let mut editing = use_signal(|| None::<GastoForm>);
    let mut deleting = use_signal(|| None::<GastoFijo>);
    let mut error = use_signal(|| None::<String>);

    let confirm_delete = move |_| {
        let Some(id) = deleting.read().as_ref().and_then(|g| g.id) else {
            return;
        };
        spawn(async move {
            match auth.client().remove::<GastoFijo>(id).await {
                Ok(()) => list.refresh(),
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            deleting.set(None);
        });
    };

    let simbolo = state.simbolo();
    let total_text = match &*total.read_unchecked() {
        Some(Ok(t)) => format_money(*t, &simbolo),
        _ => "-".to_string(),
    };

    rsx! {
        div {
            PageHeader {
                title: "Gastos fijos",
                action: "Nuevo gasto",
                on_action: move |_| editing.set(Some(GastoForm::default())),
                SearchBox {
                    initial: list.search_text(),
                    on_search: move |q| list.search(q),
                }
            }

            div {
                class: "bg-white rounded-lg shadow-sm border border-gray-200 p-6 mb-6 flex items-center justify-between",
                span { class: "text-sm text-gray-500", "Costo mensual de los gastos activos" }
                span { class: "text-2xl font-bold text-gray-900", "{total_text}" }
            }

            if let Some(message) = error() {
                ErrorBanner { message, on_dismiss: move |_| error.set(None) }
            }

            match &*list.data.read_unchecked() {
                Some(Ok(page)) if page.items.is_empty() => rsx! {
                    EmptyState { message: "No hay gastos fijos registrados." }
                },
                Some(Ok(page)) => rsx! {
                    div {
                        class: "bg-white rounded-lg shadow-sm border border-gray-200 overflow-x-auto",
                        table {
                            class: "min-w-full divide-y divide-gray-200",
                            thead {
                                class: "bg-gray-50",
                                tr {
                                    th { class: TH, "Concepto" }
                                    th { class: TH, "Monto" }
                                    th { class: TH, "Frecuencia" }
                                    th { class: TH, "Día de pago" }
                                    th { class: TH, "Mensual" }
                                    th { class: TH }
                                }
                            }
                            tbody {
                                class: "divide-y divide-gray-100",
                                for gasto in page.items.iter().cloned() {
                                    tr {
                                        key: "{gasto.id:?}",
                                        class: if gasto.activo { "hover:bg-gray-50" } else { "hover:bg-gray-50 opacity-60" },
                                        td { class: "{TD} font-medium text-gray-900", "{gasto.concepto}" }
                                        td { class: TD, {format_money(gasto.monto, &simbolo)} }
                                        td { class: TD, {gasto.frecuencia.label()} }
                                        td { class: TD, {gasto.dia_pago.map(|d| d.to_string()).unwrap_or_default()} }
                                        td { class: TD, {format_money(gasto.frecuencia.a_mensual(gasto.monto), &simbolo)} }
                                        td {
                                            class: "{TD} text-right space-x-3 whitespace-nowrap",
                                            button {
                                                class: BTN_LINK,
                                                onclick: {
                                                    let g = gasto.clone();
                                                    move |_| editing.set(Some(GastoForm::from(&g)))
                                                },
                                                "Editar"
                                            }
                                            button {
                                                class: "text-sm text-red-600 hover:text-red-800 font-medium",
                                                onclick: {
                                                    let g = gasto.clone();
                                                    move |_| deleting.set(Some(g.clone()))
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
                GastoEditor {
                    form,
                    on_close: move |_| editing.set(None),
                    on_saved: move |_| {
                        editing.set(None);
                        list.refresh();
                    },
                }
            }

            if let Some(gasto) = deleting() {
                ConfirmDialog {
                    message: format!("¿Eliminar el gasto \"{}\"?", gasto.concepto),
                    on_confirm: confirm_delete,
                    on_cancel: move |_| deleting.set(None),
                }
            }
        }
    }
}

#[component]
fn GastoEditor(form: GastoForm, on_close: EventHandler<()>, on_saved: EventHandler<()>) -> Element {
    let auth = use_auth();
    let is_new = form.id.is_none();
    let mut form = use_signal(|| form);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        let gasto = match form.read().validate() {
            Ok(g) => g,
            Err(err) => {
                error.set(Some(err.message));
                return;
            }
        };
        spawn(async move {
            saving.set(true);
            match auth.client().save(&gasto).await {
                Ok(_) => on_saved.call(()),
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            saving.set(false);
        });
    };

    let frecuencia = form.read().frecuencia;

    rsx! {
        Modal {
            title: if is_new { "Nuevo gasto fijo" } else { "Editar gasto fijo" },
            on_close: move |_| on_close.call(()),
            if let Some(message) = error() {
                ErrorBanner { message }
            }
            form {
                class: "space-y-4",
                onsubmit: handle_submit,
                TextField {
                    label: "Concepto",
                    required: true,
                    placeholder: "Alquiler, luz, salarios...",
                    value: form.read().concepto.clone(),
                    oninput: move |v| form.write().concepto = v,
                }
                FieldRow {
                    TextField {
                        label: "Monto",
                        kind: "number",
                        required: true,
                        value: form.read().monto.clone(),
                        oninput: move |v| form.write().monto = v,
                    }
                    label {
                        class: "block",
                        span { class: "block text-sm font-medium text-gray-700 mb-1", "Frecuencia" }
                        select {
                            class: INPUT,
                            onchange: move |e: FormEvent| {
                                if let Some(f) = Frecuencia::from_slug(&e.value()) {
                                    form.write().frecuencia = f;
                                }
                            },
                            for f in Frecuencia::variants().iter().copied() {
                                option {
                                    key: "{f.slug()}",
                                    value: f.slug(),
                                    selected: f == frecuencia,
                                    {f.label()}
                                }
                            }
                        }
                    }
                    TextField {
                        label: "Día de pago",
                        kind: "number",
                        placeholder: "1-31",
                        value: form.read().dia_pago.clone(),
                        oninput: move |v| form.write().dia_pago = v,
                    }
                }
                TextField {
                    label: "Notas",
                    value: form.read().notas.clone(),
                    oninput: move |v| form.write().notas = v,
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
