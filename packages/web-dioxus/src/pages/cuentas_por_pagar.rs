//! Supplier credit and installments

use dioxus::prelude::*;

use tienda_core::forms::PagoForm;
use tienda_core::models::{CuentaPorPagar, EstadoCuenta, MetodoPago};
use tienda_core::money::format_money;

use crate::auth::use_auth;
use crate::components::{
    EmptyState, ErrorBanner, ErrorPanel, LoadingSpinner, Modal, Paginator, SearchBox,
    SuccessBanner, TextField, BTN_LINK, BTN_PRIMARY, BTN_SECONDARY, INPUT, TD, TH,
};
use crate::hooks::{today, use_list};
use crate::state::use_app_state;

fn estado_class(cuenta: &CuentaPorPagar, vencida: bool) -> &'static str {
    if vencida {
        return "px-2 py-0.5 rounded-full text-xs font-medium bg-red-100 text-red-700";
    }
    match cuenta.estado {
        EstadoCuenta::Pagada => "px-2 py-0.5 rounded-full text-xs font-medium bg-green-100 text-green-800",
        EstadoCuenta::Parcial => "px-2 py-0.5 rounded-full text-xs font-medium bg-blue-100 text-blue-800",
        EstadoCuenta::Pendiente | EstadoCuenta::Vencida => {
            "px-2 py-0.5 rounded-full text-xs font-medium bg-amber-100 text-amber-800"
        }
    }
}

#[component]
pub fn CuentasPorPagarPage() -> Element {
    let state = use_app_state();
    let list = use_list::<CuentaPorPagar>();

    let mut paying = use_signal(|| None::<CuentaPorPagar>);
    let mut history = use_signal(|| None::<CuentaPorPagar>);
    let mut notice = use_signal(|| None::<String>);

    let simbolo = state.simbolo();
    let hoy = today();

    rsx! {
        div {
            div {
                class: "flex items-center justify-between mb-6",
                h1 { class: "text-2xl font-bold text-gray-900", "Cuentas por pagar" }
                SearchBox {
                    initial: list.search_text(),
                    placeholder: "Buscar por proveedor o pedido",
                    on_search: move |q| list.search(q),
                }
            }

            if let Some(message) = notice() {
                SuccessBanner { message, on_dismiss: move |_| notice.set(None) }
            }

            match &*list.data.read_unchecked() {
                Some(Ok(page)) if page.items.is_empty() => rsx! {
                    EmptyState { message: "No hay cuentas por pagar." }
                },
                Some(Ok(page)) => rsx! {
                    div {
                        class: "bg-white rounded-lg shadow-sm border border-gray-200 overflow-x-auto",
                        table {
                            class: "min-w-full divide-y divide-gray-200",
                            thead {
                                class: "bg-gray-50",
                                tr {
                                    th { class: TH, "Proveedor" }
                                    th { class: TH, "Pedido" }
                                    th { class: TH, "Vencimiento" }
                                    th { class: TH, "Monto" }
                                    th { class: TH, "Pagado" }
                                    th { class: TH, "Saldo" }
                                    th { class: TH, "Estado" }
                                    th { class: TH }
                                }
                            }
                            tbody {
                                class: "divide-y divide-gray-100",
                                for cuenta in page.items.iter() {
                                    CuentaRow {
                                        key: "{cuenta.id:?}",
                                        vencida: cuenta.esta_vencida(hoy),
                                        cuenta: cuenta.clone(),
                                        simbolo: simbolo.clone(),
                                        on_pay: move |c| paying.set(Some(c)),
                                        on_history: move |c| history.set(Some(c)),
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

            if let Some(cuenta) = paying() {
                PagoDialog {
                    cuenta,
                    simbolo: simbolo.clone(),
                    on_close: move |_| paying.set(None),
                    on_saved: move |actualizada: CuentaPorPagar| {
                        paying.set(None);
                        notice.set(Some(format!(
                            "Pago registrado. Saldo pendiente: {}",
                            format_money(actualizada.saldo, &state.simbolo())
                        )));
                        list.refresh();
                    },
                }
            }

            if let Some(cuenta) = history() {
                PagosHistorial {
                    cuenta,
                    simbolo: simbolo.clone(),
                    on_close: move |_| history.set(None),
                }
            }
        }
    }
}

#[component]
fn CuentaRow(
    cuenta: CuentaPorPagar,
    vencida: bool,
    simbolo: String,
    on_pay: EventHandler<CuentaPorPagar>,
    on_history: EventHandler<CuentaPorPagar>,
) -> Element {
    let puede_pagar = cuenta.saldo > rust_decimal::Decimal::ZERO;
    let estado = if vencida { "Vencida" } else { cuenta.estado.label() };
    let pay = cuenta.clone();
    let hist = cuenta.clone();

    rsx! {
        tr {
            class: if vencida { "bg-red-50" } else { "hover:bg-gray-50" },
            td { class: "{TD} font-medium text-gray-900", {cuenta.proveedor_nombre.clone().unwrap_or_default()} }
            td {
                class: TD,
                {cuenta.folio_pedido.clone().or_else(|| cuenta.pedido_id.map(|id| id.to_string())).unwrap_or_default()}
            }
            td {
                class: TD,
                {cuenta.fecha_vencimiento.map(|f| f.format("%d/%m/%Y").to_string()).unwrap_or_default()}
            }
            td { class: TD, {format_money(cuenta.monto_total, &simbolo)} }
            td { class: TD, {format_money(cuenta.pagado(), &simbolo)} }
            td { class: "{TD} font-medium", {format_money(cuenta.saldo, &simbolo)} }
            td {
                class: TD,
                span { class: estado_class(&cuenta, vencida), "{estado}" }
            }
            td {
                class: "{TD} text-right space-x-3 whitespace-nowrap",
                if !cuenta.pagos.is_empty() {
                    button {
                        class: BTN_LINK,
                        onclick: move |_| on_history.call(hist.clone()),
                        "Pagos"
                    }
                }
                if puede_pagar {
                    button {
                        class: BTN_LINK,
                        onclick: move |_| on_pay.call(pay.clone()),
                        "Registrar pago"
                    }
                }
            }
        }
    }
}

#[component]
fn PagoDialog(
    cuenta: CuentaPorPagar,
    simbolo: String,
    on_close: EventHandler<()>,
    on_saved: EventHandler<CuentaPorPagar>,
) -> Element {
    let auth = use_auth();
    let saldo = cuenta.saldo;
    let cuenta_id = cuenta.id;
    let mut form = use_signal(|| PagoForm {
        monto: saldo.to_string(),
        ..Default::default()
    });
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        let Some(id) = cuenta_id else {
            return;
        };
        let pago = match form.read().validate(saldo) {
            Ok(p) => p,
            Err(err) => {
                error.set(Some(err.message));
                return;
            }
        };
        spawn(async move {
            saving.set(true);
            match auth.client().register_payment(id, &pago).await {
                Ok(actualizada) => on_saved.call(actualizada),
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            saving.set(false);
        });
    };

    let metodo = form.read().metodo;

    rsx! {
        Modal {
            title: "Registrar pago",
            on_close: move |_| on_close.call(()),
            p {
                class: "text-sm text-gray-600 mb-4",
                {cuenta.proveedor_nombre.clone().unwrap_or_default()}
                " · Saldo pendiente: "
                span { class: "font-semibold text-gray-900", {format_money(saldo, &simbolo)} }
            }
            if let Some(message) = error() {
                ErrorBanner { message }
            }
            form {
                class: "space-y-4",
                onsubmit: handle_submit,
                TextField {
                    label: "Monto",
                    kind: "number",
                    required: true,
                    value: form.read().monto.clone(),
                    oninput: move |v| form.write().monto = v,
                }
                label {
                    class: "block",
                    span { class: "block text-sm font-medium text-gray-700 mb-1", "Método de pago" }
                    select {
                        class: INPUT,
                        onchange: move |e: FormEvent| {
                            if let Some(m) = MetodoPago::from_slug(&e.value()) {
                                form.write().metodo = m;
                            }
                        },
                        for m in MetodoPago::variants().iter().copied() {
                            option {
                                key: "{m.slug()}",
                                value: m.slug(),
                                selected: m == metodo,
                                {m.label()}
                            }
                        }
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
                        if saving() { "Guardando..." } else { "Registrar pago" }
                    }
                }
            }
        }
    }
}

#[component]
fn PagosHistorial(cuenta: CuentaPorPagar, simbolo: String, on_close: EventHandler<()>) -> Element {
    rsx! {
        Modal {
            title: "Pagos registrados",
            on_close: move |_| on_close.call(()),
            table {
                class: "min-w-full divide-y divide-gray-200",
                thead {
                    tr {
                        th { class: TH, "Fecha" }
                        th { class: TH, "Método" }
                        th { class: TH, "Monto" }
                        th { class: TH, "Notas" }
                    }
                }
                tbody {
                    class: "divide-y divide-gray-100",
                    for (i, pago) in cuenta.pagos.iter().enumerate() {
                        tr {
                            key: "{i}",
                            td { class: TD, {pago.fecha.clone().unwrap_or_default()} }
                            td { class: TD, {pago.metodo.label()} }
                            td { class: TD, {format_money(pago.monto, &simbolo)} }
                            td { class: TD, {pago.notas.clone().unwrap_or_default()} }
                        }
                    }
                }
            }
            p {
                class: "text-right text-sm text-gray-700 mt-4",
                "Pagado: "
                {format_money(cuenta.pagado(), &simbolo)}
                " de "
                {format_money(cuenta.monto_total, &simbolo)}
            }
        }
    }
}
