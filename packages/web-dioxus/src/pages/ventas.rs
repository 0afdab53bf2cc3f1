//! Point of sale
//!
//! The cart lives only in this screen. Totals are previewed locally with the
//! volume rules and the additional discount; the server recomputes them when
//! the sale is registered. A discount above the cashier's limit blocks
//! checkout until a supervisor approves the request.

use dioxus::prelude::*;
use rust_decimal::Decimal;

use tienda_core::authorization::{AuthorizationWatch, DiscountGate};
use tienda_core::cart::{cambio, Cart, Checkout};
use tienda_core::discount::DiscountInput;
use tienda_core::forms::EnvioForm;
use tienda_core::listing;
use tienda_core::models::{
    Cliente, DescuentoVolumen, EstadoAutorizacion, MetodoPago, NuevaSolicitudAutorizacion,
    Producto, Venta,
};
use tienda_core::money::{format_money, format_quantity, parse_amount, round2};

use super::TotalLine;
use crate::auth::use_auth;
use crate::components::{
    CheckboxField, ErrorBanner, Modal, SuccessBanner, TextField, BTN_PRIMARY, BTN_SECONDARY, INPUT,
    TD, TH,
};
use crate::hooks::{sleep, use_api};
use crate::state::use_app_state;

/// Matches shown under the product search box.
const MAX_SUGGESTIONS: usize = 8;

fn nueva_referencia() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Registered sale shown after checkout.
#[derive(Debug, Clone, PartialEq)]
struct Recibo {
    venta: Venta,
    cambio: Option<Decimal>,
}

#[component]
pub fn VentasPage() -> Element {
    let auth = use_auth();
    let state = use_app_state();

    let mut cart = use_signal(Cart::default);
    let mut watch = use_signal(AuthorizationWatch::default);
    let mut poll_task = use_signal(|| None::<Task>);
    let mut referencia = use_signal(nueva_referencia);

    let mut cliente_id = use_signal(|| None::<i64>);
    let mut metodo = use_signal(MetodoPago::default);
    let mut recibido = use_signal(String::new);
    let mut con_envio = use_signal(|| false);
    let mut envio = use_signal(EnvioForm::default);
    let mut costo_envio = use_signal(String::new);

    let mut submitting = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<String>);
    let mut recibo = use_signal(|| None::<Recibo>);

    let productos = use_api(|client| async move { client.fetch_all::<Producto>().await });
    let reglas = use_api(|client| async move { client.fetch_all::<DescuentoVolumen>().await });
    let clientes = use_api(|client| async move { client.fetch_all::<Cliente>().await });

    use_drop(move || {
        if let Some(task) = poll_task.peek().as_ref() {
            task.cancel();
        }
    });

    let reglas_activas = move || -> Vec<DescuentoVolumen> {
        match &*reglas.read() {
            Some(Ok(rows)) => rows.iter().filter(|r| r.activo).cloned().collect(),
            _ => Vec::new(),
        }
    };

    let rol = auth.rol();
    let limites = state.configuracion.read().limites_descuento;
    let totals = cart.read().totals(&reglas_activas());
    let gate = DiscountGate::evaluate(rol, &limites, totals.descuento_adicional.porcentaje, &watch.read());
    let simbolo = state.simbolo();

    let mut stop_polling = move || {
        if let Some(task) = poll_task.write().take() {
            task.cancel();
        }
    };

    let solicitar_autorizacion = move |_| {
        if !watch.write().begin_request() {
            return;
        }
        let totals = cart.read().totals(&reglas_activas());
        let solicitud = NuevaSolicitudAutorizacion {
            porcentaje: round2(totals.descuento_adicional.porcentaje),
            monto: round2(totals.descuento_adicional.monto),
            subtotal: totals.subtotal,
            motivo: None,
        };
        spawn(async move {
            error.set(None);
            let client = auth.client();
            let creada = match client.request_authorization(&solicitud).await {
                Ok(s) => s,
                Err(e) => {
                    if *watch.peek() == AuthorizationWatch::Requesting {
                        watch.write().reset();
                    }
                    error.set(Some(auth.error_message(&e)));
                    return;
                }
            };
            // Cancelled or cart emptied while the request was in flight
            if *watch.peek() != AuthorizationWatch::Requesting {
                return;
            }
            watch.set(AuthorizationWatch::start(&creada));
            if !watch.peek().is_waiting() {
                return;
            }

            let id = creada.id;
            let task = spawn(async move {
                let result = auth.client().poll_authorization(id, sleep).await;
                poll_task.set(None);
                match result {
                    Ok(resuelta) => {
                        watch.write().observe(resuelta.estado);
                        if resuelta.estado == EstadoAutorizacion::Rechazado {
                            cart.write().set_discount(DiscountInput::Ninguno);
                            error.set(Some("La solicitud de descuento fue rechazada".to_string()));
                        }
                    }
                    Err(e) => {
                        watch.write().cancel();
                        error.set(Some(auth.error_message(&e)));
                    }
                }
            });
            if let Some(previous) = poll_task.write().replace(task) {
                previous.cancel();
            }
        });
    };

    let cancelar_espera = move |_| {
        stop_polling();
        watch.write().withdraw(&mut cart.write());
    };

    let cobrar = move |_| {
        if submitting() {
            return;
        }
        let reglas = reglas_activas();
        let current = cart.read().clone();
        if current.is_empty() {
            error.set(Some("Agregue productos a la venta".to_string()));
            return;
        }
        let totals = current.totals(&reglas);
        let gate = DiscountGate::evaluate(
            auth.rol(),
            &state.configuracion.read().limites_descuento,
            totals.descuento_adicional.porcentaje,
            &watch.read(),
        );
        if gate.blocks_checkout() {
            error.set(Some("El descuento requiere autorización".to_string()));
            return;
        }

        let metodo_pago = metodo();
        let monto_recibido = if metodo_pago == MetodoPago::Efectivo {
            let Some(monto) = parse_amount(&recibido.read()) else {
                error.set(Some("Indique el monto recibido".to_string()));
                return;
            };
            if cambio(round2(totals.total), monto).is_none() {
                error.set(Some("El monto recibido es menor al total".to_string()));
                return;
            }
            Some(monto)
        } else {
            None
        };

        let datos_envio = if con_envio() {
            match envio.read().validate() {
                Ok(d) => Some(d),
                Err(err) => {
                    error.set(Some(err.message));
                    return;
                }
            }
        } else {
            None
        };

        let nueva = current.to_nueva_venta(
            &reglas,
            Checkout {
                referencia: referencia(),
                cliente_id: cliente_id(),
                metodo_pago,
                monto_recibido,
                autorizacion_id: gate.autorizacion_id(),
                envio: datos_envio,
            },
        );

        spawn(async move {
            submitting.set(true);
            error.set(None);
            match auth.client().create_sale(&nueva).await {
                Ok(venta) => {
                    tracing::info!(folio = ?venta.folio, total = %venta.total, "sale registered");
                    let vuelto = monto_recibido.and_then(|m| cambio(venta.total, m));
                    recibo.set(Some(Recibo { venta, cambio: vuelto }));
                    cart.write().clear();
                    watch.write().reset();
                    referencia.set(nueva_referencia());
                    recibido.set(String::new());
                    con_envio.set(false);
                    envio.set(EnvioForm::default());
                    costo_envio.set(String::new());
                    cliente_id.set(None);
                }
                // The cart is kept so the cashier can retry with the same reference.
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            submitting.set(false);
        });
    };

    let cambio_preview = if metodo() == MetodoPago::Efectivo {
        parse_amount(&recibido.read()).and_then(|m| cambio(round2(totals.total), m))
    } else {
        None
    };

    rsx! {
        div {
            h1 { class: "text-2xl font-bold text-gray-900 mb-6", "Punto de venta" }

            if let Some(message) = notice() {
                SuccessBanner { message, on_dismiss: move |_| notice.set(None) }
            }
            if let Some(message) = error() {
                ErrorBanner { message, on_dismiss: move |_| error.set(None) }
            }

            div {
                class: "grid grid-cols-1 lg:grid-cols-3 gap-6",
                div {
                    class: "lg:col-span-2 space-y-4",
                    ProductPicker {
                        productos: match &*productos.read() {
                            Some(Ok(rows)) => rows.clone(),
                            _ => Vec::new(),
                        },
                        simbolo: simbolo.clone(),
                        on_pick: move |p: Producto| {
                            if let Some(id) = p.id {
                                cart.write().add(id, &p.nombre, p.precio_venta, Decimal::ONE);
                            }
                        },
                    }
                    CartTable { cart, reglas: reglas_activas(), simbolo: simbolo.clone() }
                }

                div {
                    class: "space-y-4",
                    div {
                        class: "bg-white rounded-lg shadow-sm border border-gray-200 p-4 space-y-3",
                        h2 { class: "font-semibold text-gray-900", "Cliente" }
                        select {
                            class: INPUT,
                            onchange: move |e: FormEvent| cliente_id.set(e.value().parse().ok()),
                            option { value: "", selected: cliente_id().is_none(), "Consumidor final" }
                            if let Some(Ok(rows)) = &*clientes.read() {
                                for c in rows.iter().filter(|c| c.id.is_some()) {
                                    option {
                                        key: "{c.id:?}",
                                        value: c.id.map(|id| id.to_string()).unwrap_or_default(),
                                        selected: c.id == cliente_id(),
                                        "{c.nombre}"
                                    }
                                }
                            }
                        }
                    }

                    DiscountPanel {
                        cart,
                        subtotal: totals.subtotal,
                        porcentaje: totals.descuento_adicional.porcentaje,
                        monto: totals.descuento_adicional.monto,
                        disabled: watch.read().is_busy(),
                    }

                    match gate {
                        DiscountGate::NeedsAuthorization { limite } => rsx! {
                            div {
                                class: "bg-amber-50 border border-amber-200 rounded-lg p-3 text-sm text-amber-800 space-y-2",
                                p { "Su límite de descuento es {limite}%. Se necesita la autorización de un supervisor." }
                                button {
                                    class: BTN_PRIMARY,
                                    disabled: watch.read().is_busy(),
                                    onclick: solicitar_autorizacion,
                                    "Solicitar autorización"
                                }
                            }
                        },
                        DiscountGate::Waiting => rsx! {
                            div {
                                class: "bg-blue-50 border border-blue-200 rounded-lg p-3 text-sm text-blue-800 space-y-2",
                                p { "Esperando la autorización del supervisor..." }
                                button { class: BTN_SECONDARY, onclick: cancelar_espera, "Cancelar solicitud" }
                            }
                        },
                        DiscountGate::Authorized { .. } => rsx! {
                            div {
                                class: "bg-green-50 border border-green-200 rounded-lg p-3 text-sm text-green-800",
                                "Descuento autorizado"
                            }
                        },
                        DiscountGate::Allowed => rsx! {},
                    }

                    div {
                        class: "bg-white rounded-lg shadow-sm border border-gray-200 p-4 space-y-3",
                        CheckboxField {
                            label: "Entrega a domicilio",
                            checked: con_envio(),
                            onchange: move |v: bool| {
                                con_envio.set(v);
                                if !v {
                                    costo_envio.set(String::new());
                                    cart.write().set_costo_envio(Decimal::ZERO);
                                }
                            },
                        }
                        if con_envio() {
                            TextField {
                                label: "Dirección",
                                required: true,
                                value: envio.read().direccion.clone(),
                                oninput: move |v| envio.write().direccion = v,
                            }
                            TextField {
                                label: "Fecha programada",
                                kind: "date",
                                value: envio.read().fecha_programada.clone(),
                                oninput: move |v| envio.write().fecha_programada = v,
                            }
                            TextField {
                                label: "Costo de envío",
                                kind: "number",
                                value: costo_envio(),
                                oninput: move |v: String| {
                                    let costo = parse_amount(&v).unwrap_or(Decimal::ZERO);
                                    costo_envio.set(v);
                                    cart.write().set_costo_envio(costo);
                                },
                            }
                            TextField {
                                label: "Notas",
                                value: envio.read().notas.clone(),
                                oninput: move |v| envio.write().notas = v,
                            }
                        }
                    }

                    div {
                        class: "bg-white rounded-lg shadow-sm border border-gray-200 p-4 space-y-3",
                        dl {
                            class: "text-sm space-y-1",
                            TotalLine { label: "Subtotal", value: format_money(totals.subtotal, &simbolo) }
                            if !totals.descuento_volumen.is_zero() {
                                TotalLine { label: "Descuento por volumen", value: format!("-{}", format_money(totals.descuento_volumen, &simbolo)) }
                            }
                            if !totals.descuento_adicional.is_zero() {
                                TotalLine { label: "Descuento adicional", value: format!("-{}", format_money(totals.descuento_adicional.monto, &simbolo)) }
                            }
                            if !totals.costo_envio.is_zero() {
                                TotalLine { label: "Envío", value: format_money(totals.costo_envio, &simbolo) }
                            }
                            TotalLine { label: "Total", value: format_money(round2(totals.total), &simbolo), strong: true }
                        }

                        label {
                            class: "block",
                            span { class: "block text-sm font-medium text-gray-700 mb-1", "Método de pago" }
                            select {
                                class: INPUT,
                                onchange: move |e: FormEvent| {
                                    if let Some(m) = MetodoPago::from_slug(&e.value()) {
                                        metodo.set(m);
                                    }
                                },
                                for m in MetodoPago::variants().iter().copied() {
                                    option {
                                        key: "{m.slug()}",
                                        value: m.slug(),
                                        selected: m == metodo(),
                                        {m.label()}
                                    }
                                }
                            }
                        }
                        if metodo() == MetodoPago::Efectivo {
                            TextField {
                                label: "Monto recibido",
                                kind: "number",
                                value: recibido(),
                                oninput: move |v| recibido.set(v),
                            }
                            if let Some(vuelto) = cambio_preview {
                                p { class: "text-sm text-gray-700", "Cambio: " {format_money(vuelto, &simbolo)} }
                            }
                        }

                        button {
                            class: "{BTN_PRIMARY} w-full",
                            disabled: submitting() || cart.read().is_empty() || gate.blocks_checkout(),
                            onclick: cobrar,
                            if submitting() { "Registrando..." } else { "Cobrar" }
                        }
                        if !cart.read().is_empty() {
                            button {
                                class: "{BTN_SECONDARY} w-full",
                                disabled: submitting(),
                                onclick: move |_| {
                                    stop_polling();
                                    cart.write().clear();
                                    watch.write().reset();
                                    costo_envio.set(String::new());
                                },
                                "Vaciar carrito"
                            }
                        }
                    }
                }
            }

            if let Some(r) = recibo() {
                ReciboDialog {
                    recibo: r,
                    simbolo: simbolo.clone(),
                    on_close: move |_| {
                        recibo.set(None);
                        notice.set(Some("Venta registrada".to_string()));
                    },
                }
            }
        }
    }
}

#[component]
fn ProductPicker(productos: Vec<Producto>, simbolo: String, on_pick: EventHandler<Producto>) -> Element {
    let mut busqueda = use_signal(String::new);

    let activos: Vec<Producto> = productos.into_iter().filter(|p| p.activo).collect();
    let texto = busqueda();
    let sugerencias: Vec<Producto> = if texto.trim().is_empty() {
        Vec::new()
    } else {
        listing::filter(&activos, &texto)
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect()
    };

    // Enter adds the product whose code matches exactly, for barcode scanners.
    let por_codigo = activos
        .iter()
        .find(|p| p.codigo.as_deref().is_some_and(|c| c.eq_ignore_ascii_case(texto.trim())))
        .cloned();

    rsx! {
        div {
            class: "bg-white rounded-lg shadow-sm border border-gray-200 p-4",
            form {
                onsubmit: move |e: FormEvent| {
                    e.prevent_default();
                    if let Some(p) = por_codigo.clone() {
                        on_pick.call(p);
                        busqueda.set(String::new());
                    }
                },
                input {
                    class: INPUT,
                    r#type: "search",
                    autofocus: true,
                    placeholder: "Buscar producto por nombre o código",
                    value: "{busqueda}",
                    oninput: move |e: FormEvent| busqueda.set(e.value()),
                }
            }
            if !sugerencias.is_empty() {
                ul {
                    class: "mt-2 divide-y divide-gray-100 border border-gray-200 rounded-lg",
                    for p in sugerencias {
                        li {
                            key: "{p.id:?}",
                            button {
                                class: "w-full flex items-center justify-between px-3 py-2 text-left hover:bg-amber-50 disabled:opacity-40",
                                disabled: p.stock <= Decimal::ZERO,
                                onclick: {
                                    let p = p.clone();
                                    move |_| {
                                        on_pick.call(p.clone());
                                        busqueda.set(String::new());
                                    }
                                },
                                span {
                                    span { class: "font-medium text-gray-900", "{p.nombre}" }
                                    if let Some(codigo) = p.codigo.clone() {
                                        span { class: "ml-2 text-xs text-gray-400", "{codigo}" }
                                    }
                                }
                                span {
                                    class: "text-sm text-gray-600",
                                    {format_money(p.precio_venta, &simbolo)}
                                    span { class: "ml-2 text-xs text-gray-400", "Stock " {format_quantity(p.stock)} }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn CartTable(cart: Signal<Cart>, reglas: Vec<DescuentoVolumen>, simbolo: String) -> Element {
    let mut cart = cart;
    let lines = cart.read().lines().to_vec();

    if lines.is_empty() {
        return rsx! {
            div {
                class: "bg-white rounded-lg border border-dashed border-gray-300 p-12 text-center text-gray-500",
                "El carrito está vacío. Busque un producto para agregarlo."
            }
        };
    }

    rsx! {
        div {
            class: "bg-white rounded-lg shadow-sm border border-gray-200 overflow-x-auto",
            table {
                class: "min-w-full divide-y divide-gray-200",
                thead {
                    class: "bg-gray-50",
                    tr {
                        th { class: TH, "Producto" }
                        th { class: TH, "Precio" }
                        th { class: TH, "Cantidad" }
                        th { class: TH, "Descuento" }
                        th { class: TH, "Importe" }
                        th { class: TH }
                    }
                }
                tbody {
                    class: "divide-y divide-gray-100",
                    for line in lines {
                        tr {
                            key: "{line.producto_id}",
                            td { class: "{TD} font-medium text-gray-900", "{line.nombre}" }
                            td { class: TD, {format_money(line.precio_unitario, &simbolo)} }
                            td {
                                class: TD,
                                input {
                                    class: "{INPUT} w-24",
                                    r#type: "number",
                                    min: "0",
                                    step: "any",
                                    value: "{format_quantity(line.cantidad)}",
                                    onchange: {
                                        let id = line.producto_id;
                                        move |e: FormEvent| {
                                            if let Some(q) = parse_amount(&e.value()) {
                                                cart.write().set_quantity(id, q);
                                            }
                                        }
                                    },
                                }
                            }
                            td {
                                class: TD,
                                match line.regla_volumen(&reglas) {
                                    Some(regla) => rsx! {
                                        span {
                                            class: "text-green-700",
                                            title: "Descuento por volumen del {regla.porcentaje}%",
                                            {format!("-{}", format_money(line.descuento_volumen(&reglas), &simbolo))}
                                        }
                                    },
                                    None => rsx! { "" },
                                }
                            }
                            td { class: TD, {format_money(line.importe(), &simbolo)} }
                            td {
                                class: "{TD} text-right",
                                button {
                                    class: "text-sm text-red-600 hover:text-red-800",
                                    onclick: {
                                        let id = line.producto_id;
                                        move |_| cart.write().remove(id)
                                    },
                                    "Quitar"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Percentage and amount inputs; the one not being typed follows the other.
#[component]
fn DiscountPanel(
    cart: Signal<Cart>,
    subtotal: Decimal,
    porcentaje: Decimal,
    monto: Decimal,
    disabled: bool,
) -> Element {
    let mut cart = cart;
    let mut pct_text = use_signal(String::new);
    let mut monto_text = use_signal(String::new);

    let input = cart.read().discount_input();
    let pct_value = match input {
        DiscountInput::Porcentaje(_) => pct_text(),
        DiscountInput::Ninguno => String::new(),
        DiscountInput::Monto(_) => format!("{:.2}", round2(porcentaje)),
    };
    let monto_value = match input {
        DiscountInput::Monto(_) => monto_text(),
        DiscountInput::Ninguno => String::new(),
        DiscountInput::Porcentaje(_) => format!("{:.2}", round2(monto)),
    };

    rsx! {
        div {
            class: "bg-white rounded-lg shadow-sm border border-gray-200 p-4 space-y-3",
            h2 { class: "font-semibold text-gray-900", "Descuento adicional" }
            div {
                class: "grid grid-cols-2 gap-3",
                label {
                    class: "block",
                    span { class: "block text-sm font-medium text-gray-700 mb-1", "Porcentaje" }
                    input {
                        class: INPUT,
                        r#type: "number",
                        min: "0",
                        max: "100",
                        step: "any",
                        disabled: disabled || subtotal.is_zero(),
                        value: "{pct_value}",
                        oninput: move |e: FormEvent| {
                            let text = e.value();
                            let descuento = match parse_amount(&text) {
                                Some(p) if !p.is_zero() => DiscountInput::Porcentaje(p),
                                _ if text.trim().is_empty() => DiscountInput::Ninguno,
                                _ => DiscountInput::Porcentaje(Decimal::ZERO),
                            };
                            pct_text.set(text);
                            cart.write().set_discount(descuento);
                        },
                    }
                }
                label {
                    class: "block",
                    span { class: "block text-sm font-medium text-gray-700 mb-1", "Monto" }
                    input {
                        class: INPUT,
                        r#type: "number",
                        min: "0",
                        step: "any",
                        disabled: disabled || subtotal.is_zero(),
                        value: "{monto_value}",
                        oninput: move |e: FormEvent| {
                            let text = e.value();
                            let descuento = match parse_amount(&text) {
                                Some(m) if !m.is_zero() => DiscountInput::Monto(m),
                                _ if text.trim().is_empty() => DiscountInput::Ninguno,
                                _ => DiscountInput::Monto(Decimal::ZERO),
                            };
                            monto_text.set(text);
                            cart.write().set_discount(descuento);
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn ReciboDialog(recibo: Recibo, simbolo: String, on_close: EventHandler<()>) -> Element {
    let venta = &recibo.venta;
    let folio = venta.folio.clone().unwrap_or_default();

    rsx! {
        Modal {
            title: format!("Venta {} registrada", folio),
            on_close: move |_| on_close.call(()),
            dl {
                class: "text-sm space-y-1 mb-6",
                TotalLine { label: "Total", value: format_money(venta.total, &simbolo), strong: true }
                TotalLine { label: "Método de pago", value: venta.metodo_pago.label().to_string() }
                if let Some(vuelto) = recibo.cambio {
                    TotalLine { label: "Cambio", value: format_money(vuelto, &simbolo), strong: true }
                }
            }
            div {
                class: "flex justify-end",
                button {
                    class: BTN_PRIMARY,
                    onclick: move |_| on_close.call(()),
                    "Nueva venta"
                }
            }
        }
    }
}
