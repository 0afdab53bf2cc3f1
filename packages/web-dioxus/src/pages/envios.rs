//! Deliveries
//!
//! Shipments change state outside this screen (drivers, other terminals),
//! so the list refreshes itself on the shipments schedule.

use dioxus::prelude::*;

use tienda_core::listing;
use tienda_core::models::{Envio, EstadoEnvio};
use tienda_core::money::format_money;
use tienda_core::polling::PollSchedule;

use crate::auth::use_auth;
use crate::components::{EmptyState, ErrorBanner, LoadingSpinner, SearchBox, INPUT, TD, TH};
use crate::hooks::use_polling;
use crate::state::use_app_state;

fn estado_class(estado: EstadoEnvio) -> &'static str {
    match estado {
        EstadoEnvio::Pendiente => "px-2 py-0.5 rounded-full text-xs font-medium bg-amber-100 text-amber-800",
        EstadoEnvio::EnCamino => "px-2 py-0.5 rounded-full text-xs font-medium bg-blue-100 text-blue-800",
        EstadoEnvio::Entregado => "px-2 py-0.5 rounded-full text-xs font-medium bg-green-100 text-green-800",
        EstadoEnvio::Cancelado => "px-2 py-0.5 rounded-full text-xs font-medium bg-gray-100 text-gray-600",
    }
}

const ESTADOS: [EstadoEnvio; 4] = [
    EstadoEnvio::Pendiente,
    EstadoEnvio::EnCamino,
    EstadoEnvio::Entregado,
    EstadoEnvio::Cancelado,
];

#[component]
pub fn EnviosPage() -> Element {
    let auth = use_auth();
    let state = use_app_state();

    let mut envios = use_signal(|| None::<Vec<Envio>>);
    let mut filtro = use_signal(|| None::<EstadoEnvio>);
    let mut busqueda = use_signal(String::new);
    let mut updating = use_signal(|| None::<i64>);
    let mut error = use_signal(|| None::<String>);

    use_polling(PollSchedule::shipments(), move || async move {
        let rows = auth.client().fetch_all::<Envio>().await?;
        envios.set(Some(rows));
        Ok(())
    });

    let cambiar_estado = move |id: i64, estado: EstadoEnvio| {
        spawn(async move {
            updating.set(Some(id));
            match auth.client().set_shipment_status(id, estado).await {
                Ok(actualizado) => {
                    if let Some(rows) = envios.write().as_mut() {
                        if let Some(row) = rows.iter_mut().find(|e| e.id == Some(id)) {
                            *row = actualizado;
                        }
                    }
                }
                Err(e) => error.set(Some(auth.error_message(&e))),
            }
            updating.set(None);
        });
    };

    let simbolo = state.simbolo();
    let estado = filtro();
    let visibles: Option<Vec<Envio>> = envios.read().as_ref().map(|rows| {
        let por_estado: Vec<Envio> = rows
            .iter()
            .filter(|e| estado.map_or(true, |f| e.estado == f))
            .cloned()
            .collect();
        listing::filter(&por_estado, &busqueda())
            .into_iter()
            .cloned()
            .collect()
    });

    rsx! {
        div {
            div {
                class: "flex items-center justify-between mb-6",
                h1 { class: "text-2xl font-bold text-gray-900", "Envíos" }
                div {
                    class: "flex items-center gap-3",
                    select {
                        class: "{INPUT} w-44",
                        onchange: move |e: FormEvent| {
                            filtro.set(ESTADOS.iter().copied().find(|s| s.label() == e.value()));
                        },
                        option { value: "", "Todos los estados" }
                        for estado in ESTADOS {
                            option { key: "{estado.label()}", value: estado.label(), {estado.label()} }
                        }
                    }
                    SearchBox {
                        initial: busqueda(),
                        placeholder: "Buscar por cliente, venta o dirección",
                        on_search: move |q| busqueda.set(q),
                    }
                }
            }

            if let Some(message) = error() {
                ErrorBanner { message, on_dismiss: move |_| error.set(None) }
            }

            match visibles {
                None => rsx! { LoadingSpinner {} },
                Some(rows) if rows.is_empty() => rsx! {
                    EmptyState { message: "No hay envíos que mostrar." }
                },
                Some(rows) => rsx! {
                    div {
                        class: "bg-white rounded-lg shadow-sm border border-gray-200 overflow-x-auto",
                        table {
                            class: "min-w-full divide-y divide-gray-200",
                            thead {
                                class: "bg-gray-50",
                                tr {
                                    th { class: TH, "Venta" }
                                    th { class: TH, "Cliente" }
                                    th { class: TH, "Dirección" }
                                    th { class: TH, "Programado" }
                                    th { class: TH, "Costo" }
                                    th { class: TH, "Estado" }
                                    th { class: TH }
                                }
                            }
                            tbody {
                                class: "divide-y divide-gray-100",
                                for envio in rows {
                                    tr {
                                        key: "{envio.id:?}",
                                        class: "hover:bg-gray-50",
                                        td { class: "{TD} font-medium text-gray-900", {envio.folio_venta.clone().unwrap_or_else(|| envio.venta_id.to_string())} }
                                        td { class: TD, {envio.cliente_nombre.clone().unwrap_or_default()} }
                                        td {
                                            class: TD,
                                            "{envio.direccion}"
                                            if let Some(notas) = envio.notas.clone() {
                                                p { class: "text-xs text-gray-400", "{notas}" }
                                            }
                                        }
                                        td { class: TD, {envio.fecha_programada.clone().unwrap_or_default()} }
                                        td { class: TD, {format_money(envio.costo, &simbolo)} }
                                        td {
                                            class: TD,
                                            span { class: estado_class(envio.estado), {envio.estado.label()} }
                                        }
                                        td {
                                            class: "{TD} text-right space-x-2 whitespace-nowrap",
                                            if let Some(id) = envio.id {
                                                for siguiente in envio.estado.siguientes().iter().copied() {
                                                    button {
                                                        key: "{siguiente.label()}",
                                                        class: if siguiente == EstadoEnvio::Cancelado {
                                                            "text-sm text-red-600 hover:text-red-800 font-medium disabled:opacity-40"
                                                        } else {
                                                            "text-sm text-amber-700 hover:text-amber-900 font-medium disabled:opacity-40"
                                                        },
                                                        disabled: updating() == Some(id),
                                                        onclick: move |_| cambiar_estado(id, siguiente),
                                                        "Marcar "
                                                        {siguiente.label().to_lowercase()}
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
