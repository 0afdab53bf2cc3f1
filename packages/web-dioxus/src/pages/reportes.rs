//! Reports with PDF, Excel and CSV export
//!
//! The report is fetched once as JSON and laid out as a [`ReportTable`];
//! every export format is rendered in the browser from that table.

use chrono::NaiveDate;
use dioxus::prelude::*;

use tienda_core::models::{RangoFechas, TipoReporte};
use tienda_core::money::format_money;
use tienda_export::pdf::{font_file_names, FontFiles};
use tienda_export::{csv, pdf, xlsx, ExportFormat, ReportTable};

use crate::api::{absolute_url, page_origin};
use crate::auth::use_auth;
use crate::components::{
    EmptyState, ErrorBanner, LoadingSpinner, BTN_PRIMARY, BTN_SECONDARY, INPUT, TD, TH,
};
use crate::download::save_file;
use crate::hooks::today;
use crate::state::use_app_state;

const FONTS_PATH: &str = "/fonts";

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Range from the two date inputs; `None` for snapshot reports.
fn rango_de(tipo: TipoReporte, desde: &str, hasta: &str) -> Result<Option<RangoFechas>, String> {
    if !tipo.usa_rango() {
        return Ok(None);
    }
    let (Some(desde), Some(hasta)) = (parse_date(desde), parse_date(hasta)) else {
        return Err("Seleccione las fechas del reporte".to_string());
    };
    RangoFechas::new(desde, hasta).map(Some).map_err(|e| e.message)
}

async fn fetch_font(name: &str) -> Result<Vec<u8>, reqwest::Error> {
    let url = absolute_url(&format!("{}/{}", FONTS_PATH, name), page_origin().as_deref());
    let resp = reqwest::get(url).await?.error_for_status()?;
    Ok(resp.bytes().await?.to_vec())
}

/// The PDF font family served next to the app.
async fn fetch_fonts() -> Result<FontFiles, reqwest::Error> {
    let [regular, bold, italic, bold_italic] = font_file_names();
    Ok(FontFiles {
        regular: fetch_font(&regular).await?,
        bold: fetch_font(&bold).await?,
        italic: fetch_font(&italic).await?,
        bold_italic: fetch_font(&bold_italic).await?,
    })
}

async fn render(
    format: ExportFormat,
    table: &ReportTable,
    nombre_tienda: &str,
    simbolo: &str,
) -> Result<Vec<u8>, String> {
    let rendered = match format {
        ExportFormat::Csv => csv::to_csv(table),
        ExportFormat::Xlsx => xlsx::to_xlsx(table),
        ExportFormat::Pdf => {
            let fonts = fetch_fonts().await.map_err(|e| {
                tracing::warn!(error = %e, "could not fetch PDF fonts");
                "No se pudieron cargar las fuentes para el PDF".to_string()
            })?;
            fonts
                .into_family()
                .and_then(|family| pdf::to_pdf(table, family, nombre_tienda, simbolo))
        }
    };
    rendered.map_err(|e| {
        tracing::warn!(error = %e, format = format.extension(), "export failed");
        e.user_message().to_string()
    })
}

#[derive(Clone, PartialEq)]
struct Generado {
    table: ReportTable,
    rango: Option<RangoFechas>,
}

#[component]
pub fn ReportesPage() -> Element {
    let auth = use_auth();
    let state = use_app_state();

    let inicial = RangoFechas::mes_actual(today());
    let mut tipo = use_signal(|| TipoReporte::Ventas);
    let mut desde = use_signal(|| inicial.desde.format("%Y-%m-%d").to_string());
    let mut hasta = use_signal(|| inicial.hasta.format("%Y-%m-%d").to_string());
    let mut generado = use_signal(|| None::<Generado>);
    let mut loading = use_signal(|| false);
    let mut exporting = use_signal(|| None::<ExportFormat>);
    let mut error = use_signal(|| None::<String>);

    let generar = move |e: FormEvent| {
        e.prevent_default();
        let tipo = tipo();
        let rango = match rango_de(tipo, &desde.read(), &hasta.read()) {
            Ok(r) => r,
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };
        // Snapshot reports ignore the range; the client still needs one.
        let consulta = rango.unwrap_or(inicial);
        spawn(async move {
            loading.set(true);
            error.set(None);
            match auth.client().report(tipo, &consulta).await {
                Ok(rows) => generado.set(Some(Generado {
                    table: ReportTable::from_rows(tipo, rango.as_ref(), &rows),
                    rango,
                })),
                Err(e) => {
                    generado.set(None);
                    error.set(Some(auth.error_message(&e)));
                }
            }
            loading.set(false);
        });
    };

    let exportar = move |format: ExportFormat| {
        let Some(actual) = generado() else {
            return;
        };
        let config = state.configuracion.read().clone();
        spawn(async move {
            exporting.set(Some(format));
            let file_name = actual.table.file_name(actual.rango.as_ref(), format.extension());
            let result = render(format, &actual.table, &config.nombre_tienda, &config.simbolo_moneda)
                .await
                .and_then(|bytes| {
                    save_file(&bytes, &file_name, format.mime_type()).map_err(|e| {
                        tracing::warn!(error = %e, "download failed");
                        "No se pudo descargar el archivo".to_string()
                    })
                });
            if let Err(message) = result {
                error.set(Some(message));
            }
            exporting.set(None);
        });
    };

    let simbolo = state.simbolo();
    let usa_rango = tipo().usa_rango();

    rsx! {
        div {
            h1 { class: "text-2xl font-bold text-gray-900 mb-6", "Reportes" }

            form {
                class: "bg-white rounded-lg shadow-sm border border-gray-200 p-4 mb-6 grid grid-cols-1 md:grid-cols-4 gap-4 items-end",
                onsubmit: generar,
                label {
                    class: "block",
                    span { class: "block text-sm font-medium text-gray-700 mb-1", "Reporte" }
                    select {
                        class: INPUT,
                        onchange: move |e: FormEvent| {
                            if let Some(t) = TipoReporte::from_slug(&e.value()) {
                                tipo.set(t);
                                generado.set(None);
                            }
                        },
                        for t in TipoReporte::variants().iter().copied() {
                            option {
                                key: "{t.slug()}",
                                value: t.slug(),
                                selected: t == tipo(),
                                {t.titulo()}
                            }
                        }
                    }
                }
                label {
                    class: "block",
                    span { class: "block text-sm font-medium text-gray-700 mb-1", "Desde" }
                    input {
                        class: INPUT,
                        r#type: "date",
                        disabled: !usa_rango,
                        value: "{desde}",
                        oninput: move |e: FormEvent| desde.set(e.value()),
                    }
                }
                label {
                    class: "block",
                    span { class: "block text-sm font-medium text-gray-700 mb-1", "Hasta" }
                    input {
                        class: INPUT,
                        r#type: "date",
                        disabled: !usa_rango,
                        value: "{hasta}",
                        oninput: move |e: FormEvent| hasta.set(e.value()),
                    }
                }
                button {
                    class: BTN_PRIMARY,
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Generando..." } else { "Generar" }
                }
            }

            if let Some(message) = error() {
                ErrorBanner { message, on_dismiss: move |_| error.set(None) }
            }

            if loading() {
                LoadingSpinner {}
            } else if let Some(Generado { table, .. }) = generado() {
                div {
                    class: "flex items-center justify-between mb-3",
                    div {
                        h2 { class: "text-lg font-semibold text-gray-900", "{table.titulo}" }
                        if let Some(subtitulo) = table.subtitulo.clone() {
                            p { class: "text-sm text-gray-500", "{subtitulo}" }
                        }
                    }
                    div {
                        class: "flex gap-2",
                        for format in [ExportFormat::Pdf, ExportFormat::Xlsx, ExportFormat::Csv] {
                            button {
                                key: "{format.extension()}",
                                class: BTN_SECONDARY,
                                disabled: table.is_empty() || exporting().is_some(),
                                onclick: move |_| exportar(format),
                                if exporting() == Some(format) { "Exportando..." } else { {format.label()} }
                            }
                        }
                    }
                }
                if table.is_empty() {
                    EmptyState { message: "El reporte no tiene datos para el periodo seleccionado." }
                } else {
                    ReportPreview { table, simbolo }
                }
            }
        }
    }
}

#[component]
fn ReportPreview(table: ReportTable, simbolo: String) -> Element {
    let totals = table.totals();

    rsx! {
        div {
            class: "bg-white rounded-lg shadow-sm border border-gray-200 overflow-x-auto",
            table {
                class: "min-w-full divide-y divide-gray-200",
                thead {
                    class: "bg-gray-50",
                    tr {
                        for spec in table.columns.iter() {
                            th {
                                key: "{spec.header}",
                                class: if spec.is_numeric() { "{TH} text-right" } else { "{TH}" },
                                "{spec.header}"
                            }
                        }
                    }
                }
                tbody {
                    class: "divide-y divide-gray-100",
                    for (i, row) in table.rows.iter().enumerate() {
                        tr {
                            key: "{i}",
                            for (j, cell) in row.iter().enumerate() {
                                td {
                                    key: "{j}",
                                    class: if table.columns[j].is_numeric() { "{TD} text-right" } else { "{TD}" },
                                    {cell.display(&simbolo)}
                                }
                            }
                        }
                    }
                }
                if table.has_totals() {
                    tfoot {
                        class: "bg-gray-50 font-semibold",
                        tr {
                            for (j, total) in totals.iter().enumerate() {
                                td {
                                    key: "{j}",
                                    class: "{TD} text-right",
                                    if j == 0 {
                                        "Total"
                                    } else if let Some(total) = total {
                                        {format_money(*total, &simbolo)}
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
