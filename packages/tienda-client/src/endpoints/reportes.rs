use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use tienda_core::models::{RangoFechas, TipoReporte};

use crate::client::ApiClient;
use crate::error::{ApiError, Result};

/// Rows of a report, one JSON object per row.
pub type ReportRows = Vec<Map<String, Value>>;

#[derive(Deserialize)]
#[serde(untagged)]
enum ReportBody {
    Rows(Vec<Value>),
    Wrapped { data: Vec<Value> },
}

#[derive(Serialize)]
struct RangeQuery {
    desde: String,
    hasta: String,
}

impl ApiClient {
    /// Fetch a report. The range is not sent for snapshot reports.
    pub async fn report(&self, tipo: TipoReporte, rango: &RangoFechas) -> Result<ReportRows> {
        let path = format!("/reportes/{}", tipo.slug());
        let body: ReportBody = if tipo.usa_rango() {
            let query = RangeQuery {
                desde: rango.desde.format("%Y-%m-%d").to_string(),
                hasta: rango.hasta.format("%Y-%m-%d").to_string(),
            };
            self.get_with_query(&path, &query).await?
        } else {
            self.get(&path).await?
        };

        let rows = match body {
            ReportBody::Rows(rows) | ReportBody::Wrapped { data: rows } => rows,
        };

        let rows = rows
            .into_iter()
            .map(|row| match row {
                Value::Object(map) => Ok(map),
                other => Err(ApiError::Decode(format!("report row is not an object: {}", other))),
            })
            .collect::<Result<ReportRows>>()?;

        tracing::debug!(tipo = tipo.slug(), rows = rows.len(), "report fetched");
        Ok(rows)
    }
}
