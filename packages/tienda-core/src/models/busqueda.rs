use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoResultado {
    Producto,
    Cliente,
    Proveedor,
    Venta,
    Pedido,
}

impl TipoResultado {
    pub fn label(&self) -> &'static str {
        match self {
            TipoResultado::Producto => "Producto",
            TipoResultado::Cliente => "Cliente",
            TipoResultado::Proveedor => "Proveedor",
            TipoResultado::Venta => "Venta",
            TipoResultado::Pedido => "Pedido",
        }
    }
}

/// Hit returned by the global search overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultadoBusqueda {
    pub tipo: TipoResultado,
    pub id: i64,
    pub titulo: String,
    #[serde(default)]
    pub subtitulo: Option<String>,
}

/// Queries shorter than this are not sent.
pub const MIN_LONGITUD_BUSQUEDA: usize = 2;

pub fn busqueda_valida(query: &str) -> bool {
    query.trim().chars().count() >= MIN_LONGITUD_BUSQUEDA
}
