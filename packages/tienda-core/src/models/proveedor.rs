use serde::{Deserialize, Serialize};

use super::present;
use crate::listing::Searchable;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Proveedor {
    #[serde(default)]
    pub id: Option<i64>,
    pub nombre: String,
    #[serde(default)]
    pub contacto: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub nit: Option<String>,
    /// Credit term the supplier grants, in days
    #[serde(default)]
    pub dias_credito: Option<u32>,
    #[serde(default)]
    pub notas: Option<String>,
}

impl Searchable for Proveedor {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.nombre.as_str()];
        fields.extend(present([&self.contacto, &self.telefono, &self.nit]));
        fields
    }
}
