use serde::{Deserialize, Serialize};

use super::present;
use crate::listing::Searchable;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cliente {
    #[serde(default)]
    pub id: Option<i64>,
    pub nombre: String,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub nit: Option<String>,
    #[serde(default)]
    pub notas: Option<String>,
}

impl Searchable for Cliente {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.nombre.as_str()];
        fields.extend(present([&self.telefono, &self.email, &self.nit]));
        fields
    }
}
