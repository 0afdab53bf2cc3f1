use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{default_true, present};
use crate::listing::Searchable;

/// Percentage applied automatically once a line reaches `cantidad_minima`.
/// Without `producto_id` the rule applies to every product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescuentoVolumen {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub producto_id: Option<i64>,
    #[serde(default)]
    pub producto_nombre: Option<String>,
    pub cantidad_minima: Decimal,
    pub porcentaje: Decimal,
    #[serde(default = "default_true")]
    pub activo: bool,
}

impl Default for DescuentoVolumen {
    fn default() -> Self {
        Self {
            id: None,
            producto_id: None,
            producto_nombre: None,
            cantidad_minima: Decimal::ONE,
            porcentaje: Decimal::ZERO,
            activo: default_true(),
        }
    }
}

impl DescuentoVolumen {
    pub fn aplica_a(&self, producto_id: i64, cantidad: Decimal) -> bool {
        self.activo
            && self.producto_id.map_or(true, |id| id == producto_id)
            && cantidad >= self.cantidad_minima
    }
}

impl Searchable for DescuentoVolumen {
    fn search_fields(&self) -> Vec<&str> {
        present([&self.producto_nombre]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_decoded_rules_start_active() {
        assert!(DescuentoVolumen::default().activo);

        let decoded: DescuentoVolumen =
            serde_json::from_value(serde_json::json!({"cantidad_minima": 5, "porcentaje": "10"})).unwrap();
        assert!(decoded.activo);
        assert!(decoded.aplica_a(3, Decimal::from(5)));
        assert!(!decoded.aplica_a(3, Decimal::from(4)));
    }
}
