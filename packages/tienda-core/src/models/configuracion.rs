use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Rol;
use crate::money::DEFAULT_CURRENCY_SYMBOL;

/// Highest additional-discount percentage each role may grant on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitesDescuento {
    pub cajero: Decimal,
    pub supervisor: Decimal,
    pub admin: Decimal,
}

impl Default for LimitesDescuento {
    fn default() -> Self {
        Self {
            cajero: Decimal::from(5),
            supervisor: Decimal::from(15),
            admin: Decimal::ONE_HUNDRED,
        }
    }
}

impl LimitesDescuento {
    pub fn limite_para(&self, rol: Rol) -> Decimal {
        match rol {
            Rol::Cajero => self.cajero,
            Rol::Supervisor => self.supervisor,
            Rol::Admin => self.admin,
        }
    }

    pub fn requiere_autorizacion(&self, rol: Rol, porcentaje: Decimal) -> bool {
        porcentaje > self.limite_para(rol)
    }
}

/// Store settings served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuracion {
    pub nombre_tienda: String,
    #[serde(default = "default_simbolo")]
    pub simbolo_moneda: String,
    #[serde(default)]
    pub nit: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub iva_porcentaje: Decimal,
    #[serde(default)]
    pub limites_descuento: LimitesDescuento,
}

fn default_simbolo() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for Configuracion {
    fn default() -> Self {
        Self {
            nombre_tienda: "Tienda".to_string(),
            simbolo_moneda: default_simbolo(),
            nit: None,
            direccion: None,
            telefono: None,
            iva_porcentaje: Decimal::from(12),
            limites_descuento: LimitesDescuento::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuracion_defaults_when_fields_missing() {
        let config: Configuracion = serde_json::from_str(r#"{"nombre_tienda":"Abarrotes Lupita"}"#).unwrap();
        assert_eq!(config.simbolo_moneda, "Q");
        assert_eq!(config.limites_descuento.cajero, Decimal::from(5));
    }

    #[test]
    fn test_requiere_autorizacion_is_strictly_above_limit() {
        let limites = LimitesDescuento::default();
        assert!(!limites.requiere_autorizacion(Rol::Cajero, Decimal::from(5)));
        assert!(limites.requiere_autorizacion(Rol::Cajero, Decimal::new(501, 2)));
        assert!(!limites.requiere_autorizacion(Rol::Supervisor, Decimal::from(15)));
        assert!(!limites.requiere_autorizacion(Rol::Admin, Decimal::from(100)));
    }
}
