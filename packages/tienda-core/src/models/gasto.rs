use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{default_true, present};
use crate::listing::Searchable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frecuencia {
    Semanal,
    Quincenal,
    #[default]
    Mensual,
    Anual,
}

impl Frecuencia {
    pub fn label(&self) -> &'static str {
        match self {
            Frecuencia::Semanal => "Semanal",
            Frecuencia::Quincenal => "Quincenal",
            Frecuencia::Mensual => "Mensual",
            Frecuencia::Anual => "Anual",
        }
    }

    pub fn variants() -> &'static [Frecuencia] {
        &[
            Frecuencia::Semanal,
            Frecuencia::Quincenal,
            Frecuencia::Mensual,
            Frecuencia::Anual,
        ]
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Frecuencia::Semanal => "semanal",
            Frecuencia::Quincenal => "quincenal",
            Frecuencia::Mensual => "mensual",
            Frecuencia::Anual => "anual",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::variants().iter().copied().find(|f| f.slug() == slug)
    }

    /// Monthly equivalent of one payment.
    pub fn a_mensual(&self, monto: Decimal) -> Decimal {
        match self {
            Frecuencia::Semanal => monto * Decimal::from(52) / Decimal::from(12),
            Frecuencia::Quincenal => monto * Decimal::from(2),
            Frecuencia::Mensual => monto,
            Frecuencia::Anual => monto / Decimal::from(12),
        }
    }
}

/// Recurring business expense (rent, electricity, wages).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GastoFijo {
    #[serde(default)]
    pub id: Option<i64>,
    pub concepto: String,
    pub monto: Decimal,
    #[serde(default)]
    pub frecuencia: Frecuencia,
    /// Day of month (or week for weekly) the expense is due
    #[serde(default)]
    pub dia_pago: Option<u8>,
    #[serde(default = "default_true")]
    pub activo: bool,
    #[serde(default)]
    pub notas: Option<String>,
}

impl Searchable for GastoFijo {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.concepto.as_str()];
        fields.extend(present([&self.notas]));
        fields
    }
}

/// Monthly cost of the active fixed expenses.
pub fn total_mensual(gastos: &[GastoFijo]) -> Decimal {
    gastos
        .iter()
        .filter(|g| g.activo)
        .map(|g| g.frecuencia.a_mensual(g.monto))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_mensual_skips_inactive() {
        let gasto = |monto: i64, frecuencia, activo| GastoFijo {
            concepto: "x".into(),
            monto: Decimal::from(monto),
            frecuencia,
            activo,
            ..Default::default()
        };

        let gastos = vec![
            gasto(1000, Frecuencia::Mensual, true),
            gasto(100, Frecuencia::Quincenal, true),
            gasto(1200, Frecuencia::Anual, true),
            gasto(5000, Frecuencia::Mensual, false),
        ];
        assert_eq!(total_mensual(&gastos), Decimal::from(1300));
    }

    #[test]
    fn test_semanal_equivalent() {
        assert_eq!(Frecuencia::Semanal.a_mensual(Decimal::from(120)), Decimal::from(520));
    }
}
