use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstadoAutorizacion {
    #[default]
    Pendiente,
    Aprobado,
    Rechazado,
}

impl EstadoAutorizacion {
    pub fn label(&self) -> &'static str {
        match self {
            EstadoAutorizacion::Pendiente => "Pendiente",
            EstadoAutorizacion::Aprobado => "Aprobado",
            EstadoAutorizacion::Rechazado => "Rechazado",
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, EstadoAutorizacion::Pendiente)
    }
}

/// Request for a supervisor to approve a discount above the cashier's limit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SolicitudAutorizacion {
    pub id: i64,
    #[serde(default)]
    pub porcentaje: Decimal,
    #[serde(default)]
    pub monto: Decimal,
    #[serde(default)]
    pub subtotal: Decimal,
    #[serde(default)]
    pub solicitado_por: Option<String>,
    #[serde(default)]
    pub motivo: Option<String>,
    #[serde(default)]
    pub estado: EstadoAutorizacion,
    #[serde(default)]
    pub resuelto_por: Option<String>,
    #[serde(default)]
    pub fecha: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuevaSolicitudAutorizacion {
    pub porcentaje: Decimal,
    pub monto: Decimal,
    pub subtotal: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivo: Option<String>,
}
