//! Discount authorization workflow as seen from the sales screen.
//!
//! A cashier who enters a discount above their role's limit sends a request
//! and waits while the screen polls it. Checkout stays blocked until the
//! request is approved; a rejection resets the discount.

use rust_decimal::Decimal;

use crate::cart::Cart;
use crate::discount::DiscountInput;
use crate::models::{EstadoAutorizacion, LimitesDescuento, Rol, SolicitudAutorizacion};
use crate::money::round2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorizationWatch {
    #[default]
    Idle,
    /// Request sent, no answer from the backend yet
    Requesting,
    Waiting {
        solicitud_id: i64,
        porcentaje: Decimal,
    },
    Approved {
        solicitud_id: i64,
        porcentaje: Decimal,
    },
    Rejected {
        solicitud_id: i64,
    },
    Cancelled,
}

impl AuthorizationWatch {
    /// Start watching a freshly created request.
    pub fn start(solicitud: &SolicitudAutorizacion) -> Self {
        let mut watch = AuthorizationWatch::Waiting {
            solicitud_id: solicitud.id,
            porcentaje: solicitud.porcentaje,
        };
        watch.observe(solicitud.estado);
        watch
    }

    /// Mark a request as in flight. Returns `false` when one is already
    /// being sent or awaited, in which case nothing must be sent.
    pub fn begin_request(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        *self = AuthorizationWatch::Requesting;
        true
    }

    /// Feed the status returned by a poll. Returns `true` once polling
    /// should stop.
    pub fn observe(&mut self, estado: EstadoAutorizacion) -> bool {
        let AuthorizationWatch::Waiting {
            solicitud_id,
            porcentaje,
        } = *self
        else {
            return true;
        };

        match estado {
            EstadoAutorizacion::Pendiente => false,
            EstadoAutorizacion::Aprobado => {
                tracing::info!(solicitud_id, "discount authorization approved");
                *self = AuthorizationWatch::Approved {
                    solicitud_id,
                    porcentaje,
                };
                true
            }
            EstadoAutorizacion::Rechazado => {
                tracing::info!(solicitud_id, "discount authorization rejected");
                *self = AuthorizationWatch::Rejected { solicitud_id };
                true
            }
        }
    }

    /// The cashier gave up waiting.
    pub fn cancel(&mut self) {
        if self.is_busy() {
            *self = AuthorizationWatch::Cancelled;
        }
    }

    /// Cancel and drop the discount the request was for.
    pub fn withdraw(&mut self, cart: &mut Cart) {
        if self.is_busy() {
            self.cancel();
            cart.set_discount(DiscountInput::Ninguno);
        }
    }

    pub fn reset(&mut self) {
        *self = AuthorizationWatch::Idle;
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self, AuthorizationWatch::Waiting { .. })
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, AuthorizationWatch::Requesting | AuthorizationWatch::Waiting { .. })
    }

    pub fn solicitud_id(&self) -> Option<i64> {
        match *self {
            AuthorizationWatch::Waiting { solicitud_id, .. }
            | AuthorizationWatch::Approved { solicitud_id, .. }
            | AuthorizationWatch::Rejected { solicitud_id } => Some(solicitud_id),
            AuthorizationWatch::Idle
            | AuthorizationWatch::Requesting
            | AuthorizationWatch::Cancelled => None,
        }
    }

    /// Approved request that covers `porcentaje`, if any. Both sides are
    /// compared at two decimals, the precision requests are sent with.
    pub fn approval_for(&self, porcentaje: Decimal) -> Option<i64> {
        match *self {
            AuthorizationWatch::Approved {
                solicitud_id,
                porcentaje: aprobado,
            } if round2(porcentaje) <= round2(aprobado) => Some(solicitud_id),
            _ => None,
        }
    }
}

/// Whether checkout may proceed with the current discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountGate {
    /// Within the role's own limit
    Allowed,
    /// Covered by an approved request
    Authorized { solicitud_id: i64 },
    /// A request has to be sent first
    NeedsAuthorization { limite: Decimal },
    /// A request is pending
    Waiting,
}

impl DiscountGate {
    pub fn evaluate(
        rol: Rol,
        limites: &LimitesDescuento,
        porcentaje: Decimal,
        watch: &AuthorizationWatch,
    ) -> Self {
        let porcentaje = round2(porcentaje);
        if !limites.requiere_autorizacion(rol, porcentaje) {
            return DiscountGate::Allowed;
        }
        if let Some(solicitud_id) = watch.approval_for(porcentaje) {
            return DiscountGate::Authorized { solicitud_id };
        }
        if watch.is_busy() {
            return DiscountGate::Waiting;
        }
        DiscountGate::NeedsAuthorization {
            limite: limites.limite_para(rol),
        }
    }

    pub fn blocks_checkout(&self) -> bool {
        matches!(
            self,
            DiscountGate::NeedsAuthorization { .. } | DiscountGate::Waiting
        )
    }

    pub fn autorizacion_id(&self) -> Option<i64> {
        match *self {
            DiscountGate::Authorized { solicitud_id } => Some(solicitud_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solicitud(id: i64, pct: i64, estado: EstadoAutorizacion) -> SolicitudAutorizacion {
        SolicitudAutorizacion {
            id,
            porcentaje: Decimal::from(pct),
            estado,
            ..Default::default()
        }
    }

    #[test]
    fn test_polling_stops_on_approval() {
        let mut watch = AuthorizationWatch::start(&solicitud(9, 20, EstadoAutorizacion::Pendiente));
        assert!(watch.is_waiting());

        let statuses = [
            EstadoAutorizacion::Pendiente,
            EstadoAutorizacion::Pendiente,
            EstadoAutorizacion::Aprobado,
        ];
        let mut polls = 0;
        for estado in statuses {
            polls += 1;
            if watch.observe(estado) {
                break;
            }
        }

        assert_eq!(polls, 3);
        assert!(!watch.is_waiting());
        assert_eq!(watch.approval_for(Decimal::from(20)), Some(9));
        assert_eq!(watch.approval_for(Decimal::from(25)), None);
    }

    #[test]
    fn test_polling_stops_on_rejection() {
        let mut watch = AuthorizationWatch::start(&solicitud(4, 30, EstadoAutorizacion::Pendiente));
        assert!(!watch.observe(EstadoAutorizacion::Pendiente));
        assert!(watch.observe(EstadoAutorizacion::Rechazado));
        assert_eq!(watch, AuthorizationWatch::Rejected { solicitud_id: 4 });
        assert_eq!(watch.approval_for(Decimal::from(30)), None);
    }

    #[test]
    fn test_already_resolved_request() {
        let watch = AuthorizationWatch::start(&solicitud(1, 10, EstadoAutorizacion::Aprobado));
        assert_eq!(watch.approval_for(Decimal::from(10)), Some(1));
    }

    #[test]
    fn test_cancel_only_while_waiting() {
        let mut watch = AuthorizationWatch::start(&solicitud(2, 30, EstadoAutorizacion::Pendiente));
        watch.cancel();
        assert_eq!(watch, AuthorizationWatch::Cancelled);
        assert!(watch.observe(EstadoAutorizacion::Aprobado));
        assert_eq!(watch, AuthorizationWatch::Cancelled);

        let mut approved = AuthorizationWatch::start(&solicitud(3, 30, EstadoAutorizacion::Aprobado));
        approved.cancel();
        assert!(matches!(approved, AuthorizationWatch::Approved { .. }));
    }

    #[test]
    fn test_only_one_request_in_flight() {
        let mut watch = AuthorizationWatch::Idle;
        assert!(watch.begin_request());
        assert!(!watch.begin_request());
        assert_eq!(
            DiscountGate::evaluate(Rol::Cajero, &LimitesDescuento::default(), Decimal::from(20), &watch),
            DiscountGate::Waiting
        );

        watch = AuthorizationWatch::start(&solicitud(5, 20, EstadoAutorizacion::Pendiente));
        assert!(!watch.begin_request());

        watch.observe(EstadoAutorizacion::Rechazado);
        assert!(watch.begin_request());
    }

    #[test]
    fn test_withdraw_clears_discount() {
        let limites = LimitesDescuento::default();
        let mut cart = Cart::default();
        cart.add(1, "Arroz", Decimal::from(10), Decimal::from(3));
        cart.set_discount(DiscountInput::Porcentaje(Decimal::from(20)));

        let mut watch = AuthorizationWatch::start(&solicitud(8, 20, EstadoAutorizacion::Pendiente));
        watch.withdraw(&mut cart);

        assert_eq!(watch, AuthorizationWatch::Cancelled);
        assert_eq!(cart.discount_input(), DiscountInput::Ninguno);
        let pct = cart.totals(&[]).descuento_adicional.porcentaje;
        assert_eq!(
            DiscountGate::evaluate(Rol::Cajero, &limites, pct, &watch),
            DiscountGate::Allowed
        );
    }

    #[test]
    fn test_withdraw_keeps_approved_discount() {
        let mut cart = Cart::default();
        cart.add(1, "Arroz", Decimal::from(10), Decimal::from(3));
        cart.set_discount(DiscountInput::Porcentaje(Decimal::from(20)));

        let mut watch = AuthorizationWatch::start(&solicitud(8, 20, EstadoAutorizacion::Aprobado));
        watch.withdraw(&mut cart);
        assert_eq!(cart.discount_input(), DiscountInput::Porcentaje(Decimal::from(20)));
    }

    #[test]
    fn test_gate_blocks_then_unblocks() {
        let limites = LimitesDescuento::default();
        let pct = Decimal::from(20);

        let mut watch = AuthorizationWatch::Idle;
        let gate = DiscountGate::evaluate(Rol::Cajero, &limites, pct, &watch);
        assert_eq!(gate, DiscountGate::NeedsAuthorization { limite: Decimal::from(5) });
        assert!(gate.blocks_checkout());

        watch = AuthorizationWatch::start(&solicitud(7, 20, EstadoAutorizacion::Pendiente));
        let gate = DiscountGate::evaluate(Rol::Cajero, &limites, pct, &watch);
        assert_eq!(gate, DiscountGate::Waiting);
        assert!(gate.blocks_checkout());

        watch.observe(EstadoAutorizacion::Aprobado);
        let gate = DiscountGate::evaluate(Rol::Cajero, &limites, pct, &watch);
        assert_eq!(gate, DiscountGate::Authorized { solicitud_id: 7 });
        assert!(!gate.blocks_checkout());
        assert_eq!(gate.autorizacion_id(), Some(7));
    }

    #[test]
    fn test_flat_amount_discount_unblocks_after_approval() {
        let mut cart = Cart::default();
        cart.add(1, "Arroz", Decimal::new(1000, 2), Decimal::from(3));
        cart.set_discount(DiscountInput::Monto(Decimal::from(10)));
        let pct = cart.totals(&[]).descuento_adicional.porcentaje;
        assert_ne!(pct, round2(pct));

        let limites = LimitesDescuento::default();
        let mut watch = AuthorizationWatch::start(&SolicitudAutorizacion {
            id: 11,
            porcentaje: round2(pct),
            estado: EstadoAutorizacion::Pendiente,
            ..Default::default()
        });
        assert_eq!(
            DiscountGate::evaluate(Rol::Cajero, &limites, pct, &watch),
            DiscountGate::Waiting
        );

        watch.observe(EstadoAutorizacion::Aprobado);
        let gate = DiscountGate::evaluate(Rol::Cajero, &limites, pct, &watch);
        assert_eq!(gate, DiscountGate::Authorized { solicitud_id: 11 });
        assert!(!gate.blocks_checkout());
    }

    #[test]
    fn test_gate_allows_within_limit() {
        let limites = LimitesDescuento::default();
        let gate = DiscountGate::evaluate(
            Rol::Supervisor,
            &limites,
            Decimal::from(15),
            &AuthorizationWatch::Idle,
        );
        assert_eq!(gate, DiscountGate::Allowed);
        assert_eq!(gate.autorizacion_id(), None);
    }
}
