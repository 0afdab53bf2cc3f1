//! Additional-discount conversion for the sales screen.
//!
//! The cashier may type either a flat amount or a percentage of the
//! subtotal; the other value is recomputed from it. The amount stays in
//! `[0, subtotal]` and the percentage in `[0, 100]`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// An additional discount expressed both ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Discount {
    pub monto: Decimal,
    pub porcentaje: Decimal,
}

impl Discount {
    pub const NONE: Discount = Discount {
        monto: Decimal::ZERO,
        porcentaje: Decimal::ZERO,
    };

    /// Build from a percentage of `subtotal`. `monto = subtotal * pct / 100`.
    pub fn from_percentage(porcentaje: Decimal, subtotal: Decimal) -> Self {
        if subtotal <= Decimal::ZERO {
            return Self::NONE;
        }

        let porcentaje = porcentaje.clamp(Decimal::ZERO, HUNDRED);
        let monto = (subtotal * porcentaje / HUNDRED).clamp(Decimal::ZERO, subtotal);
        Self { monto, porcentaje }
    }

    /// Build from a flat amount. `pct = monto / subtotal * 100`.
    pub fn from_amount(monto: Decimal, subtotal: Decimal) -> Self {
        if subtotal <= Decimal::ZERO {
            return Self::NONE;
        }

        let monto = monto.clamp(Decimal::ZERO, subtotal);
        let porcentaje = (monto / subtotal * HUNDRED).clamp(Decimal::ZERO, HUNDRED);
        Self { monto, porcentaje }
    }

    pub fn is_zero(&self) -> bool {
        self.monto.is_zero()
    }
}

/// What the cashier typed last. The other representation is derived from
/// the current subtotal every time totals are computed, so a discount typed
/// as a percentage follows the cart while a flat amount stays fixed (and is
/// clamped if the cart shrinks below it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "tipo", content = "valor", rename_all = "snake_case")]
pub enum DiscountInput {
    #[default]
    Ninguno,
    Porcentaje(Decimal),
    Monto(Decimal),
}

impl DiscountInput {
    pub fn resolve(&self, subtotal: Decimal) -> Discount {
        match *self {
            DiscountInput::Ninguno => Discount::NONE,
            DiscountInput::Porcentaje(pct) => Discount::from_percentage(pct, subtotal),
            DiscountInput::Monto(monto) => Discount::from_amount(monto, subtotal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Decimal, b: Decimal) -> bool {
        (a - b).abs() < Decimal::new(1, 10)
    }

    #[test]
    fn test_percentage_round_trip() {
        let subtotals = [
            Decimal::new(4000, 2),
            Decimal::new(333, 2),
            Decimal::new(1, 2),
            Decimal::new(98765432, 2),
        ];
        let percentages = [
            Decimal::ZERO,
            Decimal::new(1, 1),
            Decimal::new(3333, 2),
            Decimal::from(50),
            Decimal::new(9999, 2),
            Decimal::from(100),
        ];

        for subtotal in subtotals {
            for pct in percentages {
                let forward = Discount::from_percentage(pct, subtotal);
                let back = Discount::from_amount(forward.monto, subtotal);
                assert!(
                    close(back.porcentaje, pct),
                    "{} -> {} -> {} on subtotal {}",
                    pct,
                    forward.monto,
                    back.porcentaje,
                    subtotal
                );
            }
        }
    }

    #[test]
    fn test_amount_above_subtotal_is_clamped() {
        let subtotal = Decimal::new(4000, 2);
        let d = Discount::from_amount(Decimal::new(9999, 2), subtotal);
        assert_eq!(d.monto, subtotal);
        assert_eq!(d.porcentaje, Decimal::from(100));
    }

    #[test]
    fn test_negative_inputs_clamp_to_zero() {
        let subtotal = Decimal::from(40);
        assert_eq!(Discount::from_amount(Decimal::from(-5), subtotal), Discount::NONE);
        assert_eq!(Discount::from_percentage(Decimal::from(-5), subtotal), Discount::NONE);
    }

    #[test]
    fn test_percentage_above_hundred_is_clamped() {
        let subtotal = Decimal::from(40);
        let d = Discount::from_percentage(Decimal::from(150), subtotal);
        assert_eq!(d.porcentaje, Decimal::from(100));
        assert_eq!(d.monto, subtotal);
    }

    #[test]
    fn test_zero_subtotal_guard() {
        assert_eq!(Discount::from_amount(Decimal::from(10), Decimal::ZERO), Discount::NONE);
        assert_eq!(Discount::from_percentage(Decimal::from(10), Decimal::ZERO), Discount::NONE);
    }

    #[test]
    fn test_ten_percent_of_forty() {
        let d = Discount::from_percentage(Decimal::from(10), Decimal::from(40));
        assert_eq!(d.monto, Decimal::from(4));
    }

    #[test]
    fn test_input_resolves_against_current_subtotal() {
        let pct = DiscountInput::Porcentaje(Decimal::from(10));
        assert_eq!(pct.resolve(Decimal::from(40)).monto, Decimal::from(4));
        assert_eq!(pct.resolve(Decimal::from(80)).monto, Decimal::from(8));

        let flat = DiscountInput::Monto(Decimal::from(30));
        assert_eq!(flat.resolve(Decimal::from(40)).porcentaje, Decimal::from(75));
        assert_eq!(flat.resolve(Decimal::from(20)).monto, Decimal::from(20));

        assert_eq!(DiscountInput::Ninguno.resolve(Decimal::from(40)), Discount::NONE);
    }
}
