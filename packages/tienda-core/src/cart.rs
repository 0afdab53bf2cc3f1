//! Cart of the sales screen.
//!
//! Totals are a preview; the server recomputes them when the sale is
//! registered. The one identity that always holds is
//! `total == subtotal - descuento_volumen - descuento_adicional + costo_envio`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::discount::{Discount, DiscountInput};
use crate::models::{DatosEnvio, DescuentoVolumen, MetodoPago, NuevaVenta, NuevaVentaItem};
use crate::money::round2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub producto_id: i64,
    pub nombre: String,
    pub precio_unitario: Decimal,
    pub cantidad: Decimal,
}

impl CartLine {
    pub fn importe(&self) -> Decimal {
        self.precio_unitario * self.cantidad
    }

    /// Best volume rule for this line: the highest threshold reached, then
    /// the highest percentage.
    pub fn regla_volumen<'a>(&self, reglas: &'a [DescuentoVolumen]) -> Option<&'a DescuentoVolumen> {
        reglas
            .iter()
            .filter(|r| r.aplica_a(self.producto_id, self.cantidad))
            .max_by(|a, b| {
                a.cantidad_minima
                    .cmp(&b.cantidad_minima)
                    .then(a.porcentaje.cmp(&b.porcentaje))
            })
    }

    pub fn descuento_volumen(&self, reglas: &[DescuentoVolumen]) -> Decimal {
        self.regla_volumen(reglas)
            .map(|regla| {
                let pct = regla.porcentaje.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
                round2(self.importe() * pct / Decimal::ONE_HUNDRED)
            })
            .unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub descuento_volumen: Decimal,
    pub descuento_adicional: Discount,
    pub costo_envio: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    descuento: DiscountInput,
    costo_envio: Decimal,
}

impl Cart {
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn item_count(&self) -> Decimal {
        self.lines.iter().map(|l| l.cantidad).sum()
    }

    /// Add units of a product, merging with an existing line.
    pub fn add(&mut self, producto_id: i64, nombre: &str, precio_unitario: Decimal, cantidad: Decimal) {
        if cantidad <= Decimal::ZERO {
            return;
        }

        match self.lines.iter_mut().find(|l| l.producto_id == producto_id) {
            Some(line) => line.cantidad += cantidad,
            None => self.lines.push(CartLine {
                producto_id,
                nombre: nombre.to_string(),
                precio_unitario,
                cantidad,
            }),
        }
    }

    /// Set a line's quantity. Zero or less removes the line.
    pub fn set_quantity(&mut self, producto_id: i64, cantidad: Decimal) {
        if cantidad <= Decimal::ZERO {
            self.remove(producto_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.producto_id == producto_id) {
            line.cantidad = cantidad;
        }
    }

    pub fn remove(&mut self, producto_id: i64) {
        self.lines.retain(|l| l.producto_id != producto_id);
    }

    /// Empty the cart and drop discount and shipping.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn discount_input(&self) -> DiscountInput {
        self.descuento
    }

    pub fn set_discount(&mut self, input: DiscountInput) {
        self.descuento = input;
    }

    pub fn costo_envio(&self) -> Decimal {
        self.costo_envio
    }

    pub fn set_costo_envio(&mut self, costo: Decimal) {
        self.costo_envio = costo.max(Decimal::ZERO);
    }

    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::importe).sum()
    }

    pub fn totals(&self, reglas: &[DescuentoVolumen]) -> CartTotals {
        let subtotal = self.subtotal();
        let descuento_volumen: Decimal = self.lines.iter().map(|l| l.descuento_volumen(reglas)).sum();
        let descuento_adicional = self.descuento.resolve(subtotal);

        CartTotals {
            subtotal,
            descuento_volumen,
            descuento_adicional,
            costo_envio: self.costo_envio,
            total: subtotal - descuento_volumen - descuento_adicional.monto + self.costo_envio,
        }
    }

    /// Build the checkout payload.
    pub fn to_nueva_venta(&self, reglas: &[DescuentoVolumen], checkout: Checkout) -> NuevaVenta {
        let totals = self.totals(reglas);

        NuevaVenta {
            referencia: checkout.referencia,
            cliente_id: checkout.cliente_id,
            items: self
                .lines
                .iter()
                .map(|l| NuevaVentaItem {
                    producto_id: l.producto_id,
                    cantidad: l.cantidad,
                    precio_unitario: l.precio_unitario,
                })
                .collect(),
            descuento_adicional: round2(totals.descuento_adicional.monto),
            porcentaje_descuento: round2(totals.descuento_adicional.porcentaje),
            costo_envio: round2(totals.costo_envio),
            total: round2(totals.total),
            metodo_pago: checkout.metodo_pago,
            monto_recibido: checkout.monto_recibido,
            autorizacion_id: checkout.autorizacion_id,
            envio: checkout.envio,
        }
    }
}

/// Checkout details not held in the cart itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Checkout {
    pub referencia: String,
    pub cliente_id: Option<i64>,
    pub metodo_pago: MetodoPago,
    pub monto_recibido: Option<Decimal>,
    pub autorizacion_id: Option<i64>,
    pub envio: Option<DatosEnvio>,
}

/// Change owed to the customer for a cash payment.
pub fn cambio(total: Decimal, recibido: Decimal) -> Option<Decimal> {
    if recibido < total {
        None
    } else {
        Some(recibido - total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(v: i64, scale: u32) -> Decimal {
        Decimal::new(v, scale)
    }

    fn regla(producto_id: Option<i64>, minima: i64, pct: i64) -> DescuentoVolumen {
        DescuentoVolumen {
            producto_id,
            cantidad_minima: Decimal::from(minima),
            porcentaje: Decimal::from(pct),
            activo: true,
            ..Default::default()
        }
    }

    fn scenario_cart() -> Cart {
        let mut cart = Cart::default();
        cart.add(1, "A", dec(1000, 2), Decimal::from(3));
        cart.add(2, "B", dec(500, 2), Decimal::from(2));
        cart
    }

    #[test]
    fn test_scenario_without_discounts() {
        let totals = scenario_cart().totals(&[]);
        assert_eq!(totals.subtotal, dec(4000, 2));
        assert_eq!(totals.total, dec(4000, 2));
    }

    #[test]
    fn test_scenario_with_ten_percent() {
        let mut cart = scenario_cart();
        cart.set_discount(DiscountInput::Porcentaje(Decimal::from(10)));
        let totals = cart.totals(&[]);
        assert_eq!(totals.descuento_adicional.monto, dec(400, 2));
        assert_eq!(totals.total, dec(3600, 2));
    }

    #[test]
    fn test_add_merges_lines() {
        let mut cart = scenario_cart();
        cart.add(1, "A", dec(1000, 2), Decimal::from(2));
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].cantidad, Decimal::from(5));
        assert_eq!(cart.item_count(), Decimal::from(7));

        cart.add(3, "C", dec(100, 2), Decimal::ZERO);
        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = scenario_cart();
        cart.set_quantity(2, Decimal::ZERO);
        assert_eq!(cart.lines().len(), 1);
        cart.set_quantity(1, Decimal::from(4));
        assert_eq!(cart.subtotal(), dec(4000, 2));
    }

    #[test]
    fn test_volume_rule_picks_highest_threshold_reached() {
        let reglas = vec![
            regla(Some(1), 3, 5),
            regla(Some(1), 10, 10),
            regla(None, 2, 2),
            regla(Some(2), 1, 50),
        ];
        let mut cart = Cart::default();
        cart.add(1, "A", dec(1000, 2), Decimal::from(3));

        // 30.00 at 5%
        assert_eq!(cart.totals(&reglas).descuento_volumen, dec(150, 2));

        cart.set_quantity(1, Decimal::from(10));
        // 100.00 at 10%
        assert_eq!(cart.totals(&reglas).descuento_volumen, dec(1000, 2));

        cart.set_quantity(1, Decimal::from(2));
        // only the global rule
        assert_eq!(cart.totals(&reglas).descuento_volumen, dec(40, 2));

        let inactivas: Vec<_> = reglas
            .into_iter()
            .map(|r| DescuentoVolumen { activo: false, ..r })
            .collect();
        assert_eq!(cart.totals(&inactivas).descuento_volumen, Decimal::ZERO);
    }

    #[test]
    fn test_inactive_rules_are_ignored() {
        let mut inactive = regla(None, 1, 50);
        inactive.activo = false;
        let totals = scenario_cart().totals(&[inactive]);
        assert_eq!(totals.descuento_volumen, Decimal::ZERO);
    }

    #[test]
    fn test_total_identity_holds() {
        let prices = [dec(0, 2), dec(1, 2), dec(999, 2), dec(123456, 2)];
        let quantities = [Decimal::ONE, Decimal::from(3), dec(25, 1), Decimal::from(40)];
        let discounts = [
            DiscountInput::Ninguno,
            DiscountInput::Porcentaje(dec(125, 1)),
            DiscountInput::Monto(dec(750, 2)),
            DiscountInput::Monto(dec(99999999, 2)),
        ];
        let shipping = [Decimal::ZERO, dec(2500, 2)];
        let reglas = vec![regla(None, 3, 5), regla(Some(1), 10, 10)];

        for price in prices {
            for qty in quantities {
                for discount in discounts {
                    for envio in shipping {
                        let mut cart = Cart::default();
                        cart.add(1, "A", price, qty);
                        cart.add(2, "B", dec(350, 2), Decimal::from(2));
                        cart.set_discount(discount);
                        cart.set_costo_envio(envio);

                        let t = cart.totals(&reglas);
                        assert_eq!(
                            t.total,
                            t.subtotal - t.descuento_volumen - t.descuento_adicional.monto + t.costo_envio
                        );
                        assert!(t.descuento_adicional.monto <= t.subtotal);
                    }
                }
            }
        }
    }

    #[test]
    fn test_negative_shipping_is_zeroed() {
        let mut cart = scenario_cart();
        cart.set_costo_envio(Decimal::from(-5));
        assert_eq!(cart.costo_envio(), Decimal::ZERO);
    }

    #[test]
    fn test_to_nueva_venta() {
        let mut cart = scenario_cart();
        cart.set_discount(DiscountInput::Porcentaje(Decimal::from(10)));
        cart.set_costo_envio(Decimal::from(15));

        let venta = cart.to_nueva_venta(
            &[],
            Checkout {
                referencia: "ref-1".into(),
                metodo_pago: MetodoPago::Tarjeta,
                ..Default::default()
            },
        );
        assert_eq!(venta.items.len(), 2);
        assert_eq!(venta.descuento_adicional, dec(400, 2));
        assert_eq!(venta.porcentaje_descuento, Decimal::from(10));
        assert_eq!(venta.total, dec(5100, 2));
        assert_eq!(venta.metodo_pago, MetodoPago::Tarjeta);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cart = scenario_cart();
        cart.set_discount(DiscountInput::Monto(Decimal::ONE));
        cart.set_costo_envio(Decimal::ONE);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.discount_input(), DiscountInput::Ninguno);
        assert_eq!(cart.totals(&[]).total, Decimal::ZERO);
    }

    #[test]
    fn test_cambio() {
        assert_eq!(cambio(dec(3600, 2), Decimal::from(50)), Some(dec(1400, 2)));
        assert_eq!(cambio(dec(3600, 2), Decimal::from(20)), None);
    }
}
