//! Client-side domain logic for the tienda POS front-end.
//!
//! Nothing in this crate performs I/O. It holds the shapes the backend
//! returns, the small amount of arithmetic the sales screen previews before
//! the server confirms it, and the state containers the UI shell drives.
//!
//! # Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use tienda_core::cart::Cart;
//! use tienda_core::discount::DiscountInput;
//!
//! let mut cart = Cart::default();
//! cart.add(1, "Arroz", Decimal::new(1000, 2), Decimal::from(3));
//! cart.add(2, "Frijol", Decimal::new(500, 2), Decimal::from(2));
//!
//! let totals = cart.totals(&[]);
//! assert_eq!(totals.subtotal, Decimal::new(4000, 2));
//!
//! cart.set_discount(DiscountInput::Porcentaje(Decimal::from(10)));
//! assert_eq!(cart.totals(&[]).total, Decimal::new(3600, 2));
//! ```

pub mod authorization;
pub mod cart;
pub mod discount;
pub mod error;
pub mod forms;
pub mod listing;
pub mod models;
pub mod money;
pub mod polling;
pub mod routing;
pub mod session;

pub use error::{ValidationError, ValidationResult};
