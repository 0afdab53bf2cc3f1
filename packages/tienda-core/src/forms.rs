//! Form state for the CRUD screens.
//!
//! Inputs are bound as text. Each form checks presence and ranges before
//! building the payload, so obviously wrong values never reach the server;
//! the backend still validates everything.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{ValidationError, ValidationResult};
use crate::models::{
    Cliente, Configuracion, DatosEnvio, DescuentoVolumen, Devolucion, DevolucionItem, Frecuencia,
    GastoFijo, LimitesDescuento, LoginRequest, Lote, MetodoPago, NuevoPago, Pedido, PedidoItem,
    Producto, Proveedor, Rol, Usuario, Venta,
};
use crate::money::{format_quantity, parse_amount, round2};

fn required_text(field: &'static str, label: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::required(field, label));
    }
    Ok(value.to_string())
}

fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn number(field: &'static str, label: &str, value: &str) -> ValidationResult<Option<Decimal>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_amount(value)
        .map(Some)
        .ok_or_else(|| ValidationError::new(field, format!("{} debe ser un número", label)))
}

/// Empty counts as zero.
fn non_negative(field: &'static str, label: &str, value: &str) -> ValidationResult<Decimal> {
    let n = number(field, label, value)?.unwrap_or(Decimal::ZERO);
    if n < Decimal::ZERO {
        return Err(ValidationError::new(
            field,
            format!("{} no puede ser negativo", label),
        ));
    }
    Ok(n)
}

fn percentage(field: &'static str, label: &str, value: &str) -> ValidationResult<Decimal> {
    let n = non_negative(field, label, value)?;
    if n > Decimal::ONE_HUNDRED {
        return Err(ValidationError::new(
            field,
            format!("{} debe estar entre 0 y 100", label),
        ));
    }
    Ok(n)
}

fn email(field: &'static str, value: &str) -> ValidationResult<Option<String>> {
    match optional_text(value) {
        Some(email) if !email.contains('@') => {
            Err(ValidationError::new(field, "El correo electrónico no es válido"))
        }
        other => Ok(other),
    }
}

fn date(field: &'static str, label: &str, value: &str) -> ValidationResult<Option<NaiveDate>> {
    match optional_text(value) {
        None => Ok(None),
        Some(text) => NaiveDate::parse_from_str(&text, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ValidationError::new(field, format!("{} no es una fecha válida", label))),
    }
}

fn text_of(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> ValidationResult<LoginRequest> {
        Ok(LoginRequest {
            username: required_text("username", "usuario", &self.username)?,
            password: required_text("password", "contraseña", &self.password)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductoForm {
    pub id: Option<i64>,
    pub codigo: String,
    pub nombre: String,
    pub descripcion: String,
    pub categoria: String,
    pub precio_compra: String,
    pub precio_venta: String,
    pub stock: String,
    pub stock_minimo: String,
    pub unidad: String,
    pub activo: bool,
}

impl Default for ProductoForm {
    fn default() -> Self {
        Self::from(&Producto {
            unidad: "unidad".to_string(),
            activo: true,
            ..Default::default()
        })
    }
}

impl From<&Producto> for ProductoForm {
    fn from(p: &Producto) -> Self {
        Self {
            id: p.id,
            codigo: text_of(&p.codigo),
            nombre: p.nombre.clone(),
            descripcion: text_of(&p.descripcion),
            categoria: text_of(&p.categoria),
            precio_compra: p.precio_compra.to_string(),
            precio_venta: p.precio_venta.to_string(),
            stock: format_quantity(p.stock),
            stock_minimo: format_quantity(p.stock_minimo),
            unidad: p.unidad.clone(),
            activo: p.activo,
        }
    }
}

impl ProductoForm {
    pub fn validate(&self) -> ValidationResult<Producto> {
        Ok(Producto {
            id: self.id,
            codigo: optional_text(&self.codigo),
            nombre: required_text("nombre", "nombre", &self.nombre)?,
            descripcion: optional_text(&self.descripcion),
            categoria: optional_text(&self.categoria),
            precio_compra: non_negative("precio_compra", "El precio de compra", &self.precio_compra)?,
            precio_venta: non_negative("precio_venta", "El precio de venta", &self.precio_venta)?,
            stock: non_negative("stock", "El stock", &self.stock)?,
            stock_minimo: non_negative("stock_minimo", "El stock mínimo", &self.stock_minimo)?,
            unidad: optional_text(&self.unidad).unwrap_or_else(|| "unidad".to_string()),
            activo: self.activo,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoteForm {
    pub numero_lote: String,
    pub cantidad: String,
    /// `YYYY-MM-DD`, as produced by a date input
    pub fecha_vencimiento: String,
    pub costo: String,
}

impl LoteForm {
    pub fn validate(&self, producto_id: i64) -> ValidationResult<Lote> {
        let cantidad = non_negative("cantidad", "La cantidad", &self.cantidad)?;
        if cantidad.is_zero() {
            return Err(ValidationError::new("cantidad", "La cantidad debe ser mayor a cero"));
        }
        let costo = match number("costo", "El costo", &self.costo)? {
            Some(c) if c < Decimal::ZERO => {
                return Err(ValidationError::new("costo", "El costo no puede ser negativo"))
            }
            other => other,
        };

        Ok(Lote {
            id: None,
            producto_id,
            numero_lote: required_text("numero_lote", "número de lote", &self.numero_lote)?,
            cantidad,
            fecha_vencimiento: date("fecha_vencimiento", "La fecha de vencimiento", &self.fecha_vencimiento)?,
            costo,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClienteForm {
    pub id: Option<i64>,
    pub nombre: String,
    pub telefono: String,
    pub email: String,
    pub direccion: String,
    pub nit: String,
    pub notas: String,
}

impl From<&Cliente> for ClienteForm {
    fn from(c: &Cliente) -> Self {
        Self {
            id: c.id,
            nombre: c.nombre.clone(),
            telefono: text_of(&c.telefono),
            email: text_of(&c.email),
            direccion: text_of(&c.direccion),
            nit: text_of(&c.nit),
            notas: text_of(&c.notas),
        }
    }
}

impl ClienteForm {
    pub fn validate(&self) -> ValidationResult<Cliente> {
        Ok(Cliente {
            id: self.id,
            nombre: required_text("nombre", "nombre", &self.nombre)?,
            telefono: optional_text(&self.telefono),
            email: email("email", &self.email)?,
            direccion: optional_text(&self.direccion),
            nit: optional_text(&self.nit),
            notas: optional_text(&self.notas),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProveedorForm {
    pub id: Option<i64>,
    pub nombre: String,
    pub contacto: String,
    pub telefono: String,
    pub email: String,
    pub direccion: String,
    pub nit: String,
    pub dias_credito: String,
    pub notas: String,
}

impl From<&Proveedor> for ProveedorForm {
    fn from(p: &Proveedor) -> Self {
        Self {
            id: p.id,
            nombre: p.nombre.clone(),
            contacto: text_of(&p.contacto),
            telefono: text_of(&p.telefono),
            email: text_of(&p.email),
            direccion: text_of(&p.direccion),
            nit: text_of(&p.nit),
            dias_credito: p.dias_credito.map(|d| d.to_string()).unwrap_or_default(),
            notas: text_of(&p.notas),
        }
    }
}

impl ProveedorForm {
    pub fn validate(&self) -> ValidationResult<Proveedor> {
        let dias_credito = match optional_text(&self.dias_credito) {
            None => None,
            Some(d) => Some(d.parse::<u32>().map_err(|_| {
                ValidationError::new("dias_credito", "Los días de crédito deben ser un entero positivo")
            })?),
        };

        Ok(Proveedor {
            id: self.id,
            nombre: required_text("nombre", "nombre", &self.nombre)?,
            contacto: optional_text(&self.contacto),
            telefono: optional_text(&self.telefono),
            email: email("email", &self.email)?,
            direccion: optional_text(&self.direccion),
            nit: optional_text(&self.nit),
            dias_credito,
            notas: optional_text(&self.notas),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescuentoForm {
    pub id: Option<i64>,
    /// `None` applies to every product
    pub producto_id: Option<i64>,
    pub cantidad_minima: String,
    pub porcentaje: String,
    pub activo: bool,
}

impl Default for DescuentoForm {
    fn default() -> Self {
        Self {
            id: None,
            producto_id: None,
            cantidad_minima: String::new(),
            porcentaje: String::new(),
            activo: true,
        }
    }
}

impl From<&DescuentoVolumen> for DescuentoForm {
    fn from(d: &DescuentoVolumen) -> Self {
        Self {
            id: d.id,
            producto_id: d.producto_id,
            cantidad_minima: format_quantity(d.cantidad_minima),
            porcentaje: d.porcentaje.to_string(),
            activo: d.activo,
        }
    }
}

impl DescuentoForm {
    pub fn validate(&self) -> ValidationResult<DescuentoVolumen> {
        let cantidad_minima = number("cantidad_minima", "La cantidad mínima", &self.cantidad_minima)?
            .ok_or_else(|| ValidationError::required("cantidad_minima", "cantidad mínima"))?;
        if cantidad_minima < Decimal::ONE {
            return Err(ValidationError::new(
                "cantidad_minima",
                "La cantidad mínima debe ser al menos 1",
            ));
        }
        if self.porcentaje.trim().is_empty() {
            return Err(ValidationError::required("porcentaje", "porcentaje"));
        }

        Ok(DescuentoVolumen {
            id: self.id,
            producto_id: self.producto_id,
            producto_nombre: None,
            cantidad_minima,
            porcentaje: percentage("porcentaje", "El porcentaje", &self.porcentaje)?,
            activo: self.activo,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GastoForm {
    pub id: Option<i64>,
    pub concepto: String,
    pub monto: String,
    pub frecuencia: Frecuencia,
    pub dia_pago: String,
    pub activo: bool,
    pub notas: String,
}

impl Default for GastoForm {
    fn default() -> Self {
        Self {
            id: None,
            concepto: String::new(),
            monto: String::new(),
            frecuencia: Frecuencia::Mensual,
            dia_pago: String::new(),
            activo: true,
            notas: String::new(),
        }
    }
}

impl From<&GastoFijo> for GastoForm {
    fn from(g: &GastoFijo) -> Self {
        Self {
            id: g.id,
            concepto: g.concepto.clone(),
            monto: g.monto.to_string(),
            frecuencia: g.frecuencia,
            dia_pago: g.dia_pago.map(|d| d.to_string()).unwrap_or_default(),
            activo: g.activo,
            notas: text_of(&g.notas),
        }
    }
}

impl GastoForm {
    pub fn validate(&self) -> ValidationResult<GastoFijo> {
        let dia_pago = match optional_text(&self.dia_pago) {
            None => None,
            Some(d) => match d.parse::<u8>() {
                Ok(dia) if (1..=31).contains(&dia) => Some(dia),
                _ => {
                    return Err(ValidationError::new(
                        "dia_pago",
                        "El día de pago debe estar entre 1 y 31",
                    ))
                }
            },
        };

        Ok(GastoFijo {
            id: self.id,
            concepto: required_text("concepto", "concepto", &self.concepto)?,
            monto: non_negative("monto", "El monto", &self.monto)?,
            frecuencia: self.frecuencia,
            dia_pago,
            activo: self.activo,
            notas: optional_text(&self.notas),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsuarioForm {
    pub id: Option<i64>,
    pub username: String,
    pub nombre: String,
    pub rol: Rol,
    pub activo: bool,
    /// Required for new users; blank keeps the current password on edit
    pub password: String,
}

impl Default for UsuarioForm {
    fn default() -> Self {
        Self {
            id: None,
            username: String::new(),
            nombre: String::new(),
            rol: Rol::Cajero,
            activo: true,
            password: String::new(),
        }
    }
}

impl From<&Usuario> for UsuarioForm {
    fn from(u: &Usuario) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            nombre: u.nombre.clone(),
            rol: u.rol,
            activo: u.activo,
            password: String::new(),
        }
    }
}

impl UsuarioForm {
    pub fn validate(&self) -> ValidationResult<Usuario> {
        let password = if self.id.is_none() {
            Some(required_text("password", "contraseña", &self.password)?)
        } else {
            optional_text(&self.password)
        };

        Ok(Usuario {
            id: self.id,
            username: required_text("username", "usuario", &self.username)?,
            nombre: required_text("nombre", "nombre", &self.nombre)?,
            rol: self.rol,
            activo: self.activo,
            password,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PedidoForm {
    pub proveedor_id: Option<i64>,
    pub items: Vec<PedidoItem>,
    pub notas: String,
}

impl PedidoForm {
    pub fn validate(&self) -> ValidationResult<Pedido> {
        let proveedor_id = self
            .proveedor_id
            .ok_or_else(|| ValidationError::required("proveedor_id", "proveedor"))?;
        if self.items.is_empty() {
            return Err(ValidationError::new("items", "Agregue al menos un producto"));
        }
        if let Some(item) = self.items.iter().find(|i| i.cantidad <= Decimal::ZERO) {
            return Err(ValidationError::new(
                "items",
                format!(
                    "La cantidad de {} debe ser mayor a cero",
                    item.producto_nombre.as_deref().unwrap_or("un producto")
                ),
            ));
        }
        if self.items.iter().any(|i| i.costo_unitario < Decimal::ZERO) {
            return Err(ValidationError::new("items", "El costo no puede ser negativo"));
        }

        let mut pedido = Pedido {
            proveedor_id,
            items: self.items.clone(),
            notas: optional_text(&self.notas),
            ..Default::default()
        };
        pedido.total = pedido.total_estimado();
        Ok(pedido)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnvioForm {
    pub direccion: String,
    pub fecha_programada: String,
    pub notas: String,
}

impl EnvioForm {
    pub fn validate(&self) -> ValidationResult<DatosEnvio> {
        Ok(DatosEnvio {
            direccion: required_text("direccion", "dirección", &self.direccion)?,
            fecha_programada: date("fecha_programada", "La fecha programada", &self.fecha_programada)?
                .map(|d| d.format("%Y-%m-%d").to_string()),
            notas: optional_text(&self.notas),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PagoForm {
    pub monto: String,
    pub metodo: MetodoPago,
    pub notas: String,
}

impl PagoForm {
    /// The installment must be positive and may not exceed the balance.
    pub fn validate(&self, saldo: Decimal) -> ValidationResult<NuevoPago> {
        let monto = number("monto", "El monto", &self.monto)?
            .ok_or_else(|| ValidationError::required("monto", "monto"))?;
        if monto <= Decimal::ZERO {
            return Err(ValidationError::new("monto", "El monto debe ser mayor a cero"));
        }
        if monto > saldo {
            return Err(ValidationError::new("monto", "El monto excede el saldo pendiente"));
        }

        Ok(NuevoPago {
            monto,
            metodo: self.metodo,
            notas: optional_text(&self.notas),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfiguracionForm {
    pub nombre_tienda: String,
    pub simbolo_moneda: String,
    pub nit: String,
    pub direccion: String,
    pub telefono: String,
    pub iva_porcentaje: String,
    pub limite_cajero: String,
    pub limite_supervisor: String,
    pub limite_admin: String,
}

impl From<&Configuracion> for ConfiguracionForm {
    fn from(c: &Configuracion) -> Self {
        Self {
            nombre_tienda: c.nombre_tienda.clone(),
            simbolo_moneda: c.simbolo_moneda.clone(),
            nit: text_of(&c.nit),
            direccion: text_of(&c.direccion),
            telefono: text_of(&c.telefono),
            iva_porcentaje: c.iva_porcentaje.to_string(),
            limite_cajero: c.limites_descuento.cajero.to_string(),
            limite_supervisor: c.limites_descuento.supervisor.to_string(),
            limite_admin: c.limites_descuento.admin.to_string(),
        }
    }
}

impl ConfiguracionForm {
    pub fn validate(&self) -> ValidationResult<Configuracion> {
        Ok(Configuracion {
            nombre_tienda: required_text("nombre_tienda", "nombre de la tienda", &self.nombre_tienda)?,
            simbolo_moneda: required_text("simbolo_moneda", "símbolo de moneda", &self.simbolo_moneda)?,
            nit: optional_text(&self.nit),
            direccion: optional_text(&self.direccion),
            telefono: optional_text(&self.telefono),
            iva_porcentaje: percentage("iva_porcentaje", "El IVA", &self.iva_porcentaje)?,
            limites_descuento: LimitesDescuento {
                cajero: percentage("limite_cajero", "El límite del cajero", &self.limite_cajero)?,
                supervisor: percentage(
                    "limite_supervisor",
                    "El límite del supervisor",
                    &self.limite_supervisor,
                )?,
                admin: percentage("limite_admin", "El límite del administrador", &self.limite_admin)?,
            },
        })
    }
}

/// A return needs a reason.
pub fn validar_motivo(motivo: &str) -> ValidationResult<String> {
    required_text("motivo", "motivo", motivo)
}

/// One sold line and how much of it goes back.
#[derive(Debug, Clone, PartialEq)]
pub struct LineaDevolucion {
    pub producto_id: i64,
    pub nombre: String,
    pub vendida: Decimal,
    pub precio_unitario: Decimal,
    pub cantidad: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DevolucionForm {
    pub venta_id: i64,
    pub folio_venta: Option<String>,
    pub lineas: Vec<LineaDevolucion>,
    pub motivo: String,
}

impl From<&Venta> for DevolucionForm {
    fn from(venta: &Venta) -> Self {
        Self {
            venta_id: venta.id.unwrap_or_default(),
            folio_venta: venta.folio.clone(),
            lineas: venta
                .items
                .iter()
                .map(|item| LineaDevolucion {
                    producto_id: item.producto_id,
                    nombre: item
                        .producto_nombre
                        .clone()
                        .unwrap_or_else(|| format!("Producto {}", item.producto_id)),
                    vendida: item.cantidad,
                    precio_unitario: item.precio_unitario,
                    cantidad: String::new(),
                })
                .collect(),
            motivo: String::new(),
        }
    }
}

impl DevolucionForm {
    /// Refund preview; lines with unreadable quantities count as zero.
    pub fn total(&self) -> Decimal {
        round2(
            self.lineas
                .iter()
                .filter_map(|l| parse_amount(&l.cantidad).map(|c| c * l.precio_unitario))
                .sum(),
        )
    }

    pub fn validate(&self) -> ValidationResult<Devolucion> {
        let motivo = validar_motivo(&self.motivo)?;

        let mut items = Vec::new();
        for linea in &self.lineas {
            let cantidad = non_negative("cantidad", "La cantidad", &linea.cantidad)?;
            if cantidad.is_zero() {
                continue;
            }
            if cantidad > linea.vendida {
                return Err(ValidationError::new(
                    "cantidad",
                    format!(
                        "No se pueden devolver más de {} de {}",
                        format_quantity(linea.vendida),
                        linea.nombre
                    ),
                ));
            }
            items.push(DevolucionItem {
                producto_id: linea.producto_id,
                producto_nombre: Some(linea.nombre.clone()),
                cantidad,
            });
        }
        if items.is_empty() {
            return Err(ValidationError::new(
                "cantidad",
                "Indique la cantidad a devolver de al menos un producto",
            ));
        }

        Ok(Devolucion {
            id: None,
            folio: None,
            venta_id: self.venta_id,
            folio_venta: self.folio_venta.clone(),
            fecha: None,
            motivo,
            items,
            total: self.total(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_producto_requires_name() {
        let form = ProductoForm {
            nombre: "   ".into(),
            ..Default::default()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.field, "nombre");
        assert_eq!(err.message, "El campo nombre es requerido");
    }

    #[test]
    fn test_producto_rejects_negative_price() {
        let form = ProductoForm {
            nombre: "Arroz".into(),
            precio_venta: "-1".into(),
            ..Default::default()
        };
        assert_eq!(form.validate().unwrap_err().field, "precio_venta");
    }

    #[test]
    fn test_producto_parses_amounts() {
        let form = ProductoForm {
            nombre: " Arroz ".into(),
            precio_compra: "Q 1,000.50".into(),
            precio_venta: "1200".into(),
            stock: "".into(),
            ..Default::default()
        };
        let producto = form.validate().unwrap();
        assert_eq!(producto.nombre, "Arroz");
        assert_eq!(producto.precio_compra, Decimal::new(100050, 2));
        assert_eq!(producto.stock, Decimal::ZERO);
        assert_eq!(producto.unidad, "unidad");
        assert_eq!(producto.codigo, None);
    }

    #[test]
    fn test_producto_form_round_trip_from_model() {
        let producto = Producto {
            id: Some(3),
            nombre: "Frijol".into(),
            precio_venta: Decimal::new(850, 2),
            stock: Decimal::from(12),
            unidad: "libra".into(),
            activo: true,
            ..Default::default()
        };
        assert_eq!(ProductoForm::from(&producto).validate().unwrap(), producto);
    }

    #[test]
    fn test_cliente_email_needs_at_sign() {
        let mut form = ClienteForm {
            nombre: "Ana".into(),
            email: "ana.example.com".into(),
            ..Default::default()
        };
        assert_eq!(form.validate().unwrap_err().field, "email");

        form.email = "ana@example.com".into();
        assert_eq!(form.validate().unwrap().email.as_deref(), Some("ana@example.com"));

        form.email = "".into();
        assert_eq!(form.validate().unwrap().email, None);
    }

    #[test]
    fn test_descuento_ranges() {
        let form = |cantidad: &str, pct: &str| DescuentoForm {
            cantidad_minima: cantidad.into(),
            porcentaje: pct.into(),
            ..Default::default()
        };

        assert!(form("10", "5").validate().is_ok());
        assert!(form("1", "100").validate().is_ok());
        assert_eq!(form("0", "5").validate().unwrap_err().field, "cantidad_minima");
        assert_eq!(form("", "5").validate().unwrap_err().field, "cantidad_minima");
        assert_eq!(form("3", "101").validate().unwrap_err().field, "porcentaje");
        assert_eq!(form("3", "-1").validate().unwrap_err().field, "porcentaje");
        assert_eq!(form("3", "").validate().unwrap_err().field, "porcentaje");
    }

    #[test]
    fn test_pago_within_balance() {
        let saldo = Decimal::from(200);
        let pago = |monto: &str| PagoForm {
            monto: monto.into(),
            ..Default::default()
        };

        assert_eq!(pago("200").validate(saldo).unwrap().monto, saldo);
        assert!(pago("0.01").validate(saldo).is_ok());
        assert!(pago("0").validate(saldo).is_err());
        assert!(pago("-5").validate(saldo).is_err());
        assert!(pago("200.01").validate(saldo).is_err());
        assert!(pago("").validate(saldo).is_err());
        assert!(pago("abc").validate(saldo).is_err());
    }

    #[test]
    fn test_usuario_password_required_only_on_create() {
        let mut form = UsuarioForm {
            username: "caja1".into(),
            nombre: "Caja uno".into(),
            ..Default::default()
        };
        assert_eq!(form.validate().unwrap_err().field, "password");

        form.id = Some(4);
        let usuario = form.validate().unwrap();
        assert_eq!(usuario.password, None);
    }

    #[test]
    fn test_gasto_dia_pago_range() {
        let mut form = GastoForm {
            concepto: "Renta".into(),
            monto: "2500".into(),
            dia_pago: "32".into(),
            ..Default::default()
        };
        assert_eq!(form.validate().unwrap_err().field, "dia_pago");
        form.dia_pago = "5".into();
        assert_eq!(form.validate().unwrap().dia_pago, Some(5));
    }

    #[test]
    fn test_lote_parses_date() {
        let form = LoteForm {
            numero_lote: "L-001".into(),
            cantidad: "24".into(),
            fecha_vencimiento: "2025-01-31".into(),
            costo: "".into(),
        };
        let lote = form.validate(9).unwrap();
        assert_eq!(lote.producto_id, 9);
        assert_eq!(lote.fecha_vencimiento, NaiveDate::from_ymd_opt(2025, 1, 31));

        let bad = LoteForm {
            fecha_vencimiento: "31/01/2025".into(),
            ..form
        };
        assert_eq!(bad.validate(9).unwrap_err().field, "fecha_vencimiento");
    }

    #[test]
    fn test_pedido_needs_items() {
        let mut form = PedidoForm {
            proveedor_id: Some(2),
            ..Default::default()
        };
        assert_eq!(form.validate().unwrap_err().field, "items");

        form.items.push(PedidoItem {
            producto_id: 1,
            producto_nombre: Some("Aceite".into()),
            cantidad: Decimal::from(4),
            costo_unitario: Decimal::new(1250, 2),
        });
        assert_eq!(form.validate().unwrap().total, Decimal::from(50));
    }

    #[test]
    fn test_configuracion_limits() {
        let mut form = ConfiguracionForm::from(&Configuracion::default());
        assert!(form.validate().is_ok());
        form.limite_cajero = "150".into();
        assert_eq!(form.validate().unwrap_err().field, "limite_cajero");
    }

    fn venta_de_prueba() -> Venta {
        Venta {
            id: Some(8),
            folio: Some("V-0008".into()),
            items: vec![
                crate::models::VentaItem {
                    producto_id: 1,
                    producto_nombre: Some("Arroz".into()),
                    cantidad: Decimal::from(3),
                    precio_unitario: Decimal::new(1050, 2),
                    ..Default::default()
                },
                crate::models::VentaItem {
                    producto_id: 2,
                    producto_nombre: None,
                    cantidad: Decimal::from(1),
                    precio_unitario: Decimal::from(20),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_devolucion_builds_selected_lines() {
        let mut form = DevolucionForm::from(&venta_de_prueba());
        assert_eq!(form.lineas[1].nombre, "Producto 2");

        form.motivo = "Producto dañado".into();
        form.lineas[0].cantidad = "2".into();
        let devolucion = form.validate().unwrap();

        assert_eq!(devolucion.venta_id, 8);
        assert_eq!(devolucion.items.len(), 1);
        assert_eq!(devolucion.items[0].cantidad, Decimal::from(2));
        assert_eq!(devolucion.total, Decimal::from(21));
    }

    #[test]
    fn test_devolucion_limits() {
        let mut form = DevolucionForm::from(&venta_de_prueba());
        form.lineas[0].cantidad = "1".into();
        assert_eq!(form.validate().unwrap_err().field, "motivo");

        form.motivo = "Cambio".into();
        form.lineas[0].cantidad = "4".into();
        let err = form.validate().unwrap_err();
        assert_eq!(err.message, "No se pueden devolver más de 3 de Arroz");

        form.lineas[0].cantidad = "".into();
        assert_eq!(form.validate().unwrap_err().field, "cantidad");
    }

    #[test]
    fn test_login_requires_both_fields() {
        let form = LoginForm {
            username: "admin".into(),
            password: "".into(),
        };
        assert_eq!(form.validate().unwrap_err().field, "password");
    }
}
