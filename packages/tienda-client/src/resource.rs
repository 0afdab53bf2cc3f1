//! Collections served with the standard CRUD routes.

use serde::de::DeserializeOwned;
use serde::Serialize;

use tienda_core::listing::{ListQuery, Page, Searchable};
use tienda_core::models::{
    Cliente, CuentaPorPagar, DescuentoVolumen, Devolucion, Envio, GastoFijo, Lote, Pedido,
    Producto, Proveedor, Usuario, Venta,
};

use crate::client::ApiClient;
use crate::error::Result;

/// A backend collection at `/{PATH}` with rows of `Self`.
pub trait Resource: Serialize + DeserializeOwned + Searchable + Clone + PartialEq + 'static {
    /// Collection path segment, e.g. `productos`
    const PATH: &'static str;
    /// Singular name for log lines and messages
    const NAME: &'static str;

    fn id(&self) -> Option<i64>;

    fn collection_path() -> String {
        format!("/{}", Self::PATH)
    }

    fn item_path(id: i64) -> String {
        format!("/{}/{}", Self::PATH, id)
    }
}

macro_rules! resource {
    ($ty:ty, $path:literal, $name:literal) => {
        impl Resource for $ty {
            const PATH: &'static str = $path;
            const NAME: &'static str = $name;

            fn id(&self) -> Option<i64> {
                self.id
            }
        }
    };
}

resource!(Producto, "productos", "producto");
resource!(Cliente, "clientes", "cliente");
resource!(Proveedor, "proveedores", "proveedor");
resource!(Pedido, "pedidos", "pedido");
resource!(DescuentoVolumen, "descuentos", "descuento");
resource!(Envio, "envios", "envío");
resource!(GastoFijo, "gastos-fijos", "gasto fijo");
resource!(CuentaPorPagar, "cuentas-por-pagar", "cuenta por pagar");
resource!(Usuario, "usuarios", "usuario");
resource!(Lote, "lotes", "lote");
resource!(Venta, "ventas", "venta");
resource!(Devolucion, "devoluciones", "devolución");

impl ApiClient {
    pub async fn list_page<R: Resource>(&self, query: &ListQuery) -> Result<Page<R>> {
        self.list(&R::collection_path(), query).await
    }

    pub async fn fetch_all<R: Resource>(&self) -> Result<Vec<R>> {
        self.list_all(&R::collection_path()).await
    }

    pub async fn fetch_one<R: Resource>(&self, id: i64) -> Result<R> {
        self.get(&R::item_path(id)).await
    }

    pub async fn create<R: Resource>(&self, item: &R) -> Result<R> {
        let created: R = self.post(&R::collection_path(), item).await?;
        tracing::info!(resource = R::NAME, id = ?created.id(), "created");
        Ok(created)
    }

    pub async fn update<R: Resource>(&self, id: i64, item: &R) -> Result<R> {
        let updated = self.put(&R::item_path(id), item).await?;
        tracing::info!(resource = R::NAME, id, "updated");
        Ok(updated)
    }

    /// Create when the row has no id yet, update otherwise.
    pub async fn save<R: Resource>(&self, item: &R) -> Result<R> {
        match item.id() {
            Some(id) => self.update(id, item).await,
            None => self.create(item).await,
        }
    }

    pub async fn remove<R: Resource>(&self, id: i64) -> Result<()> {
        self.delete(&R::item_path(id)).await?;
        tracing::info!(resource = R::NAME, id, "deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Producto::collection_path(), "/productos");
        assert_eq!(GastoFijo::item_path(4), "/gastos-fijos/4");
        assert_eq!(CuentaPorPagar::collection_path(), "/cuentas-por-pagar");
    }
}
