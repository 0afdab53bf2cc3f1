//! Client paths and the authentication guard in front of them.

use crate::models::Rol;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// A screen reachable from the navigation shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub path: &'static str,
    pub title: &'static str,
    /// Hidden from cashiers
    pub restricted: bool,
}

const fn section(path: &'static str, title: &'static str, restricted: bool) -> Section {
    Section {
        path,
        title,
        restricted,
    }
}

/// Every path behind the authenticated layout, in menu order.
pub const SECTIONS: &[Section] = &[
    section("/", "Inicio", false),
    section("/ventas", "Punto de venta", false),
    section("/historial-ventas", "Historial de ventas", false),
    section("/devoluciones", "Devoluciones", false),
    section("/productos", "Productos", false),
    section("/clientes", "Clientes", false),
    section("/proveedores", "Proveedores", true),
    section("/pedidos", "Pedidos", true),
    section("/descuentos", "Descuentos", true),
    section("/autorizaciones", "Autorizaciones", true),
    section("/envios", "Envíos", false),
    section("/gastos-fijos", "Gastos fijos", true),
    section("/cuentas-por-pagar", "Cuentas por pagar", true),
    section("/reportes", "Reportes", true),
    section("/usuarios", "Usuarios", true),
    section("/configuracion", "Configuración", true),
    section("/respaldos", "Respaldos", true),
];

impl Section {
    pub fn visible_to(&self, rol: Rol) -> bool {
        !self.restricted || rol.puede_autorizar()
    }
}

/// Menu entries for a role.
pub fn sections_for(rol: Rol) -> impl Iterator<Item = &'static Section> {
    SECTIONS.iter().filter(move |s| s.visible_to(rol))
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.trim_end_matches('/') {
        "" => HOME_PATH,
        trimmed => trimmed,
    }
}

pub fn is_protected(path: &str) -> bool {
    section_for(path).is_some()
}

pub fn section_for(path: &str) -> Option<&'static Section> {
    let path = normalize(path);
    SECTIONS.iter().find(|s| s.path == path)
}

/// Whether `rol` may open `path`. Paths outside the section table are open.
pub fn can_open(path: &str, rol: Rol) -> bool {
    section_for(path).map_or(true, |s| s.visible_to(rol))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Allow,
    Redirect(&'static str),
}

/// Decide what happens when `path` is visited.
///
/// Protected paths need a session; the login page sends an authenticated
/// user home. Unknown paths are left to the not-found page.
pub fn guard(path: &str, authenticated: bool) -> Guard {
    let path = normalize(path);
    if path == LOGIN_PATH {
        return if authenticated {
            Guard::Redirect(HOME_PATH)
        } else {
            Guard::Allow
        };
    }
    if !authenticated && is_protected(path) {
        tracing::debug!(path, "unauthenticated visit, redirecting to login");
        return Guard::Redirect(LOGIN_PATH);
    }
    Guard::Allow
}

/// Where to go after a successful login.
pub fn after_login() -> &'static str {
    HOME_PATH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_protected_path_redirects_when_anonymous() {
        for section in SECTIONS {
            assert_eq!(
                guard(section.path, false),
                Guard::Redirect(LOGIN_PATH),
                "{}",
                section.path
            );
            assert_eq!(guard(section.path, true), Guard::Allow);
        }
    }

    #[test]
    fn test_login_page() {
        assert_eq!(guard("/login", false), Guard::Allow);
        assert_eq!(guard("/login", true), Guard::Redirect("/"));
        assert_eq!(after_login(), "/");
    }

    #[test]
    fn test_normalizes_trailing_slash_and_query() {
        assert!(is_protected("/productos/"));
        assert!(is_protected("/reportes?tipo=ventas"));
        assert!(is_protected(""));
        assert!(!is_protected("/no-existe"));
        assert_eq!(guard("/no-existe", false), Guard::Allow);
    }

    #[test]
    fn test_cashier_menu_hides_admin_sections() {
        let cajero: Vec<_> = sections_for(Rol::Cajero).map(|s| s.path).collect();
        assert!(cajero.contains(&"/ventas"));
        assert!(!cajero.contains(&"/usuarios"));
        assert_eq!(sections_for(Rol::Admin).count(), SECTIONS.len());
    }

    #[test]
    fn test_restricted_paths_by_role() {
        assert!(!can_open("/configuracion/", Rol::Cajero));
        assert!(can_open("/configuracion", Rol::Supervisor));
        assert!(can_open("/ventas", Rol::Cajero));
        assert!(can_open("/no-existe", Rol::Cajero));
        assert_eq!(section_for("/respaldos").map(|s| s.title), Some("Respaldos"));
    }

    #[test]
    fn test_seventeen_protected_sections() {
        assert_eq!(SECTIONS.len(), 17);
    }
}
