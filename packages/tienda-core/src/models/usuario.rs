use serde::{Deserialize, Serialize};

use super::default_true;
use crate::listing::Searchable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rol {
    Admin,
    Supervisor,
    #[default]
    Cajero,
}

impl Rol {
    pub fn label(&self) -> &'static str {
        match self {
            Rol::Admin => "Administrador",
            Rol::Supervisor => "Supervisor",
            Rol::Cajero => "Cajero",
        }
    }

    pub fn variants() -> &'static [Rol] {
        &[Rol::Admin, Rol::Supervisor, Rol::Cajero]
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Rol::Admin => "admin",
            Rol::Supervisor => "supervisor",
            Rol::Cajero => "cajero",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::variants().iter().copied().find(|r| r.slug() == slug)
    }

    /// Supervisors and admins resolve discount authorizations.
    pub fn puede_autorizar(&self) -> bool {
        matches!(self, Rol::Admin | Rol::Supervisor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Usuario {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    pub nombre: String,
    #[serde(default)]
    pub rol: Rol,
    #[serde(default = "default_true")]
    pub activo: bool,
    /// Only sent when creating a user or changing the password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Searchable for Usuario {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.username.as_str(), self.nombre.as_str()]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub usuario: Usuario,
}
