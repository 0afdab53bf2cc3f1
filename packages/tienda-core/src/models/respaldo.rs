use serde::{Deserialize, Serialize};

/// Database backup file kept by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Respaldo {
    pub nombre: String,
    #[serde(default)]
    pub tamano_bytes: u64,
    #[serde(default)]
    pub creado: Option<String>,
}

impl Respaldo {
    pub fn tamano_legible(&self) -> String {
        const KB: f64 = 1024.0;
        let bytes = self.tamano_bytes as f64;
        if bytes >= KB * KB * KB {
            format!("{:.1} GB", bytes / (KB * KB * KB))
        } else if bytes >= KB * KB {
            format!("{:.1} MB", bytes / (KB * KB))
        } else if bytes >= KB {
            format!("{:.1} KB", bytes / KB)
        } else {
            format!("{} B", self.tamano_bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tamano_legible() {
        let r = |n| Respaldo {
            nombre: "r.sql".into(),
            tamano_bytes: n,
            creado: None,
        };
        assert_eq!(r(512).tamano_legible(), "512 B");
        assert_eq!(r(1536).tamano_legible(), "1.5 KB");
        assert_eq!(r(5 * 1024 * 1024).tamano_legible(), "5.0 MB");
    }
}
