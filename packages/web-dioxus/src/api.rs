//! API client bootstrap

use std::sync::OnceLock;

use tienda_client::{ApiClient, ClientConfig};

static CONFIG: OnceLock<ClientConfig> = OnceLock::new();

/// Configuration baked in at build time, falling back to the defaults.
pub fn config() -> &'static ClientConfig {
    CONFIG.get_or_init(|| {
        ClientConfig::from_build_env().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "invalid build configuration, using defaults");
            ClientConfig::default()
        })
    })
}

/// Base URL with the page origin prepended when it is relative. The
/// browser fetch backend needs absolute URLs.
pub fn absolute_url(url: &str, origin: Option<&str>) -> String {
    match origin {
        Some(origin) if url.starts_with('/') => {
            format!("{}{}", origin.trim_end_matches('/'), url)
        }
        _ => url.to_string(),
    }
}

pub fn page_origin() -> Option<String> {
    web_sys::window().and_then(|w| w.location().origin().ok())
}

/// Client without credentials.
pub fn anonymous_client() -> ApiClient {
    let config = config();
    let url = absolute_url(&config.api_url, page_origin().as_deref());
    let resolved = ClientConfig {
        api_url: url.clone(),
        ..config.clone()
    };
    ApiClient::from_config(&resolved).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to a default HTTP client");
        ApiClient::new(url)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            absolute_url("/api", Some("https://tienda.example")),
            "https://tienda.example/api"
        );
        assert_eq!(
            absolute_url("/api", Some("http://localhost:8080/")),
            "http://localhost:8080/api"
        );
        assert_eq!(
            absolute_url("http://otro:3000/api", Some("https://tienda.example")),
            "http://otro:3000/api"
        );
        assert_eq!(absolute_url("/api", None), "/api");
    }
}
