//! Error types for the tienda API client.

use thiserror::Error;

/// Result type for API client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Banner text when the server gives no usable message.
pub const GENERIC_MESSAGE: &str = "Ocurrió un error al comunicarse con el servidor";

const SESSION_EXPIRED_MESSAGE: &str = "Su sesión ha expirado. Inicie sesión nuevamente";

/// Fields a server error body may carry its message in, by priority.
const MESSAGE_FIELDS: [&str; 4] = ["message", "mensaje", "error", "detail"];

/// API client errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Missing or rejected token (HTTP 401)
    #[error("Unauthorized")]
    Unauthorized,

    /// Non-2xx response
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Request never got a response (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Response body did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid client settings
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Build from a non-success status and its body.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 401 {
            return ApiError::Unauthorized;
        }
        ApiError::Server {
            status,
            message: extract_message(body).unwrap_or_else(|| GENERIC_MESSAGE.to_string()),
        }
    }

    /// Text shown to the user in the error banner.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized => SESSION_EXPIRED_MESSAGE.to_string(),
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Network(_) | ApiError::Decode(_) | ApiError::Config(_) => {
                GENERIC_MESSAGE.to_string()
            }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Pull a human-readable message out of an error body.
pub fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    MESSAGE_FIELDS.iter().find_map(|field| {
        let text = match object.get(*field)? {
            serde_json::Value::String(s) => s.trim().to_string(),
            // `{"error": {"message": "..."}}`
            serde_json::Value::Object(inner) => inner.get("message")?.as_str()?.trim().to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_priority() {
        let body = r#"{"detail":"d","error":"e","mensaje":"m"}"#;
        assert_eq!(extract_message(body).as_deref(), Some("m"));

        let body = r#"{"message":"Stock insuficiente","mensaje":"otro"}"#;
        assert_eq!(extract_message(body).as_deref(), Some("Stock insuficiente"));

        assert_eq!(extract_message(r#"{"detail":"Not found"}"#).as_deref(), Some("Not found"));
    }

    #[test]
    fn test_extract_message_skips_empty_and_non_text() {
        assert_eq!(extract_message(r#"{"message":"","error":"e"}"#).as_deref(), Some("e"));
        assert_eq!(extract_message(r#"{"message":42}"#), None);
        assert_eq!(
            extract_message(r#"{"error":{"message":"anidado"}}"#).as_deref(),
            Some("anidado")
        );
    }

    #[test]
    fn test_extract_message_non_json() {
        assert_eq!(extract_message("<html>502 Bad Gateway</html>"), None);
        assert_eq!(extract_message(""), None);
        assert_eq!(extract_message(r#"["a"]"#), None);
    }

    #[test]
    fn test_from_response() {
        assert_eq!(ApiError::from_response(401, "{}"), ApiError::Unauthorized);

        let err = ApiError::from_response(500, "oops");
        assert_eq!(err.user_message(), GENERIC_MESSAGE);
        assert_eq!(err.status(), Some(500));

        let err = ApiError::from_response(422, r#"{"mensaje":"Datos inválidos"}"#);
        assert_eq!(err.user_message(), "Datos inválidos");
    }

    #[test]
    fn test_user_message_for_transport_errors() {
        assert_eq!(ApiError::Network("refused".into()).user_message(), GENERIC_MESSAGE);
        assert!(ApiError::Unauthorized.is_unauthorized());
    }
}
