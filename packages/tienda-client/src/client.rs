//! HTTP plumbing shared by every endpoint.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use tienda_core::listing::{ListQuery, ListResponse, Page, Searchable};

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};

/// Client for the tienda REST API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for `base_url`, e.g. `/api` or `http://host:3000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        #[cfg(not(target_arch = "wasm32"))]
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        #[cfg(target_arch = "wasm32")]
        let http = reqwest::Client::new();

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an endpoint path such as `/productos/3`.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!(%method, %url, "api request");
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and turn any non-success status into an [`ApiError`].
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let resp = builder.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let err = ApiError::from_response(status.as_u16(), &body);
            warn!(status = status.as_u16(), error = %err, "api request failed");
            return Err(err);
        }

        Ok(resp)
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(ApiError::from)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.send(self.request(Method::GET, path)).await?;
        Self::decode(resp).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let resp = self
            .send(self.request(Method::GET, path).query(query))
            .await?;
        Self::decode(resp).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        Self::decode(resp).await
    }

    /// POST without a body, for action endpoints like `/aprobar`.
    pub async fn post_action<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.send(self.request(Method::POST, path)).await?;
        Self::decode(resp).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.send(self.request(Method::PUT, path).json(body)).await?;
        Self::decode(resp).await
    }

    /// DELETE; whatever the server answers is discarded.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    /// Raw response body, for file downloads.
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let resp = self.send(self.request(Method::GET, path)).await?;
        let bytes = resp.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// One page of a list endpoint. The query is forwarded; a server that
    /// ignores it and answers with every row is paged locally.
    pub async fn list<T>(&self, path: &str, query: &ListQuery) -> Result<Page<T>>
    where
        T: DeserializeOwned + Searchable,
    {
        let response: ListResponse<T> = self.get_with_query(path, query).await?;
        Ok(response.into_page(query))
    }

    /// Every row of a list endpoint, for selectors and exports.
    pub async fn list_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let response: ListResponse<T> = self.get(path).await?;
        Ok(response.into_items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = ApiClient::new("http://localhost:3000/api/");
        assert_eq!(client.url("/productos"), "http://localhost:3000/api/productos");
        assert_eq!(client.url("productos/3"), "http://localhost:3000/api/productos/3");

        let relative = ApiClient::new("/api");
        assert_eq!(relative.url("/auth/me"), "/api/auth/me");
    }

    #[test]
    fn test_token_handling() {
        let mut client = ApiClient::new("/api").with_token("abc");
        assert_eq!(client.token(), Some("abc"));
        client.set_token(None);
        assert_eq!(client.token(), None);
    }

    #[test]
    fn test_from_config() {
        let config = ClientConfig {
            api_url: "http://example.test/api/".into(),
            ..Default::default()
        };
        let client = ApiClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://example.test/api");
    }
}
