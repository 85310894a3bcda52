//! HTTP resource provider.
//!
//! Issues one plain GET per `load`. There are no retries and no request
//! timeout: a stalled server stalls the generation call.

use async_trait::async_trait;
use inspecta_traits::{ResourceError, ResourceProvider, SharedResourceData};
use log::debug;
use reqwest::Client as HttpClient;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct HttpResourceProvider {
    client: HttpClient,
}

impl HttpResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (proxies, default headers).
    pub fn with_client(client: HttpClient) -> Self {
        Self { client }
    }

    pub fn is_http_reference(path: &str) -> bool {
        path.starts_with("http://") || path.starts_with("https://")
    }
}

#[async_trait]
impl ResourceProvider for HttpResourceProvider {
    async fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        if !Self::is_http_reference(path) {
            return Err(ResourceError::Unsupported(path.to_string()));
        }

        debug!("GET {}", path);
        let response = self
            .client
            .get(path)
            .send()
            .await
            .map_err(|e| ResourceError::LoadFailed {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResourceError::HttpStatus {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ResourceError::LoadFailed {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        Ok(Arc::new(bytes.to_vec()))
    }

    fn name(&self) -> &'static str {
        "HttpResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_http_references() {
        assert!(HttpResourceProvider::is_http_reference("https://cdn.example/a.jpg"));
        assert!(HttpResourceProvider::is_http_reference("http://host/a.jpg"));
        assert!(!HttpResourceProvider::is_http_reference("/branding/logo.png"));
        assert!(!HttpResourceProvider::is_http_reference("ftp://host/a.jpg"));
    }

    #[tokio::test]
    async fn rejects_non_http_references_without_a_request() {
        let provider = HttpResourceProvider::new();
        let result = provider.load("images/a.jpg").await;
        assert!(matches!(result, Err(ResourceError::Unsupported(_))));
    }
}
