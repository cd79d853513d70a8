// src/http.rs
use folio_traits::{BoxFuture, ContentFetcher, ResourceError, SharedResourceData};
use std::sync::Arc;

/// Fetches repository content over HTTP.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn get(&self, url: &str) -> Result<SharedResourceData, ResourceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ResourceError::LoadFailed {
                path: url.to_string(),
                message: e.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ResourceError::LoadFailed {
                path: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(Arc::new(bytes.to_vec()))
    }
}

impl ContentFetcher for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<SharedResourceData, ResourceError>> {
        Box::pin(self.get(url))
    }

    fn name(&self) -> &'static str {
        "HttpFetcher"
    }
}
