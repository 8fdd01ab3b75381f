//! Target submitter posting to an HTTP endpoint.

use crate::{FetchClient, FetchError};
use async_trait::async_trait;
use cart_migrate_core::model::Product;
use cart_migrate_core::{TargetSubmitter, TransportError};
use serde::Serialize;

/// Request body shared by the HTTP and file targets.
#[derive(Serialize)]
pub(crate) struct ProductBatch<'a> {
    pub(crate) products: &'a [Product],
}

/// Posts canonical products as `{"products": [...]}` to a target endpoint.
#[derive(Debug, Clone)]
pub struct HttpTarget {
    client: FetchClient,
    url: String,
}

impl HttpTarget {
    /// Create a target posting to `url` with a bearer `access_token`.
    pub fn new(url: impl Into<String>, access_token: impl AsRef<str>) -> Self {
        Self::with_client(FetchClient::new(), url, access_token)
    }

    /// Create a target on top of an existing client.
    pub fn with_client(
        client: FetchClient,
        url: impl Into<String>,
        access_token: impl AsRef<str>,
    ) -> Self {
        Self {
            client: client.with_bearer_auth(access_token),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TargetSubmitter for HttpTarget {
    async fn submit(&self, products: &[Product]) -> Result<usize, TransportError> {
        if products.is_empty() {
            return Ok(0);
        }

        self.client
            .post_json(&self.url, &ProductBatch { products })
            .await
            .and_then(|response| response.error_for_status())
            .map_err(FetchError::into_submit)?;

        tracing::debug!(count = products.len(), url = %self.url, "Submitted products");
        Ok(products.len())
    }
}
