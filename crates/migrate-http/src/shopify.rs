//! Paginated product fetch from a Shopify-style Admin REST API.

use crate::{FetchClient, FetchError, Response};
use async_trait::async_trait;
use cart_migrate_core::{SourceCollector, TransportError};
use reqwest::Url;
use serde::Deserialize;
use std::collections::HashSet;
use std::future::Future;

/// Default Admin API version.
pub const DEFAULT_API_VERSION: &str = "2024-01";

/// Largest page the Admin API serves.
pub const MAX_PAGE_SIZE: u32 = 250;

/// Header carrying the Admin API access token.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

#[derive(Debug, Deserialize)]
struct ProductsPage {
    #[serde(default)]
    products: Vec<serde_json::Value>,
}

/// Source collector reading every product, following `Link` pagination.
#[derive(Debug, Clone)]
pub struct ShopifySource {
    client: FetchClient,
    store_url: String,
    api_version: String,
    page_size: u32,
}

impl ShopifySource {
    /// Create a source for the store at `store_url`.
    pub fn new(store_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self::with_client(FetchClient::new(), store_url, access_token)
    }

    /// Create a source on top of an existing client.
    pub fn with_client(
        client: FetchClient,
        store_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        let store_url = store_url.into();
        Self {
            client: client
                .with_base_url(store_url.clone())
                .with_default_header(ACCESS_TOKEN_HEADER, access_token),
            store_url,
            api_version: DEFAULT_API_VERSION.to_string(),
            page_size: MAX_PAGE_SIZE,
        }
    }

    /// Set the Admin API version (e.g., "2024-01").
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the page size, clamped to `1..=250`.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Path of the first products page.
    pub fn first_page_path(&self) -> String {
        format!(
            "/admin/api/{}/products.json?limit={}",
            self.api_version, self.page_size
        )
    }

    /// Check that `url` stays on the store; the access token goes with every request.
    ///
    /// Relative URLs are resolved against the store and always pass.
    pub fn check_page_url(&self, url: &str) -> Result<(), FetchError> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Ok(());
        }
        let store = Url::parse(&self.store_url)
            .map_err(|e| FetchError::ParseError(format!("store url: {}", e)))?;
        let page = Url::parse(url).map_err(|e| FetchError::ParseError(format!("page url: {}", e)))?;
        if page.origin() == store.origin() {
            Ok(())
        } else {
            Err(FetchError::ForeignPageUrl(url.to_string()))
        }
    }

    /// Fetch one page; returns its records and the next page URL.
    pub async fn fetch_page(
        &self,
        url: &str,
    ) -> Result<(Vec<serde_json::Value>, Option<String>), FetchError> {
        self.check_page_url(url)?;
        let response = self.client.get(url).await?.error_for_status()?;
        parse_page(&response)
    }
}

/// Split a products page response into records and the next page URL.
pub fn parse_page(
    response: &Response,
) -> Result<(Vec<serde_json::Value>, Option<String>), FetchError> {
    let page: ProductsPage = response.json()?;
    Ok((page.products, response.next_page_url()))
}

/// Follow next-page links from `first`, concatenating every page's records.
///
/// Stops at the first page without a next link, or when a link repeats a
/// page already fetched.
pub(crate) async fn collect_pages<F, Fut>(
    first: String,
    mut fetch: F,
) -> Result<Vec<serde_json::Value>, FetchError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<(Vec<serde_json::Value>, Option<String>), FetchError>>,
{
    let mut records = Vec::new();
    let mut seen = HashSet::new();
    let mut next = Some(first);

    while let Some(url) = next.take() {
        seen.insert(url.clone());
        let (products, next_url) = fetch(url).await?;
        tracing::debug!(page = seen.len(), count = products.len(), "Fetched source page");
        records.extend(products);

        next = match next_url {
            Some(url) if seen.contains(&url) => {
                tracing::warn!(url = %url, "Page link repeats an earlier page, stopping");
                None
            }
            other => other,
        };
    }

    Ok(records)
}

#[async_trait]
impl SourceCollector for ShopifySource {
    async fn fetch_all(&self) -> Result<Vec<serde_json::Value>, TransportError> {
        collect_pages(self.first_page_path(), |url| async move {
            self.fetch_page(&url).await
        })
        .await
        .map_err(FetchError::into_fetch)
    }
}
