use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogGateway;
use crate::domain::product::Product;

use super::models::ProductDto;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<reqwest::Error> for DomainError {
    fn from(e: reqwest::Error) -> Self {
        DomainError::Network(e.to_string())
    }
}

// ── Client ────────────────────────────────────────────────────────────────────

/// HTTP client for a Fake Store style catalog API.
pub struct HttpCatalogClient {
    http: Client,
    base_url: Url,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, DomainError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            DomainError::Network(format!("Invalid catalog URL '{}': {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(DomainError::Network(format!(
                "Catalog URL '{}' cannot be used as a base",
                base_url
            )));
        }
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, DomainError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                DomainError::Network(format!("Catalog URL '{}' cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issues a GET and returns the body of a successful response.
    async fn get_text(&self, url: Url) -> Result<(StatusCode, String), DomainError> {
        log::debug!("GET {}", url);
        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if status == StatusCode::NOT_FOUND {
            return Ok((status, body));
        }
        if !status.is_success() {
            return Err(DomainError::Network(format!("GET {} returned {}", url, status)));
        }
        Ok((status, body))
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, DomainError> {
        let url = self.endpoint(segments)?;
        let (status, body) = self.get_text(url.clone()).await?;
        if status == StatusCode::NOT_FOUND {
            return Err(DomainError::Network(format!("GET {} returned {}", url, status)));
        }
        parse(&url, &body)
    }
}

fn parse<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T, DomainError> {
    serde_json::from_str(body)
        .map_err(|e| DomainError::Network(format!("Malformed response from {}: {}", url, e)))
}

#[async_trait]
impl CatalogGateway for HttpCatalogClient {
    async fn list_categories(&self) -> Result<Vec<String>, DomainError> {
        self.get_json(&["products", "categories"]).await
    }

    async fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        let rows: Vec<ProductDto> = self.get_json(&["products"]).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn list_products_by_category(&self, category: &str) -> Result<Vec<Product>, DomainError> {
        let rows: Vec<ProductDto> = self.get_json(&["products", "category", category]).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn get_product(&self, id: u64) -> Result<Product, DomainError> {
        let id_segment = id.to_string();
        let url = self.endpoint(&["products", &id_segment])?;
        let (status, body) = self.get_text(url.clone()).await?;

        // The public Fake Store API answers unknown ids with 200 and an empty body.
        let trimmed = body.trim();
        if status == StatusCode::NOT_FOUND || trimmed.is_empty() || trimmed == "null" {
            return Err(DomainError::NotFound(format!("Product {} not found", id)));
        }
        let row: ProductDto = parse(&url, trimmed)?;
        Ok(row.into())
    }
}
