use async_trait::async_trait;

use super::errors::DomainError;
use super::product::Product;

/// Read-only access to the remote product catalog.
#[async_trait]
pub trait CatalogGateway: Send + Sync + 'static {
    async fn list_categories(&self) -> Result<Vec<String>, DomainError>;
    async fn list_products(&self) -> Result<Vec<Product>, DomainError>;
    async fn list_products_by_category(&self, category: &str) -> Result<Vec<Product>, DomainError>;
    async fn get_product(&self, id: u64) -> Result<Product, DomainError>;
}

/// Durable string storage keyed by name. Encoding is the caller's concern.
pub trait KeyValueStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), DomainError>;
}
