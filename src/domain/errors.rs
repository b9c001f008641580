use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Stored cart could not be decoded: {0}")]
    StorageDecode(String),
    #[error("Storage error: {0}")]
    Storage(String),
}
