use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Catalog unavailable: {0}")]
    Catalog(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound(msg) => AppError::NotFound(msg),
            DomainError::Network(msg) => AppError::Catalog(msg),
            DomainError::StorageDecode(msg) | DomainError::Storage(msg) => AppError::Storage(msg),
        }
    }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        assert_eq!(
            AppError::Config("bad port".to_string()).to_string(),
            "Configuration error: bad port"
        );
    }

    #[test]
    fn domain_not_found_maps_to_app_not_found() {
        let app_err: AppError = DomainError::NotFound("Product 7".to_string()).into();
        assert!(matches!(app_err, AppError::NotFound(_)));
    }

    #[test]
    fn domain_network_maps_to_catalog() {
        let app_err: AppError = DomainError::Network("timed out".to_string()).into();
        assert_eq!(app_err.to_string(), "Catalog unavailable: timed out");
    }

    #[test]
    fn domain_storage_errors_map_to_storage() {
        let decode: AppError = DomainError::StorageDecode("eof".to_string()).into();
        let write: AppError = DomainError::Storage("disk full".to_string()).into();
        assert!(matches!(decode, AppError::Storage(_)));
        assert!(matches!(write, AppError::Storage(_)));
    }
}
