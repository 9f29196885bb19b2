//! Error types for docshelf.

use thiserror::Error;

/// Top-level result type for docshelf operations.
pub type Result<T> = std::result::Result<T, DocshelfError>;

/// Top-level error type for docshelf.
#[derive(Debug, Error)]
pub enum DocshelfError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("config error: {0}")]
    Config(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("session expired: run `docshelf session login` to continue")]
    SessionExpired,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors raised while validating a catalog source or looking up its entries.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate identifier in catalog: '{0}'")]
    DuplicateIdentifier(String),

    #[error("empty identifier at catalog position {0}")]
    EmptyIdentifier(usize),

    #[error("unknown article '{0}': not part of the catalog")]
    UnknownArticle(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_human_readable_messages() {
        let err = CatalogError::DuplicateIdentifier("API Gateway.htm".to_string());
        let msg = err.to_string();
        assert!(msg.contains("duplicate"));
        assert!(msg.contains("API Gateway.htm"));

        let err: DocshelfError = CatalogError::UnknownArticle("x.htm".to_string()).into();
        let msg = err.to_string();
        assert!(msg.starts_with("catalog error"));
        assert!(msg.contains("x.htm"));
    }

    #[test]
    fn session_expired_suggests_login() {
        let msg = DocshelfError::SessionExpired.to_string();
        assert!(msg.contains("session login"));
    }
}
