use thiserror::Error;

/// Errors surfaced by cache-tier backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx_core::Error),

    /// Redis operation failed.
    #[error("cache error: {0}")]
    Cache(#[from] deadpool_redis::redis::RedisError),

    /// Could not obtain a connection from a pool.
    #[error("connection pool error: {0}")]
    Pool(String),

    /// Entry (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    /// Create a `Pool` error.
    #[must_use]
    pub fn pool(message: impl Into<String>) -> Self {
        Self::Pool(message.into())
    }
}

/// Convenience result type for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_error_message() {
        let err = StorageError::pool("timed out waiting for connection");
        assert_eq!(
            err.to_string(),
            "connection pool error: timed out waiting for connection"
        );
    }

    #[test]
    fn serialization_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: StorageError = json_err.into();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
