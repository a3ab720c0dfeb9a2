//! Error types for fixtured-core

use thiserror::Error;

/// Failures that can surface from the pool manager or the user repository.
///
/// Routing misses and malformed client input are not errors: they are
/// classified before storage is touched and mapped directly to 4xx envelopes
/// by the handler.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection parameters are absent or the initial connection failed.
    /// Fatal for the invocation; every request fails with it until the
    /// configuration or connectivity is fixed.
    #[error("database connection initialization failed: {reason}")]
    PoolInit { reason: String },

    /// Engine-level failure with the original diagnostic preserved.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// A required insert field was present but empty.
    #[error("{field} cannot be empty")]
    Validation { field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_names_the_field() {
        let err = Error::Validation { field: "email" };
        assert_eq!(err.to_string(), "email cannot be empty");
    }

    #[test]
    fn pool_init_carries_reason() {
        let err = Error::PoolInit {
            reason: "DB_URL is not set".into(),
        };
        assert!(err.to_string().contains("DB_URL is not set"));
    }
}
