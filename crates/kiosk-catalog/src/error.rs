//! Catalog error types.

use thiserror::Error;

/// Error type for catalog fetch operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_carries_status_and_url() {
        let err = CatalogError::Http {
            status: 503,
            url: "https://example.test/sessions.json".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("sessions.json"));
    }
}
