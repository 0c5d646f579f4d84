//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for a successful lookup (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub key: String,
    pub value: String,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Acknowledgement for writes (PUT /set, DELETE /del/:key)
#[derive(Debug, Clone, Serialize)]
pub struct WriteResponse {
    /// Human readable summary
    pub message: String,
    /// The key that was written
    pub key: String,
}

impl WriteResponse {
    /// Acknowledges a set.
    pub fn stored(key: impl Into<String>) -> Self {
        Self::with_verb(key.into(), "stored")
    }

    /// Acknowledges a delete. Sent whether or not the key existed.
    pub fn deleted(key: impl Into<String>) -> Self {
        Self::with_verb(key.into(), "deleted")
    }

    fn with_verb(key: String, verb: &str) -> Self {
        Self {
            message: format!("Key '{}' {}", key, verb),
            key,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the server answers
    pub status: &'static str,
    /// Current time, RFC 3339
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error body shared by every failing endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_response_shape() {
        let resp = GetResponse::new("user:1", "Alice");
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"key": "user:1", "value": "Alice"})
        );
    }

    #[test]
    fn test_write_response_messages() {
        assert_eq!(WriteResponse::stored("k").message, "Key 'k' stored");
        assert_eq!(WriteResponse::deleted("k").message, "Key 'k' deleted");
        assert_eq!(WriteResponse::deleted("k").key, "k");
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_value(HealthResponse::healthy()).unwrap();
        assert_eq!(json["status"], "healthy");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_error_response_shape() {
        let resp = ErrorResponse::new("Key not found: x");
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"error": "Key not found: x"})
        );
    }
}
