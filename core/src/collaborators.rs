#![deny(missing_docs)]

//! # Collaborator Interfaces
//!
//! I/O the resolution engine relies on but never performs itself. Each call is
//! a single-shot operation delivering one success or one failure.

use crate::error::AppResult;
use derive_more::Display;
use serde::Serialize;
use serde_json::Value;

/// HTTP-style status signalling that no publisher handles the protocol.
pub const STATUS_NOT_FOUND: u16 = 404;

/// Supplies the raw document text.
pub trait DocumentFetcher {
    /// Fetches the document identified by `source` (a path, URL, ...).
    fn fetch(&self, source: &str) -> AppResult<String>;
}

/// Publishes an example message to a live broker through the documented service.
pub trait Publisher {
    /// Sends `request`.
    fn publish(&self, request: &PublishRequest) -> Result<(), PublishError>;
}

/// Displays transient user notifications.
pub trait Notifier {
    /// Shows `message` tagged with `label` for `duration_ms` milliseconds.
    fn notify(&self, message: &str, label: &str, duration_ms: u64);
}

/// Everything needed to publish one message.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishRequest {
    /// Protocol name, e.g. `kafka`.
    pub protocol: String,
    /// Target channel name.
    pub channel: String,
    /// Payload text as edited by the user.
    pub payload: String,
    /// Fully qualified payload type name.
    pub payload_type: String,
    /// Parsed headers.
    pub headers: Value,
    /// Parsed message bindings.
    pub bindings: Value,
}

impl PublishRequest {
    /// Request body understood by the service's publishing endpoint.
    pub fn message_dto(&self) -> MessageDto<'_> {
        MessageDto {
            payload: &self.payload,
            payload_type: &self.payload_type,
            headers: &self.headers,
            bindings: &self.bindings,
        }
    }
}

/// Wire body of a publish call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto<'a> {
    /// Payload text.
    pub payload: &'a str,
    /// Payload type name.
    pub payload_type: &'a str,
    /// Headers object.
    pub headers: &'a Value,
    /// Bindings object.
    pub bindings: &'a Value,
}

/// Failure reported by a [`Publisher`].
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("Publish failed (status {status:?}): {message}")]
pub struct PublishError {
    /// Status code, when the transport produced one.
    pub status: Option<u16>,
    /// Human readable cause.
    pub message: String,
}

impl PublishError {
    /// Creates an error carrying a status code.
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates an error without status (e.g. connection refused).
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// True when no publisher is registered for the protocol.
    pub fn is_no_publisher(&self) -> bool {
        self.status == Some(STATUS_NOT_FOUND)
    }
}

impl std::error::Error for PublishError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_dto_is_camel_case() {
        let request = PublishRequest {
            protocol: "kafka".into(),
            channel: "orders".into(),
            payload: "{\"id\":1}".into(),
            payload_type: "io.example.OrderEvent".into(),
            headers: json!({ "trace": "1" }),
            bindings: json!({}),
        };
        assert_eq!(
            serde_json::to_value(request.message_dto()).unwrap(),
            json!({
                "payload": "{\"id\":1}",
                "payloadType": "io.example.OrderEvent",
                "headers": { "trace": "1" },
                "bindings": {}
            })
        );
    }

    #[test]
    fn test_no_publisher_status() {
        assert!(PublishError::with_status(404, "not found").is_no_publisher());
        assert!(!PublishError::with_status(500, "boom").is_no_publisher());
        assert!(!PublishError::transport("refused").is_no_publisher());
    }
}
