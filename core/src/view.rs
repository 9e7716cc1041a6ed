#![deny(missing_docs)]

//! # Operation View
//!
//! Editable state derived from one resolved channel operation: example text
//! areas, their line counts, and the publish flow built on top of them.

use crate::asyncapi::bindings::ProtocolBinding;
use crate::asyncapi::example::{line_count_of, Example};
use crate::asyncapi::models::{
    ChannelOperation, Operation, ResolvedDocument, SchemaNode, SchemaRef,
};
use crate::collaborators::{Notifier, PublishError, PublishRequest, Publisher};
use crate::error::{AppError, AppResult};
use serde_json::Value;

const NOTIFY_LABEL_ERROR: &str = "ERROR";
const NOTIFY_LABEL_PUBLISHED: &str = "PUBLISHED";
const NOTIFY_SHORT_MS: u64 = 3000;
const NOTIFY_LONG_MS: u64 = 4000;

/// Text areas whose line count is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    /// The payload example.
    Example,
    /// The headers example.
    Headers,
    /// The message binding example.
    MessageBindingExample,
}

/// Result of a publish attempt. Never fatal to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishOutcome {
    /// The publisher accepted the message.
    Sent,
    /// User text was not valid JSON; nothing was sent.
    InvalidInput,
    /// The publisher reported a failure.
    Failed(PublishError),
}

/// View state for one channel operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationView {
    /// Channel the operation belongs to.
    pub channel_name: String,
    /// The operation being shown.
    pub operation: Operation,
    /// Payload schema.
    pub schema: SchemaNode,
    /// Key of the payload schema in `components.schemas`.
    pub schema_identifier: String,
    /// Payload example, if the schema has one.
    pub default_example: Option<Example>,
    /// Payload type sent along with the example.
    pub default_example_type: Option<String>,
    /// Lines in the payload text area.
    pub example_line_count: usize,
    /// Headers schema.
    pub headers: SchemaNode,
    /// Key of the headers schema in `components.schemas`.
    pub headers_schema_identifier: String,
    /// Headers example, if the schema has one.
    pub headers_example: Option<Example>,
    /// Lines in the headers text area.
    pub headers_line_count: usize,
    /// Protocol used for publishing.
    pub protocol_name: String,
    /// The message binding declared for `protocol_name`.
    pub message_binding: Option<ProtocolBinding>,
    /// Binding example, built on request.
    pub message_binding_example: Option<Example>,
    /// Lines in the binding text area.
    pub message_binding_example_line_count: usize,
}

impl OperationView {
    /// Derives the view of `channel_operation` within `document`.
    ///
    /// Fails when the payload or headers schema is missing from the document.
    ///
    /// # Arguments
    ///
    /// * `document` - The resolved document holding the schemas.
    /// * `channel_operation` - One entry of `document.channel_operations`.
    pub fn derive(
        document: &ResolvedDocument,
        channel_operation: &ChannelOperation,
    ) -> AppResult<Self> {
        let operation = &channel_operation.operation;
        let message = &operation.message;

        let (schema_identifier, schema) = lookup_schema(document, &message.payload)?;
        let (headers_schema_identifier, headers) = lookup_schema(document, &message.headers)?;

        let protocol_name = operation
            .bindings
            .keys()
            .next()
            .cloned()
            .ok_or_else(|| AppError::MissingProtocol(channel_operation.name.clone()))?;

        let message_binding = message.protocol_binding(&protocol_name);
        let default_example = schema.example.clone();
        let headers_example = headers.example.clone();

        Ok(Self {
            channel_name: channel_operation.name.clone(),
            operation: operation.clone(),
            example_line_count: line_count(default_example.as_ref()),
            default_example,
            default_example_type: message.name.clone(),
            schema: schema.clone(),
            schema_identifier,
            headers_line_count: line_count(headers_example.as_ref()),
            headers_example,
            headers: headers.clone(),
            headers_schema_identifier,
            protocol_name,
            message_binding,
            message_binding_example: None,
            message_binding_example_line_count: 0,
        })
    }

    /// Builds the binding example from the message binding of this view's protocol.
    pub fn create_message_binding_example(&mut self) -> Option<&Example> {
        self.message_binding_example = self
            .message_binding
            .as_ref()
            .and_then(ProtocolBinding::example);
        self.message_binding_example_line_count =
            line_count(self.message_binding_example.as_ref());
        self.message_binding_example.as_ref()
    }

    /// Updates the tracked line count after the user edited `field`.
    pub fn recalculate_line_count(&mut self, field: TextField, text: &str) {
        let count = line_count_of(text);
        match field {
            TextField::Example => self.example_line_count = count,
            TextField::Headers => self.headers_line_count = count,
            TextField::MessageBindingExample => self.message_binding_example_line_count = count,
        }
    }

    /// Parses user edited text into a [`PublishRequest`].
    ///
    /// Headers and bindings must be JSON. The payload text is sent as typed,
    /// leaving its interpretation to the receiving service.
    ///
    /// # Arguments
    ///
    /// * `example` - Payload text.
    /// * `payload_type` - Type name the service deserializes the payload as.
    /// * `headers` - Headers JSON text.
    /// * `bindings` - Message binding JSON text.
    pub fn publish_request(
        &self,
        example: &str,
        payload_type: &str,
        headers: &str,
        bindings: &str,
    ) -> AppResult<PublishRequest> {
        let headers: Value = serde_json::from_str(headers)
            .map_err(|e| AppError::InvalidPayload(format!("headers: {}", e)))?;
        let bindings: Value = serde_json::from_str(bindings)
            .map_err(|e| AppError::InvalidPayload(format!("bindings: {}", e)))?;

        Ok(PublishRequest {
            protocol: self.protocol_name.clone(),
            channel: self.channel_name.clone(),
            payload: example.to_string(),
            payload_type: payload_type.to_string(),
            headers,
            bindings,
        })
    }

    /// Publishes the edited example and reports the result through `notifier`.
    pub fn publish(
        &self,
        example: &str,
        payload_type: &str,
        headers: &str,
        bindings: &str,
        publisher: &impl Publisher,
        notifier: &impl Notifier,
    ) -> PublishOutcome {
        let request = match self.publish_request(example, payload_type, headers, bindings) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(channel = %self.channel_name, error = %e, "rejected publish input");
                notifier.notify(
                    "Example payload is not valid",
                    NOTIFY_LABEL_ERROR,
                    NOTIFY_SHORT_MS,
                );
                return PublishOutcome::InvalidInput;
            }
        };

        match publisher.publish(&request) {
            Ok(()) => {
                notifier.notify(
                    &format!("Example payload sent to: {}", self.channel_name),
                    NOTIFY_LABEL_PUBLISHED,
                    NOTIFY_SHORT_MS,
                );
                PublishOutcome::Sent
            }
            Err(err) => {
                tracing::warn!(
                    channel = %self.channel_name,
                    protocol = %self.protocol_name,
                    status = ?err.status,
                    "publish failed"
                );
                let mut msg = String::from("Publish failed");
                if err.is_no_publisher() {
                    msg.push_str(": no publisher was provided for ");
                    msg.push_str(&self.protocol_name);
                }
                notifier.notify(&msg, NOTIFY_LABEL_ERROR, NOTIFY_LONG_MS);
                PublishOutcome::Failed(err)
            }
        }
    }
}

fn line_count(example: Option<&Example>) -> usize {
    example.map(|e| e.line_count).unwrap_or(0)
}

/// Finds the schema a message reference points at by its last path segment.
fn lookup_schema<'a>(
    document: &'a ResolvedDocument,
    reference: &SchemaRef,
) -> AppResult<(String, &'a SchemaNode)> {
    let name = reference.name.as_deref().unwrap_or_default();
    let identifier = name.rsplit('/').next().unwrap_or(name).to_string();
    let schema = document
        .components
        .schemas
        .get(&identifier)
        .ok_or_else(|| AppError::SchemaLookupMiss(name.to_string()))?;
    Ok((identifier, schema))
}
