#![deny(missing_docs)]

//! # Resolved Models
//!
//! The display-ready document handed to renderers. Every reference has been
//! materialized into a title and an anchor, so no further lookups are needed
//! to render it. Values are built once and never mutated afterwards.

use crate::asyncapi::bindings::{Binding, ProtocolBinding};
use crate::asyncapi::example::Example;
use crate::asyncapi::shims::{ShimBindings, ShimServer};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Prefix of every channel operation anchor.
pub const CHANNEL_ANCHOR_PREFIX: &str = "#channel-";

/// Suffix marking the synthetic name of an array item schema.
pub const ARRAY_MARKER: &str = "[]";

/// A fully resolved document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDocument {
    /// Document metadata.
    pub info: Info,
    /// Servers keyed by name.
    pub servers: IndexMap<String, Server>,
    /// One record per (operation, message) pair, in display order.
    pub channel_operations: Vec<ChannelOperation>,
    /// Resolved reusable definitions.
    pub components: Components,
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The raw document, for consumers that need it verbatim (e.g. download).
    pub async_api_json: Value,
}

/// Server connection metadata, passed through unchanged.
pub type Server = ShimServer;

/// Resolved reusable definitions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Components {
    /// Resolved schemas keyed by name.
    pub schemas: IndexMap<String, SchemaNode>,
}

/// A channel together with exactly one operation on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelOperation {
    /// Channel name.
    pub name: String,
    /// Channel description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Stable in-page locator.
    pub anchor_identifier: String,
    /// The operation.
    pub operation: Operation,
}

/// Direction of an operation as shown to the documentation reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationDirection {
    /// The reader publishes to the channel.
    Publish,
    /// The reader subscribes to the channel.
    Subscribe,
}

impl OperationDirection {
    /// Maps a document `action` to the reader's perspective.
    ///
    /// The document describes the service, the reader is its counterpart:
    /// `send` becomes `subscribe`, anything else becomes `publish`.
    pub fn from_action(action: &str) -> Self {
        if action == "send" {
            OperationDirection::Subscribe
        } else {
            OperationDirection::Publish
        }
    }

    /// Display value.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationDirection::Publish => "publish",
            OperationDirection::Subscribe => "subscribe",
        }
    }
}

impl fmt::Display for OperationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Protocol name, taken from the channel bindings.
    pub protocol: String,
    /// Reader-facing direction.
    pub operation: OperationDirection,
    /// The message carried.
    pub message: Message,
    /// Raw channel bindings, passed through for publishing.
    pub bindings: ShimBindings,
}

/// A resolved message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Machine name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Display title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Payload schema reference.
    pub payload: SchemaRef,
    /// Headers schema reference.
    pub headers: SchemaRef,
    /// Normalized message bindings, keyed by protocol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bindings: Option<Binding>,
    /// Message bindings as found in the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_bindings: Option<ShimBindings>,
}

impl Message {
    /// Typed message binding for `protocol`, if the message declares one.
    pub fn protocol_binding(&self, protocol: &str) -> Option<ProtocolBinding> {
        self.raw_bindings
            .as_ref()?
            .get(protocol)
            .filter(|raw| !raw.is_null())
            .map(|raw| ProtocolBinding::from_raw(protocol, raw))
    }
}

/// A materialized schema reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaRef {
    /// The raw reference string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Short name of the referenced schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// In-page link to the referenced schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_url: Option<String>,
}

/// A resolved schema node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    /// Name as found in the parent mapping.
    pub name: String,
    /// Last `.`-separated segment of `name`.
    pub title: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Raw reference, when the node is a reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,
    /// Short name of the referenced schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_title: Option<String>,
    /// In-page link to the referenced schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_url: Option<String>,
    /// `#` + name.
    pub anchor_identifier: String,
    /// Primitive type, or a list of them, as declared.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<Value>,
    /// Format hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Allowed values.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Nested properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaNode>>,
    /// Item schema, for arrays.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    /// Names of required properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Example instance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Example>,
}
