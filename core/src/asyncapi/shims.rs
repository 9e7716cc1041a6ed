#![deny(missing_docs)]

//! # Document Shims
//!
//! Generic structures acting as an Intermediate Deserialization Layer.
//! These structs map directly to the AsyncAPI JSON/YAML objects emitted by the
//! documented service. Every mapping is an `IndexMap` so that document order
//! survives deserialization.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Raw per-protocol bindings, keyed by protocol identifier (e.g. `kafka`).
pub type ShimBindings = Map<String, Value>;

/// Schema for the root document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ShimAsyncApi {
    /// AsyncAPI version (e.g. "3.0.0").
    #[serde(default)]
    pub asyncapi: Option<String>,

    /// Metadata about the API.
    #[serde(default)]
    pub info: ShimInfo,

    /// Server connection metadata keyed by server name.
    #[serde(default)]
    pub servers: IndexMap<String, ShimServer>,

    /// Channels keyed by channel name.
    #[serde(default)]
    pub channels: IndexMap<String, ShimChannel>,

    /// Operations keyed by operation id. Order defines display order.
    #[serde(default)]
    pub operations: IndexMap<String, ShimOperation>,

    /// Reusable definitions.
    #[serde(default)]
    pub components: ShimComponents,
}

/// The `info` object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ShimInfo {
    /// API title.
    #[serde(default)]
    pub title: String,
    /// API version. YAML documents may spell it as a number (`1.0`).
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub version: String,
    /// Optional description (may contain markdown).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A single server entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShimServer {
    /// Host (and optional port) of the broker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Protocol spoken by the broker (e.g. `kafka`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Protocol version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol_version: Option<String>,
    /// Human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Remaining server fields, kept verbatim.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

/// A channel (topic / queue / destination).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ShimChannel {
    /// Human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Channel-level protocol bindings. The first key names the protocol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bindings: Option<ShimBindings>,
    /// Remaining channel fields (address, messages, ...), kept verbatim.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

/// An operation on a channel.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ShimOperation {
    /// Reference to the channel, e.g. `#/channels/orders`.
    pub channel: ShimReference,
    /// `send` or `receive`. Unknown values are kept as-is.
    #[serde(default)]
    pub action: String,
    /// Messages carried by the operation, in document order.
    #[serde(default)]
    pub messages: Vec<ShimMessage>,
}

/// A message definition attached to an operation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ShimMessage {
    /// Machine name (usually the payload type).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reference to the payload schema.
    #[serde(default)]
    pub payload: ShimReference,
    /// Reference to the headers schema.
    #[serde(default)]
    pub headers: ShimReference,
    /// Message-level protocol bindings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bindings: Option<ShimBindings>,
}

/// A `{"$ref": "..."}` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ShimReference {
    /// The pointer-style reference string.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub ref_location: Option<String>,
}

impl ShimReference {
    /// Builds a reference pointing at `location`.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            ref_location: Some(location.into()),
        }
    }
}

/// Components object holding reusable definitions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ShimComponents {
    /// Reusable schemas keyed by name.
    #[serde(default)]
    pub schemas: IndexMap<String, ShimSchema>,
}

/// A raw schema node. Recursive through `properties` and `items`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ShimSchema {
    /// Set when the node is itself a reference.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub ref_location: Option<String>,
    /// Human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Primitive type (`object`, `array`, `string`, ...), or a list of them.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<Value>,
    /// Format hint (`date-time`, `int64`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Allowed values.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Names of required properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Nested property schemas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, ShimSchema>>,
    /// Item schema of an array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ShimSchema>>,
    /// Example instance. An explicit `null` is an example too.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub example: Option<Value>,
}

/// Accepts any scalar and keeps its textual form; `null` becomes empty.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Distinguishes a present `null` from an absent field (absent stays `None`
/// through `#[serde(default)]`).
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
