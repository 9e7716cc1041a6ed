#![deny(missing_docs)]

//! # Protocol Bindings
//!
//! Bindings differ per protocol and per producer. This module offers two views:
//!
//! - [`Binding`]: a generic, display-ready tree with `bindingVersion` markers
//!   removed at every level.
//! - [`ProtocolBinding`]: a typed view for protocols whose shape is known,
//!   falling back to the raw value otherwise.
//!
//! It also synthesizes editable binding examples from raw bindings.

use crate::asyncapi::example::Example;
use crate::asyncapi::shims::ShimBindings;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Metadata key carrying the binding schema version.
pub const BINDING_VERSION_KEY: &str = "bindingVersion";

/// A normalized binding: key -> scalar or nested binding.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Binding(pub IndexMap<String, BindingValue>);

/// A single entry of a [`Binding`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BindingValue {
    /// Any non-object JSON value, stored unchanged.
    Scalar(Value),
    /// A nested object.
    Nested(Binding),
}

impl Binding {
    /// Looks up a direct child.
    pub fn get(&self, key: &str) -> Option<&BindingValue> {
        self.0.get(key)
    }

    /// Looks up a direct child that is itself a binding.
    pub fn nested(&self, key: &str) -> Option<&Binding> {
        match self.0.get(key) {
            Some(BindingValue::Nested(binding)) => Some(binding),
            _ => None,
        }
    }

    /// Keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns true when the binding has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Normalizes a raw binding map into a [`Binding`] tree.
///
/// Keys keep their document order, `bindingVersion` is dropped at every
/// level, objects recurse and everything else (including arrays and `null`)
/// is stored as a scalar.
pub fn normalize_bindings(raw: Option<&ShimBindings>) -> Option<Binding> {
    raw.map(normalize_map)
}

fn normalize_map(raw: &Map<String, Value>) -> Binding {
    let entries = raw
        .iter()
        .filter(|(key, _)| key.as_str() != BINDING_VERSION_KEY)
        .map(|(key, value)| {
            let value = match value {
                Value::Object(nested) => BindingValue::Nested(normalize_map(nested)),
                other => BindingValue::Scalar(other.clone()),
            };
            (key.clone(), value)
        })
        .collect();
    Binding(entries)
}

/// Extracts the example value a binding entry offers.
///
/// - Strings, numbers and booleans are returned as-is.
/// - Objects with an object-valued `example` yield that object's `value`.
/// - Anything else (arrays, `null`, objects without one) has no example.
///
/// # Arguments
///
/// * `value` - One entry of a raw message binding.
pub fn example_value(value: &Value) -> Option<Value> {
    match value {
        Value::Object(map) => match map.get("example") {
            Some(Value::Object(example)) => example.get("value").cloned(),
            _ => None,
        },
        Value::Array(_) | Value::Null => None,
        scalar => Some(scalar.clone()),
    }
}

/// Builds the editable example for one protocol's raw message binding.
///
/// Each key except `bindingVersion` is mapped through [`example_value`];
/// keys without an example value are left out.
pub fn binding_example(raw: Option<&Value>) -> Option<Example> {
    let raw = raw.filter(|v| !v.is_null())?;
    let mut example = Map::new();
    if let Value::Object(entries) = raw {
        for (key, value) in entries {
            if key == BINDING_VERSION_KEY {
                continue;
            }
            if let Some(value) = example_value(value) {
                example.insert(key.clone(), value);
            }
        }
    }
    Some(Example::new(Value::Object(example)))
}

/// Protocol identifiers as used for binding keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// Apache Kafka.
    Kafka,
    /// AMQP 0-9-1 (RabbitMQ).
    Amqp,
    /// Java Message Service.
    Jms,
    /// AWS SQS.
    Sqs,
    /// AWS SNS.
    Sns,
    /// Google Cloud Pub/Sub.
    GooglePubSub,
    /// HTTP.
    Http,
    /// WebSockets.
    Ws,
    /// MQTT.
    Mqtt,
    /// Any other identifier, kept verbatim.
    Other(String),
}

impl Protocol {
    /// Parses a binding key.
    pub fn parse(id: &str) -> Self {
        match id {
            "kafka" => Protocol::Kafka,
            "amqp" => Protocol::Amqp,
            "jms" => Protocol::Jms,
            "sqs" => Protocol::Sqs,
            "sns" => Protocol::Sns,
            "googlepubsub" => Protocol::GooglePubSub,
            "http" => Protocol::Http,
            "ws" => Protocol::Ws,
            "mqtt" => Protocol::Mqtt,
            other => Protocol::Other(other.to_string()),
        }
    }

    /// The binding key for this protocol.
    pub fn as_str(&self) -> &str {
        match self {
            Protocol::Kafka => "kafka",
            Protocol::Amqp => "amqp",
            Protocol::Jms => "jms",
            Protocol::Sqs => "sqs",
            Protocol::Sns => "sns",
            Protocol::GooglePubSub => "googlepubsub",
            Protocol::Http => "http",
            Protocol::Ws => "ws",
            Protocol::Mqtt => "mqtt",
            Protocol::Other(id) => id,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kafka message binding.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaMessageBinding {
    /// Schema of the record key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Value>,
    /// Binding schema version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding_version: Option<String>,
}

/// AMQP message binding.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmqpMessageBinding {
    /// MIME encoding of the message content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_encoding: Option<String>,
    /// Application defined message type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    /// Binding schema version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding_version: Option<String>,
}

/// Typed view of one protocol's message binding.
///
/// Every variant keeps the binding as found in the document, so generic
/// consumers (binding examples, publishing) see the same keys in the same
/// order whether or not the shape is known.
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolBinding {
    /// A Kafka binding.
    Kafka(KafkaMessageBinding, Value),
    /// An AMQP binding.
    Amqp(AmqpMessageBinding, Value),
    /// A protocol without a typed shape, or a value that did not fit one.
    Other {
        /// The binding key.
        protocol: Protocol,
        /// The raw binding.
        value: Value,
    },
}

impl ProtocolBinding {
    /// Types `value` according to `protocol`.
    ///
    /// # Arguments
    ///
    /// * `protocol` - Binding key, e.g. `kafka`.
    /// * `value` - The raw binding stored under that key.
    pub fn from_raw(protocol: &str, value: &Value) -> Self {
        let protocol = Protocol::parse(protocol);
        let typed = match protocol {
            Protocol::Kafka => serde_json::from_value(value.clone())
                .ok()
                .map(|binding| ProtocolBinding::Kafka(binding, value.clone())),
            Protocol::Amqp => serde_json::from_value(value.clone())
                .ok()
                .map(|binding| ProtocolBinding::Amqp(binding, value.clone())),
            _ => None,
        };
        typed.unwrap_or_else(|| ProtocolBinding::Other {
            protocol,
            value: value.clone(),
        })
    }

    /// The protocol this binding belongs to.
    pub fn protocol(&self) -> Protocol {
        match self {
            ProtocolBinding::Kafka(..) => Protocol::Kafka,
            ProtocolBinding::Amqp(..) => Protocol::Amqp,
            ProtocolBinding::Other { protocol, .. } => protocol.clone(),
        }
    }

    /// The binding as found in the document.
    pub fn raw(&self) -> &Value {
        match self {
            ProtocolBinding::Kafka(_, raw) | ProtocolBinding::Amqp(_, raw) => raw,
            ProtocolBinding::Other { value, .. } => value,
        }
    }

    /// Binding version declared by a typed binding.
    pub fn binding_version(&self) -> Option<&str> {
        match self {
            ProtocolBinding::Kafka(binding, _) => binding.binding_version.as_deref(),
            ProtocolBinding::Amqp(binding, _) => binding.binding_version.as_deref(),
            ProtocolBinding::Other { .. } => None,
        }
    }

    /// Editable example built from this binding. See [`binding_example`].
    pub fn example(&self) -> Option<Example> {
        binding_example(Some(self.raw()))
    }
}
