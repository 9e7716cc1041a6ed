#![deny(missing_docs)]

//! # Document Mapping
//!
//! Entry point turning a raw AsyncAPI document into a [`ResolvedDocument`].
//! Mapping either yields a complete document or an error; partial results are
//! never returned.

use crate::asyncapi::channels::merge_operations;
use crate::asyncapi::models::{Components, Info, ResolvedDocument};
use crate::asyncapi::reference::{BaseUrl, RefResolver};
use crate::asyncapi::schemas::SchemaBuilder;
use crate::asyncapi::shims::ShimAsyncApi;
use crate::error::AppResult;
use serde_json::Value;

/// Maps raw documents with a fixed anchor configuration.
#[derive(Debug, Clone, Default)]
pub struct DocumentMapper {
    resolver: RefResolver,
}

impl DocumentMapper {
    /// Creates a mapper whose anchors start with `base_url`.
    pub fn new(base_url: BaseUrl) -> Self {
        Self {
            resolver: RefResolver::new(base_url),
        }
    }

    /// The resolver anchors are built with.
    pub fn resolver(&self) -> &RefResolver {
        &self.resolver
    }

    /// Maps an already deserialized document.
    ///
    /// # Arguments
    ///
    /// * `shim` - The deserialized document.
    /// * `raw` - The same document as a value, kept in `info.async_api_json`.
    #[tracing::instrument(skip_all, fields(title = %shim.info.title))]
    pub fn map(&self, shim: &ShimAsyncApi, raw: Value) -> AppResult<ResolvedDocument> {
        let channel_operations =
            merge_operations(&self.resolver, &shim.operations, &shim.channels)?;
        let schemas = SchemaBuilder::new(&self.resolver).build_all(&shim.components.schemas);

        tracing::debug!(
            servers = shim.servers.len(),
            channel_operations = channel_operations.len(),
            schemas = schemas.len(),
            "resolved document"
        );

        Ok(ResolvedDocument {
            info: Info {
                title: shim.info.title.clone(),
                version: shim.info.version.clone(),
                description: shim.info.description.clone(),
                async_api_json: raw,
            },
            servers: shim.servers.clone(),
            channel_operations,
            components: Components { schemas },
        })
    }

    /// Deserializes and maps a raw JSON value.
    pub fn map_value(&self, raw: Value) -> AppResult<ResolvedDocument> {
        let shim: ShimAsyncApi = serde_json::from_value(raw.clone())?;
        self.map(&shim, raw)
    }

    /// Parses and maps a JSON document.
    pub fn map_json(&self, json_content: &str) -> AppResult<ResolvedDocument> {
        let raw: Value = serde_json::from_str(json_content)?;
        self.map_value(raw)
    }

    /// Parses and maps a YAML document.
    pub fn map_yaml(&self, yaml_content: &str) -> AppResult<ResolvedDocument> {
        let raw: Value = serde_yaml::from_str(yaml_content)?;
        self.map_value(raw)
    }

    /// Parses and maps a document, detecting JSON by its leading `{`.
    pub fn map_str(&self, content: &str) -> AppResult<ResolvedDocument> {
        if content.trim_start().starts_with('{') {
            self.map_json(content)
        } else {
            self.map_yaml(content)
        }
    }
}

/// Parses a JSON AsyncAPI document with the default anchor base (`#`).
pub fn parse_asyncapi_json(json_content: &str) -> AppResult<ResolvedDocument> {
    DocumentMapper::default().map_json(json_content)
}

/// Parses a YAML AsyncAPI document with the default anchor base (`#`).
pub fn parse_asyncapi_yaml(yaml_content: &str) -> AppResult<ResolvedDocument> {
    DocumentMapper::default().map_yaml(yaml_content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::OperationDirection;
    use serde_json::json;

    fn orders_document() -> Value {
        json!({
            "asyncapi": "3.0.0",
            "info": { "title": "Orders", "version": "1.0.0", "description": "Order service" },
            "servers": { "kafka-server": { "host": "kafka:29092", "protocol": "kafka" } },
            "channels": { "orders": { "bindings": { "kafka": {} } } },
            "operations": {
                "orders_send_OrderEvent": {
                    "channel": { "$ref": "#/channels/orders" },
                    "action": "send",
                    "messages": [{
                        "name": "io.example.OrderEvent",
                        "title": "OrderEvent",
                        "payload": { "$ref": "#/components/schemas/OrderEvent" },
                        "headers": { "$ref": "#/components/schemas/HeadersNotDocumented" }
                    }]
                }
            },
            "components": {
                "schemas": {
                    "OrderEvent": { "type": "object", "properties": { "id": { "type": "string" } } },
                    "HeadersNotDocumented": { "type": "object", "example": {} }
                }
            }
        })
    }

    #[test]
    fn test_map_orders_document() {
        let doc = DocumentMapper::default().map_value(orders_document()).unwrap();
        let co = &doc.channel_operations[0];
        assert_eq!(co.name, "orders");
        assert_eq!(co.operation.protocol, "kafka");
        assert_eq!(co.operation.operation, OperationDirection::Subscribe);
        assert_eq!(co.operation.message.payload.title.as_deref(), Some("OrderEvent"));

        assert_eq!(doc.info.title, "Orders");
        assert_eq!(doc.info.async_api_json, orders_document());
        assert_eq!(
            doc.servers["kafka-server"].host.as_deref(),
            Some("kafka:29092")
        );
        assert_eq!(
            doc.components.schemas.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["OrderEvent", "HeadersNotDocumented"]
        );
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let mapper = DocumentMapper::new(BaseUrl::new("/asyncapi-ui.html#"));
        let first = mapper.map_value(orders_document()).unwrap();
        let second = mapper.map_value(orders_document()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_yaml_and_json_agree() {
        let json_text = serde_json::to_string(&orders_document()).unwrap();
        let yaml_text = serde_yaml::to_string(&orders_document()).unwrap();
        assert_eq!(
            parse_asyncapi_json(&json_text).unwrap(),
            parse_asyncapi_yaml(&yaml_text).unwrap()
        );
        assert_eq!(
            DocumentMapper::default().map_str(&yaml_text).unwrap(),
            DocumentMapper::default().map_str(&json_text).unwrap()
        );
    }

    #[test]
    fn test_failed_merge_yields_no_document() {
        let mut raw = orders_document();
        raw["channels"]["orders"]["bindings"] = json!({});
        let err = DocumentMapper::default().map_value(raw).unwrap_err();
        assert!(matches!(err, AppError::MissingProtocol(_)));
    }

    #[test]
    fn test_loosely_typed_display_fields_do_not_abort_mapping() {
        let yaml = r##"
info:
  title: Orders
  version: 1.0
channels:
  orders:
    bindings:
      kafka: {}
components:
  schemas:
    Note:
      type: [string, "null"]
      example: null
"##;
        let doc = parse_asyncapi_yaml(yaml).unwrap();
        assert_eq!(doc.info.version, "1.0");
        let note = &doc.components.schemas["Note"];
        assert_eq!(note.schema_type, Some(json!(["string", "null"])));
        let example = note.example.as_ref().unwrap();
        assert_eq!(example.value, Value::Null);
        assert_eq!(example.text, "null");
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_asyncapi_json("{ not json").unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }
}
