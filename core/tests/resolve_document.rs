use asyncdoc_core::asyncapi::models::CHANNEL_ANCHOR_PREFIX;
use asyncdoc_core::{
    parse_asyncapi_yaml, AppError, BaseUrl, DocumentMapper, OperationDirection, OperationView,
};
use pretty_assertions::assert_eq;
use serde_json::json;

const ORDERS_YAML: &str = r##"
asyncapi: 3.0.0
info:
  title: Orders API
  version: 1.0.0
  description: Publishes order lifecycle events
servers:
  kafka-server:
    host: kafka:29092
    protocol: kafka
channels:
  orders:
    description: All order events
    bindings:
      kafka: {}
  payments:
    bindings:
      amqp:
        is: queue
        bindingVersion: 0.3.0
operations:
  orders_send:
    channel:
      $ref: "#/channels/orders"
    action: send
    messages:
      - name: io.example.OrderEvent
        title: OrderEvent
        payload:
          $ref: "#/components/schemas/OrderEvent"
        headers:
          $ref: "#/components/schemas/HeadersNotDocumented"
      - name: io.example.OrderCancelled
        title: OrderCancelled
        payload:
          $ref: "#/components/schemas/OrderCancelled"
        headers:
          $ref: "#/components/schemas/HeadersNotDocumented"
  payments_receive:
    channel:
      $ref: "#/channels/payments"
    action: receive
    messages:
      - name: io.example.Payment
        title: Payment
        payload:
          $ref: "#/components/schemas/Payment"
        headers:
          $ref: "#/components/schemas/HeadersNotDocumented"
        bindings:
          amqp:
            bindingVersion: 0.3.0
            messageType: payment
components:
  schemas:
    OrderEvent:
      type: object
      required: [id]
      properties:
        id:
          type: string
        lines:
          $ref: "#/components/schemas/OrderLine"
          type: array
          items:
            type: string
      example:
        id: "42"
        lines: []
    OrderCancelled:
      type: object
    Payment:
      type: object
      example:
        amount: 10
    HeadersNotDocumented:
      type: object
      example: {}
"##;

#[test]
fn resolves_orders_scenario() {
    let doc = DocumentMapper::new(BaseUrl::new("/asyncapi-ui.html#"))
        .map_yaml(ORDERS_YAML)
        .unwrap();

    let first = &doc.channel_operations[0];
    assert_eq!(first.name, "orders");
    assert_eq!(first.description.as_deref(), Some("All order events"));
    assert_eq!(first.operation.protocol, "kafka");
    assert_eq!(first.operation.operation, OperationDirection::Subscribe);
    assert_eq!(
        first.operation.message.payload.title.as_deref(),
        Some("OrderEvent")
    );
    assert_eq!(
        first.operation.message.payload.anchor_url.as_deref(),
        Some("/asyncapi-ui.html#OrderEvent")
    );
    assert_eq!(
        first.anchor_identifier,
        format!("{}kafka-orders-subscribe-OrderEvent", CHANNEL_ANCHOR_PREFIX)
    );
}

#[test]
fn keeps_operation_then_message_order() {
    let doc = parse_asyncapi_yaml(ORDERS_YAML).unwrap();
    let order: Vec<(String, Option<String>)> = doc
        .channel_operations
        .iter()
        .map(|co| (co.name.clone(), co.operation.message.title.clone()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("orders".to_string(), Some("OrderEvent".to_string())),
            ("orders".to_string(), Some("OrderCancelled".to_string())),
            ("payments".to_string(), Some("Payment".to_string())),
        ]
    );
    assert_eq!(
        doc.channel_operations[2].operation.operation,
        OperationDirection::Publish
    );
}

#[test]
fn serializes_display_model() {
    let doc = parse_asyncapi_yaml(ORDERS_YAML).unwrap();
    let rendered = serde_json::to_value(&doc).unwrap();

    assert_eq!(
        rendered["channelOperations"][2]["operation"]["message"]["bindings"],
        json!({ "amqp": { "messageType": "payment" } })
    );
    assert_eq!(
        rendered["channelOperations"][2]["operation"]["bindings"]["amqp"]["bindingVersion"],
        json!("0.3.0")
    );

    let lines = &rendered["components"]["schemas"]["OrderEvent"]["properties"]["lines"];
    assert_eq!(lines["refTitle"], json!("OrderLine"));
    assert_eq!(lines["items"]["name"], json!("#/components/schemas/OrderLine[]"));
    assert_eq!(lines["items"]["type"], json!("string"));
    assert_eq!(
        rendered["components"]["schemas"]["OrderEvent"]["example"]["lineCount"],
        json!(4)
    );
    assert_eq!(rendered["info"]["asyncApiJson"]["info"]["title"], json!("Orders API"));
}

#[test]
fn mapping_twice_is_identical() {
    assert_eq!(
        parse_asyncapi_yaml(ORDERS_YAML).unwrap(),
        parse_asyncapi_yaml(ORDERS_YAML).unwrap()
    );
}

#[test]
fn derives_view_for_each_operation() {
    let doc = parse_asyncapi_yaml(ORDERS_YAML).unwrap();
    for co in &doc.channel_operations {
        let view = OperationView::derive(&doc, co).unwrap();
        assert_eq!(view.protocol_name, co.operation.protocol);
        assert_eq!(view.headers_line_count, 1);
    }
}

#[test]
fn protocol_less_channel_aborts_mapping() {
    let yaml = ORDERS_YAML.replace("      kafka: {}\n", "      {}\n");
    let err = parse_asyncapi_yaml(&yaml).unwrap_err();
    assert!(matches!(err, AppError::MissingProtocol(ref c) if c == "orders"));
}
