#![deny(missing_docs)]

//! # Channel Operations
//!
//! Joins operations, channels and messages into flat [`ChannelOperation`]
//! records, one per (operation, message) pair.
//!
//! Order is significant: operations keep document order and messages keep
//! their order within an operation.

use crate::asyncapi::bindings::normalize_bindings;
use crate::asyncapi::models::{
    ChannelOperation, Message, Operation, OperationDirection, SchemaRef, CHANNEL_ANCHOR_PREFIX,
};
use crate::asyncapi::reference::RefResolver;
use crate::asyncapi::shims::{ShimChannel, ShimMessage, ShimOperation, ShimReference};
use crate::error::{AppError, AppResult};
use indexmap::IndexMap;

/// Merges raw operations with their channels.
///
/// Fails when an operation names an unknown channel, or when a channel has no
/// protocol binding to take its protocol from.
///
/// # Arguments
///
/// * `resolver` - Builds schema titles and anchors for message references.
/// * `operations` - Raw operations, in document order.
/// * `channels` - Raw channels keyed by name.
pub fn merge_operations(
    resolver: &RefResolver,
    operations: &IndexMap<String, ShimOperation>,
    channels: &IndexMap<String, ShimChannel>,
) -> AppResult<Vec<ChannelOperation>> {
    let mut merged = Vec::new();

    for (operation_key, operation) in operations {
        let channel_ref = operation.channel.ref_location.as_deref();
        let channel_name = resolver.resolve(channel_ref).ok_or_else(|| {
            AppError::General(format!(
                "Operation '{}' has no channel reference",
                operation_key
            ))
        })?;
        let channel = channels
            .get(channel_name)
            .ok_or_else(|| AppError::UnknownChannel(channel_name.to_string()))?;

        for message in &operation.messages {
            let message = map_message(resolver, message);
            merged.push(map_channel_operation(
                channel_name,
                channel,
                message,
                &operation.action,
            )?);
        }
    }

    tracing::debug!(
        operations = operations.len(),
        channel_operations = merged.len(),
        "merged channel operations"
    );
    Ok(merged)
}

fn map_channel_operation(
    channel_name: &str,
    channel: &ShimChannel,
    message: Message,
    action: &str,
) -> AppResult<ChannelOperation> {
    let bindings = channel.bindings.clone().unwrap_or_default();
    let protocol = bindings
        .keys()
        .next()
        .cloned()
        .ok_or_else(|| AppError::MissingProtocol(channel_name.to_string()))?;

    let operation = Operation {
        protocol,
        operation: OperationDirection::from_action(action),
        message,
        bindings,
    };

    Ok(ChannelOperation {
        name: channel_name.to_string(),
        anchor_identifier: anchor_identifier(channel_name, &operation),
        description: channel.description.clone(),
        operation,
    })
}

/// `#channel-<protocol>-<channel>-<direction>-<message title>`.
pub fn anchor_identifier(channel_name: &str, operation: &Operation) -> String {
    let parts = [
        operation.protocol.as_str(),
        channel_name,
        operation.operation.as_str(),
        operation.message.title.as_deref().unwrap_or_default(),
    ];
    format!("{}{}", CHANNEL_ANCHOR_PREFIX, parts.join("-"))
}

fn map_message(resolver: &RefResolver, message: &ShimMessage) -> Message {
    Message {
        name: message.name.clone(),
        title: message.title.clone(),
        description: message.description.clone(),
        payload: schema_ref(resolver, &message.payload),
        headers: schema_ref(resolver, &message.headers),
        bindings: normalize_bindings(message.bindings.as_ref()),
        raw_bindings: message.bindings.clone(),
    }
}

fn schema_ref(resolver: &RefResolver, reference: &ShimReference) -> SchemaRef {
    let location = reference.ref_location.as_deref();
    SchemaRef {
        name: reference.ref_location.clone(),
        title: resolver.resolve(location).map(str::to_string),
        anchor_url: resolver.anchor_url(location),
    }
}
