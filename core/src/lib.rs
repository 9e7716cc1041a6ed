#![deny(missing_docs)]

//! # AsyncDoc Core
//!
//! Resolves AsyncAPI documents into display-ready object graphs: references
//! become titles and anchors, schemas become trees, and operations are joined
//! with their channels and messages.

/// Shared error types.
pub mod error;

/// AsyncAPI parsing and resolution.
pub mod asyncapi;

/// Interfaces of the I/O collaborators (fetch, publish, notify).
pub mod collaborators;

/// Per-operation view state and the publish flow.
pub mod view;

pub use asyncapi::{
    parse_asyncapi_json, parse_asyncapi_yaml, BaseUrl, Binding, BindingValue, ChannelOperation,
    DocumentMapper, Example, Message, Operation, OperationDirection, Protocol, ResolvedDocument,
    SchemaNode, SchemaRef,
};
pub use collaborators::{DocumentFetcher, Notifier, PublishError, PublishRequest, Publisher};
pub use error::{AppError, AppResult};
pub use view::{OperationView, PublishOutcome, TextField};
