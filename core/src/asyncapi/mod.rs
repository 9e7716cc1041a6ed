#![deny(missing_docs)]

//! # AsyncAPI Resolution
//!
//! - **shims**: Raw document deserialization layer.
//! - **reference**: `$ref` names and anchors.
//! - **bindings**: Binding normalization and binding examples.
//! - **example**: Example values prepared for display.
//! - **schemas**: Resolved schema trees.
//! - **channels**: Operation/channel merging.
//! - **models**: The resolved document.
//! - **document**: Entry points.

pub mod bindings;
pub mod channels;
pub mod document;
pub mod example;
pub mod models;
pub mod reference;
pub mod schemas;
pub mod shims;

pub use bindings::{
    binding_example, example_value, normalize_bindings, Binding, BindingValue, Protocol,
    ProtocolBinding,
};
pub use channels::merge_operations;
pub use document::{parse_asyncapi_json, parse_asyncapi_yaml, DocumentMapper};
pub use example::Example;
pub use models::{
    ChannelOperation, Components, Info, Message, Operation, OperationDirection, ResolvedDocument,
    SchemaNode, SchemaRef, Server,
};
pub use reference::{resolve_ref, BaseUrl, RefResolver};
pub use schemas::SchemaBuilder;
pub use shims::ShimAsyncApi;
