#![deny(missing_docs)]

//! # Schema Tree Builder
//!
//! Maps raw schema nodes into resolved [`SchemaNode`] trees.
//!
//! Only `properties` and `items` are descended into; `$ref` targets are named
//! and linked, never expanded.

use crate::asyncapi::example::Example;
use crate::asyncapi::models::{SchemaNode, ARRAY_MARKER};
use crate::asyncapi::reference::RefResolver;
use crate::asyncapi::shims::ShimSchema;
use indexmap::IndexMap;

/// Builds resolved schema trees against a [`RefResolver`].
#[derive(Debug, Clone, Copy)]
pub struct SchemaBuilder<'a> {
    resolver: &'a RefResolver,
}

impl<'a> SchemaBuilder<'a> {
    /// Creates a builder linking references through `resolver`.
    pub fn new(resolver: &'a RefResolver) -> Self {
        Self { resolver }
    }

    /// Resolves every entry of a schema mapping, keeping keys and order.
    pub fn build_all(
        &self,
        schemas: &IndexMap<String, ShimSchema>,
    ) -> IndexMap<String, SchemaNode> {
        schemas
            .iter()
            .map(|(name, schema)| (name.clone(), self.build(name, schema)))
            .collect()
    }

    /// Resolves one schema node and everything nested below it.
    ///
    /// # Arguments
    ///
    /// * `name` - Key of the node in its parent mapping.
    /// * `raw` - The raw schema node.
    pub fn build(&self, name: &str, raw: &ShimSchema) -> SchemaNode {
        let ref_location = raw.ref_location.as_deref();

        // Array items are named after the collection reference, not a property.
        let items = raw.items.as_deref().map(|items| {
            let item_name = format!("{}{}", ref_location.unwrap_or_default(), ARRAY_MARKER);
            Box::new(self.build(&item_name, items))
        });

        SchemaNode {
            name: name.to_string(),
            title: schema_title(name).to_string(),
            description: raw.description.clone(),
            ref_name: raw.ref_location.clone(),
            ref_title: self.resolver.resolve(ref_location).map(str::to_string),
            anchor_url: self.resolver.anchor_url(ref_location),
            anchor_identifier: format!("#{}", name),
            schema_type: raw.schema_type.clone(),
            format: raw.format.clone(),
            enum_values: raw.enum_values.clone(),
            properties: raw.properties.as_ref().map(|props| self.build_all(props)),
            items,
            required: raw.required.clone(),
            example: raw.example.clone().map(Example::new),
        }
    }
}

/// Last `.`-separated segment of a (possibly fully qualified) schema name.
pub fn schema_title(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}
