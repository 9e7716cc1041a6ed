#![deny(missing_docs)]

//! # Resolve Command
//!
//! Fetches a raw AsyncAPI document and prints the resolved, display-ready
//! document as JSON.

use crate::error::CliResult;
use crate::fetch::SourceFetcher;
use asyncdoc_core::{AppError, BaseUrl, DocumentFetcher, DocumentMapper, ResolvedDocument};
use std::fs;
use std::path::PathBuf;

/// Arguments shared by commands that load a document.
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Path or http(s) URL of the AsyncAPI document (JSON or YAML).
    #[clap(long, env = "ASYNCDOC_SOURCE")]
    pub source: String,

    /// URL of the page the document is rendered on. Anchors are built from
    /// its path and query. Defaults to bare `#` anchors.
    #[clap(long, env = "ASYNCDOC_LOCATION")]
    pub location: Option<String>,
}

impl SourceArgs {
    /// Fetches and resolves the document.
    pub fn load(&self, fetcher: &impl DocumentFetcher) -> CliResult<ResolvedDocument> {
        let base_url = match &self.location {
            Some(location) => BaseUrl::parse_location(location)?,
            None => BaseUrl::default(),
        };
        let content = fetcher.fetch(&self.source)?;
        let document = DocumentMapper::new(base_url).map_str(&content)?;
        tracing::info!(
            source = %self.source,
            channel_operations = document.channel_operations.len(),
            "document resolved"
        );
        Ok(document)
    }
}

/// Arguments for the resolve command.
#[derive(clap::Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Where to read the document from.
    #[clap(flatten)]
    pub source: SourceArgs,

    /// Write the resolved JSON here instead of stdout.
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Emit single-line JSON.
    #[clap(long)]
    pub compact: bool,
}

/// Executes the resolve command.
pub fn execute(args: &ResolveArgs) -> CliResult<()> {
    let document = args.source.load(&SourceFetcher)?;
    let rendered = render(&document, args.compact)?;

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, rendered)?;
            eprintln!("Resolved document written to {:?}", path);
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn render(document: &ResolvedDocument, compact: bool) -> CliResult<String> {
    let rendered = if compact {
        serde_json::to_string(document)
    } else {
        serde_json::to_string_pretty(document)
    };
    Ok(rendered.map_err(AppError::from)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const DOC: &str = r##"{
        "info": { "title": "Orders", "version": "1" },
        "channels": { "orders": { "bindings": { "kafka": {} } } },
        "operations": {
            "orders_send": {
                "channel": { "$ref": "#/channels/orders" },
                "action": "send",
                "messages": [{ "title": "OrderEvent", "payload": { "$ref": "#/components/schemas/OrderEvent" } }]
            }
        },
        "components": { "schemas": { "OrderEvent": { "type": "object" } } }
    }"##;

    fn source_args(source: String, location: Option<&str>) -> SourceArgs {
        SourceArgs {
            source,
            location: location.map(str::to_string),
        }
    }

    #[test]
    fn test_execute_writes_resolved_json() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("asyncapi.json");
        let output = dir.path().join("out/resolved.json");
        fs::write(&input, DOC).unwrap();

        let args = ResolveArgs {
            source: source_args(
                input.to_string_lossy().to_string(),
                Some("http://localhost:8080/springwolf/asyncapi-ui.html"),
            ),
            output: Some(output.clone()),
            compact: true,
        };
        execute(&args).unwrap();

        let resolved: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
        let co = &resolved["channelOperations"][0];
        assert_eq!(co["anchorIdentifier"], "#channel-kafka-orders-subscribe-OrderEvent");
        assert_eq!(
            co["operation"]["message"]["payload"]["anchorUrl"],
            "/springwolf/asyncapi-ui.html#OrderEvent"
        );
    }

    #[test]
    fn test_invalid_location_is_rejected() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("asyncapi.json");
        fs::write(&input, DOC).unwrap();

        let args = source_args(input.to_string_lossy().to_string(), Some("::"));
        let err = args.load(&SourceFetcher).unwrap_err();
        assert!(format!("{}", err).contains("Invalid document location"));
    }
}
