#![deny(missing_docs)]

//! # Publish Command
//!
//! Sends an example message for one channel operation through the documented
//! service's publishing endpoint (`POST <service>/springwolf/<protocol>/publish`).
//!
//! Texts default to the examples found in the document and can be replaced by
//! files, mirroring the editable text areas of the documentation page.

use crate::error::{CliError, CliResult};
use crate::fetch::SourceFetcher;
use crate::resolve::SourceArgs;
use asyncdoc_core::{
    ChannelOperation, Notifier, OperationView, PublishError, PublishOutcome, PublishRequest,
    Publisher, ResolvedDocument,
};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Arguments for the publish command.
#[derive(clap::Args, Debug, Clone)]
pub struct PublishArgs {
    /// Where to read the document from.
    #[clap(flatten)]
    pub source: SourceArgs,

    /// Base URL of the documented service.
    #[clap(long, env = "ASYNCDOC_SERVICE", default_value = "http://localhost:8080")]
    pub service: Url,

    /// Channel to publish to.
    #[clap(long)]
    pub channel: String,

    /// Message title, when the channel carries several messages.
    #[clap(long)]
    pub message: Option<String>,

    /// File with the payload text. Defaults to the payload schema example.
    #[clap(long)]
    pub payload: Option<PathBuf>,

    /// Payload type name. Defaults to the message name.
    #[clap(long)]
    pub payload_type: Option<String>,

    /// File with the headers JSON. Defaults to the headers schema example.
    #[clap(long)]
    pub headers: Option<PathBuf>,

    /// File with the bindings JSON. Defaults to the binding example.
    #[clap(long)]
    pub bindings: Option<PathBuf>,
}

/// Prints notifications to stderr.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, label: &str, _duration_ms: u64) {
        eprintln!("[{}] {}", label, message);
    }
}

/// Publishes through the service's HTTP endpoint.
#[cfg(feature = "client")]
pub struct HttpPublisher {
    service: Url,
}

#[cfg(feature = "client")]
impl HttpPublisher {
    /// Creates a publisher for the service rooted at `service`.
    pub fn new(service: Url) -> Self {
        Self { service }
    }
}

#[cfg(feature = "client")]
impl Publisher for HttpPublisher {
    fn publish(&self, request: &PublishRequest) -> Result<(), PublishError> {
        let url = publish_url(&self.service, &request.protocol)
            .map_err(|e| PublishError::transport(e.to_string()))?;
        tracing::debug!(%url, channel = %request.channel, "publishing example");

        match ureq::post(url.as_str())
            .query("topic", &request.channel)
            .send_json(request.message_dto())
        {
            Ok(_) => Ok(()),
            Err(ureq::Error::StatusCode(status)) => Err(PublishError::with_status(
                status,
                format!("service answered {}", status),
            )),
            Err(e) => Err(PublishError::transport(e.to_string())),
        }
    }
}

/// `<service>/springwolf/<protocol>/publish`.
pub fn publish_url(service: &Url, protocol: &str) -> CliResult<Url> {
    let mut url = service.clone();
    url.path_segments_mut()
        .map_err(|_| CliError::General(format!("'{}' cannot be a base URL", service)))?
        .pop_if_empty()
        .extend(["springwolf", protocol, "publish"]);
    Ok(url)
}

/// Finds the channel operation for `channel` (and `message` title, if given).
pub fn find_channel_operation<'a>(
    document: &'a ResolvedDocument,
    channel: &str,
    message: Option<&str>,
) -> CliResult<&'a ChannelOperation> {
    document
        .channel_operations
        .iter()
        .filter(|co| co.name == channel)
        .find(|co| match message {
            Some(title) => co.operation.message.title.as_deref() == Some(title),
            None => true,
        })
        .ok_or_else(|| {
            CliError::General(format!(
                "No operation on channel '{}'{}",
                channel,
                message
                    .map(|m| format!(" carries message '{}'", m))
                    .unwrap_or_default()
            ))
        })
}

/// Executes the publish command.
pub fn execute(args: &PublishArgs) -> CliResult<()> {
    let document = args.source.load(&SourceFetcher)?;
    let channel_operation =
        find_channel_operation(&document, &args.channel, args.message.as_deref())?;
    let mut view = OperationView::derive(&document, channel_operation)?;
    if let Some(binding) = &view.message_binding {
        tracing::debug!(
            protocol = %binding.protocol(),
            binding_version = ?binding.binding_version(),
            "message binding"
        );
    }

    let payload = text_or_default(
        args.payload.as_deref(),
        view.default_example.as_ref().map(|e| e.text.clone()),
    )?;
    let headers = text_or_default(
        args.headers.as_deref(),
        view.headers_example.as_ref().map(|e| e.text.clone()),
    )?;
    let bindings = match args.bindings.as_deref() {
        Some(path) => fs::read_to_string(path)?,
        None => view
            .create_message_binding_example()
            .map(|e| e.text.clone())
            .unwrap_or_else(|| "{}".to_string()),
    };
    let payload_type = args
        .payload_type
        .clone()
        .or_else(|| view.default_example_type.clone())
        .ok_or_else(|| CliError::General("Message has no name; pass --payload-type".into()))?;

    let outcome = publish_with(
        &view,
        &payload,
        &payload_type,
        &headers,
        &bindings,
        &args.service,
    );
    match outcome {
        PublishOutcome::Sent => Ok(()),
        PublishOutcome::InvalidInput => {
            Err(CliError::General("Example payload is not valid".into()))
        }
        PublishOutcome::Failed(err) => Err(CliError::Http(err.to_string())),
    }
}

#[cfg(feature = "client")]
fn publish_with(
    view: &OperationView,
    payload: &str,
    payload_type: &str,
    headers: &str,
    bindings: &str,
    service: &Url,
) -> PublishOutcome {
    let publisher = HttpPublisher::new(service.clone());
    view.publish(payload, payload_type, headers, bindings, &publisher, &ConsoleNotifier)
}

#[cfg(not(feature = "client"))]
fn publish_with(
    _view: &OperationView,
    _payload: &str,
    _payload_type: &str,
    _headers: &str,
    _bindings: &str,
    _service: &Url,
) -> PublishOutcome {
    PublishOutcome::Failed(PublishError::transport(
        "built without the `client` feature",
    ))
}

fn text_or_default(path: Option<&Path>, default: Option<String>) -> CliResult<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => Ok(default.unwrap_or_else(|| "{}".to_string())),
    }
}
