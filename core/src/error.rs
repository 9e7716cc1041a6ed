//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// The raw document is not valid JSON or does not match the expected shape.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// The raw document is not valid YAML.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// An operation references a channel that the document does not declare.
    #[from(ignore)]
    #[display("Unknown channel '{_0}' referenced by operation")]
    UnknownChannel(String),

    /// A channel declares no protocol bindings, so its protocol is undefined.
    #[from(ignore)]
    #[display("Channel '{_0}' declares no protocol binding")]
    MissingProtocol(String),

    /// A schema reference does not exist in `components.schemas`.
    #[from(ignore)]
    #[display("Schema '{_0}' not found in components")]
    SchemaLookupMiss(String),

    /// User supplied text could not be parsed for publishing.
    #[from(ignore)]
    #[display("Invalid payload: {_0}")]
    InvalidPayload(String),

    /// A document location could not be turned into an anchor base.
    #[from(ignore)]
    #[display("Invalid document location: {_0}")]
    InvalidLocation(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Json(_)));
    }

    #[test]
    fn test_string_conversion() {
        // Strings land in General, never in one of the contract variants
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_contract_variants_display() {
        let err = AppError::MissingProtocol("orders".into());
        assert_eq!(
            format!("{}", err),
            "Channel 'orders' declares no protocol binding"
        );

        let err = AppError::SchemaLookupMiss("OrderEvent".into());
        assert_eq!(format!("{}", err), "Schema 'OrderEvent' not found in components");
    }
}
