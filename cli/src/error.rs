#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use asyncdoc_core::AppError;
use derive_more::{Display, From};

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Failure inside the resolution engine.
    #[display("{}", _0)]
    Core(AppError),

    /// HTTP transport failure.
    #[from(ignore)]
    #[display("HTTP Error: {}", _0)]
    Http(String),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

/// Manual implementation of the standard Error trait.
///
/// We implement this manually (instead of `derive(Error)`) because the `General(String)`
/// variant contains a `String`, which does not implement `std::error::Error`, causing
/// auto-derived `source()` implementations to fail compilation.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_display_is_passed_through() {
        let err: CliError = AppError::UnknownChannel("orders".into()).into();
        assert_eq!(
            format!("{}", err),
            "Unknown channel 'orders' referenced by operation"
        );
    }

    #[test]
    fn test_string_becomes_general() {
        let err: CliError = String::from("nope").into();
        assert!(matches!(err, CliError::General(_)));
    }
}
