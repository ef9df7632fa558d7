//! Error types for the Recotag SDK.
//!
//! This module defines all error types that can occur during SDK operations.
//! All errors implement the standard [`std::error::Error`] trait via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Serialization errors** ([`SdkError::SerializationError`],
//!   [`SdkError::UnsupportedType`], [`SdkError::MaxDepthExceeded`]):
//!   tagging/serialization failures
//! - **Crypto errors** ([`SdkError::CryptoError`]): export encryption failures
//! - **Network errors** ([`SdkError::HttpError`]): HTTP communication failures
//! - **Validation errors** ([`SdkError::InvalidApiUrl`], [`SdkError::InvalidAccountId`]):
//!   input validation failures
//! - **Protocol errors** ([`SdkError::ApiError`]): platform API violations
//!
//! # Examples
//!
//! ```
//! use recotag::error::{Result, SdkError};
//!
//! fn validate_url(url: &str) -> Result<String> {
//!     if !url.starts_with("https://") {
//!         return Err(SdkError::InvalidApiUrl("URL must use HTTPS".to_owned()));
//!     }
//!     Ok(url.to_owned())
//! }
//! ```

use thiserror::Error;

/// Result type alias for SDK operations.
///
/// This is a convenience type that uses [`SdkError`] as the error type.
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, SdkError>;

/// Errors that can occur in the Recotag SDK.
///
/// All variants include contextual information about what went wrong.
/// The error messages are designed to be user-facing and actionable.
///
/// # Error Recovery
///
/// - **Transient errors** ([`HttpError`](Self::HttpError)): retry with
///   exponential backoff ([`crate::api::RetryPolicy`])
/// - **Validation errors** ([`InvalidApiUrl`](Self::InvalidApiUrl),
///   [`InvalidAccountId`](Self::InvalidAccountId)): fix input and retry
/// - **Serialization errors** ([`UnsupportedType`](Self::UnsupportedType),
///   [`MaxDepthExceeded`](Self::MaxDepthExceeded)): fix the offending DTO;
///   these indicate a caller-side modelling bug, not a transient condition
/// - **Crypto errors** ([`CryptoError`](Self::CryptoError)): check the
///   configured export secret token
/// - **Protocol errors** ([`ApiError`](Self::ApiError)): contact platform support
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum SdkError {
    /// Serializing a tagged object graph failed.
    ///
    /// Produced when the reduced object graph cannot be encoded as JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A value of an unsupported type was passed to the HTML entity encoder.
    ///
    /// The entity encoder accepts strings and collections of strings only.
    /// This is the one strictly validated surface in the serialization core:
    /// everything else skips silently, the encoder fails loudly.
    #[error("unsupported type for HTML entity encoding: {0}")]
    UnsupportedType(String),

    /// Object graph nesting exceeded the maximum supported depth.
    ///
    /// DTO graphs are trees; hitting this limit almost always means a
    /// pathologically deep or accidentally recursive structure. The limit
    /// exists so malformed graphs fail fast instead of overflowing the stack.
    #[error("object graph exceeds maximum nesting depth of {0}")]
    MaxDepthExceeded(usize),

    /// Cryptographic operation failed.
    ///
    /// Common causes include a malformed export secret token (not valid
    /// base64) or an AEAD failure during history export encryption.
    ///
    /// # Recovery
    ///
    /// Verify that the export secret token configured for the account is the
    /// exact value issued by the platform.
    #[error("cryptographic operation failed: {0}")]
    CryptoError(String),

    /// HTTP request failed.
    ///
    /// This error wraps [`reqwest::Error`] and occurs when network
    /// communication with the platform fails: timeouts, connection refused,
    /// DNS resolution, TLS errors.
    ///
    /// # Recovery
    ///
    /// Retry the request with exponential backoff. If the error persists,
    /// verify the configured API base URL and network connectivity.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The platform returned an error response.
    ///
    /// Produced for non-success HTTP status codes and for response bodies
    /// that do not match the documented API contract. Server-side statuses
    /// (5xx) are considered transient; everything else is not.
    #[error("platform API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code returned by the platform.
        status: u16,
        /// Response body or a description of the contract violation.
        message: String,
    },

    /// Account configuration is invalid.
    ///
    /// Produced by [`AccountConfig::validate`](crate::config::AccountConfig::validate)
    /// when the configured base URL, account id, or tokens fail validation.
    #[error("invalid account configuration: {0}")]
    ConfigError(String),

    /// Invalid platform account identifier.
    ///
    /// Account ids are issued by the platform and are lowercase
    /// alphanumeric with hyphens, 1-64 characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use recotag::error::SdkError;
    ///
    /// let err = SdkError::InvalidAccountId("shop name with spaces".to_owned());
    /// assert!(err.to_string().contains("invalid account id"));
    /// ```
    #[error("invalid account id: {0}")]
    InvalidAccountId(String),

    /// Invalid platform API URL.
    ///
    /// The SDK only talks to HTTPS endpoints and refuses localhost and
    /// loopback addresses.
    #[error("invalid API URL: {0}")]
    InvalidApiUrl(String),
}

impl SdkError {
    /// True when retrying the same request may succeed.
    ///
    /// Network-level failures and platform 5xx responses are transient;
    /// validation, serialization, and crypto errors are not.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpError(_) => true,
            Self::ApiError { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
