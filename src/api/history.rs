//! Encrypted history export operation.
//!
//! Bootstraps a new account with the merchant's existing order and
//! product history. The collection is serialized and sealed by
//! [`crate::export`] and POSTed as a raw octet-stream body.
//!
//! An account without an export secret produces an empty envelope; the
//! operation then skips the request entirely and reports
//! [`ExportOutcome::Skipped`]. "Nothing to export" is a success, not a
//! failure needing retry.

use tracing::{info, instrument};

use crate::{
    api::client::ApiClient,
    error::Result,
    export,
    serialize::Taggable,
};

/// Which history collection an export carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryKind {
    /// Past orders.
    Orders,
    /// Catalog products.
    Products,
}

impl HistoryKind {
    /// Path segment for this collection.
    #[must_use]
    pub const fn path_segment(&self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::Products => "products",
        }
    }
}

/// Result of a history export attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Envelope was encrypted and uploaded.
    Exported {
        /// Envelope size in bytes, nonce and tag included.
        bytes: usize,
    },
    /// No export secret configured; nothing was sent.
    Skipped,
}

/// Encrypts and uploads a history collection.
///
/// # Errors
///
/// Returns [`SdkError::ConfigError`](crate::error::SdkError::ConfigError)
/// without an API token, crypto errors for a malformed export secret, and
/// transport/API errors. A missing secret is NOT an error; see
/// [`ExportOutcome::Skipped`].
#[instrument(skip(client, collection), fields(account_id = %client.config().account_id, kind = ?kind))]
pub async fn export_history<'a, I>(
    client: &ApiClient,
    kind: HistoryKind,
    collection: I,
) -> Result<ExportOutcome>
where
    I: IntoIterator<Item = &'a dyn Taggable>,
{
    let secret = client.config().tokens.export_secret.as_deref().unwrap_or("");
    let envelope = export::export(secret, collection)?;

    if envelope.is_empty() {
        info!("no export secret configured, skipping history export");
        return Ok(ExportOutcome::Skipped);
    }

    let token = client.api_token()?;
    let bytes = envelope.len();
    let path = format!("/v1/history/{}/{}", kind.path_segment(), client.config().account_id);

    info!(bytes, "uploading encrypted history export");
    client.post_octets(&path, token, envelope).await?;
    Ok(ExportOutcome::Exported { bytes })
}
