//! Product catalog operations: upsert and recrawl.

use tracing::{info, instrument};

use crate::{
    api::client::ApiClient,
    dto::Product,
    error::Result,
    serialize::{TagField, TagValue, Taggable, json},
};

/// Upserts a batch of products into the platform catalog.
///
/// Products are serialized as a JSON array; the platform creates unknown
/// product ids and updates known ones. An empty batch is a no-op request
/// the platform accepts.
///
/// # Errors
///
/// Returns [`SdkError::ConfigError`](crate::error::SdkError::ConfigError)
/// without an API token, serialization errors for malformed DTOs, and
/// transport/API errors.
#[instrument(skip(client, products), fields(account_id = %client.config().account_id, count = products.len()))]
pub async fn upsert_products(client: &ApiClient, products: &[Product]) -> Result<()> {
    info!(count = products.len(), "upserting products");
    let token = client.api_token()?;
    let body = json::serialize_collection(products.iter().map(|p| p as &dyn Taggable))?;

    client.post_json_accepted("/v1/products/upsert", token, body).await
}

/// Request body asking the platform to re-fetch product pages.
#[derive(Debug, Clone)]
struct RecrawlRequest<'a> {
    product_ids: &'a [i64],
}

impl Taggable for RecrawlRequest<'_> {
    fn tag_fields(&self) -> Vec<TagField<'_>> {
        vec![TagField::new(
            "productIds",
            Some(TagValue::seq(self.product_ids.iter().map(|id| TagValue::from(*id)).collect())),
        )]
    }
}

/// Asks the platform crawler to re-fetch the given product pages.
///
/// Used after bulk catalog changes that are cheaper to re-crawl than to
/// upsert field by field.
///
/// # Errors
///
/// Returns [`SdkError::ConfigError`](crate::error::SdkError::ConfigError)
/// without an API token, plus transport/API errors.
#[instrument(skip(client, product_ids), fields(account_id = %client.config().account_id, count = product_ids.len()))]
pub async fn request_recrawl(client: &ApiClient, product_ids: &[i64]) -> Result<()> {
    info!(count = product_ids.len(), "requesting product recrawl");
    let token = client.api_token()?;
    let body = json::serialize(&RecrawlRequest { product_ids })?;

    client.post_json_accepted("/v1/products/recrawl", token, body).await
}
