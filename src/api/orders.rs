//! Order confirmation operation.

use tracing::{info, instrument};

use crate::{
    api::client::ApiClient,
    dto::Order,
    error::Result,
    serialize::json,
};

/// Confirms a placed order with the platform.
///
/// Called from the merchant's order-completion hook so recommendations
/// learn from the purchase immediately. The serialized order is the
/// request body; the account id is part of the path.
///
/// # Errors
///
/// Returns [`SdkError::ConfigError`](crate::error::SdkError::ConfigError)
/// without an API token, serialization errors for malformed DTOs, and
/// transport/API errors.
#[instrument(skip(client, order), fields(account_id = %client.config().account_id, order_number = %order.order_number))]
pub async fn confirm_order(client: &ApiClient, order: &Order) -> Result<()> {
    info!("confirming order");
    let token = client.api_token()?;
    let body = json::serialize(order)?;
    let path = format!("/v1/orders/confirm/{}", client.config().account_id);

    client.post_json_accepted(&path, token, body).await
}
