//! Platform API operations.
//!
//! Thin path + payload wrappers over the serialization core: each
//! operation serializes its input with the object serializer, POSTs it
//! through [`ApiClient`], and deserializes any typed response. Transient
//! failures retry with exponential backoff per [`RetryPolicy`].
//!
//! | Operation | Path | Payload |
//! |---|---|---|
//! | [`account::create_account`] | `/v1/accounts/create/{lang}` | sign-up params |
//! | [`account::sso_login`] | `/v1/sso/{account}` | user identity |
//! | [`products::upsert_products`] | `/v1/products/upsert` | product batch |
//! | [`products::request_recrawl`] | `/v1/products/recrawl` | product ids |
//! | [`orders::confirm_order`] | `/v1/orders/confirm/{account}` | order |
//! | [`history::export_history`] | `/v1/history/{kind}/{account}` | encrypted envelope |
//!
//! Every request carries `Authorization: Bearer <token>`, a SHA-256
//! `Content-Digest`, and the `X-SDK-Version` header.

pub mod account;
pub mod client;
pub mod history;
pub mod orders;
pub mod products;
pub mod retry;

pub use account::{SignupParams, SignupResponse, SsoParams, SsoResponse};
pub use client::{ApiClient, compute_content_digest};
pub use history::{ExportOutcome, HistoryKind};
pub use retry::{RetryPolicy, retry_with_backoff};
