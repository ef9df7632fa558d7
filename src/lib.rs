//! Recotag SDK: merchant integration for a commerce recommendation platform.
//!
//! A Rust library merchant e-commerce platforms embed to feed the Recotag
//! recommendation service: it builds DTOs (products, orders, buyers,
//! carts), serializes them to JSON payloads and invisible on-page tagging
//! markup, encrypts history-export bundles, and issues the platform API
//! operations (sign-up, SSO, order confirmation, product upsert/recrawl,
//! history export).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │   Merchant platform  │  shop backend / storefront templates
//! └─────────┬────────────┘
//!           │ DTOs (Product, Order, Cart, Buyer)
//! ┌─────────▼────────────────────────────────────────┐
//! │              Recotag SDK (this crate)            │
//! │  ┌────────────┐  ┌──────────────┐  ┌──────────┐  │
//! │  │ serialize  │──│    export    │  │   api    │  │
//! │  │ JSON + <span>│ │ AES-256-GCM  │  │ reqwest  │  │
//! │  │ markup     │  │ envelopes    │  │ + retry  │  │
//! │  └────────────┘  └──────────────┘  └──────────┘  │
//! └─────────┬───────────────────────────┬────────────┘
//!           │ hidden markup in page HTML │ HTTPS
//! ┌─────────▼──────────┐      ┌─────────▼──────────┐
//! │  Browser-side tag  │      │   Platform API     │
//! └────────────────────┘      └────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## 1. Tag a product page
//!
//! ```
//! use recotag::{dto::Product, serialize::markup};
//! use rust_decimal::Decimal;
//!
//! let mut product = Product::new(42, "Trail Jacket", "https://shop.example.com/p/42");
//! product.price = Some(Decimal::new(12900, 2));
//! product.tag1 = vec!["outdoor".to_owned()];
//!
//! // Embed this block anywhere in the product page HTML.
//! let html = markup::render(&product, "product")?;
//! assert!(html.contains("<span class=\"product_id\">42</span>"));
//! # Ok::<(), recotag::error::SdkError>(())
//! ```
//!
//! ## 2. Confirm an order
//!
//! ```no_run
//! use recotag::{
//!     api::{ApiClient, orders},
//!     config::AccountConfig,
//!     dto::{LineItem, Order, OrderStatus},
//! };
//!
//! # async fn example() -> recotag::error::Result<()> {
//! let config = AccountConfig::from_toml_str(
//!     r#"
//!     account_id = "shop-eu-1"
//!
//!     [tokens]
//!     api = "tok_live_abc123"
//!     "#,
//! )?;
//! let client = ApiClient::new(config)?;
//!
//! let mut order = Order::new("1001");
//! order.order_status_code = Some(OrderStatus::Paid);
//! order.purchased_items.push(LineItem::new(42, 2, "Trail Jacket"));
//!
//! orders::confirm_order(&client, &order).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## 3. Export history on account creation
//!
//! ```no_run
//! use recotag::{
//!     api::{ApiClient, ExportOutcome, HistoryKind, history},
//!     config::AccountConfig,
//!     dto::Order,
//!     serialize::Taggable,
//! };
//!
//! # async fn example(past_orders: Vec<Order>) -> recotag::error::Result<()> {
//! # let config = AccountConfig::new("shop-eu-1");
//! let client = ApiClient::new(config)?;
//!
//! let items: Vec<&dyn Taggable> = past_orders.iter().map(|o| o as &dyn Taggable).collect();
//! match history::export_history(&client, HistoryKind::Orders, items).await? {
//!     ExportOutcome::Exported { bytes } => println!("uploaded {bytes} bytes"),
//!     ExportOutcome::Skipped => println!("no export secret, skipped"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`serialize`]: the serialization core: [`Taggable`](serialize::Taggable)
//!   DTO descriptions, snake_case JSON, invisible markup rendering
//! - [`export`]: AES-256-GCM encrypted history export envelopes
//! - [`dto`]: product/order/buyer/cart data holders
//! - [`api`]: platform API operations over HTTPS with retry
//! - [`config`]: TOML account configuration and token handling
//! - [`error`]: error types with recovery guidance
//!
//! # Wire Contracts
//!
//! Three formats leave this crate, all documented at their module roots:
//!
//! - **JSON** ([`serialize::json`]): snake_case keys (custom fields
//!   verbatim), alphabetically ordered at every nesting level, null-like
//!   values omitted.
//! - **Markup** ([`serialize::markup`]): nested `<span class="...">` under
//!   a hidden `<div class="notranslate">`, null-like subtrees omitted
//!   entirely.
//! - **Export envelope** ([`export`]): `nonce(12) ‖ ciphertext ‖ tag(16)`
//!   under `SHA3-256(base64_decode(secret))`.
//!
//! # Concurrency
//!
//! The serialization and export core is synchronous, allocation-only, and
//! re-entrant; nonce generation uses the process CSPRNG, which is safe for
//! concurrent exports. Only the [`api`] operations are async.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod api;
pub mod config;
pub mod dto;
pub mod error;
pub mod export;
pub mod serialize;

pub use api::ApiClient;
pub use config::AccountConfig;
pub use error::{Result, SdkError};

/// SDK version reported to the platform in the `X-SDK-Version` header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
