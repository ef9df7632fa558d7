//! Order DTO for confirmations and history exports.

use chrono::{DateTime, Utc};

use crate::{
    dto::{Buyer, LineItem},
    serialize::{TagField, TagValue, Taggable},
};

/// Order lifecycle status reported to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Order created, awaiting payment.
    Pending,
    /// Payment authorized but not captured.
    Authorized,
    /// Payment captured.
    Paid,
    /// Order handed to the carrier.
    Shipped,
    /// Order delivered to the buyer.
    Delivered,
    /// Order cancelled before fulfilment.
    Cancelled,
    /// Order refunded after payment.
    Refunded,
}

impl OrderStatus {
    /// Wire value for this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Authorized => "authorized",
            Self::Paid => "paid",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
        }
    }
}

/// A merchant order, for live confirmation and encrypted history export.
///
/// # Examples
///
/// ```
/// use recotag::dto::{Buyer, LineItem, Order, OrderStatus};
///
/// let mut order = Order::new("1001");
/// order.order_status_code = Some(OrderStatus::Paid);
/// order.buyer = Some(Buyer { email: Some("ada@example.com".to_owned()), ..Buyer::new() });
/// order.purchased_items.push(LineItem::new(42, 2, "Trail Jacket"));
/// ```
#[derive(Debug, Clone)]
pub struct Order {
    /// Merchant-side order number.
    pub order_number: String,
    /// Reference in an external system (ERP, marketplace).
    pub external_order_ref: Option<String>,
    /// Lifecycle status.
    pub order_status_code: Option<OrderStatus>,
    /// Payment provider identifier (e.g. `stripe`, `invoice`).
    pub payment_provider: Option<String>,
    /// When the order was placed.
    pub created_at: Option<DateTime<Utc>>,
    /// The buyer, when known.
    pub buyer: Option<Buyer>,
    /// Purchased lines.
    pub purchased_items: Vec<LineItem>,
}

impl Order {
    /// Creates an order with its merchant-side number.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for constructor convenience"
    )]
    pub fn new(order_number: impl Into<String>) -> Self {
        Self {
            order_number: order_number.into(),
            external_order_ref: None,
            order_status_code: None,
            payment_provider: None,
            created_at: None,
            buyer: None,
            purchased_items: Vec::new(),
        }
    }
}

impl Taggable for Order {
    fn tag_fields(&self) -> Vec<TagField<'_>> {
        vec![
            TagField::new("orderNumber", Some(TagValue::from(self.order_number.as_str()))),
            TagField::new(
                "externalOrderRef",
                self.external_order_ref.as_deref().map(TagValue::from),
            ),
            TagField::new(
                "orderStatusCode",
                self.order_status_code.map(|s| TagValue::from(s.as_str())),
            ),
            TagField::new("paymentProvider", self.payment_provider.as_deref().map(TagValue::from)),
            TagField::new("createdAt", self.created_at.map(TagValue::from)),
            TagField::new("buyer", self.buyer.as_ref().map(|b| TagValue::object(b))),
            TagField::new(
                "purchasedItems",
                Some(TagValue::seq(
                    self.purchased_items.iter().map(|i| TagValue::object(i)).collect(),
                )),
            ),
        ]
    }
}
