//! Shopping cart DTO for on-page tagging.

use rust_decimal::Decimal;

use crate::{
    dto::LineItem,
    serialize::{TagField, TagValue, Taggable},
};

/// The visitor's current cart, embedded in page markup on every view.
///
/// An empty cart renders as an empty tagging block (the `line_items` span
/// is omitted entirely); the platform reads that as "cart cleared".
#[derive(Debug, Clone, Default)]
pub struct Cart {
    /// Lines currently in the cart.
    pub line_items: Vec<LineItem>,
    /// URL that restores this cart in a fresh session, when the merchant
    /// supports cart recovery emails.
    pub restore_link: Option<String>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line to the cart.
    pub fn add_item(&mut self, item: LineItem) {
        self.line_items.push(item);
    }

    /// Sum of line totals for lines that carry a price.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.line_items.iter().filter_map(LineItem::total).sum()
    }
}

impl Taggable for Cart {
    fn tag_fields(&self) -> Vec<TagField<'_>> {
        vec![
            TagField::new(
                "lineItems",
                Some(TagValue::seq(self.line_items.iter().map(|i| TagValue::object(i)).collect())),
            ),
            TagField::new("restoreLink", self.restore_link.as_deref().map(TagValue::from)),
        ]
    }
}
