//! Purchased/cart line item DTO.

use rust_decimal::Decimal;

use crate::serialize::{TagField, TagValue, Taggable};

/// One line of a cart or order.
///
/// Line items are self-describing in markup: wherever they appear they
/// render as `<span class="line_item">`, so cart and order tagging nest
/// them identically.
///
/// A quantity of `0` is a present value (a fully-refunded line keeps its
/// row); it is never omitted from output.
#[derive(Debug, Clone)]
pub struct LineItem {
    /// Product identifier the line refers to.
    pub product_id: i64,
    /// SKU identifier when the merchant tracks variants.
    pub sku_id: Option<String>,
    /// Number of units.
    pub quantity: u32,
    /// Display name at time of purchase.
    pub name: String,
    /// Price per unit.
    pub unit_price: Option<Decimal>,
    /// ISO 4217 currency code for the unit price.
    pub price_currency_code: Option<String>,
}

impl LineItem {
    /// Creates a line item.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for constructor convenience"
    )]
    pub fn new(product_id: i64, quantity: u32, name: impl Into<String>) -> Self {
        Self {
            product_id,
            sku_id: None,
            quantity,
            name: name.into(),
            unit_price: None,
            price_currency_code: None,
        }
    }

    /// Line total (`unit_price * quantity`), when a price is set.
    #[must_use]
    pub fn total(&self) -> Option<Decimal> {
        self.unit_price.map(|p| p * Decimal::from(self.quantity))
    }
}

impl Taggable for LineItem {
    fn tag_fields(&self) -> Vec<TagField<'_>> {
        vec![
            TagField::new("productId", Some(TagValue::from(self.product_id))),
            TagField::new("skuId", self.sku_id.as_deref().map(TagValue::from)),
            TagField::new("quantity", Some(TagValue::from(self.quantity))),
            TagField::new("name", Some(TagValue::from(self.name.as_str()))),
            TagField::new("unitPrice", self.unit_price.map(TagValue::from)),
            TagField::new(
                "priceCurrencyCode",
                self.price_currency_code.as_deref().map(TagValue::from),
            ),
        ]
    }

    fn markup_key(&self) -> Option<&'static str> {
        Some("lineItem")
    }

    fn html_encoded_fields(&self) -> &'static [&'static str] {
        &["name"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::{json, markup};

    #[test]
    fn test_zero_quantity_is_retained() {
        let item = LineItem::new(7, 0, "Refunded thing");
        let json = json::serialize(&item).unwrap();
        assert!(json.contains(r#""quantity":0"#));
    }

    #[test]
    fn test_total() {
        let mut item = LineItem::new(7, 3, "Thing");
        item.unit_price = Some(Decimal::new(1050, 2));
        assert_eq!(item.total(), Some(Decimal::new(3150, 2)));

        let unpriced = LineItem::new(7, 3, "Thing");
        assert_eq!(unpriced.total(), None);
    }

    #[test]
    fn test_markup_key_overrides_field_key() {
        let item = LineItem::new(7, 1, "Thing");
        let html = markup::render(&item, "whatever").unwrap();
        assert!(html.contains("<span class=\"line_item\">"));
    }
}
