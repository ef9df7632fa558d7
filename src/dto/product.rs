//! Product catalog DTO.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::serialize::{CustomFields, TagField, TagValue, Taggable};

/// Product stock availability reported to the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Availability {
    /// Product can be purchased.
    #[default]
    InStock,
    /// Product is listed but cannot currently be purchased.
    OutOfStock,
    /// Product has been removed from the catalog.
    Discontinued,
}

impl Availability {
    /// Wire value for this availability state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InStock => "InStock",
            Self::OutOfStock => "OutOfStock",
            Self::Discontinued => "Discontinued",
        }
    }
}

/// A catalog product as the platform sees it.
///
/// Used both for upsert payloads (JSON) and for on-page product tagging
/// (markup). The three required fields identify the product; everything
/// else enriches recommendations when present and is simply omitted from
/// output when absent.
///
/// Two fields are merchant-confidential: `inventory_level` and
/// `supplier_cost` feed the platform's merchandising insights via the API
/// but are stripped from public page markup by the sanitize hook. The
/// free-text fields (`name`, `brand`, `description`) are HTML-entity
/// encoded before markup rendering.
///
/// # Examples
///
/// ```
/// use recotag::dto::Product;
/// use rust_decimal::Decimal;
///
/// let mut product = Product::new(42, "Trail Jacket", "https://shop.example.com/p/42");
/// product.price = Some(Decimal::new(12900, 2));
/// product.tag1 = vec!["outdoor".to_owned()];
/// product.custom_fields.insert("material", "recycled nylon");
/// ```
#[derive(Debug, Clone)]
pub struct Product {
    /// Platform-wide numeric product identifier.
    pub product_id: i64,
    /// Display name.
    pub name: String,
    /// Canonical product page URL.
    pub url: String,
    /// Primary image URL.
    pub image_url: Option<String>,
    /// Current selling price.
    pub price: Option<Decimal>,
    /// Undiscounted list price.
    pub list_price: Option<Decimal>,
    /// ISO 4217 currency code for the prices.
    pub price_currency_code: Option<String>,
    /// Stock availability.
    pub availability: Availability,
    /// Category path strings, most general first.
    pub categories: Vec<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Brand name.
    pub brand: Option<String>,
    /// First free-form tag group.
    pub tag1: Vec<String>,
    /// Second free-form tag group.
    pub tag2: Vec<String>,
    /// Third free-form tag group.
    pub tag3: Vec<String>,
    /// First publication date in the merchant catalog.
    pub date_published: Option<NaiveDate>,
    /// Product condition (`new`, `used`, `refurbished`).
    pub condition: Option<String>,
    /// Global Trade Item Number.
    pub gtin: Option<String>,
    /// Average review rating, 0.0-5.0.
    pub rating_value: Option<f64>,
    /// Number of reviews behind the rating.
    pub review_count: Option<u32>,
    /// Additional image URLs.
    pub alternate_image_urls: Vec<String>,
    /// Units in stock. Merchant-confidential: stripped from page markup.
    pub inventory_level: Option<i64>,
    /// Unit cost from the supplier. Merchant-confidential: stripped from
    /// page markup.
    pub supplier_cost: Option<Decimal>,
    /// Caller-defined custom fields; keys keep their exact casing.
    pub custom_fields: CustomFields,
}

impl Product {
    /// Creates a product with its required identity fields.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for constructor convenience"
    )]
    pub fn new(product_id: i64, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            product_id,
            name: name.into(),
            url: url.into(),
            image_url: None,
            price: None,
            list_price: None,
            price_currency_code: None,
            availability: Availability::default(),
            categories: Vec::new(),
            description: None,
            brand: None,
            tag1: Vec::new(),
            tag2: Vec::new(),
            tag3: Vec::new(),
            date_published: None,
            condition: None,
            gtin: None,
            rating_value: None,
            review_count: None,
            alternate_image_urls: Vec::new(),
            inventory_level: None,
            supplier_cost: None,
            custom_fields: CustomFields::new(),
        }
    }
}

impl Taggable for Product {
    fn tag_fields(&self) -> Vec<TagField<'_>> {
        vec![
            TagField::new("productId", Some(TagValue::from(self.product_id))),
            TagField::new("name", Some(TagValue::from(self.name.as_str()))),
            TagField::new("url", Some(TagValue::from(self.url.as_str()))),
            TagField::new("imageUrl", self.image_url.as_deref().map(TagValue::from)),
            TagField::new("price", self.price.map(TagValue::from)),
            TagField::new("listPrice", self.list_price.map(TagValue::from)),
            TagField::new(
                "priceCurrencyCode",
                self.price_currency_code.as_deref().map(TagValue::from),
            ),
            TagField::new("availability", Some(TagValue::from(self.availability.as_str()))),
            TagField::new(
                "categories",
                Some(TagValue::tagged_str_list("category", &self.categories)),
            ),
            TagField::new("description", self.description.as_deref().map(TagValue::from)),
            TagField::new("brand", self.brand.as_deref().map(TagValue::from)),
            TagField::new("tag1", Some(TagValue::tagged_str_list("tag", &self.tag1))),
            TagField::new("tag2", Some(TagValue::tagged_str_list("tag", &self.tag2))),
            TagField::new("tag3", Some(TagValue::tagged_str_list("tag", &self.tag3))),
            TagField::new(
                "datePublished",
                self.date_published.map(|d| TagValue::from(d.format("%Y-%m-%d").to_string())),
            ),
            TagField::new("condition", self.condition.as_deref().map(TagValue::from)),
            TagField::new("gtin", self.gtin.as_deref().map(TagValue::from)),
            TagField::new("ratingValue", self.rating_value.map(TagValue::from)),
            TagField::new("reviewCount", self.review_count.map(TagValue::from)),
            TagField::new(
                "alternateImageUrls",
                Some(TagValue::tagged_str_list("alternate_image_url", &self.alternate_image_urls)),
            ),
            TagField::new("inventoryLevel", self.inventory_level.map(TagValue::from)),
            TagField::new("supplierCost", self.supplier_cost.map(TagValue::from)),
            TagField::new("customFields", self.custom_fields.as_value()),
        ]
    }

    fn html_encoded_fields(&self) -> &'static [&'static str] {
        &["name", "brand", "description"]
    }

    fn sanitized(&self) -> Option<Box<dyn Taggable + '_>> {
        if self.inventory_level.is_none() && self.supplier_cost.is_none() {
            return None;
        }
        let mut clean = self.clone();
        clean.inventory_level = None;
        clean.supplier_cost = None;
        Some(Box::new(clean))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::{json, markup};

    #[test]
    fn test_minimal_product_serializes_identity_fields() {
        let product = Product::new(42, "Trail Jacket", "https://shop.example.com/p/42");
        let json = json::serialize(&product).unwrap();

        assert_eq!(
            json,
            r#"{"availability":"InStock","name":"Trail Jacket","product_id":42,"url":"https://shop.example.com/p/42"}"#
        );
    }

    #[test]
    fn test_prices_serialize_as_numbers() {
        let mut product = Product::new(1, "P", "https://shop.example.com/p/1");
        product.price = Some(Decimal::new(9999, 2));
        product.list_price = Some(Decimal::new(12000, 2));

        let json = json::serialize(&product).unwrap();
        assert!(json.contains(r#""price":99.99"#));
        assert!(json.contains(r#""list_price":120.0"#));
    }

    #[test]
    fn test_confidential_fields_reach_api_payload() {
        let mut product = Product::new(1, "P", "https://shop.example.com/p/1");
        product.inventory_level = Some(3);
        product.supplier_cost = Some(Decimal::new(1850, 2));

        let json = json::serialize(&product).unwrap();
        assert!(json.contains(r#""inventory_level":3"#));
        assert!(json.contains(r#""supplier_cost":18.5"#));
    }

    #[test]
    fn test_confidential_fields_stripped_from_markup() {
        let mut product = Product::new(1, "P", "https://shop.example.com/p/1");
        product.inventory_level = Some(3);
        product.supplier_cost = Some(Decimal::new(1850, 2));

        let html = markup::render(&product, "product").unwrap();
        assert!(!html.contains("inventory_level"));
        assert!(!html.contains("supplier_cost"));
    }

    #[test]
    fn test_date_published_formats_as_iso_date() {
        let mut product = Product::new(1, "P", "https://shop.example.com/p/1");
        product.date_published = NaiveDate::from_ymd_opt(2026, 3, 14);

        let json = json::serialize(&product).unwrap();
        assert!(json.contains(r#""date_published":"2026-03-14""#));
    }

    #[test]
    fn test_name_entities_encoded_in_markup_only() {
        let product = Product::new(1, "Socks & Sandals", "https://shop.example.com/p/1");

        let json = json::serialize(&product).unwrap();
        assert!(json.contains("Socks & Sandals"));

        let html = markup::render(&product, "product").unwrap();
        assert!(html.contains("Socks &amp; Sandals"));
    }
}
