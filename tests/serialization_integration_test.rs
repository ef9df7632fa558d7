//! End-to-end tests over the public serialization, markup, and export API.

use recotag::{
    dto::{Buyer, LineItem, Order, OrderStatus, Product},
    export,
    serialize::{CustomFields, TagField, TagValue, Taggable, json, markup, to_snake_case},
};
use rust_decimal::Decimal;

/// Collapses indentation and newlines for structural markup assertions.
fn canon(html: &str) -> String {
    html.lines().map(str::trim).collect()
}

/// Routes SDK tracing output through the test harness when diagnosing
/// failures with `--nocapture`.
fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Minimal consumer-defined DTO, as a merchant platform would write one.
#[derive(Debug, Default)]
struct TaggedItem {
    product_id: Option<i64>,
    name: Option<String>,
    price: Option<f64>,
    tag1: Vec<String>,
    nested: Option<Box<TaggedItem>>,
    custom_fields: CustomFields,
}

impl Taggable for TaggedItem {
    fn tag_fields(&self) -> Vec<TagField<'_>> {
        vec![
            TagField::new("productId", self.product_id.map(TagValue::from)),
            TagField::new("name", self.name.as_deref().map(TagValue::from)),
            TagField::new("price", self.price.map(TagValue::from)),
            TagField::new("tag1", Some(TagValue::tagged_str_list("tag", &self.tag1))),
            TagField::new("nested", self.nested.as_deref().map(|n| TagValue::object(n))),
            TagField::new("customFields", self.custom_fields.as_value()),
        ]
    }
}

#[test]
fn end_to_end_product_fixture() {
    let item = TaggedItem {
        product_id: Some(1),
        name: Some("Test Product".to_owned()),
        price: Some(99.99),
        tag1: vec!["first".to_owned()],
        ..TaggedItem::default()
    };

    // JSON: snake_case keys in alphabetical order, native scalar types.
    let json = json::serialize(&item).unwrap();
    assert_eq!(json, r#"{"name":"Test Product","price":99.99,"product_id":1,"tag1":["first"]}"#);

    // Markup: same graph as nested spans.
    let html = canon(&markup::render(&item, "product").unwrap());
    assert!(html.contains("<span class=\"product_id\">1</span>"));
    assert!(html.contains("<span class=\"tag1\"><span class=\"tag\">first</span></span>"));
}

#[test]
fn null_like_policy_is_exact() {
    #[derive(Debug)]
    struct EdgeValues;
    impl Taggable for EdgeValues {
        fn tag_fields(&self) -> Vec<TagField<'_>> {
            vec![
                // Omitted: absent, empty string, empty list.
                TagField::new("absent", None),
                TagField::new("emptyString", Some(TagValue::from(""))),
                TagField::new("emptyList", Some(TagValue::seq(vec![]))),
                // Retained: the four zero-like values, with native types.
                TagField::new("intZero", Some(TagValue::from(0i64))),
                TagField::new("strZero", Some(TagValue::from("0"))),
                TagField::new("boolFalse", Some(TagValue::from(false))),
                TagField::new("floatZero", Some(TagValue::from(0.0))),
            ]
        }
    }

    let json = json::serialize(&EdgeValues).unwrap();
    assert_eq!(json, r#"{"bool_false":false,"float_zero":0.0,"int_zero":0,"str_zero":"0"}"#);
}

#[test]
fn custom_field_casing_passes_through() {
    let mut item = TaggedItem { product_id: Some(1), ..TaggedItem::default() };
    item.custom_fields.insert("shouldNotBeSnakeCase", "value");

    let json = json::serialize(&item).unwrap();
    assert!(json.contains(r#""shouldNotBeSnakeCase":"value""#));
    assert!(!json.contains("should_not_be_snake_case"));

    let html = markup::render(&item, "product").unwrap();
    assert!(html.contains("class=\"shouldNotBeSnakeCase\""));
}

#[test]
fn snake_case_conversion_table() {
    assert_eq!(to_snake_case("productId"), "product_id");
    assert_eq!(to_snake_case("URLPath"), "url_path");
    assert_eq!(to_snake_case("priceCurrencyCode"), "price_currency_code");
}

#[test]
fn export_round_trips_and_empty_secret_skips() {
    init_tracing();
    let mut order = Order::new("1001");
    order.order_status_code = Some(OrderStatus::Paid);
    order.buyer = Some(Buyer { email: Some("ada@example.com".to_owned()), ..Buyer::new() });
    order.purchased_items.push(LineItem::new(42, 2, "Trail Jacket"));
    let orders = vec![order];
    let items: Vec<&dyn Taggable> = orders.iter().map(|o| o as &dyn Taggable).collect();

    let secret = "aGlzdG9yeS1leHBvcnQtc2VjcmV0";
    let envelope = export::export(secret, items.iter().copied()).unwrap();
    let plaintext = export::decrypt(secret, &envelope).unwrap();
    assert_eq!(plaintext, json::serialize_collection(items.iter().copied()).unwrap());

    assert!(export::export("", items.iter().copied()).unwrap().is_empty());
}

#[test]
fn markup_omits_subtree_where_json_omits_key() {
    let with_nested = TaggedItem {
        product_id: Some(1),
        nested: Some(Box::new(TaggedItem {
            name: Some("inner".to_owned()),
            ..TaggedItem::default()
        })),
        ..TaggedItem::default()
    };
    let without_nested = TaggedItem { product_id: Some(1), ..TaggedItem::default() };

    // Present: JSON has the key, markup has the span subtree.
    let json = json::serialize(&with_nested).unwrap();
    assert!(json.contains(r#""nested":{"name":"inner"}"#));
    let html = canon(&markup::render(&with_nested, "product").unwrap());
    assert!(html.contains("<span class=\"nested\"><span class=\"name\">inner</span></span>"));

    // Absent: JSON drops the key (no `"nested":{}`), markup drops the
    // whole subtree including the wrapping span.
    let json = json::serialize(&without_nested).unwrap();
    assert_eq!(json, r#"{"product_id":1}"#);
    let html = markup::render(&without_nested, "product").unwrap();
    assert!(!html.contains("class=\"nested\""));
}

#[test]
fn real_product_dto_round_trip() {
    init_tracing();
    let mut product = Product::new(42, "Trail Jacket & Hood", "https://shop.example.com/p/42");
    product.price = Some(Decimal::new(12900, 2));
    product.list_price = Some(Decimal::new(15900, 2));
    product.price_currency_code = Some("EUR".to_owned());
    product.categories = vec!["/outdoor/jackets".to_owned()];
    product.tag1 = vec!["waterproof".to_owned()];
    product.inventory_level = Some(12);
    product.custom_fields.insert("material", "recycled nylon");

    let json = json::serialize(&product).unwrap();
    assert!(json.contains(r#""product_id":42"#));
    assert!(json.contains(r#""price":129.0"#));
    assert!(json.contains(r#""price_currency_code":"EUR""#));
    // API payloads keep the raw name and the confidential stock level.
    assert!(json.contains("Trail Jacket & Hood"));
    assert!(json.contains(r#""inventory_level":12"#));

    let html = canon(&markup::render(&product, "product").unwrap());
    assert!(html.contains("<span class=\"categories\"><span class=\"category\">/outdoor/jackets</span></span>"));
    assert!(html.contains("<span class=\"tag1\"><span class=\"tag\">waterproof</span></span>"));
    // Page markup encodes entities and strips confidential fields.
    assert!(html.contains("Trail Jacket &amp; Hood"));
    assert!(!html.contains("inventory_level"));
}
