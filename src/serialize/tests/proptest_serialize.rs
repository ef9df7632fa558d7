use base64::Engine;
use proptest::prelude::*;

use crate::{
    export,
    serialize::{
        Taggable, json, key::to_snake_case, markup,
        value::{TagField, TagValue},
    },
};

/// Pool of declared field names (TagField names are `&'static str`).
const FIELD_NAMES: &[&str] = &[
    "productId",
    "name",
    "URLPath",
    "priceCurrencyCode",
    "brand",
    "description",
    "gtin",
    "condition",
];

#[derive(Debug, Clone)]
struct Fixture {
    fields: Vec<(&'static str, String)>,
    reversed: bool,
}

impl Taggable for Fixture {
    fn tag_fields(&self) -> Vec<TagField<'_>> {
        let mut fields: Vec<TagField<'_>> = self
            .fields
            .iter()
            .map(|(name, value)| TagField::new(name, Some(TagValue::from(value.as_str()))))
            .collect();
        if self.reversed {
            fields.reverse();
        }
        fields
    }
}

fn fixture_strategy() -> impl Strategy<Value = Fixture> {
    (
        proptest::sample::subsequence(FIELD_NAMES.to_vec(), 0..FIELD_NAMES.len()),
        proptest::collection::vec("[a-zA-Z0-9 ]{1,20}", FIELD_NAMES.len()),
    )
        .prop_map(|(names, values)| Fixture {
            fields: names.into_iter().zip(values).collect(),
            reversed: false,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_snake_case_output_shape(identifier in "[A-Za-z][A-Za-z0-9]{0,20}") {
        let converted = to_snake_case(&identifier);

        prop_assert!(
            converted.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
            "unexpected character in {converted}"
        );
        // Conversion is a fixpoint: converting again changes nothing.
        prop_assert_eq!(to_snake_case(&converted), converted.clone());
    }

    #[test]
    fn test_field_order_never_changes_json(fixture in fixture_strategy()) {
        let reversed = Fixture { reversed: true, ..fixture.clone() };

        prop_assert_eq!(
            json::serialize(&fixture).unwrap(),
            json::serialize(&reversed).unwrap()
        );
    }

    #[test]
    fn test_export_round_trip(
        secret_bytes in proptest::collection::vec(any::<u8>(), 1..64),
        fixtures in proptest::collection::vec(fixture_strategy(), 0..4),
    ) {
        let secret = base64::engine::general_purpose::STANDARD.encode(&secret_bytes);
        let items: Vec<&dyn Taggable> = fixtures.iter().map(|f| f as &dyn Taggable).collect();

        let envelope = export::export(&secret, items.iter().copied()).unwrap();
        let plaintext = export::decrypt(&secret, &envelope).unwrap();

        prop_assert_eq!(plaintext, json::serialize_collection(items).unwrap());
    }

    #[test]
    fn test_entity_encoding_removes_angle_brackets(text in ".{0,64}") {
        let encoded = markup::encode_entities(&TagValue::from(text.as_str())).unwrap();
        let TagValue::Str(s) = encoded else { panic!("expected string") };

        prop_assert!(!s.contains('<'));
        prop_assert!(!s.contains('>'));
        prop_assert!(!s.contains('"'));
    }

    #[test]
    fn test_markup_and_json_agree_on_presence(fixture in fixture_strategy()) {
        let json = json::serialize(&fixture).unwrap();
        let html = markup::render(&fixture, "fixture").unwrap();

        for (name, value) in &fixture.fields {
            let key = to_snake_case(name);
            let in_json = json.contains(&format!("\"{key}\""));
            let in_html = html.contains(&format!("class=\"{key}\""));
            prop_assert_eq!(in_json, in_html, "presence differs for {}", key);
            // Values are non-empty in this strategy, so both must show them.
            prop_assert!(in_json, "field {} with value {:?} missing", key, value);
        }
    }
}
