//! Invisible HTML tagging markup rendering.
//!
//! Renders the same tagged object graphs the JSON serializer consumes as
//! nested `<span>` fragments inside a hidden `<div class="notranslate">`
//! wrapper, for embedding in merchant storefront pages where the
//! platform's browser-side tag scrapes them.
//!
//! Omission works differently from JSON here: a null-like value drops its
//! ENTIRE subtree, wrapping span included, whereas the JSON serializer
//! merely leaves out the key. Object values are never null-like, so an
//! object whose fields all drop still renders its (empty) span.
//!
//! Three per-type capabilities are honored, in order: [`Taggable::sanitized`]
//! replaces the object with a cleaned copy, [`Taggable::html_encoded_fields`]
//! entity-encodes the named leaf values, and [`Taggable::markup_key`]
//! overrides the span tag. Entity encoding is the one strictly validated
//! surface: anything that is not a string or a collection of strings is an
//! [`SdkError::UnsupportedType`] error rather than a silent skip.

use std::borrow::Cow;

use crate::{
    error::{Result, SdkError},
    serialize::{MAX_DEPTH, Taggable, key::to_snake_case, value::TagValue},
};

/// Renders an object as an invisible markup block.
///
/// The `root_key` names the outermost span (snake_cased); the object's own
/// [`Taggable::markup_key`] overrides it when declared.
///
/// Output is indented two spaces per nesting level with newline-terminated
/// spans. Compare through a whitespace-insensitive canonicalizer when
/// asserting on fragments.
///
/// # Errors
///
/// Returns [`SdkError::UnsupportedType`] when an entity-encoded field
/// holds a non-string value and [`SdkError::MaxDepthExceeded`] for
/// pathologically deep graphs.
///
/// # Examples
///
/// ```
/// use recotag::{dto::Product, serialize::markup};
///
/// let product = Product::new(1, "Test Product", "https://shop.example.com/p/1");
/// let html = markup::render(&product, "product")?;
/// assert!(html.starts_with("<div class=\"notranslate\" style=\"display:none\">"));
/// assert!(html.contains("<span class=\"product_id\">1</span>"));
/// # Ok::<(), recotag::error::SdkError>(())
/// ```
pub fn render(object: &dyn Taggable, root_key: &str) -> Result<String> {
    let mut out = String::new();
    out.push_str("<div class=\"notranslate\" style=\"display:none\">\n");
    render_object(object, &to_snake_case(root_key), 1, &mut out)?;
    out.push_str("</div>\n");
    Ok(out)
}

/// HTML-entity-encodes a value's leaf strings.
///
/// Accepts strings and recurses into sequences and maps of strings.
/// Pre-escaped [`TagValue::Markup`] fragments pass through unchanged.
/// Any other type is a hard error: the encoder refuses to guess at a
/// textual form for numbers, booleans, or nested objects.
///
/// # Errors
///
/// Returns [`SdkError::UnsupportedType`] naming the offending type.
pub fn encode_entities(value: &TagValue<'_>) -> Result<TagValue<'static>> {
    match value {
        TagValue::Str(s) => Ok(TagValue::Str(Cow::Owned(escape(s)))),
        TagValue::Markup(s) => Ok(TagValue::Markup(Cow::Owned(s.clone().into_owned()))),
        TagValue::Seq { items, child_key } => Ok(TagValue::Seq {
            items: items.iter().map(encode_entities).collect::<Result<Vec<_>>>()?,
            child_key: *child_key,
        }),
        TagValue::Map(entries) => Ok(TagValue::Map(
            entries
                .iter()
                .map(|(k, v)| Ok((Cow::Owned(k.clone().into_owned()), encode_entities(v)?)))
                .collect::<Result<Vec<_>>>()?,
        )),
        other => Err(SdkError::UnsupportedType(other.type_name().to_owned())),
    }
}

/// Escapes the five HTML-significant characters: `&`, `<`, `>`, and both
/// quote styles.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders an object value, applying the sanitize hook once.
fn render_object(object: &dyn Taggable, key: &str, depth: usize, out: &mut String) -> Result<()> {
    if let Some(clean) = object.sanitized() {
        return render_object_fields(&*clean, key, depth, out);
    }
    render_object_fields(object, key, depth, out)
}

/// Renders an object's span and children. Does not consult `sanitized`;
/// the caller applies that hook exactly once.
fn render_object_fields(
    object: &dyn Taggable,
    key: &str,
    depth: usize,
    out: &mut String,
) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(SdkError::MaxDepthExceeded(MAX_DEPTH));
    }

    let tag = match object.markup_key() {
        Some(declared) => to_snake_case(declared),
        None => key.to_owned(),
    };
    let encoded_fields = object.html_encoded_fields();

    push_line(out, depth, &format!("<span class=\"{tag}\">"));
    for field in object.tag_fields() {
        let Some(value) = field.value else { continue };
        let value = if encoded_fields.contains(&field.name) {
            encode_entities(&value)?
        } else {
            value
        };
        let child_key = match object.child_markup_key() {
            Some(shared) => to_snake_case(shared),
            None => to_snake_case(field.name),
        };
        to_html(&value, &child_key, depth + 1, out)?;
    }
    push_line(out, depth, "</span>");
    Ok(())
}

/// Renders one value under `key`. Null-like values emit nothing at all.
fn to_html(value: &TagValue<'_>, key: &str, depth: usize, out: &mut String) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(SdkError::MaxDepthExceeded(MAX_DEPTH));
    }
    if value.is_omittable() {
        return Ok(());
    }

    match value {
        TagValue::Bool(b) => push_line(out, depth, &format!("<span class=\"{key}\">{b}</span>")),
        TagValue::Int(i) => push_line(out, depth, &format!("<span class=\"{key}\">{i}</span>")),
        TagValue::Float(f) => push_line(out, depth, &format!("<span class=\"{key}\">{f}</span>")),
        // Leaf text is emitted as-is: encoding happened upstream per the
        // owning object's policy, and Markup fragments are trusted verbatim.
        TagValue::Str(s) | TagValue::Markup(s) => {
            push_line(out, depth, &format!("<span class=\"{key}\">{s}</span>"));
        }
        TagValue::Seq { items, child_key } => {
            let element_key = match child_key {
                Some(shared) => to_snake_case(shared),
                // Sequential children with no override reuse the parent key.
                None => key.to_owned(),
            };
            push_line(out, depth, &format!("<span class=\"{key}\">"));
            for item in items {
                to_html(item, &element_key, depth + 1, out)?;
            }
            push_line(out, depth, "</span>");
        }
        TagValue::Map(entries) => {
            push_line(out, depth, &format!("<span class=\"{key}\">"));
            for (entry_key, entry) in entries {
                // Verbatim child keys: raw maps are never snake_cased.
                to_html(entry, entry_key, depth + 1, out)?;
            }
            push_line(out, depth, "</span>");
        }
        TagValue::Object(nested) => render_object(*nested, key, depth, out)?,
    }
    Ok(())
}

fn push_line(out: &mut String, depth: usize, line: &str) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(line);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::value::TagField;

    /// Collapses indentation and newlines for structural assertions.
    fn canon(html: &str) -> String {
        html.lines().map(str::trim).collect()
    }

    #[derive(Debug, Default)]
    struct Item {
        product_id: Option<i64>,
        name: Option<String>,
        price: Option<f64>,
        tag1: Vec<String>,
        custom: Vec<(&'static str, &'static str)>,
        buyer: Option<Box<Item>>,
        confidential: Option<String>,
        encode_name: bool,
    }

    impl Taggable for Item {
        fn tag_fields(&self) -> Vec<TagField<'_>> {
            vec![
                TagField::new("productId", self.product_id.map(TagValue::from)),
                TagField::new("name", self.name.as_deref().map(TagValue::from)),
                TagField::new("price", self.price.map(TagValue::from)),
                TagField::new(
                    "tag1",
                    (!self.tag1.is_empty()).then(|| TagValue::tagged_str_list("tag", &self.tag1)),
                ),
                TagField::new(
                    "customFields",
                    (!self.custom.is_empty()).then(|| {
                        TagValue::Map(
                            self.custom
                                .iter()
                                .map(|(k, v)| ((*k).into(), TagValue::from(*v)))
                                .collect(),
                        )
                    }),
                ),
                TagField::new("buyer", self.buyer.as_deref().map(|b| TagValue::object(b))),
                TagField::new(
                    "confidential",
                    self.confidential.as_deref().map(TagValue::from),
                ),
            ]
        }

        fn html_encoded_fields(&self) -> &'static [&'static str] {
            if self.encode_name { &["name"] } else { &[] }
        }

        fn sanitized(&self) -> Option<Box<dyn Taggable + '_>> {
            self.confidential.as_ref()?;
            Some(Box::new(Item {
                product_id: self.product_id,
                name: self.name.clone(),
                price: self.price,
                tag1: self.tag1.clone(),
                custom: self.custom.clone(),
                buyer: None,
                confidential: None,
                encode_name: self.encode_name,
            }))
        }
    }

    #[test]
    fn test_wrapper_and_leaf_rendering() {
        let item = Item { product_id: Some(1), price: Some(99.99), ..Item::default() };
        let html = render(&item, "product").unwrap();

        assert!(html.starts_with("<div class=\"notranslate\" style=\"display:none\">\n"));
        assert!(html.ends_with("</div>\n"));
        let canon = canon(&html);
        assert!(canon.contains("<span class=\"product_id\">1</span>"));
        assert!(canon.contains("<span class=\"price\">99.99</span>"));
    }

    #[test]
    fn test_tagged_list_nests_shared_child_key() {
        let item = Item { tag1: vec!["first".to_owned()], ..Item::default() };
        let html = canon(&render(&item, "product").unwrap());

        assert!(html.contains("<span class=\"tag1\"><span class=\"tag\">first</span></span>"));
    }

    #[test]
    fn test_plain_sequence_reuses_parent_key() {
        let value = TagValue::seq(vec![TagValue::from("a"), TagValue::from("b")]);
        let mut out = String::new();
        to_html(&value, "categories", 0, &mut out).unwrap();

        assert_eq!(
            canon(&out),
            "<span class=\"categories\"><span class=\"categories\">a</span>\
             <span class=\"categories\">b</span></span>"
        );
    }

    #[test]
    fn test_null_like_field_omits_whole_subtree() {
        let item = Item { product_id: Some(1), name: Some(String::new()), ..Item::default() };
        let html = render(&item, "product").unwrap();

        assert!(!html.contains("class=\"name\""));
    }

    #[test]
    fn test_custom_map_keys_stay_verbatim() {
        let item = Item { custom: vec![("shouldNotBeSnakeCase", "v")], ..Item::default() };
        let html = canon(&render(&item, "product").unwrap());

        assert!(html.contains("<span class=\"shouldNotBeSnakeCase\">v</span>"));
        assert!(!html.contains("should_not_be_snake_case"));
    }

    #[test]
    fn test_encoded_field_escapes_entities() {
        let item = Item {
            name: Some("Trail & Peak <XL>".to_owned()),
            encode_name: true,
            ..Item::default()
        };
        let html = render(&item, "product").unwrap();

        assert!(html.contains("Trail &amp; Peak &lt;XL&gt;"));
    }

    #[test]
    fn test_unencoded_string_passes_through() {
        let item = Item { name: Some("Trail & Peak".to_owned()), ..Item::default() };
        let html = render(&item, "product").unwrap();

        assert!(html.contains("Trail & Peak"));
    }

    #[test]
    fn test_sanitize_strips_confidential_fields() {
        let item = Item {
            product_id: Some(1),
            confidential: Some("margin data".to_owned()),
            ..Item::default()
        };
        let html = render(&item, "product").unwrap();

        assert!(!html.contains("margin data"));
        assert!(html.contains("<span class=\"product_id\">1</span>"));
    }

    #[test]
    fn test_encode_entities_rejects_numbers() {
        let err = encode_entities(&TagValue::from(5i64)).unwrap_err();
        assert!(matches!(err, SdkError::UnsupportedType(name) if name == "integer"));
    }

    #[test]
    fn test_encode_entities_recurses_into_lists() {
        let value = TagValue::seq(vec![TagValue::from("a&b"), TagValue::from("c<d")]);
        let encoded = encode_entities(&value).unwrap();
        let TagValue::Seq { items, .. } = encoded else { panic!("expected sequence") };

        assert!(matches!(&items[0], TagValue::Str(s) if s == "a&amp;b"));
        assert!(matches!(&items[1], TagValue::Str(s) if s == "c&lt;d"));
    }

    #[test]
    fn test_markup_fragment_trusted_verbatim() {
        let value = TagValue::markup("<b>pre-escaped</b>");
        let mut out = String::new();
        to_html(&value, "blurb", 0, &mut out).unwrap();

        assert!(out.contains("<span class=\"blurb\"><b>pre-escaped</b></span>"));
    }

    #[test]
    fn test_depth_guard_fails_fast() {
        let mut deep = TagValue::from("leaf");
        for _ in 0..(MAX_DEPTH + 2) {
            deep = TagValue::seq(vec![deep]);
        }
        let mut out = String::new();
        let err = to_html(&deep, "deep", 0, &mut out).unwrap_err();

        assert!(matches!(err, SdkError::MaxDepthExceeded(_)));
    }

    #[test]
    fn test_escape_covers_all_five_entities() {
        assert_eq!(escape(r#"&<>"'"#), "&amp;&lt;&gt;&quot;&#039;");
    }
}
