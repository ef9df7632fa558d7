//! Tagged value tree and the `Taggable` trait.
//!
//! Every DTO describes itself: it enumerates `(logical field name,
//! value)` pairs in declaration order, with absent accessors expressed as
//! `None`. There is no runtime reflection anywhere. The value side is
//! [`TagValue`], an explicit sum type that keeps sequential lists,
//! string-keyed maps, and nested objects apart instead of guessing from
//! runtime key shapes.
//!
//! Field names are declared in camelCase; the serializers convert them to
//! snake_case on output. The single exception is [`CustomFields`], whose
//! keys pass through verbatim so caller-defined field names keep their
//! exact casing on the wire.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, prelude::ToPrimitive};

/// A value in a tagged object graph.
///
/// Scalar variants map to native JSON types. `Seq` is a sequential list
/// (rendered as a JSON array); `Map` is an ordered string-keyed container
/// whose keys are emitted verbatim; `Object` is a nested [`Taggable`]
/// whose field keys are snake_cased.
///
/// `Markup` wraps a pre-escaped HTML fragment that the markup renderer
/// trusts verbatim. It is the deliberate injection point for callers that
/// build their own fragments; everything else is entity-encoded per the
/// owning object's policy.
#[derive(Debug, Clone)]
pub enum TagValue<'a> {
    /// Boolean scalar. `false` is a present value, never omitted.
    Bool(bool),
    /// Integer scalar. `0` is a present value, never omitted.
    Int(i64),
    /// Float scalar. `0.0` is present; non-finite values are omitted.
    Float(f64),
    /// String scalar. The empty string is omitted; `"0"` is present.
    Str(Cow<'a, str>),
    /// Pre-escaped HTML fragment, emitted verbatim by the markup renderer.
    Markup(Cow<'a, str>),
    /// Sequential list. An optional shared child key names every element's
    /// markup tag (e.g. `tag` for a homogeneous tag list).
    Seq {
        /// Elements in order.
        items: Vec<TagValue<'a>>,
        /// Markup tag shared by all children, when the list is homogeneous.
        child_key: Option<&'static str>,
    },
    /// Ordered string-keyed map. Keys are emitted verbatim; this is the
    /// custom-fields casing exception.
    Map(Vec<(Cow<'a, str>, TagValue<'a>)>),
    /// Nested object; its field keys are snake_cased on output.
    Object(&'a dyn Taggable),
}

impl<'a> TagValue<'a> {
    /// Builds a sequential list value.
    #[must_use]
    pub fn seq(items: Vec<TagValue<'a>>) -> Self {
        Self::Seq { items, child_key: None }
    }

    /// Builds a sequential list whose elements all share one markup tag.
    #[must_use]
    pub fn tagged_seq(child_key: &'static str, items: Vec<TagValue<'a>>) -> Self {
        Self::Seq { items, child_key: Some(child_key) }
    }

    /// Builds a string list borrowing from a slice of owned strings.
    #[must_use]
    pub fn str_list(items: &'a [String]) -> Self {
        Self::seq(items.iter().map(|s| Self::Str(Cow::Borrowed(s.as_str()))).collect())
    }

    /// Builds a string list whose elements all share one markup tag.
    #[must_use]
    pub fn tagged_str_list(child_key: &'static str, items: &'a [String]) -> Self {
        Self::tagged_seq(child_key, items.iter().map(|s| Self::Str(Cow::Borrowed(s.as_str()))).collect())
    }

    /// Wraps a nested object.
    #[must_use]
    pub fn object(value: &'a dyn Taggable) -> Self {
        Self::Object(value)
    }

    /// Wraps a pre-escaped markup fragment, trusted verbatim by the
    /// markup renderer. Callers are responsible for its safety.
    #[must_use]
    pub fn markup(fragment: impl Into<Cow<'a, str>>) -> Self {
        Self::Markup(fragment.into())
    }

    /// True when this value is omitted from serialized output.
    ///
    /// The predicate retains `0`, `"0"`, `false`, and `0.0` (values a
    /// naive emptiness check would drop but the wire contract keeps) and
    /// omits empty strings, empty lists, empty maps, and non-finite floats.
    /// Absent values never reach this check (they are `None` upstream).
    #[must_use]
    pub fn is_omittable(&self) -> bool {
        match self {
            Self::Bool(_) | Self::Int(_) | Self::Object(_) => false,
            Self::Float(f) => !f.is_finite(),
            Self::Str(s) | Self::Markup(s) => s.is_empty(),
            Self::Seq { items, .. } => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
        }
    }

    /// Human-readable type name, used in entity-encoder error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Markup(_) => "markup",
            Self::Seq { .. } => "sequence",
            Self::Map(_) => "map",
            Self::Object(_) => "object",
        }
    }
}

impl<'a> From<&'a str> for TagValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(Cow::Borrowed(value))
    }
}

impl From<String> for TagValue<'_> {
    fn from(value: String) -> Self {
        Self::Str(Cow::Owned(value))
    }
}

impl From<bool> for TagValue<'_> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for TagValue<'_> {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for TagValue<'_> {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for TagValue<'_> {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for TagValue<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Decimal> for TagValue<'_> {
    fn from(value: Decimal) -> Self {
        // An unrepresentable value becomes NAN, which the omission
        // predicate drops.
        Self::Float(value.to_f64().unwrap_or(f64::NAN))
    }
}

impl From<DateTime<Utc>> for TagValue<'_> {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Str(Cow::Owned(value.format("%Y-%m-%d %H:%M:%S").to_string()))
    }
}

/// One declared logical field of a [`Taggable`] object.
///
/// `value` is `None` when the field has no accessor or holds nothing;
/// such fields are silently skipped by both serializers, never an error.
#[derive(Debug)]
pub struct TagField<'a> {
    /// Logical field name in camelCase (snake_cased on output).
    pub name: &'static str,
    /// Field value; `None` skips the field.
    pub value: Option<TagValue<'a>>,
}

impl<'a> TagField<'a> {
    /// Creates a field view.
    #[must_use]
    pub fn new(name: &'static str, value: Option<TagValue<'a>>) -> Self {
        Self { name, value }
    }
}

/// An object that can describe itself to the serializers.
///
/// `tag_fields` is an explicit, compile-time-checked field list. The
/// remaining methods are optional capabilities the markup renderer
/// resolves once per type instead of checking ad hoc at each recursion
/// step.
pub trait Taggable: std::fmt::Debug {
    /// Logical fields in declaration order. Output key order does not
    /// matter: the JSON serializer re-sorts every map level.
    fn tag_fields(&self) -> Vec<TagField<'_>>;

    /// Self-describing markup tag overriding the caller-provided key,
    /// snake_cased before use.
    fn markup_key(&self) -> Option<&'static str> {
        None
    }

    /// Shared markup tag for every child of this object, regardless of
    /// the children's own field names.
    fn child_markup_key(&self) -> Option<&'static str> {
        None
    }

    /// Names of fields whose leaf values must be HTML-entity-encoded
    /// before markup rendering. Values of any type other than strings or
    /// collections of strings make the encoder fail with
    /// [`SdkError::UnsupportedType`](crate::error::SdkError::UnsupportedType).
    fn html_encoded_fields(&self) -> &'static [&'static str] {
        &[]
    }

    /// Sanitized replacement rendered in place of `self` by the markup
    /// renderer, used to strip content unfit for public page output.
    /// JSON serialization does not consult this hook.
    fn sanitized(&self) -> Option<Box<dyn Taggable + '_>> {
        None
    }
}

/// Caller-populated custom fields attached to a DTO.
///
/// Keys pass through to the wire verbatim, never snake_cased, so
/// externally-defined field names keep their exact casing. Insertion
/// order is preserved; the JSON serializer sorts on output anyway.
///
/// # Examples
///
/// ```
/// use recotag::serialize::CustomFields;
///
/// let mut fields = CustomFields::new();
/// fields.insert("shouldNotBeSnakeCase", "kept as-is");
/// fields.insert("material", "cotton");
/// assert_eq!(fields.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CustomFields {
    entries: Vec<(String, TagValue<'static>)>,
}

impl CustomFields {
    /// Creates an empty custom-fields map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field, replacing any existing value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<TagValue<'static>>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no fields have been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// View as a verbatim-keyed map value, or `None` when empty so the
    /// owning DTO's `custom_fields` key is omitted entirely.
    #[must_use]
    pub fn as_value(&self) -> Option<TagValue<'_>> {
        if self.entries.is_empty() {
            return None;
        }
        Some(TagValue::Map(
            self.entries
                .iter()
                .map(|(k, v)| (Cow::Borrowed(k.as_str()), v.clone()))
                .collect(),
        ))
    }
}
