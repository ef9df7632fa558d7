//! JSON serialization of tagged object graphs.
//!
//! Reduces a [`Taggable`] graph to a [`serde_json::Value`] tree and encodes
//! it as UTF-8 JSON. Field keys are snake_cased (custom-map inner keys pass
//! verbatim), null-like values are suppressed, and every map level is
//! alphabetically key-ordered so logically equal objects serialize to
//! byte-identical documents regardless of field population order. The
//! alphabetic ordering falls out of `serde_json`'s default BTreeMap-backed
//! object representation; no explicit sort pass is needed.
//!
//! Null suppression applies uniformly at every level: omittable fields,
//! sequence elements, and map entries are all dropped, and a nested object
//! none of whose fields survive is dropped with them. Only the
//! serialization root renders as `{}` when nothing survives.

use serde_json::Value;

use crate::{
    error::{Result, SdkError},
    serialize::{MAX_DEPTH, Taggable, key::to_snake_case, value::TagValue},
};

/// Serializes a single object to a JSON document.
///
/// # Errors
///
/// Returns [`SdkError::MaxDepthExceeded`] for pathologically deep graphs
/// and [`SdkError::SerializationError`] if JSON encoding fails.
///
/// # Examples
///
/// ```
/// use recotag::{dto::Product, serialize::json};
///
/// let mut product = Product::new(1, "Test Product", "https://shop.example.com/p/1");
/// product.price = Some(rust_decimal::Decimal::new(9999, 2));
/// let json = json::serialize(&product)?;
/// assert!(json.contains("\"product_id\":1"));
/// # Ok::<(), recotag::error::SdkError>(())
/// ```
pub fn serialize(object: &dyn Taggable) -> Result<String> {
    let map = object_to_map(object, 0)?;
    encode(&Value::Object(map))
}

/// Serializes a collection of objects to a JSON array document.
///
/// Elements reducing to nothing are dropped; an empty (or fully-dropped)
/// collection serializes to `[]`.
///
/// # Errors
///
/// Returns [`SdkError::MaxDepthExceeded`] for pathologically deep graphs
/// and [`SdkError::SerializationError`] if JSON encoding fails.
pub fn serialize_collection<'a, I>(objects: I) -> Result<String>
where
    I: IntoIterator<Item = &'a dyn Taggable>,
{
    let mut items = Vec::new();
    for object in objects {
        let map = object_to_map(object, 0)?;
        if !map.is_empty() {
            items.push(Value::Object(map));
        }
    }
    encode(&Value::Array(items))
}

/// Reduces a single object to its JSON value without encoding, for
/// callers embedding the result in a larger request body.
///
/// # Errors
///
/// Returns [`SdkError::MaxDepthExceeded`] for pathologically deep graphs.
pub fn to_value(object: &dyn Taggable) -> Result<Value> {
    Ok(Value::Object(object_to_map(object, 0)?))
}

fn encode(value: &Value) -> Result<String> {
    serde_json::to_string(value).map_err(|e| SdkError::SerializationError(e.to_string()))
}

/// Reduces one object to an alphabetically-ordered JSON map.
fn object_to_map(object: &dyn Taggable, depth: usize) -> Result<serde_json::Map<String, Value>> {
    if depth >= MAX_DEPTH {
        return Err(SdkError::MaxDepthExceeded(MAX_DEPTH));
    }

    let mut map = serde_json::Map::new();
    for field in object.tag_fields() {
        // Absent accessor: silently skipped, never an error.
        let Some(value) = field.value else { continue };
        if let Some(reduced) = reduce(&value, depth + 1)? {
            map.insert(to_snake_case(field.name), reduced);
        }
    }
    Ok(map)
}

/// Reduces a value, returning `None` when it is suppressed.
fn reduce(value: &TagValue<'_>, depth: usize) -> Result<Option<Value>> {
    if depth >= MAX_DEPTH {
        return Err(SdkError::MaxDepthExceeded(MAX_DEPTH));
    }
    if value.is_omittable() {
        return Ok(None);
    }

    let reduced = match value {
        TagValue::Bool(b) => Some(Value::Bool(*b)),
        TagValue::Int(i) => Some(Value::Number((*i).into())),
        // is_omittable already rejected non-finite floats.
        TagValue::Float(f) => serde_json::Number::from_f64(*f).map(Value::Number),
        TagValue::Str(s) | TagValue::Markup(s) => Some(Value::String(s.clone().into_owned())),
        TagValue::Seq { items, .. } => {
            let mut reduced = Vec::with_capacity(items.len());
            for item in items {
                if let Some(v) = reduce(item, depth + 1)? {
                    reduced.push(v);
                }
            }
            if reduced.is_empty() { None } else { Some(Value::Array(reduced)) }
        }
        TagValue::Map(entries) => {
            let mut map = serde_json::Map::new();
            for (key, entry) in entries {
                if let Some(v) = reduce(entry, depth + 1)? {
                    // Verbatim keys: the custom-fields casing exception.
                    map.insert(key.clone().into_owned(), v);
                }
            }
            if map.is_empty() { None } else { Some(Value::Object(map)) }
        }
        TagValue::Object(nested) => {
            let map = object_to_map(*nested, depth)?;
            if map.is_empty() { None } else { Some(Value::Object(map)) }
        }
    };
    Ok(reduced)
}
