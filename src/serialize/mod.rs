//! Object-to-wire serialization core.
//!
//! Everything the SDK sends to the platform or embeds in a storefront page
//! starts here: DTOs describe themselves through the [`Taggable`] trait as
//! trees of [`TagValue`]s, and two sibling serializers walk those trees:
//! [`json`] producing deterministic snake_case JSON for API payloads, and
//! [`markup`] producing the invisible `<span>` tagging markup scraped by
//! the platform's browser-side script.
//!
//! # Key conversion
//!
//! Logical field names are declared in camelCase and converted with
//! [`to_snake_case`] on output. Custom-fields maps are the one exception:
//! their keys pass through verbatim so caller-defined names keep their
//! exact casing.
//!
//! # Omission policy
//!
//! Both serializers suppress null-like values: absent fields, empty
//! strings, empty collections, and non-finite floats. The zero-like values
//! `0`, `"0"`, `false`, and `0.0` are always retained. The JSON serializer
//! omits the key; the markup renderer omits the entire span subtree.
//!
//! # Determinism
//!
//! JSON output sorts every map level alphabetically, so two logically
//! equal objects populated in different field orders serialize to
//! byte-identical documents, a property the encrypted history export
//! depends on and the test suite asserts.

pub mod json;
pub mod key;
pub mod markup;
pub mod value;

pub use key::to_snake_case;
pub use value::{CustomFields, TagField, TagValue, Taggable};

/// Maximum nesting depth accepted by both serializers.
///
/// DTO graphs are shallow trees; anything deeper is a malformed or
/// accidentally recursive structure and fails fast with
/// [`SdkError::MaxDepthExceeded`](crate::error::SdkError::MaxDepthExceeded)
/// instead of overflowing the stack.
pub const MAX_DEPTH: usize = 64;

#[cfg(test)]
mod tests;
