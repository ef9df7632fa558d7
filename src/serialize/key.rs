//! Key naming conversion between camelCase and snake_case.
//!
//! DTOs declare their logical field names in camelCase (mirroring the
//! accessor-derived property names of the platform's wire contract); both
//! serializers convert them to snake_case on output. The conversion is
//! one-directional: no inverse is provided or required.

use std::sync::LazyLock;

use regex::Regex;

/// Boundary between an acronym run and a following capitalized word
/// (`URLPath` -> `URL_Path`).
static ACRONYM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("acronym boundary regex is valid"));

/// Boundary between a lowercase/digit character and an uppercase one
/// (`productId` -> `product_Id`).
static CASE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("case boundary regex is valid"));

/// Converts a camelCase or PascalCase identifier to snake_case.
///
/// Acronym runs split before their last capital when followed by a
/// lowercase continuation, so `HTMLParser` becomes `html_parser` and
/// `URLPath` becomes `url_path` rather than `htmlparser`/`urlpath`.
/// Identifiers already in snake_case pass through unchanged.
///
/// # Examples
///
/// ```
/// use recotag::serialize::to_snake_case;
///
/// assert_eq!(to_snake_case("productId"), "product_id");
/// assert_eq!(to_snake_case("URLPath"), "url_path");
/// assert_eq!(to_snake_case("priceCurrencyCode"), "price_currency_code");
/// assert_eq!(to_snake_case(""), "");
/// ```
#[must_use]
pub fn to_snake_case(identifier: &str) -> String {
    if identifier.is_empty() {
        return String::new();
    }

    let split = ACRONYM_BOUNDARY.replace_all(identifier, "${1}_${2}");
    let split = CASE_BOUNDARY.replace_all(&split, "${1}_${2}");
    split.to_ascii_lowercase()
}
