//! Buyer/customer DTO.

use crate::serialize::{TagField, TagValue, Taggable};

/// The person behind an order or a tagged storefront session.
///
/// `marketing_permission` is a real boolean on the wire: `false` means
/// "explicitly declined" and is always serialized, never omitted.
/// Name fields are HTML-entity encoded before markup rendering.
#[derive(Debug, Clone, Default)]
pub struct Buyer {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Postal code.
    pub post_code: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    pub country: Option<String>,
    /// Whether the buyer consented to marketing communication.
    pub marketing_permission: bool,
}

impl Buyer {
    /// Creates an empty buyer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Taggable for Buyer {
    fn tag_fields(&self) -> Vec<TagField<'_>> {
        vec![
            TagField::new("firstName", self.first_name.as_deref().map(TagValue::from)),
            TagField::new("lastName", self.last_name.as_deref().map(TagValue::from)),
            TagField::new("email", self.email.as_deref().map(TagValue::from)),
            TagField::new("phone", self.phone.as_deref().map(TagValue::from)),
            TagField::new("postCode", self.post_code.as_deref().map(TagValue::from)),
            TagField::new("country", self.country.as_deref().map(TagValue::from)),
            TagField::new("marketingPermission", Some(TagValue::from(self.marketing_permission))),
        ]
    }

    fn html_encoded_fields(&self) -> &'static [&'static str] {
        &["firstName", "lastName"]
    }
}
