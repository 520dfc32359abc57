//! # Database Models
//!
//! This module defines the data structures that map to database tables.
//! Each struct represents a row (or partial row) of the `vendors` table.
//!
//! ## Note on the password hash
//!
//! `VendorRecord` carries the bcrypt hash because the login path needs it
//! for verification. It never crosses the API boundary: the response
//! models in `crate::models::responses` have no password field at all.

use chrono::{DateTime, Utc};

/// The fixed set of business types a vendor can register under, in
/// declaration order.
///
/// The field validator checks enumeration membership against this
/// list, and the schema repeats it in a CHECK constraint.
pub const BUSINESS_TYPES: [&str; 5] = [
    "Manufacturer",
    "Distributor",
    "Wholesaler",
    "Retailer",
    "Service",
];

/// Represents a vendor row in the database.
///
/// ## Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | email | String | Unique identity key (primary key) |
/// | password_hash | String | bcrypt hash, never serialized outward |
/// | company_name | String | Alphanumeric + spaces |
/// | contact_name | String | Alphanumeric + spaces |
/// | phone | String | 10 digits |
/// | business_type | String | One of [`BUSINESS_TYPES`] |
/// | tax_id | String | Exactly 15 digits, unique |
/// | address | Option | ≤255 chars |
/// | image | Option | Stored filename of an uploaded image |
/// | is_verified | bool | Defaults false, flips to true exactly once |
#[derive(Debug, Clone)]
pub struct VendorRecord {
    /// The vendor's email address. This is the primary key and the
    /// lookup key for get/update/delete/verify.
    pub email: String,

    /// bcrypt hash of the vendor's password.
    pub password_hash: String,

    /// Company name.
    pub company_name: String,

    /// Contact person's name.
    pub contact_name: String,

    /// Phone number (digits only).
    pub phone: String,

    /// Business type, one of the fixed enumeration.
    pub business_type: String,

    /// Tax identifier, exactly 15 digits, unique across vendors.
    pub tax_id: String,

    /// Optional postal address.
    pub address: Option<String>,

    /// Optional stored image filename. Rendered as a full URL
    /// (configured base + filename) in API responses.
    pub image: Option<String>,

    /// Whether the vendor has been verified. Monotonic: false → true only.
    pub is_verified: bool,

    /// When the vendor registered.
    pub created_at: DateTime<Utc>,

    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Payload for inserting a new vendor.
///
/// Fields have already been validated and sanitized, and the password
/// has already been hashed, by the time this struct is constructed.
#[derive(Debug, Clone)]
pub struct NewVendor {
    pub email: String,
    pub password_hash: String,
    pub company_name: String,
    pub contact_name: String,
    pub phone: String,
    pub business_type: String,
    pub tax_id: String,
    pub address: Option<String>,
    pub image: Option<String>,
}

/// Partial update for an existing vendor, merged field-by-field.
///
/// `None` means "leave the column unchanged". The target email is the
/// merge key and is passed separately; it cannot be rewritten here.
#[derive(Debug, Clone, Default)]
pub struct VendorPatch {
    pub password_hash: Option<String>,
    pub company_name: Option<String>,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub business_type: Option<String>,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_type_list_is_fixed() {
        assert_eq!(BUSINESS_TYPES.len(), 5);
        assert!(BUSINESS_TYPES.contains(&"Retailer"));
        assert!(!BUSINESS_TYPES.contains(&"Reseller"));
    }

    #[test]
    fn default_patch_changes_nothing() {
        let patch = VendorPatch::default();
        assert!(patch.password_hash.is_none());
        assert!(patch.image.is_none());
    }
}
