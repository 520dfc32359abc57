//! # API Request Models
//!
//! Structures for incoming API request bodies.
//! Each struct represents the expected JSON body for an endpoint.

use serde::{Deserialize, Serialize};

/// Request to register a vendor (also used by the authenticated
/// `POST /vendors` admin path, which shares the same logic).
///
/// ## Example JSON
///
/// ```json
/// {
///     "companyName": "Acme",
///     "contactName": "Jane Doe",
///     "email": "a@b.com",
///     "password": "Abcdef1!",
///     "phone": "1234567890",
///     "businessType": "Retailer",
///     "taxId": "123456789012345",
///     "address": "1 Main St",
///     "image": "9f2c1d2e-....png"
/// }
/// ```
///
/// `image` is the stored filename returned by `POST /uploads/images`;
/// it is optional, as is `address`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterVendorRequest {
    /// Company name, alphanumeric + spaces.
    pub company_name: String,

    /// Contact person's name, alphanumeric + spaces.
    pub contact_name: String,

    /// Vendor email; unique identity key.
    pub email: String,

    /// Plaintext password. Hashed before storage, never echoed back.
    pub password: String,

    /// Phone number, 10 digits.
    pub phone: String,

    /// One of Manufacturer, Distributor, Wholesaler, Retailer, Service.
    pub business_type: String,

    /// Tax identifier, exactly 15 digits, unique.
    pub tax_id: String,

    /// Optional postal address, at most 255 characters.
    #[serde(default)]
    pub address: Option<String>,

    /// Optional stored image filename from a prior upload.
    #[serde(default)]
    pub image: Option<String>,
}

/// Request to log in.
///
/// ## Example JSON
///
/// ```json
/// {
///     "email": "a@b.com",
///     "password": "Abcdef1!"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Vendor email.
    pub email: String,

    /// Plaintext password to verify.
    pub password: String,
}

/// Partial update for a vendor.
///
/// `email` is required and identifies the target record; every other
/// field is optional and merged only when present. Email itself cannot
/// be changed through this request (it is the merge key).
///
/// ## Example JSON
///
/// ```json
/// {
///     "email": "a@b.com",
///     "phone": "0987654321"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVendorRequest {
    /// Identifies the vendor to update.
    pub email: String,

    #[serde(default)]
    pub company_name: Option<String>,

    #[serde(default)]
    pub contact_name: Option<String>,

    /// If present, re-hashed before persisting.
    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub business_type: Option<String>,

    #[serde(default)]
    pub tax_id: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    /// If present, replaces the stored image filename.
    #[serde(default)]
    pub image: Option<String>,
}

/// Request to mark a vendor as verified.
///
/// ## Example JSON
///
/// ```json
/// { "email": "a@b.com" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyVendorRequest {
    /// Vendor to verify.
    pub email: String,
}

/// Query parameters for `POST /uploads/images`.
///
/// ## Example URL
///
/// ```text
/// POST /uploads/images?filename=logo.png
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuery {
    /// Original filename; only its extension is kept. The stored name
    /// is a generated UUID.
    #[serde(default)]
    pub filename: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_body_deserializes_camel_case() {
        let body = r#"{
            "companyName": "Acme",
            "contactName": "Jane Doe",
            "email": "a@b.com",
            "password": "Abcdef1!",
            "phone": "1234567890",
            "businessType": "Retailer",
            "taxId": "123456789012345"
        }"#;
        let req: RegisterVendorRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.company_name, "Acme");
        assert_eq!(req.tax_id, "123456789012345");
        assert!(req.address.is_none());
        assert!(req.image.is_none());
    }

    #[test]
    fn update_body_accepts_partial_fields() {
        let body = r#"{ "email": "a@b.com", "phone": "0987654321" }"#;
        let req: UpdateVendorRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.email, "a@b.com");
        assert_eq!(req.phone.as_deref(), Some("0987654321"));
        assert!(req.password.is_none());
    }
}
