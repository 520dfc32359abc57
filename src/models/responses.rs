//! # API Response Models
//!
//! Structures for outgoing API response bodies.
//!
//! Successful operations return the vendor object (or array) directly;
//! failures share one envelope:
//!
//! ```json
//! {
//!     "code": "404 Not Found",
//!     "error": "Vendor not found with provided email"
//! }
//! ```
//!
//! where `error` is either a message string or, for validation
//! failures, the ordered array of field violations.
//!
//! `VendorResponse` has no password field at all — the hash cannot leak
//! through serialization because there is nowhere to put it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::models::VendorRecord;
use crate::validation::FieldViolation;

/// Error payload: a message or a list of field violations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldViolation>),
}

/// The error envelope returned by every failing operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// HTTP status text, e.g. "400 Bad Request".
    pub code: String,

    /// What went wrong.
    pub error: ErrorDetail,
}

impl ErrorBody {
    /// Envelope with a plain message.
    pub fn message(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            error: ErrorDetail::Message(message.to_string()),
        }
    }

    /// Envelope with a field-violation list.
    pub fn fields(code: &str, violations: Vec<FieldViolation>) -> Self {
        Self {
            code: code.to_string(),
            error: ErrorDetail::Fields(violations),
        }
    }
}

/// A vendor as returned by the API.
///
/// ## Example JSON
///
/// ```json
/// {
///     "email": "a@b.com",
///     "companyName": "Acme",
///     "contactName": "Jane Doe",
///     "phone": "1234567890",
///     "businessType": "Retailer",
///     "taxId": "123456789012345",
///     "address": null,
///     "image": "/images/9f2c1d2e-....png",
///     "isVerified": false,
///     "createdAt": "2026-01-15T12:00:00Z",
///     "updatedAt": "2026-01-15T12:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorResponse {
    pub email: String,
    pub company_name: String,
    pub contact_name: String,
    pub phone: String,
    pub business_type: String,
    pub tax_id: String,
    pub address: Option<String>,

    /// Full image URL: configured base + stored filename.
    pub image: Option<String>,

    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VendorResponse {
    /// Build the outbound representation of a stored vendor.
    ///
    /// The password hash is dropped and the image filename is rendered
    /// as a full URL by prefixing the configured base.
    pub fn from_record(record: VendorRecord, image_base_url: &str) -> Self {
        let image = record
            .image
            .map(|filename| format!("{}{}", image_base_url, filename));
        Self {
            email: record.email,
            company_name: record.company_name,
            contact_name: record.contact_name,
            phone: record.phone,
            business_type: record.business_type,
            tax_id: record.tax_id,
            address: record.address,
            image,
            is_verified: record.is_verified,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Login response: the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
}

/// Upload response: the stored filename and the URL it renders to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Generated filename to place in a vendor's `image` field.
    pub filename: String,

    /// Full URL the filename renders to in vendor responses.
    pub url: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status: "healthy" or "unhealthy".
    pub status: String,

    /// Database connection status.
    pub database: bool,

    /// Service version.
    pub version: String,

    /// Current timestamp.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> VendorRecord {
        VendorRecord {
            email: "a@b.com".to_string(),
            password_hash: "$2b$10$secret".to_string(),
            company_name: "Acme".to_string(),
            contact_name: "Jane Doe".to_string(),
            phone: "1234567890".to_string(),
            business_type: "Retailer".to_string(),
            tax_id: "123456789012345".to_string(),
            address: None,
            image: Some("abc.png".to_string()),
            is_verified: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn response_never_contains_password() {
        let resp = VendorResponse::from_record(record(), "/images/");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("secret"));
    }

    #[test]
    fn image_is_rendered_with_base_url() {
        let resp = VendorResponse::from_record(record(), "https://cdn.example.com/images/");
        assert_eq!(
            resp.image.as_deref(),
            Some("https://cdn.example.com/images/abc.png")
        );

        let mut rec = record();
        rec.image = None;
        let resp = VendorResponse::from_record(rec, "/images/");
        assert!(resp.image.is_none());
    }

    #[test]
    fn error_envelope_shapes() {
        let body = ErrorBody::message("404 Not Found", "Vendor not found with provided email");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], "404 Not Found");
        assert_eq!(json["error"], "Vendor not found with provided email");

        let body = ErrorBody::fields(
            "400 Bad Request",
            vec![FieldViolation {
                field: "taxId".to_string(),
                message: "Tax ID must be of 15 digits.".to_string(),
            }],
        );
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"][0]["field"], "taxId");
    }
}
