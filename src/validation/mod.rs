//! # Field Validation Module
//!
//! Declarative per-field validation for inbound request bodies. Rules run
//! in declaration order and collect every violation instead of stopping
//! at the first, so a bad request reports the full list:
//!
//! ```json
//! {
//!     "code": "400 Bad Request",
//!     "error": [
//!         { "field": "companyName", "message": "Company name should be alphanumeric with spaces only" },
//!         { "field": "taxId", "message": "Tax ID must be of 15 digits." }
//!     ]
//! }
//! ```
//!
//! Validation also sanitizes: every string field is trimmed, the
//! non-credential fields are HTML-escaped, and emails are normalized to
//! lowercase. Handlers validate before calling the workflow service; a
//! failed validation never reaches business logic.
//!
//! The strong-password policy is deliberately NOT part of these rules.
//! It applies only on the registration path and lives with the workflow
//! (see `is_strong_password`).

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::db::models::BUSINESS_TYPES;
use crate::models::requests::{
    LoginRequest, RegisterVendorRequest, UpdateVendorRequest, VerifyVendorRequest,
};

/// Minimum password length, applied everywhere a password appears.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Maximum address length.
pub const ADDRESS_MAX_LEN: usize = 255;

/// Symbols accepted (and one required) by the strong-password policy.
const PASSWORD_SYMBOLS: &str = "@$!%*?&";

static ALPHANUM_SPACES_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn alphanum_spaces_regex() -> &'static Regex {
    ALPHANUM_SPACES_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9\s]+$").expect("alphanumeric pattern is valid")
    })
}

fn email_regex() -> &'static Regex {
    // Deliberately loose: one @, no whitespace, a dot in the domain.
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    })
}

/// A single failed rule, named by the wire-format field it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Field name as it appears in the request body (camelCase).
    pub field: String,

    /// Human-readable description of the failed rule.
    pub message: String,
}

/// Collector for per-field rules.
///
/// Each rule method records a violation on failure and returns `&mut Self`
/// so rules chain in declaration order.
#[derive(Debug, Default)]
pub struct Validator {
    violations: Vec<FieldViolation>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, field: &str, message: &str) -> &mut Self {
        self.violations.push(FieldViolation {
            field: field.to_string(),
            message: message.to_string(),
        });
        self
    }

    /// Non-empty after trimming.
    pub fn require(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if value.trim().is_empty() {
            return self.fail(field, message);
        }
        self
    }

    /// Value matches the given pattern. Empty values are skipped;
    /// presence is `require`'s job.
    pub fn pattern(
        &mut self,
        field: &str,
        value: &str,
        re: &Regex,
        message: &str,
    ) -> &mut Self {
        if !value.trim().is_empty() && !re.is_match(value.trim()) {
            return self.fail(field, message);
        }
        self
    }

    /// Minimum length after trimming.
    pub fn min_len(&mut self, field: &str, value: &str, min: usize, message: &str) -> &mut Self {
        if value.trim().chars().count() < min {
            return self.fail(field, message);
        }
        self
    }

    /// Maximum length after trimming.
    pub fn max_len(&mut self, field: &str, value: &str, max: usize, message: &str) -> &mut Self {
        if value.trim().chars().count() > max {
            return self.fail(field, message);
        }
        self
    }

    /// Exactly `n` characters, all ASCII digits.
    pub fn digits_exact(&mut self, field: &str, value: &str, n: usize, message: &str) -> &mut Self {
        let v = value.trim();
        if v.len() != n || !v.bytes().all(|b| b.is_ascii_digit()) {
            return self.fail(field, message);
        }
        self
    }

    /// Membership in a fixed enumeration.
    pub fn one_of(
        &mut self,
        field: &str,
        value: &str,
        allowed: &[&str],
        message: &str,
    ) -> &mut Self {
        if !allowed.contains(&value.trim()) {
            return self.fail(field, message);
        }
        self
    }

    /// Valid email syntax. Empty values are skipped.
    pub fn email(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if !value.trim().is_empty() && !email_regex().is_match(value.trim()) {
            return self.fail(field, message);
        }
        self
    }

    /// Consume the collector: `Ok` when every rule passed, otherwise the
    /// ordered list of violations.
    pub fn finish(self) -> Result<(), Vec<FieldViolation>> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(self.violations)
        }
    }
}

/// Trim and HTML-escape a string field before it reaches business logic
/// or storage.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.trim().chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

/// Canonicalize an email address: trim and lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Strong-password policy applied on the registration path only:
/// at least one lowercase, one uppercase, one digit, one symbol from
/// the fixed set, minimum length 8, and no characters outside those
/// classes.
pub fn is_strong_password(password: &str) -> bool {
    let mut lower = false;
    let mut upper = false;
    let mut digit = false;
    let mut symbol = false;

    for c in password.chars() {
        if c.is_ascii_lowercase() {
            lower = true;
        } else if c.is_ascii_uppercase() {
            upper = true;
        } else if c.is_ascii_digit() {
            digit = true;
        } else if PASSWORD_SYMBOLS.contains(c) {
            symbol = true;
        } else {
            return false;
        }
    }

    password.len() >= PASSWORD_MIN_LEN && lower && upper && digit && symbol
}

/// True when a path identifier is missing or a literal route placeholder
/// (a client calling `DELETE /vendor/:id` without substituting the id).
pub fn is_placeholder_id(id: &str) -> bool {
    id.trim().is_empty() || id == ":id"
}

/// Validate and sanitize a registration (or authenticated create) body.
///
/// On success the returned request has been trimmed, escaped, and its
/// email normalized, ready for the workflow service.
pub fn validate_register(
    mut req: RegisterVendorRequest,
) -> Result<RegisterVendorRequest, Vec<FieldViolation>> {
    let mut v = Validator::new();
    v.require(
        "companyName",
        &req.company_name,
        "Company name is required",
    )
    .pattern(
        "companyName",
        &req.company_name,
        alphanum_spaces_regex(),
        "Company name should be alphanumeric with spaces only",
    )
    .require(
        "contactName",
        &req.contact_name,
        "Contact name is required",
    )
    .pattern(
        "contactName",
        &req.contact_name,
        alphanum_spaces_regex(),
        "Contact name should be alphanumeric with spaces only",
    )
    .require("email", &req.email, "Email is required")
    .email("email", &req.email, "Email must be a valid email address")
    .min_len("password", &req.password, PASSWORD_MIN_LEN, "Min length 8")
    .digits_exact(
        "phone",
        &req.phone,
        10,
        "Phone number must be at least 10 digits.",
    )
    .require("businessType", &req.business_type, "Business type is required")
    .one_of(
        "businessType",
        &req.business_type,
        &BUSINESS_TYPES,
        "Business type should be from 'Manufacturer', 'Distributor', 'Wholesaler', 'Retailer', 'Service'",
    )
    .digits_exact("taxId", &req.tax_id, 15, "Tax ID must be of 15 digits.");
    if let Some(address) = &req.address {
        v.max_len(
            "address",
            address,
            ADDRESS_MAX_LEN,
            "Address should not be more than 255 chars.",
        );
    }
    v.finish()?;

    req.company_name = sanitize(&req.company_name);
    req.contact_name = sanitize(&req.contact_name);
    req.email = normalize_email(&req.email);
    req.password = req.password.trim().to_string();
    req.phone = sanitize(&req.phone);
    req.business_type = sanitize(&req.business_type);
    req.tax_id = sanitize(&req.tax_id);
    req.address = req.address.as_deref().map(sanitize);
    req.image = req.image.as_deref().map(sanitize);
    Ok(req)
}

/// Validate and normalize a login body.
pub fn validate_login(mut req: LoginRequest) -> Result<LoginRequest, Vec<FieldViolation>> {
    let mut v = Validator::new();
    v.require("email", &req.email, "Email is required")
        .email("email", &req.email, "Email must be a valid email address")
        .require("password", &req.password, "Password is required");
    v.finish()?;

    req.email = normalize_email(&req.email);
    req.password = req.password.trim().to_string();
    Ok(req)
}

/// Validate and sanitize a partial update body.
///
/// Only provided fields are checked; `email` must be present because it
/// identifies the target record. The password rule here is the plain
/// minimum length, not the registration-time strong policy.
pub fn validate_update(
    mut req: UpdateVendorRequest,
) -> Result<UpdateVendorRequest, Vec<FieldViolation>> {
    let mut v = Validator::new();
    v.require(
        "email",
        &req.email,
        "Email is required for updating vendor",
    )
    .email("email", &req.email, "Email must be a valid email address");
    if let Some(company_name) = &req.company_name {
        v.pattern(
            "companyName",
            company_name,
            alphanum_spaces_regex(),
            "Company name should be alphanumeric with spaces only",
        );
    }
    if let Some(contact_name) = &req.contact_name {
        v.pattern(
            "contactName",
            contact_name,
            alphanum_spaces_regex(),
            "Contact name should be alphanumeric with spaces only",
        );
    }
    if let Some(password) = &req.password {
        v.min_len("password", password, PASSWORD_MIN_LEN, "Min length 8");
    }
    if let Some(phone) = &req.phone {
        v.digits_exact("phone", phone, 10, "Phone number must be at least 10 digits.");
    }
    if let Some(business_type) = &req.business_type {
        v.one_of(
            "businessType",
            business_type,
            &BUSINESS_TYPES,
            "Business type should be from 'Manufacturer', 'Distributor', 'Wholesaler', 'Retailer', 'Service'",
        );
    }
    if let Some(tax_id) = &req.tax_id {
        v.digits_exact("taxId", tax_id, 15, "Tax ID must be of 15 digits.");
    }
    if let Some(address) = &req.address {
        v.max_len(
            "address",
            address,
            ADDRESS_MAX_LEN,
            "Address should not be more than 255 chars.",
        );
    }
    v.finish()?;

    req.email = normalize_email(&req.email);
    req.company_name = req.company_name.as_deref().map(sanitize);
    req.contact_name = req.contact_name.as_deref().map(sanitize);
    req.password = req.password.as_deref().map(|p| p.trim().to_string());
    req.phone = req.phone.as_deref().map(sanitize);
    req.business_type = req.business_type.as_deref().map(sanitize);
    req.tax_id = req.tax_id.as_deref().map(sanitize);
    req.address = req.address.as_deref().map(sanitize);
    req.image = req.image.as_deref().map(sanitize);
    Ok(req)
}

/// Validate a verification body.
pub fn validate_verify(
    mut req: VerifyVendorRequest,
) -> Result<VerifyVendorRequest, Vec<FieldViolation>> {
    let mut v = Validator::new();
    v.require("email", &req.email, "Email is required for updating vendor")
        .email("email", &req.email, "Email must be a valid email address");
    v.finish()?;

    req.email = normalize_email(&req.email);
    Ok(req)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_body() -> RegisterVendorRequest {
        RegisterVendorRequest {
            company_name: "Acme".to_string(),
            contact_name: "Jane Doe".to_string(),
            email: "A@B.com".to_string(),
            password: "Abcdef1!".to_string(),
            phone: "1234567890".to_string(),
            business_type: "Retailer".to_string(),
            tax_id: "123456789012345".to_string(),
            address: None,
            image: None,
        }
    }

    #[test]
    fn valid_registration_passes_and_normalizes_email() {
        let out = validate_register(register_body()).expect("valid body");
        assert_eq!(out.email, "a@b.com");
    }

    #[test]
    fn violations_are_collected_in_field_order() {
        let mut body = register_body();
        body.company_name = "Acme & Co".to_string(); // '&' not alphanumeric
        body.tax_id = "123".to_string();
        let violations = validate_register(body).unwrap_err();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "companyName");
        assert_eq!(violations[1].field, "taxId");
    }

    #[test]
    fn phone_must_be_exactly_ten_digits() {
        let mut body = register_body();
        body.phone = "123456789".to_string();
        assert!(validate_register(body).is_err());

        let mut body = register_body();
        body.phone = "12345678901".to_string();
        assert!(validate_register(body).is_err());
    }

    #[test]
    fn business_type_must_be_in_enumeration() {
        let mut body = register_body();
        body.business_type = "Reseller".to_string();
        let violations = validate_register(body).unwrap_err();
        assert_eq!(violations[0].field, "businessType");
    }

    #[test]
    fn address_over_255_chars_is_rejected() {
        let mut body = register_body();
        body.address = Some("x".repeat(256));
        assert!(validate_register(body).is_err());

        let mut body = register_body();
        body.address = Some("x".repeat(255));
        assert!(validate_register(body).is_ok());
    }

    #[test]
    fn sanitize_trims_and_escapes() {
        assert_eq!(sanitize("  Acme  "), "Acme");
        assert_eq!(sanitize("<b>Acme</b>"), "&lt;b&gt;Acme&lt;&#x2F;b&gt;");
        assert_eq!(sanitize("a & b"), "a &amp; b");
    }

    #[test]
    fn strong_password_policy() {
        assert!(is_strong_password("Abcdef1!"));
        assert!(is_strong_password("Xy9@aaaa"));
        // Too short
        assert!(!is_strong_password("Ab1!"));
        // Missing uppercase
        assert!(!is_strong_password("abcdef1!"));
        // Missing digit
        assert!(!is_strong_password("Abcdefg!"));
        // Missing symbol
        assert!(!is_strong_password("Abcdefg1"));
        // Symbol outside the fixed set
        assert!(!is_strong_password("Abcdef1#"));
    }

    #[test]
    fn update_requires_email_but_fields_are_optional() {
        let req = UpdateVendorRequest {
            email: "a@b.com".to_string(),
            company_name: None,
            contact_name: None,
            password: None,
            phone: None,
            business_type: None,
            tax_id: None,
            address: None,
            image: None,
        };
        assert!(validate_update(req).is_ok());

        let req = UpdateVendorRequest {
            email: "".to_string(),
            company_name: None,
            contact_name: None,
            password: None,
            phone: None,
            business_type: None,
            tax_id: None,
            address: None,
            image: None,
        };
        assert!(validate_update(req).is_err());
    }

    #[test]
    fn placeholder_ids_are_detected() {
        assert!(is_placeholder_id(""));
        assert!(is_placeholder_id("  "));
        assert!(is_placeholder_id(":id"));
        assert!(!is_placeholder_id("a@b.com"));
    }
}
