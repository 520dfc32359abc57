//! # Vendor Service
//!
//! Business logic for the vendor lifecycle. Sits between the HTTP
//! handlers and the database layer, and owns everything that is not
//! pure request plumbing:
//!
//! - Password strength policy and bcrypt hashing on registration
//! - Credential checks and token issuance on login
//! - Merge-style profile updates (absent fields keep stored values)
//! - The one-way verification flip
//!
//! ## Error Mapping
//!
//! | Variant | Meaning | HTTP status |
//! |---------|---------|-------------|
//! | `WeakPassword` | Password fails the strength policy | 400 |
//! | `Conflict` | Email or tax ID already registered | 400 |
//! | `InvalidCredentials` | Unknown email or wrong password | 401 |
//! | `NotFound` | No vendor with the given email | 404 |
//! | `AlreadyVerified` | Verification flip on a verified vendor | 400 |
//! | `Database` / `Internal` | Infrastructure failure | 500 |

use thiserror::Error;

use crate::auth::{hash_password, verify_password, TokenIssuer};
use crate::config::AppConfig;
use crate::db::{queries, Database, DatabaseError, NewVendor, VendorPatch};
use crate::models::requests::{RegisterVendorRequest, UpdateVendorRequest};
use crate::models::responses::{TokenResponse, VendorResponse};
use crate::validation;

/// Errors produced by vendor business logic.
#[derive(Debug, Error)]
pub enum VendorError {
    #[error("Password must be at least 8 characters with 1 uppercase 1 lowercase and 1 symbol.")]
    WeakPassword,

    #[error("Vendor with this {0} already exists.")]
    Conflict(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Vendor not found with provided email")]
    NotFound,

    #[error("Vendor is already verified")]
    AlreadyVerified,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DatabaseError> for VendorError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::Duplicate(field) => VendorError::Conflict(field),
            DatabaseError::NotFound(_) => VendorError::NotFound,
            other => VendorError::Database(other.to_string()),
        }
    }
}

/// Orchestrates vendor operations over the database and token issuer.
pub struct VendorService {
    db: Database,
    tokens: TokenIssuer,
    bcrypt_cost: u32,
    image_base_url: String,
}

impl VendorService {
    pub fn new(db: Database, tokens: TokenIssuer, config: &AppConfig) -> Self {
        Self {
            db,
            tokens,
            bcrypt_cost: config.bcrypt_cost,
            image_base_url: config.image_base_url.clone(),
        }
    }

    /// Registers a new vendor.
    ///
    /// The password must pass the strength policy before any hashing
    /// work is spent on it. Hashing runs on the blocking pool so the
    /// async executor is never stalled by bcrypt.
    ///
    /// Uniqueness of email and tax ID is enforced by the database at
    /// insert time; a unique violation surfaces as [`VendorError::Conflict`]
    /// naming the offending field.
    pub async fn register(
        &self,
        req: RegisterVendorRequest,
    ) -> Result<VendorResponse, VendorError> {
        if !validation::is_strong_password(&req.password) {
            return Err(VendorError::WeakPassword);
        }

        let password_hash = self.hash_on_blocking_pool(req.password.clone()).await?;

        let new_vendor = NewVendor {
            email: req.email,
            password_hash,
            company_name: req.company_name,
            contact_name: req.contact_name,
            phone: req.phone,
            business_type: req.business_type,
            tax_id: req.tax_id,
            address: req.address,
            image: req.image,
        };

        let record = queries::insert_vendor(self.db.pool(), &new_vendor).await?;

        tracing::info!(email = %record.email, "Vendor registered");
        Ok(VendorResponse::from_record(record, &self.image_base_url))
    }

    /// Authenticates a vendor and issues a bearer token.
    ///
    /// An unknown email and a wrong password produce the exact same
    /// error so the response does not reveal which one failed.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, VendorError> {
        let record = queries::get_vendor_by_email(self.db.pool(), email).await?;

        let record = match record {
            Some(record) => record,
            None => return Err(VendorError::InvalidCredentials),
        };

        let password = password.to_owned();
        let hash = record.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| VendorError::Internal(e.to_string()))?
            .map_err(|e| VendorError::Internal(e.to_string()))?;

        if !matches {
            return Err(VendorError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(&record.email)
            .map_err(|e| VendorError::Internal(e.to_string()))?;

        tracing::info!(email = %record.email, "Vendor logged in");
        Ok(TokenResponse { token })
    }

    /// Lists vendors, newest first. With an email filter the result is
    /// still an array: one element on a hit, empty on a miss.
    pub async fn list(&self, email: Option<&str>) -> Result<Vec<VendorResponse>, VendorError> {
        let records = match email {
            Some(email) => queries::get_vendor_by_email(self.db.pool(), email)
                .await?
                .into_iter()
                .collect(),
            None => queries::get_all_vendors(self.db.pool()).await?,
        };

        Ok(records
            .into_iter()
            .map(|r| VendorResponse::from_record(r, &self.image_base_url))
            .collect())
    }

    /// Applies a partial update keyed by email. Only the fields present
    /// in the request change; everything else keeps its stored value.
    /// A new password is re-hashed before it is stored.
    pub async fn update(&self, req: UpdateVendorRequest) -> Result<VendorResponse, VendorError> {
        let password_hash = match req.password {
            Some(password) => Some(self.hash_on_blocking_pool(password).await?),
            None => None,
        };

        let patch = VendorPatch {
            password_hash,
            company_name: req.company_name,
            contact_name: req.contact_name,
            phone: req.phone,
            business_type: req.business_type,
            tax_id: req.tax_id,
            address: req.address,
            image: req.image,
        };

        let record = queries::update_vendor(self.db.pool(), &req.email, &patch)
            .await?
            .ok_or(VendorError::NotFound)?;

        tracing::info!(email = %record.email, "Vendor updated");
        Ok(VendorResponse::from_record(record, &self.image_base_url))
    }

    /// Deletes a vendor by email, returning the removed row.
    pub async fn delete(&self, email: &str) -> Result<VendorResponse, VendorError> {
        let record = queries::delete_vendor_by_email(self.db.pool(), email)
            .await?
            .ok_or(VendorError::NotFound)?;

        tracing::info!(email = %record.email, "Vendor deleted");
        Ok(VendorResponse::from_record(record, &self.image_base_url))
    }

    /// Flips a vendor's verification flag to true. The flip is one-way:
    /// a vendor that is already verified is an error, not a no-op.
    ///
    /// The flip is a single conditional UPDATE so two concurrent calls
    /// cannot both succeed. When the UPDATE matches nothing, a follow-up
    /// read distinguishes "already verified" from "no such vendor".
    pub async fn verify(&self, email: &str) -> Result<VendorResponse, VendorError> {
        match queries::mark_verified(self.db.pool(), email).await? {
            Some(record) => {
                tracing::info!(email = %record.email, "Vendor verified");
                Ok(VendorResponse::from_record(record, &self.image_base_url))
            }
            None => match queries::get_vendor_by_email(self.db.pool(), email).await? {
                Some(_) => Err(VendorError::AlreadyVerified),
                None => Err(VendorError::NotFound),
            },
        }
    }

    async fn hash_on_blocking_pool(&self, plaintext: String) -> Result<String, VendorError> {
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || hash_password(&plaintext, cost))
            .await
            .map_err(|e| VendorError::Internal(e.to_string()))?
            .map_err(|e| VendorError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_maps_to_conflict() {
        let err = VendorError::from(DatabaseError::Duplicate("taxId".to_string()));
        assert!(matches!(err, VendorError::Conflict(field) if field == "taxId"));
    }

    #[test]
    fn conflict_message_names_the_field() {
        let err = VendorError::Conflict("email".to_string());
        assert_eq!(err.to_string(), "Vendor with this email already exists.");
    }

    #[test]
    fn credential_errors_are_indistinguishable() {
        // Unknown email and wrong password share one variant, so the
        // rendered message can never leak which check failed.
        let err = VendorError::InvalidCredentials;
        assert_eq!(err.to_string(), "Invalid credentials");
    }
}
