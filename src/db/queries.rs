//! # Database Queries
//!
//! This module contains all the SQL queries for the `vendors` table.
//! Each function performs a specific database operation.
//!
//! ## Error Handling
//!
//! All queries return `Result<T, DatabaseError>`. Common errors:
//! - `Duplicate` - A unique constraint (email or tax_id) was violated
//! - `NotFound` - Record doesn't exist
//! - `QueryError` - SQL execution failed
//!
//! Duplicate detection happens at write time via the constraint itself
//! (SQLSTATE 23505), never by a prior read, so concurrent inserts of the
//! same email or tax_id cannot both succeed.

use deadpool_postgres::Pool;
use tokio_postgres::error::SqlState;
use tokio_postgres::Row;
use tracing::{debug, info};

use super::models::{NewVendor, VendorPatch, VendorRecord};
use super::DatabaseError;

/// Helper to convert a database row to a VendorRecord.
fn row_to_vendor(row: &Row) -> VendorRecord {
    VendorRecord {
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        company_name: row.get("company_name"),
        contact_name: row.get("contact_name"),
        phone: row.get("phone"),
        business_type: row.get("business_type"),
        tax_id: row.get("tax_id"),
        address: row.get("address"),
        image: row.get("image"),
        is_verified: row.get("is_verified"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Map a unique-violation error to `Duplicate`, naming the field from
/// the violated constraint. Anything else passes through as QueryError.
fn map_unique_violation(e: tokio_postgres::Error) -> DatabaseError {
    if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
        let constraint = e
            .as_db_error()
            .and_then(|db| db.constraint())
            .unwrap_or_default();
        let field = if constraint.contains("tax_id") {
            "taxId"
        } else {
            "email"
        };
        return DatabaseError::Duplicate(field.to_string());
    }
    DatabaseError::QueryError(e)
}

/// Insert a new vendor.
///
/// Returns the stored row. Fails with `Duplicate` when the email or
/// tax_id already exists.
pub async fn insert_vendor(pool: &Pool, vendor: &NewVendor) -> Result<VendorRecord, DatabaseError> {
    debug!("Inserting vendor: {}", vendor.email);

    let client = pool
        .get()
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let row = client
        .query_one(
            r#"
            INSERT INTO vendors (
                email, password_hash, company_name, contact_name,
                phone, business_type, tax_id, address, image
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING
                email, password_hash, company_name, contact_name,
                phone, business_type, tax_id, address, image,
                is_verified, created_at, updated_at
            "#,
            &[
                &vendor.email,
                &vendor.password_hash,
                &vendor.company_name,
                &vendor.contact_name,
                &vendor.phone,
                &vendor.business_type,
                &vendor.tax_id,
                &vendor.address,
                &vendor.image,
            ],
        )
        .await
        .map_err(map_unique_violation)?;

    info!("Vendor created: {}", vendor.email);
    Ok(row_to_vendor(&row))
}

/// Get all vendors, newest first.
pub async fn get_all_vendors(pool: &Pool) -> Result<Vec<VendorRecord>, DatabaseError> {
    debug!("Fetching all vendors");

    let client = pool
        .get()
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let rows = client
        .query(
            r#"
            SELECT
                email, password_hash, company_name, contact_name,
                phone, business_type, tax_id, address, image,
                is_verified, created_at, updated_at
            FROM vendors
            ORDER BY created_at DESC
            "#,
            &[],
        )
        .await?;

    Ok(rows.iter().map(row_to_vendor).collect())
}

/// Get a vendor by email.
pub async fn get_vendor_by_email(
    pool: &Pool,
    email: &str,
) -> Result<Option<VendorRecord>, DatabaseError> {
    debug!("Fetching vendor: {}", email);

    let client = pool
        .get()
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let rows = client
        .query(
            r#"
            SELECT
                email, password_hash, company_name, contact_name,
                phone, business_type, tax_id, address, image,
                is_verified, created_at, updated_at
            FROM vendors
            WHERE email = $1
            "#,
            &[&email],
        )
        .await?;

    Ok(rows.first().map(row_to_vendor))
}

/// Merge the provided fields into an existing vendor.
///
/// Only columns present in the patch are changed (`COALESCE` keeps the
/// stored value for absent fields). Email is the merge key and is never
/// rewritten. Returns `None` when no vendor has that email.
pub async fn update_vendor(
    pool: &Pool,
    email: &str,
    patch: &VendorPatch,
) -> Result<Option<VendorRecord>, DatabaseError> {
    debug!("Updating vendor: {}", email);

    let client = pool
        .get()
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let rows = client
        .query(
            r#"
            UPDATE vendors SET
                password_hash = COALESCE($2, password_hash),
                company_name  = COALESCE($3, company_name),
                contact_name  = COALESCE($4, contact_name),
                phone         = COALESCE($5, phone),
                business_type = COALESCE($6, business_type),
                tax_id        = COALESCE($7, tax_id),
                address       = COALESCE($8, address),
                image         = COALESCE($9, image),
                updated_at    = NOW()
            WHERE email = $1
            RETURNING
                email, password_hash, company_name, contact_name,
                phone, business_type, tax_id, address, image,
                is_verified, created_at, updated_at
            "#,
            &[
                &email,
                &patch.password_hash,
                &patch.company_name,
                &patch.contact_name,
                &patch.phone,
                &patch.business_type,
                &patch.tax_id,
                &patch.address,
                &patch.image,
            ],
        )
        .await
        .map_err(map_unique_violation)?;

    if rows.is_empty() {
        return Ok(None);
    }

    info!("Vendor updated: {}", email);
    Ok(rows.first().map(row_to_vendor))
}

/// Delete a vendor by email.
///
/// Returns the deleted row, or `None` when no vendor has that email.
pub async fn delete_vendor_by_email(
    pool: &Pool,
    email: &str,
) -> Result<Option<VendorRecord>, DatabaseError> {
    debug!("Deleting vendor: {}", email);

    let client = pool
        .get()
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let rows = client
        .query(
            r#"
            DELETE FROM vendors
            WHERE email = $1
            RETURNING
                email, password_hash, company_name, contact_name,
                phone, business_type, tax_id, address, image,
                is_verified, created_at, updated_at
            "#,
            &[&email],
        )
        .await?;

    if !rows.is_empty() {
        info!("Vendor deleted: {}", email);
    }
    Ok(rows.first().map(row_to_vendor))
}

/// Flip `is_verified` to true for an unverified vendor.
///
/// The flip is a single conditional UPDATE, so two concurrent verify
/// calls cannot both succeed. Returns the updated row, or `None` when
/// no unverified vendor has that email (the caller distinguishes
/// "absent" from "already verified" with a follow-up read).
pub async fn mark_verified(
    pool: &Pool,
    email: &str,
) -> Result<Option<VendorRecord>, DatabaseError> {
    debug!("Marking vendor verified: {}", email);

    let client = pool
        .get()
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let rows = client
        .query(
            r#"
            UPDATE vendors
            SET is_verified = TRUE, updated_at = NOW()
            WHERE email = $1 AND is_verified = FALSE
            RETURNING
                email, password_hash, company_name, contact_name,
                phone, business_type, tax_id, address, image,
                is_verified, created_at, updated_at
            "#,
            &[&email],
        )
        .await?;

    if !rows.is_empty() {
        info!("Vendor verified: {}", email);
    }
    Ok(rows.first().map(row_to_vendor))
}
