//! # API Request Handlers
//!
//! This module contains the handler functions for each API endpoint.
//! Each handler:
//! 1. Extracts request data
//! 2. Validates and sanitizes input
//! 3. Calls the vendor service (or image store)
//! 4. Returns a formatted response
//!
//! ## Error Handling
//!
//! All errors are returned in the shared envelope:
//!
//! ```json
//! {
//!     "code": "404 Not Found",
//!     "error": "Vendor not found with provided email"
//! }
//! ```
//!
//! Validation failures carry the violation list instead of a string:
//!
//! ```json
//! {
//!     "code": "400 Bad Request",
//!     "error": [
//!         { "field": "phone", "message": "Phone number must be at least 10 digits." }
//!     ]
//! }
//! ```

use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;
use tracing::{error, info};

use crate::models::requests::{
    LoginRequest, RegisterVendorRequest, UpdateVendorRequest, UploadQuery, VerifyVendorRequest,
};
use crate::models::responses::{ErrorBody, HealthResponse, UploadResponse};
use crate::services::vendor_service::VendorError;
use crate::validation::{self, FieldViolation};
use crate::AppState;

/// Maps a service error to the envelope response for it.
fn error_response(err: VendorError) -> HttpResponse {
    match &err {
        VendorError::WeakPassword | VendorError::Conflict(_) | VendorError::AlreadyVerified => {
            HttpResponse::BadRequest().json(ErrorBody::message("400 Bad Request", &err.to_string()))
        }
        VendorError::InvalidCredentials => HttpResponse::Unauthorized()
            .json(ErrorBody::message("401 Unauthorized", &err.to_string())),
        VendorError::NotFound => {
            HttpResponse::NotFound().json(ErrorBody::message("404 Not Found", &err.to_string()))
        }
        VendorError::Database(detail) | VendorError::Internal(detail) => {
            error!("Vendor operation failed: {}", detail);
            HttpResponse::InternalServerError().json(ErrorBody::message(
                "500 Internal Server Error",
                "Something went wrong",
            ))
        }
    }
}

/// Envelope for a failed declarative validation pass.
fn validation_response(violations: Vec<FieldViolation>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorBody::fields("400 Bad Request", violations))
}

/// API information endpoint (root).
///
/// Returns information about available API endpoints.
///
/// ## Endpoint
///
/// `GET /`
pub async fn api_info() -> HttpResponse {
    let info = json!({
        "name": "Vendor Hub API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Backend API for vendor onboarding and management",
        "endpoints": {
            "health": {
                "method": "GET",
                "path": "/health",
                "description": "Health check endpoint"
            },
            "auth": {
                "register": {
                    "method": "POST",
                    "path": "/auth/vendor/register",
                    "description": "Register a new vendor"
                },
                "login": {
                    "method": "POST",
                    "path": "/auth/vendor/login",
                    "description": "Log in and obtain a bearer token"
                }
            },
            "vendors": {
                "list": {
                    "method": "GET",
                    "path": "/vendors",
                    "description": "List all vendors (token required)"
                },
                "get": {
                    "method": "GET",
                    "path": "/vendors/{id}",
                    "description": "Get a vendor by email (token required)"
                },
                "create": {
                    "method": "POST",
                    "path": "/vendors",
                    "description": "Create a vendor (token required)"
                },
                "update": {
                    "method": "PUT",
                    "path": "/vendor/{id}",
                    "description": "Update a vendor (token required)"
                },
                "delete": {
                    "method": "DELETE",
                    "path": "/vendor/{id}",
                    "description": "Delete a vendor (token required)"
                },
                "verify": {
                    "method": "PATCH",
                    "path": "/vendor/{id}/verify",
                    "description": "Mark a vendor as verified"
                }
            },
            "uploads": {
                "image": {
                    "method": "POST",
                    "path": "/uploads/images",
                    "description": "Upload a vendor image"
                }
            }
        }
    });

    HttpResponse::Ok().json(info)
}

/// Health check endpoint.
///
/// Check if the backend is running and can reach the database.
///
/// ## Endpoint
///
/// `GET /health`
///
/// ## Example
///
/// ```bash
/// curl http://127.0.0.1:8080/health
/// ```
///
/// ## Response
///
/// ```json
/// {
///     "status": "healthy",
///     "database": true,
///     "version": "0.1.0",
///     "timestamp": "2026-08-29T12:00:00Z"
/// }
/// ```
pub async fn health_check(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let db_healthy = state.db.pool().get().await.is_ok();

    let response = HealthResponse {
        status: if db_healthy { "healthy" } else { "unhealthy" }.to_string(),
        database: db_healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    };

    let status_code = if db_healthy {
        actix_web::http::StatusCode::OK
    } else {
        actix_web::http::StatusCode::SERVICE_UNAVAILABLE
    };

    HttpResponse::build(status_code).json(response)
}

/// Register a new vendor.
///
/// ## Endpoint
///
/// `POST /auth/vendor/register`
///
/// ## Example
///
/// ```bash
/// curl -X POST http://127.0.0.1:8080/auth/vendor/register \
///   -H "Content-Type: application/json" \
///   -d '{
///     "companyName": "Acme Trading",
///     "contactName": "Jane Doe",
///     "email": "jane@acme.com",
///     "password": "Str0ng@pass",
///     "phone": "9876543210",
///     "businessType": "Wholesaler",
///     "taxId": "123456789012345"
///   }'
/// ```
///
/// ## Response
///
/// The stored vendor, without the password:
///
/// ```json
/// {
///     "email": "jane@acme.com",
///     "companyName": "Acme Trading",
///     "contactName": "Jane Doe",
///     "phone": "9876543210",
///     "businessType": "Wholesaler",
///     "taxId": "123456789012345",
///     "isVerified": false
/// }
/// ```
pub async fn register_vendor(
    state: web::Data<Arc<AppState>>,
    body: web::Json<RegisterVendorRequest>,
) -> HttpResponse {
    info!("Register request for: {}", body.email);

    let req = match validation::validate_register(body.into_inner()) {
        Ok(req) => req,
        Err(violations) => return validation_response(violations),
    };

    match state.vendors.register(req).await {
        Ok(vendor) => HttpResponse::Ok().json(vendor),
        Err(e) => error_response(e),
    }
}

/// Log in as a vendor and obtain a bearer token.
///
/// An unknown email and a wrong password both produce the same
/// `401 Unauthorized` response.
///
/// ## Endpoint
///
/// `POST /auth/vendor/login`
///
/// ## Example
///
/// ```bash
/// curl -X POST http://127.0.0.1:8080/auth/vendor/login \
///   -H "Content-Type: application/json" \
///   -d '{"email": "jane@acme.com", "password": "Str0ng@pass"}'
/// ```
///
/// ## Response
///
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiIs..." }
/// ```
pub async fn login_vendor(
    state: web::Data<Arc<AppState>>,
    body: web::Json<LoginRequest>,
) -> HttpResponse {
    let req = match validation::validate_login(body.into_inner()) {
        Ok(req) => req,
        Err(violations) => return validation_response(violations),
    };

    match state.vendors.login(&req.email, &req.password).await {
        Ok(token) => HttpResponse::Ok().json(token),
        Err(e) => error_response(e),
    }
}

/// List all vendors, newest first. Requires a bearer token.
///
/// ## Endpoint
///
/// `GET /vendors`
pub async fn list_vendors(state: web::Data<Arc<AppState>>) -> HttpResponse {
    match state.vendors.list(None).await {
        Ok(vendors) => HttpResponse::Ok().json(vendors),
        Err(e) => error_response(e),
    }
}

/// Get a single vendor by email. Requires a bearer token.
///
/// The response is still an array: one element on a hit, empty on a
/// miss.
///
/// ## Endpoint
///
/// `GET /vendors/{id}`
pub async fn get_vendor(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> HttpResponse {
    let email = validation::normalize_email(&path.into_inner());

    match state.vendors.list(Some(&email)).await {
        Ok(vendors) => HttpResponse::Ok().json(vendors),
        Err(e) => error_response(e),
    }
}

/// Create a vendor through the authenticated path.
///
/// Same body and semantics as registration, but behind the access
/// gate.
///
/// ## Endpoint
///
/// `POST /vendors`
pub async fn add_vendor(
    state: web::Data<Arc<AppState>>,
    body: web::Json<RegisterVendorRequest>,
) -> HttpResponse {
    info!("Add vendor request for: {}", body.email);

    let req = match validation::validate_register(body.into_inner()) {
        Ok(req) => req,
        Err(violations) => return validation_response(violations),
    };

    match state.vendors.register(req).await {
        Ok(vendor) => HttpResponse::Ok().json(vendor),
        Err(e) => error_response(e),
    }
}

/// Update a vendor. Requires a bearer token.
///
/// The target is the `email` in the body; the path id is decorative.
/// Only the fields present in the body change, and a new password is
/// re-hashed before storage.
///
/// ## Endpoint
///
/// `PUT /vendor/{id}`
///
/// ## Example
///
/// ```bash
/// curl -X PUT http://127.0.0.1:8080/vendor/jane@acme.com \
///   -H "Authorization: Bearer $TOKEN" \
///   -H "Content-Type: application/json" \
///   -d '{"email": "jane@acme.com", "phone": "9123456780"}'
/// ```
pub async fn update_vendor(
    state: web::Data<Arc<AppState>>,
    _path: web::Path<String>,
    body: web::Json<UpdateVendorRequest>,
) -> HttpResponse {
    let req = match validation::validate_update(body.into_inner()) {
        Ok(req) => req,
        Err(violations) => return validation_response(violations),
    };

    match state.vendors.update(req).await {
        Ok(vendor) => HttpResponse::Ok().json(vendor),
        Err(e) => error_response(e),
    }
}

/// Delete a vendor by email. Requires a bearer token.
///
/// The path id is the target email. An empty id, or the literal
/// placeholder `:id` pasted from documentation, is a bad request.
///
/// ## Endpoint
///
/// `DELETE /vendor/{id}`
pub async fn delete_vendor(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();
    if validation::is_placeholder_id(&id) {
        return HttpResponse::BadRequest().json(ErrorBody::message(
            "400 Bad Request",
            "Email is required to delete vendor.",
        ));
    }

    let email = validation::normalize_email(&id);
    match state.vendors.delete(&email).await {
        Ok(vendor) => HttpResponse::Ok().json(vendor),
        Err(VendorError::NotFound) => HttpResponse::NotFound().json(ErrorBody::message(
            "404 Not Found",
            "Vendor not found with provided email.",
        )),
        Err(e) => error_response(e),
    }
}

/// Mark a vendor as verified.
///
/// The flip is one-way: verifying an already-verified vendor is a
/// `400 Bad Request`, not a no-op. The target email comes from the
/// body, not the path.
///
/// ## Endpoint
///
/// `PATCH /vendor/{id}/verify`
///
/// ## Example
///
/// ```bash
/// curl -X PATCH http://127.0.0.1:8080/vendor/jane@acme.com/verify \
///   -H "Content-Type: application/json" \
///   -d '{"email": "jane@acme.com"}'
/// ```
pub async fn verify_vendor(
    state: web::Data<Arc<AppState>>,
    _path: web::Path<String>,
    body: web::Json<VerifyVendorRequest>,
) -> HttpResponse {
    let req = match validation::validate_verify(body.into_inner()) {
        Ok(req) => req,
        Err(violations) => return validation_response(violations),
    };

    match state.vendors.verify(&req.email).await {
        Ok(vendor) => HttpResponse::Ok().json(vendor),
        Err(e) => error_response(e),
    }
}

/// Store an uploaded vendor image.
///
/// The raw request body is the image bytes; the optional `filename`
/// query parameter contributes only its extension. The stored file
/// gets a fresh UUID name, returned along with its public URL. Put the
/// returned `filename` in the `image` field of a register or update
/// call to attach it to a vendor.
///
/// ## Endpoint
///
/// `POST /uploads/images?filename=logo.png`
///
/// ## Response
///
/// ```json
/// {
///     "filename": "550e8400-e29b-41d4-a716-446655440000.png",
///     "url": "/images/550e8400-e29b-41d4-a716-446655440000.png"
/// }
/// ```
pub async fn upload_image(
    state: web::Data<Arc<AppState>>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> HttpResponse {
    match state.images.save(&body, query.filename.as_deref()).await {
        Ok(stored) => HttpResponse::Ok().json(UploadResponse {
            filename: stored.filename,
            url: stored.url,
        }),
        Err(e) => {
            let message = e.to_string();
            match e {
                crate::services::image_store::ImageStoreError::EmptyBody => {
                    HttpResponse::BadRequest()
                        .json(ErrorBody::message("400 Bad Request", &message))
                }
                crate::services::image_store::ImageStoreError::Io(io) => {
                    error!("Image upload failed: {}", io);
                    HttpResponse::InternalServerError().json(ErrorBody::message(
                        "500 Internal Server Error",
                        "Something went wrong",
                    ))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;

    use super::*;

    async fn body_json(res: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(res.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_rt::test]
    async fn error_kinds_map_to_documented_statuses() {
        let cases = [
            (VendorError::WeakPassword, 400, "400 Bad Request"),
            (
                VendorError::Conflict("email".to_string()),
                400,
                "400 Bad Request",
            ),
            (VendorError::InvalidCredentials, 401, "401 Unauthorized"),
            (VendorError::NotFound, 404, "404 Not Found"),
            (VendorError::AlreadyVerified, 400, "400 Bad Request"),
            (
                VendorError::Database("pool exhausted".to_string()),
                500,
                "500 Internal Server Error",
            ),
            (
                VendorError::Internal("join error".to_string()),
                500,
                "500 Internal Server Error",
            ),
        ];

        for (err, status, code) in cases {
            let res = error_response(err);
            assert_eq!(res.status().as_u16(), status);
            let json = body_json(res).await;
            assert_eq!(json["code"], code);
        }
    }

    #[actix_rt::test]
    async fn duplicate_registration_is_a_bad_request() {
        // Re-registering an email (or tax ID) fails with 400, the same
        // status the save path always used for duplicate keys.
        let res = error_response(VendorError::Conflict("email".to_string()));
        assert_eq!(res.status().as_u16(), 400);
        let json = body_json(res).await;
        assert_eq!(json["code"], "400 Bad Request");
        assert_eq!(json["error"], "Vendor with this email already exists.");
    }

    #[actix_rt::test]
    async fn validation_failures_carry_the_field_list() {
        let res = validation_response(vec![FieldViolation {
            field: "taxId".to_string(),
            message: "Tax ID must be of 15 digits.".to_string(),
        }]);
        assert_eq!(res.status().as_u16(), 400);
        let json = body_json(res).await;
        assert_eq!(json["code"], "400 Bad Request");
        assert_eq!(json["error"][0]["field"], "taxId");
        assert_eq!(json["error"][0]["message"], "Tax ID must be of 15 digits.");
    }

    #[actix_rt::test]
    async fn infrastructure_detail_never_reaches_the_client() {
        let res = error_response(VendorError::Database(
            "postgres://user:hunter2@db/prod".to_string(),
        ));
        let json = body_json(res).await;
        assert_eq!(json["error"], "Something went wrong");
    }
}
