//! # REST API Module
//!
//! This module defines all HTTP endpoints for the Vendor Hub API.
//!
//! ## Endpoint Overview
//!
//! | Method | Path | Auth | Description |
//! |--------|------|------|-------------|
//! | POST | `/auth/vendor/register` | none | Register a vendor |
//! | POST | `/auth/vendor/login` | none | Log in, obtain a bearer token |
//! | GET | `/vendors` | token | List all vendors |
//! | GET | `/vendors/:id` | token | Get one vendor by email |
//! | POST | `/vendors` | token | Create a vendor |
//! | PUT | `/vendor/:id` | token | Update a vendor |
//! | DELETE | `/vendor/:id` | token | Delete a vendor |
//! | PATCH | `/vendor/:id/verify` | none | Mark a vendor verified |
//! | POST | `/uploads/images` | none | Store a vendor image |
//! | GET | `/health` | none | Health check |
//! | GET | `/` | none | API information |
//!
//! ## Request/Response Format
//!
//! All requests and responses use JSON. Successful calls return the
//! vendor object (or array) directly; failures return the error
//! envelope:
//!
//! ```json
//! {
//!     "code": "400 Bad Request",
//!     "error": [
//!         { "field": "taxId", "message": "Tax ID must be of 15 digits." }
//!     ]
//! }
//! ```
//!
//! The `error` member is a plain string for single-cause failures and a
//! field/message array for validation failures.

pub mod handlers;
pub mod routes;

pub use routes::configure_routes;
