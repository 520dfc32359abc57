//! # Services Module
//!
//! This module contains the core business logic services for the
//! vendor backend. Each service handles a specific domain.
//!
//! ## Services Overview
//!
//! | Service | Responsibility |
//! |---------|---------------|
//! | `VendorService` | Vendor lifecycle: register, login, CRUD, verification |
//! | `ImageStore` | Writing uploaded vendor images to disk |

pub mod image_store;
pub mod vendor_service;

pub use image_store::ImageStore;
pub use vendor_service::VendorService;
