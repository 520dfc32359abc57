//! # Vendor Hub Backend Service
//!
//! This is the main entry point for the backend service that manages
//! vendor onboarding and lifecycle. It provides:
//!
//! - REST API for vendor registration, login, and CRUD
//! - JWT bearer tokens gating the management endpoints
//! - A verification workflow (one-way unverified → verified flip)
//! - Image uploads for vendor profiles
//! - PostgreSQL storage for vendor records
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     BACKEND SERVICE                       │
//! │                                                           │
//! │  ┌──────────────────┐        ┌─────────────────────────┐ │
//! │  │    REST API      │        │      Access Gate         │ │
//! │  │    (Actix)       │───────▶│  Bearer token check on   │ │
//! │  │                  │        │  /vendors and /vendor    │ │
//! │  │  /auth/vendor/*  │        └─────────────────────────┘ │
//! │  │  /vendors        │                                    │
//! │  │  /vendor/:id     │                                    │
//! │  │  /uploads/images │                                    │
//! │  └────────┬─────────┘                                    │
//! │           │                                               │
//! │  ┌────────┴─────────────────────────────────────────────┐│
//! │  │                  SERVICE LAYER                        ││
//! │  │  ┌───────────────┐  ┌────────────┐  ┌─────────────┐ ││
//! │  │  │ VendorService │  │ TokenIssuer│  │ ImageStore  │ ││
//! │  │  └───────────────┘  └────────────┘  └─────────────┘ ││
//! │  └────────┬─────────────────────────────────┬──────────┘│
//! │           │                                 │            │
//! │    ┌──────┴──────┐                   ┌──────┴──────┐     │
//! │    │  PostgreSQL │                   │  Image dir  │     │
//! │    │  Database   │                   │  on disk    │     │
//! │    └─────────────┘                   └─────────────┘     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! 1. Set up PostgreSQL and create the database
//! 2. Copy `.env.example` to `.env` and configure
//! 3. Start the server: `cargo run` (the schema is applied on boot)
//!
//! ## Environment Variables
//!
//! See `.env.example` for all required configuration.

use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod api;
mod auth;
mod config;
mod db;
mod models;
mod services;
mod validation;

use auth::TokenIssuer;
use config::AppConfig;
use db::Database;
use services::{ImageStore, VendorService};

/// Application state shared across all handlers.
///
/// This struct contains all the shared resources that API handlers
/// need access to. It is built once at startup and handed to every
/// worker behind an `Arc`.
pub struct AppState {
    /// Database connection pool for PostgreSQL
    pub db: Database,

    /// Vendor business logic service
    pub vendors: VendorService,

    /// Image upload storage
    pub images: ImageStore,
}

/// Main entry point for the backend service.
///
/// This function:
/// 1. Loads configuration from environment
/// 2. Initializes the database connection and applies the schema
/// 3. Builds the token issuer and services
/// 4. Launches the HTTP server
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // =========================================
    // STEP 1: Initialize Logging
    // =========================================
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("🚀 Starting Vendor Hub Backend Service");

    // =========================================
    // STEP 2: Load Configuration
    // =========================================
    dotenvy::dotenv().ok(); // It's okay if .env doesn't exist

    let config = AppConfig::from_env().expect("Failed to load configuration");

    info!("📋 Configuration loaded");
    info!("   Image dir: {}", config.image_dir);
    info!("   Token TTL: {}s", config.token_ttl_secs);

    // =========================================
    // STEP 3: Initialize Database
    // =========================================
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    info!("🗄️  Database connected");

    db.run_migrations().await.expect("Failed to run migrations");

    info!("📦 Database schema applied");

    // =========================================
    // STEP 4: Initialize Services
    // =========================================
    let tokens = TokenIssuer::new(&config.jwt_secret, config.token_ttl_secs);

    let vendors = VendorService::new(db.clone(), tokens.clone(), &config);

    let images = ImageStore::new(&config.image_dir, &config.image_base_url);
    images
        .ensure_dir()
        .await
        .expect("Failed to create image directory");

    info!("🔧 Services initialized");

    // =========================================
    // STEP 5: Create Application State
    // =========================================
    let app_state = Arc::new(AppState {
        db: db.clone(),
        vendors,
        images,
    });

    // =========================================
    // STEP 6: Start HTTP Server
    // =========================================
    let server_host = config.server_host.clone();
    let server_port = config.server_port;

    info!("🌐 Starting HTTP server on {}:{}", server_host, server_port);

    HttpServer::new(move || {
        App::new()
            // Attach shared application state
            .app_data(web::Data::new(app_state.clone()))
            // Add logging middleware
            .wrap(middleware::Logger::default())
            // Configure API routes, gating the protected scopes
            .configure(|cfg| api::configure_routes(cfg, &tokens))
    })
    .bind(format!("{}:{}", server_host, server_port))?
    .run()
    .await
}
