//! # Database Module
//!
//! This module handles all database operations for the vendor backend.
//! We use PostgreSQL for storing vendor records.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  DATABASE LAYER                      │
//! │                                                      │
//! │  ┌──────────────────────────────────────────────┐   │
//! │  │             Connection Pool                   │   │
//! │  │            (deadpool-postgres)                │   │
//! │  └──────────────────────────────────────────────┘   │
//! │                        │                             │
//! │                        ▼                             │
//! │                 ┌────────────┐                       │
//! │                 │  vendors   │                       │
//! │                 │   table    │                       │
//! │                 └────────────┘                       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Uniqueness of `email` and `tax_id` is enforced by constraints in the
//! schema, never by a read-then-insert check in application code.

pub mod models;
pub mod queries;

use deadpool_postgres::{Config, Pool, Runtime};
use thiserror::Error;
use tokio_postgres::{Config as TokioConfig, NoTls};
use tracing::info;

/// The schema migration, embedded at compile time so the binary
/// does not depend on the working directory at startup.
const INITIAL_SCHEMA: &str = include_str!("../../migrations/001_initial_schema.sql");

/// Database-related errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to connect to the database
    #[error("Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryError(#[from] tokio_postgres::Error),

    /// Migration failed
    #[error("Migration failed: {0}")]
    MigrationError(String),

    /// A unique constraint was violated; the field names which one
    #[error("Duplicate value for unique field: {0}")]
    Duplicate(String),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

/// Database connection wrapper.
///
/// This struct wraps the connection pool and provides
/// methods for common database operations.
///
/// ## Usage
///
/// ```rust,ignore
/// let db = Database::connect("postgres://...").await?;
/// let vendor = queries::get_vendor_by_email(db.pool(), "a@b.com").await?;
/// ```
#[derive(Clone)]
pub struct Database {
    /// The connection pool
    pool: Pool,
}

impl Database {
    /// Connect to the PostgreSQL database.
    ///
    /// Creates a connection pool with sensible defaults (max 10
    /// connections) and verifies connectivity with a probe query.
    ///
    /// ## Arguments
    ///
    /// * `database_url` - PostgreSQL connection string
    ///
    /// ## Returns
    ///
    /// * `Ok(Database)` - Connected successfully
    /// * `Err(DatabaseError)` - Connection failed
    pub async fn connect(database_url: &str) -> Result<Self, DatabaseError> {
        info!("Connecting to database...");

        // Parse the connection string using tokio_postgres::Config
        let tokio_config = database_url
            .parse::<TokioConfig>()
            .map_err(|e| DatabaseError::ConfigError(format!("Invalid database URL: {}", e)))?;

        // Convert to deadpool config
        let mut config = Config::new();

        if let Some(dbname) = tokio_config.get_dbname() {
            config.dbname = Some(dbname.to_string());
        }
        if let Some(user) = tokio_config.get_user() {
            config.user = Some(user.to_string());
        }
        if let Some(password) = tokio_config.get_password() {
            // Password is &[u8], convert to String
            config.password = Some(String::from_utf8_lossy(password).to_string());
        }
        if let Some(host) = tokio_config.get_hosts().first() {
            if let tokio_postgres::config::Host::Tcp(host_str) = host {
                config.host = Some(host_str.clone());
            }
        }
        if let Some(port) = tokio_config.get_ports().first() {
            config.port = Some(*port);
        }

        // Set pool size
        config.pool = Some(deadpool_postgres::PoolConfig {
            max_size: 10,
            ..Default::default()
        });

        // Create pool
        let pool = config
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        // Test connection
        let client = pool
            .get()
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        // Simple query to verify connection
        client
            .query("SELECT 1", &[])
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        info!("Database connection established");

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// The schema script uses `IF NOT EXISTS` guards throughout, so
    /// re-running it on an already-migrated database is a no-op.
    pub async fn run_migrations(&self) -> Result<(), DatabaseError> {
        info!("Running database migrations...");

        let client = self
            .pool
            .get()
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        client
            .batch_execute(INITIAL_SCHEMA)
            .await
            .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

        info!("Migrations completed successfully");
        Ok(())
    }

    /// Pool pointed at an unreachable server, for routing tests whose
    /// requests are rejected before any query runs.
    #[cfg(test)]
    pub(crate) fn disconnected_for_tests() -> Self {
        let mut config = Config::new();
        config.host = Some("127.0.0.1".to_string());
        config.port = Some(1);
        config.dbname = Some("unused".to_string());
        config.user = Some("unused".to_string());
        let pool = config
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .expect("static test pool config");
        Self { pool }
    }

    /// Get a reference to the connection pool.
    ///
    /// Use this when you need direct access to the pool
    /// for custom queries.
    pub fn pool(&self) -> &Pool {
        &self.pool
    }
}

// Re-export commonly used items
pub use models::*;
