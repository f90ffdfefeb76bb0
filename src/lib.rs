//! # Motorpool - Company Vehicle Registry
//!
//! Single-user, single-device record keeper for the vehicles of a company
//! motor pool.
//!
//! Motorpool provides:
//! - A SQLite-backed record store for vehicle records (owner, department,
//!   phone, plate number, model, optional photo reference)
//! - Plate-number uniqueness enforced at write time
//! - An in-memory substring filter over a loaded record list
//! - TOML configuration for the database location

pub mod config;
pub mod record;
pub mod search;
pub mod storage;
pub mod ui;

// Re-exports for convenient access
pub use record::{NewVehicle, Vehicle};
pub use search::filter;
pub use storage::VehicleStore;

/// Result type alias for Motorpool operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Motorpool operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Plate number already registered: {0}")]
    PlateTaken(String),

    #[error("Required field is empty: {field}")]
    EmptyField { field: &'static str },

    #[error("Database schema version {found} does not match expected version {expected}")]
    SchemaVersion { found: i64, expected: i64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
