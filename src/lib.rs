//! # Medfeed: Healthcare CSV-to-MySQL ETL Pipeline
//!
//! Medfeed loads hospital, doctor, and emergency-service reference data from
//! CSV files into a MySQL database.
//!
//! ## Features
//!
//! - **Idempotent schema creation**: the three target tables are created
//!   with `CREATE TABLE IF NOT EXISTS`, safe on every process start
//! - **Typed statement builders**: inserts, updates, and deletes go through
//!   diesel over a closed per-entity field set, never string-built SQL
//! - **Tolerant ingestion**: every row is transformed and inserted
//!   independently; a bad row is logged and skipped, never fatal
//! - **Scoped connections**: each unit of work opens, commits or rolls
//!   back, and closes its own connection
//!
//! ## Example
//!
//! ```ignore
//! use medfeed::{Database, DbConfig, Pipeline};
//!
//! let config = DbConfig::from_env()?;
//! let mut pipeline = Pipeline::new(Database::new(config), "data");
//! let report = pipeline.setup_database()?;
//! println!("{report}");
//! ```

// Core modules
pub mod config;
pub mod dataset;
pub mod error;
pub mod transform;

// Database layer
pub mod db;
pub mod models;
pub mod schema;

// Load orchestration
pub mod pipeline;

// Re-export key types
pub use config::DbConfig;
pub use dataset::{load_csv, Dataset, FieldValue, Row};
pub use db::{Database, InsertRecord};
pub use error::{PipelineError, Result};
pub use models::{
    Doctor, EmergencyService, Hospital, NewDoctor, NewEmergencyService, NewHospital,
};
pub use pipeline::{LoadOutcome, LoadReport, Pipeline, RowFailure, RunState};
