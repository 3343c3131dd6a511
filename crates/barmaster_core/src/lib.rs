//! Core domain logic for the Bar Master back office.
//! This crate is the single source of truth for business invariants: the
//! recipe catalog, the inventory set, the job board claim workflow and the
//! per-session login state.

pub mod app;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use app::error::{AppError, AppResult};
pub use app::view::{Notice, Page, PageView, ViewBody};
pub use app::{Action, BarApp};
pub use config::{BarConfig, ConfigError, StorageBackend};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::job::{Job, JobId, JobStatus, JobValidationError, NewJob};
pub use model::recipe::{Ingredient, Quantity, Recipe};
pub use repo::memory_store::MemoryRecordStore;
pub use repo::record_store::{CellValue, Record, RecordStore, StoreError, StoreResult, Table};
pub use repo::sqlite_store::SqliteRecordStore;
pub use service::catalog_service::Catalog;
pub use service::credential_service::CredentialStore;
pub use service::inventory_service::{Inventory, InventoryError, InventoryResult};
pub use service::job_board::{ClaimOutcome, ClaimPolicy, JobBoard, JobError, JobResult};
pub use service::session::{Session, SessionError, SessionState};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
