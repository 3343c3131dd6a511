//! Use-case services over the row store.
//!
//! # Responsibility
//! - Turn row-level persistence into catalog/inventory/job-board operations.
//! - Own the login state machine for one interactive session.
//!
//! # Invariants
//! - Services are storage-agnostic; they only see `RecordStore`.
//! - Nothing here retries; every write is issued at most once.

pub mod catalog_service;
pub mod credential_service;
pub mod inventory_service;
pub mod job_board;
pub mod session;
