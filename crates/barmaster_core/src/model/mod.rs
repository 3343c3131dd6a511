//! Typed domain records for the bar back office.
//!
//! # Responsibility
//! - Define the shapes the core works with once sheet rows are decoded.
//! - Keep loosely-typed cell data out of service logic.
//!
//! # Invariants
//! - A `Job` held by the core always satisfies `Job::validate()`.
//! - Recipe quantities are always a `Quantity` variant, never raw cells.

pub mod job;
pub mod recipe;
