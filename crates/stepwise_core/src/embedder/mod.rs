//! Execution controls consumed by the pipeline driver.
//!
//! # Responsibility
//! - Bundle run-wide toggles (batching, skipping, view generation, threads).
//!
//! # Invariants
//! - Values are stored verbatim; interpretation belongs to the driver.

pub mod controls;
