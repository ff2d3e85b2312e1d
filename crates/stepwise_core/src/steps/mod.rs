//! Step definitions, matching and parameter handling.
//!
//! # Responsibility
//! - Model step definitions as candidates compiled from patterns.
//! - Turn scenario step text into matched, pending or ignorable steps.
//! - Convert captured text arguments into typed values.
//!
//! # Invariants
//! - Candidates are only built through the configured `StepPatternParser`.
//! - Every match attempt is reported to the configured `StepMonitor`.

pub mod candidate;
pub mod collector;
pub mod converters;
pub mod monitor;
pub mod paranamer;
pub mod stepdoc;
