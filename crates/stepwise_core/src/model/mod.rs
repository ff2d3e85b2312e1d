//! Story domain model shared by parsers, collectors and reporters.
//!
//! # Responsibility
//! - Define the structured shape a story takes once parsed from raw text.
//! - Keep the model free of execution state so it can be reported as-is.
//!
//! # Invariants
//! - A parsed `Story` always has at least one `Scenario`.
//! - Step text is stored verbatim, including its leading keyword.

pub mod step_type;
pub mod story;
