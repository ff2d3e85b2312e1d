//! Localized story keywords.
//!
//! # Responsibility
//! - Provide the lexical keywords a story parser and reporters use.
//! - Bundle keyword sets for the supported locales.
//!
//! # Invariants
//! - A `Keywords` value always carries every keyword; construction fails
//!   instead of leaving one blank.

pub mod keywords;
