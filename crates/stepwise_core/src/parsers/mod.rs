//! Story text and step pattern parsing.
//!
//! # Responsibility
//! - Turn raw story text into the structured `Story` model.
//! - Compile step definition patterns into matchers.
//!
//! # Invariants
//! - Parsers never perform I/O; text arrives through a `StoryLoader`.

pub mod step_pattern;
pub mod story_parser;
