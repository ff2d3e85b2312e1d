//! Story reporting: event sinks, builders and view rendering.
//!
//! # Responsibility
//! - Define the story event contract (`StoryReporter`) and its outputs.
//! - Build per-story reporters for a batch of story paths.
//! - Render accumulated report files into a browsable view.
//! - Report stepdoc catalogs.
//!
//! # Invariants
//! - Reporters never fail the run: output errors are logged and dropped.

pub mod builder;
pub mod print_stream;
pub mod renderer;
pub mod sink;
pub mod statistics;
pub mod stepdoc_reporter;
pub mod story_reporter;
