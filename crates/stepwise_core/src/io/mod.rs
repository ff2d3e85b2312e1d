//! Story location and loading.
//!
//! # Responsibility
//! - Derive logical story paths from story names.
//! - Fetch raw story text by logical path.
//!
//! # Invariants
//! - Logical paths always use `/` separators, independent of platform.

pub mod path_resolver;
pub mod story_loader;
