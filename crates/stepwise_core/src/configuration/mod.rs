//! Runtime configuration registry.
//!
//! # Responsibility
//! - Hold the current binding of every pluggable collaborator.
//! - Resolve story reporters per story path at read time.
//!
//! # Invariants
//! - Every slot is bound from construction on; there is no unset state.
//! - Overriding one slot never rewires another.
//!
//! # See also
//! - `steps::collector` for a collaborator that reads the registry.

pub mod registry;

pub use registry::Configuration;
