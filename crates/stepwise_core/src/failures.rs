//! Failure and pending-step strategies.
//!
//! # Responsibility
//! - Decide whether a failed step aborts the run.
//! - Decide whether a pending (unmatched) step counts as a failure.
//!
//! # Invariants
//! - Strategies return `Err` to propagate and `Ok(())` to continue.

use log::warn;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// A step that failed while executing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub step: String,
    pub cause: String,
}

impl StepFailure {
    pub fn new(step: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            cause: cause.into(),
        }
    }
}

impl Display for StepFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "step `{}` failed: {}", self.step, self.cause)
    }
}

impl Error for StepFailure {}

/// A step for which no matching implementation was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingStepFound {
    pub step: String,
}

impl PendingStepFound {
    pub fn new(step: impl Into<String>) -> Self {
        Self { step: step.into() }
    }
}

impl Display for PendingStepFound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "pending step: {}", self.step)
    }
}

impl Error for PendingStepFound {}

/// Propagation policy for failed steps.
pub trait FailureStrategy: Debug + Send + Sync {
    fn handle_failure(&self, failure: StepFailure) -> Result<(), StepFailure>;
}

/// Hands every failure straight back to the caller.
///
/// With several scenarios in one story, this stops the story at the first
/// failing scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RethrowingFailure;

impl FailureStrategy for RethrowingFailure {
    fn handle_failure(&self, failure: StepFailure) -> Result<(), StepFailure> {
        Err(failure)
    }
}

/// Logs the failure and lets the run continue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SilentlyAbsorbingFailure;

impl FailureStrategy for SilentlyAbsorbingFailure {
    fn handle_failure(&self, failure: StepFailure) -> Result<(), StepFailure> {
        warn!(
            "event=step_failure module=failures status=absorbed step={:?} cause={:?}",
            failure.step, failure.cause
        );
        Ok(())
    }
}

/// Policy for steps without a matching implementation.
pub trait PendingStepStrategy: Debug + Send + Sync {
    fn handle_failure(&self, pending: PendingStepFound) -> Result<(), PendingStepFound>;
}

/// Pending steps pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassingUponPendingStep;

impl PendingStepStrategy for PassingUponPendingStep {
    fn handle_failure(&self, _pending: PendingStepFound) -> Result<(), PendingStepFound> {
        Ok(())
    }
}

/// Pending steps fail, for strict runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FailingUponPendingStep;

impl PendingStepStrategy for FailingUponPendingStep {
    fn handle_failure(&self, pending: PendingStepFound) -> Result<(), PendingStepFound> {
        Err(pending)
    }
}
