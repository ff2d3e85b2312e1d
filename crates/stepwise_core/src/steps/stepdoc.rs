//! Stepdoc generation: a catalog of known step patterns.

use crate::model::step_type::StepType;
use crate::steps::candidate::{CandidateSteps, StepCandidate};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

/// Catalog entry for one step definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stepdoc {
    pub step_type: StepType,
    pub pattern: String,
    pub method: String,
    pub priority: i32,
}

impl From<&StepCandidate> for Stepdoc {
    fn from(candidate: &StepCandidate) -> Self {
        Self {
            step_type: candidate.step_type(),
            pattern: candidate.pattern().to_string(),
            method: candidate.method().to_string(),
            priority: candidate.priority(),
        }
    }
}

/// Produces stepdocs from candidate step suppliers.
pub trait StepdocGenerator: Debug + Send + Sync {
    fn generate(&self, candidate_steps: &[Arc<dyn CandidateSteps>]) -> Vec<Stepdoc>;
}

/// One stepdoc per candidate, sorted by step type then pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultStepdocGenerator;

impl StepdocGenerator for DefaultStepdocGenerator {
    fn generate(&self, candidate_steps: &[Arc<dyn CandidateSteps>]) -> Vec<Stepdoc> {
        let mut stepdocs: Vec<Stepdoc> = candidate_steps
            .iter()
            .flat_map(|steps| steps.list_candidates())
            .map(|candidate| Stepdoc::from(&candidate))
            .collect();
        stepdocs.sort_by(|a, b| {
            a.step_type
                .cmp(&b.step_type)
                .then_with(|| a.pattern.cmp(&b.pattern))
        });
        stepdocs
    }
}
