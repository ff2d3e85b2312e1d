//! Step collection: scenario text to executable steps.
//!
//! # Invariants
//! - Output has exactly one `Step` per scenario step line, in order.
//! - When several candidates match, the highest priority wins; ties go to
//!   the candidate listed first.

use crate::configuration::Configuration;
use crate::model::step_type::StepType;
use crate::model::story::Scenario;
use crate::steps::candidate::StepCandidate;
use std::fmt::Debug;

/// A step ready for execution (or reporting).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Matched {
        text: String,
        pattern: String,
        method: String,
        /// `(name, value)` pairs in placeholder order.
        parameters: Vec<(String, String)>,
    },
    Pending {
        text: String,
    },
    Ignorable {
        text: String,
    },
}

impl Step {
    /// Step text as written in the story.
    pub fn text(&self) -> &str {
        match self {
            Self::Matched { text, .. } | Self::Pending { text } | Self::Ignorable { text } => text,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

/// Turns matched and unmatched step candidates into executable steps.
pub trait StepCollector: Debug + Send + Sync {
    fn collect_steps(
        &self,
        configuration: &Configuration,
        candidates: &[StepCandidate],
        scenario: &Scenario,
    ) -> Vec<Step>;
}

/// Collector that marks steps without a matching candidate as pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkUnmatchedStepsAsPending;

impl StepCollector for MarkUnmatchedStepsAsPending {
    fn collect_steps(
        &self,
        configuration: &Configuration,
        candidates: &[StepCandidate],
        scenario: &Scenario,
    ) -> Vec<Step> {
        let keywords = configuration.keywords();
        let monitor = configuration.step_monitor();
        let paranamer = configuration.paranamer();

        let mut prioritised: Vec<&StepCandidate> = candidates.iter().collect();
        prioritised.sort_by_key(|candidate| std::cmp::Reverse(candidate.priority()));

        let mut previous_type = None;
        let mut steps = Vec::with_capacity(scenario.steps.len());
        for text in &scenario.steps {
            let step_type = keywords.step_type_of(text).map(|(step_type, _)| step_type);
            if step_type == Some(StepType::Ignorable) {
                steps.push(Step::Ignorable { text: text.clone() });
                continue;
            }

            let found = prioritised
                .iter()
                .find(|candidate| candidate.matches(text, previous_type, &keywords, &*monitor));
            let step = match found {
                Some(candidate) => {
                    let names = candidate.parameter_names(&*paranamer);
                    let parameters = candidate
                        .parameter_values(text, &keywords)
                        .into_iter()
                        .enumerate()
                        .map(|(index, value)| {
                            let name = names
                                .get(index)
                                .cloned()
                                .unwrap_or_else(|| format!("arg{index}"));
                            (name, value)
                        })
                        .collect();
                    Step::Matched {
                        text: text.clone(),
                        pattern: candidate.pattern().to_string(),
                        method: candidate.method().to_string(),
                        parameters,
                    }
                }
                None => Step::Pending { text: text.clone() },
            };
            steps.push(step);

            if let Some(step_type) = step_type.filter(|step_type| *step_type != StepType::And) {
                previous_type = Some(step_type);
            }
        }
        steps
    }
}
