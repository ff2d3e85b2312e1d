//! Step type classification.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Kind of a step, as introduced by its leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    Given,
    When,
    Then,
    /// Continues the type of the previous non-`And` step.
    And,
    /// Commented-out step that is reported but never matched.
    Ignorable,
}

impl StepType {
    /// Stable lower-case id used in logs and stepdocs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Given => "given",
            Self::When => "when",
            Self::Then => "then",
            Self::And => "and",
            Self::Ignorable => "ignorable",
        }
    }
}

impl Display for StepType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
