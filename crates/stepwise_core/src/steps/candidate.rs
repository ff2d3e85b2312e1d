//! Step candidates and in-memory step definitions.

use crate::i18n::keywords::Keywords;
use crate::model::step_type::StepType;
use crate::parsers::step_pattern::{PatternError, StepMatcher, StepPatternParser};
use crate::steps::monitor::StepMonitor;
use crate::steps::paranamer::Paranamer;
use std::fmt::Debug;
use std::sync::Arc;

/// One step definition compiled against the configured pattern parser.
#[derive(Debug, Clone)]
pub struct StepCandidate {
    matcher: StepMatcher,
    method: String,
    priority: i32,
}

impl StepCandidate {
    pub fn new(
        step_type: StepType,
        pattern: &str,
        method: impl Into<String>,
        priority: i32,
        parser: &dyn StepPatternParser,
    ) -> Result<Self, PatternError> {
        Ok(Self {
            matcher: parser.parse_step(step_type, pattern)?,
            method: method.into(),
            priority,
        })
    }

    pub fn step_type(&self) -> StepType {
        self.matcher.step_type()
    }

    pub fn pattern(&self) -> &str {
        self.matcher.pattern()
    }

    /// Step method signature or name this candidate dispatches to.
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn matcher(&self) -> &StepMatcher {
        &self.matcher
    }

    /// Whether `step` (with its keyword) is handled by this candidate.
    ///
    /// `previous_type` is the type of the last non-`And` step and is used to
    /// resolve `And` steps. Only attempts for the right step type reach the
    /// pattern and the monitor.
    pub fn matches(
        &self,
        step: &str,
        previous_type: Option<StepType>,
        keywords: &Keywords,
        monitor: &dyn StepMonitor,
    ) -> bool {
        let Some((step_type, rest)) = keywords.step_type_of(step) else {
            return false;
        };
        let effective_type = match step_type {
            StepType::And => match previous_type {
                Some(previous) => previous,
                None => return false,
            },
            other => other,
        };
        if effective_type != self.step_type() {
            return false;
        }

        let matched = self.matcher.matches(rest);
        monitor.step_matches_pattern(step, matched, self.pattern());
        matched
    }

    /// Argument values captured from `step`, empty when it does not match.
    pub fn parameter_values(&self, step: &str, keywords: &Keywords) -> Vec<String> {
        keywords
            .step_type_of(step)
            .and_then(|(_, rest)| self.matcher.parameters(rest))
            .unwrap_or_default()
    }

    /// Parameter names for dispatch.
    ///
    /// Names declared in the method signature (as recovered by `paranamer`)
    /// take precedence over placeholder names from the pattern.
    pub fn parameter_names(&self, paranamer: &dyn Paranamer) -> Vec<String> {
        let declared = paranamer.lookup_parameter_names(&self.method);
        if declared.is_empty() {
            self.matcher.parameter_names().to_vec()
        } else {
            declared
        }
    }
}

/// Supplies step candidates, e.g. one group of step definitions.
pub trait CandidateSteps: Debug + Send + Sync {
    fn list_candidates(&self) -> Vec<StepCandidate>;
}

/// Named group of step definitions registered in code.
#[derive(Debug, Clone)]
pub struct StepDefinitions {
    name: String,
    parser: Arc<dyn StepPatternParser>,
    candidates: Vec<StepCandidate>,
}

impl StepDefinitions {
    /// Creates an empty group compiling patterns with `parser`.
    pub fn new(name: impl Into<String>, parser: Arc<dyn StepPatternParser>) -> Self {
        Self {
            name: name.into(),
            parser,
            candidates: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers one definition with an explicit priority.
    pub fn add(
        &mut self,
        step_type: StepType,
        pattern: &str,
        method: impl Into<String>,
        priority: i32,
    ) -> Result<&mut Self, PatternError> {
        let candidate = StepCandidate::new(step_type, pattern, method, priority, &*self.parser)?;
        self.candidates.push(candidate);
        Ok(self)
    }

    pub fn given(
        &mut self,
        pattern: &str,
        method: impl Into<String>,
    ) -> Result<&mut Self, PatternError> {
        self.add(StepType::Given, pattern, method, 0)
    }

    pub fn when(
        &mut self,
        pattern: &str,
        method: impl Into<String>,
    ) -> Result<&mut Self, PatternError> {
        self.add(StepType::When, pattern, method, 0)
    }

    pub fn then(
        &mut self,
        pattern: &str,
        method: impl Into<String>,
    ) -> Result<&mut Self, PatternError> {
        self.add(StepType::Then, pattern, method, 0)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl CandidateSteps for StepDefinitions {
    fn list_candidates(&self) -> Vec<StepCandidate> {
        self.candidates.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{CandidateSteps, StepCandidate, StepDefinitions};
    use crate::i18n::keywords::Keywords;
    use crate::model::step_type::StepType;
    use crate::parsers::step_pattern::RegexPrefixCapturingPatternParser;
    use crate::reporters::sink::{CapturedOutput, PrintSink};
    use crate::steps::monitor::{PrintStreamStepMonitor, SilentStepMonitor};
    use crate::steps::paranamer::{NullParanamer, SignatureParanamer};
    use std::sync::Arc;

    fn candidate(step_type: StepType, pattern: &str, method: &str) -> StepCandidate {
        StepCandidate::new(
            step_type,
            pattern,
            method,
            0,
            &RegexPrefixCapturingPatternParser::default(),
        )
        .expect("pattern should compile")
    }

    #[test]
    fn matches_only_its_own_step_type() {
        let keywords = Keywords::english();
        let given = candidate(StepType::Given, "a $colour car", "fn a_car(colour: String)");

        assert!(given.matches("Given a red car", None, &keywords, &SilentStepMonitor));
        assert!(!given.matches("When a red car", None, &keywords, &SilentStepMonitor));
        assert!(!given.matches("a red car", None, &keywords, &SilentStepMonitor));
    }

    #[test]
    fn and_steps_take_the_previous_type() {
        let keywords = Keywords::english();
        let given = candidate(StepType::Given, "a $colour car", "a_car");

        assert!(given.matches(
            "And a blue car",
            Some(StepType::Given),
            &keywords,
            &SilentStepMonitor
        ));
        assert!(!given.matches(
            "And a blue car",
            Some(StepType::Then),
            &keywords,
            &SilentStepMonitor
        ));
        assert!(!given.matches("And a blue car", None, &keywords, &SilentStepMonitor));
    }

    #[test]
    fn match_attempts_reach_the_monitor() {
        let keywords = Keywords::english();
        let output = CapturedOutput::new();
        let monitor = PrintStreamStepMonitor::new(PrintSink::writer(output.clone()));
        let given = candidate(StepType::Given, "a $colour car", "a_car");

        given.matches("Given a red bike", None, &keywords, &monitor);
        assert!(output.contents().contains("does not match pattern 'a $colour car'"));
    }

    #[test]
    fn parameter_names_prefer_declared_signature() {
        let keywords = Keywords::english();
        let given = candidate(StepType::Given, "a $c car", "fn a_car(colour: String)");

        assert_eq!(given.parameter_values("Given a red car", &keywords), vec!["red"]);
        assert_eq!(given.parameter_names(&NullParanamer), vec!["c"]);
        assert_eq!(given.parameter_names(&SignatureParanamer), vec!["colour"]);
    }

    #[test]
    fn step_definitions_collect_candidates() {
        let mut steps = StepDefinitions::new(
            "car steps",
            Arc::new(RegexPrefixCapturingPatternParser::default()),
        );
        steps
            .given("a $colour car", "a_car")
            .and_then(|steps| steps.when("I drive $miles miles", "drive"))
            .and_then(|steps| steps.then("I arrive", "arrive"))
            .expect("definitions should compile");

        assert_eq!(steps.name(), "car steps");
        assert_eq!(steps.len(), 3);
        let types: Vec<_> = steps
            .list_candidates()
            .iter()
            .map(|candidate| candidate.step_type())
            .collect();
        assert_eq!(types, vec![StepType::Given, StepType::When, StepType::Then]);
    }
}
