//! Step matching monitors.

use crate::reporters::sink::PrintSink;
use std::fmt::Debug;

/// Observes step matching for diagnostics.
pub trait StepMonitor: Debug + Send + Sync {
    fn step_matches_pattern(&self, step: &str, matches: bool, pattern: &str);

    fn converted_value_of_type(&self, _value: &str, _type_name: &str, _converted: &str) {}
}

/// Monitor that records nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SilentStepMonitor;

impl StepMonitor for SilentStepMonitor {
    fn step_matches_pattern(&self, _step: &str, _matches: bool, _pattern: &str) {}
}

/// Monitor that prints one line per match attempt and conversion.
#[derive(Debug)]
pub struct PrintStreamStepMonitor {
    sink: PrintSink,
}

impl Default for PrintStreamStepMonitor {
    fn default() -> Self {
        Self::new(PrintSink::stdout())
    }
}

impl PrintStreamStepMonitor {
    pub fn new(sink: PrintSink) -> Self {
        Self { sink }
    }
}

impl StepMonitor for PrintStreamStepMonitor {
    fn step_matches_pattern(&self, step: &str, matches: bool, pattern: &str) {
        let verdict = if matches { "matches" } else { "does not match" };
        self.sink
            .write_line(&format!("Step '{step}' {verdict} pattern '{pattern}'"));
    }

    fn converted_value_of_type(&self, value: &str, type_name: &str, converted: &str) {
        self.sink.write_line(&format!(
            "Converted value '{value}' of type '{type_name}' to '{converted}'"
        ));
    }
}
