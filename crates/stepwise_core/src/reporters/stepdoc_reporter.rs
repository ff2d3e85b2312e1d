//! Stepdoc catalog output.

use crate::i18n::keywords::{Keywords, KeywordsSource};
use crate::model::step_type::StepType;
use crate::reporters::sink::PrintSink;
use crate::steps::stepdoc::Stepdoc;
use std::fmt::Debug;
use std::sync::Arc;

/// Renders stepdocs to an output channel.
pub trait StepdocReporter: Debug + Send + Sync {
    fn stepdocs(&self, stepdocs: &[Stepdoc]);

    /// Reports which stepdocs match one step.
    fn matching_stepdocs(&self, step: &str, matching: &[Stepdoc]);
}

/// Prints stepdocs as `<keyword> <pattern>` followed by the method.
#[derive(Debug)]
pub struct PrintStreamStepdocReporter {
    sink: PrintSink,
    keywords: KeywordsSource,
}

impl Default for PrintStreamStepdocReporter {
    fn default() -> Self {
        Self::new(PrintSink::stdout())
    }
}

impl PrintStreamStepdocReporter {
    pub fn new(sink: PrintSink) -> Self {
        Self::bound_to(sink, KeywordsSource::default())
    }

    /// Reporter following the current keywords of `source`.
    pub fn bound_to(sink: PrintSink, source: KeywordsSource) -> Self {
        Self {
            sink,
            keywords: source,
        }
    }

    /// Pins a fixed keyword set.
    pub fn with_keywords(mut self, keywords: Arc<Keywords>) -> Self {
        self.keywords = KeywordsSource::new(keywords);
        self
    }

    fn print_stepdoc(&self, stepdoc: &Stepdoc) {
        let keywords = self.keywords.get();
        let keyword = match stepdoc.step_type {
            StepType::Given => keywords.given(),
            StepType::When => keywords.when(),
            StepType::Then => keywords.then(),
            StepType::And => keywords.and(),
            StepType::Ignorable => keywords.ignorable(),
        };
        self.sink
            .write_line(&format!("{keyword} {}", stepdoc.pattern));
        self.sink.write_line(&format!("    {}", stepdoc.method));
    }
}

impl StepdocReporter for PrintStreamStepdocReporter {
    fn stepdocs(&self, stepdocs: &[Stepdoc]) {
        if stepdocs.is_empty() {
            self.sink.write_line("No stepdocs found");
        }
        stepdocs.iter().for_each(|stepdoc| self.print_stepdoc(stepdoc));
        self.sink.flush();
    }

    fn matching_stepdocs(&self, step: &str, matching: &[Stepdoc]) {
        if matching.is_empty() {
            self.sink
                .write_line(&format!("Step '{step}' is not matched by any pattern"));
        } else {
            self.sink
                .write_line(&format!("Step '{step}' is matched by patterns:"));
            matching.iter().for_each(|stepdoc| self.print_stepdoc(stepdoc));
        }
        self.sink.flush();
    }
}
