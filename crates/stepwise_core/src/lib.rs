//! Configuration registry and default collaborators of the stepwise
//! behaviour-driven story engine.
//! The registry is the single place where collaborator choices are made.

pub mod configuration;
pub mod embedder;
pub mod failures;
pub mod i18n;
pub mod io;
pub mod logging;
pub mod model;
pub mod parsers;
pub mod reporters;
pub mod steps;

pub use configuration::registry::{Configuration, StoryReporters};
pub use embedder::controls::{ControlsError, EmbedderControls};
pub use failures::{
    FailingUponPendingStep, FailureStrategy, PassingUponPendingStep, PendingStepFound,
    PendingStepStrategy, RethrowingFailure, SilentlyAbsorbingFailure, StepFailure,
};
pub use i18n::keywords::{Keywords, KeywordsError, KeywordsSource};
pub use io::path_resolver::{
    CasePreservingResolver, StoryPathResolver, UnderscoredCamelCaseResolver,
};
pub use io::story_loader::{LoadFromMemory, LoadFromResources, StoryLoadError, StoryLoader};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::step_type::StepType;
pub use model::story::{ExamplesTable, Narrative, Scenario, Story};
pub use parsers::step_pattern::{
    PatternError, RegexPrefixCapturingPatternParser, StepMatcher, StepPatternParser,
};
pub use parsers::story_parser::{RegexStoryParser, StoryParser};
pub use reporters::builder::{Format, ReporterBuilder, StoryReporterBuilder};
pub use reporters::print_stream::{ConsoleOutput, PrintStreamOutput};
pub use reporters::renderer::{RenderError, RenderedView, ReportRenderer, TemplateReportRenderer};
pub use reporters::sink::{CapturedOutput, PrintSink};
pub use reporters::statistics::{PostStoryStatisticsCollector, StoryStatistics};
pub use reporters::stepdoc_reporter::{PrintStreamStepdocReporter, StepdocReporter};
pub use reporters::story_reporter::{DelegatingStoryReporter, NullStoryReporter, StoryReporter};
pub use steps::candidate::{CandidateSteps, StepCandidate, StepDefinitions};
pub use steps::collector::{MarkUnmatchedStepsAsPending, Step, StepCollector};
pub use steps::converters::{ConversionError, ParameterConverters};
pub use steps::monitor::{PrintStreamStepMonitor, SilentStepMonitor, StepMonitor};
pub use steps::paranamer::{NullParanamer, Paranamer, SignatureParanamer};
pub use steps::stepdoc::{DefaultStepdocGenerator, Stepdoc, StepdocGenerator};

/// Minimal health-check API for embedders.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
