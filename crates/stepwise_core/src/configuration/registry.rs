//! Slot bindings and reporter resolution.

use crate::embedder::controls::EmbedderControls;
use crate::failures::{
    FailureStrategy, PassingUponPendingStep, PendingStepStrategy, RethrowingFailure,
};
use crate::i18n::keywords::{Keywords, KeywordsSource};
use crate::io::path_resolver::{StoryPathResolver, UnderscoredCamelCaseResolver};
use crate::io::story_loader::{LoadFromResources, StoryLoader};
use crate::parsers::step_pattern::{RegexPrefixCapturingPatternParser, StepPatternParser};
use crate::parsers::story_parser::{RegexStoryParser, StoryParser};
use crate::reporters::builder::{ReporterBuilder, StoryReporterBuilder};
use crate::reporters::print_stream::ConsoleOutput;
use crate::reporters::renderer::{ReportRenderer, TemplateReportRenderer};
use crate::reporters::sink::PrintSink;
use crate::reporters::stepdoc_reporter::{PrintStreamStepdocReporter, StepdocReporter};
use crate::reporters::story_reporter::StoryReporter;
use crate::steps::collector::{MarkUnmatchedStepsAsPending, StepCollector};
use crate::steps::converters::ParameterConverters;
use crate::steps::monitor::{SilentStepMonitor, StepMonitor};
use crate::steps::paranamer::{NullParanamer, Paranamer};
use crate::steps::stepdoc::{DefaultStepdocGenerator, StepdocGenerator};
use std::collections::HashMap;
use std::sync::Arc;

/// Per-story-path reporter overrides.
pub type StoryReporters = HashMap<String, Arc<dyn StoryReporter>>;

/// Mutable aggregate of collaborator bindings.
///
/// Configure with the `use_*` overrides, then share `&Configuration` with the
/// pipeline. Overrides return `&mut Self` so they chain:
///
/// ```
/// use std::sync::Arc;
/// use stepwise_core::{Configuration, FailingUponPendingStep, SilentlyAbsorbingFailure};
///
/// let mut configuration = Configuration::new();
/// configuration
///     .use_failure_strategy(Arc::new(SilentlyAbsorbingFailure))
///     .use_pending_step_strategy(Arc::new(FailingUponPendingStep))
///     .do_dry_run(true);
/// assert!(configuration.dry_run());
/// ```
#[derive(Debug)]
pub struct Configuration {
    keywords: KeywordsSource,
    step_collector: Arc<dyn StepCollector>,
    story_parser: Arc<dyn StoryParser>,
    story_loader: Arc<dyn StoryLoader>,
    story_path_resolver: Arc<dyn StoryPathResolver>,
    failure_strategy: Arc<dyn FailureStrategy>,
    pending_step_strategy: Arc<dyn PendingStepStrategy>,
    default_story_reporter: Arc<dyn StoryReporter>,
    story_reporters: StoryReporters,
    story_reporter_builder: Arc<dyn ReporterBuilder>,
    step_pattern_parser: Arc<dyn StepPatternParser>,
    step_monitor: Arc<dyn StepMonitor>,
    paranamer: Arc<dyn Paranamer>,
    parameter_converters: Arc<ParameterConverters>,
    dry_run: bool,
    report_renderer: Arc<dyn ReportRenderer>,
    stepdoc_generator: Arc<dyn StepdocGenerator>,
    stepdoc_reporter: Arc<dyn StepdocReporter>,
    embedder_controls: EmbedderControls,
}

impl Default for Configuration {
    fn default() -> Self {
        let keywords = KeywordsSource::new(Arc::new(Keywords::english()));
        let story_parser = Arc::new(RegexStoryParser::bound_to(keywords.clone()));
        let default_story_reporter = Arc::new(ConsoleOutput::bound_to(keywords.clone()));
        let stepdoc_reporter = Arc::new(PrintStreamStepdocReporter::bound_to(
            PrintSink::stdout(),
            keywords.clone(),
        ));
        Self {
            keywords,
            step_collector: Arc::new(MarkUnmatchedStepsAsPending),
            story_parser,
            story_loader: Arc::new(LoadFromResources::default()),
            story_path_resolver: Arc::new(UnderscoredCamelCaseResolver::default()),
            failure_strategy: Arc::new(RethrowingFailure),
            pending_step_strategy: Arc::new(PassingUponPendingStep),
            default_story_reporter,
            story_reporters: HashMap::new(),
            story_reporter_builder: Arc::new(StoryReporterBuilder::new()),
            step_pattern_parser: Arc::new(RegexPrefixCapturingPatternParser::default()),
            step_monitor: Arc::new(SilentStepMonitor),
            paranamer: Arc::new(NullParanamer),
            parameter_converters: Arc::new(ParameterConverters::new()),
            dry_run: false,
            report_renderer: Arc::new(TemplateReportRenderer::default()),
            stepdoc_generator: Arc::new(DefaultStepdocGenerator),
            stepdoc_reporter,
            embedder_controls: EmbedderControls::default(),
        }
    }
}

impl Configuration {
    /// Registry with every slot bound to its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current keyword set.
    pub fn keywords(&self) -> Arc<Keywords> {
        self.keywords.get()
    }

    /// Read handle on the keyword slot; collaborators bound to it follow
    /// `use_keywords`.
    pub fn keywords_source(&self) -> KeywordsSource {
        self.keywords.clone()
    }

    pub fn step_collector(&self) -> Arc<dyn StepCollector> {
        Arc::clone(&self.step_collector)
    }

    pub fn story_parser(&self) -> Arc<dyn StoryParser> {
        Arc::clone(&self.story_parser)
    }

    pub fn story_loader(&self) -> Arc<dyn StoryLoader> {
        Arc::clone(&self.story_loader)
    }

    pub fn story_path_resolver(&self) -> Arc<dyn StoryPathResolver> {
        Arc::clone(&self.story_path_resolver)
    }

    pub fn failure_strategy(&self) -> Arc<dyn FailureStrategy> {
        Arc::clone(&self.failure_strategy)
    }

    pub fn pending_step_strategy(&self) -> Arc<dyn PendingStepStrategy> {
        Arc::clone(&self.pending_step_strategy)
    }

    /// Reporter used for paths without an override.
    pub fn story_reporter(&self) -> Arc<dyn StoryReporter> {
        Arc::clone(&self.default_story_reporter)
    }

    /// Per-path override for `story_path`, else the current default reporter.
    pub fn story_reporter_for(&self, story_path: &str) -> Arc<dyn StoryReporter> {
        self.story_reporters
            .get(story_path)
            .map(Arc::clone)
            .unwrap_or_else(|| self.story_reporter())
    }

    /// Registered per-path overrides.
    pub fn story_reporters(&self) -> &StoryReporters {
        &self.story_reporters
    }

    pub fn story_reporter_builder(&self) -> Arc<dyn ReporterBuilder> {
        Arc::clone(&self.story_reporter_builder)
    }

    pub fn step_pattern_parser(&self) -> Arc<dyn StepPatternParser> {
        Arc::clone(&self.step_pattern_parser)
    }

    pub fn step_monitor(&self) -> Arc<dyn StepMonitor> {
        Arc::clone(&self.step_monitor)
    }

    pub fn paranamer(&self) -> Arc<dyn Paranamer> {
        Arc::clone(&self.paranamer)
    }

    pub fn parameter_converters(&self) -> Arc<ParameterConverters> {
        Arc::clone(&self.parameter_converters)
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn report_renderer(&self) -> Arc<dyn ReportRenderer> {
        Arc::clone(&self.report_renderer)
    }

    pub fn stepdoc_generator(&self) -> Arc<dyn StepdocGenerator> {
        Arc::clone(&self.stepdoc_generator)
    }

    pub fn stepdoc_reporter(&self) -> Arc<dyn StepdocReporter> {
        Arc::clone(&self.stepdoc_reporter)
    }

    pub fn embedder_controls(&self) -> &EmbedderControls {
        &self.embedder_controls
    }

    /// Replaces the keyword set; collaborators bound to `keywords_source`,
    /// including the default parser and reporters, see it too.
    pub fn use_keywords(&mut self, keywords: Arc<Keywords>) -> &mut Self {
        self.keywords.replace(keywords);
        self
    }

    pub fn use_step_collector(&mut self, step_collector: Arc<dyn StepCollector>) -> &mut Self {
        self.step_collector = step_collector;
        self
    }

    pub fn use_story_parser(&mut self, story_parser: Arc<dyn StoryParser>) -> &mut Self {
        self.story_parser = story_parser;
        self
    }

    pub fn use_story_loader(&mut self, story_loader: Arc<dyn StoryLoader>) -> &mut Self {
        self.story_loader = story_loader;
        self
    }

    pub fn use_story_path_resolver(
        &mut self,
        story_path_resolver: Arc<dyn StoryPathResolver>,
    ) -> &mut Self {
        self.story_path_resolver = story_path_resolver;
        self
    }

    pub fn use_failure_strategy(
        &mut self,
        failure_strategy: Arc<dyn FailureStrategy>,
    ) -> &mut Self {
        self.failure_strategy = failure_strategy;
        self
    }

    pub fn use_pending_step_strategy(
        &mut self,
        pending_step_strategy: Arc<dyn PendingStepStrategy>,
    ) -> &mut Self {
        self.pending_step_strategy = pending_step_strategy;
        self
    }

    /// Replaces the default reporter; per-path overrides are kept.
    pub fn use_story_reporter(&mut self, story_reporter: Arc<dyn StoryReporter>) -> &mut Self {
        self.default_story_reporter = story_reporter;
        self
    }

    /// Binds `story_reporter` to one path, replacing any earlier binding.
    pub fn use_story_reporter_for(
        &mut self,
        story_path: impl Into<String>,
        story_reporter: Arc<dyn StoryReporter>,
    ) -> &mut Self {
        self.story_reporters.insert(story_path.into(), story_reporter);
        self
    }

    /// Merges `story_reporters` into the per-path map. Existing keys are
    /// replaced, keys absent from the argument are left alone.
    pub fn use_story_reporters(&mut self, story_reporters: StoryReporters) -> &mut Self {
        self.story_reporters.extend(story_reporters);
        self
    }

    pub fn use_story_reporter_builder(
        &mut self,
        story_reporter_builder: Arc<dyn ReporterBuilder>,
    ) -> &mut Self {
        self.story_reporter_builder = story_reporter_builder;
        self
    }

    pub fn use_step_pattern_parser(
        &mut self,
        step_pattern_parser: Arc<dyn StepPatternParser>,
    ) -> &mut Self {
        self.step_pattern_parser = step_pattern_parser;
        self
    }

    pub fn use_step_monitor(&mut self, step_monitor: Arc<dyn StepMonitor>) -> &mut Self {
        self.step_monitor = step_monitor;
        self
    }

    pub fn use_paranamer(&mut self, paranamer: Arc<dyn Paranamer>) -> &mut Self {
        self.paranamer = paranamer;
        self
    }

    pub fn use_parameter_converters(
        &mut self,
        parameter_converters: Arc<ParameterConverters>,
    ) -> &mut Self {
        self.parameter_converters = parameter_converters;
        self
    }

    pub fn do_dry_run(&mut self, dry_run: bool) -> &mut Self {
        self.dry_run = dry_run;
        self
    }

    pub fn use_report_renderer(&mut self, report_renderer: Arc<dyn ReportRenderer>) -> &mut Self {
        self.report_renderer = report_renderer;
        self
    }

    pub fn use_stepdoc_generator(
        &mut self,
        stepdoc_generator: Arc<dyn StepdocGenerator>,
    ) -> &mut Self {
        self.stepdoc_generator = stepdoc_generator;
        self
    }

    pub fn use_stepdoc_reporter(
        &mut self,
        stepdoc_reporter: Arc<dyn StepdocReporter>,
    ) -> &mut Self {
        self.stepdoc_reporter = stepdoc_reporter;
        self
    }

    pub fn use_embedder_controls(&mut self, embedder_controls: EmbedderControls) -> &mut Self {
        self.embedder_controls = embedder_controls;
        self
    }

    /// Builds reporters for `story_paths` with the current builder and merges
    /// them into the per-path map. Text reporters follow the keyword slot.
    pub fn build_reporters<I, S>(&mut self, story_paths: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let story_paths: Vec<String> = story_paths
            .into_iter()
            .map(|story_path| story_path.as_ref().to_string())
            .collect();
        let built = self
            .story_reporter_builder
            .build(&story_paths, &self.keywords);
        self.use_story_reporters(built)
    }

    /// Single-path form of `build_reporters`.
    pub fn build_reporter(&mut self, story_path: &str) -> &mut Self {
        self.build_reporters([story_path])
    }
}
