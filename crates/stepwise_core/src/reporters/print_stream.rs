//! Plain-text story output.

use crate::failures::StepFailure;
use crate::i18n::keywords::{Keywords, KeywordsSource};
use crate::model::story::Story;
use crate::reporters::sink::PrintSink;
use crate::reporters::story_reporter::StoryReporter;
use std::path::PathBuf;
use std::sync::Arc;

/// Writes story events as readable text to a sink.
#[derive(Debug)]
pub struct PrintStreamOutput {
    sink: PrintSink,
    keywords: KeywordsSource,
}

impl PrintStreamOutput {
    pub fn new(sink: PrintSink) -> Self {
        Self::with_keywords(sink, Arc::new(Keywords::english()))
    }

    /// Output that labels step outcomes with a fixed keyword set.
    pub fn with_keywords(sink: PrintSink, keywords: Arc<Keywords>) -> Self {
        Self::bound_to(sink, KeywordsSource::new(keywords))
    }

    /// Output that labels step outcomes with the current keywords of `source`.
    pub fn bound_to(sink: PrintSink, source: KeywordsSource) -> Self {
        Self {
            sink,
            keywords: source,
        }
    }

    /// Output written to `path`, created on the first event.
    pub fn to_file(path: impl Into<PathBuf>, source: KeywordsSource) -> Self {
        Self::bound_to(PrintSink::file(path), source)
    }

    pub fn sink(&self) -> &PrintSink {
        &self.sink
    }

    fn print(&self, line: &str) {
        self.sink.write_line(line);
    }
}

impl StoryReporter for PrintStreamOutput {
    fn before_story(&self, story: &Story, given_story: bool) {
        let keywords = self.keywords.get();
        if !story.path.is_empty() {
            self.print(&format!("({})", story.path));
        }
        if !given_story && !story.description.is_empty() {
            self.print(&story.description);
        }
        if let Some(narrative) = &story.narrative {
            self.print(keywords.narrative());
            self.print(&format!("{} {}", keywords.in_order_to(), narrative.in_order_to));
            self.print(&format!("{} {}", keywords.as_a(), narrative.as_a));
            self.print(&format!("{} {}", keywords.i_want_to(), narrative.i_want_to));
        }
    }

    fn after_story(&self, _given_story: bool) {
        self.print("");
        self.sink.flush();
    }

    fn given_stories(&self, story_paths: &[String]) {
        let keywords = self.keywords.get();
        self.print(&format!("{} {}", keywords.given_stories(), story_paths.join(", ")));
    }

    fn before_scenario(&self, title: &str) {
        self.print("");
        self.print(&format!("{} {}", self.keywords.get().scenario(), title));
    }

    fn successful(&self, step: &str) {
        self.print(step);
    }

    fn ignorable(&self, step: &str) {
        self.print(step);
    }

    fn pending(&self, step: &str) {
        self.print(&format!("{step} ({})", self.keywords.get().pending()));
    }

    fn not_performed(&self, step: &str) {
        self.print(&format!("{step} ({})", self.keywords.get().not_performed()));
    }

    fn failed(&self, step: &str, failure: &StepFailure) {
        self.print(&format!("{step} ({})", self.keywords.get().failed()));
        self.print(&format!("  {}", failure.cause));
    }

    fn dry_run(&self) {
        self.print(self.keywords.get().dry_run());
    }
}

/// Story output on standard out.
#[derive(Debug)]
pub struct ConsoleOutput {
    output: PrintStreamOutput,
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleOutput {
    pub fn new() -> Self {
        Self::with_keywords(Arc::new(Keywords::english()))
    }

    pub fn with_keywords(keywords: Arc<Keywords>) -> Self {
        Self::bound_to(KeywordsSource::new(keywords))
    }

    /// Console output following the current keywords of `source`.
    pub fn bound_to(source: KeywordsSource) -> Self {
        Self {
            output: PrintStreamOutput::bound_to(PrintSink::stdout(), source),
        }
    }
}

impl StoryReporter for ConsoleOutput {
    fn before_story(&self, story: &Story, given_story: bool) {
        self.output.before_story(story, given_story);
    }

    fn after_story(&self, given_story: bool) {
        self.output.after_story(given_story);
    }

    fn given_stories(&self, story_paths: &[String]) {
        self.output.given_stories(story_paths);
    }

    fn before_scenario(&self, title: &str) {
        self.output.before_scenario(title);
    }

    fn successful(&self, step: &str) {
        self.output.successful(step);
    }

    fn ignorable(&self, step: &str) {
        self.output.ignorable(step);
    }

    fn pending(&self, step: &str) {
        self.output.pending(step);
    }

    fn not_performed(&self, step: &str) {
        self.output.not_performed(step);
    }

    fn failed(&self, step: &str, failure: &StepFailure) {
        self.output.failed(step, failure);
    }

    fn dry_run(&self) {
        self.output.dry_run();
    }
}
