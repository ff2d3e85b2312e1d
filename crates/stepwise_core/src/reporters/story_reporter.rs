//! Story event contract and composite reporters.

use crate::failures::StepFailure;
use crate::model::story::Story;
use std::fmt::Debug;
use std::sync::Arc;

/// Receives events describing story execution.
///
/// Every event has an empty default body so reporters only implement what
/// they render.
pub trait StoryReporter: Debug + Send + Sync {
    fn before_story(&self, _story: &Story, _given_story: bool) {}

    fn after_story(&self, _given_story: bool) {}

    fn given_stories(&self, _story_paths: &[String]) {}

    fn before_scenario(&self, _title: &str) {}

    fn after_scenario(&self) {}

    fn successful(&self, _step: &str) {}

    fn ignorable(&self, _step: &str) {}

    fn pending(&self, _step: &str) {}

    fn not_performed(&self, _step: &str) {}

    fn failed(&self, _step: &str, _failure: &StepFailure) {}

    fn dry_run(&self) {}
}

/// Reporter that drops every event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullStoryReporter;

impl StoryReporter for NullStoryReporter {}

/// Forwards every event to each delegate, in order.
#[derive(Debug, Clone, Default)]
pub struct DelegatingStoryReporter {
    delegates: Vec<Arc<dyn StoryReporter>>,
}

impl DelegatingStoryReporter {
    pub fn new(delegates: Vec<Arc<dyn StoryReporter>>) -> Self {
        Self { delegates }
    }

    pub fn delegates(&self) -> &[Arc<dyn StoryReporter>] {
        &self.delegates
    }
}

impl StoryReporter for DelegatingStoryReporter {
    fn before_story(&self, story: &Story, given_story: bool) {
        self.delegates
            .iter()
            .for_each(|reporter| reporter.before_story(story, given_story));
    }

    fn after_story(&self, given_story: bool) {
        self.delegates
            .iter()
            .for_each(|reporter| reporter.after_story(given_story));
    }

    fn given_stories(&self, story_paths: &[String]) {
        self.delegates
            .iter()
            .for_each(|reporter| reporter.given_stories(story_paths));
    }

    fn before_scenario(&self, title: &str) {
        self.delegates
            .iter()
            .for_each(|reporter| reporter.before_scenario(title));
    }

    fn after_scenario(&self) {
        self.delegates
            .iter()
            .for_each(|reporter| reporter.after_scenario());
    }

    fn successful(&self, step: &str) {
        self.delegates
            .iter()
            .for_each(|reporter| reporter.successful(step));
    }

    fn ignorable(&self, step: &str) {
        self.delegates
            .iter()
            .for_each(|reporter| reporter.ignorable(step));
    }

    fn pending(&self, step: &str) {
        self.delegates
            .iter()
            .for_each(|reporter| reporter.pending(step));
    }

    fn not_performed(&self, step: &str) {
        self.delegates
            .iter()
            .for_each(|reporter| reporter.not_performed(step));
    }

    fn failed(&self, step: &str, failure: &StepFailure) {
        self.delegates
            .iter()
            .for_each(|reporter| reporter.failed(step, failure));
    }

    fn dry_run(&self) {
        self.delegates.iter().for_each(|reporter| reporter.dry_run());
    }
}
