//! Post-story statistics.
//!
//! # Invariants
//! - Counters cover the outermost story only; given stories add to the
//!   counts of the story that includes them.
//! - Stats are written once, on the outermost `after_story`.

use crate::failures::StepFailure;
use crate::model::story::Story;
use crate::reporters::sink::PrintSink;
use crate::reporters::story_reporter::StoryReporter;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};

/// Step and scenario counters for one story run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryStatistics {
    pub scenarios: u64,
    pub scenarios_failed: u64,
    pub given_stories: u64,
    pub steps: u64,
    pub steps_successful: u64,
    pub steps_ignorable: u64,
    pub steps_pending: u64,
    pub steps_not_performed: u64,
    pub steps_failed: u64,
}

impl StoryStatistics {
    fn fields(&self) -> [(&'static str, u64); 9] {
        [
            ("scenarios", self.scenarios),
            ("scenarios_failed", self.scenarios_failed),
            ("given_stories", self.given_stories),
            ("steps", self.steps),
            ("steps_successful", self.steps_successful),
            ("steps_ignorable", self.steps_ignorable),
            ("steps_pending", self.steps_pending),
            ("steps_not_performed", self.steps_not_performed),
            ("steps_failed", self.steps_failed),
        ]
    }

    /// `key=value` lines in a fixed order.
    pub fn to_properties(&self) -> String {
        self.fields()
            .iter()
            .map(|(key, value)| format!("{key}={value}\n"))
            .collect()
    }

    /// Reads `key=value` lines; unknown keys and unparsable values are skipped.
    pub fn from_properties(text: &str) -> Self {
        let mut stats = Self::default();
        for line in text.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let Ok(value) = value.trim().parse::<u64>() else {
                continue;
            };
            let slot = match key.trim() {
                "scenarios" => &mut stats.scenarios,
                "scenarios_failed" => &mut stats.scenarios_failed,
                "given_stories" => &mut stats.given_stories,
                "steps" => &mut stats.steps,
                "steps_successful" => &mut stats.steps_successful,
                "steps_ignorable" => &mut stats.steps_ignorable,
                "steps_pending" => &mut stats.steps_pending,
                "steps_not_performed" => &mut stats.steps_not_performed,
                "steps_failed" => &mut stats.steps_failed,
                _ => continue,
            };
            *slot = value;
        }
        stats
    }

    /// Field-wise sum.
    pub fn add(&mut self, other: &Self) {
        self.scenarios += other.scenarios;
        self.scenarios_failed += other.scenarios_failed;
        self.given_stories += other.given_stories;
        self.steps += other.steps;
        self.steps_successful += other.steps_successful;
        self.steps_ignorable += other.steps_ignorable;
        self.steps_pending += other.steps_pending;
        self.steps_not_performed += other.steps_not_performed;
        self.steps_failed += other.steps_failed;
    }
}

#[derive(Debug, Default)]
struct CollectorState {
    stats: StoryStatistics,
    scenario_failed: bool,
}

/// Counts story events and writes them as stats when the story ends.
#[derive(Debug)]
pub struct PostStoryStatisticsCollector {
    sink: PrintSink,
    state: Mutex<CollectorState>,
}

impl PostStoryStatisticsCollector {
    pub fn new(sink: PrintSink) -> Self {
        Self {
            sink,
            state: Mutex::new(CollectorState::default()),
        }
    }

    /// Counters accumulated so far.
    pub fn statistics(&self) -> StoryStatistics {
        self.lock().stats
    }

    fn lock(&self) -> MutexGuard<'_, CollectorState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn count_step(&self, update: impl FnOnce(&mut StoryStatistics)) {
        let mut state = self.lock();
        state.stats.steps += 1;
        update(&mut state.stats);
    }
}

impl StoryReporter for PostStoryStatisticsCollector {
    fn before_story(&self, _story: &Story, given_story: bool) {
        let mut state = self.lock();
        if given_story {
            state.stats.given_stories += 1;
        } else {
            *state = CollectorState::default();
        }
    }

    fn after_story(&self, given_story: bool) {
        if given_story {
            return;
        }
        let properties = self.lock().stats.to_properties();
        for line in properties.lines() {
            self.sink.write_line(line);
        }
        self.sink.flush();
    }

    fn before_scenario(&self, _title: &str) {
        let mut state = self.lock();
        state.stats.scenarios += 1;
        state.scenario_failed = false;
    }

    fn after_scenario(&self) {
        let mut state = self.lock();
        if state.scenario_failed {
            state.stats.scenarios_failed += 1;
        }
    }

    fn successful(&self, _step: &str) {
        self.count_step(|stats| stats.steps_successful += 1);
    }

    fn ignorable(&self, _step: &str) {
        self.count_step(|stats| stats.steps_ignorable += 1);
    }

    fn pending(&self, _step: &str) {
        self.count_step(|stats| stats.steps_pending += 1);
    }

    fn not_performed(&self, _step: &str) {
        self.count_step(|stats| stats.steps_not_performed += 1);
    }

    fn failed(&self, _step: &str, _failure: &StepFailure) {
        let mut state = self.lock();
        state.stats.steps += 1;
        state.stats.steps_failed += 1;
        state.scenario_failed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::{PostStoryStatisticsCollector, StoryStatistics};
    use crate::failures::StepFailure;
    use crate::model::story::Story;
    use crate::reporters::sink::{CapturedOutput, PrintSink};
    use crate::reporters::story_reporter::StoryReporter;

    #[test]
    fn counts_events_and_writes_properties_once() {
        let output = CapturedOutput::new();
        let collector = PostStoryStatisticsCollector::new(PrintSink::writer(output.clone()));
        let story = Story::default();

        collector.before_story(&story, false);
        collector.before_scenario("first");
        collector.successful("Given a");
        collector.pending("When b");
        collector.failed("Then c", &StepFailure::new("Then c", "boom"));
        collector.after_scenario();
        collector.before_story(&story, true);
        collector.before_scenario("given story scenario");
        collector.ignorable("!-- d");
        collector.after_scenario();
        collector.after_story(true);
        collector.after_story(false);

        let stats = collector.statistics();
        assert_eq!(stats.scenarios, 2);
        assert_eq!(stats.scenarios_failed, 1);
        assert_eq!(stats.given_stories, 1);
        assert_eq!(stats.steps, 4);
        assert_eq!(stats.steps_failed, 1);

        let written = output.contents();
        assert_eq!(written.matches("scenarios=").count(), 1);
        assert_eq!(StoryStatistics::from_properties(&written), stats);
    }

    #[test]
    fn new_story_resets_counters() {
        let collector = PostStoryStatisticsCollector::new(PrintSink::writer(CapturedOutput::new()));
        collector.before_story(&Story::default(), false);
        collector.successful("Given a");
        collector.before_story(&Story::default(), false);
        assert_eq!(collector.statistics(), StoryStatistics::default());
    }

    #[test]
    fn properties_parsing_skips_noise_and_sums() {
        let mut total = StoryStatistics::from_properties("steps=3\nbogus=1\nsteps_failed=x\n\n");
        assert_eq!(total.steps, 3);
        assert_eq!(total.steps_failed, 0);
        total.add(&StoryStatistics {
            steps: 2,
            steps_failed: 1,
            ..StoryStatistics::default()
        });
        assert_eq!(total.steps, 5);
        assert_eq!(total.steps_failed, 1);
    }
}
