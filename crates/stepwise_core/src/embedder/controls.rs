//! Embedder control toggles.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEFAULT_STORY_TIMEOUT_SECS: u64 = 300;
const DEFAULT_THREADS: usize = 1;

/// Embedder controls parse errors.
#[derive(Debug)]
pub enum ControlsError {
    InvalidJson(serde_json::Error),
}

impl Display for ControlsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(err) => write!(f, "invalid embedder controls: {err}"),
        }
    }
}

impl Error for ControlsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ControlsError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidJson(value)
    }
}

/// Execution-control toggles for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedderControls {
    /// Run every story before reporting failures.
    pub batch: bool,
    /// Skip story execution entirely.
    pub skip: bool,
    pub generate_view_after_stories: bool,
    pub ignore_failure_in_stories: bool,
    pub ignore_failure_in_view: bool,
    pub story_timeout_in_secs: u64,
    pub threads: usize,
}

impl Default for EmbedderControls {
    fn default() -> Self {
        Self {
            batch: false,
            skip: false,
            generate_view_after_stories: true,
            ignore_failure_in_stories: false,
            ignore_failure_in_view: false,
            story_timeout_in_secs: DEFAULT_STORY_TIMEOUT_SECS,
            threads: DEFAULT_THREADS,
        }
    }
}

impl EmbedderControls {
    /// Reads controls from JSON; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ControlsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ControlsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn do_batch(mut self, batch: bool) -> Self {
        self.batch = batch;
        self
    }

    pub fn do_skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    pub fn do_generate_view_after_stories(mut self, generate: bool) -> Self {
        self.generate_view_after_stories = generate;
        self
    }

    pub fn do_ignore_failure_in_stories(mut self, ignore: bool) -> Self {
        self.ignore_failure_in_stories = ignore;
        self
    }

    pub fn do_ignore_failure_in_view(mut self, ignore: bool) -> Self {
        self.ignore_failure_in_view = ignore;
        self
    }

    pub fn use_story_timeout_in_secs(mut self, secs: u64) -> Self {
        self.story_timeout_in_secs = secs;
        self
    }

    /// Thread count; zero is stored as one.
    pub fn use_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{ControlsError, EmbedderControls};

    #[test]
    fn defaults_match_documented_values() {
        let controls = EmbedderControls::default();
        assert!(!controls.batch);
        assert!(!controls.skip);
        assert!(controls.generate_view_after_stories);
        assert!(!controls.ignore_failure_in_stories);
        assert!(!controls.ignore_failure_in_view);
        assert_eq!(controls.story_timeout_in_secs, 300);
        assert_eq!(controls.threads, 1);
    }

    #[test]
    fn builder_methods_set_single_fields() {
        let controls = EmbedderControls::default()
            .do_batch(true)
            .do_skip(true)
            .do_generate_view_after_stories(false)
            .do_ignore_failure_in_stories(true)
            .do_ignore_failure_in_view(true)
            .use_story_timeout_in_secs(60)
            .use_threads(0);

        assert!(controls.batch && controls.skip);
        assert!(!controls.generate_view_after_stories);
        assert!(controls.ignore_failure_in_stories && controls.ignore_failure_in_view);
        assert_eq!(controls.story_timeout_in_secs, 60);
        assert_eq!(controls.threads, 1);
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let controls =
            EmbedderControls::from_json(r#"{"batch": true, "threads": 4}"#).expect("valid json");
        assert!(controls.batch);
        assert_eq!(controls.threads, 4);
        assert!(controls.generate_view_after_stories);

        let json = controls.to_json().expect("serializable");
        assert_eq!(EmbedderControls::from_json(&json).expect("round trip"), controls);
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = EmbedderControls::from_json("{batch").expect_err("malformed json");
        assert!(matches!(err, ControlsError::InvalidJson(_)));
    }
}
