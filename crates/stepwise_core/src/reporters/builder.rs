//! Batch construction of per-story reporters.
//!
//! # Responsibility
//! - Decide, per story path, which outputs a story is reported to.
//! - Derive report file locations from story paths.
//!
//! # Invariants
//! - `build` returns exactly one reporter per distinct input path.
//! - File outputs are opened lazily, so building never touches the disk.
//! - Text outputs follow the keywords passed to `build` unless the builder
//!   pins its own set.

use crate::i18n::keywords::{Keywords, KeywordsSource};
use crate::reporters::print_stream::{ConsoleOutput, PrintStreamOutput};
use crate::reporters::sink::PrintSink;
use crate::reporters::statistics::PostStoryStatisticsCollector;
use crate::reporters::story_reporter::{DelegatingStoryReporter, StoryReporter};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DEFAULT_OUTPUT_DIRECTORY: &str = "target/stories";

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Text on standard out.
    Console,
    /// Text file per story.
    Txt,
    /// `key=value` statistics file per story.
    Stats,
}

impl Format {
    /// File extension for file-backed formats.
    pub fn extension(self) -> Option<&'static str> {
        match self {
            Self::Console => None,
            Self::Txt => Some("txt"),
            Self::Stats => Some("stats"),
        }
    }
}

/// Factory producing one reporter per story path.
pub trait ReporterBuilder: Debug + Send + Sync {
    /// Builds reporters labelling text output with `keywords`.
    fn build(
        &self,
        story_paths: &[String],
        keywords: &KeywordsSource,
    ) -> HashMap<String, Arc<dyn StoryReporter>>;

    /// Directory file-backed reports are written to.
    fn output_directory(&self) -> &Path;

    fn formats(&self) -> &[Format];
}

/// Reporter builder driven by a list of formats.
#[derive(Debug, Clone)]
pub struct StoryReporterBuilder {
    output_directory: PathBuf,
    formats: Vec<Format>,
    keywords: Option<Arc<Keywords>>,
}

impl Default for StoryReporterBuilder {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            formats: vec![Format::Console],
            keywords: None,
        }
    }
}

impl StoryReporterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_directory(mut self, output_directory: impl Into<PathBuf>) -> Self {
        self.output_directory = output_directory.into();
        self
    }

    /// Replaces the format list; duplicates are dropped, order is kept.
    pub fn with_formats(mut self, formats: &[Format]) -> Self {
        self.formats.clear();
        for format in formats {
            if !self.formats.contains(format) {
                self.formats.push(*format);
            }
        }
        self
    }

    /// Pins the keywords used to label text outputs, ignoring the ones
    /// passed to `build`.
    pub fn with_keywords(mut self, keywords: Arc<Keywords>) -> Self {
        self.keywords = Some(keywords);
        self
    }

    /// File for `story_path` in `format`, e.g. `org/a/b.story` + txt ->
    /// `<output>/org.a.b.txt`. `None` for console output.
    pub fn output_file(&self, story_path: &str, format: Format) -> Option<PathBuf> {
        let extension = format.extension()?;
        Some(
            self.output_directory
                .join(format!("{}.{extension}", story_file_stem(story_path))),
        )
    }

    fn reporter_for(
        &self,
        story_path: &str,
        format: Format,
        keywords: &KeywordsSource,
    ) -> Arc<dyn StoryReporter> {
        match (format, self.output_file(story_path, format)) {
            (Format::Txt, Some(path)) => {
                Arc::new(PrintStreamOutput::to_file(path, keywords.clone()))
            }
            (Format::Stats, Some(path)) => {
                Arc::new(PostStoryStatisticsCollector::new(PrintSink::file(path)))
            }
            _ => Arc::new(ConsoleOutput::bound_to(keywords.clone())),
        }
    }
}

impl ReporterBuilder for StoryReporterBuilder {
    fn build(
        &self,
        story_paths: &[String],
        keywords: &KeywordsSource,
    ) -> HashMap<String, Arc<dyn StoryReporter>> {
        let keywords = match &self.keywords {
            Some(pinned) => KeywordsSource::new(Arc::clone(pinned)),
            None => keywords.clone(),
        };
        let reporters: HashMap<String, Arc<dyn StoryReporter>> = story_paths
            .iter()
            .map(|story_path| {
                let mut outputs: Vec<Arc<dyn StoryReporter>> = self
                    .formats
                    .iter()
                    .map(|format| self.reporter_for(story_path, *format, &keywords))
                    .collect();
                let reporter = if outputs.len() == 1 {
                    outputs.remove(0)
                } else {
                    Arc::new(DelegatingStoryReporter::new(outputs))
                };
                (story_path.clone(), reporter)
            })
            .collect();

        info!(
            "event=reporters_built module=reporters status=ok stories={} formats={:?} output_dir={}",
            reporters.len(),
            self.formats,
            self.output_directory.display()
        );
        reporters
    }

    fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    fn formats(&self) -> &[Format] {
        &self.formats
    }
}

/// `org/a/b.story` -> `org.a.b`.
pub fn story_file_stem(story_path: &str) -> String {
    let trimmed = story_path.trim_start_matches('/');
    let without_extension = match trimmed.rfind('.') {
        Some(dot) if dot > trimmed.rfind('/').map_or(0, |slash| slash + 1) => &trimmed[..dot],
        _ => trimmed,
    };
    without_extension.replace(['/', '\\'], ".")
}
