//! Keyword-driven story parser.
//!
//! # Responsibility
//! - Split story text into description, narrative and scenarios.
//! - Split scenarios into given stories, steps and examples.
//!
//! # Invariants
//! - Keywords are read at parse time, never cached across calls.
//! - Output always contains at least one scenario.

use crate::i18n::keywords::{Keywords, KeywordsSource};
use crate::model::story::{ExamplesTable, Narrative, Scenario, Story};
use std::fmt::Debug;
use std::ops::Range;
use std::sync::Arc;

/// Turns raw story text into a structured `Story`.
pub trait StoryParser: Debug + Send + Sync {
    fn parse_story(&self, story_text: &str, story_path: &str) -> Story;
}

/// Parser that locates structural keywords at the start of lines.
#[derive(Debug, Clone, Default)]
pub struct RegexStoryParser {
    keywords: KeywordsSource,
}

impl RegexStoryParser {
    /// Parser bound to a fixed keyword snapshot.
    pub fn new(keywords: Keywords) -> Self {
        Self {
            keywords: KeywordsSource::new(Arc::new(keywords)),
        }
    }

    /// Parser that reads keywords through `source` on every parse.
    pub fn bound_to(source: KeywordsSource) -> Self {
        Self { keywords: source }
    }

    /// Keywords the next parse will use.
    pub fn keywords(&self) -> Arc<Keywords> {
        self.keywords.get()
    }
}

impl StoryParser for RegexStoryParser {
    fn parse_story(&self, story_text: &str, story_path: &str) -> Story {
        let keywords = self.keywords.get();
        let text = story_text.replace("\r\n", "\n");

        let scenario_ranges = keyword_ranges(&text, keywords.scenario());
        let (header, scenarios) = match scenario_ranges.first() {
            Some(first) => {
                let scenarios = scenario_ranges
                    .iter()
                    .enumerate()
                    .map(|(index, range)| {
                        let end = scenario_ranges
                            .get(index + 1)
                            .map_or(text.len(), |next| next.start);
                        let body = &text[range.end..end];
                        let (title, rest) = body.split_once('\n').unwrap_or((body, ""));
                        parse_scenario(&keywords, title.trim(), rest)
                    })
                    .collect();
                (&text[..first.start], scenarios)
            }
            None => {
                let steps_start = first_step_offset(&text, &keywords).unwrap_or(text.len());
                (
                    &text[..steps_start],
                    vec![parse_scenario(&keywords, "", &text[steps_start..])],
                )
            }
        };

        let narrative_ranges = keyword_ranges(header, keywords.narrative());
        let (description, narrative) = match narrative_ranges.first() {
            Some(range) => (
                header[..range.start].trim(),
                parse_narrative(&keywords, &header[range.end..]),
            ),
            None => (header.trim(), None),
        };

        Story {
            path: story_path.to_string(),
            description: description.to_string(),
            narrative,
            scenarios,
        }
    }
}

/// Byte ranges of `keyword` occurrences that start a line, after any
/// leading spaces or tabs. Keywords are matched literally.
fn keyword_ranges(text: &str, keyword: &str) -> Vec<Range<usize>> {
    if keyword.is_empty() {
        return Vec::new();
    }
    let mut ranges = Vec::new();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
        if line[indent..].starts_with(keyword) {
            let start = offset + indent;
            ranges.push(start..start + keyword.len());
        }
        offset += line.len();
    }
    ranges
}

fn first_step_offset(text: &str, keywords: &Keywords) -> Option<usize> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if keywords.starts_step(line) {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

fn parse_narrative(keywords: &Keywords, text: &str) -> Option<Narrative> {
    let mut narrative = Narrative::default();
    for line in text.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix(keywords.in_order_to()) {
            narrative.in_order_to = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix(keywords.as_a()) {
            narrative.as_a = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix(keywords.i_want_to()) {
            narrative.i_want_to = rest.trim().to_string();
        }
    }
    (!narrative.is_empty()).then_some(narrative)
}

fn parse_scenario(keywords: &Keywords, title: &str, body: &str) -> Scenario {
    let mut scenario = Scenario {
        title: title.to_string(),
        ..Scenario::default()
    };
    let mut examples_text: Option<String> = None;

    for line in body.lines() {
        if let Some(examples) = examples_text.as_mut() {
            examples.push_str(line);
            examples.push('\n');
            continue;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix(keywords.examples_table()) {
            examples_text = Some(format!("{rest}\n"));
        } else if let Some(rest) = trimmed.strip_prefix(keywords.given_stories()) {
            scenario.given_stories = rest
                .split(',')
                .map(str::trim)
                .filter(|path| !path.is_empty())
                .map(str::to_string)
                .collect();
        } else if keywords.starts_step(trimmed) {
            scenario.steps.push(trimmed.to_string());
        } else if let Some(step) = scenario.steps.last_mut() {
            step.push('\n');
            step.push_str(trimmed);
        }
    }

    if let Some(text) = examples_text {
        scenario.examples = ExamplesTable::parse(&text, keywords.examples_table_value_separator());
    }
    scenario
}
