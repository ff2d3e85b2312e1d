//! Parsed story structure.
//!
//! # Invariants
//! - `Story::scenarios` is never empty for parser output.
//! - `ExamplesTable` rows always have the same width as `headers`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structured representation of one story file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// Logical path the story was loaded from, empty when parsed ad hoc.
    pub path: String,
    /// Free text preceding the narrative and scenarios.
    pub description: String,
    pub narrative: Option<Narrative>,
    pub scenarios: Vec<Scenario>,
}

impl Story {
    /// Display name derived from the path: last segment without extension.
    pub fn name(&self) -> &str {
        let file = self.path.rsplit('/').next().unwrap_or_default();
        match file.rfind('.') {
            Some(dot) if dot > 0 => &file[..dot],
            _ => file,
        }
    }

    /// Total number of step lines across all scenarios.
    pub fn step_count(&self) -> usize {
        self.scenarios.iter().map(|scenario| scenario.steps.len()).sum()
    }
}

/// Narrative block: "In order to / As a / I want to".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    pub in_order_to: String,
    pub as_a: String,
    pub i_want_to: String,
}

impl Narrative {
    pub fn is_empty(&self) -> bool {
        self.in_order_to.is_empty() && self.as_a.is_empty() && self.i_want_to.is_empty()
    }
}

/// One scenario with its raw step lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub title: String,
    /// Story paths that must run before this scenario.
    pub given_stories: Vec<String>,
    /// Step text including the leading keyword, e.g. `Given a red car`.
    pub steps: Vec<String>,
    pub examples: ExamplesTable,
}

/// Pipe-separated parameter table following `Examples:`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamplesTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExamplesTable {
    /// Parses a table where each non-blank line is `|a|b|c|`.
    ///
    /// The first line provides headers. Rows shorter than the header are
    /// padded with empty cells, longer rows are truncated.
    pub fn parse(text: &str, separator: &str) -> Self {
        let mut lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty());
        let Some(header_line) = lines.next() else {
            return Self::default();
        };
        let headers = split_row(header_line, separator);
        let rows = lines
            .map(|line| {
                let mut row = split_row(line, separator);
                row.resize(headers.len(), String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Returns one row keyed by header name.
    pub fn row_as_map(&self, index: usize) -> Option<BTreeMap<String, String>> {
        let row = self.rows.get(index)?;
        Some(
            self.headers
                .iter()
                .cloned()
                .zip(row.iter().cloned())
                .collect(),
        )
    }
}

fn split_row(line: &str, separator: &str) -> Vec<String> {
    let line = line.strip_prefix(separator).unwrap_or(line);
    let line = line.strip_suffix(separator).unwrap_or(line);
    line.split(separator)
        .map(|cell| cell.trim().to_string())
        .collect()
}
