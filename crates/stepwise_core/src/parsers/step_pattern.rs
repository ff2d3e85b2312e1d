//! Step pattern compilation.
//!
//! A step pattern is the text a step definition declares, with parameter
//! placeholders: `a $colour car travelling at $speed`. Parsers compile it
//! into a `StepMatcher` that recognises step text and extracts arguments.

use crate::model::step_type::StepType;
use regex::Regex;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

const DEFAULT_PREFIX: &str = "$";
const DEFAULT_CHARACTER_CLASS: &str = r"[\p{L}\p{N}_]";

/// Pattern compilation errors.
#[derive(Debug, Clone)]
pub enum PatternError {
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

impl Display for PatternError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPattern { pattern, source } => {
                write!(f, "step pattern `{pattern}` does not compile: {source}")
            }
        }
    }
}

impl Error for PatternError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
        }
    }
}

/// Compiles step patterns into matchers.
pub trait StepPatternParser: Debug + Send + Sync {
    fn parse_step(&self, step_type: StepType, pattern: &str) -> Result<StepMatcher, PatternError>;
}

/// Compiled step pattern.
#[derive(Debug, Clone)]
pub struct StepMatcher {
    step_type: StepType,
    pattern: String,
    regex: Regex,
    parameter_names: Vec<String>,
}

impl StepMatcher {
    pub fn new(
        step_type: StepType,
        pattern: impl Into<String>,
        regex: Regex,
        parameter_names: Vec<String>,
    ) -> Self {
        Self {
            step_type,
            pattern: pattern.into(),
            regex,
            parameter_names,
        }
    }

    pub fn step_type(&self) -> StepType {
        self.step_type
    }

    /// Pattern text as declared.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Placeholder names in declaration order, without prefix.
    pub fn parameter_names(&self) -> &[String] {
        &self.parameter_names
    }

    /// Whether the step text (without its keyword) matches.
    pub fn matches(&self, step_without_keyword: &str) -> bool {
        self.regex.is_match(step_without_keyword.trim())
    }

    /// Captured argument values in placeholder order, or `None` on mismatch.
    pub fn parameters(&self, step_without_keyword: &str) -> Option<Vec<String>> {
        let captures = self.regex.captures(step_without_keyword.trim())?;
        Some(
            captures
                .iter()
                .skip(1)
                .map(|group| group.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
        )
    }
}

/// Pattern parser that treats `prefix` + word characters as a parameter.
///
/// # Invariants
/// - Literal text is matched exactly, except that any whitespace run matches
///   one or more whitespace characters.
/// - Each parameter captures `(.*)`; the pattern is anchored at both ends and
///   `.` spans line breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexPrefixCapturingPatternParser {
    prefix: String,
    character_class: String,
}

impl Default for RegexPrefixCapturingPatternParser {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl RegexPrefixCapturingPatternParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            character_class: DEFAULT_CHARACTER_CLASS.to_string(),
        }
    }

    /// Overrides the regex character class allowed in parameter names.
    pub fn with_character_class(mut self, character_class: impl Into<String>) -> Self {
        self.character_class = character_class.into();
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn compile(&self, source: &str, pattern: &str) -> Result<Regex, PatternError> {
        Regex::new(source).map_err(|err| PatternError::InvalidPattern {
            pattern: pattern.to_string(),
            source: err,
        })
    }
}

impl StepPatternParser for RegexPrefixCapturingPatternParser {
    fn parse_step(&self, step_type: StepType, pattern: &str) -> Result<StepMatcher, PatternError> {
        let placeholder = self.compile(
            &format!("{}{}+", regex::escape(&self.prefix), self.character_class),
            pattern,
        )?;

        let trimmed = pattern.trim();
        let mut source = String::from("(?s)^");
        let mut names = Vec::new();
        let mut literal_start = 0;
        for found in placeholder.find_iter(trimmed) {
            source.push_str(&literal_to_regex(&trimmed[literal_start..found.start()]));
            source.push_str("(.*)");
            names.push(found.as_str()[self.prefix.len()..].to_string());
            literal_start = found.end();
        }
        source.push_str(&literal_to_regex(&trimmed[literal_start..]));
        source.push('$');

        let regex = self.compile(&source, pattern)?;
        Ok(StepMatcher::new(step_type, pattern, regex, names))
    }
}

fn literal_to_regex(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut in_whitespace = false;
    let mut buffer = [0u8; 4];
    for c in literal.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push_str(r"\s+");
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        out.push_str(&regex::escape(c.encode_utf8(&mut buffer)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{RegexPrefixCapturingPatternParser, StepPatternParser};
    use crate::model::step_type::StepType;

    #[test]
    fn captures_prefixed_parameters_in_order() {
        let parser = RegexPrefixCapturingPatternParser::default();
        let matcher = parser
            .parse_step(StepType::Given, "a $colour car travelling at $speed mph")
            .expect("pattern should compile");

        assert_eq!(matcher.parameter_names(), ["colour", "speed"]);
        assert!(matcher.matches("a red car travelling at 30 mph"));
        assert_eq!(
            matcher.parameters("a red car travelling at 30 mph"),
            Some(vec!["red".to_string(), "30".to_string()])
        );
        assert!(!matcher.matches("a red bike travelling at 30 mph"));
        assert_eq!(matcher.parameters("nothing alike"), None);
    }

    #[test]
    fn literal_regex_characters_are_escaped() {
        let parser = RegexPrefixCapturingPatternParser::default();
        let matcher = parser
            .parse_step(StepType::Then, "the total is (approx.) $amount?")
            .expect("pattern should compile");

        assert!(matcher.matches("the total is (approx.) 12.50?"));
        assert!(!matcher.matches("the total is approx 12.50"));
    }

    #[test]
    fn whitespace_runs_are_flexible_and_multiline_values_match() {
        let parser = RegexPrefixCapturingPatternParser::default();
        let matcher = parser
            .parse_step(StepType::When, "I enter $text")
            .expect("pattern should compile");

        assert!(matcher.matches("I   enter hello"));
        assert_eq!(
            matcher.parameters("I enter line one\nline two"),
            Some(vec!["line one\nline two".to_string()])
        );
    }

    #[test]
    fn custom_prefix_is_honoured() {
        let parser = RegexPrefixCapturingPatternParser::new("%");
        assert_eq!(parser.prefix(), "%");
        let matcher = parser
            .parse_step(StepType::Given, "a cost of $5 for %item")
            .expect("pattern should compile");

        assert_eq!(matcher.parameter_names(), ["item"]);
        assert!(matcher.matches("a cost of $5 for bread"));
    }

    #[test]
    fn pattern_without_parameters_matches_exactly() {
        let parser = RegexPrefixCapturingPatternParser::default();
        let matcher = parser
            .parse_step(StepType::Given, "a fresh system")
            .expect("pattern should compile");

        assert!(matcher.parameter_names().is_empty());
        assert_eq!(matcher.step_type(), StepType::Given);
        assert_eq!(matcher.pattern(), "a fresh system");
        assert_eq!(matcher.parameters("a fresh system"), Some(vec![]));
        assert!(!matcher.matches("a fresh system again"));
    }

    #[test]
    fn invalid_character_class_is_reported() {
        let parser = RegexPrefixCapturingPatternParser::default().with_character_class("[a-");
        let err = parser
            .parse_step(StepType::Given, "a $thing")
            .expect_err("broken class must fail");
        assert!(err.to_string().contains("a $thing"));
    }
}
