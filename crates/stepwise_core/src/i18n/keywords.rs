//! Keyword sets and live keyword binding.
//!
//! # Invariants
//! - Keyword keys are the stable names in `KEYWORD_KEYS`.
//! - `KeywordsSource::get` always returns the most recently replaced set.
//!
//! # See also
//! - `keywords_*.properties` bundled next to this module.

use crate::model::step_type::StepType;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, RwLock};

pub const NARRATIVE: &str = "Narrative";
pub const IN_ORDER_TO: &str = "InOrderTo";
pub const AS_A: &str = "AsA";
pub const I_WANT_TO: &str = "IWantTo";
pub const SCENARIO: &str = "Scenario";
pub const GIVEN_STORIES: &str = "GivenStories";
pub const EXAMPLES_TABLE: &str = "ExamplesTable";
pub const EXAMPLES_TABLE_VALUE_SEPARATOR: &str = "ExamplesTableValueSeparator";
pub const GIVEN: &str = "Given";
pub const WHEN: &str = "When";
pub const THEN: &str = "Then";
pub const AND: &str = "And";
pub const IGNORABLE: &str = "Ignorable";
pub const PENDING: &str = "Pending";
pub const NOT_PERFORMED: &str = "NotPerformed";
pub const FAILED: &str = "Failed";
pub const DRY_RUN: &str = "DryRun";

/// Every key a complete keyword set must define.
pub const KEYWORD_KEYS: &[&str] = &[
    NARRATIVE,
    IN_ORDER_TO,
    AS_A,
    I_WANT_TO,
    SCENARIO,
    GIVEN_STORIES,
    EXAMPLES_TABLE,
    EXAMPLES_TABLE_VALUE_SEPARATOR,
    GIVEN,
    WHEN,
    THEN,
    AND,
    IGNORABLE,
    PENDING,
    NOT_PERFORMED,
    FAILED,
    DRY_RUN,
];

const ENGLISH: &[(&str, &str)] = &[
    (NARRATIVE, "Narrative:"),
    (IN_ORDER_TO, "In order to"),
    (AS_A, "As a"),
    (I_WANT_TO, "I want to"),
    (SCENARIO, "Scenario:"),
    (GIVEN_STORIES, "GivenStories:"),
    (EXAMPLES_TABLE, "Examples:"),
    (EXAMPLES_TABLE_VALUE_SEPARATOR, "|"),
    (GIVEN, "Given"),
    (WHEN, "When"),
    (THEN, "Then"),
    (AND, "And"),
    (IGNORABLE, "!--"),
    (PENDING, "PENDING"),
    (NOT_PERFORMED, "NOT PERFORMED"),
    (FAILED, "FAILED"),
    (DRY_RUN, "DRY RUN"),
];

const BUNDLED_LOCALES: &[(&str, &str)] = &[
    ("de", include_str!("keywords_de.properties")),
    ("fr", include_str!("keywords_fr.properties")),
    ("it", include_str!("keywords_it.properties")),
];

/// Keyword set errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordsError {
    UnsupportedLocale(String),
    MissingKeyword { locale: String, key: String },
    MalformedLine { line: usize, content: String },
}

impl Display for KeywordsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLocale(locale) => {
                write!(f, "no bundled keywords for locale: {locale}")
            }
            Self::MissingKeyword { locale, key } => {
                write!(f, "keywords for locale `{locale}` are missing `{key}`")
            }
            Self::MalformedLine { line, content } => {
                write!(f, "malformed keyword line {line}: {content}")
            }
        }
    }
}

impl Error for KeywordsError {}

/// Complete keyword set for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keywords {
    locale: String,
    words: BTreeMap<&'static str, String>,
}

impl Default for Keywords {
    fn default() -> Self {
        Self::english()
    }
}

impl Keywords {
    /// English keywords.
    pub fn english() -> Self {
        Self {
            locale: "en".to_string(),
            words: ENGLISH
                .iter()
                .map(|(key, value)| (*key, (*value).to_string()))
                .collect(),
        }
    }

    /// Returns the bundled keyword set for `locale` (`en`, `de`, `fr`, `it`).
    ///
    /// Region suffixes are ignored, so `de_CH` and `de-AT` resolve to `de`.
    pub fn for_locale(locale: &str) -> Result<Self, KeywordsError> {
        let language = locale
            .trim()
            .split(['_', '-'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        if language == "en" {
            return Ok(Self::english());
        }
        let Some((_, text)) = BUNDLED_LOCALES.iter().find(|(tag, _)| *tag == language) else {
            return Err(KeywordsError::UnsupportedLocale(locale.trim().to_string()));
        };
        Self::from_properties(language.as_str(), text)
    }

    /// Parses `Key=value` lines; blank lines and `#` comments are skipped.
    ///
    /// # Errors
    /// - `MalformedLine` when a non-comment line has no `=`.
    /// - `MissingKeyword` when any key of `KEYWORD_KEYS` is absent or blank.
    pub fn from_properties(locale: &str, text: &str) -> Result<Self, KeywordsError> {
        let mut parsed = BTreeMap::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(KeywordsError::MalformedLine {
                    line: index + 1,
                    content: line.to_string(),
                });
            };
            parsed.insert(key.trim().to_string(), value.trim().to_string());
        }

        let mut words = BTreeMap::new();
        for key in KEYWORD_KEYS {
            match parsed.remove(*key) {
                Some(value) if !value.is_empty() => {
                    words.insert(*key, value);
                }
                _ => {
                    return Err(KeywordsError::MissingKeyword {
                        locale: locale.to_string(),
                        key: (*key).to_string(),
                    })
                }
            }
        }

        Ok(Self {
            locale: locale.to_string(),
            words,
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Looks up one keyword by its stable key, e.g. `keyword("Given")`.
    pub fn keyword(&self, key: &str) -> Option<&str> {
        self.words.get(key).map(String::as_str)
    }

    fn word(&self, key: &'static str) -> &str {
        self.words.get(key).map(String::as_str).unwrap_or_default()
    }

    pub fn narrative(&self) -> &str {
        self.word(NARRATIVE)
    }

    pub fn in_order_to(&self) -> &str {
        self.word(IN_ORDER_TO)
    }

    pub fn as_a(&self) -> &str {
        self.word(AS_A)
    }

    pub fn i_want_to(&self) -> &str {
        self.word(I_WANT_TO)
    }

    pub fn scenario(&self) -> &str {
        self.word(SCENARIO)
    }

    pub fn given_stories(&self) -> &str {
        self.word(GIVEN_STORIES)
    }

    pub fn examples_table(&self) -> &str {
        self.word(EXAMPLES_TABLE)
    }

    pub fn examples_table_value_separator(&self) -> &str {
        self.word(EXAMPLES_TABLE_VALUE_SEPARATOR)
    }

    pub fn given(&self) -> &str {
        self.word(GIVEN)
    }

    pub fn when(&self) -> &str {
        self.word(WHEN)
    }

    pub fn then(&self) -> &str {
        self.word(THEN)
    }

    pub fn and(&self) -> &str {
        self.word(AND)
    }

    pub fn ignorable(&self) -> &str {
        self.word(IGNORABLE)
    }

    pub fn pending(&self) -> &str {
        self.word(PENDING)
    }

    pub fn not_performed(&self) -> &str {
        self.word(NOT_PERFORMED)
    }

    pub fn failed(&self) -> &str {
        self.word(FAILED)
    }

    pub fn dry_run(&self) -> &str {
        self.word(DRY_RUN)
    }

    /// Keywords that open a new step, in matching order.
    pub fn step_starters(&self) -> [(StepType, &str); 5] {
        [
            (StepType::Given, self.given()),
            (StepType::When, self.when()),
            (StepType::Then, self.then()),
            (StepType::And, self.and()),
            (StepType::Ignorable, self.ignorable()),
        ]
    }

    /// Classifies `step` by its leading keyword.
    ///
    /// Returns the step type and the text after the keyword. Word keywords
    /// must be followed by whitespace or end of text; the ignorable marker
    /// may be followed by anything. The longest matching keyword wins.
    pub fn step_type_of<'a>(&self, step: &'a str) -> Option<(StepType, &'a str)> {
        let step = step.trim_start();
        self.step_starters()
            .into_iter()
            .filter(|(step_type, keyword)| {
                let Some(rest) = step.strip_prefix(*keyword) else {
                    return false;
                };
                *step_type == StepType::Ignorable
                    || rest.is_empty()
                    || rest.starts_with(char::is_whitespace)
            })
            .max_by_key(|(_, keyword)| keyword.len())
            .map(|(step_type, keyword)| (step_type, step[keyword.len()..].trim()))
    }

    /// Returns `true` when `line` starts a new step.
    pub fn starts_step(&self, line: &str) -> bool {
        self.step_type_of(line).is_some()
    }
}

/// Shared keyword binding owned by a `Configuration`.
///
/// Collaborators that depend on keywords hold a clone of the source and read
/// through it, so `Configuration::use_keywords` is visible to all of them.
/// Holders can only read; the owning configuration is the single writer:
///
/// ```compile_fail
/// use std::sync::Arc;
/// use stepwise_core::{Configuration, Keywords};
///
/// let configuration = Configuration::new();
/// let shared: &Configuration = &configuration;
/// shared
///     .keywords_source()
///     .replace(Arc::new(Keywords::for_locale("fr").expect("french")));
/// ```
#[derive(Debug, Clone)]
pub struct KeywordsSource {
    current: Arc<RwLock<Arc<Keywords>>>,
}

impl Default for KeywordsSource {
    fn default() -> Self {
        Self::new(Arc::new(Keywords::english()))
    }
}

impl KeywordsSource {
    pub fn new(keywords: Arc<Keywords>) -> Self {
        Self {
            current: Arc::new(RwLock::new(keywords)),
        }
    }

    /// Current keyword set.
    pub fn get(&self) -> Arc<Keywords> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Replaces the keyword set for every holder of this source.
    pub(crate) fn replace(&self, keywords: Arc<Keywords>) {
        match self.current.write() {
            Ok(mut guard) => *guard = keywords,
            Err(poisoned) => *poisoned.into_inner() = keywords,
        }
    }
}
