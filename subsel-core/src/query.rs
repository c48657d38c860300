//! Query configuration and text predicates

use std::ops::RangeInclusive;

use regex::Regex;

use crate::error::{Error, Result};

/// The main query, matched against the primary text.
#[derive(Debug, Clone)]
pub enum QueryPattern {
    Literal(String),
    Regex(Regex),
}

impl QueryPattern {
    /// Compile the raw query. An empty query means "no query constraint".
    pub fn compile(raw: &str, regex: bool) -> Result<Option<Self>> {
        if raw.is_empty() {
            return Ok(None);
        }
        if !regex {
            return Ok(Some(QueryPattern::Literal(raw.to_string())));
        }
        Regex::new(raw)
            .map(|re| Some(QueryPattern::Regex(re)))
            .map_err(|source| Error::InvalidPattern {
                pattern: raw.to_string(),
                source,
            })
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            QueryPattern::Literal(needle) => text.contains(needle.as_str()),
            QueryPattern::Regex(re) => re.is_match(text),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            QueryPattern::Literal(needle) => needle,
            QueryPattern::Regex(re) => re.as_str(),
        }
    }
}

/// Word-count bounds; zero on either side means unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordRange {
    pub min: usize,
    pub max: usize,
}

impl WordRange {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, count: usize) -> bool {
        if self.min > 0 && count < self.min {
            return false;
        }
        if self.max > 0 && count > self.max {
            return false;
        }
        true
    }
}

impl From<RangeInclusive<usize>> for WordRange {
    fn from(range: RangeInclusive<usize>) -> Self {
        Self::new(*range.start(), *range.end())
    }
}

/// Immutable set of record predicates.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pattern: Option<QueryPattern>,
    contains: Vec<String>,
    excludes: Vec<String>,
    word_range: WordRange,
    require_audio: bool,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pattern(mut self, pattern: Option<QueryPattern>) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_contains(mut self, terms: Vec<String>) -> Self {
        self.contains = terms;
        self
    }

    pub fn with_excludes(mut self, terms: Vec<String>) -> Self {
        self.excludes = terms;
        self
    }

    pub fn with_word_range(mut self, range: WordRange) -> Self {
        self.word_range = range;
        self
    }

    pub fn require_audio(mut self, yes: bool) -> Self {
        self.require_audio = yes;
        self
    }

    pub fn pattern(&self) -> Option<&QueryPattern> {
        self.pattern.as_ref()
    }

    /// The query text as the user gave it ("" when absent).
    pub fn query_text(&self) -> &str {
        self.pattern.as_ref().map(QueryPattern::as_str).unwrap_or("")
    }

    pub fn word_range(&self) -> WordRange {
        self.word_range
    }

    pub fn requires_audio(&self) -> bool {
        self.require_audio
    }

    /// A query must constrain the primary text somehow; scanning a whole
    /// corpus for everything is refused.
    pub fn ensure_selective(&self) -> Result<()> {
        if self.pattern.is_none() && self.contains.is_empty() {
            return Err(Error::EmptyQuery);
        }
        Ok(())
    }

    /// Query, contains-all and exclude-any checks.
    pub fn matches_text(&self, primary: &str, translated: &str) -> bool {
        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(primary) {
                return false;
            }
        }

        if !self.contains.iter().all(|term| primary.contains(term.as_str())) {
            return false;
        }

        !self
            .excludes
            .iter()
            .any(|term| primary.contains(term.as_str()) || translated.contains(term.as_str()))
    }
}
