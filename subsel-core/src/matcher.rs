//! Candidate admission and deduplication (subsel-core)
//!
//! Checks run in a fixed order and the first failing one rejects:
//! query/contains/exclude, then the dedup set, then word count, then audio.
//! A candidate that passes the dedup check is recorded in the set even if a
//! later check rejects it, so a repeated sentence is only ever considered
//! once per run.

use std::collections::HashSet;

use crate::query::Query;
use crate::record::Candidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Text,
    Duplicate,
    WordCount,
    NoAudio,
}

impl Rejection {
    pub fn as_str(self) -> &'static str {
        match self {
            Rejection::Text => "text predicates",
            Rejection::Duplicate => "duplicate",
            Rejection::WordCount => "word count",
            Rejection::NoAudio => "no audio",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(Rejection),
}

impl Verdict {
    pub fn is_accept(self) -> bool {
        self == Verdict::Accept
    }
}

/// Applies a [`Query`] to candidates and owns the dedup set for one run.
#[derive(Debug)]
pub struct MatchEngine<'q> {
    query: &'q Query,
    unique_only: bool,
    seen: HashSet<String>,
}

impl<'q> MatchEngine<'q> {
    pub fn new(query: &'q Query, unique_only: bool) -> Self {
        Self {
            query,
            unique_only,
            seen: HashSet::new(),
        }
    }

    pub fn evaluate(&mut self, candidate: &Candidate, word_count: usize) -> Verdict {
        if !self
            .query
            .matches_text(&candidate.primary_text, &candidate.translated_text)
        {
            return Verdict::Reject(Rejection::Text);
        }

        if self.unique_only && !self.seen.insert(candidate.primary_text.clone()) {
            return Verdict::Reject(Rejection::Duplicate);
        }

        if !self.query.word_range().contains(word_count) {
            return Verdict::Reject(Rejection::WordCount);
        }

        if self.query.requires_audio() && candidate.audio_ref.is_empty() {
            return Verdict::Reject(Rejection::NoAudio);
        }

        Verdict::Accept
    }

    #[cfg(test)]
    fn seen_len(&self) -> usize {
        self.seen.len()
    }
}
