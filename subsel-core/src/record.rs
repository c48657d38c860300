//! Sentence records and per-line extraction (subsel-core)

use std::path::PathBuf;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::columns::{ColumnLayout, AUDIO_COLUMN, CORE_COLUMNS, IMAGE_COLUMN};
use crate::error::{Error, Result};
use crate::lang::Language;
use crate::score;

/// Song/music notation; lines carrying it are lyrics, not dialogue.
pub const MUSIC_MARKER: char = '♪';

/// One aligned sentence pair accepted from the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceRecord {
    pub primary_text: String,
    pub translated_text: String,
    pub audio_ref: String,
    pub image_ref: String,
    pub source_show: String,
    pub language: Language,
    pub word_count: usize,
    pub difficulty: usize,
    /// Sibling `<file stem>.media` folder, without a trailing separator.
    pub media_dir: PathBuf,
    #[serde(skip)]
    raw_fields: Vec<String>,
}

/// Per-file attribution shared by every record of that file.
#[derive(Debug, Clone)]
pub struct Provenance {
    pub show: String,
    pub language: Language,
    pub media_dir: PathBuf,
}

impl SentenceRecord {
    /// Build a record from an accepted candidate. Difficulty is always
    /// derived from the primary text.
    pub fn new(candidate: Candidate, provenance: &Provenance, word_count: usize) -> Self {
        Self {
            difficulty: score::difficulty(&candidate.primary_text),
            primary_text: candidate.primary_text,
            translated_text: candidate.translated_text,
            audio_ref: candidate.audio_ref,
            image_ref: candidate.image_ref,
            source_show: provenance.show.clone(),
            language: provenance.language,
            word_count,
            media_dir: provenance.media_dir.clone(),
            raw_fields: candidate.raw_fields,
        }
    }

    /// The unmodified split of the source line.
    pub fn raw_fields(&self) -> &[String] {
        &self.raw_fields
    }

    /// The leading core columns of the source line, as exported.
    pub fn core_fields(&self) -> &[String] {
        let end = self.raw_fields.len().min(CORE_COLUMNS);
        &self.raw_fields[..end]
    }
}

/// A line that survived extraction but has not been matched yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub primary_text: String,
    pub translated_text: String,
    pub audio_ref: String,
    pub image_ref: String,
    pub raw_fields: Vec<String>,
}

/// Parses TSV lines into [`Candidate`]s.
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    markup: Regex,
    image_url: Regex,
}

impl RecordExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            markup: compile(r"<[^>]*>")?,
            image_url: compile(r#".*""(.*)"".*"#)?,
        })
    }

    /// Split `line` on tabs and extract it under `layout`.
    pub fn extract_line(&self, line: &str, layout: &ColumnLayout) -> Option<Candidate> {
        let fields = line.split('\t').map(str::to_string).collect();
        self.extract(fields, layout)
    }

    /// Returns `None` when the line is too short, has no translation after
    /// markup removal, or carries the music marker in either text.
    pub fn extract(&self, fields: Vec<String>, layout: &ColumnLayout) -> Option<Candidate> {
        if fields.len() < layout.required_fields() {
            return None;
        }

        let primary_text = fields[layout.primary].clone();
        let translated_text = self
            .markup
            .replace_all(&fields[layout.translation], "")
            .into_owned();

        if translated_text.is_empty()
            || translated_text.contains(MUSIC_MARKER)
            || primary_text.contains(MUSIC_MARKER)
        {
            return None;
        }

        let audio_ref = fields[AUDIO_COLUMN].clone();
        let image_ref = fields
            .get(IMAGE_COLUMN)
            .and_then(|field| self.image_url.captures(field))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        Some(Candidate {
            primary_text,
            translated_text,
            audio_ref,
            image_ref,
            raw_fields: fields,
        })
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
