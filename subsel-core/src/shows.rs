//! Show classification and show-language attribution (subsel-core)
//!
//! A corpus file belongs to a show. The show identifier is derived from the
//! file's location by an ordered chain of rules, first match wins:
//!
//! 1. season folder: `.../<show>/S<number>/...` yields `<show>`
//! 2. movie with year: `<title> 19xx...` or `<title> 20xx...` yields `<title>`
//! 3. file stem: the file name without its `.tsv` extension
//!
//! The identifier is then looked up in a [`ShowLanguageTable`] to learn which
//! language the show was produced in.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::columns::CORPUS_EXTENSION;
use crate::error::{Error, Result};
use crate::lang::Language;

const EMBEDDED_TABLE: &str = include_str!("../data/shows.toml");

/// One link in the classification chain.
pub trait ShowRule {
    fn name(&self) -> &'static str;

    /// Return the show identifier if this rule recognises the path.
    fn classify(&self, path: &str, file_name: &str) -> Option<String>;
}

/// `.../<show>/S01/...`
#[derive(Debug, Clone)]
pub struct SeasonFolder {
    pattern: Regex,
}

impl SeasonFolder {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: compile(r".*/(.*)/S[0-9]+")?,
        })
    }
}

impl ShowRule for SeasonFolder {
    fn name(&self) -> &'static str {
        "season-folder"
    }

    fn classify(&self, path: &str, _file_name: &str) -> Option<String> {
        self.pattern
            .captures(path)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// `Some Title 2016 ....tsv`
#[derive(Debug, Clone)]
pub struct MovieYear {
    pattern: Regex,
}

impl MovieYear {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: compile(r"(.*?) [12][0-9].*")?,
        })
    }
}

impl ShowRule for MovieYear {
    fn name(&self) -> &'static str {
        "movie-year"
    }

    fn classify(&self, _path: &str, file_name: &str) -> Option<String> {
        self.pattern
            .captures(file_name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Fallback: the file name minus the corpus extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStem;

impl ShowRule for FileStem {
    fn name(&self) -> &'static str {
        "file-stem"
    }

    fn classify(&self, _path: &str, file_name: &str) -> Option<String> {
        Some(strip_extension(file_name).to_string())
    }
}

fn strip_extension(file_name: &str) -> &str {
    file_name
        .strip_suffix(CORPUS_EXTENSION)
        .unwrap_or(file_name)
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Ordered chain of [`ShowRule`]s.
pub struct ShowClassifier {
    rules: Vec<Box<dyn ShowRule>>,
}

impl ShowClassifier {
    /// The standard chain: season folder, then movie year, then file stem.
    pub fn standard() -> Result<Self> {
        Ok(Self::with_rules(vec![
            Box::new(SeasonFolder::new()?),
            Box::new(MovieYear::new()?),
            Box::new(FileStem),
        ]))
    }

    pub fn with_rules(rules: Vec<Box<dyn ShowRule>>) -> Self {
        Self { rules }
    }

    /// Derive the show identifier for `path`. Never fails: if no rule
    /// matches, the raw file stem is returned.
    pub fn classify(&self, path: &Path) -> String {
        let full = path.to_string_lossy();
        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy())
            .unwrap_or_else(|| full.clone());

        for rule in &self.rules {
            if let Some(show) = rule.classify(&full, &file_name) {
                debug!(rule = rule.name(), show = %show, path = %full, "classified show");
                return show;
            }
        }

        strip_extension(&file_name).to_string()
    }
}

impl std::fmt::Debug for ShowClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.rules.iter().map(|r| r.name()).collect();
        f.debug_struct("ShowClassifier").field("rules", &names).finish()
    }
}

#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default)]
    shows: HashMap<String, Language>,
}

/// Static mapping from show identifier to the language it was produced in.
#[derive(Debug, Clone, Default)]
pub struct ShowLanguageTable {
    shows: HashMap<String, Language>,
}

impl ShowLanguageTable {
    /// The table compiled into the crate from `data/shows.toml`.
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(EMBEDDED_TABLE)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let file: TableFile = toml::from_str(raw)?;
        Ok(Self { shows: file.shows })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&raw)
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Language)>,
        S: Into<String>,
    {
        Self {
            shows: entries.into_iter().map(|(s, l)| (s.into(), l)).collect(),
        }
    }

    pub fn get(&self, show: &str) -> Option<Language> {
        self.shows.get(show).copied()
    }

    /// Language for `show`, falling back to [`Language::NATIVE`] when the
    /// show has no attribution.
    pub fn language_for(&self, show: &str) -> Language {
        match self.get(show) {
            Some(lang) => lang,
            None => {
                debug!(show, "show has no language attribution");
                Language::NATIVE
            }
        }
    }
}
