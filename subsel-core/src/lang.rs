//! Language tags attached to shows
//!
//! Tags are the short codes used by the show table (`th`, `en`, `jp`, `ko`).
//! Thai is the native language: the corpus is organised around it and word
//! counting follows its script.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "th")]
    Thai,
    #[serde(rename = "en")]
    English,
    #[serde(rename = "jp")]
    Japanese,
    #[serde(rename = "ko")]
    Korean,
}

impl Language {
    /// Tag assumed for shows that have no entry in the language table.
    pub const NATIVE: Language = Language::Thai;

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Thai => "th",
            Language::English => "en",
            Language::Japanese => "jp",
            Language::Korean => "ko",
        }
    }

    pub fn is_native(self) -> bool {
        self == Self::NATIVE
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language tag: {0:?}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "th" => Ok(Language::Thai),
            "en" => Ok(Language::English),
            "jp" => Ok(Language::Japanese),
            "ko" => Ok(Language::Korean),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

/// True for characters of the studied (Thai) script.
pub fn is_native_script(ch: char) -> bool {
    matches!(ch, '\u{0E01}'..='\u{0E3A}' | '\u{0E40}'..='\u{0E5B}')
}
