//! subsel-core: sentence selection over bilingual subtitle corpora
//!
//! A corpus is a directory tree of tab-separated files exported from
//! subtitled shows and movies, one aligned line per row. This crate walks
//! such a tree, works out which show (and which language) every file belongs
//! to, pulls the studied-language text and its translation out of the right
//! columns, filters lines against a query and ranks what survives.
//!
//! ## Pipeline
//!
//! - [`shows`]: derive a show identifier from a path and look up its language
//! - [`columns`]: pick the text/translation columns for a file, or skip it
//! - [`record`]: turn one TSV line into a candidate sentence pair
//! - [`matcher`]: query, contains, exclude, dedup, word-count and audio checks
//! - [`score`]: script-aware word count and difficulty
//! - [`search`]: walk the corpus and collect accepted records
//! - [`rank`]: hardest first, then limit
//! - [`export`]: write selected source rows back out as TSV
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use subsel_core::query::{Query, QueryPattern};
//! use subsel_core::search::{search, SearchOptions};
//! use subsel_core::shows::ShowLanguageTable;
//!
//! let query = Query::new()
//!     .with_pattern(QueryPattern::compile("ไป", false)?)
//!     .with_excludes(vec!["ครับ".to_string()]);
//! let table = ShowLanguageTable::embedded()?;
//! let found = search(Path::new("/srv/corpus"), &query, &table, &SearchOptions::default())?;
//!
//! for (i, r) in found.results.iter().enumerate() {
//!     println!("{i}\t{}\t{}", r.primary_text, r.translated_text);
//! }
//! # Ok::<(), subsel_core::error::Error>(())
//! ```

pub mod columns;
pub mod discovery;
pub mod error;
pub mod export;
pub mod lang;
pub mod matcher;
pub mod output;
pub mod query;
pub mod rank;
pub mod record;
pub mod score;
pub mod search;
pub mod shows;

pub use error::{Error, Result};
