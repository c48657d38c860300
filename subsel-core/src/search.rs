//! Corpus walking and the search pipeline (subsel-core)

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::columns::{self, ColumnLayout, Resolution};
use crate::discovery::{CorpusDiscovery, PathDiscovery};
use crate::error::Result;
use crate::matcher::{MatchEngine, Verdict};
use crate::query::Query;
use crate::rank;
use crate::record::{Provenance, RecordExtractor, SentenceRecord};
use crate::score;
use crate::shows::{ShowClassifier, ShowLanguageTable};

/// Default cap on returned results.
pub const DEFAULT_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Only native shows, and never their marker-suffix variants.
    pub native_only: bool,
    /// Drop repeated primary texts.
    pub unique_only: bool,
    /// Maximum number of results; `None` keeps everything.
    pub limit: Option<usize>,
    pub follow_symlinks: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            native_only: false,
            unique_only: true,
            limit: Some(DEFAULT_LIMIT),
            follow_symlinks: false,
        }
    }
}

/// Ranked results handed to formatters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub results: Vec<SentenceRecord>,
    /// Matches before the limit was applied.
    pub total_found: usize,
    /// Matches actually returned.
    pub returned: usize,
}

/// Walk `root`, collect matching records, rank them by difficulty and apply
/// the limit.
pub fn search(
    root: &Path,
    query: &Query,
    table: &ShowLanguageTable,
    opts: &SearchOptions,
) -> Result<SearchResults> {
    query.ensure_selective()?;

    let discovery = PathDiscovery::new(root).follow_symlinks(opts.follow_symlinks);
    let walker = CorpusWalker::new(query, table, opts)?;
    let mut results = walker.walk(&discovery)?;
    let total_found = results.len();

    rank::rank(&mut results);
    rank::truncate(&mut results, opts.limit);

    debug!(total_found, returned = results.len(), "search finished");

    Ok(SearchResults {
        query: query.query_text().to_string(),
        returned: results.len(),
        total_found,
        results,
    })
}

/// Drives classification, column resolution, extraction, matching and
/// scoring over every discovered corpus file.
#[derive(Debug)]
pub struct CorpusWalker<'a> {
    query: &'a Query,
    table: &'a ShowLanguageTable,
    opts: &'a SearchOptions,
    classifier: ShowClassifier,
    extractor: RecordExtractor,
}

impl<'a> CorpusWalker<'a> {
    pub fn new(
        query: &'a Query,
        table: &'a ShowLanguageTable,
        opts: &'a SearchOptions,
    ) -> Result<Self> {
        Ok(Self {
            query,
            table,
            opts,
            classifier: ShowClassifier::standard()?,
            extractor: RecordExtractor::new()?,
        })
    }

    /// Collect accepted records in encounter order (unranked).
    pub fn walk(&self, discovery: &impl CorpusDiscovery) -> Result<Vec<SentenceRecord>> {
        let mut engine = MatchEngine::new(self.query, self.opts.unique_only);
        let mut results = Vec::new();

        for file in discovery.discover()? {
            let show = self.classifier.classify(&file.path);
            let language = self.table.language_for(&show);

            let layout = match columns::resolve(&file.path, language, self.opts.native_only) {
                Resolution::Use(layout) => layout,
                Resolution::Skip(reason) => {
                    debug!(file = %file.path.display(), show = %show, lang = %language, reason = reason.as_str(), "skipping file");
                    continue;
                }
            };

            let provenance = Provenance {
                show,
                language,
                media_dir: layout.media_dir.clone(),
            };
            debug!(file = %file.path.display(), "processing file");
            self.scan_file(&file.path, &layout, &provenance, &mut engine, &mut results);
        }

        Ok(results)
    }

    /// Per-file failures are logged and never abort the walk. Mis-encoded
    /// lines are decoded lossily; an I/O error ends the file but keeps the
    /// records read before it.
    fn scan_file(
        &self,
        path: &Path,
        layout: &ColumnLayout,
        provenance: &Provenance,
        engine: &mut MatchEngine<'_>,
        out: &mut Vec<SentenceRecord>,
    ) {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                warn!(file = %path.display(), error = %err, "failed to open file");
                return;
            }
        };

        for (idx, line) in BufReader::new(file).split(b'\n').enumerate() {
            let bytes = match line {
                Ok(bytes) => bytes,
                Err(err) => {
                    warn!(file = %path.display(), line = idx + 1, error = %err, "error reading file");
                    return;
                }
            };
            let line = decode_line(&bytes);
            if matches!(line, Cow::Owned(_)) {
                debug!(file = %path.display(), line = idx + 1, "line is not valid UTF-8");
            }

            let Some(candidate) = self.extractor.extract_line(&line, layout) else {
                continue;
            };

            let word_count = score::word_count(&candidate.primary_text);
            match engine.evaluate(&candidate, word_count) {
                Verdict::Accept => out.push(SentenceRecord::new(candidate, provenance, word_count)),
                Verdict::Reject(reason) => {
                    trace!(file = %path.display(), line = idx + 1, reason = reason.as_str(), "rejected line");
                }
            }
        }
    }
}

/// Drop a trailing `\r` and decode, replacing invalid UTF-8 sequences.
fn decode_line(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes)
}
