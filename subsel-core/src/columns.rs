//! Column layout resolution (subsel-core)
//!
//! Corpus files are positional TSV. Which columns hold the studied text and
//! its translation depends on the show's language and on the file's naming
//! convention:
//!
//! - `<name>.tsv`: the default export, native text in column 4 and the
//!   translation in column 5.
//! - `<name>2.tsv`: the marker-suffix variant produced for non-native shows,
//!   whose native-language line sits in column 10.
//! - `<name>3.tsv`: context (surrounding dialogue); never a source of
//!   candidates.

use std::path::{Path, PathBuf};

use crate::lang::Language;

/// Extension shared by every corpus file.
pub const CORPUS_EXTENSION: &str = ".tsv";
/// File-name suffix marking a non-native-language-aligned variant.
pub const MARKER_SUFFIX: &str = "2.tsv";
/// File-name suffix marking a context file.
pub const CONTEXT_SUFFIX: &str = "3.tsv";
/// Directory-name suffix for media folders; such directories are pruned.
pub const MEDIA_DIR_SUFFIX: &str = ".media";

pub const AUDIO_COLUMN: usize = 0;
pub const IMAGE_COLUMN: usize = 3;
pub const NATIVE_TEXT_COLUMN: usize = 4;
pub const TRANSLATION_COLUMN: usize = 5;
pub const MARKER_TEXT_COLUMN: usize = 10;
/// Leading columns copied by the exporter (audio, timing, episode, image,
/// text, translation); trailing context columns are dropped.
pub const CORE_COLUMNS: usize = 6;

/// Where the interesting fields of a corpus file live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub primary: usize,
    pub translation: usize,
    pub media_dir: PathBuf,
}

impl ColumnLayout {
    /// Minimum number of fields a line needs for this layout.
    pub fn required_fields(&self) -> usize {
        self.primary.max(self.translation) + 1
    }
}

/// Why a corpus file contributes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Context files hold surrounding dialogue only.
    ContextFile,
    /// Native-only mode and the show is not native.
    NonNativeShow,
    /// Native-only mode and the file is a marker-suffix variant.
    MarkerVariant,
    /// Non-native show without the marker suffix: the pairs live elsewhere.
    NoCanonicalPairs,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::ContextFile => "context file",
            SkipReason::NonNativeShow => "non-native show in native-only mode",
            SkipReason::MarkerVariant => "marker variant in native-only mode",
            SkipReason::NoCanonicalPairs => "non-native show without marker suffix",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Use(ColumnLayout),
    Skip(SkipReason),
}

/// Decide the column layout for `path`, or why it must be skipped.
///
/// The two native-only checks overlap for non-native marker files; both are
/// kept so that each condition skips on its own.
pub fn resolve(path: &Path, language: Language, native_only: bool) -> Resolution {
    let file_name = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();

    if file_name.ends_with(CONTEXT_SUFFIX) {
        return Resolution::Skip(SkipReason::ContextFile);
    }

    let marked = file_name.ends_with(MARKER_SUFFIX);

    if native_only && !language.is_native() {
        return Resolution::Skip(SkipReason::NonNativeShow);
    }
    if native_only && marked {
        return Resolution::Skip(SkipReason::MarkerVariant);
    }

    if language.is_native() {
        return Resolution::Use(ColumnLayout {
            primary: NATIVE_TEXT_COLUMN,
            translation: TRANSLATION_COLUMN,
            media_dir: media_dir_for(path, CORPUS_EXTENSION),
        });
    }

    if marked {
        Resolution::Use(ColumnLayout {
            primary: MARKER_TEXT_COLUMN,
            translation: TRANSLATION_COLUMN,
            media_dir: media_dir_for(path, MARKER_SUFFIX),
        })
    } else {
        Resolution::Skip(SkipReason::NoCanonicalPairs)
    }
}

/// `/c/Show E01.tsv` -> `/c/Show E01.media`, or for a marker file
/// `/c/Show E012.tsv` -> `/c/Show E01.media`.
fn media_dir_for(path: &Path, suffix: &str) -> PathBuf {
    let raw = path.to_string_lossy();
    let stem = raw.strip_suffix(suffix).unwrap_or(&raw);
    PathBuf::from(format!("{stem}{MEDIA_DIR_SUFFIX}"))
}

/// True when `file_name` is a candidate corpus file (right extension and not
/// a context file).
pub fn is_corpus_file(file_name: &str) -> bool {
    file_name.ends_with(CORPUS_EXTENSION) && !file_name.ends_with(CONTEXT_SUFFIX)
}

/// True when a directory should never be descended into.
pub fn is_media_dir(dir_name: &str) -> bool {
    dir_name.ends_with(MEDIA_DIR_SUFFIX)
}
