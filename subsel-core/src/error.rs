//! Error taxonomy for subsel-core
//!
//! Every variant here is fatal for a run. Recoverable conditions (a corpus
//! file that cannot be opened, a read failure halfway through a file, a show
//! missing from the language table) are logged and never reach this type.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid regex pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("either a query or at least one contains term must be provided")]
    EmptyQuery,

    #[error("root path does not exist: {}", .0.display())]
    MissingRoot(PathBuf),

    #[error("error walking corpus: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("malformed show language table: {0}")]
    ShowTable(#[from] toml::de::Error),

    #[error("invalid export index {0:?}: expected a non-negative integer")]
    InvalidIndex(String),

    #[error("export index {index} out of range (valid: 0..={})", .len.saturating_sub(1))]
    IndexOutOfRange { index: usize, len: usize },

    #[error("an output directory is required when exporting; create a working directory first")]
    MissingExportDir,

    #[error("cannot export into the shared temp root {}; create a dedicated working directory inside it", .0.display())]
    ForbiddenExportDir(PathBuf),

    #[error("output directory does not exist: {}", .0.display())]
    ExportDirNotFound(PathBuf),

    #[error("output path is not a directory: {}", .0.display())]
    ExportDirNotDirectory(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode results: {0}")]
    Encode(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
