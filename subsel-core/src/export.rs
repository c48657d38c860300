//! Selective re-export of source corpus rows (subsel-core)
//!
//! Selected results are written back as TSV using their untouched source
//! fields, cut to the core columns. Every check (indices, destination) runs
//! before the file is created, and exactly one new file is written per call.

use std::env;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};

use chrono::Local;
use tracing::debug;

use crate::error::{Error, Result};
use crate::record::SentenceRecord;

const EXPORT_PREFIX: &str = "tsv_export_";
const EXPORT_EXTENSION: &str = "tsv";

/// Parse a comma-separated index list such as `"0, 3,5"`.
pub fn parse_indices(raw: &str) -> Result<Vec<usize>> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<usize>()
                .map_err(|_| Error::InvalidIndex(token.to_string()))
        })
        .collect()
}

/// Write the core fields of `results[i]` for each `i` in `indices` (in that
/// order) to a fresh file in `dest`, returning its path.
pub fn export_rows(
    results: &[SentenceRecord],
    indices: &[usize],
    dest: Option<&Path>,
) -> Result<PathBuf> {
    validate_indices(indices, results.len())?;
    let dest = validate_destination(dest)?;

    let body = render_rows(results, indices);
    let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let path = write_new_file(dest, &stamp, body.as_bytes())?;

    debug!(file = %path.display(), rows = indices.len(), "exported rows");
    Ok(path)
}

fn validate_indices(indices: &[usize], len: usize) -> Result<()> {
    match indices.iter().find(|&&idx| idx >= len) {
        Some(&index) => Err(Error::IndexOutOfRange { index, len }),
        None => Ok(()),
    }
}

fn validate_destination(dest: Option<&Path>) -> Result<&Path> {
    let dest = match dest {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => return Err(Error::MissingExportDir),
    };

    if is_temp_root(dest) {
        return Err(Error::ForbiddenExportDir(dest.to_path_buf()));
    }

    match fs::metadata(dest) {
        Ok(meta) if meta.is_dir() => Ok(dest),
        Ok(_) => Err(Error::ExportDirNotDirectory(dest.to_path_buf())),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err(Error::ExportDirNotFound(dest.to_path_buf()))
        }
        Err(err) => Err(Error::io(dest, err)),
    }
}

/// `/tmp` itself (or the platform temp dir), but not directories below it.
fn is_temp_root(dir: &Path) -> bool {
    let normalized = normalize(dir);
    normalized == normalize(Path::new("/tmp")) || normalized == normalize(&env::temp_dir())
}

fn normalize(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn render_rows(results: &[SentenceRecord], indices: &[usize]) -> String {
    let mut body = String::new();
    for &idx in indices {
        body.push_str(&results[idx].core_fields().join("\t"));
        body.push('\n');
    }
    body
}

/// Create `tsv_export_<stamp>.tsv`, or `tsv_export_<stamp>_<n>.tsv` when
/// that name is taken. A file whose write fails is removed again.
fn write_new_file(dir: &Path, stamp: &str, contents: &[u8]) -> Result<PathBuf> {
    let mut attempt = 0usize;
    loop {
        let name = if attempt == 0 {
            format!("{EXPORT_PREFIX}{stamp}.{EXPORT_EXTENSION}")
        } else {
            format!("{EXPORT_PREFIX}{stamp}_{attempt}.{EXPORT_EXTENSION}")
        };
        let path = dir.join(name);

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                attempt += 1;
                continue;
            }
            Err(err) => return Err(Error::io(&path, err)),
        };

        if let Err(err) = file.write_all(contents).and_then(|_| file.sync_all()) {
            drop(file);
            let _ = fs::remove_file(&path);
            return Err(Error::io(&path, err));
        }

        return Ok(path);
    }
}
