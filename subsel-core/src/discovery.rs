//! Corpus discovery helpers for subsel-core

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::columns::{is_corpus_file, is_media_dir};
use crate::error::{Error, Result};

/// Path to a candidate corpus file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusFileRef {
    pub path: PathBuf,
}

/// Trait for enumerating corpus files from some backing store.
pub trait CorpusDiscovery {
    fn discover(&self) -> Result<Vec<CorpusFileRef>>;
}

/// Recursive filesystem walker that collects `.tsv` corpus files, pruning
/// `.media` directories and ignoring context files.
///
/// Entries are visited in file-name order so repeated runs see the corpus in
/// the same sequence.
#[derive(Debug, Clone)]
pub struct PathDiscovery {
    root: PathBuf,
    follow_symlinks: bool,
}

impl PathDiscovery {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_symlinks: false,
        }
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CorpusDiscovery for PathDiscovery {
    fn discover(&self) -> Result<Vec<CorpusFileRef>> {
        if !self.root.exists() {
            return Err(Error::MissingRoot(self.root.clone()));
        }

        let mut found = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_pruned(entry));

        for entry in walker {
            let entry = entry?;
            if is_regular_file(&entry) && is_corpus_file(&file_name(&entry)) {
                found.push(CorpusFileRef {
                    path: entry.into_path(),
                });
            }
        }

        Ok(found)
    }
}

fn file_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().into_owned()
}

/// Links to files are read even when directory links are not followed.
fn is_regular_file(entry: &DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }
    entry.path_is_symlink()
        && fs::metadata(entry.path())
            .map(|meta| meta.is_file())
            .unwrap_or(false)
}

// The root is walked even when its own name ends in `.media`; only media
// folders below it are pruned.
fn is_pruned(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && is_media_dir(&file_name(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn discovers_nested_tsv_files() {
        let tmp = tempdir().expect("tempdir");
        let nested = tmp.path().join("Hormones/S01");
        fs::create_dir_all(&nested).expect("mkdir");
        let tsv = nested.join("Hormones E01.tsv");
        fs::write(&tsv, b"").expect("touch tsv");

        let files = PathDiscovery::new(tmp.path()).discover().expect("discover");

        assert!(files.iter().any(|f| f.path == tsv));
    }

    #[test]
    fn prunes_media_directories() {
        let tmp = tempdir().expect("tempdir");
        let media = tmp.path().join("ep.media");
        fs::create_dir_all(&media).expect("mkdir");
        fs::write(media.join("stray.tsv"), b"").expect("touch");
        fs::write(tmp.path().join("ep.tsv"), b"").expect("touch");

        let files = PathDiscovery::new(tmp.path()).discover().expect("discover");

        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("ep.tsv"));
    }

    #[test]
    fn root_may_itself_end_in_media() {
        let tmp = tempdir().expect("tempdir");
        let root = tmp.path().join("corpus.media");
        fs::create_dir_all(&root).expect("mkdir");
        fs::write(root.join("ep.tsv"), b"").expect("touch");

        let files = PathDiscovery::new(&root).discover().expect("discover");
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn visits_in_name_order() {
        let tmp = tempdir().expect("tempdir");
        for name in ["c.tsv", "a.tsv", "b.tsv"] {
            fs::write(tmp.path().join(name), b"").expect("touch");
        }

        let files = PathDiscovery::new(tmp.path()).discover().expect("discover");
        let names: Vec<String> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.tsv", "b.tsv", "c.tsv"]);
    }

    #[cfg(unix)]
    #[test]
    fn reads_linked_files_without_following_directory_links() {
        use std::os::unix::fs::symlink;

        let tmp = tempdir().expect("tempdir");
        let store = tmp.path().join("store");
        let root = tmp.path().join("corpus");
        fs::create_dir_all(store.join("S01")).expect("mkdir store");
        fs::create_dir_all(&root).expect("mkdir root");
        fs::write(store.join("real.tsv"), b"").expect("touch tsv");
        fs::write(store.join("S01/inner.tsv"), b"").expect("touch nested");
        symlink(store.join("real.tsv"), root.join("ep.tsv")).expect("file link");
        symlink(store.join("S01"), root.join("S01")).expect("dir link");
        symlink(store.join("gone.tsv"), root.join("dangling.tsv")).expect("dangling link");

        let files = PathDiscovery::new(&root).discover().expect("discover");

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, root.join("ep.tsv"));
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinks_when_enabled() {
        use std::os::unix::fs::symlink;

        let tmp = tempdir().expect("tempdir");
        let real_dir = tmp.path().join("real");
        let link_dir = tmp.path().join("link");
        fs::create_dir_all(&real_dir).expect("mkdir real");
        fs::write(real_dir.join("linked.tsv"), b"").expect("touch tsv");
        symlink(&real_dir, &link_dir).expect("symlink");

        let files = PathDiscovery::new(&link_dir)
            .follow_symlinks(true)
            .discover()
            .expect("discover");

        assert!(files.iter().any(|f| f.path.ends_with("linked.tsv")));
    }
}
