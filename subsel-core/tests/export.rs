use std::fs;
use std::path::{Path, PathBuf};

use subsel_core::error::Error;
use subsel_core::export::{export_rows, parse_indices};
use subsel_core::query::Query;
use subsel_core::record::SentenceRecord;
use subsel_core::search::{search, SearchOptions};
use subsel_core::shows::ShowLanguageTable;

/// Three records with distinct difficulties, eight source columns each.
fn ranked_results() -> Vec<SentenceRecord> {
    let corpus = tempfile::tempdir().expect("tempdir");
    let rows = [
        "[sound:1.mp3]\t00:01\tE01\timg1\tไปไหน\tWhere?\tctx-a\tctx-b",
        "[sound:2.mp3]\t00:02\tE01\timg2\tไปกินข้าวกัน\tLet's eat\tctx-a\tctx-b",
        "[sound:3.mp3]\t00:03\tE01\timg3\tไปกันเถอะ\tLet's go\tctx-a\tctx-b",
    ];
    fs::write(corpus.path().join("Tunnel.tsv"), rows.join("\n")).expect("write corpus");

    let query = Query::new().with_contains(vec!["ไป".to_string()]);
    let table = ShowLanguageTable::default();
    search(corpus.path(), &query, &table, &SearchOptions::default())
        .expect("search")
        .results
}

fn files_in(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .expect("read dir")
        .map(|e| e.expect("entry").path())
        .collect()
}

#[test]
fn exports_core_columns_in_request_order() {
    let results = ranked_results();
    let out = tempfile::tempdir().expect("out dir");
    let indices = parse_indices("2,0").expect("indices");

    let path = export_rows(&results, &indices, Some(out.path())).expect("export");

    assert_eq!(path.parent(), Some(out.path()));
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("tsv_export_") && name.ends_with(".tsv"));

    let text = fs::read_to_string(&path).expect("read export");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], results[2].core_fields().join("\t"));
    assert_eq!(lines[1], results[0].core_fields().join("\t"));

    for line in lines {
        assert_eq!(line.split('\t').count(), 6);
    }
    assert!(text.starts_with("[sound:1.mp3]\t00:01\tE01\timg1\tไปไหน\tWhere?\n"));
}

#[test]
fn out_of_range_index_writes_nothing() {
    let results = ranked_results();
    let out = tempfile::tempdir().expect("out dir");

    let err = export_rows(&results, &[0, 3], Some(out.path())).unwrap_err();

    assert!(matches!(err, Error::IndexOutOfRange { index: 3, len: 3 }));
    assert!(files_in(out.path()).is_empty());
}

#[test]
fn destination_must_be_given() {
    let results = ranked_results();
    assert!(matches!(
        export_rows(&results, &[0], None),
        Err(Error::MissingExportDir)
    ));
    assert!(matches!(
        export_rows(&results, &[0], Some(Path::new(""))),
        Err(Error::MissingExportDir)
    ));
}

#[test]
fn shared_temp_root_is_refused() {
    let results = ranked_results();
    let err = export_rows(&results, &[0], Some(Path::new("/tmp"))).unwrap_err();
    assert!(matches!(err, Error::ForbiddenExportDir(_)));

    let err = export_rows(&results, &[0], Some(&std::env::temp_dir())).unwrap_err();
    assert!(matches!(err, Error::ForbiddenExportDir(_)));
}

#[test]
fn destination_is_never_created() {
    let results = ranked_results();
    let parent = tempfile::tempdir().expect("parent");
    let missing = parent.path().join("not-yet");

    let err = export_rows(&results, &[0], Some(&missing)).unwrap_err();

    assert!(matches!(err, Error::ExportDirNotFound(_)));
    assert!(!missing.exists());
}

#[test]
fn destination_must_be_a_directory() {
    let results = ranked_results();
    let parent = tempfile::tempdir().expect("parent");
    let file = parent.path().join("plain-file");
    fs::write(&file, b"").expect("touch");

    let err = export_rows(&results, &[0], Some(&file)).unwrap_err();
    assert!(matches!(err, Error::ExportDirNotDirectory(_)));
}
