use std::fs;

use subsel_core::output::{write_anki_csv, write_csv, write_json_pretty};
use subsel_core::query::Query;
use subsel_core::search::{search, SearchOptions, SearchResults};
use subsel_core::shows::ShowLanguageTable;

fn sample_results() -> SearchResults {
    let corpus = tempfile::tempdir().expect("tempdir");
    let rows = [
        "[sound:1.mp3]\t00:01\tE01\t\"<img src=\"\"p1.jpg\"\">\"\tไปไหน\tWhere, exactly?",
        "2.mp3\t00:02\tE01\t\tไปกินข้าวกัน\tLet's \"eat\"",
    ];
    fs::write(corpus.path().join("Tunnel.tsv"), rows.join("\n")).expect("write corpus");

    let query = Query::new().with_contains(vec!["ไป".to_string()]);
    search(
        corpus.path(),
        &query,
        &ShowLanguageTable::default(),
        &SearchOptions::default(),
    )
    .expect("search")
}

#[test]
fn writes_pretty_json_envelope() {
    let found = sample_results();
    let mut buf = Vec::new();

    write_json_pretty(&found, &mut buf).expect("write");
    let text = String::from_utf8(buf).expect("utf8");

    let parsed: serde_json::Value = serde_json::from_str(&text).expect("json");
    assert_eq!(parsed["query"], "");
    assert_eq!(parsed["total_found"], 2);
    assert_eq!(parsed["returned"], 2);
    let results = parsed["results"].as_array().expect("results array");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["primary_text"], "ไปกินข้าวกัน");
    assert_eq!(results[0]["source_show"], "Tunnel");
    assert_eq!(results[0]["language"], "th");
    assert!(results[0].get("raw_fields").is_none());
    assert!(text.contains("\n  \"results\""), "expected indented output");
}

#[test]
fn writes_csv_with_header_and_quoting() {
    let found = sample_results();
    let mut buf = Vec::new();

    write_csv(&found.results, &mut buf).expect("write");
    let text = String::from_utf8(buf).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines[0],
        "Primary,Translation,Audio,Image,Show,Language,WordCount"
    );
    assert_eq!(
        lines[1],
        "ไปกินข้าวกัน,\"Let's \"\"eat\"\"\",2.mp3,,Tunnel,th,1"
    );
    assert_eq!(
        lines[2],
        "ไปไหน,\"Where, exactly?\",[sound:1.mp3],p1.jpg,Tunnel,th,1"
    );
}

#[test]
fn writes_flashcard_csv_with_media_tags() {
    let found = sample_results();
    let mut buf = Vec::new();

    write_anki_csv(&found.results, &mut buf).expect("write");
    let text = String::from_utf8(buf).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "Front,Primary,Translation,Audio,Image,Show");
    assert_eq!(
        lines[1],
        "[sound:2.mp3],ไปกินข้าวกัน,\"Let's \"\"eat\"\"\",[sound:2.mp3],,Tunnel"
    );
    assert_eq!(
        lines[2],
        "[sound:1.mp3],ไปไหน,\"Where, exactly?\",[sound:1.mp3],\"<img src=\"\"p1.jpg\"\">\",Tunnel"
    );
}
