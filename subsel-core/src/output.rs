//! Result encoders for subsel-core

use std::io::Write;

use crate::error::{Error, Result};
use crate::record::SentenceRecord;
use crate::search::SearchResults;

/// Write the result envelope as indented JSON.
pub fn write_json_pretty(results: &SearchResults, mut w: impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    w.write_all(json.as_bytes()).map_err(stdout_err)?;
    w.write_all(b"\n").map_err(stdout_err)?;
    Ok(())
}

/// Generic CSV with a header row.
pub fn write_csv(results: &[SentenceRecord], mut w: impl Write) -> Result<()> {
    write_csv_row(
        &mut w,
        &["Primary", "Translation", "Audio", "Image", "Show", "Language", "WordCount"],
    )?;

    for r in results {
        let language = r.language.to_string();
        let words = r.word_count.to_string();
        write_csv_row(
            &mut w,
            &[
                &r.primary_text,
                &r.translated_text,
                &r.audio_ref,
                &r.image_ref,
                &r.source_show,
                &language,
                &words,
            ],
        )?;
    }
    Ok(())
}

/// CSV laid out for flashcard import: audio on the front, media as tags.
pub fn write_anki_csv(results: &[SentenceRecord], mut w: impl Write) -> Result<()> {
    write_csv_row(
        &mut w,
        &["Front", "Primary", "Translation", "Audio", "Image", "Show"],
    )?;

    for r in results {
        let audio = sound_tag(&r.audio_ref);
        let image = image_tag(&r.image_ref);
        write_csv_row(
            &mut w,
            &[
                &audio,
                &r.primary_text,
                &r.translated_text,
                &audio,
                &image,
                &r.source_show,
            ],
        )?;
    }
    Ok(())
}

fn sound_tag(audio: &str) -> String {
    if audio.is_empty() || audio.starts_with("[sound:") {
        audio.to_string()
    } else {
        format!("[sound:{audio}]")
    }
}

fn image_tag(image: &str) -> String {
    if image.is_empty() {
        String::new()
    } else {
        format!("<img src=\"{image}\">")
    }
}

fn write_csv_row(w: &mut impl Write, fields: &[&str]) -> Result<()> {
    let line: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
    writeln!(w, "{}", line.join(",")).map_err(stdout_err)
}

fn csv_field(field: &str) -> String {
    let needs_quotes = field.contains([',', '"', '\r', '\n']) || field.starts_with([' ', '\t']);
    if needs_quotes {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn stdout_err(err: std::io::Error) -> Error {
    Error::io("<output>", err)
}
