use proptest::prelude::*;

use std::path::PathBuf;

use subsel_core::lang::Language;
use subsel_core::rank::rank;
use subsel_core::record::{Candidate, Provenance, SentenceRecord};
use subsel_core::score::{difficulty, word_count};

#[test]
fn counts_two_runs_split_by_a_space() {
    assert_eq!(word_count("กขค กข"), 2);
}

fn thai_word() -> impl Strategy<Value = String> {
    proptest::collection::vec(0x0E01u32..=0x0E2E, 1..6).prop_map(|cps| {
        cps.into_iter()
            .filter_map(char::from_u32)
            .collect::<String>()
    })
}

fn record(primary: String, position: usize) -> SentenceRecord {
    let candidate = Candidate {
        primary_text: primary,
        translated_text: position.to_string(),
        audio_ref: String::new(),
        image_ref: String::new(),
        raw_fields: Vec::new(),
    };
    let provenance = Provenance {
        show: "show".to_string(),
        language: Language::Thai,
        media_dir: PathBuf::from("show.media"),
    };
    SentenceRecord::new(candidate, &provenance, 1)
}

proptest! {
    #[test]
    fn space_joined_runs_count_once_each(words in proptest::collection::vec(thai_word(), 0..8)) {
        let text = words.join(" ");
        prop_assert_eq!(word_count(&text), words.len());
    }

    #[test]
    fn punctuation_between_runs_never_splits(words in proptest::collection::vec(thai_word(), 1..8)) {
        let text = words.join("...");
        prop_assert_eq!(word_count(&text), 1);
    }

    #[test]
    fn never_exceeds_script_characters(text in "\\PC{0,40}") {
        let script_chars = text
            .chars()
            .filter(|c| matches!(*c, '\u{0E01}'..='\u{0E3A}' | '\u{0E40}'..='\u{0E5B}'))
            .count();
        prop_assert!(word_count(&text) <= script_chars);
    }

    #[test]
    fn difficulty_is_character_length(text in "\\PC{0,40}") {
        prop_assert_eq!(difficulty(&text), text.chars().count());
    }

    #[test]
    fn ranking_is_descending_and_stable(texts in proptest::collection::vec("[a-c]{0,6}", 0..30)) {
        let mut records: Vec<SentenceRecord> = texts
            .into_iter()
            .enumerate()
            .map(|(i, t)| record(t, i))
            .collect();
        rank(&mut records);

        for pair in records.windows(2) {
            prop_assert!(pair[0].difficulty >= pair[1].difficulty);
            if pair[0].difficulty == pair[1].difficulty {
                let first: usize = pair[0].translated_text.parse().unwrap();
                let second: usize = pair[1].translated_text.parse().unwrap();
                prop_assert!(first < second);
            }
        }
    }
}
