//! Word counting and difficulty scoring

use crate::lang::is_native_script;

/// Approximate word count for the studied script.
///
/// A word starts at a script character seen outside a run; whitespace ends
/// the run. Other characters (punctuation, digits, Latin) neither start nor
/// end a run. Unsegmented text therefore counts as a single word.
pub fn word_count(text: &str) -> usize {
    let mut words = 0;
    let mut in_word = false;

    for ch in text.chars() {
        if is_native_script(ch) {
            if !in_word {
                words += 1;
                in_word = true;
            }
        } else if ch.is_whitespace() {
            in_word = false;
        }
    }

    words
}

/// Difficulty is the character length of the primary text.
pub fn difficulty(primary_text: &str) -> usize {
    primary_text.chars().count()
}
