//! End-to-end coverage of single-word correction and dictionary loading
//! through the public `SpellCorrector` API.

use spellcheck::{SpellCheckerConfig, SpellCorrector, SuggestedCorrection};
use std::io::Write;

fn write_temp(lines: &[&str]) -> tempfile_path::TempFile {
    tempfile_path::TempFile::with_lines(lines)
}

/// Minimal scratch-file helper: this crate doesn't depend on `tempfile`, so
/// tests write directly under the OS temp dir and clean up on drop.
mod tempfile_path {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    pub struct TempFile(pub PathBuf);

    impl TempFile {
        pub fn with_lines(lines: &[&str]) -> Self {
            let n = COUNTER.fetch_add(1, Ordering::Relaxed);
            let mut path = std::env::temp_dir();
            path.push(format!("spellcheck-test-{}-{}.txt", std::process::id(), n));
            let mut f = std::fs::File::create(&path).unwrap();
            for line in lines {
                writeln!(f, "{line}").unwrap();
            }
            TempFile(path)
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }
}

#[test]
fn single_deletion_typo_is_corrected() {
    let mut c = SpellCorrector::new("en", SpellCheckerConfig::default()).unwrap();
    c.add_word_to_dictionary("problem", 50);
    match c.suggest_single_word_corrections("problm") {
        SuggestedCorrection::Suggestions(s) => assert_eq!(s[0].term, "problem"),
        SuggestedCorrection::NoSuggestions => panic!("expected a suggestion"),
    }
}

#[test]
fn word_far_outside_max_distance_has_no_suggestions() {
    let mut c = SpellCorrector::new("en", SpellCheckerConfig::default()).unwrap();
    c.add_word_to_dictionary("problem", 50);
    matches!(
        c.suggest_single_word_corrections("xyzpqrst"),
        SuggestedCorrection::NoSuggestions
    );
}

#[test]
fn frequency_file_is_loaded_with_term_and_count_columns() {
    let file = write_temp(&["problem 50", "solution 40", "the 100"]);
    let config = SpellCheckerConfig::default();
    let mut corrector = SpellCorrector::from_frequency_file(&file.0, "en", 0, 1, config).unwrap();
    match corrector.suggest_single_word_corrections("problm") {
        SuggestedCorrection::Suggestions(s) => assert_eq!(s[0].term, "problem"),
        SuggestedCorrection::NoSuggestions => panic!("expected a suggestion"),
    }
}

#[test]
fn word_list_file_counts_duplicates() {
    let file = write_temp(&["cat cat dog", "cat"]);
    let config = SpellCheckerConfig::default();
    let mut corrector = SpellCorrector::from_word_list_file(&file.0, "en", config).unwrap();
    match corrector.suggest_single_word_corrections("cat") {
        SuggestedCorrection::NoSuggestions => {}
        SuggestedCorrection::Suggestions(_) => panic!("cat is an exact dictionary hit"),
    }
    let _ = corrector.suggest_single_word_corrections("dog");
}

#[test]
fn save_and_load_round_trips_corrections() {
    let mut c = SpellCorrector::new("en", SpellCheckerConfig::default()).unwrap();
    c.add_word_to_dictionary("problem", 50);
    c.add_word_to_dictionary("solution", 40);

    let mut path = std::env::temp_dir();
    path.push(format!("spellcheck-snapshot-{}-{:p}.json", std::process::id(), &c));
    c.save(&path).unwrap();

    let mut reloaded = SpellCorrector::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    match reloaded.suggest_single_word_corrections("problm") {
        SuggestedCorrection::Suggestions(s) => assert_eq!(s[0].term, "problem"),
        SuggestedCorrection::NoSuggestions => panic!("expected a suggestion after reload"),
    }
}
