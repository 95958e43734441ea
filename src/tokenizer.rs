//! Default tokenizer: lowercases, strips a fixed punctuation set, splits on
//! whitespace. Grounded on `text_to_word_sequence` from the original
//! `symspellcompound` source. The core index and lookup functions never call
//! this directly (the tokenizer is an external collaborator per spec); it is
//! supplied for the dictionary loader and demo binaries.

const FILTERED_CHARS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

/// Splits `text` into lowercase word tokens, stripping punctuation.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        if FILTERED_CHARS.contains(c) {
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out.split(' ').filter(|s| !s.is_empty()).map(String::from).collect()
}

/// Splits an already-tokenized phrase on ASCII whitespace, for use by
/// `lookup_compound` which operates on whitespace-separated terms directly.
pub fn split_phrase(phrase: &str) -> Vec<&str> {
    phrase.split_whitespace().collect()
}
