//! The symmetric-delete index and the `lookup` / `lookup_compound` engine
//! built on top of it. This module is the core described in spec.md ''2-4:
//! everything else in the crate (tokenizer, distance functions, the
//! higher-level `SpellCorrector`) is an external collaborator around it.

use std::borrow::Cow;
use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::distance::{Distance, EditDistance};
use crate::error::Result;
use crate::tokenizer;

/// A non-negative handle into the index's word table, assigned in
/// insertion order the first time a key is promoted from pure-delete to
/// known word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct WordId(pub u32);

/// Result-selection policy. Numeric values match spec.md's 0/1/2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Verbosity {
    /// 0: a single best suggestion.
    Top,
    /// 1: all suggestions sharing the smallest edit distance.
    Closest,
    /// 2: all suggestions within `edit_distance_max` (no early termination).
    All,
}

impl Verbosity {
    fn level(self) -> u8 {
        match self {
            Verbosity::Top => 0,
            Verbosity::Closest => 1,
            Verbosity::All => 2,
        }
    }
}

/// One candidate correction: the term, its frequency in the dictionary,
/// and its edit distance to the queried input.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub term: String,
    pub distance: EditDistance,
    pub count: u64,
}

impl Suggestion {
    fn placeholder(term: impl Into<String>, distance: EditDistance) -> Self {
        Suggestion {
            term: term.into(),
            distance,
            count: 0,
        }
    }
}

/// Mutable record carrying a self-count and the set of original words that
/// are one of this key's generators (spec.md's DictionaryEntry).
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct DictionaryEntry {
    count: u64,
    suggestions: Vec<WordId>,
}

/// Tagged union stored per index key: the common case (a delete with
/// exactly one generator and no self-count) is a bare `WordId`; anything
/// richer promotes to a back-index into the entry table. Restated as an
/// enum per the Design Notes rather than the source's signed-integer
/// encoding -- the behavioral contract is identical.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
enum Slot {
    Word(WordId),
    Entry(usize),
}

fn make_key(language: &str, word: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(language.len() + 1 + word.len());
    key.extend_from_slice(language.as_bytes());
    key.push(0);
    key.extend_from_slice(word.as_bytes());
    key
}

/// Generates every string obtainable from `word` by removing up to
/// `max_distance` characters, via recursive single-character deletions,
/// deduplicated in a working set that is discarded once generation
/// completes (spec.md ''5's memory guidance).
fn generate_deletes(word: &str, max_distance: u32) -> HashSet<String> {
    let mut deletes = HashSet::new();
    if max_distance == 0 {
        return deletes;
    }
    let mut frontier: Vec<String> = vec![word.to_string()];
    let mut depth = 0;
    while depth < max_distance && !frontier.is_empty() {
        let mut next = Vec::new();
        for s in &frontier {
            let chars: Vec<char> = s.chars().collect();
            if chars.len() <= 1 {
                continue;
            }
            for i in 0..chars.len() {
                let mut t = String::with_capacity(s.len());
                t.extend(chars[..i].iter());
                t.extend(chars[i + 1..].iter());
                if deletes.insert(t.clone()) {
                    next.push(t);
                }
            }
        }
        frontier = next;
        depth += 1;
    }
    deletes
}

/// Wire format for persisting a built index (spec.md ''6 mentions no
/// native persistence, but an immutable-after-construction index is
/// naturally suited to save/reload; this generalizes the teacher crate's
/// JSON dictionary dump to the full symmetric-delete structure).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IndexSnapshot {
    max_distance: u32,
    max_length: usize,
    word_table: Vec<String>,
    entry_table: Vec<DictionaryEntry>,
    index: Vec<(Vec<u8>, Slot)>,
}

/// The symmetric-delete dictionary plus the `lookup` / `lookup_compound`
/// query engine. Construction (`insert`, `load_dictionary`,
/// `create_dictionary`) mutates the index; once built, all query methods
/// take `&self` only, so an `Arc<SymSpellIndex>` is safe to share across
/// readers per spec.md ''5.
pub struct SymSpellIndex {
    max_distance: u32,
    verbose: Verbosity,
    distance_fn: Box<dyn Distance>,
    max_length: usize,
    word_table: Vec<String>,
    entry_table: Vec<DictionaryEntry>,
    index: std::collections::HashMap<Vec<u8>, Slot>,
}

impl SymSpellIndex {
    /// `max_distance` is the `K` of spec.md's index invariants: the upper
    /// bound on deletions generated during construction. Lookups may pass
    /// a smaller `edit_distance_max` but never a larger one.
    pub fn new(max_distance: u32, verbose: Verbosity, distance_fn: Box<dyn Distance>) -> Self {
        SymSpellIndex {
            max_distance,
            verbose,
            distance_fn,
            max_length: 0,
            word_table: Vec::new(),
            entry_table: Vec::new(),
            index: std::collections::HashMap::new(),
        }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn verbose(&self) -> Verbosity {
        self.verbose
    }

    /// Number of known words (promoted entries), for diagnostics/logging.
    pub fn word_count(&self) -> usize {
        self.word_table.len()
    }

    /// Captures the dictionary state (word table, entry table, delete
    /// index) for persistence. The configured distance function and
    /// verbosity are not part of the snapshot -- they are supplied again
    /// at load time via [`crate::config::SpellCheckerConfig`], matching
    /// spec.md ''5's read-only-after-construction contract.
    pub fn snapshot(&self) -> IndexSnapshot {
        IndexSnapshot {
            max_distance: self.max_distance,
            max_length: self.max_length,
            word_table: self.word_table.clone(),
            entry_table: self.entry_table.clone(),
            index: self.index.iter().map(|(k, v)| (k.clone(), *v)).collect(),
        }
    }

    /// Rebuilds an index from a [`IndexSnapshot`], pairing it with a fresh
    /// verbosity/distance configuration.
    pub fn from_snapshot(snapshot: IndexSnapshot, verbose: Verbosity, distance_fn: Box<dyn Distance>) -> Self {
        SymSpellIndex {
            max_distance: snapshot.max_distance,
            verbose,
            distance_fn,
            max_length: snapshot.max_length,
            word_table: snapshot.word_table,
            entry_table: snapshot.entry_table,
            index: snapshot.index.into_iter().collect(),
        }
    }

    fn entry_view(&self, slot: Slot) -> (u64, Cow<'_, [WordId]>) {
        match slot {
            Slot::Word(id) => (0, Cow::Owned(vec![id])),
            Slot::Entry(idx) => {
                let entry = &self.entry_table[idx];
                (entry.count, Cow::Borrowed(&entry.suggestions))
            }
        }
    }

    /// Applies the "lowest surviving length" insertion rule of spec.md
    /// ''4.1 to `entry`, deciding whether `candidate_id` should be added
    /// (and whether existing suggestions should be dropped first).
    fn add_lowest_distance(
        &self,
        entry: &mut DictionaryEntry,
        candidate_word: &str,
        candidate_id: WordId,
        delete: &str,
    ) {
        if self.verbose.level() < 2 && !entry.suggestions.is_empty() {
            let current_best = &self.word_table[entry.suggestions[0].0 as usize];
            let current_measure = current_best.len() as i64 - delete.len() as i64;
            let new_measure = candidate_word.len() as i64 - delete.len() as i64;
            if current_measure > new_measure {
                entry.suggestions.clear();
            }
        }

        let should_push = self.verbose.level() == 2 || entry.suggestions.is_empty() || {
            let current_best = &self.word_table[entry.suggestions[0].0 as usize];
            let current_measure = current_best.len() as i64 - delete.len() as i64;
            let new_measure = candidate_word.len() as i64 - delete.len() as i64;
            current_measure >= new_measure
        };
        if should_push {
            entry.suggestions.push(candidate_id);
        }
    }

    /// Implements `create_dictionary_entry` from spec.md ''4.1. Returns
    /// whether `key` crossed the threshold to become a known word on this
    /// call.
    pub fn insert(&mut self, key: &str, language: &str, count: u64) -> bool {
        if key.is_empty() {
            return false;
        }
        let index_key = make_key(language, key);

        let (entry_idx, prev_count) = match self.index.get(&index_key).copied() {
            None => {
                self.entry_table.push(DictionaryEntry {
                    count,
                    suggestions: Vec::new(),
                });
                let idx = self.entry_table.len() - 1;
                self.index.insert(index_key.clone(), Slot::Entry(idx));
                (idx, 0)
            }
            Some(Slot::Word(existing)) => {
                self.entry_table.push(DictionaryEntry {
                    count: 0,
                    suggestions: vec![existing],
                });
                let idx = self.entry_table.len() - 1;
                self.index.insert(index_key.clone(), Slot::Entry(idx));
                let prev = self.entry_table[idx].count;
                self.entry_table[idx].count += count;
                (idx, prev)
            }
            Some(Slot::Entry(idx)) => {
                let prev = self.entry_table[idx].count;
                self.entry_table[idx].count += count;
                (idx, prev)
            }
        };

        let new_count = self.entry_table[entry_idx].count;
        if key.len() > self.max_length {
            self.max_length = key.len();
        }

        let threshold = 1;
        if new_count < threshold || prev_count >= threshold {
            return false;
        }

        self.word_table.push(key.to_string());
        let word_id = WordId((self.word_table.len() - 1) as u32);
        debug!(word = key, id = word_id.0, "promoted to known word");

        for delete in generate_deletes(key, self.max_distance) {
            let delete_key = make_key(language, &delete);
            match self.index.get(&delete_key).copied() {
                None => {
                    self.index.insert(delete_key, Slot::Word(word_id));
                }
                Some(Slot::Word(existing)) => {
                    if existing == word_id {
                        continue;
                    }
                    self.entry_table.push(DictionaryEntry {
                        count: 0,
                        suggestions: vec![existing],
                    });
                    let idx = self.entry_table.len() - 1;
                    self.index.insert(delete_key.clone(), Slot::Entry(idx));
                    let mut entry = std::mem::take(&mut self.entry_table[idx]);
                    self.add_lowest_distance(&mut entry, key, word_id, &delete);
                    self.entry_table[idx] = entry;
                }
                Some(Slot::Entry(idx)) => {
                    if self.entry_table[idx].suggestions.contains(&word_id) {
                        continue;
                    }
                    let mut entry = std::mem::take(&mut self.entry_table[idx]);
                    self.add_lowest_distance(&mut entry, key, word_id, &delete);
                    self.entry_table[idx] = entry;
                }
            }
        }

        true
    }

    /// Loads a frequency dictionary: one record per line, tokenized with
    /// [`tokenizer::tokenize`]; records need >=2 tokens; `term_index` and
    /// `count_index` select which tokens are the word and the count.
    /// Lines whose count column doesn't parse as an integer are skipped.
    pub fn load_dictionary(
        &mut self,
        path: impl AsRef<std::path::Path>,
        language: &str,
        term_index: usize,
        count_index: usize,
    ) -> Result<()> {
        let content = std::fs::read_to_string(path)?;
        for line in content.lines() {
            let tokens = tokenizer::tokenize(line);
            if tokens.len() < 2 {
                continue;
            }
            let (Some(term), Some(count_tok)) = (tokens.get(term_index), tokens.get(count_index))
            else {
                continue;
            };
            if let Ok(count) = count_tok.parse::<u64>() {
                if count > 0 {
                    self.insert(term, language, count);
                }
            }
        }
        Ok(())
    }

    /// Loads a plain tokenized corpus: every observed token inserted with
    /// count 1, duplicates accumulate.
    pub fn create_dictionary(
        &mut self,
        path: impl AsRef<std::path::Path>,
        language: &str,
    ) -> Result<()> {
        let content = std::fs::read_to_string(path)?;
        for token in content.split_whitespace() {
            self.insert(token, language, 1);
        }
        Ok(())
    }

    /// Implements `lookup` from spec.md ''4.2.
    pub fn lookup(&self, input_string: &str, language: &str, edit_distance_max: u32) -> Vec<Suggestion> {
        let edit_distance_max = edit_distance_max.min(self.max_distance);

        if input_string.is_empty() {
            return Vec::new();
        }
        if input_string.len() as i64 - edit_distance_max as i64 > self.max_length as i64 {
            return Vec::new();
        }

        let mut candidates: VecDeque<String> = VecDeque::new();
        let mut candidate_seen: HashSet<String> = HashSet::new();
        let mut result_seen: HashSet<String> = HashSet::new();
        let mut suggestions: Vec<Suggestion> = Vec::new();

        candidates.push_back(input_string.to_string());

        'outer: while let Some(candidate) = candidates.pop_front() {
            if self.verbose.level() < 2 && !suggestions.is_empty() {
                let gap = (input_string.len() as i64 - candidate.len() as i64) as f64;
                if gap > suggestions[0].distance.0 {
                    break;
                }
            }

            let key = make_key(language, &candidate);
            if let Some(slot) = self.index.get(&key).copied() {
                let (count, suggestion_ids) = self.entry_view(slot);

                if count > 0 && !result_seen.contains(&candidate) {
                    result_seen.insert(candidate.clone());
                    let distance = EditDistance::from_usize(input_string.len() - candidate.len());
                    let accept = self.verbose.level() == 2
                        || suggestions.is_empty()
                        || distance <= suggestions[0].distance;
                    if accept {
                        if self.verbose.level() < 2
                            && !suggestions.is_empty()
                            && suggestions[0].distance > distance
                        {
                            suggestions.clear();
                        }
                        suggestions.push(Suggestion {
                            term: candidate.clone(),
                            distance,
                            count,
                        });
                        if self.verbose.level() < 2 && distance == EditDistance::ZERO {
                            break 'outer;
                        }
                    }
                }

                for suggestion_id in suggestion_ids.iter().copied() {
                    let suggestion = self.word_table[suggestion_id.0 as usize].clone();
                    if result_seen.contains(&suggestion) {
                        continue;
                    }
                    result_seen.insert(suggestion.clone());

                    let distance = if suggestion == input_string {
                        EditDistance::ZERO
                    } else if suggestion.len() == candidate.len() {
                        EditDistance::from_usize(input_string.len() - candidate.len())
                    } else if input_string.len() == candidate.len() {
                        EditDistance::from_usize(suggestion.len() - candidate.len())
                    } else {
                        let (s_trim, i_trim) = common_prefix_suffix(&suggestion, input_string);
                        self.distance_fn.distance(&s_trim, &i_trim)
                    };

                    if self.verbose.level() < 2
                        && !suggestions.is_empty()
                        && distance > suggestions[0].distance
                    {
                        continue;
                    }

                    if distance.0 <= edit_distance_max as f64 {
                        let suggestion_key = make_key(language, &suggestion);
                        if let Some(suggestion_slot) = self.index.get(&suggestion_key).copied() {
                            let (suggestion_count, _) = self.entry_view(suggestion_slot);
                            if self.verbose.level() < 2
                                && !suggestions.is_empty()
                                && suggestions[0].distance > distance
                            {
                                suggestions.clear();
                            }
                            suggestions.push(Suggestion {
                                term: suggestion,
                                distance,
                                count: suggestion_count,
                            });
                        }
                    }
                }

                let gap = input_string.len() as i64 - candidate.len() as i64;
                if gap < edit_distance_max as i64 {
                    if self.verbose.level() < 2
                        && !suggestions.is_empty()
                        && gap as f64 >= suggestions[0].distance.0
                    {
                        continue;
                    }
                    let chars: Vec<char> = candidate.chars().collect();
                    for i in 0..chars.len() {
                        let mut deleted = String::with_capacity(candidate.len());
                        deleted.extend(chars[..i].iter());
                        deleted.extend(chars[i + 1..].iter());
                        if candidate_seen.insert(deleted.clone()) {
                            candidates.push_back(deleted);
                        }
                    }
                }
            }
        }

        if self.verbose.level() < 2 {
            suggestions.sort_by(|a, b| b.count.cmp(&a.count));
        } else {
            suggestions.sort_by(|a, b| {
                let ka = 2.0 * a.distance.0 - a.count as f64;
                let kb = 2.0 * b.distance.0 - b.count as f64;
                ka.total_cmp(&kb)
            });
        }

        if matches!(self.verbose, Verbosity::Top) {
            suggestions.truncate(1);
        }
        suggestions
    }

    fn distance_between(&self, a: &str, b: &str) -> EditDistance {
        self.distance_fn.distance(a, b)
    }

    /// Implements `lookup_compound` from spec.md ''4.3.
    pub fn lookup_compound(&self, input_string: &str, language: &str, edit_distance_max: u32) -> Suggestion {
        let terms: Vec<&str> = tokenizer::split_phrase(input_string);
        if terms.is_empty() {
            return Suggestion::placeholder(input_string, EditDistance::ZERO);
        }

        let mut parts: Vec<Suggestion> = Vec::new();
        let mut last_combi = false;

        for (i, term) in terms.iter().enumerate() {
            let mut current = self.lookup(term, language, edit_distance_max);

            if i > 0 && !last_combi {
                let merged_word = format!("{}{}", terms[i - 1], term);
                let combined = self.lookup(&merged_word, language, edit_distance_max);
                if let Some(best_combi) = combined.first() {
                    let best_prev = parts.last().cloned().unwrap();
                    let best_cur = current.first().cloned().unwrap_or_else(|| {
                        Suggestion::placeholder(*term, EditDistance::from_usize(edit_distance_max as usize + 1))
                    });

                    let unmerged_phrase = format!("{} {}", terms[i - 1], term);
                    let corrected_phrase = format!("{} {}", best_prev.term, best_cur.term);
                    let unmerged_distance = self.distance_between(&unmerged_phrase, &corrected_phrase);

                    if best_combi.distance + 1.0 < unmerged_distance {
                        let mut merged = best_combi.clone();
                        merged.distance = merged.distance + 1.0;
                        *parts.last_mut().unwrap() = merged;
                        last_combi = true;
                        continue;
                    }
                }
            }
            last_combi = false;

            if !current.is_empty() && (current[0].distance == EditDistance::ZERO || term.chars().count() == 1) {
                parts.push(current.remove(0));
                continue;
            }

            parts.push(self.best_split(term, language, edit_distance_max, &current));
        }

        let joined = parts.iter().map(|s| s.term.as_str()).collect::<Vec<_>>().join(" ");
        let count = parts.iter().map(|s| s.count).min().unwrap_or(0);
        let distance = self.distance_between(&joined, input_string);
        Suggestion {
            term: joined,
            distance,
            count,
        }
    }

    /// The split-attempt (space-deletion repair) branch of `lookup_compound`.
    fn best_split(
        &self,
        term: &str,
        language: &str,
        edit_distance_max: u32,
        single_word_suggestions: &[Suggestion],
    ) -> Suggestion {
        let chars: Vec<char> = term.chars().collect();
        if chars.len() <= 1 {
            return Suggestion::placeholder(term, EditDistance::from_usize(edit_distance_max as usize + 1));
        }

        let mut splits: Vec<Suggestion> = Vec::new();
        if let Some(first) = single_word_suggestions.first() {
            splits.push(first.clone());
        }

        for j in 1..chars.len() {
            let part1: String = chars[..j].iter().collect();
            let part2: String = chars[j..].iter().collect();

            let suggestions1 = self.lookup(&part1, language, edit_distance_max);
            let Some(best1) = suggestions1.first() else {
                continue;
            };
            if let Some(single) = single_word_suggestions.first() {
                if single.term == best1.term {
                    break;
                }
            }

            let suggestions2 = self.lookup(&part2, language, edit_distance_max);
            let Some(best2) = suggestions2.first() else {
                continue;
            };
            if let Some(single) = single_word_suggestions.first() {
                if single.term == best2.term {
                    break;
                }
            }

            let split_term = format!("{} {}", best1.term, best2.term);
            let split_distance = self.distance_between(term, &split_term);
            let split_count = best1.count.min(best2.count);
            splits.push(Suggestion {
                term: split_term,
                distance: split_distance,
                count: split_count,
            });

            if split_distance == EditDistance::from_usize(1) {
                break;
            }
        }

        if splits.is_empty() {
            return Suggestion::placeholder(term, EditDistance::from_usize(edit_distance_max as usize + 1));
        }

        splits.sort_by(|a, b| {
            let ka = 2.0 * a.distance.0 - a.count as f64;
            let kb = 2.0 * b.distance.0 - b.count as f64;
            ka.total_cmp(&kb)
        });
        splits.into_iter().next().unwrap()
    }
}

/// Strips the longest common prefix and common suffix shared by `a` and
/// `b`, returning the trimmed strings. Works over `Vec<char>` rather than
/// raw bytes, like `generate_deletes`, so multi-byte UTF-8 input sharing a
/// leading byte but differing mid-codepoint (e.g. "à" vs "á", both start
/// with 0xC3) never lands a cut mid-character. Also fixes the
/// `suggestion[ii:-ii-jj]` arithmetic called out as a likely bug in the
/// Design Notes: prefix and suffix are trimmed independently instead of
/// double-counting the prefix length against the suffix bound.
fn common_prefix_suffix(a: &str, b: &str) -> (String, String) {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let mut ii = 0;
    while ii < a_chars.len() && ii < b_chars.len() && a_chars[ii] == b_chars[ii] {
        ii += 1;
    }
    let mut jj = 0;
    while jj < a_chars.len() - ii && jj < b_chars.len() - ii && a_chars[a_chars.len() - jj - 1] == b_chars[b_chars.len() - jj - 1] {
        jj += 1;
    }
    let a_trim: String = a_chars[ii..a_chars.len() - jj].iter().collect();
    let b_trim: String = b_chars[ii..b_chars.len() - jj].iter().collect();
    (a_trim, b_trim)
}
