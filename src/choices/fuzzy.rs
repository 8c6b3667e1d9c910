//! Approximate string matching over a small list of records.
//!
//! Scoring is Bitap based: a pattern matches a field when it can be found
//! with few enough errors close enough to the expected location. Scores run
//! from `0.0` (exact) to `1.0` (no match); per-field scores are combined into
//! a record score, and records are ranked best first.

use std::collections::HashMap;

/// Longest pattern handled in a single bit-parallel pass.
const MAX_BITS: usize = 32;

/// Lowest score a non-exact match can report.
const MIN_SCORE: f64 = 0.001;

/// Tuning knobs for [`FuzzyIndex`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyOptions {
    /// Highest score still accepted as a match (`0.0` exact .. `1.0` anything).
    pub threshold: f64,
    /// Position in the field where the pattern is expected to start.
    pub location: usize,
    /// How far from `location` a match may drift before it is penalized out.
    pub distance: usize,
    /// Minimum run of matched characters a field needs to count as a hit.
    pub min_match_char_length: usize,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            location: 0,
            distance: 100,
            min_match_char_length: 1,
        }
    }
}

/// A ranked hit: index of the record in the index and its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch {
    /// Position of the record in insertion order.
    pub index: usize,
    /// Combined score, lower is better.
    pub score: f64,
}

#[derive(Debug, Clone)]
struct IndexedField {
    lowered: String,
    chars: Vec<char>,
    norm: f64,
}

/// Case-insensitive fuzzy index over records made of string fields.
#[derive(Debug, Clone)]
pub struct FuzzyIndex {
    records: Vec<Vec<Option<IndexedField>>>,
    key_weight: f64,
    options: FuzzyOptions,
}

impl FuzzyIndex {
    /// Indexes `records`; every record lists its searchable fields in key order.
    pub fn new(records: Vec<Vec<String>>, options: FuzzyOptions) -> Self {
        let key_count = records.iter().map(Vec::len).max().unwrap_or(1).max(1);

        let records = records
            .into_iter()
            .map(|fields| {
                fields
                    .into_iter()
                    .map(|value| {
                        if value.trim().is_empty() {
                            return None;
                        }
                        let lowered = value.to_lowercase();
                        Some(IndexedField {
                            chars: lowered.chars().collect(),
                            norm: field_norm(&value),
                            lowered,
                        })
                    })
                    .collect()
            })
            .collect();

        Self {
            records,
            key_weight: 1.0 / key_count as f64,
            options,
        }
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Searches the index, best match first. Ties keep insertion order.
    pub fn search(&self, query: &str) -> Vec<FuzzyMatch> {
        let pattern = Pattern::new(query, self.options);
        if pattern.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<FuzzyMatch> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(index, fields)| {
                let mut matched = false;
                let mut total = 1.0_f64;

                for field in fields.iter().flatten() {
                    let result = pattern.search_in(field);
                    if !result.is_match {
                        continue;
                    }
                    matched = true;
                    let base = if result.score == 0.0 {
                        f64::EPSILON
                    } else {
                        result.score
                    };
                    total *= base.powf(self.key_weight * field.norm);
                }

                matched.then_some(FuzzyMatch {
                    index,
                    score: total,
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then_with(|| a.index.cmp(&b.index))
        });
        hits
    }
}

/// Field-length norm: longer multi-word fields weigh less.
fn field_norm(value: &str) -> f64 {
    let tokens = value.split(' ').filter(|t| !t.is_empty()).count().max(1);
    let norm = 1.0 / (tokens as f64).sqrt();
    (norm * 1000.0).round() / 1000.0
}

#[derive(Debug, Clone, Copy)]
struct SearchResult {
    is_match: bool,
    score: f64,
}

#[derive(Debug, Clone)]
struct Chunk {
    pattern: Vec<char>,
    alphabet: HashMap<char, u64>,
    start_index: usize,
}

#[derive(Debug, Clone)]
struct Pattern {
    lowered: String,
    chunks: Vec<Chunk>,
    options: FuzzyOptions,
}

impl Pattern {
    fn new(query: &str, options: FuzzyOptions) -> Self {
        let lowered = query.to_lowercase();
        let chars: Vec<char> = lowered.chars().collect();
        let len = chars.len();

        let mut chunks = Vec::new();
        if len > MAX_BITS {
            let remainder = len % MAX_BITS;
            let end = len - remainder;
            let mut i = 0;
            while i < end {
                chunks.push(Chunk::new(&chars[i..i + MAX_BITS], i));
                i += MAX_BITS;
            }
            if remainder > 0 {
                let start = len - MAX_BITS;
                chunks.push(Chunk::new(&chars[start..], start));
            }
        } else if len > 0 {
            chunks.push(Chunk::new(&chars, 0));
        }

        Self {
            lowered,
            chunks,
            options,
        }
    }

    fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    fn search_in(&self, field: &IndexedField) -> SearchResult {
        if self.lowered == field.lowered {
            return SearchResult {
                is_match: true,
                score: 0.0,
            };
        }

        let mut has_matches = false;
        let mut total_score = 0.0;
        for chunk in &self.chunks {
            let options = FuzzyOptions {
                location: self.options.location + chunk.start_index,
                ..self.options
            };
            let result = bitap(&field.chars, chunk, &options);
            has_matches |= result.is_match;
            total_score += result.score;
        }

        SearchResult {
            is_match: has_matches,
            score: if has_matches {
                total_score / self.chunks.len() as f64
            } else {
                1.0
            },
        }
    }
}

impl Chunk {
    fn new(pattern: &[char], start_index: usize) -> Self {
        let len = pattern.len();
        let mut alphabet = HashMap::new();
        for (i, c) in pattern.iter().enumerate() {
            *alphabet.entry(*c).or_insert(0_u64) |= 1 << (len - i - 1);
        }
        Self {
            pattern: pattern.to_vec(),
            alphabet,
            start_index,
        }
    }
}

fn compute_score(
    errors: usize,
    current_location: usize,
    expected_location: usize,
    pattern_len: usize,
    distance: usize,
) -> f64 {
    let accuracy = errors as f64 / pattern_len as f64;
    let proximity = current_location.abs_diff(expected_location);
    if distance == 0 {
        return if proximity > 0 { 1.0 } else { accuracy };
    }
    accuracy + proximity as f64 / distance as f64
}

fn find_from(text: &[char], pattern: &[char], from: usize) -> Option<usize> {
    if pattern.is_empty() || pattern.len() > text.len() || from > text.len() - pattern.len() {
        return None;
    }
    (from..=text.len() - pattern.len()).find(|&i| text[i..i + pattern.len()] == *pattern)
}

fn bitap(text: &[char], chunk: &Chunk, options: &FuzzyOptions) -> SearchResult {
    let pattern = &chunk.pattern;
    let pattern_len = pattern.len();
    let text_len = text.len();
    let distance = options.distance;
    let expected = options.location.min(text_len);
    let score_at =
        |errors: usize, location: usize| compute_score(errors, location, expected, pattern_len, distance);

    let track_matches = options.min_match_char_length > 1;
    let mut match_mask = vec![false; if track_matches { text_len } else { 0 }];

    let mut threshold = options.threshold;
    let mut from = expected;
    while let Some(index) = find_from(text, pattern, from) {
        threshold = threshold.min(score_at(0, index));
        from = index + pattern_len;
        if track_matches {
            match_mask[index..index + pattern_len].fill(true);
        }
    }

    let mut best_location: Option<usize> = None;
    let mut final_score = 1.0_f64;
    let mut last_bits: Vec<u64> = Vec::new();
    let mut bin_max = pattern_len + text_len;
    let mask = 1_u64 << (pattern_len - 1);

    for errors in 0..pattern_len {
        // Widest window around `expected` that can still beat the threshold.
        let mut bin_min = 0;
        let mut bin_mid = bin_max;
        while bin_min < bin_mid {
            if score_at(errors, expected + bin_mid) <= threshold {
                bin_min = bin_mid;
            } else {
                bin_max = bin_mid;
            }
            bin_mid = (bin_max - bin_min) / 2 + bin_min;
        }
        bin_max = bin_mid;

        let mut start = expected.saturating_sub(bin_mid).saturating_add(1).max(1);
        let finish = (expected + bin_mid).min(text_len) + pattern_len;

        let mut bits = vec![0_u64; finish + 2];
        bits[finish + 1] = (1_u64 << errors) - 1;

        let mut j = finish;
        while j >= start {
            let location = j - 1;
            let char_match = text
                .get(location)
                .and_then(|c| chunk.alphabet.get(c))
                .copied()
                .unwrap_or(0);
            if track_matches && location < text_len {
                match_mask[location] |= char_match != 0;
            }

            bits[j] = ((bits[j + 1] << 1) | 1) & char_match;
            if errors > 0 {
                let prev = |k: usize| last_bits.get(k).copied().unwrap_or(0);
                bits[j] |= ((prev(j + 1) | prev(j)) << 1) | 1 | prev(j + 1);
            }

            if bits[j] & mask != 0 {
                final_score = score_at(errors, location);
                if final_score <= threshold {
                    threshold = final_score;
                    best_location = Some(location);
                    if location <= expected {
                        break;
                    }
                    start = (2 * expected).saturating_sub(location).max(1);
                }
            }
            j -= 1;
        }

        if score_at(errors + 1, expected) > threshold {
            break;
        }
        last_bits = bits;
    }

    let mut is_match = best_location.is_some();
    if is_match && track_matches {
        is_match = longest_run(&match_mask) >= options.min_match_char_length;
    }

    SearchResult {
        is_match,
        score: final_score.max(MIN_SCORE),
    }
}

fn longest_run(mask: &[bool]) -> usize {
    let mut best = 0;
    let mut current = 0;
    for &hit in mask {
        current = if hit { current + 1 } else { 0 };
        best = best.max(current);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(records: &[(&str, &str)]) -> FuzzyIndex {
        FuzzyIndex::new(
            records
                .iter()
                .map(|(a, b)| vec![a.to_string(), b.to_string()])
                .collect(),
            FuzzyOptions::default(),
        )
    }

    fn names(index: &FuzzyIndex, records: &[(&str, &str)], query: &str) -> Vec<String> {
        index
            .search(query)
            .into_iter()
            .map(|m| records[m.index].0.to_string())
            .collect()
    }

    const RECORDS: &[(&str, &str)] = &[
        ("feat", ":sparkles:"),
        ("fix", ":bug:"),
        ("docs", ":memo:"),
        ("hotfix", ":ambulance:"),
        ("refactor", ":recycle:"),
    ];

    #[test]
    fn exact_name_ranks_first() {
        let idx = index(RECORDS);
        let hits = names(&idx, RECORDS, "fix");
        assert_eq!(hits.first().map(String::as_str), Some("fix"));
        assert!(hits.contains(&"hotfix".to_string()));
    }

    #[test]
    fn search_is_case_insensitive() {
        let idx = index(RECORDS);
        assert_eq!(names(&idx, RECORDS, "DOCS").first().map(String::as_str), Some("docs"));
    }

    #[test]
    fn code_field_is_searched() {
        let idx = index(RECORDS);
        assert_eq!(names(&idx, RECORDS, "bug").first().map(String::as_str), Some("fix"));
        assert_eq!(
            names(&idx, RECORDS, ":recycle:").first().map(String::as_str),
            Some("refactor")
        );
    }

    #[test]
    fn typo_still_matches() {
        let idx = index(RECORDS);
        assert_eq!(names(&idx, RECORDS, "refactr").first().map(String::as_str), Some("refactor"));
    }

    #[test]
    fn unrelated_query_matches_nothing() {
        let idx = index(RECORDS);
        assert!(idx.search("zzzzzz").is_empty());
    }

    #[test]
    fn empty_query_matches_nothing() {
        let idx = index(RECORDS);
        assert!(idx.search("").is_empty());
    }

    #[test]
    fn exact_field_scores_zero_before_combination() {
        let field = IndexedField {
            lowered: "feat".to_string(),
            chars: "feat".chars().collect(),
            norm: 1.0,
        };
        let result = Pattern::new("FEAT", FuzzyOptions::default()).search_in(&field);
        assert!(result.is_match);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn prefix_beats_distant_substring() {
        let records = &[("prefix-later", ""), ("later-prefix", "")];
        let idx = index(records);
        let hits = idx.search("prefix");
        assert_eq!(hits[0].index, 0);
    }

    #[test]
    fn long_patterns_are_chunked() {
        let long = "a".repeat(40);
        let records = &[(long.as_str(), "")];
        let idx = index(records);
        let hits = idx.search(&long);
        assert_eq!(hits.len(), 1);

        let pattern = Pattern::new(&"b".repeat(70), FuzzyOptions::default());
        assert_eq!(pattern.chunks.len(), 3);
        assert_eq!(pattern.chunks[2].start_index, 38);
    }

    #[test]
    fn min_match_char_length_filters_single_char_hits() {
        let options = FuzzyOptions {
            min_match_char_length: 3,
            ..FuzzyOptions::default()
        };
        let idx = FuzzyIndex::new(vec![vec!["xa".to_string()]], options);
        assert!(idx.search("a").is_empty());
    }

    #[test]
    fn field_norm_penalizes_multiword_values() {
        assert_eq!(field_norm("single"), 1.0);
        assert_eq!(field_norm("two words"), 0.707);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn scores_are_bounded(query in "[a-z:]{1,12}") {
                let idx = index(RECORDS);
                for hit in idx.search(&query) {
                    prop_assert!(hit.score >= 0.0);
                    prop_assert!(hit.score <= 1.0);
                }
            }

            #[test]
            fn ranking_is_sorted(query in "[a-z]{1,8}") {
                let idx = index(RECORDS);
                let hits = idx.search(&query);
                for pair in hits.windows(2) {
                    prop_assert!(pair[0].score <= pair[1].score);
                }
            }

            #[test]
            fn every_name_finds_itself_first(i in 0usize..5) {
                let idx = index(RECORDS);
                let hits = idx.search(RECORDS[i].0);
                prop_assert_eq!(hits[0].index, i);
            }
        }
    }
}
