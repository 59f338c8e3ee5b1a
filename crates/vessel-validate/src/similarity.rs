//! String similarity scores for approximate reference matching.

use std::collections::HashSet;

use rapidfuzz::distance::jaro_winkler;
use vessel_model::SimilarityMetric;

/// Score two codes with the configured metric, on a 0.0 to 1.0 scale.
pub fn similarity(metric: SimilarityMetric, a: &str, b: &str) -> f64 {
    match metric {
        SimilarityMetric::Trigram => trigram_similarity(a, b),
        SimilarityMetric::JaroWinkler => jaro_winkler_similarity(a, b),
    }
}

/// Trigram similarity with PostgreSQL `pg_trgm` semantics.
///
/// Both strings are lower-cased and split into alphanumeric words; each word
/// is padded with two leading blanks and one trailing blank before its
/// trigrams are taken. The score is the size of the shared trigram set over
/// the size of the union. Strings without any trigram score 0.
pub fn trigram_similarity(a: &str, b: &str) -> f64 {
    let left = trigrams(a);
    let right = trigrams(b);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let shared = left.intersection(&right).count();
    let union = left.len() + right.len() - shared;
    shared as f64 / union as f64
}

/// Case-insensitive Jaro-Winkler similarity.
pub fn jaro_winkler_similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_uppercase();
    let b = b.trim().to_uppercase();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    jaro_winkler::similarity(a.chars(), b.chars())
}

fn trigrams(value: &str) -> HashSet<[char; 3]> {
    let lowered = value.to_lowercase();
    let mut set = HashSet::new();
    for word in lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
    {
        let padded: Vec<char> = "  "
            .chars()
            .chain(word.chars())
            .chain(std::iter::once(' '))
            .collect();
        for window in padded.windows(3) {
            set.insert([window[0], window[1], window[2]]);
        }
    }
    set
}
