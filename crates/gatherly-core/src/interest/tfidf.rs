//! TF-IDF vectorization and cosine similarity over one candidate batch.
//!
//! The vectorizer is fit on the feature texts of the surviving batch only
//! and lives for a single planning run. IDF is smoothed
//! (`ln((1 + n) / (1 + df)) + 1`) and output vectors are L2-normalized,
//! so the cosine of two transforms reduces to their dot product.

use std::collections::{BTreeSet, HashMap};

/// Common English filler words excluded from the vocabulary.
const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "because",
    "been", "before", "but", "by", "can", "could", "do", "for", "from", "had", "has", "have",
    "her", "here", "his", "how", "if", "in", "into", "is", "it", "its", "just", "more", "most",
    "no", "not", "of", "on", "only", "or", "other", "our", "out", "over", "so", "some", "such",
    "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "to",
    "under", "up", "very", "was", "we", "were", "what", "when", "where", "which", "who", "will",
    "with", "would", "you", "your",
];

/// Split text into lowercase word tokens of at least two characters,
/// excluding stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .filter(|t| !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// A TF-IDF vectorizer fit over a fixed document batch.
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Fit the vocabulary and IDF weights on a document batch.
    ///
    /// Returns `None` when no document contributes a single token -- the
    /// caller treats that as "no similarity signal available".
    pub fn fit(documents: &[String]) -> Option<Self> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();

        // Sorted term set keeps vector layout deterministic across runs
        let terms: BTreeSet<&String> = tokenized.iter().flatten().collect();
        if terms.is_empty() {
            return None;
        }

        let vocabulary: HashMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();

        let mut document_frequency = vec![0usize; vocabulary.len()];
        for tokens in &tokenized {
            let unique: BTreeSet<&String> = tokens.iter().collect();
            for token in unique {
                document_frequency[vocabulary[token]] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        Some(Self { vocabulary, idf })
    }

    /// Transform text into an L2-normalized TF-IDF vector over the fitted
    /// vocabulary. Out-of-vocabulary tokens are dropped.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.vocabulary.len()];
        for token in tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                vector[idx] += self.idf[idx];
            }
        }

        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }

    /// Number of terms in the fitted vocabulary
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
