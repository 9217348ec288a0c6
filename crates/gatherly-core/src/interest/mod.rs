//! Interest scoring: exact keyword matching with a statistical fallback.
//!
//! Two strategies sit behind the common [`InterestStrategy`] interface:
//!
//! - [`KeywordStrategy`] matches each attendee's preference tags against
//!   the occurrence's feature text (substring containment, the documented
//!   source behavior) and scores the fraction of happy attendees;
//! - [`TfidfStrategy`] measures TF-IDF cosine similarity between the
//!   attendees' combined preference text and the occurrence text, fit over
//!   the surviving batch's vocabulary.
//!
//! The merge policy is explicit: the fallback engages only when the exact
//! score sits at [`EXACT_MATCH_FLOOR`]; degenerate batches use
//! [`NEUTRAL_SCORE`]; any similarity failure degrades to the exact score
//! and is logged, never propagated.

mod tfidf;

pub use tfidf::{cosine_similarity, tokenize, TfidfVectorizer};

use std::collections::BTreeSet;

use crate::plan::{ActivityOccurrence, TagMap};

/// Exact-match score at or below which the similarity fallback engages.
pub const EXACT_MATCH_FLOOR: f64 = 0.0;

/// Score used when neither exact matching nor similarity has a signal.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Minimum batch size for a meaningful TF-IDF vocabulary.
pub const MIN_VOCABULARY_DOCS: usize = 2;

/// Scoring input for one occurrence: its feature text plus the tag string
/// of every attendee (empty string for attendees without a profile entry).
#[derive(Debug, Clone)]
pub struct InterestInput {
    pub features: String,
    pub attendee_tags: Vec<String>,
}

impl InterestInput {
    /// Build the input for an occurrence and its resolved attendees.
    pub fn new(occurrence: &ActivityOccurrence, attendees: &[String], tags: &TagMap) -> Self {
        let attendee_tags = attendees
            .iter()
            .map(|name| tags.get(name).cloned().unwrap_or_default())
            .collect();
        Self {
            features: occurrence.feature_text(),
            attendee_tags,
        }
    }

    /// Concatenated preference text of all attendees, the similarity query.
    pub fn preference_text(&self) -> String {
        self.attendee_tags.join(" ")
    }
}

/// Interest metrics for one occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct InterestScore {
    /// Tags that matched the occurrence text, for display
    pub matched_tags: BTreeSet<String>,
    /// Fraction of attendees with a direct keyword match, in [0, 1]
    pub interest_score: f64,
    /// interest_score refined by the fallback, in [0, 1]
    pub final_interest_score: f64,
}

/// A scoring strategy over a fixed occurrence batch.
pub trait InterestStrategy {
    /// Strategy name for diagnostics
    fn name(&self) -> &'static str;

    /// Score for the occurrence at `index`, or `None` when this strategy
    /// has no signal for it.
    fn score(&self, index: usize) -> Option<f64>;
}

/// Exact keyword matching of attendee tags against occurrence text.
pub struct KeywordStrategy {
    matches: Vec<KeywordMatch>,
}

#[derive(Debug, Clone)]
struct KeywordMatch {
    matched_tags: BTreeSet<String>,
    score: f64,
}

impl KeywordStrategy {
    /// Run exact matching for every input in the batch.
    ///
    /// A tag matches when its trimmed lowercase form is a non-empty
    /// substring of the feature text; an attendee is happy when at least
    /// one of their tags matches.
    pub fn fit(inputs: &[InterestInput]) -> Self {
        let matches = inputs
            .iter()
            .map(|input| {
                let mut matched_tags = BTreeSet::new();
                let mut happy = 0usize;

                for tag_string in &input.attendee_tags {
                    let mut likes_it = false;
                    for tag in tag_string.split(',') {
                        let tag = tag.trim();
                        if tag.is_empty() {
                            continue;
                        }
                        if input.features.contains(&tag.to_lowercase()) {
                            matched_tags.insert(tag.to_string());
                            likes_it = true;
                        }
                    }
                    if likes_it {
                        happy += 1;
                    }
                }

                let score = happy as f64 / input.attendee_tags.len().max(1) as f64;
                KeywordMatch {
                    matched_tags,
                    score,
                }
            })
            .collect();

        Self { matches }
    }

    /// The raw exact-match score, even when it sits at the floor
    pub fn exact_score(&self, index: usize) -> f64 {
        self.matches.get(index).map(|m| m.score).unwrap_or(0.0)
    }

    /// Matched tags for one occurrence
    pub fn matched_tags(&self, index: usize) -> BTreeSet<String> {
        self.matches
            .get(index)
            .map(|m| m.matched_tags.clone())
            .unwrap_or_default()
    }
}

impl InterestStrategy for KeywordStrategy {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn score(&self, index: usize) -> Option<f64> {
        let score = self.matches.get(index)?.score;
        (score > EXACT_MATCH_FLOOR).then_some(score)
    }
}

/// TF-IDF cosine-similarity fallback over the batch vocabulary.
pub struct TfidfStrategy {
    similarities: Vec<f64>,
}

impl TfidfStrategy {
    /// Fit the vectorizer on the batch and precompute every occurrence's
    /// similarity to its attendees' preference text.
    ///
    /// Returns `None` when the batch is too small for a vocabulary or no
    /// document contributes a token.
    pub fn fit(inputs: &[InterestInput]) -> Option<Self> {
        if inputs.len() < MIN_VOCABULARY_DOCS {
            return None;
        }

        let documents: Vec<String> = inputs.iter().map(|i| i.features.clone()).collect();
        let vectorizer = TfidfVectorizer::fit(&documents)?;
        log::debug!(
            "similarity vocabulary: {} terms over {} occurrences",
            vectorizer.vocabulary_len(),
            inputs.len()
        );

        let similarities = inputs
            .iter()
            .map(|input| {
                let event_vector = vectorizer.transform(&input.features);
                let preference_vector = vectorizer.transform(&input.preference_text());
                cosine_similarity(&preference_vector, &event_vector)
            })
            .collect();

        Some(Self { similarities })
    }
}

impl InterestStrategy for TfidfStrategy {
    fn name(&self) -> &'static str {
        "tfidf"
    }

    fn score(&self, index: usize) -> Option<f64> {
        self.similarities.get(index).copied()
    }
}

/// Score every occurrence in a batch.
///
/// The keyword strategy wins whenever it found a direct hit; otherwise the
/// similarity fallback supplies the final score. With fewer than
/// [`MIN_VOCABULARY_DOCS`] occurrences the fallback is the neutral
/// constant, and a failed similarity fit degrades to the exact score for
/// the whole batch. All emitted scores lie in [0, 1].
pub fn score_interest_batch(inputs: &[InterestInput]) -> Vec<InterestScore> {
    let keyword = KeywordStrategy::fit(inputs);

    let fallback = if inputs.len() >= MIN_VOCABULARY_DOCS {
        let fitted = TfidfStrategy::fit(inputs);
        if fitted.is_none() {
            log::warn!(
                "similarity fallback unavailable (empty vocabulary over {} occurrences); \
                 using exact keyword scores",
                inputs.len()
            );
        }
        fitted
    } else {
        None
    };

    (0..inputs.len())
        .map(|index| {
            let exact = keyword.exact_score(index);
            let final_score = keyword
                .score(index)
                .or_else(|| fallback.as_ref().and_then(|f| f.score(index)))
                .unwrap_or(if inputs.len() < MIN_VOCABULARY_DOCS {
                    NEUTRAL_SCORE
                } else {
                    exact
                });

            InterestScore {
                matched_tags: keyword.matched_tags(index),
                interest_score: exact,
                final_interest_score: final_score.clamp(0.0, 1.0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(features: &str, attendee_tags: &[&str]) -> InterestInput {
        InterestInput {
            features: features.to_lowercase(),
            attendee_tags: attendee_tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn full_exact_match() {
        let inputs = vec![
            input("soccer night sport casual game", &["Sport, Music"]),
            input("cinema film indoor", &["Film"]),
        ];
        let scores = score_interest_batch(&inputs);

        assert_eq!(scores[0].interest_score, 1.0);
        assert_eq!(scores[0].final_interest_score, 1.0);
        assert!(scores[0].matched_tags.contains("Sport"));
        assert!(!scores[0].matched_tags.contains("Music"));
        assert_eq!(scores[1].interest_score, 1.0);
    }

    #[test]
    fn partial_exact_match_counts_happy_attendees() {
        let inputs = vec![
            input("soccer night sport", &["Sport", "Knitting"]),
            input("cinema film indoor", &["Film", "Film"]),
        ];
        let scores = score_interest_batch(&inputs);

        // One of two attendees likes it
        assert_eq!(scores[0].interest_score, 0.5);
        assert_eq!(scores[0].final_interest_score, 0.5);
    }

    #[test]
    fn substring_containment_matches_inside_words() {
        // Documented source behavior: tag "Art" matches inside "Party"
        let inputs = vec![
            input("party at the club", &["Art"]),
            input("museum tour", &["History"]),
        ];
        let scores = score_interest_batch(&inputs);
        assert_eq!(scores[0].interest_score, 1.0);
        assert!(scores[0].matched_tags.contains("Art"));
    }

    #[test]
    fn no_attendees_scores_zero_exact() {
        let inputs = vec![
            input("soccer sport", &[]),
            input("cinema film", &["Film"]),
        ];
        let scores = score_interest_batch(&inputs);
        assert_eq!(scores[0].interest_score, 0.0);
        // Fallback similarity still runs; empty preference text gives 0
        assert_eq!(scores[0].final_interest_score, 0.0);
    }

    #[test]
    fn single_occurrence_without_match_is_neutral() {
        let inputs = vec![input("soccer sport", &["Knitting"])];
        let scores = score_interest_batch(&inputs);
        assert_eq!(scores[0].interest_score, 0.0);
        assert_eq!(scores[0].final_interest_score, NEUTRAL_SCORE);
    }

    #[test]
    fn single_occurrence_with_match_keeps_exact() {
        let inputs = vec![input("soccer sport", &["Sport"])];
        let scores = score_interest_batch(&inputs);
        assert_eq!(scores[0].final_interest_score, 1.0);
    }

    #[test]
    fn fallback_similarity_when_no_exact_hit() {
        // The tag "outdoors football" is not a substring of either blob,
        // but its words share vocabulary with the first occurrence.
        let inputs = vec![
            input("evening football outdoors grass", &["outdoors football"]),
            input("quiet museum indoors paintings", &["outdoors football"]),
        ];
        let scores = score_interest_batch(&inputs);

        assert_eq!(scores[0].interest_score, 0.0);
        assert!(scores[0].final_interest_score > 0.0);
        assert!(scores[0].final_interest_score <= 1.0);
        // The unrelated occurrence stays near zero
        assert!(scores[1].final_interest_score < scores[0].final_interest_score);
    }

    #[test]
    fn empty_vocabulary_degrades_to_exact_scores() {
        // Feature texts with no usable tokens
        let inputs = vec![input("a b c", &["Sport"]), input("x y z", &["Music"])];
        let scores = score_interest_batch(&inputs);
        for score in &scores {
            assert_eq!(score.final_interest_score, score.interest_score);
        }
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        let inputs = vec![
            input("soccer sport outdoor game", &["Sport, Outdoor", "Sport"]),
            input("cinema film", &[]),
            input("museum art history", &["Art"]),
        ];
        for score in score_interest_batch(&inputs) {
            assert!((0.0..=1.0).contains(&score.interest_score));
            assert!((0.0..=1.0).contains(&score.final_interest_score));
        }
    }

    #[test]
    fn strategy_names() {
        let keyword = KeywordStrategy::fit(&[]);
        assert_eq!(keyword.name(), "keyword");
    }
}
