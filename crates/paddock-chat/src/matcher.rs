//! Keyword scoring of free-text questions against the knowledge base.
//!
//! Every entry accumulates a score from independent, additive signals:
//!
//! | Signal | Points |
//! |---|---|
//! | query equals the question (case-insensitive) | 20 |
//! | query is a substring of the question | 10 |
//! | query contains a keyword | 5 per keyword |
//! | query contains a keyword, or a keyword contains the query | 3 per keyword |
//! | topical boost (`project`, `skill`, `contact`, `work`) | 4 per topic |
//!
//! A keyword found inside the query earns both the 5 and the 3; the weights
//! and the threshold below were tuned together with that double count.

use serde::Serialize;
use tracing::debug;

use crate::error::ChatError;
use crate::knowledge::{KnowledgeEntry, FALLBACK_ANSWER, KNOWLEDGE_BASE};

/// The best score must be strictly greater than this to count as a match.
pub const MATCH_THRESHOLD: u32 = 3;

const EXACT_QUESTION_POINTS: u32 = 20;
const PARTIAL_QUESTION_POINTS: u32 = 10;
const KEYWORD_IN_QUERY_POINTS: u32 = 5;
const KEYWORD_OVERLAP_POINTS: u32 = 3;
const TOPIC_POINTS: u32 = 4;

/// Query fragment -> keyword fragments that earn the topical boost.
const TOPIC_BOOSTS: &[(&str, &[&str])] = &[
    ("project", &["project"]),
    ("skill", &["skill"]),
    ("contact", &["contact"]),
    ("work", &["experience", "work"]),
];

/// An entry together with the score it earned for one query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredEntry<'kb> {
    pub entry: &'kb KnowledgeEntry,
    pub index: usize,
    pub score: u32,
}

/// Picks the best canned answer for a question.
#[derive(Debug, Clone, Copy)]
pub struct QueryMatcher<'kb> {
    base: &'kb [KnowledgeEntry],
}

impl Default for QueryMatcher<'static> {
    fn default() -> Self {
        Self {
            base: KNOWLEDGE_BASE,
        }
    }
}

impl<'kb> QueryMatcher<'kb> {
    /// Create a matcher over `base`, which must not be empty.
    pub fn new(base: &'kb [KnowledgeEntry]) -> Result<Self, ChatError> {
        if base.is_empty() {
            return Err(ChatError::EmptyKnowledgeBase);
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &'kb [KnowledgeEntry] {
        self.base
    }

    /// Score a single entry against a query.
    ///
    /// A query that is blank after trimming scores 0 everywhere.
    pub fn score(query: &str, entry: &KnowledgeEntry) -> u32 {
        if query.trim().is_empty() {
            return 0;
        }
        let query = query.to_lowercase();
        let question = entry.question.to_lowercase();
        let keywords: Vec<String> = entry.keywords.iter().map(|k| k.to_lowercase()).collect();

        let mut score = 0;

        if question == query {
            score += EXACT_QUESTION_POINTS;
        }
        if question.contains(&query) {
            score += PARTIAL_QUESTION_POINTS;
        }

        for keyword in &keywords {
            if query.contains(keyword.as_str()) {
                score += KEYWORD_IN_QUERY_POINTS;
            }
            if keyword.contains(&query) || query.contains(keyword.as_str()) {
                score += KEYWORD_OVERLAP_POINTS;
            }
        }

        for (fragment, keyword_fragments) in TOPIC_BOOSTS {
            let topical = query.contains(*fragment)
                && keywords
                    .iter()
                    .any(|k| keyword_fragments.iter().any(|f| k.contains(*f)));
            if topical {
                score += TOPIC_POINTS;
            }
        }

        score
    }

    /// Highest-scoring entry, or `None` if nothing scores above zero.
    ///
    /// Ties go to the entry that appears first in the base.
    pub fn best_match(&self, query: &str) -> Option<ScoredEntry<'kb>> {
        let mut best: Option<ScoredEntry<'kb>> = None;
        for (index, entry) in self.base.iter().enumerate() {
            let score = Self::score(query, entry);
            if score > best.map_or(0, |b| b.score) {
                best = Some(ScoredEntry {
                    entry,
                    index,
                    score,
                });
            }
        }
        best
    }

    /// Answer for `query`, or [`FALLBACK_ANSWER`] when no entry clears
    /// [`MATCH_THRESHOLD`].
    pub fn find_answer(&self, query: &str) -> &'kb str {
        match self.best_match(query) {
            Some(best) if best.score > MATCH_THRESHOLD => {
                debug!(
                    index = best.index,
                    score = best.score,
                    question = best.entry.question,
                    "Query matched knowledge entry"
                );
                best.entry.answer
            }
            best => {
                debug!(
                    score = best.map_or(0, |b| b.score),
                    "No knowledge entry above threshold"
                );
                FALLBACK_ANSWER
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
