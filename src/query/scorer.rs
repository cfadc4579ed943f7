//! Scoring module for search results
//!
//! Scores are small integers. Each match kind contributes a fixed weight:
//! - object name: exact or partial match on the last dotted part, plus a
//!   priority bonus
//! - full text: exact or partial match in page text or page titles
//! - section titles: proportional to how much of the title the query covers

use crate::index::types::priority;
use serde::{Deserialize, Serialize};

/// Configurable weights for scoring factors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Query term equals the full name or its last dotted part
    pub obj_name_match: i32,
    /// Query term is a substring of the last dotted part
    pub obj_partial_match: i32,
    /// Bonus for objects marked important
    pub obj_prio_important: i32,
    /// Bonus for objects with default priority
    pub obj_prio_default: i32,
    /// Bonus (usually negative) for unimportant objects
    pub obj_prio_unimportant: i32,
    /// Bonus for any other priority value
    pub obj_prio_other: i32,
    /// Exact match in a page title
    pub title: i32,
    /// Substring match in a page title term
    pub partial_title: i32,
    /// Exact match in page text
    pub term: i32,
    /// Substring match in a page text term
    pub partial_term: i32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            obj_name_match: 11,
            obj_partial_match: 6,
            obj_prio_important: 15,
            obj_prio_default: 5,
            obj_prio_unimportant: -5,
            obj_prio_other: 0,
            title: 15,
            partial_title: 7,
            term: 5,
            partial_term: 2,
        }
    }
}

/// Which table a full-text record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermSource {
    Text,
    Title,
}

/// Scorer calculates relevance scores for search results
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Create a scorer with default weights
    pub fn with_defaults() -> Self {
        Self::new(ScoringWeights::default())
    }

    /// Score an object whose lowercased full name contains `term`.
    pub fn object_score(&self, fullname_lower: &str, term: &str, priority: i8) -> i32 {
        let last = fullname_lower.rsplit('.').next().unwrap_or(fullname_lower);

        let mut score = if fullname_lower == term || last == term {
            self.weights.obj_name_match
        } else if last.contains(term) {
            self.weights.obj_partial_match
        } else {
            0
        };

        score += self.priority_bonus(priority);
        score
    }

    fn priority_bonus(&self, prio: i8) -> i32 {
        match prio {
            priority::IMPORTANT => self.weights.obj_prio_important,
            priority::DEFAULT => self.weights.obj_prio_default,
            priority::UNIMPORTANT => self.weights.obj_prio_unimportant,
            _ => self.weights.obj_prio_other,
        }
    }

    /// Score of a full-text record
    pub fn term_score(&self, source: TermSource, partial: bool) -> i32 {
        match (source, partial) {
            (TermSource::Text, false) => self.weights.term,
            (TermSource::Text, true) => self.weights.partial_term,
            (TermSource::Title, false) => self.weights.title,
            (TermSource::Title, true) => self.weights.partial_title,
        }
    }

    /// Percentage of the section title covered by the query
    pub fn section_title_score(&self, query_len: usize, title_len: usize) -> i32 {
        if title_len == 0 {
            return 0;
        }
        (100.0 * query_len as f64 / title_len as f64).round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = ScoringWeights::default();
        assert!(weights.title > weights.term);
        assert!(weights.partial_title > weights.partial_term);
        assert!(weights.obj_name_match > weights.obj_partial_match);
    }

    #[test]
    fn test_object_name_match() {
        let scorer = Scorer::with_defaults();
        let name = "scanning.camera.instrument.add_module";

        assert_eq!(scorer.object_score(name, "add_module", priority::DEFAULT), 16);
        assert_eq!(scorer.object_score(name, name, priority::DEFAULT), 16);
        assert_eq!(scorer.object_score(name, "module", priority::DEFAULT), 11);
        // Matches only in the prefix get the priority bonus alone
        assert_eq!(scorer.object_score(name, "camera", priority::DEFAULT), 5);
    }

    #[test]
    fn test_priority_bonus() {
        let scorer = Scorer::with_defaults();
        assert_eq!(scorer.object_score("scanning", "scanning", priority::IMPORTANT), 26);
        assert_eq!(scorer.object_score("scanning", "scanning", priority::UNIMPORTANT), 6);
        assert_eq!(scorer.object_score("scanning", "scanning", priority::HIDDEN), 11);
    }

    #[test]
    fn test_term_scores() {
        let scorer = Scorer::with_defaults();
        assert_eq!(scorer.term_score(TermSource::Text, false), 5);
        assert_eq!(scorer.term_score(TermSource::Title, false), 15);
        assert_eq!(scorer.term_score(TermSource::Text, true), 2);
        assert_eq!(scorer.term_score(TermSource::Title, true), 7);
    }

    #[test]
    fn test_section_title_score() {
        let scorer = Scorer::with_defaults();
        assert_eq!(scorer.section_title_score(6, 6), 100);
        assert_eq!(scorer.section_title_score(5, 8), 63);
        assert_eq!(scorer.section_title_score(3, 0), 0);
    }

    #[test]
    fn test_weights_from_partial_json() {
        let weights: ScoringWeights = serde_json::from_str(r#"{"title": 30}"#).unwrap();
        assert_eq!(weights.title, 30);
        assert_eq!(weights.term, 5);
    }
}
