//! Keyword relevance between budget items and goal text.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use super::jitter::Jitter;
use super::types::{Goal, Subgoal};
use crate::budget::BudgetItem;

/// Keyword matches needed for a full relevance score.
pub const FULL_MATCH_COUNT: i64 = 5;

/// Words no longer than this are ignored when matching.
const MIN_KEYWORD_LEN: usize = 3;

/// Lowercased goal and subgoal text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalCorpus {
    text: String,
    words: Vec<String>,
}

impl GoalCorpus {
    /// Collects titles and descriptions of every goal and subgoal.
    #[must_use]
    pub fn new(goals: &[Goal], subgoals: &[Subgoal]) -> Self {
        let parts = goals
            .iter()
            .flat_map(|goal| [goal.title.as_str(), goal.description.as_str()])
            .chain(
                subgoals
                    .iter()
                    .flat_map(|sub| [sub.title.as_str(), sub.description.as_str()]),
            );
        Self::from_text(&parts.collect::<Vec<_>>().join(" "))
    }

    /// Builds a corpus from raw text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let text = text.to_lowercase();
        let words = tokenize(&text)
            .filter(|word| word.chars().count() > MIN_KEYWORD_LEN)
            .collect();
        Self { text, words }
    }

    /// Whether there is no goal text at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Whether `phrase` occurs anywhere in the text.
    #[must_use]
    pub fn mentions(&self, phrase: &str) -> bool {
        !phrase.is_empty() && self.text.contains(phrase)
    }

    /// Corpus words that overlap `keyword` by substring either way.
    #[must_use]
    pub fn overlaps(&self, keyword: &str) -> usize {
        self.words
            .iter()
            .filter(|word| word.contains(keyword) || keyword.contains(word.as_str()))
            .count()
    }
}

/// Splits on anything that is not alphanumeric, lowercased.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

/// Distinct keywords of an item: description and category words longer
/// than three characters.
#[must_use]
pub fn item_keywords(item: &BudgetItem) -> BTreeSet<String> {
    tokenize(&item.description)
        .chain(tokenize(&item.category))
        .filter(|word| word.chars().count() > MIN_KEYWORD_LEN)
        .collect()
}

/// Unjittered relevance: `min(1, matches / 5)`.
#[must_use]
pub fn base_relevance(item: &BudgetItem, corpus: &GoalCorpus) -> Decimal {
    let matches: usize = item_keywords(item)
        .iter()
        .map(|keyword| corpus.overlaps(keyword))
        .sum();
    let matches = i64::try_from(matches).unwrap_or(i64::MAX);
    (Decimal::from(matches) / Decimal::from(FULL_MATCH_COUNT)).min(Decimal::ONE)
}

/// Jittered relevance clamped to [0, 1].
pub fn relevance_score(item: &BudgetItem, corpus: &GoalCorpus, jitter: &mut Jitter) -> Decimal {
    (base_relevance(item, corpus) * jitter.scale()).clamp(Decimal::ZERO, Decimal::ONE)
}
