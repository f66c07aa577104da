//! Service taxonomy used for gap detection.

use allotment_shared::TaxonomyEntry;
use serde::{Deserialize, Serialize};

use super::relevance::GoalCorpus;
use crate::budget::{BudgetItem, DEFAULT_CATEGORY};

/// A service category and the goal keywords that make it relevant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCategory {
    /// Category name, matched against item categories.
    pub name: String,
    /// Lowercase keywords matched against goal text.
    pub keywords: Vec<String>,
}

impl ServiceCategory {
    /// Creates a category; keywords are lowercased and blanks dropped.
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            keywords: keywords
                .into_iter()
                .map(|kw| kw.as_ref().trim().to_lowercase())
                .filter(|kw| !kw.is_empty())
                .collect(),
        }
    }

    /// Whether any keyword occurs in the goal text.
    #[must_use]
    pub fn is_relevant_to(&self, corpus: &GoalCorpus) -> bool {
        self.keywords.iter().any(|kw| corpus.mentions(kw))
    }

    /// Whether `category` names this service category, by case-insensitive
    /// substring in either direction. Blank and default categories never match.
    #[must_use]
    pub fn is_covered_by(&self, category: &str) -> bool {
        let category = category.trim().to_lowercase();
        if category.is_empty() || category == DEFAULT_CATEGORY.to_lowercase() {
            return false;
        }
        let name = self.name.trim().to_lowercase();
        category.contains(&name) || name.contains(&category)
    }
}

/// The set of service categories the engine knows about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTaxonomy {
    categories: Vec<ServiceCategory>,
}

impl ServiceTaxonomy {
    /// Creates a taxonomy from explicit categories.
    #[must_use]
    pub fn new(categories: Vec<ServiceCategory>) -> Self {
        Self { categories }
    }

    /// Creates a taxonomy from configuration entries.
    #[must_use]
    pub fn from_entries(entries: &[TaxonomyEntry]) -> Self {
        Self::new(
            entries
                .iter()
                .map(|entry| ServiceCategory::new(entry.name.clone(), &entry.keywords))
                .collect(),
        )
    }

    /// Known categories, in declaration order.
    #[must_use]
    pub fn categories(&self) -> &[ServiceCategory] {
        &self.categories
    }

    /// Categories the goals call for that no item covers, in declaration order.
    #[must_use]
    pub fn missing_categories<'a>(
        &'a self,
        corpus: &GoalCorpus,
        items: &[BudgetItem],
    ) -> Vec<&'a ServiceCategory> {
        self.categories
            .iter()
            .filter(|category| category.is_relevant_to(corpus))
            .filter(|category| !items.iter().any(|item| category.is_covered_by(&item.category)))
            .collect()
    }
}

impl Default for ServiceTaxonomy {
    fn default() -> Self {
        Self::new(vec![
            ServiceCategory::new(
                "Communication Therapy",
                ["speech", "language", "communication", "express", "verbal"],
            ),
            ServiceCategory::new(
                "Occupational Therapy",
                ["fine motor", "sensory", "daily living", "handwriting", "dressing"],
            ),
            ServiceCategory::new(
                "Physical Therapy",
                ["mobility", "walking", "balance", "strength", "gross motor"],
            ),
            ServiceCategory::new(
                "Behavioral Support",
                ["behavior", "behaviour", "emotional", "regulation", "anxiety"],
            ),
            ServiceCategory::new(
                "Assistive Technology",
                ["device", "equipment", "aac", "wheelchair", "technology"],
            ),
            ServiceCategory::new(
                "Personal Care",
                ["hygiene", "bathing", "grooming", "toileting", "meal"],
            ),
            ServiceCategory::new(
                "Community Access",
                ["community", "social", "outing", "recreation", "friends"],
            ),
        ])
    }
}
