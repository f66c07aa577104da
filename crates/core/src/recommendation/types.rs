//! Goal inputs and recommendation outputs.

use allotment_shared::types::{BudgetItemId, GoalId, SubgoalId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A participant goal. Only its text is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Goal ID.
    pub id: GoalId,
    /// Title.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Optional priority label.
    #[serde(default)]
    pub priority: Option<String>,
    /// Optional status label.
    #[serde(default)]
    pub status: Option<String>,
}

/// A step towards a goal. Only its text is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subgoal {
    /// Subgoal ID.
    pub id: SubgoalId,
    /// Parent goal.
    #[serde(default)]
    pub goal_id: Option<GoalId>,
    /// Title.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Optional status label.
    #[serde(default)]
    pub status: Option<String>,
}

/// What a recommendation proposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// Use more of an under-utilized item.
    UtilizationIncrease,
    /// Fund a goal-relevant category with no budget item.
    MissingCategory,
    /// Look for a cheaper substitute for an expensive, little-used item.
    CostSubstitution,
}

/// Expected impact of acting on a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    /// High impact.
    High,
    /// Medium impact.
    Medium,
    /// Low impact.
    Low,
}

impl ImpactLevel {
    /// Severity rank; higher sorts first.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

/// A prioritized, human-readable recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Kind of recommendation.
    pub kind: RecommendationKind,
    /// Short title.
    pub title: String,
    /// Longer explanation.
    pub description: String,
    /// Expected impact.
    pub impact: ImpactLevel,
    /// Goal relevance in [0, 1].
    pub relevance: Decimal,
    /// Item the recommendation is about, if any.
    pub item_id: Option<BudgetItemId>,
    /// Service category the recommendation is about, if any.
    pub category: Option<String>,
}
