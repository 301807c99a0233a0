//! Picks the focus areas for today's tasks: the two lowest-scoring categories.

use db::models::{life_assessment::AssessmentScores, life_category::LifeCategory};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A category paired with its score, used only for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct CategoryScore {
    pub category: LifeCategory,
    pub score: i32,
}

/// All six categories ordered by ascending score. Ties keep declaration order.
pub fn rank_categories(scores: &AssessmentScores) -> Vec<CategoryScore> {
    let mut ranked: Vec<CategoryScore> = LifeCategory::ALL
        .iter()
        .map(|&category| CategoryScore {
            category,
            score: scores.score(category),
        })
        .collect();
    // sort_by_key is stable
    ranked.sort_by_key(|entry| entry.score);
    ranked
}

/// The two weakest categories, weakest first.
pub fn weakest_categories(scores: &AssessmentScores) -> [LifeCategory; 2] {
    let ranked = rank_categories(scores);
    [ranked[0].category, ranked[1].category]
}
