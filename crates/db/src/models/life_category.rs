use serde::{Deserialize, Serialize};
use sqlx::Type;
use strum_macros::{Display, EnumString};
use ts_rs::TS;

/// One of the six fixed areas of the life wheel.
///
/// Declaration order is significant: it is the tiebreak used when ranking
/// categories by score, so it must not be reordered.
#[derive(
    Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, Eq, Hash, TS, EnumString, Display,
)]
#[sqlx(type_name = "life_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LifeCategory {
    Health,
    Career,
    Relationships,
    Finances,
    PersonalGrowth,
    Leisure,
}

impl LifeCategory {
    pub const ALL: [LifeCategory; 6] = [
        LifeCategory::Health,
        LifeCategory::Career,
        LifeCategory::Relationships,
        LifeCategory::Finances,
        LifeCategory::PersonalGrowth,
        LifeCategory::Leisure,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LifeCategory::Health => "Health & Wellness",
            LifeCategory::Career => "Career & Work",
            LifeCategory::Relationships => "Relationships",
            LifeCategory::Finances => "Finances",
            LifeCategory::PersonalGrowth => "Personal Growth",
            LifeCategory::Leisure => "Leisure & Fun",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LifeCategory::Health => "Physical and mental well-being",
            LifeCategory::Career => "Professional growth and satisfaction",
            LifeCategory::Relationships => "Family, friends, and social connections",
            LifeCategory::Finances => "Money management and financial security",
            LifeCategory::PersonalGrowth => "Learning, skills, and self-development",
            LifeCategory::Leisure => "Hobbies, recreation, and enjoyment",
        }
    }

    /// Position in the fixed declaration order.
    pub fn ordinal(&self) -> usize {
        *self as usize
    }
}
