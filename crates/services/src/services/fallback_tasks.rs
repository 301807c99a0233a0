//! Hand-written task pools used whenever live generation is unavailable or unusable.

use db::models::life_category::LifeCategory;
use rand::Rng;

use super::task_generator::{GeneratedTask, TASKS_PER_DAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub estimated_minutes: i32,
    pub motivational_note: &'static str,
}

impl TaskTemplate {
    pub fn to_task(&self, category: LifeCategory) -> GeneratedTask {
        GeneratedTask {
            title: self.title.to_string(),
            description: self.description.to_string(),
            category,
            estimated_minutes: self.estimated_minutes,
            motivational_note: Some(self.motivational_note.to_string()),
        }
    }
}

const HEALTH: &[TaskTemplate] = &[
    TaskTemplate {
        title: "5-Minute Morning Stretch",
        description: "Do simple stretches: neck rolls, shoulder shrugs, touch your toes, and take 5 deep breaths.",
        estimated_minutes: 5,
        motivational_note: "Small movements create big changes. Your body will thank you!",
    },
    TaskTemplate {
        title: "Drink a Large Glass of Water",
        description: "Fill a large glass with water and drink it slowly. Add lemon if you have it.",
        estimated_minutes: 2,
        motivational_note: "Hydration is the foundation of energy. You're taking care of yourself!",
    },
];

const CAREER: &[TaskTemplate] = &[
    TaskTemplate {
        title: "Update One Line on LinkedIn",
        description: "Log into LinkedIn and update your headline or add one new skill to your profile.",
        estimated_minutes: 5,
        motivational_note: "Small steps forward are still progress. You're investing in your future!",
    },
    TaskTemplate {
        title: "Read One Industry Article",
        description: "Find and read one short article related to your field or dream career.",
        estimated_minutes: 8,
        motivational_note: "Knowledge is power. Every article makes you stronger!",
    },
];

const RELATIONSHIPS: &[TaskTemplate] = &[
    TaskTemplate {
        title: "Send One Thoughtful Message",
        description: "Text, call, or message one person you care about. Ask how they're doing or share something positive.",
        estimated_minutes: 5,
        motivational_note: "Connection heals. Someone will smile because of your message today!",
    },
    TaskTemplate {
        title: "Practice Active Listening",
        description: "In your next conversation, focus completely on the other person without thinking about your response.",
        estimated_minutes: 10,
        motivational_note: "Being fully present is a gift to others and yourself!",
    },
];

const FINANCES: &[TaskTemplate] = &[
    TaskTemplate {
        title: "Check One Bank Account",
        description: "Log into one bank account and review your recent transactions. Just observe, no judgment.",
        estimated_minutes: 5,
        motivational_note: "Awareness is the first step to financial freedom. You're being brave!",
    },
    TaskTemplate {
        title: "Track Today's Expenses",
        description: "Write down every purchase you make today, no matter how small.",
        estimated_minutes: 8,
        motivational_note: "Every dollar tracked is a dollar mastered. You're taking control!",
    },
];

const PERSONAL_GROWTH: &[TaskTemplate] = &[
    TaskTemplate {
        title: "Write Three Things You're Grateful For",
        description: "Write down three specific things you're grateful for today, no matter how small.",
        estimated_minutes: 5,
        motivational_note: "Gratitude transforms perspective. You're choosing to see the light!",
    },
    TaskTemplate {
        title: "Learn One New Word",
        description: "Look up one new word, understand its meaning, and try to use it in conversation today.",
        estimated_minutes: 7,
        motivational_note: "Your mind is growing every day. Knowledge is your superpower!",
    },
];

const LEISURE: &[TaskTemplate] = &[
    TaskTemplate {
        title: "Take 5 Photos of Beautiful Things",
        description: "Look for beauty around you and take 5 photos of things that catch your eye.",
        estimated_minutes: 10,
        motivational_note: "Beauty is everywhere when you look for it. You deserve joy!",
    },
    TaskTemplate {
        title: "Listen to One Favorite Song",
        description: "Play one song that makes you feel good and really listen to it, no multitasking.",
        estimated_minutes: 5,
        motivational_note: "Music feeds the soul. Let yourself feel the rhythm of life!",
    },
];

/// Fixed, non-empty pool of templates for `category`.
pub fn pool(category: LifeCategory) -> &'static [TaskTemplate] {
    match category {
        LifeCategory::Health => HEALTH,
        LifeCategory::Career => CAREER,
        LifeCategory::Relationships => RELATIONSHIPS,
        LifeCategory::Finances => FINANCES,
        LifeCategory::PersonalGrowth => PERSONAL_GROWTH,
        LifeCategory::Leisure => LEISURE,
    }
}

fn pick<R: Rng + ?Sized>(category: LifeCategory, rng: &mut R) -> GeneratedTask {
    let templates = pool(category);
    templates[rng.gen_range(0..templates.len())].to_task(category)
}

/// One task from each focus category, then one from a uniformly random category.
///
/// The third pick may land in a focus category again.
pub fn fallback_tasks<R: Rng + ?Sized>(focus: &[LifeCategory; 2], rng: &mut R) -> Vec<GeneratedTask> {
    let mut tasks: Vec<GeneratedTask> = focus.iter().map(|&c| pick(c, rng)).collect();

    let random_category = LifeCategory::ALL[rng.gen_range(0..LifeCategory::ALL.len())];
    tasks.push(pick(random_category, rng));

    tasks.truncate(TASKS_PER_DAY);
    tasks
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng, rngs::mock::StepRng};

    use super::*;

    #[test]
    fn test_every_pool_has_choices() {
        for category in LifeCategory::ALL {
            let templates = pool(category);
            assert!(templates.len() >= 2, "{category} pool too small");
            for template in templates {
                assert!(!template.title.is_empty());
                assert!(!template.description.is_empty());
                assert!(template.estimated_minutes > 0);
            }
        }
    }

    #[test]
    fn test_zero_source_picks_first_entries() {
        let mut rng = StepRng::new(0, 0);
        let tasks = fallback_tasks(&[LifeCategory::Health, LifeCategory::Career], &mut rng);

        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0], HEALTH[0].to_task(LifeCategory::Health));
        assert_eq!(tasks[1], CAREER[0].to_task(LifeCategory::Career));
        assert_eq!(tasks[2], HEALTH[0].to_task(LifeCategory::Health));
    }

    #[test]
    fn test_midpoint_source_picks_exact_entries() {
        // A constant 2^63 lands on the upper half of every range.
        let mut rng = StepRng::new(1 << 63, 0);
        let tasks = fallback_tasks(&[LifeCategory::Leisure, LifeCategory::Relationships], &mut rng);

        assert_eq!(tasks[0].title, LEISURE[1].title);
        assert_eq!(tasks[1].title, RELATIONSHIPS[1].title);
        assert_eq!(tasks[2].category, LifeCategory::Finances);
        assert_eq!(tasks[2].title, FINANCES[1].title);
    }

    #[test]
    fn test_focus_picks_come_from_focus_pools() {
        let mut rng = StdRng::seed_from_u64(42);
        for first in LifeCategory::ALL {
            for second in LifeCategory::ALL {
                if first == second {
                    continue;
                }
                for _ in 0..20 {
                    let tasks = fallback_tasks(&[first, second], &mut rng);
                    assert_eq!(tasks.len(), 3);
                    assert_eq!(tasks[0].category, first);
                    assert_eq!(tasks[1].category, second);
                    assert!(pool(first).iter().any(|t| t.title == tasks[0].title));
                    assert!(pool(second).iter().any(|t| t.title == tasks[1].title));
                    assert!(
                        pool(tasks[2].category)
                            .iter()
                            .any(|t| t.title == tasks[2].title)
                    );
                }
            }
        }
    }
}
