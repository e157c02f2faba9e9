//! The fixed achievement catalog. Definitions are code, not data: earned
//! records in the store carry a copy of the display fields, so renaming a
//! catalog entry never rewrites history.

use once_cell::sync::Lazy;

use crate::connectors::Platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementRule {
    /// Total problems solved across all platforms.
    TotalSolved,
    /// Current consecutive-day streak.
    Streak,
    /// Platforms with at least one solved problem.
    PlatformsUsed,
    /// Problems solved on today's log entry.
    DailySolved,
    /// Current rating on one platform.
    PlatformRating(Platform),
}

#[derive(Debug, Clone, Copy)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub threshold: i64,
    pub rule: AchievementRule,
}

pub static CATALOG: Lazy<Vec<AchievementDef>> = Lazy::new(|| {
    vec![
        AchievementDef {
            id: "first-solve",
            name: "First Steps",
            description: "Solve your first problem",
            icon: "🎯",
            threshold: 1,
            rule: AchievementRule::TotalSolved,
        },
        AchievementDef {
            id: "solved-50",
            name: "Getting Warmed Up",
            description: "Solve 50 problems",
            icon: "🏃",
            threshold: 50,
            rule: AchievementRule::TotalSolved,
        },
        AchievementDef {
            id: "solved-100",
            name: "Century",
            description: "Solve 100 problems",
            icon: "💯",
            threshold: 100,
            rule: AchievementRule::TotalSolved,
        },
        AchievementDef {
            id: "solved-500",
            name: "Problem Crusher",
            description: "Solve 500 problems",
            icon: "🔨",
            threshold: 500,
            rule: AchievementRule::TotalSolved,
        },
        AchievementDef {
            id: "solved-1000",
            name: "Grinding Grandmaster",
            description: "Solve 1000 problems",
            icon: "👑",
            threshold: 1000,
            rule: AchievementRule::TotalSolved,
        },
        AchievementDef {
            id: "streak-7",
            name: "Week Warrior",
            description: "Solve problems 7 days in a row",
            icon: "🔥",
            threshold: 7,
            rule: AchievementRule::Streak,
        },
        AchievementDef {
            id: "streak-30",
            name: "Monthly Devotion",
            description: "Solve problems 30 days in a row",
            icon: "📅",
            threshold: 30,
            rule: AchievementRule::Streak,
        },
        AchievementDef {
            id: "streak-100",
            name: "Unstoppable",
            description: "Solve problems 100 days in a row",
            icon: "⚡",
            threshold: 100,
            rule: AchievementRule::Streak,
        },
        AchievementDef {
            id: "platforms-2",
            name: "Explorer",
            description: "Solve problems on 2 different platforms",
            icon: "🧭",
            threshold: 2,
            rule: AchievementRule::PlatformsUsed,
        },
        AchievementDef {
            id: "platforms-4",
            name: "Polyglot Competitor",
            description: "Solve problems on every supported platform",
            icon: "🌍",
            threshold: 4,
            rule: AchievementRule::PlatformsUsed,
        },
        AchievementDef {
            id: "daily-10",
            name: "Marathon Day",
            description: "Solve 10 problems in a single day",
            icon: "🏅",
            threshold: 10,
            rule: AchievementRule::DailySolved,
        },
        AchievementDef {
            id: "cf-specialist",
            name: "Codeforces Specialist",
            description: "Reach 1400 rating on Codeforces",
            icon: "🔵",
            threshold: 1400,
            rule: AchievementRule::PlatformRating(Platform::Codeforces),
        },
        AchievementDef {
            id: "cf-candidate-master",
            name: "Candidate Master",
            description: "Reach 1900 rating on Codeforces",
            icon: "🟣",
            threshold: 1900,
            rule: AchievementRule::PlatformRating(Platform::Codeforces),
        },
        AchievementDef {
            id: "lc-guardian",
            name: "Contest Guardian",
            description: "Reach 2000 contest rating on LeetCode",
            icon: "🛡️",
            threshold: 2000,
            rule: AchievementRule::PlatformRating(Platform::LeetCode),
        },
    ]
});
