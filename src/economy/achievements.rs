//! Achievement system for Verdant.
//!
//! Each achievement is a typed predicate over the `GardenStats` snapshot plus
//! a one-time money reward. The checker runs every frame; already-unlocked
//! ids are skipped, so evaluation is idempotent by construction.

use bevy::prelude::*;

use crate::shared::*;

/// Static description of a single achievement.
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub reward: u32,
    pub unlocked_when: fn(&GardenStats) -> bool,
}

pub const ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: "first_plant",
        name: "First Plant",
        description: "Plant your first seed",
        reward: 50,
        unlocked_when: |stats| stats.plants_planted >= 1,
    },
    AchievementDef {
        id: "green_thumb",
        name: "Green Thumb",
        description: "Plant 10 seeds",
        reward: 100,
        unlocked_when: |stats| stats.plants_planted >= 10,
    },
    AchievementDef {
        id: "harvest_master",
        name: "Harvest Master",
        description: "Harvest 25 plants",
        reward: 200,
        unlocked_when: |stats| stats.plants_harvested >= 25,
    },
    AchievementDef {
        id: "weather_warrior",
        name: "Weather Warrior",
        description: "Survive 5 storms",
        reward: 150,
        unlocked_when: |stats| stats.storms_survived >= 5,
    },
    AchievementDef {
        id: "pest_hunter",
        name: "Pest Hunter",
        description: "Eliminate 20 pests",
        reward: 100,
        unlocked_when: |stats| stats.pests_eliminated >= 20,
    },
];

/// Unlocks every not-yet-unlocked achievement whose predicate holds, crediting
/// its reward. Returns the newly unlocked definitions.
pub fn evaluate_achievements(
    stats: &GardenStats,
    achievements: &mut Achievements,
    ledger: &mut Ledger,
) -> Vec<&'static AchievementDef> {
    let mut newly_unlocked = Vec::new();

    for def in ACHIEVEMENTS {
        if achievements.is_unlocked(def.id) {
            continue;
        }
        if (def.unlocked_when)(stats) {
            achievements.unlocked.push(def.id.to_string());
            ledger.credit(def.reward);
            newly_unlocked.push(def);
        }
    }
    newly_unlocked
}

/// Runs every frame during `GameState::Running`.
pub fn check_achievements(
    stats: Res<GardenStats>,
    mut achievements: ResMut<Achievements>,
    mut ledger: ResMut<Ledger>,
    mut events: EventWriter<AchievementUnlockedEvent>,
) {
    for def in evaluate_achievements(&stats, &mut achievements, &mut ledger) {
        info!(
            "[Achievements] Unlocked: \"{}\" — {} (+{} money)",
            def.name, def.description, def.reward
        );
        events.send(AchievementUnlockedEvent {
            id: def.id.to_string(),
            name: def.name.to_string(),
            reward: def.reward,
        });
    }
}
