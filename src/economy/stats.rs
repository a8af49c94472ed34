//! GardenStats tracker — passive event listeners that increment the global
//! counters the achievement predicates watch. No game logic changes here;
//! this module is purely observational.

use bevy::prelude::*;

use crate::shared::*;

/// Increments `plants_planted` for every `PlantedEvent`.
pub fn track_planted(mut events: EventReader<PlantedEvent>, mut stats: ResMut<GardenStats>) {
    for _ev in events.read() {
        stats.plants_planted = stats.plants_planted.saturating_add(1);
    }
}

/// Increments `plants_harvested` and accumulates `money_earned` for every
/// `HarvestedEvent`.
pub fn track_harvested(mut events: EventReader<HarvestedEvent>, mut stats: ResMut<GardenStats>) {
    for ev in events.read() {
        stats.plants_harvested = stats.plants_harvested.saturating_add(1);
        stats.money_earned = stats.money_earned.saturating_add(ev.payout as u64);
    }
}

/// Increments `pests_eliminated` by the kill count of every pesticide
/// application.
pub fn track_pests_eliminated(
    mut events: EventReader<PestsRemovedEvent>,
    mut stats: ResMut<GardenStats>,
) {
    for ev in events.read() {
        stats.pests_eliminated = stats.pests_eliminated.saturating_add(ev.count);
    }
}

/// On each day boundary: counts the day, and counts a survived storm if the
/// sky was stormy when the boundary was crossed.
pub fn track_day_started(
    mut events: EventReader<DayStartedEvent>,
    env: Res<EnvironmentState>,
    mut stats: ResMut<GardenStats>,
) {
    for ev in events.read() {
        stats.days_played = stats.days_played.saturating_add(1);

        if env.weather == Weather::Stormy {
            stats.storms_survived = stats.storms_survived.saturating_add(1);
            info!(
                "[Stats] Survived a storm into day {} ({} total)",
                ev.day, stats.storms_survived
            );
        }
    }
}
