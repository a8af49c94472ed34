//! Growth integration and daily upkeep.
//!
//! The effective growth rate is the product of every condition the plant
//! lives under:
//!
//!   rate = (1 / growth_days)
//!        * water      (1.5 watered  / 0.5 dry)
//!        * fertilizer (1.5 active   / 1.0 none)
//!        * weather    (Sunny 1.2, Rainy 1.5, Stormy 0.8, Snowy 0.3)
//!        * season     (1.5 on-season, 1.0 any-season, 0.3 off-season)
//!        * pests      (max(0.1, 1 - pest_damage))
//!
//! Growth only ever moves up, and is capped at 1.0.

use rand::Rng;

use crate::data::plant_def;
use crate::shared::*;

pub const WATERED_MULTIPLIER: f32 = 1.5;
pub const DRY_MULTIPLIER: f32 = 0.5;
pub const FERTILIZED_MULTIPLIER: f32 = 1.5;
/// Pest damage can slow growth to a crawl but never stop it entirely.
pub const PEST_FLOOR: f32 = 0.1;
/// Disease gained per successful disease roll.
pub const DISEASE_INCREMENT: f32 = 0.1;

/// Effective per-day growth rate for one plant under the given environment.
pub fn effective_rate(plant: &PlantInstance, env: &EnvironmentState) -> f32 {
    let def = plant_def(plant.kind);
    let base = 1.0 / def.growth_days;
    let water = if plant.water_level > 0.0 {
        WATERED_MULTIPLIER
    } else {
        DRY_MULTIPLIER
    };
    let fertilizer = if plant.fertilized {
        FERTILIZED_MULTIPLIER
    } else {
        1.0
    };
    let pests = (1.0 - plant.pest_damage).max(PEST_FLOOR);

    base * water
        * fertilizer
        * env.weather.growth_multiplier()
        * def.season.multiplier(env.season)
        * pests
}

/// Advances every plant by `step_days` of simulated time.
///
/// Also decays water levels and rolls the per-step disease check, scaled by
/// each species' disease resistance.
pub fn integrate_growth(
    garden: &mut GardenState,
    env: &EnvironmentState,
    disease_chance: f64,
    step_days: f32,
    rng: &mut impl Rng,
) {
    for plant in garden.plants.values_mut() {
        if !plant.is_mature() {
            let rate = effective_rate(plant, env);
            plant.growth = (plant.growth + rate * step_days).min(1.0);
        }

        plant.water_level = (plant.water_level - step_days).max(0.0);

        let def = plant_def(plant.kind);
        let chance = (disease_chance * (1.0 - def.disease_resistance) as f64).clamp(0.0, 1.0);
        if chance > 0.0 && rng.gen_bool(chance) {
            plant.disease_level = (plant.disease_level + DISEASE_INCREMENT).min(1.0);
        }
    }
}

/// Expires fertilizer and prune effects that have run their course.
/// Called once per day boundary.
pub fn daily_maintenance(garden: &mut GardenState, day: u32) {
    for plant in garden.plants.values_mut() {
        if plant.fertilized {
            let applied = plant.last_fertilized_day.unwrap_or(plant.planted_on_day);
            if day.saturating_sub(applied) > FERTILIZER_EXPIRY_DAYS {
                plant.fertilized = false;
            }
        }
        if plant.pruned {
            let applied = plant.last_pruned_day.unwrap_or(plant.planted_on_day);
            if day.saturating_sub(applied) > PRUNE_EXPIRY_DAYS {
                plant.pruned = false;
            }
        }
    }
}
