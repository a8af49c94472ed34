//! User actions on the garden, as pure functions.
//!
//! Every function either applies its full effect or returns an error having
//! touched nothing. The request-handling systems in `garden::mod` wrap these
//! and translate the results into events; tests and embedding hosts can call
//! them directly.

use crate::data::plant_def;
use crate::shared::*;

/// What a successful harvest produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestOutcome {
    pub kind: PlantKind,
    pub payout: u32,
    pub experience: u32,
    pub leveled_up: bool,
}

/// Plants a seed at `pos`.
///
/// Under `SeasonPolicy::Enforce`, off-season species are rejected outright.
/// Under `Advisory` they are accepted and left to struggle with the 0.3
/// off-season growth multiplier.
pub fn plant(
    garden: &mut GardenState,
    ledger: &mut Ledger,
    season: Season,
    policy: SeasonPolicy,
    pos: GridPos,
    kind: PlantKind,
    day: u32,
) -> Result<(), ActionError> {
    if garden.is_occupied(pos) {
        return Err(ActionError::OccupiedPlot);
    }
    if policy == SeasonPolicy::Enforce && !plant_def(kind).season.allows(season) {
        return Err(ActionError::WrongSeason);
    }
    ledger.take_seed(kind)?;
    garden.plants.insert(pos, PlantInstance::new(kind, day));
    Ok(())
}

/// Waters the plant at `pos`, filling it for `WATERED_DAYS_PER_USE` days and
/// draining the shared can.
pub fn water(
    garden: &mut GardenState,
    ledger: &mut Ledger,
    pos: GridPos,
    day: u32,
) -> Result<(), ActionError> {
    if !garden.is_occupied(pos) {
        return Err(ActionError::NoPlantAtPosition);
    }
    if ledger.water_can < WATER_CAN_COST_PER_USE {
        return Err(ActionError::WaterCanEmpty);
    }
    ledger.water_can -= WATER_CAN_COST_PER_USE;

    // Watering tops up to the ceiling; it does not stack past it.
    if let Some(plant) = garden.plants.get_mut(&pos) {
        plant.water_level = WATERED_DAYS_PER_USE;
        plant.last_watered_day = Some(day);
    }
    Ok(())
}

/// Applies one unit of fertilizer. Wears off after `FERTILIZER_EXPIRY_DAYS`.
pub fn fertilize(
    garden: &mut GardenState,
    ledger: &mut Ledger,
    pos: GridPos,
    day: u32,
) -> Result<(), ActionError> {
    let plant = garden
        .plants
        .get_mut(&pos)
        .ok_or(ActionError::NoPlantAtPosition)?;
    if plant.fertilized {
        return Err(ActionError::AlreadyFertilized);
    }
    if ledger.fertilizer == 0 {
        return Err(ActionError::NoFertilizer);
    }
    ledger.fertilizer -= 1;
    plant.fertilized = true;
    plant.last_fertilized_day = Some(day);
    Ok(())
}

/// Prunes the plant, shedding some accumulated pest damage and disease.
/// Wears off after `PRUNE_EXPIRY_DAYS`; re-pruning before then is rejected.
pub fn prune(garden: &mut GardenState, pos: GridPos, day: u32) -> Result<(), ActionError> {
    let plant = garden
        .plants
        .get_mut(&pos)
        .ok_or(ActionError::NoPlantAtPosition)?;
    if plant.pruned {
        return Err(ActionError::AlreadyPruned);
    }
    plant.pest_damage = (plant.pest_damage - PRUNE_PEST_REDUCTION).max(0.0);
    plant.disease_level = (plant.disease_level - PRUNE_DISEASE_REDUCTION).max(0.0);
    plant.pruned = true;
    plant.last_pruned_day = Some(day);
    Ok(())
}

/// Harvests a mature plant, paying out value and experience scaled by its
/// health factor.
pub fn harvest(
    garden: &mut GardenState,
    ledger: &mut Ledger,
    pos: GridPos,
) -> Result<HarvestOutcome, ActionError> {
    let plant = garden
        .plants
        .get(&pos)
        .ok_or(ActionError::NoPlantAtPosition)?;
    if !plant.is_mature() {
        return Err(ActionError::NotReady);
    }

    let def = plant_def(plant.kind);
    let health = plant.health_factor();
    let payout = (def.value as f32 * health).round() as u32;
    let experience = (def.experience as f32 * health).round() as u32;
    let kind = plant.kind;

    garden.plants.remove(&pos);
    ledger.credit(payout);
    let leveled_up = ledger.gain_experience(experience);

    Ok(HarvestOutcome {
        kind,
        payout,
        experience,
        leveled_up,
    })
}
