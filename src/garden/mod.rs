//! Garden domain — plant lifecycle from seed to harvest.
//!
//! The pure rules live in `actions` and `growth`; the systems here wire them
//! to the request events and the clock.

pub mod actions;
pub mod growth;

use bevy::prelude::*;

use crate::shared::*;

pub struct GardenPlugin;

impl Plugin for GardenPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                handle_plant_requests,
                handle_water_requests,
                handle_fertilize_requests,
                handle_prune_requests,
                handle_harvest_requests,
                grow_plants,
                on_day_started,
            )
                .run_if(in_state(GameState::Running)),
        );
    }
}

// ─── Request handlers ─────────────────────────────────────────────────────────

fn handle_plant_requests(
    mut requests: EventReader<PlantRequestEvent>,
    mut garden: ResMut<GardenState>,
    mut ledger: ResMut<Ledger>,
    env: Res<EnvironmentState>,
    config: Res<SimConfig>,
    mut planted_writer: EventWriter<PlantedEvent>,
    mut failed_writer: EventWriter<ActionFailedEvent>,
) {
    for req in requests.read() {
        match actions::plant(
            &mut garden,
            &mut ledger,
            env.season,
            config.season_policy,
            req.pos,
            req.kind,
            env.day_count,
        ) {
            Ok(()) => {
                info!("[Garden] Planted {:?} at {:?}", req.kind, req.pos);
                planted_writer.send(PlantedEvent {
                    pos: req.pos,
                    kind: req.kind,
                });
            }
            Err(error) => {
                warn!("[Garden] Plant {:?} at {:?} rejected: {}", req.kind, req.pos, error);
                failed_writer.send(ActionFailedEvent { error });
            }
        }
    }
}

fn handle_water_requests(
    mut requests: EventReader<WaterRequestEvent>,
    mut garden: ResMut<GardenState>,
    mut ledger: ResMut<Ledger>,
    env: Res<EnvironmentState>,
    mut failed_writer: EventWriter<ActionFailedEvent>,
) {
    for req in requests.read() {
        match actions::water(&mut garden, &mut ledger, req.pos, env.day_count) {
            Ok(()) => info!(
                "[Garden] Watered {:?} (can at {}/{})",
                req.pos, ledger.water_can, WATER_CAN_CAPACITY
            ),
            Err(error) => {
                warn!("[Garden] Water at {:?} rejected: {}", req.pos, error);
                failed_writer.send(ActionFailedEvent { error });
            }
        }
    }
}

fn handle_fertilize_requests(
    mut requests: EventReader<FertilizeRequestEvent>,
    mut garden: ResMut<GardenState>,
    mut ledger: ResMut<Ledger>,
    env: Res<EnvironmentState>,
    mut failed_writer: EventWriter<ActionFailedEvent>,
) {
    for req in requests.read() {
        match actions::fertilize(&mut garden, &mut ledger, req.pos, env.day_count) {
            Ok(()) => info!("[Garden] Fertilized {:?} ({} left)", req.pos, ledger.fertilizer),
            Err(error) => {
                warn!("[Garden] Fertilize at {:?} rejected: {}", req.pos, error);
                failed_writer.send(ActionFailedEvent { error });
            }
        }
    }
}

fn handle_prune_requests(
    mut requests: EventReader<PruneRequestEvent>,
    mut garden: ResMut<GardenState>,
    env: Res<EnvironmentState>,
    mut failed_writer: EventWriter<ActionFailedEvent>,
) {
    for req in requests.read() {
        match actions::prune(&mut garden, req.pos, env.day_count) {
            Ok(()) => info!("[Garden] Pruned {:?}", req.pos),
            Err(error) => {
                warn!("[Garden] Prune at {:?} rejected: {}", req.pos, error);
                failed_writer.send(ActionFailedEvent { error });
            }
        }
    }
}

fn handle_harvest_requests(
    mut requests: EventReader<HarvestRequestEvent>,
    mut garden: ResMut<GardenState>,
    mut ledger: ResMut<Ledger>,
    mut harvested_writer: EventWriter<HarvestedEvent>,
    mut level_writer: EventWriter<LevelUpEvent>,
    mut failed_writer: EventWriter<ActionFailedEvent>,
) {
    for req in requests.read() {
        match actions::harvest(&mut garden, &mut ledger, req.pos) {
            Ok(outcome) => {
                info!(
                    "[Garden] Harvested {:?} at {:?}: +{} money, +{} exp",
                    outcome.kind, req.pos, outcome.payout, outcome.experience
                );
                harvested_writer.send(HarvestedEvent {
                    pos: req.pos,
                    kind: outcome.kind,
                    payout: outcome.payout,
                    experience: outcome.experience,
                });
                if outcome.leveled_up {
                    info!("[Garden] Level up! Now level {}", ledger.level);
                    level_writer.send(LevelUpEvent { level: ledger.level });
                }
            }
            Err(error) => {
                warn!("[Garden] Harvest at {:?} rejected: {}", req.pos, error);
                failed_writer.send(ActionFailedEvent { error });
            }
        }
    }
}

// ─── Growth ───────────────────────────────────────────────────────────────────

/// Continuous-model growth: every tick advances each plant by the elapsed
/// sim-day fraction. Under the daily model this system does nothing; the day
/// boundary handler below takes over.
fn grow_plants(
    time: Res<Time>,
    config: Res<SimConfig>,
    env: Res<EnvironmentState>,
    mut garden: ResMut<GardenState>,
) {
    if config.growth_model != GrowthModel::Continuous {
        return;
    }
    let step_days = if config.day_length_secs > 0.0 {
        time.delta_secs() / config.day_length_secs
    } else {
        0.0
    };

    let mut rng = rand::thread_rng();
    growth::integrate_growth(&mut garden, &env, config.disease_chance, step_days, &mut rng);
}

/// Day-boundary upkeep: expire fertilizer/prune effects, and under the daily
/// growth model apply one full day of growth per started day.
fn on_day_started(
    mut days: EventReader<DayStartedEvent>,
    config: Res<SimConfig>,
    env: Res<EnvironmentState>,
    mut garden: ResMut<GardenState>,
) {
    for ev in days.read() {
        growth::daily_maintenance(&mut garden, ev.day);

        if config.growth_model == GrowthModel::Daily {
            let mut rng = rand::thread_rng();
            growth::integrate_growth(&mut garden, &env, config.disease_chance, 1.0, &mut rng);
        }
    }
}
